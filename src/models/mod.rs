//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod company;
pub mod user;
pub mod vehicle;

pub use company::*;
pub use user::*;
pub use vehicle::*;
