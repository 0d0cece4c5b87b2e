//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, extracción de
//! requests y paginación.

pub mod errors;
pub mod extractors;
pub mod pagination;

pub use errors::*;
pub use extractors::*;
pub use pagination::*;
