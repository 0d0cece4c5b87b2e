//! Verificación de credenciales
//!
//! Compara la contraseña recibida contra el hash bcrypt guardado para el email.

use std::sync::Arc;

use crate::models::User;
use crate::repositories::UserRepository;
use crate::utils::errors::{AppError, AppResult};

pub const USER_NOT_AUTHORIZED: &str = "User not authorized";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Devuelve el usuario si el email existe y la contraseña coincide con su hash
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(USER_NOT_AUTHORIZED.to_string()))?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        // bcrypt es costoso en CPU: fuera del executor
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?;

        match verified {
            Ok(true) => Ok(user),
            Ok(false) => Err(AppError::Unauthorized(USER_NOT_AUTHORIZED.to_string())),
            Err(e) => {
                tracing::warn!("⚠️ Hash inválido para el usuario {}: {}", user.id, e);
                Err(AppError::Unauthorized(USER_NOT_AUTHORIZED.to_string()))
            }
        }
    }

    /// Crea el usuario si no existe. Devuelve `true` cuando lo creó.
    pub async fn ensure_user(&self, email: &str, password: &str) -> AppResult<bool> {
        if self.users.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        self.users
            .create(&User::new(email.to_string(), password_hash))
            .await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;

    // Costo mínimo aceptado por bcrypt para que los tests sean rápidos
    const TEST_COST: u32 = 4;

    async fn service_with_user() -> AuthService {
        let store = Arc::new(InMemoryStore::new());
        let service = AuthService::new(store, TEST_COST);
        assert!(service.ensure_user("admin@parking.com", "s3cret").await.unwrap());
        service
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let service = service_with_user().await;
        let user = service
            .verify_credentials("admin@parking.com", "s3cret")
            .await
            .unwrap();
        assert_eq!(user.email, "admin@parking.com");
        assert_ne!(user.password_hash, "s3cret");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let service = service_with_user().await;
        let result = service.verify_credentials("admin@parking.com", "s3cre7").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let service = service_with_user().await;
        let result = service.verify_credentials("nobody@parking.com", "s3cret").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let service = service_with_user().await;
        assert!(!service.ensure_user("admin@parking.com", "other").await.unwrap());
        // La contraseña original sigue vigente
        assert!(service
            .verify_credentials("admin@parking.com", "s3cret")
            .await
            .is_ok());
    }
}
