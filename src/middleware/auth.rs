//! Middleware de autenticación Basic
//!
//! Toda request pasa por aquí. Las rutas de documentación y de consola
//! quedan exentas; el resto debe traer `Authorization: Basic base64(email:password)`
//! con credenciales válidas en la tabla users.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Prefijos que no requieren autenticación
pub const EXEMPT_PATH_PREFIXES: [&str; 3] = ["/swagger-ui", "/v3/api-docs", "/h2-console"];

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Credenciales decodificadas del header
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

pub fn is_exempt_path(path: &str) -> bool {
    EXEMPT_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Decodifica `Basic <base64>`; separa en el primer `:` para admitir `:` en la contraseña
pub fn parse_basic_credentials(header_value: Option<&str>) -> AppResult<BasicCredentials> {
    let value = header_value.ok_or(AppError::CredentialsMissing)?;

    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or(AppError::CredentialsMissing)?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return Err(AppError::CredentialsMissing);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::CredentialsMissing)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AppError::CredentialsMissing)?;

    let (email, password) = decoded
        .split_once(':')
        .ok_or(AppError::CredentialsMissing)?;
    if email.is_empty() {
        return Err(AppError::CredentialsMissing);
    }

    Ok(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Middleware de autenticación Basic contra el almacén de credenciales
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();
    if is_exempt_path(&path) {
        return Ok(next.run(request).await);
    }

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let credentials = parse_basic_credentials(header_value).map_err(|e| {
        tracing::warn!("🔒 Request sin credenciales válidas: {}", path);
        e
    })?;

    let user = state
        .auth
        .verify_credentials(&credentials.email, &credentials.password)
        .await
        .map_err(|e| {
            tracing::warn!("🔒 Credenciales rechazadas para {} en {}", credentials.email, path);
            e
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_exempt_paths() {
        assert!(is_exempt_path("/swagger-ui"));
        assert!(is_exempt_path("/swagger-ui/index.html"));
        assert!(is_exempt_path("/v3/api-docs"));
        assert!(is_exempt_path("/h2-console/login.do"));
        assert!(!is_exempt_path("/companies"));
        assert!(!is_exempt_path("/api/swagger-ui"));
    }

    #[test]
    fn test_parse_valid_header() {
        let credentials = parse_basic_credentials(Some(basic("admin@parking.com:pa:ss").as_str())).unwrap();
        assert_eq!(credentials.email, "admin@parking.com");
        assert_eq!(credentials.password, "pa:ss");
    }

    #[test]
    fn test_parse_missing_or_malformed() {
        let cases = [
            None,
            Some("".to_string()),
            Some("Bearer abc".to_string()),
            Some("Basic".to_string()),
            Some("Basic not-base64!!".to_string()),
            Some(basic("no-colon")),
            Some(basic(":password")),
        ];

        for case in cases {
            let result = parse_basic_credentials(case.as_deref());
            assert!(
                matches!(result, Err(AppError::CredentialsMissing)),
                "expected CredentialsMissing for {:?}",
                case
            );
        }
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let header = format!("basic {}", STANDARD.encode("a@b.com:x"));
        assert!(parse_basic_credentials(Some(header.as_str())).is_ok());
    }
}
