//! Authentication middleware
//!
//! Axum middleware for JWT authentication and report role checks.
//!
//! | Failure | Status | Code |
//! |---------|--------|------|
//! | no `Authorization` header | 401 | NotAuthenticated |
//! | expired token | 401 | TokenExpired |
//! | malformed / bad signature | 401 | TokenInvalid |
//! | role not admitted | 403 | PermissionDenied |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Require a valid bearer token
///
/// On success the decoded [`CurrentUser`] is inserted into request extensions.
/// CORS preflight (`OPTIONS`) passes through untouched.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().path().to_string());
            return Err(AppError::not_authenticated());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().path().to_string()
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Admit only report roles; must run after [`require_auth`]
pub async fn require_report_access(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;

    if !user.can_view_reports() {
        security_log!(
            "WARN",
            "permission_denied",
            user_id = user.id.clone(),
            username = user.username.clone(),
            user_role = user.role.clone()
        );
        return Err(AppError::permission_denied(format!(
            "Role '{}' may not view reports",
            user.role
        )));
    }

    Ok(next.run(req).await)
}
