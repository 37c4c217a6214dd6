//! Authentication middleware
//!
//! JWT authentication and role-based access control

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use shared::models::{Action, Resource, Role};

use crate::error::AppError;
use crate::services::auth::verify_token;
use crate::AppState;

/// Authenticated user information extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl AuthUser {
    /// Enforce a role capability. Handlers call this before acting.
    pub fn require(&self, resource: Resource, action: Action) -> Result<(), AppError> {
        if self.role.permits(resource, action) {
            Ok(())
        } else {
            Err(AppError::InsufficientPermissions)
        }
    }
}

/// Extractor for the authenticated user placed in request extensions
/// by [`auth_middleware`].
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::InvalidToken)
    }
}

/// Validates the `Authorization: Bearer` header and injects [`AuthUser`]
/// into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => return Err(AppError::InvalidToken),
    };

    let claims = verify_token(token, &state.config.jwt.secret)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

    request.extensions_mut().insert(AuthUser {
        user_id,
        email: claims.email,
        name: claims.name,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
