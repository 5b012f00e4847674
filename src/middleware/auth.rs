// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::Utilisateur};

// Le middleware de garde : valide le Bearer token et range l'utilisateur
// dans les extensions de la requête.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let utilisateur = app_state.auth_service.validate_token(token).await?;
            request.extensions_mut().insert(utilisateur);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::TokenInvalide)
}

// Extracteur pour obtenir l'utilisateur authentifié dans les handlers
pub struct AuthenticatedUser(pub Utilisateur);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Utilisateur>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::TokenInvalide)
    }
}
