// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        AuthResponse, ForgotPasswordPayload, LoginPayload, RegisterPayload, ResetPasswordPayload,
        Utilisateur,
    },
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterPayload,
    responses(
        (status = 200, description = "Compte créé, token retourné", body = AuthResponse),
        (status = 400, description = "Données invalides"),
        (status = 409, description = "E-mail déjà utilisé")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .register_user(
            &payload.email,
            &payload.password,
            &payload.nom,
            &payload.prenom,
            payload.role,
            payload.agence_id,
        )
        .await?;

    Ok(Json(AuthResponse { token }))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Connexion réussie", body = AuthResponse),
        (status = 401, description = "Identifiants invalides")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses((status = 200, description = "Utilisateur courant", body = Utilisateur)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(utilisateur): AuthenticatedUser) -> Json<Utilisateur> {
    Json(utilisateur)
}

// GET /api/auth/users
#[utoipa::path(
    get,
    path = "/api/auth/users",
    tag = "Auth",
    responses(
        (status = 200, description = "Liste des comptes", body = Vec<Utilisateur>),
        (status = 403, description = "Rôle insuffisant")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
) -> Result<Json<Vec<Utilisateur>>, AppError> {
    let users = app_state.auth_service.list_users(&utilisateur).await?;
    Ok(Json(users))
}

// POST /api/auth/forgot-password
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "Auth",
    request_body = ForgotPasswordPayload,
    responses((status = 200, description = "Toujours 200, que l'adresse existe ou non"))
)]
pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    app_state.auth_service.forgot_password(&payload.email).await?;
    Ok(StatusCode::OK)
}

// POST /api/auth/reset-password
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "Auth",
    request_body = ResetPasswordPayload,
    responses(
        (status = 200, description = "Mot de passe remplacé"),
        (status = 401, description = "Jeton inconnu ou expiré")
    )
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    app_state
        .auth_service
        .reset_password(&payload.email, &payload.token, &payload.new_password)
        .await?;
    Ok(StatusCode::OK)
}
