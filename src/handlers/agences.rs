// src/handlers/agences.rs
//
// Réservé au superadmin ; la vérification vit dans le service.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::agence::{Agence, AgencePayload},
};

// POST /api/agences
#[utoipa::path(
    post,
    path = "/api/agences",
    tag = "Agences",
    request_body = AgencePayload,
    responses(
        (status = 201, description = "Agence créée", body = Agence),
        (status = 403, description = "Réservé au superadmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_agence(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    Json(payload): Json<AgencePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let agence = app_state
        .agence_service
        .create_agence(&utilisateur, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(agence)))
}

// GET /api/agences
#[utoipa::path(
    get,
    path = "/api/agences",
    tag = "Agences",
    responses(
        (status = 200, description = "Toutes les agences", body = Vec<Agence>),
        (status = 403, description = "Réservé au superadmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_agences(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
) -> Result<Json<Vec<Agence>>, AppError> {
    let agences = app_state.agence_service.list_agences(&utilisateur).await?;
    Ok(Json(agences))
}

// GET /api/agences/{id}
#[utoipa::path(
    get,
    path = "/api/agences/{id}",
    tag = "Agences",
    params(("id" = Uuid, Path, description = "ID de l'agence")),
    responses(
        (status = 200, description = "L'agence", body = Agence),
        (status = 404, description = "Agence introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_agence(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Agence>, AppError> {
    let agence = app_state.agence_service.get_agence(&utilisateur, id).await?;
    Ok(Json(agence))
}

// PUT /api/agences/{id}
#[utoipa::path(
    put,
    path = "/api/agences/{id}",
    tag = "Agences",
    params(("id" = Uuid, Path, description = "ID de l'agence")),
    request_body = AgencePayload,
    responses(
        (status = 200, description = "Agence remplacée", body = Agence),
        (status = 404, description = "Agence introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_agence(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AgencePayload>,
) -> Result<Json<Agence>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let agence = app_state
        .agence_service
        .update_agence(&utilisateur, id, &payload)
        .await?;

    Ok(Json(agence))
}

// DELETE /api/agences/{id}
#[utoipa::path(
    delete,
    path = "/api/agences/{id}",
    tag = "Agences",
    params(("id" = Uuid, Path, description = "ID de l'agence")),
    responses(
        (status = 204, description = "Agence supprimée"),
        (status = 404, description = "Agence introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_agence(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.agence_service.delete_agence(&utilisateur, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
