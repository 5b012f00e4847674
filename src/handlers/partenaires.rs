// src/handlers/partenaires.rs

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
    middleware::agence::AgenceScope,
    models::partenaire::{Partenaire, PartenairePayload},
};

// POST /api/partenaires
#[utoipa::path(
    post,
    path = "/api/partenaires",
    tag = "Partenaires",
    request_body = PartenairePayload,
    responses((status = 201, description = "Compagnie partenaire créée", body = Partenaire)),
    security(("api_jwt" = []))
)]
pub async fn create_partenaire(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Json(payload): Json<PartenairePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let partenaire = app_state
        .partenaire_service
        .create_partenaire(agence, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(partenaire)))
}

// GET /api/partenaires
#[utoipa::path(
    get,
    path = "/api/partenaires",
    tag = "Partenaires",
    responses((status = 200, description = "Liste des partenaires", body = Vec<Partenaire>)),
    security(("api_jwt" = []))
)]
pub async fn list_partenaires(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
) -> Result<Json<Vec<Partenaire>>, AppError> {
    let partenaires = app_state.partenaire_service.list_partenaires(agence).await?;
    Ok(Json(partenaires))
}

// GET /api/partenaires/{id}
#[utoipa::path(
    get,
    path = "/api/partenaires/{id}",
    tag = "Partenaires",
    params(("id" = Uuid, Path, description = "ID du partenaire")),
    responses(
        (status = 200, description = "Le partenaire", body = Partenaire),
        (status = 404, description = "Partenaire introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_partenaire(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Partenaire>, AppError> {
    let partenaire = app_state.partenaire_service.get_partenaire(agence, id).await?;
    Ok(Json(partenaire))
}

// PUT /api/partenaires/{id}
#[utoipa::path(
    put,
    path = "/api/partenaires/{id}",
    tag = "Partenaires",
    params(("id" = Uuid, Path, description = "ID du partenaire")),
    request_body = PartenairePayload,
    responses(
        (status = 200, description = "Partenaire remplacé", body = Partenaire),
        (status = 404, description = "Partenaire introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_partenaire(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<PartenairePayload>,
) -> Result<Json<Partenaire>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let partenaire = app_state
        .partenaire_service
        .update_partenaire(agence, id, &payload)
        .await?;

    Ok(Json(partenaire))
}

// DELETE /api/partenaires/{id}
#[utoipa::path(
    delete,
    path = "/api/partenaires/{id}",
    tag = "Partenaires",
    params(("id" = Uuid, Path, description = "ID du partenaire")),
    responses(
        (status = 204, description = "Partenaire supprimé"),
        (status = 404, description = "Partenaire introuvable"),
        (status = 409, description = "Des contrats référencent encore ce partenaire")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_partenaire(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.partenaire_service.delete_partenaire(agence, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
