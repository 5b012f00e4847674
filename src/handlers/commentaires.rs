// src/handlers/commentaires.rs
//
// Le chemin est au singulier (/api/commentaire), tel que le front le
// consomme depuis toujours.

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
    middleware::{agence::AgenceScope, auth::AuthenticatedUser},
    models::commentaire::{Commentaire, CreateCommentairePayload, UpdateCommentairePayload},
};

// POST /api/commentaire
#[utoipa::path(
    post,
    path = "/api/commentaire",
    tag = "Commentaires",
    request_body = CreateCommentairePayload,
    responses(
        (status = 201, description = "Commentaire créé, signé par l'appelant", body = Commentaire),
        (status = 404, description = "Contact introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_commentaire(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    AgenceScope(agence): AgenceScope,
    Json(payload): Json<CreateCommentairePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let commentaire = app_state
        .commentaire_service
        .create_commentaire(agence, &utilisateur, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(commentaire)))
}

// GET /api/commentaire/{id}
#[utoipa::path(
    get,
    path = "/api/commentaire/{id}",
    tag = "Commentaires",
    params(("id" = Uuid, Path, description = "ID du commentaire")),
    responses(
        (status = 200, description = "Le commentaire", body = Commentaire),
        (status = 404, description = "Commentaire introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_commentaire(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Commentaire>, AppError> {
    let commentaire = app_state.commentaire_service.get_commentaire(agence, id).await?;
    Ok(Json(commentaire))
}

// PUT /api/commentaire/{id}
#[utoipa::path(
    put,
    path = "/api/commentaire/{id}",
    tag = "Commentaires",
    params(("id" = Uuid, Path, description = "ID du commentaire")),
    request_body = UpdateCommentairePayload,
    responses(
        (status = 200, description = "Commentaire remplacé", body = Commentaire),
        (status = 404, description = "Commentaire introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_commentaire(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCommentairePayload>,
) -> Result<Json<Commentaire>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let commentaire = app_state
        .commentaire_service
        .update_commentaire(agence, id, &payload)
        .await?;

    Ok(Json(commentaire))
}

// DELETE /api/commentaire/{id}
#[utoipa::path(
    delete,
    path = "/api/commentaire/{id}",
    tag = "Commentaires",
    params(("id" = Uuid, Path, description = "ID du commentaire")),
    responses(
        (status = 204, description = "Commentaire supprimé, marques de lecture comprises"),
        (status = 404, description = "Commentaire introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_commentaire(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.commentaire_service.delete_commentaire(agence, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/commentaire/{id}/lu
#[utoipa::path(
    post,
    path = "/api/commentaire/{id}/lu",
    tag = "Commentaires",
    params(("id" = Uuid, Path, description = "ID du commentaire")),
    responses(
        (status = 200, description = "Marqué lu pour l'appelant ; idempotent"),
        (status = 404, description = "Commentaire introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn marquer_lu(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .commentaire_service
        .marquer_lu(agence, &utilisateur, id)
        .await?;
    Ok(StatusCode::OK)
}
