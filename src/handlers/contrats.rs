// src/handlers/contrats.rs

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
    models::contrat::{
        Contrat, ContratHistorique, CreateContratPayload, RenouvellementPayload,
        UpdateContratPayload,
    },
};

// POST /api/contrats
#[utoipa::path(
    post,
    path = "/api/contrats",
    tag = "Contrats",
    request_body = CreateContratPayload,
    responses(
        (status = 201, description = "Contrat créé ; un prospect propriétaire passe client", body = Contrat),
        (status = 400, description = "Dates incohérentes ou montants négatifs"),
        (status = 404, description = "Contact ou partenaire introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_contrat(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    AgenceScope(agence): AgenceScope,
    Json(payload): Json<CreateContratPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let contrat = app_state
        .contrat_service
        .create_contrat(agence, &utilisateur, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(contrat)))
}

// GET /api/contrats
#[utoipa::path(
    get,
    path = "/api/contrats",
    tag = "Contrats",
    responses((status = 200, description = "Liste des contrats", body = Vec<Contrat>)),
    security(("api_jwt" = []))
)]
pub async fn list_contrats(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
) -> Result<Json<Vec<Contrat>>, AppError> {
    let contrats = app_state.contrat_service.list_contrats(agence).await?;
    Ok(Json(contrats))
}

// GET /api/contrats/{id}
#[utoipa::path(
    get,
    path = "/api/contrats/{id}",
    tag = "Contrats",
    params(("id" = Uuid, Path, description = "ID du contrat")),
    responses(
        (status = 200, description = "Le contrat", body = Contrat),
        (status = 404, description = "Contrat introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_contrat(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Contrat>, AppError> {
    let contrat = app_state.contrat_service.get_contrat(agence, id).await?;
    Ok(Json(contrat))
}

// PUT /api/contrats/{id}
#[utoipa::path(
    put,
    path = "/api/contrats/{id}",
    tag = "Contrats",
    params(("id" = Uuid, Path, description = "ID du contrat")),
    request_body = UpdateContratPayload,
    responses(
        (status = 200, description = "Contrat remplacé", body = Contrat),
        (status = 400, description = "Transition de statut interdite ou données invalides"),
        (status = 404, description = "Contrat introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_contrat(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContratPayload>,
) -> Result<Json<Contrat>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let contrat = app_state
        .contrat_service
        .update_contrat(agence, id, &payload)
        .await?;

    Ok(Json(contrat))
}

// DELETE /api/contrats/{id}
#[utoipa::path(
    delete,
    path = "/api/contrats/{id}",
    tag = "Contrats",
    params(("id" = Uuid, Path, description = "ID du contrat")),
    responses(
        (status = 204, description = "Contrat supprimé ; le statut du contact n'est pas revu"),
        (status = 404, description = "Contrat introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_contrat(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .contrat_service
        .delete_contrat(agence, &utilisateur, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/contrats/{id}/renouveler
#[utoipa::path(
    post,
    path = "/api/contrats/{id}/renouveler",
    tag = "Contrats",
    params(("id" = Uuid, Path, description = "ID du contrat")),
    request_body = RenouvellementPayload,
    responses(
        (status = 200, description = "Période archivée, contrat reparti pour un an", body = Contrat),
        (status = 400, description = "Un contrat résilié ne se renouvelle pas"),
        (status = 404, description = "Contrat introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn renouveler_contrat(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<RenouvellementPayload>,
) -> Result<Json<Contrat>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let contrat = app_state
        .contrat_service
        .renouveler(agence, &utilisateur, id, &payload)
        .await?;

    Ok(Json(contrat))
}

// GET /api/contrats/{id}/historique
#[utoipa::path(
    get,
    path = "/api/contrats/{id}/historique",
    tag = "Contrats",
    params(("id" = Uuid, Path, description = "ID du contrat")),
    responses(
        (status = 200, description = "Périodes remplacées, triées par date de début décroissante", body = Vec<ContratHistorique>),
        (status = 404, description = "Contrat introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn lister_historique(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ContratHistorique>>, AppError> {
    let entrees = app_state.contrat_service.lister_historique(agence, id).await?;
    Ok(Json(entrees))
}
