// src/handlers/portail.rs
//
// Espace client : aucun scope d'agence ici, tout passe par le lien
// compte → contact.

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{contact::Contact, contrat::Contrat, document::Document},
};

// GET /api/portail/moi
#[utoipa::path(
    get,
    path = "/api/portail/moi",
    tag = "Portail",
    responses(
        (status = 200, description = "La fiche du client connecté", body = Contact),
        (status = 404, description = "Aucun contact rattaché à ce compte")
    ),
    security(("api_jwt" = []))
)]
pub async fn mon_contact(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
) -> Result<Json<Contact>, AppError> {
    let contact = app_state.portail_service.mon_contact(&utilisateur).await?;
    Ok(Json(contact))
}

// GET /api/portail/contrats
#[utoipa::path(
    get,
    path = "/api/portail/contrats",
    tag = "Portail",
    responses(
        (status = 200, description = "Les contrats du client connecté", body = Vec<Contrat>),
        (status = 404, description = "Aucun contact rattaché à ce compte")
    ),
    security(("api_jwt" = []))
)]
pub async fn mes_contrats(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
) -> Result<Json<Vec<Contrat>>, AppError> {
    let contrats = app_state.portail_service.mes_contrats(&utilisateur).await?;
    Ok(Json(contrats))
}

// GET /api/portail/documents
#[utoipa::path(
    get,
    path = "/api/portail/documents",
    tag = "Portail",
    responses(
        (status = 200, description = "Les documents du client connecté", body = Vec<Document>),
        (status = 404, description = "Aucun contact rattaché à ce compte")
    ),
    security(("api_jwt" = []))
)]
pub async fn mes_documents(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = app_state.portail_service.mes_documents(&utilisateur).await?;
    Ok(Json(documents))
}
