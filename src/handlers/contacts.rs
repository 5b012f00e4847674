// src/handlers/contacts.rs

use axum::{
    extract::{Path, Query, State},
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
    models::{
        commentaire::{Commentaire, NonLus},
        contact::{
            Contact, ContactDetail, ContactFiltre, ContactHistorique, CreateContactPayload,
            UpdateContactPayload,
        },
        contrat::Contrat,
    },
};

// POST /api/contacts
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    request_body = CreateContactPayload,
    responses(
        (status = 201, description = "Contact créé", body = Contact),
        (status = 400, description = "Données invalides (client sans contrat...)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    AgenceScope(agence): AgenceScope,
    Json(payload): Json<CreateContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let contact = app_state
        .contact_service
        .create_contact(agence, &utilisateur, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(contact)))
}

// GET /api/contacts
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    params(
        ("statut" = Option<String>, Query, description = "prospect ou client"),
        ("q" = Option<String>, Query, description = "Recherche nom/prénom/e-mail")
    ),
    responses((status = 200, description = "Liste des contacts", body = Vec<Contact>)),
    security(("api_jwt" = []))
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Query(filtre): Query<ContactFiltre>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = app_state.contact_service.list_contacts(agence, &filtre).await?;
    Ok(Json(contacts))
}

// GET /api/contacts/{id}
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    responses(
        (status = 200, description = "Fiche contact", body = ContactDetail),
        (status = 404, description = "Contact introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_contact(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactDetail>, AppError> {
    let detail = app_state.contact_service.get_contact_detail(agence, id).await?;
    Ok(Json(detail))
}

// PUT /api/contacts/{id}
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    request_body = UpdateContactPayload,
    responses(
        (status = 200, description = "Contact remplacé (PUT complet, pas un patch)", body = Contact),
        (status = 404, description = "Contact introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_contact(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactPayload>,
) -> Result<Json<Contact>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let contact = app_state
        .contact_service
        .update_contact(agence, &utilisateur, id, &payload)
        .await?;

    Ok(Json(contact))
}

// DELETE /api/contacts/{id}
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    responses(
        (status = 204, description = "Contact et enfants supprimés"),
        (status = 404, description = "Contact introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.contact_service.delete_contact(agence, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/contacts/{id}/historique
#[utoipa::path(
    get,
    path = "/api/contacts/{id}/historique",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    responses((status = 200, description = "Journal d'audit, du plus récent au plus ancien", body = Vec<ContactHistorique>)),
    security(("api_jwt" = []))
)]
pub async fn lister_historique(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ContactHistorique>>, AppError> {
    let entrees = app_state.contact_service.lister_historique(agence, id).await?;
    Ok(Json(entrees))
}

// GET /api/contacts/{id}/contrats
#[utoipa::path(
    get,
    path = "/api/contacts/{id}/contrats",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    responses((status = 200, description = "Contrats du contact", body = Vec<Contrat>)),
    security(("api_jwt" = []))
)]
pub async fn lister_contrats(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Contrat>>, AppError> {
    let contrats = app_state.contact_service.lister_contrats(agence, id).await?;
    Ok(Json(contrats))
}

// GET /api/contacts/{id}/commentaires
#[utoipa::path(
    get,
    path = "/api/contacts/{id}/commentaires",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    responses((status = 200, description = "Commentaires du contact", body = Vec<Commentaire>)),
    security(("api_jwt" = []))
)]
pub async fn lister_commentaires(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Commentaire>>, AppError> {
    let commentaires = app_state
        .contact_service
        .lister_commentaires(agence, id)
        .await?;
    Ok(Json(commentaires))
}

// GET /api/contacts/{id}/commentaires/non-lus
#[utoipa::path(
    get,
    path = "/api/contacts/{id}/commentaires/non-lus",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID du contact")),
    responses((status = 200, description = "Nombre de commentaires non lus pour l'appelant", body = NonLus)),
    security(("api_jwt" = []))
)]
pub async fn compter_non_lus(
    State(app_state): State<AppState>,
    AuthenticatedUser(utilisateur): AuthenticatedUser,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<NonLus>, AppError> {
    let non_lus = app_state
        .commentaire_service
        .compter_non_lus(agence, &utilisateur, id)
        .await?;
    Ok(Json(non_lus))
}
