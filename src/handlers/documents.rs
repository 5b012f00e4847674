// src/handlers/documents.rs

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::agence::AgenceScope,
    models::document::{Document, SignedUrlResponse},
};

// POST /api/documents/upload — multipart avec un champ texte `contactId`
// et un champ fichier `file`.
#[utoipa::path(
    post,
    path = "/api/documents/upload",
    tag = "Documents",
    request_body(content = Vec<u8>, description = "Champs `contactId` (texte) et `file` (fichier)", content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Fichier stocké et métadonnées enregistrées", body = Document),
        (status = 400, description = "Champ contactId ou file manquant"),
        (status = 404, description = "Contact introuvable"),
        (status = 502, description = "Le stockage objet a refusé l'upload")
    ),
    security(("api_jwt" = []))
)]
pub async fn televerser_document(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut contact_id: Option<Uuid> = None;
    let mut fichier: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::RegleMetier(format!("Multipart illisible : {e}")))?
    {
        match field.name() {
            Some("contactId") => {
                let valeur = field
                    .text()
                    .await
                    .map_err(|e| AppError::RegleMetier(format!("Champ contactId illisible : {e}")))?;
                let id = valeur
                    .parse()
                    .map_err(|_| AppError::RegleMetier("contactId n'est pas un UUID".to_string()))?;
                contact_id = Some(id);
            }
            Some("file") => {
                let nom = field
                    .file_name()
                    .unwrap_or("document")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let contenu = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::RegleMetier(format!("Fichier illisible : {e}")))?;
                fichier = Some((nom, content_type, contenu.to_vec()));
            }
            _ => {}
        }
    }

    let contact_id =
        contact_id.ok_or_else(|| AppError::RegleMetier("Champ contactId manquant".to_string()))?;
    let (nom, content_type, contenu) =
        fichier.ok_or_else(|| AppError::RegleMetier("Champ file manquant".to_string()))?;

    let document = app_state
        .document_service
        .televerser(agence, contact_id, &nom, &content_type, contenu)
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

// GET /api/documents/contact/{id}
#[utoipa::path(
    get,
    path = "/api/documents/contact/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID du contact")),
    responses(
        (status = 200, description = "Documents du contact", body = Vec<Document>),
        (status = 404, description = "Contact introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn lister_documents_contact(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = app_state
        .document_service
        .lister_par_contact(agence, id)
        .await?;
    Ok(Json(documents))
}

// GET /api/documents/signed-url/{*chemin} — le chemin objet complet,
// segments compris, d'où le joker.
#[utoipa::path(
    get,
    path = "/api/documents/signed-url/{chemin}",
    tag = "Documents",
    params(("chemin" = String, Path, description = "Chemin objet complet du fichier")),
    responses(
        (status = 200, description = "URL de téléchargement valable une heure", body = SignedUrlResponse),
        (status = 404, description = "Aucun document à ce chemin dans le périmètre de l'appelant"),
        (status = 502, description = "Le stockage objet n'a pas signé")
    ),
    security(("api_jwt" = []))
)]
pub async fn url_signee(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(chemin): Path<String>,
) -> Result<Json<SignedUrlResponse>, AppError> {
    let signed_url = app_state.document_service.url_signee(agence, &chemin).await?;
    Ok(Json(SignedUrlResponse { signed_url }))
}

// DELETE /api/documents/{id}
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID du document")),
    responses(
        (status = 204, description = "Objet et métadonnées supprimés"),
        (status = 404, description = "Document introuvable"),
        (status = 502, description = "Le stockage objet a refusé la suppression")
    ),
    security(("api_jwt" = []))
)]
pub async fn supprimer_document(
    State(app_state): State<AppState>,
    AgenceScope(agence): AgenceScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.document_service.supprimer(agence, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
