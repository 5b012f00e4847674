// src/services/document_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ContactRepository, DocumentRepository},
    models::document::Document,
    services::storage::{chemin_objet, StorageClient},
};

#[derive(Clone)]
pub struct DocumentService {
    repo: DocumentRepository,
    contact_repo: ContactRepository,
    storage: StorageClient,
    pool: PgPool,
}

impl DocumentService {
    pub fn new(
        repo: DocumentRepository,
        contact_repo: ContactRepository,
        storage: StorageClient,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            contact_repo,
            storage,
            pool,
        }
    }

    // L'octet part d'abord vers le stockage ; la ligne de métadonnées
    // n'est insérée que si l'upload a réussi. Pas de retry.
    pub async fn televerser(
        &self,
        agence_id: Option<Uuid>,
        contact_id: Uuid,
        nom_fichier: &str,
        content_type: &str,
        contenu: Vec<u8>,
    ) -> Result<Document, AppError> {
        self.contact_repo
            .find_by_id(agence_id, contact_id)
            .await?
            .ok_or(AppError::Introuvable("Contact"))?;

        let chemin = chemin_objet(contact_id, Utc::now().timestamp_millis(), nom_fichier);
        let taille = contenu.len() as i64;

        self.storage.upload(&chemin, content_type, contenu).await?;

        self.repo
            .insert(&self.pool, contact_id, nom_fichier, &chemin, content_type, taille)
            .await
    }

    // Ne signe que les objets dont la ligne de métadonnées est visible
    // dans le périmètre de l'appelant : un chemin hors périmètre (ou qui
    // ne correspond à aucun document) répond 404 sans toucher au stockage.
    pub async fn url_signee(
        &self,
        agence_id: Option<Uuid>,
        chemin: &str,
    ) -> Result<String, AppError> {
        let document = self
            .repo
            .find_by_chemin(agence_id, chemin)
            .await?
            .ok_or(AppError::Introuvable("Document"))?;

        self.storage.signed_url(&document.chemin, 3600).await
    }

    pub async fn lister_par_contact(
        &self,
        agence_id: Option<Uuid>,
        contact_id: Uuid,
    ) -> Result<Vec<Document>, AppError> {
        self.contact_repo
            .find_by_id(agence_id, contact_id)
            .await?
            .ok_or(AppError::Introuvable("Contact"))?;

        self.repo.list_by_contact(contact_id).await
    }

    // L'objet part d'abord, la métadonnée ensuite : en cas d'échec au
    // milieu on garde une ligne orpheline plutôt qu'un objet fantôme.
    pub async fn supprimer(&self, agence_id: Option<Uuid>, id: Uuid) -> Result<(), AppError> {
        let document = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::Introuvable("Document"))?;

        self.contact_repo
            .find_by_id(agence_id, document.contact_id)
            .await?
            .ok_or(AppError::Introuvable("Document"))?;

        self.storage.delete(&document.chemin).await?;
        self.repo.delete(&self.pool, id).await?;
        Ok(())
    }
}
