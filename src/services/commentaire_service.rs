// src/services/commentaire_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CommentaireRepository, ContactRepository},
    models::{
        auth::Utilisateur,
        commentaire::{
            Commentaire, CreateCommentairePayload, NonLus, UpdateCommentairePayload,
        },
    },
};

#[derive(Clone)]
pub struct CommentaireService {
    repo: CommentaireRepository,
    contact_repo: ContactRepository,
    pool: PgPool,
}

impl CommentaireService {
    pub fn new(repo: CommentaireRepository, contact_repo: ContactRepository, pool: PgPool) -> Self {
        Self {
            repo,
            contact_repo,
            pool,
        }
    }

    pub async fn create_commentaire(
        &self,
        agence_id: Option<Uuid>,
        utilisateur: &Utilisateur,
        payload: &CreateCommentairePayload,
    ) -> Result<Commentaire, AppError> {
        self.contact_repo
            .find_by_id(agence_id, payload.contact_id)
            .await?
            .ok_or(AppError::Introuvable("Contact"))?;

        self.repo.insert(&self.pool, utilisateur.id, payload).await
    }

    pub async fn get_commentaire(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Commentaire, AppError> {
        let commentaire = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::Introuvable("Commentaire"))?;

        // Le scope passe par le contact parent.
        self.contact_repo
            .find_by_id(agence_id, commentaire.contact_id)
            .await?
            .ok_or(AppError::Introuvable("Commentaire"))?;

        Ok(commentaire)
    }

    pub async fn update_commentaire(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
        payload: &UpdateCommentairePayload,
    ) -> Result<Commentaire, AppError> {
        self.get_commentaire(agence_id, id).await?;
        self.repo.update(&self.pool, id, payload).await
    }

    pub async fn delete_commentaire(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<(), AppError> {
        self.get_commentaire(agence_id, id).await?;
        self.repo.delete(&self.pool, id).await?;
        Ok(())
    }

    pub async fn marquer_lu(
        &self,
        agence_id: Option<Uuid>,
        utilisateur: &Utilisateur,
        id: Uuid,
    ) -> Result<(), AppError> {
        self.get_commentaire(agence_id, id).await?;
        self.repo.marquer_lu(utilisateur.id, id).await
    }

    pub async fn compter_non_lus(
        &self,
        agence_id: Option<Uuid>,
        utilisateur: &Utilisateur,
        contact_id: Uuid,
    ) -> Result<NonLus, AppError> {
        self.contact_repo
            .find_by_id(agence_id, contact_id)
            .await?
            .ok_or(AppError::Introuvable("Contact"))?;

        let non_lus = self.repo.compter_non_lus(utilisateur.id, contact_id).await?;
        Ok(NonLus {
            contact_id,
            non_lus,
        })
    }
}
