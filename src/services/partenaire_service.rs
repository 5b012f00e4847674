// src/services/partenaire_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ContratRepository, PartenaireRepository},
    models::partenaire::{Partenaire, PartenairePayload},
};

#[derive(Clone)]
pub struct PartenaireService {
    repo: PartenaireRepository,
    contrat_repo: ContratRepository,
    pool: PgPool,
}

impl PartenaireService {
    pub fn new(repo: PartenaireRepository, contrat_repo: ContratRepository, pool: PgPool) -> Self {
        Self {
            repo,
            contrat_repo,
            pool,
        }
    }

    pub async fn create_partenaire(
        &self,
        agence_id: Option<Uuid>,
        payload: &PartenairePayload,
    ) -> Result<Partenaire, AppError> {
        self.repo.insert(&self.pool, agence_id, payload).await
    }

    pub async fn get_partenaire(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Partenaire, AppError> {
        self.repo
            .find_by_id(agence_id, id)
            .await?
            .ok_or(AppError::Introuvable("Partenaire"))
    }

    pub async fn list_partenaires(
        &self,
        agence_id: Option<Uuid>,
    ) -> Result<Vec<Partenaire>, AppError> {
        self.repo.list(agence_id).await
    }

    pub async fn update_partenaire(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
        payload: &PartenairePayload,
    ) -> Result<Partenaire, AppError> {
        self.get_partenaire(agence_id, id).await?;
        self.repo.update(&self.pool, id, payload).await
    }

    // Refusé tant qu'un contrat référence encore le partenaire.
    pub async fn delete_partenaire(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<(), AppError> {
        self.get_partenaire(agence_id, id).await?;

        if self.contrat_repo.compter_par_partenaire(id).await? > 0 {
            return Err(AppError::PartenaireReference);
        }

        self.repo.delete(&self.pool, id).await?;
        Ok(())
    }
}
