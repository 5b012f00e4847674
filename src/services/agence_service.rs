// src/services/agence_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AgenceRepository,
    models::{
        agence::{Agence, AgencePayload},
        auth::{RoleUtilisateur, Utilisateur},
    },
};

#[derive(Clone)]
pub struct AgenceService {
    repo: AgenceRepository,
    pool: PgPool,
}

impl AgenceService {
    pub fn new(repo: AgenceRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // La gestion des agences est réservée au superadmin.
    fn verifier_superadmin(utilisateur: &Utilisateur) -> Result<(), AppError> {
        if utilisateur.role != RoleUtilisateur::Superadmin {
            return Err(AppError::AccesRefuse);
        }
        Ok(())
    }

    pub async fn create_agence(
        &self,
        utilisateur: &Utilisateur,
        payload: &AgencePayload,
    ) -> Result<Agence, AppError> {
        Self::verifier_superadmin(utilisateur)?;
        self.repo.insert(&self.pool, payload).await
    }

    pub async fn get_agence(&self, utilisateur: &Utilisateur, id: Uuid) -> Result<Agence, AppError> {
        Self::verifier_superadmin(utilisateur)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::Introuvable("Agence"))
    }

    pub async fn list_agences(&self, utilisateur: &Utilisateur) -> Result<Vec<Agence>, AppError> {
        Self::verifier_superadmin(utilisateur)?;
        self.repo.list().await
    }

    pub async fn update_agence(
        &self,
        utilisateur: &Utilisateur,
        id: Uuid,
        payload: &AgencePayload,
    ) -> Result<Agence, AppError> {
        self.get_agence(utilisateur, id).await?;
        self.repo.update(&self.pool, id, payload).await
    }

    pub async fn delete_agence(&self, utilisateur: &Utilisateur, id: Uuid) -> Result<(), AppError> {
        self.get_agence(utilisateur, id).await?;
        self.repo.delete(&self.pool, id).await?;
        Ok(())
    }
}
