// src/db/partenaire_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::partenaire::{Partenaire, PartenairePayload},
};

#[derive(Clone)]
pub struct PartenaireRepository {
    pool: PgPool,
}

impl PartenaireRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        agence_id: Option<Uuid>,
        payload: &PartenairePayload,
    ) -> Result<Partenaire, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partenaire = sqlx::query_as::<_, Partenaire>(
            r#"
            INSERT INTO partenaires (
                agence_id, nom, types_produits, statut, email, telephone,
                site_extranet, commentaire
            )
            VALUES ($1, $2, $3, COALESCE($4, 'actif'), $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(agence_id)
        .bind(&payload.nom)
        .bind(&payload.types_produits)
        .bind(payload.statut)
        .bind(&payload.email)
        .bind(&payload.telephone)
        .bind(&payload.site_extranet)
        .bind(&payload.commentaire)
        .fetch_one(executor)
        .await?;

        Ok(partenaire)
    }

    pub async fn find_by_id(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Option<Partenaire>, AppError> {
        let partenaire = sqlx::query_as::<_, Partenaire>(
            r#"
            SELECT * FROM partenaires
            WHERE id = $1 AND ($2::uuid IS NULL OR agence_id = $2)
            "#,
        )
        .bind(id)
        .bind(agence_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(partenaire)
    }

    pub async fn list(&self, agence_id: Option<Uuid>) -> Result<Vec<Partenaire>, AppError> {
        let partenaires = sqlx::query_as::<_, Partenaire>(
            r#"
            SELECT * FROM partenaires
            WHERE ($1::uuid IS NULL OR agence_id = $1)
            ORDER BY nom ASC
            "#,
        )
        .bind(agence_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(partenaires)
    }

    // PUT = remplacement complet.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &PartenairePayload,
    ) -> Result<Partenaire, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partenaire = sqlx::query_as::<_, Partenaire>(
            r#"
            UPDATE partenaires SET
                nom = $2,
                types_produits = $3,
                statut = COALESCE($4, statut),
                email = $5,
                telephone = $6,
                site_extranet = $7,
                commentaire = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.nom)
        .bind(&payload.types_produits)
        .bind(payload.statut)
        .bind(&payload.email)
        .bind(&payload.telephone)
        .bind(&payload.site_extranet)
        .bind(&payload.commentaire)
        .fetch_one(executor)
        .await?;

        Ok(partenaire)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM partenaires WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let (present,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM partenaires WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(present)
    }
}
