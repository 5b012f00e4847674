// src/db/agence_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::agence::{Agence, AgencePayload},
};

#[derive(Clone)]
pub struct AgenceRepository {
    pool: PgPool,
}

impl AgenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        payload: &AgencePayload,
    ) -> Result<Agence, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agence = sqlx::query_as::<_, Agence>(
            r#"
            INSERT INTO agences (nom, adresse, telephone, email)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.nom)
        .bind(&payload.adresse)
        .bind(&payload.telephone)
        .bind(&payload.email)
        .fetch_one(executor)
        .await?;
        Ok(agence)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Agence>, AppError> {
        let agence = sqlx::query_as::<_, Agence>("SELECT * FROM agences WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(agence)
    }

    pub async fn list(&self) -> Result<Vec<Agence>, AppError> {
        let agences = sqlx::query_as::<_, Agence>("SELECT * FROM agences ORDER BY nom ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(agences)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &AgencePayload,
    ) -> Result<Agence, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agence = sqlx::query_as::<_, Agence>(
            r#"
            UPDATE agences SET nom = $2, adresse = $3, telephone = $4, email = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.nom)
        .bind(&payload.adresse)
        .bind(&payload.telephone)
        .bind(&payload.email)
        .fetch_one(executor)
        .await?;
        Ok(agence)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM agences WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
