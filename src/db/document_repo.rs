// src/db/document_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::document::Document};

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        contact_id: Uuid,
        nom: &str,
        chemin: &str,
        content_type: &str,
        taille: i64,
    ) -> Result<Document, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (contact_id, nom, chemin, content_type, taille)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(contact_id)
        .bind(nom)
        .bind(chemin)
        .bind(content_type)
        .bind(taille)
        .fetch_one(executor)
        .await?;

        Ok(document)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(document)
    }

    // Le scope d'agence passe par le contact propriétaire, comme pour
    // toutes les lectures de documents.
    pub async fn find_by_chemin(
        &self,
        agence_id: Option<Uuid>,
        chemin: &str,
    ) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            SELECT d.* FROM documents d
            JOIN contacts c ON c.id = d.contact_id
            WHERE d.chemin = $1 AND ($2::uuid IS NULL OR c.agence_id = $2)
            "#,
        )
        .bind(chemin)
        .bind(agence_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(document)
    }

    pub async fn list_by_contact(&self, contact_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE contact_id = $1 ORDER BY created_at DESC",
        )
        .bind(contact_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
