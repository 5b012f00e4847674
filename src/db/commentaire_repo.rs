// src/db/commentaire_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::commentaire::{Commentaire, CreateCommentairePayload, UpdateCommentairePayload},
};

#[derive(Clone)]
pub struct CommentaireRepository {
    pool: PgPool,
}

impl CommentaireRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        utilisateur_id: Uuid,
        payload: &CreateCommentairePayload,
    ) -> Result<Commentaire, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let commentaire = sqlx::query_as::<_, Commentaire>(
            r#"
            INSERT INTO commentaires (contact_id, utilisateur_id, type_interaction, sujet, contenu)
            VALUES ($1, $2, COALESCE($3, 'autre'), COALESCE($4, 'information'), $5)
            RETURNING *
            "#,
        )
        .bind(payload.contact_id)
        .bind(utilisateur_id)
        .bind(payload.type_interaction)
        .bind(payload.sujet)
        .bind(&payload.contenu)
        .fetch_one(executor)
        .await?;

        Ok(commentaire)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Commentaire>, AppError> {
        let commentaire =
            sqlx::query_as::<_, Commentaire>("SELECT * FROM commentaires WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(commentaire)
    }

    pub async fn list_by_contact(&self, contact_id: Uuid) -> Result<Vec<Commentaire>, AppError> {
        let commentaires = sqlx::query_as::<_, Commentaire>(
            "SELECT * FROM commentaires WHERE contact_id = $1 ORDER BY created_at DESC",
        )
        .bind(contact_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(commentaires)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateCommentairePayload,
    ) -> Result<Commentaire, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let commentaire = sqlx::query_as::<_, Commentaire>(
            r#"
            UPDATE commentaires SET
                type_interaction = COALESCE($2, 'autre'),
                sujet = COALESCE($3, 'information'),
                contenu = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.type_interaction)
        .bind(payload.sujet)
        .bind(&payload.contenu)
        .fetch_one(executor)
        .await?;

        Ok(commentaire)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM commentaires WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // --- MARQUEURS DE LECTURE ---

    pub async fn marquer_lu(
        &self,
        utilisateur_id: Uuid,
        commentaire_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO commentaires_lus (utilisateur_id, commentaire_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(utilisateur_id)
        .bind(commentaire_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn compter_non_lus(
        &self,
        utilisateur_id: Uuid,
        contact_id: Uuid,
    ) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM commentaires cm
            WHERE cm.contact_id = $2
              AND NOT EXISTS (
                  SELECT 1 FROM commentaires_lus cl
                  WHERE cl.commentaire_id = cm.id AND cl.utilisateur_id = $1
              )
            "#,
        )
        .bind(utilisateur_id)
        .bind(contact_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
