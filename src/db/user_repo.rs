// src/db/user_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{RoleUtilisateur, Utilisateur},
};

// Le dépôt utilisateurs, responsable de toutes les interactions avec la
// table 'utilisateurs'.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Utilisateur>, AppError> {
        let user = sqlx::query_as::<_, Utilisateur>("SELECT * FROM utilisateurs WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Utilisateur>, AppError> {
        let user = sqlx::query_as::<_, Utilisateur>("SELECT * FROM utilisateurs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Crée un nouvel utilisateur dans la base
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        email: &str,
        password_hash: &str,
        nom: &str,
        prenom: &str,
        role: RoleUtilisateur,
        agence_id: Option<Uuid>,
    ) -> Result<Utilisateur, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Utilisateur>(
            r#"
            INSERT INTO utilisateurs (email, password_hash, nom, prenom, role, agence_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(nom)
        .bind(prenom)
        .bind(role)
        .bind(agence_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Convertit la violation de clé unique en erreur métier
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailDejaUtilise;
                }
            }
            e.into()
        })
    }

    // Liste scopée par agence : None = toutes les agences (superadmin)
    pub async fn list_users(&self, agence_id: Option<Uuid>) -> Result<Vec<Utilisateur>, AppError> {
        let users = sqlx::query_as::<_, Utilisateur>(
            r#"
            SELECT * FROM utilisateurs
            WHERE ($1::uuid IS NULL OR agence_id = $1)
            ORDER BY nom ASC, prenom ASC
            "#,
        )
        .bind(agence_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn set_reset_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE utilisateurs
            SET reset_token_hash = $2, reset_token_expires_at = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // Remplace le mot de passe et invalide le jeton en un seul UPDATE.
    pub async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE utilisateurs
            SET password_hash = $2,
                reset_token_hash = NULL,
                reset_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
