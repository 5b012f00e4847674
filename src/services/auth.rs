// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ContactRepository, UserRepository},
    models::auth::{Claims, RoleUtilisateur, Utilisateur},
    services::mailer::MailService,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    contact_repo: ContactRepository,
    jwt_secret: String,
    pool: PgPool,
    mailer: Option<MailService>,
    app_base_url: String,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        contact_repo: ContactRepository,
        jwt_secret: String,
        pool: PgPool,
        mailer: Option<MailService>,
        app_base_url: String,
    ) -> Self {
        Self {
            user_repo,
            contact_repo,
            jwt_secret,
            pool,
            mailer,
            app_base_url,
        }
    }

    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        nom: &str,
        prenom: &str,
        role: Option<RoleUtilisateur>,
        agence_id: Option<Uuid>,
    ) -> Result<String, AppError> {
        // Le hachage peut rester hors transaction, il ne touche pas la base.
        let password_clone = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("tâche de hachage : {}", e))??;

        let role = role.unwrap_or(RoleUtilisateur::Employee);

        // Création du compte + rattachement portail dans la même transaction.
        let mut tx = self.pool.begin().await?;

        let utilisateur = self
            .user_repo
            .create_user(&mut *tx, email, &password_hash, nom, prenom, role, agence_id)
            .await?;

        let lies = self
            .contact_repo
            .lier_utilisateur(&mut *tx, utilisateur.id, email)
            .await?;

        tx.commit().await?;

        if lies > 0 {
            tracing::info!("Compte {} rattaché à {} contact(s) existant(s).", email, lies);
        }

        self.create_token(utilisateur.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let utilisateur = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::IdentifiantsInvalides)?;

        let password_clone = password.to_owned();
        let hash_clone = utilisateur.password_hash.clone();

        // La vérification bcrypt part sur un thread bloquant dédié.
        let valide = tokio::task::spawn_blocking(move || verify(&password_clone, &hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("tâche de vérification : {}", e))??;

        if !valide {
            return Err(AppError::IdentifiantsInvalides);
        }

        self.create_token(utilisateur.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Utilisateur, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::TokenInvalide)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::TokenInvalide)
    }

    // Liste des comptes : superadmin voit tout, manager voit son agence,
    // employee n'a pas accès.
    pub async fn list_users(
        &self,
        appelant: &Utilisateur,
    ) -> Result<Vec<Utilisateur>, AppError> {
        match appelant.role {
            RoleUtilisateur::Superadmin => self.user_repo.list_users(None).await,
            RoleUtilisateur::Manager => {
                let agence = appelant.agence_id.ok_or(AppError::AccesRefuse)?;
                self.user_repo.list_users(Some(agence)).await
            }
            RoleUtilisateur::Employee => Err(AppError::AccesRefuse),
        }
    }

    // Répond toujours 200, que l'adresse existe ou non.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let Some(utilisateur) = self.user_repo.find_by_email(email).await? else {
            return Ok(());
        };

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        let token_clone = token.clone();
        let token_hash =
            tokio::task::spawn_blocking(move || hash(&token_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("tâche de hachage : {}", e))??;

        let expires_at = Utc::now() + chrono::Duration::hours(1);
        self.user_repo
            .set_reset_token(utilisateur.id, &token_hash, expires_at)
            .await?;

        let lien = format!(
            "{}/reset-password?email={}&token={}",
            self.app_base_url, utilisateur.email, token
        );

        match &self.mailer {
            Some(mailer) => mailer.envoyer_reinitialisation(&utilisateur.email, &lien).await?,
            None => tracing::info!("SMTP non configuré, lien de réinitialisation : {}", lien),
        }

        Ok(())
    }

    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let utilisateur = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::TokenInvalide)?;

        let (Some(token_hash), Some(expires_at)) = (
            utilisateur.reset_token_hash.clone(),
            utilisateur.reset_token_expires_at,
        ) else {
            return Err(AppError::TokenInvalide);
        };

        if expires_at < Utc::now() {
            return Err(AppError::TokenInvalide);
        }

        let token_clone = token.to_owned();
        let valide = tokio::task::spawn_blocking(move || verify(&token_clone, &token_hash))
            .await
            .map_err(|e| anyhow::anyhow!("tâche de vérification : {}", e))??;

        if !valide {
            return Err(AppError::TokenInvalide);
        }

        let password_clone = new_password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("tâche de hachage : {}", e))??;

        self.user_repo
            .update_password(utilisateur.id, &password_hash)
            .await
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
