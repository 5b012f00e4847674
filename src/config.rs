// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AgenceRepository, CommentaireRepository, ContactRepository, ContratRepository,
        DashboardRepository, DocumentRepository, PartenaireRepository, UserRepository,
    },
    services::{
        agence_service::AgenceService, auth::AuthService, commentaire_service::CommentaireService,
        contact_service::ContactService, contrat_service::ContratService,
        dashboard_service::DashboardService, document_service::DocumentService,
        mailer::MailService, partenaire_service::PartenaireService,
        portail_service::PortailService, storage::StorageClient,
    },
};

// L'état partagé, accessible dans toute l'application
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub port: u16,
    pub auth_service: AuthService,
    pub agence_service: AgenceService,
    pub contact_service: ContactService,
    pub contrat_service: ContratService,
    pub partenaire_service: PartenaireService,
    pub commentaire_service: CommentaireService,
    pub document_service: DocumentService,
    pub dashboard_service: DashboardService,
    pub portail_service: PortailService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL doit être définie");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET doit être défini");
        let storage_url = env::var("STORAGE_URL").expect("STORAGE_URL doit être définie");
        let storage_key = env::var("STORAGE_KEY").expect("STORAGE_KEY doit être définie");
        let storage_bucket = env::var("STORAGE_BUCKET").unwrap_or_else(|_| "documents".to_string());
        let app_base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        // Connexion à la base, avec '?' pour propager les erreurs
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Connexion à la base de données établie !");

        // SMTP optionnel : sans configuration complète, les liens de
        // réinitialisation sont tracés au lieu d'être envoyés.
        let smtp_port = env::var("SMTP_PORT").ok().and_then(|p| p.parse().ok());
        let mailer = MailService::new(
            env::var("SMTP_HOST").ok().as_deref(),
            smtp_port,
            env::var("SMTP_USERNAME").ok(),
            env::var("SMTP_PASSWORD").ok(),
            env::var("SMTP_FROM").ok().as_deref(),
        );
        if mailer.is_none() {
            tracing::warn!("SMTP non configuré : les mails de réinitialisation seront tracés.");
        }

        let storage = StorageClient::new(storage_url, storage_key, storage_bucket);

        // --- Assemblage du graphe de dépendances ---
        let user_repo = UserRepository::new(db_pool.clone());
        let agence_repo = AgenceRepository::new(db_pool.clone());
        let contact_repo = ContactRepository::new(db_pool.clone());
        let contrat_repo = ContratRepository::new(db_pool.clone());
        let partenaire_repo = PartenaireRepository::new(db_pool.clone());
        let commentaire_repo = CommentaireRepository::new(db_pool.clone());
        let document_repo = DocumentRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            contact_repo.clone(),
            jwt_secret,
            db_pool.clone(),
            mailer,
            app_base_url,
        );
        let agence_service = AgenceService::new(agence_repo, db_pool.clone());
        let contact_service = ContactService::new(
            contact_repo.clone(),
            contrat_repo.clone(),
            partenaire_repo.clone(),
            commentaire_repo.clone(),
            db_pool.clone(),
        );
        let contrat_service = ContratService::new(
            contrat_repo.clone(),
            contact_repo.clone(),
            partenaire_repo.clone(),
            db_pool.clone(),
        );
        let partenaire_service =
            PartenaireService::new(partenaire_repo, contrat_repo.clone(), db_pool.clone());
        let commentaire_service =
            CommentaireService::new(commentaire_repo, contact_repo.clone(), db_pool.clone());
        let document_service = DocumentService::new(
            document_repo.clone(),
            contact_repo.clone(),
            storage,
            db_pool.clone(),
        );
        let dashboard_service = DashboardService::new(dashboard_repo, contrat_repo.clone());
        let portail_service = PortailService::new(contact_repo, contrat_repo, document_repo);

        Ok(Self {
            db_pool,
            port,
            auth_service,
            agence_service,
            contact_service,
            contrat_service,
            partenaire_service,
            commentaire_service,
            document_service,
            dashboard_service,
            portail_service,
        })
    }
}
