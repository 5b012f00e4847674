// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() est voulu ici : sans configuration valable, on ne démarre pas.
    let app_state = AppState::new()
        .await
        .expect("Échec de l'initialisation de l'état de l'application.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Échec des migrations de la base de données.");

    tracing::info!("✅ Migrations de la base exécutées !");

    // Routes publiques : inscription, connexion, réinitialisation.
    let auth_publiques = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/forgot-password", post(handlers::auth::forgot_password))
        .route("/reset-password", post(handlers::auth::reset_password));

    let auth_protegees = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/users", get(handlers::auth::list_users));

    let agence_routes = Router::new()
        .route(
            "/",
            post(handlers::agences::create_agence).get(handlers::agences::list_agences),
        )
        .route(
            "/{id}",
            get(handlers::agences::get_agence)
                .put(handlers::agences::update_agence)
                .delete(handlers::agences::delete_agence),
        );

    let contact_routes = Router::new()
        .route(
            "/",
            post(handlers::contacts::create_contact).get(handlers::contacts::list_contacts),
        )
        .route(
            "/{id}",
            get(handlers::contacts::get_contact)
                .put(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        )
        .route("/{id}/historique", get(handlers::contacts::lister_historique))
        .route("/{id}/contrats", get(handlers::contacts::lister_contrats))
        .route("/{id}/commentaires", get(handlers::contacts::lister_commentaires))
        .route(
            "/{id}/commentaires/non-lus",
            get(handlers::contacts::compter_non_lus),
        );

    let contrat_routes = Router::new()
        .route(
            "/",
            post(handlers::contrats::create_contrat).get(handlers::contrats::list_contrats),
        )
        .route(
            "/{id}",
            get(handlers::contrats::get_contrat)
                .put(handlers::contrats::update_contrat)
                .delete(handlers::contrats::delete_contrat),
        )
        .route("/{id}/renouveler", post(handlers::contrats::renouveler_contrat))
        .route("/{id}/historique", get(handlers::contrats::lister_historique));

    let partenaire_routes = Router::new()
        .route(
            "/",
            post(handlers::partenaires::create_partenaire)
                .get(handlers::partenaires::list_partenaires),
        )
        .route(
            "/{id}",
            get(handlers::partenaires::get_partenaire)
                .put(handlers::partenaires::update_partenaire)
                .delete(handlers::partenaires::delete_partenaire),
        );

    // Singulier, hérité du front existant.
    let commentaire_routes = Router::new()
        .route("/", post(handlers::commentaires::create_commentaire))
        .route(
            "/{id}",
            get(handlers::commentaires::get_commentaire)
                .put(handlers::commentaires::update_commentaire)
                .delete(handlers::commentaires::delete_commentaire),
        )
        .route("/{id}/lu", post(handlers::commentaires::marquer_lu));

    let document_routes = Router::new()
        .route("/upload", post(handlers::documents::televerser_document))
        .route("/contact/{id}", get(handlers::documents::lister_documents_contact))
        .route("/signed-url/{*chemin}", get(handlers::documents::url_signee))
        .route("/{id}", axum::routing::delete(handlers::documents::supprimer_document));

    let dashboard_routes = Router::new()
        .route("/resume", get(handlers::dashboard::resume))
        .route("/revenus-mensuels", get(handlers::dashboard::revenus_mensuels));

    let portail_routes = Router::new()
        .route("/moi", get(handlers::portail::mon_contact))
        .route("/contrats", get(handlers::portail::mes_contrats))
        .route("/documents", get(handlers::portail::mes_documents));

    // Tout le métier passe derrière le garde JWT.
    let protegees = Router::new()
        .nest("/api/auth", auth_protegees)
        .nest("/api/agences", agence_routes)
        .nest("/api/contacts", contact_routes)
        .nest("/api/contrats", contrat_routes)
        .nest("/api/partenaires", partenaire_routes)
        .nest("/api/commentaire", commentaire_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/portail", portail_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_publiques)
        .merge(protegees)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state.clone());

    let addr = format!("0.0.0.0:{}", app_state.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Échec de l'ouverture du listener TCP");
    tracing::info!("🚀 Serveur à l'écoute sur {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Erreur du serveur Axum");
}
