use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Notre type d'erreur, avec `thiserror` pour une meilleure ergonomie.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur de validation")]
    ValidationError(#[from] validator::ValidationErrors),

    // Règles métier violées hors du cadre de `validator` (dates incohérentes,
    // montants négatifs, client sans contrat...).
    #[error("{0}")]
    RegleMetier(String),

    #[error("E-mail déjà utilisé")]
    EmailDejaUtilise,

    #[error("Identifiants invalides")]
    IdentifiantsInvalides,

    #[error("Token invalide")]
    TokenInvalide,

    #[error("Accès refusé")]
    AccesRefuse,

    #[error("{0} introuvable")]
    Introuvable(&'static str),

    #[error("Transition de statut interdite : {de} -> {vers}")]
    TransitionStatutInterdite { de: String, vers: String },

    // Un partenaire référencé par au moins un contrat ne peut pas être supprimé.
    #[error("Partenaire encore référencé par des contrats")]
    PartenaireReference,

    #[error("Erreur du stockage objet : {0}")]
    Stockage(String),

    #[error("Erreur de base de données")]
    DatabaseError(#[from] sqlx::Error),

    // Variante générique pour toute autre erreur inattendue.
    // `anyhow::Error` capture le contexte de l'erreur.
    #[error("Erreur interne du serveur")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erreur Bcrypt : {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erreur JWT : {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retourne tous les détails de la validation, champ par champ.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Un ou plusieurs champs sont invalides.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::RegleMetier(message) => {
                let body = Json(json!({ "error": message }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::TransitionStatutInterdite { de, vers } => {
                let body = Json(json!({
                    "error": format!("Transition de statut interdite : {} -> {}", de, vers),
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Introuvable(entite) => {
                let body = Json(json!({ "error": format!("{} introuvable.", entite) }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            AppError::EmailDejaUtilise => (StatusCode::CONFLICT, "Cet e-mail est déjà utilisé."),
            AppError::PartenaireReference => (
                StatusCode::CONFLICT,
                "Ce partenaire est encore référencé par des contrats.",
            ),
            AppError::IdentifiantsInvalides => {
                (StatusCode::UNAUTHORIZED, "E-mail ou mot de passe invalide.")
            }
            AppError::TokenInvalide => (
                StatusCode::UNAUTHORIZED,
                "Token d'authentification invalide ou absent.",
            ),
            AppError::AccesRefuse => (StatusCode::FORBIDDEN, "Accès refusé."),
            AppError::Stockage(ref e) => {
                tracing::error!("Erreur du stockage objet : {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Le stockage de documents est indisponible.",
                )
            }

            // Tous les autres (DatabaseError, InternalServerError...) deviennent des 500.
            // Le `tracing` garde la trace détaillée côté serveur.
            ref e => {
                tracing::error!("Erreur interne du serveur : {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erreur serveur.")
            }
        };

        // Réponse standard pour les erreurs simples qui n'ont qu'un message.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
