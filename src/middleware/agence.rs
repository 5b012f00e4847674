// src/middleware/agence.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{RoleUtilisateur, Utilisateur},
};

// Cabinets multi-agences : le superadmin peut cibler une agence précise
// via ce header, ou l'omettre pour tout voir.
const AGENCE_ID_HEADER: &str = "x-agence-id";

// Le périmètre d'agence résolu pour la requête : None = toutes les
// agences. Les managers et employés restent confinés à la leur, le
// cloisonnement est appliqué dans les requêtes SQL.
#[derive(Debug, Clone, Copy)]
pub struct AgenceScope(pub Option<Uuid>);

fn lire_header(parts: &Parts) -> Result<Option<Uuid>, AppError> {
    match parts.headers.get(AGENCE_ID_HEADER) {
        None => Ok(None),
        Some(value) => {
            let texte = value.to_str().map_err(|_| {
                AppError::RegleMetier("Le header X-Agence-Id est illisible.".to_string())
            })?;
            let id = Uuid::parse_str(texte).map_err(|_| {
                AppError::RegleMetier("Le header X-Agence-Id n'est pas un UUID.".to_string())
            })?;
            Ok(Some(id))
        }
    }
}

impl<S> FromRequestParts<S> for AgenceScope
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nécessite auth_guard en amont.
        let utilisateur = parts
            .extensions
            .get::<Utilisateur>()
            .cloned()
            .ok_or(AppError::TokenInvalide)?;

        let demande = lire_header(parts)?;

        match utilisateur.role {
            RoleUtilisateur::Superadmin => Ok(AgenceScope(demande)),
            RoleUtilisateur::Manager | RoleUtilisateur::Employee => {
                // Pas question de sortir de sa propre agence.
                if let (Some(cible), Some(propre)) = (demande, utilisateur.agence_id) {
                    if cible != propre {
                        return Err(AppError::AccesRefuse);
                    }
                }
                Ok(AgenceScope(utilisateur.agence_id))
            }
        }
    }
}
