// src/models/partenaire.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "statut_partenaire", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatutPartenaire {
    Actif,
    Inactif,
}

// Assureur ou grossiste proposant des produits aux contrats.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Partenaire {
    pub id: Uuid,
    pub agence_id: Option<Uuid>,
    pub nom: String,
    pub types_produits: Vec<String>,
    pub statut: StatutPartenaire,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub site_extranet: Option<String>,
    pub commentaire: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Payload unique pour POST et PUT : le PUT est un remplacement complet,
// les champs optionnels omis repassent à NULL.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartenairePayload {
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    #[schema(example = "AXA France")]
    pub nom: String,
    #[serde(default)]
    #[schema(example = json!(["auto", "habitation", "prévoyance"]))]
    pub types_produits: Vec<String>,
    pub statut: Option<StatutPartenaire>,
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: Option<String>,
    pub telephone: Option<String>,
    #[schema(example = "https://extranet.axa.fr")]
    pub site_extranet: Option<String>,
    pub commentaire: Option<String>,
}
