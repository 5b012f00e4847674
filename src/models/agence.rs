// src/models/agence.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Une agence = une frontière de tenant. Les contacts, partenaires et
// utilisateurs portent une clé étrangère agence_id, le cloisonnement est
// appliqué au niveau des requêtes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agence {
    pub id: Uuid,
    pub nom: String,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgencePayload {
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    #[schema(example = "Agence de Lyon")]
    pub nom: String,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: Option<String>,
}
