// src/models/document.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Métadonnées d'une pièce jointe ; l'octet vit dans le stockage objet,
// adressé par `chemin` (contact_{id}/{timestamp}_{nom_nettoye}).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub nom: String,
    pub chemin: String,
    pub content_type: String,
    pub taille: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    pub signed_url: String,
}
