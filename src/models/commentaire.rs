// src/models/commentaire.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Canal d'interaction à l'origine de la note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "type_interaction", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TypeInteraction {
    AppelEntrant,
    AppelSortant,
    Email,
    Courrier,
    RendezVous,
    Autre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sujet_commentaire", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SujetCommentaire {
    Devis,
    Sinistre,
    Reclamation,
    Renouvellement,
    Information,
    Autre,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Commentaire {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub utilisateur_id: Uuid,
    pub type_interaction: TypeInteraction,
    pub sujet: SujetCommentaire,
    pub contenu: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentairePayload {
    pub contact_id: Uuid,
    pub type_interaction: Option<TypeInteraction>,
    pub sujet: Option<SujetCommentaire>,
    #[validate(length(min = 1, message = "Le contenu est obligatoire."))]
    pub contenu: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentairePayload {
    pub type_interaction: Option<TypeInteraction>,
    pub sujet: Option<SujetCommentaire>,
    #[validate(length(min = 1, message = "Le contenu est obligatoire."))]
    pub contenu: String,
}

// Compteur de commentaires non lus pour l'utilisateur appelant.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonLus {
    pub contact_id: Uuid,
    pub non_lus: i64,
}
