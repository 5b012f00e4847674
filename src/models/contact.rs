// src/models/contact.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::contrat::ContratEmbarquePayload;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "type_contact", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TypeContact {
    Particulier,
    Professionnel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "statut_contact", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatutContact {
    Prospect,
    Client,
}

// --- CONTACT ---

// Prospect ou client, personne physique ou entreprise.
// `utilisateur_id` est renseigné quand le contact a un compte portail.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub agence_id: Option<Uuid>,
    pub utilisateur_id: Option<Uuid>,
    pub civilite: Option<String>,
    pub nom: String,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub type_contact: TypeContact,
    pub type_professionnel: Option<String>,
    pub statut: StatutContact,
    pub adresse: Option<String>,
    pub code_postal: Option<String>,
    pub ville: Option<String>,
    pub expert_comptable: Option<String>,
    pub apporteur_affaires: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Entrée du journal d'audit d'un contact (append-only).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactHistorique {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub utilisateur_id: Option<Uuid>,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Fiche détaillée renvoyée par GET /api/contacts/:id
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: Contact,
    pub nb_contrats: i64,
    pub nb_commentaires: i64,
    pub nb_documents: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactPayload {
    pub civilite: Option<String>,
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    #[schema(example = "Durand")]
    pub nom: String,
    pub prenom: Option<String>,
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub type_contact: Option<TypeContact>,
    pub type_professionnel: Option<String>,
    pub statut: Option<StatutContact>,
    pub adresse: Option<String>,
    pub code_postal: Option<String>,
    pub ville: Option<String>,
    pub expert_comptable: Option<String>,
    pub apporteur_affaires: Option<String>,

    // Contrats créés dans la même transaction que le contact.
    // Obligatoire (non vide) quand statut = client.
    #[serde(default)]
    pub contrats: Vec<ContratEmbarquePayload>,
}

// PUT = remplacement complet : un champ optionnel omis repasse à NULL.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactPayload {
    pub civilite: Option<String>,
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub nom: String,
    pub prenom: Option<String>,
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub type_contact: Option<TypeContact>,
    pub type_professionnel: Option<String>,
    pub statut: Option<StatutContact>,
    pub adresse: Option<String>,
    pub code_postal: Option<String>,
    pub ville: Option<String>,
    pub expert_comptable: Option<String>,
    pub apporteur_affaires: Option<String>,
}

// Filtres de liste : ?statut=prospect&q=durand
#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactFiltre {
    pub statut: Option<StatutContact>,
    pub q: Option<String>,
}
