// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mappe le CREATE TYPE role_utilisateur de la base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "role_utilisateur", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoleUtilisateur {
    Superadmin,
    Manager,
    Employee,
}

// Représente un utilisateur venant de la base de données
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Utilisateur {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANT pour la sécurité
    #[schema(ignore)]
    pub password_hash: String,

    pub nom: String,
    pub prenom: String,
    pub role: RoleUtilisateur,
    pub agence_id: Option<Uuid>,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub reset_token_hash: Option<String>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Données pour l'inscription d'un nouvel utilisateur
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    #[schema(example = "jean.dupont@courtage.fr")]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub nom: String,
    #[validate(length(min = 1, message = "Le prénom est obligatoire."))]
    pub prenom: String,
    pub role: Option<RoleUtilisateur>,
    pub agence_id: Option<Uuid>,
}

// Données pour la connexion
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordPayload {
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    pub email: String,
    pub token: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub new_password: String,
}

// Réponse d'authentification avec le token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Structure de données ("claims") contenue dans le JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID de l'utilisateur)
    pub exp: usize, // Expiration du token
    pub iat: usize, // Date d'émission
}
