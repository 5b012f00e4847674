// src/services/storage.rs
//
// Client HTTP vers le stockage objet (API compatible Supabase Storage).
// L'upload bloque la requête jusqu'à la réponse du stockage, sans retry.

use serde_json::json;
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

// Ne garde que [A-Za-z0-9._-] ; tout le reste devient '_'.
pub fn nettoyer_nom(nom: &str) -> String {
    nom.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// Adresse d'un objet : contact_{id}/{timestamp}_{nom_nettoye}
pub fn chemin_objet(contact_id: Uuid, horodatage_ms: i64, nom_fichier: &str) -> String {
    format!(
        "contact_{}/{}_{}",
        contact_id,
        horodatage_ms,
        nettoyer_nom(nom_fichier)
    )
}

impl StorageClient {
    pub fn new(base_url: String, api_key: String, bucket: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            bucket,
        }
    }

    pub async fn upload(
        &self,
        chemin: &str,
        content_type: &str,
        contenu: Vec<u8>,
    ) -> Result<(), AppError> {
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, chemin);
        let reponse = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", content_type.to_string())
            .body(contenu)
            .send()
            .await
            .map_err(|e| AppError::Stockage(e.to_string()))?;

        if !reponse.status().is_success() {
            return Err(AppError::Stockage(format!(
                "upload refusé ({})",
                reponse.status()
            )));
        }
        Ok(())
    }

    // Demande au stockage une URL signée à durée limitée.
    pub async fn signed_url(&self, chemin: &str, expires_secs: u32) -> Result<String, AppError> {
        let url = format!("{}/object/sign/{}/{}", self.base_url, self.bucket, chemin);
        let reponse = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "expiresIn": expires_secs }))
            .send()
            .await
            .map_err(|e| AppError::Stockage(e.to_string()))?;

        if !reponse.status().is_success() {
            return Err(AppError::Stockage(format!(
                "signature refusée ({})",
                reponse.status()
            )));
        }

        let corps: serde_json::Value = reponse
            .json()
            .await
            .map_err(|e| AppError::Stockage(e.to_string()))?;

        let relatif = corps
            .get("signedURL")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::Stockage("réponse de signature inattendue".to_string()))?;

        Ok(format!("{}{}", self.base_url, relatif))
    }

    pub async fn delete(&self, chemin: &str) -> Result<(), AppError> {
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, chemin);
        let reponse = self
            .http
            .delete(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Stockage(e.to_string()))?;

        if !reponse.status().is_success() {
            return Err(AppError::Stockage(format!(
                "suppression refusée ({})",
                reponse.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nettoyage_remplace_les_caracteres_interdits() {
        assert_eq!(nettoyer_nom("attestation 2025.pdf"), "attestation_2025.pdf");
        assert_eq!(nettoyer_nom("relevé/été.png"), "relev___t_.png");
        assert_eq!(nettoyer_nom("simple-nom_v2.jpg"), "simple-nom_v2.jpg");
    }

    #[test]
    fn chemin_objet_prefixe_par_contact() {
        let id = Uuid::nil();
        let chemin = chemin_objet(id, 1_700_000_000_000, "devis auto.pdf");
        assert_eq!(
            chemin,
            "contact_00000000-0000-0000-0000-000000000000/1700000000000_devis_auto.pdf"
        );
    }
}
