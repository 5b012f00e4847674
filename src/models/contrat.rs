// src/models/contrat.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mappe le CREATE TYPE statut_contrat de la base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "statut_contrat", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatutContrat {
    Actif,
    EnCours,
    Resilie,
    ARenouveler,
}

impl StatutContrat {
    pub fn libelle(self) -> &'static str {
        match self {
            StatutContrat::Actif => "actif",
            StatutContrat::EnCours => "en_cours",
            StatutContrat::Resilie => "resilie",
            StatutContrat::ARenouveler => "a_renouveler",
        }
    }

    // Table des transitions autorisées. `resilie` est terminal, le retour
    // a_renouveler -> actif passe par le renouvellement.
    pub fn peut_passer_a(self, cible: StatutContrat) -> bool {
        use StatutContrat::*;
        if self == cible {
            return true;
        }
        matches!(
            (self, cible),
            (Actif, ARenouveler)
                | (Actif, Resilie)
                | (EnCours, Actif)
                | (EnCours, Resilie)
                | (ARenouveler, Actif)
                | (ARenouveler, Resilie)
        )
    }
}

// Un contrat d'assurance : lie un contact client à un partenaire assureur.
// La ligne vivante est toujours la période courante ; les périodes
// remplacées vivent dans `contrat_historique`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contrat {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub partenaire_id: Uuid,
    pub reference: String,
    pub type_risque: Option<String>,
    pub produit: Option<String>,
    pub montant_annuel: Decimal,
    pub commission_premiere_annee: Decimal,
    pub commission_annees_suivantes: Decimal,
    pub frais_dossier: Decimal,
    pub frais_recurrents: bool,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub statut: StatutContrat,
    pub motif_resiliation: Option<String>,
    pub date_resiliation: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Une période remplacée, archivée telle quelle au moment du renouvellement.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContratHistorique {
    pub id: Uuid,
    pub contrat_id: Uuid,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub montant_annuel: Decimal,
    pub commission_premiere_annee: Decimal,
    pub commission_annees_suivantes: Decimal,
    pub frais_dossier: Decimal,
    pub archive_le: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContratPayload {
    pub contact_id: Uuid,
    pub partenaire_id: Uuid,
    pub type_risque: Option<String>,
    pub produit: Option<String>,
    #[schema(value_type = f64, example = 1200.0)]
    pub montant_annuel: Decimal,
    #[schema(value_type = f64, example = 30.0)]
    pub commission_premiere_annee: Decimal,
    #[schema(value_type = f64, example = 10.0)]
    pub commission_annees_suivantes: Decimal,
    #[serde(default)]
    #[schema(value_type = f64, example = 50.0)]
    pub frais_dossier: Decimal,
    #[serde(default)]
    pub frais_recurrents: bool,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
}

// Variante embarquée dans la création d'un contact (sans contact_id).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContratEmbarquePayload {
    pub partenaire_id: Uuid,
    pub type_risque: Option<String>,
    pub produit: Option<String>,
    #[schema(value_type = f64)]
    pub montant_annuel: Decimal,
    #[schema(value_type = f64)]
    pub commission_premiere_annee: Decimal,
    #[schema(value_type = f64)]
    pub commission_annees_suivantes: Decimal,
    #[serde(default)]
    #[schema(value_type = f64)]
    pub frais_dossier: Decimal,
    #[serde(default)]
    pub frais_recurrents: bool,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
}

impl ContratEmbarquePayload {
    pub fn avec_contact(self, contact_id: Uuid) -> CreateContratPayload {
        CreateContratPayload {
            contact_id,
            partenaire_id: self.partenaire_id,
            type_risque: self.type_risque,
            produit: self.produit,
            montant_annuel: self.montant_annuel,
            commission_premiere_annee: self.commission_premiere_annee,
            commission_annees_suivantes: self.commission_annees_suivantes,
            frais_dossier: self.frais_dossier,
            frais_recurrents: self.frais_recurrents,
            date_debut: self.date_debut,
            date_fin: self.date_fin,
        }
    }
}

// PUT = remplacement complet de l'objet, pas un patch.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContratPayload {
    pub partenaire_id: Uuid,
    pub type_risque: Option<String>,
    pub produit: Option<String>,
    #[schema(value_type = f64)]
    pub montant_annuel: Decimal,
    #[schema(value_type = f64)]
    pub commission_premiere_annee: Decimal,
    #[schema(value_type = f64)]
    pub commission_annees_suivantes: Decimal,
    #[serde(default)]
    #[schema(value_type = f64)]
    pub frais_dossier: Decimal,
    #[serde(default)]
    pub frais_recurrents: bool,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub statut: StatutContrat,
    pub motif_resiliation: Option<String>,
    pub date_resiliation: Option<NaiveDate>,
}

// Les montants omis au renouvellement reprennent ceux de la période courante.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenouvellementPayload {
    #[schema(value_type = Option<f64>)]
    pub montant_annuel: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub commission_premiere_annee: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub commission_annees_suivantes: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub frais_dossier: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resilie_est_terminal() {
        assert!(!StatutContrat::Resilie.peut_passer_a(StatutContrat::Actif));
        assert!(!StatutContrat::Resilie.peut_passer_a(StatutContrat::EnCours));
        assert!(!StatutContrat::Resilie.peut_passer_a(StatutContrat::ARenouveler));
        // Rester sur place est toujours permis (PUT idempotent).
        assert!(StatutContrat::Resilie.peut_passer_a(StatutContrat::Resilie));
    }

    #[test]
    fn transitions_depuis_actif() {
        assert!(StatutContrat::Actif.peut_passer_a(StatutContrat::ARenouveler));
        assert!(StatutContrat::Actif.peut_passer_a(StatutContrat::Resilie));
        assert!(!StatutContrat::Actif.peut_passer_a(StatutContrat::EnCours));
    }

    #[test]
    fn a_renouveler_redevient_actif() {
        assert!(StatutContrat::ARenouveler.peut_passer_a(StatutContrat::Actif));
    }

    #[test]
    fn en_cours_peut_demarrer_ou_tomber() {
        assert!(StatutContrat::EnCours.peut_passer_a(StatutContrat::Actif));
        assert!(StatutContrat::EnCours.peut_passer_a(StatutContrat::Resilie));
        assert!(!StatutContrat::EnCours.peut_passer_a(StatutContrat::ARenouveler));
    }
}
