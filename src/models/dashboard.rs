// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Résumé affiché en tête du tableau de bord.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDashboard {
    pub nb_contacts: i64,
    pub nb_prospects: i64,
    pub nb_clients: i64,
    pub nb_contrats_actifs: i64,
    #[schema(value_type = f64)]
    pub commission_mensuelle_totale: Decimal,
    #[schema(value_type = f64)]
    pub frais_mensuels_totaux: Decimal,
}

// Un point de la série des 12 derniers mois.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenuMensuel {
    pub annee: i32,
    pub mois: u32,
    #[schema(value_type = f64)]
    pub commissions: Decimal,
    #[schema(value_type = f64)]
    pub frais: Decimal,
    #[schema(value_type = f64)]
    pub total: Decimal,
}
