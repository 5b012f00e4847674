// src/db/dashboard_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;

// Compteurs agrégés du tableau de bord. Les montants, eux, sont dérivés
// en mémoire par le calculateur de commissions, jamais persistés.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
pub struct Compteurs {
    pub nb_contacts: i64,
    pub nb_prospects: i64,
    pub nb_clients: i64,
    pub nb_contrats_actifs: i64,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn compteurs(&self, agence_id: Option<Uuid>) -> Result<Compteurs, AppError> {
        let compteurs = sqlx::query_as::<_, Compteurs>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM contacts
                 WHERE ($1::uuid IS NULL OR agence_id = $1)) AS nb_contacts,
                (SELECT COUNT(*) FROM contacts
                 WHERE statut = 'prospect' AND ($1::uuid IS NULL OR agence_id = $1)) AS nb_prospects,
                (SELECT COUNT(*) FROM contacts
                 WHERE statut = 'client' AND ($1::uuid IS NULL OR agence_id = $1)) AS nb_clients,
                (SELECT COUNT(*) FROM contrats ct
                 JOIN contacts c ON c.id = ct.contact_id
                 WHERE ct.statut = 'actif' AND ($1::uuid IS NULL OR c.agence_id = $1)) AS nb_contrats_actifs
            "#,
        )
        .bind(agence_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(compteurs)
    }
}
