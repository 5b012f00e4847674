// src/db/contrat_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contrat::{
        Contrat, ContratHistorique, CreateContratPayload, StatutContrat, UpdateContratPayload,
    },
};

#[derive(Clone)]
pub struct ContratRepository {
    pool: PgPool,
}

impl ContratRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // `reference` porte un index unique : l'appelant réessaie avec un autre
    // suffixe sur violation.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        reference: &str,
        payload: &CreateContratPayload,
    ) -> Result<Contrat, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contrat = sqlx::query_as::<_, Contrat>(
            r#"
            INSERT INTO contrats (
                contact_id, partenaire_id, reference, type_risque, produit,
                montant_annuel, commission_premiere_annee, commission_annees_suivantes,
                frais_dossier, frais_recurrents, date_debut, date_fin
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(payload.contact_id)
        .bind(payload.partenaire_id)
        .bind(reference)
        .bind(&payload.type_risque)
        .bind(&payload.produit)
        .bind(payload.montant_annuel)
        .bind(payload.commission_premiere_annee)
        .bind(payload.commission_annees_suivantes)
        .bind(payload.frais_dossier)
        .bind(payload.frais_recurrents)
        .bind(payload.date_debut)
        .bind(payload.date_fin)
        .fetch_one(executor)
        .await?;

        Ok(contrat)
    }

    // Le scope d'agence passe par le contact propriétaire.
    pub async fn find_by_id(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Option<Contrat>, AppError> {
        let contrat = sqlx::query_as::<_, Contrat>(
            r#"
            SELECT ct.* FROM contrats ct
            JOIN contacts c ON c.id = ct.contact_id
            WHERE ct.id = $1 AND ($2::uuid IS NULL OR c.agence_id = $2)
            "#,
        )
        .bind(id)
        .bind(agence_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contrat)
    }

    pub async fn list(&self, agence_id: Option<Uuid>) -> Result<Vec<Contrat>, AppError> {
        let contrats = sqlx::query_as::<_, Contrat>(
            r#"
            SELECT ct.* FROM contrats ct
            JOIN contacts c ON c.id = ct.contact_id
            WHERE ($1::uuid IS NULL OR c.agence_id = $1)
            ORDER BY ct.created_at DESC
            "#,
        )
        .bind(agence_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contrats)
    }

    pub async fn list_by_contact(&self, contact_id: Uuid) -> Result<Vec<Contrat>, AppError> {
        let contrats = sqlx::query_as::<_, Contrat>(
            "SELECT * FROM contrats WHERE contact_id = $1 ORDER BY created_at DESC",
        )
        .bind(contact_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contrats)
    }

    pub async fn lister_actifs(&self, agence_id: Option<Uuid>) -> Result<Vec<Contrat>, AppError> {
        let contrats = sqlx::query_as::<_, Contrat>(
            r#"
            SELECT ct.* FROM contrats ct
            JOIN contacts c ON c.id = ct.contact_id
            WHERE ct.statut = 'actif' AND ($1::uuid IS NULL OR c.agence_id = $1)
            "#,
        )
        .bind(agence_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contrats)
    }

    // PUT = remplacement complet (le contact propriétaire et la référence
    // ne changent jamais).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateContratPayload,
    ) -> Result<Contrat, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contrat = sqlx::query_as::<_, Contrat>(
            r#"
            UPDATE contrats SET
                partenaire_id = $2,
                type_risque = $3,
                produit = $4,
                montant_annuel = $5,
                commission_premiere_annee = $6,
                commission_annees_suivantes = $7,
                frais_dossier = $8,
                frais_recurrents = $9,
                date_debut = $10,
                date_fin = $11,
                statut = $12,
                motif_resiliation = $13,
                date_resiliation = $14,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.partenaire_id)
        .bind(&payload.type_risque)
        .bind(&payload.produit)
        .bind(payload.montant_annuel)
        .bind(payload.commission_premiere_annee)
        .bind(payload.commission_annees_suivantes)
        .bind(payload.frais_dossier)
        .bind(payload.frais_recurrents)
        .bind(payload.date_debut)
        .bind(payload.date_fin)
        .bind(payload.statut)
        .bind(&payload.motif_resiliation)
        .bind(payload.date_resiliation)
        .fetch_one(executor)
        .await?;

        Ok(contrat)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM contrats WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_contact<'e, E>(
        &self,
        executor: E,
        contact_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM contrats WHERE contact_id = $1")
            .bind(contact_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  CHAÎNE DE VERSIONS (renouvellement)
    // =========================================================================

    // Archive la période courante telle quelle avant de l'écraser.
    pub async fn archiver_periode<'e, E>(
        &self,
        executor: E,
        contrat: &Contrat,
    ) -> Result<ContratHistorique, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entree = sqlx::query_as::<_, ContratHistorique>(
            r#"
            INSERT INTO contrat_historique (
                contrat_id, date_debut, date_fin, montant_annuel,
                commission_premiere_annee, commission_annees_suivantes, frais_dossier
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(contrat.id)
        .bind(contrat.date_debut)
        .bind(contrat.date_fin)
        .bind(contrat.montant_annuel)
        .bind(contrat.commission_premiere_annee)
        .bind(contrat.commission_annees_suivantes)
        .bind(contrat.frais_dossier)
        .fetch_one(executor)
        .await?;
        Ok(entree)
    }

    // Écrase la ligne vivante avec la nouvelle période.
    #[allow(clippy::too_many_arguments)]
    pub async fn appliquer_renouvellement<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        date_debut: chrono::NaiveDate,
        date_fin: chrono::NaiveDate,
        montant_annuel: rust_decimal::Decimal,
        commission_premiere_annee: rust_decimal::Decimal,
        commission_annees_suivantes: rust_decimal::Decimal,
        frais_dossier: rust_decimal::Decimal,
    ) -> Result<Contrat, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contrat = sqlx::query_as::<_, Contrat>(
            r#"
            UPDATE contrats SET
                date_debut = $2,
                date_fin = $3,
                montant_annuel = $4,
                commission_premiere_annee = $5,
                commission_annees_suivantes = $6,
                frais_dossier = $7,
                statut = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(date_debut)
        .bind(date_fin)
        .bind(montant_annuel)
        .bind(commission_premiere_annee)
        .bind(commission_annees_suivantes)
        .bind(frais_dossier)
        .bind(StatutContrat::Actif)
        .fetch_one(executor)
        .await?;
        Ok(contrat)
    }

    // L'ordre de stockage est l'ordre d'insertion ; le tri par date_debut
    // décroissante ne se fait qu'à l'affichage.
    pub async fn lister_historique(
        &self,
        contrat_id: Uuid,
    ) -> Result<Vec<ContratHistorique>, AppError> {
        let entrees = sqlx::query_as::<_, ContratHistorique>(
            r#"
            SELECT * FROM contrat_historique
            WHERE contrat_id = $1
            ORDER BY date_debut DESC
            "#,
        )
        .bind(contrat_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entrees)
    }

    pub async fn reference_existe<'e, E>(
        &self,
        executor: E,
        reference: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (present,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM contrats WHERE reference = $1)")
                .bind(reference)
                .fetch_one(executor)
                .await?;
        Ok(present)
    }

    pub async fn compter_par_partenaire(&self, partenaire_id: Uuid) -> Result<i64, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM contrats WHERE partenaire_id = $1")
                .bind(partenaire_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
