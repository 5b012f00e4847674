// src/db/contact_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contact::{
        Contact, ContactFiltre, ContactHistorique, CreateContactPayload, StatutContact,
        UpdateContactPayload,
    },
};

#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        agence_id: Option<Uuid>,
        payload: &CreateContactPayload,
        statut: StatutContact,
    ) -> Result<Contact, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (
                agence_id, civilite, nom, prenom, email, telephone, date_naissance,
                type_contact, type_professionnel, statut, adresse, code_postal, ville,
                expert_comptable, apporteur_affaires
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7,
                    COALESCE($8, 'particulier'), $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(agence_id)
        .bind(&payload.civilite)
        .bind(&payload.nom)
        .bind(&payload.prenom)
        .bind(&payload.email)
        .bind(&payload.telephone)
        .bind(payload.date_naissance)
        .bind(payload.type_contact)
        .bind(&payload.type_professionnel)
        .bind(statut)
        .bind(&payload.adresse)
        .bind(&payload.code_postal)
        .bind(&payload.ville)
        .bind(&payload.expert_comptable)
        .bind(&payload.apporteur_affaires)
        .fetch_one(executor)
        .await?;

        Ok(contact)
    }

    pub async fn find_by_id(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT * FROM contacts
            WHERE id = $1 AND ($2::uuid IS NULL OR agence_id = $2)
            "#,
        )
        .bind(id)
        .bind(agence_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contact)
    }

    pub async fn list(
        &self,
        agence_id: Option<Uuid>,
        filtre: &ContactFiltre,
    ) -> Result<Vec<Contact>, AppError> {
        let recherche = filtre.q.as_ref().map(|q| format!("%{}%", q));

        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT * FROM contacts
            WHERE ($1::uuid IS NULL OR agence_id = $1)
              AND ($2::statut_contact IS NULL OR statut = $2)
              AND ($3::text IS NULL OR nom ILIKE $3 OR prenom ILIKE $3 OR email ILIKE $3)
            ORDER BY nom ASC, prenom ASC
            "#,
        )
        .bind(agence_id)
        .bind(filtre.statut)
        .bind(recherche)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    // PUT = remplacement complet : chaque colonne est réécrite, les champs
    // omis du payload repassent à NULL.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateContactPayload,
    ) -> Result<Contact, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts SET
                civilite = $2,
                nom = $3,
                prenom = $4,
                email = $5,
                telephone = $6,
                date_naissance = $7,
                type_contact = COALESCE($8, type_contact),
                type_professionnel = $9,
                statut = COALESCE($10, statut),
                adresse = $11,
                code_postal = $12,
                ville = $13,
                expert_comptable = $14,
                apporteur_affaires = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.civilite)
        .bind(&payload.nom)
        .bind(&payload.prenom)
        .bind(&payload.email)
        .bind(&payload.telephone)
        .bind(payload.date_naissance)
        .bind(payload.type_contact)
        .bind(&payload.type_professionnel)
        .bind(payload.statut)
        .bind(&payload.adresse)
        .bind(&payload.code_postal)
        .bind(&payload.ville)
        .bind(&payload.expert_comptable)
        .bind(&payload.apporteur_affaires)
        .fetch_one(executor)
        .await?;

        Ok(contact)
    }

    // Bascule prospect -> client en un seul UPDATE gardé : la ligne n'est
    // touchée que si le contact est encore prospect, ce qui rend la bascule
    // (et son entrée d'historique côté appelant) unique même sous
    // créations concurrentes.
    pub async fn passer_client<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE contacts SET statut = $2, updated_at = NOW() WHERE id = $1 AND statut = $3",
        )
        .bind(id)
        .bind(StatutContact::Client)
        .bind(StatutContact::Prospect)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    // Les commentaires, documents et entrées d'historique tombent par
    // cascade de clé étrangère ; les contrats sont supprimés explicitement
    // par le service dans la même transaction.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn compter_enfants(&self, id: Uuid) -> Result<(i64, i64, i64), AppError> {
        let row: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM contrats WHERE contact_id = $1),
                (SELECT COUNT(*) FROM commentaires WHERE contact_id = $1),
                (SELECT COUNT(*) FROM documents WHERE contact_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // --- PORTAIL ---

    pub async fn find_by_utilisateur(
        &self,
        utilisateur_id: Uuid,
    ) -> Result<Option<Contact>, AppError> {
        let contact =
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE utilisateur_id = $1")
                .bind(utilisateur_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(contact)
    }

    // Rattache à un compte fraîchement inscrit les contacts orphelins
    // portant le même e-mail.
    pub async fn lier_utilisateur<'e, E>(
        &self,
        executor: E,
        utilisateur_id: Uuid,
        email: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET utilisateur_id = $1, updated_at = NOW()
            WHERE email = $2 AND utilisateur_id IS NULL
            "#,
        )
        .bind(utilisateur_id)
        .bind(email)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    // --- HISTORIQUE (append-only) ---

    pub async fn ajouter_historique<'e, E>(
        &self,
        executor: E,
        contact_id: Uuid,
        utilisateur_id: Option<Uuid>,
        action: &str,
        details: Option<&str>,
    ) -> Result<ContactHistorique, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entree = sqlx::query_as::<_, ContactHistorique>(
            r#"
            INSERT INTO contact_historique (contact_id, utilisateur_id, action, details)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(contact_id)
        .bind(utilisateur_id)
        .bind(action)
        .bind(details)
        .fetch_one(executor)
        .await?;
        Ok(entree)
    }

    pub async fn lister_historique(
        &self,
        contact_id: Uuid,
    ) -> Result<Vec<ContactHistorique>, AppError> {
        let entrees = sqlx::query_as::<_, ContactHistorique>(
            r#"
            SELECT * FROM contact_historique
            WHERE contact_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(contact_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entrees)
    }
}
