// src/services/contrat_service.rs

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ContactRepository, ContratRepository, PartenaireRepository},
    models::{
        auth::Utilisateur,
        contrat::{
            Contrat, ContratHistorique, CreateContratPayload, RenouvellementPayload,
            StatutContrat, UpdateContratPayload,
        },
    },
};

// Référence au format CONT-{année}_{mois}_{suffixe aléatoire à 4 chiffres}.
// Pas unique par construction : la colonne porte un index unique et la
// création réessaie avec un autre suffixe en cas de collision.
pub fn generer_reference(horodatage: DateTime<Utc>, rng: &mut impl Rng) -> String {
    format!(
        "CONT-{}_{:02}_{:04}",
        horodatage.year(),
        horodatage.month(),
        rng.gen_range(0..10_000)
    )
}

// Garde-fous serveur : dates cohérentes et montants positifs.
pub fn valider_montants_et_dates(
    montant_annuel: Decimal,
    commission_premiere_annee: Decimal,
    commission_annees_suivantes: Decimal,
    frais_dossier: Decimal,
    date_debut: NaiveDate,
    date_fin: NaiveDate,
) -> Result<(), AppError> {
    if date_fin <= date_debut {
        return Err(AppError::RegleMetier(
            "La date de fin doit être postérieure à la date de début.".to_string(),
        ));
    }
    if montant_annuel < Decimal::ZERO
        || commission_premiere_annee < Decimal::ZERO
        || commission_annees_suivantes < Decimal::ZERO
        || frais_dossier < Decimal::ZERO
    {
        return Err(AppError::RegleMetier(
            "Les montants et taux ne peuvent pas être négatifs.".to_string(),
        ));
    }
    Ok(())
}

// Montants du renouvellement : les champs omis reprennent ceux de la
// période courante, et le résultat passe par les mêmes garde-fous que
// la création (taux compris).
pub fn resoudre_montants_renouvellement(
    existant: &Contrat,
    payload: &RenouvellementPayload,
) -> Result<(Decimal, Decimal, Decimal, Decimal), AppError> {
    let montant_annuel = payload.montant_annuel.unwrap_or(existant.montant_annuel);
    let commission_premiere_annee = payload
        .commission_premiere_annee
        .unwrap_or(existant.commission_premiere_annee);
    let commission_annees_suivantes = payload
        .commission_annees_suivantes
        .unwrap_or(existant.commission_annees_suivantes);
    let frais_dossier = payload.frais_dossier.unwrap_or(existant.frais_dossier);

    if montant_annuel < Decimal::ZERO
        || commission_premiere_annee < Decimal::ZERO
        || commission_annees_suivantes < Decimal::ZERO
        || frais_dossier < Decimal::ZERO
    {
        return Err(AppError::RegleMetier(
            "Les montants et taux ne peuvent pas être négatifs.".to_string(),
        ));
    }

    Ok((
        montant_annuel,
        commission_premiere_annee,
        commission_annees_suivantes,
        frais_dossier,
    ))
}

const MAX_TENTATIVES_REFERENCE: u32 = 3;

#[derive(Clone)]
pub struct ContratService {
    repo: ContratRepository,
    contact_repo: ContactRepository,
    partenaire_repo: PartenaireRepository,
    pool: PgPool,
}

impl ContratService {
    pub fn new(
        repo: ContratRepository,
        contact_repo: ContactRepository,
        partenaire_repo: PartenaireRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            contact_repo,
            partenaire_repo,
            pool,
        }
    }

    // Création transactionnelle : insertion du contrat, passage éventuel du
    // contact de prospect à client et entrée d'historique partent ensemble
    // ou pas du tout.
    pub async fn create_contrat(
        &self,
        agence_id: Option<Uuid>,
        utilisateur: &Utilisateur,
        payload: &CreateContratPayload,
    ) -> Result<Contrat, AppError> {
        valider_montants_et_dates(
            payload.montant_annuel,
            payload.commission_premiere_annee,
            payload.commission_annees_suivantes,
            payload.frais_dossier,
            payload.date_debut,
            payload.date_fin,
        )?;

        self.contact_repo
            .find_by_id(agence_id, payload.contact_id)
            .await?
            .ok_or(AppError::Introuvable("Contact"))?;

        if !self.partenaire_repo.exists(payload.partenaire_id).await? {
            return Err(AppError::Introuvable("Partenaire"));
        }

        // Une transaction Postgres avortée ne se rejoue pas : chaque
        // tentative de référence repart sur une transaction fraîche.
        let mut derniere_erreur = None;
        for _ in 0..MAX_TENTATIVES_REFERENCE {
            let reference = generer_reference(Utc::now(), &mut rand::thread_rng());
            let mut tx = self.pool.begin().await?;

            let contrat = match self.repo.insert(&mut *tx, &reference, payload).await {
                Ok(contrat) => contrat,
                Err(AppError::DatabaseError(e))
                    if e.as_database_error()
                        .is_some_and(|db| db.is_unique_violation()) =>
                {
                    tx.rollback().await?;
                    derniere_erreur = Some(AppError::DatabaseError(e));
                    continue;
                }
                Err(autre) => return Err(autre),
            };

            // Le premier contrat fait passer le prospect en client. L'UPDATE
            // gardé ne touche la ligne qu'une seule fois, même si deux
            // créations concurrentes visent le même prospect.
            let bascules = self
                .contact_repo
                .passer_client(&mut *tx, payload.contact_id)
                .await?;
            if bascules == 1 {
                self.contact_repo
                    .ajouter_historique(
                        &mut *tx,
                        payload.contact_id,
                        Some(utilisateur.id),
                        "passage_client",
                        Some("Premier contrat souscrit"),
                    )
                    .await?;
            }

            self.contact_repo
                .ajouter_historique(
                    &mut *tx,
                    payload.contact_id,
                    Some(utilisateur.id),
                    "creation_contrat",
                    Some(&format!("Contrat {}", contrat.reference)),
                )
                .await?;

            tx.commit().await?;
            return Ok(contrat);
        }

        Err(derniere_erreur
            .unwrap_or_else(|| anyhow::anyhow!("génération de référence épuisée").into()))
    }

    pub async fn get_contrat(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Contrat, AppError> {
        self.repo
            .find_by_id(agence_id, id)
            .await?
            .ok_or(AppError::Introuvable("Contrat"))
    }

    pub async fn list_contrats(&self, agence_id: Option<Uuid>) -> Result<Vec<Contrat>, AppError> {
        self.repo.list(agence_id).await
    }

    // PUT = remplacement complet, sous contrôle de la table de transitions.
    pub async fn update_contrat(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
        payload: &UpdateContratPayload,
    ) -> Result<Contrat, AppError> {
        valider_montants_et_dates(
            payload.montant_annuel,
            payload.commission_premiere_annee,
            payload.commission_annees_suivantes,
            payload.frais_dossier,
            payload.date_debut,
            payload.date_fin,
        )?;

        let existant = self.get_contrat(agence_id, id).await?;

        if !existant.statut.peut_passer_a(payload.statut) {
            return Err(AppError::TransitionStatutInterdite {
                de: existant.statut.libelle().to_string(),
                vers: payload.statut.libelle().to_string(),
            });
        }

        if payload.statut == StatutContrat::Resilie
            && (payload.motif_resiliation.is_none() || payload.date_resiliation.is_none())
        {
            return Err(AppError::RegleMetier(
                "La résiliation exige un motif et une date.".to_string(),
            ));
        }

        if !self.partenaire_repo.exists(payload.partenaire_id).await? {
            return Err(AppError::Introuvable("Partenaire"));
        }

        self.repo.update(&self.pool, id, payload).await
    }

    // Archive-puis-écrase : la période courante part dans la chaîne de
    // versions, la ligne vivante repart pour un an à compter d'aujourd'hui.
    pub async fn renouveler(
        &self,
        agence_id: Option<Uuid>,
        utilisateur: &Utilisateur,
        id: Uuid,
        payload: &RenouvellementPayload,
    ) -> Result<Contrat, AppError> {
        let existant = self.get_contrat(agence_id, id).await?;

        if existant.statut == StatutContrat::Resilie {
            return Err(AppError::TransitionStatutInterdite {
                de: existant.statut.libelle().to_string(),
                vers: StatutContrat::Actif.libelle().to_string(),
            });
        }

        let (montant_annuel, commission_premiere_annee, commission_annees_suivantes, frais_dossier) =
            resoudre_montants_renouvellement(&existant, payload)?;

        let aujourd_hui = Utc::now().date_naive();
        let fin = aujourd_hui
            .checked_add_months(Months::new(12))
            .ok_or_else(|| anyhow::anyhow!("date de fin hors calendrier"))?;

        let mut tx = self.pool.begin().await?;

        self.repo.archiver_periode(&mut *tx, &existant).await?;

        let renouvele = self
            .repo
            .appliquer_renouvellement(
                &mut *tx,
                id,
                aujourd_hui,
                fin,
                montant_annuel,
                commission_premiere_annee,
                commission_annees_suivantes,
                frais_dossier,
            )
            .await?;

        self.contact_repo
            .ajouter_historique(
                &mut *tx,
                existant.contact_id,
                Some(utilisateur.id),
                "renouvellement_contrat",
                Some(&format!("Contrat {}", existant.reference)),
            )
            .await?;

        tx.commit().await?;
        Ok(renouvele)
    }

    // Suppression sèche. Le statut du contact propriétaire n'est pas
    // reconsidéré : un client sans contrat reste client.
    pub async fn delete_contrat(
        &self,
        agence_id: Option<Uuid>,
        utilisateur: &Utilisateur,
        id: Uuid,
    ) -> Result<(), AppError> {
        let existant = self.get_contrat(agence_id, id).await?;

        let mut tx = self.pool.begin().await?;
        self.repo.delete(&mut *tx, id).await?;
        self.contact_repo
            .ajouter_historique(
                &mut *tx,
                existant.contact_id,
                Some(utilisateur.id),
                "suppression_contrat",
                Some(&format!("Contrat {}", existant.reference)),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn lister_historique(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Vec<ContratHistorique>, AppError> {
        // Vérifie l'existence (et le scope) avant de lister.
        self.get_contrat(agence_id, id).await?;
        self.repo.lister_historique(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn reference_au_format_attendu() {
        let horodatage = Utc.with_ymd_and_hms(2025, 8, 24, 10, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let reference = generer_reference(horodatage, &mut rng);

        let (prefixe, suffixe) = reference.split_at("CONT-2025_08_".len());
        assert_eq!(prefixe, "CONT-2025_08_");
        assert_eq!(suffixe.len(), 4);
        assert!(suffixe.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn mois_sur_deux_chiffres() {
        let horodatage = Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(generer_reference(horodatage, &mut rng).starts_with("CONT-2025_01_"));
    }

    #[test]
    fn dates_incoherentes_rejetees() {
        let debut = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let resultat = valider_montants_et_dates(
            Decimal::from(1200),
            Decimal::from(30),
            Decimal::from(10),
            Decimal::ZERO,
            debut,
            debut,
        );
        assert!(matches!(resultat, Err(AppError::RegleMetier(_))));
    }

    #[test]
    fn montants_negatifs_rejetes() {
        let debut = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let fin = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let resultat = valider_montants_et_dates(
            Decimal::from(-1),
            Decimal::from(30),
            Decimal::from(10),
            Decimal::ZERO,
            debut,
            fin,
        );
        assert!(matches!(resultat, Err(AppError::RegleMetier(_))));
    }

    fn contrat_en_place() -> Contrat {
        Contrat {
            id: Uuid::new_v4(),
            contact_id: Uuid::new_v4(),
            partenaire_id: Uuid::new_v4(),
            reference: "CONT-2025_06_0042".to_string(),
            type_risque: None,
            produit: None,
            montant_annuel: Decimal::from(1200),
            commission_premiere_annee: Decimal::from(30),
            commission_annees_suivantes: Decimal::from(10),
            frais_dossier: Decimal::from(50),
            frais_recurrents: false,
            date_debut: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            date_fin: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            statut: StatutContrat::Actif,
            motif_resiliation: None,
            date_resiliation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn renouvellement_reprend_les_montants_omis() {
        let existant = contrat_en_place();
        let payload = RenouvellementPayload {
            montant_annuel: Some(Decimal::from(1500)),
            commission_premiere_annee: None,
            commission_annees_suivantes: None,
            frais_dossier: None,
        };

        let (montant, premiere, suivantes, frais) =
            resoudre_montants_renouvellement(&existant, &payload).unwrap();
        assert_eq!(montant, Decimal::from(1500));
        assert_eq!(premiere, Decimal::from(30));
        assert_eq!(suivantes, Decimal::from(10));
        assert_eq!(frais, Decimal::from(50));
    }

    #[test]
    fn renouvellement_taux_negatif_rejete() {
        let existant = contrat_en_place();
        let payload = RenouvellementPayload {
            montant_annuel: None,
            commission_premiere_annee: Some(Decimal::from(-5)),
            commission_annees_suivantes: None,
            frais_dossier: None,
        };

        let resultat = resoudre_montants_renouvellement(&existant, &payload);
        assert!(matches!(resultat, Err(AppError::RegleMetier(_))));
    }

    #[test]
    fn renouvellement_frais_negatifs_rejetes() {
        let existant = contrat_en_place();
        let payload = RenouvellementPayload {
            montant_annuel: None,
            commission_premiere_annee: None,
            commission_annees_suivantes: None,
            frais_dossier: Some(Decimal::from(-1)),
        };

        assert!(resoudre_montants_renouvellement(&existant, &payload).is_err());
    }

    #[test]
    fn montants_valides_acceptes() {
        let debut = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let fin = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert!(valider_montants_et_dates(
            Decimal::from(1200),
            Decimal::from(30),
            Decimal::from(10),
            Decimal::from(50),
            debut,
            fin,
        )
        .is_ok());
    }
}
