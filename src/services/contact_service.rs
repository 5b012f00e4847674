// src/services/contact_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CommentaireRepository, ContactRepository, ContratRepository, PartenaireRepository},
    models::{
        auth::Utilisateur,
        commentaire::Commentaire,
        contact::{
            Contact, ContactDetail, ContactFiltre, ContactHistorique, CreateContactPayload,
            StatutContact, UpdateContactPayload,
        },
        contrat::Contrat,
    },
    services::contrat_service::{generer_reference, valider_montants_et_dates},
};

// Statut de naissance d'un contact : le statut `client` ne se décrète
// pas, il faut au moins un contrat ; et un contrat attaché vaut
// souscription, le contact naît client quel que soit le statut demandé.
pub fn resoudre_statut_initial(
    statut_demande: Option<StatutContact>,
    avec_contrats: bool,
) -> Result<StatutContact, AppError> {
    if statut_demande == Some(StatutContact::Client) && !avec_contrats {
        return Err(AppError::RegleMetier(
            "Un contact ne peut être créé en statut client sans au moins un contrat.".to_string(),
        ));
    }

    Ok(if avec_contrats {
        StatutContact::Client
    } else {
        statut_demande.unwrap_or(StatutContact::Prospect)
    })
}

#[derive(Clone)]
pub struct ContactService {
    repo: ContactRepository,
    contrat_repo: ContratRepository,
    partenaire_repo: PartenaireRepository,
    commentaire_repo: CommentaireRepository,
    pool: PgPool,
}

impl ContactService {
    pub fn new(
        repo: ContactRepository,
        contrat_repo: ContratRepository,
        partenaire_repo: PartenaireRepository,
        commentaire_repo: CommentaireRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            contrat_repo,
            partenaire_repo,
            commentaire_repo,
            pool,
        }
    }

    // Les contrats embarqués partent dans la même transaction que le contact.
    pub async fn create_contact(
        &self,
        agence_id: Option<Uuid>,
        utilisateur: &Utilisateur,
        payload: &CreateContactPayload,
    ) -> Result<Contact, AppError> {
        let statut = resoudre_statut_initial(payload.statut, !payload.contrats.is_empty())?;

        // Tout se valide avant d'ouvrir la transaction.
        for contrat in &payload.contrats {
            valider_montants_et_dates(
                contrat.montant_annuel,
                contrat.commission_premiere_annee,
                contrat.commission_annees_suivantes,
                contrat.frais_dossier,
                contrat.date_debut,
                contrat.date_fin,
            )?;
            if !self.partenaire_repo.exists(contrat.partenaire_id).await? {
                return Err(AppError::Introuvable("Partenaire"));
            }
        }

        let mut tx = self.pool.begin().await?;

        let contact = self.repo.insert(&mut *tx, agence_id, payload, statut).await?;

        self.repo
            .ajouter_historique(
                &mut *tx,
                contact.id,
                Some(utilisateur.id),
                "creation",
                None,
            )
            .await?;

        for embarque in payload.contrats.iter().cloned() {
            let contrat_payload = embarque.avec_contact(contact.id);

            // Pré-vérifie la référence candidate : une violation d'unicité
            // avorterait toute la transaction.
            let mut reference = generer_reference(Utc::now(), &mut rand::thread_rng());
            while self.contrat_repo.reference_existe(&mut *tx, &reference).await? {
                reference = generer_reference(Utc::now(), &mut rand::thread_rng());
            }

            let contrat = self
                .contrat_repo
                .insert(&mut *tx, &reference, &contrat_payload)
                .await?;

            self.repo
                .ajouter_historique(
                    &mut *tx,
                    contact.id,
                    Some(utilisateur.id),
                    "creation_contrat",
                    Some(&format!("Contrat {}", contrat.reference)),
                )
                .await?;
        }

        tx.commit().await?;
        Ok(contact)
    }

    pub async fn get_contact(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Contact, AppError> {
        self.repo
            .find_by_id(agence_id, id)
            .await?
            .ok_or(AppError::Introuvable("Contact"))
    }

    pub async fn get_contact_detail(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<ContactDetail, AppError> {
        let contact = self.get_contact(agence_id, id).await?;
        let (nb_contrats, nb_commentaires, nb_documents) =
            self.repo.compter_enfants(id).await?;
        Ok(ContactDetail {
            contact,
            nb_contrats,
            nb_commentaires,
            nb_documents,
        })
    }

    pub async fn list_contacts(
        &self,
        agence_id: Option<Uuid>,
        filtre: &ContactFiltre,
    ) -> Result<Vec<Contact>, AppError> {
        self.repo.list(agence_id, filtre).await
    }

    pub async fn update_contact(
        &self,
        agence_id: Option<Uuid>,
        utilisateur: &Utilisateur,
        id: Uuid,
        payload: &UpdateContactPayload,
    ) -> Result<Contact, AppError> {
        self.get_contact(agence_id, id).await?;

        let mut tx = self.pool.begin().await?;
        let contact = self.repo.update(&mut *tx, id, payload).await?;
        self.repo
            .ajouter_historique(&mut *tx, id, Some(utilisateur.id), "modification", None)
            .await?;
        tx.commit().await?;
        Ok(contact)
    }

    // Suppression en cascade : contrats explicitement, le reste (historique,
    // commentaires, documents) par clé étrangère. Un contact sans aucun
    // enfant se supprime sans broncher.
    pub async fn delete_contact(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<(), AppError> {
        self.get_contact(agence_id, id).await?;

        let mut tx = self.pool.begin().await?;
        self.contrat_repo.delete_by_contact(&mut *tx, id).await?;
        self.repo.delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn lister_historique(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Vec<ContactHistorique>, AppError> {
        self.get_contact(agence_id, id).await?;
        self.repo.lister_historique(id).await
    }

    pub async fn lister_contrats(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Vec<Contrat>, AppError> {
        self.get_contact(agence_id, id).await?;
        self.contrat_repo.list_by_contact(id).await
    }

    pub async fn lister_commentaires(
        &self,
        agence_id: Option<Uuid>,
        id: Uuid,
    ) -> Result<Vec<Commentaire>, AppError> {
        self.get_contact(agence_id, id).await?;
        self.commentaire_repo.list_by_contact(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_sans_contrat_refuse() {
        let resultat = resoudre_statut_initial(Some(StatutContact::Client), false);
        assert!(matches!(resultat, Err(AppError::RegleMetier(_))));
    }

    #[test]
    fn client_avec_contrat_accepte() {
        let statut = resoudre_statut_initial(Some(StatutContact::Client), true).unwrap();
        assert_eq!(statut, StatutContact::Client);
    }

    #[test]
    fn un_contrat_attache_fait_naitre_client() {
        // Même sans statut demandé, ou en demandant prospect.
        assert_eq!(
            resoudre_statut_initial(None, true).unwrap(),
            StatutContact::Client
        );
        assert_eq!(
            resoudre_statut_initial(Some(StatutContact::Prospect), true).unwrap(),
            StatutContact::Client
        );
    }

    #[test]
    fn sans_contrat_le_statut_demande_est_conserve() {
        assert_eq!(
            resoudre_statut_initial(None, false).unwrap(),
            StatutContact::Prospect
        );
        assert_eq!(
            resoudre_statut_initial(Some(StatutContact::Prospect), false).unwrap(),
            StatutContact::Prospect
        );
    }
}
