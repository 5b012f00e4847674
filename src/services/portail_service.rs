// src/services/portail_service.rs
//
// Espace client : un compte rattaché à un contact (par e-mail à
// l'inscription) consulte sa propre fiche, ses contrats et ses documents.

use crate::{
    common::error::AppError,
    db::{ContactRepository, ContratRepository, DocumentRepository},
    models::{auth::Utilisateur, contact::Contact, contrat::Contrat, document::Document},
};

#[derive(Clone)]
pub struct PortailService {
    contact_repo: ContactRepository,
    contrat_repo: ContratRepository,
    document_repo: DocumentRepository,
}

impl PortailService {
    pub fn new(
        contact_repo: ContactRepository,
        contrat_repo: ContratRepository,
        document_repo: DocumentRepository,
    ) -> Self {
        Self {
            contact_repo,
            contrat_repo,
            document_repo,
        }
    }

    pub async fn mon_contact(&self, utilisateur: &Utilisateur) -> Result<Contact, AppError> {
        self.contact_repo
            .find_by_utilisateur(utilisateur.id)
            .await?
            .ok_or(AppError::Introuvable("Contact"))
    }

    pub async fn mes_contrats(&self, utilisateur: &Utilisateur) -> Result<Vec<Contrat>, AppError> {
        let contact = self.mon_contact(utilisateur).await?;
        self.contrat_repo.list_by_contact(contact.id).await
    }

    pub async fn mes_documents(
        &self,
        utilisateur: &Utilisateur,
    ) -> Result<Vec<Document>, AppError> {
        let contact = self.mon_contact(utilisateur).await?;
        self.document_repo.list_by_contact(contact.id).await
    }
}
