// src/services/dashboard_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ContratRepository, DashboardRepository},
    models::dashboard::{ResumeDashboard, RevenuMensuel},
    services::commission,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    contrat_repo: ContratRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, contrat_repo: ContratRepository) -> Self {
        Self { repo, contrat_repo }
    }

    pub async fn resume(&self, agence_id: Option<Uuid>) -> Result<ResumeDashboard, AppError> {
        let compteurs = self.repo.compteurs(agence_id).await?;
        let actifs = self.contrat_repo.lister_actifs(agence_id).await?;

        let aujourd_hui = Utc::now().date_naive();
        let (commissions, frais) = commission::totaux_mensuels(&actifs, aujourd_hui);

        Ok(ResumeDashboard {
            nb_contacts: compteurs.nb_contacts,
            nb_prospects: compteurs.nb_prospects,
            nb_clients: compteurs.nb_clients,
            nb_contrats_actifs: compteurs.nb_contrats_actifs,
            commission_mensuelle_totale: commissions,
            frais_mensuels_totaux: frais,
        })
    }

    pub async fn revenus_mensuels(
        &self,
        agence_id: Option<Uuid>,
    ) -> Result<Vec<RevenuMensuel>, AppError> {
        let actifs = self.contrat_repo.lister_actifs(agence_id).await?;
        Ok(commission::revenus_mensuels(&actifs, Utc::now().date_naive()))
    }
}
