pub mod agence_service;
pub mod auth;
pub mod commentaire_service;
pub mod commission;
pub mod contact_service;
pub mod contrat_service;
pub mod dashboard_service;
pub mod document_service;
pub mod mailer;
pub mod partenaire_service;
pub mod portail_service;
pub mod storage;
