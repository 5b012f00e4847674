pub mod agence;
pub mod auth;
pub mod commentaire;
pub mod contact;
pub mod contrat;
pub mod dashboard;
pub mod document;
pub mod partenaire;
