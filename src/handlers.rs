pub mod agences;
pub mod auth;
pub mod commentaires;
pub mod contacts;
pub mod contrats;
pub mod dashboard;
pub mod documents;
pub mod partenaires;
pub mod portail;
