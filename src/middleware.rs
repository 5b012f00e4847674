pub mod agence;
pub mod auth;
