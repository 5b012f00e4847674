pub mod user_repo;
pub use user_repo::UserRepository;
pub mod agence_repo;
pub use agence_repo::AgenceRepository;
pub mod contact_repo;
pub use contact_repo::ContactRepository;
pub mod contrat_repo;
pub use contrat_repo::ContratRepository;
pub mod partenaire_repo;
pub use partenaire_repo::PartenaireRepository;
pub mod commentaire_repo;
pub use commentaire_repo::CommentaireRepository;
pub mod document_repo;
pub use document_repo::DocumentRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
