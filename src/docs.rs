// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::list_users,
        handlers::auth::forgot_password,
        handlers::auth::reset_password,

        // --- Agences ---
        handlers::agences::create_agence,
        handlers::agences::list_agences,
        handlers::agences::get_agence,
        handlers::agences::update_agence,
        handlers::agences::delete_agence,

        // --- Contacts ---
        handlers::contacts::create_contact,
        handlers::contacts::list_contacts,
        handlers::contacts::get_contact,
        handlers::contacts::update_contact,
        handlers::contacts::delete_contact,
        handlers::contacts::lister_historique,
        handlers::contacts::lister_contrats,
        handlers::contacts::lister_commentaires,
        handlers::contacts::compter_non_lus,

        // --- Contrats ---
        handlers::contrats::create_contrat,
        handlers::contrats::list_contrats,
        handlers::contrats::get_contrat,
        handlers::contrats::update_contrat,
        handlers::contrats::delete_contrat,
        handlers::contrats::renouveler_contrat,
        handlers::contrats::lister_historique,

        // --- Partenaires ---
        handlers::partenaires::create_partenaire,
        handlers::partenaires::list_partenaires,
        handlers::partenaires::get_partenaire,
        handlers::partenaires::update_partenaire,
        handlers::partenaires::delete_partenaire,

        // --- Commentaires ---
        handlers::commentaires::create_commentaire,
        handlers::commentaires::get_commentaire,
        handlers::commentaires::update_commentaire,
        handlers::commentaires::delete_commentaire,
        handlers::commentaires::marquer_lu,

        // --- Documents ---
        handlers::documents::televerser_document,
        handlers::documents::lister_documents_contact,
        handlers::documents::url_signee,
        handlers::documents::supprimer_document,

        // --- Dashboard ---
        handlers::dashboard::resume,
        handlers::dashboard::revenus_mensuels,

        // --- Portail ---
        handlers::portail::mon_contact,
        handlers::portail::mes_contrats,
        handlers::portail::mes_documents,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::RoleUtilisateur,
            models::auth::Utilisateur,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::ForgotPasswordPayload,
            models::auth::ResetPasswordPayload,
            models::auth::AuthResponse,

            // --- Agences ---
            models::agence::Agence,
            models::agence::AgencePayload,

            // --- Contacts ---
            models::contact::TypeContact,
            models::contact::StatutContact,
            models::contact::Contact,
            models::contact::ContactDetail,
            models::contact::ContactHistorique,
            models::contact::CreateContactPayload,
            models::contact::UpdateContactPayload,

            // --- Contrats ---
            models::contrat::StatutContrat,
            models::contrat::Contrat,
            models::contrat::ContratHistorique,
            models::contrat::CreateContratPayload,
            models::contrat::ContratEmbarquePayload,
            models::contrat::UpdateContratPayload,
            models::contrat::RenouvellementPayload,

            // --- Partenaires ---
            models::partenaire::StatutPartenaire,
            models::partenaire::Partenaire,
            models::partenaire::PartenairePayload,

            // --- Commentaires ---
            models::commentaire::TypeInteraction,
            models::commentaire::SujetCommentaire,
            models::commentaire::Commentaire,
            models::commentaire::CreateCommentairePayload,
            models::commentaire::UpdateCommentairePayload,
            models::commentaire::NonLus,

            // --- Documents ---
            models::document::Document,
            models::document::SignedUrlResponse,

            // --- Dashboard ---
            models::dashboard::ResumeDashboard,
            models::dashboard::RevenuMensuel,
        )
    ),
    tags(
        (name = "Auth", description = "Authentification et comptes"),
        (name = "Agences", description = "Gestion des agences (superadmin)"),
        (name = "Contacts", description = "Prospects et clients"),
        (name = "Contrats", description = "Contrats d'assurance, renouvellement et historique"),
        (name = "Partenaires", description = "Compagnies d'assurance partenaires"),
        (name = "Commentaires", description = "Notes internes et marques de lecture"),
        (name = "Documents", description = "Pièces stockées et URLs signées"),
        (name = "Dashboard", description = "Compteurs et revenus mensuels"),
        (name = "Portail", description = "Espace client")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("api_jwt", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
    }
}
