// src/services/mailer.rs
//
// Envoi SMTP des mails de réinitialisation. Si le SMTP n'est pas
// configuré, le lien est simplement tracé côté serveur.

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::common::error::AppError;

#[derive(Clone)]
pub struct MailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl MailService {
    // Retourne None si la configuration SMTP est incomplète.
    pub fn new(
        host: Option<&str>,
        port: Option<u16>,
        username: Option<String>,
        password: Option<String>,
        from_addr: Option<&str>,
    ) -> Option<Self> {
        let host = host?;
        let creds = Credentials::new(username?, password?);
        let from: Mailbox = from_addr?.parse().ok()?;

        let port = port.unwrap_or(587);
        let transport = if port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .ok()?
                .credentials(creds)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .ok()?
                .credentials(creds)
                .build()
        };

        Some(Self { transport, from })
    }

    pub async fn envoyer_reinitialisation(
        &self,
        destinataire: &str,
        lien: &str,
    ) -> Result<(), AppError> {
        let to: Mailbox = destinataire
            .parse()
            .map_err(|_| anyhow::anyhow!("adresse destinataire invalide"))?;

        let corps = format!(
            "Bonjour,\n\n\
             Une réinitialisation de mot de passe a été demandée pour votre compte.\n\
             Pour choisir un nouveau mot de passe, suivez ce lien (valable 1 heure) :\n\n\
             {lien}\n\n\
             Si vous n'êtes pas à l'origine de cette demande, ignorez ce message.\n"
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Réinitialisation de votre mot de passe")
            .header(ContentType::TEXT_PLAIN)
            .body(corps)
            .map_err(|e| anyhow::anyhow!("construction du mail : {}", e))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| anyhow::anyhow!("envoi SMTP : {}", e))?;

        Ok(())
    }
}
