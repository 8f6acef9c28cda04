use futures::future::BoxFuture;
use resend_rs::types::CreateEmailBaseOptions;
use resend_rs::Resend;
use std::env;

pub struct WaitlistEmail {
    pub name: String,
    pub email: String,
    pub school: String,
    pub locale: String,
}

pub struct PilotEmail {
    pub name: String,
    pub email: String,
    pub role: String,
    pub institution: String,
    pub locale: String,
}

/// Post-commit notification seam. Implementations must only be invoked
/// after the corresponding row is persisted; delivery failures are the
/// caller's to log and never to surface.
pub trait Notifier: Send + Sync {
    fn send_waitlist_emails(&self, email: WaitlistEmail) -> BoxFuture<'static, anyhow::Result<()>>;
    fn send_pilot_emails(&self, email: PilotEmail) -> BoxFuture<'static, anyhow::Result<()>>;
}

#[derive(Clone)]
pub struct Mailer {
    client: Resend,
    from: String,
    admin: String,
}

impl Mailer {
    /// Returns None when RESEND_API_KEY is unset so self-hosted setups
    /// can run without transactional email.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("RESEND_API_KEY").ok()?;
        let from = env::var("RESEND_FROM_EMAIL")
            .expect("RESEND_FROM_EMAIL must be set when RESEND_API_KEY is set");
        let admin = env::var("ADMIN_EMAIL")
            .expect("ADMIN_EMAIL must be set when RESEND_API_KEY is set");
        Some(Self {
            client: Resend::new(&api_key),
            from,
            admin,
        })
    }

    async fn send(&self, to: &str, subject: &str, html: String) -> anyhow::Result<()> {
        let email = CreateEmailBaseOptions::new(&self.from, [to], subject).with_html(&html);
        self.client.emails.send(email).await?;
        Ok(())
    }
}

impl Notifier for Mailer {
    fn send_waitlist_emails(&self, email: WaitlistEmail) -> BoxFuture<'static, anyhow::Result<()>> {
        let mailer = self.clone();
        Box::pin(async move {
            let confirmation = mailer.send(
                &email.email,
                "You're on the EduReview waitlist",
                format!(
                    "<p>Hi {},</p>\
                     <p>Thanks for joining the EduReview waitlist! We're building something we think you'll love.</p>\
                     <p>We'll keep you updated as we grow, and we promise we will never spam you.</p>\
                     <p>— The EduReview Team</p>",
                    email.name
                ),
            );
            let notification = mailer.send(
                &mailer.admin,
                "New waitlist signup",
                format!(
                    "<p><strong>Name:</strong> {}</p>\
                     <p><strong>Email:</strong> {}</p>\
                     <p><strong>School:</strong> {}</p>\
                     <p><strong>Locale:</strong> {}</p>",
                    email.name, email.email, email.school, email.locale
                ),
            );
            // Record is already saved; both sends run regardless of each other
            let (confirmation, notification) = tokio::join!(confirmation, notification);
            confirmation.and(notification)
        })
    }

    fn send_pilot_emails(&self, email: PilotEmail) -> BoxFuture<'static, anyhow::Result<()>> {
        let mailer = self.clone();
        Box::pin(async move {
            let confirmation = mailer.send(
                &email.email,
                "Your EduReview pilot application",
                format!(
                    "<p>Hi {},</p>\
                     <p>Thanks for applying to the EduReview pilot programme. We've received your application.</p>\
                     <p>We'll review it and reach out within 48 hours.</p>\
                     <p>— The EduReview Team</p>",
                    email.name
                ),
            );
            let notification = mailer.send(
                &mailer.admin,
                "New pilot application",
                format!(
                    "<p><strong>Name:</strong> {}</p>\
                     <p><strong>Email:</strong> {}</p>\
                     <p><strong>Role:</strong> {}</p>\
                     <p><strong>Institution:</strong> {}</p>\
                     <p><strong>Locale:</strong> {}</p>",
                    email.name, email.email, email.role, email.institution, email.locale
                ),
            );
            let (confirmation, notification) = tokio::join!(confirmation, notification);
            confirmation.and(notification)
        })
    }
}

/// Used when no email service is configured; sends become no-ops.
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn send_waitlist_emails(&self, email: WaitlistEmail) -> BoxFuture<'static, anyhow::Result<()>> {
        tracing::debug!("email disabled, skipping waitlist emails for {}", email.email);
        Box::pin(async { Ok(()) })
    }

    fn send_pilot_emails(&self, email: PilotEmail) -> BoxFuture<'static, anyhow::Result<()>> {
        tracing::debug!("email disabled, skipping pilot emails for {}", email.email);
        Box::pin(async { Ok(()) })
    }
}
