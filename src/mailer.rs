//! Gmail SMTP plumbing for the email-delivery smoke test: build a transport,
//! verify it can authenticate, send the single probe message, and classify
//! failures into the three outcomes the test reports.

use std::fmt;

use chrono::{DateTime, Utc};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Response;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// The one email-sending service this tool talks to.
pub const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";

/// Fixed subject of the probe message.
pub const PROBE_SUBJECT: &str = "KYC email delivery test";

/// Credentials and addressing for one probe run.
#[derive(Debug, Clone)]
pub struct MailAccount {
    pub username: String,
    pub app_password: String,
    pub from: String,
}

/// Coarse failure classes the smoke test reports differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected credentials (Gmail answers these with a permanent 535).
    Auth,
    /// Could not reach or keep a connection to the server.
    Network,
    /// Anything else; reported with the raw detail.
    Other,
}

impl FailureKind {
    /// Classify from the error's permanence flag and rendered detail chain.
    pub fn classify(permanent: bool, detail: &str) -> Self {
        let lower = detail.to_ascii_lowercase();
        if permanent
            && (lower.contains("535")
                || lower.contains("authentication")
                || lower.contains("credentials")
                || lower.contains("username and password"))
        {
            FailureKind::Auth
        } else if lower.contains("connection")
            || lower.contains("network")
            || lower.contains("timed out")
            || lower.contains("timeout")
            || lower.contains("dns")
            || lower.contains("resolve")
        {
            FailureKind::Network
        } else {
            FailureKind::Other
        }
    }
}

/// A classified SMTP failure with the full error chain for display.
#[derive(Debug)]
pub struct SmtpFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl SmtpFailure {
    fn from_smtp(err: lettre::transport::smtp::Error) -> Self {
        let permanent = err.is_permanent();
        let detail = format!("{:#}", anyhow::Error::new(err));
        Self {
            kind: FailureKind::classify(permanent, &detail),
            detail,
        }
    }

    fn other(detail: String) -> Self {
        Self {
            kind: FailureKind::Other,
            detail,
        }
    }
}

impl fmt::Display for SmtpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

/// Build the Gmail transport: implicit-TLS relay with the account's
/// app-password credentials.
pub fn transport(
    account: &MailAccount,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, SmtpFailure> {
    let credentials = Credentials::new(account.username.clone(), account.app_password.clone());
    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(GMAIL_SMTP_HOST)
        .map_err(SmtpFailure::from_smtp)?
        .credentials(credentials)
        .build();
    Ok(transport)
}

/// Pre-flight check that the credentials actually authenticate.
pub async fn verify(transport: &AsyncSmtpTransport<Tokio1Executor>) -> Result<(), SmtpFailure> {
    match transport.test_connection().await {
        Ok(true) => Ok(()),
        Ok(false) => Err(SmtpFailure::other(
            "SMTP connection check was refused by the server".to_string(),
        )),
        Err(err) => Err(SmtpFailure::from_smtp(err)),
    }
}

/// The single probe message: addressed back to the authenticated account,
/// fixed subject, HTML body carrying the send timestamp.
pub fn probe_message(
    account: &MailAccount,
    sent_at: DateTime<Utc>,
) -> Result<Message, SmtpFailure> {
    let from: Mailbox = account
        .from
        .parse()
        .map_err(|e| SmtpFailure::other(format!("invalid From address '{}': {}", account.from, e)))?;
    let to: Mailbox = account.username.parse().map_err(|e| {
        SmtpFailure::other(format!("invalid recipient address '{}': {}", account.username, e))
    })?;

    let html = format!(
        "<h2>KYC email delivery test</h2>\
         <p>If you can read this, the email integration is working.</p>\
         <p>Sent at {}</p>",
        sent_at.to_rfc2822()
    );

    Message::builder()
        .from(from)
        .to(to)
        .subject(PROBE_SUBJECT)
        .header(ContentType::TEXT_HTML)
        .body(html)
        .map_err(|e| SmtpFailure::other(format!("could not build the test message: {}", e)))
}

/// Hand the probe message to the server. One attempt, no retries; the
/// server's acceptance response is returned for display.
pub async fn send(
    transport: &AsyncSmtpTransport<Tokio1Executor>,
    message: Message,
) -> Result<Response, SmtpFailure> {
    transport.send(message).await.map_err(SmtpFailure::from_smtp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account() -> MailAccount {
        MailAccount {
            username: "kyc-verify@example.com".to_string(),
            app_password: "abcdefghijklmnop".to_string(),
            from: "noreply@example.com".to_string(),
        }
    }

    #[test]
    fn rejected_credentials_classify_as_auth() {
        let kind = FailureKind::classify(
            true,
            "permanent error (535): 5.7.8 Username and Password not accepted",
        );
        assert_eq!(kind, FailureKind::Auth);
    }

    #[test]
    fn transient_535_lookalike_is_not_auth() {
        // Only permanent rejections count as bad credentials.
        let kind = FailureKind::classify(false, "transient error (454): 4.7.0 try again later 535");
        assert_ne!(kind, FailureKind::Auth);
    }

    #[test]
    fn unreachable_server_classifies_as_network() {
        let kind = FailureKind::classify(false, "network error: Connection refused (os error 111)");
        assert_eq!(kind, FailureKind::Network);
        let kind = FailureKind::classify(false, "failed to resolve smtp.gmail.com");
        assert_eq!(kind, FailureKind::Network);
    }

    #[test]
    fn everything_else_classifies_as_other() {
        let kind = FailureKind::classify(true, "permanent error (552): message too large");
        assert_eq!(kind, FailureKind::Other);
    }

    #[test]
    fn probe_message_is_addressed_back_to_the_account() {
        let sent_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let message = probe_message(&account(), sent_at).unwrap();

        let envelope = message.envelope();
        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "kyc-verify@example.com");

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Subject: KYC email delivery test"));
        assert!(formatted.contains("From: noreply@example.com"));
    }

    #[test]
    fn invalid_from_address_is_reported_not_sent() {
        let mut bad = account();
        bad.from = "not an address".to_string();
        let err = probe_message(&bad, Utc::now()).unwrap_err();
        assert_eq!(err.kind, FailureKind::Other);
        assert!(err.detail.contains("invalid From address"));
    }
}
