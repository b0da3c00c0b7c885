use std::env;

/// Default base URL of the KYC API server when `KYC_API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Every configuration value the crate reads, gathered in one place.
///
/// Components never touch the environment themselves; `from_env` is the
/// single point where ambient state becomes explicit. Missing optional keys
/// become `None` so each command can report its own precondition failure
/// instead of panicking at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// SMTP username, also the default sender and the test recipient
    /// (`EMAIL_USERNAME`).
    pub email_username: Option<String>,
    /// Gmail app password (`GMAIL_APP_PASSWORD`). Absence aborts the email
    /// test before any network activity.
    pub gmail_app_password: Option<String>,
    /// Explicit From address (`EMAIL_FROM`); falls back to the username.
    pub email_from: Option<String>,
    /// Base URL of the KYC API server (`KYC_API_BASE_URL`).
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Tests inject a map here so no
    /// test ever mutates the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let email_username = lookup("EMAIL_USERNAME").filter(|v| !v.is_empty());
        let gmail_app_password = lookup("GMAIL_APP_PASSWORD").filter(|v| !v.is_empty());
        let email_from = lookup("EMAIL_FROM").filter(|v| !v.is_empty());
        let api_base_url = lookup("KYC_API_BASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            email_username,
            gmail_app_password,
            email_from,
            api_base_url,
        }
    }

    /// The From address used by the email test: `EMAIL_FROM` when present,
    /// otherwise the SMTP username.
    pub fn sender(&self) -> Option<&str> {
        self.email_from.as_deref().or(self.email_username.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn base_url_defaults_to_local_api_server() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.api_base_url, "http://localhost:5000");
    }

    #[test]
    fn sender_falls_back_to_username() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "EMAIL_USERNAME",
            "kyc-verify@example.com",
        )]));
        assert_eq!(config.sender(), Some("kyc-verify@example.com"));

        let config = AppConfig::from_lookup(lookup_from(&[
            ("EMAIL_USERNAME", "kyc-verify@example.com"),
            ("EMAIL_FROM", "noreply@example.com"),
        ]));
        assert_eq!(config.sender(), Some("noreply@example.com"));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let config = AppConfig::from_lookup(lookup_from(&[("GMAIL_APP_PASSWORD", "")]));
        assert!(config.gmail_app_password.is_none());
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup_from(&[("KYC_API_BASE_URL", "")]));
        assert_eq!(config.api_base_url, "http://localhost:5000");
    }
}
