//! Query-parameter contract of the connect flow.
//!
//! The backend owns the actual OAuth dance. What reaches us afterwards is a
//! redirect carrying either `message=gmail_connected` or an `error` code, and
//! the initiator is a plain navigation to the backend's authorize endpoint.

/// Path suffix of the backend's authorize endpoint.
pub const AUTHORIZE_PATH: &str = "/api/auth/oauth/gmail";

/// Sentinel `message` value the backend sends after a successful connect.
pub const GMAIL_CONNECTED: &str = "gmail_connected";

/// Banner shown on the success view only for [`GMAIL_CONNECTED`].
pub const CONNECTED_BANNER: &str =
    "Your Gmail account is now connected. Verification emails will be sent from your address.";

/// Build the initiator target from the configured API base URL.
pub fn authorize_url(api_base_url: &str) -> String {
    format!("{}{}", api_base_url.trim_end_matches('/'), AUTHORIZE_PATH)
}

/// Banner text for the success view, shown exactly when the backend sent the
/// connected sentinel.
pub fn connected_banner(message: Option<&str>) -> Option<&'static str> {
    if message == Some(GMAIL_CONNECTED) {
        Some(CONNECTED_BANNER)
    } else {
        None
    }
}

/// Error codes the backend redirects with, as a closed enumeration.
///
/// Three codes are recognized and mapped to fixed sentences; any other
/// non-empty value is surfaced verbatim; an absent or empty value gets the
/// generic fallback. Matches on this type are exhaustive so a new code has to
/// be placed deliberately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// `no_code_received`: Google returned no authorization code.
    NoCodeReceived,
    /// `token_exchange_failed`: the backend could not trade the code for tokens.
    TokenExchangeFailed,
    /// `callback_failed`: the backend's callback handler failed.
    CallbackFailed,
    /// Any other non-empty code, surfaced verbatim.
    Unrecognized(String),
    /// No code at all in the redirect.
    Unspecified,
}

impl ConnectError {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => ConnectError::Unspecified,
            Some("no_code_received") => ConnectError::NoCodeReceived,
            Some("token_exchange_failed") => ConnectError::TokenExchangeFailed,
            Some("callback_failed") => ConnectError::CallbackFailed,
            Some(other) => ConnectError::Unrecognized(other.to_string()),
        }
    }

    /// The sentence shown to the user for this code.
    pub fn message(&self) -> &str {
        match self {
            ConnectError::NoCodeReceived => {
                "Google did not return an authorization code. Please try connecting your Gmail account again."
            }
            ConnectError::TokenExchangeFailed => {
                "We could not exchange the authorization code for access tokens. Please try connecting your Gmail account again."
            }
            ConnectError::CallbackFailed => {
                "Something went wrong while finishing the Gmail connection. Please try again."
            }
            ConnectError::Unrecognized(code) => code,
            ConnectError::Unspecified => "An unknown error occurred during Gmail authorization.",
        }
    }
}

/// What the hosted flow pages report back to a waiting `connect` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The success view was served; `gmail` is true when the connected
    /// sentinel was present.
    Connected { gmail: bool },
    /// The error view was served with this code.
    Failed(ConnectError),
}
