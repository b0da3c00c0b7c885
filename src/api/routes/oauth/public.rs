//! Public types for the OAuth flow pages

use serde::Deserialize;

/// Query parameters the success page is reached with
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub message: Option<String>,
}

/// Query parameters the error page is reached with
#[derive(Debug, Deserialize)]
pub struct ErrorQuery {
    pub error: Option<String>,
}
