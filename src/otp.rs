//! Client for the KYC backend's send-email-otp endpoint.
//!
//! One request, one response, no retries. The response is read in full and
//! then interpreted; bodies that are not the expected JSON are surfaced raw
//! so an operator can see what the server actually said.

use serde::{Deserialize, Serialize};

/// Path of the OTP issue endpoint on the KYC API server.
pub const SEND_OTP_PATH: &str = "/api/auth/send-email-otp";

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
}

/// Response shape of the endpoint. `testOtp` is only present in development
/// builds of the backend, as a convenience for manual verification.
#[derive(Debug, Deserialize)]
pub struct OtpResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(rename = "testOtp", default)]
    pub test_otp: Option<String>,
}

/// What one probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// `success: true`; carries the development OTP when the backend sent one.
    Accepted { test_otp: Option<String> },
    /// `success: false` with the backend's error text.
    Rejected { error: String },
    /// The body was not the expected JSON; kept verbatim.
    Unparseable { raw: String },
}

/// POST `{email}` to the endpoint and interpret the response.
///
/// Transport-level failures (connection refused and friends) bubble up as
/// `Err`; everything the server actually answered becomes a [`ProbeOutcome`].
pub async fn request_otp(api_base_url: &str, email: &str) -> Result<ProbeOutcome, reqwest::Error> {
    let url = format!("{}{}", api_base_url.trim_end_matches('/'), SEND_OTP_PATH);

    let response = reqwest::Client::new()
        .post(&url)
        .json(&OtpRequest { email })
        .send()
        .await?;

    let raw = response.text().await?;
    match serde_json::from_str::<OtpResponse>(&raw) {
        Ok(OtpResponse {
            success: true,
            test_otp,
            ..
        }) => Ok(ProbeOutcome::Accepted { test_otp }),
        Ok(OtpResponse { error, .. }) => Ok(ProbeOutcome::Rejected {
            error: error.unwrap_or_else(|| "unspecified error".to_string()),
        }),
        Err(_) => Ok(ProbeOutcome::Unparseable { raw }),
    }
}
