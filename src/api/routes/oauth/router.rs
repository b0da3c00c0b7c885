//! Router for the Gmail OAuth flow pages: a root page standing in for
//! the application home, an initiator page pointing at the KYC API's
//! authorize endpoint, and the success and error pages the backend
//! redirects the user back through.

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Html};
use axum_extra::extract::Query;

use super::public;
use crate::api::state::AppState;
use crate::oauth::{ConnectError, FlowOutcome, REDIRECT_DELAY, flow};

type SharedState = Arc<RwLock<AppState>>;

async fn home() -> Html<String> {
    let body = "<h1>KYC email verification</h1>\n\
         <p>Local stand-in for the application home page.</p>\n\
         <p><a href=\"/connect\">Connect Gmail</a></p>";
    Html(page("", body))
}

/// Initiator page. The link target is the KYC API's Gmail authorize
/// endpoint; following it leaves this server entirely.
async fn connect_page(State(state): State<SharedState>) -> Html<String> {
    let authorize_url = {
        let shared_state = state.read().expect("Unable to read share state");
        flow::authorize_url(&shared_state.config.api_base_url)
    };

    let body = format!(
        "<h1>Connect your Gmail account</h1>\n\
         <p>Verification emails are sent from your own address. Authorize\n\
         access with Google to continue.</p>\n\
         <p><a href=\"{}\">Connect Gmail</a></p>",
        escape_html(&authorize_url)
    );
    Html(page("", &body))
}

async fn success_page(
    State(state): State<SharedState>,
    Query(params): Query<public::SuccessQuery>,
) -> Html<String> {
    let banner = flow::connected_banner(params.message.as_deref());

    notify_flow(
        &state,
        FlowOutcome::Connected {
            gmail: banner.is_some(),
        },
    );

    let refresh_secs = REDIRECT_DELAY.as_secs();
    let head = format!("<meta http-equiv=\"refresh\" content=\"{refresh_secs};url=/\">");
    let banner_html = banner
        .map(|text| format!("<p><strong>{text}</strong></p>\n"))
        .unwrap_or_default();
    let body = format!(
        "<h1>Authorization complete</h1>\n\
         {banner_html}\
         <p>Taking you back to the application in {refresh_secs} seconds.</p>\n\
         <p><a href=\"/\">Continue now</a></p>"
    );
    Html(page(&head, &body))
}

async fn error_page(
    State(state): State<SharedState>,
    Query(params): Query<public::ErrorQuery>,
) -> Html<String> {
    let code = ConnectError::parse(params.error.as_deref());

    notify_flow(&state, FlowOutcome::Failed(code.clone()));

    let body = format!(
        "<h1>Authorization failed</h1>\n\
         <p>{}</p>\n\
         <p><a href=\"/\">Return home</a></p>",
        escape_html(code.message())
    );
    Html(page("", &body))
}

/// Report an outcome to a waiting `connect` run, if one is attached.
/// The channel holds a single outcome; once it is full, later page
/// loads are ignored rather than overwriting the first result.
fn notify_flow(state: &SharedState, outcome: FlowOutcome) {
    let flow = {
        let shared_state = state.read().expect("Unable to read share state");
        shared_state.flow.clone()
    };
    if let Some(tx) = flow {
        let _ = tx.try_send(outcome);
    }
}

fn page(head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>KYC email verification</title>{head_extra}</head>\n\
         <body style=\"font-family: -apple-system, sans-serif; display: flex; align-items: center; justify-content: center; height: 100vh; margin: 0;\">\n\
         <div style=\"text-align: center; max-width: 28rem;\">\n\
         {body}\n\
         </div>\n\
         </body>\n\
         </html>"
    )
}

/// Escape text for interpolation into HTML. Error codes echoed back
/// verbatim come straight off the query string and cannot be trusted.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Create the flow pages router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::get(home))
        .route("/connect", axum::routing::get(connect_page))
        .route("/oauth/success", axum::routing::get(success_page))
        .route("/oauth/error", axum::routing::get(error_page))
}
