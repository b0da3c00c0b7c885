//! Interactive Gmail connect flow. Serves the flow pages on a local
//! port, hands the operator the authorize URL, and waits for the
//! browser to come back through the success or error page.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, AppState};
use crate::core::AppConfig;
use crate::oauth::{DeferredRedirect, FlowOutcome, Navigate, REDIRECT_DELAY, flow};

/// Resolves the command's final await when the deferred redirect fires.
struct ChannelNavigator {
    done: Mutex<Option<oneshot::Sender<String>>>,
}

impl Navigate for ChannelNavigator {
    fn navigate(&self, target: &str) {
        if let Some(tx) = self
            .done
            .lock()
            .expect("Unable to lock navigator channel")
            .take()
        {
            let _ = tx.send(target.to_string());
        }
    }
}

pub async fn run(host: String, port: String, timeout_secs: u64, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let authorize_url = flow::authorize_url(&config.api_base_url);

    // Page handlers report the flow outcome through this channel. One
    // slot: only the first success or error page load counts.
    let (flow_tx, mut flow_rx) = mpsc::channel::<FlowOutcome>(1);
    let shared_state = Arc::new(RwLock::new(AppState::with_flow(config, flow_tx)));
    let app = api::app(shared_state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!("flow page server stopped: {err}");
        }
    });

    let home_url = format!("http://{addr}/");
    println!("Flow pages ready at {home_url}");
    println!();
    println!("Open this URL to start the Gmail authorization:");
    println!("  {authorize_url}");
    println!();
    println!("Waiting up to {timeout_secs}s for the flow to finish...");

    match tokio::time::timeout(Duration::from_secs(timeout_secs), flow_rx.recv()).await {
        Err(_) => {
            println!("No callback arrived within {timeout_secs}s.");
            anyhow::bail!("Gmail connect flow timed out");
        }
        Ok(None) => anyhow::bail!("flow pages stopped before reporting an outcome"),
        Ok(Some(FlowOutcome::Failed(code))) => {
            println!("Gmail authorization failed: {}", code.message());
            anyhow::bail!("Gmail connect flow failed");
        }
        Ok(Some(FlowOutcome::Connected { gmail })) => {
            if gmail {
                println!("{}", flow::CONNECTED_BANNER);
            } else {
                println!(
                    "Authorization finished, but the callback did not confirm the Gmail connection."
                );
            }

            let (done_tx, done_rx) = oneshot::channel();
            let navigator = Arc::new(ChannelNavigator {
                done: Mutex::new(Some(done_tx)),
            });
            let redirect = DeferredRedirect::arm(REDIRECT_DELAY, home_url, navigator);
            println!(
                "Returning to the application home in {}s...",
                REDIRECT_DELAY.as_secs()
            );
            if let Ok(target) = done_rx.await {
                println!("Done. Continue at {target}");
            }
            drop(redirect);
            Ok(())
        }
    }
}
