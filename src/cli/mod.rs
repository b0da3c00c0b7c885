use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::core::AppConfig;

pub mod connect;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Send one test email through Gmail SMTP to verify delivery credentials
    EmailTest {},
    /// Request an email OTP from the KYC API and report what came back
    OtpTest {
        /// Address to request the OTP for
        #[arg(long, default_value = "test@example.com")]
        email: String,

        /// Seconds to wait before calling so a freshly started API server
        /// has time to come up
        #[arg(long, default_value = "2")]
        wait_secs: u64,
    },
    /// Serve the Gmail OAuth flow pages
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "3000")]
        port: String,
    },
    /// Run one Gmail connect flow end to end: print the authorize URL,
    /// host the flow pages, and wait for the redirect to land
    Connect {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port, 0 picks a free one
        #[arg(long, default_value = "0")]
        port: String,

        /// Give up waiting for the callback after this many seconds
        #[arg(long, default_value = "300")]
        timeout_secs: u64,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    let config = AppConfig::from_env();

    // Handle each sub command
    match args.command {
        Some(Command::EmailTest {}) => {
            email_test::run(&config).await?;
        }
        Some(Command::OtpTest { email, wait_secs }) => {
            otp_test::run(&config, &email, wait_secs).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await;
        }
        Some(Command::Connect {
            host,
            port,
            timeout_secs,
        }) => {
            connect::run(host, port, timeout_secs, config).await?;
        }
        None => {}
    }

    Ok(())
}
