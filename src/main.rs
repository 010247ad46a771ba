use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod resources;
mod services;
mod utils;

use api::admin::AdminApiClient;
use commands::Session;
use config::AppConfig;

/// Used when `RUST_LOG` is unset or invalid
const DEFAULT_LOG_FILTER: &str = "loyalty_admin=info,reqwest=warn";

fn prompt() {
    print!("admin> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so rendered tables on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("🛒 Starting loyalty admin console...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    if config.api_token.is_none() {
        info!("ADMIN_TOKEN is not set, requests are sent without authorization");
    }

    let client = match AdminApiClient::new(
        config.api_url.clone(),
        config.api_token.clone(),
        config.timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };
    info!("Using admin API at {}", client.base_url());

    let mut session = Session::new(Arc::new(client), config.page_size);
    println!("Type `help` for commands, `quit` to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        match commands::handle_line(&mut session, &line).await {
            Some(output) if output.is_empty() => {}
            Some(output) => println!("{}", output.trim_end()),
            None => break,
        }
    }

    info!("Bye");
}
