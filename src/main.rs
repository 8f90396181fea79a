//! edital-tutor - HTTP service for study schedules and quizzes from exam announcements

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use edital_tutor::config::{Config, ConfigOptions, DEFAULT_PORT};
use edital_tutor::server::ApiServer;
use edital_tutor::service::{GeminiClient, TextGenerator};
use edital_tutor::tutor::Tutor;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "edital-tutor")]
#[command(about = "Generates study schedules and quizzes from exam announcements via Gemini")]
struct Args {
    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Override the Gemini API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the Gemini model
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // The credential comes from the environment, never the CLI
    let config = Config::new(
        Config::api_key_from_env(),
        ConfigOptions {
            base_url: args.base_url,
            model: args.model,
            port: Some(args.port),
        },
    )?;

    let generator: Option<Arc<dyn TextGenerator>> = if config.api_key.is_some() {
        Some(Arc::new(GeminiClient::new(&config)?))
    } else {
        warn!("GEMINI_API_KEY is not set; generate requests will be rejected");
        None
    };

    info!("Starting edital-tutor server with model {}", config.model);

    let tutor = Arc::new(Tutor::new(generator));
    let server = ApiServer::new(tutor, config.port);
    server.start().await?;

    // Serve until interrupted
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}
