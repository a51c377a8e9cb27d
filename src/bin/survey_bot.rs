//! Runs the survey bot webhook server.
//!
//! Usage:
//!
//! ```text
//! survey_bot
//! ```
//!
//! All settings come from environment variables (optionally via a `.env`
//! file); see [`BotConfig`] for the full list. Logging honours `RUST_LOG`.

use camino::Utf8PathBuf;
use copilot_survey::config::{BotConfig, ConfigError};
use copilot_survey::survey::{
    adapters::{
        github::GitHubIssueTracker, postgres::PostgresSurveyRepository,
        telemetry::TracingTelemetry, templates::DirTemplateSource,
        text_analytics::TextAnalyticsClient,
    },
    ports::{SurveyRepositoryError, Telemetry},
    services::{SurveyPorts, SurveyService},
};
use copilot_survey::webhook::{AppState, router};
use mockable::DefaultClock;
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "copilot_survey=info,survey_bot=info,tower_http=info";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the bot before or while serving.
#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("failed to open template directory '{path}': {source}")]
    Templates {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("database setup failed: {0}")]
    Database(#[from] SurveyRepositoryError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    init_tracing();
    run().await.map_err(|err| {
        tracing::error!(error = %err, "survey bot stopped with an error");
        BoxError::from(err)
    })
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), StartupError> {
    let config = BotConfig::from_env()?;
    tracing::info!(?config, "loaded configuration");

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(StartupError::HttpClient)?;

    let templates =
        DirTemplateSource::open(&config.template_dir).map_err(|source| StartupError::Templates {
            path: config.template_dir.clone(),
            source,
        })?;

    let repository =
        PostgresSurveyRepository::connect(&config.database_url, config.database_pool_size).await?;
    tracing::info!(pool_size = config.database_pool_size, "database pool ready");
    if config.apply_schema {
        repository.apply_schema().await?;
        tracing::info!("survey schema applied");
    }

    let telemetry: Arc<dyn Telemetry> = Arc::new(TracingTelemetry);
    let ports = SurveyPorts {
        repository: Arc::new(repository),
        language: Arc::new(TextAnalyticsClient::with_client(
            http.clone(),
            config.language_endpoint.as_str(),
            config.language_key.as_str(),
        )),
        templates: Arc::new(templates),
        tracker: Arc::new(GitHubIssueTracker::with_client(
            http,
            config.github_api_url.as_str(),
            config.github_token.as_str(),
        )),
        telemetry,
    };
    let service = SurveyService::new(ports, Arc::new(DefaultClock));
    let app = router(AppState::new(Arc::new(service)));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!(%address, "survey bot listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("survey bot stopped");
    Ok(())
}

/// Waits for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                if signal.recv().await.is_none() {
                    tracing::warn!("SIGTERM listener closed");
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received; draining requests");
}
