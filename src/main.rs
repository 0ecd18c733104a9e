// src/main.rs

use ca_assessment::config::Config;
use ca_assessment::routes;
use ca_assessment::state::AppState;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "assessment.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    for setting in &config.invalid_settings {
        tracing::warn!("{}", setting);
    }

    tracing::info!(
        responses_dir = %config.responses_dir.display(),
        pass_threshold = config.pass_threshold,
        "Starting assessment service"
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::from_config(config).inspect_err(|e| {
        tracing::error!("Failed to initialize application state: {}", e);
    })?;
    tracing::info!(questions = state.bank.len(), "Question bank ready");

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
