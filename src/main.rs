use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use url_digest::{
    config::Config,
    api::routes::create_router,
    pipeline::SummaryPipeline,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        model = %config.llm_model,
        llm_base_url = %config.llm_base_url,
        page_tls_verify = config.page_tls_verify,
        "Loaded configuration"
    );

    // Create application state
    let app_state = AppState::new(SummaryPipeline::from_config(&config)?);

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(config.server_addr).await?;

    // Start the server
    tracing::info!(addr = %config.server_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
