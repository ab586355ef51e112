use papyra_gateway::config::Settings;
use papyra_gateway::{AppState, app};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    let listener = TcpListener::bind(&settings.addr).await?;
    info!("papyra gateway listening on {}", settings.addr);

    axum::serve(listener, app(AppState::new())).await
}
