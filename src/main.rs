use anyhow::Result;
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use voice_translate_backend::config::Config;
use voice_translate_backend::routes;
use voice_translate_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voice_translate_backend=debug,tower_http=debug")),
        )
        .init();

    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let config = match config_paths.iter().find(|path| Path::new(path).exists()) {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from: {}", path);
            config
        }
        None => {
            info!(
                "No config file found (tried {:?}), using defaults and OPENAI_API_KEY",
                config_paths
            );
            Config::from_env()?
        }
    };

    let app_state = AppState::new(config.clone())?;
    let app = routes::create_router(app_state);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
