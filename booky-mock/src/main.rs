use booky_mock::{AppState, Config, logger, serve};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    logger::init_logger(&config.log_level, config.log_json)?;

    tracing::info!("Booky mock backend starting...");
    let state = Arc::new(AppState::seeded());
    let listener = TcpListener::bind(config.bind_addr()).await?;

    if let Err(e) = serve(listener, state).await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }
    Ok(())
}
