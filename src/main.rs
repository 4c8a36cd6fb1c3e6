use dotenv::dotenv;
use std::sync::Arc;

use trend_scout::api::{self, AppState};
use trend_scout::config::Config;
use trend_scout::dataset;
use trend_scout::sentiment::SentimentAdapter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    // Built once; a missing or unusable file leaves it empty and /api/predict
    // answers 400 until the process is restarted with data.
    let table = dataset::load(&config);
    let state = Arc::new(AppState::new(table, SentimentAdapter::default(), config.seed));

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
