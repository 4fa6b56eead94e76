use axum::serve;
use slipway::api::handlers::AppState;
use slipway::api::routes::create_router;
use slipway::config::AppConfig;
use slipway::store::{BlobDataStore, FsObjectStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new().filter_level(LevelFilter::Info).init();

    println!("Slipway: Release Notes & Deployment Tracking Server");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}, data dir={}",
        config.server.host, config.server.port, config.storage.data_dir
    );
    println!(
        "Catalog: {} products, {} environments, {} pathways",
        config.catalog.products.len(),
        config.catalog.environments.len(),
        config.catalog.pathways.len()
    );

    let objects = FsObjectStore::new(&config.storage.data_dir);
    let store = BlobDataStore::with_op_timeout(
        objects,
        Duration::from_secs(config.storage.op_timeout_secs),
    );

    let state = AppState {
        store: Arc::new(store),
        catalog: Arc::new(config.catalog.clone()),
    };

    run_server(create_router().with_state(state), &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Slipway server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
