use std::error::Error;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use smart_deals::build_rocket;
use smart_deals::config::mongo_config::open_mongo_store;
use smart_deals::config::{AppConfig, StoreBackend};
use smart_deals::repository::{BidRepository, DealRepository};
use smart_deals::store::{DocumentStore, MemoryStore};

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::parse();
    info!(
        address = %config.address,
        port = config.port,
        store = ?config.store,
        database = %config.db_name,
        "starting smart deals server"
    );

    let store: Box<dyn DocumentStore> = match config.store {
        StoreBackend::Mongo => {
            info!(uri = %config.redacted_mongo_uri(), "connecting to MongoDB");
            Box::new(open_mongo_store(&config).await?)
        }
        StoreBackend::Memory => {
            warn!("using the in-memory store; data will not survive a restart");
            Box::new(MemoryStore::new())
        }
    };

    let deal_repo = DealRepository::new(store.as_ref(), &config.deals_collection);
    let bid_repo = BidRepository::new(store.as_ref(), &config.bids_collection);

    if let Err(err) = build_rocket(config.figment(), deal_repo, bid_repo).launch().await {
        error!("server stopped: {err}");
        return Err(err.into());
    }
    Ok(())
}
