use std::net::IpAddr;

use clap::{Parser, ValueEnum};
use rocket::figment::Figment;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB through the official driver.
    Mongo,
    /// Process-local store; contents are lost on exit.
    Memory,
}

/// Runtime settings. Every flag falls back to an environment variable, and a
/// `.env` file is loaded before parsing.
#[derive(Parser, Debug, Clone)]
#[command(name = "smart-deals", version, about = "HTTP API for deals and bids")]
pub struct AppConfig {
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "ADDRESS", default_value = "0.0.0.0")]
    pub address: IpAddr,

    #[arg(long, env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Mongo)]
    pub store: StoreBackend,

    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017", hide_env_values = true)]
    pub mongo_uri: String,

    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    #[arg(long, env = "DB_NAME", default_value = "SmartDB")]
    pub db_name: String,

    #[arg(long, env = "DEALS_COLLECTION", default_value = "SmartDeals")]
    pub deals_collection: String,

    #[arg(long, env = "BIDS_COLLECTION", default_value = "Bids")]
    pub bids_collection: String,
}

impl AppConfig {
    /// Username and password, only when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.db_user, &self.db_password) {
            (Some(user), Some(password)) => Some((user.as_str(), password.as_str())),
            _ => None,
        }
    }

    /// Connection string with any embedded user info masked, for logging.
    pub fn redacted_mongo_uri(&self) -> String {
        let uri = &self.mongo_uri;
        let Some(scheme_end) = uri.find("://").map(|i| i + 3) else {
            return uri.clone();
        };
        let authority_end = uri[scheme_end..]
            .find('/')
            .map_or(uri.len(), |i| scheme_end + i);
        match uri[scheme_end..authority_end].rfind('@') {
            Some(at) => format!("{}***{}", &uri[..scheme_end], &uri[scheme_end + at..]),
            None => uri.clone(),
        }
    }

    /// Rocket configuration with the listen address applied.
    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("port", self.port))
            .merge(("address", self.address))
    }
}
