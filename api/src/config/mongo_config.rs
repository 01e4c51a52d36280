use mongodb::bson::doc;
use mongodb::error::{ErrorKind, Result};
use mongodb::options::{ClientOptions, Credential, ServerApi, ServerApiVersion};
use rocket_db_pools::mongodb::Client;
use tracing::{error, info};

use super::AppConfig;
use crate::store::MongoStore;

pub async fn setup_mongo(config: &AppConfig) -> Result<Client> {
    let mut client_options = ClientOptions::parse(&config.mongo_uri).await?;
    client_options.app_name = Some("smart-deals".to_string());
    client_options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    if let Some((user, password)) = config.credentials() {
        client_options.credential = Some(
            Credential::builder()
                .username(user.to_string())
                .password(password.to_string())
                .build(),
        );
    }
    Client::with_options(client_options)
}

/// Pings the deployment once. A failure is logged and otherwise ignored so the
/// server keeps listening; requests then surface store errors individually.
pub async fn ping_mongo(client: &Client) -> bool {
    match client.database("admin").run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => {
            info!("successfully connected to MongoDB");
            true
        }
        Err(err) => {
            error!("MongoDB connection failed: {err}");
            false
        }
    }
}

/// Builds the store the server runs on. Only a connection string that cannot
/// be understood at all is fatal. Resolution or connection failures are logged
/// and the client is built again on the first request.
pub async fn open_mongo_store(config: &AppConfig) -> Result<MongoStore> {
    match setup_mongo(config).await {
        Ok(client) => {
            ping_mongo(&client).await;
            let database = client.database(&config.db_name);
            Ok(MongoStore::connected(config.clone(), database))
        }
        Err(err) if matches!(*err.kind, ErrorKind::InvalidArgument { .. }) => Err(err),
        Err(err) => {
            error!("MongoDB connection failed: {err}; retrying on first request");
            Ok(MongoStore::deferred(config.clone()))
        }
    }
}
