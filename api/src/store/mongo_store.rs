use std::sync::Arc;

use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{id_to_string, DeleteAck, DocumentCollection, DocumentStore, FindQuery, InsertAck, Result, UpdateAck};
use crate::config::mongo_config::setup_mongo;
use crate::config::AppConfig;

/// MongoDB-backed store. The database handle is either supplied up front or
/// built on the first operation that needs it; a failed build is not cached,
/// so the next request tries again.
pub struct MongoStore {
    connection: Arc<Connection>,
}

struct Connection {
    config: AppConfig,
    database: OnceCell<Database>,
}

impl Connection {
    async fn database(&self) -> Result<&Database> {
        self.database
            .get_or_try_init(|| async {
                let client = setup_mongo(&self.config).await?;
                info!("MongoDB client ready");
                Ok(client.database(&self.config.db_name))
            })
            .await
    }
}

impl MongoStore {
    pub fn connected(config: AppConfig, database: Database) -> Self {
        Self::with_cell(config, OnceCell::new_with(Some(database)))
    }

    /// Store whose client is built on first use.
    pub fn deferred(config: AppConfig) -> Self {
        Self::with_cell(config, OnceCell::new())
    }

    fn with_cell(config: AppConfig, database: OnceCell<Database>) -> Self {
        MongoStore {
            connection: Arc::new(Connection { config, database }),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.database.initialized()
    }
}

impl DocumentStore for MongoStore {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MongoCollection {
            connection: self.connection.clone(),
            name: name.to_string(),
        })
    }
}

pub struct MongoCollection {
    connection: Arc<Connection>,
    name: String,
}

impl MongoCollection {
    async fn collection(&self) -> Result<Collection<Document>> {
        Ok(self.connection.database().await?.collection(&self.name))
    }
}

#[rocket::async_trait]
impl DocumentCollection for MongoCollection {
    async fn find(&self, filter: Document, query: FindQuery) -> Result<Vec<Document>> {
        let options = FindOptions::builder()
            .sort(query.sort)
            .limit(query.limit)
            .build();

        let mut cursor = self.collection().await?.find(filter, options).await?;
        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            documents.push(document);
        }
        debug!(collection = %self.name, count = documents.len(), "find");
        Ok(documents)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        Ok(self.collection().await?.find_one(filter, None).await?)
    }

    async fn insert_one(&self, document: Document) -> Result<InsertAck> {
        let result = self.collection().await?.insert_one(document, None).await?;
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id_to_string(&result.inserted_id),
        })
    }

    async fn update_one(&self, filter: Document, set: Document) -> Result<UpdateAck> {
        let result = self
            .collection()
            .await?
            .update_one(filter, doc! { "$set": set }, None)
            .await?;
        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.as_ref().map(id_to_string),
        })
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteAck> {
        let result = self.collection().await?.delete_one(filter, None).await?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
