//! Document store seam.
//!
//! Repositories talk to a [`DocumentCollection`] handed out by a
//! [`DocumentStore`]. Production runs on [`mongo_store::MongoStore`]; local runs
//! and the test suite use [`memory_store::MemoryStore`].

pub mod memory_store;
pub mod mongo_store;

use std::sync::Arc;

use mongodb::bson::{Bson, Document};
use serde::Serialize;
use thiserror::Error;

pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("malformed document: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("document could not be encoded: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("duplicate key: {0}")]
    DuplicateKey(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Sort and limit applied to a `find`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    /// `{field: 1 | -1}`, keys applied in insertion order.
    pub sort: Option<Document>,
    pub limit: Option<i64>,
}

impl FindQuery {
    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Renders a generated identifier the way callers see it: ObjectIds as hex,
/// anything else through its display form.
pub(crate) fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[rocket::async_trait]
pub trait DocumentCollection: Send + Sync {
    async fn find(&self, filter: Document, query: FindQuery) -> Result<Vec<Document>>;

    async fn find_one(&self, filter: Document) -> Result<Option<Document>>;

    async fn insert_one(&self, document: Document) -> Result<InsertAck>;

    /// Applies `set` with `$set` semantics to the first document matching `filter`.
    async fn update_one(&self, filter: Document, set: Document) -> Result<UpdateAck>;

    async fn delete_one(&self, filter: Document) -> Result<DeleteAck>;
}

pub trait DocumentStore: Send + Sync {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection>;
}
