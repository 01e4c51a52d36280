use std::sync::Arc;

use mongodb::bson::{self, doc, Document};
use tracing::debug;

use crate::models::{Deal, DocumentId};
use crate::store::{DeleteAck, DocumentCollection, DocumentStore, FindQuery, InsertAck, Result, UpdateAck};

/// Number of listings returned by the "latest" view.
pub const LATEST_DEALS_LIMIT: i64 = 6;

pub struct DealRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl DealRepository {
    pub fn new(store: &dyn DocumentStore, collection_name: &str) -> Self {
        let collection = store.collection(collection_name);
        DealRepository { collection }
    }

    pub async fn get_all_deals(&self) -> Result<Vec<Deal>> {
        let documents = self.collection.find(doc! {}, FindQuery::default()).await?;
        decode_all(documents)
    }

    pub async fn find_deals_by_email(&self, email: &str) -> Result<Vec<Deal>> {
        let documents = self
            .collection
            .find(doc! { "email": email }, FindQuery::default())
            .await?;
        debug!(email, count = documents.len(), "deals for owner");
        decode_all(documents)
    }

    pub async fn find_deal_by_id(&self, id: DocumentId) -> Result<Option<Deal>> {
        match self.collection.find_one(id.filter()).await? {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => {
                debug!(%id, "deal not found");
                Ok(None)
            }
        }
    }

    pub async fn create_deal(&self, deal: Deal) -> Result<InsertAck> {
        let ack = self.collection.insert_one(deal.into_document()?).await?;
        debug!(id = %ack.inserted_id, "deal created");
        Ok(ack)
    }

    /// Overwrites the supplied fields of one listing; other fields persist.
    pub async fn update_deal(&self, id: DocumentId, patch: Deal) -> Result<UpdateAck> {
        let ack = self
            .collection
            .update_one(id.filter(), patch.into_document()?)
            .await?;
        debug!(%id, matched = ack.matched_count, modified = ack.modified_count, "deal updated");
        Ok(ack)
    }

    pub async fn delete_deal(&self, id: DocumentId) -> Result<DeleteAck> {
        let ack = self.collection.delete_one(id.filter()).await?;
        debug!(%id, deleted = ack.deleted_count, "deal deleted");
        Ok(ack)
    }

    pub async fn get_latest_deals(&self) -> Result<Vec<Deal>> {
        let query = FindQuery::default()
            .sort(doc! { "created_at": -1 })
            .limit(LATEST_DEALS_LIMIT);
        let documents = self.collection.find(doc! {}, query).await?;
        decode_all(documents)
    }
}

pub(crate) fn decode_all<T>(documents: Vec<Document>) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    documents
        .into_iter()
        .map(|document| bson::from_document(document).map_err(Into::into))
        .collect()
}
