use std::sync::Arc;

use mongodb::bson::doc;
use tracing::debug;

use super::deal_repository::decode_all;
use crate::models::{Bid, DocumentId};
use crate::store::{DeleteAck, DocumentCollection, DocumentStore, FindQuery, InsertAck, Result};

pub struct BidRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl BidRepository {
    pub fn new(store: &dyn DocumentStore, collection_name: &str) -> Self {
        let collection = store.collection(collection_name);
        BidRepository { collection }
    }

    // Unordered, as stored.
    pub async fn get_all_bids(&self) -> Result<Vec<Bid>> {
        let documents = self.collection.find(doc! {}, FindQuery::default()).await?;
        decode_all(documents)
    }

    pub async fn find_bids_by_buyer(&self, buyer_email: &str) -> Result<Vec<Bid>> {
        let documents = self
            .collection
            .find(doc! { "buyer_email": buyer_email }, by_price_descending())
            .await?;
        debug!(buyer_email, count = documents.len(), "bids for buyer");
        decode_all(documents)
    }

    pub async fn find_bids_by_product(&self, product_id: &str) -> Result<Vec<Bid>> {
        let documents = self
            .collection
            .find(doc! { "product": product_id }, by_price_descending())
            .await?;
        debug!(product_id, count = documents.len(), "bids for product");
        decode_all(documents)
    }

    pub async fn create_bid(&self, bid: Bid) -> Result<InsertAck> {
        let ack = self.collection.insert_one(bid.into_document()?).await?;
        debug!(id = %ack.inserted_id, "bid created");
        Ok(ack)
    }

    pub async fn delete_bid(&self, id: DocumentId) -> Result<DeleteAck> {
        let ack = self.collection.delete_one(id.filter()).await?;
        debug!(%id, deleted = ack.deleted_count, "bid deleted");
        Ok(ack)
    }
}

fn by_price_descending() -> FindQuery {
    FindQuery::default().sort(doc! { "bid_price": -1 })
}
