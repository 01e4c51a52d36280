use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// An offer against a listing. `product` conventionally holds the listing
/// identifier as a plain string and is not checked against existing deals.
/// Values are kept exactly as received, so integer prices stay integers.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Bid {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::id_field"
    )]
    pub id: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Bson>,
    #[serde(flatten)]
    pub fields: Document,
}

impl Bid {
    pub fn into_document(self) -> Result<Document, StoreError> {
        let mut document = bson::to_document(&self)?;
        document.remove("_id");
        Ok(document)
    }
}
