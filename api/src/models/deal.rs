use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// A product listing. The conventional keys get their own fields, everything
/// else the caller sends is kept verbatim in `fields`. No field is typed beyond
/// `Bson`, so any value a caller or another client stored is accepted and
/// returned as it was.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Deal {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::id_field"
    )]
    pub id: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Bson>, // owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Bson>,
    #[serde(flatten)]
    pub fields: Document,
}

impl Deal {
    /// Store form of the listing. `_id` is never carried over: inserts get a
    /// generated identifier and `$set` patches leave the identifier alone.
    pub fn into_document(self) -> Result<Document, StoreError> {
        let mut document = bson::to_document(&self)?;
        document.remove("_id");
        Ok(document)
    }
}
