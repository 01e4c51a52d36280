use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use rocket::request::FromParam;

use crate::error::ApiError;

/// Identifier taken from a request path, already parsed into the store's
/// native form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    /// Equality filter selecting the document with this identifier.
    pub fn filter(&self) -> Document {
        doc! { "_id": self.0 }
    }
}

impl FromStr for DocumentId {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(raw)
            .map(DocumentId)
            .map_err(|_| ApiError::InvalidIdentifier(raw.to_string()))
    }
}

impl<'a> FromParam<'a> for DocumentId {
    type Error = ApiError;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        param.parse()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
