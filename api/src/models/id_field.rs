//! Serde helpers for `_id`. ObjectIds are written out as hex strings and a hex
//! string read back becomes an ObjectId again; any other identifier type passes
//! through untouched.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S>(id: &Option<Bson>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(Bson::ObjectId(oid)) => serializer.serialize_str(&oid.to_hex()),
        Some(other) => other.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Bson>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => None,
        Some(Bson::String(raw)) => match ObjectId::parse_str(&raw) {
            Ok(oid) => Some(Bson::ObjectId(oid)),
            Err(_) => Some(Bson::String(raw)),
        },
        Some(other) => Some(other),
    })
}
