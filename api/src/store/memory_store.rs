//! In-process document store.
//!
//! Follows the store contract closely enough for the HTTP surface to behave the
//! same as against MongoDB: generated ObjectIds, equality filters that compare
//! numbers by value, BSON cross-type ordering for sorts, and `$set` updates that
//! only count a document as modified when a value changes. Dotted paths are not
//! interpreted.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use tokio::sync::RwLock;

use super::{
    id_to_string, DeleteAck, DocumentCollection, DocumentStore, FindQuery, InsertAck, Result,
    StoreError, UpdateAck,
};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCollection::default()))
            .clone()
    }
}

#[derive(Default)]
pub struct MemoryCollection {
    documents: RwLock<Vec<Document>>,
}

#[rocket::async_trait]
impl DocumentCollection for MemoryCollection {
    async fn find(&self, filter: Document, query: FindQuery) -> Result<Vec<Document>> {
        let documents = self.documents.read().await;
        let mut found: Vec<Document> = documents
            .iter()
            .filter(|document| matches(document, &filter))
            .cloned()
            .collect();

        if let Some(sort) = &query.sort {
            found.sort_by(|a, b| compare_by_sort(a, b, sort));
        }
        if let Some(limit) = query.limit.filter(|limit| *limit != 0) {
            found.truncate(limit.unsigned_abs() as usize);
        }
        Ok(found)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|document| matches(document, &filter))
            .cloned())
    }

    async fn insert_one(&self, document: Document) -> Result<InsertAck> {
        let id = document
            .get("_id")
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

        let mut documents = self.documents.write().await;
        if documents.iter().any(|existing| existing.get("_id") == Some(&id)) {
            return Err(StoreError::DuplicateKey(id_to_string(&id)));
        }

        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }
        documents.push(stored);

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id_to_string(&id),
        })
    }

    async fn update_one(&self, filter: Document, set: Document) -> Result<UpdateAck> {
        let mut documents = self.documents.write().await;
        let Some(document) = documents.iter_mut().find(|document| matches(document, &filter)) else {
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        };

        let mut modified = false;
        for (key, value) in set {
            if document.get(&key) != Some(&value) {
                document.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            upserted_count: 0,
            upserted_id: None,
        })
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteAck> {
        let mut documents = self.documents.write().await;
        let position = documents.iter().position(|document| matches(document, &filter));
        if let Some(index) = position {
            documents.remove(index);
        }
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: u64::from(position.is_some()),
        })
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match document.get(key) {
        Some(actual) => values_equal(actual, expected),
        None => matches!(expected, Bson::Null),
    })
}

fn values_equal(a: &Bson, b: &Bson) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

fn compare_by_sort(a: &Document, b: &Document, sort: &Document) -> Ordering {
    for (field, direction) in sort {
        let ordering = compare_values(a.get(field), b.get(field));
        let ordering = if is_descending(direction) {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn is_descending(direction: &Bson) -> bool {
    as_number(direction).map_or(false, |n| n < 0.0)
}

/// Position of a value's type in the BSON comparison order. A missing field
/// ranks with null.
fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        Some(Bson::MinKey) => 0,
        None | Some(Bson::Null) | Some(Bson::Undefined) => 1,
        Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_)) => 2,
        Some(Bson::String(_) | Bson::Symbol(_)) => 3,
        Some(Bson::Document(_)) => 4,
        Some(Bson::Array(_)) => 5,
        Some(Bson::Binary(_)) => 6,
        Some(Bson::ObjectId(_)) => 7,
        Some(Bson::Boolean(_)) => 8,
        Some(Bson::DateTime(_)) => 9,
        Some(Bson::Timestamp(_)) => 10,
        Some(Bson::RegularExpression(_)) => 11,
        Some(Bson::MaxKey) => 13,
        Some(_) => 12,
    }
}

fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let by_type = type_rank(a).cmp(&type_rank(b));
    if by_type != Ordering::Equal {
        return by_type;
    }

    match (a, b) {
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
                return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            }
            match (a, b) {
                (Bson::String(x), Bson::String(y)) => x.cmp(y),
                (Bson::ObjectId(x), Bson::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
                (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
                (Bson::DateTime(x), Bson::DateTime(y)) => x.cmp(y),
                (Bson::Timestamp(x), Bson::Timestamp(y)) => {
                    (x.time, x.increment).cmp(&(y.time, y.increment))
                }
                (Bson::Array(x), Bson::Array(y)) => x
                    .iter()
                    .zip(y.iter())
                    .map(|(x, y)| compare_values(Some(x), Some(y)))
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or_else(|| x.len().cmp(&y.len())),
                (x, y) => x.to_string().cmp(&y.to_string()),
            }
        }
        _ => Ordering::Equal,
    }
}
