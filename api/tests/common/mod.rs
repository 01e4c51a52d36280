#![allow(dead_code)]

use std::sync::Arc;

use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::Value;

use smart_deals::build_rocket;
use smart_deals::repository::{BidRepository, DealRepository};
use mongodb::bson::Document;
use smart_deals::store::{
    DeleteAck, DocumentCollection, DocumentStore, FindQuery, InsertAck, MemoryStore, StoreError,
    UpdateAck,
};

pub const DEALS: &str = "SmartDeals";
pub const BIDS: &str = "Bids";

/// Local client over a fresh in-memory store. The store is returned too so tests
/// can seed documents behind the API's back.
pub async fn client() -> (Client, MemoryStore) {
    let store = MemoryStore::new();
    let client = client_over(&store).await;
    (client, store)
}

pub async fn client_over(store: &dyn DocumentStore) -> Client {
    let rocket = build_rocket(
        rocket::Config::figment(),
        DealRepository::new(store, DEALS),
        BidRepository::new(store, BIDS),
    );
    Client::tracked(rocket).await.expect("valid rocket instance")
}

/// Store whose every operation fails the way a refused connection does.
pub struct UnreachableStore;

struct UnreachableCollection;

fn refused() -> StoreError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    StoreError::Database(io.into())
}

impl DocumentStore for UnreachableStore {
    fn collection(&self, _name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(UnreachableCollection)
    }
}

#[rocket::async_trait]
impl DocumentCollection for UnreachableCollection {
    async fn find(&self, _: Document, _: FindQuery) -> Result<Vec<Document>, StoreError> {
        Err(refused())
    }

    async fn find_one(&self, _: Document) -> Result<Option<Document>, StoreError> {
        Err(refused())
    }

    async fn insert_one(&self, _: Document) -> Result<InsertAck, StoreError> {
        Err(refused())
    }

    async fn update_one(&self, _: Document, _: Document) -> Result<UpdateAck, StoreError> {
        Err(refused())
    }

    async fn delete_one(&self, _: Document) -> Result<DeleteAck, StoreError> {
        Err(refused())
    }
}

pub async fn get(client: &Client, uri: &str) -> (Status, Value) {
    let response = client.get(uri).dispatch().await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

pub async fn send_json(client: &Client, method: &str, uri: &str, body: &Value) -> (Status, Value) {
    let request = match method {
        "POST" => client.post(uri),
        "PUT" => client.put(uri),
        other => panic!("unsupported method {other}"),
    };
    let response = request
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

pub async fn delete(client: &Client, uri: &str) -> (Status, Value) {
    let response = client.delete(uri).dispatch().await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

/// Creates a document through the API and returns its identifier.
pub async fn create(client: &Client, uri: &str, body: Value) -> String {
    let (status, ack) = send_json(client, "POST", uri, &body).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(ack["acknowledged"], Value::Bool(true));
    ack["insertedId"].as_str().expect("insertedId").to_string()
}
