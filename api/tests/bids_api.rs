mod common;

use mongodb::bson::doc;
use rocket::http::Status;
use serde_json::{json, Value};

use common::{client, client_over, create, delete, get, send_json, UnreachableStore, BIDS};
use smart_deals::store::{DocumentCollection, DocumentStore};

fn prices(bids: &Value) -> Vec<f64> {
    bids.as_array()
        .unwrap()
        .iter()
        .map(|bid| bid["bid_price"].as_f64().unwrap())
        .collect()
}

#[rocket::async_test]
async fn product_bids_come_back_highest_first() {
    let (client, _) = client().await;
    create(&client, "/bids", json!({ "buyer_email": "a@x.com", "bid_price": 100, "product": "p1" })).await;
    create(&client, "/bids", json!({ "buyer_email": "b@x.com", "bid_price": 150, "product": "p1" })).await;
    create(&client, "/bids", json!({ "buyer_email": "c@x.com", "bid_price": 999, "product": "p2" })).await;

    let (status, bids) = get(&client, "/product/bids/p1").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(prices(&bids), vec![150.0, 100.0]);
    assert_eq!(bids[0]["buyer_email"], "b@x.com");
    assert_eq!(bids[1]["buyer_email"], "a@x.com");
}

#[rocket::async_test]
async fn product_with_no_bids_is_empty() {
    let (client, _) = client().await;
    let (status, bids) = get(&client, "/product/bids/unknown").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(bids, json!([]));
}

#[rocket::async_test]
async fn buyer_bids_are_filtered_and_sorted() {
    let (client, _) = client().await;
    for (buyer, price) in [("a@x.com", 20.5), ("b@x.com", 70.0), ("a@x.com", 80.0), ("a@x.com", 35.0)] {
        create(&client, "/bids", json!({ "buyer_email": buyer, "bid_price": price, "product": "p9" })).await;
    }

    let (status, bids) = get(&client, "/bids?email=a@x.com").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(prices(&bids), vec![80.0, 35.0, 20.5]);
}

#[rocket::async_test]
async fn all_bids_without_email() {
    let (client, _) = client().await;
    create(&client, "/bids", json!({ "buyer_email": "a@x.com", "bid_price": 1 })).await;
    create(&client, "/bids", json!({ "buyer_email": "b@x.com", "bid_price": 2 })).await;

    for uri in ["/bids", "/bids?email="] {
        let (status, bids) = get(&client, uri).await;
        assert_eq!(status, Status::Ok);
        assert_eq!(bids.as_array().map(Vec::len), Some(2), "{uri}");
    }
}

#[rocket::async_test]
async fn extra_bid_fields_are_kept() {
    let (client, _) = client().await;
    let id = create(
        &client,
        "/bids",
        json!({ "buyer_email": "a@x.com", "bid_price": 10, "product": "p1", "message": "hi" }),
    )
    .await;

    let (_, bids) = get(&client, "/product/bids/p1").await;
    assert_eq!(bids[0]["_id"], json!(id));
    assert_eq!(bids[0]["message"], "hi");
}

#[rocket::async_test]
async fn delete_bid_reports_count() {
    let (client, _) = client().await;
    let id = create(&client, "/bids", json!({ "buyer_email": "a@x.com", "product": "p1" })).await;

    let (status, ack) = delete(&client, &format!("/bids/{id}")).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(ack["deletedCount"], 1);

    let (status, ack) = delete(&client, "/bids/65f1c0ffee0000000000beef").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(ack["deletedCount"], 0);

    let (_, bids) = get(&client, "/bids").await;
    assert_eq!(bids, json!([]));
}

#[rocket::async_test]
async fn delete_bid_with_malformed_identifier() {
    let (client, _) = client().await;
    let (status, body) = delete(&client, "/bids/zzz").await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["message"], "Invalid identifier");
}

#[rocket::async_test]
async fn integer_price_comes_back_as_an_integer() {
    let (client, _) = client().await;
    create(&client, "/bids", json!({ "buyer_email": "a@x.com", "bid_price": 100, "product": "p1" })).await;

    let (_, bids) = get(&client, "/product/bids/p1").await;
    assert_eq!(bids[0]["bid_price"], 100);
    assert!(bids[0]["bid_price"].is_i64());
}

#[rocket::async_test]
async fn mixed_type_bid_fields_round_trip() {
    let (client, _) = client().await;
    let response = client
        .post("/bids")
        .body(json!({ "buyer_email": 3, "bid_price": "100", "product": "p1" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let (status, bids) = get(&client, "/product/bids/p1").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(bids[0]["buyer_email"], 3);
    assert_eq!(bids[0]["bid_price"], "100");
}

#[rocket::async_test]
async fn oddly_typed_stored_bid_is_listed_with_the_rest() {
    let (client, store) = client().await;
    store
        .collection(BIDS)
        .insert_one(doc! { "buyer_email": "a@x.com", "bid_price": "150", "product": "p1" })
        .await
        .unwrap();
    create(&client, "/bids", json!({ "buyer_email": "a@x.com", "bid_price": 90, "product": "p1" })).await;

    for uri in ["/bids", "/bids?email=a@x.com", "/product/bids/p1"] {
        let (status, bids) = get(&client, uri).await;
        assert_eq!(status, Status::Ok, "{uri}");
        assert_eq!(bids.as_array().map(Vec::len), Some(2), "{uri}");
    }

    // Strings order after numbers, so a descending sort puts them first.
    let (_, bids) = get(&client, "/product/bids/p1").await;
    assert_eq!(bids[0]["bid_price"], "150");
    assert_eq!(bids[1]["bid_price"], 90);
}

#[rocket::async_test]
async fn unreachable_store_is_a_server_error() {
    let client = client_over(&UnreachableStore).await;

    let outcomes = vec![
        get(&client, "/bids").await,
        get(&client, "/bids?email=a@x.com").await,
        get(&client, "/product/bids/p1").await,
        send_json(&client, "POST", "/bids", &json!({ "bid_price": 1 })).await,
        delete(&client, "/bids/65f1c0ffee0000000000beef").await,
    ];
    for (status, body) in outcomes {
        assert_eq!(status, Status::InternalServerError);
        assert_eq!(body["message"], "Server Error");
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }
}
