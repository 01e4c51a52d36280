use rocket::serde::json::Json;
use rocket::State;

use crate::error::ApiError;
use crate::models::{Bid, DocumentId};
use crate::repository::BidRepository;
use crate::store::{DeleteAck, InsertAck};

/// Bids of one buyer, highest first, or every bid when no email is given.
#[get("/bids?<email>")]
pub async fn get_bids(
    bid_repo: &State<BidRepository>,
    email: Option<&str>,
) -> Result<Json<Vec<Bid>>, ApiError> {
    let bids = match email.filter(|email| !email.is_empty()) {
        Some(email) => bid_repo.find_bids_by_buyer(email).await?,
        None => bid_repo.get_all_bids().await?,
    };
    Ok(Json(bids))
}

#[get("/product/bids/<product_id>")]
pub async fn get_product_bids(
    bid_repo: &State<BidRepository>,
    product_id: &str,
) -> Result<Json<Vec<Bid>>, ApiError> {
    Ok(Json(bid_repo.find_bids_by_product(product_id).await?))
}

#[post("/bids", data = "<new_bid>")]
pub async fn create_bid(
    bid_repo: &State<BidRepository>,
    new_bid: Json<Bid>,
) -> Result<Json<InsertAck>, ApiError> {
    Ok(Json(bid_repo.create_bid(new_bid.into_inner()).await?))
}

#[delete("/bids/<id>")]
pub async fn delete_bid(
    bid_repo: &State<BidRepository>,
    id: Result<DocumentId, ApiError>,
) -> Result<Json<DeleteAck>, ApiError> {
    Ok(Json(bid_repo.delete_bid(id?).await?))
}
