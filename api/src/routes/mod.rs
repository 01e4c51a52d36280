pub mod bids;
pub mod deals;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Catcher, Request, Route};

use crate::error::ErrorBody;

pub const LIVENESS_MESSAGE: &str = "Smart Deals Server is Running Fast 🚀";

#[get("/")]
fn index() -> &'static str {
    LIVENESS_MESSAGE
}

// CORS preflight; headers come from the fairing.
#[options("/<_..>")]
fn all_options() -> Status {
    Status::NoContent
}

pub fn routes() -> Vec<Route> {
    routes![
        index,
        all_options,
        deals::get_all_deals,
        deals::get_my_products,
        deals::get_deal,
        deals::create_deal,
        deals::update_deal,
        deals::delete_deal,
        deals::get_latest_products,
        bids::get_bids,
        bids::get_product_bids,
        bids::create_bid,
        bids::delete_bid,
    ]
}

#[catch(400)]
fn bad_request() -> Json<ErrorBody> {
    Json(ErrorBody::new("Bad Request"))
}

#[catch(404)]
fn not_found(req: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new(format!("'{}' route not found", req.uri())))
}

#[catch(422)]
fn unprocessable_entity() -> Json<ErrorBody> {
    Json(ErrorBody::new("Request body is not a valid JSON document"))
}

#[catch(500)]
fn internal_error() -> Json<ErrorBody> {
    Json(ErrorBody::new("Server Error"))
}

pub fn catchers() -> Vec<Catcher> {
    catchers![bad_request, not_found, unprocessable_entity, internal_error]
}
