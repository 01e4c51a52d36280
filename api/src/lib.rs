//! HTTP API over two document collections: deals (product listings) and bids
//! (offers against listings).

#[macro_use]
extern crate rocket;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod store;

use rocket::figment::Figment;
use rocket::{Build, Rocket};

use repository::{BidRepository, DealRepository};
use services::cors_fairing::Cors;

/// Assembles the server around already-constructed repositories.
pub fn build_rocket(figment: Figment, deal_repo: DealRepository, bid_repo: BidRepository) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(deal_repo)
        .manage(bid_repo)
        .attach(Cors)
        .mount("/", routes::routes())
        .register("/", routes::catchers())
}
