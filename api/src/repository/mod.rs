pub mod bid_repository;
pub mod deal_repository;

pub use bid_repository::BidRepository;
pub use deal_repository::DealRepository;
