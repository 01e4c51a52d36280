pub mod bid;
pub mod deal;
pub mod document_id;
pub mod id_field;

pub use bid::Bid;
pub use deal::Deal;
pub use document_id::DocumentId;
