//! Receipt admission pipeline.
//!
//! Submissions are validated against fixed grammars, fingerprinted into a
//! content-derived identifier, scored, and stored exactly once. Points are then
//! looked up by identifier.

pub mod domain;
pub mod identity;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Item, ItemSubmission, PointsView, Receipt, ReceiptAccepted, ReceiptId, ReceiptSubmission,
    StoredReceipt,
};
pub use identity::{derive_id, IdentityError};
pub use router::receipt_router;
pub use scoring::{score, score_breakdown, ScoreComponent, ScoreOutcome, ScoringRule};
pub use service::{ReceiptService, ReceiptServiceError};
pub use store::{InMemoryReceiptStore, ReceiptStore, StoreError};
pub use validation::{validate, ValidationError};
