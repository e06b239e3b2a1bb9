use std::sync::Arc;

use tracing::{error, info, warn};

use super::domain::{ReceiptId, ReceiptSubmission, StoredReceipt};
use super::identity::{derive_id, IdentityError};
use super::scoring::score;
use super::store::{ReceiptStore, StoreError};
use super::validation::{validate, ValidationError};

/// Admission pipeline composing validation, identity, scoring, and storage.
///
/// A submission moves through validated, scored, and stored, and is rejected
/// either at validation or when the store already holds its identifier.
pub struct ReceiptService<S> {
    store: Arc<S>,
}

impl<S> Clone for ReceiptService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ReceiptService<S>
where
    S: ReceiptStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Parse a raw JSON body and submit it.
    pub fn submit_json(&self, body: &[u8]) -> Result<ReceiptId, ReceiptServiceError> {
        let submission: ReceiptSubmission = serde_json::from_slice(body).map_err(|err| {
            warn!(%err, "receipt rejected: malformed payload");
            ReceiptServiceError::MalformedInput(err.to_string())
        })?;
        self.submit(submission)
    }

    /// Admit a receipt, returning its content-derived identifier.
    pub fn submit(&self, submission: ReceiptSubmission) -> Result<ReceiptId, ReceiptServiceError> {
        let receipt = validate(submission).map_err(|err| {
            warn!(field = err.field(), %err, "receipt rejected: validation failed");
            ReceiptServiceError::Validation(err)
        })?;

        let id = derive_id(&receipt).map_err(|err| {
            error!(%err, "receipt identity derivation failed");
            ReceiptServiceError::Identity(err)
        })?;

        let points = score(&receipt);
        let record = StoredReceipt {
            id: id.clone(),
            receipt,
            points,
        };

        match self.store.insert_if_absent(record) {
            Ok(()) => {
                info!(%id, points, "receipt accepted");
                Ok(id)
            }
            Err(StoreError::AlreadyExists(id)) => {
                warn!(%id, "receipt rejected: duplicate submission");
                Err(ReceiptServiceError::DuplicateSubmission { id })
            }
            Err(err) => {
                error!(%id, %err, "receipt store insert failed");
                Err(ReceiptServiceError::Store(err))
            }
        }
    }

    /// Points recorded for a previously accepted receipt.
    pub fn points(&self, id: &str) -> Result<u64, ReceiptServiceError> {
        let id = id.trim();
        if id.is_empty() {
            warn!("points lookup rejected: missing receipt id");
            return Err(ReceiptServiceError::MissingIdentifier);
        }

        let id = ReceiptId(id.to_string());
        match self.store.points(&id) {
            Ok(points) => Ok(points),
            Err(StoreError::NotFound(id)) => {
                info!(%id, "points lookup missed");
                Err(ReceiptServiceError::NotFound { id })
            }
            Err(err) => {
                error!(%id, %err, "receipt store lookup failed");
                Err(ReceiptServiceError::Store(err))
            }
        }
    }

    /// Number of receipts admitted so far.
    pub fn stored_receipts(&self) -> Result<usize, ReceiptServiceError> {
        self.store.len().map_err(ReceiptServiceError::Store)
    }
}

/// Error raised by the receipt admission service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error("malformed receipt payload: {0}")]
    MalformedInput(String),
    #[error("invalid receipt: {0}")]
    Validation(#[from] ValidationError),
    #[error("receipt {id} has already been submitted")]
    DuplicateSubmission { id: ReceiptId },
    #[error("no receipt found for id {id}")]
    NotFound { id: ReceiptId },
    #[error("a receipt id is required")]
    MissingIdentifier,
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Store(StoreError),
}

impl ReceiptServiceError {
    /// Whether the failure was caused by the caller's input.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_) | Self::Validation(_) | Self::MissingIdentifier
        )
    }
}
