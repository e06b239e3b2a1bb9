use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{ItemSubmission, ReceiptId, ReceiptSubmission, StoredReceipt};
use crate::receipts::service::ReceiptService;
use crate::receipts::store::{InMemoryReceiptStore, ReceiptStore, StoreError};
use crate::receipts::validation::validate;
use crate::receipts::Receipt;

pub(super) fn item(description: &str, price: &str) -> ItemSubmission {
    ItemSubmission {
        short_description: description.to_string(),
        price: price.to_string(),
    }
}

/// Four Gatorades at the corner market, worth 109 points.
pub(super) fn corner_market_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        items: Some(vec![
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
        ]),
        total: "9.00".to_string(),
    }
}

/// Five-item Target run, worth 28 points.
pub(super) fn target_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: Some(vec![
            item("Mountain Dew 12PK", "6.49"),
            item("Emils Cheese Pizza", "12.25"),
            item("Knorr Creamy Chicken", "1.26"),
            item("Doritos Nacho Cheese", "3.35"),
            item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ]),
        total: "35.35".to_string(),
    }
}

/// Single Pepsi at Target, worth 12 points.
pub(super) fn single_pepsi_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: Some(vec![item("Pepsi - 12-oz", "1.25")]),
        total: "35.35".to_string(),
    }
}

pub(super) fn valid(submission: ReceiptSubmission) -> Receipt {
    validate(submission).expect("fixture is valid")
}

pub(super) fn build_service() -> (
    ReceiptService<InMemoryReceiptStore>,
    Arc<InMemoryReceiptStore>,
) {
    let store = Arc::new(InMemoryReceiptStore::new());
    let service = ReceiptService::new(store.clone());
    (service, store)
}

/// Store that fails every operation, standing in for an unhealthy backend.
pub(super) struct UnavailableStore;

impl ReceiptStore for UnavailableStore {
    fn insert_if_absent(&self, _record: StoredReceipt) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn points(&self, _id: &ReceiptId) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn len(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

/// Store that panics if touched; proves a code path never reaches storage.
pub(super) struct UntouchableStore;

impl ReceiptStore for UntouchableStore {
    fn insert_if_absent(&self, _record: StoredReceipt) -> Result<(), StoreError> {
        panic!("store must not be touched");
    }

    fn points(&self, _id: &ReceiptId) -> Result<u64, StoreError> {
        panic!("store must not be touched");
    }

    fn len(&self) -> Result<usize, StoreError> {
        panic!("store must not be touched");
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
