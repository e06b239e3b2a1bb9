//! End-to-end behavior of the receipt admission pipeline through the public
//! service facade, including concurrent duplicate submissions.

use std::sync::{Arc, Barrier};
use std::thread;

use receipt_points::receipts::{
    derive_id, score, validate, InMemoryReceiptStore, ItemSubmission, ReceiptService,
    ReceiptServiceError, ReceiptStore, ReceiptSubmission,
};

fn submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "Walgreens".to_string(),
        purchase_date: "2022-01-03".to_string(),
        purchase_time: "15:13".to_string(),
        items: Some(vec![
            ItemSubmission {
                short_description: "Pepsi - 12-oz".to_string(),
                price: "1.25".to_string(),
            },
            ItemSubmission {
                short_description: "Dasani".to_string(),
                price: "1.40".to_string(),
            },
        ]),
        total: "2.65".to_string(),
    }
}

#[test]
fn concurrent_identical_submissions_admit_exactly_one() {
    const SUBMITTERS: usize = 32;
    let store = Arc::new(InMemoryReceiptStore::new());
    let service = ReceiptService::new(store.clone());
    let barrier = Arc::new(Barrier::new(SUBMITTERS));

    let handles: Vec<_> = (0..SUBMITTERS)
        .map(|_| {
            let service = service.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.submit(submission())
            })
        })
        .collect();

    let mut accepted = Vec::new();
    let mut duplicates = 0;
    for handle in handles {
        match handle.join().expect("submitter thread joins") {
            Ok(id) => accepted.push(id),
            Err(ReceiptServiceError::DuplicateSubmission { .. }) => duplicates += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(accepted.len(), 1);
    assert_eq!(duplicates, SUBMITTERS - 1);
    assert_eq!(store.len().expect("store readable"), 1);
}

#[test]
fn points_round_trip_matches_standalone_score() {
    let service = ReceiptService::new(Arc::new(InMemoryReceiptStore::new()));
    let receipt = validate(submission()).expect("fixture is valid");

    let id = service.submit(submission()).expect("receipt accepted");

    assert_eq!(id, derive_id(&receipt).expect("id derives"));
    // 9 retailer + 5 pair + 1 ("Dasani") + 6 odd day + 10 afternoon.
    assert_eq!(score(&receipt), 31);
    assert_eq!(service.points(id.as_str()).expect("points found"), 31);
}

#[test]
fn identifiers_follow_content_not_arrival() {
    let first = ReceiptService::new(Arc::new(InMemoryReceiptStore::new()));
    let second = ReceiptService::new(Arc::new(InMemoryReceiptStore::new()));

    let a = first.submit(submission()).expect("accepted");
    let b = second.submit(submission()).expect("accepted");
    assert_eq!(a, b, "separate stores derive the same id for the same receipt");

    let mut reordered = submission();
    if let Some(items) = reordered.items.as_mut() {
        items.reverse();
    }
    let c = first.submit(reordered).expect("reordered receipt is distinct");
    assert_ne!(a, c);
    assert_eq!(first.points(c.as_str()).expect("points found"), 31);
}

#[test]
fn lookup_errors_are_typed() {
    let service = ReceiptService::new(Arc::new(InMemoryReceiptStore::new()));

    assert!(matches!(
        service.points(""),
        Err(ReceiptServiceError::MissingIdentifier)
    ));
    assert!(matches!(
        service.points("404"),
        Err(ReceiptServiceError::NotFound { .. })
    ));
}
