use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use super::domain::{PointsView, ReceiptAccepted};
use super::service::ReceiptService;
use super::store::ReceiptStore;
use crate::error::AppError;

/// Router builder exposing receipt submission and points lookup.
pub fn receipt_router<S>(service: ReceiptService<S>) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<S>))
        .route("/receipts/:id/points", get(points_handler::<S>))
        .with_state(service)
}

// The body is taken as raw bytes so that unparseable JSON maps to 400 like any
// other caller error.
pub(crate) async fn process_handler<S>(
    State(service): State<ReceiptService<S>>,
    body: Bytes,
) -> Result<Json<ReceiptAccepted>, AppError>
where
    S: ReceiptStore + 'static,
{
    let id = service.submit_json(&body)?;
    Ok(Json(ReceiptAccepted { id }))
}

pub(crate) async fn points_handler<S>(
    State(service): State<ReceiptService<S>>,
    Path(id): Path<String>,
) -> Result<Json<PointsView>, AppError>
where
    S: ReceiptStore + 'static,
{
    let points = service.points(&id)?;
    Ok(Json(PointsView { points }))
}
