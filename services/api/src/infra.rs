use metrics_exporter_prometheus::PrometheusHandle;
use receipt_points::receipts::{InMemoryReceiptStore, ReceiptService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One store per process, shared by every request through the service.
pub(crate) fn receipt_service() -> ReceiptService<InMemoryReceiptStore> {
    ReceiptService::new(Arc::new(InMemoryReceiptStore::new()))
}
