use investor_form::error::AppError;
use investor_form::workflows::new_account::InvestmentDetails;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn read_record(path: &Path) -> Result<InvestmentDetails, AppError> {
    let raw = fs::read_to_string(path)?;
    parse_record(&raw)
}

pub(crate) fn parse_record(raw: &str) -> Result<InvestmentDetails, AppError> {
    Ok(serde_json::from_str(raw)?)
}
