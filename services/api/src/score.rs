use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{
    derive_id, score_breakdown, validate, ReceiptId, ReceiptServiceError, ReceiptSubmission,
    ScoreComponent,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Receipt JSON file to score, or `-` to read from stdin
    pub(crate) receipt: PathBuf,
    /// Include the per-rule breakdown in the output
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) id: ReceiptId,
    pub(crate) points: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) components: Option<Vec<ScoreComponent>>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { receipt, breakdown } = args;

    let body = if receipt.as_os_str() == "-" {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        buffer
    } else {
        std::fs::read(&receipt)?
    };

    let report = build_score_report(&body, breakdown)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Validate and score a receipt without admitting it to any store.
pub(crate) fn build_score_report(body: &[u8], breakdown: bool) -> Result<ScoreReport, AppError> {
    let submission: ReceiptSubmission = serde_json::from_slice(body)
        .map_err(|err| ReceiptServiceError::MalformedInput(err.to_string()))?;
    let receipt = validate(submission).map_err(ReceiptServiceError::from)?;
    let id = derive_id(&receipt).map_err(ReceiptServiceError::from)?;
    let outcome = score_breakdown(&receipt);

    Ok(ScoreReport {
        id,
        points: outcome.total,
        components: breakdown.then_some(outcome.components),
    })
}
