mod rules;

use serde::{Deserialize, Serialize};

use super::domain::Receipt;

/// Business rule that can contribute points to a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerAlphanumeric,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

/// Discrete contribution to a receipt's points, kept for audits and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub points: u64,
    pub notes: String,
}

/// Point total with the non-zero contributions that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub total: u64,
    pub components: Vec<ScoreComponent>,
}

impl ScoreOutcome {
    pub fn points_for(&self, rule: ScoringRule) -> u64 {
        self.components
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.points)
            .fold(0u64, u64::saturating_add)
    }
}

/// Loyalty points earned by a receipt.
///
/// Pure and deterministic. A numeric field that cannot be parsed contributes
/// zero for its own rule and leaves the other rules untouched. The total
/// saturates at `u64::MAX`.
pub fn score(receipt: &Receipt) -> u64 {
    score_breakdown(receipt).total
}

/// Same as [`score`], keeping each rule's contribution.
pub fn score_breakdown(receipt: &Receipt) -> ScoreOutcome {
    let (components, total) = rules::score_receipt(receipt);
    ScoreOutcome { total, components }
}
