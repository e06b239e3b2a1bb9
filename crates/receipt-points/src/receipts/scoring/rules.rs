use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use tracing::debug;

use super::super::domain::{Item, Receipt};
use super::{ScoreComponent, ScoringRule};

pub(crate) const ROUND_DOLLAR_POINTS: u64 = 50;
pub(crate) const QUARTER_MULTIPLE_POINTS: u64 = 25;
pub(crate) const ITEM_PAIR_POINTS: u64 = 5;
pub(crate) const ODD_DAY_POINTS: u64 = 6;
pub(crate) const AFTERNOON_POINTS: u64 = 10;

// 20% of the price in whole points is price_cents / 500, rounded up.
const CENTS_PER_DESCRIPTION_POINT: u64 = 500;
const AFTERNOON_START_MINUTE: u32 = 14 * 60;
const AFTERNOON_END_MINUTE: u32 = 16 * 60;

/// Parse a `D.CC` amount into integer cents.
pub(crate) fn parse_cents(amount: &str) -> Option<u64> {
    let (dollars, cents) = amount.split_once('.')?;
    if dollars.is_empty()
        || cents.len() != 2
        || !dollars.bytes().all(|b| b.is_ascii_digit())
        || !cents.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let dollars: u64 = dollars.parse().ok()?;
    let cents: u64 = cents.parse().ok()?;
    dollars.checked_mul(100)?.checked_add(cents)
}

pub(crate) fn score_receipt(receipt: &Receipt) -> (Vec<ScoreComponent>, u64) {
    let mut components = Vec::new();

    retailer_points(&receipt.retailer, &mut components);
    total_points(&receipt.total, &mut components);
    item_pair_points(&receipt.items, &mut components);
    description_points(&receipt.items, &mut components);
    purchase_day_points(&receipt.purchase_date, &mut components);
    purchase_time_points(&receipt.purchase_time, &mut components);

    // Amounts have no upper bound, so the total saturates instead of wrapping.
    let total = components
        .iter()
        .map(|component| component.points)
        .fold(0u64, u64::saturating_add);
    (components, total)
}

fn retailer_points(retailer: &str, components: &mut Vec<ScoreComponent>) {
    let count = retailer
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .count() as u64;

    if count > 0 {
        components.push(ScoreComponent {
            rule: ScoringRule::RetailerAlphanumeric,
            points: count,
            notes: format!("{count} alphanumeric character(s) in '{retailer}'"),
        });
    }
}

fn total_points(total: &str, components: &mut Vec<ScoreComponent>) {
    let Some(cents) = parse_cents(total) else {
        debug!(total, "total is not a two-decimal amount; skipping total bonuses");
        return;
    };

    if cents % 100 == 0 {
        components.push(ScoreComponent {
            rule: ScoringRule::RoundDollarTotal,
            points: ROUND_DOLLAR_POINTS,
            notes: format!("total {total} is a round dollar amount"),
        });
    }
    if cents % 25 == 0 {
        components.push(ScoreComponent {
            rule: ScoringRule::QuarterMultipleTotal,
            points: QUARTER_MULTIPLE_POINTS,
            notes: format!("total {total} is a multiple of 0.25"),
        });
    }
}

fn item_pair_points(items: &[Item], components: &mut Vec<ScoreComponent>) {
    let pairs = (items.len() / 2) as u64;
    if pairs > 0 {
        components.push(ScoreComponent {
            rule: ScoringRule::ItemPairs,
            points: pairs.saturating_mul(ITEM_PAIR_POINTS),
            notes: format!("{pairs} pair(s) across {} item(s)", items.len()),
        });
    }
}

fn description_points(items: &[Item], components: &mut Vec<ScoreComponent>) {
    for (index, item) in items.iter().enumerate() {
        let trimmed = item.short_description.trim();
        if trimmed.chars().count() % 3 != 0 {
            continue;
        }

        let Some(price_cents) = parse_cents(&item.price) else {
            debug!(index, price = %item.price, "item price unparseable; skipping description bonus");
            continue;
        };

        let points = price_cents.div_ceil(CENTS_PER_DESCRIPTION_POINT);
        if points > 0 {
            components.push(ScoreComponent {
                rule: ScoringRule::ItemDescriptionLength,
                points,
                notes: format!(
                    "items[{index}] '{trimmed}' has a length divisible by 3; 20% of {} rounded up",
                    item.price
                ),
            });
        }
    }
}

fn purchase_day_points(purchase_date: &str, components: &mut Vec<ScoreComponent>) {
    let date = match NaiveDate::parse_from_str(purchase_date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(err) => {
            debug!(purchase_date, %err, "purchase date is not a calendar date; skipping day bonus");
            return;
        }
    };

    if date.day() % 2 == 1 {
        components.push(ScoreComponent {
            rule: ScoringRule::OddPurchaseDay,
            points: ODD_DAY_POINTS,
            notes: format!("purchased on odd day {}", date.day()),
        });
    }
}

fn purchase_time_points(purchase_time: &str, components: &mut Vec<ScoreComponent>) {
    let time = match NaiveTime::parse_from_str(purchase_time, "%H:%M") {
        Ok(time) => time,
        Err(err) => {
            debug!(purchase_time, %err, "purchase time unparseable; skipping afternoon bonus");
            return;
        }
    };

    let minute_of_day = time.hour() * 60 + time.minute();
    if minute_of_day > AFTERNOON_START_MINUTE && minute_of_day < AFTERNOON_END_MINUTE {
        components.push(ScoreComponent {
            rule: ScoringRule::AfternoonPurchase,
            points: AFTERNOON_POINTS,
            notes: format!("purchased at {purchase_time}, between 14:00 and 16:00"),
        });
    }
}
