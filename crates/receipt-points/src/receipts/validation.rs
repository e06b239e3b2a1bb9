use once_cell::sync::Lazy;
use regex::Regex;

use super::domain::{Item, ItemSubmission, Receipt, ReceiptSubmission};

// Grammars are syntactic only; calendar correctness is not checked here.
static RETAILER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+").expect("Invalid retailer regex"));

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-2][0-9]{3}-[0-1][0-9]-[0-3][0-9]$").expect("Invalid date regex")
});

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid time regex"));

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("Invalid amount regex"));

static DESCRIPTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?-u:[\w\t\n\f\r \-])+$").expect("Invalid description regex"));

/// First grammar violation found on a submitted receipt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("retailer must contain at least one non-whitespace character")]
    Retailer,
    #[error("purchaseDate '{0}' must be formatted as YYYY-MM-DD")]
    PurchaseDate(String),
    #[error("purchaseTime '{0}' must be a 24-hour HH:MM time")]
    PurchaseTime(String),
    #[error("total '{0}' must be a decimal amount with two fractional digits")]
    Total(String),
    #[error("items[{index}].price '{value}' must be a decimal amount with two fractional digits")]
    ItemPrice { index: usize, value: String },
    #[error("items[{index}].shortDescription '{value}' may only contain letters, digits, underscores, whitespace, and hyphens")]
    ItemDescription { index: usize, value: String },
}

impl ValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Retailer => "retailer",
            Self::PurchaseDate(_) => "purchaseDate",
            Self::PurchaseTime(_) => "purchaseTime",
            Self::Total(_) => "total",
            Self::ItemPrice { .. } => "price",
            Self::ItemDescription { .. } => "shortDescription",
        }
    }
}

/// Check a submission against the receipt grammars, stopping at the first failure.
///
/// Header fields are checked in wire order (retailer, date, time, total), then
/// each item's price and description in item order.
pub fn validate(submission: ReceiptSubmission) -> Result<Receipt, ValidationError> {
    let ReceiptSubmission {
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    } = submission;

    if !RETAILER_PATTERN.is_match(&retailer) {
        return Err(ValidationError::Retailer);
    }
    if !DATE_PATTERN.is_match(&purchase_date) {
        return Err(ValidationError::PurchaseDate(purchase_date));
    }
    if !TIME_PATTERN.is_match(&purchase_time) {
        return Err(ValidationError::PurchaseTime(purchase_time));
    }
    if !AMOUNT_PATTERN.is_match(&total) {
        return Err(ValidationError::Total(total));
    }

    let items = items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Receipt {
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    })
}

fn validate_item(index: usize, item: ItemSubmission) -> Result<Item, ValidationError> {
    let ItemSubmission {
        short_description,
        price,
    } = item;

    if !AMOUNT_PATTERN.is_match(&price) {
        return Err(ValidationError::ItemPrice {
            index,
            value: price,
        });
    }
    if !DESCRIPTION_PATTERN.is_match(&short_description) {
        return Err(ValidationError::ItemDescription {
            index,
            value: short_description,
        });
    }

    Ok(Item {
        short_description,
        price,
    })
}
