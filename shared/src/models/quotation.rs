//! Quotation model and lifecycle

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days a quotation stays valid after creation
pub const QUOTATION_VALIDITY_DAYS: i64 = 30;

/// Flat sales tax rate applied to quotations (8%)
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// A sales quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    /// Sequential identifier, e.g. "QUOT-001"
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub status: QuotationStatus,
    pub items: Vec<QuotationLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total_amount: Decimal,
    pub valid_until: NaiveDate,
    pub created_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<NaiveDate>,
    /// Set once the quotation has been converted; blocks re-conversion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_order_id: Option<String>,
    pub notes: String,
}

/// A single quotation line with its derived total
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationLine {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Quotation lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuotationStatus::Pending => "pending",
            QuotationStatus::Approved => "approved",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

impl Quotation {
    /// Subtotal, tax and total for a set of lines
    pub fn compute_amounts(items: &[QuotationLine]) -> (Decimal, Decimal, Decimal) {
        let subtotal: Decimal = items.iter().map(|line| line.total_price).sum();
        let tax = subtotal * tax_rate();
        (subtotal, tax, subtotal + tax)
    }

    /// Status as of `today`. Expiry is computed, not stored: pending and
    /// approved quotations whose validity window has passed report
    /// `expired`.
    pub fn effective_status(&self, today: NaiveDate) -> QuotationStatus {
        match self.status {
            QuotationStatus::Pending | QuotationStatus::Approved if today > self.valid_until => {
                QuotationStatus::Expired
            }
            status => status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(sku: &str, quantity: u32, unit_price: Decimal) -> QuotationLine {
        QuotationLine {
            sku: sku.into(),
            name: sku.into(),
            quantity,
            unit_price,
            total_price: unit_price * Decimal::from(quantity),
        }
    }

    #[test]
    fn amounts_apply_eight_percent_tax() {
        let items = vec![line("VEN-001", 200, dec!(2.50)), line("VEN-003", 3, dec!(275.00))];
        let (subtotal, tax, total) = Quotation::compute_amounts(&items);
        assert_eq!(subtotal, dec!(1325.00));
        assert_eq!(tax, dec!(106.0000));
        assert_eq!(total, dec!(1431.0000));
    }

    #[test]
    fn pending_quotation_expires_after_valid_until() {
        let quotation = Quotation {
            id: "QUOT-001".into(),
            customer_id: "CUST-001".into(),
            customer_name: "ABC Manufacturing".into(),
            status: QuotationStatus::Pending,
            items: vec![],
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            valid_until: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            created_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            approved_date: None,
            converted_order_id: None,
            notes: String::new(),
        };

        let before = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 2, 16).unwrap();
        assert_eq!(quotation.effective_status(before), QuotationStatus::Pending);
        assert_eq!(quotation.effective_status(after), QuotationStatus::Expired);
    }

    #[test]
    fn rejected_status_is_never_rewritten_to_expired() {
        let quotation = Quotation {
            id: "QUOT-002".into(),
            customer_id: "CUST-002".into(),
            customer_name: "XYZ Industries".into(),
            status: QuotationStatus::Rejected,
            items: vec![],
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            valid_until: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            created_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            approved_date: None,
            converted_order_id: None,
            notes: String::new(),
        };

        let long_after = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(quotation.effective_status(long_after), QuotationStatus::Rejected);
    }
}
