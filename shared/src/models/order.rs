//! Sales order model and lifecycle state machine

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{mod97_check, parse_entity_sequence};

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Sequential identifier, e.g. "ORD-001"
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub items: Vec<OrderLine>,
    /// Derived: sum of quantity x unit price over all lines
    pub total_amount: Decimal,
    pub order_date: NaiveDate,
    pub expected_delivery: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

/// A single order line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Warehouse the stock was reserved from, recorded at creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl Order {
    /// Total amount over a set of order lines
    pub fn compute_total(items: &[OrderLine]) -> Decimal {
        items.iter().map(OrderLine::line_total).sum()
    }
}

/// Order lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    ReturnRequested,
}

impl OrderStatus {
    /// Legal transitions:
    /// pending -> processing -> shipped -> delivered, with
    /// pending|processing -> cancelled and delivered -> return_requested
    /// as side branches. Cancelled and return_requested are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
                | (Delivered, ReturnRequested)
        )
    }

    /// Whether the order may still be cancelled (pre-shipment only)
    pub fn is_cancellable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::ReturnRequested => "return_requested",
        };
        write!(f, "{}", s)
    }
}

/// Generate the tracking number for an order.
///
/// Deterministic and collision-free: the code embeds the order id plus
/// mod 97-10 check digits over its sequence number, e.g.
/// `TRK-ORD-002-92`.
pub fn generate_tracking_number(order_id: &str) -> String {
    let sequence = parse_entity_sequence(order_id).unwrap_or(0);
    format!("TRK-{}-{:02}", order_id, mod97_check(sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_is_sum_of_line_totals() {
        let items = vec![
            OrderLine {
                sku: "VEN-001".into(),
                name: "Steel Bolt M10".into(),
                quantity: 100,
                unit_price: dec!(2.50),
                warehouse: None,
            },
            OrderLine {
                sku: "VEN-002".into(),
                name: "Aluminum Sheet 1mm".into(),
                quantity: 5,
                unit_price: dec!(45.00),
                warehouse: None,
            },
        ];
        assert_eq!(Order::compute_total(&items), dec!(475.00));
    }

    #[test]
    fn happy_path_transitions_are_legal() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Delivered.can_transition_to(ReturnRequested));
    }

    #[test]
    fn shipped_orders_cannot_be_cancelled() {
        use OrderStatus::*;
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Shipped.is_cancellable());
        assert!(Pending.is_cancellable());
    }

    #[test]
    fn tracking_numbers_are_deterministic_and_distinct() {
        let a = generate_tracking_number("ORD-001");
        let b = generate_tracking_number("ORD-002");
        assert_eq!(a, generate_tracking_number("ORD-001"));
        assert_ne!(a, b);
        assert!(a.starts_with("TRK-ORD-001-"));
    }
}
