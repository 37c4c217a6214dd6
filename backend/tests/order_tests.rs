//! Order lifecycle tests
//!
//! Covers the order status state machine, total computation, and
//! tracking number generation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use shared::models::{generate_tracking_number, Order, OrderLine, OrderStatus};

fn order_line(sku: &str, quantity: u32, unit_price: Decimal) -> OrderLine {
    OrderLine {
        sku: sku.into(),
        name: sku.into(),
        quantity,
        unit_price,
        warehouse: Some("Main Warehouse".into()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn total_amount_is_the_sum_of_line_totals() {
        let lines = vec![
            order_line("VEN-001", 100, dec!(2.50)),
            order_line("VEN-002", 5, dec!(45.00)),
        ];
        assert_eq!(Order::compute_total(&lines), dec!(475.00));
    }

    #[test]
    fn single_line_order_total() {
        let lines = vec![order_line("VEN-001", 100, dec!(2.50))];
        assert_eq!(Order::compute_total(&lines), dec!(250.00));
    }

    #[test]
    fn the_happy_path_runs_pending_to_delivered() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Delivered.can_transition_to(ReturnRequested));
    }

    #[test]
    fn orders_cannot_skip_lifecycle_stages() {
        use OrderStatus::*;
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Processing.can_transition_to(Delivered));
        assert!(!Shipped.can_transition_to(Processing));
    }

    #[test]
    fn only_pre_shipment_orders_are_cancellable() {
        use OrderStatus::*;
        assert!(Pending.is_cancellable());
        assert!(Processing.is_cancellable());
        assert!(!Shipped.is_cancellable());
        assert!(!Delivered.is_cancellable());
        assert!(!Cancelled.is_cancellable());
    }

    #[test]
    fn terminal_states_have_no_exits() {
        use OrderStatus::*;
        for next in [Pending, Processing, Shipped, Delivered, Cancelled, ReturnRequested] {
            assert!(!Cancelled.can_transition_to(next));
            assert!(!ReturnRequested.can_transition_to(next));
        }
    }

    #[test]
    fn tracking_numbers_embed_the_order_id_and_check_digits() {
        assert_eq!(generate_tracking_number("ORD-002"), "TRK-ORD-002-92");
        assert_eq!(
            generate_tracking_number("ORD-002"),
            generate_tracking_number("ORD-002")
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = OrderStatus> {
        use OrderStatus::*;
        prop_oneof![
            Just(Pending),
            Just(Processing),
            Just(Shipped),
            Just(Delivered),
            Just(Cancelled),
            Just(ReturnRequested),
        ]
    }

    fn quantity_strategy() -> impl Strategy<Value = u32> {
        1u32..=1000
    }

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Total = sum over lines of quantity x unit price.
        #[test]
        fn prop_total_matches_manual_sum(
            lines in prop::collection::vec((quantity_strategy(), price_strategy()), 1..10)
        ) {
            let order_lines: Vec<OrderLine> = lines
                .iter()
                .map(|(qty, price)| order_line("VEN-001", *qty, *price))
                .collect();

            let expected: Decimal = lines
                .iter()
                .map(|(qty, price)| Decimal::from(*qty) * price)
                .sum();

            prop_assert_eq!(Order::compute_total(&order_lines), expected);
        }

        /// Cancellation is only reachable from cancellable states.
        #[test]
        fn prop_cancel_transition_agrees_with_is_cancellable(status in status_strategy()) {
            prop_assert_eq!(
                status.can_transition_to(OrderStatus::Cancelled),
                status.is_cancellable()
            );
        }

        /// Tracking numbers are deterministic and distinct across orders.
        #[test]
        fn prop_tracking_numbers_distinct_per_order(a in 1u64..999, b in 1u64..999) {
            let id_a = format!("ORD-{:03}", a);
            let id_b = format!("ORD-{:03}", b);

            prop_assert_eq!(
                generate_tracking_number(&id_a),
                generate_tracking_number(&id_a)
            );
            if a != b {
                prop_assert_ne!(
                    generate_tracking_number(&id_a),
                    generate_tracking_number(&id_b)
                );
            }
        }
    }
}
