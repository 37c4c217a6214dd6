//! Warehouse fulfillment tests
//!
//! Covers pick list status derivation and inbound overdue computation.

use chrono::NaiveDate;
use proptest::prelude::*;

use shared::models::{
    InboundLine, InboundShipment, InboundStatus, PickLine, PickList, PickListStatus, PickPriority,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pick_line(sku: &str, picked: bool) -> PickLine {
    PickLine {
        sku: sku.into(),
        name: sku.into(),
        quantity: 10,
        location: "WH-A-001".into(),
        warehouse: "Main Warehouse".into(),
        picked,
        picked_quantity: if picked { 10 } else { 0 },
    }
}

fn pick_list(items: Vec<PickLine>) -> PickList {
    PickList {
        id: "PL-001".into(),
        order_id: "ORD-001".into(),
        status: PickListStatus::Pending,
        priority: PickPriority::High,
        created_date: day(2024, 1, 15),
        completed_date: None,
        assigned_to: "Warehouse Team A".into(),
        items,
    }
}

fn shipment(status: InboundStatus, expected: NaiveDate) -> InboundShipment {
    InboundShipment {
        id: "IB-001".into(),
        purchase_order: "PO-2024-001".into(),
        supplier: "Steel Suppliers Inc".into(),
        expected_date: expected,
        received_date: None,
        status,
        items: vec![InboundLine {
            sku: "VEN-001".into(),
            name: "Steel Bolt M10".into(),
            warehouse: "Main Warehouse".into(),
            expected_quantity: 1000,
            received_quantity: 0,
        }],
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn nothing_picked_means_pending() {
        let pl = pick_list(vec![pick_line("VEN-001", false), pick_line("VEN-002", false)]);
        assert_eq!(pl.derived_status(), PickListStatus::Pending);
    }

    #[test]
    fn some_lines_picked_means_in_progress() {
        let pl = pick_list(vec![pick_line("VEN-001", true), pick_line("VEN-002", false)]);
        assert_eq!(pl.derived_status(), PickListStatus::InProgress);
    }

    #[test]
    fn all_lines_picked_means_completed() {
        let pl = pick_list(vec![pick_line("VEN-001", true), pick_line("VEN-002", true)]);
        assert_eq!(pl.derived_status(), PickListStatus::Completed);
    }

    #[test]
    fn expected_shipments_turn_overdue_after_their_date() {
        let s = shipment(InboundStatus::Expected, day(2024, 1, 20));
        assert_eq!(s.effective_status(day(2024, 1, 20)), InboundStatus::Expected);
        assert_eq!(s.effective_status(day(2024, 1, 21)), InboundStatus::Overdue);
    }

    #[test]
    fn received_shipments_never_turn_overdue() {
        let s = shipment(InboundStatus::Received, day(2024, 1, 20));
        assert_eq!(s.effective_status(day(2030, 1, 1)), InboundStatus::Received);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Completed iff every line picked; in progress iff some but not all.
        #[test]
        fn prop_pick_status_matches_line_flags(
            flags in prop::collection::vec(any::<bool>(), 1..12)
        ) {
            let lines: Vec<PickLine> = flags
                .iter()
                .enumerate()
                .map(|(i, picked)| pick_line(&format!("VEN-{:03}", i + 1), *picked))
                .collect();
            let pl = pick_list(lines);

            let expected = if flags.iter().all(|p| *p) {
                PickListStatus::Completed
            } else if flags.iter().any(|p| *p) {
                PickListStatus::InProgress
            } else {
                PickListStatus::Pending
            };
            prop_assert_eq!(pl.derived_status(), expected);
        }

        /// Overdue is a pure function of the expected date for expected
        /// shipments.
        #[test]
        fn prop_overdue_depends_only_on_the_date(offset in -30i64..30) {
            let expected = day(2024, 6, 15);
            let s = shipment(InboundStatus::Expected, expected);
            let today = expected + chrono::Duration::days(offset);

            let status = s.effective_status(today);
            if offset > 0 {
                prop_assert_eq!(status, InboundStatus::Overdue);
            } else {
                prop_assert_eq!(status, InboundStatus::Expected);
            }
        }
    }
}
