//! Role capability tests
//!
//! Covers the role x resource x action capability map enforced before
//! every mutating call.

use proptest::prelude::*;

use shared::models::{Action, Resource, Role};

const ALL_RESOURCES: [Resource; 6] = [
    Resource::Items,
    Resource::Orders,
    Resource::Quotations,
    Resource::Warehouse,
    Resource::Customers,
    Resource::Dashboard,
];

const ALL_ACTIONS: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn admin_can_do_everything() {
        for resource in ALL_RESOURCES {
            for action in ALL_ACTIONS {
                assert!(Role::Admin.permits(resource, action));
            }
        }
    }

    #[test]
    fn sales_owns_the_commercial_surface_but_not_the_warehouse() {
        assert!(Role::Sales.permits(Resource::Orders, Action::Create));
        assert!(Role::Sales.permits(Resource::Quotations, Action::Edit));
        assert!(Role::Sales.permits(Resource::Customers, Action::Create));
        assert!(Role::Sales.permits(Resource::Warehouse, Action::View));
        assert!(!Role::Sales.permits(Resource::Warehouse, Action::Edit));
        assert!(!Role::Sales.permits(Resource::Items, Action::Create));
    }

    #[test]
    fn warehouse_runs_fulfillment_but_not_sales() {
        assert!(Role::Warehouse.permits(Resource::Warehouse, Action::Edit));
        assert!(Role::Warehouse.permits(Resource::Items, Action::Edit));
        assert!(Role::Warehouse.permits(Resource::Orders, Action::View));
        assert!(!Role::Warehouse.permits(Resource::Orders, Action::Create));
        assert!(!Role::Warehouse.permits(Resource::Quotations, Action::View));
        assert!(!Role::Warehouse.permits(Resource::Customers, Action::View));
    }

    #[test]
    fn customers_can_order_but_not_operate() {
        assert!(Role::Customer.permits(Resource::Orders, Action::Create));
        assert!(Role::Customer.permits(Resource::Quotations, Action::View));
        assert!(Role::Customer.permits(Resource::Items, Action::View));
        assert!(!Role::Customer.permits(Resource::Warehouse, Action::View));
        assert!(!Role::Customer.permits(Resource::Items, Action::Edit));
        assert!(!Role::Customer.permits(Resource::Dashboard, Action::View));
        assert!(!Role::Customer.permits(Resource::Orders, Action::Delete));
    }

    #[test]
    fn roles_round_trip_through_their_string_form() {
        for role in [Role::Admin, Role::Sales, Role::Warehouse, Role::Customer] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::Admin),
            Just(Role::Sales),
            Just(Role::Warehouse),
            Just(Role::Customer),
        ]
    }

    fn resource_strategy() -> impl Strategy<Value = Resource> {
        prop::sample::select(ALL_RESOURCES.to_vec())
    }

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop::sample::select(ALL_ACTIONS.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// No role other than admin exceeds admin's capabilities.
        #[test]
        fn prop_admin_is_an_upper_bound(
            role in role_strategy(),
            resource in resource_strategy(),
            action in action_strategy()
        ) {
            if role.permits(resource, action) {
                prop_assert!(Role::Admin.permits(resource, action));
            }
        }

        /// Any role that can mutate a resource can also view it.
        #[test]
        fn prop_mutation_implies_view(
            role in role_strategy(),
            resource in resource_strategy()
        ) {
            let mutates = [Action::Create, Action::Edit, Action::Delete]
                .iter()
                .any(|a| role.permits(resource, *a));
            if mutates {
                prop_assert!(role.permits(resource, Action::View));
            }
        }
    }
}
