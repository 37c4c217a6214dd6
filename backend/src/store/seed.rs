//! Seed fixtures for the in-memory store
//!
//! The single source of demo data: items, orders, quotations, the warehouse
//! pipeline, customers, and the demo user accounts. Everything the API serves
//! on a fresh start originates here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::models::{
    Customer, CustomerStatus, DispatchLine, DispatchRecord, DispatchStatus, InboundLine,
    InboundShipment, InboundStatus, Item, Order, OrderLine, OrderStatus, PickLine, PickList,
    PickListStatus, PickPriority, Quotation, QuotationLine, QuotationStatus, Role, StockLevel,
    User,
};

use super::{StoreInner, UserAccount};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Build the demo store. `demo_password` becomes the password of every
/// seeded account (bcrypt-hashed once).
pub fn demo(demo_password: &str) -> StoreInner {
    let mut inner = StoreInner::default();

    seed_items(&mut inner);
    seed_orders(&mut inner);
    seed_quotations(&mut inner);
    seed_warehouse(&mut inner);
    seed_customers(&mut inner);
    seed_users(&mut inner, demo_password);

    inner
}

fn seed_items(inner: &mut StoreInner) {
    let items = vec![
        Item {
            sku: "VEN-001".into(),
            name: "Steel Bolt M10".into(),
            category: "Fasteners".into(),
            description: Some("High-grade steel bolt, M10 threading".into()),
            unit_price: price(250),
            reorder_level: 500,
            warehouses: vec![
                StockLevel::new("Main Warehouse", "WH-A-001", 1200, 150),
                StockLevel::new("Component Warehouse", "WH-C-001", 300, 50),
            ],
        },
        Item {
            sku: "VEN-002".into(),
            name: "Aluminum Sheet 1mm".into(),
            category: "Raw Materials".into(),
            description: Some("1mm thick aluminum sheet, 4x8 feet".into()),
            unit_price: price(4500),
            reorder_level: 20,
            warehouses: vec![StockLevel::new("Main Warehouse", "WH-B-012", 85, 15)],
        },
        Item {
            sku: "VEN-003".into(),
            name: "Motor Assembly 3HP".into(),
            category: "Components".into(),
            description: Some("3 Horsepower electric motor assembly".into()),
            unit_price: price(27500),
            reorder_level: 10,
            warehouses: vec![StockLevel::new("Component Warehouse", "WH-C-005", 25, 5)],
        },
        Item {
            sku: "VEN-004".into(),
            name: "Hydraulic Cylinder".into(),
            category: "Components".into(),
            description: Some("Double-acting hydraulic cylinder, 2\" bore".into()),
            unit_price: price(18500),
            reorder_level: 15,
            warehouses: vec![
                StockLevel::new("Main Warehouse", "WH-A-015", 8, 2),
                StockLevel::new("Component Warehouse", "WH-C-010", 12, 0),
            ],
        },
        Item {
            sku: "VEN-005".into(),
            name: "Stainless Steel Pipe 2\"".into(),
            category: "Raw Materials".into(),
            description: Some("2 inch diameter stainless steel pipe, 10 feet".into()),
            unit_price: price(2875),
            reorder_level: 50,
            warehouses: vec![StockLevel::new("Main Warehouse", "WH-B-005", 0, 0)],
        },
    ];

    for item in items {
        inner.insert_item(item);
    }
}

fn seed_orders(inner: &mut StoreInner) {
    inner.insert_order(Order {
        id: "ORD-001".into(),
        customer_id: "CUST-001".into(),
        customer_name: "ABC Manufacturing".into(),
        status: OrderStatus::Pending,
        items: vec![
            OrderLine {
                sku: "VEN-001".into(),
                name: "Steel Bolt M10".into(),
                quantity: 100,
                unit_price: price(250),
                warehouse: Some("Main Warehouse".into()),
            },
            OrderLine {
                sku: "VEN-002".into(),
                name: "Aluminum Sheet 1mm".into(),
                quantity: 5,
                unit_price: price(4500),
                warehouse: Some("Main Warehouse".into()),
            },
        ],
        total_amount: price(47500),
        order_date: date(2024, 1, 15),
        expected_delivery: date(2024, 1, 22),
        shipping_address: Some("123 Industrial Ave, Manufacturing City, MC 12345".into()),
        shipped_date: None,
        tracking_number: None,
    });

    inner.insert_order(Order {
        id: "ORD-002".into(),
        customer_id: "CUST-002".into(),
        customer_name: "XYZ Industries".into(),
        status: OrderStatus::Shipped,
        items: vec![OrderLine {
            sku: "VEN-003".into(),
            name: "Motor Assembly 3HP".into(),
            quantity: 2,
            unit_price: price(27500),
            warehouse: Some("Component Warehouse".into()),
        }],
        total_amount: price(55000),
        order_date: date(2024, 1, 10),
        expected_delivery: date(2024, 1, 18),
        shipping_address: Some("456 Factory Blvd, Industrial Park, IP 67890".into()),
        shipped_date: Some(date(2024, 1, 14)),
        tracking_number: Some("TRK-ORD-002-92".into()),
    });
}

fn seed_quotations(inner: &mut StoreInner) {
    inner.insert_quotation(Quotation {
        id: "QUOT-001".into(),
        customer_id: "CUST-001".into(),
        customer_name: "ABC Manufacturing".into(),
        status: QuotationStatus::Pending,
        items: vec![
            QuotationLine {
                sku: "VEN-001".into(),
                name: "Steel Bolt M10".into(),
                quantity: 200,
                unit_price: price(250),
                total_price: price(50000),
            },
            QuotationLine {
                sku: "VEN-003".into(),
                name: "Motor Assembly 3HP".into(),
                quantity: 3,
                unit_price: price(27500),
                total_price: price(82500),
            },
        ],
        subtotal: price(132500),
        tax: price(10600),
        total_amount: price(143100),
        valid_until: date(2024, 2, 15),
        created_date: date(2024, 1, 15),
        approved_date: None,
        converted_order_id: None,
        notes: "Bulk discount applied for steel bolts".into(),
    });

    inner.insert_quotation(Quotation {
        id: "QUOT-002".into(),
        customer_id: "CUST-003".into(),
        customer_name: "DEF Corporation".into(),
        status: QuotationStatus::Approved,
        items: vec![QuotationLine {
            sku: "VEN-002".into(),
            name: "Aluminum Sheet 1mm".into(),
            quantity: 10,
            unit_price: price(4500),
            total_price: price(45000),
        }],
        subtotal: price(45000),
        tax: price(3600),
        total_amount: price(48600),
        valid_until: date(2024, 2, 20),
        created_date: date(2024, 1, 18),
        approved_date: Some(date(2024, 1, 20)),
        converted_order_id: None,
        notes: "Standard pricing applied".into(),
    });
}

fn seed_warehouse(inner: &mut StoreInner) {
    inner.insert_inbound(InboundShipment {
        id: "IB-001".into(),
        purchase_order: "PO-2024-001".into(),
        supplier: "Steel Suppliers Inc".into(),
        expected_date: date(2024, 1, 20),
        received_date: None,
        status: InboundStatus::Expected,
        items: vec![InboundLine {
            sku: "VEN-001".into(),
            name: "Steel Bolt M10".into(),
            warehouse: "Main Warehouse".into(),
            expected_quantity: 1000,
            received_quantity: 0,
        }],
    });

    inner.insert_inbound(InboundShipment {
        id: "IB-002".into(),
        purchase_order: "PO-2024-002".into(),
        supplier: "Aluminum Works Ltd".into(),
        expected_date: date(2024, 1, 18),
        received_date: Some(date(2024, 1, 18)),
        status: InboundStatus::Received,
        items: vec![InboundLine {
            sku: "VEN-002".into(),
            name: "Aluminum Sheet 1mm".into(),
            warehouse: "Main Warehouse".into(),
            expected_quantity: 50,
            received_quantity: 50,
        }],
    });

    inner.insert_inbound(InboundShipment {
        id: "IB-003".into(),
        purchase_order: "PO-2024-003".into(),
        supplier: "Motor Manufacturers Co".into(),
        expected_date: date(2024, 1, 16),
        received_date: None,
        status: InboundStatus::Expected,
        items: vec![InboundLine {
            sku: "VEN-003".into(),
            name: "Motor Assembly 3HP".into(),
            warehouse: "Component Warehouse".into(),
            expected_quantity: 10,
            received_quantity: 0,
        }],
    });

    inner.insert_inbound(InboundShipment {
        id: "IB-004".into(),
        purchase_order: "PO-2024-004".into(),
        supplier: "Steel Suppliers Inc".into(),
        expected_date: date(2024, 1, 25),
        received_date: None,
        status: InboundStatus::Expected,
        items: vec![InboundLine {
            sku: "VEN-005".into(),
            name: "Stainless Steel Pipe 2\"".into(),
            warehouse: "Main Warehouse".into(),
            expected_quantity: 100,
            received_quantity: 0,
        }],
    });

    inner.insert_pick_list(PickList {
        id: "PL-001".into(),
        order_id: "ORD-001".into(),
        status: PickListStatus::Pending,
        priority: PickPriority::High,
        created_date: date(2024, 1, 15),
        completed_date: None,
        assigned_to: "Warehouse Team A".into(),
        items: vec![
            PickLine {
                sku: "VEN-001".into(),
                name: "Steel Bolt M10".into(),
                quantity: 100,
                location: "WH-A-001".into(),
                warehouse: "Main Warehouse".into(),
                picked: false,
                picked_quantity: 0,
            },
            PickLine {
                sku: "VEN-002".into(),
                name: "Aluminum Sheet 1mm".into(),
                quantity: 5,
                location: "WH-B-012".into(),
                warehouse: "Main Warehouse".into(),
                picked: false,
                picked_quantity: 0,
            },
        ],
    });

    inner.insert_pick_list(PickList {
        id: "PL-002".into(),
        order_id: "ORD-002".into(),
        status: PickListStatus::Completed,
        priority: PickPriority::Medium,
        created_date: date(2024, 1, 10),
        completed_date: Some(date(2024, 1, 12)),
        assigned_to: "Warehouse Team B".into(),
        items: vec![PickLine {
            sku: "VEN-003".into(),
            name: "Motor Assembly 3HP".into(),
            quantity: 2,
            location: "WH-C-005".into(),
            warehouse: "Component Warehouse".into(),
            picked: true,
            picked_quantity: 2,
        }],
    });

    inner.insert_dispatch(DispatchRecord {
        id: "DISP-001".into(),
        order_id: "ORD-002".into(),
        pick_list_id: "PL-002".into(),
        customer_name: "XYZ Industries".into(),
        status: DispatchStatus::Ready,
        packaged_date: date(2024, 1, 12),
        shipping_method: Some("Express".into()),
        tracking_number: None,
        shipped_date: None,
        items: vec![DispatchLine {
            sku: "VEN-003".into(),
            name: "Motor Assembly 3HP".into(),
            quantity: 2,
        }],
    });
}

fn seed_customers(inner: &mut StoreInner) {
    let customers = vec![
        Customer {
            id: "CUST-001".into(),
            name: "ABC Manufacturing".into(),
            email: "contact@abcmfg.com".into(),
            phone: "+1-555-0101".into(),
            address: "123 Industrial Ave, Manufacturing City, MC 12345".into(),
            status: CustomerStatus::Active,
            credit_limit: price(5_000_000),
            current_balance: price(500_000),
            join_date: date(2023, 6, 15),
        },
        Customer {
            id: "CUST-002".into(),
            name: "XYZ Industries".into(),
            email: "orders@xyzind.com".into(),
            phone: "+1-555-0102".into(),
            address: "456 Factory Blvd, Industrial Park, IP 67890".into(),
            status: CustomerStatus::Active,
            credit_limit: price(7_500_000),
            current_balance: price(1_250_000),
            join_date: date(2023, 8, 20),
        },
        Customer {
            id: "CUST-003".into(),
            name: "DEF Corporation".into(),
            email: "procurement@defcorp.com".into(),
            phone: "+1-555-0103".into(),
            address: "789 Business Dr, Commerce Center, CC 13579".into(),
            status: CustomerStatus::Active,
            credit_limit: price(10_000_000),
            current_balance: price(875_000),
            join_date: date(2023, 10, 10),
        },
    ];

    for customer in customers {
        inner.insert_customer(customer);
    }
}

fn seed_users(inner: &mut StoreInner, demo_password: &str) {
    // One hash shared by the demo accounts; hashing per account would slow
    // startup for no gain since the password is the same.
    let password_hash =
        bcrypt::hash(demo_password, bcrypt::DEFAULT_COST).expect("bcrypt hash of seed password");

    let users = vec![
        ("sales@venus.com", "Sales User", Role::Sales, None),
        ("warehouse@venus.com", "Warehouse User", Role::Warehouse, None),
        (
            "customer@venus.com",
            "Customer User",
            Role::Customer,
            Some("CUST-001".to_string()),
        ),
        ("admin@venus.com", "Admin User", Role::Admin, None),
    ];

    for (email, name, role, customer_id) in users {
        inner.insert_user(UserAccount {
            user: User {
                id: Uuid::new_v4(),
                email: email.into(),
                name: name.into(),
                role,
                customer_id,
            },
            password_hash: password_hash.clone(),
        });
    }
}
