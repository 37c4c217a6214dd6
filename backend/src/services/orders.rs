//! Order service: creation, lifecycle transitions, cancellation
//!
//! Creating an order reserves stock line by line; cancelling releases it.
//! Both run under a single store lock, so the reservation and the order
//! record can never diverge.

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{generate_tracking_number, Order, OrderLine, OrderStatus};
use shared::validation::validate_quantity;

use crate::error::{AppError, AppResult};
use crate::store::{Store, StoreInner};

/// Days between order placement and expected delivery
const DELIVERY_LEAD_DAYS: i64 = 7;

/// Order service
#[derive(Clone)]
pub struct OrderService {
    store: Store,
}

/// Input for creating an order
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    pub customer_id: String,
    pub customer_name: String,
    pub items: Vec<OrderLineInput>,
    pub shipping_address: Option<String>,
}

/// A requested order line. The unit price defaults to the catalog price
/// when not quoted explicitly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Option<Decimal>,
}

/// Input for updating an order's status
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusInput {
    pub status: OrderStatus,
}

/// List filters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<String>,
}

impl OrderService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List orders, optionally filtered by status and/or customer
    pub async fn list(&self, filter: OrderFilter) -> AppResult<Vec<Order>> {
        let inner = self.store.read().await;
        Ok(inner
            .orders
            .values()
            .filter(|order| filter.status.map_or(true, |s| order.status == s))
            .filter(|order| {
                filter
                    .customer_id
                    .as_deref()
                    .map_or(true, |c| order.customer_id == c)
            })
            .cloned()
            .collect())
    }

    /// Get an order by id
    pub async fn get(&self, id: &str) -> AppResult<Order> {
        let inner = self.store.read().await;
        inner
            .orders
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Order".to_string()))
    }

    /// Create an order, reserving stock for every line
    pub async fn create(&self, input: CreateOrderInput) -> AppResult<Order> {
        let mut inner = self.store.write().await;
        let order = create_order(&mut inner, input, Utc::now().date_naive())?;
        tracing::info!(order_id = %order.id, total = %order.total_amount, "order created");
        Ok(order)
    }

    /// Apply a status transition. Shipping stamps the date and assigns the
    /// tracking number; cancelling through this endpoint releases stock.
    pub async fn update_status(&self, id: &str, input: UpdateOrderStatusInput) -> AppResult<Order> {
        let mut inner = self.store.write().await;
        let order = inner
            .orders
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        if !order.status.can_transition_to(input.status) {
            return Err(AppError::InvalidStateTransition(format!(
                "Cannot move order from {} to {}",
                order.status, input.status
            )));
        }

        order.status = input.status;
        match input.status {
            OrderStatus::Shipped => {
                order.shipped_date = Some(Utc::now().date_naive());
                order.tracking_number = Some(generate_tracking_number(&order.id));
            }
            OrderStatus::Cancelled => {
                let order = order.clone();
                release_order_stock(&mut inner, &order);
                return Ok(order);
            }
            _ => {}
        }

        Ok(order.clone())
    }

    /// Cancel an order. Only legal pre-shipment; releases every line's
    /// reservation.
    pub async fn cancel(&self, id: &str) -> AppResult<Order> {
        let mut inner = self.store.write().await;
        let order = inner
            .orders
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        if !order.status.is_cancellable() {
            return Err(AppError::InvalidStateTransition(
                "Cannot cancel order that has been shipped or delivered".to_string(),
            ));
        }

        order.status = OrderStatus::Cancelled;
        let order = order.clone();
        release_order_stock(&mut inner, &order);
        tracing::info!(order_id = %order.id, "order cancelled");
        Ok(order)
    }
}

/// Create an order inside an already-held store lock.
///
/// Also used by quotation conversion so that conversion and order creation
/// share one id sequence and one reservation path.
pub(crate) fn create_order(
    inner: &mut StoreInner,
    input: CreateOrderInput,
    today: NaiveDate,
) -> AppResult<Order> {
    if input.items.is_empty() {
        return Err(AppError::validation("items", "Order must have at least one line"));
    }

    let mut lines: Vec<OrderLine> = Vec::with_capacity(input.items.len());

    for line in &input.items {
        validate_quantity(line.quantity)
            .map_err(|msg| AppError::validation("quantity", msg))?;

        let Some(item) = inner.items.get_mut(&line.sku) else {
            release_lines(inner, &lines);
            return Err(AppError::NotFound(format!("Item {}", line.sku)));
        };

        let item_name = item.name.clone();
        let catalog_price = item.unit_price;

        // First warehouse that can cover the full line wins; partial
        // allocation across warehouses is not supported.
        let Some(level) = item
            .warehouses
            .iter_mut()
            .find(|level| level.available >= line.quantity)
        else {
            let available = item.total_available();
            let sku = line.sku.clone();
            release_lines(inner, &lines);
            return Err(AppError::InsufficientStock(format!(
                "{}: requested {}, available {}",
                sku, line.quantity, available
            )));
        };

        let warehouse = level.warehouse.clone();
        if let Err(err) = level.reserve(line.quantity) {
            release_lines(inner, &lines);
            return Err(err.into());
        }

        lines.push(OrderLine {
            sku: line.sku.clone(),
            name: item_name,
            quantity: line.quantity,
            unit_price: line.unit_price.unwrap_or(catalog_price),
            warehouse: Some(warehouse),
        });
    }

    let order = Order {
        id: inner.sequences.next_id("ORD"),
        customer_id: input.customer_id,
        customer_name: input.customer_name,
        status: OrderStatus::Pending,
        total_amount: Order::compute_total(&lines),
        items: lines,
        order_date: today,
        expected_delivery: today + Duration::days(DELIVERY_LEAD_DAYS),
        shipping_address: input.shipping_address,
        shipped_date: None,
        tracking_number: None,
    };

    inner.orders.insert(order.id.clone(), order.clone());
    Ok(order)
}

/// Release the reservations recorded on an order's lines
fn release_order_stock(inner: &mut StoreInner, order: &Order) {
    release_lines(inner, &order.items);
}

fn release_lines(inner: &mut StoreInner, lines: &[OrderLine]) {
    for line in lines {
        let Some(warehouse) = line.warehouse.as_deref() else {
            continue;
        };
        if let Some(level) = inner
            .items
            .get_mut(&line.sku)
            .and_then(|item| item.stock_level_mut(warehouse))
        {
            level.release(line.quantity);
        }
    }
}
