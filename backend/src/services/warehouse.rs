//! Warehouse fulfillment pipeline: inbound receipts, pick lists, dispatch

use chrono::Utc;
use serde::Deserialize;

use shared::models::{
    generate_tracking_number, DispatchLine, DispatchRecord, DispatchStatus, InboundShipment,
    InboundStatus, Order, OrderStatus, PickList, PickListStatus, StockLevel,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Warehouse operations service
#[derive(Clone)]
pub struct WarehouseService {
    store: Store,
}

/// Received quantities for one inbound shipment
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveInboundInput {
    pub items: Vec<ReceiveLineInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveLineInput {
    pub sku: String,
    pub received_quantity: u32,
}

/// Picking progress for one pick list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickInput {
    pub items: Vec<PickLineInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickLineInput {
    pub sku: String,
    pub picked: bool,
    pub picked_quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipDispatchInput {
    pub shipping_method: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickListFilter {
    pub status: Option<PickListStatus>,
}

impl WarehouseService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Inbound queue with overdue status computed for shipments past due
    pub async fn list_inbound(&self) -> AppResult<Vec<InboundShipment>> {
        let today = Utc::now().date_naive();
        let inner = self.store.read().await;
        Ok(inner
            .inbound
            .values()
            .map(|shipment| {
                let mut s = shipment.clone();
                s.status = s.effective_status(today);
                s
            })
            .collect())
    }

    /// Book received quantities onto a shipment and into the stock ledger.
    ///
    /// Received units land in the line's destination warehouse as available
    /// stock; an item not yet stocked there gets a new ledger entry.
    pub async fn receive_inbound(
        &self,
        id: &str,
        input: ReceiveInboundInput,
    ) -> AppResult<InboundShipment> {
        let today = Utc::now().date_naive();
        let mut inner = self.store.write().await;

        // Validate every input line before touching the shipment or the
        // ledger, so a bad line leaves both untouched.
        {
            let shipment = inner
                .inbound
                .get(id)
                .ok_or_else(|| AppError::NotFound("Inbound shipment".to_string()))?;
            if shipment.status == InboundStatus::Received {
                return Err(AppError::InvalidStateTransition(
                    "Shipment has already been received".to_string(),
                ));
            }
            for received in &input.items {
                if !shipment.items.iter().any(|line| line.sku == received.sku) {
                    return Err(AppError::validation(
                        "sku",
                        format!("{} is not on this shipment", received.sku),
                    ));
                }
                if received.received_quantity > 0 && !inner.items.contains_key(&received.sku) {
                    return Err(AppError::NotFound(format!("Item {}", received.sku)));
                }
            }
        }

        let shipment = inner
            .inbound
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Inbound shipment".to_string()))?;
        for received in &input.items {
            if let Some(line) = shipment
                .items
                .iter_mut()
                .find(|line| line.sku == received.sku)
            {
                line.received_quantity = received.received_quantity;
            }
        }
        shipment.status = InboundStatus::Received;
        shipment.received_date = Some(today);
        let shipment = shipment.clone();

        for line in &shipment.items {
            if line.received_quantity == 0 {
                continue;
            }
            let item = inner
                .items
                .get_mut(&line.sku)
                .ok_or_else(|| AppError::NotFound(format!("Item {}", line.sku)))?;
            let level = match item.stock_level_mut(&line.warehouse) {
                Some(level) => level,
                None => {
                    item.warehouses
                        .push(StockLevel::new(line.warehouse.clone(), "UNASSIGNED", 0, 0));
                    item.warehouses
                        .last_mut()
                        .ok_or_else(|| AppError::Internal("stock level vanished".to_string()))?
                }
            };
            level.receive(line.received_quantity);
        }

        tracing::info!(shipment_id = %shipment.id, "inbound shipment received");
        Ok(shipment)
    }

    /// Pick lists, optionally filtered by status
    pub async fn list_pick_lists(&self, filter: PickListFilter) -> AppResult<Vec<PickList>> {
        let inner = self.store.read().await;
        Ok(inner
            .pick_lists
            .values()
            .filter(|pl| filter.status.map_or(true, |s| pl.status == s))
            .cloned()
            .collect())
    }

    /// Record picking progress on a pick list.
    ///
    /// A line newly marked picked consumes its reservation from the ledger;
    /// un-picking a line puts the units back. When every line is picked the
    /// list completes and a ready-to-ship dispatch record is queued.
    pub async fn pick(&self, id: &str, input: PickInput) -> AppResult<PickList> {
        let today = Utc::now().date_naive();
        let mut inner = self.store.write().await;

        let pick_list = inner
            .pick_lists
            .get(id)
            .ok_or_else(|| AppError::NotFound("Pick list".to_string()))?;
        if pick_list.status == PickListStatus::Completed {
            return Err(AppError::InvalidStateTransition(
                "Pick list has already been completed".to_string(),
            ));
        }

        // Validate the whole ledger update before mutating anything, so a
        // bad line leaves both the list and the ledger untouched.
        let mut fulfillments: Vec<(String, String, u32)> = Vec::new();
        let mut reversals: Vec<(String, String, u32)> = Vec::new();
        for picked in &input.items {
            let line = pick_list
                .items
                .iter()
                .find(|line| line.sku == picked.sku)
                .ok_or_else(|| {
                    AppError::validation(
                        "sku",
                        format!("{} is not on this pick list", picked.sku),
                    )
                })?;
            if picked.picked && !line.picked {
                fulfillments.push((line.sku.clone(), line.warehouse.clone(), line.quantity));
            } else if !picked.picked && line.picked {
                reversals.push((line.sku.clone(), line.warehouse.clone(), line.quantity));
            }
        }
        for (sku, warehouse, quantity) in &fulfillments {
            let item = inner
                .items
                .get(sku)
                .ok_or_else(|| AppError::NotFound(format!("Item {}", sku)))?;
            let level = item
                .stock_level(warehouse)
                .ok_or_else(|| AppError::NotFound("Warehouse stock".to_string()))?;
            if *quantity > level.reserved {
                return Err(AppError::InsufficientStock(format!(
                    "{}: cannot fulfill {} units, only {} reserved",
                    sku, quantity, level.reserved
                )));
            }
        }

        for (sku, warehouse, quantity) in &fulfillments {
            if let Some(level) = inner
                .items
                .get_mut(sku)
                .and_then(|item| item.stock_level_mut(warehouse))
            {
                level.fulfill(*quantity)?;
            }
        }
        for (sku, warehouse, quantity) in &reversals {
            if let Some(level) = inner
                .items
                .get_mut(sku)
                .and_then(|item| item.stock_level_mut(warehouse))
            {
                level.restore(*quantity);
            }
        }

        let pick_list = inner
            .pick_lists
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Pick list".to_string()))?;
        for picked in &input.items {
            if let Some(line) = pick_list.items.iter_mut().find(|l| l.sku == picked.sku) {
                line.picked = picked.picked;
                line.picked_quantity = picked.picked_quantity;
            }
        }
        pick_list.status = pick_list.derived_status();
        if pick_list.status == PickListStatus::Completed {
            pick_list.completed_date = Some(today);
        }
        let pick_list = pick_list.clone();

        if pick_list.status == PickListStatus::Completed {
            let customer_name = inner
                .orders
                .get(&pick_list.order_id)
                .map(|order: &Order| order.customer_name.clone())
                .unwrap_or_default();
            let dispatch = DispatchRecord {
                id: inner.sequences.next_id("DISP"),
                order_id: pick_list.order_id.clone(),
                pick_list_id: pick_list.id.clone(),
                customer_name,
                status: DispatchStatus::Ready,
                packaged_date: today,
                shipping_method: None,
                tracking_number: None,
                shipped_date: None,
                items: pick_list
                    .items
                    .iter()
                    .map(|line| DispatchLine {
                        sku: line.sku.clone(),
                        name: line.name.clone(),
                        quantity: line.quantity,
                    })
                    .collect(),
            };
            tracing::info!(
                pick_list_id = %pick_list.id,
                dispatch_id = %dispatch.id,
                "pick list completed, dispatch queued"
            );
            inner.insert_dispatch(dispatch);
        }

        Ok(pick_list)
    }

    /// Dispatch queue
    pub async fn list_dispatch(&self) -> AppResult<Vec<DispatchRecord>> {
        let inner = self.store.read().await;
        Ok(inner.dispatches.values().cloned().collect())
    }

    /// Confirm a shipment: generates the tracking number and moves the
    /// linked order to shipped.
    pub async fn ship_dispatch(
        &self,
        id: &str,
        input: ShipDispatchInput,
    ) -> AppResult<DispatchRecord> {
        let today = Utc::now().date_naive();
        let mut inner = self.store.write().await;

        let dispatch = inner
            .dispatches
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Dispatch record".to_string()))?;
        if dispatch.status == DispatchStatus::Shipped {
            return Err(AppError::InvalidStateTransition(
                "Dispatch has already been shipped".to_string(),
            ));
        }

        let tracking_number = generate_tracking_number(&dispatch.order_id);
        dispatch.status = DispatchStatus::Shipped;
        dispatch.shipped_date = Some(today);
        if input.shipping_method.is_some() {
            dispatch.shipping_method = input.shipping_method;
        }
        dispatch.tracking_number = Some(tracking_number.clone());
        let dispatch = dispatch.clone();

        // Walk the order through the lifecycle rather than jumping straight
        // to shipped, so this path and the status endpoint agree.
        if let Some(order) = inner.orders.get_mut(&dispatch.order_id) {
            if order.status == OrderStatus::Pending
                && order.status.can_transition_to(OrderStatus::Processing)
            {
                order.status = OrderStatus::Processing;
            }
            if order.status.can_transition_to(OrderStatus::Shipped) {
                order.status = OrderStatus::Shipped;
                order.shipped_date = Some(today);
                order.tracking_number = Some(tracking_number);
            }
        }

        tracing::info!(dispatch_id = %dispatch.id, order_id = %dispatch.order_id, "dispatch shipped");
        Ok(dispatch)
    }
}
