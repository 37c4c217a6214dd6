//! Inventory service: the stock ledger and item catalog
//!
//! All reserve/release/receive arithmetic goes through `StockLevel` so the
//! `available = stock - reserved` invariant holds no matter which operation
//! touched the ledger.

use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{Item, StockLevel};
use shared::validation::{validate_price, validate_quantity, validate_sku};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Inventory service for the item catalog and stock ledger
#[derive(Clone)]
pub struct InventoryService {
    store: Store,
}

/// Input for creating a catalog item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemInput {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub reorder_level: u32,
    #[serde(default)]
    pub warehouses: Vec<StockLevelInput>,
}

/// Initial stock for one warehouse of a new item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevelInput {
    pub warehouse: String,
    pub location: String,
    pub stock: u32,
}

/// Input for updating a catalog item (partial)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<Decimal>,
    pub reorder_level: Option<u32>,
}

/// Input for reserving or releasing stock
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementInput {
    pub sku: String,
    pub warehouse: String,
    pub quantity: u32,
}

impl InventoryService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List all catalog items
    pub async fn list_items(&self) -> AppResult<Vec<Item>> {
        let inner = self.store.read().await;
        Ok(inner.items.values().cloned().collect())
    }

    /// Get an item by SKU
    pub async fn get_item(&self, sku: &str) -> AppResult<Item> {
        let inner = self.store.read().await;
        inner
            .items
            .get(sku)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Item".to_string()))
    }

    /// Create a catalog item
    pub async fn create_item(&self, input: CreateItemInput) -> AppResult<Item> {
        validate_sku(&input.sku).map_err(|msg| AppError::validation("sku", msg))?;
        validate_price(input.unit_price).map_err(|msg| AppError::validation("unitPrice", msg))?;

        let mut inner = self.store.write().await;
        if inner.items.contains_key(&input.sku) {
            return Err(AppError::DuplicateEntry("SKU".to_string()));
        }

        let item = Item {
            sku: input.sku,
            name: input.name,
            category: input.category,
            description: input.description,
            unit_price: input.unit_price,
            reorder_level: input.reorder_level,
            warehouses: input
                .warehouses
                .into_iter()
                .map(|w| StockLevel::new(w.warehouse, w.location, w.stock, 0))
                .collect(),
        };

        inner.insert_item(item.clone());
        tracing::info!(sku = %item.sku, "item created");
        Ok(item)
    }

    /// Update a catalog item. Stock counters are only ever touched by
    /// ledger operations, not by this endpoint.
    pub async fn update_item(&self, sku: &str, input: UpdateItemInput) -> AppResult<Item> {
        if let Some(unit_price) = input.unit_price {
            validate_price(unit_price).map_err(|msg| AppError::validation("unitPrice", msg))?;
        }

        let mut inner = self.store.write().await;
        let item = inner
            .items
            .get_mut(sku)
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        if let Some(name) = input.name {
            item.name = name;
        }
        if let Some(category) = input.category {
            item.category = category;
        }
        if let Some(description) = input.description {
            item.description = Some(description);
        }
        if let Some(unit_price) = input.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(reorder_level) = input.reorder_level {
            item.reorder_level = reorder_level;
        }

        Ok(item.clone())
    }

    /// Reserve stock for an order. Fails without side effects when fewer
    /// units are available than requested.
    pub async fn reserve(&self, input: StockMovementInput) -> AppResult<Item> {
        validate_quantity(input.quantity).map_err(|msg| AppError::validation("quantity", msg))?;

        let mut inner = self.store.write().await;
        let item = inner
            .items
            .get_mut(&input.sku)
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;
        let level = item
            .stock_level_mut(&input.warehouse)
            .ok_or_else(|| AppError::NotFound("Warehouse stock".to_string()))?;

        level.reserve(input.quantity)?;
        tracing::debug!(sku = %input.sku, warehouse = %input.warehouse, quantity = input.quantity, "stock reserved");
        Ok(item.clone())
    }

    /// Release previously reserved stock. Over-release clamps at zero.
    pub async fn release(&self, input: StockMovementInput) -> AppResult<Item> {
        validate_quantity(input.quantity).map_err(|msg| AppError::validation("quantity", msg))?;

        let mut inner = self.store.write().await;
        let item = inner
            .items
            .get_mut(&input.sku)
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;
        let level = item
            .stock_level_mut(&input.warehouse)
            .ok_or_else(|| AppError::NotFound("Warehouse stock".to_string()))?;

        level.release(input.quantity);
        tracing::debug!(sku = %input.sku, warehouse = %input.warehouse, quantity = input.quantity, "stock released");
        Ok(item.clone())
    }

    /// Items whose total available stock has fallen to the reorder level
    pub async fn low_stock(&self) -> AppResult<Vec<Item>> {
        let inner = self.store.read().await;
        Ok(inner
            .items
            .values()
            .filter(|item| item.is_low_stock())
            .cloned()
            .collect())
    }
}
