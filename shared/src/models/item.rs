//! Item and per-warehouse stock models
//!
//! The stock ledger invariant is enforced here: for every warehouse entry,
//! `available = stock - reserved`, with both sides non-negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stock-keeping unit tracked across one or more warehouses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique SKU, e.g. "VEN-001"
    pub sku: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit_price: Decimal,
    /// Total available units at or below this level flag the item for reorder
    pub reorder_level: u32,
    pub warehouses: Vec<StockLevel>,
}

impl Item {
    pub fn total_stock(&self) -> u32 {
        self.warehouses.iter().map(|w| w.stock).sum()
    }

    pub fn total_reserved(&self) -> u32 {
        self.warehouses.iter().map(|w| w.reserved).sum()
    }

    pub fn total_available(&self) -> u32 {
        self.warehouses.iter().map(|w| w.available).sum()
    }

    pub fn is_low_stock(&self) -> bool {
        self.total_available() <= self.reorder_level
    }

    /// Stock level for a named warehouse, if the item is stocked there
    pub fn stock_level(&self, warehouse: &str) -> Option<&StockLevel> {
        self.warehouses.iter().find(|w| w.warehouse == warehouse)
    }

    pub fn stock_level_mut(&mut self, warehouse: &str) -> Option<&mut StockLevel> {
        self.warehouses.iter_mut().find(|w| w.warehouse == warehouse)
    }
}

/// Stock counters for one item in one warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub warehouse: String,
    /// Bin location, e.g. "WH-A-001"
    pub location: String,
    pub stock: u32,
    /// Units earmarked for orders but not yet shipped
    pub reserved: u32,
    /// Units free to be newly reserved
    pub available: u32,
}

/// Errors from stock-ledger operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientAvailable { requested: u32, available: u32 },

    #[error("cannot fulfill {requested} units: only {reserved} reserved")]
    InsufficientReserved { requested: u32, reserved: u32 },
}

impl StockLevel {
    pub fn new(warehouse: impl Into<String>, location: impl Into<String>, stock: u32, reserved: u32) -> Self {
        Self {
            warehouse: warehouse.into(),
            location: location.into(),
            stock,
            reserved,
            available: stock - reserved,
        }
    }

    /// Earmark `quantity` units for an order.
    ///
    /// Fails without mutating state when fewer than `quantity` units are
    /// available.
    pub fn reserve(&mut self, quantity: u32) -> Result<(), StockError> {
        if quantity > self.available {
            return Err(StockError::InsufficientAvailable {
                requested: quantity,
                available: self.available,
            });
        }
        self.reserved += quantity;
        self.available -= quantity;
        Ok(())
    }

    /// Return previously reserved units to the available pool.
    ///
    /// Over-release clamps at zero reserved rather than erroring, so the
    /// ledger can never record a negative reservation.
    pub fn release(&mut self, quantity: u32) {
        self.reserved = self.reserved.saturating_sub(quantity);
        self.available = self.stock - self.reserved;
    }

    /// Receive inbound goods. Received units are immediately available and
    /// never auto-reserved.
    pub fn receive(&mut self, quantity: u32) {
        self.stock += quantity;
        self.available += quantity;
    }

    /// Consume reserved units that have physically left the shelf
    /// (pick-list fulfillment). Available stock is unaffected.
    pub fn fulfill(&mut self, quantity: u32) -> Result<(), StockError> {
        if quantity > self.reserved {
            return Err(StockError::InsufficientReserved {
                requested: quantity,
                reserved: self.reserved,
            });
        }
        self.stock -= quantity;
        self.reserved -= quantity;
        Ok(())
    }

    /// Put fulfilled units back on the shelf (a pick was undone). Inverse
    /// of [`fulfill`](Self::fulfill): both stock and the reservation come
    /// back, available is unaffected.
    pub fn restore(&mut self, quantity: u32) {
        self.stock += quantity;
        self.reserved += quantity;
    }

    /// Whether the ledger invariant holds for this entry
    pub fn is_consistent(&self) -> bool {
        self.stock >= self.reserved && self.available == self.stock - self.reserved
    }
}
