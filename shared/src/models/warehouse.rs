//! Warehouse fulfillment models: inbound shipments, pick lists, dispatch

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An expected or received inbound shipment from a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundShipment {
    /// Sequential identifier, e.g. "IB-001"
    pub id: String,
    pub purchase_order: String,
    pub supplier: String,
    pub expected_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<NaiveDate>,
    pub status: InboundStatus,
    pub items: Vec<InboundLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundLine {
    pub sku: String,
    pub name: String,
    /// Destination warehouse for the received goods
    pub warehouse: String,
    pub expected_quantity: u32,
    pub received_quantity: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InboundStatus {
    Expected,
    Received,
    Overdue,
}

impl InboundShipment {
    /// Status as of `today`: an expected shipment past its expected date
    /// reports `overdue`.
    pub fn effective_status(&self, today: NaiveDate) -> InboundStatus {
        match self.status {
            InboundStatus::Expected if today > self.expected_date => InboundStatus::Overdue,
            status => status,
        }
    }
}

/// Items a warehouse worker must collect to fulfill an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickList {
    /// Sequential identifier, e.g. "PL-001"
    pub id: String,
    pub order_id: String,
    pub status: PickListStatus,
    pub priority: PickPriority,
    pub created_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    pub assigned_to: String,
    pub items: Vec<PickLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickLine {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    /// Bin location to pick from
    pub location: String,
    pub warehouse: String,
    pub picked: bool,
    pub picked_quantity: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PickListStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PickPriority {
    High,
    Medium,
    Low,
}

impl PickList {
    /// Status derived from line state: completed iff every line is picked,
    /// in progress if any line is picked, otherwise pending.
    pub fn derived_status(&self) -> PickListStatus {
        if self.items.iter().all(|line| line.picked) {
            PickListStatus::Completed
        } else if self.items.iter().any(|line| line.picked) {
            PickListStatus::InProgress
        } else {
            PickListStatus::Pending
        }
    }
}

/// Shipment-preparation record for a completed pick list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecord {
    /// Sequential identifier, e.g. "DISP-001"
    pub id: String,
    pub order_id: String,
    pub pick_list_id: String,
    pub customer_name: String,
    pub status: DispatchStatus,
    pub packaged_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_date: Option<NaiveDate>,
    pub items: Vec<DispatchLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchLine {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Ready,
    Shipped,
}
