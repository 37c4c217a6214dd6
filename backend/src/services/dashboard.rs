//! Dashboard service: metrics computed from the live store

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use shared::models::{
    DispatchStatus, InboundStatus, OrderStatus, PickListStatus, QuotationStatus,
};

use crate::error::AppResult;
use crate::store::Store;

/// Dashboard metrics service
#[derive(Clone)]
pub struct DashboardService {
    store: Store,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_inventory_value: Decimal,
    pub low_stock_items: usize,
    pub pending_orders: usize,
    pub pending_quotations: usize,
    pub todays_shipments: usize,
    pub dispatch_queue: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseStockLevel {
    pub warehouse: String,
    pub total_items: u32,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesMetrics {
    pub total_revenue: Decimal,
    pub quotations_generated: usize,
    pub quotation_conversion_rate: f64,
    pub average_order_value: Decimal,
    pub top_selling_items: Vec<TopSellingItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingItem {
    pub sku: String,
    pub name: String,
    pub quantity_sold: u32,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseMetrics {
    pub inbound_today: usize,
    pub outbound_today: usize,
    pub pending_pick_lists: usize,
    pub completed_pick_lists: usize,
    pub dispatch_queue: usize,
}

/// Inventory alert, tagged by `type` on the wire
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryAlert {
    #[serde(rename_all = "camelCase")]
    LowStock {
        severity: AlertSeverity,
        sku: String,
        name: String,
        current_stock: u32,
        reorder_level: u32,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    ExpiredQuotation {
        severity: AlertSeverity,
        quotation_id: String,
        customer_name: String,
        expiry_date: chrono::NaiveDate,
        message: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

impl DashboardService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn overview(&self) -> AppResult<Overview> {
        let today = Utc::now().date_naive();
        let inner = self.store.read().await;

        let total_inventory_value = inner
            .items
            .values()
            .map(|item| item.unit_price * Decimal::from(item.total_stock()))
            .sum();

        Ok(Overview {
            total_inventory_value,
            low_stock_items: inner.items.values().filter(|i| i.is_low_stock()).count(),
            pending_orders: inner
                .orders
                .values()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            pending_quotations: inner
                .quotations
                .values()
                .filter(|q| q.effective_status(today) == QuotationStatus::Pending)
                .count(),
            todays_shipments: inner
                .orders
                .values()
                .filter(|o| o.shipped_date == Some(today))
                .count(),
            dispatch_queue: inner
                .dispatches
                .values()
                .filter(|d| d.status == DispatchStatus::Ready)
                .count(),
        })
    }

    pub async fn stock_levels(&self) -> AppResult<Vec<WarehouseStockLevel>> {
        let inner = self.store.read().await;

        // (total units, low-stock item count, out-of-stock item count)
        let mut per_warehouse: BTreeMap<String, (u32, usize, usize)> = BTreeMap::new();
        for item in inner.items.values() {
            let low = item.is_low_stock();
            for level in &item.warehouses {
                let entry = per_warehouse.entry(level.warehouse.clone()).or_default();
                entry.0 += level.stock;
                if low {
                    entry.1 += 1;
                }
                if level.stock == 0 {
                    entry.2 += 1;
                }
            }
        }

        Ok(per_warehouse
            .into_iter()
            .map(
                |(warehouse, (total_items, low_stock_items, out_of_stock_items))| {
                    WarehouseStockLevel {
                        warehouse,
                        total_items,
                        low_stock_items,
                        out_of_stock_items,
                    }
                },
            )
            .collect())
    }

    pub async fn sales_metrics(&self) -> AppResult<SalesMetrics> {
        let inner = self.store.read().await;

        let fulfilled: Vec<_> = inner
            .orders
            .values()
            .filter(|o| {
                matches!(o.status, OrderStatus::Shipped | OrderStatus::Delivered)
            })
            .collect();
        let total_revenue: Decimal = fulfilled.iter().map(|o| o.total_amount).sum();

        let quotations_generated = inner.quotations.len();
        let converted = inner
            .quotations
            .values()
            .filter(|q| q.converted_order_id.is_some())
            .count();
        let quotation_conversion_rate = if quotations_generated == 0 {
            0.0
        } else {
            converted as f64 / quotations_generated as f64 * 100.0
        };

        let order_count = inner.orders.len();
        let order_total: Decimal = inner.orders.values().map(|o| o.total_amount).sum();
        let average_order_value = if order_count == 0 {
            Decimal::ZERO
        } else {
            order_total / Decimal::from(order_count as u64)
        };

        // (name, quantity, revenue) keyed by sku, over fulfilled orders
        let mut by_sku: BTreeMap<String, (String, u32, Decimal)> = BTreeMap::new();
        for order in &fulfilled {
            for line in &order.items {
                let entry = by_sku
                    .entry(line.sku.clone())
                    .or_insert_with(|| (line.name.clone(), 0, Decimal::ZERO));
                entry.1 += line.quantity;
                entry.2 += line.line_total();
            }
        }
        let mut top_selling_items: Vec<TopSellingItem> = by_sku
            .into_iter()
            .map(|(sku, (name, quantity_sold, revenue))| TopSellingItem {
                sku,
                name,
                quantity_sold,
                revenue,
            })
            .collect();
        top_selling_items.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        top_selling_items.truncate(5);

        Ok(SalesMetrics {
            total_revenue,
            quotations_generated,
            quotation_conversion_rate,
            average_order_value,
            top_selling_items,
        })
    }

    pub async fn warehouse_metrics(&self) -> AppResult<WarehouseMetrics> {
        let today = Utc::now().date_naive();
        let inner = self.store.read().await;

        Ok(WarehouseMetrics {
            inbound_today: inner
                .inbound
                .values()
                .filter(|s| s.status == InboundStatus::Received && s.received_date == Some(today))
                .count(),
            outbound_today: inner
                .dispatches
                .values()
                .filter(|d| d.shipped_date == Some(today))
                .count(),
            pending_pick_lists: inner
                .pick_lists
                .values()
                .filter(|pl| pl.status != PickListStatus::Completed)
                .count(),
            completed_pick_lists: inner
                .pick_lists
                .values()
                .filter(|pl| pl.status == PickListStatus::Completed)
                .count(),
            dispatch_queue: inner
                .dispatches
                .values()
                .filter(|d| d.status == DispatchStatus::Ready)
                .count(),
        })
    }

    pub async fn inventory_alerts(&self) -> AppResult<Vec<InventoryAlert>> {
        let today = Utc::now().date_naive();
        let inner = self.store.read().await;
        let mut alerts = Vec::new();

        for item in inner.items.values() {
            if !item.is_low_stock() {
                continue;
            }
            let current_stock = item.total_available();
            let severity = if current_stock == 0 {
                AlertSeverity::High
            } else {
                AlertSeverity::Medium
            };
            alerts.push(InventoryAlert::LowStock {
                severity,
                sku: item.sku.clone(),
                name: item.name.clone(),
                current_stock,
                reorder_level: item.reorder_level,
                message: "Stock at or below reorder level".to_string(),
            });
        }

        for quotation in inner.quotations.values() {
            if quotation.effective_status(today) == QuotationStatus::Expired {
                alerts.push(InventoryAlert::ExpiredQuotation {
                    severity: AlertSeverity::Low,
                    quotation_id: quotation.id.clone(),
                    customer_name: quotation.customer_name.clone(),
                    expiry_date: quotation.valid_until,
                    message: "Quotation expired, follow up recommended".to_string(),
                });
            }
        }

        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use rust_decimal_macros::dec;

    fn service() -> DashboardService {
        DashboardService::new(Store::new(seed::demo("password123")))
    }

    #[tokio::test]
    async fn overview_is_computed_from_the_store() {
        let service = service();

        let overview = service.overview().await.unwrap();
        // 1500*2.50 + 85*45.00 + 25*275.00 + 20*185.00 + 0*28.75
        assert_eq!(overview.total_inventory_value, dec!(18150.00));
        assert_eq!(overview.low_stock_items, 1);
        assert_eq!(overview.pending_orders, 1);
        // Seeded quotations have expired, so none are pending
        assert_eq!(overview.pending_quotations, 0);
        assert_eq!(overview.dispatch_queue, 1);
    }

    #[tokio::test]
    async fn stock_levels_roll_up_per_warehouse() {
        let service = service();

        let levels = service.stock_levels().await.unwrap();
        let main = levels.iter().find(|l| l.warehouse == "Main Warehouse").unwrap();
        assert_eq!(main.total_items, 1200 + 85 + 8 + 0);
        assert_eq!(main.out_of_stock_items, 1); // VEN-005

        let component = levels
            .iter()
            .find(|l| l.warehouse == "Component Warehouse")
            .unwrap();
        assert_eq!(component.total_items, 300 + 25 + 12);
    }

    #[tokio::test]
    async fn sales_metrics_cover_fulfilled_orders_only() {
        let service = service();

        let metrics = service.sales_metrics().await.unwrap();
        // Only ORD-002 (shipped) counts toward revenue
        assert_eq!(metrics.total_revenue, dec!(550.00));
        assert_eq!(metrics.quotations_generated, 2);
        assert_eq!(metrics.quotation_conversion_rate, 0.0);
        assert_eq!(metrics.top_selling_items.len(), 1);
        assert_eq!(metrics.top_selling_items[0].sku, "VEN-003");
    }

    #[tokio::test]
    async fn alerts_cover_low_stock_and_expired_quotations() {
        let service = service();

        let alerts = service.inventory_alerts().await.unwrap();
        let low_stock: Vec<_> = alerts
            .iter()
            .filter(|a| matches!(a, InventoryAlert::LowStock { .. }))
            .collect();
        assert_eq!(low_stock.len(), 1);

        let expired: Vec<_> = alerts
            .iter()
            .filter(|a| matches!(a, InventoryAlert::ExpiredQuotation { .. }))
            .collect();
        assert_eq!(expired.len(), 2);
    }
}
