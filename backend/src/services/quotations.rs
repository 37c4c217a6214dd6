//! Quotation service: creation, approval, expiry, conversion to order

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{Order, Quotation, QuotationLine, QuotationStatus, QUOTATION_VALIDITY_DAYS};
use shared::validation::validate_quantity;

use crate::error::{AppError, AppResult};
use crate::services::orders::{create_order, CreateOrderInput, OrderLineInput};
use crate::store::Store;

/// Quotation service
#[derive(Clone)]
pub struct QuotationService {
    store: Store,
}

/// Input for creating a quotation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotationInput {
    pub customer_id: String,
    pub customer_name: String,
    pub items: Vec<QuotationLineInput>,
    pub notes: Option<String>,
}

/// A requested quotation line; unit price defaults to the catalog price
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationLineInput {
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Option<Decimal>,
}

/// Input for updating a quotation's status
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuotationStatusInput {
    pub status: QuotationStatus,
}

/// List filters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationFilter {
    pub status: Option<QuotationStatus>,
    pub customer_id: Option<String>,
}

impl QuotationService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List quotations with expiry applied, optionally filtered
    pub async fn list(&self, filter: QuotationFilter) -> AppResult<Vec<Quotation>> {
        let today = Utc::now().date_naive();
        let inner = self.store.read().await;
        Ok(inner
            .quotations
            .values()
            .map(|quotation| {
                let mut q = quotation.clone();
                q.status = q.effective_status(today);
                q
            })
            .filter(|q| filter.status.map_or(true, |s| q.status == s))
            .filter(|q| {
                filter
                    .customer_id
                    .as_deref()
                    .map_or(true, |c| q.customer_id == c)
            })
            .collect())
    }

    /// Get a quotation by id, with expiry applied
    pub async fn get(&self, id: &str) -> AppResult<Quotation> {
        let inner = self.store.read().await;
        let mut quotation = inner
            .quotations
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Quotation".to_string()))?;
        quotation.status = quotation.effective_status(Utc::now().date_naive());
        Ok(quotation)
    }

    /// Create a quotation: per-line totals, 8% tax, 30-day validity
    pub async fn create(&self, input: CreateQuotationInput) -> AppResult<Quotation> {
        if input.items.is_empty() {
            return Err(AppError::validation(
                "items",
                "Quotation must have at least one line",
            ));
        }

        let today = Utc::now().date_naive();
        let mut inner = self.store.write().await;

        let mut lines = Vec::with_capacity(input.items.len());
        for line in &input.items {
            validate_quantity(line.quantity)
                .map_err(|msg| AppError::validation("quantity", msg))?;

            let item = inner
                .items
                .get(&line.sku)
                .ok_or_else(|| AppError::NotFound(format!("Item {}", line.sku)))?;

            let unit_price = line.unit_price.unwrap_or(item.unit_price);
            lines.push(QuotationLine {
                sku: line.sku.clone(),
                name: item.name.clone(),
                quantity: line.quantity,
                unit_price,
                total_price: unit_price * Decimal::from(line.quantity),
            });
        }

        let (subtotal, tax, total_amount) = Quotation::compute_amounts(&lines);
        let quotation = Quotation {
            id: inner.sequences.next_id("QUOT"),
            customer_id: input.customer_id,
            customer_name: input.customer_name,
            status: QuotationStatus::Pending,
            items: lines,
            subtotal,
            tax,
            total_amount,
            valid_until: today + Duration::days(QUOTATION_VALIDITY_DAYS),
            created_date: today,
            approved_date: None,
            converted_order_id: None,
            notes: input.notes.unwrap_or_default(),
        };

        inner
            .quotations
            .insert(quotation.id.clone(), quotation.clone());
        tracing::info!(quotation_id = %quotation.id, total = %quotation.total_amount, "quotation created");
        Ok(quotation)
    }

    /// Approve or reject a pending quotation
    pub async fn update_status(
        &self,
        id: &str,
        input: UpdateQuotationStatusInput,
    ) -> AppResult<Quotation> {
        if !matches!(
            input.status,
            QuotationStatus::Approved | QuotationStatus::Rejected
        ) {
            return Err(AppError::validation(
                "status",
                "Quotations can only be approved or rejected",
            ));
        }

        let today = Utc::now().date_naive();
        let mut inner = self.store.write().await;
        let quotation = inner
            .quotations
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Quotation".to_string()))?;

        match quotation.effective_status(today) {
            QuotationStatus::Pending => {}
            QuotationStatus::Expired => {
                return Err(AppError::InvalidStateTransition(
                    "Quotation has expired".to_string(),
                ));
            }
            status => {
                return Err(AppError::InvalidStateTransition(format!(
                    "Quotation is already {}",
                    status
                )));
            }
        }

        quotation.status = input.status;
        if input.status == QuotationStatus::Approved {
            quotation.approved_date = Some(today);
        }

        Ok(quotation.clone())
    }

    /// Convert an approved quotation into a real order.
    ///
    /// Goes through the normal order path (sequential id, stock
    /// reservations) and records the link, so converting twice is rejected.
    pub async fn convert_to_order(&self, id: &str) -> AppResult<(Quotation, Order)> {
        let today = Utc::now().date_naive();
        let mut inner = self.store.write().await;
        let quotation = inner
            .quotations
            .get(id)
            .ok_or_else(|| AppError::NotFound("Quotation".to_string()))?;

        if let Some(order_id) = &quotation.converted_order_id {
            return Err(AppError::InvalidStateTransition(format!(
                "Quotation was already converted to {}",
                order_id
            )));
        }
        if quotation.effective_status(today) != QuotationStatus::Approved {
            return Err(AppError::InvalidStateTransition(
                "Only approved quotations can be converted to orders".to_string(),
            ));
        }

        let order_input = CreateOrderInput {
            customer_id: quotation.customer_id.clone(),
            customer_name: quotation.customer_name.clone(),
            items: quotation
                .items
                .iter()
                .map(|line| OrderLineInput {
                    sku: line.sku.clone(),
                    quantity: line.quantity,
                    unit_price: Some(line.unit_price),
                })
                .collect(),
            shipping_address: None,
        };

        let order = create_order(&mut inner, order_input, today)?;

        let quotation = inner
            .quotations
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Quotation".to_string()))?;
        quotation.converted_order_id = Some(order.id.clone());
        let quotation = quotation.clone();

        tracing::info!(quotation_id = %quotation.id, order_id = %order.id, "quotation converted to order");
        Ok((quotation, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use rust_decimal_macros::dec;

    fn service() -> QuotationService {
        QuotationService::new(Store::new(seed::demo("password123")))
    }

    fn input(items: Vec<QuotationLineInput>) -> CreateQuotationInput {
        CreateQuotationInput {
            customer_id: "CUST-003".into(),
            customer_name: "DEF Corporation".into(),
            items,
            notes: None,
        }
    }

    fn line(sku: &str, quantity: u32) -> QuotationLineInput {
        QuotationLineInput {
            sku: sku.into(),
            quantity,
            unit_price: None,
        }
    }

    #[tokio::test]
    async fn create_computes_tax_and_validity_window() {
        let service = service();

        let quotation = service.create(input(vec![line("VEN-002", 10)])).await.unwrap();

        assert_eq!(quotation.id, "QUOT-003");
        assert_eq!(quotation.subtotal, dec!(450.00));
        assert_eq!(quotation.tax, dec!(36.00));
        assert_eq!(quotation.total_amount, dec!(486.00));
        assert_eq!(
            quotation.valid_until,
            quotation.created_date + Duration::days(QUOTATION_VALIDITY_DAYS)
        );
        assert_eq!(quotation.status, QuotationStatus::Pending);
    }

    #[tokio::test]
    async fn stale_quotations_report_expired() {
        let service = service();

        // Seeded quotations date from January 2024 and are long past
        // their validity window.
        let quotation = service.get("QUOT-001").await.unwrap();
        assert_eq!(quotation.status, QuotationStatus::Expired);

        let err = service
            .update_status(
                "QUOT-001",
                UpdateQuotationStatusInput {
                    status: QuotationStatus::Approved,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
    }

    #[tokio::test]
    async fn approve_then_convert_creates_a_real_order() {
        let service = service();

        let quotation = service.create(input(vec![line("VEN-002", 10)])).await.unwrap();
        let quotation = service
            .update_status(
                &quotation.id,
                UpdateQuotationStatusInput {
                    status: QuotationStatus::Approved,
                },
            )
            .await
            .unwrap();
        assert_eq!(quotation.status, QuotationStatus::Approved);
        assert!(quotation.approved_date.is_some());

        let (quotation, order) = service.convert_to_order(&quotation.id).await.unwrap();
        assert_eq!(quotation.converted_order_id.as_deref(), Some(order.id.as_str()));
        assert_eq!(order.customer_id, quotation.customer_id);
        assert_eq!(order.total_amount, dec!(450.00));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 10);

        // Conversion reserves stock like any other order
        let inner = service.store.read().await;
        let level = inner.items["VEN-002"].stock_level("Main Warehouse").unwrap();
        assert_eq!(level.reserved, 25);
        assert_eq!(level.available, 60);
    }

    #[tokio::test]
    async fn convert_twice_is_rejected() {
        let service = service();

        let quotation = service.create(input(vec![line("VEN-002", 1)])).await.unwrap();
        service
            .update_status(
                &quotation.id,
                UpdateQuotationStatusInput {
                    status: QuotationStatus::Approved,
                },
            )
            .await
            .unwrap();
        service.convert_to_order(&quotation.id).await.unwrap();

        let err = service.convert_to_order(&quotation.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
    }

    #[tokio::test]
    async fn convert_requires_approval() {
        let service = service();

        let quotation = service.create(input(vec![line("VEN-002", 1)])).await.unwrap();
        let err = service.convert_to_order(&quotation.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
    }

    #[tokio::test]
    async fn rejected_quotation_stays_rejected() {
        let service = service();

        let quotation = service.create(input(vec![line("VEN-001", 5)])).await.unwrap();
        service
            .update_status(
                &quotation.id,
                UpdateQuotationStatusInput {
                    status: QuotationStatus::Rejected,
                },
            )
            .await
            .unwrap();

        let err = service
            .update_status(
                &quotation.id,
                UpdateQuotationStatusInput {
                    status: QuotationStatus::Approved,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
    }
}
