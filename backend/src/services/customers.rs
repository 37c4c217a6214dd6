//! Customer account service

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{Customer, CustomerStatus, Order, Quotation};
use shared::validation::validate_email;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Credit limit applied to customers created without an explicit one
const DEFAULT_CREDIT_LIMIT: u32 = 25_000;

/// Customer service
#[derive(Clone)]
pub struct CustomerService {
    store: Store,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub credit_limit: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<CustomerStatus>,
    pub credit_limit: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilter {
    pub status: Option<CustomerStatus>,
}

impl CustomerService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: CustomerFilter) -> AppResult<Vec<Customer>> {
        let inner = self.store.read().await;
        Ok(inner
            .customers
            .values()
            .filter(|c| filter.status.map_or(true, |s| c.status == s))
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<Customer> {
        let inner = self.store.read().await;
        inner
            .customers
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Customer".to_string()))
    }

    pub async fn create(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        validate_email(&input.email).map_err(|msg| AppError::validation("email", msg))?;

        let mut inner = self.store.write().await;
        if inner
            .customers
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(AppError::DuplicateEntry(format!(
                "Customer with email {}",
                input.email
            )));
        }

        let customer = Customer {
            id: inner.sequences.next_id("CUST"),
            name: input.name,
            email: input.email,
            phone: input.phone.unwrap_or_default(),
            address: input.address.unwrap_or_default(),
            status: CustomerStatus::Active,
            credit_limit: input
                .credit_limit
                .unwrap_or_else(|| Decimal::from(DEFAULT_CREDIT_LIMIT)),
            current_balance: Decimal::ZERO,
            join_date: Utc::now().date_naive(),
        };
        inner.customers.insert(customer.id.clone(), customer.clone());
        tracing::info!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    pub async fn update(&self, id: &str, input: UpdateCustomerInput) -> AppResult<Customer> {
        if let Some(email) = &input.email {
            validate_email(email).map_err(|msg| AppError::validation("email", msg))?;
        }

        let mut inner = self.store.write().await;
        let customer = inner
            .customers
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

        if let Some(name) = input.name {
            customer.name = name;
        }
        if let Some(email) = input.email {
            customer.email = email;
        }
        if let Some(phone) = input.phone {
            customer.phone = phone;
        }
        if let Some(address) = input.address {
            customer.address = address;
        }
        if let Some(status) = input.status {
            customer.status = status;
        }
        if let Some(credit_limit) = input.credit_limit {
            customer.credit_limit = credit_limit;
        }

        Ok(customer.clone())
    }

    /// Orders placed by a customer
    pub async fn orders(&self, id: &str) -> AppResult<Vec<Order>> {
        let inner = self.store.read().await;
        if !inner.customers.contains_key(id) {
            return Err(AppError::NotFound("Customer".to_string()));
        }
        Ok(inner
            .orders
            .values()
            .filter(|order| order.customer_id == id)
            .cloned()
            .collect())
    }

    /// Quotations issued to a customer, with expiry applied
    pub async fn quotations(&self, id: &str) -> AppResult<Vec<Quotation>> {
        let today = Utc::now().date_naive();
        let inner = self.store.read().await;
        if !inner.customers.contains_key(id) {
            return Err(AppError::NotFound("Customer".to_string()));
        }
        Ok(inner
            .quotations
            .values()
            .filter(|q| q.customer_id == id)
            .map(|q| {
                let mut q = q.clone();
                q.status = q.effective_status(today);
                q
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use rust_decimal_macros::dec;

    fn service() -> CustomerService {
        CustomerService::new(Store::new(seed::demo("password123")))
    }

    #[tokio::test]
    async fn create_applies_the_default_credit_limit() {
        let service = service();

        let customer = service
            .create(CreateCustomerInput {
                name: "GHI Manufacturing".into(),
                email: "orders@ghimfg.com".into(),
                phone: None,
                address: None,
                credit_limit: None,
            })
            .await
            .unwrap();

        assert_eq!(customer.id, "CUST-004");
        assert_eq!(customer.status, CustomerStatus::Active);
        assert_eq!(customer.credit_limit, dec!(25000));
        assert_eq!(customer.current_balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let service = service();

        let err = service
            .create(CreateCustomerInput {
                name: "Impostor".into(),
                email: "CONTACT@ABCMFG.COM".into(),
                phone: None,
                address: None,
                credit_limit: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEntry(_)));
    }

    #[tokio::test]
    async fn customer_orders_are_real_store_queries() {
        let service = service();

        let orders = service.orders("CUST-001").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "ORD-001");

        let quotations = service.quotations("CUST-001").await.unwrap();
        assert_eq!(quotations.len(), 1);
        assert_eq!(quotations[0].id, "QUOT-001");
    }

    #[tokio::test]
    async fn lookups_for_unknown_customers_fail() {
        let service = service();
        assert!(service.orders("CUST-999").await.is_err());
        assert!(service.get("CUST-999").await.is_err());
    }
}
