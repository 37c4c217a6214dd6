//! In-memory data store for the VENUS platform
//!
//! All entity collections live behind a single `RwLock`; a service method
//! takes the lock exactly once, so every multi-entity operation (create an
//! order and reserve its stock, complete a pick list and queue its dispatch)
//! is atomic with respect to concurrent requests. Restart discards all
//! mutations.

pub mod seed;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::models::{
    Customer, DispatchRecord, InboundShipment, Item, Order, PickList, Quotation, User,
};
use shared::types::{format_entity_id, parse_entity_sequence};

/// A user account with its credential hash. The hash never leaves the store.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: String,
}

/// Monotonic per-prefix id sequences.
///
/// Replaces the length+1 scheme: counters only move forward, so ids stay
/// unique across deletions and are assigned under the store's write lock.
#[derive(Debug, Default)]
pub struct Sequences {
    counters: BTreeMap<String, u64>,
}

impl Sequences {
    /// Allocate the next identifier for a prefix, e.g. `ORD-003`
    pub fn next_id(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format_entity_id(prefix, *counter)
    }

    /// Advance the counter to cover an existing (seeded) identifier
    pub fn observe(&mut self, id: &str) {
        let Some((prefix, _)) = id.rsplit_once('-') else {
            return;
        };
        let Some(sequence) = parse_entity_sequence(id) else {
            return;
        };
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter = (*counter).max(sequence);
    }
}

/// Entity collections and id sequences guarded by the store lock
#[derive(Debug, Default)]
pub struct StoreInner {
    /// Items keyed by SKU
    pub items: BTreeMap<String, Item>,
    /// Orders keyed by id
    pub orders: BTreeMap<String, Order>,
    /// Quotations keyed by id
    pub quotations: BTreeMap<String, Quotation>,
    /// Inbound shipments keyed by id
    pub inbound: BTreeMap<String, InboundShipment>,
    /// Pick lists keyed by id
    pub pick_lists: BTreeMap<String, PickList>,
    /// Dispatch records keyed by id
    pub dispatches: BTreeMap<String, DispatchRecord>,
    /// Customers keyed by id
    pub customers: BTreeMap<String, Customer>,
    /// User accounts keyed by email
    pub users: BTreeMap<String, UserAccount>,
    pub sequences: Sequences,
}

impl StoreInner {
    pub fn insert_item(&mut self, item: Item) {
        self.items.insert(item.sku.clone(), item);
    }

    pub fn insert_order(&mut self, order: Order) {
        self.sequences.observe(&order.id);
        self.orders.insert(order.id.clone(), order);
    }

    pub fn insert_quotation(&mut self, quotation: Quotation) {
        self.sequences.observe(&quotation.id);
        self.quotations.insert(quotation.id.clone(), quotation);
    }

    pub fn insert_inbound(&mut self, shipment: InboundShipment) {
        self.sequences.observe(&shipment.id);
        self.inbound.insert(shipment.id.clone(), shipment);
    }

    pub fn insert_pick_list(&mut self, pick_list: PickList) {
        self.sequences.observe(&pick_list.id);
        self.pick_lists.insert(pick_list.id.clone(), pick_list);
    }

    pub fn insert_dispatch(&mut self, dispatch: DispatchRecord) {
        self.sequences.observe(&dispatch.id);
        self.dispatches.insert(dispatch.id.clone(), dispatch);
    }

    pub fn insert_customer(&mut self, customer: Customer) {
        self.sequences.observe(&customer.id);
        self.customers.insert(customer.id.clone(), customer);
    }

    pub fn insert_user(&mut self, account: UserAccount) {
        self.users.insert(account.user.email.clone(), account);
    }
}

/// Shared handle to the in-memory store
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

impl Store {
    pub fn new(inner: StoreInner) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    pub fn empty() -> Self {
        Self::new(StoreInner::default())
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().await
    }
}
