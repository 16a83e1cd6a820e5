use crate::domain::feedback::{Feedback, FeedbackId};
use crate::domain::order::Order;
use crate::domain::ports::{FeedbackStore, OrderStore, SessionStore};
use crate::domain::review::ReviewStatus;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A thread-safe in-memory order store.
///
/// Ids come from a monotonic counter (`ORD-<n>`), so a fresh id can never
/// collide with a live order. Nothing is ever deleted; the map grows for the
/// life of the process.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, user_id: u64, service: String) -> Result<Order> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let order = Order::new(format!("ORD-{n}"), user_id, service);
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn get(&self, id: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(id).cloned())
    }

    async fn update_status(&self, id: &str, status: ReviewStatus) -> Result<bool> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_payment_method(&self, id: &str, method: String) -> Result<bool> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(id) {
            Some(order) => {
                order.payment_method = Some(method);
                order.payment_status = Some(crate::domain::order::PaymentStatus::Pending);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn for_user(&self, user_id: u64) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    async fn pending_for_user(&self, user_id: u64) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id == user_id && o.status == ReviewStatus::Pending)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }
}

/// A thread-safe in-memory feedback store.
///
/// The id counter is independent of the collection size, so ids stay unique
/// even if deletion is ever introduced.
#[derive(Default, Clone)]
pub struct InMemoryFeedbackStore {
    feedback: Arc<RwLock<HashMap<FeedbackId, Feedback>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn add(&self, user_id: u64, text: String) -> Result<Feedback> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let feedback = Feedback::new(id, user_id, text);
        let mut items = self.feedback.write().await;
        items.insert(id, feedback.clone());
        Ok(feedback)
    }

    async fn get(&self, id: FeedbackId) -> Result<Option<Feedback>> {
        let items = self.feedback.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn update_status(&self, id: FeedbackId, status: ReviewStatus) -> Result<bool> {
        let mut items = self.feedback.write().await;
        match items.get_mut(&id) {
            Some(feedback) => {
                feedback.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pending(&self) -> Result<Vec<Feedback>> {
        let items = self.feedback.read().await;
        let mut result: Vec<Feedback> = items
            .values()
            .filter(|f| f.status == ReviewStatus::Pending)
            .cloned()
            .collect();
        result.sort_by_key(|f| f.id);
        Ok(result)
    }
}

/// A thread-safe in-memory session store: per-user key/value scratch space.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<u64, HashMap<String, Value>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(&self, user_id: u64, key: String, value: Value) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(user_id).or_default().insert(key, value);
        Ok(())
    }

    async fn get(&self, user_id: u64, key: &str) -> Result<Option<Value>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&user_id)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn remove(&self, user_id: u64, key: &str) -> Result<bool> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions
            .get_mut(&user_id)
            .is_some_and(|entries| entries.remove(key).is_some()))
    }

    async fn clear(&self, user_id: u64) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&user_id);
        Ok(())
    }
}
