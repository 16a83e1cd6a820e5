use super::feedback::{Feedback, FeedbackId};
use super::notice::Notice;
use super::order::Order;
use super::review::ReviewStatus;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub type OrderStoreBox = Box<dyn OrderStore>;
pub type FeedbackStoreBox = Box<dyn FeedbackStore>;
pub type SessionStoreBox = Box<dyn SessionStore>;
pub type NotifierBox = Box<dyn Notifier>;

/// Repository of orders. Deliberately permissive: status legality is the
/// engine's job, the store just persists what it is told.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a pending order under a fresh, never-reused id.
    async fn create(&self, user_id: u64, service: String) -> Result<Order>;
    async fn get(&self, id: &str) -> Result<Option<Order>>;
    /// Overwrites the status. Returns false if the order does not exist.
    async fn update_status(&self, id: &str, status: ReviewStatus) -> Result<bool>;
    /// Sets the payment method and forces `payment_status` to pending.
    async fn set_payment_method(&self, id: &str, method: String) -> Result<bool>;
    async fn for_user(&self, user_id: u64) -> Result<Vec<Order>>;
    async fn pending_for_user(&self, user_id: u64) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn add(&self, user_id: u64, text: String) -> Result<Feedback>;
    async fn get(&self, id: FeedbackId) -> Result<Option<Feedback>>;
    async fn update_status(&self, id: FeedbackId, status: ReviewStatus) -> Result<bool>;
    async fn pending(&self) -> Result<Vec<Feedback>>;
}

/// Per-user ephemeral scratch space correlating multi-step interactions.
/// Entries have no TTL; they live until removed or the user is cleared.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn set(&self, user_id: u64, key: String, value: Value) -> Result<()>;
    async fn get(&self, user_id: u64, key: &str) -> Result<Option<Value>>;
    async fn remove(&self, user_id: u64, key: &str) -> Result<bool>;
    async fn clear(&self, user_id: u64) -> Result<()>;
}

/// Outbound edge of the engine, implemented by the messaging gateway.
/// Sends are the engine's only suspension points besides store locks.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_user(&self, user_id: u64, notice: Notice) -> Result<()>;
    async fn broadcast_admins(&self, notice: Notice) -> Result<()>;
}
