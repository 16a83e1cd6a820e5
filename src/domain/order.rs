use super::review::ReviewStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque order identifier. Generated by the order store from a monotonic
/// counter, so it can never collide with a live order.
pub type OrderId = String;

/// Payment progress for an order. `Pending` is set the moment a payment
/// method is chosen; the desk records the user's claim of payment but never
/// verifies it, so no terminal payment status exists.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
}

/// A user's request to purchase a cataloged service, tracked through the
/// admin approval workflow.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: u64,
    /// Catalog key at creation time. The price is looked up live, not copied.
    pub service: String,
    pub status: ReviewStatus,
    pub payment_method: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: OrderId, user_id: u64, service: String) -> Self {
        Self {
            id,
            user_id,
            service,
            status: ReviewStatus::Pending,
            payment_method: None,
            payment_status: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_starts_pending() {
        let order = Order::new("ORD-1".to_string(), 42, "Telegram Stars".to_string());
        assert_eq!(order.status, ReviewStatus::Pending);
        assert!(order.payment_method.is_none());
        assert!(order.payment_status.is_none());
    }
}
