use crate::config::Config;
use crate::domain::catalog::Catalog;
use crate::domain::feedback::{Feedback, FeedbackId};
use crate::domain::notice::Notice;
use crate::domain::order::{Order, OrderId, PaymentStatus};
use crate::domain::ports::{FeedbackStoreBox, NotifierBox, OrderStoreBox, SessionStoreBox};
use crate::domain::review::{ReviewAction, ReviewStatus};
use crate::error::{DeskError, ItemKind, Result};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, warn};

/// What to do when a non-admin hits an admin-gated operation.
///
/// `Silent` logs and says nothing, so the existence of protected actions is
/// not confirmed to the actor. `Notify` additionally sends a denial notice;
/// only the price-edit surface uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialPolicy {
    Silent,
    Notify,
}

/// Result payload of `create_order`: the new order plus enough context for
/// the transport to render a recap.
#[derive(Debug, Clone)]
pub struct CreatedOrder {
    pub order: Order,
    pub price: Decimal,
    /// The user's other still-pending orders, for the recap message.
    pub other_pending: Vec<Order>,
}

/// The lifecycle engine: transition logic over store-held data.
///
/// Holds no entity state of its own. Every operation runs to completion for
/// one inbound event; the only suspension points are store lock acquisition
/// and outbound notifier sends. Notification failures are logged and
/// swallowed, and never roll back a state change that already happened.
pub struct OrderEngine {
    config: Config,
    catalog: Catalog,
    orders: OrderStoreBox,
    feedback: FeedbackStoreBox,
    sessions: SessionStoreBox,
    notifier: NotifierBox,
}

fn awaiting_payment_key(order_id: &str) -> String {
    format!("awaiting_payment:{order_id}")
}

impl OrderEngine {
    pub fn new(
        config: Config,
        orders: OrderStoreBox,
        feedback: FeedbackStoreBox,
        sessions: SessionStoreBox,
        notifier: NotifierBox,
    ) -> Self {
        let catalog = Catalog::new(config.services.clone());
        Self {
            config,
            catalog,
            orders,
            feedback,
            sessions,
            notifier,
        }
    }

    /// The one authorization primitive for admin-gated operations.
    async fn authorize(&self, actor: u64, policy: DenialPolicy) -> Result<()> {
        if self.config.is_admin(actor) {
            return Ok(());
        }
        warn!(user_id = actor, "unauthorized admin action attempt");
        if policy == DenialPolicy::Notify {
            self.send_user(actor, Notice::AccessDenied { user_id: actor })
                .await;
        }
        Err(DeskError::Unauthorized { user_id: actor })
    }

    async fn send_user(&self, user_id: u64, notice: Notice) {
        if let Err(e) = self.notifier.notify_user(user_id, notice).await {
            warn!(user_id, error = %e, "failed to notify user");
        }
    }

    async fn send_admins(&self, notice: Notice) {
        if let Err(e) = self.notifier.broadcast_admins(notice).await {
            warn!(error = %e, "failed to broadcast to admins");
        }
    }

    /// Creates a pending order for a cataloged service and asks the admins
    /// for review.
    pub async fn create_order(&self, user_id: u64, service: &str) -> Result<CreatedOrder> {
        let price = self
            .catalog
            .price(service)
            .await
            .ok_or_else(|| DeskError::UnknownService(service.to_string()))?;
        let order = self.orders.create(user_id, service.to_string()).await?;
        info!(order_id = %order.id, user_id, service, "order created");

        self.send_admins(Notice::OrderSubmitted {
            order: order.clone(),
            price: Some(price),
        })
        .await;

        let other_pending = self
            .orders
            .pending_for_user(user_id)
            .await?
            .into_iter()
            .filter(|o| o.id != order.id)
            .collect();
        Ok(CreatedOrder {
            order,
            price,
            other_pending,
        })
    }

    pub async fn approve_order(&self, actor: u64, order_id: &str) -> Result<Order> {
        self.decide_order(actor, order_id, ReviewAction::Approve).await
    }

    pub async fn reject_order(&self, actor: u64, order_id: &str) -> Result<Order> {
        self.decide_order(actor, order_id, ReviewAction::Reject).await
    }

    async fn decide_order(
        &self,
        actor: u64,
        order_id: &str,
        action: ReviewAction,
    ) -> Result<Order> {
        self.authorize(actor, DenialPolicy::Silent).await?;

        let mut order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                kind: ItemKind::Order,
                id: order_id.to_string(),
            })?;
        // An already-decided order stops here: no overwrite, no duplicate
        // notification to the owner.
        order.status = order.status.decide(action, ItemKind::Order, order_id)?;
        self.orders.update_status(order_id, order.status).await?;
        info!(order_id, admin = actor, action = action.as_str(), "order decided");

        match action {
            ReviewAction::Approve => {
                // Keyed by order id, so a second approval for the same user
                // cannot clobber this association.
                self.sessions
                    .set(order.user_id, awaiting_payment_key(order_id), json!(true))
                    .await?;
                let price = self.catalog.price(&order.service).await;
                self.send_user(
                    order.user_id,
                    Notice::OrderApproved {
                        order: order.clone(),
                        price,
                        payment_methods: self.config.payment_method_names(),
                    },
                )
                .await;
            }
            ReviewAction::Reject => {
                self.send_user(order.user_id, Notice::OrderRejected { order: order.clone() })
                    .await;
            }
        }
        Ok(order)
    }

    /// User-triggered: attaches a payment method to an approved order that is
    /// awaiting one, and returns payout instructions for the chosen method.
    pub async fn select_payment_method(
        &self,
        user_id: u64,
        order_id: &str,
        method: &str,
    ) -> Result<Order> {
        let method = self
            .config
            .payment_method(method)
            .ok_or_else(|| DeskError::InvalidFormat(format!("unknown payment method: {method}")))?
            .clone();

        let key = awaiting_payment_key(order_id);
        let awaiting = self.sessions.get(user_id, &key).await?.is_some();
        let order = self.orders.get(order_id).await?;
        // The awaiting association only ever points at the caller's own
        // approved order; anything else reads as not-found.
        let mut order = match order {
            Some(o) if awaiting && o.user_id == user_id => o,
            _ => {
                return Err(DeskError::NotFound {
                    kind: ItemKind::Order,
                    id: order_id.to_string(),
                });
            }
        };
        if order.status != ReviewStatus::Approved {
            return Err(DeskError::InvalidFormat(format!(
                "order {order_id} is not approved"
            )));
        }

        self.orders
            .set_payment_method(order_id, method.name.clone())
            .await?;
        self.sessions.remove(user_id, &key).await?;
        order.payment_method = Some(method.name.clone());
        order.payment_status = Some(PaymentStatus::Pending);
        info!(order_id, user_id, method = %method.name, "payment method selected");

        self.send_user(
            user_id,
            Notice::PaymentInstructions {
                order: order.clone(),
                method,
            },
        )
        .await;
        Ok(order)
    }

    /// Records a user's claim of payment. Advisory only: admins are notified
    /// and no order field changes.
    pub async fn record_payment_claim(
        &self,
        user_id: u64,
        order_id: &str,
        method: &str,
    ) -> Result<Order> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                kind: ItemKind::Order,
                id: order_id.to_string(),
            })?;
        info!(order_id, user_id, method, "payment claim recorded");
        self.send_admins(Notice::PaymentClaimed {
            order: order.clone(),
            method: method.to_string(),
            claimed_by: user_id,
        })
        .await;
        Ok(order)
    }

    pub async fn list_user_orders(&self, user_id: u64) -> Result<Vec<Order>> {
        self.orders.for_user(user_id).await
    }

    pub async fn pending_orders(&self, user_id: u64) -> Result<Vec<Order>> {
        self.orders.pending_for_user(user_id).await
    }

    pub async fn submit_feedback(&self, user_id: u64, text: &str) -> Result<Feedback> {
        let feedback = self.feedback.add(user_id, text.to_string()).await?;
        info!(feedback_id = feedback.id, user_id, "feedback submitted");
        self.send_admins(Notice::FeedbackSubmitted {
            feedback: feedback.clone(),
        })
        .await;
        Ok(feedback)
    }

    pub async fn approve_feedback(&self, actor: u64, id: FeedbackId) -> Result<Feedback> {
        self.decide_feedback(actor, id, ReviewAction::Approve).await
    }

    pub async fn reject_feedback(&self, actor: u64, id: FeedbackId) -> Result<Feedback> {
        self.decide_feedback(actor, id, ReviewAction::Reject).await
    }

    async fn decide_feedback(
        &self,
        actor: u64,
        id: FeedbackId,
        action: ReviewAction,
    ) -> Result<Feedback> {
        self.authorize(actor, DenialPolicy::Silent).await?;

        let mut feedback = self
            .feedback
            .get(id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                kind: ItemKind::Feedback,
                id: id.to_string(),
            })?;
        feedback.status = feedback
            .status
            .decide(action, ItemKind::Feedback, &id.to_string())?;
        self.feedback.update_status(id, feedback.status).await?;
        info!(feedback_id = id, admin = actor, action = action.as_str(), "feedback decided");
        Ok(feedback)
    }

    /// Admin-only listing of feedback still awaiting review.
    pub async fn pending_feedback(&self, actor: u64) -> Result<Vec<Feedback>> {
        self.authorize(actor, DenialPolicy::Silent).await?;
        self.feedback.pending().await
    }

    /// Admin-only price edit, restricted to the configured allow-list and to
    /// prices with at most two decimal places. Returns the updated list.
    pub async fn set_service_price(
        &self,
        actor: u64,
        service: &str,
        price: Decimal,
    ) -> Result<Vec<(String, Decimal)>> {
        self.authorize(actor, DenialPolicy::Notify).await?;

        if !self.config.is_editable_service(service) {
            return Err(DeskError::InvalidFormat(format!(
                "service is not editable: {service}"
            )));
        }
        if price.is_sign_negative() || price.scale() > 2 {
            return Err(DeskError::InvalidFormat(format!("invalid price: {price}")));
        }
        self.catalog.set_price(service, price).await;
        info!(admin = actor, service, %price, "price updated");
        Ok(self.catalog.prices().await)
    }

    pub async fn get_service_price(&self, service: &str) -> Result<Decimal> {
        self.catalog
            .price(service)
            .await
            .ok_or_else(|| DeskError::UnknownService(service.to_string()))
    }

    pub async fn price_list(&self) -> Vec<(String, Decimal)> {
        self.catalog.prices().await
    }

    /// Admin-only price listing backing the bare `/editprice` command.
    /// Uses the notifying denial policy like the edit itself.
    pub async fn show_prices(&self, actor: u64) -> Result<Vec<(String, Decimal)>> {
        self.authorize(actor, DenialPolicy::Notify).await?;
        Ok(self.catalog.prices().await)
    }

    /// True if the order id currently has an awaiting-payment association for
    /// this user.
    pub async fn is_awaiting_payment(&self, user_id: u64, order_id: &OrderId) -> Result<bool> {
        Ok(self
            .sessions
            .get(user_id, &awaiting_payment_key(order_id))
            .await?
            .is_some())
    }
}
