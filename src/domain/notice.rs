use super::feedback::Feedback;
use super::order::Order;
use crate::config::PaymentMethod;
use rust_decimal::Decimal;

/// A notification obligation produced by a lifecycle transition.
///
/// The engine computes these; the transport layer decides how to render them
/// (inline keyboards, message text). Recipients are chosen by the engine when
/// it dispatches through the `Notifier` port, so a `Notice` only carries the
/// facts of the transition.
#[derive(Debug, Clone)]
pub enum Notice {
    /// A new order awaits review. Broadcast to admins.
    OrderSubmitted { order: Order, price: Option<Decimal> },
    /// The order was approved; the owner should pick a payment method.
    OrderApproved {
        order: Order,
        price: Option<Decimal>,
        payment_methods: Vec<String>,
    },
    /// The order was rejected. Sent to the owner.
    OrderRejected { order: Order },
    /// A payment method was chosen; payout instructions for it.
    PaymentInstructions {
        order: Order,
        method: PaymentMethod,
    },
    /// The user claims to have paid. Broadcast to admins; advisory only.
    PaymentClaimed {
        order: Order,
        method: String,
        claimed_by: u64,
    },
    /// New feedback awaits review. Broadcast to admins.
    FeedbackSubmitted { feedback: Feedback },
    /// Denial notice for admin-gated actions that use the notifying policy.
    AccessDenied { user_id: u64 },
}

impl Notice {
    pub fn kind(&self) -> &'static str {
        match self {
            Notice::OrderSubmitted { .. } => "order_submitted",
            Notice::OrderApproved { .. } => "order_approved",
            Notice::OrderRejected { .. } => "order_rejected",
            Notice::PaymentInstructions { .. } => "payment_instructions",
            Notice::PaymentClaimed { .. } => "payment_claimed",
            Notice::FeedbackSubmitted { .. } => "feedback_submitted",
            Notice::AccessDenied { .. } => "access_denied",
        }
    }

    /// One-line summary used by the transcript writer. Message copy proper is
    /// the transport's concern.
    pub fn detail(&self) -> String {
        match self {
            Notice::OrderSubmitted { order, price } => format!(
                "order={} user={} service={} price={}",
                order.id,
                order.user_id,
                order.service,
                price.map_or_else(|| "?".to_string(), |p| p.to_string()),
            ),
            Notice::OrderApproved {
                order,
                price,
                payment_methods,
            } => format!(
                "order={} service={} price={} methods={}",
                order.id,
                order.service,
                price.map_or_else(|| "?".to_string(), |p| p.to_string()),
                payment_methods.join("|"),
            ),
            Notice::OrderRejected { order } => {
                format!("order={} service={}", order.id, order.service)
            }
            Notice::PaymentInstructions { order, method } => format!(
                "order={} method={} account={} name={}",
                order.id, method.name, method.account_number, method.account_name,
            ),
            Notice::PaymentClaimed {
                order,
                method,
                claimed_by,
            } => format!(
                "order={} user={} service={} method={}",
                order.id, claimed_by, order.service, method,
            ),
            Notice::FeedbackSubmitted { feedback } => format!(
                "feedback={} user={} text={}",
                feedback.id, feedback.user_id, feedback.text,
            ),
            Notice::AccessDenied { user_id } => format!("user={user_id}"),
        }
    }
}
