use crate::application::engine::OrderEngine;
use crate::domain::order::Order;
use crate::domain::review::ReviewAction;
use crate::error::{DeskError, ItemKind, Result};
use crate::infrastructure::notify::{Delivery, Recipient, RecordingNotifier};
use crate::interfaces::command::{EditPriceCommand, parse_edit_price};
use crate::interfaces::csv::event_reader::{EventKind, EventRecord};
use crate::interfaces::csv::transcript_writer::OutboundLine;
use crate::interfaces::payload::CallbackPayload;
use rust_decimal::Decimal;
use tracing::error;

/// Transport-side dispatcher: classifies inbound events onto engine
/// operations and renders the outcome as outbound transcript lines.
///
/// Error policy follows the engine taxonomy: `Unauthorized` yields silence,
/// everything else becomes a single error line addressed to the actor. No
/// failure mutates state and none is fatal.
pub struct Dispatcher {
    engine: OrderEngine,
    notifier: RecordingNotifier,
}

fn line(recipient: String, kind: &str, detail: String) -> OutboundLine {
    OutboundLine {
        recipient,
        kind: kind.to_string(),
        detail,
    }
}

fn delivery_line(delivery: Delivery) -> OutboundLine {
    let recipient = match delivery.recipient {
        Recipient::User(id) => id.to_string(),
        Recipient::Admins => "admins".to_string(),
    };
    line(recipient, delivery.notice.kind(), delivery.notice.detail())
}

fn order_summary(order: &Order) -> String {
    let mut summary = format!("{}:{}", order.id, order.status);
    if let Some(method) = &order.payment_method {
        summary.push(':');
        summary.push_str(method);
    }
    summary
}

fn price_list_detail(prices: &[(String, Decimal)]) -> String {
    prices
        .iter()
        .map(|(name, price)| format!("{name}={price}"))
        .collect::<Vec<_>>()
        .join("|")
}

impl Dispatcher {
    pub fn new(engine: OrderEngine, notifier: RecordingNotifier) -> Self {
        Self { engine, notifier }
    }

    /// Processes one inbound event to completion and returns every outbound
    /// line it produced: notifications first, then the reply to the actor.
    pub async fn dispatch(&self, event: EventRecord) -> Vec<OutboundLine> {
        let actor = event.actor;
        let reply = match self.handle(&event).await {
            Ok(reply) => reply,
            Err(DeskError::Unauthorized { .. }) => None,
            Err(e) => {
                if matches!(e, DeskError::InvalidFormat(_)) {
                    error!(actor, data = %event.data, "rejected malformed event");
                }
                Some(line(actor.to_string(), "error", e.to_string()))
            }
        };

        let mut lines: Vec<OutboundLine> = self
            .notifier
            .drain()
            .await
            .into_iter()
            .map(delivery_line)
            .collect();
        lines.extend(reply);
        lines
    }

    async fn handle(&self, event: &EventRecord) -> Result<Option<OutboundLine>> {
        let actor = event.actor;
        let data = event.data.trim();

        match event.kind {
            EventKind::Order => {
                let created = self.engine.create_order(actor, data).await?;
                Ok(Some(line(
                    actor.to_string(),
                    "order_created",
                    format!(
                        "order={} service={} price={} other_pending={}",
                        created.order.id,
                        created.order.service,
                        created.price,
                        created.other_pending.len(),
                    ),
                )))
            }
            EventKind::Orders => {
                let orders = self.engine.list_user_orders(actor).await?;
                let detail = if orders.is_empty() {
                    "none".to_string()
                } else {
                    orders.iter().map(order_summary).collect::<Vec<_>>().join("|")
                };
                Ok(Some(line(actor.to_string(), "orders", detail)))
            }
            EventKind::Feedback => {
                if data.is_empty() {
                    return Err(DeskError::InvalidFormat("empty feedback".to_string()));
                }
                let feedback = self.engine.submit_feedback(actor, data).await?;
                Ok(Some(line(
                    actor.to_string(),
                    "feedback_received",
                    format!("feedback={}", feedback.id),
                )))
            }
            EventKind::Command => match parse_edit_price(data)? {
                EditPriceCommand::ShowPrices => {
                    let prices = self.engine.show_prices(actor).await?;
                    Ok(Some(line(
                        actor.to_string(),
                        "price_list",
                        price_list_detail(&prices),
                    )))
                }
                EditPriceCommand::Set { service, price } => {
                    let prices = self.engine.set_service_price(actor, &service, price).await?;
                    Ok(Some(line(
                        actor.to_string(),
                        "price_updated",
                        format!("service={service} price={price} list={}", price_list_detail(&prices)),
                    )))
                }
            },
            EventKind::Callback => self.handle_callback(actor, data).await,
        }
    }

    async fn handle_callback(&self, actor: u64, data: &str) -> Result<Option<OutboundLine>> {
        match CallbackPayload::decode(data)? {
            CallbackPayload::Review { action, item, id } => {
                let detail = match item {
                    ItemKind::Order => {
                        let order = match action {
                            ReviewAction::Approve => self.engine.approve_order(actor, &id).await?,
                            ReviewAction::Reject => self.engine.reject_order(actor, &id).await?,
                        };
                        format!("order={} status={}", order.id, order.status)
                    }
                    ItemKind::Feedback => {
                        let feedback_id = id
                            .parse::<u64>()
                            .map_err(|_| DeskError::InvalidFormat(format!("bad feedback id: {id}")))?;
                        let feedback = match action {
                            ReviewAction::Approve => {
                                self.engine.approve_feedback(actor, feedback_id).await?
                            }
                            ReviewAction::Reject => {
                                self.engine.reject_feedback(actor, feedback_id).await?
                            }
                        };
                        format!("feedback={} status={}", feedback.id, feedback.status)
                    }
                };
                Ok(Some(line(actor.to_string(), "review_done", detail)))
            }
            CallbackPayload::SelectPayment { method, order_id } => {
                // The payment-instructions notice to the owner is the reply.
                self.engine
                    .select_payment_method(actor, &order_id, &method)
                    .await?;
                Ok(None)
            }
            CallbackPayload::ConfirmPayment { method, order_id } => {
                let order = self
                    .engine
                    .record_payment_claim(actor, &order_id, &method)
                    .await?;
                Ok(Some(line(
                    actor.to_string(),
                    "claim_ack",
                    format!("order={} method={method}", order.id),
                )))
            }
        }
    }
}
