use crate::domain::notice::Notice;
use crate::domain::ports::Notifier;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Who an outbound notice was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    User(u64),
    Admins,
}

/// One outbound delivery captured by the recording notifier.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub recipient: Recipient,
    pub notice: Notice,
}

/// A notifier that queues deliveries instead of sending them.
///
/// The demo binary drains the queue after each event to print the outbound
/// transcript; tests drain it to assert on notification obligations.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all deliveries queued since the last drain, in send order.
    pub async fn drain(&self) -> Vec<Delivery> {
        let mut deliveries = self.deliveries.lock().await;
        std::mem::take(&mut *deliveries)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_user(&self, user_id: u64, notice: Notice) -> Result<()> {
        let mut deliveries = self.deliveries.lock().await;
        deliveries.push(Delivery {
            recipient: Recipient::User(user_id),
            notice,
        });
        Ok(())
    }

    async fn broadcast_admins(&self, notice: Notice) -> Result<()> {
        let mut deliveries = self.deliveries.lock().await;
        deliveries.push(Delivery {
            recipient: Recipient::Admins,
            notice,
        });
        Ok(())
    }
}

/// A notifier whose sends always fail. Exercises the log-and-swallow path:
/// state changes must survive unreachable recipients.
#[derive(Default, Clone)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify_user(&self, _user_id: u64, _notice: Notice) -> Result<()> {
        Err(std::io::Error::other("recipient unreachable").into())
    }

    async fn broadcast_admins(&self, _notice: Notice) -> Result<()> {
        Err(std::io::Error::other("recipients unreachable").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::Feedback;

    #[tokio::test]
    async fn test_drain_empties_the_queue() {
        let notifier = RecordingNotifier::new();
        let feedback = Feedback::new(1, 9, "hello".to_string());
        notifier
            .broadcast_admins(Notice::FeedbackSubmitted { feedback })
            .await
            .unwrap();

        let first = notifier.drain().await;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].recipient, Recipient::Admins);
        assert!(notifier.drain().await.is_empty());
    }
}
