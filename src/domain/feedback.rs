use super::review::ReviewStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feedback identifier: a monotonic counter owned by the feedback store,
/// independent of the collection's size so ids survive any future deletion.
pub type FeedbackId = u64;

/// Free-text user submission, reviewed through the same two-outcome
/// workflow as orders.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Feedback {
    pub id: FeedbackId,
    pub user_id: u64,
    pub text: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(id: FeedbackId, user_id: u64, text: String) -> Self {
        Self {
            id,
            user_id,
            text,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
