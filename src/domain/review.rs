use crate::error::{DeskError, ItemKind};
use serde::{Deserialize, Serialize};

/// Review state shared by orders and feedback.
///
/// `Pending` is the only initial state. `Approved` and `Rejected` are
/// terminal: no transition leaves either of them.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// The two decisions an admin can take on a pending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }

    pub fn outcome(&self) -> ReviewStatus {
        match self {
            ReviewAction::Approve => ReviewStatus::Approved,
            ReviewAction::Reject => ReviewStatus::Rejected,
        }
    }
}

impl std::str::FromStr for ReviewAction {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ReviewAction::Approve),
            "reject" => Ok(ReviewAction::Reject),
            other => Err(DeskError::InvalidFormat(format!(
                "unknown review action: {other}"
            ))),
        }
    }
}

impl ReviewStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewStatus::Approved | ReviewStatus::Rejected)
    }

    /// Applies an admin decision, rejecting transitions out of a terminal
    /// state with a typed error. Legality lives here, not in the stores.
    pub fn decide(
        &self,
        action: ReviewAction,
        kind: ItemKind,
        id: &str,
    ) -> Result<ReviewStatus, DeskError> {
        if self.is_terminal() {
            return Err(DeskError::AlreadyDecided {
                kind,
                id: id.to_string(),
                status: self.as_str().to_string(),
            });
        }
        Ok(action.outcome())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
