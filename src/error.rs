use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeskError>;

/// Error taxonomy for the order desk core.
///
/// `NotFound` and `InvalidFormat` are recovered at the dispatch layer and
/// rendered as user-visible error lines. `Unauthorized` is recovered silently
/// (logged, no response to the actor). No variant is fatal to the process.
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("{kind} {id} not found")]
    NotFound { kind: ItemKind, id: String },
    #[error("user {user_id} is not authorized for this action")]
    Unauthorized { user_id: u64 },
    #[error("{kind} {id} was already {status}")]
    AlreadyDecided {
        kind: ItemKind,
        id: String,
        status: String,
    },
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("unknown service: {0}")]
    UnknownService(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The two reviewable item kinds, used in errors and callback payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Order,
    Feedback,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Order => write!(f, "order"),
            ItemKind::Feedback => write!(f, "feedback"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "order" => Ok(ItemKind::Order),
            "feedback" => Ok(ItemKind::Feedback),
            other => Err(DeskError::InvalidFormat(format!(
                "unknown item type: {other}"
            ))),
        }
    }
}
