use serde::{Deserialize, Serialize};
use shared::errors::RepositoryError;
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Order lifecycle.
///
/// ```text
/// pending ──► processing ──► done
///    │            │
///    └──► cancelled ◄┘
/// ```
///
/// `done` and `cancelled` are terminal. Staying in the current state is
/// always accepted and only refreshes `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Done,
    Cancelled,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized order status '{0}'")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Done,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Done => "done",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Done | OrderStatus::Cancelled)
    }

    /// Only orders that have progressed count towards revenue.
    pub fn is_revenue_eligible(self) -> bool {
        matches!(self, OrderStatus::Processing | OrderStatus::Done)
    }

    /// Completed orders are kept as an audit record.
    pub fn is_deletable(self) -> bool {
        self != OrderStatus::Done
    }

    /// [`OrderStatus::can_transition_to`] as a storage-level `Conflict`.
    pub fn ensure_transition(self, next: OrderStatus) -> Result<(), RepositoryError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(RepositoryError::Conflict(format!(
                "cannot move an order from {self} to {next}"
            )))
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        self == next
            || matches!(
                (self, next),
                (Pending, Processing) | (Processing, Done) | (Pending, Cancelled) | (Processing, Cancelled)
            )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
