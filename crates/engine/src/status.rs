//! Expense workflow status.
//!
//! ```text
//! PENDING_MANAGER ──approve──▶ PENDING_FINANCE ──approve──▶ PAID
//!        │                            │
//!        └──reject──▶ REJECTED_MANAGER └──reject──▶ REJECTED_FINANCE
//! ```
//!
//! Rejected expenses go back to `PENDING_MANAGER` when their owner edits
//! them. `APPROVED_MANAGER` is an alias of `PENDING_FINANCE`: it can be read
//! but the service never writes it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    PendingManager,
    ApprovedManager,
    RejectedManager,
    PendingFinance,
    RejectedFinance,
    Paid,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 6] = [
        ExpenseStatus::PendingManager,
        ExpenseStatus::ApprovedManager,
        ExpenseStatus::RejectedManager,
        ExpenseStatus::PendingFinance,
        ExpenseStatus::RejectedFinance,
        ExpenseStatus::Paid,
    ];

    /// Status of a freshly submitted expense.
    pub const INITIAL: ExpenseStatus = ExpenseStatus::PendingManager;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingManager => "PENDING_MANAGER",
            Self::ApprovedManager => "APPROVED_MANAGER",
            Self::RejectedManager => "REJECTED_MANAGER",
            Self::PendingFinance => "PENDING_FINANCE",
            Self::RejectedFinance => "REJECTED_FINANCE",
            Self::Paid => "PAID",
        }
    }

    /// Human readable label used by dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::PendingManager => "Pending Manager Review",
            Self::ApprovedManager => "Approved by Manager",
            Self::RejectedManager => "Rejected by Manager",
            Self::PendingFinance => "Pending Finance Review",
            Self::RejectedFinance => "Rejected by Finance",
            Self::Paid => "Paid",
        }
    }

    /// Folds `APPROVED_MANAGER` into `PENDING_FINANCE`.
    ///
    /// Every predicate and partition is defined on canonical statuses.
    pub fn canonical(self) -> Self {
        match self {
            Self::ApprovedManager => Self::PendingFinance,
            other => other,
        }
    }

    /// Edit/delete eligibility: only pending-manager and rejected expenses
    /// can be changed by their owner.
    pub fn is_editable(self) -> bool {
        matches!(
            self.canonical(),
            Self::PendingManager | Self::RejectedManager | Self::RejectedFinance
        )
    }

    /// Status after the owner edits the expense.
    ///
    /// A rejected expense is resubmitted to the manager; a pending one stays
    /// pending. Locked statuses are refused.
    pub fn after_edit(self) -> Result<Self, EngineError> {
        match self.canonical() {
            Self::PendingManager | Self::RejectedManager | Self::RejectedFinance => {
                Ok(Self::PendingManager)
            }
            other => Err(EngineError::NotEditable(format!(
                "only pending or rejected expenses can be updated (status is {other})"
            ))),
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ExpenseStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| EngineError::InvalidStatus(format!("unknown status: {value}")))
    }
}
