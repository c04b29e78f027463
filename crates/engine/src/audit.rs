//! Review trail of an expense.
//!
//! Every manager or finance decision leaves a row behind; the rows are read
//! back as [`ReviewRecord`]s, oldest first.

use chrono::{DateTime, Utc};

use crate::{EngineError, Role, finance_actions, manager_actions};

/// Outcome of a review step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl TryFrom<&str> for Decision {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(EngineError::InvalidStatus(format!(
                "unknown review decision: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRecord {
    pub expense_id: i64,
    /// `Manager` or `Finance`.
    pub step: Role,
    pub reviewer_id: i64,
    pub decision: Decision,
    pub comment: Option<String>,
    pub payment_reference: Option<String>,
    pub at: DateTime<Utc>,
}

impl TryFrom<manager_actions::Model> for ReviewRecord {
    type Error = EngineError;

    fn try_from(model: manager_actions::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            decision: Decision::try_from(model.action.as_str())?,
            expense_id: model.expense_id,
            step: Role::Manager,
            reviewer_id: model.manager_id,
            comment: model.comment,
            payment_reference: None,
            at: model.action_at,
        })
    }
}

impl TryFrom<finance_actions::Model> for ReviewRecord {
    type Error = EngineError;

    fn try_from(model: finance_actions::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            decision: Decision::try_from(model.action.as_str())?,
            expense_id: model.expense_id,
            step: Role::Finance,
            reviewer_id: model.finance_id,
            comment: model.note,
            payment_reference: model.payment_reference,
            at: model.action_at,
        })
    }
}
