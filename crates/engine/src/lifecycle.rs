//! Workflow actions and the rules attached to them.

use std::fmt;

use chrono::NaiveDate;

use crate::{EngineError, ExpenseStatus, ResultEngine, Role};

/// Maximum length of manager comments, finance comments and finance notes.
pub const MAX_COMMENT_LEN: usize = 1000;
/// Maximum length of the reimbursement method.
pub const MAX_METHOD_LEN: usize = 200;

/// A decision taken on an expense by a reviewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    ManagerApprove,
    ManagerReject,
    FinanceApprove,
    FinanceReject,
}

impl Action {
    /// The only role allowed to take this action.
    pub fn actor_role(self) -> Role {
        match self {
            Self::ManagerApprove | Self::ManagerReject => Role::Manager,
            Self::FinanceApprove | Self::FinanceReject => Role::Finance,
        }
    }

    pub fn is_rejection(self) -> bool {
        matches!(self, Self::ManagerReject | Self::FinanceReject)
    }

    fn verb(self) -> &'static str {
        if self.is_rejection() { "reject" } else { "approve" }
    }

    fn past_tense(self) -> &'static str {
        if self.is_rejection() { "rejected" } else { "approved" }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ManagerApprove => "manager approve",
            Self::ManagerReject => "manager reject",
            Self::FinanceApprove => "finance approve",
            Self::FinanceReject => "finance reject",
        };
        f.write_str(name)
    }
}

impl ExpenseStatus {
    /// Applies `action`, taken by someone acting as `role`, to this status.
    ///
    /// | From            | Action          | To               |
    /// |-----------------|-----------------|------------------|
    /// | PENDING_MANAGER | manager approve | PENDING_FINANCE  |
    /// | PENDING_MANAGER | manager reject  | REJECTED_MANAGER |
    /// | PENDING_FINANCE | finance approve | PAID             |
    /// | PENDING_FINANCE | finance reject  | REJECTED_FINANCE |
    pub fn transition(self, action: Action, role: Role) -> ResultEngine<ExpenseStatus> {
        if action.actor_role() != role {
            return Err(EngineError::Forbidden(format!(
                "only {} users can {} expenses at this step",
                action.actor_role().as_str().to_lowercase(),
                action.verb()
            )));
        }

        match (self.canonical(), action) {
            (Self::PendingManager, Action::ManagerApprove) => Ok(Self::PendingFinance),
            (Self::PendingManager, Action::ManagerReject) => Ok(Self::RejectedManager),
            (Self::PendingFinance, Action::FinanceApprove) => Ok(Self::Paid),
            (Self::PendingFinance, Action::FinanceReject) => Ok(Self::RejectedFinance),
            (current, action) => {
                let required = match action {
                    Action::ManagerApprove | Action::ManagerReject => Self::PendingManager,
                    Action::FinanceApprove | Action::FinanceReject => Self::PendingFinance,
                };
                Err(EngineError::InvalidTransition(format!(
                    "only expenses with {required} status can be {} (status is {current})",
                    action.past_tense()
                )))
            }
        }
    }
}

/// A rejection must carry a reason: empty and whitespace-only comments are
/// refused. Returns the trimmed comment.
pub fn validate_rejection_comment(comment: &str) -> ResultEngine<String> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(
            "comment is required for rejection".to_string(),
        ));
    }
    check_len(trimmed, MAX_COMMENT_LEN, "comment")?;
    Ok(trimmed.to_string())
}

/// Optional free text: trimmed, empty becomes `None`, length bounded.
pub fn validate_optional_text(
    value: Option<&str>,
    max_len: usize,
    label: &str,
) -> ResultEngine<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    check_len(value, max_len, label)?;
    Ok(Some(value.to_string()))
}

fn check_len(value: &str, max_len: usize, label: &str) -> ResultEngine<()> {
    if value.chars().count() > max_len {
        return Err(EngineError::Validation(format!(
            "{label} cannot exceed {max_len} characters"
        )));
    }
    Ok(())
}

/// Payout details attached to a finance approval.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payout {
    pub note: Option<String>,
    pub reimbursement_method: Option<String>,
    pub expected_payout_date: Option<NaiveDate>,
}

impl Payout {
    /// Normalizes and validates the optional fields.
    pub fn new(
        note: Option<&str>,
        reimbursement_method: Option<&str>,
        expected_payout_date: Option<NaiveDate>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            note: validate_optional_text(note, MAX_COMMENT_LEN, "note")?,
            reimbursement_method: validate_optional_text(
                reimbursement_method,
                MAX_METHOD_LEN,
                "reimbursement method",
            )?,
            expected_payout_date,
        })
    }

    /// `Method: Bank Transfer | Expected Payout: 2026-01-31`, or `None` when
    /// neither detail is present.
    pub fn payment_reference(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(2);
        if let Some(method) = self.reimbursement_method.as_deref() {
            parts.push(format!("Method: {method}"));
        }
        if let Some(date) = self.expected_payout_date {
            parts.push(format!("Expected Payout: {}", date.format("%Y-%m-%d")));
        }
        (!parts.is_empty()).then(|| parts.join(" | "))
    }
}

/// Short display reference of an expense: `EXP-007`, `EXP-1234`.
pub fn expense_reference(id: i64) -> String {
    format!("EXP-{id:03}")
}
