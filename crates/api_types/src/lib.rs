use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Header names of the development-mode identity.
pub mod headers {
    /// Acting role: `EMPLOYEE`, `MANAGER` or `FINANCE` (case insensitive).
    pub const DEV_USER_ROLE: &str = "x-dev-user-role";
    /// Optional: pick a specific user instead of the default one for the role.
    pub const DEV_USER_ID: &str = "x-dev-user-id";
}

/// Amounts travel as JSON numbers with at most two decimals (`42.5`) and are
/// held as integer cents on both sides.
pub mod amount {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Largest amount accepted on the wire, in cents (precision 12, scale 2).
    pub const MAX_MINOR: i64 = 999_999_999_999;

    pub fn serialize<S: Serializer>(minor: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*minor as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(D::Error::custom("amount must be a finite number"));
        }
        let rounded = (value * 100.0).round();
        if rounded.abs() > MAX_MINOR as f64 {
            return Err(D::Error::custom("amount too large"));
        }
        // `n / 100.0` is the nearest double to any two-decimal literal, so
        // anything else carries extra decimals.
        if rounded / 100.0 != value {
            return Err(D::Error::custom("amount must have at most two decimals"));
        }
        Ok(rounded as i64)
    }
}

pub mod expense {
    use super::*;

    /// Workflow status as exchanged with the service.
    ///
    /// `APPROVED_MANAGER` is never written by the service but is accepted on
    /// read; clients treat it like `PENDING_FINANCE`.
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

    /// Request body for creating or editing an expense.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpsert {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(rename = "amount", with = "crate::amount")]
        pub amount_minor: i64,
        #[serde(default)]
        pub receipt_url: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: i64,
        pub title: String,
        pub description: Option<String>,
        #[serde(rename = "amount", with = "crate::amount")]
        pub amount_minor: i64,
        pub receipt_url: Option<String>,
        pub status: ExpenseStatus,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
        pub employee_name: String,
        pub employee_email: String,
    }

    /// Generic `{ "message": ... }` body, used for errors and for delete.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MessageResponse {
        pub message: String,
    }
}

pub mod review {
    use super::*;

    /// Manager approve/reject body. The comment is required for reject.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ManagerDecision {
        #[serde(default)]
        pub comment: Option<String>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ReviewStep {
        Manager,
        Finance,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ReviewDecision {
        Approved,
        Rejected,
    }

    /// One entry of `GET /api/expenses/{id}/history`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReviewEntry {
        pub step: ReviewStep,
        pub reviewer_id: i64,
        pub decision: ReviewDecision,
        pub comment: Option<String>,
        pub payment_reference: Option<String>,
        pub at: DateTime<Utc>,
    }
}

pub mod payout {
    use super::*;

    /// Finance approval with optional payout details.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinanceApproval {
        #[serde(default)]
        pub note: Option<String>,
        #[serde(default)]
        pub reimbursement_method: Option<String>,
        /// `YYYY-MM-DD`.
        #[serde(default)]
        pub expected_payout_date: Option<NaiveDate>,
    }

    /// Finance rejection; the comment is mandatory.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FinanceRejection {
        pub comment: String,
    }
}
