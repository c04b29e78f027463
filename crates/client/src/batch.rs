//! Batch review actions.
//!
//! A batch is N independent requests fired concurrently. Each one settles on
//! its own: successes are kept, failures are logged and reported, nothing is
//! retried or rolled back.

use std::future::Future;

use api_types::payout::FinanceApproval;
use futures::future::join_all;

use crate::{ClientError, Expense, ExpenseClient, Result, Session, api::require_comment};

/// Result of a batch: updated expenses and the ids that failed, both in
/// input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<Expense>,
    pub failed: Vec<(i64, ClientError)>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

async fn settle<F, Fut>(ids: &[i64], action: &str, op: F) -> BatchOutcome
where
    F: Fn(i64) -> Fut,
    Fut: Future<Output = Result<Expense>>,
{
    let results = join_all(ids.iter().map(|&id| {
        let call = op(id);
        async move { (id, call.await) }
    }))
    .await;

    let mut outcome = BatchOutcome::default();
    for (id, result) in results {
        match result {
            Ok(expense) => outcome.succeeded.push(expense),
            Err(err) => {
                tracing::warn!(expense_id = id, "batch {action} failed: {err}");
                outcome.failed.push((id, err));
            }
        }
    }
    tracing::debug!(
        succeeded = outcome.succeeded.len(),
        failed = outcome.failed.len(),
        "batch {action} settled"
    );
    outcome
}

impl ExpenseClient {
    pub async fn batch_manager_approve(
        &self,
        session: &Session,
        ids: &[i64],
        comment: Option<&str>,
    ) -> BatchOutcome {
        settle(ids, "manager approve", |id| {
            self.manager_approve(session, id, comment)
        })
        .await
    }

    /// Fails without sending anything when the comment is blank.
    pub async fn batch_manager_reject(
        &self,
        session: &Session,
        ids: &[i64],
        comment: &str,
    ) -> Result<BatchOutcome> {
        let comment = require_comment(comment)?;
        Ok(settle(ids, "manager reject", |id| {
            self.manager_reject(session, id, &comment)
        })
        .await)
    }

    pub async fn batch_finance_approve(
        &self,
        session: &Session,
        ids: &[i64],
        approval: &FinanceApproval,
    ) -> BatchOutcome {
        settle(ids, "finance approve", |id| {
            self.finance_approve(session, id, approval)
        })
        .await
    }

    /// Fails without sending anything when the comment is blank.
    pub async fn batch_finance_reject(
        &self,
        session: &Session,
        ids: &[i64],
        comment: &str,
    ) -> Result<BatchOutcome> {
        let comment = require_comment(comment)?;
        Ok(settle(ids, "finance reject", |id| {
            self.finance_reject(session, id, &comment)
        })
        .await)
    }
}
