use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{
    Action, Actor, Decision, EngineError, ExpenseRequest, Payout, ResultEngine, ReviewRecord,
    Role, expenses, finance_actions, lifecycle::MAX_COMMENT_LEN, manager_actions,
    validate_optional_text, validate_rejection_comment,
};

use super::{Engine, with_tx};

impl Engine {
    /// Moves the expense along `action`, guarding against a concurrent
    /// reviewer having moved it first.
    async fn apply_action(
        &self,
        db: &DatabaseTransaction,
        actor: &Actor,
        expense_id: i64,
        action: Action,
    ) -> ResultEngine<ExpenseRequest> {
        actor.require_role(action.actor_role())?;
        let current = self.require_expense(db, expense_id).await?;
        let next = current.status.transition(action, actor.role)?;

        let updated = expenses::Entity::update_many()
            .col_expr(expenses::Column::Status, Expr::value(next.as_str()))
            .col_expr(expenses::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(expenses::Column::Id.eq(expense_id))
            .filter(expenses::Column::Status.eq(current.status.as_str()))
            .exec(db)
            .await?;
        if updated.rows_affected == 0 {
            return Err(EngineError::InvalidTransition(format!(
                "expense {expense_id} was already reviewed"
            )));
        }
        tracing::debug!(
            expense_id,
            reviewer_id = actor.id,
            %action,
            from = %current.status,
            to = %next,
            "expense reviewed"
        );

        self.require_expense(db, expense_id).await
    }

    async fn record_manager_action(
        &self,
        db: &DatabaseTransaction,
        actor: &Actor,
        expense_id: i64,
        decision: Decision,
        comment: Option<String>,
    ) -> ResultEngine<()> {
        manager_actions::ActiveModel {
            id: ActiveValue::NotSet,
            expense_id: ActiveValue::Set(expense_id),
            manager_id: ActiveValue::Set(actor.id),
            action: ActiveValue::Set(decision.as_str().to_string()),
            comment: ActiveValue::Set(comment),
            action_at: ActiveValue::Set(Utc::now()),
        }
        .insert(db)
        .await?;
        Ok(())
    }

    async fn record_finance_action(
        &self,
        db: &DatabaseTransaction,
        actor: &Actor,
        expense_id: i64,
        decision: Decision,
        note: Option<String>,
        payment_reference: Option<String>,
    ) -> ResultEngine<()> {
        finance_actions::ActiveModel {
            id: ActiveValue::NotSet,
            expense_id: ActiveValue::Set(expense_id),
            finance_id: ActiveValue::Set(actor.id),
            action: ActiveValue::Set(decision.as_str().to_string()),
            payment_reference: ActiveValue::Set(payment_reference),
            note: ActiveValue::Set(note),
            action_at: ActiveValue::Set(Utc::now()),
        }
        .insert(db)
        .await?;
        Ok(())
    }

    /// `PENDING_MANAGER` → `PENDING_FINANCE`. The comment is optional.
    pub async fn manager_approve(
        &self,
        actor: &Actor,
        expense_id: i64,
        comment: Option<&str>,
    ) -> ResultEngine<ExpenseRequest> {
        let comment = validate_optional_text(comment, MAX_COMMENT_LEN, "comment")?;
        with_tx!(self, |db_tx| {
            let expense = self
                .apply_action(&db_tx, actor, expense_id, Action::ManagerApprove)
                .await?;
            self.record_manager_action(&db_tx, actor, expense_id, Decision::Approved, comment)
                .await?;
            Ok(expense)
        })
    }

    /// `PENDING_MANAGER` → `REJECTED_MANAGER`. The comment is required.
    pub async fn manager_reject(
        &self,
        actor: &Actor,
        expense_id: i64,
        comment: &str,
    ) -> ResultEngine<ExpenseRequest> {
        let comment = validate_rejection_comment(comment)?;
        with_tx!(self, |db_tx| {
            let expense = self
                .apply_action(&db_tx, actor, expense_id, Action::ManagerReject)
                .await?;
            self.record_manager_action(
                &db_tx,
                actor,
                expense_id,
                Decision::Rejected,
                Some(comment),
            )
            .await?;
            Ok(expense)
        })
    }

    /// `PENDING_FINANCE` → `PAID`, recording the payout details.
    pub async fn finance_approve(
        &self,
        actor: &Actor,
        expense_id: i64,
        payout: Payout,
    ) -> ResultEngine<ExpenseRequest> {
        let payment_reference = payout.payment_reference();
        with_tx!(self, |db_tx| {
            let expense = self
                .apply_action(&db_tx, actor, expense_id, Action::FinanceApprove)
                .await?;
            self.record_finance_action(
                &db_tx,
                actor,
                expense_id,
                Decision::Approved,
                payout.note,
                payment_reference,
            )
            .await?;
            Ok(expense)
        })
    }

    /// `PENDING_FINANCE` → `REJECTED_FINANCE`. The comment is required.
    pub async fn finance_reject(
        &self,
        actor: &Actor,
        expense_id: i64,
        comment: &str,
    ) -> ResultEngine<ExpenseRequest> {
        let comment = validate_rejection_comment(comment)?;
        with_tx!(self, |db_tx| {
            let expense = self
                .apply_action(&db_tx, actor, expense_id, Action::FinanceReject)
                .await?;
            self.record_finance_action(
                &db_tx,
                actor,
                expense_id,
                Decision::Rejected,
                Some(comment),
                None,
            )
            .await?;
            Ok(expense)
        })
    }

    /// Review trail of an expense, oldest first.
    ///
    /// Authorization: same as reading the expense.
    pub async fn review_history(
        &self,
        actor: &Actor,
        expense_id: i64,
    ) -> ResultEngine<Vec<ReviewRecord>> {
        with_tx!(self, |db_tx| {
            self.require_readable_expense(&db_tx, actor, expense_id)
                .await?;

            let manager_rows = manager_actions::Entity::find()
                .filter(manager_actions::Column::ExpenseId.eq(expense_id))
                .order_by_asc(manager_actions::Column::Id)
                .all(&db_tx)
                .await?;
            let finance_rows = finance_actions::Entity::find()
                .filter(finance_actions::Column::ExpenseId.eq(expense_id))
                .order_by_asc(finance_actions::Column::Id)
                .all(&db_tx)
                .await?;

            let mut records = manager_rows
                .into_iter()
                .map(ReviewRecord::try_from)
                .chain(finance_rows.into_iter().map(ReviewRecord::try_from))
                .collect::<ResultEngine<Vec<_>>>()?;
            // Manager steps sort before finance steps taken in the same instant.
            records.sort_by_key(|record| (record.at, record.step != Role::Manager));
            Ok(records)
        })
    }
}
