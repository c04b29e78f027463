use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{
    Actor, EngineError, ExpenseDraft, ExpenseRequest, Partition, ResultEngine, Role, expenses,
    finance_actions, manager_actions,
};

use super::{Engine, with_tx};

impl Engine {
    /// Submits a new expense. The expense starts in `PENDING_MANAGER`.
    ///
    /// Authorization: employees only.
    pub async fn create_expense(
        &self,
        actor: &Actor,
        draft: ExpenseDraft,
    ) -> ResultEngine<ExpenseRequest> {
        actor.require_role(Role::Employee)?;
        with_tx!(self, |db_tx| {
            let model = expenses::ActiveModel::submitted(draft, actor, Utc::now())
                .insert(&db_tx)
                .await?;
            tracing::debug!(expense_id = model.id, employee_id = actor.id, "expense submitted");
            ExpenseRequest::try_from(model)
        })
    }

    /// Lists the expenses of a dashboard partition, newest first.
    ///
    /// Employee partitions are restricted to the actor's own expenses; the
    /// other partitions require the partition role.
    pub async fn list_partition(
        &self,
        actor: &Actor,
        partition: Partition,
    ) -> ResultEngine<Vec<ExpenseRequest>> {
        if !partition.is_owner_scoped() {
            actor.require_role(partition.role())?;
        }
        let statuses: Vec<&'static str> = partition
            .stored_statuses()
            .into_iter()
            .map(|status| status.as_str())
            .collect();

        with_tx!(self, |db_tx| {
            let mut query =
                expenses::Entity::find().filter(expenses::Column::Status.is_in(statuses));
            if partition.is_owner_scoped() {
                query = query.filter(expenses::Column::EmployeeId.eq(actor.id));
            }
            let models = query
                .order_by_desc(expenses::Column::CreatedAt)
                .order_by_desc(expenses::Column::Id)
                .all(&db_tx)
                .await?;
            models
                .into_iter()
                .map(ExpenseRequest::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Returns a single expense.
    ///
    /// Authorization: the owner, any manager, any finance user.
    pub async fn expense(&self, actor: &Actor, expense_id: i64) -> ResultEngine<ExpenseRequest> {
        with_tx!(self, |db_tx| {
            self.require_readable_expense(&db_tx, actor, expense_id)
                .await
        })
    }

    /// Replaces the editable fields of an expense.
    ///
    /// Only the owner can edit, and only while the expense is pending manager
    /// review or rejected. Editing a rejected expense resubmits it to the
    /// manager.
    pub async fn update_expense(
        &self,
        actor: &Actor,
        expense_id: i64,
        draft: ExpenseDraft,
    ) -> ResultEngine<ExpenseRequest> {
        with_tx!(self, |db_tx| {
            let current = self
                .require_owned_expense(&db_tx, actor, expense_id, "update")
                .await?;
            let next = current.status.after_edit()?;

            let updated = expenses::Entity::update_many()
                .col_expr(expenses::Column::Title, Expr::value(draft.title))
                .col_expr(expenses::Column::Description, Expr::value(draft.description))
                .col_expr(
                    expenses::Column::AmountMinor,
                    Expr::value(draft.amount.cents()),
                )
                .col_expr(expenses::Column::ReceiptUrl, Expr::value(draft.receipt_url))
                .col_expr(expenses::Column::Status, Expr::value(next.as_str()))
                .col_expr(expenses::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(expenses::Column::Id.eq(expense_id))
                .filter(expenses::Column::Status.eq(current.status.as_str()))
                .exec(&db_tx)
                .await?;
            if updated.rows_affected == 0 {
                return Err(EngineError::NotEditable(
                    "expense changed while it was being updated".to_string(),
                ));
            }
            if current.status != next {
                tracing::debug!(expense_id, from = %current.status, to = %next, "expense resubmitted");
            }

            self.require_expense(&db_tx, expense_id).await
        })
    }

    /// Deletes an expense and its review trail.
    ///
    /// Same eligibility as [`Engine::update_expense`].
    pub async fn delete_expense(&self, actor: &Actor, expense_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let current = self
                .require_owned_expense(&db_tx, actor, expense_id, "delete")
                .await?;
            if !current.is_editable() {
                return Err(EngineError::NotEditable(format!(
                    "only pending or rejected expenses can be deleted (status is {})",
                    current.status
                )));
            }

            manager_actions::Entity::delete_many()
                .filter(manager_actions::Column::ExpenseId.eq(expense_id))
                .exec(&db_tx)
                .await?;
            finance_actions::Entity::delete_many()
                .filter(finance_actions::Column::ExpenseId.eq(expense_id))
                .exec(&db_tx)
                .await?;
            let deleted = expenses::Entity::delete_many()
                .filter(expenses::Column::Id.eq(expense_id))
                .filter(expenses::Column::Status.eq(current.status.as_str()))
                .exec(&db_tx)
                .await?;
            if deleted.rows_affected == 0 {
                return Err(EngineError::NotEditable(
                    "expense changed while it was being deleted".to_string(),
                ));
            }
            tracing::debug!(expense_id, "expense deleted");
            Ok(())
        })
    }
}
