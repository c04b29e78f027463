use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Actor, EngineError, ExpenseRequest, ResultEngine, Role, expenses, users};

use super::{Engine, with_tx};

impl Engine {
    /// Resolves the acting user of a request.
    ///
    /// With `user_id` the stored user is returned with its stored role.
    /// Otherwise the user with the lowest id holding `role` acts.
    pub async fn resolve_actor(&self, role: Role, user_id: Option<i64>) -> ResultEngine<Actor> {
        with_tx!(self, |db_tx| {
            let model = match user_id {
                Some(id) => users::Entity::find_by_id(id)
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::UnknownUser(format!("no user with id {id}")))?,
                None => users::Entity::find()
                    .filter(users::Column::Role.eq(role.as_str()))
                    .order_by_asc(users::Column::Id)
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| {
                        EngineError::UnknownUser(format!("no user with role {role}"))
                    })?,
            };
            Actor::try_from(model)
        })
    }

    pub(super) async fn require_expense(
        &self,
        db: &DatabaseTransaction,
        expense_id: i64,
    ) -> ResultEngine<ExpenseRequest> {
        let model = expenses::Entity::find_by_id(expense_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {expense_id}")))?;
        ExpenseRequest::try_from(model)
    }

    /// Employees only see their own expenses; reviewers see every expense.
    pub(super) async fn require_readable_expense(
        &self,
        db: &DatabaseTransaction,
        actor: &Actor,
        expense_id: i64,
    ) -> ResultEngine<ExpenseRequest> {
        let expense = self.require_expense(db, expense_id).await?;
        if actor.role == Role::Employee && !expense.is_owned_by(actor) {
            return Err(EngineError::Forbidden(
                "you can only view your own expenses".to_string(),
            ));
        }
        Ok(expense)
    }

    pub(super) async fn require_owned_expense(
        &self,
        db: &DatabaseTransaction,
        actor: &Actor,
        expense_id: i64,
        verb: &str,
    ) -> ResultEngine<ExpenseRequest> {
        let expense = self.require_expense(db, expense_id).await?;
        if !expense.is_owned_by(actor) {
            return Err(EngineError::Forbidden(format!(
                "you can only {verb} your own expenses"
            )));
        }
        Ok(expense)
    }
}
