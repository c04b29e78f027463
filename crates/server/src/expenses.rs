//! Employee endpoints: submit, read, edit and delete expenses, plus the
//! partition listings shared by every role.

use api_types::{
    expense::{ExpenseUpsert, ExpenseView, MessageResponse},
    review::ReviewEntry,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Actor, ExpenseDraft, MoneyCents, Partition};

use crate::{
    ServerError,
    server::ServerState,
    views::{expense_view, review_entry},
};

fn draft(payload: &ExpenseUpsert) -> Result<ExpenseDraft, ServerError> {
    Ok(ExpenseDraft::new(
        &payload.title,
        payload.description.as_deref(),
        MoneyCents::new(payload.amount_minor),
        payload.receipt_url.as_deref(),
    )?)
}

async fn list(
    state: &ServerState,
    actor: &Actor,
    partition: Partition,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.list_partition(actor, partition).await?;
    Ok(Json(expenses.into_iter().map(expense_view).collect()))
}

/// Handle requests for submitting a new expense
pub async fn create(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseUpsert>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state
        .engine
        .create_expense(&actor, draft(&payload)?)
        .await?;
    Ok((StatusCode::CREATED, Json(expense_view(expense))))
}

pub async fn my_expenses(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::MyExpenses).await
}

pub async fn my_pending(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::MyPending).await
}

pub async fn my_rejected(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::MyRejected).await
}

pub async fn pending_manager(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::ManagerPending).await
}

pub async fn approved_by_manager(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::ManagerApproved).await
}

pub async fn manager_history(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::ManagerHistory).await
}

pub async fn pending_finance(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::FinanceToPay).await
}

pub async fn approved_by_finance(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::FinancePaid).await
}

pub async fn finance_history(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    list(&state, &actor, Partition::FinanceHistory).await
}

pub async fn get(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.expense(&actor, id).await?;
    Ok(Json(expense_view(expense)))
}

pub async fn update(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ExpenseUpsert>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .engine
        .update_expense(&actor, id, draft(&payload)?)
        .await?;
    Ok(Json(expense_view(expense)))
}

pub async fn delete(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ServerError> {
    state.engine.delete_expense(&actor, id).await?;
    Ok(Json(MessageResponse {
        message: "Expense deleted successfully".to_string(),
    }))
}

/// Review trail of an expense, oldest first
pub async fn history(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ReviewEntry>>, ServerError> {
    let records = state.engine.review_history(&actor, id).await?;
    Ok(Json(records.into_iter().map(review_entry).collect()))
}
