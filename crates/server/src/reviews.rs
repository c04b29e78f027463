//! Manager and finance decisions.

use api_types::{
    expense::ExpenseView,
    payout::{FinanceApproval, FinanceRejection},
    review::ManagerDecision,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::{Actor, Payout};

use crate::{ServerError, server::ServerState, views::expense_view};

pub async fn approve(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Option<Json<ManagerDecision>>,
) -> Result<Json<ExpenseView>, ServerError> {
    let Json(payload) = payload.unwrap_or_default();
    let expense = state
        .engine
        .manager_approve(&actor, id, payload.comment.as_deref())
        .await?;
    Ok(Json(expense_view(expense)))
}

pub async fn reject(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ManagerDecision>,
) -> Result<Json<ExpenseView>, ServerError> {
    let comment = payload.comment.unwrap_or_default();
    let expense = state.engine.manager_reject(&actor, id, &comment).await?;
    Ok(Json(expense_view(expense)))
}

pub async fn finance_approve(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Option<Json<FinanceApproval>>,
) -> Result<Json<ExpenseView>, ServerError> {
    let Json(payload) = payload.unwrap_or_default();
    let payout = Payout::new(
        payload.note.as_deref(),
        payload.reimbursement_method.as_deref(),
        payload.expected_payout_date,
    )?;
    let expense = state.engine.finance_approve(&actor, id, payout).await?;
    Ok(Json(expense_view(expense)))
}

pub async fn finance_reject(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<FinanceRejection>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .engine
        .finance_reject(&actor, id, &payload.comment)
        .await?;
    Ok(Json(expense_view(expense)))
}
