//! Engine types to wire types.

use api_types::{
    expense::{ExpenseStatus as StatusView, ExpenseView},
    review::{ReviewDecision, ReviewEntry, ReviewStep},
};
use engine::{Decision, ExpenseRequest, ExpenseStatus, ReviewRecord, Role};

pub(crate) fn status_view(status: ExpenseStatus) -> StatusView {
    match status {
        ExpenseStatus::PendingManager => StatusView::PendingManager,
        ExpenseStatus::ApprovedManager => StatusView::ApprovedManager,
        ExpenseStatus::RejectedManager => StatusView::RejectedManager,
        ExpenseStatus::PendingFinance => StatusView::PendingFinance,
        ExpenseStatus::RejectedFinance => StatusView::RejectedFinance,
        ExpenseStatus::Paid => StatusView::Paid,
    }
}

pub(crate) fn expense_view(expense: ExpenseRequest) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        title: expense.title,
        description: expense.description,
        amount_minor: expense.amount.cents(),
        receipt_url: expense.receipt_url,
        status: status_view(expense.status),
        created_at: expense.created_at,
        updated_at: expense.updated_at,
        employee_name: expense.employee_name,
        employee_email: expense.employee_email,
    }
}

pub(crate) fn review_entry(record: ReviewRecord) -> ReviewEntry {
    ReviewEntry {
        step: match record.step {
            Role::Finance => ReviewStep::Finance,
            Role::Manager | Role::Employee => ReviewStep::Manager,
        },
        reviewer_id: record.reviewer_id,
        decision: match record.decision {
            Decision::Approved => ReviewDecision::Approved,
            Decision::Rejected => ReviewDecision::Rejected,
        },
        comment: record.comment,
        payment_reference: record.payment_reference,
        at: record.at,
    }
}
