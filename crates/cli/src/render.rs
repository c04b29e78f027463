//! Plain text rendering.

use api_types::review::{ReviewDecision, ReviewEntry, ReviewStep};
use client::{BatchOutcome, Dashboard, Expense};

pub fn expense_line(expense: &Expense) -> String {
    format!(
        "{:<9} {:<22} {:>14}  {} ({})",
        expense.reference(),
        expense.status.label(),
        expense.amount.to_string(),
        expense.title,
        expense.employee_name
    )
}

pub fn expense_detail(expense: &Expense) -> String {
    let mut lines = vec![
        format!("{}  {}", expense.reference(), expense.title),
        format!("status:    {}", expense.status.label()),
        format!("amount:    {}", expense.amount),
        format!(
            "employee:  {} <{}>",
            expense.employee_name, expense.employee_email
        ),
        format!("submitted: {}", expense.created_at.format("%Y-%m-%d %H:%M")),
        format!("updated:   {}", expense.updated_at.format("%Y-%m-%d %H:%M")),
    ];
    if let Some(description) = &expense.description {
        lines.push(format!("details:   {description}"));
    }
    if let Some(receipt) = &expense.receipt_url {
        lines.push(format!("receipt:   {receipt}"));
    }
    if expense.can_edit() {
        lines.push("can be edited or deleted".to_string());
    }
    lines.join("\n")
}

pub fn review_line(entry: &ReviewEntry) -> String {
    let step = match entry.step {
        ReviewStep::Manager => "manager",
        ReviewStep::Finance => "finance",
    };
    let decision = match entry.decision {
        ReviewDecision::Approved => "approved",
        ReviewDecision::Rejected => "rejected",
    };
    let mut line = format!(
        "{}  {step} #{} {decision}",
        entry.at.format("%Y-%m-%d %H:%M"),
        entry.reviewer_id
    );
    if let Some(comment) = &entry.comment {
        line.push_str(&format!(": {comment}"));
    }
    if let Some(reference) = &entry.payment_reference {
        line.push_str(&format!(" [{reference}]"));
    }
    line
}

pub fn dashboard(board: &Dashboard) -> String {
    let mut out = Vec::new();
    for tab in &board.tabs {
        out.push(format!(
            "== {} ({}, {})",
            tab.partition.label(),
            tab.summary.count,
            tab.summary.total
        ));
        out.extend(tab.expenses.iter().map(expense_line));
    }
    out.join("\n")
}

pub fn batch(action: &str, outcome: &BatchOutcome) -> String {
    let mut out = vec![format!(
        "{action}: {} succeeded, {} failed",
        outcome.succeeded.len(),
        outcome.failed.len()
    )];
    out.extend(outcome.succeeded.iter().map(expense_line));
    out.extend(
        outcome
            .failed
            .iter()
            .map(|(id, err)| format!("{:<9} failed: {err}", engine::expense_reference(*id))),
    );
    out.join("\n")
}
