use api_types::{expense::ExpenseUpsert, payout::FinanceApproval};
use client::{ExpenseClient, Session};

use crate::{
    cli::{Command, ExpenseArgs},
    error::{AppError, Result},
    render,
};

fn upsert(args: ExpenseArgs) -> ExpenseUpsert {
    ExpenseUpsert {
        title: args.title,
        description: args.description,
        amount_minor: args.amount.cents(),
        receipt_url: args.receipt_url,
    }
}

/// Refuses locally when the expense is locked; the service would refuse too.
async fn require_editable(client: &ExpenseClient, session: &Session, id: i64) -> Result<()> {
    let expense = client.expense(session, id).await?;
    if !expense.can_edit() {
        return Err(AppError::Usage(format!(
            "{} is {} and can no longer be changed",
            expense.reference(),
            expense.status.label()
        )));
    }
    Ok(())
}

/// Runs a command and returns the text to print.
pub async fn run(client: &ExpenseClient, session: &Session, command: Command) -> Result<String> {
    let output = match command {
        Command::Dashboard => render::dashboard(&client.dashboard(session).await?),
        Command::List { partition } => {
            let expenses = client.list(session, partition.into()).await?;
            if expenses.is_empty() {
                "no expenses".to_string()
            } else {
                expenses
                    .iter()
                    .map(render::expense_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Show { id } => render::expense_detail(&client.expense(session, id).await?),
        Command::History { id } => {
            let entries = client.history(session, id).await?;
            if entries.is_empty() {
                "not reviewed yet".to_string()
            } else {
                entries
                    .iter()
                    .map(render::review_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Submit(args) => {
            render::expense_line(&client.create(session, &upsert(args)).await?)
        }
        Command::Edit { id, expense } => {
            require_editable(client, session, id).await?;
            render::expense_line(&client.update(session, id, &upsert(expense)).await?)
        }
        Command::Delete { id } => {
            require_editable(client, session, id).await?;
            client.delete(session, id).await?
        }
        Command::Approve { ids, comment } => {
            let outcome = client
                .batch_manager_approve(session, &ids, comment.as_deref())
                .await;
            render::batch("approve", &outcome)
        }
        Command::Reject { ids, comment } => {
            let outcome = client
                .batch_manager_reject(session, &ids, &comment)
                .await?;
            render::batch("reject", &outcome)
        }
        Command::Pay {
            ids,
            method,
            expected,
            note,
        } => {
            let approval = FinanceApproval {
                note,
                reimbursement_method: method,
                expected_payout_date: expected,
            };
            let outcome = client
                .batch_finance_approve(session, &ids, &approval)
                .await;
            render::batch("pay", &outcome)
        }
        Command::Refuse { ids, comment } => {
            let outcome = client
                .batch_finance_reject(session, &ids, &comment)
                .await?;
            render::batch("refuse", &outcome)
        }
    };
    Ok(output)
}
