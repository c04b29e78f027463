use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{MoneyCents, Partition};

#[derive(Parser, Debug)]
#[command(name = "reimburse_cli", disable_version_flag = true)]
#[command(about = "Submit, review and pay expense requests")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    pub base_url: Option<String>,
    /// Acting role: employee, manager or finance.
    #[arg(long)]
    pub role: Option<String>,
    /// Act as a specific development user.
    #[arg(long)]
    pub user_id: Option<i64>,
    /// Bearer token forwarded to the service.
    #[arg(long)]
    pub token: Option<String>,
    /// Log level.
    #[arg(long)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print the dashboard tabs of the acting role with their badges.
    Dashboard,
    /// List the expenses of one partition.
    List {
        #[arg(value_enum)]
        partition: PartitionArg,
    },
    /// Show a single expense.
    Show { id: i64 },
    /// Show the review trail of an expense.
    History { id: i64 },
    /// Submit a new expense.
    Submit(ExpenseArgs),
    /// Edit a pending or rejected expense.
    Edit {
        id: i64,
        #[command(flatten)]
        expense: ExpenseArgs,
    },
    /// Delete a pending or rejected expense.
    Delete { id: i64 },
    /// Manager approval of one or more expenses.
    Approve {
        #[arg(required = true)]
        ids: Vec<i64>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Manager rejection of one or more expenses.
    Reject {
        #[arg(required = true)]
        ids: Vec<i64>,
        #[arg(long)]
        comment: String,
    },
    /// Finance approval (payout) of one or more expenses.
    Pay {
        #[arg(required = true)]
        ids: Vec<i64>,
        #[arg(long)]
        method: Option<String>,
        /// Expected payout date, `YYYY-MM-DD`.
        #[arg(long)]
        expected: Option<NaiveDate>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Finance rejection of one or more expenses.
    Refuse {
        #[arg(required = true)]
        ids: Vec<i64>,
        #[arg(long)]
        comment: String,
    },
}

#[derive(Args, Debug, PartialEq)]
pub struct ExpenseArgs {
    #[arg(long)]
    pub title: String,
    /// Amount, at most two decimals (`42.50`).
    #[arg(long, value_parser = parse_amount)]
    pub amount: MoneyCents,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub receipt_url: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartitionArg {
    MyExpenses,
    MyPending,
    MyRejected,
    MyApproved,
    MyPaid,
    PendingReview,
    ManagerApproved,
    ManagerHistory,
    ToPay,
    Paid,
    FinanceHistory,
}

impl From<PartitionArg> for Partition {
    fn from(value: PartitionArg) -> Self {
        match value {
            PartitionArg::MyExpenses => Partition::MyExpenses,
            PartitionArg::MyPending => Partition::MyPending,
            PartitionArg::MyRejected => Partition::MyRejected,
            PartitionArg::MyApproved => Partition::MyApproved,
            PartitionArg::MyPaid => Partition::MyPaid,
            PartitionArg::PendingReview => Partition::ManagerPending,
            PartitionArg::ManagerApproved => Partition::ManagerApproved,
            PartitionArg::ManagerHistory => Partition::ManagerHistory,
            PartitionArg::ToPay => Partition::FinanceToPay,
            PartitionArg::Paid => Partition::FinancePaid,
            PartitionArg::FinanceHistory => Partition::FinanceHistory,
        }
    }
}

fn parse_amount(raw: &str) -> Result<MoneyCents, String> {
    raw.parse::<MoneyCents>()
        .and_then(MoneyCents::require_expense_amount)
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_submit() {
        let cli = Cli::try_parse_from([
            "reimburse_cli",
            "submit",
            "--title",
            "Lunch",
            "--amount",
            "42.50",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Submit(ExpenseArgs {
                title: "Lunch".to_string(),
                amount: MoneyCents::new(4250),
                description: None,
                receipt_url: None,
            })
        );
    }

    #[test]
    fn rejects_bad_amounts() {
        for amount in ["0", "-3", "12.345", "abc"] {
            let res = Cli::try_parse_from([
                "reimburse_cli",
                "submit",
                "--title",
                "x",
                "--amount",
                amount,
            ]);
            assert!(res.is_err(), "{amount}");
        }
    }

    #[test]
    fn batch_commands_take_many_ids() {
        let cli = Cli::try_parse_from([
            "reimburse_cli",
            "--role",
            "manager",
            "reject",
            "1",
            "2",
            "3",
            "--comment",
            "Missing receipt",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Reject {
                ids: vec![1, 2, 3],
                comment: "Missing receipt".to_string(),
            }
        );
        assert!(Cli::try_parse_from(["reimburse_cli", "approve"]).is_err());
    }

    #[test]
    fn pay_reads_the_payout_date() {
        let cli = Cli::try_parse_from([
            "reimburse_cli",
            "pay",
            "7",
            "--method",
            "Bank Transfer",
            "--expected",
            "2026-01-31",
        ])
        .unwrap();
        let Command::Pay { expected, .. } = cli.command else {
            panic!("expected pay");
        };
        assert_eq!(expected, NaiveDate::from_ymd_opt(2026, 1, 31));
    }

    #[test]
    fn partition_names() {
        let cli = Cli::try_parse_from(["reimburse_cli", "list", "to-pay"]).unwrap();
        assert_eq!(
            cli.command,
            Command::List {
                partition: PartitionArg::ToPay
            }
        );
        assert_eq!(Partition::from(PartitionArg::ToPay), Partition::FinanceToPay);
    }
}
