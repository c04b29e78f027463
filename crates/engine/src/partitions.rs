//! Role-scoped views over the status space.
//!
//! Every dashboard tab is a [`Partition`]: a role plus a set of canonical
//! statuses. Navigation badges are partition cardinalities, so these sets
//! must not drift.

use crate::{ExpenseStatus, MoneyCents, Role};

use ExpenseStatus::{Paid, PendingFinance, PendingManager, RejectedFinance, RejectedManager};

/// Anything that can be sorted into a partition.
pub trait Classified {
    fn status(&self) -> ExpenseStatus;
    fn amount(&self) -> MoneyCents;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Employee: every owned expense.
    MyExpenses,
    /// Employee: waiting for the manager.
    MyPending,
    /// Employee: rejected by manager or finance.
    MyRejected,
    /// Employee: approved by the manager, waiting for finance.
    MyApproved,
    /// Employee: paid out.
    MyPaid,
    /// Manager: "Pending Review".
    ManagerPending,
    /// Manager: "Approved" (went past the manager step successfully).
    ManagerApproved,
    /// Manager: "History", everything a manager already decided on.
    ManagerHistory,
    /// Finance: "To Pay".
    FinanceToPay,
    /// Finance: "Paid".
    FinancePaid,
    /// Finance: "History", everything finance touched or has to touch.
    FinanceHistory,
}

impl Partition {
    pub const ALL: [Partition; 11] = [
        Partition::MyExpenses,
        Partition::MyPending,
        Partition::MyRejected,
        Partition::MyApproved,
        Partition::MyPaid,
        Partition::ManagerPending,
        Partition::ManagerApproved,
        Partition::ManagerHistory,
        Partition::FinanceToPay,
        Partition::FinancePaid,
        Partition::FinanceHistory,
    ];

    /// Dashboard tabs of a role, in display order.
    pub fn for_role(role: Role) -> [Partition; 3] {
        match role {
            Role::Employee => [Partition::MyExpenses, Partition::MyApproved, Partition::MyPaid],
            Role::Manager => [
                Partition::ManagerPending,
                Partition::ManagerApproved,
                Partition::ManagerHistory,
            ],
            Role::Finance => [
                Partition::FinanceToPay,
                Partition::FinancePaid,
                Partition::FinanceHistory,
            ],
        }
    }

    /// Role owning the partition.
    pub fn role(self) -> Role {
        match self {
            Self::MyExpenses | Self::MyPending | Self::MyRejected | Self::MyApproved | Self::MyPaid => {
                Role::Employee
            }
            Self::ManagerPending | Self::ManagerApproved | Self::ManagerHistory => Role::Manager,
            Self::FinanceToPay | Self::FinancePaid | Self::FinanceHistory => Role::Finance,
        }
    }

    /// Employee partitions only contain the acting user's own expenses; any
    /// user can look at what they submitted.
    pub fn is_owner_scoped(self) -> bool {
        self.role() == Role::Employee
    }

    /// Canonical statuses included in the partition.
    pub fn statuses(self) -> &'static [ExpenseStatus] {
        match self {
            Self::MyExpenses => &[
                PendingManager,
                RejectedManager,
                PendingFinance,
                RejectedFinance,
                Paid,
            ],
            Self::MyPending | Self::ManagerPending => &[PendingManager],
            Self::MyRejected => &[RejectedManager, RejectedFinance],
            Self::MyApproved | Self::FinanceToPay => &[PendingFinance],
            Self::MyPaid | Self::FinancePaid => &[Paid],
            Self::ManagerApproved => &[PendingFinance, Paid],
            Self::ManagerHistory => &[PendingFinance, RejectedManager, RejectedFinance, Paid],
            Self::FinanceHistory => &[PendingFinance, Paid, RejectedFinance],
        }
    }

    /// Statuses as they may appear in storage, aliases included.
    pub fn stored_statuses(self) -> Vec<ExpenseStatus> {
        ExpenseStatus::ALL
            .into_iter()
            .filter(|status| self.contains(*status))
            .collect()
    }

    pub fn contains(self, status: ExpenseStatus) -> bool {
        self.statuses().contains(&status.canonical())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MyExpenses => "My Expenses",
            Self::MyPending => "Pending",
            Self::MyRejected => "Rejected",
            Self::MyApproved | Self::ManagerApproved => "Approved",
            Self::MyPaid | Self::FinancePaid => "Paid",
            Self::ManagerPending => "Pending Review",
            Self::ManagerHistory | Self::FinanceHistory => "History",
            Self::FinanceToPay => "To Pay",
        }
    }

    /// Keeps the items belonging to the partition, preserving order.
    pub fn filter<'a, T, I>(self, items: I) -> Vec<&'a T>
    where
        T: Classified + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items
            .into_iter()
            .filter(|item| self.contains(item.status()))
            .collect()
    }

    /// Count and total amount of the items belonging to the partition.
    pub fn summarize<'a, T, I>(self, items: I) -> PartitionSummary
    where
        T: Classified + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.filter(items)
            .into_iter()
            .fold(PartitionSummary::default(), |mut acc, item| {
                acc.count += 1;
                acc.total += item.amount();
                acc
            })
    }
}

/// Badge count plus summed amount of a partition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartitionSummary {
    pub count: usize,
    pub total: MoneyCents,
}
