use engine::{Partition, PartitionSummary, Role};

use crate::{Expense, ExpenseClient, Result, Session};

/// One tab of a role dashboard, with its badge.
#[derive(Clone, Debug)]
pub struct DashboardTab {
    pub partition: Partition,
    pub expenses: Vec<Expense>,
    pub summary: PartitionSummary,
}

impl DashboardTab {
    fn new(partition: Partition, expenses: Vec<Expense>) -> Self {
        let summary = partition.summarize(&expenses);
        Self {
            partition,
            expenses,
            summary,
        }
    }
}

/// The three tabs of the session role, in display order.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub role: Role,
    pub tabs: Vec<DashboardTab>,
}

impl Dashboard {
    pub fn tab(&self, partition: Partition) -> Option<&DashboardTab> {
        self.tabs.iter().find(|tab| tab.partition == partition)
    }
}

impl ExpenseClient {
    /// Fetches every tab of the session role concurrently. Call again after
    /// any mutation.
    pub async fn dashboard(&self, session: &Session) -> Result<Dashboard> {
        let [first, second, third] = Partition::for_role(session.role);

        let (a, b, c) = tokio::try_join!(
            self.list(session, first),
            self.list(session, second),
            self.list(session, third),
        )?;

        Ok(Dashboard {
            role: session.role,
            tabs: vec![
                DashboardTab::new(first, a),
                DashboardTab::new(second, b),
                DashboardTab::new(third, c),
            ],
        })
    }
}
