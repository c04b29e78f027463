//! HTTP client of the `/api/expenses` service.
//!
//! Every call takes an explicit [`Session`] carrying the acting role. The
//! service is the source of truth: mutations return the updated expense and
//! dashboards are always refetched, never patched locally.

pub use api::{Expense, ExpenseClient};
pub use batch::BatchOutcome;
pub use dashboard::{Dashboard, DashboardTab};
pub use error::ClientError;
pub use session::Session;

mod api;
mod batch;
mod dashboard;
mod error;
mod session;

pub type Result<T> = std::result::Result<T, ClientError>;
