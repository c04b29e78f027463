//! Expense approval engine.
//!
//! The lifecycle model ([`ExpenseStatus`], [`Action`], [`Partition`]) is pure
//! and usable on its own; [`Engine`] applies it to the expenses stored in the
//! database.

pub use audit::{Decision, ReviewRecord};
pub use error::EngineError;
pub use expenses::{ExpenseDraft, ExpenseRequest, MAX_TITLE_LEN};
pub use lifecycle::{
    Action, MAX_COMMENT_LEN, MAX_METHOD_LEN, Payout, expense_reference, validate_optional_text,
    validate_rejection_comment,
};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use partitions::{Classified, Partition, PartitionSummary};
pub use roles::Role;
pub use status::ExpenseStatus;
pub use users::Actor;

mod audit;
mod error;
mod expenses;
mod finance_actions;
mod lifecycle;
mod manager_actions;
mod money;
mod ops;
mod partitions;
mod roles;
mod status;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
