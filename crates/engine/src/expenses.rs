//! The module contains the `ExpenseRequest` struct, the input it is built
//! from and its database entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, ExpenseStatus, MoneyCents, ResultEngine, lifecycle::validate_optional_text,
    partitions::Classified, users::Actor,
};

/// Maximum length of the title and of the receipt link.
pub const MAX_TITLE_LEN: usize = 255;

/// An expense request submitted by an employee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRequest {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: MoneyCents,
    pub receipt_url: Option<String>,
    pub status: ExpenseStatus,
    /// Submitting employee. Name and email are copied at creation.
    pub employee_id: i64,
    pub employee_name: String,
    pub employee_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpenseRequest {
    pub fn is_owned_by(&self, actor: &Actor) -> bool {
        self.employee_id == actor.id
    }

    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }
}

impl Classified for ExpenseRequest {
    fn status(&self) -> ExpenseStatus {
        self.status
    }

    fn amount(&self) -> MoneyCents {
        self.amount
    }
}

/// Validated fields of a create or update request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub description: Option<String>,
    pub amount: MoneyCents,
    pub receipt_url: Option<String>,
}

impl ExpenseDraft {
    pub fn new(
        title: &str,
        description: Option<&str>,
        amount: MoneyCents,
        receipt_url: Option<&str>,
    ) -> ResultEngine<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EngineError::Validation("title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(EngineError::Validation(format!(
                "title cannot exceed {MAX_TITLE_LEN} characters"
            )));
        }
        Ok(Self {
            title: title.to_string(),
            description: description
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
            amount: amount.require_expense_amount()?,
            receipt_url: validate_optional_text(receipt_url, MAX_TITLE_LEN, "receipt url")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub employee_email: String,
    pub title: String,
    pub description: Option<String>,
    pub amount_minor: i64,
    pub receipt_url: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EmployeeId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Employee,
    #[sea_orm(has_many = "super::manager_actions::Entity")]
    ManagerActions,
    #[sea_orm(has_many = "super::finance_actions::Entity")]
    FinanceActions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::manager_actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManagerActions.def()
    }
}

impl Related<super::finance_actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinanceActions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ExpenseRequest {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: ExpenseStatus::try_from(model.status.as_str())?,
            id: model.id,
            title: model.title,
            description: model.description,
            amount: MoneyCents::new(model.amount_minor),
            receipt_url: model.receipt_url,
            employee_id: model.employee_id,
            employee_name: model.employee_name,
            employee_email: model.employee_email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl ActiveModel {
    /// A new `PENDING_MANAGER` row submitted by `actor`.
    pub(crate) fn submitted(draft: ExpenseDraft, actor: &Actor, now: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::NotSet,
            employee_id: ActiveValue::Set(actor.id),
            employee_name: ActiveValue::Set(actor.full_name.clone()),
            employee_email: ActiveValue::Set(actor.email.clone()),
            title: ActiveValue::Set(draft.title),
            description: ActiveValue::Set(draft.description),
            amount_minor: ActiveValue::Set(draft.amount.cents()),
            receipt_url: ActiveValue::Set(draft.receipt_url),
            status: ActiveValue::Set(ExpenseStatus::INITIAL.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_and_drops_empty_fields() {
        let draft = ExpenseDraft::new(" Lunch ", Some("  "), MoneyCents::new(4250), Some("")).unwrap();
        assert_eq!(draft.title, "Lunch");
        assert_eq!(draft.description, None);
        assert_eq!(draft.receipt_url, None);
        assert_eq!(draft.amount.cents(), 4250);
    }

    #[test]
    fn draft_requires_title_and_positive_amount() {
        assert!(matches!(
            ExpenseDraft::new("  ", None, MoneyCents::new(100), None),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            ExpenseDraft::new("Taxi", None, MoneyCents::ZERO, None),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(ExpenseDraft::new(&"t".repeat(MAX_TITLE_LEN + 1), None, MoneyCents::new(1), None).is_err());
    }

    #[test]
    fn model_with_unknown_status_is_rejected() {
        let now = Utc::now();
        let model = Model {
            id: 1,
            employee_id: 1,
            employee_name: "John Smith".to_string(),
            employee_email: "john.smith@company.com".to_string(),
            title: "Lunch".to_string(),
            description: None,
            amount_minor: 4250,
            receipt_url: None,
            status: "APPROVED".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert!(ExpenseRequest::try_from(model.clone()).is_err());

        let model = Model {
            status: "PENDING_FINANCE".to_string(),
            ..model
        };
        let expense = ExpenseRequest::try_from(model).unwrap();
        assert_eq!(expense.status, ExpenseStatus::PendingFinance);
        assert!(!expense.is_editable());
    }
}
