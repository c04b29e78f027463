use api_types::{
    expense::{ExpenseStatus as StatusView, ExpenseUpsert, ExpenseView, MessageResponse},
    headers::{DEV_USER_ID, DEV_USER_ROLE},
    payout::{FinanceApproval, FinanceRejection},
    review::{ManagerDecision, ReviewEntry},
};
use chrono::{DateTime, Utc};
use engine::{Classified, ExpenseStatus, MoneyCents, Partition, expense_reference};
use reqwest::{Method, RequestBuilder, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{ClientError, Result, Session};

/// An expense as seen by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: MoneyCents,
    pub receipt_url: Option<String>,
    pub status: ExpenseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub employee_name: String,
    pub employee_email: String,
}

impl Expense {
    /// Whether edit and delete should be offered. The service checks again.
    pub fn can_edit(&self) -> bool {
        self.status.is_editable()
    }

    /// `EXP-007`.
    pub fn reference(&self) -> String {
        expense_reference(self.id)
    }
}

impl Classified for Expense {
    fn status(&self) -> ExpenseStatus {
        self.status
    }

    fn amount(&self) -> MoneyCents {
        self.amount
    }
}

fn map_status(status: StatusView) -> ExpenseStatus {
    match status {
        StatusView::PendingManager => ExpenseStatus::PendingManager,
        StatusView::ApprovedManager => ExpenseStatus::ApprovedManager,
        StatusView::RejectedManager => ExpenseStatus::RejectedManager,
        StatusView::PendingFinance => ExpenseStatus::PendingFinance,
        StatusView::RejectedFinance => ExpenseStatus::RejectedFinance,
        StatusView::Paid => ExpenseStatus::Paid,
    }
}

impl From<ExpenseView> for Expense {
    fn from(view: ExpenseView) -> Self {
        Self {
            id: view.id,
            title: view.title,
            description: view.description,
            amount: MoneyCents::new(view.amount_minor),
            receipt_url: view.receipt_url,
            status: map_status(view.status),
            created_at: view.created_at,
            updated_at: view.updated_at,
            employee_name: view.employee_name,
            employee_email: view.employee_email,
        }
    }
}

/// Listing endpoint backing a partition. The employee "Approved" and "Paid"
/// tabs have no endpoint of their own and are filtered from "My Expenses".
fn partition_endpoint(partition: Partition) -> &'static str {
    match partition {
        Partition::MyExpenses | Partition::MyApproved | Partition::MyPaid => "my-expenses",
        Partition::MyPending => "my-pending",
        Partition::MyRejected => "my-rejected",
        Partition::ManagerPending => "pending-manager-approval",
        Partition::ManagerApproved => "approved-by-manager",
        Partition::ManagerHistory => "manager-history",
        Partition::FinanceToPay => "pending-finance-approval",
        Partition::FinancePaid => "approved-by-finance",
        Partition::FinanceHistory => "finance-history",
    }
}

/// Rejections need a reason; checked before anything is sent.
pub(crate) fn require_comment(comment: &str) -> Result<String> {
    engine::validate_rejection_comment(comment)
        .map_err(|err| ClientError::InvalidInput(err.to_string()))
}

#[derive(Debug, Clone)]
pub struct ExpenseClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ExpenseClient {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http(base_url, reqwest::Client::new())
    }

    pub fn with_http(base_url: &str, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::InvalidInput(format!("invalid base_url: {err}")))?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let path = if path.is_empty() {
            "api/expenses".to_string()
        } else {
            format!("api/expenses/{}", path.trim_start_matches('/'))
        };
        self.base_url
            .join(&path)
            .map_err(|err| ClientError::InvalidInput(format!("invalid base_url: {err}")))
    }

    fn authorize(&self, req: RequestBuilder, session: &Session) -> RequestBuilder {
        let mut req = req.header(DEV_USER_ROLE, session.role.as_str());
        if let Some(user_id) = session.user_id {
            req = req.header(DEV_USER_ID, user_id.to_string());
        }
        if let Some(token) = session.token.as_deref() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send<TReq, TResp>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&TReq>,
    ) -> Result<TResp>
    where
        TReq: Serialize + ?Sized,
        TResp: DeserializeOwned,
    {
        let mut req = self.authorize(self.http.request(method, self.endpoint(path)?), session);
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res.json::<TResp>().await?);
        }

        let fallback = format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        );
        let message = res
            .json::<MessageResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or(fallback);
        Err(ClientError::from_status(status.as_u16(), message))
    }

    async fn get<TResp: DeserializeOwned>(&self, session: &Session, path: &str) -> Result<TResp> {
        self.send::<(), TResp>(session, Method::GET, path, None).await
    }

    async fn expense_call<TReq: Serialize + ?Sized>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&TReq>,
    ) -> Result<Expense> {
        self.send::<TReq, ExpenseView>(session, method, path, body)
            .await
            .map(Expense::from)
    }

    /// Expenses of a dashboard partition, newest first.
    pub async fn list(&self, session: &Session, partition: Partition) -> Result<Vec<Expense>> {
        let views: Vec<ExpenseView> = self.get(session, partition_endpoint(partition)).await?;
        let expenses: Vec<Expense> = views.into_iter().map(Expense::from).collect();
        Ok(partition.filter(&expenses).into_iter().cloned().collect())
    }

    pub async fn expense(&self, session: &Session, id: i64) -> Result<Expense> {
        self.get::<ExpenseView>(session, &id.to_string())
            .await
            .map(Expense::from)
    }

    pub async fn create(&self, session: &Session, body: &ExpenseUpsert) -> Result<Expense> {
        self.expense_call(session, Method::POST, "", Some(body))
            .await
    }

    pub async fn update(&self, session: &Session, id: i64, body: &ExpenseUpsert) -> Result<Expense> {
        self.expense_call(session, Method::PUT, &id.to_string(), Some(body))
            .await
    }

    /// Returns the service confirmation message.
    pub async fn delete(&self, session: &Session, id: i64) -> Result<String> {
        self.send::<(), MessageResponse>(session, Method::DELETE, &id.to_string(), None)
            .await
            .map(|res| res.message)
    }

    pub async fn history(&self, session: &Session, id: i64) -> Result<Vec<ReviewEntry>> {
        self.get(session, &format!("{id}/history")).await
    }

    pub async fn manager_approve(
        &self,
        session: &Session,
        id: i64,
        comment: Option<&str>,
    ) -> Result<Expense> {
        let body = ManagerDecision {
            comment: comment.map(ToString::to_string),
        };
        self.expense_call(session, Method::POST, &format!("{id}/approve"), Some(&body))
            .await
    }

    pub async fn manager_reject(&self, session: &Session, id: i64, comment: &str) -> Result<Expense> {
        let body = ManagerDecision {
            comment: Some(require_comment(comment)?),
        };
        self.expense_call(session, Method::POST, &format!("{id}/reject"), Some(&body))
            .await
    }

    pub async fn finance_approve(
        &self,
        session: &Session,
        id: i64,
        body: &FinanceApproval,
    ) -> Result<Expense> {
        self.expense_call(
            session,
            Method::POST,
            &format!("{id}/finance-approve"),
            Some(body),
        )
        .await
    }

    pub async fn finance_reject(&self, session: &Session, id: i64, comment: &str) -> Result<Expense> {
        let body = FinanceRejection {
            comment: require_comment(comment)?,
        };
        self.expense_call(
            session,
            Method::POST,
            &format!("{id}/finance-reject"),
            Some(&body),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_tabs_without_endpoint_read_my_expenses() {
        assert_eq!(partition_endpoint(Partition::MyApproved), "my-expenses");
        assert_eq!(partition_endpoint(Partition::MyPaid), "my-expenses");
        assert_eq!(
            partition_endpoint(Partition::FinanceToPay),
            "pending-finance-approval"
        );
    }

    #[test]
    fn endpoints_are_joined_under_the_api_prefix() {
        let client = ExpenseClient::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(
            client.endpoint("").unwrap().as_str(),
            "http://127.0.0.1:3000/api/expenses"
        );
        assert_eq!(
            client.endpoint("7/finance-approve").unwrap().as_str(),
            "http://127.0.0.1:3000/api/expenses/7/finance-approve"
        );
    }

    #[test]
    fn invalid_base_url_is_refused() {
        assert!(matches!(
            ExpenseClient::new("not a url"),
            Err(ClientError::InvalidInput(_))
        ));
    }

    #[test]
    fn blank_comment_is_refused_locally() {
        assert!(matches!(
            require_comment(" \n"),
            Err(ClientError::InvalidInput(_))
        ));
        assert_eq!(require_comment(" ok ").unwrap(), "ok");
    }
}
