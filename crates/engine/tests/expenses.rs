use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    Actor, Decision, Engine, EngineError, ExpenseDraft, ExpenseStatus, MoneyCents, Partition,
    Payout, Role,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn actor(engine: &Engine, role: Role) -> Actor {
    engine.resolve_actor(role, None).await.unwrap()
}

fn draft(title: &str, cents: i64) -> ExpenseDraft {
    ExpenseDraft::new(title, None, MoneyCents::new(cents), None).unwrap()
}

#[tokio::test]
async fn resolves_seeded_development_users() {
    let (engine, _db) = engine_with_db().await;

    let employee = actor(&engine, Role::Employee).await;
    assert_eq!(employee.id, 1);
    assert_eq!(employee.full_name, "John Smith");

    let sarah = engine.resolve_actor(Role::Employee, Some(2)).await.unwrap();
    assert_eq!(sarah.full_name, "Sarah Johnson");

    // The stored role wins over the requested one.
    let finance = engine.resolve_actor(Role::Employee, Some(4)).await.unwrap();
    assert_eq!(finance.role, Role::Finance);

    let err = engine.resolve_actor(Role::Manager, Some(99)).await.unwrap_err();
    assert!(matches!(err, EngineError::UnknownUser(_)));
}

#[tokio::test]
async fn lunch_goes_all_the_way_to_paid() {
    let (engine, _db) = engine_with_db().await;
    let employee = actor(&engine, Role::Employee).await;
    let manager = actor(&engine, Role::Manager).await;
    let finance = actor(&engine, Role::Finance).await;

    let expense = engine
        .create_expense(&employee, draft("Lunch", 4250))
        .await
        .unwrap();
    assert_eq!(expense.status, ExpenseStatus::PendingManager);
    assert_eq!(expense.amount, MoneyCents::new(4250));
    assert_eq!(expense.employee_name, "John Smith");

    let pending = engine
        .list_partition(&manager, Partition::ManagerPending)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let expense = engine
        .manager_approve(&manager, expense.id, None)
        .await
        .unwrap();
    assert_eq!(expense.status, ExpenseStatus::PendingFinance);
    let to_pay = engine
        .list_partition(&finance, Partition::FinanceToPay)
        .await
        .unwrap();
    assert_eq!(to_pay.iter().map(|e| e.id).collect::<Vec<_>>(), vec![expense.id]);
    assert!(
        engine
            .list_partition(&manager, Partition::ManagerPending)
            .await
            .unwrap()
            .is_empty()
    );

    let payout = Payout::new(
        None,
        Some("Bank Transfer"),
        NaiveDate::from_ymd_opt(2026, 1, 31),
    )
    .unwrap();
    let expense = engine
        .finance_approve(&finance, expense.id, payout)
        .await
        .unwrap();
    assert_eq!(expense.status, ExpenseStatus::Paid);

    let paid = engine
        .list_partition(&finance, Partition::FinancePaid)
        .await
        .unwrap();
    assert_eq!(paid.len(), 1);
    let my_paid = engine
        .list_partition(&employee, Partition::MyPaid)
        .await
        .unwrap();
    assert_eq!(my_paid.len(), 1);

    let history = engine.review_history(&employee, expense.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].step, Role::Manager);
    assert_eq!(history[1].step, Role::Finance);
    assert_eq!(
        history[1].payment_reference.as_deref(),
        Some("Method: Bank Transfer | Expected Payout: 2026-01-31")
    );
}

#[tokio::test]
async fn rejected_expense_can_be_edited_and_resubmitted() {
    let (engine, _db) = engine_with_db().await;
    let employee = actor(&engine, Role::Employee).await;
    let manager = actor(&engine, Role::Manager).await;

    let expense = engine
        .create_expense(&employee, draft("Taxi", 1800))
        .await
        .unwrap();
    let rejected = engine
        .manager_reject(&manager, expense.id, "Missing receipt")
        .await
        .unwrap();
    assert_eq!(rejected.status, ExpenseStatus::RejectedManager);
    assert!(rejected.is_editable());

    let history = engine.review_history(&manager, expense.id).await.unwrap();
    assert_eq!(history[0].decision, Decision::Rejected);
    assert_eq!(history[0].comment.as_deref(), Some("Missing receipt"));

    let edited = engine
        .update_expense(
            &employee,
            expense.id,
            ExpenseDraft::new("Taxi", None, MoneyCents::new(1800), Some("https://r.example/1"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(edited.status, ExpenseStatus::PendingManager);
    assert_eq!(edited.receipt_url.as_deref(), Some("https://r.example/1"));
}

#[tokio::test]
async fn blank_rejection_comment_is_refused() {
    let (engine, _db) = engine_with_db().await;
    let employee = actor(&engine, Role::Employee).await;
    let manager = actor(&engine, Role::Manager).await;

    let expense = engine
        .create_expense(&employee, draft("Hotel", 20000))
        .await
        .unwrap();
    let err = engine
        .manager_reject(&manager, expense.id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let unchanged = engine.expense(&manager, expense.id).await.unwrap();
    assert_eq!(unchanged.status, ExpenseStatus::PendingManager);
}

#[tokio::test]
async fn blank_finance_rejection_comment_is_refused() {
    let (engine, _db) = engine_with_db().await;
    let employee = actor(&engine, Role::Employee).await;
    let manager = actor(&engine, Role::Manager).await;
    let finance = actor(&engine, Role::Finance).await;

    let expense = engine
        .create_expense(&employee, draft("Flight", 45000))
        .await
        .unwrap();
    engine
        .manager_approve(&manager, expense.id, None)
        .await
        .unwrap();

    for comment in ["", "  ", "\t\n"] {
        let err = engine
            .finance_reject(&finance, expense.id, comment)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)), "{comment:?}");
    }

    let unchanged = engine.expense(&finance, expense.id).await.unwrap();
    assert_eq!(unchanged.status, ExpenseStatus::PendingFinance);
    assert!(
        engine
            .review_history(&finance, expense.id)
            .await
            .unwrap()
            .iter()
            .all(|record| record.step == Role::Manager)
    );
}

#[tokio::test]
async fn locked_expenses_cannot_be_edited_or_deleted() {
    let (engine, _db) = engine_with_db().await;
    let employee = actor(&engine, Role::Employee).await;
    let manager = actor(&engine, Role::Manager).await;

    let expense = engine
        .create_expense(&employee, draft("Train", 5600))
        .await
        .unwrap();
    engine
        .manager_approve(&manager, expense.id, Some("ok"))
        .await
        .unwrap();

    let err = engine
        .update_expense(&employee, expense.id, draft("Train", 100))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotEditable(_)));
    let err = engine
        .delete_expense(&employee, expense.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotEditable(_)));
}

#[tokio::test]
async fn delete_removes_expense_and_trail() {
    let (engine, _db) = engine_with_db().await;
    let employee = actor(&engine, Role::Employee).await;
    let manager = actor(&engine, Role::Manager).await;

    let expense = engine
        .create_expense(&employee, draft("Books", 3000))
        .await
        .unwrap();
    engine
        .manager_reject(&manager, expense.id, "Not a business expense")
        .await
        .unwrap();
    engine.delete_expense(&employee, expense.id).await.unwrap();

    let err = engine.expense(&employee, expense.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    assert!(
        engine
            .list_partition(&employee, Partition::MyExpenses)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn ownership_and_roles_are_enforced() {
    let (engine, _db) = engine_with_db().await;
    let john = actor(&engine, Role::Employee).await;
    let sarah = engine.resolve_actor(Role::Employee, Some(2)).await.unwrap();
    let manager = actor(&engine, Role::Manager).await;
    let finance = actor(&engine, Role::Finance).await;

    let expense = engine
        .create_expense(&john, draft("Parking", 700))
        .await
        .unwrap();

    assert!(matches!(
        engine.expense(&sarah, expense.id).await,
        Err(EngineError::Forbidden(_))
    ));
    assert!(matches!(
        engine.delete_expense(&sarah, expense.id).await,
        Err(EngineError::Forbidden(_))
    ));
    assert!(engine.expense(&finance, expense.id).await.is_ok());

    assert!(matches!(
        engine.manager_approve(&finance, expense.id, None).await,
        Err(EngineError::Forbidden(_))
    ));
    assert!(matches!(
        engine
            .list_partition(&john, Partition::ManagerPending)
            .await,
        Err(EngineError::Forbidden(_))
    ));
    assert!(matches!(
        engine.create_expense(&manager, draft("Lunch", 100)).await,
        Err(EngineError::Forbidden(_))
    ));

    assert!(
        engine
            .list_partition(&sarah, Partition::MyExpenses)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn second_review_of_the_same_step_is_an_invalid_transition() {
    let (engine, _db) = engine_with_db().await;
    let employee = actor(&engine, Role::Employee).await;
    let manager = actor(&engine, Role::Manager).await;
    let finance = actor(&engine, Role::Finance).await;

    let expense = engine
        .create_expense(&employee, draft("Dinner", 9000))
        .await
        .unwrap();
    assert!(matches!(
        engine.finance_reject(&finance, expense.id, "too early").await,
        Err(EngineError::InvalidTransition(_))
    ));
    engine
        .manager_approve(&manager, expense.id, None)
        .await
        .unwrap();
    assert!(matches!(
        engine.manager_approve(&manager, expense.id, None).await,
        Err(EngineError::InvalidTransition(_))
    ));
    let rejected = engine
        .finance_reject(&finance, expense.id, "Duplicate")
        .await
        .unwrap();
    assert_eq!(rejected.status, ExpenseStatus::RejectedFinance);

    let history = engine
        .list_partition(&finance, Partition::FinanceHistory)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    let manager_history = engine
        .list_partition(&manager, Partition::ManagerHistory)
        .await
        .unwrap();
    assert_eq!(manager_history.len(), 1);
}

#[tokio::test]
async fn partitions_list_newest_first() {
    let (engine, _db) = engine_with_db().await;
    let employee = actor(&engine, Role::Employee).await;

    let first = engine
        .create_expense(&employee, draft("First", 100))
        .await
        .unwrap();
    let second = engine
        .create_expense(&employee, draft("Second", 200))
        .await
        .unwrap();

    let mine = engine
        .list_partition(&employee, Partition::MyPending)
        .await
        .unwrap();
    assert_eq!(
        mine.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );
    let summary = Partition::MyPending.summarize(&mine);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.total, MoneyCents::new(300));
}
