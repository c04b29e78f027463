//! Initial schema migration.
//!
//! - `users`: development users, seeded here (there is no sign-up)
//! - `expense_requests`: the expenses and their workflow status
//! - `manager_actions`: manager review trail
//! - `finance_actions`: finance review trail

use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    FullName,
    Email,
    Role,
}

#[derive(Iden)]
enum ExpenseRequests {
    Table,
    Id,
    EmployeeId,
    EmployeeName,
    EmployeeEmail,
    Title,
    Description,
    AmountMinor,
    ReceiptUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ManagerActions {
    Table,
    Id,
    ExpenseId,
    ManagerId,
    Action,
    Comment,
    ActionAt,
}

#[derive(Iden)]
enum FinanceActions {
    Table,
    Id,
    ExpenseId,
    FinanceId,
    Action,
    PaymentReference,
    Note,
    ActionAt,
}

/// `(id, full name, email, role)` of the development users.
const DEV_USERS: [(i64, &str, &str, &str); 4] = [
    (1, "John Smith", "john.smith@company.com", "EMPLOYEE"),
    (2, "Sarah Johnson", "sarah.johnson@company.com", "EMPLOYEE"),
    (3, "Robert Taylor", "robert.taylor@company.com", "MANAGER"),
    (4, "David Brown", "david.brown@company.com", "FINANCE"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Expense requests
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ExpenseRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpenseRequests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExpenseRequests::EmployeeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseRequests::EmployeeName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseRequests::EmployeeEmail)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExpenseRequests::Title).string().not_null())
                    .col(ColumnDef::new(ExpenseRequests::Description).text())
                    .col(
                        ColumnDef::new(ExpenseRequests::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExpenseRequests::ReceiptUrl).string())
                    .col(
                        ColumnDef::new(ExpenseRequests::Status)
                            .string()
                            .not_null()
                            .default("PENDING_MANAGER"),
                    )
                    .col(
                        ColumnDef::new(ExpenseRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense_requests-employee_id")
                            .from(ExpenseRequests::Table, ExpenseRequests::EmployeeId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expense_requests-status")
                    .table(ExpenseRequests::Table)
                    .col(ExpenseRequests::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expense_requests-employee_id")
                    .table(ExpenseRequests::Table)
                    .col(ExpenseRequests::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Review trail
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ManagerActions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ManagerActions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ManagerActions::ExpenseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ManagerActions::ManagerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ManagerActions::Action).string().not_null())
                    .col(ColumnDef::new(ManagerActions::Comment).text())
                    .col(
                        ColumnDef::new(ManagerActions::ActionAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-manager_actions-expense_id")
                            .from(ManagerActions::Table, ManagerActions::ExpenseId)
                            .to(ExpenseRequests::Table, ExpenseRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-manager_actions-manager_id")
                            .from(ManagerActions::Table, ManagerActions::ManagerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FinanceActions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinanceActions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FinanceActions::ExpenseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceActions::FinanceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinanceActions::Action).string().not_null())
                    .col(ColumnDef::new(FinanceActions::PaymentReference).string())
                    .col(ColumnDef::new(FinanceActions::Note).text())
                    .col(
                        ColumnDef::new(FinanceActions::ActionAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-finance_actions-expense_id")
                            .from(FinanceActions::Table, FinanceActions::ExpenseId)
                            .to(ExpenseRequests::Table, ExpenseRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-finance_actions-finance_id")
                            .from(FinanceActions::Table, FinanceActions::FinanceId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Development users
        // ───────────────────────────────────────────────────────────────────
        let db = manager.get_connection();
        let backend = db.get_database_backend();
        for (id, full_name, email, role) in DEV_USERS {
            db.execute(Statement::from_sql_and_values(
                backend,
                "INSERT INTO users (id, full_name, email, role) VALUES (?, ?, ?, ?);",
                vec![id.into(), full_name.into(), email.into(), role.into()],
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinanceActions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ManagerActions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}
