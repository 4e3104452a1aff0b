//! Shared helpers for integration tests.
//!
//! Tests run against the database named by `DATABASE_URL` (migrated with
//! the migrator binary). When the variable is unset or the connection
//! fails, tests skip instead of failing so the suite stays green on
//! machines without Postgres.

// Not every test binary uses every helper.
#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use comanda_core::ledger::{AccountType, DocumentKind};
use comanda_db::entities::business_units;
use comanda_db::entities::users;
use comanda_db::repositories::{
    account::{AccountRepository, CreateAccountInput},
    document::DocumentRepository,
    journal::JournalRepository,
    numbering::{CreateSeriesInput, NumberingRepository},
    period::{CreatePeriodInput, PeriodRepository},
    posting::PostingRepository,
    report::ReportRepository,
};

/// Connects to the test database, or returns `None` to skip the test.
pub async fn test_db() -> Option<DatabaseConnection> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping integration test");
        return None;
    };
    match Database::connect(&url).await {
        Ok(db) => Some(db),
        Err(err) => {
            eprintln!("Cannot connect to test database ({err}), skipping integration test");
            None
        }
    }
}

/// A freshly seeded business unit with users, accounts, an open period and
/// numbering series. Every fixture gets its own unit, so tests are
/// isolated from each other.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub unit_id: Uuid,
    pub user_id: Uuid,
    pub cash_id: Uuid,
    pub receivable_id: Uuid,
    pub payable_id: Uuid,
}

/// Standard chart used by the fixtures.
pub const CASH: &str = "1000";
pub const RECEIVABLE: &str = "1100";
pub const PAYABLE: &str = "2100";
pub const CAPITAL: &str = "3000";
pub const FOOD_SALES: &str = "4000";
pub const BEVERAGE_SALES: &str = "4100";
pub const SUPPLIES: &str = "5000";

/// First and last day of the fixture's open period.
pub fn period_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

pub fn period_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
}

/// A posting date inside the fixture period.
pub fn in_period() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

/// A posting date outside any period.
pub fn out_of_period() -> NaiveDate {
    NaiveDate::from_ymd_opt(2027, 1, 15).unwrap()
}

impl Fixture {
    /// Seeds a fully configured unit: chart of accounts, open period,
    /// numbering series, and designated Receivable/Payable accounts.
    pub async fn new(db: DatabaseConnection) -> Self {
        Self::build(db, true).await
    }

    /// Seeds a unit without designated control accounts (accounting not
    /// enabled for derived postings).
    pub async fn without_control_accounts(db: DatabaseConnection) -> Self {
        Self::build(db, false).await
    }

    async fn build(db: DatabaseConnection, configure_control_accounts: bool) -> Self {
        let now = Utc::now();
        let unit_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let unit_tag = unit_id.simple().to_string();
        let tag = &unit_tag[..8];

        users::ActiveModel {
            id: Set(user_id),
            email: Set(format!("clerk-{tag}@comanda.test")),
            full_name: Set("Test Clerk".to_string()),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&db)
        .await
        .expect("seed user");

        business_units::ActiveModel {
            id: Set(unit_id),
            code: Set(format!("unit-{tag}")),
            name: Set("Test Restaurant".to_string()),
            base_currency: Set("USD".to_string()),
            receivable_account_id: Set(None),
            payable_account_id: Set(None),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&db)
        .await
        .expect("seed business unit");

        let accounts = AccountRepository::new(db.clone());
        let mut ids = std::collections::HashMap::new();
        for (code, name, account_type) in [
            (CASH, "Cash", AccountType::Asset),
            (RECEIVABLE, "Accounts Receivable", AccountType::Asset),
            (PAYABLE, "Accounts Payable", AccountType::Liability),
            (CAPITAL, "Owner Capital", AccountType::Equity),
            (FOOD_SALES, "Food Sales", AccountType::Revenue),
            (BEVERAGE_SALES, "Beverage Sales", AccountType::Revenue),
            (SUPPLIES, "Kitchen Supplies", AccountType::Expense),
        ] {
            let account = accounts
                .create_account(CreateAccountInput {
                    business_unit_id: unit_id,
                    code: code.to_string(),
                    name: name.to_string(),
                    description: None,
                    account_type,
                })
                .await
                .expect("seed account");
            ids.insert(code, account.id);
        }

        if configure_control_accounts {
            business_units::ActiveModel {
                id: Set(unit_id),
                receivable_account_id: Set(Some(ids[RECEIVABLE])),
                payable_account_id: Set(Some(ids[PAYABLE])),
                ..Default::default()
            }
            .update(&db)
            .await
            .expect("configure control accounts");
        }

        let periods = PeriodRepository::new(db.clone());
        periods
            .create_period(CreatePeriodInput {
                business_unit_id: unit_id,
                name: "March 2026".to_string(),
                start_date: period_start(),
                end_date: period_end(),
            })
            .await
            .expect("seed period");

        let numbering = NumberingRepository::new(db.clone());
        for (kind, prefix) in [
            (DocumentKind::JournalEntry, "JE-"),
            (DocumentKind::SalesInvoice, "INV-"),
            (DocumentKind::PurchaseInvoice, "BILL-"),
        ] {
            numbering
                .create_series(CreateSeriesInput {
                    business_unit_id: unit_id,
                    document_kind: kind,
                    prefix: prefix.to_string(),
                })
                .await
                .expect("seed numbering series");
        }

        Self {
            db,
            unit_id,
            user_id,
            cash_id: ids[CASH],
            receivable_id: ids[RECEIVABLE],
            payable_id: ids[PAYABLE],
        }
    }

    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.db.clone())
    }

    pub fn journal(&self) -> JournalRepository {
        JournalRepository::new(self.db.clone())
    }

    pub fn periods(&self) -> PeriodRepository {
        PeriodRepository::new(self.db.clone())
    }

    pub fn numbering(&self) -> NumberingRepository {
        NumberingRepository::new(self.db.clone())
    }

    pub fn documents(&self) -> DocumentRepository {
        DocumentRepository::new(self.db.clone())
    }

    pub fn posting(&self) -> PostingRepository {
        PostingRepository::new(self.db.clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.db.clone())
    }

    /// Shorthand for the running balance of one of the fixture accounts.
    pub async fn balance(&self, code: &str) -> Decimal {
        self.accounts()
            .get_balance(self.unit_id, code)
            .await
            .expect("account balance")
    }
}
