//! Database seeder for Comanda development and testing.
//!
//! Seeds a demo business unit with a chart of accounts, monthly accounting
//! periods, numbering series, and a bank account for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use comanda_core::ledger::{AccountType, DocumentKind};
use comanda_db::entities::{bank_accounts, business_units, users};
use comanda_db::repositories::{
    AccountRepository, CreateAccountInput, CreatePeriodInput, CreateSeriesInput,
    DocumentRepository, NumberingRepository, PeriodRepository,
};
use comanda_shared::AppConfig;

/// Demo business unit ID (consistent for all seeds)
const DEMO_UNIT_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url = AppConfig::load().map_or_else(
        |_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment"),
        |config| config.database.url,
    );

    println!("Connecting to database...");
    let db = comanda_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    seed_demo_user(&db).await;

    println!("Seeding demo business unit...");
    seed_demo_unit(&db).await;

    println!("Seeding chart of accounts...");
    let accounts = seed_chart_of_accounts(&db).await;

    println!("Seeding accounting periods...");
    seed_periods(&db).await;

    println!("Seeding numbering series...");
    seed_numbering_series(&db).await;

    println!("Seeding bank account...");
    seed_bank_account(&db, &accounts).await;

    println!("Seeding complete!");
}

fn demo_unit_id() -> Uuid {
    Uuid::parse_str(DEMO_UNIT_ID).unwrap()
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

/// Seeds a demo user for development.
async fn seed_demo_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo user already exists, skipping...");
        return;
    }

    let now = chrono::Utc::now().into();
    let user = users::ActiveModel {
        id: Set(demo_user_id()),
        email: Set("backoffice@comanda.dev".to_string()),
        full_name: Set("Back Office".to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    user.insert(db).await.expect("Failed to seed demo user");
}

/// Seeds the demo business unit.
async fn seed_demo_unit(db: &DatabaseConnection) {
    if business_units::Entity::find_by_id(demo_unit_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo business unit already exists, skipping...");
        return;
    }

    let now = chrono::Utc::now().into();
    let unit = business_units::ActiveModel {
        id: Set(demo_unit_id()),
        code: Set("main".to_string()),
        name: Set("Comanda Demo Restaurant".to_string()),
        base_currency: Set("USD".to_string()),
        receivable_account_id: Set(None),
        payable_account_id: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    unit.insert(db)
        .await
        .expect("Failed to seed demo business unit");
}

/// Seeds a restaurant chart of accounts and designates the Receivable and
/// Payable control accounts on the unit.
async fn seed_chart_of_accounts(db: &DatabaseConnection) -> Vec<(String, Uuid)> {
    let repo = AccountRepository::new(db.clone());
    let chart = [
        ("1000", "Cash", AccountType::Asset),
        ("1050", "Operating Bank Account", AccountType::Asset),
        ("1100", "Accounts Receivable", AccountType::Asset),
        ("1200", "Food Inventory", AccountType::Asset),
        ("2100", "Accounts Payable", AccountType::Liability),
        ("2200", "Accrued Wages", AccountType::Liability),
        ("3000", "Owner Capital", AccountType::Equity),
        ("4000", "Food Sales", AccountType::Revenue),
        ("4100", "Beverage Sales", AccountType::Revenue),
        ("4200", "Catering Revenue", AccountType::Revenue),
        ("5000", "Cost of Goods Sold", AccountType::Expense),
        ("5100", "Kitchen Supplies", AccountType::Expense),
        ("5200", "Rent Expense", AccountType::Expense),
        ("5300", "Wage Expense", AccountType::Expense),
    ];

    let mut seeded = Vec::with_capacity(chart.len());
    for (code, name, account_type) in chart {
        match repo.find_by_code(demo_unit_id(), code).await {
            Ok(Some(existing)) => {
                seeded.push((code.to_string(), existing.id));
            }
            _ => {
                let account = repo
                    .create_account(CreateAccountInput {
                        business_unit_id: demo_unit_id(),
                        code: code.to_string(),
                        name: name.to_string(),
                        description: None,
                        account_type,
                    })
                    .await
                    .expect("Failed to seed account");
                seeded.push((code.to_string(), account.id));
            }
        }
    }

    let receivable = seeded.iter().find(|(code, _)| code.as_str() == "1100").map(|(_, id)| *id);
    let payable = seeded.iter().find(|(code, _)| code.as_str() == "2100").map(|(_, id)| *id);
    business_units::ActiveModel {
        id: Set(demo_unit_id()),
        receivable_account_id: Set(receivable),
        payable_account_id: Set(payable),
        ..Default::default()
    }
    .update(db)
    .await
    .expect("Failed to designate control accounts");

    seeded
}

/// Seeds monthly periods for fiscal year 2026.
async fn seed_periods(db: &DatabaseConnection) {
    let repo = PeriodRepository::new(db.clone());
    let existing = repo
        .list_periods(demo_unit_id())
        .await
        .expect("Failed to list periods");
    if !existing.is_empty() {
        println!("  Accounting periods already exist, skipping...");
        return;
    }

    for month in 1..=12u32 {
        let start = NaiveDate::from_ymd_opt(2026, month, 1).unwrap();
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        } else {
            NaiveDate::from_ymd_opt(2026, month + 1, 1)
                .unwrap()
                .pred_opt()
                .unwrap()
        };
        repo.create_period(CreatePeriodInput {
            business_unit_id: demo_unit_id(),
            name: format!("{} 2026", start.format("%B")),
            start_date: start,
            end_date: end,
        })
        .await
        .expect("Failed to seed period");
    }
}

/// Seeds one numbering series per document kind.
async fn seed_numbering_series(db: &DatabaseConnection) {
    let repo = NumberingRepository::new(db.clone());
    let series = [
        (DocumentKind::JournalEntry, "JE-"),
        (DocumentKind::SalesInvoice, "INV-"),
        (DocumentKind::PurchaseInvoice, "BILL-"),
        (DocumentKind::IncomingPayment, "RCPT-"),
        (DocumentKind::OutgoingPayment, "PAY-"),
    ];

    for (kind, prefix) in series {
        match repo
            .create_series(CreateSeriesInput {
                business_unit_id: demo_unit_id(),
                document_kind: kind,
                prefix: prefix.to_string(),
            })
            .await
        {
            Ok(_) => {}
            Err(comanda_db::repositories::NumberingError::DuplicateSeries(_)) => {
                println!("  Series for {kind} already exists, skipping...");
            }
            Err(err) => panic!("Failed to seed numbering series: {err}"),
        }
    }
}

/// Seeds the operating bank account linked to its GL account.
async fn seed_bank_account(db: &DatabaseConnection, accounts: &[(String, Uuid)]) {
    let Some((_, gl_account_id)) = accounts.iter().find(|(code, _)| code.as_str() == "1050") else {
        println!("  Operating bank GL account missing, skipping...");
        return;
    };

    let existing = bank_accounts::Entity::find()
        .filter(bank_accounts::Column::BusinessUnitId.eq(demo_unit_id()))
        .one(db)
        .await
        .expect("Failed to query bank accounts");
    if existing.is_some() {
        println!("  Bank account already exists, skipping...");
        return;
    }

    let repo = DocumentRepository::new(db.clone());
    repo.create_bank_account(
        demo_unit_id(),
        "Operating Account".to_string(),
        *gl_account_id,
    )
    .await
    .expect("Failed to seed bank account");
}
