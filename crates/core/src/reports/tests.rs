//! Unit tests for report generation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use comanda_shared::types::AccountId;

use crate::ledger::AccountType;

use super::service::ReportService;
use super::types::AccountSnapshot;

fn snapshot(code: &str, name: &str, account_type: AccountType, balance: Decimal) -> AccountSnapshot {
    AccountSnapshot {
        account_id: AccountId::new(),
        code: code.to_string(),
        name: name.to_string(),
        account_type,
        balance,
    }
}

/// A small post-close snapshot: cash funded by capital, one sale on credit,
/// one expense paid from cash.
fn sample_accounts() -> Vec<AccountSnapshot> {
    vec![
        snapshot("1000", "Cash", AccountType::Asset, dec!(750.00)),
        snapshot("1100", "Accounts Receivable", AccountType::Asset, dec!(1000.00)),
        snapshot("2100", "Accounts Payable", AccountType::Liability, dec!(0.00)),
        snapshot("3000", "Owner Capital", AccountType::Equity, dec!(1000.00)),
        snapshot("4000", "Food Sales", AccountType::Revenue, dec!(1000.00)),
        snapshot("5000", "Kitchen Supplies", AccountType::Expense, dec!(250.00)),
    ]
}

#[test]
fn test_trial_balance_columns() {
    let report = ReportService::trial_balance(sample_accounts());

    assert_eq!(report.rows.len(), 6);

    let cash = &report.rows[0];
    assert_eq!(cash.debit_balance, dec!(750.00));
    assert_eq!(cash.credit_balance, Decimal::ZERO);

    let sales = &report.rows[4];
    assert_eq!(sales.debit_balance, Decimal::ZERO);
    assert_eq!(sales.credit_balance, dec!(1000.00));

    assert_eq!(report.total_debit, dec!(2000.00));
    assert_eq!(report.total_credit, dec!(2000.00));
    assert!(report.is_balanced);
}

#[test]
fn test_trial_balance_negative_stays_in_normal_column() {
    // An overdrawn asset stays in the debit column as a negative figure;
    // it does not flip into the credit column.
    let report = ReportService::trial_balance(vec![
        snapshot("1000", "Cash", AccountType::Asset, dec!(-50.00)),
        snapshot("3000", "Owner Capital", AccountType::Equity, dec!(-50.00)),
    ]);

    assert_eq!(report.rows[0].debit_balance, dec!(-50.00));
    assert_eq!(report.rows[0].credit_balance, Decimal::ZERO);
    assert_eq!(report.rows[1].credit_balance, dec!(-50.00));
    assert!(report.is_balanced);
}

#[test]
fn test_trial_balance_empty() {
    let report = ReportService::trial_balance(vec![]);
    assert!(report.rows.is_empty());
    assert_eq!(report.total_debit, Decimal::ZERO);
    assert!(report.is_balanced);
}

#[test]
fn test_balance_sheet_folds_net_income_into_equity() {
    let report = ReportService::balance_sheet(sample_accounts());

    assert_eq!(report.assets.len(), 2);
    assert_eq!(report.liabilities.len(), 1);
    assert_eq!(report.equity.len(), 1);

    assert_eq!(report.total_assets, dec!(1750.00));
    assert_eq!(report.total_liabilities, dec!(0.00));
    // 1000 capital + (1000 revenue - 250 expenses) retained earnings
    assert_eq!(report.net_income, dec!(750.00));
    assert_eq!(report.total_equity, dec!(1750.00));
    assert!(report.is_balanced);
}

#[test]
fn test_balance_sheet_excludes_income_accounts_from_sections() {
    let report = ReportService::balance_sheet(sample_accounts());
    let codes: Vec<&str> = report
        .assets
        .iter()
        .chain(&report.liabilities)
        .chain(&report.equity)
        .map(|line| line.account_code.as_str())
        .collect();
    assert!(!codes.contains(&"4000"));
    assert!(!codes.contains(&"5000"));
}

#[test]
fn test_income_statement_identity() {
    let report = ReportService::income_statement(sample_accounts());

    assert_eq!(report.revenue.len(), 1);
    assert_eq!(report.expenses.len(), 1);
    assert_eq!(report.total_revenue, dec!(1000.00));
    assert_eq!(report.total_expenses, dec!(250.00));
    assert_eq!(report.net_income, report.total_revenue - report.total_expenses);
}

#[test]
fn test_income_statement_loss() {
    let report = ReportService::income_statement(vec![
        snapshot("4000", "Food Sales", AccountType::Revenue, dec!(100.00)),
        snapshot("5000", "Rent", AccountType::Expense, dec!(400.00)),
    ]);
    assert_eq!(report.net_income, dec!(-300.00));
}

#[test]
fn test_income_statement_ignores_balance_sheet_accounts() {
    let report = ReportService::income_statement(vec![
        snapshot("1000", "Cash", AccountType::Asset, dec!(500.00)),
        snapshot("4000", "Food Sales", AccountType::Revenue, dec!(100.00)),
    ]);
    assert_eq!(report.revenue.len(), 1);
    assert!(report.expenses.is_empty());
    assert_eq!(report.total_revenue, dec!(100.00));
}
