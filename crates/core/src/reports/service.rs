//! Report generation service.

use rust_decimal::Decimal;

use crate::ledger::{AccountType, NormalBalance, BALANCE_TOLERANCE};

use super::types::{
    AccountSnapshot, BalanceSheetReport, IncomeStatementReport, ReportLine, TrialBalanceReport,
    TrialBalanceRow,
};

/// Service for generating financial reports.
///
/// All three reports fold the current balance snapshot; they are balance
/// reports, not activity reports.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance from account snapshots.
    ///
    /// Each balance lands in the column of its classification's normal
    /// side: debit for Asset/Expense, credit otherwise, with zero in the
    /// unused column. A negative balance stays in its normal column as a
    /// negative figure rather than flipping sides; the totals still agree
    /// for any set of balanced postings.
    #[must_use]
    pub fn trial_balance(accounts: Vec<AccountSnapshot>) -> TrialBalanceReport {
        let mut rows = Vec::with_capacity(accounts.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        for account in accounts {
            let (debit_balance, credit_balance) = match account.account_type.normal_balance() {
                NormalBalance::Debit => (account.balance, Decimal::ZERO),
                NormalBalance::Credit => (Decimal::ZERO, account.balance),
            };
            total_debit += debit_balance;
            total_credit += credit_balance;

            rows.push(TrialBalanceRow {
                account_code: account.code,
                account_name: account.name,
                account_type: account.account_type,
                debit_balance,
                credit_balance,
            });
        }

        TrialBalanceReport {
            rows,
            total_debit,
            total_credit,
            is_balanced: (total_debit - total_credit).abs() < BALANCE_TOLERANCE,
        }
    }

    /// Generates a balance sheet from account snapshots.
    ///
    /// Partitions accounts into Asset / Liability / Equity buckets and folds
    /// current-period net income (revenue minus expenses) into the equity
    /// total as an implicit retained-earnings line.
    #[must_use]
    pub fn balance_sheet(accounts: Vec<AccountSnapshot>) -> BalanceSheetReport {
        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut equity = Vec::new();
        let mut total_assets = Decimal::ZERO;
        let mut total_liabilities = Decimal::ZERO;
        let mut equity_accounts_total = Decimal::ZERO;
        let mut total_revenue = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;

        for account in accounts {
            match account.account_type {
                AccountType::Asset => {
                    total_assets += account.balance;
                    assets.push(Self::report_line(account));
                }
                AccountType::Liability => {
                    total_liabilities += account.balance;
                    liabilities.push(Self::report_line(account));
                }
                AccountType::Equity => {
                    equity_accounts_total += account.balance;
                    equity.push(Self::report_line(account));
                }
                AccountType::Revenue => total_revenue += account.balance,
                AccountType::Expense => total_expenses += account.balance,
            }
        }

        let net_income = total_revenue - total_expenses;
        let total_equity = equity_accounts_total + net_income;

        BalanceSheetReport {
            assets,
            liabilities,
            equity,
            net_income,
            total_assets,
            total_liabilities,
            total_equity,
            is_balanced: (total_assets - (total_liabilities + total_equity)).abs()
                < BALANCE_TOLERANCE,
        }
    }

    /// Generates an income statement from account snapshots.
    #[must_use]
    pub fn income_statement(accounts: Vec<AccountSnapshot>) -> IncomeStatementReport {
        let mut revenue = Vec::new();
        let mut expenses = Vec::new();
        let mut total_revenue = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;

        for account in accounts {
            match account.account_type {
                AccountType::Revenue => {
                    total_revenue += account.balance;
                    revenue.push(Self::report_line(account));
                }
                AccountType::Expense => {
                    total_expenses += account.balance;
                    expenses.push(Self::report_line(account));
                }
                _ => {}
            }
        }

        IncomeStatementReport {
            revenue,
            expenses,
            total_revenue,
            total_expenses,
            net_income: total_revenue - total_expenses,
        }
    }

    fn report_line(account: AccountSnapshot) -> ReportLine {
        ReportLine {
            account_code: account.code,
            account_name: account.name,
            balance: account.balance,
        }
    }
}
