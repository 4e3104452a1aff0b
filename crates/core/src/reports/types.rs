//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use comanda_shared::types::AccountId;

use crate::ledger::AccountType;

/// Snapshot of an account's running balance, the input to every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Current running balance.
    pub balance: Decimal,
}

/// One row of the trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Balance shown in the debit column (zero for credit-normal accounts).
    pub debit_balance: Decimal,
    /// Balance shown in the credit column (zero for debit-normal accounts).
    pub credit_balance: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// One row per account.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the two columns agree within tolerance.
    pub is_balanced: bool,
}

/// A single account line in a report section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLine {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// The account's balance.
    pub balance: Decimal,
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Asset accounts.
    pub assets: Vec<ReportLine>,
    /// Liability accounts.
    pub liabilities: Vec<ReportLine>,
    /// Equity accounts (excluding the implicit net income line).
    pub equity: Vec<ReportLine>,
    /// Current-period net income folded into equity as implicit retained
    /// earnings.
    pub net_income: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity, including `net_income`.
    pub total_equity: Decimal,
    /// Whether assets equal liabilities plus equity within tolerance.
    pub is_balanced: bool,
}

/// Income statement report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Revenue accounts.
    pub revenue: Vec<ReportLine>,
    /// Expense accounts.
    pub expenses: Vec<ReportLine>,
    /// Sum of revenue balances.
    pub total_revenue: Decimal,
    /// Sum of expense balances.
    pub total_expenses: Decimal,
    /// `total_revenue - total_expenses`, exactly.
    pub net_income: Decimal,
}
