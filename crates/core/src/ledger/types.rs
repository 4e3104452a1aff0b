//! Ledger domain types for journal entry creation and validation.
//!
//! This module defines the account classification, the balance sign rules it
//! implies, and the input types used to create journal entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use comanda_shared::types::{BusinessUnitId, UserId};

/// Absolute tolerance applied when comparing debit and credit totals.
///
/// A journal entry balances when `|sum(debit) - sum(credit)|` is strictly
/// below this amount. The tolerance absorbs monetary rounding on split
/// amounts; it is a fixed absolute allowance, not a percentage.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// General-ledger account classification.
///
/// The classification determines the account's normal balance direction and
/// which report bucket it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (debit-normal).
    Asset,
    /// Liability account (credit-normal).
    Liability,
    /// Equity account (credit-normal).
    Equity,
    /// Revenue account (credit-normal).
    Revenue,
    /// Expense account (debit-normal).
    Expense,
}

/// Normal balance direction of an account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Increases come from debits (Asset, Expense).
    Debit,
    /// Increases come from credits (Liability, Equity, Revenue).
    Credit,
}

impl AccountType {
    /// Returns the normal balance direction for this classification.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns true if this classification is debit-normal.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self.normal_balance(), NormalBalance::Debit)
    }

    /// Computes the signed balance change a line applies to an account.
    ///
    /// Debit-normal accounts grow with debits (`debit - credit`);
    /// credit-normal accounts grow with credits (`credit - debit`).
    #[must_use]
    pub fn signed_delta(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self.normal_balance() {
            NormalBalance::Debit => debit - credit,
            NormalBalance::Credit => credit - debit,
        }
    }

    /// Stable lowercase name, matching the database enum.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for a single journal line.
///
/// A valid line carries exactly one of `debit` or `credit`, strictly
/// positive. The account is referenced by its human-readable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLineInput {
    /// Code of the account to post to.
    pub account_code: String,
    /// Debit amount, if this is a debit line.
    pub debit: Option<Decimal>,
    /// Credit amount, if this is a credit line.
    pub credit: Option<Decimal>,
    /// Optional memo for this line.
    pub memo: Option<String>,
}

impl JournalLineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: Some(amount),
            credit: None,
            memo: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: None,
            credit: Some(amount),
            memo: None,
        }
    }

    /// Attaches a memo to the line.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    /// The business unit this entry belongs to.
    pub business_unit_id: BusinessUnitId,
    /// The posting date; must fall inside an open accounting period.
    pub posting_date: NaiveDate,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// The user creating the entry.
    pub created_by: UserId,
    /// The journal lines (at least 2).
    pub lines: Vec<JournalLineInput>,
}

/// Debit and credit totals of a journal entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
}

impl EntryTotals {
    /// Creates entry totals from debit and credit sums.
    #[must_use]
    pub const fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }

    /// Returns true if the totals balance within [`BALANCE_TOLERANCE`].
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.difference().abs() < BALANCE_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(AccountType::Asset, NormalBalance::Debit)]
    #[case(AccountType::Expense, NormalBalance::Debit)]
    #[case(AccountType::Liability, NormalBalance::Credit)]
    #[case(AccountType::Equity, NormalBalance::Credit)]
    #[case(AccountType::Revenue, NormalBalance::Credit)]
    fn test_normal_balance(#[case] account_type: AccountType, #[case] expected: NormalBalance) {
        assert_eq!(account_type.normal_balance(), expected);
    }

    #[test]
    fn test_signed_delta_debit_normal() {
        assert_eq!(AccountType::Asset.signed_delta(dec!(100), dec!(0)), dec!(100));
        assert_eq!(AccountType::Asset.signed_delta(dec!(0), dec!(40)), dec!(-40));
        assert_eq!(AccountType::Expense.signed_delta(dec!(70), dec!(30)), dec!(40));
    }

    #[test]
    fn test_signed_delta_credit_normal() {
        assert_eq!(AccountType::Revenue.signed_delta(dec!(0), dec!(100)), dec!(100));
        assert_eq!(AccountType::Liability.signed_delta(dec!(25), dec!(0)), dec!(-25));
        assert_eq!(AccountType::Equity.signed_delta(dec!(30), dec!(100)), dec!(70));
    }

    #[test]
    fn test_totals_balanced_within_tolerance() {
        let totals = EntryTotals::new(dec!(100.00), dec!(99.995));
        assert!(totals.is_balanced());

        let exact = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(exact.is_balanced());
    }

    #[test]
    fn test_totals_unbalanced_at_tolerance() {
        // The tolerance is exclusive: a difference of exactly 0.01 fails.
        let totals = EntryTotals::new(dec!(100.00), dec!(99.99));
        assert!(!totals.is_balanced());
        assert_eq!(totals.difference(), dec!(0.01));
    }

    #[test]
    fn test_line_constructors() {
        let line = JournalLineInput::debit("1000", dec!(50)).with_memo("cash");
        assert_eq!(line.debit, Some(dec!(50)));
        assert_eq!(line.credit, None);
        assert_eq!(line.memo.as_deref(), Some("cash"));

        let line = JournalLineInput::credit("4000", dec!(50));
        assert_eq!(line.debit, None);
        assert_eq!(line.credit, Some(dec!(50)));
    }

    #[test]
    fn test_account_type_display() {
        assert_eq!(AccountType::Asset.to_string(), "asset");
        assert_eq!(AccountType::Revenue.to_string(), "revenue");
    }
}
