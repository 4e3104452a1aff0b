//! Accounting period gating and close evaluation.
//!
//! Periods gate posting: an entry can only be posted when its date falls
//! inside an OPEN period of its business unit. Closing is one-way
//! (OPEN -> CLOSED) and guarded by a validation pass whose blocking errors
//! are distinguished from advisory warnings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use comanda_shared::types::{AccountingPeriodId, BusinessUnitId};

use super::types::BALANCE_TOLERANCE;

/// Status of an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for posting.
    Open,
    /// Period is closed; no posting allowed. Terminal.
    Closed,
}

impl PeriodStatus {
    /// Returns true if the period allows posting.
    #[must_use]
    pub const fn allows_posting(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// An accounting period within a business unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// Unique identifier.
    pub id: AccountingPeriodId,
    /// Business unit this period belongs to.
    pub business_unit_id: BusinessUnitId,
    /// Period name (e.g., "March 2026").
    pub name: String,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
}

impl AccountingPeriod {
    /// Returns true if postings are currently allowed in this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Per-entry facts needed to evaluate a period close.
///
/// Periods can contain rows created outside the posting engine (migrations,
/// manual fixes), so the close check re-verifies balance per entry instead
/// of trusting the posting-time invariant.
#[derive(Debug, Clone)]
pub struct EntryCloseSnapshot {
    /// The entry's document number, used in messages.
    pub document_number: String,
    /// Sum of the entry's debit lines.
    pub total_debit: Decimal,
    /// Sum of the entry's credit lines.
    pub total_credit: Decimal,
    /// Whether the entry has an approver recorded.
    pub has_approver: bool,
}

/// Result of a period close validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodCloseCheck {
    /// True iff no blocking errors were found. Warnings never block.
    pub can_close: bool,
    /// Blocking errors.
    pub errors: Vec<String>,
    /// Advisory warnings.
    pub warnings: Vec<String>,
}

/// Evaluates whether a period can be closed.
///
/// Errors (blocking): any journal entry dated in the period whose debit and
/// credit totals do not balance within tolerance.
///
/// Warnings (advisory): entries lacking an approver, and still-open A/R or
/// A/P invoices dated in the period.
#[must_use]
pub fn evaluate_close(
    entries: &[EntryCloseSnapshot],
    open_sales_invoices: u64,
    open_purchase_invoices: u64,
) -> PeriodCloseCheck {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut unapproved = 0u64;
    for entry in entries {
        let difference = (entry.total_debit - entry.total_credit).abs();
        if difference >= BALANCE_TOLERANCE {
            errors.push(format!(
                "journal entry {} is unbalanced: debit {}, credit {}",
                entry.document_number, entry.total_debit, entry.total_credit
            ));
        }
        if !entry.has_approver {
            unapproved += 1;
        }
    }

    if unapproved > 0 {
        warnings.push(format!("{unapproved} journal entries have no approver"));
    }
    if open_sales_invoices > 0 {
        warnings.push(format!(
            "{open_sales_invoices} sales invoices dated in this period are still open"
        ));
    }
    if open_purchase_invoices > 0 {
        warnings.push(format!(
            "{open_purchase_invoices} purchase invoices dated in this period are still open"
        ));
    }

    PeriodCloseCheck {
        can_close: errors.is_empty(),
        errors,
        warnings,
    }
}
