//! Double-entry posting logic.
//!
//! This module implements the core ledger functionality:
//! - Account classification and balance sign rules
//! - Journal entry input types and validation
//! - Document numbering kinds and formatting
//! - Accounting period gating and close evaluation
//! - Derived posting line builders for invoices and payments
//! - Error types for ledger operations

pub mod error;
pub mod numbering;
pub mod period;
pub mod posting;
pub mod types;
pub mod validation;

#[cfg(test)]
mod posting_props;
#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use numbering::{format_document_number, DocumentKind};
pub use period::{evaluate_close, AccountingPeriod, EntryCloseSnapshot, PeriodCloseCheck, PeriodStatus};
pub use posting::{
    incoming_payment_lines, outgoing_payment_lines, purchase_invoice_lines, sales_invoice_lines,
    DocumentAmount,
};
pub use types::{
    AccountType, CreateEntryInput, EntryTotals, JournalLineInput, NormalBalance, BALANCE_TOLERANCE,
};
pub use validation::validate_entry;
