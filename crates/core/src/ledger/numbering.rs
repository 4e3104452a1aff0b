//! Document numbering kinds and formatting.
//!
//! Each (document kind, business unit) pair owns a numbering series: a
//! prefix plus a counter. The database layer serializes allocation; this
//! module defines the kinds and the number format.

use serde::{Deserialize, Serialize};

/// Kinds of documents that receive sequential numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Journal entry.
    JournalEntry,
    /// Sales (A/R) invoice.
    SalesInvoice,
    /// Purchase (A/P) invoice.
    PurchaseInvoice,
    /// Incoming customer payment.
    IncomingPayment,
    /// Outgoing supplier payment.
    OutgoingPayment,
}

impl DocumentKind {
    /// Stable snake_case name, matching the database enum.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JournalEntry => "journal_entry",
            Self::SalesInvoice => "sales_invoice",
            Self::PurchaseInvoice => "purchase_invoice",
            Self::IncomingPayment => "incoming_payment",
            Self::OutgoingPayment => "outgoing_payment",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a document number from a series prefix and counter value.
///
/// Plain concatenation, no zero padding: prefix `JE-` with counter 42 yields
/// `JE-42`.
#[must_use]
pub fn format_document_number(prefix: &str, next_number: i64) -> String {
    format!("{prefix}{next_number}")
}
