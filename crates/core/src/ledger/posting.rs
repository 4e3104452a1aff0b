//! Derived posting line builders.
//!
//! Each builder is a pure transformation from a source document's amounts
//! into the journal lines the posting engine consumes. The database layer
//! resolves the designated control accounts and feeds the result to
//! `post_entry`; nothing here touches storage.

use rust_decimal::Decimal;

use super::types::JournalLineInput;

/// An amount allocated to a specific GL account, taken from a source
/// document item.
#[derive(Debug, Clone)]
pub struct DocumentAmount {
    /// Code of the account the amount belongs to.
    pub account_code: String,
    /// The item amount.
    pub amount: Decimal,
}

impl DocumentAmount {
    /// Creates a document amount.
    #[must_use]
    pub fn new(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            amount,
        }
    }
}

/// Builds the journal lines for a sales (A/R) invoice posting.
///
/// One debit on the Receivable control account for the invoice total, one
/// credit per invoice item on that item's revenue account.
#[must_use]
pub fn sales_invoice_lines(
    receivable_code: &str,
    total: Decimal,
    items: &[DocumentAmount],
) -> Vec<JournalLineInput> {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(JournalLineInput::debit(receivable_code, total));
    for item in items {
        lines.push(JournalLineInput::credit(&*item.account_code, item.amount));
    }
    lines
}

/// Builds the journal lines for a purchase (A/P) invoice posting.
///
/// Mirror image of the sales posting: one credit on the Payable control
/// account for the invoice total, one debit per item on its expense account.
#[must_use]
pub fn purchase_invoice_lines(
    payable_code: &str,
    total: Decimal,
    items: &[DocumentAmount],
) -> Vec<JournalLineInput> {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(JournalLineInput::credit(payable_code, total));
    for item in items {
        lines.push(JournalLineInput::debit(&*item.account_code, item.amount));
    }
    lines
}

/// Builds the journal lines for an incoming customer payment.
///
/// Debits the bank account's linked GL account and credits the Receivable
/// control account, both for the payment amount.
#[must_use]
pub fn incoming_payment_lines(
    bank_gl_code: &str,
    receivable_code: &str,
    amount: Decimal,
) -> Vec<JournalLineInput> {
    vec![
        JournalLineInput::debit(bank_gl_code, amount),
        JournalLineInput::credit(receivable_code, amount),
    ]
}

/// Builds the journal lines for an outgoing supplier payment.
///
/// Debits the Payable control account and credits the bank account's linked
/// GL account, both for the payment amount.
#[must_use]
pub fn outgoing_payment_lines(
    payable_code: &str,
    bank_gl_code: &str,
    amount: Decimal,
) -> Vec<JournalLineInput> {
    vec![
        JournalLineInput::debit(payable_code, amount),
        JournalLineInput::credit(bank_gl_code, amount),
    ]
}
