//! `SeaORM` active enums mapping the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// General-ledger account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (debit-normal).
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account (credit-normal).
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account (credit-normal).
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account (credit-normal).
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account (debit-normal).
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<AccountType> for comanda_core::ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<comanda_core::ledger::AccountType> for AccountType {
    fn from(value: comanda_core::ledger::AccountType) -> Self {
        use comanda_core::ledger::AccountType as Core;
        match value {
            Core::Asset => Self::Asset,
            Core::Liability => Self::Liability,
            Core::Equity => Self::Equity,
            Core::Revenue => Self::Revenue,
            Core::Expense => Self::Expense,
        }
    }
}

/// Accounting period status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "period_status")]
pub enum PeriodStatus {
    /// Period is open for posting.
    #[sea_orm(string_value = "OPEN")]
    Open,
    /// Period is closed; terminal.
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

impl From<PeriodStatus> for comanda_core::ledger::PeriodStatus {
    fn from(value: PeriodStatus) -> Self {
        match value {
            PeriodStatus::Open => Self::Open,
            PeriodStatus::Closed => Self::Closed,
        }
    }
}

/// Document kinds carrying a numbering series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_kind")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Journal entry.
    #[sea_orm(string_value = "journal_entry")]
    JournalEntry,
    /// Sales (A/R) invoice.
    #[sea_orm(string_value = "sales_invoice")]
    SalesInvoice,
    /// Purchase (A/P) invoice.
    #[sea_orm(string_value = "purchase_invoice")]
    PurchaseInvoice,
    /// Incoming customer payment.
    #[sea_orm(string_value = "incoming_payment")]
    IncomingPayment,
    /// Outgoing supplier payment.
    #[sea_orm(string_value = "outgoing_payment")]
    OutgoingPayment,
}

impl From<comanda_core::ledger::DocumentKind> for DocumentKind {
    fn from(value: comanda_core::ledger::DocumentKind) -> Self {
        use comanda_core::ledger::DocumentKind as Core;
        match value {
            Core::JournalEntry => Self::JournalEntry,
            Core::SalesInvoice => Self::SalesInvoice,
            Core::PurchaseInvoice => Self::PurchaseInvoice,
            Core::IncomingPayment => Self::IncomingPayment,
            Core::OutgoingPayment => Self::OutgoingPayment,
        }
    }
}

/// Payment direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_direction")]
#[serde(rename_all = "lowercase")]
pub enum PaymentDirection {
    /// Money received from a customer.
    #[sea_orm(string_value = "incoming")]
    Incoming,
    /// Money paid to a supplier.
    #[sea_orm(string_value = "outgoing")]
    Outgoing,
}

/// Source-document invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice is outstanding.
    #[sea_orm(string_value = "open")]
    Open,
    /// Invoice has been settled.
    #[sea_orm(string_value = "settled")]
    Settled,
}
