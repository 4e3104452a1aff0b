//! `SeaORM` entity definitions for the ledger tables.

pub mod accounting_periods;
pub mod accounts;
pub mod bank_accounts;
pub mod business_units;
pub mod journal_entries;
pub mod journal_lines;
pub mod numbering_series;
pub mod payments;
pub mod purchase_invoice_items;
pub mod purchase_invoices;
pub mod sales_invoice_items;
pub mod sales_invoices;
pub mod sea_orm_active_enums;
pub mod users;
