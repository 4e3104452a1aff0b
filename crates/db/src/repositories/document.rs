//! Source-document repository: invoices, payments, bank accounts.
//!
//! These documents are owned by the surrounding back-office screens; the
//! ledger only reads their totals. Creation lives here so invoice numbers
//! come out of the same numbering series machinery as journal entries, with
//! the allocation inside the insert transaction.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use comanda_core::ledger::DocumentKind;

use crate::entities::{
    bank_accounts, payments, purchase_invoice_items, purchase_invoices, sales_invoice_items,
    sales_invoices,
    sea_orm_active_enums::{InvoiceStatus, PaymentDirection},
};

use super::numbering::{NumberingError, NumberingRepository};

/// Error types for source-document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// An invoice needs at least one item.
    #[error("Invoice must have at least one item")]
    NoItems,

    /// Item or payment amounts must be positive.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    /// Numbering failure (missing series is a setup bug).
    #[error(transparent)]
    Numbering(#[from] NumberingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One invoice item: an amount against a revenue or expense account.
#[derive(Debug, Clone)]
pub struct CreateInvoiceItemInput {
    /// Item description.
    pub description: String,
    /// Item amount.
    pub amount: Decimal,
    /// The GL account the item posts against when the invoice is derived
    /// into a journal entry.
    pub account_id: Uuid,
}

/// Input for creating a sales (A/R) invoice.
#[derive(Debug, Clone)]
pub struct CreateSalesInvoiceInput {
    /// Business unit.
    pub business_unit_id: Uuid,
    /// Customer display name.
    pub customer_name: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Invoice items; the invoice total is their sum.
    pub items: Vec<CreateInvoiceItemInput>,
}

/// Input for creating a purchase (A/P) invoice.
#[derive(Debug, Clone)]
pub struct CreatePurchaseInvoiceInput {
    /// Business unit.
    pub business_unit_id: Uuid,
    /// Supplier display name.
    pub supplier_name: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Invoice items; the invoice total is their sum.
    pub items: Vec<CreateInvoiceItemInput>,
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct CreatePaymentInput {
    /// Business unit.
    pub business_unit_id: Uuid,
    /// Incoming (customer) or outgoing (supplier).
    pub direction: PaymentDirection,
    /// The bank account money moved through.
    pub bank_account_id: Uuid,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Payment amount.
    pub amount: Decimal,
    /// Optional remarks.
    pub remarks: Option<String>,
}

/// A sales or purchase invoice with its items.
#[derive(Debug, Clone)]
pub struct SalesInvoiceWithItems {
    /// Invoice header.
    pub invoice: sales_invoices::Model,
    /// Invoice items.
    pub items: Vec<sales_invoice_items::Model>,
}

/// A purchase invoice with its items.
#[derive(Debug, Clone)]
pub struct PurchaseInvoiceWithItems {
    /// Invoice header.
    pub invoice: purchase_invoices::Model,
    /// Invoice items.
    pub items: Vec<purchase_invoice_items::Model>,
}

/// Source-document repository.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a sales invoice with its items, numbered from the unit's
    /// sales-invoice series.
    ///
    /// # Errors
    ///
    /// Returns an error if the item list is empty, an amount is not
    /// positive, the numbering series is missing, or the database
    /// operation fails.
    pub async fn create_sales_invoice(
        &self,
        input: CreateSalesInvoiceInput,
    ) -> Result<SalesInvoiceWithItems, DocumentError> {
        let total = validate_items(&input.items)?;

        let txn = self.db.begin().await?;
        let invoice_number =
            NumberingRepository::allocate(&txn, DocumentKind::SalesInvoice, input.business_unit_id)
                .await?;

        let now = Utc::now().into();
        let invoice = sales_invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_unit_id: Set(input.business_unit_id),
            invoice_number: Set(invoice_number),
            customer_name: Set(input.customer_name),
            invoice_date: Set(input.invoice_date),
            total: Set(total),
            status: Set(InvoiceStatus::Open),
            journal_entry_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let invoice = invoice.insert(&txn).await?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in input.items {
            let model = sales_invoice_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                sales_invoice_id: Set(invoice.id),
                description: Set(item.description),
                amount: Set(item.amount),
                revenue_account_id: Set(item.account_id),
                created_at: Set(now),
            };
            items.push(model.insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(SalesInvoiceWithItems { invoice, items })
    }

    /// Creates a purchase invoice with its items, numbered from the unit's
    /// purchase-invoice series.
    ///
    /// # Errors
    ///
    /// Returns an error if the item list is empty, an amount is not
    /// positive, the numbering series is missing, or the database
    /// operation fails.
    pub async fn create_purchase_invoice(
        &self,
        input: CreatePurchaseInvoiceInput,
    ) -> Result<PurchaseInvoiceWithItems, DocumentError> {
        let total = validate_items(&input.items)?;

        let txn = self.db.begin().await?;
        let invoice_number = NumberingRepository::allocate(
            &txn,
            DocumentKind::PurchaseInvoice,
            input.business_unit_id,
        )
        .await?;

        let now = Utc::now().into();
        let invoice = purchase_invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_unit_id: Set(input.business_unit_id),
            invoice_number: Set(invoice_number),
            supplier_name: Set(input.supplier_name),
            invoice_date: Set(input.invoice_date),
            total: Set(total),
            status: Set(InvoiceStatus::Open),
            journal_entry_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let invoice = invoice.insert(&txn).await?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in input.items {
            let model = purchase_invoice_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_invoice_id: Set(invoice.id),
                description: Set(item.description),
                amount: Set(item.amount),
                expense_account_id: Set(item.account_id),
                created_at: Set(now),
            };
            items.push(model.insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(PurchaseInvoiceWithItems { invoice, items })
    }

    /// Records a payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the database
    /// operation fails.
    pub async fn create_payment(
        &self,
        input: CreatePaymentInput,
    ) -> Result<payments::Model, DocumentError> {
        if input.amount <= Decimal::ZERO {
            return Err(DocumentError::NonPositiveAmount);
        }

        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_unit_id: Set(input.business_unit_id),
            direction: Set(input.direction),
            bank_account_id: Set(input.bank_account_id),
            payment_date: Set(input.payment_date),
            amount: Set(input.amount),
            remarks: Set(input.remarks),
            journal_entry_id: Set(None),
            created_at: Set(Utc::now().into()),
        };
        Ok(payment.insert(&self.db).await?)
    }

    /// Creates a bank account linked to a GL account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_bank_account(
        &self,
        business_unit_id: Uuid,
        name: String,
        gl_account_id: Uuid,
    ) -> Result<bank_accounts::Model, DocumentError> {
        let now = Utc::now().into();
        let bank = bank_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_unit_id: Set(business_unit_id),
            name: Set(name),
            gl_account_id: Set(gl_account_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(bank.insert(&self.db).await?)
    }

    /// Marks a sales invoice as settled.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice does not exist or the update fails.
    pub async fn settle_sales_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<sales_invoices::Model, DocumentError> {
        let invoice = sales_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(invoice_id))?;

        let mut active: sales_invoices::ActiveModel = invoice.into();
        active.status = Set(InvoiceStatus::Settled);
        Ok(active.update(&self.db).await?)
    }

    /// Lists a unit's open sales invoices, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_open_sales_invoices(
        &self,
        business_unit_id: Uuid,
    ) -> Result<Vec<sales_invoices::Model>, DocumentError> {
        Ok(sales_invoices::Entity::find()
            .filter(sales_invoices::Column::BusinessUnitId.eq(business_unit_id))
            .filter(sales_invoices::Column::Status.eq(InvoiceStatus::Open))
            .order_by_asc(sales_invoices::Column::InvoiceDate)
            .all(&self.db)
            .await?)
    }
}

/// Validates invoice items and returns their total.
fn validate_items(items: &[CreateInvoiceItemInput]) -> Result<Decimal, DocumentError> {
    if items.is_empty() {
        return Err(DocumentError::NoItems);
    }
    if items.iter().any(|item| item.amount <= Decimal::ZERO) {
        return Err(DocumentError::NonPositiveAmount);
    }
    Ok(items.iter().map(|item| item.amount).sum())
}
