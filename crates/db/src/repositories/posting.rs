//! Derived-posting generators.
//!
//! Each generator reads a source document (A/R invoice, A/P invoice,
//! payment), builds the journal lines it implies with the pure builders in
//! `comanda-core`, and posts them through the journal engine. A unit with
//! no designated Receivable/Payable account has accounting disabled for
//! that flow: the generator skips with `Ok(None)` instead of failing, so
//! the source document's own creation is never blocked.
//!
//! After a successful post the journal entry id is written back onto the
//! source document for traceability. The back-write is best-effort
//! bookkeeping outside the posting transaction: if it fails, the posting
//! stands and the failure is logged.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

use comanda_core::ledger::{
    incoming_payment_lines, outgoing_payment_lines, purchase_invoice_lines, sales_invoice_lines,
    CreateEntryInput, DocumentAmount, JournalLineInput, LedgerError,
};
use comanda_shared::types::{BusinessUnitId, UserId};

use crate::entities::{
    accounts, bank_accounts, business_units, payments, purchase_invoice_items, purchase_invoices,
    sales_invoice_items, sales_invoices, sea_orm_active_enums::PaymentDirection,
};

use super::journal::{JournalEntryWithLines, JournalRepository};

/// Error types for derived posting operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Source document not found.
    #[error("Source document not found: {0}")]
    NotFound(Uuid),

    /// Business unit not found.
    #[error("Business unit not found: {0}")]
    BusinessUnitNotFound(Uuid),

    /// The document already carries a journal entry reference.
    #[error("Document {document} is already posted as journal entry {journal_entry}")]
    AlreadyPosted {
        /// The source document.
        document: Uuid,
        /// The journal entry it was posted as.
        journal_entry: Uuid,
    },

    /// A referenced account row is missing.
    #[error("Referenced account not found: {0}")]
    AccountMissing(Uuid),

    /// The payment's direction does not match the requested operation.
    #[error("Payment {0} has the wrong direction for this operation")]
    WrongDirection(Uuid),

    /// Posting engine rejection.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Derived-posting generators for source documents.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
    journal: JournalRepository,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let journal = JournalRepository::new(db.clone());
        Self { db, journal }
    }

    /// Posts a sales (A/R) invoice to the ledger.
    ///
    /// One debit on the unit's Receivable account for the invoice total,
    /// one credit per item on that item's revenue account. Returns
    /// `Ok(None)` without posting when the unit has no designated
    /// Receivable account.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice does not exist, was already posted,
    /// or the posting engine rejects the entry.
    pub async fn post_sales_invoice(
        &self,
        invoice_id: Uuid,
        actor: UserId,
    ) -> Result<Option<JournalEntryWithLines>, PostingError> {
        let invoice = sales_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(PostingError::NotFound(invoice_id))?;

        if let Some(journal_entry) = invoice.journal_entry_id {
            return Err(PostingError::AlreadyPosted {
                document: invoice.id,
                journal_entry,
            });
        }

        let unit = self.find_unit(invoice.business_unit_id).await?;
        let Some(receivable_id) = unit.receivable_account_id else {
            tracing::debug!(
                invoice_id = %invoice.id,
                business_unit = %unit.code,
                "No Receivable account designated, skipping A/R posting"
            );
            return Ok(None);
        };
        let receivable = self.find_account(receivable_id).await?;

        let items = sales_invoice_items::Entity::find()
            .filter(sales_invoice_items::Column::SalesInvoiceId.eq(invoice.id))
            .all(&self.db)
            .await?;
        let codes = self
            .account_codes(items.iter().map(|i| i.revenue_account_id))
            .await?;
        let amounts: Vec<DocumentAmount> = items
            .iter()
            .map(|item| {
                codes
                    .get(&item.revenue_account_id)
                    .map(|code| DocumentAmount::new(code.clone(), item.amount))
                    .ok_or(PostingError::AccountMissing(item.revenue_account_id))
            })
            .collect::<Result<_, _>>()?;

        let lines = sales_invoice_lines(&receivable.code, invoice.total, &amounts);
        let remarks = format!("Sales invoice {}", invoice.invoice_number);
        let entry = self
            .post_lines(&unit, invoice.invoice_date, remarks, actor, lines)
            .await?;

        // Best-effort back-reference; the posting stands even if this fails.
        let mut active: sales_invoices::ActiveModel = invoice.into();
        active.journal_entry_id = Set(Some(entry.entry.id));
        if let Err(err) = active.update(&self.db).await {
            tracing::warn!(
                journal_entry_id = %entry.entry.id,
                error = %err,
                "Failed to write journal entry reference back to sales invoice"
            );
        }

        Ok(Some(entry))
    }

    /// Posts a purchase (A/P) invoice to the ledger.
    ///
    /// Mirror image of the A/R posting: one credit on the Payable account
    /// for the total, one debit per item on its expense account. Returns
    /// `Ok(None)` when the unit has no designated Payable account.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice does not exist, was already posted,
    /// or the posting engine rejects the entry.
    pub async fn post_purchase_invoice(
        &self,
        invoice_id: Uuid,
        actor: UserId,
    ) -> Result<Option<JournalEntryWithLines>, PostingError> {
        let invoice = purchase_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(PostingError::NotFound(invoice_id))?;

        if let Some(journal_entry) = invoice.journal_entry_id {
            return Err(PostingError::AlreadyPosted {
                document: invoice.id,
                journal_entry,
            });
        }

        let unit = self.find_unit(invoice.business_unit_id).await?;
        let Some(payable_id) = unit.payable_account_id else {
            tracing::debug!(
                invoice_id = %invoice.id,
                business_unit = %unit.code,
                "No Payable account designated, skipping A/P posting"
            );
            return Ok(None);
        };
        let payable = self.find_account(payable_id).await?;

        let items = purchase_invoice_items::Entity::find()
            .filter(purchase_invoice_items::Column::PurchaseInvoiceId.eq(invoice.id))
            .all(&self.db)
            .await?;
        let codes = self
            .account_codes(items.iter().map(|i| i.expense_account_id))
            .await?;
        let amounts: Vec<DocumentAmount> = items
            .iter()
            .map(|item| {
                codes
                    .get(&item.expense_account_id)
                    .map(|code| DocumentAmount::new(code.clone(), item.amount))
                    .ok_or(PostingError::AccountMissing(item.expense_account_id))
            })
            .collect::<Result<_, _>>()?;

        let lines = purchase_invoice_lines(&payable.code, invoice.total, &amounts);
        let remarks = format!("Purchase invoice {}", invoice.invoice_number);
        let entry = self
            .post_lines(&unit, invoice.invoice_date, remarks, actor, lines)
            .await?;

        let mut active: purchase_invoices::ActiveModel = invoice.into();
        active.journal_entry_id = Set(Some(entry.entry.id));
        if let Err(err) = active.update(&self.db).await {
            tracing::warn!(
                journal_entry_id = %entry.entry.id,
                error = %err,
                "Failed to write journal entry reference back to purchase invoice"
            );
        }

        Ok(Some(entry))
    }

    /// Posts an incoming customer payment: debit the bank account's GL
    /// account, credit the Receivable account. Returns `Ok(None)` when the
    /// unit has no designated Receivable account.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment does not exist, is outgoing, was
    /// already posted, or the posting engine rejects the entry.
    pub async fn post_incoming_payment(
        &self,
        payment_id: Uuid,
        actor: UserId,
    ) -> Result<Option<JournalEntryWithLines>, PostingError> {
        let payment = self.load_payment(payment_id, PaymentDirection::Incoming).await?;
        let unit = self.find_unit(payment.business_unit_id).await?;
        let Some(receivable_id) = unit.receivable_account_id else {
            tracing::debug!(
                payment_id = %payment.id,
                business_unit = %unit.code,
                "No Receivable account designated, skipping payment posting"
            );
            return Ok(None);
        };
        let receivable = self.find_account(receivable_id).await?;
        let bank_gl = self.bank_gl_account(payment.bank_account_id).await?;

        let lines = incoming_payment_lines(&bank_gl.code, &receivable.code, payment.amount);
        self.finish_payment(payment, &unit, actor, lines).await
    }

    /// Posts an outgoing supplier payment: debit the Payable account,
    /// credit the bank account's GL account. Returns `Ok(None)` when the
    /// unit has no designated Payable account.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment does not exist, is incoming, was
    /// already posted, or the posting engine rejects the entry.
    pub async fn post_outgoing_payment(
        &self,
        payment_id: Uuid,
        actor: UserId,
    ) -> Result<Option<JournalEntryWithLines>, PostingError> {
        let payment = self.load_payment(payment_id, PaymentDirection::Outgoing).await?;
        let unit = self.find_unit(payment.business_unit_id).await?;
        let Some(payable_id) = unit.payable_account_id else {
            tracing::debug!(
                payment_id = %payment.id,
                business_unit = %unit.code,
                "No Payable account designated, skipping payment posting"
            );
            return Ok(None);
        };
        let payable = self.find_account(payable_id).await?;
        let bank_gl = self.bank_gl_account(payment.bank_account_id).await?;

        let lines = outgoing_payment_lines(&payable.code, &bank_gl.code, payment.amount);
        self.finish_payment(payment, &unit, actor, lines).await
    }

    async fn load_payment(
        &self,
        payment_id: Uuid,
        direction: PaymentDirection,
    ) -> Result<payments::Model, PostingError> {
        let payment = payments::Entity::find_by_id(payment_id)
            .one(&self.db)
            .await?
            .ok_or(PostingError::NotFound(payment_id))?;

        if let Some(journal_entry) = payment.journal_entry_id {
            return Err(PostingError::AlreadyPosted {
                document: payment.id,
                journal_entry,
            });
        }
        if payment.direction != direction {
            return Err(PostingError::WrongDirection(payment.id));
        }
        Ok(payment)
    }

    async fn finish_payment(
        &self,
        payment: payments::Model,
        unit: &business_units::Model,
        actor: UserId,
        lines: Vec<JournalLineInput>,
    ) -> Result<Option<JournalEntryWithLines>, PostingError> {
        let remarks = match payment.direction {
            PaymentDirection::Incoming => format!("Incoming payment {}", payment.id),
            PaymentDirection::Outgoing => format!("Outgoing payment {}", payment.id),
        };
        let entry = self
            .post_lines(unit, payment.payment_date, remarks, actor, lines)
            .await?;

        let mut active: payments::ActiveModel = payment.into();
        active.journal_entry_id = Set(Some(entry.entry.id));
        if let Err(err) = active.update(&self.db).await {
            tracing::warn!(
                journal_entry_id = %entry.entry.id,
                error = %err,
                "Failed to write journal entry reference back to payment"
            );
        }

        Ok(Some(entry))
    }

    async fn post_lines(
        &self,
        unit: &business_units::Model,
        posting_date: chrono::NaiveDate,
        remarks: String,
        actor: UserId,
        lines: Vec<JournalLineInput>,
    ) -> Result<JournalEntryWithLines, PostingError> {
        Ok(self
            .journal
            .post_entry(CreateEntryInput {
                business_unit_id: BusinessUnitId::from_uuid(unit.id),
                posting_date,
                remarks: Some(remarks),
                created_by: actor,
                lines,
            })
            .await?)
    }

    async fn find_unit(&self, unit_id: Uuid) -> Result<business_units::Model, PostingError> {
        business_units::Entity::find_by_id(unit_id)
            .one(&self.db)
            .await?
            .ok_or(PostingError::BusinessUnitNotFound(unit_id))
    }

    async fn find_account(&self, account_id: Uuid) -> Result<accounts::Model, PostingError> {
        accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or(PostingError::AccountMissing(account_id))
    }

    async fn bank_gl_account(
        &self,
        bank_account_id: Uuid,
    ) -> Result<accounts::Model, PostingError> {
        let bank = bank_accounts::Entity::find_by_id(bank_account_id)
            .one(&self.db)
            .await?
            .ok_or(PostingError::NotFound(bank_account_id))?;
        self.find_account(bank.gl_account_id).await
    }

    /// Resolves account ids to codes in one query.
    async fn account_codes(
        &self,
        ids: impl Iterator<Item = Uuid>,
    ) -> Result<HashMap<Uuid, String>, PostingError> {
        let ids: Vec<Uuid> = ids.collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|a| (a.id, a.code)).collect())
    }
}
