//! Accounting period repository.
//!
//! Periods gate posting by date. Closing is one-way and guarded by a
//! validation pass that re-checks entry balance defensively: a period can
//! contain rows created outside the posting engine (migrations, manual
//! fixes), so the posting-time invariant is not taken on trust.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

use comanda_core::ledger::{
    evaluate_close, AccountingPeriod, EntryCloseSnapshot, PeriodCloseCheck,
};
use comanda_shared::types::{AccountingPeriodId, BusinessUnitId};

use crate::entities::{
    accounting_periods, journal_entries, journal_lines, purchase_invoices, sales_invoices,
    sea_orm_active_enums::{InvoiceStatus, PeriodStatus},
};

/// Error types for period operations.
#[derive(Debug, thiserror::Error)]
pub enum PeriodError {
    /// Start date must not be after end date.
    #[error("Start date must not be after end date")]
    InvalidDateRange,

    /// Period overlaps an existing period in the unit.
    #[error("Period overlaps existing period: {0}")]
    OverlappingPeriod(String),

    /// Period not found.
    #[error("Accounting period not found: {0}")]
    NotFound(Uuid),

    /// Period is already closed.
    #[error("Accounting period is already closed")]
    AlreadyClosed,

    /// Close validation found blocking errors.
    #[error("Period cannot be closed: {}", errors.join("; "))]
    CannotClose {
        /// The blocking errors.
        errors: Vec<String>,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an accounting period.
#[derive(Debug, Clone)]
pub struct CreatePeriodInput {
    /// Business unit the period belongs to.
    pub business_unit_id: Uuid,
    /// Period name (e.g., "March 2026").
    pub name: String,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
}

/// Accounting period repository.
#[derive(Debug, Clone)]
pub struct PeriodRepository {
    db: DatabaseConnection,
}

impl PeriodRepository {
    /// Creates a new period repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an open period.
    ///
    /// Overlapping periods within a unit are rejected, so at most one
    /// period covers any date by construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the date range is invalid, the range overlaps an
    /// existing period, or the database operation fails.
    pub async fn create_period(
        &self,
        input: CreatePeriodInput,
    ) -> Result<accounting_periods::Model, PeriodError> {
        if input.start_date > input.end_date {
            return Err(PeriodError::InvalidDateRange);
        }

        let overlapping = accounting_periods::Entity::find()
            .filter(accounting_periods::Column::BusinessUnitId.eq(input.business_unit_id))
            .filter(accounting_periods::Column::StartDate.lte(input.end_date))
            .filter(accounting_periods::Column::EndDate.gte(input.start_date))
            .one(&self.db)
            .await?;

        if let Some(existing) = overlapping {
            return Err(PeriodError::OverlappingPeriod(existing.name));
        }

        let now = Utc::now().into();
        let period = accounting_periods::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_unit_id: Set(input.business_unit_id),
            name: Set(input.name),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            status: Set(PeriodStatus::Open),
            closed_by: Set(None),
            closed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(period.insert(&self.db).await?)
    }

    /// Lists the periods of a business unit, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_periods(
        &self,
        business_unit_id: Uuid,
    ) -> Result<Vec<accounting_periods::Model>, PeriodError> {
        Ok(accounting_periods::Entity::find()
            .filter(accounting_periods::Column::BusinessUnitId.eq(business_unit_id))
            .order_by_asc(accounting_periods::Column::StartDate)
            .all(&self.db)
            .await?)
    }

    /// Finds the open period covering `date` within a business unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_open_period(
        &self,
        business_unit_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AccountingPeriod>, PeriodError> {
        let period = accounting_periods::Entity::find()
            .filter(accounting_periods::Column::BusinessUnitId.eq(business_unit_id))
            .filter(accounting_periods::Column::Status.eq(PeriodStatus::Open))
            .filter(accounting_periods::Column::StartDate.lte(date))
            .filter(accounting_periods::Column::EndDate.gte(date))
            .one(&self.db)
            .await?;

        Ok(period.map(to_core_period))
    }

    /// Validates whether a period can be closed.
    ///
    /// Errors block the close (any unbalanced entry in the period);
    /// warnings (missing approvers, still-open invoices) never do.
    ///
    /// # Errors
    ///
    /// Returns an error if the period does not exist or a query fails.
    pub async fn validate_for_close(
        &self,
        period_id: Uuid,
    ) -> Result<PeriodCloseCheck, PeriodError> {
        let period = accounting_periods::Entity::find_by_id(period_id)
            .one(&self.db)
            .await?
            .ok_or(PeriodError::NotFound(period_id))?;

        self.evaluate_period(&period).await
    }

    /// Closes a period after re-running the close validation.
    ///
    /// The transition is terminal; there is no reopen.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::AlreadyClosed`] for a closed period and
    /// [`PeriodError::CannotClose`] when blocking errors remain.
    pub async fn close_period(
        &self,
        period_id: Uuid,
        closed_by: Uuid,
    ) -> Result<accounting_periods::Model, PeriodError> {
        let period = accounting_periods::Entity::find_by_id(period_id)
            .one(&self.db)
            .await?
            .ok_or(PeriodError::NotFound(period_id))?;

        if period.status == PeriodStatus::Closed {
            return Err(PeriodError::AlreadyClosed);
        }

        let check = self.evaluate_period(&period).await?;
        if !check.can_close {
            return Err(PeriodError::CannotClose {
                errors: check.errors,
            });
        }

        let mut active: accounting_periods::ActiveModel = period.into();
        active.status = Set(PeriodStatus::Closed);
        active.closed_by = Set(Some(closed_by));
        active.closed_at = Set(Some(Utc::now().into()));

        let closed = active.update(&self.db).await?;

        tracing::info!(
            period_id = %closed.id,
            period_name = %closed.name,
            "Accounting period closed"
        );

        Ok(closed)
    }

    /// Gathers the close-check facts for a period and evaluates them.
    async fn evaluate_period(
        &self,
        period: &accounting_periods::Model,
    ) -> Result<PeriodCloseCheck, PeriodError> {
        let entries = journal_entries::Entity::find()
            .filter(journal_entries::Column::AccountingPeriodId.eq(period.id))
            .all(&self.db)
            .await?;

        // One pass over all lines of the period, grouped per entry.
        let entry_ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        let mut totals: HashMap<Uuid, (Decimal, Decimal)> = HashMap::new();
        if !entry_ids.is_empty() {
            let lines = journal_lines::Entity::find()
                .filter(journal_lines::Column::JournalEntryId.is_in(entry_ids))
                .all(&self.db)
                .await?;
            for line in lines {
                let slot = totals
                    .entry(line.journal_entry_id)
                    .or_insert((Decimal::ZERO, Decimal::ZERO));
                slot.0 += line.debit;
                slot.1 += line.credit;
            }
        }

        let snapshots: Vec<EntryCloseSnapshot> = entries
            .iter()
            .map(|entry| {
                let (total_debit, total_credit) = totals
                    .get(&entry.id)
                    .copied()
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                EntryCloseSnapshot {
                    document_number: entry.document_number.clone(),
                    total_debit,
                    total_credit,
                    has_approver: entry.approved_by.is_some(),
                }
            })
            .collect();

        let open_sales = sales_invoices::Entity::find()
            .filter(sales_invoices::Column::BusinessUnitId.eq(period.business_unit_id))
            .filter(sales_invoices::Column::Status.eq(InvoiceStatus::Open))
            .filter(sales_invoices::Column::InvoiceDate.between(period.start_date, period.end_date))
            .count(&self.db)
            .await?;

        let open_purchases = purchase_invoices::Entity::find()
            .filter(purchase_invoices::Column::BusinessUnitId.eq(period.business_unit_id))
            .filter(purchase_invoices::Column::Status.eq(InvoiceStatus::Open))
            .filter(
                purchase_invoices::Column::InvoiceDate.between(period.start_date, period.end_date),
            )
            .count(&self.db)
            .await?;

        Ok(evaluate_close(&snapshots, open_sales, open_purchases))
    }
}

fn to_core_period(model: accounting_periods::Model) -> AccountingPeriod {
    AccountingPeriod {
        id: AccountingPeriodId::from_uuid(model.id),
        business_unit_id: BusinessUnitId::from_uuid(model.business_unit_id),
        name: model.name,
        start_date: model.start_date,
        end_date: model.end_date,
        status: model.status.into(),
    }
}
