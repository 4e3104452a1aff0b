//! Numbering series repository for document number allocation.
//!
//! Each (document kind, business unit) pair owns one series row. Allocation
//! locks the row, formats `prefix + next_number`, and increments the
//! counter, all inside the caller's transaction: a rolled-back entry also
//! rolls back its number. Gaps are possible, duplicates are not.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use comanda_core::ledger::{format_document_number, DocumentKind, LedgerError};

use crate::entities::numbering_series;

/// Error types for numbering operations.
#[derive(Debug, thiserror::Error)]
pub enum NumberingError {
    /// No series row exists for the (kind, unit) pair. This is a setup bug,
    /// fatal and never retried: the document cannot be created at all.
    #[error("No numbering series configured for {kind} in business unit {business_unit_id}")]
    SeriesNotConfigured {
        /// Document kind name.
        kind: String,
        /// Business unit missing the series.
        business_unit_id: Uuid,
    },

    /// A series already exists for the (kind, unit) pair.
    #[error("Numbering series for {0} already exists")]
    DuplicateSeries(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<NumberingError> for LedgerError {
    fn from(value: NumberingError) -> Self {
        match value {
            NumberingError::SeriesNotConfigured { kind, .. } => Self::SeriesNotConfigured(kind),
            other => Self::Database(other.to_string()),
        }
    }
}

/// Input for creating a numbering series.
#[derive(Debug, Clone)]
pub struct CreateSeriesInput {
    /// Business unit the series belongs to.
    pub business_unit_id: Uuid,
    /// Document kind the series numbers.
    pub document_kind: DocumentKind,
    /// Prefix prepended to every number (e.g. "JE-").
    pub prefix: String,
}

/// Numbering series repository.
#[derive(Debug, Clone)]
pub struct NumberingRepository {
    db: DatabaseConnection,
}

impl NumberingRepository {
    /// Creates a new numbering repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a series starting at 1.
    ///
    /// # Errors
    ///
    /// Returns an error if a series already exists for the (kind, unit)
    /// pair or the database operation fails.
    pub async fn create_series(
        &self,
        input: CreateSeriesInput,
    ) -> Result<numbering_series::Model, NumberingError> {
        let existing = numbering_series::Entity::find()
            .filter(numbering_series::Column::BusinessUnitId.eq(input.business_unit_id))
            .filter(numbering_series::Column::DocumentKind.eq(
                crate::entities::sea_orm_active_enums::DocumentKind::from(input.document_kind),
            ))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(NumberingError::DuplicateSeries(
                input.document_kind.to_string(),
            ));
        }

        let now = Utc::now().into();
        let series = numbering_series::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_unit_id: Set(input.business_unit_id),
            document_kind: Set(input.document_kind.into()),
            prefix: Set(input.prefix),
            next_number: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(series.insert(&self.db).await?)
    }

    /// Allocates the next document number in its own transaction.
    ///
    /// For callers that number a document outside the posting engine (e.g.
    /// invoice creation). Posting uses [`Self::allocate`] inside its own
    /// unit of work instead.
    ///
    /// # Errors
    ///
    /// Returns [`NumberingError::SeriesNotConfigured`] if no series exists
    /// for the pair.
    pub async fn next_number(
        &self,
        document_kind: DocumentKind,
        business_unit_id: Uuid,
    ) -> Result<String, NumberingError> {
        let txn = self.db.begin().await?;
        let number = Self::allocate(&txn, document_kind, business_unit_id).await?;
        txn.commit().await?;
        Ok(number)
    }

    /// Allocates the next document number inside an existing transaction.
    ///
    /// The series row is locked `FOR UPDATE`, so concurrent allocations on
    /// the same series serialize; if the enclosing transaction rolls back,
    /// the increment rolls back with it.
    ///
    /// # Errors
    ///
    /// Returns [`NumberingError::SeriesNotConfigured`] if no series exists
    /// for the pair.
    pub async fn allocate(
        txn: &DatabaseTransaction,
        document_kind: DocumentKind,
        business_unit_id: Uuid,
    ) -> Result<String, NumberingError> {
        let series = numbering_series::Entity::find()
            .filter(numbering_series::Column::BusinessUnitId.eq(business_unit_id))
            .filter(numbering_series::Column::DocumentKind.eq(
                crate::entities::sea_orm_active_enums::DocumentKind::from(document_kind),
            ))
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| NumberingError::SeriesNotConfigured {
                kind: document_kind.to_string(),
                business_unit_id,
            })?;

        let number = format_document_number(&series.prefix, series.next_number);
        let next = series.next_number + 1;

        let mut active: numbering_series::ActiveModel = series.into();
        active.next_number = Set(next);
        active.update(txn).await?;

        Ok(number)
    }
}
