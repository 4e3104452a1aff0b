//! Report repository for financial report queries.
//!
//! Loads the current account balance snapshot of a business unit and hands
//! it to the pure folds in `comanda-core`. Reports run plain read-committed
//! queries; they never block concurrent postings and are not guaranteed
//! point-in-time-exact against in-flight transactions.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use comanda_core::reports::{
    AccountSnapshot, BalanceSheetReport, IncomeStatementReport, ReportService, TrialBalanceReport,
};
use comanda_shared::types::AccountId;

use crate::entities::accounts;

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates the trial balance for a business unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn trial_balance(
        &self,
        business_unit_id: Uuid,
    ) -> Result<TrialBalanceReport, ReportError> {
        let snapshots = self.snapshots(business_unit_id).await?;
        Ok(ReportService::trial_balance(snapshots))
    }

    /// Generates the balance sheet for a business unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance_sheet(
        &self,
        business_unit_id: Uuid,
    ) -> Result<BalanceSheetReport, ReportError> {
        let snapshots = self.snapshots(business_unit_id).await?;
        Ok(ReportService::balance_sheet(snapshots))
    }

    /// Generates the income statement for a business unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn income_statement(
        &self,
        business_unit_id: Uuid,
    ) -> Result<IncomeStatementReport, ReportError> {
        let snapshots = self.snapshots(business_unit_id).await?;
        Ok(ReportService::income_statement(snapshots))
    }

    /// Loads the active accounts of a unit as report snapshots, ordered by
    /// code.
    async fn snapshots(
        &self,
        business_unit_id: Uuid,
    ) -> Result<Vec<AccountSnapshot>, ReportError> {
        let rows = accounts::Entity::find()
            .filter(accounts::Column::BusinessUnitId.eq(business_unit_id))
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|account| AccountSnapshot {
                account_id: AccountId::from_uuid(account.id),
                code: account.code,
                name: account.name,
                account_type: account.account_type.into(),
                balance: account.balance,
            })
            .collect())
    }
}
