//! Account repository for chart of accounts database operations.
//!
//! Owns the GL account rows and their running balances. The balance column
//! is mutated exclusively through [`AccountRepository::apply_delta`], which
//! only the posting engine calls, inside its unit of work.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use comanda_core::ledger::AccountType;
use comanda_shared::types::{PageRequest, PageResponse};

use crate::entities::{accounts, journal_lines};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists in the business unit.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account not found by code.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Account not found by id.
    #[error("Account not found: {0}")]
    NotFoundById(Uuid),

    /// Cannot delete an account that journal lines reference.
    #[error("Cannot delete account: {0} journal lines reference it")]
    HasJournalLines(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Business unit the account belongs to.
    pub business_unit_id: Uuid,
    /// Account code (unique within the business unit).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Account classification.
    pub account_type: AccountType,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by classification.
    pub account_type: Option<AccountType>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account with a zero opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the code already exists in the unit or the
    /// database operation fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::BusinessUnitId.eq(input.business_unit_id))
            .filter(accounts::Column::Code.eq(input.code.clone()))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_unit_id: Set(input.business_unit_id),
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            account_type: Set(input.account_type.into()),
            balance: Set(Decimal::ZERO),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Lists accounts with optional filters, paginated and ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        business_unit_id: Uuid,
        filter: AccountFilter,
        page: PageRequest,
    ) -> Result<PageResponse<accounts::Model>, AccountError> {
        let mut query = accounts::Entity::find()
            .filter(accounts::Column::BusinessUnitId.eq(business_unit_id));

        if let Some(account_type) = filter.account_type {
            let db_type: crate::entities::sea_orm_active_enums::AccountType = account_type.into();
            query = query.filter(accounts::Column::AccountType.eq(db_type));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(accounts::Column::IsActive.eq(is_active));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_asc(accounts::Column::Code)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Finds an account by its code within a business unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(
        &self,
        business_unit_id: Uuid,
        code: &str,
    ) -> Result<Option<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::BusinessUnitId.eq(business_unit_id))
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?)
    }

    /// Returns the current running balance of an account.
    ///
    /// An account that has never been posted carries a zero balance.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if no account with this code
    /// exists in the unit.
    pub async fn get_balance(
        &self,
        business_unit_id: Uuid,
        code: &str,
    ) -> Result<Decimal, AccountError> {
        let account = self
            .find_by_code(business_unit_id, code)
            .await?
            .ok_or_else(|| AccountError::NotFound(code.to_string()))?;
        Ok(account.balance)
    }

    /// Deletes an account that has never been posted to.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::HasJournalLines`] if any journal line
    /// references the account.
    pub async fn delete_account(&self, account_id: Uuid) -> Result<(), AccountError> {
        let line_count = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(account_id))
            .count(&self.db)
            .await?;

        if line_count > 0 {
            return Err(AccountError::HasJournalLines(line_count));
        }

        let result = accounts::Entity::delete_by_id(account_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AccountError::NotFoundById(account_id));
        }
        Ok(())
    }

    /// Atomically increments an account's running balance by `delta`.
    ///
    /// The increment runs as a single `UPDATE ... SET balance = balance + d`
    /// so no read-modify-write window exists. Callers must invoke this only
    /// from inside the posting unit of work, after locking the account row,
    /// so the balance and the journal line land or roll back together.
    pub(crate) async fn apply_delta(
        txn: &DatabaseTransaction,
        account_id: Uuid,
        delta: Decimal,
    ) -> Result<(), DbErr> {
        accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(delta),
            )
            .filter(accounts::Column::Id.eq(account_id))
            .exec(txn)
            .await?;
        Ok(())
    }
}
