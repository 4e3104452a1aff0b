//! Journal posting engine.
//!
//! `post_entry` is the only write path into the ledger. A candidate entry is
//! validated up front (collecting every violation, with no side effect on
//! rejection), then persisted in one database transaction together with its
//! document number allocation and the balance deltas it implies. A failure
//! at any step rolls the whole unit of work back: a journal entry and its
//! balance effects are indivisible.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use comanda_core::ledger::{
    validate_entry, AccountType, CreateEntryInput, DocumentKind, LedgerError,
};
use comanda_shared::types::{PageRequest, PageResponse};

use crate::entities::{
    accounting_periods, accounts, journal_entries, journal_lines,
    sea_orm_active_enums::PeriodStatus,
};

use super::account::AccountRepository;
use super::numbering::NumberingRepository;

/// A posted journal entry with its resolved lines.
#[derive(Debug, Clone)]
pub struct JournalEntryWithLines {
    /// The entry header, including the generated document number.
    pub entry: journal_entries::Model,
    /// The entry's lines in display order.
    pub lines: Vec<PostedLine>,
}

/// A journal line with its resolved account details.
#[derive(Debug, Clone)]
pub struct PostedLine {
    /// The persisted line.
    pub line: journal_lines::Model,
    /// Code of the account the line posted to.
    pub account_code: String,
    /// Name of the account the line posted to.
    pub account_name: String,
}

/// Journal posting engine and entry queries.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and posts a journal entry.
    ///
    /// Validation runs before anything is written and reports every
    /// violation together. On success, one transaction:
    /// 1. resolves the open accounting period for the posting date,
    /// 2. allocates the entry's document number,
    /// 3. persists the entry header and its lines,
    /// 4. applies each line's signed balance delta to its account
    ///    (debit-normal: `debit - credit`; credit-normal: `credit - debit`),
    ///    with the account row locked.
    ///
    /// Touched account rows and the numbering series row are locked
    /// `FOR UPDATE`, so concurrent postings against shared rows serialize
    /// while disjoint postings proceed in parallel.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Validation`] for malformed input (nothing written).
    /// - [`LedgerError::NoOpenPeriod`] when no open period covers the date.
    /// - [`LedgerError::SeriesNotConfigured`] when the unit has no
    ///   journal-entry numbering series.
    /// - [`LedgerError::AccountNotFound`] / [`LedgerError::AccountInactive`]
    ///   for unresolvable lines; the whole transaction rolls back.
    /// - [`LedgerError::ConcurrentModification`] on serialization conflicts;
    ///   retry the whole call.
    pub async fn post_entry(
        &self,
        input: CreateEntryInput,
    ) -> Result<JournalEntryWithLines, LedgerError> {
        use sea_orm::TransactionTrait;

        let totals = validate_entry(&input)?;
        let business_unit_id = input.business_unit_id.into_inner();

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let period = accounting_periods::Entity::find()
            .filter(accounting_periods::Column::BusinessUnitId.eq(business_unit_id))
            .filter(accounting_periods::Column::Status.eq(PeriodStatus::Open))
            .filter(accounting_periods::Column::StartDate.lte(input.posting_date))
            .filter(accounting_periods::Column::EndDate.gte(input.posting_date))
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(LedgerError::NoOpenPeriod(input.posting_date))?;

        let document_number =
            NumberingRepository::allocate(&txn, DocumentKind::JournalEntry, business_unit_id)
                .await?;

        let now = Utc::now().into();
        let entry = journal_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_unit_id: Set(business_unit_id),
            accounting_period_id: Set(period.id),
            document_number: Set(document_number),
            posting_date: Set(input.posting_date),
            remarks: Set(input.remarks.clone()),
            created_by: Set(input.created_by.into_inner()),
            approved_by: Set(None),
            posted_at: Set(now),
            created_at: Set(now),
        };
        let entry = entry.insert(&txn).await.map_err(map_db_err)?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for (index, line_input) in input.lines.iter().enumerate() {
            let account = accounts::Entity::find()
                .filter(accounts::Column::BusinessUnitId.eq(business_unit_id))
                .filter(accounts::Column::Code.eq(line_input.account_code.clone()))
                .lock_exclusive()
                .one(&txn)
                .await
                .map_err(map_db_err)?
                .ok_or_else(|| LedgerError::AccountNotFound(line_input.account_code.clone()))?;

            if !account.is_active {
                return Err(LedgerError::AccountInactive(account.code));
            }

            let debit = line_input.debit.unwrap_or(Decimal::ZERO);
            let credit = line_input.credit.unwrap_or(Decimal::ZERO);

            let line = journal_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                journal_entry_id: Set(entry.id),
                account_id: Set(account.id),
                line_no: Set(i32::try_from(index + 1).unwrap_or(i32::MAX)),
                debit: Set(debit),
                credit: Set(credit),
                memo: Set(line_input.memo.clone()),
                created_at: Set(now),
            };
            let line = line.insert(&txn).await.map_err(map_db_err)?;

            let delta = AccountType::from(account.account_type).signed_delta(debit, credit);
            AccountRepository::apply_delta(&txn, account.id, delta)
                .await
                .map_err(map_db_err)?;

            lines.push(PostedLine {
                line,
                account_code: account.code,
                account_name: account.name,
            });
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(
            entry_id = %entry.id,
            document_number = %entry.document_number,
            total_debit = %totals.total_debit,
            total_credit = %totals.total_credit,
            lines = lines.len(),
            "Journal entry posted"
        );

        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Finds an entry by id with its resolved lines.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn find_entry(
        &self,
        entry_id: Uuid,
    ) -> Result<Option<JournalEntryWithLines>, LedgerError> {
        let Some(entry) = journal_entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::JournalEntryId.eq(entry.id))
            .order_by_asc(journal_lines::Column::LineNo)
            .find_also_related(accounts::Entity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|(line, account)| {
                let (account_code, account_name) = account
                    .map_or_else(|| (String::new(), String::new()), |a| (a.code, a.name));
                PostedLine {
                    line,
                    account_code,
                    account_name,
                }
            })
            .collect();

        Ok(Some(JournalEntryWithLines { entry, lines }))
    }

    /// Lists entries of a business unit, newest posting date first.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_entries(
        &self,
        business_unit_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<journal_entries::Model>, LedgerError> {
        let query = journal_entries::Entity::find()
            .filter(journal_entries::Column::BusinessUnitId.eq(business_unit_id));

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;
        let data = query
            .order_by_desc(journal_entries::Column::PostingDate)
            .order_by_desc(journal_entries::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}

/// Maps a database error onto the ledger error surface.
///
/// Serialization failures and deadlocks are reported as retryable
/// concurrency conflicts; everything else passes through.
fn map_db_err(err: DbErr) -> LedgerError {
    let message = err.to_string();
    if message.contains("40001")
        || message.contains("40P01")
        || message.contains("could not serialize")
        || message.contains("deadlock detected")
    {
        LedgerError::ConcurrentModification
    } else {
        LedgerError::Database(message)
    }
}
