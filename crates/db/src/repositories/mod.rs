//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. The posting-related repositories wrap the pure logic in
//! `comanda-core` in database transactions.

pub mod account;
pub mod document;
pub mod journal;
pub mod numbering;
pub mod period;
pub mod posting;
pub mod report;

pub use account::{AccountError, AccountFilter, AccountRepository, CreateAccountInput};
pub use document::{
    CreateInvoiceItemInput, CreatePaymentInput, CreatePurchaseInvoiceInput,
    CreateSalesInvoiceInput, DocumentError, DocumentRepository,
};
pub use journal::{JournalEntryWithLines, JournalRepository, PostedLine};
pub use numbering::{CreateSeriesInput, NumberingError, NumberingRepository};
pub use period::{CreatePeriodInput, PeriodError, PeriodRepository};
pub use posting::{PostingError, PostingRepository};
pub use report::{ReportError, ReportRepository};
