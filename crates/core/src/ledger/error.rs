//! Ledger error types for validation and posting errors.
//!
//! This module defines all errors that can occur during ledger operations:
//! input validation, period gating, numbering configuration, account
//! resolution, and concurrency conflicts.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry input is malformed. Every violation found is reported
    /// together; nothing is persisted.
    #[error("Journal entry is invalid: {}", violations.join("; "))]
    Validation {
        /// All violations found, in line order.
        violations: Vec<String>,
    },

    // ========== Period Errors ==========
    /// No open accounting period covers the posting date.
    #[error("No open accounting period covers {0}")]
    NoOpenPeriod(NaiveDate),

    /// The accounting period is already closed.
    #[error("Accounting period is already closed")]
    PeriodAlreadyClosed,

    /// The period cannot be closed while close-blocking errors remain.
    #[error("Period cannot be closed: {}", errors.join("; "))]
    CannotClosePeriod {
        /// The blocking errors reported by close validation.
        errors: Vec<String>,
    },

    // ========== Configuration Errors ==========
    /// No numbering series is configured for the document kind.
    #[error("No numbering series configured for {0}")]
    SeriesNotConfigured(String),

    // ========== Account Errors ==========
    /// Referenced account does not exist in the business unit.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Referenced account is inactive.
    #[error("Account {0} is inactive")]
    AccountInactive(String),

    // ========== Concurrency Errors ==========
    /// Concurrent modification detected; the whole call may be retried.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Convenience constructor for a validation error.
    #[must_use]
    pub fn validation(violations: Vec<String>) -> Self {
        Self::Validation { violations }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NoOpenPeriod(_) => "NO_OPEN_PERIOD",
            Self::PeriodAlreadyClosed => "PERIOD_ALREADY_CLOSED",
            Self::CannotClosePeriod { .. } => "CANNOT_CLOSE_PERIOD",
            Self::SeriesNotConfigured(_) => "SERIES_NOT_CONFIGURED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - malformed input
            Self::Validation { .. } => 400,

            // 422 Unprocessable - business rule rejections
            Self::NoOpenPeriod(_)
            | Self::PeriodAlreadyClosed
            | Self::CannotClosePeriod { .. }
            | Self::AccountInactive(_) => 422,

            // 404 Not Found
            Self::AccountNotFound(_) => 404,

            // 409 Conflict - concurrency errors
            Self::ConcurrentModification => 409,

            // 500 Internal Server Error - setup bugs and infrastructure
            Self::SeriesNotConfigured(_) | Self::Database(_) => 500,
        }
    }

    /// Returns true if the whole operation may be retried from scratch.
    ///
    /// Partial retries are never safe; the posting unit of work has already
    /// been rolled back in full when a retryable error surfaces.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}
