//! Journal entry validation.
//!
//! Validation collects every violation before reporting, so a caller fixing
//! a rejected entry sees the full list at once instead of one failure per
//! attempt. No side effect occurs on a rejected entry.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{CreateEntryInput, EntryTotals, JournalLineInput};

/// Validates a candidate journal entry and computes its totals.
///
/// Rules:
/// 1. At least two lines (a single line cannot balance against itself).
/// 2. Each line carries exactly one of debit/credit, strictly positive.
///    Violations are reported with the line's 1-based position.
/// 3. Debit and credit totals balance within the fixed tolerance.
///
/// # Errors
///
/// Returns [`LedgerError::Validation`] carrying every violation found.
pub fn validate_entry(input: &CreateEntryInput) -> Result<EntryTotals, LedgerError> {
    let mut violations = Vec::new();

    if input.lines.len() < 2 {
        violations.push("journal entry must have at least 2 lines".to_string());
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut all_lines_valid = true;

    for (index, line) in input.lines.iter().enumerate() {
        let position = index + 1;
        match check_line(line) {
            Ok(LineSide::Debit(amount)) => total_debit += amount,
            Ok(LineSide::Credit(amount)) => total_credit += amount,
            Err(message) => {
                all_lines_valid = false;
                violations.push(format!("line {position}: {message}"));
            }
        }
    }

    let totals = EntryTotals::new(total_debit, total_credit);

    // The balance check is only meaningful once every line has a single
    // positive side; partial totals would report a spurious imbalance.
    if all_lines_valid && !input.lines.is_empty() && !totals.is_balanced() {
        violations.push(format!(
            "journal entry is not balanced: debit {total_debit}, credit {total_credit}"
        ));
    }

    if violations.is_empty() {
        Ok(totals)
    } else {
        Err(LedgerError::Validation { violations })
    }
}

enum LineSide {
    Debit(Decimal),
    Credit(Decimal),
}

fn check_line(line: &JournalLineInput) -> Result<LineSide, String> {
    match (line.debit, line.credit) {
        (Some(_), Some(_)) => Err("amount must be either debit or credit, not both".to_string()),
        (None, None) => Err("either a debit or a credit amount is required".to_string()),
        (Some(debit), None) => {
            if debit > Decimal::ZERO {
                Ok(LineSide::Debit(debit))
            } else {
                Err("debit amount must be positive".to_string())
            }
        }
        (None, Some(credit)) => {
            if credit > Decimal::ZERO {
                Ok(LineSide::Credit(credit))
            } else {
                Err("credit amount must be positive".to_string())
            }
        }
    }
}
