//! Property-based tests for derived posting line builders.
//!
//! The builders must always hand the posting engine an entry it accepts:
//! whatever the source document looks like, the generated lines balance.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use comanda_shared::types::{BusinessUnitId, UserId};

use super::posting::{
    incoming_payment_lines, outgoing_payment_lines, purchase_invoice_lines, sales_invoice_lines,
    DocumentAmount,
};
use super::types::{CreateEntryInput, JournalLineInput};
use super::validation::validate_entry;

/// Strategy for a positive item amount between 0.01 and 100,000.00.
fn item_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for invoice items, each against its own account.
fn invoice_items() -> impl Strategy<Value = Vec<DocumentAmount>> {
    prop::collection::vec(item_amount(), 1..=10).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, amount)| DocumentAmount::new(format!("4{i:03}"), amount))
            .collect()
    })
}

fn make_input(lines: Vec<JournalLineInput>) -> CreateEntryInput {
    CreateEntryInput {
        business_unit_id: BusinessUnitId::new(),
        posting_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        remarks: None,
        created_by: UserId::new(),
        lines,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any invoice whose total equals the sum of its items, the A/R
    /// builder produces an entry the posting engine accepts, with the debit
    /// total equal to the invoice total.
    #[test]
    fn prop_sales_invoice_lines_always_balance(items in invoice_items()) {
        let total: Decimal = items.iter().map(|i| i.amount).sum();
        let lines = sales_invoice_lines("1100", total, &items);

        prop_assert_eq!(lines.len(), items.len() + 1);
        let totals = validate_entry(&make_input(lines)).expect("A/R lines must validate");
        prop_assert_eq!(totals.total_debit, total);
        prop_assert_eq!(totals.total_credit, total);
    }

    /// Mirror property for the A/P builder.
    #[test]
    fn prop_purchase_invoice_lines_always_balance(items in invoice_items()) {
        let total: Decimal = items.iter().map(|i| i.amount).sum();
        let lines = purchase_invoice_lines("2100", total, &items);

        let totals = validate_entry(&make_input(lines)).expect("A/P lines must validate");
        prop_assert_eq!(totals.total_debit, total);
        prop_assert_eq!(totals.total_credit, total);
    }

    /// Payment builders always produce a two-line balanced entry.
    #[test]
    fn prop_payment_lines_always_balance(amount in item_amount()) {
        for lines in [
            incoming_payment_lines("1000", "1100", amount),
            outgoing_payment_lines("2100", "1000", amount),
        ] {
            prop_assert_eq!(lines.len(), 2);
            let totals = validate_entry(&make_input(lines)).expect("payment lines must validate");
            prop_assert_eq!(totals.total_debit, amount);
            prop_assert_eq!(totals.total_credit, amount);
        }
    }
}
