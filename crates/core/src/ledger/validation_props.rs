//! Property-based tests for journal entry validation and sign rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use comanda_shared::types::{BusinessUnitId, UserId};

use super::error::LedgerError;
use super::types::{AccountType, CreateEntryInput, JournalLineInput, BALANCE_TOLERANCE};
use super::validation::validate_entry;

/// Strategy for a positive monetary amount between 0.01 and 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a non-empty list of positive amounts.
fn amounts(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(positive_amount(), 1..=max_len)
}

/// Strategy for an account classification.
fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Revenue),
        Just(AccountType::Expense),
    ]
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

    /// For any split of a total into debit lines mirrored by credit lines,
    /// validation accepts the entry and reports equal totals.
    #[test]
    fn prop_mirrored_splits_always_validate(values in amounts(8)) {
        let total: Decimal = values.iter().copied().sum();
        let mut lines: Vec<JournalLineInput> = values
            .iter()
            .enumerate()
            .map(|(i, v)| JournalLineInput::debit(format!("1{i:03}"), *v))
            .collect();
        lines.push(JournalLineInput::credit("4000", total));

        let totals = validate_entry(&make_input(lines)).expect("mirrored split must validate");
        prop_assert_eq!(totals.total_debit, total);
        prop_assert_eq!(totals.total_credit, total);
        prop_assert!(totals.is_balanced());
    }

    /// For any pair of totals differing by at least the tolerance,
    /// validation rejects the entry and reports the imbalance.
    #[test]
    fn prop_imbalance_beyond_tolerance_rejected(
        amount in positive_amount(),
        gap_cents in 1i64..10_000i64,
    ) {
        let gap = Decimal::new(gap_cents, 2);
        let lines = vec![
            JournalLineInput::debit("1000", amount + gap),
            JournalLineInput::credit("4000", amount),
        ];

        let result = validate_entry(&make_input(lines));
        match result {
            Err(LedgerError::Validation { violations }) => {
                prop_assert!(violations.iter().any(|v| v.contains("not balanced")));
            }
            other => prop_assert!(false, "expected rejection, got {:?}", other),
        }
    }

    /// A rejected entry never reports zero violations.
    #[test]
    fn prop_rejection_carries_messages(amount in positive_amount()) {
        let result = validate_entry(&make_input(vec![JournalLineInput::debit("1000", amount)]));
        match result {
            Err(LedgerError::Validation { violations }) => {
                prop_assert!(!violations.is_empty());
            }
            other => prop_assert!(false, "expected rejection, got {:?}", other),
        }
    }

    /// For any amounts, the signed delta of a debit-normal classification is
    /// the negation of a credit-normal one: the two sign rules partition the
    /// five classifications without overlap.
    #[test]
    fn prop_sign_rules_are_mirrored(debit in positive_amount(), credit in positive_amount()) {
        let debit_normal = AccountType::Asset.signed_delta(debit, credit);
        let credit_normal = AccountType::Revenue.signed_delta(debit, credit);
        prop_assert_eq!(debit_normal, -credit_normal);
    }

    /// For any classification, a single debit line of amount X followed by a
    /// single credit line of amount X nets to zero on the same account.
    #[test]
    fn prop_offsetting_lines_net_to_zero(
        account_type in account_type_strategy(),
        amount in positive_amount(),
    ) {
        let applied = account_type.signed_delta(amount, Decimal::ZERO)
            + account_type.signed_delta(Decimal::ZERO, amount);
        prop_assert_eq!(applied, Decimal::ZERO);
    }

    /// The tolerance constant itself is the first rejected difference.
    #[test]
    fn prop_tolerance_is_exclusive(amount in positive_amount()) {
        let lines = vec![
            JournalLineInput::debit("1000", amount + BALANCE_TOLERANCE),
            JournalLineInput::credit("4000", amount),
        ];
        prop_assert!(validate_entry(&make_input(lines)).is_err());
    }
}
