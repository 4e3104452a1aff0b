//! Integration tests for the journal posting engine.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use comanda_core::ledger::{CreateEntryInput, JournalLineInput, LedgerError};
use comanda_shared::types::{BusinessUnitId, PageRequest, UserId};

use common::{Fixture, CAPITAL, CASH, FOOD_SALES};

fn entry(
    fixture: &Fixture,
    date: chrono::NaiveDate,
    lines: Vec<JournalLineInput>,
) -> CreateEntryInput {
    CreateEntryInput {
        business_unit_id: BusinessUnitId::from_uuid(fixture.unit_id),
        posting_date: date,
        remarks: Some("test entry".to_string()),
        created_by: UserId::from_uuid(fixture.user_id),
        lines,
    }
}

#[tokio::test]
async fn test_post_balanced_entry_updates_balances() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    let posted = fixture
        .journal()
        .post_entry(entry(
            &fixture,
            common::in_period(),
            vec![
                JournalLineInput::debit(CASH, dec!(500.00)),
                JournalLineInput::credit(CAPITAL, dec!(500.00)),
            ],
        ))
        .await
        .expect("balanced entry posts");

    assert_eq!(posted.entry.document_number, "JE-1");
    assert_eq!(posted.lines.len(), 2);
    assert_eq!(posted.lines[0].account_code, CASH);
    assert_eq!(posted.lines[0].line.debit, dec!(500.00));
    assert_eq!(posted.lines[1].account_code, CAPITAL);
    assert_eq!(posted.lines[1].line.credit, dec!(500.00));

    assert_eq!(fixture.balance(CASH).await, dec!(500.00));
    assert_eq!(fixture.balance(CAPITAL).await, dec!(500.00));
}

#[tokio::test]
async fn test_document_numbers_are_sequential() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    for expected in ["JE-1", "JE-2", "JE-3"] {
        let posted = fixture
            .journal()
            .post_entry(entry(
                &fixture,
                common::in_period(),
                vec![
                    JournalLineInput::debit(CASH, dec!(10.00)),
                    JournalLineInput::credit(FOOD_SALES, dec!(10.00)),
                ],
            ))
            .await
            .expect("entry posts");
        assert_eq!(posted.entry.document_number, expected);
    }
}

#[tokio::test]
async fn test_unbalanced_entry_rejected_without_side_effects() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    let result = fixture
        .journal()
        .post_entry(entry(
            &fixture,
            common::in_period(),
            vec![
                JournalLineInput::debit(CASH, dec!(100.00)),
                JournalLineInput::credit(FOOD_SALES, dec!(99.00)),
            ],
        ))
        .await;

    match result {
        Err(LedgerError::Validation { violations }) => {
            assert!(violations.iter().any(|v| v.contains("not balanced")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert_eq!(fixture.balance(CASH).await, Decimal::ZERO);
    let page = fixture
        .journal()
        .list_entries(fixture.unit_id, PageRequest::default())
        .await
        .expect("list entries");
    assert!(page.data.is_empty(), "no entry may be written on rejection");
}

#[tokio::test]
async fn test_line_amount_violations_collected() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    let both = JournalLineInput {
        account_code: CASH.to_string(),
        debit: Some(dec!(50.00)),
        credit: Some(dec!(50.00)),
        memo: None,
    };
    let neither = JournalLineInput {
        account_code: FOOD_SALES.to_string(),
        debit: None,
        credit: None,
        memo: None,
    };
    let zero = JournalLineInput::debit(CAPITAL, dec!(0));

    let result = fixture
        .journal()
        .post_entry(entry(&fixture, common::in_period(), vec![both, neither, zero]))
        .await;

    match result {
        Err(LedgerError::Validation { violations }) => {
            assert_eq!(violations.len(), 3);
            assert!(violations[0].starts_with("line 1:"));
            assert!(violations[1].starts_with("line 2:"));
            assert!(violations[2].starts_with("line 3:"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_atomicity_on_unresolvable_account() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    let result = fixture
        .journal()
        .post_entry(entry(
            &fixture,
            common::in_period(),
            vec![
                JournalLineInput::debit(CASH, dec!(100.00)),
                JournalLineInput::credit("9999", dec!(100.00)),
            ],
        ))
        .await;

    assert!(
        matches!(result, Err(LedgerError::AccountNotFound(code)) if code == "9999"),
        "unknown account must abort the posting"
    );

    // Nothing from the aborted unit of work may be observable: no entry,
    // no balance change, and the number allocation rolled back too.
    let page = fixture
        .journal()
        .list_entries(fixture.unit_id, PageRequest::default())
        .await
        .expect("list entries");
    assert!(page.data.is_empty());
    assert_eq!(fixture.balance(CASH).await, Decimal::ZERO);

    let posted = fixture
        .journal()
        .post_entry(entry(
            &fixture,
            common::in_period(),
            vec![
                JournalLineInput::debit(CASH, dec!(1.00)),
                JournalLineInput::credit(FOOD_SALES, dec!(1.00)),
            ],
        ))
        .await
        .expect("entry posts after rollback");
    assert_eq!(posted.entry.document_number, "JE-1");
}

#[tokio::test]
async fn test_posting_outside_open_period_rejected() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    let result = fixture
        .journal()
        .post_entry(entry(
            &fixture,
            common::out_of_period(),
            vec![
                JournalLineInput::debit(CASH, dec!(100.00)),
                JournalLineInput::credit(FOOD_SALES, dec!(100.00)),
            ],
        ))
        .await;

    assert!(matches!(result, Err(LedgerError::NoOpenPeriod(date)) if date == common::out_of_period()));
    assert_eq!(fixture.balance(CASH).await, Decimal::ZERO);
}

#[tokio::test]
async fn test_concurrent_postings_yield_distinct_numbers() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    let journal = fixture.journal();
    let inputs: Vec<CreateEntryInput> = (0..4)
        .map(|_| {
            entry(
                &fixture,
                common::in_period(),
                vec![
                    JournalLineInput::debit(CASH, dec!(25.00)),
                    JournalLineInput::credit(FOOD_SALES, dec!(25.00)),
                ],
            )
        })
        .collect();

    let results = futures::future::join_all(
        inputs
            .into_iter()
            .map(|input| {
                let journal = journal.clone();
                async move { journal.post_entry(input).await }
            }),
    )
    .await;

    let mut numbers: Vec<String> = results
        .into_iter()
        .map(|r| r.expect("concurrent entry posts").entry.document_number)
        .collect();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 4, "document numbers must never duplicate");

    assert_eq!(fixture.balance(CASH).await, dec!(100.00));
    assert_eq!(fixture.balance(FOOD_SALES).await, dec!(100.00));
}

#[tokio::test]
async fn test_find_entry_returns_resolved_lines() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    let posted = fixture
        .journal()
        .post_entry(entry(
            &fixture,
            common::in_period(),
            vec![
                JournalLineInput::debit(CASH, dec!(42.00)).with_memo("till float"),
                JournalLineInput::credit(CAPITAL, dec!(42.00)),
            ],
        ))
        .await
        .expect("entry posts");

    let fetched = fixture
        .journal()
        .find_entry(posted.entry.id)
        .await
        .expect("find entry")
        .expect("entry exists");

    assert_eq!(fetched.entry.document_number, posted.entry.document_number);
    assert_eq!(fetched.lines.len(), 2);
    assert_eq!(fetched.lines[0].account_code, CASH);
    assert_eq!(fetched.lines[0].line.memo.as_deref(), Some("till float"));
}
