//! Integration tests for document number allocation.

mod common;

use comanda_core::ledger::DocumentKind;
use comanda_db::repositories::numbering::{CreateSeriesInput, NumberingError, NumberingRepository};

use common::Fixture;

#[tokio::test]
async fn test_next_number_increments() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;
    let numbering = fixture.numbering();

    let first = numbering
        .next_number(DocumentKind::SalesInvoice, fixture.unit_id)
        .await
        .expect("allocation succeeds");
    let second = numbering
        .next_number(DocumentKind::SalesInvoice, fixture.unit_id)
        .await
        .expect("allocation succeeds");

    assert_eq!(first, "INV-1");
    assert_eq!(second, "INV-2");
}

#[tokio::test]
async fn test_series_are_independent_per_kind() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;
    let numbering = fixture.numbering();

    let invoice = numbering
        .next_number(DocumentKind::SalesInvoice, fixture.unit_id)
        .await
        .expect("allocation succeeds");
    let bill = numbering
        .next_number(DocumentKind::PurchaseInvoice, fixture.unit_id)
        .await
        .expect("allocation succeeds");

    assert_eq!(invoice, "INV-1");
    assert_eq!(bill, "BILL-1");
}

#[tokio::test]
async fn test_missing_series_is_a_configuration_error() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;
    let numbering = fixture.numbering();

    // The fixture seeds no series for payments.
    let result = numbering
        .next_number(DocumentKind::IncomingPayment, fixture.unit_id)
        .await;

    match result {
        Err(NumberingError::SeriesNotConfigured { kind, business_unit_id }) => {
            assert_eq!(kind, "incoming_payment");
            assert_eq!(business_unit_id, fixture.unit_id);
        }
        other => panic!("expected SeriesNotConfigured, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_series_rejected() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;
    let numbering = fixture.numbering();

    let result = numbering
        .create_series(CreateSeriesInput {
            business_unit_id: fixture.unit_id,
            document_kind: DocumentKind::JournalEntry,
            prefix: "X-".to_string(),
        })
        .await;

    assert!(matches!(result, Err(NumberingError::DuplicateSeries(_))));
}

#[tokio::test]
async fn test_concurrent_allocations_never_duplicate() {
    let Some(db) = common::test_db().await else { return };
    let fixture = Fixture::new(db).await;

    let allocations = futures::future::join_all((0..8).map(|_| {
        let numbering = NumberingRepository::new(fixture.db.clone());
        let unit_id = fixture.unit_id;
        async move {
            numbering
                .next_number(DocumentKind::JournalEntry, unit_id)
                .await
        }
    }))
    .await;

    let mut numbers: Vec<String> = allocations
        .into_iter()
        .map(|r| r.expect("allocation succeeds"))
        .collect();
    let total = numbers.len();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), total, "allocations must be distinct");
}
