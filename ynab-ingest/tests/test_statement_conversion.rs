use std::collections::HashSet;

use chrono::NaiveDate;
use ynab_core::{ClearedStatus, Milliunits, Transaction, TransactionsPayload};
use ynab_ingest::{ConvertError, LineError, Reconciled, convert};

const ONE_POSITIVE: &str = "29/10/2024;80;Virement;;;VIREMENT M JEAN MARTIN OU;;
29/11/2024;100,06;;01234 123456A";

const SAME_AMOUNT_SAME_DATE: &str = "29/10/2024;-21,32;Carte;;CB  MERCH1          28/10/24;;0;Divers
29/10/2024;-21,32;Carte;;CB  MERCH2          28/10/24;;0;Divers
29/11/2024;100,06;;01234 123456A";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn transfer_in() -> Transaction {
    Transaction::cleared(
        "acc-id",
        ymd(2024, 10, 29),
        Milliunits(80000),
        "VIREMENT M JEAN MARTIN OU",
        "VIREMENT M JEAN MARTIN OU",
        "YNAB:80000:2024-10-29:1",
    )
}

#[test]
fn test_nil_reader() {
    let out = convert(None::<&[u8]>, "acc-id").unwrap();
    assert!(out.transactions.is_empty());
    assert_eq!(out.reconciled, Reconciled::NotFound);
    assert_eq!(out.reconciled.amount(), Milliunits::ZERO);
}

#[test]
fn test_no_transactions() {
    let out = convert(Some("".as_bytes()), "acc-id").unwrap();
    assert!(out.transactions.is_empty());
    assert_eq!(out.reconciled.amount(), Milliunits::ZERO);
    assert!(!out.reconciled.footer_seen());
}

#[test]
fn test_one_positive_transaction() {
    let out = convert(Some(ONE_POSITIVE.as_bytes()), "acc-id").unwrap();
    assert_eq!(out.transactions, vec![transfer_in()]);
    assert_eq!(out.reconciled, Reconciled::Balance(Milliunits(100060)));
}

#[test]
fn test_one_negative_and_one_positive_transactions() {
    let input = "29/10/2024;80;Virement;;;VIREMENT M JEAN MARTIN OU;;
29/10/2024;-21,32;Carte;;CB  MERCH          28/10/24;;0;Divers
29/11/2024;100,06;;01234 123456A";

    let out = convert(Some(input.as_bytes()), "acc-id").unwrap();
    assert_eq!(
        out.transactions,
        vec![
            transfer_in(),
            Transaction::cleared(
                "acc-id",
                ymd(2024, 10, 28),
                Milliunits(-21320),
                "CB  MERCH",
                "CB  MERCH          28/10/24",
                "YNAB:-21320:2024-10-28:1",
            ),
        ]
    );
    assert_eq!(out.reconciled.amount(), Milliunits(100060));
}

#[test]
fn test_same_amount_same_date() {
    let out = convert(Some(SAME_AMOUNT_SAME_DATE.as_bytes()), "acc-id").unwrap();
    let ids: Vec<_> = out.transactions.iter().map(|t| t.import_id.as_str()).collect();
    assert_eq!(ids, ["YNAB:-21320:2024-10-28:1", "YNAB:-21320:2024-10-28:2"]);

    assert_eq!(out.transactions[0].payee_name, "CB  MERCH1");
    assert_eq!(out.transactions[1].payee_name, "CB  MERCH2");
    assert!(out.transactions.iter().all(|t| t.cleared == ClearedStatus::Cleared));
}

#[test]
fn test_import_ids_unique_within_batch() {
    let input = "01/10/2024;-5;Carte;;CB A          30/09/24;;0;Divers
01/10/2024;-5;Carte;;CB B          30/09/24;;0;Divers
01/10/2024;-5;Carte;;CB C;;0;Divers
01/10/2024;-5;Carte;;CB D;;0;Divers
30/09/2024;-5;Carte;;CB E;;0;Divers
02/10/2024;12,5;Vir;;;VIR X;;
02/10/2024;12,5;Vir;;;VIR Y;;
";

    let out = convert(Some(input.as_bytes()), "acc-id").unwrap();
    assert_eq!(out.transactions.len(), 7);

    let unique: HashSet<_> = out.transactions.iter().map(|t| &t.import_id).collect();
    assert_eq!(unique.len(), out.transactions.len());
    assert_eq!(out.transactions[4].import_id, "YNAB:-5000:2024-09-30:3");
}

#[test]
fn test_conversion_is_idempotent() {
    let first = convert(Some(SAME_AMOUNT_SAME_DATE.as_bytes()), "acc-id").unwrap();
    let second = convert(Some(SAME_AMOUNT_SAME_DATE.as_bytes()), "acc-id").unwrap();
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&TransactionsPayload::new(first.transactions)).unwrap();
    let second_json = serde_json::to_string(&TransactionsPayload::new(second.transactions)).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_footer_stops_processing() {
    let input = "29/10/2024;80;Virement;;;VIREMENT M JEAN MARTIN OU;;
29/11/2024;100,06;;01234 123456A
30/10/2024;15;Virement;;;AFTER FOOTER;;
not a date;at all;;;;;;";

    let out = convert(Some(input.as_bytes()), "acc-id").unwrap();
    assert_eq!(out.transactions, vec![transfer_in()]);
    assert_eq!(out.reconciled.amount(), Milliunits(100060));
}

#[test]
fn test_unparsable_footer_reports_zero() {
    let input = "29/10/2024;80;Virement;;;VIREMENT M JEAN MARTIN OU;;
29/11/2024;SOLDE;;01234 123456A";

    let out = convert(Some(input.as_bytes()), "acc-id").unwrap();
    assert_eq!(out.transactions.len(), 1);
    assert_eq!(
        out.reconciled,
        Reconciled::Unparsable {
            raw: "SOLDE".to_string()
        }
    );
    assert_eq!(out.reconciled.amount(), Milliunits::ZERO);
    assert!(out.reconciled.footer_seen());
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let mut with_bom = b"\xEF\xBB\xBF".to_vec();
    with_bom.extend_from_slice(ONE_POSITIVE.as_bytes());

    let plain = convert(Some(ONE_POSITIVE.as_bytes()), "acc-id").unwrap();
    let bom = convert(Some(with_bom.as_slice()), "acc-id").unwrap();
    assert_eq!(plain, bom);
}

#[test]
fn test_crlf_line_endings() {
    let input = ONE_POSITIVE.replace('\n', "\r\n");
    let out = convert(Some(input.as_bytes()), "acc-id").unwrap();
    assert_eq!(out.transactions, vec![transfer_in()]);
    assert_eq!(out.reconciled.amount(), Milliunits(100060));
}

#[test]
fn test_bad_amount_rejects_whole_batch() {
    let input = "29/10/2024;80;Virement;;;VIREMENT M JEAN MARTIN OU;;
29/10/2024;vingt;Carte;;CB  MERCH          28/10/24;;0;Divers
29/11/2024;100,06;;01234 123456A";

    let err = convert(Some(input.as_bytes()), "acc-id").unwrap_err();
    assert!(matches!(err, ConvertError::Line { line: 2, .. }), "{err:?}");
}

#[test]
fn test_latin1_bytes_are_replaced() {
    let input = b"29/10/2024;-5;Carte;;CB CAF\xC9;;0;D\n";
    let out = convert(Some(&input[..]), "acc-id").unwrap();

    let txn = &out.transactions[0];
    assert_eq!(txn.payee_name, "CB CAF\u{FFFD}");
    assert_eq!(txn.memo, "CB CAF\u{FFFD}");
    assert_eq!(txn.amount, Milliunits(-5000));
    assert_eq!(txn.import_id, "YNAB:-5000:2024-10-29:1");
}

#[test]
fn test_unpadded_row_date_rejects_batch() {
    let input = "1/1/2024;80;Virement;;;VIR X;;\n";
    let err = convert(Some(input.as_bytes()), "acc-id").unwrap_err();
    assert!(
        matches!(err, ConvertError::Line { line: 1, source: LineError::DateShape { .. } }),
        "{err:?}"
    );
}

#[test]
fn test_space_padded_stamp_keeps_row_date() {
    let input = "29/10/2024;-5;Carte;;CB SHOP  1/10/24;;0;D\n";
    let out = convert(Some(input.as_bytes()), "acc-id").unwrap();
    assert_eq!(out.transactions[0].date, ymd(2024, 10, 29));
    assert_eq!(out.transactions[0].payee_name, "CB SHOP  1/10/24");
}

#[test]
fn test_underscore_amount_rejects_batch() {
    let input = "29/10/2024;1_000;Virement;;;VIR X;;\n";
    let err = convert(Some(input.as_bytes()), "acc-id").unwrap_err();
    assert!(
        matches!(err, ConvertError::Line { line: 1, source: LineError::AmountSyntax { .. } }),
        "{err:?}"
    );
}

#[test]
fn test_bare_quote_rejects_batch() {
    let input = "29/10/2024;80;Virement;;;VIREMENT M JEAN MARTIN OU;;
29/10/2024;-5;Carte;;CB \"CHEZ PAUL\";;0;D
29/11/2024;100,06;;01234 123456A";

    let err = convert(Some(input.as_bytes()), "acc-id").unwrap_err();
    assert!(matches!(err, ConvertError::Quote { line: 2, .. }), "{err:?}");
    assert!(err.to_string().contains("bare \""), "{err}");
}

#[test]
fn test_quoted_field_with_delimiter() {
    let input = "29/10/2024;-5;Carte;;\"CB \"\"CHEZ PAUL\"\"; PARIS\";;0;D
29/11/2024;100,06;;01234 123456A";

    let out = convert(Some(input.as_bytes()), "acc-id").unwrap();
    assert_eq!(out.transactions[0].payee_name, "CB \"CHEZ PAUL\"; PARIS");
    assert_eq!(out.reconciled.amount(), Milliunits(100060));
}
