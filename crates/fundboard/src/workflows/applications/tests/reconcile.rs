use super::common::*;
use crate::workflows::applications::domain::{ApplicantId, Rank};
use crate::workflows::applications::reconciler::{IntakeError, Reconciler};

fn ids(reconciler: &Reconciler, rows: &[Vec<String>]) -> Vec<String> {
    reconciler
        .schema()
        .parse_table(rows)
        .expect("table parses")
        .records
        .iter()
        .map(|record| record.id.0.clone())
        .collect()
}

#[test]
fn merge_appends_ranks_and_orders_by_rate() {
    let reconciler = Reconciler::standard();
    let table = reconciler
        .schema()
        .parse_table(&[header_row(), alice_row(), bob_row()])
        .expect("table parses");

    let outcome = reconciler
        .merge_application(table, &charlie_payload(), submitted_at())
        .expect("merge succeeds");

    let records = &outcome.table.records;
    assert_eq!(outcome.submitted, ApplicantId("3".to_string()));
    assert_eq!(
        records.iter().map(|r| r.id.0.as_str()).collect::<Vec<_>>(),
        ["1", "2", "3"]
    );
    assert_eq!(
        records.iter().map(|r| r.rank).collect::<Vec<_>>(),
        [Rank::Assigned(1), Rank::Assigned(2), Rank::Assigned(3)]
    );

    let charlie = &records[2];
    assert_eq!(charlie.name, "Charlie");
    assert_eq!(charlie.rate, "30%");
    assert_eq!(charlie.amount, "300 млн.");
    assert_eq!(charlie.telegram, "https://t.me/charlie");
    assert_eq!(charlie.created_at, "2024-06-01 16:29:22");
}

#[test]
fn merge_replaces_existing_identity_with_newer_data() {
    let reconciler = Reconciler::standard();
    let table = reconciler
        .schema()
        .parse_table(&[header_row(), alice_row(), bob_row()])
        .expect("table parses");

    let resubmission = payload(&[
        ("cuid", "2"),
        ("name", "Bob"),
        ("Фонд_ставка_текст", "25%"),
        ("Фонд_сумма_текст", "250 млн."),
        ("phone", "000000000000"),
    ]);

    let outcome = reconciler
        .merge_application(table, &resubmission, submitted_at())
        .expect("merge succeeds");

    let records = &outcome.table.records;
    assert_eq!(records.len(), 2);
    let bob = records
        .iter()
        .find(|record| record.id.0 == "2")
        .expect("bob survives");
    assert_eq!(bob.rate, "25%");
    assert_eq!(bob.amount, "250 млн.");
    assert_eq!(bob.rank, Rank::Assigned(2));
}

#[test]
fn comment_entries_follow_their_records_through_reordering() {
    let reconciler = Reconciler::standard();
    let rows = vec![
        row(&[
            "CUserID", "Имя", "Ставка", "Сумма", "Телефон", "Телеграм", "Создано", "Ранг",
            "Комментарии",
        ]),
        row(&["1", "Alice", "10%", "100 млн.", "0", "", "", "1", "Это Алиса"]),
        row(&["2", "Bob", "30%", "200 млн.", "0", "", "", "2", "Это Боб"]),
    ];
    let table = reconciler.schema().parse_table(&rows).expect("table parses");

    let charlie = payload(&[
        ("cuid", "3"),
        ("name", "Charlie"),
        ("Фонд_ставка_текст", "20%"),
        ("Фонд_сумма_текст", "300 млн."),
        ("phone", "0"),
    ]);
    let outcome = reconciler
        .merge_application(table, &charlie, submitted_at())
        .expect("merge succeeds");

    // Charlie's 20% slots between Alice and Bob
    assert_eq!(
        outcome
            .table
            .records
            .iter()
            .map(|r| r.id.0.as_str())
            .collect::<Vec<_>>(),
        ["1", "3", "2"]
    );

    let rendered = reconciler.schema().render_table(&outcome.table);
    let comment_cells: Vec<&str> = rendered[1..].iter().map(|row| row[8].as_str()).collect();
    assert_eq!(comment_cells, ["Это Алиса", "", "Это Боб"]);
}

#[test]
fn missing_mapped_key_aborts_the_merge() {
    let reconciler = Reconciler::standard();
    let table = reconciler
        .schema()
        .parse_table(&[header_row(), alice_row()])
        .expect("table parses");

    let incomplete = payload(&[("cuid", "2"), ("name", "Bob")]);
    let error = reconciler
        .merge_application(table, &incomplete, submitted_at())
        .expect_err("payload is incomplete");

    match error {
        IntakeError::MissingField(missing) => assert_eq!(missing.key, "Фонд_ставка_текст"),
        other => panic!("expected missing field error, got {other:?}"),
    }
}

#[test]
fn unparsable_legacy_rows_sink_to_the_bottom_unranked() {
    let reconciler = Reconciler::standard();
    let rows = vec![
        header_row(),
        row(&["9", "Legacy", "уточняется", "100 млн.", "0", "", "", ""]),
        alice_row(),
    ];
    let table = reconciler.schema().parse_table(&rows).expect("table parses");

    let outcome = reconciler
        .merge_application(table, &charlie_payload(), submitted_at())
        .expect("merge succeeds");

    let records = &outcome.table.records;
    assert_eq!(
        records.iter().map(|r| r.id.0.as_str()).collect::<Vec<_>>(),
        ["1", "3", "9"]
    );
    assert_eq!(records[2].rank, Rank::Unranked);
    assert_eq!(records[2].rate, "");
    // rank numbering skips the unrankable row without leaving a gap
    assert_eq!(records[0].rank, Rank::Assigned(1));
    assert_eq!(records[1].rank, Rank::Assigned(2));
}

#[test]
fn repeated_merges_of_the_same_payload_are_stable() {
    let reconciler = Reconciler::standard();
    let table = reconciler
        .schema()
        .parse_table(&[header_row(), alice_row(), bob_row()])
        .expect("table parses");

    let first = reconciler
        .merge_application(table, &charlie_payload(), submitted_at())
        .expect("first merge succeeds");
    let second = reconciler
        .merge_application(first.table.clone(), &charlie_payload(), submitted_at())
        .expect("second merge succeeds");

    assert_eq!(first.table, second.table);

    let rendered = reconciler.schema().render_table(&second.table);
    assert_eq!(
        ids(&reconciler, &rendered),
        vec!["1".to_string(), "2".to_string(), "3".to_string()]
    );
}
