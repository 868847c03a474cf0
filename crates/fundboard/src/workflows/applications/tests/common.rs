use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::workflows::applications::domain::IncomingApplication;
use crate::workflows::applications::reconciler::Reconciler;
use crate::workflows::applications::service::ApplicationIntakeService;
use crate::workflows::applications::store::{MemoryTableStore, TableStore, TableStoreError};

pub(super) fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

pub(super) fn header_row() -> Vec<String> {
    row(&[
        "CUserID", "Имя", "Ставка", "Сумма", "Телефон", "Телеграм", "Создано", "Ранг",
    ])
}

pub(super) fn alice_row() -> Vec<String> {
    row(&[
        "1",
        "Alice",
        "10%",
        "100 млн.",
        "000000000000",
        "https://t.me/alice",
        "2024-05-01 10:00:00",
        "1",
    ])
}

pub(super) fn bob_row() -> Vec<String> {
    row(&[
        "2",
        "Bob",
        "20%",
        "200 млн.",
        "000000000000",
        "https://t.me/bob",
        "2024-05-02 10:00:00",
        "2",
    ])
}

pub(super) fn payload(pairs: &[(&str, &str)]) -> IncomingApplication {
    let fields: HashMap<String, Value> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect();
    IncomingApplication(fields)
}

pub(super) fn charlie_payload() -> IncomingApplication {
    payload(&[
        ("cuid", "3"),
        ("name", "Charlie"),
        ("Фонд_ставка_текст", "30%"),
        ("Фонд_сумма_текст", "300 млн."),
        ("phone", "81231231212"),
        ("messenger_username", "charlie"),
    ])
}

pub(super) fn submitted_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .expect("valid date")
        .and_hms_opt(16, 29, 22)
        .expect("valid time")
}

pub(super) fn build_service() -> (
    ApplicationIntakeService<MemoryTableStore>,
    Arc<MemoryTableStore>,
) {
    let store = Arc::new(MemoryTableStore::seeded(vec![
        header_row(),
        alice_row(),
        bob_row(),
    ]));
    let service = ApplicationIntakeService::new(store.clone(), Reconciler::standard());
    (service, store)
}

pub(super) struct UnavailableTableStore;

impl TableStore for UnavailableTableStore {
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>, TableStoreError> {
        Err(TableStoreError::Unavailable("backend offline".to_string()))
    }

    fn write_all_rows(&self, _rows: Vec<Vec<String>>) -> Result<(), TableStoreError> {
        Err(TableStoreError::Unavailable("backend offline".to_string()))
    }
}

/// Store whose reads succeed but whose writes are refused.
pub(super) struct ReadOnlyTableStore;

impl TableStore for ReadOnlyTableStore {
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>, TableStoreError> {
        Ok(vec![header_row(), alice_row()])
    }

    fn write_all_rows(&self, _rows: Vec<Vec<String>>) -> Result<(), TableStoreError> {
        Err(TableStoreError::Rejected("read only".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
