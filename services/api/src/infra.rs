use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Leaderboard snapshot used by the demo command: two ranked applicants and
/// one legacy row whose rate was never filled in.
pub(crate) fn sample_table_rows() -> Vec<Vec<String>> {
    let rows: [&[&str]; 4] = [
        &[
            "CUserID", "Имя", "Ставка", "Сумма", "Телефон", "Телеграм", "Создано", "Ранг",
            "Комментарии",
        ],
        &[
            "ab12.x",
            "Алиса Первая",
            "10%",
            "100 млн.",
            "79990000001",
            "https://t.me/alice",
            "2024-05-12 09:15:00",
            "1",
            "Ранний контакт",
        ],
        &[
            "cd34.y",
            "Борис Второй",
            "20%",
            "200 млн.",
            "79990000002",
            "https://t.me/boris",
            "2024-05-14 18:40:00",
            "2",
            "Просил перезвонить",
        ],
        &[
            "ef56.z",
            "Вера Третья",
            "уточняется",
            "150 млн.",
            "79990000003",
            "",
            "2024-05-20 11:05:00",
            "",
            "",
        ],
    ];

    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
