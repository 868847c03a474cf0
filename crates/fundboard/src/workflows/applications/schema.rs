use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::domain::{ApplicantId, CommentBlock, IncomingApplication, InvestorRecord, Rank};
use super::shape::equalize_row_lengths;

/// Canonical header labels for the fixed columns, in storage order.
const FIXED_LABELS: [&str; 8] = [
    "CUserID",
    "Имя",
    "Ставка",
    "Сумма",
    "Телефон",
    "Телеграм",
    "Создано",
    "Ранг",
];

/// Width of the typed prefix every rendered row carries.
pub(crate) const FIXED_COLUMNS: usize = FIXED_LABELS.len();

/// Leading columns a stored row must provide (`id` through `phone`); legacy
/// tables may end before the `telegram`/`created_at`/`rank` columns.
const REQUIRED_COLUMNS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("row has {got} columns, the schema requires at least {min}")]
    RowTooShort { got: usize, min: usize },
}

#[derive(Debug, thiserror::Error)]
#[error("incoming application is missing required field '{key}'")]
pub struct MissingFieldError {
    pub key: String,
}

/// Snapshot of the worksheet: typed records, the labels of passthrough
/// columns, and the optional comment block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    pub records: Vec<InvestorRecord>,
    pub extra_columns: Vec<String>,
    pub comments: Option<CommentBlock>,
}

/// Fixed column layout of the leaderboard worksheet plus the marker label
/// that opens the freeform comment region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    labels: Vec<String>,
    comment_marker: String,
}

impl TableSchema {
    pub fn standard() -> Self {
        Self {
            labels: FIXED_LABELS.iter().map(|label| label.to_string()).collect(),
            comment_marker: "Комментарии".to_string(),
        }
    }

    /// Map one stored row onto the typed schema. The first eight positions
    /// are positional fields (missing trailing ones default to empty);
    /// everything after becomes the opaque `extra` tail, order preserved.
    /// This layer moves raw text only — no value validation happens here.
    pub fn row_to_record(&self, row: &[String]) -> Result<InvestorRecord, SchemaError> {
        if row.len() < REQUIRED_COLUMNS {
            return Err(SchemaError::RowTooShort {
                got: row.len(),
                min: REQUIRED_COLUMNS,
            });
        }

        let cell = |index: usize| row.get(index).cloned().unwrap_or_default();

        Ok(InvestorRecord {
            id: ApplicantId(cell(0)),
            name: cell(1),
            rate: cell(2),
            amount: cell(3),
            phone: cell(4),
            telegram: cell(5),
            created_at: cell(6),
            rank: Rank::from_cell(&cell(7)),
            extra: row.iter().skip(FIXED_COLUMNS).cloned().collect(),
        })
    }

    /// Exact inverse of [`TableSchema::row_to_record`]: the fixed cells
    /// followed by `extra` in original order.
    pub fn record_to_row(&self, record: &InvestorRecord) -> Vec<String> {
        let mut row = vec![
            record.id.0.clone(),
            record.name.clone(),
            record.rate.clone(),
            record.amount.clone(),
            record.phone.clone(),
            record.telegram.clone(),
            record.created_at.clone(),
            record.rank.as_cell(),
        ];
        row.extend(record.extra.iter().cloned());
        row
    }

    /// Parse the full table (header first). The comment marker is located in
    /// the header after the fixed region; the marker column and everything
    /// after it split off into the [`CommentBlock`], keyed by record id.
    pub fn parse_table(&self, rows: &[Vec<String>]) -> Result<ParsedTable, SchemaError> {
        let Some((header, data)) = rows.split_first() else {
            return Ok(ParsedTable::default());
        };

        let marker_at = header
            .iter()
            .enumerate()
            .skip(FIXED_COLUMNS)
            .find(|(_, label)| label.trim() == self.comment_marker)
            .map(|(index, _)| index);

        let passthrough_end = marker_at.unwrap_or(header.len()).max(FIXED_COLUMNS);
        let extra_columns: Vec<String> = header
            .iter()
            .take(passthrough_end)
            .skip(FIXED_COLUMNS)
            .cloned()
            .collect();

        let mut comments = marker_at.map(|index| CommentBlock {
            columns: header[index..].to_vec(),
            entries: HashMap::new(),
        });

        let mut records = Vec::with_capacity(data.len());
        for row in data {
            let (typed, comment_cells): (&[String], &[String]) = match marker_at {
                Some(index) if row.len() > index => (&row[..index], &row[index..]),
                _ => (&row[..], &[]),
            };

            let record = self.row_to_record(typed)?;
            if let Some(block) = comments.as_mut() {
                if comment_cells.iter().any(|cell| !cell.is_empty()) {
                    block
                        .entries
                        .insert(record.id.clone(), comment_cells.to_vec());
                }
            }
            records.push(record);
        }

        Ok(ParsedTable {
            records,
            extra_columns,
            comments,
        })
    }

    /// Serialize a snapshot back to rows: canonical header, one row per
    /// record with its comment cells re-attached by id (records without an
    /// entry get empty cells), the whole batch equalized for storage.
    pub fn render_table(&self, table: &ParsedTable) -> Vec<Vec<String>> {
        let mut header = self.labels.clone();
        header.extend(table.extra_columns.iter().cloned());
        if let Some(block) = &table.comments {
            header.extend(block.columns.iter().cloned());
        }

        let mut rows = Vec::with_capacity(table.records.len() + 1);
        rows.push(header);

        for record in &table.records {
            let mut row = self.record_to_row(record);
            if let Some(block) = &table.comments {
                // comment cells must land under the comment columns
                let comment_start = FIXED_COLUMNS + table.extra_columns.len();
                if row.len() < comment_start {
                    row.resize(comment_start, String::new());
                }
                if let Some(cells) = block.entries.get(&record.id) {
                    row.extend(cells.iter().cloned());
                }
            }
            rows.push(row);
        }

        equalize_row_lengths(rows)
    }
}

/// Maps the fixed record fields to the CRM's payload keys. An explicit
/// configuration value handed to the reconciler, not process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub id: String,
    pub name: String,
    pub rate: String,
    pub amount: String,
    pub phone: String,
    pub messenger_username: String,
    pub messenger_link_prefix: String,
}

impl FieldMapping {
    pub fn standard() -> Self {
        Self {
            id: "cuid".to_string(),
            name: "name".to_string(),
            rate: "Фонд_ставка_текст".to_string(),
            amount: "Фонд_сумма_текст".to_string(),
            phone: "phone".to_string(),
            messenger_username: "messenger_username".to_string(),
            messenger_link_prefix: "https://t.me/".to_string(),
        }
    }

    /// Translate one webhook payload into a record. Every mapped field is
    /// required and fails with [`MissingFieldError`] naming the absent key;
    /// the messenger link is derived and optional.
    pub fn record_from_payload(
        &self,
        payload: &IncomingApplication,
        submitted_at: NaiveDateTime,
    ) -> Result<InvestorRecord, MissingFieldError> {
        let required = |key: &str| {
            payload.field(key).ok_or_else(|| MissingFieldError {
                key: key.to_string(),
            })
        };

        let telegram = payload
            .field(&self.messenger_username)
            .filter(|username| !username.is_empty())
            .map(|username| format!("{}{username}", self.messenger_link_prefix))
            .unwrap_or_default();

        Ok(InvestorRecord {
            id: ApplicantId(required(&self.id)?),
            name: required(&self.name)?,
            rate: required(&self.rate)?,
            amount: required(&self.amount)?,
            phone: required(&self.phone)?,
            telegram,
            created_at: submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            rank: Rank::Unranked,
            extra: Vec::new(),
        })
    }
}
