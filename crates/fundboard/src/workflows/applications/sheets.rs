use google_sheets4::api::{ClearValuesRequest, Scope, ValueRange};
use google_sheets4::Sheets;
use serde_json::Value;
use tokio::runtime::Runtime;

use super::store::{TableStore, TableStoreError};

/// Thin wrapper around the generated google-sheets4 client allowing the
/// synchronous merge cycle to read and overwrite the leaderboard worksheet
/// without exposing async details. Hub construction — and therefore
/// credentials — stays with the caller.
pub struct GoogleSheetsStore<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    hub: Sheets<C>,
    runtime: Runtime,
    spreadsheet_id: String,
    worksheet: String,
}

impl<C> GoogleSheetsStore<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    pub fn new(
        hub: Sheets<C>,
        runtime: Runtime,
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Self {
        Self {
            hub,
            runtime,
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
        }
    }

    pub fn with_runtime(
        hub: Sheets<C>,
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Result<Self, TableStoreError> {
        let runtime =
            Runtime::new().map_err(|err| TableStoreError::Unavailable(err.to_string()))?;
        Ok(Self::new(hub, runtime, spreadsheet_id, worksheet))
    }

    fn map_error<E: std::fmt::Display>(err: E) -> TableStoreError {
        TableStoreError::Unavailable(err.to_string())
    }
}

impl<C> std::fmt::Debug for GoogleSheetsStore<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsStore")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet", &self.worksheet)
            .finish_non_exhaustive()
    }
}

impl<C> TableStore for GoogleSheetsStore<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>, TableStoreError> {
        let result = self.runtime.block_on(async {
            self.hub
                .spreadsheets()
                .values_get(&self.spreadsheet_id, &self.worksheet)
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await
        });

        let (_, range) = result.map_err(GoogleSheetsStore::<C>::map_error)?;
        let values = range.values.unwrap_or_default();
        Ok(values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_text).collect())
            .collect())
    }

    fn write_all_rows(&self, rows: Vec<Vec<String>>) -> Result<(), TableStoreError> {
        let values: Vec<Vec<Value>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Value::String).collect())
            .collect();

        let body = ValueRange {
            values: Some(values),
            ..ValueRange::default()
        };

        let result = self.runtime.block_on(async {
            self.hub
                .spreadsheets()
                .values_clear(
                    ClearValuesRequest::default(),
                    &self.spreadsheet_id,
                    &self.worksheet,
                )
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await?;

            self.hub
                .spreadsheets()
                .values_update(body, &self.spreadsheet_id, &self.worksheet)
                .value_input_option("RAW")
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await
        });

        result
            .map(|_| ())
            .map_err(|err| TableStoreError::Rejected(err.to_string()))
    }
}

fn cell_to_text(cell: Value) -> String {
    match cell {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cells_read_back_as_text() {
        assert_eq!(cell_to_text(json!("30%")), "30%");
        assert_eq!(cell_to_text(json!(200)), "200");
        assert_eq!(cell_to_text(Value::Null), "");
    }
}
