use std::io::Read;
use std::sync::{Arc, Mutex};

/// Full-table storage collaborator. The core never mutates a remote row in
/// place: it reads every row, computes the replacement table, and overwrites
/// the whole range in one call.
pub trait TableStore: Send + Sync {
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>, TableStoreError>;
    fn write_all_rows(&self, rows: Vec<Vec<String>>) -> Result<(), TableStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TableStoreError {
    #[error("table backend unavailable: {0}")]
    Unavailable(String),
    #[error("table backend rejected the write: {0}")]
    Rejected(String),
}

/// In-memory store for tests, demos, and single-process deployments.
#[derive(Debug, Default, Clone)]
pub struct MemoryTableStore {
    rows: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MemoryTableStore {
    pub fn seeded(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows.lock().expect("table mutex poisoned").clone()
    }
}

impl TableStore for MemoryTableStore {
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>, TableStoreError> {
        Ok(self.snapshot())
    }

    fn write_all_rows(&self, rows: Vec<Vec<String>>) -> Result<(), TableStoreError> {
        *self.rows.lock().expect("table mutex poisoned") = rows;
        Ok(())
    }
}

/// Load a table snapshot from CSV: header first, ragged rows allowed.
pub fn rows_from_csv<R: Read>(reader: R) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn memory_store_overwrites_on_write() {
        let store = MemoryTableStore::seeded(vec![vec!["old".to_string()]]);
        store
            .write_all_rows(vec![vec!["new".to_string()]])
            .expect("write succeeds");
        assert_eq!(store.read_all_rows().expect("read succeeds"), vec![vec!["new".to_string()]]);
    }

    #[test]
    fn csv_snapshots_keep_ragged_rows() {
        let rows = rows_from_csv(Cursor::new(
            "CUserID,Имя,Ставка\n1,Alice,10%\n2,Bob\n",
        ))
        .expect("csv parses");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["CUserID", "Имя", "Ставка"]);
        assert_eq!(rows[1], vec!["1", "Alice", "10%"]);
        assert_eq!(rows[2], vec!["2", "Bob"]);
    }
}
