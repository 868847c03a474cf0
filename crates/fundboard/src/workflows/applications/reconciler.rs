use std::collections::HashSet;

use chrono::NaiveDateTime;

use super::dedup::dedup_last_wins;
use super::domain::{ApplicantId, IncomingApplication};
use super::normalizer::DecorationFormats;
use super::ranking::rank_records;
use super::schema::{FieldMapping, MissingFieldError, ParsedTable, SchemaError, TableSchema};

/// Failures a merge can surface to the caller. Numeric parse failures are
/// handled per value inside the ranking pass and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

/// Result of merging one application: the rewritten snapshot plus the id of
/// the record the payload produced.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub table: ParsedTable,
    pub submitted: ApplicantId,
}

/// Composes payload translation, deduplication, and ranking into the
/// merge-one-application operation. Pure over its inputs: a snapshot goes
/// in, a new snapshot comes out, and no state is kept between calls.
#[derive(Debug, Clone)]
pub struct Reconciler {
    schema: TableSchema,
    mapping: FieldMapping,
    formats: DecorationFormats,
}

impl Reconciler {
    pub fn new(schema: TableSchema, mapping: FieldMapping, formats: DecorationFormats) -> Self {
        Self {
            schema,
            mapping,
            formats,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            TableSchema::standard(),
            FieldMapping::standard(),
            DecorationFormats::standard(),
        )
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Merge one incoming application into a table snapshot.
    ///
    /// The new record is appended before deduplication, so it always wins
    /// over an existing record with the same id. Comment entries survive the
    /// merge and re-attach by id when the table is rendered.
    pub fn merge_application(
        &self,
        table: ParsedTable,
        payload: &IncomingApplication,
        submitted_at: NaiveDateTime,
    ) -> Result<MergeOutcome, IntakeError> {
        let ParsedTable {
            mut records,
            extra_columns,
            mut comments,
        } = table;

        let incoming = self.mapping.record_from_payload(payload, submitted_at)?;
        let submitted = incoming.id.clone();

        records.push(incoming);
        let records = rank_records(dedup_last_wins(records), &self.formats);

        if let Some(block) = comments.as_mut() {
            let surviving: HashSet<&ApplicantId> = records.iter().map(|record| &record.id).collect();
            block.entries.retain(|id, _| surviving.contains(id));
        }

        Ok(MergeOutcome {
            table: ParsedTable {
                records,
                extra_columns,
                comments,
            },
            submitted,
        })
    }
}
