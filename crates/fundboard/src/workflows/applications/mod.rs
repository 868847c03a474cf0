//! Investor application intake: payload translation, deduplication,
//! competitive ranking, and full-table persistence against the leaderboard
//! worksheet.
//!
//! The pipeline is pure and synchronous: a table snapshot goes in, a ranked
//! snapshot comes out, and the surrounding service performs exactly one
//! store write per submission.

pub(crate) mod dedup;
pub mod domain;
pub(crate) mod normalizer;
pub(crate) mod ranking;
pub mod reconciler;
pub mod router;
pub mod schema;
pub mod service;
pub mod shape;
pub mod sheets;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{ApplicantId, CommentBlock, IncomingApplication, InvestorRecord, Rank};
pub use normalizer::DecorationFormats;
pub use reconciler::{IntakeError, MergeOutcome, Reconciler};
pub use router::intake_router;
pub use schema::{FieldMapping, MissingFieldError, ParsedTable, SchemaError, TableSchema};
pub use service::{ApplicationIntakeService, IntakeServiceError, RecordView, SubmissionReceipt};
pub use shape::equalize_row_lengths;
pub use sheets::GoogleSheetsStore;
pub use store::{rows_from_csv, MemoryTableStore, TableStore, TableStoreError};
