use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::info;

use super::domain::{IncomingApplication, InvestorRecord};
use super::reconciler::{IntakeError, Reconciler};
use super::store::{TableStore, TableStoreError};

/// Service composing the reconciler with the table store: one read-merge-
/// write cycle per submission. Serializing concurrent submissions against
/// the same table is the deployment's responsibility.
pub struct ApplicationIntakeService<S> {
    store: Arc<S>,
    reconciler: Reconciler,
}

impl<S> ApplicationIntakeService<S>
where
    S: TableStore + 'static,
{
    pub fn new(store: Arc<S>, reconciler: Reconciler) -> Self {
        Self { store, reconciler }
    }

    /// Merge one incoming application and persist the rewritten table.
    ///
    /// Every failure aborts before the write step, so the store never holds
    /// a partially merged table.
    pub fn submit(
        &self,
        payload: &IncomingApplication,
    ) -> Result<SubmissionReceipt, IntakeServiceError> {
        let rows = self.store.read_all_rows()?;
        let table = self
            .reconciler
            .schema()
            .parse_table(&rows)
            .map_err(IntakeError::from)?;

        let submitted_at = Local::now().naive_local();
        let outcome = self
            .reconciler
            .merge_application(table, payload, submitted_at)?;

        let rendered = self.reconciler.schema().render_table(&outcome.table);
        self.store.write_all_rows(rendered)?;

        let stored = outcome
            .table
            .records
            .iter()
            .find(|record| record.id == outcome.submitted);
        let receipt = SubmissionReceipt {
            id: outcome.submitted.0.clone(),
            name: stored.map(|record| record.name.clone()).unwrap_or_default(),
            rank: stored.and_then(|record| record.rank.position()),
            total_applications: outcome.table.records.len(),
        };

        info!(
            id = %receipt.id,
            rank = ?receipt.rank,
            total = receipt.total_applications,
            "application merged into leaderboard"
        );

        Ok(receipt)
    }

    /// Read-only view of the current leaderboard, in stored order.
    pub fn leaderboard(&self) -> Result<Vec<RecordView>, IntakeServiceError> {
        let rows = self.store.read_all_rows()?;
        let table = self
            .reconciler
            .schema()
            .parse_table(&rows)
            .map_err(IntakeError::from)?;

        Ok(table.records.iter().map(RecordView::from_record).collect())
    }
}

/// Public acknowledgement returned to the submitting CRM.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub total_applications: usize,
}

/// Leaderboard entry exposed by the read endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub id: String,
    pub name: String,
    pub rate: String,
    pub amount: String,
    pub phone: String,
    pub telegram: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl RecordView {
    fn from_record(record: &InvestorRecord) -> Self {
        Self {
            id: record.id.0.clone(),
            name: record.name.clone(),
            rate: record.rate.clone(),
            amount: record.amount.clone(),
            phone: record.phone.clone(),
            telegram: record.telegram.clone(),
            created_at: record.created_at.clone(),
            rank: record.rank.position(),
        }
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Store(#[from] TableStoreError),
}
