use std::collections::HashMap;

use super::domain::{ApplicantId, InvestorRecord};

/// Collapse repeated identities: the record appearing later in the input
/// fully replaces the earlier one (no field-level merge). Survivors keep
/// their first-seen positions; final ordering is the ranker's job.
pub(crate) fn dedup_last_wins(records: Vec<InvestorRecord>) -> Vec<InvestorRecord> {
    let mut slots: HashMap<ApplicantId, usize> = HashMap::with_capacity(records.len());
    let mut deduped: Vec<InvestorRecord> = Vec::with_capacity(records.len());

    for record in records {
        match slots.get(&record.id) {
            Some(&slot) => deduped[slot] = record,
            None => {
                slots.insert(record.id.clone(), deduped.len());
                deduped.push(record);
            }
        }
    }

    deduped
}
