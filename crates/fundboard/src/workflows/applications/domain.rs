use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for applicants; the CRM user id is the dataset key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Position assigned by the ranking pass.
///
/// `Unranked` marks records whose rate or amount could not be parsed; they
/// never consume a numbered slot and render as an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Assigned(u32),
    Unranked,
}

impl Rank {
    pub(crate) fn from_cell(cell: &str) -> Self {
        match cell.trim().parse::<u32>() {
            Ok(position) if position >= 1 => Rank::Assigned(position),
            _ => Rank::Unranked,
        }
    }

    pub fn as_cell(self) -> String {
        match self {
            Rank::Assigned(position) => position.to_string(),
            Rank::Unranked => String::new(),
        }
    }

    pub fn position(self) -> Option<u32> {
        match self {
            Rank::Assigned(position) => Some(position),
            Rank::Unranked => None,
        }
    }
}

/// One applicant's row: typed prefix fields plus an opaque passthrough tail.
///
/// `rate` and `amount` stay decorated text at rest ("30%", "200 млн."); the
/// ranking pass converts them to numbers internally and re-renders them.
/// `extra` carries any trailing columns the schema does not name, in their
/// original order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorRecord {
    pub id: ApplicantId,
    pub name: String,
    pub rate: String,
    pub amount: String,
    pub phone: String,
    pub telegram: String,
    pub created_at: String,
    pub rank: Rank,
    pub extra: Vec<String>,
}

/// Freeform columns attached to records by identity, outside the typed
/// schema: the marker column and everything after it. Entries re-attach to
/// their records by id after ranking reorders the table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentBlock {
    pub columns: Vec<String>,
    pub entries: HashMap<ApplicantId, Vec<String>>,
}

/// Raw webhook payload: a flat JSON object keyed by CRM field names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingApplication(pub HashMap<String, Value>);

impl IncomingApplication {
    /// CRM exports mix strings, numbers, and booleans; all are read as text.
    /// Nested objects and arrays are not addressable fields.
    pub fn field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}
