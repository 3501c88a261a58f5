use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::annotation::LabelVocabulary;
use crate::input::Table;
use crate::input::participants::PrefillCell;
use crate::model::ReviewerKind;
use crate::schema::{
    AnnotationValue, FieldConfig, Rejection, SchemaError, SchemaRegistry, session_schema,
};

pub mod store;

pub use store::{load_session, save_session};

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("{field} value {raw:?} rejected: {reason}")]
    Rejected {
        field: String,
        raw: String,
        reason: Rejection,
    },
    #[error("failed to access session {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid session file {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub values: BTreeMap<String, AnnotationValue>,
}

impl ReviewRecord {
    pub fn get(&self, field: &str) -> Option<&AnnotationValue> {
        self.values.get(field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub participant: String,
    pub field: String,
    pub raw: String,
    pub accepted: bool,
    pub timestamp: u64,
}

/// Persisted state of a review. The schema is rebuilt from the vocabulary and
/// the extra `fields` on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSession {
    pub description: String,
    pub reviewer: ReviewerKind,
    pub vocabulary: LabelVocabulary,
    pub participants: Vec<String>,
    pub samples: Table,
    pub records: BTreeMap<String, ReviewRecord>,
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl ReviewSession {
    pub fn new(
        description: &str,
        reviewer: ReviewerKind,
        vocabulary: LabelVocabulary,
        participants: Vec<String>,
        samples: Table,
    ) -> Self {
        let records = participants
            .iter()
            .map(|p| (p.clone(), ReviewRecord::default()))
            .collect();
        Self {
            description: description.to_string(),
            reviewer,
            vocabulary,
            participants,
            samples,
            records,
            history: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn schema(&self) -> Result<SchemaRegistry, SchemaError> {
        session_schema(&self.vocabulary, &self.fields)
    }

    pub fn record(&self, participant: &str) -> Result<&ReviewRecord, ReviewError> {
        self.records
            .get(participant)
            .ok_or_else(|| ReviewError::UnknownParticipant(participant.to_string()))
    }

    pub fn history_for<'a>(
        &'a self,
        participant: &'a str,
    ) -> impl Iterator<Item = &'a HistoryEntry> {
        self.history.iter().filter(move |h| h.participant == participant)
    }

    /// Every attempt lands in the history; only accepted values reach the record.
    pub fn submit(
        &mut self,
        schema: &SchemaRegistry,
        participant: &str,
        field: &str,
        raw: &str,
    ) -> Result<&AnnotationValue, ReviewError> {
        if !self.records.contains_key(participant) {
            return Err(ReviewError::UnknownParticipant(participant.to_string()));
        }
        let verdict = schema.validate(field, raw)?;
        self.history.push(HistoryEntry {
            participant: participant.to_string(),
            field: field.to_string(),
            raw: raw.to_string(),
            accepted: verdict.is_ok(),
            timestamp: unix_now(),
        });
        match verdict {
            Ok(value) => {
                tracing::info!(participant, field, "annotation recorded");
                let record = self
                    .records
                    .get_mut(participant)
                    .ok_or_else(|| ReviewError::UnknownParticipant(participant.to_string()))?;
                record.values.insert(field.to_string(), value);
                Ok(&record.values[field])
            }
            Err(reason) => {
                tracing::info!(participant, field, %reason, "annotation rejected");
                Err(ReviewError::Rejected {
                    field: field.to_string(),
                    raw: raw.to_string(),
                    reason,
                })
            }
        }
    }

    /// Appends history from an earlier review. Records are left untouched.
    /// Entries for participants outside the index are skipped.
    pub fn import_history(&mut self, entries: Vec<HistoryEntry>) -> usize {
        let mut imported = 0usize;
        for entry in entries {
            if !self.records.contains_key(&entry.participant) {
                tracing::warn!(
                    "history entry for participant {} outside the review index; skipping",
                    entry.participant
                );
                continue;
            }
            self.history.push(entry);
            imported += 1;
        }
        imported
    }

    /// Returns the number of accepted cells; rejected ones are skipped.
    pub fn prefill(
        &mut self,
        schema: &SchemaRegistry,
        cells: &[PrefillCell],
    ) -> Result<usize, ReviewError> {
        let mut accepted = 0usize;
        for cell in cells {
            if !self.records.contains_key(&cell.participant) {
                tracing::warn!(
                    "prefilled annotation for participant {} outside the review index; skipping",
                    cell.participant
                );
                continue;
            }
            match self.submit(schema, &cell.participant, &cell.field, &cell.raw) {
                Ok(_) => accepted += 1,
                Err(ReviewError::Rejected { field, raw, reason }) => {
                    tracing::warn!(
                        "prefilled {} for participant {} rejected ({:?}: {}); skipping",
                        field,
                        cell.participant,
                        raw,
                        reason
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Ok(accepted)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/review/tests.rs"]
mod tests;
