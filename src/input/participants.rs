use std::collections::HashSet;

use crate::input::{InputError, Table};

pub const PARTICIPANT_ID_COLUMN: &str = "participant_id";

/// Participant ids from the `participant_id` column, or the first column when
/// the table has none. Blank ids are skipped and duplicates keep the first row.
pub fn parse_participants(table: &Table) -> Result<Vec<String>, InputError> {
    let col = table.column_index(PARTICIPANT_ID_COLUMN).unwrap_or(0);
    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let id = table.cell(row, col);
        if id.is_empty() {
            tracing::warn!("{} row {} has an empty participant id; skipping", table.name, row + 1);
            continue;
        }
        if !seen.insert(id.to_string()) {
            tracing::warn!(
                "duplicate participant in {}; keeping first (participant {})",
                table.name,
                id
            );
            continue;
        }
        ids.push(id.to_string());
    }
    if ids.is_empty() {
        return Err(InputError::Parse(format!("{} lists no participants", table.name)));
    }
    Ok(ids)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefillCell {
    pub participant: String,
    pub field: String,
    pub raw: String,
}

/// Non-empty annotation cells of a prefill table, row by row and left to right.
pub fn parse_prefill(table: &Table) -> Result<Vec<PrefillCell>, InputError> {
    let id_col = table.require_column(PARTICIPANT_ID_COLUMN)?;
    let mut out = Vec::new();
    for row in 0..table.len() {
        let participant = table.cell(row, id_col);
        if participant.is_empty() {
            continue;
        }
        for (col, field) in table.columns.iter().enumerate() {
            if col == id_col {
                continue;
            }
            let raw = table.cell(row, col);
            if raw.is_empty() {
                continue;
            }
            out.push(PrefillCell {
                participant: participant.to_string(),
                field: field.clone(),
                raw: raw.to_string(),
            });
        }
    }
    Ok(out)
}
