use crate::input::{InputError, Table};
use crate::review::HistoryEntry;

pub const HISTORY_COLUMNS: [&str; 5] = ["participant", "field", "raw", "accepted", "timestamp"];

/// History rows exported from an earlier review, in file order.
pub fn parse_history(table: &Table) -> Result<Vec<HistoryEntry>, InputError> {
    let participant_col = table.require_column("participant")?;
    let field_col = table.require_column("field")?;
    let raw_col = table.require_column("raw")?;
    let accepted_col = table.require_column("accepted")?;
    let timestamp_col = table.require_column("timestamp")?;

    let mut out = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let participant = table.cell(row, participant_col);
        if participant.is_empty() {
            tracing::warn!("{} row {} has an empty participant; skipping", table.name, row + 1);
            continue;
        }
        let accepted = parse_flag(table.cell(row, accepted_col)).ok_or_else(|| {
            InputError::Parse(format!(
                "{} row {}: accepted must be true/false/1/0, got {:?}",
                table.name,
                row + 1,
                table.cell(row, accepted_col)
            ))
        })?;
        let timestamp = table.cell(row, timestamp_col).parse::<u64>().map_err(|_| {
            InputError::Parse(format!(
                "{} row {}: timestamp must be unix seconds, got {:?}",
                table.name,
                row + 1,
                table.cell(row, timestamp_col)
            ))
        })?;
        out.push(HistoryEntry {
            participant: participant.to_string(),
            field: table.cell(row, field_col).to_string(),
            raw: table.cell(row, raw_col).to_string(),
            accepted,
            timestamp,
        });
    }
    Ok(out)
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// TSV with a `HISTORY_COLUMNS` header that `parse_history` reads back.
/// Tabs and line breaks inside raw values become spaces.
pub fn history_to_tsv(entries: &[HistoryEntry]) -> String {
    let mut out = HISTORY_COLUMNS.join("\t");
    out.push('\n');
    for entry in entries {
        let raw: String = entry
            .raw
            .chars()
            .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
            .collect();
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            entry.participant, entry.field, raw, entry.accepted, entry.timestamp
        ));
    }
    out
}
