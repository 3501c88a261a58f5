use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod history;
pub mod participants;
pub mod reader;
pub mod table;

pub use history::{HISTORY_COLUMNS, history_to_tsv, parse_history};
pub use participants::{PARTICIPANT_ID_COLUMN, parse_participants, parse_prefill};
pub use reader::open_maybe_gz;
pub use table::load_table;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("missing column {column:?} in {table}")]
    MissingColumn { table: String, column: String },
    #[error("parse error: {0}")]
    Parse(String),
}

/// Header plus rows of a tab-separated table; every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn require_column(&self, column: &str) -> Result<usize, InputError> {
        self.column_index(column)
            .ok_or_else(|| InputError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
