use std::cmp::Ordering;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::input::participants::PARTICIPANT_ID_COLUMN;
use crate::input::{InputError, Table};

pub const COLLECTION_DATE_COLUMN: &str = "collection_date_dfd";

pub const SAMPLE_VIEW_COLUMNS: &[&str] =
    &["sample_id", "wxs_purity", "wxs_ploidy", COLLECTION_DATE_COLUMN];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub id: String,
}

/// One participant's samples, ordered by collection date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn sample_view(samples: &Table, participant: &str) -> Result<SampleView, InputError> {
    let id_col = samples.require_column(PARTICIPANT_ID_COLUMN)?;
    let date_col = samples.require_column(COLLECTION_DATE_COLUMN)?;
    let projection = SAMPLE_VIEW_COLUMNS
        .iter()
        .map(|c| samples.require_column(c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut selected: Vec<usize> = (0..samples.len())
        .filter(|&row| samples.cell(row, id_col) == participant)
        .collect();
    // stable: rows with equal or missing dates keep table order
    selected.sort_by(|&a, &b| {
        compare_dates(
            parse_date(samples.cell(a, date_col)),
            parse_date(samples.cell(b, date_col)),
        )
    });

    let rows = selected
        .into_iter()
        .map(|row| {
            projection
                .iter()
                .map(|&col| samples.cell(row, col).to_string())
                .collect()
        })
        .collect();

    Ok(SampleView {
        columns: SAMPLE_VIEW_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

fn parse_date(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn compare_dates(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl SampleView {
    pub fn column_specs(&self) -> Vec<ColumnSpec> {
        self.columns
            .iter()
            .map(|c| ColumnSpec {
                name: c.clone(),
                id: c.clone(),
            })
            .collect()
    }

    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(c, v)| (c.clone(), Value::String(v.clone())))
                    .collect()
            })
            .collect()
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "records": self.records(),
            "columns": self.column_specs(),
        })
    }

    pub fn to_tsv(&self) -> String {
        let mut out = self.columns.join("\t");
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }
}
