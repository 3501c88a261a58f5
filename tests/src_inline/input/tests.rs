use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::history::parse_history;
use super::participants::{PrefillCell, parse_participants, parse_prefill};
use super::table::load_table;
use super::{InputError, Table};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("phylogic_review_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

#[test]
fn test_table_plain_and_gz_agree() {
    let dir = make_temp_dir();
    let contents = "sample_id\tparticipant_id\twxs_purity\nS1\tP1\t0.5\n\nS2\tP2\n";
    let plain = dir.join("samples.tsv");
    let gz = dir.join("samples.tsv.gz");
    write_file(&plain, contents);
    write_gz(&gz, contents);

    let a = load_table(&plain).unwrap();
    let b = load_table(&gz).unwrap();
    assert_eq!(a.columns, b.columns);
    assert_eq!(a.rows, b.rows);
    assert_eq!(a.name, "samples.tsv");
    assert_eq!(a.len(), 2);
    // short rows are padded
    assert_eq!(a.rows[1], vec!["S2", "P2", ""]);
}

#[test]
fn test_table_crlf_and_missing_file() {
    let dir = make_temp_dir();
    let path = dir.join("crlf.tsv");
    write_file(&path, "a\tb\r\n1\t2\r\n");
    let table = load_table(&path).unwrap();
    assert_eq!(table.columns, vec!["a", "b"]);
    assert_eq!(table.rows, vec![vec!["1".to_string(), "2".to_string()]]);

    let err = load_table(&dir.join("nope.tsv")).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_empty_table_is_parse_error() {
    let dir = make_temp_dir();
    let path = dir.join("empty.tsv");
    write_file(&path, "");
    assert!(matches!(load_table(&path), Err(InputError::Parse(_))));
}

#[test]
fn test_participants_column_and_duplicates() {
    let table = Table {
        name: "participants.tsv".to_string(),
        columns: vec!["cohort".to_string(), "participant_id".to_string()],
        rows: vec![
            vec!["A".to_string(), "P2".to_string()],
            vec!["A".to_string(), "P1".to_string()],
            vec!["B".to_string(), "P2".to_string()],
            vec!["B".to_string(), "".to_string()],
        ],
    };
    assert_eq!(parse_participants(&table).unwrap(), vec!["P2", "P1"]);
}

#[test]
fn test_participants_fall_back_to_first_column() {
    let table = Table {
        name: "p.tsv".to_string(),
        columns: vec!["id".to_string()],
        rows: vec![vec!["P9".to_string()]],
    };
    assert_eq!(parse_participants(&table).unwrap(), vec!["P9"]);

    let empty = Table {
        name: "p.tsv".to_string(),
        columns: vec!["id".to_string()],
        rows: Vec::new(),
    };
    assert!(parse_participants(&empty).is_err());
}

#[test]
fn test_prefill_cells() {
    let table = Table {
        name: "annot.tsv".to_string(),
        columns: vec![
            "participant_id".to_string(),
            "Urgency".to_string(),
            "notes".to_string(),
        ],
        rows: vec![
            vec!["P1".to_string(), "Minor".to_string(), "".to_string()],
            vec!["P2".to_string(), "".to_string(), "check tree".to_string()],
        ],
    };
    let cells = parse_prefill(&table).unwrap();
    assert_eq!(
        cells,
        vec![
            PrefillCell {
                participant: "P1".to_string(),
                field: "Urgency".to_string(),
                raw: "Minor".to_string(),
            },
            PrefillCell {
                participant: "P2".to_string(),
                field: "notes".to_string(),
                raw: "check tree".to_string(),
            },
        ]
    );

    let no_id = Table {
        name: "annot.tsv".to_string(),
        columns: vec!["notes".to_string()],
        rows: Vec::new(),
    };
    assert!(matches!(
        parse_prefill(&no_id),
        Err(InputError::MissingColumn { .. })
    ));
}

#[test]
fn test_history_rows_and_errors() {
    let dir = make_temp_dir();
    let path = dir.join("history.tsv");
    write_file(
        &path,
        "participant\tfield\traw\taccepted\ttimestamp\n\
         P1\tnotes\tok\tTrue\t10\n\
         \tnotes\tno owner\ttrue\t11\n\
         P2\tUrgency\t\t0\t12\n",
    );
    let entries = parse_history(&load_table(&path).unwrap()).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].accepted);
    assert_eq!(entries[0].timestamp, 10);
    assert_eq!(entries[1].raw, "");
    assert!(!entries[1].accepted);

    write_file(&path, "participant\tfield\traw\taccepted\ttimestamp\nP1\tnotes\tx\tmaybe\t1\n");
    assert!(matches!(
        parse_history(&load_table(&path).unwrap()),
        Err(InputError::Parse(_))
    ));
    write_file(&path, "participant\tfield\traw\taccepted\ttimestamp\nP1\tnotes\tx\ttrue\t-5\n");
    assert!(matches!(
        parse_history(&load_table(&path).unwrap()),
        Err(InputError::Parse(_))
    ));
    write_file(&path, "participant\tfield\traw\taccepted\nP1\tnotes\tx\ttrue\n");
    assert!(matches!(
        parse_history(&load_table(&path).unwrap()),
        Err(InputError::MissingColumn { column, .. }) if column == "timestamp"
    ));
}
