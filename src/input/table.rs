use std::io::BufRead;
use std::path::Path;

use crate::input::reader::open_maybe_gz;
use crate::input::{InputError, Table};

pub fn load_table(path: &Path) -> Result<Table, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    read_table(reader.as_mut(), &name)
}

pub fn read_table(reader: &mut dyn BufRead, name: &str) -> Result<Table, InputError> {
    let mut buf = String::new();

    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(InputError::Parse(format!("{name} is empty")));
    }
    let columns: Vec<String> = buf
        .trim_end_matches(['\n', '\r'])
        .split('\t')
        .map(|s| s.trim().to_string())
        .collect();
    if columns.iter().all(|c| c.is_empty()) {
        return Err(InputError::Parse(format!("{name} header is empty")));
    }

    let mut rows = Vec::new();
    let mut line_no = 1usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() > columns.len() {
            tracing::warn!(
                "{} line {} has {} fields for {} columns; extra fields dropped",
                name,
                line_no,
                fields.len(),
                columns.len()
            );
        }
        let row = (0..columns.len())
            .map(|idx| fields.get(idx).map(|s| s.trim()).unwrap_or("").to_string())
            .collect();
        rows.push(row);
    }

    tracing::debug!(table = name, rows = rows.len(), columns = columns.len(), "loaded table");

    Ok(Table {
        name: name.to_string(),
        columns,
        rows,
    })
}
