use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::review::{ReviewError, ReviewSession};

pub fn save_session(session: &ReviewSession, path: &Path) -> Result<(), ReviewError> {
    let io_err = |source| ReviewError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    // written beside the target, then renamed over it
    let tmp = path.with_extension("json.tmp");
    let file = File::create(&tmp).map_err(io_err)?;
    if let Err(err) = write_session(session, file, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(source));
    }
    tracing::debug!(
        participants = session.participants.len(),
        history = session.history.len(),
        "saved session to {}",
        path.display()
    );
    Ok(())
}

fn write_session(session: &ReviewSession, file: File, path: &Path) -> Result<(), ReviewError> {
    let io_err = |source| ReviewError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, session).map_err(|source| ReviewError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)
}

pub fn load_session(path: &Path) -> Result<ReviewSession, ReviewError> {
    let file = File::open(path).map_err(|source| ReviewError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let session: ReviewSession =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ReviewError::Format {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(session)
}
