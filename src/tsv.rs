// TSV file operations

use crate::error::{Result, StoreError};
use crate::record::{HEADER, TaskRecord};
use fs2::FileExt;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read every record from a store file, in file order
///
/// A missing file reads as an empty store. The header line is optional so
/// files written before the header existed still load.
pub fn read_records(path: &Path) -> Result<Vec<TaskRecord>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file = ?path, "Store file missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let reader = BufReader::new(file);
    let mut records = Vec::new();
    let mut seen_ids = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| StoreError::io(path, e))?;

        if line_num == 0 && line == HEADER {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let malformed = |reason: String| StoreError::Malformed {
            path: path.to_path_buf(),
            line: line_num + 1,
            reason,
        };

        let record = TaskRecord::from_row(&line).map_err(malformed)?;
        if !seen_ids.insert(record.id) {
            return Err(malformed(format!("duplicate id {}", record.id)));
        }
        records.push(record);
    }

    debug!(file = ?path, count = records.len(), "Loaded records from TSV");

    Ok(records)
}

/// Render the full file content: header plus one row per record
pub fn render(records: &[TaskRecord]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + records.len() * 48);
    out.push_str(HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.to_row());
        out.push('\n');
    }
    out
}

/// Replace the store file with `records`
///
/// Writes a sibling temp file, syncs it, then renames it over `path`, so a
/// crash mid-write leaves the previous content in place.
pub fn write_records(path: &Path, records: &[TaskRecord]) -> Result<()> {
    let tmp_path = temp_path(path);

    let result = (|| -> io::Result<()> {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(render(records).as_bytes())?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::io(path, e));
    }

    debug!(file = ?path, count = records.len(), "Wrote records to TSV");
    Ok(())
}

/// Take an advisory exclusive lock guarding the store file
///
/// The lock lives on a sibling `<file>.lock`, since `write_records` replaces
/// the store file itself. Released when the returned handle is dropped.
pub fn lock_exclusive(path: &Path) -> Result<File> {
    let guard = lock_path(path);
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&guard)
        .map_err(|e| StoreError::io(&guard, e))?;
    file.lock_exclusive().map_err(|e| StoreError::io(&guard, e))?;
    Ok(file)
}

pub fn lock_path(path: &Path) -> PathBuf {
    sibling(path, ".lock")
}

fn temp_path(path: &Path) -> PathBuf {
    sibling(path, ".tmp")
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
