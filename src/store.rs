// Task store backed by a single TSV file

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StoreError};
use crate::record::{TaskRecord, validate_text};
use crate::sort::SortKey;
use crate::tsv;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed, ordered collection of tasks
///
/// Every operation reads the whole file, works on the records in memory and,
/// if it changed anything, writes the whole file back once. Nothing is held
/// open between calls.
pub struct TaskStore {
    path: PathBuf,
    clock: Box<dyn Clock>,
}

/// Result of `list_tasks`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub records: Vec<TaskRecord>,
    /// The limit the caller asked for, if any
    pub requested: Option<usize>,
}

impl Listing {
    /// How many more tasks were requested than exist
    pub fn shortfall(&self) -> Option<usize> {
        match self.requested {
            Some(limit) if limit > self.records.len() => Some(limit - self.records.len()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-text outcome of `remove_tasks`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Every record with this text was removed
    Deleted { text: String, count: usize },
    NotFound { text: String },
}

impl Removal {
    pub fn text(&self) -> &str {
        match self {
            Removal::Deleted { text, .. } | Removal::NotFound { text } => text,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Removal::Deleted { .. })
    }
}

impl TaskStore {
    /// Open or create a store at the given file path
    ///
    /// Missing parent directories are created. A new or zero-length file
    /// gets the header row.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_clock(path, SystemClock)
    }

    /// Open a store that stamps new tasks using `clock`
    pub fn with_clock<P: AsRef<Path>, C: Clock + 'static>(path: P, clock: C) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let needs_header = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        if needs_header {
            info!(file = ?path, "Creating task file");
            tsv::write_records(&path, &[])?;
        }

        Ok(Self {
            path,
            clock: Box::new(clock),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add `texts` as new tasks sharing `rank` and one timestamp
    ///
    /// Ids continue from the current maximum, in the order given. Returns the
    /// number of tasks added.
    pub fn add_tasks<S: AsRef<str>>(&mut self, rank: i64, texts: &[S]) -> Result<usize> {
        Self::validate_request(texts)?;

        let _lock = tsv::lock_exclusive(&self.path)?;
        let mut records = tsv::read_records(&self.path)?;

        let created_at = self.clock.now();
        let mut max_id = records.iter().map(|r| r.id).max().unwrap_or(0);

        for text in texts {
            let text = text.as_ref();
            let id = max_id.checked_add(1).ok_or_else(|| StoreError::IdsExhausted {
                path: self.path.clone(),
                max_id,
            })?;
            debug!(id, rank, text, "add_tasks: staging record");
            records.push(TaskRecord::new(id, rank, created_at, text));
            max_id = id;
        }

        tsv::write_records(&self.path, &records)?;

        info!(file = ?self.path, count = texts.len(), "Added tasks");
        Ok(texts.len())
    }

    /// Load tasks in the order given by `sort`, keeping at most `limit`
    ///
    /// Never writes to the file. A missing file lists as empty.
    pub fn list_tasks(&self, limit: Option<usize>, sort: SortKey) -> Result<Listing> {
        let mut records = tsv::read_records(&self.path)?;
        sort.apply(&mut records);

        if let Some(limit) = limit {
            records.truncate(limit);
        }

        debug!(file = ?self.path, count = records.len(), ?limit, %sort, "Listed tasks");
        Ok(Listing {
            records,
            requested: limit,
        })
    }

    /// Remove every task whose text exactly matches one of `texts`
    ///
    /// All records sharing a matching text go in one request. Outcomes are
    /// returned in request order. The file is rewritten once, and only if
    /// something was removed.
    pub fn remove_tasks<S: AsRef<str>>(&mut self, texts: &[S]) -> Result<Vec<Removal>> {
        Self::validate_request(texts)?;

        let _lock = tsv::lock_exclusive(&self.path)?;
        let mut records = tsv::read_records(&self.path)?;
        let before = records.len();

        let mut outcomes = Vec::with_capacity(texts.len());
        for text in texts {
            let text = text.as_ref();
            let remaining = records.len();
            records.retain(|r| r.text != text);
            let count = remaining - records.len();

            if count > 0 {
                debug!(text, count, "remove_tasks: removed matching records");
                outcomes.push(Removal::Deleted {
                    text: text.to_string(),
                    count,
                });
            } else {
                debug!(text, "remove_tasks: no matching record");
                outcomes.push(Removal::NotFound { text: text.to_string() });
            }
        }

        if records.len() != before {
            tsv::write_records(&self.path, &records)?;
            info!(file = ?self.path, count = before - records.len(), "Removed tasks");
        }

        Ok(outcomes)
    }

    fn validate_request<S: AsRef<str>>(texts: &[S]) -> Result<()> {
        if texts.is_empty() {
            return Err(StoreError::Validation("no tasks given".to_string()));
        }
        for text in texts {
            validate_text(text.as_ref())?;
        }
        Ok(())
    }
}
