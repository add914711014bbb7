//! Memory service: the user-facing verbs on top of the record store.
//!
//! Lookup counts positions from the most recent entry; forget counts from the
//! oldest. Both use 1-based positions.

use crate::store::RecordStore;
use mnemo_types::config::MnemoConfig;
use mnemo_types::error::{MnemoError, MnemoResult};
use mnemo_types::memory::{MemoryEntry, Selector, SubjectCount};
use tracing::{debug, info};

/// Stateless service over a [`RecordStore`] handle.
#[derive(Clone)]
pub struct MemoryService {
    store: RecordStore,
}

impl MemoryService {
    /// Create a service over an existing store.
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Open the store described by `config` and wrap it.
    pub fn open(config: &MnemoConfig) -> MnemoResult<Self> {
        let store = RecordStore::open(&config.db_path, Some(&config.table_name))?;
        Ok(Self::new(store))
    }

    /// Record `text` about `subject` with the current time.
    pub fn remember(&self, subject: &str, text: &str) -> MnemoResult<MemoryEntry> {
        require_subject(subject)?;
        let entry = self.store.insert(subject, text)?;
        info!(subject = %subject, "Remembered");
        Ok(entry)
    }

    /// The entry at `index` counted from the most recent (1 = newest).
    ///
    /// Without an index the most recent entry is returned.
    pub fn lookup(&self, subject: &str, index: Option<i64>) -> MnemoResult<MemoryEntry> {
        require_subject(subject)?;
        let position = match index {
            None => 1,
            Some(i) if i >= 1 => i,
            Some(i) => {
                return Err(MnemoError::InvalidSelector(format!(
                    "index must be at least 1, got {i}"
                )));
            }
        };

        let entries = self.store.entries_for(subject)?;
        let count = entries.len();
        debug!(subject = %subject, position, count, "Lookup");
        if count == 0 {
            return Err(nothing_about(subject));
        }
        usize::try_from(position - 1)
            .ok()
            .and_then(|skip| entries.into_iter().rev().nth(skip))
            .ok_or_else(|| {
                MnemoError::NotFound(format!(
                    "index {position} out of range, '{subject}' has {count} entr{}",
                    if count == 1 { "y" } else { "ies" }
                ))
            })
    }

    /// Every entry for `subject`, newest first.
    pub fn history(&self, subject: &str) -> MnemoResult<Vec<MemoryEntry>> {
        require_subject(subject)?;
        let mut entries = self.store.entries_for(subject)?;
        if entries.is_empty() {
            return Err(nothing_about(subject));
        }
        entries.reverse();
        Ok(entries)
    }

    /// Each remembered subject with its entry count. Empty when nothing is stored.
    pub fn remembered(&self) -> MnemoResult<Vec<SubjectCount>> {
        let subjects = self.store.list_subjects()?;
        debug!(subjects = subjects.len(), "Listed subjects");
        Ok(subjects)
    }

    /// Remove entries chosen by `selector`. Returns how many were removed.
    pub fn forget(&self, subject: &str, selector: Selector) -> MnemoResult<usize> {
        require_subject(subject)?;
        let removed = match selector.ordinal() {
            Some(ordinal) => {
                let count = self.store.count(subject)?;
                if count == 0 {
                    return Err(nothing_about(subject));
                }
                if ordinal > count {
                    return Err(MnemoError::NotFound(format!(
                        "position {ordinal} out of range, '{subject}' has {count} entr{}",
                        if count == 1 { "y" } else { "ies" }
                    )));
                }
                self.store.delete_entry(subject, ordinal)?;
                1
            }
            None => match self.store.delete_all(subject)? {
                0 => return Err(nothing_about(subject)),
                n => n,
            },
        };
        info!(subject = %subject, selector = %selector, removed, "Forgot");
        Ok(removed)
    }

    /// Release the underlying store.
    pub fn close(self) -> MnemoResult<()> {
        self.store.close()
    }
}

fn require_subject(subject: &str) -> MnemoResult<()> {
    if subject.is_empty() {
        return Err(MnemoError::InvalidSelector(
            "subject must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn nothing_about(subject: &str) -> MnemoError {
    MnemoError::NotFound(format!("nothing remembered about '{subject}'"))
}
