//! Plain-text rendering of service results.

use chrono::Local;
use mnemo_types::memory::{MemoryEntry, SubjectCount};

/// Timestamp layout appended to displayed memories.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `text (timestamp)`, with the timestamp in local wall time.
pub fn entry(entry: &MemoryEntry) -> String {
    format!(
        "{} ({})",
        entry.text,
        entry.timestamp.with_timezone(&Local).format(TIMESTAMP_FORMAT)
    )
}

/// `subject:count, subject:count`.
pub fn subjects(subjects: &[SubjectCount]) -> String {
    if subjects.is_empty() {
        return "Nothing remembered.".to_string();
    }
    subjects
        .iter()
        .map(|s| format!("{}:{}", s.subject, s.count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn forgot(subject: &str, removed: usize) -> String {
    let noun = if removed == 1 { "memory" } else { "memories" };
    format!("Forgot {removed} {noun} about {subject}.")
}
