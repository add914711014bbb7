//! Memory entries, subject counts and the selectors used to address them.

use crate::error::{MnemoError, MnemoResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// One immutable remembered fact about a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// Exact-match key the entry is grouped under.
    pub subject: String,
    /// Free-form content.
    pub text: String,
}

impl MemoryEntry {
    /// Create an entry with an explicit timestamp.
    pub fn at(subject: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            subject: subject.into(),
            text: text.into(),
        }
    }
}

/// A distinct subject and the number of live entries under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCount {
    /// The subject key.
    pub subject: String,
    /// How many entries currently reference it.
    pub count: usize,
}

/// Which entries a forget operation removes.
///
/// Positions count from the oldest entry, starting at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selector {
    /// The oldest remaining entry.
    #[default]
    Oldest,
    /// The n-th oldest entry.
    Nth(NonZeroUsize),
    /// Every entry for the subject.
    All,
}

impl Selector {
    /// Literal that selects every entry.
    pub const ALL_LITERAL: &'static str = "all";

    /// Parse an optional caller token into a selector.
    ///
    /// An absent token means the oldest entry. Anything other than `all` or a
    /// positive integer is rejected.
    pub fn parse(token: Option<&str>) -> MnemoResult<Self> {
        let Some(token) = token else {
            return Ok(Self::Oldest);
        };
        if token == Self::ALL_LITERAL {
            return Ok(Self::All);
        }
        let n = parse_index(token)?;
        usize::try_from(n)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self::Nth)
            .ok_or_else(|| {
                MnemoError::InvalidSelector(format!("position must be at least 1, got {n}"))
            })
    }

    /// The 1-based position from the oldest entry, or `None` for [`Selector::All`].
    pub fn ordinal(&self) -> Option<usize> {
        match self {
            Self::Oldest => Some(1),
            Self::Nth(n) => Some(n.get()),
            Self::All => None,
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oldest => write!(f, "oldest"),
            Self::Nth(n) => write!(f, "{n}"),
            Self::All => write!(f, "{}", Self::ALL_LITERAL),
        }
    }
}

/// Parse a numeric index token. Range checks are left to the caller.
pub fn parse_index(token: &str) -> MnemoResult<i64> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|_| MnemoError::InvalidSelector(format!("'{token}' is not a number")))
}
