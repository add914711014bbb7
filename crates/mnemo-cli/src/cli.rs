//! Clap CLI definitions for mnemo.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const AFTER_HELP: &str = "\
\x1b[1;36mExamples:\x1b[0m
  mnemo remember thing1 Thing1 is the first thing
  mnemo lookup thing1           Most recent memory about thing1
  mnemo lookup thing1 2         Second most recent
  mnemo remembered              Subjects with counts
  mnemo forget thing1           Forget the oldest memory
  mnemo forget thing1 all       Forget everything about thing1";

/// mnemo: remember things about things.
#[derive(Parser)]
#[command(name = "mnemo", version, about = "Augment your own memory", after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the config file).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Table name inside the database (overrides the config file).
    #[arg(long, global = true)]
    pub table: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remember something about a subject.
    Remember {
        /// Subject to file the memory under.
        subject: String,
        /// What to remember. Remaining words are joined with spaces.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Look up the most recent (or the n-th most recent) memory about a subject.
    Lookup {
        /// Subject to look up.
        subject: String,
        /// 1 = most recent.
        #[arg(allow_hyphen_values = true)]
        index: Option<String>,
        /// Show every memory, newest first.
        #[arg(long, conflicts_with = "index")]
        all: bool,
        /// Output as JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// List remembered subjects with counts.
    Remembered {
        /// Output as JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Forget the oldest, the n-th oldest, or all memories about a subject.
    Forget {
        /// Subject to forget about.
        subject: String,
        /// `all` or a position counted from the oldest (default: oldest).
        #[arg(allow_hyphen_values = true)]
        selector: Option<String>,
    },
}
