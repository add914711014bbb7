//! Storage and query core for mnemo.
//!
//! - **Record store** (SQLite): an ordered, subject-indexed log of timestamped entries
//! - **Memory service**: remember / lookup / remembered / forget on top of the store
//!
//! Callers construct a [`RecordStore`], hand it to [`MemoryService`], and keep
//! the service for the lifetime of the process.

pub mod schema;
pub mod service;
pub mod store;

pub use service::MemoryService;
pub use store::RecordStore;
