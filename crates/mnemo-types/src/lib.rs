//! Core types for the mnemo note store.
//!
//! This crate defines the data structures shared by the record store, the
//! memory service and the command-line adapter. It contains no business logic.

pub mod config;
pub mod error;
pub mod memory;
