//! CLI subcommand modules.
//!
//! This module contains the implementations for all garp CLI subcommands.

pub(crate) mod build;
pub(crate) mod daily;
pub(crate) mod enrich;
pub(crate) mod history;
pub(crate) mod metrics;
pub(crate) mod summary;
