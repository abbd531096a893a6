//! # Hostrank Common
//!
//! Types shared by every crate in the workspace.
//!
//! * **[`models`]**: The scan entities (`Host`, `Port`, `OsInfo`). Pure data, no IO.
//! * **[`config`]**: Run settings handed from the command line to the core.

pub mod config;
pub mod models;
