//! # Hostrank Core
//!
//! Turns scan results into a numeric matrix for anomaly scoring.
//!
//! * **[`ingest`]**: Adapters that read scan inputs into [`Host`](hostrank_common::models::Host) lists.
//! * **[`features`]**: The feature abstraction and the built-in feature catalog.
//! * **[`report`]**: Hosts plus registered features, and matrix assembly.
//! * **[`matrix`]**: The dense host-by-feature matrix.
//! * **[`scoring`]**: The boundary with an external anomaly model, and ranking.
//! * **[`error`]**: Error types for all of the above.

pub mod error;
pub mod features;
pub mod ingest;
pub mod matrix;
pub mod report;
pub mod scoring;
