// SPDX-License-Identifier: PMPL-1.0-or-later
//
// labelscan-core — Shared types, configuration, and error definitions for the
// label scanning pipeline.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, DetectorConfig, DisplayConfig};
pub use error::{Result, ScanError};
pub use types::*;
