// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Unified error types for labelscan.

use thiserror::Error;

/// Top-level error type for all labelscan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    // -- Per-frame detection errors (recoverable) --
    #[error("document detection failed: {0}")]
    Detection(String),

    #[error("detected shape rejected: {0}")]
    Shape(String),

    // -- Startup / environment errors (fatal) --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScanError {
    /// Whether the capture loop may substitute a fallback frame and continue.
    ///
    /// Detection and shape failures are a per-frame outcome: the next tick
    /// starts a fresh, independent attempt. Everything else aborts the loop.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Detection(_) | Self::Shape(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanError>;
