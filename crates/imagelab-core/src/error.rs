// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for imagelab.

use thiserror::Error;

/// Top-level error type for all imagelab operations.
#[derive(Debug, Error)]
pub enum ImageLabError {
    // -- Image errors --
    #[error("failed to load image {path}: {reason}")]
    ImageLoad { path: String, reason: String },

    // -- Display --
    #[error("display window failed: {0}")]
    Display(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Terminal / filesystem --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ImageLabError>;
