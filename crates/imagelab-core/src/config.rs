// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ImageLabError, Result};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "IMAGELAB_CONFIG";

/// Runtime settings. Processing constants (thresholds, kernel sizes) are
/// compiled in and deliberately absent here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Image loaded at startup.
    pub image_path: PathBuf,
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("shapes.jpg"),
            log_filter: "info".into(),
        }
    }
}

impl AppConfig {
    /// Load the configuration named by `IMAGELAB_CONFIG`, or the defaults when
    /// the variable is unset.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(path),
            None => {
                debug!("{CONFIG_ENV_VAR} not set; using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ImageLabError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        info!(path = %path.display(), image = %config.image_path.display(), "Configuration loaded");
        Ok(config)
    }
}
