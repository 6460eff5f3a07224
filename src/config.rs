// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor tuning knobs.
//!
//! Every field has a default matching the stock editor, so a config file only needs the keys
//! it wants to override.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of snapshots kept for undo/redo.
    pub history_capacity: usize,
    /// Quiet period after a drag before its final position becomes a history entry.
    pub checkpoint_debounce_ms: u64,
    pub grid: GridConfig,
    pub limits: ViewportLimits,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            checkpoint_debounce_ms: 100,
            grid: GridConfig::default(),
            limits: ViewportLimits::default(),
        }
    }
}

impl EditorConfig {
    pub fn checkpoint_debounce(&self) -> Duration {
        Duration::from_millis(self.checkpoint_debounce_ms)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be at least 1"));
        }
        if self.grid.columns == 0 {
            return Err(ConfigError::Invalid("grid.columns must be at least 1"));
        }
        let limits = &self.limits;
        if limits.zoom_min <= 0.0 || limits.zoom_min > limits.zoom_max {
            return Err(ConfigError::Invalid("zoom bounds must satisfy 0 < zoom_min <= zoom_max"));
        }
        if limits.background_min.width > limits.background_max.width
            || limits.background_min.height > limits.background_max.height
        {
            return Err(ConfigError::Invalid("background_min must not exceed background_max"));
        }
        if limits.node_min.width > limits.node_max.width
            || limits.node_min.height > limits.node_max.height
        {
            return Err(ConfigError::Invalid("node_min must not exceed node_max"));
        }
        Ok(())
    }
}

/// Fallback placement for steps without a stored position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub column_spacing: f64,
    pub row_spacing: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { columns: 3, column_spacing: 200.0, row_spacing: 150.0, origin_x: 150.0, origin_y: 100.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportLimits {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    pub background_min: Extent,
    pub background_max: Extent,
    pub node_min: Extent,
    pub node_max: Extent,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            zoom_min: 0.1,
            zoom_max: 3.0,
            zoom_step: 0.1,
            background_min: Extent { width: 400.0, height: 300.0 },
            background_max: Extent { width: 2000.0, height: 1500.0 },
            node_min: Extent { width: 80.0, height: 40.0 },
            node_max: Extent { width: 200.0, height: 120.0 },
        }
    }
}
