// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON records exchanged with the host application.
//!
//! The model stays free of serialization concerns; this module owns the wire shapes (camelCase
//! JSON, with JSON Schema export), the scripted-event format used for replays, the report the
//! CLI prints, and a file-backed [`EditorHost`](crate::editor::EditorHost).

pub mod events;
pub mod file_host;
pub mod records;
pub mod report;

pub use events::{
    replay, AuthoringRecord, EventRecord, KeyRecord, TargetRecord, TimedEventRecord, ZoomRecord,
};
pub use file_host::{JsonFileHost, WriteDurability};
pub use records::{
    ConnectionRecord, EditorInitRecord, LinkRecord, ModeRecord, PointRecord, SavePayloadRecord,
    SizeRecord, StepRecord, ViewportSettingsRecord,
};
pub use report::{EdgeRecord, HistoryRecord, NoticeRecord, PlacementRecord, ReportRecord};

use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::model::{IdError, UnknownVariant};

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {field} '{value}': {source}")]
    InvalidId {
        field: &'static str,
        value: String,
        #[source]
        source: IdError,
    },
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),
}

/// Reads one JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RecordError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| RecordError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| RecordError::Json { path: path.to_path_buf(), source })
}

/// JSON Schema of the document handed to the host on save.
pub fn payload_schema() -> schemars::Schema {
    schemars::schema_for!(SavePayloadRecord)
}

/// JSON Schema of the document the host passes to open an editor.
pub fn init_schema() -> schemars::Schema {
    schemars::schema_for!(EditorInitRecord)
}
