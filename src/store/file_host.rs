// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! An [`EditorHost`] that writes each saved payload to a JSON file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::records::SavePayloadRecord;
use crate::editor::{EditorHost, SaveError, SavePayload};

const TRACING_TARGET: &str = "tourflow::store::file_host";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames it into place, without syncing.
    #[default]
    BestEffort,

    /// Also syncs the file contents and, where the platform allows it, the parent directory.
    Durable,
}

#[derive(Debug, Clone)]
pub struct JsonFileHost {
    path: PathBuf,
    durability: WriteDurability,
    saves: usize,
    closed: bool,
}

impl JsonFileHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), durability: WriteDurability::default(), saves: 0, closed: false }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl EditorHost for JsonFileHost {
    fn on_save(&mut self, payload: SavePayload) -> Result<(), SaveError> {
        let record = SavePayloadRecord::from(&payload);
        let mut contents =
            serde_json::to_vec_pretty(&record).map_err(|err| SaveError::Rejected(err.to_string()))?;
        contents.push(b'\n');

        write_atomic(&self.path, &contents, self.durability)
            .map_err(|err| SaveError::Unavailable(format!("{}: {err}", self.path.display())))?;
        self.saves += 1;
        tracing::debug!(
            target: TRACING_TARGET,
            path = %self.path.display(),
            bytes = contents.len(),
            "payload written"
        );
        Ok(())
    }

    fn on_close(&mut self) {
        self.closed = true;
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(io::Error::other("path has no file name"));
    };
    if fs::symlink_metadata(path).is_ok_and(|md| md.file_type().is_symlink()) {
        return Err(io::Error::other("refusing to replace a symlink"));
    }

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path = parent.join(format!(".tourflow.tmp.{}.{nanos}", file_name.to_string_lossy()));

    let written = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .and_then(|mut file| {
            file.write_all(contents)?;
            if durability == WriteDurability::Durable {
                file.sync_all()?;
            }
            Ok(())
        })
        .and_then(|()| rename_overwrite(&tmp_path, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    if durability == WriteDurability::Durable {
        // Directory handles cannot be synced on every platform.
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::{fixture, rstest};

    use super::{JsonFileHost, WriteDurability};
    use crate::config::EditorConfig;
    use crate::editor::{Editor, EditorInit, EditorMode, SaveError};
    use crate::model::fixtures::three_steps;
    use crate::model::WorkflowId;
    use crate::store::{read_json, SavePayloadRecord};

    static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        path: std::path::PathBuf,
    }

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
            let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = env::temp_dir();
            path.push(format!("tourflow-{prefix}-{}-{nanos}-{counter}", std::process::id()));
            std::fs::create_dir_all(&path).unwrap();
            Self { path }
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    #[fixture]
    fn tmp() -> TempDir {
        TempDir::new("file-host")
    }

    fn editor() -> Editor {
        let init = EditorInit {
            steps: three_steps().steps().to_vec(),
            workflow_name: "Transfer".to_owned(),
            workflow_id: WorkflowId::new("wf-9").unwrap(),
            mode: EditorMode::Edit,
            initial_settings: None,
        };
        Editor::with_rng(init, EditorConfig::default(), StdRng::seed_from_u64(9)).unwrap()
    }

    #[rstest]
    #[case::best_effort(WriteDurability::BestEffort)]
    #[case::durable(WriteDurability::Durable)]
    fn save_writes_payload_json(tmp: TempDir, #[case] durability: WriteDurability) {
        let path = tmp.path.join("workflow.json");
        let mut host = JsonFileHost::new(&path).with_durability(durability);
        let mut editor = editor();

        editor.save(&mut host).unwrap();
        editor.viewport_mut().zoom_out();
        editor.save(&mut host).unwrap();

        assert_eq!(host.saves(), 2);
        let record: SavePayloadRecord = read_json(&path).unwrap();
        assert_eq!(record.workflow_id, "wf-9");
        assert_eq!(record.steps.len(), 3);
        assert!((record.zoom - 0.9).abs() < 1e-9);

        let leftovers: Vec<_> = std::fs::read_dir(&tmp.path)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tourflow.tmp."))
            .collect();
        assert!(leftovers.is_empty());

        editor.close(&mut host);
        assert!(host.is_closed());
    }

    #[rstest]
    fn missing_directory_surfaces_a_retryable_error(tmp: TempDir) {
        let path = tmp.path.join("missing/workflow.json");
        let mut host = JsonFileHost::new(&path);
        let mut editor = editor();

        let err = editor.save(&mut host).unwrap_err();

        assert!(matches!(err, SaveError::Unavailable(_)));
        assert_eq!(host.saves(), 0);
        assert!(editor.notice().is_some());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        editor.save(&mut host).unwrap();
        assert_eq!(host.saves(), 1);
    }
}
