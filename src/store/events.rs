// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scripted editor input, replayed against an [`Editor`] with a synthetic clock.

use std::time::{Duration, Instant};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::records::{PointRecord, SizeRecord};
use super::RecordError;
use crate::editor::{AuthoringAction, Editor, EditorEvent, Key, Notice, PointerTarget};
use crate::model::{ConnectionType, Point, StepId, StepKind};

const TRACING_TARGET: &str = "tourflow::store::events";

fn default_kind() -> String {
    StepKind::default().as_str().to_owned()
}

fn default_connection_type() -> String {
    ConnectionType::Default.as_str().to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TargetRecord {
    Step { id: String },
    EdgeLabel { id: String },
    Background,
    ResizeHandle,
}

impl TryFrom<TargetRecord> for PointerTarget {
    type Error = RecordError;

    fn try_from(record: TargetRecord) -> Result<Self, Self::Error> {
        Ok(match record {
            TargetRecord::Step { id } => {
                let step_id = StepId::new(&id)
                    .map_err(|source| RecordError::InvalidId { field: "target step id", value: id, source })?;
                PointerTarget::Step(step_id)
            }
            TargetRecord::EdgeLabel { id } => PointerTarget::EdgeLabel(id),
            TargetRecord::Background => PointerTarget::Background,
            TargetRecord::ResizeHandle => PointerTarget::ResizeHandle,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum KeyRecord {
    Delete,
    Escape,
    Enter,
    Backspace,
    Undo,
    Redo,
}

impl From<KeyRecord> for Key {
    fn from(record: KeyRecord) -> Self {
        match record {
            KeyRecord::Delete => Key::Delete,
            KeyRecord::Escape => Key::Escape,
            KeyRecord::Enter => Key::Enter,
            KeyRecord::Backspace => Key::Backspace,
            KeyRecord::Undo => Key::Undo,
            KeyRecord::Redo => Key::Redo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuthoringRecord {
    Success,
    Failure,
    Connect {
        #[serde(default)]
        label: String,
        #[serde(rename = "type", default = "default_connection_type")]
        connection_type: String,
        #[serde(default)]
        condition: Option<String>,
    },
}

impl TryFrom<AuthoringRecord> for AuthoringAction {
    type Error = RecordError;

    fn try_from(record: AuthoringRecord) -> Result<Self, Self::Error> {
        Ok(match record {
            AuthoringRecord::Success => AuthoringAction::Success,
            AuthoringRecord::Failure => AuthoringAction::Failure,
            AuthoringRecord::Connect { label, connection_type, condition } => {
                AuthoringAction::Connect { label, kind: connection_type.parse()?, condition }
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ZoomRecord {
    In,
    Out,
    Reset,
}

/// One scripted input. Pointer coordinates are relative to the scaled canvas element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventRecord {
    PointerDown { target: TargetRecord, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    DoubleClick { target: TargetRecord },
    Key { key: KeyRecord },
    /// Types each character into the open label editor.
    TypeText { text: String },
    /// Lets due debounced checkpoints fire without other input.
    Tick,
    AddStep {
        #[serde(default = "default_kind")]
        kind: String,
    },
    Author { action: AuthoringRecord },
    Zoom { zoom: ZoomRecord },
    ResizeBackground { size: SizeRecord },
    SetNodeSize { size: SizeRecord },
    MovePanel { position: PointRecord },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimedEventRecord {
    /// Milliseconds since the start of the replay.
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: EventRecord,
}

/// Feeds `events` to `editor`, returning every notice raised along the way.
///
/// Due checkpoints fire before each event, in timestamp order. Validation failures are not
/// errors here; they show up as notices, just as they would for an interactive user.
pub fn replay(
    editor: &mut Editor,
    events: Vec<TimedEventRecord>,
    origin: Instant,
) -> Result<Vec<Notice>, RecordError> {
    let mut notices = Vec::new();
    let total = events.len();

    for TimedEventRecord { at_ms, event } in events {
        let now = origin + Duration::from_millis(at_ms);
        editor.tick(now);
        apply(editor, event, now)?;
        if let Some(notice) = editor.take_notice() {
            tracing::debug!(target: TRACING_TARGET, at_ms, message = %notice.message, "notice");
            notices.push(notice);
        }
    }

    tracing::debug!(target: TRACING_TARGET, events = total, notices = notices.len(), "replay finished");
    Ok(notices)
}

fn apply(editor: &mut Editor, event: EventRecord, now: Instant) -> Result<(), RecordError> {
    match event {
        EventRecord::PointerDown { target, x, y } => {
            let target = PointerTarget::try_from(target)?;
            editor.handle(EditorEvent::PointerDown { target, at: Point::new(x, y) }, now);
        }
        EventRecord::PointerMove { x, y } => {
            editor.handle(EditorEvent::PointerMove { at: Point::new(x, y) }, now);
        }
        EventRecord::PointerUp { x, y } => {
            editor.handle(EditorEvent::PointerUp { at: Point::new(x, y) }, now);
        }
        EventRecord::DoubleClick { target } => {
            let target = PointerTarget::try_from(target)?;
            editor.handle(EditorEvent::DoubleClick { target }, now);
        }
        EventRecord::Key { key } => {
            editor.handle(EditorEvent::Key(key.into()), now);
        }
        EventRecord::TypeText { text } => {
            for ch in text.chars() {
                editor.handle(EditorEvent::Key(Key::Char(ch)), now);
            }
        }
        EventRecord::Tick => {}
        EventRecord::AddStep { kind } => {
            editor.add_step(kind.parse()?);
        }
        EventRecord::Author { action } => {
            if let Err(err) = editor.author_connection(action.try_into()?) {
                tracing::trace!(target: TRACING_TARGET, error = %err, "authoring rejected");
            }
        }
        EventRecord::Zoom { zoom } => {
            let viewport = editor.viewport_mut();
            match zoom {
                ZoomRecord::In => viewport.zoom_in(),
                ZoomRecord::Out => viewport.zoom_out(),
                ZoomRecord::Reset => viewport.zoom_reset(),
            };
        }
        EventRecord::ResizeBackground { size } => {
            editor.viewport_mut().resize_background(size.into());
        }
        EventRecord::SetNodeSize { size } => {
            editor.viewport_mut().set_node_size(size.into());
        }
        EventRecord::MovePanel { position } => editor.move_panel(position.into()),
    }
    Ok(())
}
