// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The workflow-diagram editor.
//!
//! One [`Editor`] owns a graph, its undo history, the interaction state machine and the
//! viewport. Hosts feed it pointer/keyboard events through [`Editor::handle`], call
//! [`Editor::tick`] from their frame loop so debounced checkpoints can fire, and read back a
//! [`Scene`] to paint. Nothing is persisted until [`Editor::save`] hands a [`SavePayload`] to
//! the host.

pub mod authoring;
pub mod interaction;

pub use authoring::{AuthoringAction, LabelEdit, ValidationError};
pub use interaction::{ClickSuppression, Gesture, Interaction, InteractionPhase, Selection};

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EditorConfig;
use crate::history::{Debounce, History};
use crate::layout::{resolve_positions, ResolvedLayout};
use crate::model::{
    check_integrity, Graph, GraphError, GraphSnapshot, IntegrityIssue, Point, Size, Step, StepId,
    StepKind, StepPatch, WorkflowId,
};
use crate::render::{build_scene, Scene};
use crate::viewport::{Viewport, ViewportSettings};

const TRACING_TARGET: &str = "tourflow::editor";

/// How the diagram is presented. Only `Edit` runs the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Diagram,
    Manual,
    Edit,
}

impl EditorMode {
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Edit)
    }
}

/// Construction-time input from the host.
#[derive(Debug, Clone)]
pub struct EditorInit {
    pub steps: Vec<Step>,
    pub workflow_name: String,
    pub workflow_id: WorkflowId,
    pub mode: EditorMode,
    pub initial_settings: Option<ViewportSettings>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Step(StepId),
    /// The label of a derived edge, addressed by its edge id.
    EdgeLabel(String),
    Background,
    ResizeHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Escape,
    Enter,
    Backspace,
    Char(char),
    Undo,
    Redo,
}

/// Input events. Pointer positions are relative to the scaled canvas element.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    PointerDown { target: PointerTarget, at: Point },
    PointerMove { at: Point },
    PointerUp { at: Point },
    DoubleClick { target: PointerTarget },
    Key(Key),
}

/// What an event changed, so hosts can skip redundant redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub graph_changed: bool,
    pub selection_changed: bool,
    pub viewport_changed: bool,
    pub overlay_changed: bool,
}

impl Response {
    fn merge(&mut self, other: Response) {
        self.graph_changed |= other.graph_changed;
        self.selection_changed |= other.selection_changed;
        self.viewport_changed |= other.viewport_changed;
        self.overlay_changed |= other.overlay_changed;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing message (validation failure, save outcome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Everything handed to the host on save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavePayload {
    pub workflow_id: WorkflowId,
    pub steps: Vec<Step>,
    pub zoom: f64,
    pub background_size: Size,
    pub node_size: Size,
    pub panel_position: Point,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("save rejected: {0}")]
    Rejected(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// The editor's outbound collaborator.
pub trait EditorHost {
    fn on_save(&mut self, payload: SavePayload) -> Result<(), SaveError>;

    fn on_close(&mut self);
}

pub const DEFAULT_PANEL_POSITION: Point = Point::new(16.0, 16.0);

#[derive(Debug, Clone)]
pub struct Editor {
    workflow_id: WorkflowId,
    workflow_name: String,
    mode: EditorMode,
    config: EditorConfig,
    graph: Graph,
    history: History,
    checkpoint: Debounce,
    interaction: Interaction,
    label_edit: LabelEdit,
    viewport: Viewport,
    panel_position: Point,
    detail_step: Option<StepId>,
    notice: Option<Notice>,
    dirty: bool,
    rng: StdRng,
}

impl Editor {
    pub fn new(init: EditorInit, config: EditorConfig) -> Result<Self, GraphError> {
        Self::with_rng(init, config, StdRng::from_os_rng())
    }

    /// Like [`Editor::new`] with a caller-provided generator for step ids and placement.
    pub fn with_rng(init: EditorInit, config: EditorConfig, rng: StdRng) -> Result<Self, GraphError> {
        let graph = Graph::from_steps(init.steps)?;
        let history = History::new(graph.snapshot(), config.history_capacity);
        let checkpoint = Debounce::new(config.checkpoint_debounce());
        let viewport = Viewport::with_settings(
            init.initial_settings.unwrap_or_default(),
            config.limits.clone(),
        );
        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %init.workflow_id,
            steps = graph.len(),
            mode = ?init.mode,
            "editor opened"
        );

        Ok(Self {
            workflow_id: init.workflow_id,
            workflow_name: init.workflow_name,
            mode: init.mode,
            config,
            graph,
            history,
            checkpoint,
            interaction: Interaction::default(),
            label_edit: LabelEdit::default(),
            viewport,
            panel_position: DEFAULT_PANEL_POSITION,
            detail_step: None,
            notice: None,
            dirty: false,
            rng,
        })
    }

    pub fn workflow_id(&self) -> &WorkflowId {
        &self.workflow_id
    }

    pub fn workflow_name(&self) -> &str {
        &self.workflow_name
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn steps(&self) -> &[Step] {
        self.graph.steps()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn selection(&self) -> &[StepId] {
        self.interaction.selection.as_slice()
    }

    pub fn phase(&self) -> InteractionPhase {
        self.interaction.phase()
    }

    pub fn label_edit(&self) -> &LabelEdit {
        &self.label_edit
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Viewport changes are never recorded in history.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        self.dirty = true;
        &mut self.viewport
    }

    pub fn panel_position(&self) -> Point {
        self.panel_position
    }

    pub fn move_panel(&mut self, position: Point) {
        self.panel_position = position;
        self.dirty = true;
    }

    /// The step whose detail view is open, if any.
    pub fn detail_step(&self) -> Option<&StepId> {
        self.detail_step.as_ref()
    }

    pub fn close_detail(&mut self) -> bool {
        self.detail_step.take().is_some()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// True when there are changes not yet acknowledged by a successful save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn has_pending_checkpoint(&self) -> bool {
        self.checkpoint.is_pending()
    }

    pub fn layout(&self) -> ResolvedLayout {
        resolve_positions(self.graph.steps(), &self.config.grid)
    }

    pub fn scene(&self) -> Scene {
        build_scene(self.graph.steps(), &self.config.grid, self.viewport.node_size())
    }

    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        check_integrity(self.graph.steps())
    }

    /// Feeds one input event through the state machine.
    pub fn handle(&mut self, event: EditorEvent, now: Instant) -> Response {
        if !self.mode.is_editable() {
            return self.handle_read_only(event);
        }

        match event {
            EditorEvent::PointerDown { target, at } => self.pointer_down(target, at),
            EditorEvent::PointerMove { at } => self.pointer_move(at),
            EditorEvent::PointerUp { .. } => self.pointer_up(now),
            EditorEvent::DoubleClick { target } => self.double_click(target),
            EditorEvent::Key(key) => self.key(key),
        }
    }

    /// Fires a due debounced checkpoint. Returns whether a history entry was recorded.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.checkpoint.fire_if_due(now) {
            self.commit_checkpoint();
            return true;
        }
        false
    }

    /// Records any pending debounced checkpoint right away.
    pub fn flush_pending_checkpoint(&mut self) -> bool {
        if self.checkpoint.cancel() {
            self.commit_checkpoint();
            return true;
        }
        false
    }

    fn commit_checkpoint(&mut self) {
        self.history.commit(self.graph.snapshot());
        self.dirty = true;
    }

    fn set_notice(&mut self, notice: Notice) -> Response {
        self.notice = Some(notice);
        Response { overlay_changed: true, ..Response::default() }
    }

    fn handle_read_only(&mut self, event: EditorEvent) -> Response {
        match event {
            EditorEvent::PointerDown { target: PointerTarget::Step(step_id), .. } => {
                if !self.graph.contains(&step_id) {
                    return Response::default();
                }
                self.detail_step = Some(step_id);
                Response { overlay_changed: true, ..Response::default() }
            }
            EditorEvent::Key(Key::Escape) => {
                Response { overlay_changed: self.close_detail(), ..Response::default() }
            }
            _ => Response::default(),
        }
    }

    fn pointer_down(&mut self, target: PointerTarget, at: Point) -> Response {
        let mut response = Response::default();
        match target {
            PointerTarget::Step(step_id) => {
                let Some(node_position) = self.layout().position(&step_id) else {
                    self.interaction.suppression.disarm();
                    return response;
                };
                let suppressed = self.interaction.suppression.consume(&step_id);
                let already_selected = self.interaction.selection.contains(&step_id);
                if !suppressed && !already_selected {
                    self.interaction.selection.toggle(&step_id);
                    response.selection_changed = true;
                }
                let offset = self.viewport.to_canvas(at) - node_position;
                self.interaction.gesture = Gesture::Dragging {
                    step_id,
                    offset,
                    moved: false,
                    deselect_on_release: already_selected && !suppressed,
                };
            }
            PointerTarget::Background => {
                self.interaction.suppression.disarm();
                response.selection_changed = self.interaction.selection.clear();
                self.interaction.gesture = Gesture::BackgroundPress;
            }
            PointerTarget::ResizeHandle => {
                self.interaction.suppression.disarm();
                self.interaction.gesture =
                    Gesture::Resizing { origin: at, start: self.viewport.background_size() };
            }
            PointerTarget::EdgeLabel(_) => {
                self.interaction.suppression.disarm();
            }
        }
        response
    }

    fn pointer_move(&mut self, at: Point) -> Response {
        let canvas_point = self.viewport.to_canvas(at);
        match &mut self.interaction.gesture {
            Gesture::Dragging { step_id, offset, moved, .. } => {
                if self.graph.move_step(step_id, canvas_point - *offset).is_ok() {
                    *moved = true;
                    return Response { graph_changed: true, ..Response::default() };
                }
            }
            Gesture::Resizing { origin, start } => {
                let zoom = self.viewport.zoom();
                let delta = at - *origin;
                let size = Size::new(start.width + delta.x / zoom, start.height + delta.y / zoom);
                self.viewport.resize_background(size);
                self.dirty = true;
                return Response { viewport_changed: true, ..Response::default() };
            }
            Gesture::Idle | Gesture::BackgroundPress => return Response::default(),
        }

        // The dragged step vanished mid-gesture; stop tracking it.
        self.interaction.gesture = Gesture::Idle;
        Response::default()
    }

    fn pointer_up(&mut self, now: Instant) -> Response {
        match std::mem::take(&mut self.interaction.gesture) {
            Gesture::Dragging { step_id, moved: true, .. } => {
                tracing::trace!(target: TRACING_TARGET, step_id = %step_id, "drag finished");
                self.checkpoint.schedule(now);
                self.dirty = true;
                Response::default()
            }
            Gesture::Dragging { step_id, moved: false, deselect_on_release: true, .. } => {
                let deselected = !self.interaction.selection.toggle(&step_id);
                Response { selection_changed: deselected, ..Response::default() }
            }
            Gesture::Dragging { moved: false, .. }
            | Gesture::BackgroundPress
            | Gesture::Resizing { .. }
            | Gesture::Idle => Response::default(),
        }
    }

    fn double_click(&mut self, target: PointerTarget) -> Response {
        match target {
            PointerTarget::Step(step_id) => {
                if !self.graph.contains(&step_id) {
                    return Response::default();
                }
                self.interaction.suppression.arm(step_id.clone());
                self.detail_step = Some(step_id);
                Response { overlay_changed: true, ..Response::default() }
            }
            PointerTarget::EdgeLabel(edge_id) => {
                // Rejections leave a notice behind, so the overlay changes either way.
                let _ = self.begin_label_edit(&edge_id);
                Response { overlay_changed: true, ..Response::default() }
            }
            PointerTarget::Background | PointerTarget::ResizeHandle => Response::default(),
        }
    }

    fn key(&mut self, key: Key) -> Response {
        if self.label_edit.is_editing() {
            return self.label_key(key);
        }

        match key {
            Key::Delete => match self.delete_selected() {
                Ok(_) => Response {
                    graph_changed: true,
                    selection_changed: true,
                    ..Response::default()
                },
                Err(_) => Response { overlay_changed: true, ..Response::default() },
            },
            Key::Escape => {
                Response { selection_changed: self.clear_selection(), ..Response::default() }
            }
            Key::Undo => self.undo(),
            Key::Redo => self.redo(),
            Key::Enter | Key::Backspace | Key::Char(_) => Response::default(),
        }
    }

    fn label_key(&mut self, key: Key) -> Response {
        let overlay = Response { overlay_changed: true, ..Response::default() };
        match key {
            Key::Enter => {
                let mut response = overlay;
                match self.commit_label_edit() {
                    Ok(changed) => response.graph_changed = changed,
                    Err(err) => response.merge(self.set_notice(Notice::error(err.to_string()))),
                }
                response
            }
            Key::Escape => {
                self.cancel_label_edit();
                let mut response = overlay;
                response.selection_changed = self.clear_selection();
                response
            }
            Key::Backspace => {
                self.label_edit.backspace();
                overlay
            }
            Key::Char(ch) => {
                self.label_edit.push_char(ch);
                overlay
            }
            Key::Delete | Key::Undo | Key::Redo => Response::default(),
        }
    }

    pub fn clear_selection(&mut self) -> bool {
        self.interaction.selection.clear()
    }

    /// Adds a step of `kind` at a random spot on the visible canvas and records it in history.
    pub fn add_step(&mut self, kind: StepKind) -> Option<StepId> {
        if !self.mode.is_editable() {
            self.reject(ValidationError::ReadOnly);
            return None;
        }
        self.flush_pending_checkpoint();
        let steps = self.graph.add_step(
            kind,
            &mut self.rng,
            self.viewport.background_size(),
            self.viewport.node_size(),
        );
        let step_id = steps.last().map(|step| step.step_id().clone());
        self.commit_checkpoint();
        step_id
    }

    /// Removes every selected step and records the removal immediately.
    pub fn delete_selected(&mut self) -> Result<usize, ValidationError> {
        if !self.mode.is_editable() {
            return Err(self.reject(ValidationError::ReadOnly));
        }
        if self.interaction.selection.is_empty() {
            return Err(self.reject(ValidationError::NothingToDelete));
        }
        self.flush_pending_checkpoint();
        let removed = self.interaction.selection.as_slice().to_vec();
        if let Err(err) = self.graph.remove_steps(&removed) {
            tracing::warn!(target: TRACING_TARGET, error = %err, "selection referenced a missing step");
            self.interaction.selection.retain_existing(&self.graph);
            return Err(self.reject(ValidationError::NothingToDelete));
        }
        self.interaction.selection.clear();
        self.after_graph_replaced();
        self.commit_checkpoint();
        tracing::debug!(target: TRACING_TARGET, removed = removed.len(), "deleted steps");
        Ok(removed.len())
    }

    pub fn update_step(&mut self, step_id: &StepId, patch: StepPatch) -> Result<(), ValidationError> {
        if !self.mode.is_editable() {
            return Err(self.reject(ValidationError::ReadOnly));
        }
        self.flush_pending_checkpoint();
        if let Err(GraphError::StepNotFound(missing)) = self.graph.update_step(step_id, patch) {
            return Err(self.reject(ValidationError::MissingStep(missing)));
        }
        self.commit_checkpoint();
        Ok(())
    }

    pub fn undo(&mut self) -> Response {
        if !self.mode.is_editable() {
            return Response::default();
        }
        self.flush_pending_checkpoint();
        let Some(snapshot) = self.history.undo() else {
            return Response::default();
        };
        self.replace_graph(snapshot)
    }

    pub fn redo(&mut self) -> Response {
        if !self.mode.is_editable() {
            return Response::default();
        }
        self.flush_pending_checkpoint();
        let Some(snapshot) = self.history.redo() else {
            return Response::default();
        };
        self.replace_graph(snapshot)
    }

    fn replace_graph(&mut self, snapshot: GraphSnapshot) -> Response {
        self.graph.restore(snapshot);
        self.dirty = true;
        self.interaction.gesture = Gesture::Idle;
        let overlay_changed = self.cancel_label_edit();
        let selection_changed = self.after_graph_replaced();
        Response { graph_changed: true, selection_changed, viewport_changed: false, overlay_changed }
    }

    /// Drops references to steps that no longer exist. Returns whether the selection changed.
    fn after_graph_replaced(&mut self) -> bool {
        if let Some(step_id) = &self.detail_step {
            if !self.graph.contains(step_id) {
                self.detail_step = None;
            }
        }
        if let Some(step_id) = self.interaction.dragged_step() {
            if !self.graph.contains(step_id) {
                self.interaction.gesture = Gesture::Idle;
            }
        }
        self.interaction.selection.retain_existing(&self.graph)
    }

    pub fn save_payload(&self) -> SavePayload {
        SavePayload {
            workflow_id: self.workflow_id.clone(),
            steps: self.graph.steps().to_vec(),
            zoom: self.viewport.zoom(),
            background_size: self.viewport.background_size(),
            node_size: self.viewport.node_size(),
            panel_position: self.panel_position,
        }
    }

    /// Hands the current graph and viewport to the host.
    ///
    /// On failure the in-memory graph is left untouched so the user can retry.
    pub fn save<H: EditorHost + ?Sized>(&mut self, host: &mut H) -> Result<(), SaveError> {
        self.flush_pending_checkpoint();
        let payload = self.save_payload();
        let steps = payload.steps.len();
        match host.on_save(payload) {
            Ok(()) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    workflow_id = %self.workflow_id,
                    steps,
                    "workflow saved"
                );
                self.dirty = false;
                self.notice = Some(Notice::info("Workflow saved"));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    workflow_id = %self.workflow_id,
                    error = %err,
                    "workflow save failed"
                );
                self.notice = Some(Notice::error(format!(
                    "Could not save the workflow ({err}). Your changes are kept; try again."
                )));
                Err(err)
            }
        }
    }

    /// Dismisses the editor without saving.
    pub fn close<H: EditorHost + ?Sized>(self, host: &mut H) {
        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %self.workflow_id,
            unsaved = self.dirty,
            "editor closed"
        );
        host.on_close();
    }
}
