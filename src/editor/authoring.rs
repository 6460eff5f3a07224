// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Connection authoring from a two-step selection, and inline label editing.

use super::{Editor, Notice, TRACING_TARGET};
use crate::model::{ConnectionId, ConnectionType, GraphError, LegacyBranch, StepId};
use crate::render::derive_edges;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthoringAction {
    /// Quick action: `first.legacy_success_target = second` (rendered as "YES").
    Success,
    /// Quick action: `first.legacy_failure_target = second` (rendered as "NO").
    Failure,
    /// Appends a multi-edge connection `first -> second`.
    Connect { label: String, kind: ConnectionType, condition: Option<String> },
}

/// A rejected user action. Shown to the user; never mutates anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Select exactly two steps to connect them ({selected} selected)")]
    ConnectNeedsTwo { selected: usize },
    #[error("Select at least one step to delete")]
    NothingToDelete,
    #[error("The label of edge {edge_id} cannot be edited")]
    LabelNotEditable { edge_id: String },
    #[error("Step {0} no longer exists")]
    MissingStep(StepId),
    #[error("This workflow is read-only in the current mode")]
    ReadOnly,
}

/// Inline label editor state. At most one label is edited at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelEdit {
    #[default]
    NotEditing,
    EditingLabel { connection_id: ConnectionId, draft: String },
}

impl LabelEdit {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::EditingLabel { .. })
    }

    pub fn connection_id(&self) -> Option<&ConnectionId> {
        match self {
            Self::EditingLabel { connection_id, .. } => Some(connection_id),
            Self::NotEditing => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::EditingLabel { draft, .. } => Some(draft),
            Self::NotEditing => None,
        }
    }

    /// Opens an edit, returning the connection whose edit got cancelled by it.
    pub fn begin(&mut self, connection_id: ConnectionId, initial: &str) -> Option<ConnectionId> {
        let previous = std::mem::replace(
            self,
            Self::EditingLabel { connection_id, draft: initial.to_owned() },
        );
        match previous {
            Self::EditingLabel { connection_id, .. } => Some(connection_id),
            Self::NotEditing => None,
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match self {
            Self::EditingLabel { draft, .. } => {
                *draft = text.into();
                true
            }
            Self::NotEditing => false,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        if let Self::EditingLabel { draft, .. } = self {
            draft.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Self::EditingLabel { draft, .. } = self {
            draft.pop();
        }
    }

    pub fn cancel(&mut self) -> bool {
        std::mem::take(self).is_editing()
    }

    fn take(&mut self) -> Option<(ConnectionId, String)> {
        match std::mem::take(self) {
            Self::EditingLabel { connection_id, draft } => Some((connection_id, draft)),
            Self::NotEditing => None,
        }
    }
}

impl Editor {
    pub(super) fn reject(&mut self, err: ValidationError) -> ValidationError {
        self.notice = Some(Notice::warning(err.to_string()));
        err
    }

    /// Turns the two selected steps into an edge from the first to the second.
    ///
    /// Clears the selection and records a history entry on success.
    pub fn author_connection(&mut self, action: AuthoringAction) -> Result<(), ValidationError> {
        if !self.mode.is_editable() {
            return Err(self.reject(ValidationError::ReadOnly));
        }
        let selection = self.interaction.selection.as_slice();
        let (from, to) = match selection {
            [from, to] => (from.clone(), to.clone()),
            _ => {
                let selected = selection.len();
                return Err(self.reject(ValidationError::ConnectNeedsTwo { selected }));
            }
        };

        self.flush_pending_checkpoint();
        let applied = match action {
            AuthoringAction::Success => {
                self.graph.set_legacy_target(&from, LegacyBranch::Success, Some(to.clone()))
            }
            AuthoringAction::Failure => {
                self.graph.set_legacy_target(&from, LegacyBranch::Failure, Some(to.clone()))
            }
            AuthoringAction::Connect { label, kind, condition } => {
                let connection_id = self.graph.fresh_connection_id(&mut self.rng);
                self.graph.add_connection(connection_id, &from, &to, label, kind, condition)
            }
        }
        .map(|_| ());
        if let Err(GraphError::StepNotFound(step_id)) = applied {
            self.interaction.selection.retain_existing(&self.graph);
            return Err(self.reject(ValidationError::MissingStep(step_id)));
        }

        tracing::debug!(target: TRACING_TARGET, from = %from, to = %to, "authored connection");
        self.interaction.selection.clear();
        self.commit_checkpoint();
        Ok(())
    }

    /// Opens the inline editor for a derived edge's label.
    ///
    /// Only multi-edge connections carry editable labels; legacy YES/NO edges are rejected.
    pub fn begin_label_edit(&mut self, edge_id: &str) -> Result<(), ValidationError> {
        if !self.mode.is_editable() {
            return Err(self.reject(ValidationError::ReadOnly));
        }
        // Legacy ids share the connection id namespace, so resolve against what is drawn.
        let found = derive_edges(self.graph.steps(), &self.layout())
            .into_iter()
            .find(|edge| edge.edge_id == edge_id)
            .and_then(|edge| edge.connection_id.map(|connection_id| (connection_id, edge.label)));
        let Some((connection_id, label)) = found else {
            return Err(self.reject(ValidationError::LabelNotEditable { edge_id: edge_id.to_owned() }));
        };

        if let Some(cancelled) = self.label_edit.begin(connection_id, &label) {
            tracing::trace!(target: TRACING_TARGET, connection_id = %cancelled, "label edit replaced");
        }
        Ok(())
    }

    pub fn set_label_draft(&mut self, text: impl Into<String>) -> bool {
        self.label_edit.set_draft(text)
    }

    /// Applies the draft label. Returns whether the graph changed.
    pub fn commit_label_edit(&mut self) -> Result<bool, GraphError> {
        let Some((connection_id, draft)) = self.label_edit.take() else {
            return Ok(false);
        };
        let unchanged = self
            .graph
            .connection(&connection_id)
            .is_some_and(|(_, connection)| connection.label() == draft);
        if unchanged {
            return Ok(false);
        }

        self.flush_pending_checkpoint();
        self.graph.update_connection_label(&connection_id, draft)?;
        self.commit_checkpoint();
        Ok(true)
    }

    pub fn cancel_label_edit(&mut self) -> bool {
        self.label_edit.cancel()
    }
}
