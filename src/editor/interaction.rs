// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer-gesture and selection state owned by one editor instance.

use smallvec::SmallVec;

use crate::model::{Graph, Point, Size, StepId};

/// Selected step ids in the order they were selected.
///
/// Order matters: connection authoring treats the first id as the source and the second as
/// the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: SmallVec<[StepId; 4]>,
}

impl Selection {
    pub fn as_slice(&self) -> &[StepId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, step_id: &StepId) -> bool {
        self.ids.contains(step_id)
    }

    /// Adds `step_id` if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, step_id: &StepId) -> bool {
        if let Some(idx) = self.ids.iter().position(|id| id == step_id) {
            self.ids.remove(idx);
            false
        } else {
            self.ids.push(step_id.clone());
            true
        }
    }

    /// Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.ids.is_empty();
        self.ids.clear();
        had_any
    }

    /// Drops ids that no longer exist in `graph` (after delete or undo).
    pub fn retain_existing(&mut self, graph: &Graph) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| graph.contains(id));
        before != self.ids.len()
    }
}

/// The pointer gesture in progress, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pointer went down on a step. `offset` is pointer minus node position in canvas space;
    /// `moved` flips once the first pointer-move arrives. A press on an already-selected step
    /// deselects it on release, unless the press turned into a drag.
    Dragging { step_id: StepId, offset: Point, moved: bool, deselect_on_release: bool },
    /// Pointer went down on the empty canvas; released without further effect.
    BackgroundPress,
    /// Pointer went down on the canvas corner handle.
    Resizing { origin: Point, start: Size },
}

/// Coarse interaction state reported to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    NodeSelected,
    Dragging,
    BackgroundDragPending,
    Resizing,
}

/// Swallows the pointer-down that trails a double-click on a step.
///
/// Armed by the double-click; lives for exactly one pointer-down. That pointer-down is
/// swallowed only if it lands on the same step; any other target simply disarms it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClickSuppression {
    #[default]
    Inactive,
    PendingDoubleClickSuppression { step_id: StepId },
}

impl ClickSuppression {
    pub fn arm(&mut self, step_id: StepId) {
        *self = Self::PendingDoubleClickSuppression { step_id };
    }

    pub fn disarm(&mut self) {
        *self = Self::Inactive;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::PendingDoubleClickSuppression { .. })
    }

    /// Consumes the armed state; true if the pointer-down on `target` must be swallowed.
    pub fn consume(&mut self, target: &StepId) -> bool {
        match std::mem::take(self) {
            Self::PendingDoubleClickSuppression { step_id } => &step_id == target,
            Self::Inactive => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    pub(crate) selection: Selection,
    pub(crate) gesture: Gesture,
    pub(crate) suppression: ClickSuppression,
}

impl Interaction {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn suppression(&self) -> &ClickSuppression {
        &self.suppression
    }

    pub fn phase(&self) -> InteractionPhase {
        match self.gesture {
            Gesture::Dragging { .. } => InteractionPhase::Dragging,
            Gesture::BackgroundPress => InteractionPhase::BackgroundDragPending,
            Gesture::Resizing { .. } => InteractionPhase::Resizing,
            Gesture::Idle if self.selection.is_empty() => InteractionPhase::Idle,
            Gesture::Idle => InteractionPhase::NodeSelected,
        }
    }

    pub fn dragged_step(&self) -> Option<&StepId> {
        match &self.gesture {
            Gesture::Dragging { step_id, .. } => Some(step_id),
            _ => None,
        }
    }
}
