// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The in-memory workflow graph and its mutation entry points.
//!
//! Every mutation returns the full step list after the change. Nothing here performs I/O or
//! touches history; callers decide when a change becomes a checkpoint.

use std::collections::HashSet;

use rand::Rng;

use super::ids::{ConnectionId, StepId};
use super::step::{
    Connection, ConnectionType, LegacyBranch, Point, Size, Step, StepDetails, StepKind, StepShape,
};

const TRACING_TARGET: &str = "tourflow::model::graph";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("step not found (id={0})")]
    StepNotFound(StepId),
    #[error("connection not found (id={0})")]
    ConnectionNotFound(ConnectionId),
    #[error("duplicate step id {0}")]
    DuplicateStepId(StepId),
}

/// Partial update applied by [`Graph::update_step`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepPatch {
    pub kind: Option<StepKind>,
    pub shape: Option<StepShape>,
    pub fill_color: Option<Option<String>>,
    pub text_color: Option<Option<String>>,
    pub details: Option<StepDetails>,
}

/// A deep copy of the ordered step list at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphSnapshot {
    steps: Vec<Step>,
}

impl GraphSnapshot {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    steps: Vec<Step>,
}

impl Graph {
    pub fn from_steps(steps: Vec<Step>) -> Result<Self, GraphError> {
        let mut seen = HashSet::with_capacity(steps.len());
        for step in &steps {
            if !seen.insert(step.step_id().clone()) {
                return Err(GraphError::DuplicateStepId(step.step_id().clone()));
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, step_id: &StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.step_id() == step_id)
    }

    pub fn contains(&self, step_id: &StepId) -> bool {
        self.step(step_id).is_some()
    }

    fn step_mut(&mut self, step_id: &StepId) -> Result<&mut Step, GraphError> {
        self.steps
            .iter_mut()
            .find(|step| step.step_id() == step_id)
            .ok_or_else(|| GraphError::StepNotFound(step_id.clone()))
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot { steps: self.steps.clone() }
    }

    pub fn restore(&mut self, snapshot: GraphSnapshot) {
        self.steps = snapshot.steps;
    }

    /// Appends a new step with a fresh id and `order = len + 1`.
    ///
    /// The step lands at a random point inside `canvas` shrunk by `node_size`, so consecutive
    /// additions do not stack exactly on top of each other. The new step is always last.
    pub fn add_step<R: Rng + ?Sized>(
        &mut self,
        kind: StepKind,
        rng: &mut R,
        canvas: Size,
        node_size: Size,
    ) -> &[Step] {
        let step_id = self.fresh_step_id(rng);
        let order = i64::try_from(self.steps.len()).unwrap_or(i64::MAX - 1) + 1;
        let max_x = (canvas.width - node_size.width).max(0.0);
        let max_y = (canvas.height - node_size.height).max(0.0);
        let position = Point::new(rng.random_range(0.0..=max_x), rng.random_range(0.0..=max_y));

        let mut step = Step::new_with(step_id, order, kind);
        step.set_position(Some(position));
        tracing::debug!(target: TRACING_TARGET, step_id = %step.step_id(), order, "add step");
        self.steps.push(step);
        &self.steps
    }

    /// Removes the given steps together with their outgoing edges.
    ///
    /// Incoming references held by the remaining steps are left in place; they become
    /// dangling and are skipped when edges are derived.
    pub fn remove_steps(&mut self, step_ids: &[StepId]) -> Result<&[Step], GraphError> {
        if let Some(missing) = step_ids.iter().find(|step_id| !self.contains(step_id)) {
            return Err(GraphError::StepNotFound(missing.clone()));
        }
        self.steps.retain(|step| !step_ids.contains(step.step_id()));
        tracing::debug!(target: TRACING_TARGET, removed = step_ids.len(), "remove steps");
        Ok(&self.steps)
    }

    pub fn update_step(&mut self, step_id: &StepId, patch: StepPatch) -> Result<&[Step], GraphError> {
        let step = self.step_mut(step_id)?;
        if let Some(kind) = patch.kind {
            step.set_kind(kind);
        }
        if let Some(shape) = patch.shape {
            step.set_shape(shape);
        }
        if let Some(fill_color) = patch.fill_color {
            step.set_fill_color(fill_color);
        }
        if let Some(text_color) = patch.text_color {
            step.set_text_color(text_color);
        }
        if let Some(details) = patch.details {
            *step.details_mut() = details;
        }
        Ok(&self.steps)
    }

    pub fn move_step(&mut self, step_id: &StepId, position: Point) -> Result<&[Step], GraphError> {
        self.step_mut(step_id)?.set_position(Some(position));
        Ok(&self.steps)
    }

    /// Appends a connection to `from`'s multi-edge list. `to` may name a step that does not
    /// exist (yet); such edges are simply not rendered.
    pub fn add_connection(
        &mut self,
        connection_id: ConnectionId,
        from: &StepId,
        to: &StepId,
        label: impl Into<String>,
        kind: ConnectionType,
        condition: Option<String>,
    ) -> Result<&[Step], GraphError> {
        let connection = Connection::new(connection_id, to.clone(), label, kind).with_condition(condition);
        tracing::debug!(
            target: TRACING_TARGET,
            from = %from,
            to = %to,
            connection_id = %connection.connection_id(),
            kind = connection.kind().as_str(),
            "add connection"
        );
        self.step_mut(from)?.connections_mut().push(connection);
        Ok(&self.steps)
    }

    pub fn set_legacy_target(
        &mut self,
        from: &StepId,
        branch: LegacyBranch,
        to: Option<StepId>,
    ) -> Result<&[Step], GraphError> {
        self.step_mut(from)?.set_legacy_target(branch, to);
        Ok(&self.steps)
    }

    /// Relabels the first connection (in step order) carrying `connection_id`.
    pub fn update_connection_label(
        &mut self,
        connection_id: &ConnectionId,
        label: impl Into<String>,
    ) -> Result<&[Step], GraphError> {
        let connection = self
            .steps
            .iter_mut()
            .flat_map(|step| step.connections_mut().iter_mut())
            .find(|connection| connection.connection_id() == connection_id)
            .ok_or_else(|| GraphError::ConnectionNotFound(connection_id.clone()))?;
        connection.set_label(label);
        Ok(&self.steps)
    }

    pub fn connection(&self, connection_id: &ConnectionId) -> Option<(&Step, &Connection)> {
        self.steps.iter().find_map(|step| {
            step.connections()
                .iter()
                .find(|connection| connection.connection_id() == connection_id)
                .map(|connection| (step, connection))
        })
    }

    pub fn fresh_step_id<R: Rng + ?Sized>(&self, rng: &mut R) -> StepId {
        loop {
            let candidate = format!("step-{:016x}", rng.random::<u64>());
            if !self.steps.iter().any(|step| step.step_id().as_str() == candidate) {
                if let Ok(step_id) = StepId::new(candidate) {
                    return step_id;
                }
            }
        }
    }

    /// Generates a connection id unused by any step, keeping label edits unambiguous.
    pub fn fresh_connection_id<R: Rng + ?Sized>(&self, rng: &mut R) -> ConnectionId {
        loop {
            let candidate = format!("conn-{:016x}", rng.random::<u64>());
            if self.connection_by_str(&candidate).is_none() {
                if let Ok(connection_id) = ConnectionId::new(candidate) {
                    return connection_id;
                }
            }
        }
    }

    fn connection_by_str(&self, connection_id: &str) -> Option<&Connection> {
        self.steps
            .iter()
            .flat_map(|step| step.connections())
            .find(|connection| connection.connection_id().as_str() == connection_id)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{Graph, GraphError, StepPatch};
    use crate::model::fixtures::{cid, sid, three_steps};
    use crate::model::{ConnectionType, LegacyBranch, Point, Size, Step, StepKind, StepShape};

    #[test]
    fn from_steps_rejects_duplicate_ids() {
        let steps = vec![Step::new(sid("a"), 1), Step::new(sid("a"), 2)];
        assert_eq!(Graph::from_steps(steps), Err(GraphError::DuplicateStepId(sid("a"))));
    }

    #[test]
    fn add_step_assigns_next_order_and_position_inside_canvas() {
        let mut graph = three_steps();
        let mut rng = StdRng::seed_from_u64(7);
        let canvas = Size::new(800.0, 600.0);
        let node = Size::new(120.0, 60.0);

        let steps = graph.add_step(StepKind::Decision, &mut rng, canvas, node);

        assert_eq!(steps.len(), 4);
        let added = steps.last().expect("added step");
        assert_eq!(added.order(), 4);
        assert_eq!(added.kind(), StepKind::Decision);
        assert_eq!(added.shape(), StepShape::Diamond);
        let position = added.position().expect("random position");
        assert!((0.0..=680.0).contains(&position.x));
        assert!((0.0..=540.0).contains(&position.y));
        assert!(!["a", "b", "c"].contains(&added.step_id().as_str()));
    }

    #[test]
    fn add_step_on_a_canvas_smaller_than_a_node_places_at_origin() {
        let mut graph = Graph::default();
        let mut rng = StdRng::seed_from_u64(1);
        let steps = graph.add_step(StepKind::Start, &mut rng, Size::new(50.0, 20.0), Size::new(80.0, 40.0));
        assert_eq!(steps[0].position(), Some(Point::new(0.0, 0.0)));
        assert_eq!(steps[0].order(), 1);
    }

    #[test]
    fn remove_steps_keeps_incoming_references_on_survivors() {
        let mut graph = three_steps();
        graph
            .set_legacy_target(&sid("a"), LegacyBranch::Success, Some(sid("b")))
            .expect("legacy target");
        graph
            .add_connection(cid("b-c"), &sid("b"), &sid("c"), "next", ConnectionType::Default, None)
            .expect("connection");

        let steps = graph.remove_steps(&[sid("b")]).expect("remove");

        assert_eq!(steps.len(), 2);
        let a = &steps[0];
        assert_eq!(a.legacy_target(LegacyBranch::Success), Some(&sid("b")));
        assert!(graph.connection(&cid("b-c")).is_none());
    }

    #[test]
    fn remove_steps_rejects_unknown_ids_without_mutating() {
        let mut graph = three_steps();
        let err = graph.remove_steps(&[sid("a"), sid("zzz")]).unwrap_err();
        assert_eq!(err, GraphError::StepNotFound(sid("zzz")));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn update_step_applies_only_patched_fields() {
        let mut graph = three_steps();
        graph
            .update_step(
                &sid("a"),
                StepPatch {
                    shape: Some(StepShape::Circle),
                    fill_color: Some(Some("#ffeeaa".to_owned())),
                    ..StepPatch::default()
                },
            )
            .expect("update");

        let a = graph.step(&sid("a")).expect("step a");
        assert_eq!(a.shape(), StepShape::Circle);
        assert_eq!(a.fill_color(), Some("#ffeeaa"));
        assert_eq!(a.kind(), StepKind::Action);

        graph
            .update_step(&sid("a"), StepPatch { fill_color: Some(None), ..StepPatch::default() })
            .expect("clear color");
        assert_eq!(graph.step(&sid("a")).expect("step a").fill_color(), None);
    }

    #[test]
    fn update_connection_label_targets_first_match() {
        let mut graph = three_steps();
        graph
            .add_connection(cid("dup"), &sid("a"), &sid("b"), "one", ConnectionType::Default, None)
            .expect("first");
        graph
            .add_connection(cid("dup"), &sid("b"), &sid("c"), "two", ConnectionType::Default, None)
            .expect("second");

        graph.update_connection_label(&cid("dup"), "renamed").expect("relabel");

        assert_eq!(graph.step(&sid("a")).expect("a").connections()[0].label(), "renamed");
        assert_eq!(graph.step(&sid("b")).expect("b").connections()[0].label(), "two");
        assert_eq!(
            graph.update_connection_label(&cid("missing"), "x").unwrap_err(),
            GraphError::ConnectionNotFound(cid("missing"))
        );
    }

    #[test]
    fn snapshots_are_independent_of_the_live_graph() {
        let mut graph = three_steps();
        let snapshot = graph.snapshot();

        graph.move_step(&sid("a"), Point::new(10.0, 10.0)).expect("move");
        assert_eq!(snapshot.steps()[0].position(), None);

        graph.restore(snapshot.clone());
        assert_eq!(graph.steps(), snapshot.steps());
    }

    #[test]
    fn fresh_connection_ids_do_not_collide() {
        let mut graph = three_steps();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let connection_id = graph.fresh_connection_id(&mut rng);
            graph
                .add_connection(connection_id, &sid("a"), &sid("b"), "", ConnectionType::Default, None)
                .expect("connection");
        }
        let ids = graph.steps()[0]
            .connections()
            .iter()
            .map(|connection| connection.connection_id().clone())
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(ids.len(), 20);
    }
}
