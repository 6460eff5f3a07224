// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::layout::{sorted_steps, ResolvedLayout};
use crate::model::{ConnectionId, ConnectionType, LegacyBranch, Point, Step, StepId};

/// One renderable edge between two resolved positions.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedEdge {
    /// The connection id, or `<step>:success` / `<step>:failure` for legacy edges.
    pub edge_id: String,
    /// Set only for multi-edge connections; legacy edges have fixed labels.
    pub connection_id: Option<ConnectionId>,
    pub source: StepId,
    pub target: StepId,
    pub from: Point,
    pub to: Point,
    pub kind: ConnectionType,
    pub label: String,
    pub condition: Option<String>,
}

impl DerivedEdge {
    pub fn is_label_editable(&self) -> bool {
        self.connection_id.is_some()
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.from.x + self.to.x) / 2.0, (self.from.y + self.to.y) / 2.0)
    }
}

/// Expands every step's outgoing links into edges, in step order.
///
/// A step with a non-empty connection list contributes only those connections; its legacy
/// success/failure fields are ignored. Edges whose target has no resolved position are dropped.
pub fn derive_edges(steps: &[Step], layout: &ResolvedLayout) -> Vec<DerivedEdge> {
    let mut edges = Vec::new();

    for step in sorted_steps(steps) {
        let Some(from) = layout.position(step.step_id()) else {
            continue;
        };

        if !step.connections().is_empty() {
            for connection in step.connections() {
                let Some(to) = layout.position(connection.target()) else {
                    continue;
                };
                edges.push(DerivedEdge {
                    edge_id: connection.connection_id().to_string(),
                    connection_id: Some(connection.connection_id().clone()),
                    source: step.step_id().clone(),
                    target: connection.target().clone(),
                    from,
                    to,
                    kind: connection.kind(),
                    label: connection.label().to_owned(),
                    condition: connection.condition().map(ToOwned::to_owned),
                });
            }
            continue;
        }

        for branch in [LegacyBranch::Success, LegacyBranch::Failure] {
            let Some(target) = step.legacy_target(branch) else {
                continue;
            };
            let Some(to) = layout.position(target) else {
                continue;
            };
            edges.push(DerivedEdge {
                edge_id: format!("{}:{}", step.step_id(), branch.suffix()),
                connection_id: None,
                source: step.step_id().clone(),
                target: target.clone(),
                from,
                to,
                kind: branch.connection_type(),
                label: branch.label().to_owned(),
                condition: None,
            });
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::derive_edges;
    use crate::config::GridConfig;
    use crate::layout::resolve_positions;
    use crate::model::fixtures::{cid, sid, three_steps};
    use crate::model::{Connection, ConnectionType, LegacyBranch, Point, Step};

    #[test]
    fn legacy_success_edge_uses_yes_label() {
        let mut graph = three_steps();
        graph
            .set_legacy_target(&sid("a"), LegacyBranch::Success, Some(sid("b")))
            .expect("legacy target");

        let layout = resolve_positions(graph.steps(), &GridConfig::default());
        let edges = derive_edges(graph.steps(), &layout);

        assert_eq!(edges.len(), 1);
        let edge = &edges[0];
        assert_eq!(edge.edge_id, "a:success");
        assert_eq!(edge.from, Point::new(150.0, 100.0));
        assert_eq!(edge.to, Point::new(350.0, 100.0));
        assert_eq!(edge.kind, ConnectionType::Success);
        assert_eq!(edge.label, "YES");
        assert!(!edge.is_label_editable());
    }

    #[test]
    fn connection_list_suppresses_legacy_fields() {
        let mut a = Step::new(sid("a"), 1);
        a.set_legacy_target(LegacyBranch::Success, Some(sid("b")));
        a.set_legacy_target(LegacyBranch::Failure, Some(sid("c")));
        a.connections_mut().push(
            Connection::new(cid("x"), sid("c"), "weekend", ConnectionType::Conditional)
                .with_condition(Some("day in (sat, sun)")),
        );
        let steps = vec![a, Step::new(sid("b"), 2), Step::new(sid("c"), 3)];

        let layout = resolve_positions(&steps, &GridConfig::default());
        let edges = derive_edges(&steps, &layout);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].edge_id, "x");
        assert_eq!(edges[0].kind, ConnectionType::Conditional);
        assert_eq!(edges[0].condition.as_deref(), Some("day in (sat, sun)"));
        assert!(edges[0].is_label_editable());
    }

    #[test]
    fn dangling_targets_are_dropped_silently() {
        let mut a = Step::new(sid("a"), 1);
        a.set_legacy_target(LegacyBranch::Failure, Some(sid("ghost")));
        let mut b = Step::new(sid("b"), 2);
        b.connections_mut().push(Connection::new(cid("y"), sid("nowhere"), "", ConnectionType::Default));
        b.connections_mut().push(Connection::new(cid("z"), sid("a"), "back", ConnectionType::Default));
        let steps = vec![a, b];

        let layout = resolve_positions(&steps, &GridConfig::default());
        let edges = derive_edges(&steps, &layout);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].edge_id, "z");
        assert_eq!(edges[0].midpoint(), Point::new(250.0, 100.0));
    }
}
