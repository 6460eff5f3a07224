// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::graph::Graph;
use super::ids::{ConnectionId, StepId};
use super::step::Step;

pub(crate) fn sid(value: &str) -> StepId {
    StepId::new(value).expect("step id")
}

pub(crate) fn cid(value: &str) -> ConnectionId {
    ConnectionId::new(value).expect("connection id")
}

/// `a`, `b`, `c` with orders 1..=3 and no stored positions.
pub(crate) fn three_steps() -> Graph {
    Graph::from_steps(vec![
        Step::new(sid("a"), 1),
        Step::new(sid("b"), 2),
        Step::new(sid("c"), 3),
    ])
    .expect("fixture graph")
}

/// A linear chain of `count` steps (`s000`, `s001`, ...) linked by default connections.
pub(crate) fn chain(count: usize) -> Graph {
    let mut steps = Vec::with_capacity(count);
    for idx in 0..count {
        let mut step = Step::new(sid(&format!("s{idx:03}")), idx as i64 + 1);
        if idx + 1 < count {
            step.connections_mut().push(super::step::Connection::new(
                ConnectionId::new(format!("e{idx:03}")).expect("connection id"),
                sid(&format!("s{:03}", idx + 1)),
                "next",
                super::step::ConnectionType::Default,
            ));
        }
        steps.push(step);
    }
    Graph::from_steps(steps).expect("chain graph")
}
