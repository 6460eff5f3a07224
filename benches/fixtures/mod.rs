// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic benchmark workflows (no RNG in the graph shape).

use tourflow::model::{
    Connection, ConnectionId, ConnectionType, LegacyBranch, Point, Step, StepId, StepKind,
};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// A typical hand-authored workflow.
    Small,
    /// A large imported tour script.
    Medium,
    /// Stress size; well beyond anything users draw by hand.
    Large,
}

impl Case {
    pub fn steps(self) -> usize {
        match self {
            Self::Small => 12,
            Self::Medium => 150,
            Self::Large => 1500,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

pub fn step_id(idx: usize) -> StepId {
    StepId::new(format!("bench_step_{idx:05}")).expect("step id")
}

/// Every third step keeps legacy YES/NO links, the rest use connection lists. Every fifth step
/// carries a stored position; the others fall back to the grid.
pub fn workflow(case: Case) -> Vec<Step> {
    let count = case.steps();
    let kinds = StepKind::ALL;
    let mut steps = Vec::with_capacity(count);

    for idx in 0..count {
        let order = i64::try_from(count - idx).expect("order");
        let mut step = Step::new_with(step_id(idx), order, kinds[idx % kinds.len()]);
        step.details_mut().name = format!("Bench step {idx}");
        if idx % 5 == 0 {
            step.set_position(Some(Point::new((idx % 40) as f64 * 30.0, (idx / 40) as f64 * 90.0)));
        }

        if idx % 3 == 0 {
            step.set_legacy_target(LegacyBranch::Success, Some(step_id((idx + 1) % count)));
            step.set_legacy_target(LegacyBranch::Failure, Some(step_id((idx + 2) % count)));
        } else {
            for (offset, kind) in [(1, ConnectionType::Default), (7, ConnectionType::Conditional)] {
                let connection_id =
                    ConnectionId::new(format!("bench_conn_{idx:05}_{offset}")).expect("connection id");
                step.connections_mut().push(Connection::new(
                    connection_id,
                    step_id((idx + offset) % count),
                    format!("to +{offset}"),
                    kind,
                ));
            }
        }
        steps.push(step);
    }

    steps
}
