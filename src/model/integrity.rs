// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::fmt;

use super::ids::{ConnectionId, StepId};
use super::step::{LegacyBranch, Step};

/// A referential problem found by [`check_integrity`].
///
/// The editor itself tolerates all of these while rendering; the check exists for callers that
/// want to refuse (or warn about) a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    DuplicateStepId { step_id: StepId },
    DuplicateConnectionId { step_id: StepId, connection_id: ConnectionId },
    DanglingConnection { step_id: StepId, connection_id: ConnectionId, target: StepId },
    DanglingLegacyTarget { step_id: StepId, branch: LegacyBranch, target: StepId },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateStepId { step_id } => write!(f, "duplicate step id {step_id}"),
            Self::DuplicateConnectionId { step_id, connection_id } => {
                write!(f, "step {step_id} has duplicate connection id {connection_id}")
            }
            Self::DanglingConnection { step_id, connection_id, target } => write!(
                f,
                "connection {connection_id} on step {step_id} targets missing step {target}"
            ),
            Self::DanglingLegacyTarget { step_id, branch, target } => write!(
                f,
                "{} branch of step {step_id} targets missing step {target}",
                branch.suffix()
            ),
        }
    }
}

pub fn check_integrity(steps: &[Step]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    let mut step_ids = HashSet::with_capacity(steps.len());
    for step in steps {
        if !step_ids.insert(step.step_id()) {
            issues.push(IntegrityIssue::DuplicateStepId { step_id: step.step_id().clone() });
        }
    }

    for step in steps {
        let mut connection_ids = HashSet::new();
        for connection in step.connections() {
            if !connection_ids.insert(connection.connection_id()) {
                issues.push(IntegrityIssue::DuplicateConnectionId {
                    step_id: step.step_id().clone(),
                    connection_id: connection.connection_id().clone(),
                });
            }
            if !step_ids.contains(connection.target()) {
                issues.push(IntegrityIssue::DanglingConnection {
                    step_id: step.step_id().clone(),
                    connection_id: connection.connection_id().clone(),
                    target: connection.target().clone(),
                });
            }
        }

        for branch in [LegacyBranch::Success, LegacyBranch::Failure] {
            if let Some(target) = step.legacy_target(branch) {
                if !step_ids.contains(target) {
                    issues.push(IntegrityIssue::DanglingLegacyTarget {
                        step_id: step.step_id().clone(),
                        branch,
                        target: target.clone(),
                    });
                }
            }
        }
    }

    issues
}
