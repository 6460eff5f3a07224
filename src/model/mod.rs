// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: steps, their connections, and the graph that owns them.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod integrity;
pub mod step;

pub use graph::{Graph, GraphError, GraphSnapshot, StepPatch};
pub use ids::{ConnectionId, Id, IdError, StepId, WorkflowId};
pub use integrity::{check_integrity, IntegrityIssue};
pub use step::{
    Connection, ConnectionType, LegacyBranch, Point, Priority, Size, Step, StepDetails, StepKind,
    StepLink, StepShape, UnknownVariant,
};
