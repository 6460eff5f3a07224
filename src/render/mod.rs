// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Renderable geometry for the editor canvas.
//!
//! Nothing here draws. The output is a scene description (node boxes, edges, style data) that
//! any front end can paint.

pub mod edges;
pub mod style;

pub use edges::{derive_edges, DerivedEdge};
pub use style::{edge_style, node_style, EdgeStyle, NodeStyle, Stroke};

use crate::config::GridConfig;
use crate::layout::resolve_positions;
use crate::model::{Point, Size, Step, StepId, StepShape};

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub step_id: StepId,
    pub position: Point,
    pub size: Size,
    pub shape: StepShape,
    pub label: String,
    pub style: NodeStyle,
}

/// Everything a front end needs to paint one frame of the graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<DerivedEdge>,
}

pub fn build_scene(steps: &[Step], grid: &GridConfig, node_size: Size) -> Scene {
    let layout = resolve_positions(steps, grid);
    let nodes = crate::layout::sorted_steps(steps)
        .into_iter()
        .filter_map(|step| {
            let position = layout.position(step.step_id())?;
            Some(SceneNode {
                step_id: step.step_id().clone(),
                position,
                size: node_size,
                shape: step.shape(),
                label: step.details().name.clone(),
                style: node_style(step),
            })
        })
        .collect();
    let edges = derive_edges(steps, &layout);
    Scene { nodes, edges }
}
