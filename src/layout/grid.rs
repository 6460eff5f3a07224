// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use crate::config::GridConfig;
use crate::model::{Point, Step, StepId};

/// Steps ordered by `order`; ties keep their list order.
pub fn sorted_steps(steps: &[Step]) -> Vec<&Step> {
    let mut sorted = steps.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|step| step.order());
    sorted
}

/// Grid cell for the `index`-th step in sorted order.
pub fn grid_cell(index: usize, grid: &GridConfig) -> Point {
    let columns = grid.columns.max(1);
    let column = (index % columns) as f64;
    let row = (index / columns) as f64;
    Point::new(column * grid.column_spacing + grid.origin_x, row * grid.row_spacing + grid.origin_y)
}

/// Render positions for every step, in sorted order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedLayout {
    placements: Vec<(StepId, Point)>,
    index: HashMap<StepId, usize>,
}

impl ResolvedLayout {
    pub fn position(&self, step_id: &StepId) -> Option<Point> {
        self.index.get(step_id).map(|&idx| self.placements[idx].1)
    }

    pub fn placements(&self) -> &[(StepId, Point)] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Resolves a position for every step without touching stored positions.
///
/// A step's grid cell depends only on its rank in the order-sorted list, so repeated calls on
/// unchanged steps produce identical output.
pub fn resolve_positions(steps: &[Step], grid: &GridConfig) -> ResolvedLayout {
    let sorted = sorted_steps(steps);
    let mut placements = Vec::with_capacity(sorted.len());
    let mut index = HashMap::with_capacity(sorted.len());

    for (rank, step) in sorted.into_iter().enumerate() {
        let point = step.position().unwrap_or_else(|| grid_cell(rank, grid));
        // First occurrence wins if a caller hands in duplicate ids.
        index.entry(step.step_id().clone()).or_insert(placements.len());
        placements.push((step.step_id().clone(), point));
    }

    ResolvedLayout { placements, index }
}
