// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zoom, canvas size and shared node size.
//!
//! Viewport state is saved with the graph but never enters undo/redo history.

use crate::config::{Extent, ViewportLimits};
use crate::model::{Point, Size};

pub const DEFAULT_BACKGROUND_SIZE: Size = Size::new(1200.0, 800.0);
pub const DEFAULT_NODE_SIZE: Size = Size::new(140.0, 60.0);

/// The persisted part of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSettings {
    pub zoom: f64,
    pub background_size: Size,
    pub node_size: Size,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self { zoom: 1.0, background_size: DEFAULT_BACKGROUND_SIZE, node_size: DEFAULT_NODE_SIZE }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    background_size: Size,
    node_size: Size,
    limits: ViewportLimits,
}

fn clamp_extent(size: Size, min: Extent, max: Extent) -> Size {
    Size::new(size.width.clamp(min.width, max.width), size.height.clamp(min.height, max.height))
}

// Keeps repeated ±step arithmetic from drifting (1.0 + 0.1 + 0.1 ...).
fn snap(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Viewport {
    pub fn new(limits: ViewportLimits) -> Self {
        Self::with_settings(ViewportSettings::default(), limits)
    }

    /// Resumes saved settings, clamping anything outside `limits`.
    pub fn with_settings(settings: ViewportSettings, limits: ViewportLimits) -> Self {
        let mut viewport = Self {
            zoom: 1.0,
            background_size: DEFAULT_BACKGROUND_SIZE,
            node_size: DEFAULT_NODE_SIZE,
            limits,
        };
        viewport.set_zoom(settings.zoom);
        viewport.resize_background(settings.background_size);
        viewport.set_node_size(settings.node_size);
        viewport
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn background_size(&self) -> Size {
        self.background_size
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    pub fn settings(&self) -> ViewportSettings {
        ViewportSettings {
            zoom: self.zoom,
            background_size: self.background_size,
            node_size: self.node_size,
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        let zoom = if zoom.is_finite() { zoom } else { 1.0 };
        self.zoom = zoom.clamp(self.limits.zoom_min, self.limits.zoom_max);
        self.zoom
    }

    /// Steps the zoom up, landing on one decimal.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(snap(self.zoom + self.limits.zoom_step))
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(snap(self.zoom - self.limits.zoom_step))
    }

    pub fn zoom_reset(&mut self) -> f64 {
        self.set_zoom(1.0)
    }

    pub fn resize_background(&mut self, size: Size) -> Size {
        self.background_size =
            clamp_extent(size, self.limits.background_min, self.limits.background_max);
        self.background_size
    }

    pub fn set_node_size(&mut self, size: Size) -> Size {
        self.node_size = clamp_extent(size, self.limits.node_min, self.limits.node_max);
        self.node_size
    }

    /// Maps a point relative to the (scaled) canvas element into canvas coordinates.
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(screen.x / self.zoom, screen.y / self.zoom)
    }
}
