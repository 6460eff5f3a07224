// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ConnectionType, Step, StepKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dashed,
    FineDashed,
}

impl Stroke {
    /// SVG-style dash array, `None` for a continuous line.
    pub fn dash_array(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("8,4"),
            Self::FineDashed => Some("3,3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStyle {
    pub stroke: Stroke,
    pub color: &'static str,
    pub marker: &'static str,
}

const EDGE_STYLES: [(ConnectionType, EdgeStyle); 4] = [
    (ConnectionType::Success, EdgeStyle { stroke: Stroke::Solid, color: "#16a34a", marker: "arrow-success" }),
    (ConnectionType::Failure, EdgeStyle { stroke: Stroke::Dashed, color: "#dc2626", marker: "arrow-failure" }),
    (
        ConnectionType::Conditional,
        EdgeStyle { stroke: Stroke::FineDashed, color: "#d97706", marker: "arrow-conditional" },
    ),
    (ConnectionType::Default, EdgeStyle { stroke: Stroke::Solid, color: "#6b7280", marker: "arrow-default" }),
];

pub fn edge_style(kind: ConnectionType) -> EdgeStyle {
    EDGE_STYLES
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, style)| *style)
        .unwrap_or(EDGE_STYLES[3].1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    pub fill: String,
    pub text: String,
}

fn kind_colors(kind: StepKind) -> (&'static str, &'static str) {
    match kind {
        StepKind::Start => ("#dcfce7", "#14532d"),
        StepKind::Action => ("#dbeafe", "#1e3a8a"),
        StepKind::Decision => ("#fef3c7", "#78350f"),
        StepKind::Condition => ("#ede9fe", "#4c1d95"),
        StepKind::Template => ("#e0e7ff", "#312e81"),
        StepKind::Manual => ("#f3f4f6", "#111827"),
        StepKind::End => ("#fee2e2", "#7f1d1d"),
    }
}

/// Colors for a step: explicit overrides first, then the defaults for its kind.
pub fn node_style(step: &Step) -> NodeStyle {
    let (fill, text) = kind_colors(step.kind());
    NodeStyle {
        fill: step.fill_color().unwrap_or(fill).to_owned(),
        text: step.text_color().unwrap_or(text).to_owned(),
    }
}
