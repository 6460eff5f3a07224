// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A JSON snapshot of an editor session: resolved layout, derived edges and pending issues.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::records::{PointRecord, SavePayloadRecord};
use crate::editor::{Editor, Notice, NoticeLevel};
use crate::render::{edge_style, DerivedEdge};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord {
    pub step_id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    pub from: PointRecord,
    pub to: PointRecord,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub editable: bool,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    pub marker: String,
}

impl From<&DerivedEdge> for EdgeRecord {
    fn from(edge: &DerivedEdge) -> Self {
        let style = edge_style(edge.kind);
        Self {
            id: edge.edge_id.clone(),
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            from: edge.from.into(),
            to: edge.to.into(),
            kind: edge.kind.as_str().to_owned(),
            label: edge.label.clone(),
            condition: edge.condition.clone(),
            editable: edge.is_label_editable(),
            color: style.color.to_owned(),
            dash_array: style.stroke.dash_array().map(ToOwned::to_owned),
            marker: style.marker.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NoticeRecord {
    pub level: String,
    pub message: String,
}

impl From<&Notice> for NoticeRecord {
    fn from(notice: &Notice) -> Self {
        let level = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        Self { level: level.to_owned(), message: notice.message.clone() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub len: usize,
    pub cursor: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub workflow_id: String,
    pub workflow_name: String,
    pub layout: Vec<PlacementRecord>,
    pub edges: Vec<EdgeRecord>,
    pub issues: Vec<String>,
    pub notices: Vec<NoticeRecord>,
    pub history: HistoryRecord,
    pub payload: SavePayloadRecord,
}

impl ReportRecord {
    pub fn from_editor(editor: &Editor, notices: &[Notice]) -> Self {
        let layout = editor
            .layout()
            .placements()
            .iter()
            .map(|(step_id, point)| PlacementRecord { step_id: step_id.to_string(), x: point.x, y: point.y })
            .collect();
        let history = editor.history();

        Self {
            workflow_id: editor.workflow_id().to_string(),
            workflow_name: editor.workflow_name().to_owned(),
            layout,
            edges: editor.scene().edges.iter().map(EdgeRecord::from).collect(),
            issues: editor.integrity_issues().iter().map(ToString::to_string).collect(),
            notices: notices.iter().map(NoticeRecord::from).collect(),
            history: HistoryRecord {
                len: history.len(),
                cursor: history.cursor(),
                can_undo: history.can_undo(),
                can_redo: history.can_redo(),
            },
            payload: SavePayloadRecord::from(&editor.save_payload()),
        }
    }
}
