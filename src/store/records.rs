// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Serializable mirrors of the model, as exchanged with the host application.
//!
//! Field names are camelCase on the wire. Conversions into the model validate ids and closed
//! enums; conversions out of it are infallible.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RecordError;
use crate::editor::{EditorInit, EditorMode, SavePayload};
use crate::model::{
    Connection, ConnectionType, Id, LegacyBranch, Point, Priority, Size, Step, StepDetails,
    StepKind, StepLink,
};
use crate::viewport::ViewportSettings;

fn parse_id<T>(field: &'static str, value: &str) -> Result<Id<T>, RecordError> {
    Id::new(value).map_err(|source| RecordError::InvalidId { field, value: value.to_owned(), source })
}

fn default_kind() -> String {
    StepKind::default().as_str().to_owned()
}

fn default_connection_type() -> String {
    ConnectionType::Default.as_str().to_owned()
}

fn default_zoom() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Self {
        Point::new(record.x, record.y)
    }
}

impl From<Point> for PointRecord {
    fn from(point: Point) -> Self {
        Self { x: point.x, y: point.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SizeRecord {
    pub width: f64,
    pub height: f64,
}

impl From<SizeRecord> for Size {
    fn from(record: SizeRecord) -> Self {
        Size::new(record.width, record.height)
    }
}

impl From<Size> for SizeRecord {
    fn from(size: Size) -> Self {
        Self { width: size.width, height: size.height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinkRecord {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub id: String,
    pub target_step_id: String,
    #[serde(default)]
    pub label: String,
    /// One of `success`, `failure`, `conditional`, `default`.
    #[serde(rename = "type", default = "default_connection_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl TryFrom<ConnectionRecord> for Connection {
    type Error = RecordError;

    fn try_from(record: ConnectionRecord) -> Result<Self, Self::Error> {
        let connection_id = parse_id("connection id", &record.id)?;
        let target = parse_id("targetStepId", &record.target_step_id)?;
        let kind: ConnectionType = record.kind.parse()?;
        Ok(Connection::new(connection_id, target, record.label, kind).with_condition(record.condition))
    }
}

impl From<&Connection> for ConnectionRecord {
    fn from(connection: &Connection) -> Self {
        Self {
            id: connection.connection_id().to_string(),
            target_step_id: connection.target().to_string(),
            label: connection.label().to_owned(),
            kind: connection.kind().as_str().to_owned(),
            condition: connection.condition().map(ToOwned::to_owned),
        }
    }
}

/// One step as stored by the host.
///
/// The authoring fields (`name` through `estimatedMinutes`) are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub id: String,
    #[serde(default)]
    pub order: i64,
    /// One of `start`, `action`, `decision`, `condition`, `template`, `manual`, `end`.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Absent means the default shape for `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_success_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_failure_target: Option<String>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,

    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
}

impl StepRecord {
    pub fn new(id: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            order,
            kind: default_kind(),
            shape: None,
            fill_color: None,
            text_color: None,
            position: None,
            legacy_success_target: None,
            legacy_failure_target: None,
            connections: Vec::new(),
            name: String::new(),
            name_alt: None,
            description: None,
            notes: None,
            tags: Vec::new(),
            links: Vec::new(),
            images: Vec::new(),
            priority: None,
            estimated_minutes: None,
        }
    }
}

impl TryFrom<StepRecord> for Step {
    type Error = RecordError;

    fn try_from(record: StepRecord) -> Result<Self, Self::Error> {
        let step_id = parse_id("step id", &record.id)?;
        let kind: StepKind = record.kind.parse()?;
        let mut step = Step::new_with(step_id, record.order, kind);
        if let Some(shape) = record.shape {
            step.set_shape(shape.parse()?);
        }
        step.set_fill_color(record.fill_color);
        step.set_text_color(record.text_color);
        step.set_position(record.position.map(Point::from));

        let success = record
            .legacy_success_target
            .as_deref()
            .map(|target| parse_id("legacySuccessTarget", target))
            .transpose()?;
        let failure = record
            .legacy_failure_target
            .as_deref()
            .map(|target| parse_id("legacyFailureTarget", target))
            .transpose()?;
        step.set_legacy_target(LegacyBranch::Success, success);
        step.set_legacy_target(LegacyBranch::Failure, failure);

        for connection in record.connections {
            step.connections_mut().push(Connection::try_from(connection)?);
        }

        let priority = record.priority.as_deref().map(str::parse::<Priority>).transpose()?;
        *step.details_mut() = StepDetails {
            name: record.name,
            name_alt: record.name_alt,
            description: record.description,
            notes: record.notes,
            tags: record.tags,
            links: record
                .links
                .into_iter()
                .map(|link| StepLink { label: link.label, url: link.url })
                .collect(),
            images: record.images,
            priority,
            estimated_minutes: record.estimated_minutes,
        };
        Ok(step)
    }
}

impl From<&Step> for StepRecord {
    fn from(step: &Step) -> Self {
        let details = step.details();
        Self {
            id: step.step_id().to_string(),
            order: step.order(),
            kind: step.kind().as_str().to_owned(),
            shape: Some(step.shape().as_str().to_owned()),
            fill_color: step.fill_color().map(ToOwned::to_owned),
            text_color: step.text_color().map(ToOwned::to_owned),
            position: step.position().map(PointRecord::from),
            legacy_success_target: step.legacy_target(LegacyBranch::Success).map(ToString::to_string),
            legacy_failure_target: step.legacy_target(LegacyBranch::Failure).map(ToString::to_string),
            connections: step.connections().iter().map(ConnectionRecord::from).collect(),
            name: details.name.clone(),
            name_alt: details.name_alt.clone(),
            description: details.description.clone(),
            notes: details.notes.clone(),
            tags: details.tags.clone(),
            links: details
                .links
                .iter()
                .map(|link| LinkRecord { label: link.label.clone(), url: link.url.clone() })
                .collect(),
            images: details.images.clone(),
            priority: details.priority.map(|priority| priority.as_str().to_owned()),
            estimated_minutes: details.estimated_minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSettingsRecord {
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    pub background_size: SizeRecord,
    pub node_size: SizeRecord,
}

impl From<ViewportSettingsRecord> for ViewportSettings {
    fn from(record: ViewportSettingsRecord) -> Self {
        Self {
            zoom: record.zoom,
            background_size: record.background_size.into(),
            node_size: record.node_size.into(),
        }
    }
}

impl From<ViewportSettings> for ViewportSettingsRecord {
    fn from(settings: ViewportSettings) -> Self {
        Self {
            zoom: settings.zoom,
            background_size: settings.background_size.into(),
            node_size: settings.node_size.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModeRecord {
    #[default]
    Diagram,
    Manual,
    Edit,
}

impl From<ModeRecord> for EditorMode {
    fn from(mode: ModeRecord) -> Self {
        match mode {
            ModeRecord::Diagram => EditorMode::Diagram,
            ModeRecord::Manual => EditorMode::Manual,
            ModeRecord::Edit => EditorMode::Edit,
        }
    }
}

/// What the host passes when it opens the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditorInitRecord {
    pub workflow_id: String,
    #[serde(default)]
    pub workflow_name: String,
    #[serde(default)]
    pub mode: ModeRecord,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_settings: Option<ViewportSettingsRecord>,
}

impl TryFrom<EditorInitRecord> for EditorInit {
    type Error = RecordError;

    fn try_from(record: EditorInitRecord) -> Result<Self, Self::Error> {
        let steps = record.steps.into_iter().map(Step::try_from).collect::<Result<Vec<_>, _>>()?;
        Ok(EditorInit {
            steps,
            workflow_name: record.workflow_name,
            workflow_id: parse_id("workflowId", &record.workflow_id)?,
            mode: record.mode.into(),
            initial_settings: record.initial_settings.map(ViewportSettings::from),
        })
    }
}

/// What the editor hands back on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePayloadRecord {
    pub workflow_id: String,
    pub steps: Vec<StepRecord>,
    pub zoom: f64,
    pub background_size: SizeRecord,
    pub node_size: SizeRecord,
    pub panel_position: PointRecord,
}

impl From<&SavePayload> for SavePayloadRecord {
    fn from(payload: &SavePayload) -> Self {
        Self {
            workflow_id: payload.workflow_id.to_string(),
            steps: payload.steps.iter().map(StepRecord::from).collect(),
            zoom: payload.zoom,
            background_size: payload.background_size.into(),
            node_size: payload.node_size.into(),
            panel_position: payload.panel_position.into(),
        }
    }
}
