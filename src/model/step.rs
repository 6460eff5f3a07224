// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::ids::{ConnectionId, StepId};

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Descriptive step category. Drives the default visual style only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StepKind {
    Start,
    #[default]
    Action,
    Decision,
    Condition,
    Template,
    Manual,
    End,
}

impl StepKind {
    pub const ALL: [StepKind; 7] = [
        Self::Start,
        Self::Action,
        Self::Decision,
        Self::Condition,
        Self::Template,
        Self::Manual,
        Self::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Action => "action",
            Self::Decision => "decision",
            Self::Condition => "condition",
            Self::Template => "template",
            Self::Manual => "manual",
            Self::End => "end",
        }
    }

    /// Shape a freshly added step of this kind starts with.
    pub fn default_shape(self) -> StepShape {
        match self {
            Self::Start | Self::End => StepShape::Oval,
            Self::Decision | Self::Condition => StepShape::Diamond,
            Self::Template => StepShape::Rounded,
            Self::Action | Self::Manual => StepShape::Rectangle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StepShape {
    #[default]
    Rectangle,
    Rounded,
    Diamond,
    Oval,
    Circle,
}

impl StepShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Rounded => "rounded",
            Self::Diamond => "diamond",
            Self::Oval => "oval",
            Self::Circle => "circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    what: &'static str,
    value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.what, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for StepKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant { what: "step kind", value: s.to_owned() })
    }
}

impl FromStr for StepShape {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(Self::Rectangle),
            "rounded" => Ok(Self::Rounded),
            "diamond" => Ok(Self::Diamond),
            "oval" => Ok(Self::Oval),
            "circle" => Ok(Self::Circle),
            _ => Err(UnknownVariant { what: "step shape", value: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(UnknownVariant { what: "priority", value: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLink {
    pub label: String,
    pub url: String,
}

/// Free-form authoring payload carried by a step.
///
/// The editor never interprets these fields; they are round-tripped verbatim on save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepDetails {
    pub name: String,
    pub name_alt: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub links: Vec<StepLink>,
    pub images: Vec<String>,
    pub priority: Option<Priority>,
    pub estimated_minutes: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    Success,
    Failure,
    Conditional,
    Default,
}

impl ConnectionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Conditional => "conditional",
            Self::Default => "default",
        }
    }
}

impl FromStr for ConnectionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            "conditional" => Ok(Self::Conditional),
            "default" => Ok(Self::Default),
            _ => Err(UnknownVariant { what: "connection type", value: s.to_owned() }),
        }
    }
}

/// The two branches of the single-edge legacy model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyBranch {
    Success,
    Failure,
}

impl LegacyBranch {
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "YES",
            Self::Failure => "NO",
        }
    }

    pub fn connection_type(self) -> ConnectionType {
        match self {
            Self::Success => ConnectionType::Success,
            Self::Failure => ConnectionType::Failure,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// A directed edge owned by its source step.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    connection_id: ConnectionId,
    target: StepId,
    label: String,
    kind: ConnectionType,
    condition: Option<String>,
}

impl Connection {
    pub fn new(
        connection_id: ConnectionId,
        target: StepId,
        label: impl Into<String>,
        kind: ConnectionType,
    ) -> Self {
        Self { connection_id, target, label: label.into(), kind, condition: None }
    }

    pub fn with_condition<T: Into<String>>(mut self, condition: Option<T>) -> Self {
        self.condition = condition.map(Into::into);
        self
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn target(&self) -> &StepId {
        &self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn kind(&self) -> ConnectionType {
        self.kind
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }
}

/// A node in the workflow graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    step_id: StepId,
    order: i64,
    kind: StepKind,
    shape: StepShape,
    fill_color: Option<String>,
    text_color: Option<String>,
    position: Option<Point>,
    legacy_success_target: Option<StepId>,
    legacy_failure_target: Option<StepId>,
    connections: Vec<Connection>,
    details: StepDetails,
}

impl Step {
    pub fn new(step_id: StepId, order: i64) -> Self {
        Self::new_with(step_id, order, StepKind::default())
    }

    pub fn new_with(step_id: StepId, order: i64, kind: StepKind) -> Self {
        Self {
            step_id,
            order,
            kind,
            shape: kind.default_shape(),
            fill_color: None,
            text_color: None,
            position: None,
            legacy_success_target: None,
            legacy_failure_target: None,
            connections: Vec::new(),
            details: StepDetails::default(),
        }
    }

    pub fn step_id(&self) -> &StepId {
        &self.step_id
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn set_order(&mut self, order: i64) {
        self.order = order;
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: StepKind) {
        self.kind = kind;
    }

    pub fn shape(&self) -> StepShape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: StepShape) {
        self.shape = shape;
    }

    pub fn fill_color(&self) -> Option<&str> {
        self.fill_color.as_deref()
    }

    pub fn set_fill_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.fill_color = color.map(Into::into);
    }

    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    pub fn set_text_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.text_color = color.map(Into::into);
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<Point>) {
        self.position = position;
    }

    pub fn legacy_target(&self, branch: LegacyBranch) -> Option<&StepId> {
        match branch {
            LegacyBranch::Success => self.legacy_success_target.as_ref(),
            LegacyBranch::Failure => self.legacy_failure_target.as_ref(),
        }
    }

    pub fn set_legacy_target(&mut self, branch: LegacyBranch, target: Option<StepId>) {
        match branch {
            LegacyBranch::Success => self.legacy_success_target = target,
            LegacyBranch::Failure => self.legacy_failure_target = target,
        }
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connections_mut(&mut self) -> &mut Vec<Connection> {
        &mut self.connections
    }

    pub fn details(&self) -> &StepDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut StepDetails {
        &mut self.details
    }
}

#[cfg(test)]
mod tests {
    use super::{Connection, ConnectionType, LegacyBranch, Point, Step, StepKind, StepShape};
    use crate::model::{ConnectionId, StepId};

    fn sid(value: &str) -> StepId {
        StepId::new(value).expect("step id")
    }

    #[test]
    fn step_kind_picks_default_shape() {
        let start = Step::new_with(sid("s"), 1, StepKind::Start);
        assert_eq!(start.shape(), StepShape::Oval);

        let decision = Step::new_with(sid("d"), 2, StepKind::Decision);
        assert_eq!(decision.shape(), StepShape::Diamond);

        let action = Step::new(sid("a"), 3);
        assert_eq!(action.kind(), StepKind::Action);
        assert_eq!(action.shape(), StepShape::Rectangle);
    }

    #[test]
    fn step_kind_parses_from_its_wire_name() {
        for kind in StepKind::ALL {
            assert_eq!(kind.as_str().parse::<StepKind>(), Ok(kind));
        }
        let err = "loop".parse::<StepKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown step kind 'loop'");
    }

    #[test]
    fn legacy_targets_are_addressed_by_branch() {
        let mut step = Step::new(sid("a"), 1);
        step.set_legacy_target(LegacyBranch::Failure, Some(sid("b")));

        assert_eq!(step.legacy_target(LegacyBranch::Success), None);
        assert_eq!(step.legacy_target(LegacyBranch::Failure), Some(&sid("b")));
        assert_eq!(LegacyBranch::Success.label(), "YES");
        assert_eq!(LegacyBranch::Failure.connection_type(), ConnectionType::Failure);
    }

    #[test]
    fn connection_keeps_optional_condition() {
        let mut connection = Connection::new(
            ConnectionId::new("c1").expect("connection id"),
            sid("b"),
            "maybe",
            ConnectionType::Conditional,
        )
        .with_condition(Some("guests > 10"));

        assert_eq!(connection.condition(), Some("guests > 10"));
        connection.set_label("large group");
        assert_eq!(connection.label(), "large group");
    }

    #[test]
    fn point_arithmetic_is_componentwise() {
        let offset = Point::new(30.0, 12.0) - Point::new(10.0, 2.0);
        assert_eq!(offset, Point::new(20.0, 10.0));
        assert_eq!(offset + Point::new(1.0, 1.0), Point::new(21.0, 11.0));
    }
}
