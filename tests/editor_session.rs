// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::{fixture, rstest};

use tourflow::config::EditorConfig;
use tourflow::editor::{
    AuthoringAction, Editor, EditorEvent, EditorHost, EditorInit, Key, PointerTarget, SaveError,
    SavePayload,
};
use tourflow::model::{LegacyBranch, Point, StepId};
use tourflow::store::{replay, EditorInitRecord, ReportRecord, SavePayloadRecord, TimedEventRecord};

const INIT: &str = r#"{
    "workflowId": "wf-airport",
    "workflowName": "Airport pickup",
    "mode": "edit",
    "steps": [
        {"id": "arrive", "order": 1, "kind": "start", "name": "Guest lands"},
        {"id": "meet", "order": 2, "name": "Meet at gate", "legacySuccessTarget": "drive"},
        {"id": "drive", "order": 3, "name": "Drive to hotel",
         "connections": [{"id": "c-checkin", "targetStepId": "checkin", "label": "arrived", "type": "success"}]},
        {"id": "checkin", "order": 4, "kind": "end", "name": "Hotel check-in",
         "position": {"x": 700, "y": 420}}
    ],
    "initialSettings": {"zoom": 1.5, "backgroundSize": {"width": 1600, "height": 900},
                        "nodeSize": {"width": 160, "height": 70}}
}"#;

#[derive(Default)]
struct MemoryHost {
    saved: Vec<SavePayload>,
}

impl EditorHost for MemoryHost {
    fn on_save(&mut self, payload: SavePayload) -> Result<(), SaveError> {
        self.saved.push(payload);
        Ok(())
    }

    fn on_close(&mut self) {}
}

fn sid(value: &str) -> StepId {
    StepId::new(value).expect("step id")
}

#[fixture]
fn editor() -> Editor {
    let record: EditorInitRecord = serde_json::from_str(INIT).expect("init record");
    let init = EditorInit::try_from(record).expect("init");
    Editor::with_rng(init, EditorConfig::default(), StdRng::seed_from_u64(11)).expect("editor")
}

#[rstest]
fn opens_with_saved_viewport_and_resolved_layout(editor: Editor) {
    assert_eq!(editor.viewport().zoom(), 1.5);
    assert_eq!(editor.viewport().node_size().width, 160.0);

    let layout = editor.layout();
    assert_eq!(layout.position(&sid("arrive")), Some(Point::new(150.0, 100.0)));
    assert_eq!(layout.position(&sid("drive")), Some(Point::new(550.0, 100.0)));
    assert_eq!(layout.position(&sid("checkin")), Some(Point::new(700.0, 420.0)));

    let edges = editor.scene().edges;
    let ids: Vec<&str> = edges.iter().map(|edge| edge.edge_id.as_str()).collect();
    assert_eq!(ids, vec!["meet:success", "c-checkin"]);
    assert!(editor.integrity_issues().is_empty());
}

#[rstest]
fn edit_session_round_trips_through_save_payload(mut editor: Editor) {
    let t0 = Instant::now();
    // Screen coordinates at zoom 1.5: "meet" sits at canvas (350, 100).
    editor.handle(
        EditorEvent::PointerDown { target: PointerTarget::Step(sid("meet")), at: Point::new(525.0, 150.0) },
        t0,
    );
    editor.handle(EditorEvent::PointerMove { at: Point::new(600.0, 300.0) }, t0);
    editor.handle(EditorEvent::PointerUp { at: Point::new(600.0, 300.0) }, t0);
    editor.tick(t0 + Duration::from_millis(120));

    editor.handle(
        EditorEvent::PointerDown { target: PointerTarget::Step(sid("arrive")), at: Point::default() },
        t0,
    );
    editor.handle(EditorEvent::PointerUp { at: Point::default() }, t0);
    assert_eq!(editor.selection(), &[sid("meet"), sid("arrive")]);
    editor.author_connection(AuthoringAction::Failure).expect("author");

    let mut host = MemoryHost::default();
    editor.save(&mut host).expect("save");

    let record = SavePayloadRecord::from(&host.saved[0]);
    let json = serde_json::to_string(&record).expect("json");
    let back: SavePayloadRecord = serde_json::from_str(&json).expect("record");
    assert_eq!(back, record);

    let meet = back.steps.iter().find(|step| step.id == "meet").expect("meet");
    assert_eq!(meet.position.map(|p| (p.x, p.y)), Some((400.0, 200.0)));
    assert_eq!(meet.legacy_failure_target.as_deref(), Some("arrive"));
    assert_eq!(back.zoom, 1.5);
    assert_eq!(back.background_size.width, 1600.0);

    // Two user-visible steps: the drag and the connection.
    editor.handle(EditorEvent::Key(Key::Undo), t0);
    let meet = editor.graph().step(&sid("meet")).expect("meet");
    assert_eq!(meet.legacy_target(LegacyBranch::Failure), None);
    assert!(meet.position().is_some());
    editor.handle(EditorEvent::Key(Key::Undo), t0);
    assert_eq!(editor.graph().step(&sid("meet")).and_then(|step| step.position()), None);
}

#[rstest]
fn deleting_a_target_leaves_edges_to_it_unrendered(mut editor: Editor) {
    let t0 = Instant::now();
    editor.handle(
        EditorEvent::PointerDown { target: PointerTarget::Step(sid("checkin")), at: Point::default() },
        t0,
    );
    editor.handle(EditorEvent::PointerUp { at: Point::default() }, t0);
    editor.handle(EditorEvent::Key(Key::Delete), t0);

    let edges = editor.scene().edges;
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].edge_id, "meet:success");
    assert_eq!(editor.integrity_issues().len(), 1);
}

#[rstest]
fn scripted_session_produces_a_report(mut editor: Editor) {
    let script: Vec<TimedEventRecord> = serde_json::from_str(
        r#"[
            {"type": "doubleClick", "target": {"kind": "edgeLabel", "id": "c-checkin"}},
            {"type": "key", "key": "backspace"},
            {"type": "typeText", "text": " late"},
            {"type": "key", "key": "enter"},
            {"type": "addStep", "kind": "decision", "atMs": 40},
            {"type": "key", "key": "delete", "atMs": 60},
            {"type": "movePanel", "position": {"x": 200, "y": 24}, "atMs": 80}
        ]"#,
    )
    .expect("script");

    let notices = replay(&mut editor, script, Instant::now()).expect("replay");
    let report = ReportRecord::from_editor(&editor, &notices);

    assert_eq!(report.edges[1].label, "arrive late");
    assert!(report.edges[1].editable);
    assert_eq!(report.layout.len(), 5);
    assert_eq!(report.notices.len(), 1);
    assert_eq!(report.notices[0].level, "warning");
    assert_eq!(report.history.len, 3);
    assert_eq!(report.payload.panel_position.x, 200.0);
}
