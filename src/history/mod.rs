// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot-based undo/redo.
//!
//! History is a bounded ring of [`GraphSnapshot`]s plus a cursor. The cursor always names the
//! snapshot that matches the live graph.
//!
//! Cap policy: when a commit pushes the ring past capacity the oldest snapshot is evicted and
//! the cursor still lands on the newest entry. The newest edit therefore stays reachable, and
//! the ring never holds more than `capacity` snapshots.

mod debounce;

pub use debounce::Debounce;

use std::collections::VecDeque;

use crate::model::GraphSnapshot;

const TRACING_TARGET: &str = "tourflow::history";

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<GraphSnapshot>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// Starts a history whose only entry is `initial`, so the first undo returns to it.
    pub fn new(initial: GraphSnapshot, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial);
        Self { entries, cursor: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&GraphSnapshot> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Records `snapshot` as the newest state. Any redo entries beyond the cursor are dropped.
    pub fn commit(&mut self, snapshot: GraphSnapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        let mut evicted = 0usize;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        self.cursor = self.entries.len() - 1;
        tracing::trace!(
            target: TRACING_TARGET,
            len = self.entries.len(),
            cursor = self.cursor,
            evicted,
            "history commit"
        );
    }

    /// Steps back one entry and returns a copy of it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<GraphSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Steps forward one entry and returns a copy of it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<GraphSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::model::fixtures::{sid, three_steps};
    use crate::model::{Graph, GraphSnapshot, Point};

    fn moved(graph: &mut Graph, x: f64) -> GraphSnapshot {
        graph.move_step(&sid("a"), Point::new(x, 0.0)).expect("move");
        graph.snapshot()
    }

    #[test]
    fn undo_and_redo_walk_the_cursor() {
        let mut graph = three_steps();
        let s0 = graph.snapshot();
        let mut history = History::new(s0.clone(), 50);
        let s1 = moved(&mut graph, 1.0);
        history.commit(s1.clone());

        assert_eq!(history.undo(), Some(s0.clone()));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(s1));
        assert_eq!(history.redo(), None);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn commit_after_undo_discards_redo_entries() {
        let mut graph = three_steps();
        let mut history = History::new(graph.snapshot(), 50);
        history.commit(moved(&mut graph, 1.0));
        history.commit(moved(&mut graph, 2.0));
        history.undo();
        history.undo();

        let branch = moved(&mut graph, 9.0);
        history.commit(branch.clone());

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(&branch));
    }

    #[test]
    fn capacity_evicts_oldest_and_keeps_newest_reachable() {
        let mut graph = three_steps();
        let mut history = History::new(graph.snapshot(), 50);
        let mut last = graph.snapshot();
        for idx in 0..60 {
            last = moved(&mut graph, idx as f64);
            history.commit(last.clone());
        }

        assert_eq!(history.len(), 50);
        assert_eq!(history.cursor(), 49);
        assert_eq!(history.current(), Some(&last));

        let mut undone = 0;
        for _ in 0..50 {
            if history.undo().is_some() {
                undone += 1;
            }
        }
        assert_eq!(undone, 49);
        assert_eq!(history.cursor(), 0);
        // Oldest surviving entry is the 11th commit (x = 10).
        let oldest = history.current().expect("oldest").steps()[0].position();
        assert_eq!(oldest, Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn zero_capacity_is_treated_as_one() {
        let graph = three_steps();
        let mut history = History::new(graph.snapshot(), 0);
        history.commit(graph.snapshot());
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }
}
