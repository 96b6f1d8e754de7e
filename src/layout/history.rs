//! Undo/redo over whole-tree snapshots.
//!
//! Each step stores the complete state as it was before the step, rather than an inverse
//! operation. Undo swaps the current state for the top of the past stack and keeps the current
//! state for redo.

use std::collections::VecDeque;

use super::Snapshot;

#[derive(Debug, Clone, Default)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    /// Oldest steps are dropped beyond this many; `None` keeps everything.
    max_steps: Option<usize>,
}

impl History {
    pub fn new(max_steps: Option<usize>) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_steps,
        }
    }

    /// Records a step, given the state from before it. Clears the redo stack.
    pub fn record(&mut self, before: Snapshot) {
        self.future.clear();
        self.past.push_back(before);

        if let Some(max) = self.max_steps {
            while self.past.len() > max {
                self.past.pop_front();
            }
        }
    }

    /// Returns the state to go back to, stashing `current` for redo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Returns the state to go forward to, stashing `current` for undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
