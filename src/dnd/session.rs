use std::ops::Sub;

use tracing::trace;

use super::{DragSource, DropIntent};

/// Squared pointer travel, in surface pixels, before a press becomes a drag.
pub const DRAG_START_THRESHOLD: f64 = 8. * 8.;

/// Pointer position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn sq_len(self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Container and index the pointer currently hovers, as the preview reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub container_id: String,
    pub index: usize,
}

/// State of an ongoing drag.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    /// Pointer pressed; nothing moves until it travels past the threshold.
    Starting { source: DragSource, start: Point },
    /// Dragging; the source follows the pointer.
    Moving(DragData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragData {
    pub source: DragSource,
    pub pointer: Point,
    pub target: Option<DropTarget>,
}

/// How a drag ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Released before the threshold: a click on the source.
    Click(DragSource),
    /// Released over a drop target.
    Drop(DropIntent),
    /// Released outside every drop target, or cancelled.
    Cancelled,
}

/// Tracks one pointer drag at a time, shared by every region and slot.
///
/// All containers belong to the same group, so a drag can end in any of them.
#[derive(Debug)]
pub struct DragSession {
    state: Option<DragState>,
    threshold: f64,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DRAG_START_THRESHOLD)
    }
}

impl DragSession {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: None,
            threshold,
        }
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, Some(DragState::Moving(_)))
    }

    /// Starts tracking a press on `source`.
    ///
    /// Returns `false` if a drag is already in progress.
    pub fn begin(&mut self, source: DragSource, start: Point) -> bool {
        if self.state.is_some() {
            return false;
        }

        trace!("drag begin on {source:?}");
        self.state = Some(DragState::Starting { source, start });
        true
    }

    /// Updates the pointer position. Returns whether the drag is now moving.
    pub fn motion(&mut self, pointer: Point) -> bool {
        match &mut self.state {
            None => false,
            Some(DragState::Starting { source, start }) => {
                if (pointer - *start).sq_len() < self.threshold {
                    return false;
                }

                trace!("drag passed threshold");
                self.state = Some(DragState::Moving(DragData {
                    source: source.clone(),
                    pointer,
                    target: None,
                }));
                true
            }
            Some(DragState::Moving(data)) => {
                data.pointer = pointer;
                true
            }
        }
    }

    /// Sets the container and index the pointer is over.
    ///
    /// Ignored until the drag is moving.
    pub fn hover(&mut self, container_id: &str, index: usize) {
        if let Some(DragState::Moving(data)) = &mut self.state {
            data.target = Some(DropTarget {
                container_id: container_id.to_owned(),
                index,
            });
        }
    }

    /// The pointer left every drop target.
    pub fn leave(&mut self) {
        if let Some(DragState::Moving(data)) = &mut self.state {
            data.target = None;
        }
    }

    /// Ends the drag on pointer release.
    pub fn end(&mut self) -> Option<DragOutcome> {
        let outcome = match self.state.take()? {
            DragState::Starting { source, .. } => DragOutcome::Click(source),
            DragState::Moving(DragData {
                source,
                target: Some(target),
                ..
            }) => DragOutcome::Drop(DropIntent {
                source,
                container_id: target.container_id,
                index: target.index,
            }),
            DragState::Moving(_) => DragOutcome::Cancelled,
        };
        trace!("drag end: {outcome:?}");
        Some(outcome)
    }

    pub fn cancel(&mut self) {
        self.state = None;
    }
}
