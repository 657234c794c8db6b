//! Ordered chain of body segments, head first.

use glam::Vec3;
use snake_core::{Position, SegmentId, SegmentSnapshot, SnakeView};

/// Segment identities and positions stored as parallel sequences so the
/// collision rules can borrow the positions as one slice.
#[derive(Clone, Debug, Default)]
pub(crate) struct SnakeBody {
    ids: Vec<SegmentId>,
    positions: Vec<Position>,
}

impl SnakeBody {
    /// Builds a body from `(id, position)` pairs ordered head first.
    pub(crate) fn from_segments(segments: impl IntoIterator<Item = (SegmentId, Position)>) -> Self {
        let (ids, positions) = segments.into_iter().unzip();
        Self { ids, positions }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn head(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    pub(crate) fn tail(&self) -> Option<Position> {
        self.positions.last().copied()
    }

    pub(crate) fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Moves every segment onto its predecessor's previous position and the
    /// head one grid step along `step`.
    ///
    /// Returns the tail position held before the move, which is where a
    /// segment grown during this step is placed.
    pub(crate) fn propagate(&mut self, step: Vec3, grid_size: f32) -> Option<Position> {
        let old_tail = self.tail()?;
        let old_head = self.head()?;
        // Walk from the tail so each slot reads a value that has not moved yet.
        for index in (1..self.positions.len()).rev() {
            self.positions[index] = self.positions[index - 1];
        }
        self.positions[0] = old_head.offset(step, grid_size);
        Some(old_tail)
    }

    /// Appends a new tail segment.
    pub(crate) fn grow(&mut self, id: SegmentId, at: Position) {
        self.ids.push(id);
        self.positions.push(at);
    }

    /// Removes every segment except the head, returning the removed ids.
    pub(crate) fn truncate_to_head(&mut self) -> Vec<SegmentId> {
        self.positions.truncate(1);
        if self.ids.len() > 1 {
            self.ids.split_off(1)
        } else {
            Vec::new()
        }
    }

    pub(crate) fn view(&self) -> SnakeView {
        SnakeView::from_segments(
            self.ids
                .iter()
                .zip(&self.positions)
                .map(|(&id, &position)| SegmentSnapshot { id, position })
                .collect(),
        )
    }
}
