#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input system translating raw host key and touch events into a direction
//! intent for the world.
//!
//! Hosts forward every key and touch event they observe, then ask for the
//! intent once per frame. All state lives in the [`Input`] instance, so several
//! sessions can run side by side without sharing gesture state.

use snake_core::{Direction, Viewport};

/// Raw events reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A direction key was pressed.
    KeyDown(Direction),
    /// A direction key was released.
    KeyUp(Direction),
    /// A finger touched the screen.
    TouchStart {
        /// Horizontal screen coordinate.
        x: f32,
        /// Vertical screen coordinate, growing downward.
        y: f32,
    },
    /// A finger moved across the screen.
    TouchMove {
        /// Horizontal screen coordinate.
        x: f32,
        /// Vertical screen coordinate, growing downward.
        y: f32,
    },
    /// The finger left the screen.
    TouchEnd,
}

/// Pure system that folds host input into a direction intent.
#[derive(Debug, Default)]
pub struct Input {
    keys: HeldKeys,
    swipe: SwipeTracker,
}

impl Input {
    /// Consumes raw input events observed since the previous frame.
    pub fn handle(&mut self, events: &[InputEvent]) {
        for event in events {
            match *event {
                InputEvent::KeyDown(direction) => self.keys.set(direction, true),
                InputEvent::KeyUp(direction) => self.keys.set(direction, false),
                InputEvent::TouchStart { x, y } => self.swipe.start(x, y),
                InputEvent::TouchMove { x, y } => self.swipe.update(x, y),
                InputEvent::TouchEnd => self.swipe.end(),
            }
        }
    }

    /// Direction intent for this frame.
    ///
    /// Desktop viewports evaluate held keys against `last_direction`; touch
    /// viewports always offer the latest swipe direction and leave
    /// anti-reversal filtering to the world.
    #[must_use]
    pub fn intent(&self, viewport: Viewport, last_direction: Direction) -> Option<Direction> {
        match viewport {
            Viewport::Desktop => self.keys.intent(last_direction),
            Viewport::Touch => Some(self.swipe.direction()),
        }
    }

    /// Latest swipe direction.
    #[must_use]
    pub fn swipe_direction(&self) -> Direction {
        self.swipe.direction()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct HeldKeys {
    held: [bool; 4],
}

impl HeldKeys {
    fn set(&mut self, direction: Direction, pressed: bool) {
        self.held[slot(direction)] = pressed;
    }

    /// Evaluates keys in Up, Down, Left, Right order; the last one that does
    /// not reverse `last_direction` wins.
    fn intent(&self, last_direction: Direction) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.held[slot(*direction)])
            .filter(|direction| !direction.is_reverse_of(last_direction))
            .last()
    }
}

fn slot(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

/// Classifies a drag by its dominant axis relative to where the touch began.
#[derive(Clone, Copy, Debug, Default)]
struct SwipeTracker {
    origin: Option<(f32, f32)>,
    direction: Direction,
}

impl SwipeTracker {
    fn start(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    fn update(&mut self, x: f32, y: f32) {
        let Some((origin_x, origin_y)) = self.origin else {
            return;
        };
        let dx = x - origin_x;
        let dy = y - origin_y;
        self.direction = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
    }

    fn end(&mut self) {
        self.origin = None;
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_without_a_touch_start_are_ignored() {
        let mut tracker = SwipeTracker::default();
        tracker.update(100.0, 0.0);
        assert_eq!(tracker.direction(), Direction::Up);
    }

    #[test]
    fn vertical_ties_resolve_to_vertical_axis() {
        let mut tracker = SwipeTracker::default();
        tracker.start(0.0, 0.0);
        tracker.update(10.0, 10.0);
        assert_eq!(tracker.direction(), Direction::Down);
    }
}
