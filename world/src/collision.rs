//! Pure collision predicates evaluated after every step.

use snake_core::{Boundary, Position};

/// Reports whether any body segment shares the head's position.
pub(crate) fn self_collision(positions: &[Position]) -> bool {
    match positions.split_first() {
        Some((head, body)) => body.iter().any(|segment| segment == head),
        None => false,
    }
}

/// Reports whether the head left the boundary.
pub(crate) fn boundary_collision(head: Position, boundary: &Boundary) -> bool {
    !boundary.contains(head)
}

/// Reports whether the head is within half a grid step of the apple.
pub(crate) fn apple_collision(head: Position, apple: Position, grid_size: f32) -> bool {
    head.distance(apple) < grid_size * 0.5
}
