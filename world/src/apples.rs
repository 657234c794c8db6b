//! Active apples and the grid position sampler used to place them.

use rand::Rng;
use snake_core::{AppleId, AppleSnapshot, AppleView, Boundary, Position};

use crate::collision;

#[derive(Clone, Copy, Debug)]
struct Apple {
    id: AppleId,
    position: Position,
}

/// Apples in insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct AppleManager {
    apples: Vec<Apple>,
}

impl AppleManager {
    /// Places a new apple at a random grid position inside `boundary`.
    ///
    /// Existing apples and the snake are not excluded.
    pub(crate) fn spawn<R: Rng>(
        &mut self,
        id: AppleId,
        rng: &mut R,
        boundary: &Boundary,
        grid_size: f32,
    ) -> Position {
        let position = sample_grid_position(rng, boundary, grid_size);
        self.insert(id, position);
        position
    }

    pub(crate) fn insert(&mut self, id: AppleId, position: Position) {
        self.apples.push(Apple { id, position });
    }

    /// Drops the apple with the given id. Unknown ids are ignored.
    pub(crate) fn remove(&mut self, id: AppleId) -> Option<Position> {
        let index = self.apples.iter().position(|apple| apple.id == id)?;
        Some(self.apples.remove(index).position)
    }

    /// Drops every apple, returning their ids in insertion order.
    pub(crate) fn clear(&mut self) -> Vec<AppleId> {
        self.apples.drain(..).map(|apple| apple.id).collect()
    }

    /// Finds the most recently inserted apple within pickup range of `head`.
    pub(crate) fn query_collision(&self, head: Position, grid_size: f32) -> Option<AppleId> {
        self.apples
            .iter()
            .rev()
            .find(|apple| collision::apple_collision(head, apple.position, grid_size))
            .map(|apple| apple.id)
    }

    pub(crate) fn len(&self) -> usize {
        self.apples.len()
    }

    pub(crate) fn view(&self) -> AppleView {
        AppleView::from_snapshots(
            self.apples
                .iter()
                .map(|apple| AppleSnapshot {
                    id: apple.id,
                    position: apple.position,
                })
                .collect(),
        )
    }
}

/// Samples a grid-aligned position on the ground plane.
///
/// Each axis picks `floor(u * 2 * max_dim) - max_dim` grid steps with
/// `max_dim = max / grid_size` and `u` uniform in `[0, 1)`, so the result is
/// symmetric about the origin.
pub(crate) fn sample_grid_position<R: Rng>(
    rng: &mut R,
    boundary: &Boundary,
    grid_size: f32,
) -> Position {
    let x = sample_axis(rng, boundary.max_x, grid_size);
    let z = sample_axis(rng, boundary.max_z, grid_size);
    Position::on_plane(x, z)
}

fn sample_axis<R: Rng>(rng: &mut R, max: f32, grid_size: f32) -> f32 {
    let max_dim = f64::from(max / grid_size);
    let unit: f64 = rng.gen();
    let steps = (unit * 2.0 * max_dim).floor() - max_dim;
    steps as f32 * grid_size
}
