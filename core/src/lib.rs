#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the snake simulation.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative world, and pure input systems. Hosts submit [`Command`]
//! values once per frame, the world executes them via its `apply` entry point,
//! and then broadcasts [`Event`] values describing every observable change so
//! that a renderer can mirror segments, apples and the message line without
//! reaching into world internals.

mod config;

use std::{fmt, str::FromStr};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{ConfigError, SessionConfig};

/// Number of segments a freshly reset snake is built with.
pub const INITIAL_SEGMENTS: usize = 3;

/// Welcome text shown when the host reports a keyboard-driven viewport.
pub const WELCOME_KEYBOARD: &str = "Welcome 👋😊\nUse arrow keys to move";
/// Welcome text shown when the host reports a touch-driven viewport.
pub const WELCOME_TOUCH: &str = "Welcome 👋😊\nSwipe direction to move";
/// Message shown when the head runs into the body.
pub const SELF_COLLIDED: &str = "Game Over ☠️\nYou self-collided";
/// Message shown when the head leaves the boundary.
pub const HIT_THE_WALL: &str = "Game Over ☠️\nYou hit the wall";
/// Message shown after an apple pickup.
pub const APPLE_EATEN: &str = "Homp!  \nApple eaten 🍎";
/// Message shown when the last apple is eaten.
pub const YOU_WON: &str = "You won!🏆🥰✨";

/// Formats the restart countdown line for the given whole seconds.
#[must_use]
pub fn countdown_message(seconds: u32) -> String {
    format!("Game Restart in {seconds} ...")
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Tears down any running session and starts a fresh one.
    Start {
        /// Host clock reading in seconds.
        now: f64,
        /// Input mode reported by the host, used for the welcome text.
        viewport: Viewport,
    },
    /// Advances the session to the provided host clock reading.
    Tick {
        /// Host clock reading in seconds.
        now: f64,
        /// Latest direction requested by the player, if any.
        intent: Option<Direction>,
        /// Input mode reported by the host, used for the welcome text.
        viewport: Viewport,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Replaces the message line. An empty text hides it.
    MessageChanged {
        /// Text that should be displayed.
        text: String,
    },
    /// Confirms that a new body segment exists.
    SegmentSpawned {
        /// Identifier allocated to the segment.
        segment: SegmentId,
        /// Position the segment starts at.
        position: Position,
    },
    /// Confirms that a body segment was torn down.
    SegmentDespawned {
        /// Identifier of the removed segment.
        segment: SegmentId,
    },
    /// Confirms that an apple was placed.
    AppleSpawned {
        /// Identifier allocated to the apple.
        apple: AppleId,
        /// Position of the apple.
        position: Position,
    },
    /// Confirms that an apple was removed from the field.
    AppleRemoved {
        /// Identifier of the removed apple.
        apple: AppleId,
    },
    /// Reports that the whole snake moved one step.
    SnakeAdvanced {
        /// Head position after the step.
        head: Position,
        /// Direction applied during the step.
        direction: Direction,
    },
    /// Reports an apple pickup.
    AppleEaten {
        /// Identifier of the eaten apple.
        apple: AppleId,
        /// Step interval in seconds after the speed-up.
        step_interval: f64,
    },
    /// Reports that the running session finished.
    SessionEnded {
        /// How the session finished.
        outcome: Outcome,
    },
    /// Reports that a fresh session was built.
    SessionStarted {
        /// Viewport the welcome text was chosen for.
        viewport: Viewport,
    },
}

/// Top-level phase of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The snake moves and accepts input.
    Playing,
    /// The final message and the restart countdown are displayed.
    GameOverMessage,
    /// Transient phase that rebuilds the session.
    Resetting,
}

/// Reason a session was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// The head entered a body segment.
    SelfCollision,
    /// The head left the boundary.
    Wall,
}

/// Result of a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every apple was eaten.
    Won,
    /// The snake died.
    Lost(DeathCause),
}

impl Outcome {
    /// Message announcing the outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Won => YOU_WON,
            Self::Lost(DeathCause::SelfCollision) => SELF_COLLIDED,
            Self::Lost(DeathCause::Wall) => HIT_THE_WALL,
        }
    }
}

/// Input mode reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Viewport {
    /// Keyboard-driven desktop viewport.
    #[default]
    Desktop,
    /// Touch-driven viewport.
    Touch,
}

impl Viewport {
    /// Welcome text matching the input mode.
    #[must_use]
    pub const fn welcome_message(self) -> &'static str {
        match self {
            Self::Desktop => WELCOME_KEYBOARD,
            Self::Touch => WELCOME_TOUCH,
        }
    }
}

/// Cardinal movement directions on the grid plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing z.
    #[default]
    Up,
    /// Movement toward increasing z.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// Every direction in the order hosts evaluate held keys.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit step on the grid plane.
    #[must_use]
    pub const fn step_vector(self) -> Vec3 {
        match self {
            Self::Up => Vec3::new(0.0, 0.0, -1.0),
            Self::Down => Vec3::new(0.0, 0.0, 1.0),
            Self::Left => Vec3::new(-1.0, 0.0, 0.0),
            Self::Right => Vec3::new(1.0, 0.0, 0.0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether turning from `other` to `self` would reverse the snake.
    #[must_use]
    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Error returned when text does not name one of the four directions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown direction `{0}`")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

/// Coordinate on the grid plane. `y` stays at zero.
///
/// Positions are built from multiples of the grid size, so exact equality is
/// meaningful for collision checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(Vec3);

impl Position {
    /// Creates a position from explicit components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Creates a position on the ground plane.
    #[must_use]
    pub const fn on_plane(x: f32, z: f32) -> Self {
        Self::new(x, 0.0, z)
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.0.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.0.y
    }

    /// Depth component.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.0.z
    }

    /// Position reached by moving `grid_size` units along `step`.
    #[must_use]
    pub fn offset(self, step: Vec3, grid_size: f32) -> Self {
        Self(self.0 + step * grid_size)
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        self.0.distance(other.0)
    }
}

/// Axis-aligned playing field on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Smallest admissible x.
    pub min_x: f32,
    /// Largest admissible x.
    pub max_x: f32,
    /// Smallest admissible z.
    pub min_z: f32,
    /// Largest admissible z.
    pub max_z: f32,
}

impl Boundary {
    /// Creates a boundary from its four edges.
    #[must_use]
    pub const fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Reports whether the position lies inside the boundary, edges included.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x() >= self.min_x
            && position.x() <= self.max_x
            && position.z() >= self.min_z
            && position.z() <= self.max_z
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(-3.25, 3.25, -6.0, 6.0)
    }
}

/// Unique identifier assigned to a snake segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(u32);

impl SegmentId {
    /// Creates a new segment identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an apple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppleId(u32);

impl AppleId {
    /// Creates a new apple identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single segment used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    /// Identifier of the segment.
    pub id: SegmentId,
    /// Current position of the segment.
    pub position: Position,
}

/// Read-only snapshot of the snake, head first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnakeView {
    segments: Vec<SegmentSnapshot>,
}

impl SnakeView {
    /// Creates a view from segments ordered head first.
    #[must_use]
    pub fn from_segments(segments: Vec<SegmentSnapshot>) -> Self {
        Self { segments }
    }

    /// Iterator over the segments, head first.
    pub fn iter(&self) -> impl Iterator<Item = &SegmentSnapshot> {
        self.segments.iter()
    }

    /// Head segment, if the snake has been built.
    #[must_use]
    pub fn head(&self) -> Option<&SegmentSnapshot> {
        self.segments.first()
    }

    /// Number of segments including the head.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Reports whether the view holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Immutable representation of a single apple used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppleSnapshot {
    /// Identifier of the apple.
    pub id: AppleId,
    /// Position of the apple.
    pub position: Position,
}

/// Read-only snapshot of the apples in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppleView {
    apples: Vec<AppleSnapshot>,
}

impl AppleView {
    /// Creates a view from apples in insertion order.
    #[must_use]
    pub fn from_snapshots(apples: Vec<AppleSnapshot>) -> Self {
        Self { apples }
    }

    /// Iterator over the apples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AppleSnapshot> {
        self.apples.iter()
    }

    /// Number of apples left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apples.len()
    }

    /// Reports whether no apples are left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apples.is_empty()
    }
}

/// Everything a host needs to render one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Snake segments, head first.
    pub snake: SnakeView,
    /// Remaining apples.
    pub apples: AppleView,
    /// Message line. Empty when hidden.
    pub message: String,
    /// Last direction applied to the head.
    pub direction: Direction,
    /// Current step interval in seconds.
    pub step_interval: f64,
    /// Whether the session has ended.
    pub game_over: bool,
    /// How the last session ended, while its message is up.
    pub outcome: Option<Outcome>,
}
