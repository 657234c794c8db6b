#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the snake simulation.
//!
//! The world owns the snake, the apples, the step clock and the message line,
//! and sequences them through the Playing, GameOverMessage and Resetting
//! phases. Hosts drive it exclusively through [`apply`] and read it back
//! through the [`query`] module.

mod apples;
mod clock;
mod collision;
mod messages;
mod snake;

use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::{
    countdown_message, AppleId, Command, ConfigError, DeathCause, Direction, Event, Outcome,
    Phase, Position, SegmentId, SessionConfig, Viewport, APPLE_EATEN, INITIAL_SEGMENTS,
};

use apples::AppleManager;
use clock::StepClock;
use messages::MessageBoard;
use snake::SnakeBody;

/// Represents one running snake session and everything it owns.
#[derive(Debug)]
pub struct World {
    config: SessionConfig,
    rng: ChaCha8Rng,
    phase: Phase,
    snake: SnakeBody,
    apples: AppleManager,
    clock: StepClock,
    messages: MessageBoard,
    direction: Direction,
    last_direction: Direction,
    outcome: Option<Outcome>,
    game_over_at: f64,
    head_id: SegmentId,
    next_segment: u32,
    next_apple: u32,
}

impl World {
    /// Creates a world with a freshly started session at time zero.
    ///
    /// Apple placement draws from a ChaCha stream seeded with `seed`, so two
    /// worlds built from the same arguments replay identically.
    ///
    /// The events of this first session are not reported. Hosts read its
    /// segments and apples through [`query`]; a later [`Command::Start`]
    /// despawns exactly those identities before building the next session.
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            phase: Phase::Playing,
            snake: SnakeBody::default(),
            apples: AppleManager::default(),
            clock: StepClock::new(0.0, config.step_interval),
            messages: MessageBoard::new(config.message_stay),
            direction: Direction::Up,
            last_direction: Direction::Up,
            outcome: None,
            game_over_at: 0.0,
            head_id: SegmentId::new(0),
            next_segment: 1,
            next_apple: 0,
        };
        let mut discarded = Vec::new();
        world.reset(0.0, Viewport::Desktop, &mut discarded);
        Ok(world)
    }

    fn allocate_segment(&mut self) -> SegmentId {
        let id = SegmentId::new(self.next_segment);
        self.next_segment = self.next_segment.wrapping_add(1);
        id
    }

    fn allocate_apple(&mut self) -> AppleId {
        let id = AppleId::new(self.next_apple);
        self.next_apple = self.next_apple.wrapping_add(1);
        id
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    /// Tears down the current session and builds a new one from the config.
    fn reset(&mut self, now: f64, viewport: Viewport, out_events: &mut Vec<Event>) {
        for apple in self.apples.clear() {
            out_events.push(Event::AppleRemoved { apple });
        }
        for segment in self.snake.truncate_to_head() {
            out_events.push(Event::SegmentDespawned { segment });
        }
        self.messages.hide(out_events);

        let grid_size = self.config.grid_size;
        self.clock = StepClock::new(now, self.config.step_interval);
        self.direction = Direction::Up;
        self.last_direction = Direction::Up;
        self.outcome = None;

        let mut segments = Vec::with_capacity(INITIAL_SEGMENTS);
        segments.push((self.head_id, Position::on_plane(0.0, 0.0)));
        for index in 1..INITIAL_SEGMENTS {
            let segment = self.allocate_segment();
            let position = Position::on_plane(0.0, index as f32 * grid_size);
            out_events.push(Event::SegmentSpawned { segment, position });
            segments.push((segment, position));
        }
        self.snake = SnakeBody::from_segments(segments);

        for _ in 0..self.config.apples_amount {
            let apple = self.allocate_apple();
            let position =
                self.apples
                    .spawn(apple, &mut self.rng, &self.config.boundary, grid_size);
            out_events.push(Event::AppleSpawned { apple, position });
        }

        self.messages
            .show(viewport.welcome_message(), now, out_events);
        self.set_phase(Phase::Playing, out_events);
        debug!(
            "session started at {now:.3}s with {} apples",
            self.apples.len()
        );
        out_events.push(Event::SessionStarted { viewport });
    }

    fn tick(
        &mut self,
        now: f64,
        intent: Option<Direction>,
        viewport: Viewport,
        out_events: &mut Vec<Event>,
    ) {
        match self.phase {
            Phase::Playing => self.tick_playing(now, intent, out_events),
            Phase::GameOverMessage => self.tick_game_over(now, viewport, out_events),
            Phase::Resetting => self.reset(now, viewport, out_events),
        }
    }

    fn tick_playing(&mut self, now: f64, intent: Option<Direction>, out_events: &mut Vec<Event>) {
        if let Some(requested) = intent {
            if !requested.is_reverse_of(self.last_direction) {
                self.direction = requested;
            }
        }
        self.messages.expire(now, out_events);

        if !self.clock.poll(now) {
            return;
        }

        let grid_size = self.config.grid_size;
        let Some(old_tail) = self
            .snake
            .propagate(self.direction.step_vector(), grid_size)
        else {
            return;
        };
        self.last_direction = self.direction;
        let Some(head) = self.snake.head() else {
            return;
        };
        trace!(
            "step {} to ({:.2}, {:.2})",
            self.direction,
            head.x(),
            head.z()
        );
        out_events.push(Event::SnakeAdvanced {
            head,
            direction: self.direction,
        });

        if collision::self_collision(self.snake.positions()) {
            self.finish(Outcome::Lost(DeathCause::SelfCollision), now, out_events);
            return;
        }
        if collision::boundary_collision(head, &self.config.boundary) {
            self.finish(Outcome::Lost(DeathCause::Wall), now, out_events);
            return;
        }

        let Some(apple) = self.apples.query_collision(head, grid_size) else {
            return;
        };
        self.messages.show(APPLE_EATEN, now, out_events);
        let segment = self.allocate_segment();
        self.snake.grow(segment, old_tail);
        out_events.push(Event::SegmentSpawned {
            segment,
            position: old_tail,
        });
        self.clock.speed_up(self.config.speed_multiplier);
        out_events.push(Event::AppleEaten {
            apple,
            step_interval: self.clock.step_interval(),
        });
        debug!(
            "apple {} eaten, length {}, step interval {:.4}s",
            apple.get(),
            self.snake.len(),
            self.clock.step_interval()
        );

        if self.apples.len() == 1 {
            self.finish(Outcome::Won, now, out_events);
            return;
        }
        if self.apples.remove(apple).is_some() {
            out_events.push(Event::AppleRemoved { apple });
        }
    }

    fn tick_game_over(&mut self, now: f64, viewport: Viewport, out_events: &mut Vec<Event>) {
        let elapsed = now - self.game_over_at;
        if elapsed <= self.config.message_stay {
            return;
        }

        let remaining = self.config.restart_duration() - elapsed;
        if remaining <= self.config.countdown_cutoff {
            self.set_phase(Phase::Resetting, out_events);
            self.reset(now, viewport, out_events);
            return;
        }

        let seconds = remaining.floor() as u32;
        self.messages
            .overwrite(&countdown_message(seconds), out_events);
    }

    fn finish(&mut self, outcome: Outcome, now: f64, out_events: &mut Vec<Event>) {
        debug!("session ended: {outcome:?}");
        self.messages.show(outcome.message(), now, out_events);
        self.outcome = Some(outcome);
        self.game_over_at = now;
        out_events.push(Event::SessionEnded { outcome });
        self.set_phase(Phase::GameOverMessage, out_events);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start { now, viewport } => world.reset(now, viewport, out_events),
        Command::Tick {
            now,
            intent,
            viewport,
        } => world.tick(now, intent, viewport, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use snake_core::{
        AppleView, Direction, Outcome, Phase, Position, SessionConfig, SessionSnapshot,
        SnakeView,
    };

    /// Current phase of the session.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Reports whether the session has ended and is counting down to a restart.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.phase != Phase::Playing
    }

    /// How the last session ended, while its game-over phase lasts.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Captures the snake segments, head first.
    #[must_use]
    pub fn snake(world: &World) -> SnakeView {
        world.snake.view()
    }

    /// Number of snake segments including the head.
    #[must_use]
    pub fn snake_len(world: &World) -> usize {
        world.snake.len()
    }

    /// Position of the head, followed by cameras and used for orientation.
    #[must_use]
    pub fn head(world: &World) -> Option<Position> {
        world.snake.head()
    }

    /// Captures the remaining apples in insertion order.
    #[must_use]
    pub fn apples(world: &World) -> AppleView {
        world.apples.view()
    }

    /// Number of apples left on the field.
    #[must_use]
    pub fn apple_count(world: &World) -> usize {
        world.apples.len()
    }

    /// Message line. Empty when hidden.
    #[must_use]
    pub fn message(world: &World) -> &str {
        world.messages.text()
    }

    /// Last direction applied to the head.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.last_direction
    }

    /// Direction the next step will take, after anti-reversal filtering.
    #[must_use]
    pub fn pending_direction(world: &World) -> Direction {
        world.direction
    }

    /// Current step interval in seconds.
    #[must_use]
    pub fn step_interval(world: &World) -> f64 {
        world.clock.step_interval()
    }

    /// Configuration every reset starts from.
    #[must_use]
    pub fn config(world: &World) -> &SessionConfig {
        &world.config
    }

    /// Captures everything a host needs to render one frame.
    #[must_use]
    pub fn snapshot(world: &World) -> SessionSnapshot {
        SessionSnapshot {
            phase: phase(world),
            snake: snake(world),
            apples: apples(world),
            message: message(world).to_owned(),
            direction: direction(world),
            step_interval: step_interval(world),
            game_over: is_game_over(world),
            outcome: outcome(world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{SELF_COLLIDED, YOU_WON};

    const SEED: u64 = 0x0123_4567_89ab_cdef;
    const STEP: f64 = 0.34;

    fn world() -> World {
        World::new(SessionConfig::default(), SEED).expect("default config is valid")
    }

    fn place_apples(world: &mut World, positions: &[Position]) {
        let _ = world.apples.clear();
        for &position in positions {
            let id = world.allocate_apple();
            world.apples.insert(id, position);
        }
    }

    fn lay_snake(world: &mut World, positions: &[Position]) {
        let head = world.head_id;
        let mut segments = vec![(head, positions[0])];
        for &position in &positions[1..] {
            segments.push((world.allocate_segment(), position));
        }
        world.snake = SnakeBody::from_segments(segments);
    }

    fn tick(world: &mut World, now: f64, intent: Option<Direction>) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                now,
                intent,
                viewport: Viewport::Desktop,
            },
            &mut events,
        );
        events
    }

    fn far_apples() -> Vec<Position> {
        vec![
            Position::on_plane(3.0, 5.0),
            Position::on_plane(3.0, 5.5),
            Position::on_plane(-3.0, 5.5),
        ]
    }

    #[test]
    fn new_world_starts_playing_with_initial_layout() {
        let world = world();

        assert_eq!(query::phase(&world), Phase::Playing);
        assert_eq!(query::snake_len(&world), INITIAL_SEGMENTS);
        assert_eq!(query::apple_count(&world), 10);
        assert_eq!(query::message(&world), snake_core::WELCOME_KEYBOARD);
        let positions: Vec<Position> = query::snake(&world).iter().map(|s| s.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::on_plane(0.0, 0.0),
                Position::on_plane(0.0, 0.25),
                Position::on_plane(0.0, 0.5),
            ]
        );
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = SessionConfig {
            grid_size: 0.0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            World::new(config, SEED),
            Err(ConfigError::GridSize(_))
        ));
    }

    #[test]
    fn apple_pickup_grows_snake_and_speeds_up() {
        let mut world = world();
        let mut apples = far_apples();
        apples.push(Position::on_plane(0.0, -0.25));
        place_apples(&mut world, &apples);

        let events = tick(&mut world, STEP, None);

        assert_eq!(query::snake_len(&world), 4);
        assert_eq!(query::apple_count(&world), 3);
        assert!((query::step_interval(&world) - 0.33 * 0.85).abs() < 1e-12);
        assert_eq!(query::message(&world), APPLE_EATEN);
        let tail = query::snake(&world).iter().last().map(|s| s.position);
        assert_eq!(tail, Some(Position::on_plane(0.0, 0.5)));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::AppleRemoved { .. })));
        assert!(query::apples(&world)
            .iter()
            .all(|apple| apple.position != Position::on_plane(0.0, -0.25)));
    }

    #[test]
    fn last_apple_wins_without_removal() {
        let mut world = world();
        place_apples(&mut world, &[Position::on_plane(0.0, -0.25)]);

        let events = tick(&mut world, STEP, None);

        assert_eq!(query::phase(&world), Phase::GameOverMessage);
        assert_eq!(query::outcome(&world), Some(Outcome::Won));
        assert_eq!(query::message(&world), YOU_WON);
        assert_eq!(query::apple_count(&world), 1);
        assert_eq!(query::snake_len(&world), 4);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::AppleRemoved { .. })));
        assert!(events.contains(&Event::SessionEnded {
            outcome: Outcome::Won
        }));
    }

    #[test]
    fn turning_into_the_body_self_collides() {
        let mut world = world();
        place_apples(&mut world, &far_apples());
        lay_snake(
            &mut world,
            &[
                Position::on_plane(0.0, 0.0),
                Position::on_plane(0.0, 0.25),
                Position::on_plane(0.25, 0.25),
                Position::on_plane(0.25, 0.0),
                Position::on_plane(0.25, -0.25),
            ],
        );

        let _ = tick(&mut world, STEP, Some(Direction::Right));

        assert_eq!(query::phase(&world), Phase::GameOverMessage);
        assert_eq!(
            query::outcome(&world),
            Some(Outcome::Lost(DeathCause::SelfCollision))
        );
        assert_eq!(query::message(&world), SELF_COLLIDED);
    }

    #[test]
    fn collision_ends_step_before_apple_check() {
        let mut world = world();
        place_apples(
            &mut world,
            &[Position::on_plane(0.0, 0.0), Position::on_plane(0.0, 0.25)],
        );
        lay_snake(
            &mut world,
            &[
                Position::on_plane(0.25, 0.0),
                Position::on_plane(0.25, 0.25),
                Position::on_plane(0.0, 0.25),
                Position::on_plane(0.0, 0.0),
                Position::on_plane(0.0, -0.25),
            ],
        );

        let _ = tick(&mut world, STEP, Some(Direction::Left));

        assert_eq!(
            query::outcome(&world),
            Some(Outcome::Lost(DeathCause::SelfCollision))
        );
        assert_eq!(query::apple_count(&world), 2);
        assert_eq!(query::snake_len(&world), 5);
    }

    #[test]
    fn reset_restores_defaults_and_keeps_head_identity() {
        let mut world = world();
        let head_id = query::snake(&world).head().map(|s| s.id);
        let mut apples = far_apples();
        apples.push(Position::on_plane(0.0, -0.25));
        place_apples(&mut world, &apples);
        let _ = tick(&mut world, STEP, None);
        assert!(query::step_interval(&world) < 0.33);

        world.phase = Phase::Resetting;
        let events = tick(&mut world, 10.0, None);

        assert_eq!(query::phase(&world), Phase::Playing);
        assert_eq!(query::snake_len(&world), INITIAL_SEGMENTS);
        assert_eq!(query::apple_count(&world), 10);
        assert!((query::step_interval(&world) - 0.33).abs() < f64::EPSILON);
        assert!(!query::is_game_over(&world));
        assert_eq!(query::snake(&world).head().map(|s| s.id), head_id);
        let despawned = events
            .iter()
            .filter(|event| matches!(event, Event::SegmentDespawned { .. }))
            .count();
        assert_eq!(despawned, 3);
        let removed = events
            .iter()
            .filter(|event| matches!(event, Event::AppleRemoved { .. }))
            .count();
        assert_eq!(removed, 3);
    }

    #[test]
    fn start_command_uses_touch_welcome() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Start {
                now: 2.0,
                viewport: Viewport::Touch,
            },
            &mut events,
        );

        assert_eq!(query::message(&world), snake_core::WELCOME_TOUCH);
        assert_eq!(
            events.last(),
            Some(&Event::SessionStarted {
                viewport: Viewport::Touch
            })
        );
        let _ = tick(&mut world, 2.2, None);
        assert_eq!(query::snake(&world).head().map(|s| s.position), Some(Position::default()));
    }

    #[test]
    fn welcome_message_hides_after_stay_duration() {
        let mut world = world();
        place_apples(&mut world, &far_apples());

        let _ = tick(&mut world, 3.9, Some(Direction::Left));
        assert_eq!(query::message(&world), snake_core::WELCOME_KEYBOARD);

        let events = tick(&mut world, 4.1, None);
        assert_eq!(query::message(&world), "");
        assert!(events.contains(&Event::MessageChanged {
            text: String::new()
        }));
    }
}
