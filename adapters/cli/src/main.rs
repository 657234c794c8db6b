#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless snake session.

mod script;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use simplelog::{Config as LogConfig, SimpleLogger};
use snake_core::{Command, Event, SessionConfig, Viewport};
use snake_system_input::Input;
use snake_world::{self as world, query, World};

use script::ScriptedPress;

/// Runs a snake session without rendering and reports what happened.
#[derive(Debug, Parser)]
#[command(name = "snake", version, about)]
struct Args {
    /// Seed for apple placement.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Simulated seconds to run.
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,
    /// Input mode the host pretends to have.
    #[arg(long, value_enum, default_value_t = ViewportArg::Desktop)]
    viewport: ViewportArg,
    /// TOML file overriding session parameters.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Timed presses, e.g. `0.5:left,1.2:down`.
    #[arg(long, default_value = "")]
    script: String,
    /// Print the final snapshot as JSON.
    #[arg(long)]
    json: bool,
    /// Log verbosity.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ViewportArg {
    Desktop,
    Touch,
}

impl From<ViewportArg> for Viewport {
    fn from(value: ViewportArg) -> Self {
        match value {
            ViewportArg::Desktop => Viewport::Desktop,
            ViewportArg::Touch => Viewport::Touch,
        }
    }
}

/// Entry point for the snake command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::init(args.log_level, LogConfig::default())
        .context("failed to install logger")?;

    let config = load_config(args.config.as_deref())?;
    let presses = script::parse(&args.script).context("failed to parse input script")?;
    let world = run(&args, config, presses)?;

    if args.json {
        let snapshot = serde_json::to_string_pretty(&query::snapshot(&world))
            .context("failed to encode snapshot")?;
        println!("{snapshot}");
    } else {
        println!(
            "phase: {:?}, length: {}, apples: {}, step interval: {:.4}s, message: {:?}",
            query::phase(&world),
            query::snake_len(&world),
            query::apple_count(&world),
            query::step_interval(&world),
            query::message(&world),
        );
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read session config at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse session config at {}", path.display()))
}

fn run(args: &Args, config: SessionConfig, presses: Vec<ScriptedPress>) -> Result<World> {
    let mut world = World::new(config, args.seed).context("invalid session configuration")?;
    debug!("session config: {:?}", query::config(&world));
    let viewport = Viewport::from(args.viewport);
    let frame = 1.0 / f64::from(args.fps.max(1));
    let frames = (args.seconds.max(0.0) / frame).ceil() as u64;

    let mut events = Vec::new();
    world::apply(&mut world, Command::Start { now: 0.0, viewport }, &mut events);
    report(&events);

    let mut input = Input::default();
    let mut presses = presses.into_iter().peekable();
    let mut releases = Vec::new();
    for index in 1..=frames {
        let now = index as f64 * frame;
        let mut raw = std::mem::take(&mut releases);
        while let Some(press) = presses.next_if(|press| press.at <= now) {
            raw.extend(press.press(viewport));
            releases.extend(press.release(viewport));
        }
        input.handle(&raw);

        let intent = input.intent(viewport, query::direction(&world));
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                now,
                intent,
                viewport,
            },
            &mut events,
        );
        report(&events);
    }

    Ok(world)
}

fn report(events: &[Event]) {
    for event in events {
        match event {
            Event::SessionStarted { .. } | Event::SessionEnded { .. } | Event::AppleEaten { .. } => {
                info!("{event:?}");
            }
            _ => debug!("{event:?}"),
        }
    }
}
