//! Timed input scripts such as `"0.5:left,1.2:down"`.

use log::warn;
use snake_core::{Direction, Viewport};
use snake_system_input::InputEvent;
use thiserror::Error;

const ENTRY_DELIMITER: char = ',';
const FIELD_DELIMITER: char = ':';
const SWIPE_LENGTH: f32 = 80.0;

/// A single direction press at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScriptedPress {
    /// Host clock reading in seconds at which the press happens.
    pub(crate) at: f64,
    /// Direction pressed or swiped.
    pub(crate) direction: Direction,
}

impl ScriptedPress {
    /// Raw events emitted on the frame the press happens.
    pub(crate) fn press(&self, viewport: Viewport) -> Vec<InputEvent> {
        match viewport {
            Viewport::Desktop => vec![InputEvent::KeyDown(self.direction)],
            Viewport::Touch => {
                let step = self.direction.step_vector() * SWIPE_LENGTH;
                vec![
                    InputEvent::TouchStart { x: 0.0, y: 0.0 },
                    InputEvent::TouchMove {
                        x: step.x,
                        y: step.z,
                    },
                    InputEvent::TouchEnd,
                ]
            }
        }
    }

    /// Raw events emitted on the following frame.
    pub(crate) fn release(&self, viewport: Viewport) -> Vec<InputEvent> {
        match viewport {
            Viewport::Desktop => vec![InputEvent::KeyUp(self.direction)],
            Viewport::Touch => Vec::new(),
        }
    }
}

/// Errors raised while parsing an input script.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum ScriptError {
    /// An entry did not contain the `time:direction` separator.
    #[error("script entry `{0}` is not of the form `seconds:direction`")]
    MissingSeparator(String),
    /// The time portion of an entry was not a non-negative number.
    #[error("script entry `{0}` has an invalid time")]
    InvalidTime(String),
}

/// Parses a comma-separated script, sorted by time.
///
/// Entries naming an unknown direction are skipped with a warning.
pub(crate) fn parse(script: &str) -> Result<Vec<ScriptedPress>, ScriptError> {
    let mut presses = Vec::new();
    for entry in script
        .split(ENTRY_DELIMITER)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
    {
        let (time, direction) = entry
            .split_once(FIELD_DELIMITER)
            .ok_or_else(|| ScriptError::MissingSeparator(entry.to_owned()))?;
        let at: f64 = time
            .trim()
            .parse()
            .map_err(|_| ScriptError::InvalidTime(entry.to_owned()))?;
        if !(at >= 0.0) || !at.is_finite() {
            return Err(ScriptError::InvalidTime(entry.to_owned()));
        }

        match direction.parse::<Direction>() {
            Ok(direction) => presses.push(ScriptedPress { at, direction }),
            Err(error) => warn!("skipping script entry `{entry}`: {error}"),
        }
    }

    presses.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(presses)
}
