//! Message line shown to the player.

use snake_core::Event;

/// Text line with a stay duration. Every visible change is reported as an
/// [`Event::MessageChanged`].
#[derive(Clone, Debug)]
pub(crate) struct MessageBoard {
    text: String,
    shown_at: f64,
    stay: f64,
}

impl MessageBoard {
    pub(crate) fn new(stay: f64) -> Self {
        Self {
            text: String::new(),
            shown_at: 0.0,
            stay,
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Displays `text` and restarts the stay timer.
    pub(crate) fn show(&mut self, text: &str, now: f64, out_events: &mut Vec<Event>) {
        self.shown_at = now;
        self.set(text, out_events);
    }

    /// Replaces the text without restarting the stay timer.
    pub(crate) fn overwrite(&mut self, text: &str, out_events: &mut Vec<Event>) {
        if self.text != text {
            self.set(text, out_events);
        }
    }

    /// Hides the message once its stay duration has elapsed.
    pub(crate) fn expire(&mut self, now: f64, out_events: &mut Vec<Event>) {
        if now - self.shown_at > self.stay {
            self.hide(out_events);
        }
    }

    pub(crate) fn hide(&mut self, out_events: &mut Vec<Event>) {
        if !self.text.is_empty() {
            self.set("", out_events);
        }
    }

    fn set(&mut self, text: &str, out_events: &mut Vec<Event>) {
        self.text.clear();
        self.text.push_str(text);
        out_events.push(Event::MessageChanged {
            text: self.text.clone(),
        });
    }
}
