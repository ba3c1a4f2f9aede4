use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::calculator::{self, BillInputs, Breakdown};
use crate::config::{AppConfig, SliderRange};
use crate::theme::Theme;

/// How long a status message stays on the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Focusable controls, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Base,
    Tax,
    Tip,
    Split,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Base => Field::Tax,
            Field::Tax => Field::Tip,
            Field::Tip => Field::Split,
            Field::Split => Field::Base,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Base => Field::Split,
            Field::Tax => Field::Base,
            Field::Tip => Field::Tax,
            Field::Split => Field::Tip,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Field::Base | Field::Tax)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub field: Field,
    pub popup: Popup,

    // Raw text exactly as typed
    pub base_input: String,
    pub tax_input: String,

    // Slider positions
    pub tip_percent: f64,
    pub split_count: f64,

    pub tip_range: SliderRange,
    pub split_range: SliderRange,
    pub theme: Theme,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            field: Field::Base,
            popup: Popup::None,

            base_input: String::new(),
            tax_input: String::new(),

            tip_percent: config.tip.default as f64,
            split_count: config.split.default as f64,

            tip_range: config.tip,
            split_range: config.split,
            theme: Theme::from_config(&config.theme),

            status_message: None,
            status_message_time: None,
        }
    }

    /// Fresh amounts for the current inputs
    pub fn breakdown(&self) -> Breakdown {
        calculator::compute(&BillInputs {
            base_text: &self.base_input,
            tax_text: &self.tax_input,
            tip_percent: self.tip_percent,
            split_count: self.split_count,
        })
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Expire the status message once it has been visible long enough
    pub fn tick(&mut self) {
        if let Some(shown_at) = self.status_message_time {
            if shown_at.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Whether a plain `q` should quit rather than be typed
    pub fn accepts_quit(&self) -> bool {
        self.popup == Popup::None && !self.field.is_text()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        tracing::debug!(?key.code, field = ?self.field, "key");

        // Handle popups first
        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => self.reset(),
                KeyCode::Char('u') => {
                    if let Some(buffer) = self.text_buffer() {
                        buffer.clear();
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            KeyCode::F(1) => self.popup = Popup::Help,
            _ if self.field.is_text() => self.handle_text_key(key),
            _ => self.handle_slider_key(key),
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q') | KeyCode::F(1)
        ) {
            self.popup = Popup::None;
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let Some(buffer) = self.text_buffer() else {
            return;
        };

        match key.code {
            KeyCode::Char(c) if !c.is_control() => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => self.field = self.field.next(),
            _ => {}
        }
    }

    fn handle_slider_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => self.step_slider(-1.0),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.step_slider(1.0)
            }
            KeyCode::Home => {
                if let Some((value, range)) = self.slider() {
                    *value = range.min as f64;
                }
            }
            KeyCode::End => {
                if let Some((value, range)) = self.slider() {
                    *value = range.max as f64;
                }
            }
            KeyCode::Char('?') => self.popup = Popup::Help,
            _ => {}
        }
    }

    /// Move the focused slider by whole steps, staying within its range
    fn step_slider(&mut self, delta: f64) {
        if let Some((value, range)) = self.slider() {
            *value = range.clamp(value.floor() + delta);
        }
    }

    fn text_buffer(&mut self) -> Option<&mut String> {
        match self.field {
            Field::Base => Some(&mut self.base_input),
            Field::Tax => Some(&mut self.tax_input),
            _ => None,
        }
    }

    fn slider(&mut self) -> Option<(&mut f64, SliderRange)> {
        match self.field {
            Field::Tip => Some((&mut self.tip_percent, self.tip_range)),
            Field::Split => Some((&mut self.split_count, self.split_range)),
            _ => None,
        }
    }

    /// Back to configured defaults with empty fields
    pub fn reset(&mut self) {
        self.base_input.clear();
        self.tax_input.clear();
        self.tip_percent = self.tip_range.default as f64;
        self.split_count = self.split_range.default as f64;
        self.field = Field::Base;
        self.set_status("Inputs reset");
    }
}
