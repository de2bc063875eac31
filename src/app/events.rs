//! Input event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::config::KeyBindings;

/// Application input events
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
}

/// Event handler for terminal input
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn next(&self) -> Option<AppEvent> {
        if event::poll(self.tick_rate).ok()? {
            match event::read().ok()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => Some(AppEvent::Key(key)),
                Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                _ => None,
            }
        } else {
            Some(AppEvent::Tick)
        }
    }
}

/// Ctrl+C always quits, even while typing
pub fn is_force_quit(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers == KeyModifiers::CONTROL
}

/// Tab bar movement (returns delta)
pub fn tab_delta(event: &KeyEvent, keys: &KeyBindings) -> Option<i32> {
    if keys.next_page_tab.matches_event(event) {
        Some(1)
    } else if keys.prev_page_tab.matches_event(event) || event.code == KeyCode::BackTab {
        Some(-1)
    } else {
        None
    }
}

/// Number keys jump straight to a page (1-9)
pub fn tab_number(event: &KeyEvent) -> Option<usize> {
    match event.code {
        KeyCode::Char(c @ '1'..='9') if event.modifiers.is_empty() => {
            c.to_digit(10).map(|d| d as usize - 1)
        }
        _ => None,
    }
}
