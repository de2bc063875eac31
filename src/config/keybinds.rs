//! Keyboard shortcut definitions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard shortcut configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    // Global
    pub quit: KeyBind,
    pub help: KeyBind,
    pub refresh: KeyBind,
    pub logout: KeyBind,
    pub language: KeyBind,

    // Page navigation
    pub next_page_tab: KeyBind,
    pub prev_page_tab: KeyBind,

    // Table
    pub row_up: KeyBind,
    pub row_down: KeyBind,
    pub page_prev: KeyBind,
    pub page_next: KeyBind,
    pub page_first: KeyBind,
    pub page_last: KeyBind,
    pub search: KeyBind,
    pub clear_search: KeyBind,
    pub header_left: KeyBind,
    pub header_right: KeyBind,
    pub sort: KeyBind,

    // Row actions
    pub new_item: KeyBind,
    pub edit: KeyBind,
    pub open: KeyBind,
    pub delete: KeyBind,
    pub toggle_active: KeyBind,
    pub module_filter: KeyBind,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: KeyBind::new(KeyCode::Char('q'), KeyModifiers::NONE),
            help: KeyBind::new(KeyCode::Char('?'), KeyModifiers::NONE),
            refresh: KeyBind::new(KeyCode::Char('r'), KeyModifiers::NONE),
            logout: KeyBind::new(KeyCode::Char('L'), KeyModifiers::SHIFT),
            language: KeyBind::new(KeyCode::Char('g'), KeyModifiers::NONE),

            next_page_tab: KeyBind::new(KeyCode::Tab, KeyModifiers::NONE),
            prev_page_tab: KeyBind::new(KeyCode::BackTab, KeyModifiers::SHIFT),

            row_up: KeyBind::new(KeyCode::Up, KeyModifiers::NONE),
            row_down: KeyBind::new(KeyCode::Down, KeyModifiers::NONE),
            page_prev: KeyBind::new(KeyCode::PageUp, KeyModifiers::NONE),
            page_next: KeyBind::new(KeyCode::PageDown, KeyModifiers::NONE),
            page_first: KeyBind::new(KeyCode::Home, KeyModifiers::NONE),
            page_last: KeyBind::new(KeyCode::End, KeyModifiers::NONE),
            search: KeyBind::new(KeyCode::Char('/'), KeyModifiers::NONE),
            clear_search: KeyBind::new(KeyCode::Esc, KeyModifiers::NONE),
            header_left: KeyBind::new(KeyCode::Char('['), KeyModifiers::NONE),
            header_right: KeyBind::new(KeyCode::Char(']'), KeyModifiers::NONE),
            sort: KeyBind::new(KeyCode::Char('o'), KeyModifiers::NONE),

            new_item: KeyBind::new(KeyCode::Char('n'), KeyModifiers::NONE),
            edit: KeyBind::new(KeyCode::Char('e'), KeyModifiers::NONE),
            open: KeyBind::new(KeyCode::Enter, KeyModifiers::NONE),
            delete: KeyBind::new(KeyCode::Char('d'), KeyModifiers::NONE),
            toggle_active: KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE),
            module_filter: KeyBind::new(KeyCode::Char('m'), KeyModifiers::NONE),
        }
    }
}

/// A single key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }

    /// Shifted characters match whether or not the terminal reports SHIFT
    pub fn matches_event(&self, key: &KeyEvent) -> bool {
        if self.matches(key.code, key.modifiers) {
            return true;
        }
        matches!(self.code, KeyCode::Char(_))
            && self.code == key.code
            && key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
            && self.modifiers.difference(KeyModifiers::SHIFT).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_chars_match_with_or_without_shift() {
        let logout = KeyBindings::default().logout;
        assert!(logout.matches_event(&KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT)));
        assert!(logout.matches_event(&KeyEvent::new(KeyCode::Char('L'), KeyModifiers::NONE)));
        assert!(!logout.matches_event(&KeyEvent::new(KeyCode::Char('L'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn special_keys_need_exact_modifiers() {
        let next = KeyBindings::default().page_next;
        assert!(next.matches_event(&KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE)));
        assert!(!next.matches_event(&KeyEvent::new(KeyCode::PageDown, KeyModifiers::CONTROL)));
    }
}
