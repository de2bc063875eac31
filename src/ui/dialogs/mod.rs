pub mod confirm;
pub mod login;
pub mod role_editor;
pub mod user_editor;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Ctrl+S saves in every editor
pub(crate) fn is_save(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL)
}
