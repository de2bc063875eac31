//! Confirmation dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::DialogLayout;
use crate::ui::theme::Theme;

pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub selected: bool, // true = confirm selected
    pub danger: bool,
    pub result: Option<bool>,
}

impl ConfirmDialog {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            confirm_label: "Yes".to_string(),
            cancel_label: "No".to_string(),
            selected: false,
            danger: false,
            result: None,
        }
    }

    pub fn with_labels(mut self, confirm: &str, cancel: &str) -> Self {
        self.confirm_label = confirm.to_string();
        self.cancel_label = cancel.to_string();
        self
    }

    /// Red border, for deletions
    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    /// Returns true once the dialog has an answer in `result`
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = !self.selected;
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.result = Some(true);
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.result = Some(false);
                return true;
            }
            KeyCode::Enter => {
                self.result = Some(self.selected);
                return true;
            }
            _ => {}
        }
        false
    }

    pub fn confirmed(&self) -> bool {
        self.result == Some(true)
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let dialog_area = DialogLayout::centered(area, 54, 9).dialog;

        frame.render_widget(Clear, dialog_area);

        let border = if self.danger { theme.error() } else { theme.border_focused() };
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(border);

        frame.render_widget(block.clone(), dialog_area);

        let inner = block.inner(dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(2),    // Message
                Constraint::Length(1), // Buttons
            ])
            .split(inner);

        let message = Paragraph::new(self.message.clone())
            .style(theme.normal())
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let button = |label: &str, on: bool| {
            let style = if on {
                theme.accent().add_modifier(Modifier::BOLD)
            } else {
                theme.dim()
            };
            Span::styled(format!("[ {} ]", label), style)
        };

        let buttons = Line::from(vec![
            Span::raw("  "),
            button(&self.confirm_label, self.selected),
            Span::raw("    "),
            button(&self.cancel_label, !self.selected),
        ]);
        frame.render_widget(Paragraph::new(buttons), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_defaults_to_cancel() {
        let mut dialog = ConfirmDialog::new("Logout", "Are you sure?");
        assert!(dialog.handle_key(key(KeyCode::Enter)));
        assert!(!dialog.confirmed());
    }

    #[test]
    fn switching_then_enter_confirms() {
        let mut dialog = ConfirmDialog::new("Delete", "Delete user 'bob'?").danger();
        assert!(!dialog.handle_key(key(KeyCode::Left)));
        assert!(dialog.handle_key(key(KeyCode::Enter)));
        assert!(dialog.confirmed());

        let mut dialog = ConfirmDialog::new("Delete", "?");
        assert!(dialog.handle_key(key(KeyCode::Char('y'))));
        assert!(dialog.confirmed());
    }
}
