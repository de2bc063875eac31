//! Sign-in screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::i18n::Translator;
use crate::ui::layout::DialogLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::form::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginFocus {
    Username,
    Password,
}

/// Credentials ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSubmit {
    pub username: String,
    pub password: String,
}

pub struct LoginForm {
    username: TextInput,
    password: TextInput,
    focus: LoginFocus,
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: TextInput::new(),
            password: TextInput::new().masked(),
            focus: LoginFocus::Username,
            error: None,
            submitting: false,
        }
    }

    /// Back to an empty form, keeping the last error
    pub fn reset(&mut self) {
        let error = self.error.take();
        *self = Self::new();
        self.error = error;
    }

    fn focused(&mut self) -> &mut TextInput {
        match self.focus {
            LoginFocus::Username => &mut self.username,
            LoginFocus::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginFocus::Username => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Username,
        };
    }

    /// Both fields are required; Enter on the username moves to the password
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<LoginSubmit> {
        if self.submitting {
            return None;
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.toggle_focus(),
            KeyCode::Enter => {
                if self.focus == LoginFocus::Username && self.password.value().is_empty() {
                    self.focus = LoginFocus::Password;
                    return None;
                }
                let username = self.username.value().trim().to_string();
                let password = self.password.value().to_string();
                if username.is_empty() || password.is_empty() {
                    self.error = Some("Username and password are required".to_string());
                    return None;
                }
                self.error = None;
                self.submitting = true;
                return Some(LoginSubmit { username, password });
            }
            _ => {
                self.focused().editor.handle_key(key);
            }
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme, tr: &Translator) {
        let dialog_area = DialogLayout::centered(frame.area(), 56, 11).dialog;
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} · {} ", tr.t("common.adminPanel"), tr.t("login.title")),
                theme.accent().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(theme.border_focused());
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Username
                Constraint::Length(1), // Password
                Constraint::Length(1),
                Constraint::Length(1), // Error / progress
                Constraint::Min(1),    // Hints
            ])
            .split(inner);

        let on_user = self.focus == LoginFocus::Username && !self.submitting;
        let on_pass = self.focus == LoginFocus::Password && !self.submitting;
        self.username
            .render(frame, chunks[0], tr.t("login.username"), theme.normal(), on_user, on_user, None);
        self.password
            .render(frame, chunks[1], tr.t("login.password"), theme.normal(), on_pass, on_pass, None);

        let status = if self.submitting {
            Line::from(Span::styled(tr.t("common.loading").to_string(), theme.dim()))
        } else if let Some(error) = &self.error {
            Line::from(Span::styled(error.clone(), theme.error()))
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(status), chunks[3]);

        let hint = format!("Tab=switch  Enter={}  Ctrl+C=quit", tr.t("login.submit"));
        frame.render_widget(Paragraph::new(hint).style(theme.dim()), chunks[4]);
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}
