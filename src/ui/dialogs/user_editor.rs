//! User editor dialog for creating and editing users

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::i18n::Translator;
use crate::models::{CreateUserRequest, Role, UpdateUserRequest, User};
use crate::ui::layout::DialogLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::form::{Checkbox, MultiSelect, TextInput};
use crate::utils::{FieldErrors, UserForm};

use super::is_save;

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

/// Which field is focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFocus {
    Username,
    Email,
    FirstName,
    LastName,
    Phone,
    Password,
    PasswordConfirm,
    Active,
    Roles,
}

impl UserFocus {
    const ORDER: [UserFocus; 9] = [
        Self::Username,
        Self::Email,
        Self::FirstName,
        Self::LastName,
        Self::Phone,
        Self::Password,
        Self::PasswordConfirm,
        Self::Active,
        Self::Roles,
    ];

    /// Username and passwords are fixed once a user exists
    fn available(self, mode: EditorMode) -> bool {
        match mode {
            EditorMode::Create => true,
            EditorMode::Edit(_) => !matches!(self, Self::Username | Self::Password | Self::PasswordConfirm),
        }
    }

    fn step(self, mode: EditorMode, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let mut idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        loop {
            idx = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
            let candidate = Self::ORDER[idx];
            if candidate.available(mode) {
                return candidate;
            }
        }
    }

    /// Key of this field in validation errors
    fn error_key(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phoneNumber",
            Self::Password => "password",
            Self::PasswordConfirm => "passwordConfirm",
            Self::Active => "active",
            Self::Roles => "roleIds",
        }
    }

    fn label_key(self) -> &'static str {
        match self {
            Self::Username => "users.username",
            Self::Email => "users.email",
            Self::FirstName => "users.firstName",
            Self::LastName => "users.lastName",
            Self::Phone => "users.phone",
            Self::Password => "users.password",
            Self::PasswordConfirm => "users.confirmPassword",
            Self::Active => "common.active",
            Self::Roles => "users.roles",
        }
    }
}

/// Result of user editor interaction
#[derive(Debug, Clone, PartialEq)]
pub enum UserEditorResult {
    Create(CreateUserRequest),
    Update { id: i64, request: UpdateUserRequest },
    Cancel,
}

/// User editor dialog
pub struct UserEditorDialog {
    pub mode: EditorMode,
    pub focus: UserFocus,
    pub editing_text: bool,

    username: TextInput,
    email: TextInput,
    first_name: TextInput,
    last_name: TextInput,
    phone: TextInput,
    password: TextInput,
    password_confirm: TextInput,
    active: Checkbox,
    roles: MultiSelect,

    company_id: Option<i64>,
    pub errors: FieldErrors,
}

impl UserEditorDialog {
    fn role_options(roles: &[Role]) -> Vec<(i64, String)> {
        roles
            .iter()
            .filter_map(|r| r.id.map(|id| (id, r.name.clone())))
            .collect()
    }

    /// Empty editor for a new user in `company_id`
    pub fn new(roles: &[Role], company_id: Option<i64>) -> Self {
        Self::from_form(EditorMode::Create, UserForm::new(), roles, company_id)
    }

    /// Editor pre-filled from an existing user
    pub fn edit(user: &User, roles: &[Role]) -> Option<Self> {
        let id = user.id?;
        let mut dialog = Self::from_form(EditorMode::Edit(id), UserForm::from_user(user), roles, user.company_id);
        dialog.focus = UserFocus::Email;
        Some(dialog)
    }

    fn from_form(mode: EditorMode, form: UserForm, roles: &[Role], company_id: Option<i64>) -> Self {
        Self {
            mode,
            focus: UserFocus::Username,
            editing_text: false,
            username: TextInput::new().with_value(&form.username),
            email: TextInput::new().with_value(&form.email),
            first_name: TextInput::new().with_value(&form.first_name),
            last_name: TextInput::new().with_value(&form.last_name),
            phone: TextInput::new().with_value(&form.phone_number),
            password: TextInput::new().masked(),
            password_confirm: TextInput::new().masked(),
            active: Checkbox::new(form.active),
            roles: MultiSelect::new(Self::role_options(roles), form.role_ids),
            company_id,
            errors: FieldErrors::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.mode == EditorMode::Create
    }

    /// Current field values
    pub fn form(&self) -> UserForm {
        UserForm {
            username: self.username.value().to_string(),
            email: self.email.value().to_string(),
            first_name: self.first_name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            phone_number: self.phone.value().to_string(),
            password: self.password.value().to_string(),
            password_confirm: self.password_confirm.value().to_string(),
            active: self.active.checked,
            role_ids: self.roles.selected.clone(),
        }
    }

    fn text_field(&self, focus: UserFocus) -> Option<&TextInput> {
        match focus {
            UserFocus::Username => Some(&self.username),
            UserFocus::Email => Some(&self.email),
            UserFocus::FirstName => Some(&self.first_name),
            UserFocus::LastName => Some(&self.last_name),
            UserFocus::Phone => Some(&self.phone),
            UserFocus::Password => Some(&self.password),
            UserFocus::PasswordConfirm => Some(&self.password_confirm),
            UserFocus::Active | UserFocus::Roles => None,
        }
    }

    fn text_field_mut(&mut self, focus: UserFocus) -> Option<&mut TextInput> {
        match focus {
            UserFocus::Username => Some(&mut self.username),
            UserFocus::Email => Some(&mut self.email),
            UserFocus::FirstName => Some(&mut self.first_name),
            UserFocus::LastName => Some(&mut self.last_name),
            UserFocus::Phone => Some(&mut self.phone),
            UserFocus::Password => Some(&mut self.password),
            UserFocus::PasswordConfirm => Some(&mut self.password_confirm),
            UserFocus::Active | UserFocus::Roles => None,
        }
    }

    /// Validate and build the request. Errors stay on the dialog.
    fn submit(&mut self) -> Option<UserEditorResult> {
        let form = self.form();
        self.errors = form.validate(self.is_new());
        if !self.errors.is_empty() {
            tracing::debug!(fields = ?self.errors.keys().collect::<Vec<_>>(), "user form rejected");
            return None;
        }
        Some(match self.mode {
            EditorMode::Create => UserEditorResult::Create(form.to_create(self.company_id)),
            EditorMode::Edit(id) => UserEditorResult::Update {
                id,
                request: form.to_update(),
            },
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserEditorResult> {
        if is_save(&key) {
            self.editing_text = false;
            return self.submit();
        }

        if self.editing_text {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.editing_text = false,
                _ => {
                    let focus = self.focus;
                    if let Some(field) = self.text_field_mut(focus) {
                        field.editor.handle_key(key);
                    }
                }
            }
            return None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.step(self.mode, true),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.step(self.mode, false),
            KeyCode::Esc => return Some(UserEditorResult::Cancel),
            KeyCode::Enter => match self.focus {
                UserFocus::Active => self.active.toggle(),
                UserFocus::Roles => self.roles.toggle(),
                focus => {
                    if let Some(field) = self.text_field_mut(focus) {
                        field.editor.move_end();
                        self.editing_text = true;
                    }
                }
            },
            KeyCode::Char(' ') => match self.focus {
                UserFocus::Active => self.active.toggle(),
                UserFocus::Roles => self.roles.toggle(),
                _ => {}
            },
            KeyCode::Left if self.focus == UserFocus::Roles => self.roles.prev(),
            KeyCode::Right if self.focus == UserFocus::Roles => self.roles.next(),
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme, tr: &Translator) {
        let dialog_area = DialogLayout::centered(frame.area(), 76, 24).dialog;
        frame.render_widget(Clear, dialog_area);

        let title = match self.mode {
            EditorMode::Create => tr.t("users.addUser"),
            EditorMode::Edit(_) => tr.t("users.editUser"),
        };
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(theme.border_focused())
            .style(theme.normal());
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(7), // Text fields
                Constraint::Length(1), // Active
                Constraint::Length(1), // Roles label
                Constraint::Min(3),    // Role list
                Constraint::Length(2), // Hints
            ])
            .split(inner);

        let text_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); 7])
            .split(chunks[0]);
        for (row, focus) in text_rows.iter().zip(&UserFocus::ORDER[..7]) {
            self.render_text(frame, *row, *focus, theme, tr);
        }

        self.active.render(
            frame,
            chunks[1],
            tr.t(UserFocus::Active.label_key()),
            theme.normal(),
            self.focus == UserFocus::Active,
        );

        let mut roles_label = format!("{}: {}", tr.t(UserFocus::Roles.label_key()), self.roles.summary());
        if let Some(err) = self.errors.get(UserFocus::Roles.error_key()) {
            roles_label = format!("{}  {}", roles_label, err);
        }
        let roles_style = if self.errors.contains_key(UserFocus::Roles.error_key()) {
            theme.error()
        } else {
            theme.normal()
        };
        frame.render_widget(Paragraph::new(roles_label).style(roles_style), chunks[2]);
        self.roles
            .render(frame, chunks[3], theme.normal(), self.focus == UserFocus::Roles);

        let hints = if self.editing_text {
            "Enter/Esc=done editing  ←→=move cursor  Ctrl+S=save"
        } else {
            "Tab/↑↓=navigate  Enter=edit  Space=toggle  ←→=role cursor  Ctrl+S=save  Esc=cancel"
        };
        frame.render_widget(
            Paragraph::new(hints).style(theme.dim()).wrap(Wrap { trim: true }),
            chunks[4],
        );
    }

    fn render_text(&self, frame: &mut Frame, area: Rect, focus: UserFocus, theme: &Theme, tr: &Translator) {
        let Some(field) = self.text_field(focus) else {
            return;
        };
        let enabled = focus.available(self.mode);
        let style = if enabled { theme.normal() } else { theme.dim() };
        let focused = self.focus == focus;
        let error = self
            .errors
            .get(focus.error_key())
            .map(|e| (e.as_str(), theme.error()));
        field.render(
            frame,
            area,
            tr.t(focus.label_key()),
            style,
            focused,
            focused && self.editing_text,
            error,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn save() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn roles() -> Vec<Role> {
        vec![
            Role {
                id: Some(1),
                name: "ADMIN".into(),
                ..Default::default()
            },
            Role {
                id: Some(2),
                name: "USER".into(),
                ..Default::default()
            },
        ]
    }

    fn type_into(dialog: &mut UserEditorDialog, text: &str) {
        dialog.handle_key(key(KeyCode::Enter));
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
        dialog.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn empty_create_form_reports_errors() {
        let mut dialog = UserEditorDialog::new(&roles(), Some(7));
        assert_eq!(dialog.handle_key(save()), None);
        for field in ["username", "email", "firstName", "lastName", "password", "roleIds"] {
            assert!(dialog.errors.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn filled_create_form_builds_request() {
        let mut dialog = UserEditorDialog::new(&roles(), Some(7));
        for (i, text) in ["jdoe", "jdoe@example.com", "Jane", "Doe", "", "password1", "password1"]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                dialog.handle_key(key(KeyCode::Tab));
            }
            if !text.is_empty() {
                type_into(&mut dialog, text);
            }
        }
        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.focus, UserFocus::Active);
        dialog.handle_key(key(KeyCode::Tab));
        dialog.handle_key(key(KeyCode::Right));
        dialog.handle_key(key(KeyCode::Char(' ')));

        match dialog.handle_key(save()) {
            Some(UserEditorResult::Create(request)) => {
                assert_eq!(request.company_id, Some(7));
                assert_eq!(request.username, "jdoe");
                assert_eq!(request.role_ids, vec![2]);
                assert!(request.active);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn edit_mode_skips_username_and_passwords() {
        let user = User {
            id: Some(5),
            company_id: Some(7),
            username: "jdoe".into(),
            email: Some("jdoe@example.com".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            active: true,
            role_ids: vec![1],
            ..Default::default()
        };
        let mut dialog = UserEditorDialog::edit(&user, &roles()).unwrap();
        assert_eq!(dialog.focus, UserFocus::Email);
        for _ in 0..4 {
            dialog.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(dialog.focus, UserFocus::Active);
        dialog.handle_key(key(KeyCode::Char(' ')));

        match dialog.handle_key(save()) {
            Some(UserEditorResult::Update { id, request }) => {
                assert_eq!(id, 5);
                assert_eq!(request.active, Some(false));
                assert_eq!(request.role_ids, Some(vec![1]));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn esc_cancels_unless_editing() {
        let mut dialog = UserEditorDialog::new(&roles(), None);
        dialog.handle_key(key(KeyCode::Enter));
        assert!(dialog.editing_text);
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), None);
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), Some(UserEditorResult::Cancel));
    }

    #[test]
    fn user_without_id_cannot_be_edited() {
        assert!(UserEditorDialog::edit(&User::default(), &roles()).is_none());
    }
}
