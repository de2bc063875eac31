//! Role editor dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::i18n::Translator;
use crate::models::{Permission, Role, RoleRequest};
use crate::ui::layout::DialogLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::form::{MultiSelect, TextInput};
use crate::utils::{FieldErrors, RoleForm};

use super::is_save;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFocus {
    Name,
    Description,
    Permissions,
}

impl RoleFocus {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Description => Self::Permissions,
            Self::Permissions => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Permissions,
            Self::Description => Self::Name,
            Self::Permissions => Self::Description,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoleEditorResult {
    Create(RoleRequest),
    Update { id: i64, request: RoleRequest },
    Cancel,
}

pub struct RoleEditorDialog {
    /// `None` while creating
    pub role_id: Option<i64>,
    pub focus: RoleFocus,
    pub editing_text: bool,
    name: TextInput,
    description: TextInput,
    permissions: MultiSelect,
    company_id: Option<i64>,
    pub errors: FieldErrors,
}

impl RoleEditorDialog {
    /// Permission options grouped by module, in catalogue order
    fn permission_options(permissions: &[Permission]) -> Vec<(i64, String)> {
        let mut options: Vec<(&str, i64, String)> = permissions
            .iter()
            .filter_map(|p| {
                p.id.map(|id| (p.module(), id, format!("{} / {} ({})", p.module(), p.name, p.code)))
            })
            .collect();
        options.sort_by(|a, b| a.0.cmp(b.0));
        options.into_iter().map(|(_, id, label)| (id, label)).collect()
    }

    pub fn new(permissions: &[Permission], company_id: Option<i64>) -> Self {
        Self::from_form(None, RoleForm::default(), permissions, company_id)
    }

    /// System roles and roles without an id cannot be edited
    pub fn edit(role: &Role, permissions: &[Permission]) -> Option<Self> {
        if !role.is_editable() {
            return None;
        }
        let id = role.id?;
        let form = RoleForm::from_role(role, |code| {
            permissions.iter().find(|p| p.code == code).and_then(|p| p.id)
        });
        Some(Self::from_form(Some(id), form, permissions, role.company_id))
    }

    fn from_form(role_id: Option<i64>, form: RoleForm, permissions: &[Permission], company_id: Option<i64>) -> Self {
        Self {
            role_id,
            focus: RoleFocus::Name,
            editing_text: false,
            name: TextInput::new().with_value(&form.name),
            description: TextInput::new().with_value(&form.description),
            permissions: MultiSelect::new(Self::permission_options(permissions), form.permission_ids),
            company_id,
            errors: FieldErrors::new(),
        }
    }

    pub fn form(&self) -> RoleForm {
        RoleForm {
            name: self.name.value().to_string(),
            description: self.description.value().to_string(),
            permission_ids: self.permissions.selected.clone(),
        }
    }

    fn submit(&mut self) -> Option<RoleEditorResult> {
        let form = self.form();
        self.errors = form.validate();
        if !self.errors.is_empty() {
            return None;
        }
        let request = form.to_request(self.company_id);
        Some(match self.role_id {
            Some(id) => RoleEditorResult::Update { id, request },
            None => RoleEditorResult::Create(request),
        })
    }

    fn focused_text(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            RoleFocus::Name => Some(&mut self.name),
            RoleFocus::Description => Some(&mut self.description),
            RoleFocus::Permissions => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<RoleEditorResult> {
        if is_save(&key) {
            self.editing_text = false;
            return self.submit();
        }

        if self.editing_text {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.editing_text = false,
                _ => {
                    if let Some(field) = self.focused_text() {
                        field.editor.handle_key(key);
                    }
                }
            }
            return None;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Esc => return Some(RoleEditorResult::Cancel),
            KeyCode::Up if self.focus == RoleFocus::Permissions => self.permissions.prev(),
            KeyCode::Down if self.focus == RoleFocus::Permissions => self.permissions.next(),
            KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::Enter | KeyCode::Char(' ') if self.focus == RoleFocus::Permissions => {
                self.permissions.toggle()
            }
            KeyCode::Enter => {
                if let Some(field) = self.focused_text() {
                    field.editor.move_end();
                    self.editing_text = true;
                }
            }
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme, tr: &Translator) {
        let dialog_area = DialogLayout::centered(frame.area(), 80, 26).dialog;
        frame.render_widget(Clear, dialog_area);

        let title = if self.role_id.is_some() {
            tr.t("roles.editRole")
        } else {
            tr.t("roles.addRole")
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
                Constraint::Length(1), // Name
                Constraint::Length(1), // Description
                Constraint::Length(1), // Permissions label
                Constraint::Min(4),    // Permission list
                Constraint::Length(2), // Hints
            ])
            .split(inner);

        let name_focused = self.focus == RoleFocus::Name;
        self.name.render(
            frame,
            chunks[0],
            tr.t("roles.name"),
            theme.normal(),
            name_focused,
            name_focused && self.editing_text,
            self.errors.get("name").map(|e| (e.as_str(), theme.error())),
        );
        let desc_focused = self.focus == RoleFocus::Description;
        self.description.render(
            frame,
            chunks[1],
            tr.t("roles.description"),
            theme.normal(),
            desc_focused,
            desc_focused && self.editing_text,
            None,
        );

        let count = tr.t_with(
            "roles.permissionCount",
            &[("count", self.permissions.selected.len().to_string())],
        );
        frame.render_widget(
            Paragraph::new(format!("{}: {}", tr.t("roles.permissions"), count)).style(theme.accent()),
            chunks[2],
        );
        self.permissions.render(
            frame,
            chunks[3],
            theme.normal(),
            self.focus == RoleFocus::Permissions,
        );

        let hints = if self.editing_text {
            "Enter/Esc=done editing  Ctrl+S=save"
        } else {
            "Tab=next field  Enter=edit  ↑↓=permission cursor  Space=toggle  Ctrl+S=save  Esc=cancel"
        };
        frame.render_widget(
            Paragraph::new(hints).style(theme.dim()).wrap(Wrap { trim: true }),
            chunks[4],
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

    fn catalogue() -> Vec<Permission> {
        vec![
            Permission {
                id: Some(10),
                code: "USER_VIEW".into(),
                name: "View users".into(),
                module_name: Some("Users".into()),
                ..Default::default()
            },
            Permission {
                id: Some(11),
                code: "AUDIT_VIEW".into(),
                name: "View audit".into(),
                ..Default::default()
            },
            Permission {
                id: Some(12),
                code: "ROLE_VIEW".into(),
                name: "View roles".into(),
                module_name: Some("Roles".into()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn options_are_grouped_by_module() {
        let options = RoleEditorDialog::permission_options(&catalogue());
        let ids: Vec<i64> = options.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
        assert!(options[0].1.starts_with("Other / "));
    }

    #[test]
    fn system_roles_are_not_editable() {
        let role = Role {
            id: Some(1),
            name: "ADMIN".into(),
            system_role: true,
            ..Default::default()
        };
        assert!(RoleEditorDialog::edit(&role, &catalogue()).is_none());
    }

    #[test]
    fn edit_maps_codes_to_ids_and_saves() {
        let role = Role {
            id: Some(3),
            company_id: Some(7),
            name: "Support".into(),
            permissions: vec!["ROLE_VIEW".into(), "GONE".into()],
            ..Default::default()
        };
        let mut dialog = RoleEditorDialog::edit(&role, &catalogue()).unwrap();
        assert_eq!(dialog.form().permission_ids, vec![12]);

        dialog.handle_key(key(KeyCode::Tab));
        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.focus, RoleFocus::Permissions);
        dialog.handle_key(key(KeyCode::Char(' ')));

        match dialog.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)) {
            Some(RoleEditorResult::Update { id, request }) => {
                assert_eq!(id, 3);
                assert_eq!(request.company_id, Some(7));
                assert_eq!(request.permission_ids, vec![12, 11]);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut dialog = RoleEditorDialog::new(&catalogue(), Some(7));
        let result = dialog.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(result, None);
        assert!(dialog.errors.contains_key("name"));
    }
}
