//! Roles page

use std::num::NonZeroUsize;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use tokio::sync::mpsc;

use crate::app::actions::Request;
use crate::app::state::{AppMessage, AppState, Notice};
use crate::config::KeyBindings;
use crate::i18n::Translator;
use crate::models::{Permission, Role};
use crate::permissions::Capabilities;
use crate::table::{CellContent, Column, Columns, TableError, Tone};
use crate::ui::dialogs::confirm::ConfirmDialog;
use crate::ui::dialogs::role_editor::{RoleEditorDialog, RoleEditorResult};
use crate::ui::theme::Theme;
use crate::ui::widgets::table::{PanelKey, TablePanel};
use crate::utils::truncate;

use super::send_request;

pub struct RolesTab {
    panel: TablePanel<Role>,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    caps: Capabilities,
    editor: Option<RoleEditorDialog>,
    confirm: Option<(ConfirmDialog, i64)>,
}

const DESCRIPTION_WIDTH: usize = 48;

fn columns(tr: &Translator, caps: Capabilities) -> Result<Columns<Role>, TableError> {
    let count_template = tr.t("roles.permissionCount").to_string();
    let yes = tr.t("common.yes").to_string();
    let no = tr.t("common.no").to_string();
    let manage = caps.can_manage_roles;

    Columns::from_columns(vec![
        Column::new("name", "roles.name"),
        Column::new("description", "roles.description").with_cell(|value, _| match value {
            Some(v) => CellContent::text(truncate(&v.to_string(), DESCRIPTION_WIDTH)),
            None => CellContent::Placeholder,
        }),
        Column::new("permissions", "roles.permissions").with_cell(move |_, role: &Role| {
            CellContent::text(count_template.replace("{count}", &role.permissions.len().to_string()))
        }),
        Column::new("systemRole", "roles.systemRole").with_cell(move |value, _| {
            if value.and_then(|v| v.as_bool()).unwrap_or(false) {
                CellContent::badge(&yes, Tone::Warning)
            } else {
                CellContent::badge(&no, Tone::Neutral)
            }
        }),
        Column::new("id", "common.actions")
            .unsortable()
            .with_cell(move |_, role: &Role| {
                if manage && role.is_editable() {
                    CellContent::text("e edit · d delete")
                } else {
                    CellContent::Placeholder
                }
            }),
    ])
}

impl RolesTab {
    pub fn new(page_size: NonZeroUsize, tr: &Translator, caps: Capabilities) -> Result<Self, TableError> {
        let panel = TablePanel::new(columns(tr, caps)?, page_size, tr.t("roles.search"))
            .with_title("roles.title");
        Ok(Self {
            panel,
            roles: Vec::new(),
            permissions: Vec::new(),
            caps,
            editor: None,
            confirm: None,
        })
    }

    pub fn refresh_columns(&mut self, tr: &Translator, caps: Capabilities) -> Result<(), TableError> {
        self.caps = caps;
        self.panel.set_columns(columns(tr, caps)?);
        self.panel.set_search_placeholder(tr.t("roles.search"));
        Ok(())
    }

    pub fn showing_dialog(&self) -> bool {
        self.editor.is_some() || self.confirm.is_some()
    }

    pub fn capturing_input(&self) -> bool {
        self.showing_dialog() || self.panel.is_searching()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    pub async fn update_roles(&mut self, state: &Arc<AppState>) {
        self.roles = state.roles.read().await.clone();
        self.panel.rows_changed();
    }

    pub async fn update_permissions(&mut self, state: &Arc<AppState>) {
        self.permissions = state.permissions.read().await.clone();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, tr: &Translator) {
        let actions = if self.caps.can_manage_roles {
            format!("n {}", tr.t("roles.addRole"))
        } else {
            String::new()
        };
        self.panel
            .render(frame, area, &self.roles, theme, tr, &actions, "/ search  [ ] o sort");

        if let Some(editor) = &self.editor {
            editor.render(frame, theme, tr);
        }
        if let Some((dialog, _)) = &self.confirm {
            dialog.render(frame, theme);
        }
    }

    pub async fn handle_key(
        &mut self,
        key: KeyEvent,
        state: &Arc<AppState>,
        state_tx: &mpsc::Sender<AppMessage>,
        keys: &KeyBindings,
        tr: &Translator,
    ) {
        if let Some(editor) = &mut self.editor {
            if let Some(result) = editor.handle_key(key) {
                match result {
                    RoleEditorResult::Create(request) => {
                        send_request(state_tx, Request::CreateRole(request)).await
                    }
                    RoleEditorResult::Update { id, request } => {
                        send_request(state_tx, Request::UpdateRole { id, request }).await
                    }
                    RoleEditorResult::Cancel => {}
                }
                self.editor = None;
            }
            return;
        }

        if let Some((dialog, id)) = &mut self.confirm {
            if dialog.handle_key(key) {
                if dialog.confirmed() {
                    send_request(state_tx, Request::DeleteRole(*id)).await;
                }
                self.confirm = None;
            }
            return;
        }

        if self.panel.handle_key(key, keys) == PanelKey::Handled || !self.caps.can_manage_roles {
            return;
        }

        if keys.new_item.matches_event(&key) {
            let company_id = state.company_id().await;
            self.editor = Some(RoleEditorDialog::new(&self.permissions, company_id));
        } else if keys.edit.matches_event(&key) || keys.open.matches_event(&key) {
            let Some(role) = self.panel.selected(&self.roles) else {
                return;
            };
            self.editor = RoleEditorDialog::edit(role, &self.permissions);
            if self.editor.is_none() && !role.is_editable() {
                state.post_notice(Notice::info("System roles cannot be edited")).await;
            }
        } else if keys.delete.matches_event(&key) {
            let Some(role) = self.panel.selected(&self.roles) else {
                return;
            };
            match (role.id, role.is_editable()) {
                (Some(id), true) => {
                    let message = tr.t_with("roles.deleteConfirm", &[("name", role.name.clone())]);
                    let dialog = ConfirmDialog::new(tr.t("common.actions"), &message)
                        .with_labels(tr.t("common.yes"), tr.t("common.no"))
                        .danger();
                    self.confirm = Some((dialog, id));
                }
                (_, false) => state.post_notice(Notice::info("System roles cannot be deleted")).await,
                (None, true) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DataTable;

    fn roles() -> Vec<Role> {
        vec![
            Role {
                id: Some(1),
                name: "ADMIN".into(),
                system_role: true,
                permissions: vec!["USER_VIEW".into(), "ROLE_VIEW".into()],
                ..Default::default()
            },
            Role {
                id: Some(2),
                name: "Support".into(),
                description: Some("Helpdesk".into()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn permission_count_and_system_flag() {
        let caps = Capabilities {
            can_manage_roles: true,
            ..Default::default()
        };
        let cols = columns(&Translator::default(), caps).unwrap();
        let rows = roles();
        let rendered = DataTable::default().render(&rows, &cols);

        assert_eq!(rendered.rows[0].cells[2], CellContent::text("2 permissions"));
        assert_eq!(rendered.rows[0].cells[3], CellContent::badge("Yes", Tone::Warning));
        assert_eq!(rendered.rows[0].cells[4], CellContent::Placeholder);
        assert_eq!(rendered.rows[1].cells[1], CellContent::text("Helpdesk"));
        assert_eq!(rendered.rows[1].cells[2], CellContent::text("0 permissions"));
        assert_eq!(rendered.rows[1].cells[3], CellContent::badge("No", Tone::Neutral));
        assert_eq!(rendered.rows[1].cells[4].plain(), "e edit · d delete");
    }

    #[test]
    fn viewers_get_no_actions() {
        let cols = columns(&Translator::default(), Capabilities::default()).unwrap();
        let rows = roles();
        let rendered = DataTable::default().render(&rows, &cols);
        assert_eq!(rendered.rows[1].cells[4], CellContent::Placeholder);
    }
}
