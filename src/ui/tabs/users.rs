//! Users page

use std::num::NonZeroUsize;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use tokio::sync::mpsc;

use crate::app::actions::Request;
use crate::app::state::{AppMessage, AppState};
use crate::config::KeyBindings;
use crate::i18n::Translator;
use crate::models::{Role, User};
use crate::permissions::Capabilities;
use crate::table::{Badge, CellContent, Column, Columns, TableError, Tone};
use crate::ui::dialogs::confirm::ConfirmDialog;
use crate::ui::dialogs::user_editor::{UserEditorDialog, UserEditorResult};
use crate::ui::theme::Theme;
use crate::ui::widgets::table::{PanelKey, TablePanel};

use super::send_request;

pub struct UsersTab {
    panel: TablePanel<User>,
    users: Vec<User>,
    roles: Vec<Role>,
    caps: Capabilities,

    editor: Option<UserEditorDialog>,
    // Pending delete: dialog and user id
    confirm: Option<(ConfirmDialog, i64)>,
}

/// Row actions the signed-in user may take, as key hints
fn action_hints(caps: Capabilities) -> String {
    let mut hints = Vec::new();
    if caps.can_edit_user {
        hints.push("e edit");
        hints.push("␣ on/off");
    }
    if caps.can_delete_user {
        hints.push("d delete");
    }
    hints.join(" · ")
}

fn columns(tr: &Translator, caps: Capabilities) -> Result<Columns<User>, TableError> {
    let active = tr.t("common.active").to_string();
    let inactive = tr.t("common.inactive").to_string();
    let actions = action_hints(caps);

    Columns::from_columns(vec![
        Column::new("username", "users.username"),
        Column::new("email", "users.email"),
        Column::new("firstName", "users.firstName"),
        Column::new("lastName", "users.lastName"),
        Column::new("roles", "users.roles").with_cell(|_, user: &User| {
            if user.roles.is_empty() {
                return CellContent::Placeholder;
            }
            CellContent::Badges(user.roles.iter().map(|r| Badge::new(r, Tone::Accent)).collect())
        }),
        Column::new("active", "users.status").with_cell(move |value, _| {
            if value.and_then(|v| v.as_bool()).unwrap_or(false) {
                CellContent::badge(&active, Tone::Success)
            } else {
                CellContent::badge(&inactive, Tone::Danger)
            }
        }),
        Column::new("id", "common.actions")
            .unsortable()
            .with_cell(move |_, _| CellContent::styled(actions.clone(), Tone::Neutral)),
    ])
}

impl UsersTab {
    pub fn new(page_size: NonZeroUsize, tr: &Translator, caps: Capabilities) -> Result<Self, TableError> {
        let panel = TablePanel::new(columns(tr, caps)?, page_size, tr.t("users.search"))
            .with_title("users.title");
        Ok(Self {
            panel,
            users: Vec::new(),
            roles: Vec::new(),
            caps,
            editor: None,
            confirm: None,
        })
    }

    /// Rebuild translated cells and action hints
    pub fn refresh_columns(&mut self, tr: &Translator, caps: Capabilities) -> Result<(), TableError> {
        self.caps = caps;
        self.panel.set_columns(columns(tr, caps)?);
        self.panel.set_search_placeholder(tr.t("users.search"));
        Ok(())
    }

    pub fn showing_dialog(&self) -> bool {
        self.editor.is_some() || self.confirm.is_some()
    }

    /// Keys go to the page, not to global shortcuts
    pub fn capturing_input(&self) -> bool {
        self.showing_dialog() || self.panel.is_searching()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub async fn update_users(&mut self, state: &Arc<AppState>) {
        self.users = state.users.read().await.clone();
        self.panel.rows_changed();
    }

    pub async fn update_roles(&mut self, state: &Arc<AppState>) {
        self.roles = state.roles.read().await.clone();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, tr: &Translator) {
        let actions = if self.caps.can_create_user {
            format!("n {}", tr.t("users.addUser"))
        } else {
            String::new()
        };
        self.panel
            .render(frame, area, &self.users, theme, tr, &actions, "/ search  [ ] o sort");

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
                    UserEditorResult::Create(request) => {
                        send_request(state_tx, Request::CreateUser(request)).await
                    }
                    UserEditorResult::Update { id, request } => {
                        send_request(state_tx, Request::UpdateUser { id, request }).await
                    }
                    UserEditorResult::Cancel => {}
                }
                self.editor = None;
            }
            return;
        }

        if let Some((dialog, id)) = &mut self.confirm {
            if dialog.handle_key(key) {
                if dialog.confirmed() {
                    send_request(state_tx, Request::DeleteUser(*id)).await;
                }
                self.confirm = None;
            }
            return;
        }

        if self.panel.handle_key(key, keys) == PanelKey::Handled {
            return;
        }

        if keys.new_item.matches_event(&key) && self.caps.can_create_user {
            let company_id = state.company_id().await;
            self.editor = Some(UserEditorDialog::new(&self.roles, company_id));
        } else if (keys.edit.matches_event(&key) || keys.open.matches_event(&key)) && self.caps.can_edit_user {
            if let Some(user) = self.panel.selected(&self.users) {
                self.editor = UserEditorDialog::edit(user, &self.roles);
            }
        } else if keys.toggle_active.matches_event(&key) && self.caps.can_edit_user {
            if let Some((id, active)) = self.panel.selected(&self.users).and_then(|u| Some((u.id?, u.active))) {
                send_request(state_tx, Request::SetUserActive { id, active: !active }).await;
            }
        } else if keys.delete.matches_event(&key) && self.caps.can_delete_user {
            if let Some(user) = self.panel.selected(&self.users) {
                if let Some(id) = user.id {
                    let message = tr.t_with("users.deleteConfirm", &[("name", user.username.clone())]);
                    let dialog = ConfirmDialog::new(tr.t("common.actions"), &message)
                        .with_labels(tr.t("common.yes"), tr.t("common.no"))
                        .danger();
                    self.confirm = Some((dialog, id));
                }
            }
        }
    }
}
