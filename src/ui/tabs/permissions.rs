//! Permissions page

use std::num::NonZeroUsize;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::state::AppState;
use crate::config::KeyBindings;
use crate::i18n::Translator;
use crate::models::{permission, Permission};
use crate::table::{CellContent, Column, Columns, TableError, Tone};
use crate::ui::theme::Theme;
use crate::ui::widgets::table::{PanelKey, TablePanel};

fn columns() -> Result<Columns<Permission>, TableError> {
    Columns::from_columns(vec![
        Column::new("code", "permissions.code").with_cell(|value, _| match value {
            Some(v) => CellContent::styled(v.to_string(), Tone::Accent),
            None => CellContent::Placeholder,
        }),
        Column::new("name", "permissions.name"),
        Column::new("description", "permissions.description"),
        Column::new("moduleName", "permissions.module")
            .with_cell(|_, perm: &Permission| CellContent::text(perm.module())),
    ])
}

/// Per-module counts in first-seen module order
pub fn module_counts(permissions: &[Permission]) -> Vec<(String, usize)> {
    permission::modules(permissions)
        .into_iter()
        .map(|m| {
            let n = permissions.iter().filter(|p| p.module() == m).count();
            (m, n)
        })
        .collect()
}

pub struct PermissionsTab {
    panel: TablePanel<Permission>,
    all: Vec<Permission>,
    // Rows of the selected module
    shown: Vec<Permission>,
    modules: Vec<String>,
    /// `None` shows every module
    module: Option<usize>,
}

impl PermissionsTab {
    pub fn new(page_size: NonZeroUsize, tr: &Translator) -> Result<Self, TableError> {
        let panel = TablePanel::new(columns()?, page_size, tr.t("permissions.search"))
            .with_title("permissions.title");
        Ok(Self {
            panel,
            all: Vec::new(),
            shown: Vec::new(),
            modules: Vec::new(),
            module: None,
        })
    }

    pub fn refresh_labels(&mut self, tr: &Translator) {
        self.panel.set_search_placeholder(tr.t("permissions.search"));
    }

    pub fn capturing_input(&self) -> bool {
        self.panel.is_searching()
    }

    pub fn permission_count(&self) -> usize {
        self.all.len()
    }

    pub fn selected_module(&self) -> Option<&str> {
        self.module.and_then(|i| self.modules.get(i)).map(String::as_str)
    }

    pub async fn update_permissions(&mut self, state: &Arc<AppState>) {
        let all = state.permissions.read().await.clone();
        self.set_permissions(all);
    }

    fn set_permissions(&mut self, all: Vec<Permission>) {
        let previous = self.selected_module().map(str::to_string);
        self.modules = permission::modules(&all);
        self.all = all;
        self.module = previous.and_then(|m| self.modules.iter().position(|x| *x == m));
        self.apply_module();
    }

    fn apply_module(&mut self) {
        self.shown = match self.selected_module() {
            Some(module) => self.all.iter().filter(|p| p.module() == module).cloned().collect(),
            None => self.all.clone(),
        };
        self.panel.rows_changed();
    }

    /// all → each module in turn → all
    pub fn cycle_module(&mut self) {
        self.module = match self.module {
            None if !self.modules.is_empty() => Some(0),
            Some(i) if i + 1 < self.modules.len() => Some(i + 1),
            _ => None,
        };
        tracing::debug!(module = ?self.selected_module(), "permission module filter");
        self.apply_module();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, tr: &Translator) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(2)])
            .split(area);

        self.panel
            .render(frame, chunks[0], &self.shown, theme, tr, "", "/ search  [ ] o sort  m module");

        let module_label = self
            .selected_module()
            .map(str::to_string)
            .unwrap_or_else(|| tr.t("permissions.allModules").to_string());
        let filter = Line::from(vec![
            Span::styled(format!("{}: ", tr.t("permissions.module")), theme.dim()),
            Span::styled(module_label, theme.accent()),
        ]);

        let mut counts = Vec::new();
        for (i, (module, n)) in module_counts(&self.all).into_iter().enumerate() {
            if i > 0 {
                counts.push(Span::styled(" · ", theme.dim()));
            }
            let style = if self.selected_module() == Some(module.as_str()) {
                theme.highlight()
            } else {
                theme.normal()
            };
            counts.push(Span::styled(format!("{}: {}", module, n), style));
        }

        frame.render_widget(Paragraph::new(vec![filter, Line::from(counts)]), chunks[1]);
    }

    pub fn handle_key(&mut self, key: KeyEvent, keys: &KeyBindings) {
        if self.panel.handle_key(key, keys) == PanelKey::Handled {
            return;
        }
        if keys.module_filter.matches_event(&key) {
            self.cycle_module();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(id: i64, code: &str, module: Option<&str>) -> Permission {
        Permission {
            id: Some(id),
            code: code.into(),
            name: code.to_lowercase(),
            module_name: module.map(str::to_string),
            ..Default::default()
        }
    }

    fn catalogue() -> Vec<Permission> {
        vec![
            perm(1, "USER_VIEW", Some("Users")),
            perm(2, "ROLE_VIEW", Some("Roles")),
            perm(3, "USER_EDIT", Some("Users")),
            perm(4, "AUDIT_VIEW", None),
            perm(5, "APP_MANAGE", Some("")),
        ]
    }

    fn tab() -> PermissionsTab {
        PermissionsTab::new(NonZeroUsize::new(10).unwrap(), &Translator::default()).unwrap()
    }

    #[test]
    fn counts_group_missing_modules_as_other() {
        assert_eq!(
            module_counts(&catalogue()),
            vec![("Users".to_string(), 2), ("Roles".to_string(), 1), ("Other".to_string(), 2)]
        );
    }

    #[test]
    fn module_filter_cycles_back_to_all() {
        let mut tab = tab();
        tab.set_permissions(catalogue());
        assert_eq!(tab.shown.len(), 5);

        tab.cycle_module();
        assert_eq!(tab.selected_module(), Some("Users"));
        assert_eq!(tab.shown.len(), 2);
        tab.cycle_module();
        tab.cycle_module();
        assert_eq!(tab.selected_module(), Some("Other"));
        assert_eq!(tab.shown.len(), 2);
        tab.cycle_module();
        assert_eq!(tab.selected_module(), None);
        assert_eq!(tab.shown.len(), 5);
    }

    #[test]
    fn reload_keeps_module_when_it_still_exists() {
        let mut tab = tab();
        tab.set_permissions(catalogue());
        tab.cycle_module();
        tab.cycle_module();
        assert_eq!(tab.selected_module(), Some("Roles"));

        tab.set_permissions(vec![perm(9, "ROLE_MANAGE", Some("Roles"))]);
        assert_eq!(tab.selected_module(), Some("Roles"));
        tab.set_permissions(vec![perm(1, "USER_VIEW", Some("Users"))]);
        assert_eq!(tab.selected_module(), None);
    }

    #[test]
    fn module_column_falls_back_to_other() {
        let cols = columns().unwrap();
        let rows = catalogue();
        let rendered = crate::table::DataTable::default().render(&rows, &cols);
        assert_eq!(rendered.rows[3].cells[3], CellContent::text("Other"));
        assert_eq!(rendered.rows[0].cells[0], CellContent::styled("USER_VIEW", Tone::Accent));
    }
}
