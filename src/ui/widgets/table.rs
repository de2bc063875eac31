//! Data table panel: search bar, sortable headers, rows and pager

use std::num::NonZeroUsize;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::config::KeyBindings;
use crate::i18n::Translator;
use crate::table::{
    CellContent, Columns, DataTable, HeaderCell, PageInfo, PageNav, Record, RenderedTable, RowKey,
    SortDirection,
};
use crate::ui::layout::TableLayout;
use crate::ui::theme::Theme;

use super::searchbar::SearchBar;

/// What a key press did to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    /// Key was not for the table
    Ignored,
    /// Cursor, search or page moved
    Handled,
}

/// A [`DataTable`] with its columns and the terminal-side cursor state.
///
/// Headers hold i18n keys and are translated when drawn.
pub struct TablePanel<R> {
    table: DataTable,
    columns: Columns<R>,
    search_bar: SearchBar,
    header_cursor: usize,
    state: TableState,
    last: Option<RenderedTable>,
}

impl<R: Record> TablePanel<R> {
    pub fn new(columns: Columns<R>, page_size: NonZeroUsize, search_placeholder: &str) -> Self {
        let mut state = TableState::default();
        state.select(Some(0));
        Self {
            table: DataTable::new(page_size).with_search(search_placeholder),
            columns,
            search_bar: SearchBar::new(search_placeholder),
            header_cursor: 0,
            state,
            last: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.table = self.table.with_title(title);
        self
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn columns(&self) -> &Columns<R> {
        &self.columns
    }

    /// Swap the column set, e.g. after a language or permission change
    pub fn set_columns(&mut self, columns: Columns<R>) {
        self.header_cursor = self.header_cursor.min(columns.len().saturating_sub(1));
        self.columns = columns;
    }

    pub fn set_search_placeholder(&mut self, placeholder: &str) {
        self.table.search_placeholder = placeholder.to_string();
        self.search_bar.placeholder = placeholder.to_string();
    }

    pub fn is_searching(&self) -> bool {
        self.search_bar.active
    }

    /// The row collection was replaced; drop the cached order
    pub fn rows_changed(&mut self) {
        self.table.rows_changed();
    }

    /// Key of the row under the cursor in the last drawn page
    pub fn selected_key(&self) -> Option<RowKey> {
        let idx = self.state.selected()?;
        self.last.as_ref()?.rows.get(idx).map(|r| r.key)
    }

    /// Row under the cursor on the current page of `rows`
    pub fn selected<'a>(&mut self, rows: &'a [R]) -> Option<&'a R> {
        let idx = self.state.selected()?;
        let view = self.table.view(rows, &self.columns);
        view.rows.get(idx).map(|(_, row)| *row)
    }

    /// Accessor of the header the sort cursor is on
    pub fn header_accessor(&self) -> Option<&str> {
        self.columns
            .iter()
            .nth(self.header_cursor)
            .map(|c| c.accessor.as_str())
    }

    /// Compute the current page without drawing it
    pub fn refresh(&mut self, rows: &[R]) -> &RenderedTable {
        let rendered = self.table.render(rows, &self.columns);
        let len = rendered.rows.len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
        self.last.insert(rendered)
    }

    fn move_row(&mut self, delta: i32) {
        let len = self.last.as_ref().map(|r| r.rows.len()).unwrap_or(0);
        if len == 0 {
            return;
        }
        let current = self.state.selected().unwrap_or(0) as i32;
        let next = (current + delta).clamp(0, len as i32 - 1);
        self.state.select(Some(next as usize));
    }

    fn navigate(&mut self, nav: PageNav) {
        if self.table.navigate(nav) {
            self.state.select(Some(0));
        }
    }

    fn sync_search(&mut self) {
        if self.table.set_search(self.search_bar.query()) {
            self.state.select(Some(0));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, keys: &KeyBindings) -> PanelKey {
        if self.search_bar.active {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.search_bar.deactivate(),
                _ => {
                    self.search_bar.editor.handle_key(key);
                    self.sync_search();
                }
            }
            return PanelKey::Handled;
        }

        if keys.search.matches_event(&key) {
            self.search_bar.activate();
        } else if keys.clear_search.matches_event(&key) {
            if self.search_bar.query().is_empty() {
                return PanelKey::Ignored;
            }
            self.search_bar.clear();
            self.sync_search();
        } else if keys.row_up.matches_event(&key) {
            self.move_row(-1);
        } else if keys.row_down.matches_event(&key) {
            self.move_row(1);
        } else if keys.page_prev.matches_event(&key) {
            self.navigate(PageNav::Prev);
        } else if keys.page_next.matches_event(&key) {
            self.navigate(PageNav::Next);
        } else if keys.page_first.matches_event(&key) {
            self.navigate(PageNav::First);
        } else if keys.page_last.matches_event(&key) {
            self.navigate(PageNav::Last);
        } else if keys.header_left.matches_event(&key) {
            self.header_cursor = self.header_cursor.saturating_sub(1);
        } else if keys.header_right.matches_event(&key) {
            if self.header_cursor + 1 < self.columns.len() {
                self.header_cursor += 1;
            }
        } else if keys.sort.matches_event(&key) {
            if let Some(accessor) = self.header_accessor().map(str::to_string) {
                self.table.set_sort(&self.columns, &accessor);
            }
        } else {
            return PanelKey::Ignored;
        }
        PanelKey::Handled
    }

    /// Draw the panel. `actions` is shown beside the search bar, `hint` in
    /// the footer after the pager.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        rows: &[R],
        theme: &Theme,
        tr: &Translator,
        actions: &str,
        hint: &str,
    ) {
        self.refresh(rows);
        let Some(rendered) = self.last.as_ref() else {
            return;
        };

        let actions_width = if actions.is_empty() {
            0
        } else {
            u16::try_from(Line::from(actions).width()).unwrap_or(u16::MAX).saturating_add(4)
        };
        let layout = TableLayout::new(area, self.table.searchable, actions_width, 1);
        if self.table.searchable {
            self.search_bar.render(
                frame,
                layout.search,
                theme.normal(),
                theme.border_focused(),
                theme.dim(),
            );
        }
        if actions_width > 0 {
            let actions = Paragraph::new(Span::styled(actions.to_string(), theme.accent()))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
            frame.render_widget(actions, layout.actions);
        }

        let header = Row::new(
            rendered
                .headers
                .iter()
                .enumerate()
                .map(|(i, h)| header_cell(h, i == self.header_cursor, theme, tr)),
        )
        .height(1);

        let body: Vec<Row> = rendered
            .rows
            .iter()
            .map(|r| Row::new(r.cells.iter().map(|c| content_cell(c, theme))))
            .collect();

        let widths = vec![Constraint::Fill(1); rendered.headers.len().max(1)];
        let title = match self.table.title.as_deref() {
            Some(key) => format!(" {} ({}) ", tr.t(key), rendered.page.total_rows),
            None => String::new(),
        };

        let table = Table::new(body, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(theme.border())
                    .title(Span::styled(title, theme.accent())),
            )
            .row_highlight_style(theme.selected())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(table, layout.table, &mut self.state);

        if rendered.is_empty() {
            // below the top border and the header row, across every column
            let body_area = Rect {
                y: layout.table.y.saturating_add(2),
                height: layout.table.height.saturating_sub(2).min(1),
                ..layout.table
            };
            let empty = Paragraph::new(Span::styled(tr.t("table.noData").to_string(), theme.dim()))
                .alignment(Alignment::Center);
            frame.render_widget(empty, body_area);
        }

        let footer = footer_line(&rendered.page, tr, hint, theme);
        frame.render_widget(Paragraph::new(footer), layout.footer);
    }
}

fn header_cell<'a>(header: &HeaderCell, cursor: bool, theme: &Theme, tr: &Translator) -> Cell<'a> {
    let indicator = match header.indicator {
        Some(SortDirection::Ascending) => " ▲",
        Some(SortDirection::Descending) => " ▼",
        None => "",
    };
    let mut style = theme.accent().add_modifier(Modifier::BOLD);
    if !header.sortable {
        style = theme.dim().add_modifier(Modifier::BOLD);
    }
    if cursor {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Cell::from(format!("{}{}", tr.t(&header.label), indicator)).style(style)
}

fn content_cell<'a>(content: &CellContent, theme: &Theme) -> Cell<'a> {
    match content {
        CellContent::Text(text) => Cell::from(text.clone()),
        CellContent::Styled { text, tone } => Cell::from(text.clone()).style(theme.tone(*tone)),
        CellContent::Badge(badge) => Cell::from(Line::from(badge_span(&badge.label, theme.tone(badge.tone)))),
        CellContent::Badges(badges) => {
            let mut spans = Vec::new();
            for (i, badge) in badges.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(badge_span(&badge.label, theme.tone(badge.tone)));
            }
            Cell::from(Line::from(spans))
        }
        CellContent::Placeholder => Cell::from(content.plain()).style(theme.dim()),
    }
}

fn badge_span(label: &str, style: Style) -> Span<'static> {
    Span::styled(format!("[{}]", label), style)
}

/// Pager footer: "Showing a to b of n entries" and page controls, only when
/// there is more than one page
fn footer_line(page: &PageInfo, tr: &Translator, hint: &str, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    if page.shows_pager() {
        spans.push(Span::styled(
            tr.t_with(
                "table.showing",
                &[
                    ("start", page.first_row().to_string()),
                    ("end", page.last_row().to_string()),
                    ("total", page.total_rows.to_string()),
                ],
            ),
            theme.normal(),
        ));
        let control = |nav: PageNav, label: &'static str| {
            let style = if nav.is_enabled(page) { theme.accent() } else { theme.dim() };
            Span::styled(label, style)
        };
        spans.push(Span::raw("  "));
        spans.push(control(PageNav::First, "«"));
        spans.push(Span::raw(" "));
        spans.push(control(PageNav::Prev, "‹"));
        spans.push(Span::styled(
            format!(
                " {} ",
                tr.t_with(
                    "table.page",
                    &[
                        ("page", page.page.to_string()),
                        ("total", page.total_pages.to_string()),
                    ],
                )
            ),
            theme.bright(),
        ));
        spans.push(control(PageNav::Next, "›"));
        spans.push(Span::raw(" "));
        spans.push(control(PageNav::Last, "»"));
        spans.push(Span::raw("   "));
    }
    if !hint.is_empty() {
        spans.push(Span::styled(hint.to_string(), theme.dim()));
    }
    Line::from(spans)
}
