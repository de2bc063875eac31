//! Screen layout management

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Standard application layout areas
pub struct AppLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub sidebar: Rect,
    pub content: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Create layout from terminal area
    pub fn new(area: Rect, sidebar_width: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
            .split(rows[2]);

        Self {
            header: rows[0],
            tabs: rows[1],
            sidebar: body[0],
            content: body[1],
            status: rows[3],
        }
    }
}

/// Toolbar (search bar with page actions to its right), table and pager footer
pub struct TableLayout {
    pub search: Rect,
    pub actions: Rect,
    pub table: Rect,
    pub footer: Rect,
}

impl TableLayout {
    /// `actions_width` of 0 leaves no actions slot; the toolbar collapses
    /// when there is neither a search bar nor actions.
    pub fn new(area: Rect, searchable: bool, actions_width: u16, footer_height: u16) -> Self {
        let toolbar = if searchable || actions_width > 0 { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(toolbar),
                Constraint::Min(3),
                Constraint::Length(footer_height),
            ])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(actions_width)])
            .split(chunks[0]);

        Self {
            search: top[0],
            actions: top[1],
            table: chunks[1],
            footer: chunks[2],
        }
    }
}

/// Dialog/popup centered layout
pub struct DialogLayout {
    pub dialog: Rect,
}

impl DialogLayout {
    /// Create centered dialog with fixed dimensions
    pub fn centered(area: Rect, width: u16, height: u16) -> Self {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;

        Self {
            dialog: Rect::new(x, y, width.min(area.width), height.min(area.height)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_dialog_fits_small_screens() {
        let area = Rect::new(0, 0, 40, 10);
        let dialog = DialogLayout::centered(area, 60, 20).dialog;
        assert_eq!(dialog, Rect::new(0, 0, 40, 10));

        let dialog = DialogLayout::centered(Rect::new(0, 0, 100, 40), 50, 10).dialog;
        assert_eq!((dialog.x, dialog.y), (25, 15));
    }

    #[test]
    fn search_row_collapses_when_not_searchable() {
        let layout = TableLayout::new(Rect::new(0, 0, 80, 20), false, 0, 1);
        assert_eq!(layout.search.height, 0);
        assert_eq!(layout.actions.width, 0);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.table.height, 19);
    }

    #[test]
    fn actions_sit_right_of_search() {
        let layout = TableLayout::new(Rect::new(0, 0, 80, 20), true, 20, 1);
        assert_eq!(layout.search, Rect::new(0, 0, 60, 3));
        assert_eq!(layout.actions, Rect::new(60, 0, 20, 3));
        assert_eq!(layout.table.y, 3);

        let layout = TableLayout::new(Rect::new(0, 0, 80, 20), false, 20, 1);
        assert_eq!(layout.actions.height, 3);
        assert_eq!(layout.table.height, 16);
    }
}
