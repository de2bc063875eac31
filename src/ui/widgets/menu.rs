//! Sidebar navigation built from the visible menu tree

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::Translator;
use crate::menu::flatten_visible;
use crate::models::MenuItem;
use crate::session::Session;
use crate::ui::theme::Theme;

/// One sidebar line: indentation, icon and translated title
fn entry_line(depth: usize, item: &MenuItem, active: bool, theme: &Theme, tr: &Translator) -> Line<'static> {
    let marker = if item.is_leaf() { "•" } else { "▾" };
    let style = if active { theme.tab_active() } else { theme.normal() };
    Line::from(vec![
        Span::raw("  ".repeat(depth + 1)),
        Span::styled(format!("{} {}", marker, tr.t(&item.title)), style),
    ])
}

/// Render the menu as an indented list; `active_code` is highlighted
pub fn render_menu(
    frame: &mut Frame,
    area: Rect,
    items: &[MenuItem],
    session: Option<&Session>,
    active_code: Option<&str>,
    theme: &Theme,
    tr: &Translator,
) {
    if area.width == 0 {
        return;
    }
    let lines: Vec<Line> = flatten_visible(items, session)
        .into_iter()
        .map(|(depth, item)| entry_line(depth, item, active_code == Some(item.code.as_str()), theme, tr))
        .collect();

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.border());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
