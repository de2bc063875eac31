//! Search bar widget

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form::LineEditor;

/// Search bar state
pub struct SearchBar {
    pub editor: LineEditor,
    pub active: bool,
    pub placeholder: String,
}

impl SearchBar {
    pub fn new(placeholder: &str) -> Self {
        Self {
            editor: LineEditor::default(),
            active: false,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn query(&self) -> &str {
        self.editor.text()
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.editor.move_end();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.editor.clear();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, style: Style, focused_style: Style, dim: Style) {
        let border_style = if self.active { focused_style } else { style };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" / search  Esc clear ");

        let paragraph = if self.query().is_empty() && !self.active {
            Paragraph::new(self.placeholder.clone()).style(dim)
        } else {
            Paragraph::new(self.query().to_string()).style(style)
        };

        frame.render_widget(paragraph.block(block), area);

        if self.active {
            frame.set_cursor_position((area.x + 1 + self.editor.cursor() as u16, area.y + 1));
        }
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new("Search...")
    }
}
