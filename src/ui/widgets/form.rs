//! Form input widgets

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Single-line text buffer with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    cursor: usize,
}

impl LineEditor {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns false for keys it does not handle.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// Text field; the label is supplied at render time so it follows the language
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub editor: LineEditor,
    pub masked: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.editor = LineEditor::with_text(value);
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn value(&self) -> &str {
        self.editor.text()
    }

    fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.editor.text().chars().count())
        } else {
            self.editor.text().to_string()
        }
    }

    /// One line: `label: value`, with an optional error after the value
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        style: Style,
        focused: bool,
        editing: bool,
        error: Option<(&str, Style)>,
    ) {
        const LABEL_WIDTH: usize = 18;
        let field_style = if editing {
            style.add_modifier(Modifier::UNDERLINED)
        } else if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        };

        let mut spans = vec![
            Span::styled(format!("{:width$}", format!("{}:", label), width = LABEL_WIDTH), style),
            Span::styled(self.display(), field_style),
        ];
        if let Some((message, error_style)) = error {
            spans.push(Span::styled(format!("  {}", message), error_style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if editing {
            let x = area.x + LABEL_WIDTH as u16 + self.editor.cursor() as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        }
    }
}

/// Checkbox field
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkbox {
    pub checked: bool,
}

impl Checkbox {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, style: Style, focused: bool) {
        let display_style = if focused { style.add_modifier(Modifier::REVERSED) } else { style };
        let checkbox = if self.checked { "[x]" } else { "[ ]" };
        let text = format!("{} {}", checkbox, label);
        frame.render_widget(Paragraph::new(text).style(display_style), area);
    }
}

/// Pick any number of options, each identified by an id
#[derive(Debug, Clone, Default)]
pub struct MultiSelect {
    pub options: Vec<(i64, String)>,
    pub selected: Vec<i64>,
    pub cursor: usize,
}

impl MultiSelect {
    pub fn new(options: Vec<(i64, String)>, selected: Vec<i64>) -> Self {
        Self {
            options,
            selected,
            cursor: 0,
        }
    }

    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.cursor = (self.cursor + 1) % self.options.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.options.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.options.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Toggle the option under the cursor
    pub fn toggle(&mut self) {
        let Some(&(id, _)) = self.options.get(self.cursor) else {
            return;
        };
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    pub fn summary(&self) -> String {
        let names: Vec<&str> = self
            .options
            .iter()
            .filter(|(id, _)| self.is_selected(*id))
            .map(|(_, name)| name.as_str())
            .collect();
        if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        }
    }

    /// Option list with checkboxes, scrolled to keep the cursor visible
    pub fn render(&self, frame: &mut Frame, area: Rect, style: Style, focused: bool) {
        let height = area.height as usize;
        let start = if self.cursor >= height { self.cursor + 1 - height } else { 0 };
        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .map(|(i, (id, name))| {
                let mark = if self.is_selected(*id) { "[x]" } else { "[ ]" };
                let line_style = if focused && i == self.cursor {
                    style.add_modifier(Modifier::REVERSED)
                } else {
                    style
                };
                Line::from(Span::styled(format!("  {} {}", mark, name), line_style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}
