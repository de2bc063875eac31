//! Status bar widget

use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Status bar item
pub struct StatusItem {
    pub label: String,
    pub value: String,
    pub style: Style,
}

impl StatusItem {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            style: Style::default(),
        }
    }

    /// Item without a label
    pub fn text(value: &str) -> Self {
        Self::new("", value)
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Build a status bar line from items; empty values are skipped
pub fn build_status_line(items: Vec<StatusItem>, separator: &str) -> Line<'static> {
    let mut spans = Vec::new();

    for item in items.into_iter().filter(|i| !i.value.is_empty()) {
        if !spans.is_empty() {
            spans.push(Span::raw(format!(" {} ", separator)));
        }

        if !item.label.is_empty() {
            spans.push(Span::raw(format!("{}: ", item.label)));
        }
        spans.push(Span::styled(item.value, item.style));
    }

    Line::from(spans)
}
