//! Cell and header resolution

use super::column::{Column, Columns};
use super::record::{resolve, Record};
use super::sort::{SortDirection, SortState};

/// Shown for cells whose value is absent
pub const PLACEHOLDER: &str = "—";

/// Visual emphasis of a piece of cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Accent,
    Success,
    Warning,
    Danger,
}

/// A labelled chip inside a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: &str, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            tone,
        }
    }
}

/// What a cell displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    Styled { text: String, tone: Tone },
    Badge(Badge),
    Badges(Vec<Badge>),
    Placeholder,
}

impl CellContent {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn styled(s: impl Into<String>, tone: Tone) -> Self {
        Self::Styled {
            text: s.into(),
            tone,
        }
    }

    pub fn badge(label: &str, tone: Tone) -> Self {
        Self::Badge(Badge::new(label, tone))
    }

    /// Flattened plain text of the content
    pub fn plain(&self) -> String {
        match self {
            Self::Text(s) | Self::Styled { text: s, .. } => s.clone(),
            Self::Badge(b) => b.label.clone(),
            Self::Badges(badges) => badges
                .iter()
                .map(|b| b.label.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Self::Placeholder => PLACEHOLDER.to_string(),
        }
    }
}

/// Resolve what a (row, column) pair displays
pub fn render_cell<R: Record>(column: &Column<R>, row: &R) -> CellContent {
    let value = resolve(row, &column.accessor);
    if let Some(cell) = column.cell() {
        return cell(value.as_ref(), row);
    }
    match value {
        Some(v) => CellContent::Text(v.to_string()),
        None => CellContent::Placeholder,
    }
}

/// Header cell with its sort indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub accessor: String,
    pub label: String,
    pub sortable: bool,
    pub indicator: Option<SortDirection>,
}

pub fn header_cells<R>(columns: &Columns<R>, sort: &SortState) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|col| HeaderCell {
            accessor: col.accessor.clone(),
            label: col.header.clone(),
            sortable: col.sortable,
            indicator: sort.indicator(&col.accessor),
        })
        .collect()
}

/// Identity of a rendered row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(i64),
    Position(usize),
}

impl RowKey {
    pub fn for_row<R: Record>(row: &R, position: usize) -> Self {
        row.row_id().map(Self::Id).unwrap_or(Self::Position(position))
    }
}

/// A row with every cell resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub key: RowKey,
    pub cells: Vec<CellContent>,
}

pub fn render_row<R: Record>(columns: &Columns<R>, row: &R, position: usize) -> RenderedRow {
    RenderedRow {
        key: RowKey::for_row(row, position),
        cells: columns.iter().map(|col| render_cell(col, row)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::record::JsonRow;
    use serde_json::json;

    #[test]
    fn plain_values_and_placeholder() {
        let row = JsonRow::from(json!({"name": "Cora", "phone": null}));
        let name: Column<JsonRow> = Column::new("name", "Name");
        let phone: Column<JsonRow> = Column::new("phone", "Phone");
        let missing: Column<JsonRow> = Column::new("fax", "Fax");

        assert_eq!(render_cell(&name, &row), CellContent::text("Cora"));
        assert_eq!(render_cell(&phone, &row), CellContent::Placeholder);
        assert_eq!(render_cell(&missing, &row), CellContent::Placeholder);
    }

    #[test]
    fn custom_renderer_sees_value_and_row() {
        let row = JsonRow::from(json!({"id": 4, "active": false, "name": "Bob"}));
        let status = Column::new("active", "Status").with_cell(|value, row: &JsonRow| {
            let active = value.and_then(|v| v.as_bool()).unwrap_or(false);
            let who = row.field("name").map(|v| v.to_string()).unwrap_or_default();
            if active {
                CellContent::badge(&format!("{} active", who), Tone::Success)
            } else {
                CellContent::badge(&format!("{} inactive", who), Tone::Danger)
            }
        });
        assert_eq!(
            render_cell(&status, &row),
            CellContent::badge("Bob inactive", Tone::Danger)
        );
    }

    #[test]
    fn custom_renderer_runs_for_absent_values() {
        let row = JsonRow::from(json!({}));
        let module: Column<JsonRow> = Column::new("moduleName", "Module")
            .with_cell(|value, _| CellContent::text(value.map(|v| v.to_string()).unwrap_or_else(|| "Other".into())));
        assert_eq!(render_cell(&module, &row), CellContent::text("Other"));
    }

    #[test]
    fn header_indicator_tracks_sort() {
        let cols = Columns::<JsonRow>::from_columns(vec![
            Column::new("name", "Name"),
            Column::new("id", "Actions").unsortable(),
        ])
        .unwrap();
        let headers = header_cells(&cols, &SortState::by("name", SortDirection::Descending));
        assert_eq!(headers[0].indicator, Some(SortDirection::Descending));
        assert_eq!(headers[1].indicator, None);
        assert!(!headers[1].sortable);
    }

    #[test]
    fn row_key_prefers_id() {
        assert_eq!(RowKey::for_row(&JsonRow::from(json!({"id": 9})), 2), RowKey::Id(9));
        assert_eq!(RowKey::for_row(&JsonRow::from(json!({})), 2), RowKey::Position(2));
    }

    #[test]
    fn badges_flatten_to_plain_text() {
        let content = CellContent::Badges(vec![
            Badge::new("ADMIN", Tone::Accent),
            Badge::new("USER", Tone::Accent),
        ]);
        assert_eq!(content.plain(), "ADMIN USER");
    }
}
