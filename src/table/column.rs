//! Declarative column descriptors

use std::fmt;

use super::record::{schema_field, Record};
use super::render::CellContent;
use super::value::Value;
use super::TableError;

/// Custom cell renderer: receives the resolved value (if any) and the whole row
pub type CellFn<R> = Box<dyn Fn(Option<&Value>, &R) -> CellContent + Send + Sync>;

/// Describes one table column
pub struct Column<R> {
    pub accessor: String,
    pub header: String,
    pub sortable: bool,
    cell: Option<CellFn<R>>,
}

impl<R> Column<R> {
    pub fn new(accessor: &str, header: &str) -> Self {
        Self {
            accessor: accessor.to_string(),
            header: header.to_string(),
            sortable: true,
            cell: None,
        }
    }

    /// Opt this column out of sorting
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn with_cell<F>(mut self, cell: F) -> Self
    where
        F: Fn(Option<&Value>, &R) -> CellContent + Send + Sync + 'static,
    {
        self.cell = Some(Box::new(cell));
        self
    }

    pub fn cell(&self) -> Option<&CellFn<R>> {
        self.cell.as_ref()
    }

    pub fn has_custom_cell(&self) -> bool {
        self.cell.is_some()
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("accessor", &self.accessor)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("custom_cell", &self.cell.is_some())
            .finish()
    }
}

/// Ordered set of columns with unique accessors
pub struct Columns<R> {
    columns: Vec<Column<R>>,
}

impl<R: Record> Columns<R> {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Append a column, rejecting duplicate accessors and accessors the
    /// record schema does not declare
    pub fn push(&mut self, column: Column<R>) -> Result<(), TableError> {
        if self.get(&column.accessor).is_some() {
            return Err(TableError::DuplicateAccessor(column.accessor));
        }
        if !R::schema().is_empty() && schema_field::<R>(&column.accessor).is_none() {
            return Err(TableError::UnknownAccessor(column.accessor));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn with(mut self, column: Column<R>) -> Result<Self, TableError> {
        self.push(column)?;
        Ok(self)
    }

    pub fn from_columns(columns: Vec<Column<R>>) -> Result<Self, TableError> {
        columns.into_iter().try_fold(Self::new(), Self::with)
    }
}

impl<R> Columns<R> {
    pub fn get(&self, accessor: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.accessor == accessor)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<R>> {
        self.columns.iter()
    }

    pub fn as_slice(&self) -> &[Column<R>] {
        &self.columns
    }
}

impl<R: Record> Default for Columns<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R> IntoIterator for &'a Columns<R> {
    type Item = &'a Column<R>;
    type IntoIter = std::slice::Iter<'a, Column<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

impl<R> fmt::Debug for Columns<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::record::{FieldKind, FieldSpec, JsonRow};

    struct Person;

    impl Record for Person {
        fn schema() -> &'static [FieldSpec] {
            const FIELDS: &[FieldSpec] = &[
                FieldSpec::new("id", FieldKind::Integer),
                FieldSpec::new("name", FieldKind::Text),
            ];
            FIELDS
        }

        fn field(&self, _accessor: &str) -> Option<Value> {
            None
        }
    }

    #[test]
    fn columns_default_to_sortable() {
        let col: Column<JsonRow> = Column::new("name", "Name");
        assert!(col.sortable);
        assert!(!col.unsortable().sortable);
    }

    #[test]
    fn duplicate_accessor_is_rejected() {
        let result = Columns::<JsonRow>::new()
            .with(Column::new("name", "Name"))
            .and_then(|c| c.with(Column::new("name", "Again")));
        assert!(matches!(result, Err(TableError::DuplicateAccessor(a)) if a == "name"));
    }

    #[test]
    fn closed_schema_rejects_unknown_accessor() {
        let mut cols = Columns::<Person>::new();
        assert!(cols.push(Column::new("name", "Name")).is_ok());
        assert!(matches!(
            cols.push(Column::new("salary", "Salary")),
            Err(TableError::UnknownAccessor(_))
        ));
    }

    #[test]
    fn open_schema_accepts_any_accessor() {
        let cols = Columns::<JsonRow>::from_columns(vec![
            Column::new("anything", "A"),
            Column::new("else", "B"),
        ])
        .unwrap();
        assert_eq!(cols.len(), 2);
        let order: Vec<_> = cols.iter().map(|c| c.accessor.as_str()).collect();
        assert_eq!(order, ["anything", "else"]);
    }
}
