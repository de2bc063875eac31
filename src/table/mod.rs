//! Generic searchable, sortable, paginated table.
//!
//! Data flows one way: rows → [`filter`] → [`sort`] → [`paginate`] →
//! [`render`]. Every stage is a pure function of its input and the table's
//! UI state; [`DataTable`] owns that state and caches the derived order.

pub mod column;
pub mod filter;
pub mod paginate;
pub mod record;
pub mod render;
pub mod sort;
pub mod state;
pub mod value;

use thiserror::Error;

pub use column::{Column, Columns};
pub use paginate::{PageInfo, PageNav, DEFAULT_PAGE_SIZE};
pub use record::{FieldKind, FieldSpec, JsonRow, Record};
pub use render::{Badge, CellContent, HeaderCell, RenderedRow, RowKey, Tone, PLACEHOLDER};
pub use sort::{SortDirection, SortState};
pub use state::{DataTable, RenderedTable, TableView};
pub use value::Value;

/// Column set construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate column accessor '{0}'")]
    DuplicateAccessor(String),
    #[error("accessor '{0}' is not a field of this record type")]
    UnknownAccessor(String),
}
