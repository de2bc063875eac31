//! Single-column row sorting

use std::cmp::Ordering;

use super::column::Column;
use super::record::{resolve, Record};
use super::value::Value;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

/// Active sort key and direction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(key: &str, direction: SortDirection) -> Self {
        Self {
            key: Some(key.to_string()),
            direction,
        }
    }

    pub fn is_active(&self, accessor: &str) -> bool {
        self.key.as_deref() == Some(accessor)
    }

    /// Direction shown for `accessor`, `None` when it is not the sort key
    pub fn indicator(&self, accessor: &str) -> Option<SortDirection> {
        self.is_active(accessor).then_some(self.direction)
    }

    /// Apply a header click. Returns whether the state changed.
    ///
    /// A new key starts ascending, the active key flips direction, and a
    /// column that is not sortable leaves the state untouched.
    pub fn on_header_click<R>(&mut self, column: &Column<R>) -> bool {
        if !column.sortable {
            return false;
        }
        if self.is_active(&column.accessor) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(column.accessor.clone());
            self.direction = SortDirection::Ascending;
        }
        true
    }
}

/// Order two optional values; absent values rank last in either direction
fn compare_entries(a: &Option<Value>, b: &Option<Value>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => direction.apply(x.compare(y)),
    }
}

/// Reorder `indices` (positions into `rows`) by the sort state.
///
/// Stable: rows comparing equal keep their input order. With no sort key the
/// input is returned unchanged.
pub fn sort_rows<R: Record>(rows: &[R], indices: Vec<usize>, sort: &SortState) -> Vec<usize> {
    let Some(key) = sort.key.as_deref() else {
        return indices;
    };

    let mut keyed: Vec<(usize, Option<Value>)> = indices
        .into_iter()
        .map(|i| (i, rows.get(i).and_then(|row| resolve(row, key))))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_entries(a, b, sort.direction));
    keyed.into_iter().map(|(i, _)| i).collect()
}
