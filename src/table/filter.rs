//! Free-text row filter

use super::column::Column;
use super::record::{resolve, Record};

/// Whether any column of `row` contains `needle` (already lowercased)
fn row_matches<R: Record>(row: &R, columns: &[Column<R>], needle: &str) -> bool {
    columns.iter().any(|col| {
        resolve(row, &col.accessor)
            .and_then(|v| v.search_text())
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

/// Indices of the rows matching `term` across every column, in source order.
///
/// An empty term selects every row.
pub fn filter_rows<R: Record>(rows: &[R], columns: &[Column<R>], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(*row, columns, &needle))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::Column;
    use crate::table::record::JsonRow;
    use proptest::prelude::*;
    use serde_json::json;

    fn rows() -> Vec<JsonRow> {
        vec![
            JsonRow::from(json!({"id": 1, "name": "Bob", "email": "bob@example.com"})),
            JsonRow::from(json!({"id": 2, "name": "ann", "email": null})),
            JsonRow::from(json!({"id": 3, "name": "Cora", "roles": ["ADMIN", "USER"]})),
        ]
    }

    fn columns() -> Vec<Column<JsonRow>> {
        vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("roles", "Roles").unsortable(),
        ]
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        assert_eq!(filter_rows(&rows(), &columns(), ""), vec![0, 1, 2]);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(filter_rows(&rows(), &columns(), "AN"), vec![1]);
        assert_eq!(filter_rows(&rows(), &columns(), "example.COM"), vec![0]);
    }

    #[test]
    fn unsortable_columns_are_still_searched() {
        assert_eq!(filter_rows(&rows(), &columns(), "admin"), vec![2]);
    }

    #[test]
    fn absent_value_does_not_block_other_columns() {
        // row 2 has a null email but still matches on name
        assert_eq!(filter_rows(&rows(), &columns(), "ann"), vec![1]);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_rows(&rows(), &columns(), "zzz").is_empty());
    }

    #[test]
    fn numbers_are_searched_as_text() {
        let cols = vec![Column::new("id", "ID")];
        assert_eq!(filter_rows(&rows(), &cols, "3"), vec![2]);
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(
            names in prop::collection::vec("[a-cA-C]{0,4}", 0..20),
            term in "[a-cA-C]{0,2}",
        ) {
            let data: Vec<JsonRow> = names
                .iter()
                .map(|n| JsonRow::from(json!({"name": n})))
                .collect();
            let cols = vec![Column::new("name", "Name")];

            let once: Vec<JsonRow> = filter_rows(&data, &cols, &term)
                .into_iter()
                .map(|i| data[i].clone())
                .collect();
            let twice = filter_rows(&once, &cols, &term);
            prop_assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
        }
    }
}
