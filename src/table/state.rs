//! Stateful data table: search, sort and page state over caller-owned rows

use std::num::NonZeroUsize;

use super::column::Columns;
use super::filter::filter_rows;
use super::paginate::{clamp_page, PageInfo, PageNav, DEFAULT_PAGE_SIZE};
use super::record::Record;
use super::render::{header_cells, render_row, HeaderCell, RenderedRow, RowKey};
use super::sort::{sort_rows, SortState};

/// Filtered and sorted positions, valid for one set of inputs
struct OrderCache {
    revision: u64,
    row_count: usize,
    search: String,
    sort: SortState,
    accessors: Vec<String>,
    order: Vec<usize>,
}

impl OrderCache {
    fn is_valid<R>(
        &self,
        revision: u64,
        row_count: usize,
        search: &str,
        sort: &SortState,
        columns: &Columns<R>,
    ) -> bool {
        self.revision == revision
            && self.row_count == row_count
            && self.search == search
            && &self.sort == sort
            && self.accessors.len() == columns.len()
            && self.accessors.iter().zip(columns).all(|(a, c)| *a == c.accessor)
    }
}

/// One page of rows borrowed from the caller's collection
#[derive(Debug)]
pub struct TableView<'a, R> {
    pub rows: Vec<(RowKey, &'a R)>,
    pub page: PageInfo,
    pub sort: SortState,
}

impl<R> TableView<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fully resolved page, ready for a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    pub page: PageInfo,
}

impl RenderedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Transient UI state of a table: search term, sort state and current page.
///
/// Rows and columns are supplied on every call and never modified; the
/// derived order is cached until the rows, column set, search term or sort
/// change.
pub struct DataTable {
    search: String,
    sort: SortState,
    page: usize,
    page_size: NonZeroUsize,
    revision: u64,
    matched: usize,
    cache: Option<OrderCache>,
    pipeline_runs: u64,

    pub title: Option<String>,
    pub searchable: bool,
    pub search_placeholder: String,
}

impl DataTable {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            search: String::new(),
            sort: SortState::default(),
            page: 1,
            page_size,
            revision: 0,
            matched: 0,
            cache: None,
            pipeline_runs: 0,
            title: None,
            searchable: false,
            search_placeholder: "Search...".to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_search(mut self, placeholder: &str) -> Self {
        self.searchable = true;
        self.search_placeholder = placeholder.to_string();
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// How many times the filter and sort stages have actually run
    pub fn pipeline_runs(&self) -> u64 {
        self.pipeline_runs
    }

    /// Signal that the caller replaced or mutated its row collection
    pub fn rows_changed(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Change the search term. A different term always returns to page 1.
    pub fn set_search(&mut self, term: &str) -> bool {
        if self.search == term {
            return false;
        }
        self.search = term.to_string();
        self.page = 1;
        true
    }

    pub fn clear_search(&mut self) -> bool {
        self.set_search("")
    }

    /// Header click on `accessor`. Unknown or unsortable columns are ignored.
    pub fn set_sort<R>(&mut self, columns: &Columns<R>, accessor: &str) -> bool {
        match columns.get(accessor) {
            Some(column) => self.sort.on_header_click(column),
            None => false,
        }
    }

    /// Page metadata for the most recently computed result set
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.matched, self.page_size, self.page)
    }

    /// Jump to page `n`, clamped into the valid range. Before the first
    /// `view` the row count is unknown, so the request is kept and clamped
    /// there.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = if self.cache.is_some() {
            clamp_page(page, self.matched, self.page_size)
        } else {
            page.max(1)
        };
        self.page
    }

    /// Follow a pager control; disabled controls do nothing
    pub fn navigate(&mut self, nav: PageNav) -> bool {
        match nav.target(&self.page_info()) {
            Some(page) => {
                self.page = page;
                true
            }
            None => false,
        }
    }

    fn ensure_order<R: Record>(&mut self, rows: &[R], columns: &Columns<R>) {
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|c| c.is_valid(self.revision, rows.len(), &self.search, &self.sort, columns));
        if fresh {
            return;
        }

        let filtered = filter_rows(rows, columns.as_slice(), &self.search);
        let order = sort_rows(rows, filtered, &self.sort);
        self.pipeline_runs += 1;
        tracing::trace!(
            rows = rows.len(),
            matched = order.len(),
            search = %self.search,
            "table order recomputed"
        );

        self.cache = Some(OrderCache {
            revision: self.revision,
            row_count: rows.len(),
            search: self.search.clone(),
            sort: self.sort.clone(),
            accessors: columns.iter().map(|c| c.accessor.clone()).collect(),
            order,
        });
    }

    /// Current page of `rows` after search, sort and pagination
    pub fn view<'a, R: Record>(&mut self, rows: &'a [R], columns: &Columns<R>) -> TableView<'a, R> {
        self.ensure_order(rows, columns);
        let order: &[usize] = self.cache.as_ref().map(|c| c.order.as_slice()).unwrap_or(&[]);

        self.matched = order.len();
        self.page = clamp_page(self.page, self.matched, self.page_size);
        let info = PageInfo::new(self.matched, self.page_size, self.page);
        let range = info.range();

        let page_rows = order[range.clone()]
            .iter()
            .zip(range)
            .filter_map(|(&idx, position)| {
                rows.get(idx).map(|row| (RowKey::for_row(row, position), row))
            })
            .collect();

        TableView {
            rows: page_rows,
            page: info,
            sort: self.sort.clone(),
        }
    }

    /// Current page with headers and cells resolved
    pub fn render<R: Record>(&mut self, rows: &[R], columns: &Columns<R>) -> RenderedTable {
        let view = self.view(rows, columns);
        let rendered = view
            .rows
            .iter()
            .map(|(key, row)| {
                let mut rendered = render_row(columns, *row, 0);
                rendered.key = *key;
                rendered
            })
            .collect();

        RenderedTable {
            headers: header_cells(columns, &view.sort),
            rows: rendered,
            page: view.page,
        }
    }
}

impl Default for DataTable {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::Column;
    use crate::table::record::JsonRow;
    use crate::table::render::CellContent;
    use crate::table::sort::SortDirection;
    use serde_json::json;

    fn columns() -> Columns<JsonRow> {
        Columns::from_columns(vec![
            Column::new("name", "Name"),
            Column::new("team", "Team"),
            Column::new("id", "Actions").unsortable(),
        ])
        .unwrap()
    }

    fn roster(n: usize) -> Vec<JsonRow> {
        (1..=n)
            .map(|i| {
                let team = if i % 2 == 0 { "even" } else { "odd" };
                JsonRow::from(json!({"id": i, "name": format!("user{:02}", i), "team": team}))
            })
            .collect()
    }

    fn ids(view: &TableView<'_, JsonRow>) -> Vec<RowKey> {
        view.rows.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn initial_state() {
        let table = DataTable::default();
        assert_eq!(table.search(), "");
        assert_eq!(table.sort(), &SortState::default());
        assert_eq!(table.page(), 1);
        assert_eq!(table.page_size().get(), 10);
    }

    #[test]
    fn twenty_five_rows_paginate_in_tens() {
        let rows = roster(25);
        let cols = columns();
        let mut table = DataTable::default();

        let view = table.view(&rows, &cols);
        assert_eq!(view.page.total_pages, 3);
        assert_eq!(view.rows.len(), 10);
        assert!(!PageNav::Prev.is_enabled(&view.page));

        assert!(table.navigate(PageNav::Last));
        let view = table.view(&rows, &cols);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(ids(&view).first(), Some(&RowKey::Id(21)));
        assert!(!PageNav::Next.is_enabled(&view.page));
        assert!(!table.navigate(PageNav::Next));
        assert_eq!(table.page(), 3);
    }

    #[test]
    fn search_resets_page_and_shrinks_result() {
        let rows = roster(25);
        let cols = columns();
        let mut table = DataTable::default();
        table.view(&rows, &cols);
        table.set_page(3);
        assert_eq!(table.page(), 3);

        assert!(table.set_search("user0"));
        assert_eq!(table.page(), 1);
        let view = table.view(&rows, &cols);
        assert_eq!(view.page.total_pages, 1);
        assert_eq!(view.rows.len(), 9);
    }

    #[test]
    fn same_search_term_keeps_page() {
        let rows = roster(25);
        let cols = columns();
        let mut table = DataTable::default();
        table.set_search("user");
        table.view(&rows, &cols);
        table.set_page(2);
        assert!(!table.set_search("user"));
        assert_eq!(table.page(), 2);
    }

    #[test]
    fn zero_matches_show_single_empty_page() {
        let rows = roster(25);
        let cols = columns();
        let mut table = DataTable::default();
        table.view(&rows, &cols);
        table.set_page(3);
        table.set_search("nobody");

        let rendered = table.render(&rows, &cols);
        assert!(rendered.is_empty());
        assert_eq!(rendered.page.total_pages, 1);
        assert_eq!(rendered.page.page, 1);
    }

    #[test]
    fn out_of_range_page_requests_clamp() {
        let rows = roster(25);
        let cols = columns();
        let mut table = DataTable::default();
        table.view(&rows, &cols);
        assert_eq!(table.set_page(42), 3);
        assert_eq!(table.set_page(0), 1);
    }

    #[test]
    fn shrinking_rows_clamps_stale_page() {
        let cols = columns();
        let mut table = DataTable::default();
        let many = roster(25);
        table.view(&many, &cols);
        table.set_page(3);

        let few = roster(4);
        table.rows_changed();
        let view = table.view(&few, &cols);
        assert_eq!(view.page.page, 1);
        assert_eq!(view.rows.len(), 4);
    }

    #[test]
    fn unsortable_header_leaves_order_alone() {
        let rows = roster(5);
        let cols = columns();
        let mut table = DataTable::default();
        table.set_sort(&cols, "name");
        table.set_sort(&cols, "name");
        let before = ids(&table.view(&rows, &cols));

        assert!(!table.set_sort(&cols, "id"));
        assert_eq!(table.sort(), &SortState::by("name", SortDirection::Descending));
        assert_eq!(ids(&table.view(&rows, &cols)), before);
        assert_eq!(before.first(), Some(&RowKey::Id(5)));
    }

    #[test]
    fn sort_keeps_current_page() {
        let rows = roster(25);
        let cols = columns();
        let mut table = DataTable::default();
        table.view(&rows, &cols);
        table.set_page(2);
        table.set_sort(&cols, "team");
        assert_eq!(table.view(&rows, &cols).page.page, 2);
    }

    #[test]
    fn paging_reuses_cached_order() {
        let rows = roster(25);
        let cols = columns();
        let mut table = DataTable::default();
        table.view(&rows, &cols);
        table.navigate(PageNav::Next);
        table.view(&rows, &cols);
        table.navigate(PageNav::Last);
        table.view(&rows, &cols);
        assert_eq!(table.pipeline_runs(), 1);

        table.set_search("odd");
        table.view(&rows, &cols);
        assert_eq!(table.pipeline_runs(), 2);

        table.rows_changed();
        table.view(&rows, &cols);
        assert_eq!(table.pipeline_runs(), 3);
    }

    #[test]
    fn changed_columns_rerun_search() {
        let rows = vec![
            JsonRow::from(json!({"id": 1, "name": "alice", "email": "zed@x.io"})),
            JsonRow::from(json!({"id": 2, "name": "bob", "email": "bob@x.io"})),
        ];
        let name_only = Columns::from_columns(vec![Column::new("name", "Name")]).unwrap();
        let with_email = Columns::from_columns(vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
        ])
        .unwrap();
        let mut table = DataTable::default();
        table.set_search("zed");

        assert!(table.view(&rows, &name_only).is_empty());
        let view = table.view(&rows, &with_email);
        assert_eq!(ids(&view), vec![RowKey::Id(1)]);
        assert_eq!(table.pipeline_runs(), 2);

        table.view(&rows, &with_email);
        assert_eq!(table.pipeline_runs(), 2);
    }

    #[test]
    fn page_requested_before_first_view_survives() {
        let rows = roster(25);
        let cols = columns();
        let mut table = DataTable::default();
        assert_eq!(table.set_page(3), 3);
        let view = table.view(&rows, &cols);
        assert_eq!(view.page.page, 3);
        assert_eq!(ids(&view).first(), Some(&RowKey::Id(21)));

        let mut table = DataTable::default();
        table.set_page(9);
        assert_eq!(table.view(&rows, &cols).page.page, 3);
    }

    #[test]
    fn source_rows_are_not_mutated() {
        let rows = roster(6);
        let snapshot = rows.clone();
        let cols = columns();
        let mut table = DataTable::default();
        table.set_sort(&cols, "name");
        table.set_sort(&cols, "name");
        table.set_search("user");
        table.render(&rows, &cols);
        assert_eq!(rows, snapshot);
    }

    #[test]
    fn rendered_rows_carry_keys_and_cells() {
        let rows = vec![
            JsonRow::from(json!({"name": "no id", "team": null})),
            JsonRow::from(json!({"id": 8, "name": "eight", "team": "odd"})),
        ];
        let cols = columns();
        let mut table = DataTable::default();
        let rendered = table.render(&rows, &cols);
        assert_eq!(rendered.rows[0].key, RowKey::Position(0));
        assert_eq!(rendered.rows[0].cells[1], CellContent::Placeholder);
        assert_eq!(rendered.rows[1].key, RowKey::Id(8));
        assert_eq!(rendered.headers.len(), 3);
    }
}
