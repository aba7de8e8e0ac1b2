// src/models/data_table/mod.rs
//! Generic data table: column definitions, cell values, sorting and paging
//! specs. [`view::DataTable`] turns rows of any [`TableRow`] type into a
//! [`view::TableView`] the `partials/table.html` template renders.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::common::format_timestamp;

pub mod view;

pub use view::{DataTable, TableView};

/// A record the table can show. Implemented by every entity model.
pub trait TableRow {
    fn row_id(&self) -> &str;
    /// Value of the column with the given key; unknown keys yield `Empty`.
    fn cell(&self, key: &str) -> CellValue;
}

/// Typed cell content. Sorting uses the natural order of the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Flag(bool),
    Number(i64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { CellValue::Empty } else { CellValue::Text(s) }
    }

    pub fn timestamp(ts: Option<DateTime<Utc>>) -> Self {
        ts.map(CellValue::Timestamp).unwrap_or(CellValue::Empty)
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Flag(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::Timestamp(_) => 3,
            CellValue::Text(_) => 4,
        }
    }

    /// Strings lexicographically, numbers numerically, timestamps
    /// chronologically; empty cells sort first.
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Flag(a), CellValue::Flag(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => a.cmp(b),
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Flag(true) => "Yes".to_string(),
            CellValue::Flag(false) => "No".to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Timestamp(ts) => format_timestamp(ts),
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// How a column renders its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellFormat {
    #[default]
    Plain,
    /// Appends a unit, e.g. `3 days`.
    Suffix(&'static str),
    /// Coloured status pill; the CSS class is derived from the value.
    Badge,
}

/// Ordered column definition passed to the table view.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub format: CellFormat,
}

impl ColumnDef {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        ColumnDef { key, label, sortable: false, format: CellFormat::Plain }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }

    /// The "Created At" column every page leads with.
    pub fn created_at() -> Self {
        ColumnDef::new("createdAt", "Created At").sortable()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    pub column: String,
    pub dir: SortDir,
}

impl SortSpec {
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        SortSpec {
            column: sort.unwrap_or("").to_string(),
            dir: if dir == Some("desc") { SortDir::Desc } else { SortDir::Asc },
        }
    }
    pub fn is_set(&self) -> bool {
        !self.column.is_empty()
    }
    pub fn dir_str(&self) -> &'static str {
        match self.dir {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
    pub fn toggle_dir(&self) -> &'static str {
        match self.dir {
            SortDir::Asc => "desc",
            SortDir::Desc => "asc",
        }
    }
}

/// Who owns paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// Full collection fetched once, paged in memory.
    Client { page: u32, per_page: u32 },
    /// Controller fetched exactly one page; the table only renders it.
    Server { page: u32, limit: u32, total_pages: u32 },
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 20, 50];

/// Query parameters every table page accepts.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct TableQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl TableQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
    pub fn limit(&self) -> u32 {
        match self.limit {
            Some(l) if PAGE_SIZE_OPTIONS.contains(&l) => l,
            _ => DEFAULT_PAGE_SIZE,
        }
    }
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::from_params(self.sort.as_deref(), self.dir.as_deref())
    }
    pub fn client_paging(&self) -> Paging {
        Paging::Client { page: self.page(), per_page: self.limit() }
    }
}

/// Where the per-row Edit action leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// `{base}/{id}/edit`, the entity dialog.
    Dialog,
    /// `{base}/{id}`, a read-only or status-only detail view.
    Detail,
}

/// Per-row overflow menu. Delete is optional; pages without it render
/// edit-only rows.
#[derive(Debug, Clone)]
pub struct RowActions {
    pub base_path: String,
    pub edit: EditTarget,
    pub delete: bool,
}

impl RowActions {
    pub fn edit_and_delete(base_path: &str) -> Self {
        RowActions { base_path: base_path.to_string(), edit: EditTarget::Dialog, delete: true }
    }

    pub fn detail(base_path: &str, delete: bool) -> Self {
        RowActions { base_path: base_path.to_string(), edit: EditTarget::Detail, delete }
    }

    pub fn edit_url(&self, id: &str) -> String {
        match self.edit {
            EditTarget::Dialog => format!("{}/{id}/edit", self.base_path),
            EditTarget::Detail => format!("{}/{id}", self.base_path),
        }
    }

    pub fn delete_url(&self, id: &str) -> Option<String> {
        self.delete.then(|| format!("{}/{id}/delete", self.base_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sort_spec_from_params() {
        let s = SortSpec::from_params(Some("title"), Some("desc"));
        assert_eq!(s.column, "title");
        assert_eq!(s.dir, SortDir::Desc);
        assert_eq!(s.toggle_dir(), "asc");
    }

    #[test]
    fn sort_spec_defaults_when_none() {
        let s = SortSpec::from_params(None, None);
        assert!(!s.is_set());
        assert_eq!(s.dir, SortDir::Asc);
        assert_eq!(s.dir_str(), "asc");
        assert_eq!(s.toggle_dir(), "desc");
    }

    #[test]
    fn natural_order_per_variant() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(CellValue::Timestamp(early).natural_cmp(&CellValue::Timestamp(late)), Ordering::Less);
        assert_eq!(CellValue::Number(10).natural_cmp(&CellValue::Number(9)), Ordering::Greater);
        assert_eq!(CellValue::text("Ashram").natural_cmp(&CellValue::text("Ganga")), Ordering::Less);
        assert_eq!(CellValue::Empty.natural_cmp(&CellValue::text("a")), Ordering::Less);
    }

    #[test]
    fn empty_text_is_empty_cell() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::timestamp(None), CellValue::Empty);
    }

    #[test]
    fn table_query_clamps_page_and_limit() {
        let q = TableQuery { page: Some(0), limit: Some(7), ..Default::default() };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), DEFAULT_PAGE_SIZE);
        let q = TableQuery { page: Some(3), limit: Some(20), ..Default::default() };
        assert_eq!(q.client_paging(), Paging::Client { page: 3, per_page: 20 });
    }

    #[test]
    fn row_actions_without_delete_degrade_to_edit_only() {
        let actions = RowActions::detail("/queries", false);
        assert_eq!(actions.edit_url("q1"), "/queries/q1");
        assert_eq!(actions.delete_url("q1"), None);

        let actions = RowActions::edit_and_delete("/hotels");
        assert_eq!(actions.edit_url("h1"), "/hotels/h1/edit");
        assert_eq!(actions.delete_url("h1").as_deref(), Some("/hotels/h1/delete"));
    }
}
