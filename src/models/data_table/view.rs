// src/models/data_table/view.rs
use super::{CellFormat, ColumnDef, PAGE_SIZE_OPTIONS, Paging, RowActions, SortDir, SortSpec, TableRow};

pub struct HeaderView {
    pub label: String,
    /// Link that toggles sorting on this column; None for unsortable columns.
    pub sort_url: Option<String>,
    pub indicator: &'static str,
}

pub struct CellView {
    pub text: String,
    pub badge: Option<String>,
}

pub struct RowView {
    pub id: String,
    pub cells: Vec<CellView>,
    pub edit_url: String,
    pub delete_url: Option<String>,
}

pub struct LimitOption {
    pub value: u32,
    pub url: String,
    pub selected: bool,
}

pub struct PagerView {
    pub page: u32,
    pub total_pages: u32,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub limits: Vec<LimitOption>,
}

/// Everything `partials/table.html` needs.
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub pager: PagerView,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.id.as_str()).collect()
    }
}

pub struct DataTable {
    base_path: String,
    columns: Vec<ColumnDef>,
    actions: RowActions,
    sort: SortSpec,
    paging: Paging,
}

impl DataTable {
    pub fn new(base_path: &str, columns: Vec<ColumnDef>, actions: RowActions) -> Self {
        DataTable {
            base_path: base_path.to_string(),
            columns,
            actions,
            sort: SortSpec::default(),
            paging: Paging::Client { page: 1, per_page: super::DEFAULT_PAGE_SIZE },
        }
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn paging(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }

    /// Sort, page and format `rows`. In server mode `rows` is the page the
    /// API returned and is rendered whole.
    pub fn render<T: TableRow>(self, mut rows: Vec<T>) -> TableView {
        let sort = self.effective_sort();
        sort_rows(&mut rows, &sort);

        let (page, limit, total_pages, rows) = match self.paging {
            Paging::Client { page, per_page } => {
                let per_page = per_page.max(1);
                let total_pages = (rows.len() as u32).div_ceil(per_page).max(1);
                let page = page.clamp(1, total_pages);
                let start = ((page - 1) * per_page) as usize;
                let visible: Vec<T> = rows.into_iter().skip(start).take(per_page as usize).collect();
                (page, per_page, total_pages, visible)
            }
            Paging::Server { page, limit, total_pages } => {
                let total_pages = total_pages.max(1);
                (page.clamp(1, total_pages), limit, total_pages, rows)
            }
        };

        let headers = self.columns.iter().map(|col| self.header(col, &sort, limit)).collect();

        let rows = rows
            .iter()
            .map(|row| {
                let id = row.row_id().to_string();
                let cells = self.columns.iter().map(|col| format_cell(row, col)).collect();
                RowView {
                    edit_url: self.actions.edit_url(&id),
                    delete_url: self.actions.delete_url(&id),
                    id,
                    cells,
                }
            })
            .collect();

        let pager = PagerView {
            page,
            total_pages,
            prev_url: (page > 1).then(|| self.page_url(page - 1, limit, &sort)),
            next_url: (page < total_pages).then(|| self.page_url(page + 1, limit, &sort)),
            limits: PAGE_SIZE_OPTIONS
                .iter()
                .map(|&value| LimitOption {
                    value,
                    url: self.page_url(1, value, &sort),
                    selected: value == limit,
                })
                .collect(),
        };

        TableView { headers, rows, pager }
    }

    /// Sorting on an unknown or unsortable column is ignored.
    fn effective_sort(&self) -> SortSpec {
        if self.columns.iter().any(|c| c.sortable && c.key == self.sort.column) {
            self.sort.clone()
        } else {
            SortSpec::default()
        }
    }

    fn header(&self, col: &ColumnDef, sort: &SortSpec, limit: u32) -> HeaderView {
        let active = sort.column == col.key;
        let indicator = match (active, sort.dir) {
            (true, SortDir::Asc) => "▲",
            (true, SortDir::Desc) => "▼",
            (false, _) => "",
        };
        let sort_url = col.sortable.then(|| {
            let next = SortSpec {
                column: col.key.to_string(),
                dir: if active && sort.dir == SortDir::Asc { SortDir::Desc } else { SortDir::Asc },
            };
            self.page_url(1, limit, &next)
        });
        HeaderView { label: col.label.to_string(), sort_url, indicator }
    }

    fn page_url(&self, page: u32, limit: u32, sort: &SortSpec) -> String {
        let mut url = format!("{}?page={page}&limit={limit}", self.base_path);
        if sort.is_set() {
            url.push_str(&format!("&sort={}&dir={}", sort.column, sort.dir_str()));
        }
        url
    }
}

/// Stable ascending sort; descending is its exact reverse so toggling the
/// direction always inverts the row order.
fn sort_rows<T: TableRow>(rows: &mut [T], sort: &SortSpec) {
    if !sort.is_set() {
        return;
    }
    rows.sort_by(|a, b| a.cell(&sort.column).natural_cmp(&b.cell(&sort.column)));
    if sort.dir == SortDir::Desc {
        rows.reverse();
    }
}

fn format_cell<T: TableRow>(row: &T, col: &ColumnDef) -> CellView {
    let value = row.cell(col.key);
    let text = value.display();
    match col.format {
        CellFormat::Plain => CellView { text, badge: None },
        CellFormat::Suffix(unit) if !text.is_empty() => CellView { text: format!("{text} {unit}"), badge: None },
        CellFormat::Suffix(_) => CellView { text, badge: None },
        CellFormat::Badge => CellView {
            badge: Some(format!("badge-{}", text.to_lowercase())),
            text,
        },
    }
}
