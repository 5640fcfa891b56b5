//! Turns a loaded sheet into the page of entries the dashboard renders:
//! recency sort, free-text search, status filter, then pagination.

use crate::domain::dates::contact_timestamp;
use crate::domain::entities::sheet::{Entry, Sheet};
use crate::domain::format::format_value;
use crate::domain::roles::ColumnRoles;
use crate::domain::status::{classify_record, Status};

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_BUTTONS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Attended,
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 3] =
        [StatusFilter::All, StatusFilter::Pending, StatusFilter::Attended];

    /// "all" and "atendido" are recognised; any other value filters pending.
    pub fn from_value(value: &str) -> Self {
        match value {
            "all" => StatusFilter::All,
            "atendido" => StatusFilter::Attended,
            _ => StatusFilter::Pending,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pendente",
            StatusFilter::Attended => "atendido",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "Todos os status",
            StatusFilter::Pending => "Pendente",
            StatusFilter::Attended => "Atendido",
        }
    }

    pub fn accepts(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Attended => status == Status::Attended,
            StatusFilter::Pending => status == Status::Pending,
        }
    }
}

/// Search, filter and paging controls. Changing the search term, the status
/// filter or the page size sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    search: String,
    status: StatusFilter,
    page: usize,
    page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ViewQuery {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || self.status != StatusFilter::All
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status = StatusFilter::All;
        self.page = 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayColumn {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub attended: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientView<'a> {
    pub columns: Vec<DisplayColumn>,
    pub filtered: Vec<Entry<'a>>,
    pub counts: StatusCounts,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<'a> PatientView<'a> {
    pub fn visible(&self) -> &[Entry<'a>] {
        page_slice(&self.filtered, self.page, self.page_size)
    }

    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages)
    }

    pub fn range_label(&self) -> String {
        format!(
            "Página {} de {} • {} de {} itens",
            self.page,
            self.total_pages,
            self.visible().len(),
            self.filtered.len()
        )
    }
}

/// The requested page is clamped to the pages that exist, so a reload that
/// shrinks the sheet lands on its last page instead of an empty one.
pub fn build_view<'a>(sheet: &'a Sheet, roles: &ColumnRoles, query: &ViewQuery) -> PatientView<'a> {
    let sorted = sort_by_recency(sheet.entries().collect(), roles.last_contact);
    let filtered = filter_entries(sorted, query.search(), query.status(), roles.status);
    let counts = count_statuses(&filtered, roles.status);
    let total_pages = total_pages(filtered.len(), query.page_size());

    PatientView {
        columns: display_columns(sheet.header(), roles),
        filtered,
        counts,
        page: query.page().min(total_pages),
        page_size: query.page_size(),
        total_pages,
    }
}

/// Stable, newest first. Entries without a usable date carry timestamp 0.
pub fn sort_by_recency<'a>(mut entries: Vec<Entry<'a>>, last_contact: Option<usize>) -> Vec<Entry<'a>> {
    entries.sort_by_cached_key(|entry| std::cmp::Reverse(contact_timestamp(entry.cell(last_contact))));
    entries
}

pub fn matches_search(record: &[String], search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    record
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

pub fn filter_entries<'a>(
    entries: Vec<Entry<'a>>,
    search: &str,
    status: StatusFilter,
    status_col: Option<usize>,
) -> Vec<Entry<'a>> {
    entries
        .into_iter()
        .filter(|entry| matches_search(entry.record, search))
        .filter(|entry| status.accepts(classify_record(entry.record, status_col)))
        .collect()
}

pub fn count_statuses(entries: &[Entry<'_>], status_col: Option<usize>) -> StatusCounts {
    let attended = entries
        .iter()
        .filter(|entry| classify_record(entry.record, status_col) == Status::Attended)
        .count();
    StatusCounts {
        total: entries.len(),
        pending: entries.len() - attended,
        attended,
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// `[(page-1)*size, page*size)` clipped to the items; out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let start = page.max(1).saturating_sub(1).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Up to five page numbers centred on the current page where possible.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let total = total.max(1);
    if total <= MAX_PAGE_BUTTONS {
        return (1..=total).collect();
    }
    let current = current.clamp(1, total);
    let first = if current <= 3 {
        1
    } else if current >= total - 2 {
        total - (MAX_PAGE_BUTTONS - 1)
    } else {
        current - 2
    };
    (first..first + MAX_PAGE_BUTTONS).collect()
}

/// First three headers that are neither status nor identifier, plus the
/// last-contact column when it did not make the cut.
pub fn display_columns(headers: &[String], roles: &ColumnRoles) -> Vec<DisplayColumn> {
    let mut columns: Vec<DisplayColumn> = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != roles.status && Some(*index) != roles.identifier)
        .take(3)
        .map(|(index, label)| DisplayColumn {
            index,
            label: label.clone(),
        })
        .collect();

    if let Some(last_contact) = roles.last_contact {
        let present = columns.iter().any(|column| column.index == last_contact);
        if !present {
            if let Some(label) = headers.get(last_contact) {
                columns.push(DisplayColumn {
                    index: last_contact,
                    label: label.clone(),
                });
            }
        }
    }

    columns
}

pub fn format_entry_cell(column: &DisplayColumn, entry: &Entry<'_>, roles: &ColumnRoles) -> String {
    format_value(
        &column.label,
        entry.cell(Some(column.index)),
        roles.last_contact == Some(column.index),
    )
}
