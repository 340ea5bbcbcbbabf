use std::cmp::Ordering;

use crate::errors::CoreError;
use crate::models::manager::FundManager;
use crate::models::table::{ManagerPage, ManagerRow, SortColumn, SortDirection, SortSpec};
use crate::services::format::{format_date, manager_url};

/// Shapes fund managers into the sortable, paginated listing table.
///
/// Every column sorts on its raw value, never on the displayed text:
/// "Active since" compares `created_at` timestamps, so `12/31/2020`
/// correctly sorts before `01/01/2021`.
pub struct ListingService {
    page_size: usize,
}

impl ListingService {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// One row per manager, in input order.
    #[must_use]
    pub fn build_rows(&self, managers: &[FundManager]) -> Vec<ManagerRow> {
        managers
            .iter()
            .map(|m| ManagerRow {
                address: m.id.clone(),
                active_since: format_date(m.created_at),
                created_at: m.created_at,
                fund_count: m.fund_count(),
                detail_url: manager_url(&m.id),
            })
            .collect()
    }

    /// Comparator for two rows under `sort`, keyed on the raw field.
    #[must_use]
    pub fn compare(a: &ManagerRow, b: &ManagerRow, sort: SortSpec) -> Ordering {
        let ordering = match sort.column {
            SortColumn::Address => a.address.cmp(&b.address),
            SortColumn::ActiveSince => a.created_at.cmp(&b.created_at),
            SortColumn::Funds => a.fund_count.cmp(&b.fund_count),
        };
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable sort: rows that compare equal keep their input order.
    pub fn sort_rows(&self, rows: &mut [ManagerRow], sort: SortSpec) {
        rows.sort_by(|a, b| Self::compare(a, b, sort));
    }

    /// Sort and cut out one zero-based page.
    ///
    /// A page past the end is empty rather than an error.
    pub fn manager_page(
        &self,
        managers: &[FundManager],
        sort: SortSpec,
        page: usize,
    ) -> Result<ManagerPage, CoreError> {
        if self.page_size == 0 {
            return Err(CoreError::ValidationError(
                "Page size must be greater than zero".into(),
            ));
        }

        let mut rows = self.build_rows(managers);
        self.sort_rows(&mut rows, sort);

        let total_rows = rows.len();
        let total_pages = total_rows.div_ceil(self.page_size);
        let rows: Vec<ManagerRow> = rows
            .into_iter()
            .skip(page.saturating_mul(self.page_size))
            .take(self.page_size)
            .collect();

        Ok(ManagerPage {
            rows,
            page,
            page_size: self.page_size,
            total_rows,
            total_pages,
            sort,
        })
    }
}

impl Default for ListingService {
    fn default() -> Self {
        Self::new(crate::models::table::DEFAULT_PAGE_SIZE)
    }
}
