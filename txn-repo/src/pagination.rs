//! Splitting an ordered listing into fixed size, 1-based pages.

use crate::transaction_repo::PageOptions;

/// The position of one page within a listing of `total_records` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub offset: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            offset: self.offset,
            limit: self.per_page,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Computes the offset and page count for `page` of a listing.
///
/// `page` and `per_page` below 1 are clamped to 1 and a negative total is
/// treated as empty, so the offset is never negative and there is no division
/// by zero. Pages past the end are allowed and simply select nothing.
pub fn paginate(total_records: i64, page: i64, per_page: i64) -> Pagination {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_records = total_records.max(0);

    let offset = (page - 1).saturating_mul(per_page);
    let total_pages = if total_records == 0 {
        0
    } else {
        (total_records - 1) / per_page + 1
    };

    Pagination {
        page,
        per_page,
        offset,
        total_pages,
    }
}
