pub mod assignments;
pub mod conferences;
pub mod dashboard;
pub mod decisions;
pub mod files;
pub mod papers;
pub mod reviews;
pub mod submissions;
pub mod users;

use serde::Deserialize;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

/// Common `?page=&per_page=` query parameters for list pages.
#[derive(Debug, Deserialize, Default)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    pub fn limit_offset(&self) -> (i64, i64) {
        let per_page = self.per_page();
        (per_page, (self.page() - 1) * per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let p = Pagination::default();
        assert_eq!(p.limit_offset(), (20, 0));

        let p = Pagination { page: Some(3), per_page: Some(10) };
        assert_eq!(p.limit_offset(), (10, 20));

        let p = Pagination { page: Some(0), per_page: Some(1000) };
        assert_eq!(p.limit_offset(), (100, 0));
    }
}
