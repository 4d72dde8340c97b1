// ── Pagination metadata ──

use serde::Serialize;

/// What the backend said about the current page. Never computed locally:
/// next/prev availability comes from link presence alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page_size: i64,
    /// 1-based index of the first row shown; `None` on an empty page.
    pub range_start: Option<i64>,
    pub range_end: Option<i64>,
    pub total: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    /// "Showing X to Y of Z entries".
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} entries",
            self.range_start.unwrap_or(0),
            self.range_end.unwrap_or(0),
            self.total
        )
    }
}

/// One fetched page: rows plus the backend's pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_treats_null_bounds_as_zero() {
        assert_eq!(PageInfo::default().summary(), "Showing 0 to 0 of 0 entries");
        let info = PageInfo {
            page_size: 5,
            range_start: Some(6),
            range_end: Some(10),
            total: 23,
            has_next: true,
            has_prev: true,
        };
        assert_eq!(info.summary(), "Showing 6 to 10 of 23 entries");
    }
}
