// Query-string parameters accepted by the list endpoints.

/// `per_page` value that asks the backend for every row in one page.
pub const PER_PAGE_ALL: i64 = -1;

/// Parameters for `GET /products` and `GET /providers`.
///
/// Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// Fetch every row unpaginated (`per_page=-1`).
    pub fn all() -> Self {
        Self {
            per_page: Some(PER_PAGE_ALL),
            ..Self::default()
        }
    }

    /// Render as `(key, value)` pairs in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(direction) = &self.direction {
            params.push(("direction", direction.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}
