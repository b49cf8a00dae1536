//! Pagination parameters for list endpoints

/// Default page size when the caller does not set one
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Page/page-size parameters, serialized as query parameters.
#[derive(Debug, Clone, Default)]
pub struct PaginationParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl PaginationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Render as query parameters. Unset fields are omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            query.push(("page_size", size.to_string()));
        }
        query
    }
}

/// Render optional pagination as query parameters.
pub(crate) fn to_query(pagination: Option<&PaginationParams>) -> Vec<(&'static str, String)> {
    pagination.map(PaginationParams::to_query).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_yield_no_query() {
        assert!(PaginationParams::new().to_query().is_empty());
        assert!(to_query(None).is_empty());
    }

    #[test]
    fn test_set_fields_rendered() {
        let params = PaginationParams::new().page(2).page_size(25);
        let query = params.to_query();

        assert_eq!(
            query,
            vec![("page", "2".to_string()), ("page_size", "25".to_string())]
        );
    }
}
