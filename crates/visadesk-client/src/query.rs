//! List query parameters.

use std::collections::BTreeMap;

use crate::prefs::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Parameters of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Current page number (1-indexed).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Sort column.
    pub sort: Option<String>,
    /// Search text.
    pub search: Option<String>,
    /// Extra filters (parameter -> value).
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            sort: None,
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    /// Creates a query for the first page with the default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page, clamped to at least 1.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the sort column.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Adds a filter.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Adds filters from `(key, value)` pairs.
    #[must_use]
    pub fn filters(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.filters.extend(pairs);
        self
    }

    /// Renders the query parameters, skipping empty and zero values.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if self.page > 0 {
            pairs.push(("page".to_string(), self.page.to_string()));
        }
        if self.limit > 0 {
            pairs.push(("limit".to_string(), self.limit.to_string()));
        }
        let optional = [("sort", &self.sort), ("search", &self.search)];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
        pairs.extend(
            self.filters
                .iter()
                .filter(|(_, v)| !v.trim().is_empty())
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            ListQuery::new().to_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_skips_empty_values() {
        let pairs = ListQuery::new()
            .page(0)
            .limit(0)
            .search("  ")
            .sort("order")
            .filter("nationality", "")
            .filter("destination_country", "Spain")
            .to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "1".to_string()),
                ("sort".to_string(), "order".to_string()),
                ("destination_country".to_string(), "Spain".to_string()),
            ]
        );
    }
}
