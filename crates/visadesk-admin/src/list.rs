//! Paginated list state shared by the list screens.

use tracing::{debug, warn};
use visadesk_client::prefs::PAGE_SIZE_OPTIONS;
use visadesk_client::{ListQuery, Page, PageSizeStore, PaginationMeta};

/// Identifies one load of a [`ListPage`].
///
/// A ticket is only honoured while it is the newest one; starting another
/// load, changing the query or unmounting the page makes it stale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a load ticket must be finished or failed"]
pub struct LoadTicket {
    generation: u64,
    query: ListQuery,
}

impl LoadTicket {
    /// The query to fetch.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// Items, pagination and search state of one list screen.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    key: String,
    items: Vec<T>,
    meta: Option<PaginationMeta>,
    query: ListQuery,
    generation: u64,
    loading: bool,
    store: Option<PageSizeStore>,
}

impl<T> ListPage<T> {
    /// Creates an empty list; `key` names its page-size preference.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            items: Vec::new(),
            meta: None,
            query: ListQuery::new(),
            generation: 0,
            loading: false,
            store: None,
        }
    }

    /// Reads and later persists the page size through `store`.
    #[must_use]
    pub fn with_store(mut self, store: PageSizeStore) -> Self {
        self.query.limit = store.get_or_default(&self.key);
        self.store = Some(store);
        self
    }

    /// Preference key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loaded items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Pagination metadata of the last load.
    pub fn meta(&self) -> Option<PaginationMeta> {
        self.meta
    }

    /// Current query.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Whether a load is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Total number of pages, at least 1.
    pub fn total_pages(&self) -> u32 {
        self.meta.map_or(1, |m| m.total_pages.max(1))
    }

    /// Starts a load of the current query.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Stores a loaded page; returns `false` when the ticket is stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, page: Page<T>) -> bool {
        if ticket.generation != self.generation {
            debug!(list = %self.key, "ignoring stale list response");
            return false;
        }
        self.loading = false;
        self.items = page.items;
        self.meta = page.meta;
        true
    }

    /// Ends a failed load, keeping the current items.
    pub fn fail_load(&mut self, ticket: LoadTicket) {
        if ticket.generation == self.generation {
            self.loading = false;
        }
    }

    /// Makes every outstanding ticket stale.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    fn query_changed(&mut self) {
        if self.loading {
            self.unmount();
        }
    }

    /// Goes to `page`, clamped to at least 1.
    pub fn set_page(&mut self, page: u32) {
        self.query.page = page.max(1);
        self.query_changed();
    }

    /// Changes the page size and returns to the first page.
    ///
    /// Sizes that are not offered are ignored. The preference is persisted
    /// when a store is attached; a failed write is logged and otherwise
    /// ignored.
    pub fn set_page_size(&mut self, size: u32) {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            debug!(list = %self.key, size, "ignoring unsupported page size");
            return;
        }
        self.query.limit = size;
        self.query.page = 1;
        self.query_changed();
        if let Some(store) = &self.store {
            if let Err(error) = store.set(&self.key, size) {
                warn!(list = %self.key, %error, "cannot persist page size");
            }
        }
    }

    /// Changes the search text and returns to the first page.
    pub fn set_search(&mut self, search: &str) {
        let search = search.trim();
        self.query.search = (!search.is_empty()).then(|| search.to_string());
        self.query.page = 1;
        self.query_changed();
    }

    /// Sets or clears a filter and returns to the first page.
    pub fn set_filter(&mut self, key: &str, value: Option<String>) {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => {
                self.query.filters.insert(key.to_string(), value);
            }
            None => {
                self.query.filters.remove(key);
            }
        }
        self.query.page = 1;
        self.query_changed();
    }

    /// Keeps only the loaded items for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: Vec<i64>) -> Page<i64> {
        Page { items, meta: None }
    }

    #[test]
    fn test_newer_load_wins() {
        let mut list = ListPage::new("attributes");
        let first = list.begin_load();
        let second = list.begin_load();

        assert!(list.finish_load(second, page(vec![2])));
        assert!(!list.finish_load(first, page(vec![1])));
        assert_eq!(list.items(), &[2]);
        assert!(!list.is_loading());
    }

    #[test]
    fn test_unmount_drops_outstanding_load() {
        let mut list = ListPage::new("countries");
        let ticket = list.begin_load();
        list.unmount();
        assert!(!list.finish_load(ticket, page(vec![1])));
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_query_change_drops_outstanding_load() {
        let mut list = ListPage::new("attributes");
        let ticket = list.begin_load();
        list.set_search("fee");
        assert!(!list.finish_load(ticket, page(vec![1])));
    }

    #[test]
    fn test_query_changes_reset_page() {
        let mut list: ListPage<i64> = ListPage::new("contact-requests");
        list.set_page(3);
        list.set_search("  omar ");
        assert_eq!(list.query().page, 1);
        assert_eq!(list.query().search.as_deref(), Some("omar"));

        list.set_page(2);
        list.set_filter("nationality", Some("Syrian".to_string()));
        assert_eq!(list.query().page, 1);
        list.set_filter("nationality", Some(String::new()));
        assert!(list.query().filters.is_empty());
    }

    #[test]
    fn test_page_size_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut list: ListPage<i64> =
            ListPage::new("attributes").with_store(PageSizeStore::new(&path));
        assert_eq!(list.query().limit, 10);
        list.set_page_size(50);
        list.set_page_size(7);
        assert_eq!(list.query().limit, 50);

        let reopened: ListPage<i64> =
            ListPage::new("attributes").with_store(PageSizeStore::new(&path));
        assert_eq!(reopened.query().limit, 50);
    }
}
