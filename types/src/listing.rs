//! Paginated list state shared by every entity view.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{Error, Result};

pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The `{success, data?, error?}` wrapper every endpoint answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    fn failure(self) -> Error {
        let message = self
            .error
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "request failed".to_string());
        Error::Api(message)
    }

    pub fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(self.failure());
        }
        self.data
            .ok_or_else(|| Error::Decode("successful response carried no data".into()))
    }

    /// For mutations whose `data` is irrelevant.
    pub fn into_ack(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(self.failure())
        }
    }
}

/// List bodies come in two shapes; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paginated {
        items: Vec<T>,
        pagination: Pagination,
    },
    Legacy {
        items: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> From<ListPayload<T>> for Page<T> {
    fn from(payload: ListPayload<T>) -> Self {
        match payload {
            ListPayload::Paginated { items, pagination } => Page {
                items,
                total_count: pagination.total_items,
            },
            ListPayload::Legacy { items, total } => {
                let total_count = total.unwrap_or(items.len() as u64);
                Page { items, total_count }
            }
        }
    }
}

/// Everything a list request depends on. Any change triggers a refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page_index: usize,
    pub page_size: usize,
    pub filters: BTreeMap<String, String>,
    /// Bumped to force a refetch with otherwise unchanged parameters.
    pub revision: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            filters: BTreeMap::new(),
            revision: 0,
        }
    }
}

impl ListQuery {
    pub fn go_to_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    /// Replace the filters with the non-blank entries of `filters`.
    pub fn apply_filters(&mut self, filters: &BTreeMap<String, String>) {
        self.filters = filters
            .iter()
            .map(|(k, v)| (k.clone(), v.trim().to_string()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        self.page_index = 0;
    }

    pub fn refresh(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Query-string pairs; `page` is one-based on the wire.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), (self.page_index + 1).to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ];
        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }

    pub fn page_count(&self, total_count: u64) -> usize {
        page_count(total_count, self.page_size)
    }

    /// The last page that exists for `total_count`, when the query points
    /// past it.
    pub fn clamped_page(&self, total_count: u64) -> Option<usize> {
        let last = self.page_count(total_count) - 1;
        (self.page_index > last).then_some(last)
    }

    /// "Showing 11–20 of 45".
    pub fn range_label(&self, total_count: u64) -> String {
        if total_count == 0 {
            return "No results".to_string();
        }
        let page_index = self.clamped_page(total_count).unwrap_or(self.page_index);
        let first = (page_index * self.page_size) as u64 + 1;
        let last = ((page_index + 1) * self.page_size) as u64;
        format!("Showing {first}–{} of {total_count}", last.min(total_count))
    }
}

pub fn page_count(total_count: u64, page_size: usize) -> usize {
    let page_size = page_size.max(1) as u64;
    total_count.div_ceil(page_size).max(1) as usize
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Rows currently on screen plus the status of the latest fetch.
///
/// Every fetch takes a [`Ticket`] from [`ListState::begin`]; only the most
/// recently issued ticket may write results back.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    total_count: u64,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            loading: false,
            error: None,
            issued: 0,
        }
    }
}

impl<T> ListState<T> {
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.loading = true;
        Ticket(self.issued)
    }

    /// Apply a fetch result. Returns false, changing nothing, when a newer
    /// fetch has been issued since `ticket`.
    ///
    /// Failures keep the previous rows visible.
    pub fn finish(&mut self, ticket: Ticket, result: Result<Page<T>>) -> bool {
        if ticket.0 != self.issued {
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.items = page.items;
                self.total_count = page.total_count;
                self.error = None;
            }
            Err(error) => self.error = Some(error.to_string()),
        }
        true
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: &[&str], total: u64) -> Page<String> {
        Page {
            items: items.iter().map(|s| s.to_string()).collect(),
            total_count: total,
        }
    }

    #[test]
    fn both_list_shapes_decode() {
        let paginated: Envelope<ListPayload<u32>> = serde_json::from_str(
            r#"{"success":true,"data":{"items":[1,2],"pagination":{"totalItems":42}}}"#,
        )
        .unwrap();
        let page = Page::from(paginated.into_result().unwrap());
        assert_eq!(page, Page { items: vec![1, 2], total_count: 42 });

        let legacy: Envelope<ListPayload<u32>> =
            serde_json::from_str(r#"{"success":true,"data":{"items":[3],"total":7}}"#).unwrap();
        let page = Page::from(legacy.into_result().unwrap());
        assert_eq!(page, Page { items: vec![3], total_count: 7 });

        let bare: Envelope<ListPayload<u32>> =
            serde_json::from_str(r#"{"success":true,"data":{"items":[3,4,5]}}"#).unwrap();
        assert_eq!(Page::from(bare.into_result().unwrap()).total_count, 3);
    }

    #[test]
    fn failed_envelope_carries_error_text() {
        let env: Envelope<ListPayload<u32>> =
            serde_json::from_str(r#"{"success":false,"error":"timeout"}"#).unwrap();
        assert_eq!(env.into_result().unwrap_err(), Error::Api("timeout".into()));

        let env: Envelope<()> =
            serde_json::from_str(r#"{"success":false,"message":"name taken"}"#).unwrap();
        assert_eq!(env.into_ack().unwrap_err(), Error::Api("name taken".into()));

        let env: Envelope<()> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(env.into_ack().unwrap_err(), Error::Api("request failed".into()));
    }

    #[test]
    fn success_without_data_is_a_decode_error() {
        let env: Envelope<ListPayload<u32>> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(env.into_result(), Err(Error::Decode(_))));
    }

    #[test]
    fn fetch_failure_keeps_previous_rows() {
        let mut state = ListState::default();
        let t = state.begin();
        assert!(state.finish(t, Ok(page(&["a", "b"], 2))));

        let t = state.begin();
        assert!(state.is_loading());
        assert!(state.finish(t, Err(Error::Api("timeout".into()))));

        assert_eq!(state.error(), Some("timeout"));
        assert_eq!(state.items(), ["a", "b"]);
        assert_eq!(state.total_count(), 2);
        assert!(!state.is_loading());
    }

    #[test]
    fn success_clears_error_and_replaces_rows() {
        let mut state = ListState::default();
        let t = state.begin();
        state.finish(t, Err(Error::Http("offline".into())));
        let t = state.begin();
        state.finish(t, Ok(page(&["c"], 9)));
        assert_eq!(state.error(), None);
        assert_eq!(state.items(), ["c"]);
        assert_eq!(state.total_count(), 9);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = ListState::default();
        let slow = state.begin();
        let fast = state.begin();

        assert!(state.finish(fast, Ok(page(&["page 2"], 20))));
        assert!(!state.finish(slow, Ok(page(&["page 1"], 20))));
        assert_eq!(state.items(), ["page 2"]);

        let slow_err = state.begin();
        let latest = state.begin();
        assert!(!state.finish(slow_err, Err(Error::Api("late".into()))));
        assert!(state.is_loading());
        assert!(state.finish(latest, Ok(page(&["page 3"], 20))));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn query_pairs_are_one_based_and_include_filters() {
        let mut query = ListQuery::default();
        query.go_to_page(2);
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), " active ".to_string());
        filters.insert("name".to_string(), "  ".to_string());
        query.apply_filters(&filters);

        assert_eq!(query.page_index, 0);
        assert_eq!(
            query.query_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("pageSize".to_string(), "10".to_string()),
                ("status".to_string(), "active".to_string()),
            ]
        );
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut query = ListQuery::default();
        query.go_to_page(4);
        query.set_page_size(25);
        assert_eq!(query.page_index, 0);
        assert_eq!(query.page_size, 25);
    }

    #[test]
    fn refresh_changes_the_query() {
        let mut query = ListQuery::default();
        let before = query.clone();
        query.refresh();
        assert_ne!(query, before);
    }

    #[test]
    fn emptied_last_page_falls_back() {
        let mut query = ListQuery::default();
        query.go_to_page(3);
        assert_eq!(query.range_label(30), "Showing 21–30 of 30");
        assert_eq!(query.clamped_page(30), Some(2));
        assert_eq!(query.clamped_page(31), None);
        assert_eq!(query.clamped_page(0), Some(0));

        query.go_to_page(0);
        assert_eq!(query.clamped_page(0), None);
    }

    #[test]
    fn page_math() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);

        let mut query = ListQuery::default();
        query.go_to_page(1);
        assert_eq!(query.range_label(15), "Showing 11–15 of 15");
        assert_eq!(query.range_label(0), "No results");
    }
}
