//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{
    DEFAULT_ORDER_DIR, DEFAULT_PAGE, DEFAULT_PER_PAGE, IGNORED_FILTER_MAX_LENGTH, MAX_OFFSET,
    MAX_PER_PAGE,
};

/// Raw pagination query parameters (reusable across all list endpoints).
///
/// Every value stays string-typed on the wire; malformed numbers fall back
/// to the defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, starting at 1
    pub page: Option<String>,
    /// Results per page (default 20)
    pub per_page: Option<String>,
    /// Column to order by (default `id`)
    pub order_by: Option<String>,
    /// Ordering direction, `ASC` or `DESC` (default `ASC`)
    pub order_dir: Option<String>,
    /// Suffix match on first or last name; ignored below 3 characters
    pub filter: Option<String>,
}

/// Request-scoped pagination state.
///
/// Built from query parameters, then completed by the listing query with the
/// number of rows returned and the number of rows matching the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Paginator {
    /// Current page
    page: u64,
    /// Number of results per page
    per_page: u64,
    /// (page - 1) * per_page
    offset: u64,
    /// Total records matching the query
    total_entries_size: u64,
    /// Records returned for this page, <= per_page
    current_entries_size: u64,
    total_pages: u64,
    order_by: String,
    order_dir: String,
    filter: String,
}

impl Paginator {
    /// Create a paginator, clamping out-of-range values.
    ///
    /// `page` and `per_page` below 1 fall back to the defaults; `per_page` is
    /// capped at `MAX_PER_PAGE` and `page` at the last page whose offset the
    /// database can still address.
    pub fn new(
        page: i64,
        per_page: i64,
        order_by: impl Into<String>,
        order_dir: impl Into<String>,
        filter: impl Into<String>,
    ) -> Self {
        let page = u64::try_from(page).ok().filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let per_page = u64::try_from(per_page)
            .ok()
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE);
        let page = page.min(MAX_OFFSET / per_page + 1);

        Self {
            page,
            per_page,
            offset: (page - 1) * per_page,
            total_entries_size: 0,
            current_entries_size: 0,
            total_pages: 0,
            order_by: order_by.into(),
            order_dir: order_dir.into(),
            filter: filter.into(),
        }
    }

    /// Build a paginator from query parameters. Never fails.
    pub fn from_params(params: &PaginationParams) -> Self {
        Self::new(
            numeric(&params.page, DEFAULT_PAGE),
            numeric(&params.per_page, DEFAULT_PER_PAGE),
            present(&params.order_by).unwrap_or_default(),
            present(&params.order_dir).unwrap_or_default(),
            present(&params.filter).unwrap_or_default(),
        )
    }

    /// Ordering clause `"<order_by> <order_dir>"`.
    ///
    /// Missing values are resolved to `default_column` and `ASC`, a known
    /// direction is upper-cased, and both are written back so later calls
    /// return the same clause.
    pub fn order(&mut self, default_column: &str) -> String {
        if self.order_by.is_empty() {
            self.order_by = default_column.to_string();
        }
        if self.order_dir.is_empty() {
            self.order_dir = DEFAULT_ORDER_DIR.to_string();
        } else if self.order_dir.eq_ignore_ascii_case("asc")
            || self.order_dir.eq_ignore_ascii_case("desc")
        {
            self.order_dir.make_ascii_uppercase();
        }
        format!("{} {}", self.order_by, self.order_dir)
    }

    /// Record query results and recompute the page count.
    pub fn set_totals(&mut self, current_entries_size: u64, total_entries_size: u64) {
        self.current_entries_size = current_entries_size;
        self.total_entries_size = total_entries_size;
        self.total_pages = total_entries_size / self.per_page
            + u64::from(total_entries_size % self.per_page > 0);
    }

    /// Whether the filter is long enough to be applied.
    pub fn has_filter(&self) -> bool {
        self.filter.chars().count() > IGNORED_FILTER_MAX_LENGTH
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn total_entries_size(&self) -> u64 {
        self.total_entries_size
    }

    pub fn current_entries_size(&self) -> u64 {
        self.current_entries_size
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    pub fn order_dir(&self) -> &str {
        &self.order_dir
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE as i64, "", "", "")
    }
}

/// Empty strings count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn numeric(value: &Option<String>, default: u64) -> i64 {
    present(value)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default as i64)
}

/// Paginated payload: one page of results plus the paginator that produced it.
#[derive(Debug, Serialize)]
pub struct PaginatedModel<T> {
    pub results: Vec<T>,
    pub paginator: Paginator,
}

impl<T> PaginatedModel<T> {
    pub fn new(results: Vec<T>, paginator: Paginator) -> Self {
        Self { results, paginator }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: &str, per_page: &str) -> PaginationParams {
        PaginationParams {
            page: Some(page.to_string()),
            per_page: Some(per_page.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_when_params_missing() {
        let p = Paginator::from_params(&PaginationParams::default());
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.order_by(), "");
        assert_eq!(p.order_dir(), "");
        assert_eq!(p.filter(), "");
        assert_eq!(p, Paginator::default());
    }

    #[test]
    fn page_below_one_clamps_to_first_page() {
        for raw in ["0", "-1", "-250", "abc", "", "1.5"] {
            let p = Paginator::from_params(&params(raw, "10"));
            assert_eq!(p.page(), 1, "page input {:?}", raw);
            assert_eq!(p.offset(), 0);
        }
    }

    #[test]
    fn invalid_per_page_falls_back_to_default() {
        for raw in ["0", "-5", "ten", ""] {
            let p = Paginator::from_params(&params("2", raw));
            assert_eq!(p.per_page(), DEFAULT_PER_PAGE, "per_page input {:?}", raw);
        }
    }

    #[test]
    fn per_page_is_capped() {
        let p = Paginator::from_params(&params("1", "5000"));
        assert_eq!(p.per_page(), MAX_PER_PAGE);

        let p = Paginator::from_params(&params("1", "9223372036854775807"));
        assert_eq!(p.per_page(), MAX_PER_PAGE);
    }

    #[test]
    fn huge_page_keeps_offset_addressable() {
        let p = Paginator::from_params(&params("9223372036854775807", "20"));
        assert!(p.offset() <= i64::MAX as u64);
        assert_eq!(p.offset(), (p.page() - 1) * p.per_page());

        let p = Paginator::new(461_168_601_842_738_790, 40, "", "", "");
        assert!(p.offset() <= i64::MAX as u64);
        assert_eq!(p.offset(), (p.page() - 1) * p.per_page());

        let p = Paginator::new(i64::MAX, 1, "", "", "");
        assert_eq!(p.offset(), i64::MAX as u64);
    }

    #[test]
    fn offset_follows_page_and_per_page() {
        for (page, per_page) in [(1, 1), (2, 2), (3, 20), (7, 15), (10, 100)] {
            let p = Paginator::new(page, per_page, "", "", "");
            assert_eq!(p.offset(), (p.page() - 1) * p.per_page());
        }

        let p = Paginator::from_params(&params("3", "25"));
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn total_pages_rounds_up() {
        let mut p = Paginator::new(1, 20, "", "", "");
        p.set_totals(3, 3);
        assert_eq!(p.total_pages(), 1);

        p.set_totals(20, 21);
        assert_eq!(p.total_pages(), 2);

        p.set_totals(20, 20);
        assert_eq!(p.total_pages(), 1);

        p.set_totals(0, 0);
        assert_eq!(p.total_pages(), 0);
    }

    #[test]
    fn order_resolves_defaults_once() {
        let mut p = Paginator::default();
        assert_eq!(p.order("id"), "id ASC");
        assert_eq!(p.order_by(), "id");
        assert_eq!(p.order_dir(), "ASC");
        // defaults were persisted, a different fallback no longer applies
        assert_eq!(p.order("email"), "id ASC");
    }

    #[test]
    fn order_is_idempotent_for_explicit_values() {
        let mut p = Paginator::new(1, 20, "last_name", "DESC", "");
        let first = p.order("id");
        let second = p.order("id");
        assert_eq!(first, "last_name DESC");
        assert_eq!(first, second);
    }

    #[test]
    fn order_canonicalizes_direction() {
        let mut p = Paginator::new(1, 20, "email", "desc", "");
        assert_eq!(p.order("id"), "email DESC");
        assert_eq!(p.order_dir(), "DESC");

        let mut p = Paginator::new(1, 20, "", "Asc", "");
        p.order("id");
        assert_eq!(p.order_dir(), "ASC");

        // unknown directions are left for the query builder to reject
        let mut p = Paginator::new(1, 20, "", "sideways", "");
        p.order("id");
        assert_eq!(p.order_dir(), "sideways");
    }

    #[test]
    fn short_filters_are_ignored() {
        for filter in ["", "a", "ab"] {
            assert!(!Paginator::new(1, 20, "", "", filter).has_filter());
        }
        assert!(Paginator::new(1, 20, "", "", "abc").has_filter());
    }

    #[test]
    fn serializes_snake_case_keys() {
        let mut p = Paginator::new(2, 2, "", "", "");
        p.order("id");
        p.set_totals(2, 5);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "page": 2,
                "per_page": 2,
                "offset": 2,
                "total_entries_size": 5,
                "current_entries_size": 2,
                "total_pages": 3,
                "order_by": "id",
                "order_dir": "ASC",
                "filter": ""
            })
        );
    }
}
