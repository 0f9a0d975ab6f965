//! Final query URL assembly.

use crate::filter::FilterBuilder;
use crate::options::{OrderKey, QueryOptions};

/// Joins a base URI with the serialized query options and the filter
/// expression into one request URL.
///
/// No percent-encoding is applied; the raw `OData` syntax passes through
/// verbatim, and callers that need a strictly valid URL must encode
/// downstream.
///
/// # Example
///
/// ```
/// use odatakit_query::{CompareOperator, QueryBuilder};
///
/// let url = QueryBuilder::new("https://api.example.com/odata/Property/")
///     .select(["ListingKey"])
///     .filter(|f| f.where_condition("ListPrice", CompareOperator::Gt, 500_000))
///     .build_query_url();
///
/// assert_eq!(
///     url,
///     "https://api.example.com/odata/Property?$select=ListingKey&$filter=ListPrice gt 500000"
/// );
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct QueryBuilder {
    base_uri: String,
    filter: FilterBuilder,
    options: QueryOptions,
}

impl QueryBuilder {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            filter: FilterBuilder::new(),
            options: QueryOptions::new(),
        }
    }

    /// Thread calls into the owned [`FilterBuilder`].
    ///
    /// ```
    /// use odatakit_query::{CompareOperator, QueryBuilder};
    ///
    /// let q = QueryBuilder::new("http://x")
    ///     .filter(|f| f.where_condition("a", CompareOperator::Eq, 1));
    /// assert_eq!(q.filter_expression(), "a eq 1");
    /// ```
    pub fn filter(mut self, build: impl FnOnce(FilterBuilder) -> FilterBuilder) -> Self {
        self.filter = build(self.filter);
        self
    }

    /// Set the `$select` field list.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.select(fields);
        self
    }

    /// Set the `$expand` field list.
    pub fn expand<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.expand(fields);
        self
    }

    /// Set the `$orderby` keys.
    pub fn order_by<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<OrderKey>,
    {
        self.options = self.options.order_by(keys);
        self
    }

    /// Set `$top`.
    pub fn top(mut self, count: u64) -> Self {
        self.options = self.options.top(count);
        self
    }

    /// Set `$skip`.
    pub fn skip(mut self, count: u64) -> Self {
        self.options = self.options.skip(count);
        self
    }

    /// The current filter expression, exactly as built so far.
    #[must_use]
    pub fn filter_expression(&self) -> &str {
        self.filter.filter_expression()
    }

    /// The owned query options.
    #[must_use]
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Assemble the complete query URL.
    ///
    /// Trailing `/` is trimmed from the base URI; `?` + options are appended
    /// when any option is set; `&$filter=` + the expression is appended when
    /// the filter is non-empty.
    #[must_use]
    pub fn build_query_url(&self) -> String {
        let mut url = self.base_uri.trim_end_matches('/').to_owned();

        let query = self.options.build_query();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let expression = self.filter.filter_expression();
        if !expression.is_empty() {
            url.push_str("&$filter=");
            url.push_str(expression);
        }

        url
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::filter::{CompareOperator, LogicalOperator};
    use crate::options::SortDir;

    #[test]
    fn base_uri_trailing_slash_is_trimmed() {
        let url = QueryBuilder::new("http://x/")
            .select(["a"])
            .filter(|f| f.where_condition("a", CompareOperator::Eq, 1))
            .build_query_url();
        assert_eq!(url, "http://x?$select=a&$filter=a eq 1");
    }

    #[test]
    fn bare_base_uri_when_nothing_is_set() {
        let url = QueryBuilder::new("http://x/odata/").build_query_url();
        assert_eq!(url, "http://x/odata");
    }

    #[test]
    fn options_without_filter() {
        let url = QueryBuilder::new("http://x")
            .select(["a", "b"])
            .top(5)
            .build_query_url();
        assert_eq!(url, "http://x?$select=a,b&$top=5");
    }

    #[test]
    fn filter_without_options_keeps_ampersand_prefix() {
        // $filter is always joined with '&', even when no '?' was emitted.
        let url = QueryBuilder::new("http://x")
            .filter(|f| f.where_condition("a", CompareOperator::Eq, 1))
            .build_query_url();
        assert_eq!(url, "http://x&$filter=a eq 1");
    }

    #[test]
    fn select_comes_before_filter() {
        let url = QueryBuilder::new("http://x")
            .order_by([("f1", SortDir::Asc), ("f2", SortDir::Desc)])
            .select(["a"])
            .filter(|f| {
                f.where_condition("a", CompareOperator::Eq, 1)
                    .start_group(LogicalOperator::Or)
                    .where_condition("b", CompareOperator::Lt, 2)
                    .where_condition("b", CompareOperator::Gt, 9)
                    .end_group()
            })
            .build_query_url();
        assert_eq!(
            url,
            "http://x?$select=a&$orderby=f1 asc,f2 desc&$filter=a eq 1 AND (b lt 2 or b gt 9)"
        );
    }

    #[test]
    fn no_percent_encoding_is_applied() {
        let url = QueryBuilder::new("http://x")
            .filter(|f| f.where_condition("name", CompareOperator::Eq, "O'Brien"))
            .build_query_url();
        assert_eq!(url, r"http://x&$filter=name eq 'O\'Brien'");
    }

    #[test]
    fn repeated_filter_calls_accumulate() {
        let q = QueryBuilder::new("http://x")
            .filter(|f| f.where_condition("a", CompareOperator::Eq, 1))
            .filter(|f| f.where_condition("b", CompareOperator::Eq, 2));
        assert_eq!(q.filter_expression(), "a eq 1 and b eq 2");
    }
}
