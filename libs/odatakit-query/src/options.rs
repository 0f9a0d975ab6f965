//! `$select` / `$expand` / `$orderby` / `$top` / `$skip` options.

use serde::{Deserialize, Serialize};

/// Sort direction for an `$orderby` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl SortDir {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

/// One `$orderby` key: field plus direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderKey {
    pub field: String,
    pub dir: SortDir,
}

impl OrderKey {
    pub fn new(field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }
}

impl<S: Into<String>> From<(S, SortDir)> for OrderKey {
    fn from((field, dir): (S, SortDir)) -> Self {
        OrderKey::new(field, dir)
    }
}

/// Holder for the five query options.
///
/// Every setter stores its argument directly; repeated calls overwrite
/// (last write wins), there is no accumulation across calls.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct QueryOptions {
    select: Vec<String>,
    expand: Vec<String>,
    order_by: Vec<OrderKey>,
    top: Option<u64>,
    skip: Option<u64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `$select` field list.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `$expand` field list.
    pub fn expand<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `$orderby` keys.
    pub fn order_by<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<OrderKey>,
    {
        self.order_by = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set `$top`, the maximum number of records to return.
    pub fn top(mut self, count: u64) -> Self {
        self.top = Some(count);
        self
    }

    /// Set `$skip`, the number of records to skip.
    pub fn skip(mut self, count: u64) -> Self {
        self.skip = Some(count);
        self
    }

    /// Serialize present, non-empty options joined with `&`.
    ///
    /// Emission order is fixed: select, expand, orderby, top, skip. No
    /// percent-encoding is applied.
    #[must_use]
    pub fn build_query(&self) -> String {
        let mut parts = Vec::new();
        if !self.select.is_empty() {
            parts.push(format!("$select={}", self.select.join(",")));
        }
        if !self.expand.is_empty() {
            parts.push(format!("$expand={}", self.expand.join(",")));
        }
        if !self.order_by.is_empty() {
            let keys = self
                .order_by
                .iter()
                .map(|k| format!("{} {}", k.field, k.dir.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("$orderby={keys}"));
        }
        if let Some(top) = self.top {
            parts.push(format!("$top={top}"));
        }
        if let Some(skip) = self.skip {
            parts.push(format!("$skip={skip}"));
        }
        parts.join("&")
    }
}
