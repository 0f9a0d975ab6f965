#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Query construction for `OData`-style REST APIs.
//!
//! Three layers, composed bottom-up:
//!
//! - [`escape`] — typed literal values and their `OData` text rendering
//! - [`filter`] — the stateful `$filter` expression builder
//! - [`options`] / [`url`] — `$select`/`$expand`/`$orderby`/`$top`/`$skip`
//!   serialization and final URL assembly
//!
//! The builders are deterministic one-way compilers from a call sequence to a
//! string: they never validate field names against a schema and never fail.
//! A mismatched group produces an unclosed-parenthesis expression, not an
//! error.
//!
//! # Example
//!
//! ```
//! use odatakit_query::{CompareOperator, LogicalOperator, QueryBuilder, SortDir};
//!
//! let url = QueryBuilder::new("https://api.example.com/odata/Property/")
//!     .select(["ListingKey", "ListPrice"])
//!     .order_by([("ListPrice", SortDir::Desc)])
//!     .top(10)
//!     .filter(|f| {
//!         f.where_condition("StandardStatus", CompareOperator::Eq, "Active")
//!             .start_group(LogicalOperator::Or)
//!             .where_condition("ListPrice", CompareOperator::Ge, 250_000)
//!             .where_condition("ListPrice", CompareOperator::Le, 100_000)
//!             .end_group()
//!     })
//!     .build_query_url();
//!
//! assert_eq!(
//!     url,
//!     "https://api.example.com/odata/Property?$select=ListingKey,ListPrice\
//!      &$orderby=ListPrice desc&$top=10\
//!      &$filter=StandardStatus eq 'Active' AND (ListPrice ge 250000 or ListPrice le 100000)"
//! );
//! ```

pub mod escape;
pub mod filter;
pub mod options;
pub mod url;

pub use escape::Value;
pub use filter::{CompareOperator, Condition, FilterBuilder, GeoCircle, LogicalOperator};
pub use options::{OrderKey, QueryOptions, SortDir};
pub use url::QueryBuilder;
