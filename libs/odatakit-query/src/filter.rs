//! Stateful `$filter` expression builder.
//!
//! The builder is a tiny grammar compiler: each fluent call appends one
//! fragment to the accumulated expression and advances a two-field state
//! machine (the running join operator and a group-just-opened flag). The
//! output is always a string; malformed call sequences (an unclosed group,
//! for instance) yield a malformed expression rather than an error, and
//! validation is left to the caller.
//!
//! State transitions worth knowing about:
//!
//! - the join token between two top-level conditions is the **tracked**
//!   operator (`and` until a group sets it), not a per-call argument;
//! - entering a group always joins with the literal `AND`, whatever relation
//!   the group itself carries;
//! - closing a group does not restore the previous join operator: the
//!   group's relation keeps governing subsequent joins.

use std::fmt;

use crate::escape::Value;

/// `OData` comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOperator::Eq => write!(f, "eq"),
            CompareOperator::Ne => write!(f, "ne"),
            CompareOperator::Lt => write!(f, "lt"),
            CompareOperator::Le => write!(f, "le"),
            CompareOperator::Gt => write!(f, "gt"),
            CompareOperator::Ge => write!(f, "ge"),
        }
    }
}

/// Boolean join operator between conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `field <op> value` entry of a nested condition list.
///
/// Immutable once serialized into the expression.
#[derive(Clone, Debug)]
pub struct Condition {
    pub field: String,
    pub op: CompareOperator,
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, op: CompareOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    fn render(&self) -> String {
        format!("{} {} {}", self.field, self.op, self.value.to_literal())
    }
}

/// Coordinates and radius for a `geo.distance` condition.
///
/// All components optional; a circle with none of them set makes
/// [`FilterBuilder::distance`] a no-op.
#[derive(Clone, Debug, Default)]
pub struct GeoCircle {
    pub lat: Option<Value>,
    pub long: Option<Value>,
    pub radius: Option<Value>,
}

impl GeoCircle {
    pub fn new(
        lat: impl Into<Value>,
        long: impl Into<Value>,
        radius: impl Into<Value>,
    ) -> Self {
        Self {
            lat: Some(lat.into()),
            long: Some(long.into()),
            radius: Some(radius.into()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lat.is_none() && self.long.is_none() && self.radius.is_none()
    }

    fn component(value: Option<&Value>) -> String {
        value.map(Value::to_literal).unwrap_or_default()
    }
}

/// Incremental `$filter` expression builder.
///
/// Every operation consumes and returns the builder for fluent chaining;
/// none of them can fail. [`filter_expression`](Self::filter_expression)
/// borrows the accumulated string exactly as built.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct FilterBuilder {
    expression: String,
    join_operator: LogicalOperator,
    group_just_opened: bool,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `field <op> <value>` as a plain condition.
    pub fn where_condition(
        mut self,
        field: &str,
        op: CompareOperator,
        value: impl Into<Value>,
    ) -> Self {
        self.push_join();
        let rendered = format!("{field} {op} {}", value.into().to_literal());
        self.expression.push_str(&rendered);
        self
    }

    /// Append a parenthesized sub-expression joining `conditions` with the
    /// list's own `logical` operator (independent of the tracked join
    /// operator, which only governs how the whole group attaches to what
    /// came before).
    pub fn where_group(mut self, conditions: &[Condition], logical: LogicalOperator) -> Self {
        self.push_join();
        let joiner = format!(" {logical} ");
        let inner = conditions
            .iter()
            .map(Condition::render)
            .collect::<Vec<_>>()
            .join(&joiner);
        self.expression.push_str(&format!("({inner})"));
        self
    }

    /// Append `field in (v1, v2, ...)` with each value escaped individually.
    pub fn where_in<I, V>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_join();
        let rendered = values
            .into_iter()
            .map(|v| v.into().to_literal())
            .collect::<Vec<_>>()
            .join(", ");
        self.expression.push_str(&format!("{field} in ({rendered})"));
        self
    }

    /// Append `contains(field, <value>)`.
    pub fn contains(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.push_function("contains", field, value);
        self
    }

    /// Append `startswith(field, <substring>)`.
    pub fn startswith(mut self, field: &str, substring: impl Into<Value>) -> Self {
        self.push_function("startswith", field, substring);
        self
    }

    /// Append `endswith(field, <substring>)`.
    pub fn endswith(mut self, field: &str, substring: impl Into<Value>) -> Self {
        self.push_function("endswith", field, substring);
        self
    }

    /// Append `substringof(<substring>, field)`. Note the reversed argument
    /// order relative to the other string functions.
    pub fn substringof(mut self, substring: impl Into<Value>, field: &str) -> Self {
        self.push_join();
        let rendered = format!("substringof({}, {field})", substring.into().to_literal());
        self.expression.push_str(&rendered);
        self
    }

    /// Append `length(field) <comparison> <length>`; the length is emitted as
    /// a bare integer, never escaped.
    pub fn length(mut self, field: &str, length: i64, comparison: CompareOperator) -> Self {
        self.push_join();
        self.expression
            .push_str(&format!("length({field}) {comparison} {length}"));
        self
    }

    /// Append `geo.distance(field, POINT(<long> <lat>)) <op> <radius>`.
    ///
    /// When the circle carries no components at all, the call is a no-op: the
    /// builder is returned unchanged and the pending join state is not
    /// consumed. Partially present circles render their absent components as
    /// empty strings.
    pub fn distance(mut self, field: &str, op: CompareOperator, circle: &GeoCircle) -> Self {
        if circle.is_empty() {
            return self;
        }
        self.push_join();
        let long = GeoCircle::component(circle.long.as_ref());
        let lat = GeoCircle::component(circle.lat.as_ref());
        let radius = GeoCircle::component(circle.radius.as_ref());
        self.expression.push_str(&format!(
            "geo.distance({field}, POINT({long} {lat})) {op} {radius}"
        ));
        self
    }

    /// Open a parenthesized group.
    ///
    /// Joins to the existing expression with the literal `AND`, regardless of
    /// `relation`; `relation` becomes the tracked join operator for every
    /// subsequent condition, inside the group and, deliberately, after it
    /// closes (see module docs).
    pub fn start_group(mut self, relation: LogicalOperator) -> Self {
        if self.expression.is_empty() {
            self.expression.push('(');
        } else {
            self.expression.push_str(" AND (");
        }
        self.join_operator = relation;
        self.group_just_opened = true;
        self
    }

    /// Close the innermost group. Does not restore the join operator.
    pub fn end_group(mut self) -> Self {
        self.expression.push(')');
        self
    }

    /// The accumulated expression, exactly as built. Idempotent.
    #[must_use]
    pub fn filter_expression(&self) -> &str {
        &self.expression
    }

    /// Consume the builder and take the expression.
    #[must_use]
    pub fn into_expression(self) -> String {
        self.expression
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// Emit the join prefix unless the expression is empty or a group was
    /// just opened, then mark the pending state consumed.
    fn push_join(&mut self) {
        if !self.expression.is_empty() && !self.group_just_opened {
            self.expression.push(' ');
            self.expression.push_str(self.join_operator.as_str());
            self.expression.push(' ');
        }
        self.group_just_opened = false;
    }

    fn push_function(&mut self, name: &str, field: &str, value: impl Into<Value>) {
        self.push_join();
        let rendered = format!("{name}({field}, {})", value.into().to_literal());
        self.expression.push_str(&rendered);
    }
}
