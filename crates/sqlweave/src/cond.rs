//! Boolean condition tree for WHERE / HAVING / JOIN ON clauses.
//!
//! [`Cond`] supports:
//! - AND/OR/NOT grouping
//! - Comparison operators (eq, ne, gt, lt, like, etc.)
//! - IN lists and IN sub-queries
//! - Raw expressions with `?` placeholders
//!
//! Rendering writes text and arguments into the same [`Writer`], so argument
//! order always follows placeholder order, including inside sub-queries.

use crate::builder::{Builder, write_nested};
use crate::dialect::Dialect;
use crate::error::BuildResult;
use crate::value::Value;
use crate::writer::Writer;

/// A SQL fragment carrying its own `?` arguments.
///
/// Used for raw conditions and ORDER BY items.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    sql: String,
    args: Vec<Value>,
}

impl Expr {
    /// Create a fragment with `?` placeholders and their arguments.
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Create a fragment without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub(crate) fn write_to(&self, w: &mut Writer) {
        w.push_with_args(&self.sql, &self.args);
    }
}

impl From<&str> for Expr {
    fn from(sql: &str) -> Self {
        Expr::raw(sql)
    }
}

impl From<String> for Expr {
    fn from(sql: String) -> Self {
        Expr::raw(sql)
    }
}

/// Condition node.
#[derive(Clone, Debug)]
pub enum Cond {
    /// AND group: all conditions must be true.
    And(Vec<Cond>),

    /// OR group: at least one condition must be true.
    Or(Vec<Cond>),

    /// NOT: negate the inner condition.
    Not(Box<Cond>),

    /// Simple comparison: column op ?
    Compare {
        column: String,
        op: &'static str,
        value: Value,
    },

    /// NULL check: column IS NULL or column IS NOT NULL
    NullCheck { column: String, is_null: bool },

    /// IN list: column IN (?, ?, ...) or column NOT IN (...)
    InList {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },

    /// IN sub-query: column IN (SELECT ...) or column NOT IN (SELECT ...)
    InQuery {
        column: String,
        query: Box<Builder>,
        negated: bool,
    },

    /// BETWEEN: column BETWEEN ? AND ?
    Between {
        column: String,
        from: Value,
        to: Value,
        negated: bool,
    },

    /// Raw fragment with `?` placeholders.
    Expr(Expr),

    /// Always true (used for empty NOT IN lists).
    True,

    /// Always false (used for empty IN lists).
    False,
}

impl Default for Cond {
    /// The empty condition, which renders nothing.
    fn default() -> Self {
        Cond::And(Vec::new())
    }
}

impl Cond {
    /// The empty condition.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an AND group.
    pub fn all(conds: Vec<Cond>) -> Self {
        Cond::And(conds)
    }

    /// Create an OR group.
    pub fn any(conds: Vec<Cond>) -> Self {
        Cond::Or(conds)
    }

    /// Create a NOT condition.
    #[allow(clippy::should_implement_trait)]
    pub fn not(cond: Cond) -> Self {
        Cond::Not(Box::new(cond))
    }

    fn compare(column: impl Into<String>, op: &'static str, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// column = ?
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "=", value)
    }

    /// column <> ?
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<>", value)
    }

    /// column > ?
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">", value)
    }

    /// column >= ?
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">=", value)
    }

    /// column < ?
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<", value)
    }

    /// column <= ?
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<=", value)
    }

    /// column LIKE ?
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, "LIKE", pattern)
    }

    /// column NOT LIKE ?
    pub fn not_like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, "NOT LIKE", pattern)
    }

    /// column IS NULL
    pub fn is_null(column: impl Into<String>) -> Self {
        Cond::NullCheck {
            column: column.into(),
            is_null: true,
        }
    }

    /// column IS NOT NULL
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Cond::NullCheck {
            column: column.into(),
            is_null: false,
        }
    }

    /// column IN (values...). An empty list is always false.
    pub fn in_list<T: Into<Value>>(column: impl Into<String>, values: Vec<T>) -> Self {
        if values.is_empty() {
            return Cond::False;
        }
        Cond::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// column NOT IN (values...). An empty list is always true.
    pub fn not_in<T: Into<Value>>(column: impl Into<String>, values: Vec<T>) -> Self {
        if values.is_empty() {
            return Cond::True;
        }
        Cond::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    /// column IN (sub-query)
    pub fn in_query(column: impl Into<String>, query: Builder) -> Self {
        Cond::InQuery {
            column: column.into(),
            query: Box::new(query),
            negated: false,
        }
    }

    /// column NOT IN (sub-query)
    pub fn not_in_query(column: impl Into<String>, query: Builder) -> Self {
        Cond::InQuery {
            column: column.into(),
            query: Box::new(query),
            negated: true,
        }
    }

    /// column BETWEEN ? AND ?
    pub fn between(
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Cond::Between {
            column: column.into(),
            from: from.into(),
            to: to.into(),
            negated: false,
        }
    }

    /// column NOT BETWEEN ? AND ?
    pub fn not_between(
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Cond::Between {
            column: column.into(),
            from: from.into(),
            to: to.into(),
            negated: true,
        }
    }

    /// Raw fragment with `?` placeholders.
    ///
    /// # Example
    /// ```
    /// use sqlweave::{Cond, Value};
    ///
    /// let cond = Cond::expr("a = ? OR b = ?", vec![Value::Int(1), Value::Int(2)]);
    /// assert_eq!(cond.to_sql().unwrap().sql, "a = ? OR b = ?");
    /// ```
    pub fn expr(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Cond::Expr(Expr::new(sql, args))
    }

    /// Raw fragment without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Cond::Expr(Expr::raw(sql))
    }

    /// Combine with another condition using AND.
    ///
    /// Empty operands are dropped, so `Cond::empty().and(c)` is just `c`.
    pub fn and(self, other: Cond) -> Cond {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        match self {
            Cond::And(mut conds) => {
                conds.push(other);
                Cond::And(conds)
            }
            cond => Cond::And(vec![cond, other]),
        }
    }

    /// Combine with another condition using OR.
    pub fn or(self, other: Cond) -> Cond {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        match self {
            Cond::Or(mut conds) => {
                conds.push(other);
                Cond::Or(conds)
            }
            cond => Cond::Or(vec![cond, other]),
        }
    }

    /// Check if this condition is empty (contains no predicates).
    pub fn is_empty(&self) -> bool {
        match self {
            Cond::And(conds) | Cond::Or(conds) => conds.iter().all(|c| c.is_empty()),
            Cond::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }

    /// Render this condition on its own.
    pub fn to_sql(&self) -> BuildResult<crate::BuiltQuery> {
        let mut w = Writer::new();
        self.write_to(&mut w)?;
        Ok(w.into())
    }

    /// Render this condition into a writer.
    pub fn write_to(&self, w: &mut Writer) -> BuildResult<()> {
        self.write_in(w, None)
    }

    /// Render with the dialect of the enclosing statement, which nested
    /// sub-queries must agree with.
    pub(crate) fn write_in(&self, w: &mut Writer, dialect: Option<&Dialect>) -> BuildResult<()> {
        match self {
            Cond::And(conds) => write_group(w, conds, " AND ", dialect),
            Cond::Or(conds) => write_group(w, conds, " OR ", dialect),
            Cond::Not(inner) => {
                if inner.is_empty() {
                    return Ok(());
                }
                w.push("NOT (");
                inner.write_in(w, dialect)?;
                w.push(")");
                Ok(())
            }
            Cond::Compare { column, op, value } => {
                w.push(column).push_char(' ').push(op).push_char(' ');
                w.push_bind(value.clone());
                Ok(())
            }
            Cond::NullCheck { column, is_null } => {
                w.push(column);
                w.push(if *is_null { " IS NULL" } else { " IS NOT NULL" });
                Ok(())
            }
            Cond::InList {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    w.push(if *negated { "1=1" } else { "1=0" });
                    return Ok(());
                }
                w.push(column);
                w.push(if *negated { " NOT IN (" } else { " IN (" });
                w.push_bind_list(values);
                w.push(")");
                Ok(())
            }
            Cond::InQuery {
                column,
                query,
                negated,
            } => {
                w.push(column);
                w.push(if *negated { " NOT IN (" } else { " IN (" });
                write_nested(query, dialect, w)?;
                w.push(")");
                Ok(())
            }
            Cond::Between {
                column,
                from,
                to,
                negated,
            } => {
                w.push(column);
                w.push(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                w.push_bind(from.clone()).push(" AND ").push_bind(to.clone());
                Ok(())
            }
            Cond::Expr(expr) => {
                expr.write_to(w);
                Ok(())
            }
            Cond::True => {
                w.push("1=1");
                Ok(())
            }
            Cond::False => {
                w.push("1=0");
                Ok(())
            }
        }
    }
}

fn write_group(
    w: &mut Writer,
    conds: &[Cond],
    joiner: &str,
    dialect: Option<&Dialect>,
) -> BuildResult<()> {
    let members = conds.iter().filter(|c| !c.is_empty()).count();
    let mut first = true;
    for cond in conds.iter().filter(|c| !c.is_empty()) {
        if !first {
            w.push(joiner);
        }
        first = false;

        // Groups of the other kind and raw fragments next to siblings need parentheses
        let wrap = match (joiner, cond) {
            (" AND ", Cond::Or(_)) => true,
            (" OR ", Cond::And(_)) => true,
            (_, Cond::Expr(_)) => members > 1,
            _ => false,
        };
        if wrap {
            w.push("(");
            cond.write_in(w, dialect)?;
            w.push(")");
        } else {
            cond.write_in(w, dialect)?;
        }
    }
    Ok(())
}

impl From<&str> for Cond {
    fn from(sql: &str) -> Self {
        Cond::raw(sql)
    }
}

impl From<String> for Cond {
    fn from(sql: String) -> Self {
        Cond::raw(sql)
    }
}

impl From<Expr> for Cond {
    fn from(expr: Expr) -> Self {
        Cond::Expr(expr)
    }
}
