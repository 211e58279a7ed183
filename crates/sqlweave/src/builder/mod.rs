//! Statement builder and its renderers.
//!
//! A [`Builder`] is created by a statement-kind factory ([`select`](crate::select),
//! [`insert_into`](crate::insert_into), [`update`](crate::update),
//! [`delete_from`](crate::delete_from), [`Builder::union`]), configured with
//! consuming chained calls and rendered with [`Builder::build`] or
//! [`Builder::write_to`]. Rendering never mutates the builder.

mod delete;
mod insert;
mod select;
mod union;
mod update;


use crate::built::BuiltQuery;
use crate::cond::{Cond, Expr};
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::paginate::{Limit, check_pageable, paginate};
use crate::value::Value;
use crate::writer::Writer;

/// Statement kind, fixed when the builder is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Union,
}

/// Where a statement reads from (or writes to).
#[derive(Debug, Clone)]
pub enum Source {
    /// A table name or any literal table expression.
    Table(String),
    /// A nested statement, rendered as `(...)` with an optional alias.
    Query {
        query: Box<Builder>,
        alias: Option<String>,
    },
}

/// JOIN flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Join {
    kind: JoinKind,
    table: String,
    on: Cond,
}

/// Right-hand side of an INSERT/UPDATE assignment.
#[derive(Debug, Clone)]
pub(crate) enum Assign {
    Value(Value),
    Expr(Expr),
}

/// UNION flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionKind {
    /// `UNION` (distinct rows)
    Distinct,
    /// `UNION ALL`
    All,
}

impl UnionKind {
    fn keyword(self) -> &'static str {
        match self {
            UnionKind::Distinct => " UNION ",
            UnionKind::All => " UNION ALL ",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UnionMember {
    /// `None` for the first member.
    kind: Option<UnionKind>,
    query: Builder,
}

/// A composable description of one SQL statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct Builder {
    kind: StatementKind,
    dialect: Option<Dialect>,
    selects: Vec<String>,
    source: Option<Source>,
    joins: Vec<Join>,
    filter: Cond,
    group_by: Option<String>,
    having: Cond,
    order_by: Vec<Expr>,
    assignments: Vec<(String, Assign)>,
    unions: Vec<UnionMember>,
    limit: Option<Limit>,
    allow_delete_all: bool,
}

impl Builder {
    /// Create an empty builder of the given kind.
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            dialect: None,
            selects: Vec::new(),
            source: None,
            joins: Vec::new(),
            filter: Cond::empty(),
            group_by: None,
            having: Cond::empty(),
            order_by: Vec::new(),
            assignments: Vec::new(),
            unions: Vec::new(),
            limit: None,
            allow_delete_all: false,
        }
    }

    /// The statement kind.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The dialect bound to this builder, if any.
    pub fn dialect_tag(&self) -> Option<&Dialect> {
        self.dialect.as_ref()
    }

    /// Selected columns, in output order.
    pub fn selects(&self) -> &[String] {
        &self.selects
    }

    /// The pagination settings, if any.
    pub fn pagination(&self) -> Option<&Limit> {
        self.limit.as_ref()
    }

    // ==================== Dialect ====================

    /// Bind the builder to a target dialect.
    pub fn dialect(mut self, dialect: impl Into<Dialect>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    // ==================== Columns ====================

    /// Replace the selected columns.
    pub fn select(mut self, cols: &[&str]) -> Self {
        self.selects = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Append one selected column.
    pub fn add_select(mut self, col: impl Into<String>) -> Self {
        self.selects.push(col.into());
        self
    }

    // ==================== Source ====================

    /// Read from (or write to) a table.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.source = Some(Source::Table(table.into()));
        self
    }

    /// Alias for [`Builder::from`], reads better for INSERT.
    pub fn into_table(self, table: impl Into<String>) -> Self {
        self.from(table)
    }

    /// Read from an unnamed derived table: `FROM (SELECT ...)`.
    ///
    /// Only valid while this builder has no filter; the derived table cannot
    /// be referenced otherwise.
    pub fn from_query(mut self, query: Builder) -> Self {
        self.source = Some(Source::Query {
            query: Box::new(query),
            alias: None,
        });
        self
    }

    /// Read from a named derived table: `FROM (SELECT ...) alias`.
    pub fn from_query_as(mut self, query: Builder, alias: impl Into<String>) -> Self {
        self.source = Some(Source::Query {
            query: Box::new(query),
            alias: Some(alias.into()),
        });
        self
    }

    // ==================== JOIN ====================

    fn join(mut self, kind: JoinKind, table: impl Into<String>, on: impl Into<Cond>) -> Self {
        self.joins.push(Join {
            kind,
            table: table.into(),
            on: on.into(),
        });
        self
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: impl Into<String>, on: impl Into<Cond>) -> Self {
        self.join(JoinKind::Inner, table, on)
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: impl Into<String>, on: impl Into<Cond>) -> Self {
        self.join(JoinKind::Left, table, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: impl Into<String>, on: impl Into<Cond>) -> Self {
        self.join(JoinKind::Right, table, on)
    }

    /// Add FULL OUTER JOIN.
    pub fn full_join(self, table: impl Into<String>, on: impl Into<Cond>) -> Self {
        self.join(JoinKind::Full, table, on)
    }

    // ==================== WHERE ====================

    /// Replace the filter.
    pub fn filter(mut self, cond: impl Into<Cond>) -> Self {
        self.filter = cond.into();
        self
    }

    /// AND a condition onto the filter.
    pub fn and(mut self, cond: impl Into<Cond>) -> Self {
        self.filter = std::mem::take(&mut self.filter).and(cond.into());
        self
    }

    /// OR a condition onto the filter.
    pub fn or(mut self, cond: impl Into<Cond>) -> Self {
        self.filter = std::mem::take(&mut self.filter).or(cond.into());
        self
    }

    /// Add WHERE: column = value
    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(Cond::eq(column, value))
    }

    /// Add WHERE: column <> value
    pub fn ne(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(Cond::ne(column, value))
    }

    /// Add WHERE: column > value
    pub fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(Cond::gt(column, value))
    }

    /// Add WHERE: column >= value
    pub fn gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(Cond::gte(column, value))
    }

    /// Add WHERE: column < value
    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(Cond::lt(column, value))
    }

    /// Add WHERE: column <= value
    pub fn lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(Cond::lte(column, value))
    }

    /// Add WHERE: column LIKE pattern
    pub fn like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.and(Cond::like(column, pattern))
    }

    /// Add WHERE: column IN (values...)
    pub fn in_list<T: Into<Value>>(self, column: &str, values: Vec<T>) -> Self {
        self.and(Cond::in_list(column, values))
    }

    /// Add WHERE: column NOT IN (values...)
    pub fn not_in<T: Into<Value>>(self, column: &str, values: Vec<T>) -> Self {
        self.and(Cond::not_in(column, values))
    }

    /// Add WHERE: column IS NULL
    pub fn is_null(self, column: &str) -> Self {
        self.and(Cond::is_null(column))
    }

    /// Add WHERE: column IS NOT NULL
    pub fn is_not_null(self, column: &str) -> Self {
        self.and(Cond::is_not_null(column))
    }

    /// Add WHERE: column BETWEEN from AND to
    pub fn between(self, column: &str, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        self.and(Cond::between(column, from, to))
    }

    // ==================== Grouping & Ordering ====================

    /// Set GROUP BY clause.
    pub fn group_by(mut self, clause: impl Into<String>) -> Self {
        self.group_by = Some(clause.into());
        self
    }

    /// AND a HAVING condition.
    pub fn having(mut self, cond: impl Into<Cond>) -> Self {
        self.having = std::mem::take(&mut self.having).and(cond.into());
        self
    }

    /// Add an ORDER BY item; may carry `?` arguments via [`Expr`].
    pub fn order_by(mut self, clause: impl Into<Expr>) -> Self {
        self.order_by.push(clause.into());
        self
    }

    /// Add ORDER BY column ASC.
    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by(format!("{} ASC", column))
    }

    /// Add ORDER BY column DESC.
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(format!("{} DESC", column))
    }

    // ==================== Assignments ====================

    /// INSERT/UPDATE: column = ?
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments
            .push((column.into(), Assign::Value(value.into())));
        self
    }

    /// INSERT/UPDATE: column = <expression>
    pub fn set_expr(mut self, column: impl Into<String>, expr: impl Into<Expr>) -> Self {
        self.assignments
            .push((column.into(), Assign::Expr(expr.into())));
        self
    }

    /// DELETE: allow an empty filter to delete every row.
    pub fn allow_delete_all(mut self, allow: bool) -> Self {
        self.allow_delete_all = allow;
        self
    }

    // ==================== UNION ====================

    /// Combine with another SELECT using `UNION`.
    pub fn union(self, other: Builder) -> Builder {
        self.union_with(UnionKind::Distinct, other)
    }

    /// Combine with another SELECT using `UNION ALL`.
    pub fn union_all(self, other: Builder) -> Builder {
        self.union_with(UnionKind::All, other)
    }

    /// Combine with another SELECT.
    ///
    /// Calling this on a union statement appends a member; otherwise a new
    /// union statement is created with `self` as its first member.
    pub fn union_with(self, kind: UnionKind, other: Builder) -> Builder {
        let mut union = if self.kind == StatementKind::Union {
            self
        } else {
            let mut union = Builder::new(StatementKind::Union);
            union.dialect = self.dialect.clone();
            union.unions.push(UnionMember {
                kind: None,
                query: self,
            });
            union
        };
        union.unions.push(UnionMember {
            kind: Some(kind),
            query: other,
        });
        union
    }

    // ==================== Pagination ====================

    /// Set the row count (LIMIT).
    pub fn limit(mut self, count: i64) -> Self {
        self.limit.get_or_insert_with(Limit::default).count = count;
        self
    }

    /// Set the number of rows to skip (OFFSET).
    pub fn offset(mut self, offset: i64) -> Self {
        self.limit.get_or_insert_with(Limit::default).offset = offset;
        self
    }

    /// Declare the key column used by TOP-style paging with an offset.
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.limit.get_or_insert_with(Limit::default).primary_key = Some(column.into());
        self
    }

    /// Replace the whole pagination settings.
    pub fn paginate(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// A copy of this builder without its pagination settings.
    pub fn unpaged(&self) -> Builder {
        let mut copy = self.clone();
        copy.limit = None;
        copy
    }

    // ==================== Render ====================

    /// Render into a new [`BuiltQuery`].
    pub fn build(&self) -> BuildResult<BuiltQuery> {
        let mut w = Writer::new();
        self.write_to(&mut w)?;
        let built = BuiltQuery::from(w);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "sqlweave.build",
            kind = ?self.kind,
            sql = %built.sql,
            args = built.args.len(),
            "built statement"
        );

        Ok(built)
    }

    /// Render into SQL text and arguments.
    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        self.build().map(|b| (b.sql, b.args))
    }

    /// Render into a writer.
    ///
    /// Output is appended only when rendering succeeds.
    pub fn write_to(&self, w: &mut Writer) -> BuildResult<()> {
        let mut out = Writer::new();
        self.render(&mut out, None)?;
        w.append(out);
        Ok(())
    }

    /// Render with the dialect inherited from an enclosing statement.
    pub(crate) fn render(&self, w: &mut Writer, inherited: Option<&Dialect>) -> BuildResult<()> {
        let dialect = self.dialect.as_ref().or(inherited);

        match &self.limit {
            Some(limit) => {
                check_pageable(self.kind)?;
                limit.validate()?;
                let Some(dialect) = dialect else {
                    return Err(BuildError::unsupported_pagination("no dialect set"));
                };
                let paged = paginate(dialect, self, limit)?;
                w.push_with_args(&paged.sql, &paged.args);
                Ok(())
            }
            None => self.write_statement(w, dialect),
        }
    }

    /// Render the statement itself, ignoring any pagination settings.
    pub(crate) fn write_statement(&self, w: &mut Writer, dialect: Option<&Dialect>) -> BuildResult<()> {
        match self.kind {
            StatementKind::Select => select::write_select(self, w, dialect),
            StatementKind::Insert => insert::write_insert(self, w, dialect),
            StatementKind::Update => update::write_update(self, w, dialect),
            StatementKind::Delete => delete::write_delete(self, w, dialect),
            StatementKind::Union => union::write_union(self, w, dialect),
        }
    }

    // ==================== Crate-internal access ====================

    pub(crate) fn filter_cond(&self) -> &Cond {
        &self.filter
    }

    pub(crate) fn set_selects(&mut self, selects: Vec<String>) {
        self.selects = selects;
    }

    pub(crate) fn set_filter(&mut self, cond: Cond) {
        self.filter = cond;
    }

    pub(crate) fn take_order_by(&mut self) -> Vec<Expr> {
        std::mem::take(&mut self.order_by)
    }

    pub(crate) fn set_order_by(&mut self, items: Vec<Expr>) {
        self.order_by = items;
    }
}

/// Render `query` as a nested statement (FROM source, IN sub-query, UNION
/// member) into a scoped writer, then splice it into `w`.
pub(crate) fn write_nested(
    query: &Builder,
    outer: Option<&Dialect>,
    w: &mut Writer,
) -> BuildResult<()> {
    if !matches!(query.kind, StatementKind::Select | StatementKind::Union) {
        return Err(BuildError::UnexpectedSubQuery);
    }
    check_dialect(outer, query.dialect.as_ref())?;

    let mut sub = Writer::new();
    query.render(&mut sub, outer)?;
    w.append(sub);
    Ok(())
}

pub(crate) fn check_dialect(outer: Option<&Dialect>, inner: Option<&Dialect>) -> BuildResult<()> {
    match (outer, inner) {
        (Some(outer), Some(inner)) if outer != inner => Err(BuildError::InconsistentDialect {
            outer: outer.to_string(),
            inner: inner.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Render a non-empty condition after `keyword`.
fn write_clause(
    w: &mut Writer,
    keyword: &str,
    cond: &Cond,
    dialect: Option<&Dialect>,
) -> BuildResult<()> {
    if cond.is_empty() {
        return Ok(());
    }
    w.push(keyword);
    cond.write_in(w, dialect)
}

fn write_order_by(w: &mut Writer, items: &[Expr]) {
    if items.is_empty() {
        return;
    }
    w.push(" ORDER BY ");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        item.write_to(w);
    }
}

fn require_table(b: &Builder) -> BuildResult<&str> {
    match &b.source {
        Some(Source::Table(name)) if !name.trim().is_empty() => Ok(name),
        _ => Err(BuildError::NoTableName),
    }
}
