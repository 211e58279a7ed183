//! Portable LIMIT/OFFSET translation.
//!
//! [`paginate`] turns "rows `offset..offset + count`" into whatever the target
//! engine understands:
//!
//! - LIMIT/OFFSET engines (MySQL, Postgres, SQLite) get the clause appended.
//! - Oracle gets `ROWNUM` filtering over nested queries.
//! - SQL Server gets `SELECT TOP n`, plus a primary-key `NOT IN` anti-join
//!   to skip rows when an offset is requested.
//!
//! The rewrite works on a copy of the query with its pagination removed, so
//! the input builder is never touched and wrappers never page again.

use crate::builder::{Builder, StatementKind, check_dialect};
use crate::built::BuiltQuery;
use crate::cond::Cond;
use crate::dialect::{Dialect, PagingStyle};
use crate::error::{BuildError, BuildResult};
use crate::select;
use crate::writer::Writer;

/// Synthetic row-number column used by the Oracle rewrite.
const ROW_NUMBER: &str = "RN";
/// Alias of the first derived table in a rewrite.
const INNER_ALIAS: &str = "at";
/// Alias of the second derived table in a rewrite.
const OUTER_ALIAS: &str = "att";

/// Pagination request: `count` rows starting after `offset` rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limit {
    /// Number of rows to return; must be positive.
    pub count: i64,
    /// Number of rows to skip; must not be negative.
    pub offset: i64,
    /// Key column for TOP-style paging with an offset.
    pub primary_key: Option<String>,
}

impl Limit {
    /// `count` rows starting after `offset` rows.
    pub fn new(count: i64, offset: i64) -> Self {
        Self {
            count,
            offset,
            primary_key: None,
        }
    }

    /// Set the primary key column.
    pub fn with_primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    /// Check the bounds of the request.
    pub fn validate(&self) -> BuildResult<()> {
        if self.count <= 0 {
            return Err(BuildError::invalid_pagination(format!(
                "count must be positive, got {}",
                self.count
            )));
        }
        if self.offset < 0 {
            return Err(BuildError::invalid_pagination(format!(
                "offset must not be negative, got {}",
                self.offset
            )));
        }
        Ok(())
    }

    /// `offset + count`, the last row number of the page.
    fn end(&self) -> BuildResult<i64> {
        self.offset
            .checked_add(self.count)
            .ok_or_else(|| BuildError::invalid_pagination("offset + count overflows"))
    }
}

/// Check that `kind` may be paged at all.
pub(crate) fn check_pageable(kind: StatementKind) -> BuildResult<()> {
    match kind {
        StatementKind::Select | StatementKind::Union => Ok(()),
        other => Err(BuildError::invalid_pagination(format!(
            "{other:?} statements cannot be paged"
        ))),
    }
}

/// Render `query` limited to the rows described by `page`, for `dialect`.
///
/// Any pagination already set on `query` is ignored in favor of `page`.
///
/// # Example
/// ```
/// use sqlweave::{Dialect, Limit, paginate, select};
///
/// let q = select(&["id", "name"]).from("users").eq("active", true).order_by("id");
/// let built = paginate(&Dialect::Postgres, &q, &Limit::new(10, 20)).unwrap();
/// assert_eq!(
///     built.sql,
///     "SELECT id, name FROM users WHERE active = ? ORDER BY id LIMIT 10 OFFSET 20"
/// );
/// ```
pub fn paginate(dialect: &Dialect, query: &Builder, page: &Limit) -> BuildResult<BuiltQuery> {
    check_pageable(query.kind())?;
    page.validate()?;
    check_dialect(Some(dialect), query.dialect_tag())?;

    let Some(style) = dialect.paging_style() else {
        return Err(BuildError::unsupported_pagination(format!(
            "dialect {dialect} has no pagination strategy"
        )));
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "sqlweave.paginate",
        dialect = %dialect,
        strategy = ?style,
        offset = page.offset,
        count = page.count,
        "rewriting pagination"
    );

    let query = query.unpaged();
    let mut w = Writer::new();
    match style {
        PagingStyle::LimitOffset => limit_offset(dialect, &query, page, &mut w)?,
        PagingStyle::RowNum => row_num(dialect, query, page, &mut w)?,
        PagingStyle::Top => top(dialect, query, page, &mut w)?,
    }
    Ok(BuiltQuery::from(w))
}

/// `Q LIMIT n [OFFSET m]`
fn limit_offset(dialect: &Dialect, query: &Builder, page: &Limit, w: &mut Writer) -> BuildResult<()> {
    query.render(w, Some(dialect))?;
    w.push(&format!(" LIMIT {}", page.count));
    if page.offset > 0 {
        w.push(&format!(" OFFSET {}", page.offset));
    }
    Ok(())
}

/// Oracle: filter on `ROWNUM` captured in a nested query.
fn row_num(dialect: &Dialect, query: Builder, page: &Limit, w: &mut Writer) -> BuildResult<()> {
    let selects = query.selects().to_vec();
    let cols: Vec<&str> = selects.iter().map(String::as_str).collect();

    if cols.is_empty() {
        if page.offset > 0 {
            return Err(BuildError::unsupported_pagination(
                "an offset on Oracle needs an explicit column list",
            ));
        }
        // SELECT * FROM (Q) at WHERE ROWNUM <= n
        return select(&[])
            .dialect(dialect.clone())
            .from_query_as(query, INNER_ALIAS)
            .filter(Cond::raw(format!("ROWNUM <= {}", page.count)))
            .render(w, None);
    }

    // SELECT S, ROWNUM AS RN FROM (Q)
    let numbered = select(&cols)
        .dialect(dialect.clone())
        .add_select(format!("ROWNUM AS {ROW_NUMBER}"))
        .from_query(query);

    if page.offset == 0 {
        return select(&cols)
            .dialect(dialect.clone())
            .from_query_as(numbered, INNER_ALIAS)
            .filter(Cond::raw(format!(
                "{INNER_ALIAS}.{ROW_NUMBER} <= {}",
                page.count
            )))
            .render(w, None);
    }

    let bounded = select(&cols)
        .dialect(dialect.clone())
        .add_select(ROW_NUMBER)
        .from_query_as(numbered, INNER_ALIAS)
        .filter(Cond::raw(format!(
            "{INNER_ALIAS}.{ROW_NUMBER} <= {}",
            page.end()?
        )));

    select(&cols)
        .dialect(dialect.clone())
        .from_query_as(bounded, OUTER_ALIAS)
        .filter(Cond::raw(format!(
            "{OUTER_ALIAS}.{ROW_NUMBER} > {}",
            page.offset
        )))
        .render(w, None)
}

/// SQL Server: `SELECT TOP n`, skipping rows with a key anti-join.
fn top(dialect: &Dialect, query: Builder, page: &Limit, w: &mut Writer) -> BuildResult<()> {
    let base = if query.kind() == StatementKind::Union {
        // TOP needs the ordering on the wrapping query, not inside the derived table
        let mut query = query;
        let order_by = query.take_order_by();
        let mut wrapped = select(&[])
            .dialect(dialect.clone())
            .from_query_as(query, INNER_ALIAS);
        wrapped.set_order_by(order_by);
        wrapped
    } else {
        query
    };

    let cols = if base.selects().is_empty() {
        "*".to_string()
    } else {
        base.selects().join(", ")
    };

    if page.offset == 0 {
        let mut paged = base;
        paged.set_selects(vec![format!("TOP {} {}", page.count, cols)]);
        return paged.render(w, Some(dialect));
    }

    let Some(pk) = page.primary_key.as_deref() else {
        return Err(BuildError::MissingPrimaryKey);
    };
    if base.selects().is_empty() {
        return Err(BuildError::unsupported_pagination(
            "an offset with TOP needs an explicit column list",
        ));
    }

    // Keys of the first offset + count rows, in the original order.
    let mut skipped = base.clone();
    skipped.set_selects(vec![format!("TOP {} {}", page.end()?, pk)]);

    let mut paged = base;
    paged.set_selects(vec![format!("TOP {} {}", page.count, cols)]);
    let filter = paged.filter_cond().clone().and(Cond::not_in_query(pk, skipped));
    paged.set_filter(filter);

    paged.render(w, Some(dialect))
}
