//! TOML query descriptions.
//!
//! ```toml
//! kind = "select"
//! dialect = "mssql"
//! table = "users"
//! columns = ["id", "name"]
//! order_by = ["id DESC"]
//!
//! [[filter]]
//! column = "status"
//! op = "eq"
//! value = "active"
//!
//! [page]
//! count = 10
//! offset = 20
//! primary_key = "id"
//! ```
//!
//! A `[subquery]` table (plus `alias`) can replace `table`; it is itself a
//! query description.

use serde::Deserialize;
use sqlweave::{Builder, Cond, Dialect, Limit, Value, delete_from, insert_into, select, update};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryFile {
    #[serde(default)]
    pub kind: QueryKind,
    pub dialect: Option<Dialect>,
    pub table: Option<String>,
    pub subquery: Option<Box<QueryFile>>,
    pub alias: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub filter: Vec<FilterSpec>,
    pub group_by: Option<String>,
    #[serde(default)]
    pub order_by: Vec<String>,
    pub page: Option<PageSpec>,
    /// INSERT/UPDATE assignments, applied in column-name order.
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
    /// DELETE without filter removes every row.
    #[serde(default)]
    pub delete_all: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub column: String,
    pub op: FilterOp,
    pub value: Option<FilterValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

/// A scalar, or a list for `in` / `not_in`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    List(Vec<Value>),
    One(Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSpec {
    pub count: i64,
    #[serde(default)]
    pub offset: i64,
    pub primary_key: Option<String>,
}

impl QueryFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Convert into a builder. `dialect` overrides the file's own dialect.
    pub fn into_builder(self, dialect: Option<&Dialect>) -> anyhow::Result<Builder> {
        let mut b = match self.kind {
            QueryKind::Select => {
                let cols: Vec<&str> = self.columns.iter().map(String::as_str).collect();
                select(&cols)
            }
            QueryKind::Insert => insert_into(self.table_name()?),
            QueryKind::Update => update(self.table_name()?),
            QueryKind::Delete => delete_from(self.table_name()?).allow_delete_all(self.delete_all),
        };

        if let Some(d) = dialect.or(self.dialect.as_ref()) {
            b = b.dialect(d.clone());
        }

        if self.kind == QueryKind::Select {
            b = match (self.table, self.subquery) {
                (Some(_), Some(_)) => anyhow::bail!("use either `table` or `subquery`, not both"),
                (Some(table), None) => match self.alias {
                    Some(alias) => b.from(format!("{table} {alias}")),
                    None => b.from(table),
                },
                (None, Some(sub)) => {
                    let sub = sub.into_builder(None)?;
                    match self.alias {
                        Some(alias) => b.from_query_as(sub, alias),
                        None => b.from_query(sub),
                    }
                }
                (None, None) => anyhow::bail!("missing `table` or `subquery`"),
            };
        }

        for f in self.filter {
            b = b.and(f.into_cond()?);
        }
        if let Some(group_by) = self.group_by {
            b = b.group_by(group_by);
        }
        for item in self.order_by {
            b = b.order_by(item);
        }
        for (column, value) in self.values {
            b = b.set(column, value);
        }
        if let Some(page) = self.page {
            let mut limit = Limit::new(page.count, page.offset);
            limit.primary_key = page.primary_key;
            b = b.paginate(limit);
        }
        Ok(b)
    }

    fn table_name(&self) -> anyhow::Result<String> {
        if self.subquery.is_some() {
            anyhow::bail!("`subquery` is only allowed for select");
        }
        match &self.table {
            Some(t) => Ok(t.clone()),
            None => anyhow::bail!("missing `table`"),
        }
    }
}

impl FilterSpec {
    fn into_cond(self) -> anyhow::Result<Cond> {
        let column = self.column;
        let cond = match (self.op, self.value) {
            (FilterOp::IsNull, None) => Cond::is_null(column),
            (FilterOp::IsNotNull, None) => Cond::is_not_null(column),
            (FilterOp::IsNull | FilterOp::IsNotNull, Some(_)) => {
                anyhow::bail!("filter on `{column}`: null checks take no value")
            }
            (FilterOp::In, Some(FilterValue::List(values))) => Cond::in_list(column, values),
            (FilterOp::NotIn, Some(FilterValue::List(values))) => Cond::not_in(column, values),
            (FilterOp::In | FilterOp::NotIn, _) => {
                anyhow::bail!("filter on `{column}`: `in` / `not_in` need a list value")
            }
            (FilterOp::Eq, Some(FilterValue::One(v))) => Cond::eq(column, v),
            (FilterOp::Ne, Some(FilterValue::One(v))) => Cond::ne(column, v),
            (FilterOp::Lt, Some(FilterValue::One(v))) => Cond::lt(column, v),
            (FilterOp::Lte, Some(FilterValue::One(v))) => Cond::lte(column, v),
            (FilterOp::Gt, Some(FilterValue::One(v))) => Cond::gt(column, v),
            (FilterOp::Gte, Some(FilterValue::One(v))) => Cond::gte(column, v),
            (FilterOp::Like, Some(FilterValue::One(v))) => Cond::like(column, v),
            (op, _) => anyhow::bail!("filter on `{column}`: {op:?} needs a single value"),
        };
        Ok(cond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlweave::BuildError;

    fn build(raw: &str) -> sqlweave::BuiltQuery {
        QueryFile::parse(raw)
            .unwrap()
            .into_builder(None)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn select_with_filters_and_page() {
        let built = build(
            r#"
dialect = "mssql"
table = "users"
columns = ["id", "name"]
order_by = ["id"]

[[filter]]
column = "status"
op = "eq"
value = "active"

[[filter]]
column = "role"
op = "in"
value = ["admin", "owner"]

[[filter]]
column = "deleted_at"
op = "is_null"

[page]
count = 10
offset = 20
primary_key = "id"
"#,
        );
        assert_eq!(
            built.sql,
            "SELECT TOP 10 id, name FROM users WHERE status = ? AND role IN (?, ?) AND deleted_at IS NULL \
             AND id NOT IN (SELECT TOP 30 id FROM users WHERE status = ? AND role IN (?, ?) AND deleted_at IS NULL ORDER BY id) \
             ORDER BY id"
        );
        assert_eq!(built.args.len(), 6);
        assert_eq!(built.args[1], Value::from("admin"));
    }

    #[test]
    fn select_from_subquery() {
        let built = build(
            r#"
dialect = "oracle"
alias = "o"
columns = ["o.id"]

[subquery]
table = "orders"
columns = ["id"]

[[subquery.filter]]
column = "total"
op = "gt"
value = 100

[[filter]]
column = "o.id"
op = "lt"
value = 50

[page]
count = 5
"#,
        );
        assert_eq!(
            built.sql,
            "SELECT o.id FROM (SELECT o.id, ROWNUM AS RN FROM \
             (SELECT o.id FROM (SELECT id FROM orders WHERE total > ?) o WHERE o.id < ?)) at \
             WHERE at.RN <= 5"
        );
        assert_eq!(built.args, vec![Value::Int(100), Value::Int(50)]);
    }

    #[test]
    fn insert_values_in_column_order() {
        let built = build(
            r#"
kind = "insert"
table = "users"

[values]
name = "alice"
age = 30
active = true
"#,
        );
        assert_eq!(built.sql, "INSERT INTO users (active, age, name) VALUES (?, ?, ?)");
        assert_eq!(
            built.args,
            vec![Value::Bool(true), Value::Int(30), Value::from("alice")]
        );
    }

    #[test]
    fn delete_requires_opt_in_for_all_rows() {
        let built = build("kind = \"delete\"\ntable = \"sessions\"\n");
        assert_eq!(built.sql, "DELETE FROM sessions WHERE 1=0");

        let built = build("kind = \"delete\"\ntable = \"sessions\"\ndelete_all = true\n");
        assert_eq!(built.sql, "DELETE FROM sessions");
    }

    #[test]
    fn dialect_override_wins() {
        let q = QueryFile::parse("dialect = \"mysql\"\ntable = \"t\"\n[page]\ncount = 2\n").unwrap();
        let built = q
            .into_builder(Some(&Dialect::MsSql))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(built.sql, "SELECT TOP 2 * FROM t");
    }

    #[test]
    fn bad_descriptions() {
        let err = QueryFile::parse("columns = [\"id\"]")
            .unwrap()
            .into_builder(None)
            .unwrap_err();
        assert_eq!(err.to_string(), "missing `table` or `subquery`");

        let err = QueryFile::parse(
            "table = \"t\"\n[[filter]]\ncolumn = \"id\"\nop = \"in\"\nvalue = 1\n",
        )
        .unwrap()
        .into_builder(None)
        .unwrap_err();
        assert!(err.to_string().contains("need a list value"));

        assert!(QueryFile::parse("kind = \"merge\"\ntable = \"t\"").is_err());
        assert!(QueryFile::parse("tabel = \"t\"").is_err());
    }

    #[test]
    fn page_errors_surface_from_builder() {
        let b = QueryFile::parse("dialect = \"oracle\"\ntable = \"t\"\n[page]\ncount = 0\n")
            .unwrap()
            .into_builder(None)
            .unwrap();
        assert!(matches!(b.build(), Err(BuildError::InvalidPagination(_))));
    }
}
