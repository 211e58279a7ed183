//! # sqlweave
//!
//! A dialect-aware SQL statement builder.
//!
//! ## Features
//!
//! - **Parameterized output**: statements render to SQL with `?` placeholders plus an ordered argument list
//! - **Portable pagination**: one `limit` / `offset` API, rewritten for LIMIT/OFFSET engines, Oracle `ROWNUM` and SQL Server `TOP`
//! - **Composable**: nested sub-queries in FROM, IN conditions and UNIONs keep their arguments in placeholder order
//! - **Safe defaults**: DELETE without a filter matches nothing, INSERT/UPDATE require assignments
//! - **Pure rendering**: building never mutates the builder, so a query can be rendered many times
//!
//! ## Example
//!
//! ```
//! use sqlweave::{Cond, Value, select};
//!
//! let query = select(&["id", "name"])
//!     .from("users")
//!     .dialect("mssql")
//!     .filter(Cond::eq("status", "active").or(Cond::gt("score", 90i64)))
//!     .order_by("id")
//!     .limit(10);
//!
//! let built = query.build().unwrap();
//! assert_eq!(
//!     built.sql,
//!     "SELECT TOP 10 id, name FROM users WHERE status = ? OR score > ? ORDER BY id"
//! );
//! assert_eq!(built.args, vec![Value::from("active"), Value::Int(90)]);
//! ```

pub mod builder;
pub mod built;
pub mod cond;
pub mod dialect;
pub mod error;
pub mod paginate;
pub mod value;
pub mod writer;

pub use builder::{Builder, JoinKind, Source, StatementKind, UnionKind};
pub use built::BuiltQuery;
pub use cond::{Cond, Expr};
pub use dialect::{Dialect, PagingStyle};
pub use error::{BuildError, BuildResult};
pub use paginate::{Limit, paginate};
pub use value::Value;
pub use writer::Writer;

/// Start a SELECT statement with the given columns (empty selects `*`).
pub fn select(columns: &[&str]) -> Builder {
    Builder::new(StatementKind::Select).select(columns)
}

/// Start an INSERT statement.
pub fn insert_into(table: impl Into<String>) -> Builder {
    Builder::new(StatementKind::Insert).from(table)
}

/// Start an UPDATE statement.
pub fn update(table: impl Into<String>) -> Builder {
    Builder::new(StatementKind::Update).from(table)
}

/// Start a DELETE statement.
pub fn delete_from(table: impl Into<String>) -> Builder {
    Builder::new(StatementKind::Delete).from(table)
}
