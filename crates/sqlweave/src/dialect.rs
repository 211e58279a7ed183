//! Target SQL engines and how each one pages results.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Supported SQL dialects.
///
/// Parsing never fails: unknown names are kept in [`Dialect::Other`] so that
/// statements without pagination stay dialect-agnostic, and only the
/// pagination path rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
    Oracle,
    MsSql,
    Other(String),
}

/// How a dialect expresses "rows N..N+K".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingStyle {
    /// Native `LIMIT n OFFSET m`.
    LimitOffset,
    /// Oracle `ROWNUM` filtering over nested queries.
    RowNum,
    /// `SELECT TOP n` plus a primary-key anti-join for offsets.
    Top,
}

impl Dialect {
    /// Every dialect with a pagination strategy.
    pub const KNOWN: [Dialect; 5] = [
        Dialect::MySql,
        Dialect::Postgres,
        Dialect::Sqlite,
        Dialect::Oracle,
        Dialect::MsSql,
    ];

    /// Parse a dialect name, case-insensitively and ignoring surrounding whitespace.
    pub fn parse(name: &str) -> Self {
        let token = name.trim().to_ascii_lowercase();
        match token.as_str() {
            "mysql" => Dialect::MySql,
            "postgres" | "postgresql" => Dialect::Postgres,
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            "oracle" => Dialect::Oracle,
            "mssql" | "sqlserver" => Dialect::MsSql,
            _ => Dialect::Other(token),
        }
    }

    /// Canonical token for this dialect.
    pub fn name(&self) -> &str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite3",
            Dialect::Oracle => "oracle",
            Dialect::MsSql => "mssql",
            Dialect::Other(name) => name,
        }
    }

    /// The paging strategy, or `None` for dialects without one.
    pub fn paging_style(&self) -> Option<PagingStyle> {
        match self {
            Dialect::MySql | Dialect::Postgres | Dialect::Sqlite => Some(PagingStyle::LimitOffset),
            Dialect::Oracle => Some(PagingStyle::RowNum),
            Dialect::MsSql => Some(PagingStyle::Top),
            Dialect::Other(_) => None,
        }
    }

    /// Native placeholder for the 1-based argument `index`.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", index),
            Dialect::Oracle => format!(":{}", index),
            Dialect::MsSql => format!("@p{}", index),
            Dialect::MySql | Dialect::Sqlite | Dialect::Other(_) => "?".to_string(),
        }
    }

    /// Rewrite `?` placeholders into this dialect's native form.
    ///
    /// `?` inside single-quoted string literals is left untouched.
    pub fn rebind(&self, sql: &str) -> String {
        if matches!(self, Dialect::MySql | Dialect::Sqlite | Dialect::Other(_)) {
            return sql.to_string();
        }

        let mut result = String::with_capacity(sql.len() + 8);
        let mut in_literal = false;
        let mut index = 0;
        for ch in sql.chars() {
            match ch {
                '\'' => {
                    in_literal = !in_literal;
                    result.push(ch);
                }
                '?' if !in_literal => {
                    index += 1;
                    result.push_str(&self.placeholder(index));
                }
                _ => result.push(ch),
            }
        }
        result
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Dialect::parse(s))
    }
}

impl From<&str> for Dialect {
    fn from(s: &str) -> Self {
        Dialect::parse(s)
    }
}

impl Serialize for Dialect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Dialect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Dialect::parse(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(Dialect::parse("  MySQL "), Dialect::MySql);
        assert_eq!(Dialect::parse("ORACLE"), Dialect::Oracle);
        assert_eq!(Dialect::parse("sqlite3"), Dialect::Sqlite);
        assert_eq!(Dialect::parse("PostgreSQL"), Dialect::Postgres);
        assert_eq!(Dialect::parse("MsSql"), Dialect::MsSql);
        assert_eq!(Dialect::parse(" db2 "), Dialect::Other("db2".to_string()));
    }

    #[test]
    fn test_unknown_names_are_lowercased() {
        assert_eq!(Dialect::parse("DB2"), Dialect::parse("db2"));
        assert_eq!(Dialect::parse(" Firebird").name(), "firebird");
    }

    #[test]
    fn test_paging_style() {
        assert_eq!(Dialect::MySql.paging_style(), Some(PagingStyle::LimitOffset));
        assert_eq!(Dialect::Oracle.paging_style(), Some(PagingStyle::RowNum));
        assert_eq!(Dialect::MsSql.paging_style(), Some(PagingStyle::Top));
        assert_eq!(Dialect::parse("db2").paging_style(), None);
    }

    #[test]
    fn test_rebind() {
        let sql = "SELECT * FROM t WHERE a = ? AND b = '?' AND c IN (?, ?)";
        assert_eq!(
            Dialect::Postgres.rebind(sql),
            "SELECT * FROM t WHERE a = $1 AND b = '?' AND c IN ($2, $3)"
        );
        assert_eq!(
            Dialect::Oracle.rebind(sql),
            "SELECT * FROM t WHERE a = :1 AND b = '?' AND c IN (:2, :3)"
        );
        assert_eq!(
            Dialect::MsSql.rebind(sql),
            "SELECT * FROM t WHERE a = @p1 AND b = '?' AND c IN (@p2, @p3)"
        );
        assert_eq!(Dialect::MySql.rebind(sql), sql);
    }

    #[test]
    fn test_serde_round_trips_token() {
        let d: Dialect = serde_json::from_str("\" Oracle \"").unwrap();
        assert_eq!(d, Dialect::Oracle);
        assert_eq!(serde_json::to_string(&Dialect::MsSql).unwrap(), "\"mssql\"");
    }
}
