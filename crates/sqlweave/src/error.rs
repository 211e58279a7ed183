//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while rendering a statement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No table or sub-query was given as the statement source
    #[error("no table name")]
    NoTableName,

    /// A sub-query source has no alias but the outer statement filters on it
    #[error("a derived table in FROM must be named when the outer query has conditions")]
    UnnamedDerivedTable,

    /// A statement kind that cannot act as a table expression was nested
    #[error("unexpected sub-query: only SELECT and UNION can be nested")]
    UnexpectedSubQuery,

    /// Outer and nested statements were bound to different dialects
    #[error("inconsistent dialect: outer query is {outer}, nested query is {inner}")]
    InconsistentDialect { outer: String, inner: String },

    /// Bad offset/count, or pagination on a statement that cannot be paged
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// The dialect (or the shape of the query) has no pagination rewrite
    #[error("unsupported pagination: {0}")]
    UnsupportedPagination(String),

    /// TOP-style paging with an offset needs a key column for the anti-join
    #[error("a primary key column is required for TOP pagination with an offset")]
    MissingPrimaryKey,

    /// INSERT without any column assignment
    #[error("no column to insert")]
    NoColumnToInsert,

    /// UPDATE without any column assignment
    #[error("no column to update")]
    NoColumnToUpdate,

    /// A UNION member that is not a SELECT
    #[error("unsupported union member: only SELECT statements can be combined")]
    UnsupportedUnionMember,

    /// A UNION statement carrying a WHERE condition
    #[error("unexpected condition on a UNION statement")]
    UnexpectedUnionCondition,

    /// Inlining args found more placeholders than arguments
    #[error("need more arguments: {placeholders} placeholders, {args} arguments")]
    NeedMoreArguments { placeholders: usize, args: usize },
}

impl BuildError {
    /// Create an invalid pagination error
    pub fn invalid_pagination(message: impl Into<String>) -> Self {
        Self::InvalidPagination(message.into())
    }

    /// Create an unsupported pagination error
    pub fn unsupported_pagination(message: impl Into<String>) -> Self {
        Self::UnsupportedPagination(message.into())
    }

    /// Check if this error came from the pagination path
    pub fn is_pagination(&self) -> bool {
        matches!(
            self,
            Self::InvalidPagination(_) | Self::UnsupportedPagination(_) | Self::MissingPrimaryKey
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildError::InconsistentDialect {
            outer: "mysql".to_string(),
            inner: "oracle".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "inconsistent dialect: outer query is mysql, nested query is oracle"
        );
        assert_eq!(
            BuildError::invalid_pagination("count must be positive").to_string(),
            "invalid pagination: count must be positive"
        );
    }

    #[test]
    fn test_is_pagination() {
        assert!(BuildError::MissingPrimaryKey.is_pagination());
        assert!(BuildError::unsupported_pagination("x").is_pagination());
        assert!(!BuildError::NoTableName.is_pagination());
    }
}
