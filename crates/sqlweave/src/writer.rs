//! Output sink for a render: SQL text plus positional arguments.

use crate::value::Value;
use std::fmt;

/// The positional placeholder emitted into rendered SQL.
pub const PLACEHOLDER: char = '?';

/// An append-only SQL buffer with its ordered argument list.
///
/// Every `?` pushed through [`Writer::push_bind`] appends exactly one argument,
/// so the argument order always matches placeholder order in the text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Writer {
    sql: String,
    args: Vec<Value>,
}

impl Writer {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw SQL (no arguments).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a single character.
    pub fn push_char(&mut self, ch: char) -> &mut Self {
        self.sql.push(ch);
        self
    }

    /// Append a placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.sql.push(PLACEHOLDER);
        self.args.push(value.into());
        self
    }

    /// Append a comma-separated list of placeholders and bind all values.
    pub fn push_bind_list(&mut self, values: &[Value]) -> &mut Self {
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.push_bind(v.clone());
        }
        self
    }

    /// Append SQL that already contains `?` placeholders, with their args.
    pub fn push_with_args(&mut self, sql: &str, args: &[Value]) -> &mut Self {
        self.sql.push_str(sql);
        self.args.extend_from_slice(args);
        self
    }

    /// Splice another writer's text and arguments at the current position.
    pub fn append(&mut self, other: Writer) -> &mut Self {
        self.sql.push_str(&other.sql);
        self.args.extend(other.args);
        self
    }

    /// The SQL written so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The arguments bound so far.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty() && self.args.is_empty()
    }

    /// Clear both the text buffer and the arguments.
    pub fn reset(&mut self) {
        self.sql.clear();
        self.args.clear();
    }

    /// Consume the writer into its parts.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }
}

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sql.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn test_push_bind_keeps_order() {
        let mut w = Writer::new();
        w.push("a = ").push_bind(1i64).push(" AND b = ").push_bind("x");
        assert_eq!(w.sql(), "a = ? AND b = ?");
        assert_eq!(w.args(), &[Value::Int(1), Value::from("x")]);
    }

    #[test]
    fn test_append_splices_args() {
        let mut sub = Writer::new();
        sub.push("SELECT id FROM t WHERE a = ").push_bind(2i64);

        let mut w = Writer::new();
        w.push("x = ").push_bind(1i64).push(" AND id IN (");
        w.append(sub);
        w.push(") AND y = ").push_bind(3i64);

        assert_eq!(w.sql(), "x = ? AND id IN (SELECT id FROM t WHERE a = ?) AND y = ?");
        assert_eq!(w.args(), &[Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_fmt_write_and_reset() {
        let mut w = Writer::new();
        w.push_bind(1i64);
        write!(w, " LIMIT {}", 10).unwrap();
        assert_eq!(w.sql(), "? LIMIT 10");

        w.reset();
        assert!(w.is_empty());
        assert_eq!(w.args().len(), 0);
    }

    #[test]
    fn test_push_bind_list() {
        let mut w = Writer::new();
        w.push_bind_list(&[Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(w.sql(), "?, ?, ?");
        assert_eq!(w.args().len(), 3);
    }
}
