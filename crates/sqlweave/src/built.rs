//! Rendered statement: SQL text plus its ordered arguments.

use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::value::Value;
use crate::writer::{PLACEHOLDER, Writer};
use serde::Serialize;

/// The result of a render.
///
/// `sql` uses `?` placeholders; `args[i]` binds the `i`-th one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

impl BuiltQuery {
    /// Number of `?` placeholders outside string literals.
    pub fn placeholder_count(&self) -> usize {
        let mut in_literal = false;
        let mut count = 0;
        for ch in self.sql.chars() {
            match ch {
                '\'' => in_literal = !in_literal,
                PLACEHOLDER if !in_literal => count += 1,
                _ => {}
            }
        }
        count
    }

    /// Inline the arguments into the SQL as literals.
    ///
    /// Meant for logs and debugging, never for execution.
    pub fn to_bound_sql(&self) -> BuildResult<String> {
        let needed = self.placeholder_count();
        if needed > self.args.len() {
            return Err(BuildError::NeedMoreArguments {
                placeholders: needed,
                args: self.args.len(),
            });
        }

        let mut out = String::with_capacity(self.sql.len() + self.args.len() * 8);
        let mut args = self.args.iter();
        let mut in_literal = false;
        for ch in self.sql.chars() {
            match ch {
                '\'' => {
                    in_literal = !in_literal;
                    out.push(ch);
                }
                PLACEHOLDER if !in_literal => match args.next() {
                    Some(arg) => out.push_str(&arg.to_literal()),
                    None => out.push(ch),
                },
                _ => out.push(ch),
            }
        }
        Ok(out)
    }

    /// Rewrite `?` placeholders into `dialect`'s native form.
    pub fn rebind(&self, dialect: &Dialect) -> BuiltQuery {
        BuiltQuery {
            sql: dialect.rebind(&self.sql),
            args: self.args.clone(),
        }
    }
}

impl From<Writer> for BuiltQuery {
    fn from(w: Writer) -> Self {
        let (sql, args) = w.into_parts();
        Self { sql, args }
    }
}
