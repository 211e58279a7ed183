use super::{Assign, Builder, require_table, write_clause};
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::writer::Writer;

/// UPDATE t SET a = ?, b = b + 1 [WHERE ...]
pub(super) fn write_update(
    b: &Builder,
    w: &mut Writer,
    dialect: Option<&Dialect>,
) -> BuildResult<()> {
    let table = require_table(b)?;
    if b.assignments.is_empty() {
        return Err(BuildError::NoColumnToUpdate);
    }

    w.push("UPDATE ").push(table).push(" SET ");
    for (i, (column, assign)) in b.assignments.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.push(column).push(" = ");
        match assign {
            Assign::Value(value) => {
                w.push_bind(value.clone());
            }
            Assign::Expr(expr) => expr.write_to(w),
        }
    }

    write_clause(w, " WHERE ", &b.filter, dialect)
}
