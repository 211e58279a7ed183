use super::{Assign, Builder, require_table};
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::writer::Writer;

/// INSERT INTO t (a, b) VALUES (?, ?)
pub(super) fn write_insert(
    b: &Builder,
    w: &mut Writer,
    _dialect: Option<&Dialect>,
) -> BuildResult<()> {
    let table = require_table(b)?;
    if b.assignments.is_empty() {
        return Err(BuildError::NoColumnToInsert);
    }

    w.push("INSERT INTO ").push(table).push(" (");
    for (i, (column, _)) in b.assignments.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.push(column);
    }

    w.push(") VALUES (");
    for (i, (_, assign)) in b.assignments.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        match assign {
            Assign::Value(value) => {
                w.push_bind(value.clone());
            }
            Assign::Expr(expr) => expr.write_to(w),
        }
    }
    w.push(")");
    Ok(())
}
