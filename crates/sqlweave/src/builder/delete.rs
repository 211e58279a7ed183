use super::{Builder, require_table, write_clause};
use crate::dialect::Dialect;
use crate::error::BuildResult;
use crate::writer::Writer;

/// DELETE FROM t WHERE ...
///
/// An empty filter matches nothing (`WHERE 1=0`) unless the builder was
/// explicitly allowed to delete every row.
pub(super) fn write_delete(
    b: &Builder,
    w: &mut Writer,
    dialect: Option<&Dialect>,
) -> BuildResult<()> {
    let table = require_table(b)?;
    w.push("DELETE FROM ").push(table);

    if b.filter.is_empty() {
        if !b.allow_delete_all {
            w.push(" WHERE 1=0");
        }
        return Ok(());
    }
    write_clause(w, " WHERE ", &b.filter, dialect)
}
