use super::{Builder, Source, write_clause, write_nested, write_order_by};
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::writer::Writer;

/// SELECT <cols|*> FROM <source> [joins] [WHERE] [GROUP BY] [HAVING] [ORDER BY]
pub(super) fn write_select(
    b: &Builder,
    w: &mut Writer,
    dialect: Option<&Dialect>,
) -> BuildResult<()> {
    let source = b.source.as_ref().ok_or(BuildError::NoTableName)?;

    w.push("SELECT ");
    if b.selects.is_empty() {
        w.push("*");
    } else {
        w.push(&b.selects.join(", "));
    }

    w.push(" FROM ");
    write_source(b, source, w, dialect)?;

    for join in &b.joins {
        w.push_char(' ').push(join.kind.keyword()).push_char(' ');
        w.push(&join.table);
        write_clause(w, " ON ", &join.on, dialect)?;
    }

    write_clause(w, " WHERE ", &b.filter, dialect)?;

    if let Some(group_by) = &b.group_by {
        w.push(" GROUP BY ").push(group_by);
    }
    write_clause(w, " HAVING ", &b.having, dialect)?;
    write_order_by(w, &b.order_by);
    Ok(())
}

fn write_source(
    b: &Builder,
    source: &Source,
    w: &mut Writer,
    dialect: Option<&Dialect>,
) -> BuildResult<()> {
    match source {
        Source::Table(name) => {
            if name.trim().is_empty() {
                return Err(BuildError::NoTableName);
            }
            w.push(name);
        }
        Source::Query { query, alias } => {
            if alias.is_none() && !b.filter.is_empty() {
                return Err(BuildError::UnnamedDerivedTable);
            }
            w.push("(");
            write_nested(query, dialect, w)?;
            w.push(")");
            if let Some(alias) = alias {
                w.push_char(' ').push(alias);
            }
        }
    }
    Ok(())
}
