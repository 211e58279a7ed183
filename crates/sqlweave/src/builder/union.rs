use super::{Builder, StatementKind, write_nested, write_order_by};
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::writer::Writer;

/// (A) UNION ALL (B) UNION (C) [ORDER BY ...]
pub(super) fn write_union(
    b: &Builder,
    w: &mut Writer,
    dialect: Option<&Dialect>,
) -> BuildResult<()> {
    if !b.filter.is_empty() {
        return Err(BuildError::UnexpectedUnionCondition);
    }
    if b.unions.is_empty() {
        return Err(BuildError::UnsupportedUnionMember);
    }

    for member in &b.unions {
        if member.query.kind != StatementKind::Select {
            return Err(BuildError::UnsupportedUnionMember);
        }
        if let Some(kind) = member.kind {
            w.push(kind.keyword());
        }
        w.push("(");
        write_nested(&member.query, dialect, w)?;
        w.push(")");
    }

    write_order_by(w, &b.order_by);
    Ok(())
}
