use sqlweave::{Dialect, PagingStyle};
use std::fmt::Write as _;

/// One line per known dialect: name, paging strategy, placeholder style.
pub fn listing() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<14} {}", "DIALECT", "PAGING", "PLACEHOLDER");
    for dialect in Dialect::KNOWN {
        let paging = match dialect.paging_style() {
            Some(PagingStyle::LimitOffset) => "LIMIT/OFFSET",
            Some(PagingStyle::RowNum) => "ROWNUM",
            Some(PagingStyle::Top) => "TOP",
            None => "-",
        };
        let _ = writeln!(
            out,
            "{:<10} {:<14} {}",
            dialect.name(),
            paging,
            dialect.placeholder(1)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_covers_known_dialects() {
        let text = listing();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + Dialect::KNOWN.len());
        assert!(lines[0].starts_with("DIALECT"));
        assert!(text.contains("oracle     ROWNUM         :1"));
        assert!(text.contains("mssql      TOP            @p1"));
        assert!(text.contains("postgres   LIMIT/OFFSET   $1"));
    }
}
