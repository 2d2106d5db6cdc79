//! Test-only SQL validation helpers.
//!
//! Roundtrips compiled SQL through `sqlparser` to confirm it is at least
//! syntactically well-formed for the target engine. This is a sanity net
//! for the test suite, not part of the public API — the compiler itself
//! never parses SQL (see the crate's non-goals).

use sqlparser::dialect::{GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;

use crate::dialect::Dialect;

/// Validates that `sql` parses under the engine's real grammar.
///
/// `sqlparser` has no dedicated Oracle dialect; Oracle falls back to
/// `GenericDialect`, which is best-effort only (see DESIGN.md).
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::SqlServer => Box::new(MsSqlDialect {}),
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::Oracle => Box::new(GenericDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_well_formed_select() {
        validate_sql("SELECT * FROM users", Dialect::Postgres).unwrap();
        validate_sql("SELECT * FROM users", Dialect::MySql).unwrap();
        validate_sql("SELECT * FROM users", Dialect::Sqlite).unwrap();
    }

    #[test]
    fn rejects_malformed_sql() {
        assert!(validate_sql("SELEC * FORM users", Dialect::Postgres).is_err());
    }
}
