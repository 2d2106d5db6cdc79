//! SQL dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for the handful of places
//! where the five supported engines disagree on syntax:
//!
//! - Identifier quoting: `"` (Postgres/SQLite/Oracle), `` ` `` (MySQL), `[]` (SQL Server)
//! - Pagination: `LIMIT`/`OFFSET` vs `OFFSET ... FETCH` vs `TOP`
//! - Boolean literals: `true`/`false` vs `1`/`0`
//! - Upsert form: `ON CONFLICT`, `ON DUPLICATE KEY UPDATE`, `MERGE`, or unsupported
//!
//! # Usage
//!
//! ```
//! use sqlcraft::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! assert_eq!(dialect.quote_identifier("user"), "\"user\"");
//! ```

pub mod helpers;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod sqlserver;

pub use mysql::MySql;
pub use oracle::Oracle;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use sqlserver::SqlServer;

use crate::query::Pagination;
use crate::token::TokenStream;

/// SQL dialect trait — defines how dialect-sensitive SQL fragments are rendered.
///
/// Implementations handle the syntax differences between engines; everything
/// that is identical across all five supported dialects lives directly in the
/// compiler instead of being threaded through this trait.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name, used in error messages and `Display`.
    fn name(&self) -> &'static str;

    /// Quote a single identifier segment (table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    fn format_bool(&self, b: bool) -> &'static str;

    /// Emit the pagination fragment that goes immediately after `SELECT`
    /// (and `DISTINCT`, if present). Only SQL Server's `TOP n` uses this
    /// position; every other dialect returns an empty stream here.
    fn pagination_leading(&self, pagination: &Pagination) -> TokenStream {
        let _ = pagination;
        TokenStream::new()
    }

    /// Emit the pagination clause that trails the statement, after
    /// `ORDER BY`: `LIMIT`/`OFFSET`, or SQL Server's `OFFSET ... FETCH`.
    fn pagination_trailing(&self, pagination: &Pagination) -> TokenStream {
        helpers::emit_pagination_standard(pagination)
    }

    /// Whether `OFFSET`/`FETCH` pagination requires an `ORDER BY` clause to be
    /// present. SQL Server enforces this at the engine level; this crate does
    /// not validate it (documented limitation, see DESIGN.md).
    fn requires_order_by_for_offset(&self) -> bool {
        false
    }

    /// Whether this dialect has a native `MERGE`/upsert form at all.
    /// Oracle returns `false`: upserts against Oracle are an unsupported
    /// operation rather than a silently degraded one.
    fn supports_upsert(&self) -> bool {
        true
    }
}

/// The five SQL dialects this crate compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    SqlServer,
    Postgres,
    MySql,
    Sqlite,
    Oracle,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::SqlServer => &SqlServer,
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::Sqlite => &Sqlite,
            Dialect::Oracle => &Oracle,
        }
    }
}

// Implement SqlDialect for the Dialect enum by delegating to the concrete type.
// Lets call sites write `dialect.quote_identifier(...)` without first resolving
// `dialect.dialect()`.
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn pagination_leading(&self, pagination: &Pagination) -> TokenStream {
        self.dialect().pagination_leading(pagination)
    }

    fn pagination_trailing(&self, pagination: &Pagination) -> TokenStream {
        self.dialect().pagination_trailing(pagination)
    }

    fn requires_order_by_for_offset(&self) -> bool {
        self.dialect().requires_order_by_for_offset()
    }

    fn supports_upsert(&self) -> bool {
        self.dialect().supports_upsert()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_display() {
        assert_eq!(Dialect::SqlServer.to_string(), "sqlserver");
        assert_eq!(Dialect::Postgres.to_string(), "postgres");
        assert_eq!(Dialect::MySql.to_string(), "mysql");
        assert_eq!(Dialect::Sqlite.to_string(), "sqlite");
        assert_eq!(Dialect::Oracle.to_string(), "oracle");
    }

    #[test]
    fn quote_identifier_per_dialect() {
        assert_eq!(Dialect::SqlServer.quote_identifier("users"), "[users]");
        assert_eq!(Dialect::Postgres.quote_identifier("users"), "\"users\"");
        assert_eq!(Dialect::MySql.quote_identifier("users"), "`users`");
        assert_eq!(Dialect::Sqlite.quote_identifier("users"), "\"users\"");
        assert_eq!(Dialect::Oracle.quote_identifier("users"), "\"users\"");
    }

    #[test]
    fn quote_identifier_escaping() {
        assert_eq!(
            Dialect::SqlServer.quote_identifier("weird]name"),
            "[weird]]name]"
        );
        assert_eq!(
            Dialect::MySql.quote_identifier("weird`name"),
            "`weird``name`"
        );
        assert_eq!(
            Dialect::Postgres.quote_identifier("weird\"name"),
            "\"weird\"\"name\""
        );
    }

    #[test]
    fn format_bool_per_dialect() {
        assert_eq!(Dialect::Postgres.format_bool(true), "true");
        assert_eq!(Dialect::SqlServer.format_bool(true), "1");
        assert_eq!(Dialect::MySql.format_bool(false), "0");
        assert_eq!(Dialect::Sqlite.format_bool(false), "0");
    }

    #[test]
    fn upsert_support_flags() {
        assert!(Dialect::Postgres.supports_upsert());
        assert!(Dialect::MySql.supports_upsert());
        assert!(Dialect::SqlServer.supports_upsert());
        assert!(Dialect::Sqlite.supports_upsert());
        assert!(!Dialect::Oracle.supports_upsert());
    }
}
