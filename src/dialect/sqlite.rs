//! SQLite dialect.
//!
//! - ANSI double-quote identifier quoting
//! - Native `true`/`false` boolean literals (stored as integers, but SQLite
//!   accepts the keyword form since 3.23)
//! - `LIMIT n OFFSET m` pagination
//! - `INSERT ... ON CONFLICT (...) DO UPDATE SET ...` upserts, same as Postgres

use super::helpers;
use super::SqlDialect;

/// SQLite dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    // Uses the default `pagination_trailing` (`LIMIT ... OFFSET ...`).
}
