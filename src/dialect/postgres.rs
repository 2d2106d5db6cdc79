//! PostgreSQL dialect.
//!
//! - ANSI double-quote identifier quoting
//! - Native `true`/`false` boolean literals
//! - `LIMIT n OFFSET m` pagination
//! - `INSERT ... ON CONFLICT (...) DO UPDATE SET ...` upserts

use super::helpers;
use super::SqlDialect;

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    // Uses the default `pagination_trailing` (`LIMIT ... OFFSET ...`).
}
