//! Oracle dialect.
//!
//! Oracle support in this crate is intentionally partial — see the Open
//! Questions in DESIGN.md. `SELECT` compiles, but upserts are rejected
//! outright rather than emitting a plausible-looking but unverified form.
//!
//! - ANSI double-quote identifier quoting
//! - No native boolean type; rendered as `1`/`0`
//! - `LIMIT n OFFSET m` pagination, documented as a limitation rather than
//!   native Oracle syntax (pre-12c Oracle has neither `LIMIT` nor `OFFSET`)

use super::helpers;
use super::SqlDialect;

/// Oracle dialect.
#[derive(Debug, Clone, Copy)]
pub struct Oracle;

impl SqlDialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn supports_upsert(&self) -> bool {
        false
    }
}
