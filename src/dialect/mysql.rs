//! MySQL dialect.
//!
//! - Backtick identifier quoting
//! - Boolean is `TINYINT(1)`, rendered as `1`/`0`
//! - `LIMIT n OFFSET m` pagination
//! - `INSERT ... ON DUPLICATE KEY UPDATE ...` upserts

use super::helpers;
use super::SqlDialect;

/// MySQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    // Uses the default `pagination_trailing` (`LIMIT ... OFFSET ...`).
}
