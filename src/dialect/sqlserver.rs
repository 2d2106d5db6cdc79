//! SQL Server (T-SQL) dialect.
//!
//! Divergences from the other four dialects:
//! - Square bracket identifier quoting (`[name]`)
//! - No native boolean; formatted as `1`/`0`
//! - `TOP n` for a bare row cap, `OFFSET ... FETCH` when an offset is present
//! - `MERGE` for upserts instead of `ON CONFLICT`/`ON DUPLICATE KEY UPDATE`

use super::helpers;
use super::SqlDialect;
use crate::query::Pagination;
use crate::token::TokenStream;

/// SQL Server (T-SQL) dialect.
#[derive(Debug, Clone, Copy)]
pub struct SqlServer;

impl SqlDialect for SqlServer {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn pagination_leading(&self, pagination: &Pagination) -> TokenStream {
        helpers::emit_pagination_top(pagination)
    }

    fn pagination_trailing(&self, pagination: &Pagination) -> TokenStream {
        helpers::emit_pagination_offset_fetch(pagination)
    }

    fn requires_order_by_for_offset(&self) -> bool {
        true
    }
}
