//! Shared helper functions for dialect implementations.
//!
//! These are reusable building blocks that concrete dialects compose to
//! implement [`super::SqlDialect`] with minimal duplication.

use crate::query::Pagination;
use crate::token::{Token, TokenStream};

// =============================================================================
// Identifier quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Postgres, SQLite, Oracle.
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: MySQL.
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote identifier with square brackets.
/// Used by: SQL Server.
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

// =============================================================================
// String quoting
// =============================================================================

/// Quote a string with single quotes, doubling embedded quotes.
/// Used by: all five dialects.
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Boolean formatting
// =============================================================================

/// Format boolean as the literal keyword `true`/`false`.
/// Used by: Postgres, SQLite.
pub fn format_bool_literal(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// Format boolean as numeric `1`/`0`.
/// Used by: SQL Server, MySQL, Oracle.
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// `LIMIT n [OFFSET m]` — used by Postgres, MySQL, SQLite (and as the
/// trailing-clause fallback for dialects with no leading `TOP`).
///
/// `Pagination::Top` is treated as a plain row cap here: dialects without a
/// native `TOP` keyword render it the same way they render `Limit`.
pub fn emit_pagination_standard(pagination: &Pagination) -> TokenStream {
    let mut ts = TokenStream::new();
    match pagination {
        Pagination::None => {}
        Pagination::Limit { n } | Pagination::Top { n } => {
            ts.push(Token::Limit).space().push(Token::LitInt(*n));
        }
        Pagination::LimitOffset { n, offset } => {
            ts.push(Token::Limit)
                .space()
                .push(Token::LitInt(*n))
                .space()
                .push(Token::Offset)
                .space()
                .push(Token::LitInt(*offset));
        }
        Pagination::OffsetOnly { offset } => {
            ts.push(Token::Offset).space().push(Token::LitInt(*offset));
        }
    }
    ts
}

/// SQL Server's `TOP n`, emitted immediately after `SELECT [DISTINCT]`.
/// Applies to `Limit` and `Top` (a bare row cap with no offset); `LimitOffset`
/// and `OffsetOnly` instead use [`emit_pagination_offset_fetch`].
pub fn emit_pagination_top(pagination: &Pagination) -> TokenStream {
    let mut ts = TokenStream::new();
    if let Pagination::Limit { n } | Pagination::Top { n } = pagination {
        ts.push(Token::Top).space().push(Token::LitInt(*n));
    }
    ts
}

/// SQL Server's `OFFSET m ROWS [FETCH NEXT n ROWS ONLY]`, emitted as a
/// trailing clause after `ORDER BY`. Applies only when an offset is present.
pub fn emit_pagination_offset_fetch(pagination: &Pagination) -> TokenStream {
    let mut ts = TokenStream::new();
    match pagination {
        Pagination::LimitOffset { n, offset } => {
            ts.push(Token::Offset)
                .space()
                .push(Token::LitInt(*offset))
                .space()
                .push(Token::Rows)
                .space()
                .push(Token::Fetch)
                .space()
                .push(Token::Next)
                .space()
                .push(Token::LitInt(*n))
                .space()
                .push(Token::Rows)
                .space()
                .push(Token::Only);
        }
        Pagination::OffsetOnly { offset } => {
            ts.push(Token::Offset)
                .space()
                .push(Token::LitInt(*offset))
                .space()
                .push(Token::Rows);
        }
        Pagination::None | Pagination::Limit { .. } | Pagination::Top { .. } => {}
    }
    ts
}
