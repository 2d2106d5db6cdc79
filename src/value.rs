//! The [`Value`] type — every kind of cell that can appear as a bound
//! parameter or an inlined literal in a compiled query.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dialect::{Dialect, SqlDialect};
use crate::query::Query;

/// A polymorphic value that can be bound as a query parameter or rendered
/// as an inline literal.
///
/// `Value` is intentionally broader than any single database's native type
/// system: the compiler is responsible for rendering each variant in a form
/// the target dialect accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Floating(f64),
    Decimal(Decimal),
    Boolean(bool),
    DateTime(NaiveDateTime),
    DateTimeWithOffset(DateTime<FixedOffset>),
    Binary(Vec<u8>),
    Uuid(Uuid),
    Null,
    /// A nested query, used as a scalar or correlated subquery operand.
    Query(Box<Query>),
}

impl Value {
    /// Render this value as an inline SQL literal for `dialect`.
    ///
    /// This is only used in the compiler's inlined-literal mode; the
    /// parameterized mode emits a placeholder instead and defers rendering
    /// to the caller's driver layer.
    pub fn format_literal(&self, dialect: Dialect) -> String {
        match self {
            Value::String(s) => dialect.quote_string(s),
            Value::Integer(n) => n.to_string(),
            Value::Floating(f) => format_float(*f),
            Value::Decimal(d) => d.normalize().to_string(),
            Value::Boolean(b) => dialect.format_bool(*b).to_string(),
            Value::DateTime(dt) => {
                dialect.quote_string(&dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            // The UTC offset carried by `DateTimeWithOffset` has no stable
            // cross-dialect literal form; it is discarded and only the
            // naive wall-clock value is emitted. See DESIGN.md.
            Value::DateTimeWithOffset(dt) => {
                dialect.quote_string(&dt.naive_local().format("%Y-%m-%d %H:%M:%S").to_string())
            }
            Value::Binary(bytes) => format_binary(bytes),
            Value::Uuid(u) => dialect.quote_string(&u.to_string()),
            Value::Null => "NULL".to_string(),
            Value::Query(q) => format!("({})", q.compile(dialect).unwrap_or_default()),
        }
    }

    /// Whether this value renders as `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        panic!("cannot render NaN as a SQL literal");
    }
    if f.is_infinite() {
        panic!("cannot render infinite float as a SQL literal");
    }
    let mut buffer = ryu::Buffer::new();
    buffer.format(f).to_string()
}

/// ANSI `X'hex'` binary string literal. Widely understood by SQL Server,
/// MySQL and SQLite; Postgres and Oracle callers going through the inlined
/// path should treat this as a documented limitation rather than a native
/// literal, the same way Oracle upserts are documented as unsupported.
fn format_binary(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2 + 3);
    hex.push_str("X'");
    for b in bytes {
        hex.push_str(&format!("{:02X}", b));
    }
    hex.push('\'');
    hex
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Floating(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<Query> for Value {
    fn from(q: Query) -> Self {
        Value::Query(Box::new(q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_literal_escapes_quotes() {
        let v = Value::String("O'Brien".into());
        assert_eq!(v.format_literal(Dialect::Postgres), "'O''Brien'");
    }

    #[test]
    fn boolean_literal_is_dialect_specific() {
        assert_eq!(Value::Boolean(true).format_literal(Dialect::Postgres), "true");
        assert_eq!(Value::Boolean(true).format_literal(Dialect::SqlServer), "1");
        assert_eq!(Value::Boolean(false).format_literal(Dialect::MySql), "0");
    }

    #[test]
    fn null_literal_is_bare_keyword() {
        assert_eq!(Value::Null.format_literal(Dialect::Sqlite), "NULL");
    }

    #[test]
    fn decimal_literal_has_no_grouping() {
        let d = Decimal::new(123456, 2);
        assert_eq!(Value::Decimal(d).format_literal(Dialect::Oracle), "1234.56");
    }

    #[test]
    #[should_panic(expected = "NaN")]
    fn float_nan_panics() {
        Value::Floating(f64::NAN).format_literal(Dialect::Postgres);
    }

    #[test]
    fn datetime_with_offset_discards_offset() {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00+05:00").unwrap();
        assert_eq!(
            Value::DateTimeWithOffset(dt).format_literal(Dialect::Postgres),
            "'2024-01-15 10:30:00'"
        );
    }
}
