//! The flat `WHERE` predicate stream.
//!
//! Rather than a recursive expression tree, predicates accumulate as a flat
//! sequence of tagged tokens in the order the builder methods were called.
//! This mirrors how the clause actually reads left to right and keeps the
//! compiler's emission logic a single linear pass instead of a tree walk.

use crate::value::Value;

/// A boolean connective inserted between two conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// One element of the flat `WHERE` token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereToken {
    /// `column <op> value`. `op` is emitted verbatim — it is never
    /// re-parsed or validated, matching every other opaque-text field in
    /// this crate (join conditions, raw order-by expressions).
    Condition {
        column: String,
        op: String,
        value: Value,
    },
    /// An explicit logical connective between two conditions. The builder
    /// inserts `And` automatically between successive predicates; `Or` is
    /// only present when the caller asked for it.
    Operator(LogicalOp),
    /// Opens a parenthesized predicate group.
    GroupStart,
    /// Closes a parenthesized predicate group.
    GroupEnd,
    /// `column IS NULL`.
    Null { column: String },
    /// `column IS NOT NULL`.
    NotNull { column: String },
    /// `column IN (v1, v2, ...)`.
    In { column: String, values: Vec<Value> },
    /// `column NOT IN (v1, v2, ...)`.
    NotIn { column: String, values: Vec<Value> },
    /// `column BETWEEN low AND high`.
    Between {
        column: String,
        low: Value,
        high: Value,
    },
    /// `column NOT BETWEEN low AND high`.
    NotBetween {
        column: String,
        low: Value,
        high: Value,
    },
}

impl WhereToken {
    /// Whether this token is a connective rather than a predicate body.
    /// Used by the builder to decide whether an implicit `AND` is needed
    /// before appending the next predicate.
    pub fn is_operator(&self) -> bool {
        matches!(self, WhereToken::Operator(_))
    }

    /// Whether this token opens or closes a predicate group, rather than
    /// contributing a condition itself.
    pub fn is_group_delimiter(&self) -> bool {
        matches!(self, WhereToken::GroupStart | WhereToken::GroupEnd)
    }
}
