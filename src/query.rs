//! The `Query` abstract syntax tree and its fluent builder.
//!
//! `Query` accumulates builder calls into plain data (selected columns, a
//! flat `WHERE` token stream, an optional pagination mode, and so on) and
//! performs no dialect-specific work itself. [`crate::compiler::QueryCompiler`]
//! is the only thing that turns a `Query` into SQL text.

use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};
use crate::value::Value;
use crate::where_token::{LogicalOp, WhereToken};

/// Message carried by the `InternalInvariantViolation` raised when more than
/// one of `insert_spec`/`update_spec`/`delete_spec` is set on a `Query` — the
/// builder guards against this at each of `insert_into`/`update`/
/// `delete_from`, so reaching it at compile time indicates the guard was
/// bypassed rather than a routine input mistake.
const MULTIPLE_STATEMENT_SPECS: &str = "more than one of insert/update/delete set on one Query";

/// Where a `SELECT` reads rows from.
#[derive(Debug, Clone, PartialEq)]
pub enum FromClause {
    Table(String),
    Subquery(Box<Query>, String),
}

/// The kind of join relating a joined table to the rest of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// A single `JOIN` clause. `on_condition` is opaque, caller-supplied text —
/// it is emitted verbatim and never re-parsed, the same way a raw `ORDER BY`
/// expression is.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: FromClause,
    pub on_condition: String,
}

/// One entry of an `ORDER BY` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderByEntry {
    /// A column name, quoted through the normal identifier-quoting path.
    Column { column: String, descending: bool },
    /// A raw expression emitted verbatim, bypassing identifier quoting
    /// entirely. Used for expressions the quoting algorithm cannot express
    /// (function calls, computed columns). See DESIGN.md for the quoting
    /// ambiguity this resolves.
    Raw(String),
}

/// The pagination mode of a `SELECT`. Each builder call that changes the
/// page shape replaces the previous mode outright rather than merging with
/// it, so e.g. calling `.top()` after `.limit().offset()` clears the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    #[default]
    None,
    Limit {
        n: u64,
    },
    LimitOffset {
        n: u64,
        offset: u64,
    },
    OffsetOnly {
        offset: u64,
    },
    /// SQL Server's `TOP n`, requested explicitly rather than derived from
    /// `.limit()`. Functionally identical to `Limit` on the other four
    /// dialects.
    Top {
        n: u64,
    },
}

/// A `UNION`/`UNION ALL`/`INTERSECT` partner query and how it combines with
/// the one preceding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    Union,
    UnionAll,
    Intersect,
}

/// On-conflict behavior for an `INSERT`. Present only when the insert is an
/// upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertSpec {
    pub conflict_columns: Vec<String>,
    /// Columns to refresh when a conflicting row already exists. `None`
    /// means "every inserted column except the conflict columns" (the
    /// default `insert_or_update` behavior); `Some` is the restricted form
    /// requested through `upsert_update_only`.
    pub update_columns: Option<Vec<String>>,
}

/// Accumulated state for an `INSERT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertSpec {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub upsert: Option<UpsertSpec>,
}

/// Accumulated state for an `UPDATE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSpec {
    pub table: String,
    pub assignments: Vec<(String, Value)>,
}

/// Accumulated state for a `DELETE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSpec {
    pub table: String,
}

/// A single `HAVING` predicate. Shares `op`'s verbatim-text convention with
/// `WhereToken::Condition`.
#[derive(Debug, Clone, PartialEq)]
pub struct HavingCondition {
    pub column: String,
    pub op: String,
    pub value: Value,
}

/// The query builder and AST.
///
/// Exactly one of `insert_spec`, `update_spec`, `delete_spec` is populated
/// for a data-modifying statement; when all three are `None`, compiling the
/// query produces a `SELECT`. `where_tokens` is shared by `SELECT`,
/// `UPDATE`, and `DELETE` — all three filter rows through the same flat
/// predicate stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub(crate) select: Vec<String>,
    pub(crate) distinct: bool,
    pub(crate) from: Option<FromClause>,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_tokens: Vec<WhereToken>,
    pub(crate) open_groups: i32,
    /// Set once `end_group` is called with no matching open group. Sticky:
    /// once tripped it stays tripped regardless of later `begin_group` calls,
    /// so a stray `end_group` can never be masked by a subsequent
    /// `begin_group` bringing `open_groups` back to zero.
    pub(crate) group_underflow: bool,
    pub(crate) group_by: Vec<String>,
    pub(crate) having: Vec<HavingCondition>,
    pub(crate) order_by: Vec<OrderByEntry>,
    pub(crate) pagination: Pagination,
    pub(crate) compound: Vec<(CompoundKind, Query)>,
    pub(crate) insert_spec: Option<InsertSpec>,
    pub(crate) update_spec: Option<UpdateSpec>,
    pub(crate) delete_spec: Option<DeleteSpec>,
    /// Recorded by builder calls that discover an invalid call sequence
    /// (e.g. `.values()` before `.insert_into()`) but cannot return a
    /// `Result` without breaking the owned-`self` chain. `validate` surfaces
    /// it ahead of every other check. First error wins.
    pub(crate) builder_error: Option<QueryError>,
}

impl Query {
    /// Start a new, empty query.
    pub fn new() -> Self {
        Self::default()
    }

    // =====================================================================
    // SELECT shape
    // =====================================================================

    /// Add columns to the select list. An empty select list compiles to `*`.
    #[must_use]
    pub fn select(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.select.extend(columns.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    #[must_use]
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.from = Some(FromClause::Table(table.into()));
        self
    }

    #[must_use]
    pub fn from_subquery(mut self, subquery: Query, alias: impl Into<String>) -> Self {
        self.from = Some(FromClause::Subquery(Box::new(subquery), alias.into()));
        self
    }

    // =====================================================================
    // Joins
    // =====================================================================

    #[must_use]
    pub fn join(self, table: impl Into<String>, on_condition: impl Into<String>) -> Self {
        self.join_kind(JoinKind::Inner, table, on_condition)
    }

    #[must_use]
    pub fn left_join(self, table: impl Into<String>, on_condition: impl Into<String>) -> Self {
        self.join_kind(JoinKind::Left, table, on_condition)
    }

    #[must_use]
    pub fn right_join(self, table: impl Into<String>, on_condition: impl Into<String>) -> Self {
        self.join_kind(JoinKind::Right, table, on_condition)
    }

    #[must_use]
    pub fn full_outer_join(self, table: impl Into<String>, on_condition: impl Into<String>) -> Self {
        self.join_kind(JoinKind::Full, table, on_condition)
    }

    #[must_use]
    pub fn cross_join(mut self, table: impl Into<String>) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Cross,
            table: FromClause::Table(table.into()),
            on_condition: String::new(),
        });
        self
    }

    fn join_kind(
        mut self,
        kind: JoinKind,
        table: impl Into<String>,
        on_condition: impl Into<String>,
    ) -> Self {
        self.joins.push(Join {
            kind,
            table: FromClause::Table(table.into()),
            on_condition: on_condition.into(),
        });
        self
    }

    // =====================================================================
    // WHERE
    // =====================================================================

    /// Push a predicate, inserting an implicit `AND` if a prior predicate is
    /// already present and the caller did not just call `.or()`.
    fn push_predicate(&mut self, token: WhereToken) {
        if needs_implicit_and(&self.where_tokens) {
            self.where_tokens.push(WhereToken::Operator(LogicalOp::And));
        }
        self.where_tokens.push(token);
    }

    #[must_use]
    pub fn where_cond(
        mut self,
        column: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.push_predicate(WhereToken::Condition {
            column: column.into(),
            op: op.into(),
            value: value.into(),
        });
        self
    }

    /// `where_cond` with an implicit `=` operator.
    #[must_use]
    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_cond(column, "=", value)
    }

    /// Insert an explicit `OR` before the next predicate, overriding the
    /// default implicit `AND`.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.where_tokens.push(WhereToken::Operator(LogicalOp::Or));
        self
    }

    /// `where_cond`, but the preceding connective is `OR` rather than the
    /// implicit `AND`. Equivalent to `.or().where_cond(...)`.
    #[must_use]
    pub fn or_where(
        self,
        column: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.or().where_cond(column, op, value)
    }

    #[must_use]
    pub fn where_null(mut self, column: impl Into<String>) -> Self {
        self.push_predicate(WhereToken::Null {
            column: column.into(),
        });
        self
    }

    #[must_use]
    pub fn or_where_null(self, column: impl Into<String>) -> Self {
        self.or().where_null(column)
    }

    #[must_use]
    pub fn where_not_null(mut self, column: impl Into<String>) -> Self {
        self.push_predicate(WhereToken::NotNull {
            column: column.into(),
        });
        self
    }

    #[must_use]
    pub fn or_where_not_null(self, column: impl Into<String>) -> Self {
        self.or().where_not_null(column)
    }

    #[must_use]
    pub fn where_in(mut self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.push_predicate(WhereToken::In {
            column: column.into(),
            values,
        });
        self
    }

    #[must_use]
    pub fn or_where_in(self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.or().where_in(column, values)
    }

    #[must_use]
    pub fn where_not_in(mut self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.push_predicate(WhereToken::NotIn {
            column: column.into(),
            values,
        });
        self
    }

    #[must_use]
    pub fn or_where_not_in(self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.or().where_not_in(column, values)
    }

    #[must_use]
    pub fn where_between(
        mut self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.push_predicate(WhereToken::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        });
        self
    }

    #[must_use]
    pub fn or_where_between(
        self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.or().where_between(column, low, high)
    }

    #[must_use]
    pub fn where_not_between(
        mut self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.push_predicate(WhereToken::NotBetween {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        });
        self
    }

    #[must_use]
    pub fn or_where_not_between(
        self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.or().where_not_between(column, low, high)
    }

    /// Open a parenthesized predicate group.
    #[must_use]
    pub fn begin_group(mut self) -> Self {
        if needs_implicit_and(&self.where_tokens) {
            self.where_tokens.push(WhereToken::Operator(LogicalOp::And));
        }
        self.where_tokens.push(WhereToken::GroupStart);
        self.open_groups += 1;
        self
    }

    /// Close the innermost open predicate group. Closing past the
    /// innermost open group (no matching `begin_group`) trips
    /// `group_underflow` rather than letting the counter go negative, so a
    /// stray `end_group` cannot be masked by a later `begin_group` bringing
    /// the counter back to zero.
    #[must_use]
    pub fn end_group(mut self) -> Self {
        self.where_tokens.push(WhereToken::GroupEnd);
        if self.open_groups == 0 {
            self.group_underflow = true;
        } else {
            self.open_groups -= 1;
        }
        self
    }

    // =====================================================================
    // Grouping / having
    // =====================================================================

    #[must_use]
    pub fn group_by(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn having(
        mut self,
        column: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.having.push(HavingCondition {
            column: column.into(),
            op: op.into(),
            value: value.into(),
        });
        self
    }

    // =====================================================================
    // ORDER BY / pagination
    // =====================================================================

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by.push(OrderByEntry::Column {
            column: column.into(),
            descending: false,
        });
        self
    }

    #[must_use]
    pub fn order_by_descending(mut self, column: impl Into<String>) -> Self {
        self.order_by.push(OrderByEntry::Column {
            column: column.into(),
            descending: true,
        });
        self
    }

    /// Append a raw, unquoted `ORDER BY` expression.
    #[must_use]
    pub fn order_by_raw(mut self, expression: impl Into<String>) -> Self {
        self.order_by.push(OrderByEntry::Raw(expression.into()));
        self
    }

    #[must_use]
    pub fn limit(mut self, n: u64) -> Self {
        self.pagination = match self.pagination {
            Pagination::OffsetOnly { offset } | Pagination::LimitOffset { offset, .. } => {
                Pagination::LimitOffset { n, offset }
            }
            _ => Pagination::Limit { n },
        };
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.pagination = match self.pagination {
            Pagination::Limit { n } | Pagination::LimitOffset { n, .. } => {
                Pagination::LimitOffset { n, offset }
            }
            _ => Pagination::OffsetOnly { offset },
        };
        self
    }

    /// Request SQL Server's `TOP n`, clearing any previously set limit or
    /// offset. On the other four dialects this compiles identically to
    /// `.limit(n)`.
    #[must_use]
    pub fn top(mut self, n: u64) -> Self {
        self.pagination = Pagination::Top { n };
        self
    }

    // =====================================================================
    // Compound queries
    // =====================================================================

    #[must_use]
    pub fn union(mut self, other: Query) -> Self {
        self.compound.push((CompoundKind::Union, other));
        self
    }

    #[must_use]
    pub fn union_all(mut self, other: Query) -> Self {
        self.compound.push((CompoundKind::UnionAll, other));
        self
    }

    #[must_use]
    pub fn intersect(mut self, other: Query) -> Self {
        self.compound.push((CompoundKind::Intersect, other));
        self
    }

    // =====================================================================
    // INSERT
    // =====================================================================

    #[must_use]
    pub fn insert_into(mut self, table: impl Into<String>) -> Self {
        if self.update_spec.is_some() || self.delete_spec.is_some() {
            self.builder_error
                .get_or_insert(QueryError::InternalInvariantViolation(
                    MULTIPLE_STATEMENT_SPECS,
                ));
        }
        self.insert_spec = Some(InsertSpec {
            table: table.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            upsert: None,
        });
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        match self.insert_spec.as_mut() {
            Some(spec) => spec.columns = columns.into_iter().map(Into::into).collect(),
            None => {
                self.builder_error
                    .get_or_insert(QueryError::InvalidState);
            }
        }
        self
    }

    /// Append a row to a plain insert. Not valid on an upsert, which must
    /// carry exactly one row — chaining `.values()` after `.insert_or_update`
    /// records a builder error rather than silently growing the row set.
    #[must_use]
    pub fn values(mut self, row: Vec<Value>) -> Self {
        match self.insert_spec.as_mut() {
            Some(spec) if spec.upsert.is_some() => {
                self.builder_error
                    .get_or_insert(QueryError::InvalidState);
            }
            Some(spec) => spec.rows.push(row),
            None => {
                self.builder_error
                    .get_or_insert(QueryError::InvalidState);
            }
        }
        self
    }

    /// Build a single-row upsert in one call: on a conflict over
    /// `conflict_columns`, update every inserted column except the conflict
    /// columns themselves (narrow with [`Query::upsert_update_only`]).
    #[must_use]
    pub fn insert_or_update<C, V>(
        mut self,
        table: impl Into<String>,
        assignments: impl IntoIterator<Item = (C, V)>,
        conflict_columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self
    where
        C: Into<String>,
        V: Into<Value>,
    {
        let mut columns = Vec::new();
        let mut row = Vec::new();
        for (column, value) in assignments {
            columns.push(column.into());
            row.push(value.into());
        }
        self.insert_spec = Some(InsertSpec {
            table: table.into(),
            columns,
            rows: vec![row],
            upsert: Some(UpsertSpec {
                conflict_columns: conflict_columns.into_iter().map(Into::into).collect(),
                update_columns: None,
            }),
        });
        self
    }

    /// Restrict the upsert's update clause to exactly `columns`, instead of
    /// every non-conflict column. Only meaningful after `insert_or_update`.
    #[must_use]
    pub fn upsert_update_only(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        if let Some(spec) = self.insert_spec.as_mut() {
            if let Some(upsert) = spec.upsert.as_mut() {
                upsert.update_columns = Some(columns.into_iter().map(Into::into).collect());
            }
        }
        self
    }

    // =====================================================================
    // UPDATE
    // =====================================================================

    #[must_use]
    pub fn update(mut self, table: impl Into<String>) -> Self {
        if self.insert_spec.is_some() || self.delete_spec.is_some() {
            self.builder_error
                .get_or_insert(QueryError::InternalInvariantViolation(
                    MULTIPLE_STATEMENT_SPECS,
                ));
        }
        self.update_spec = Some(UpdateSpec {
            table: table.into(),
            assignments: Vec::new(),
        });
        self
    }

    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Some(spec) = self.update_spec.as_mut() {
            spec.assignments.push((column.into(), value.into()));
        }
        self
    }

    // =====================================================================
    // DELETE
    // =====================================================================

    #[must_use]
    pub fn delete_from(mut self, table: impl Into<String>) -> Self {
        if self.insert_spec.is_some() || self.update_spec.is_some() {
            self.builder_error
                .get_or_insert(QueryError::InternalInvariantViolation(
                    MULTIPLE_STATEMENT_SPECS,
                ));
        }
        self.delete_spec = Some(DeleteSpec { table: table.into() });
        self
    }

    // =====================================================================
    // Compilation
    // =====================================================================

    /// Compile to a single SQL string with all literal values inlined.
    pub fn compile(&self, dialect: Dialect) -> QueryResult<String> {
        crate::compiler::QueryCompiler::new(dialect).compile(self)
    }

    /// Compile to a parameterized SQL string plus its ordered bind values.
    /// Placeholders are `@p0`, `@p1`, ... in left-to-right traversal order,
    /// shared across nested subqueries.
    pub fn compile_with_parameters(&self, dialect: Dialect) -> QueryResult<(String, Vec<Value>)> {
        crate::compiler::QueryCompiler::new(dialect).compile_with_parameters(self)
    }

    /// Validate the invariants a well-formed query must uphold regardless
    /// of dialect. Called by the compiler as a preflight check before any
    /// SQL is emitted.
    pub(crate) fn validate(&self) -> QueryResult<()> {
        if let Some(err) = &self.builder_error {
            return Err(err.clone());
        }
        if self.group_underflow || self.open_groups != 0 {
            return Err(QueryError::Unbalanced);
        }
        let statement_count = [
            self.insert_spec.is_some(),
            self.update_spec.is_some(),
            self.delete_spec.is_some(),
        ]
        .into_iter()
        .filter(|b| *b)
        .count();
        if statement_count > 1 {
            return Err(QueryError::InternalInvariantViolation(
                MULTIPLE_STATEMENT_SPECS,
            ));
        }

        if let Some(from) = &self.from {
            if let FromClause::Table(name) = from {
                check_identifier(name, "from")?;
            }
        }
        for join in &self.joins {
            if let FromClause::Table(name) = &join.table {
                check_identifier(name, "join")?;
            }
            if join.kind != JoinKind::Cross {
                check_identifier(&join.on_condition, "join")?;
            }
        }
        for column in &self.select {
            check_identifier(column, "select")?;
        }
        for column in &self.group_by {
            check_identifier(column, "group_by")?;
        }
        for h in &self.having {
            check_identifier(&h.column, "having")?;
        }
        for entry in &self.order_by {
            if let OrderByEntry::Column { column, .. } = entry {
                check_identifier(column, "order_by")?;
            }
        }
        for token in &self.where_tokens {
            match token {
                WhereToken::Condition { column, .. }
                | WhereToken::Null { column }
                | WhereToken::NotNull { column }
                | WhereToken::In { column, .. }
                | WhereToken::NotIn { column, .. }
                | WhereToken::Between { column, .. }
                | WhereToken::NotBetween { column, .. } => {
                    check_identifier(column, "where")?;
                }
                WhereToken::Operator(_) | WhereToken::GroupStart | WhereToken::GroupEnd => {}
            }
            match token {
                WhereToken::In { values, .. } | WhereToken::NotIn { values, .. } => {
                    if values.is_empty() {
                        return Err(QueryError::InvalidInput { field: "values" });
                    }
                    if values.iter().any(Value::is_null) {
                        return Err(QueryError::InvalidInput { field: "values" });
                    }
                }
                _ => {}
            }
        }

        if let Some(spec) = &self.insert_spec {
            check_identifier(&spec.table, "table")?;
            if spec.columns.is_empty() {
                return Err(QueryError::InvalidInput { field: "columns" });
            }
            for column in &spec.columns {
                check_identifier(column, "columns")?;
            }
            if spec.rows.is_empty() {
                return Err(QueryError::InvalidInput { field: "values" });
            }
            for row in &spec.rows {
                if row.len() != spec.columns.len() {
                    return Err(QueryError::Arity {
                        expected: spec.columns.len(),
                        got: row.len(),
                    });
                }
            }
            if let Some(upsert) = &spec.upsert {
                if upsert.conflict_columns.is_empty() {
                    return Err(QueryError::InvalidInput {
                        field: "conflict_columns",
                    });
                }
                for column in &upsert.conflict_columns {
                    check_identifier(column, "conflict_columns")?;
                }
                if spec.rows.len() != 1 {
                    return Err(QueryError::InvalidState);
                }
            }
        }
        if let Some(spec) = &self.update_spec {
            check_identifier(&spec.table, "table")?;
            if spec.assignments.is_empty() {
                return Err(QueryError::InvalidInput { field: "set" });
            }
            for (column, _) in &spec.assignments {
                check_identifier(column, "set")?;
            }
        }
        if let Some(spec) = &self.delete_spec {
            check_identifier(&spec.table, "table")?;
        }
        Ok(())
    }
}

/// An empty or all-whitespace identifier is always invalid, regardless of
/// where in the AST it appears.
fn check_identifier(raw: &str, field: &'static str) -> QueryResult<()> {
    if raw.trim().is_empty() {
        return Err(QueryError::InvalidInput { field });
    }
    Ok(())
}

/// Whether the next pushed predicate needs an implicit `AND` before it: true
/// when the stream is non-empty and does not already end in an operator or
/// an open group.
fn needs_implicit_and(tokens: &[WhereToken]) -> bool {
    match tokens.last() {
        None => false,
        Some(WhereToken::Operator(_)) => false,
        Some(WhereToken::GroupStart) => false,
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_and_between_conditions() {
        let q = Query::new()
            .from("users")
            .where_cond("active", "=", true)
            .where_cond("age", ">", 18);
        assert_eq!(
            q.where_tokens,
            vec![
                WhereToken::Condition {
                    column: "active".into(),
                    op: "=".into(),
                    value: Value::Boolean(true)
                },
                WhereToken::Operator(LogicalOp::And),
                WhereToken::Condition {
                    column: "age".into(),
                    op: ">".into(),
                    value: Value::Integer(18)
                },
            ]
        );
    }

    #[test]
    fn explicit_or_suppresses_implicit_and() {
        let q = Query::new()
            .from("users")
            .where_cond("a", "=", 1)
            .or()
            .where_cond("b", "=", 2);
        assert_eq!(q.where_tokens.len(), 3);
        assert_eq!(q.where_tokens[1], WhereToken::Operator(LogicalOp::Or));
    }

    #[test]
    fn group_balance_tracks_open_groups() {
        let q = Query::new().begin_group().where_cond("a", "=", 1).end_group();
        assert_eq!(q.open_groups, 0);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn unbalanced_group_fails_validation() {
        let q = Query::new().begin_group().where_cond("a", "=", 1);
        assert_eq!(q.validate(), Err(QueryError::Unbalanced));
    }

    #[test]
    fn top_clears_prior_limit_offset() {
        let q = Query::new().from("t").limit(10).offset(5).top(3);
        assert_eq!(q.pagination, Pagination::Top { n: 3 });
    }

    #[test]
    fn insert_without_columns_is_rejected() {
        let q = Query::new().insert_into("t").values(vec![Value::Integer(1)]);
        assert_eq!(q.validate(), Err(QueryError::InvalidInput { field: "columns" }));
    }

    #[test]
    fn insert_row_arity_mismatch_is_rejected() {
        let q = Query::new()
            .insert_into("t")
            .columns(["a", "b"])
            .values(vec![Value::Integer(1)]);
        assert_eq!(
            q.validate(),
            Err(QueryError::Arity {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn extra_end_group_cannot_be_masked_by_a_later_begin_group() {
        let q = Query::new()
            .begin_group()
            .where_cond("a", "=", 1)
            .end_group()
            .end_group()
            .begin_group()
            .where_cond("b", "=", 2)
            .end_group();
        assert_eq!(q.open_groups, 0);
        assert_eq!(q.validate(), Err(QueryError::Unbalanced));
    }

    #[test]
    fn lone_end_group_is_rejected() {
        let q = Query::new().from("t").end_group();
        assert_eq!(q.validate(), Err(QueryError::Unbalanced));
    }

    #[test]
    fn columns_before_insert_into_is_rejected() {
        let q = Query::new().columns(["a"]);
        assert_eq!(q.validate(), Err(QueryError::InvalidState));
    }

    #[test]
    fn values_before_insert_into_is_rejected() {
        let q = Query::new().values(vec![Value::Integer(1)]);
        assert_eq!(q.validate(), Err(QueryError::InvalidState));
    }

    #[test]
    fn extra_row_appended_to_an_upsert_is_rejected() {
        let q = Query::new()
            .insert_or_update("t", [("id", Value::from(1i64))], ["id"])
            .values(vec![Value::Integer(2)]);
        assert_eq!(q.validate(), Err(QueryError::InvalidState));
    }

    #[test]
    fn upsert_with_empty_conflict_columns_is_rejected() {
        let q = Query::new().insert_or_update(
            "t",
            [("id", Value::from(1i64))],
            Vec::<String>::new(),
        );
        assert_eq!(
            q.validate(),
            Err(QueryError::InvalidInput {
                field: "conflict_columns"
            })
        );
    }

    #[test]
    fn calling_both_insert_into_and_update_is_an_internal_invariant_violation() {
        let q = Query::new().insert_into("t").update("t");
        assert_eq!(
            q.validate(),
            Err(QueryError::InternalInvariantViolation(
                MULTIPLE_STATEMENT_SPECS
            ))
        );
    }

    #[test]
    fn blank_table_name_is_rejected() {
        let q = Query::new().from("   ");
        assert_eq!(q.validate(), Err(QueryError::InvalidInput { field: "from" }));
    }

    #[test]
    fn blank_join_condition_is_rejected() {
        let q = Query::new().from("t").join("other", "");
        assert_eq!(q.validate(), Err(QueryError::InvalidInput { field: "join" }));
    }

    #[test]
    fn cross_join_does_not_require_a_condition() {
        let q = Query::new().from("t").cross_join("other");
        assert!(q.validate().is_ok());
    }

    #[test]
    fn null_element_inside_in_list_is_rejected() {
        let q = Query::new()
            .from("t")
            .where_in("c", vec![Value::Integer(1), Value::Null]);
        assert_eq!(q.validate(), Err(QueryError::InvalidInput { field: "values" }));
    }

    #[test]
    fn where_eq_emits_an_equality_condition() {
        let q = Query::new().from("t").where_eq("a", 1);
        assert_eq!(
            q.where_tokens,
            vec![WhereToken::Condition {
                column: "a".into(),
                op: "=".into(),
                value: Value::Integer(1),
            }]
        );
    }

    #[test]
    fn full_outer_join_renders_as_full_join_kind() {
        let q = Query::new().from("t").full_outer_join("other", "t.id = other.id");
        assert_eq!(q.joins[0].kind, JoinKind::Full);
    }
}
