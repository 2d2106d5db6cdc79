//! Turns a [`Query`] into SQL text for a specific [`Dialect`].
//!
//! `QueryCompiler` holds the only mutable state in the crate: the ordered
//! list of bound parameters accumulated while walking a query (and, for
//! nested subqueries, their queries too) in parameterized mode. Everything
//! else is a pure function of the `Query` it is given.

use crate::dialect::{Dialect, SqlDialect};
use crate::error::{QueryError, QueryResult};
use crate::query::{
    CompoundKind, DeleteSpec, FromClause, InsertSpec, Join, JoinKind, OrderByEntry, Query,
    UpdateSpec, UpsertSpec,
};
use crate::value::Value;
use crate::where_token::{LogicalOp, WhereToken};
use tracing::debug;

/// Compiles a `Query` to SQL text, either with literal values inlined or
/// with positional `@pN` placeholders and a side list of bind values.
#[derive(Debug)]
pub struct QueryCompiler {
    dialect: Dialect,
    parameterize: bool,
    params: Vec<Value>,
}

impl QueryCompiler {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            parameterize: false,
            params: Vec::new(),
        }
    }

    /// Compile with every value rendered as an inline literal.
    pub fn compile(&mut self, query: &Query) -> QueryResult<String> {
        debug!(dialect = %self.dialect, "compiling query with inlined literals");
        self.parameterize = false;
        self.params.clear();
        self.compile_statement(query)
    }

    /// Compile with every value replaced by a `@pN` placeholder, returning
    /// the SQL alongside the parameters in placeholder order.
    pub fn compile_with_parameters(&mut self, query: &Query) -> QueryResult<(String, Vec<Value>)> {
        debug!(dialect = %self.dialect, "compiling query with parameter placeholders");
        self.parameterize = true;
        self.params.clear();
        let sql = self.compile_statement(query)?;
        debug!(param_count = self.params.len(), "compiled query");
        Ok((sql, std::mem::take(&mut self.params)))
    }

    fn compile_statement(&mut self, query: &Query) -> QueryResult<String> {
        if let Err(err) = query.validate() {
            debug!(?err, "query failed preflight validation");
            return Err(err);
        }
        if let Some(spec) = query.insert_spec.clone() {
            return self.compile_insert(&spec);
        }
        if let Some(spec) = query.update_spec.clone() {
            return self.compile_update(query, &spec);
        }
        if let Some(spec) = query.delete_spec.clone() {
            return self.compile_delete(query, &spec);
        }
        self.compile_select(query)
    }

    // =====================================================================
    // SELECT
    // =====================================================================

    fn compile_select(&mut self, query: &Query) -> QueryResult<String> {
        let mut parts: Vec<String> = Vec::new();

        let mut select_clause = String::from("SELECT");
        if query.distinct {
            select_clause.push_str(" DISTINCT");
        }
        let leading = self
            .dialect
            .pagination_leading(&query.pagination)
            .serialize(self.dialect);
        if !leading.is_empty() {
            select_clause.push(' ');
            select_clause.push_str(&leading);
        }
        select_clause.push(' ');
        select_clause.push_str(&self.render_select_list(query));
        parts.push(select_clause);

        if let Some(from) = &query.from {
            parts.push(format!("FROM {}", self.render_from_clause(from)?));
        }

        for join in &query.joins {
            parts.push(self.render_join(join)?);
        }

        if !query.where_tokens.is_empty() {
            parts.push(format!(
                "WHERE {}",
                self.render_predicates(&query.where_tokens)?
            ));
        }

        if !query.group_by.is_empty() {
            let cols = query
                .group_by
                .iter()
                .map(|c| quote_column_expr(c, self.dialect))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("GROUP BY {}", cols));
        }

        if !query.having.is_empty() {
            let mut having_parts = Vec::with_capacity(query.having.len());
            for h in &query.having {
                let value = self.emit_value(&h.value)?;
                having_parts.push(format!(
                    "{} {} {}",
                    quote_column_expr(&h.column, self.dialect),
                    h.op,
                    value
                ));
            }
            parts.push(format!("HAVING {}", having_parts.join(" AND ")));
        }

        if !query.order_by.is_empty() {
            let entries = query
                .order_by
                .iter()
                .map(|entry| match entry {
                    OrderByEntry::Column { column, descending } => {
                        let base = quote_column_expr(column, self.dialect);
                        if *descending {
                            format!("{} DESC", base)
                        } else {
                            base
                        }
                    }
                    OrderByEntry::Raw(expr) => expr.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("ORDER BY {}", entries));
        }

        let trailing = self
            .dialect
            .pagination_trailing(&query.pagination)
            .serialize(self.dialect);
        if !trailing.is_empty() {
            parts.push(trailing);
        }

        let mut sql = parts.join(" ");

        for (kind, other) in &query.compound {
            let keyword = match kind {
                CompoundKind::Union => "UNION",
                CompoundKind::UnionAll => "UNION ALL",
                CompoundKind::Intersect => "INTERSECT",
            };
            let other_sql = self.compile_statement(other)?;
            sql = format!("{} {} {}", sql, keyword, other_sql);
        }

        Ok(sql)
    }

    fn render_select_list(&self, query: &Query) -> String {
        if query.select.is_empty() {
            "*".to_string()
        } else {
            query
                .select
                .iter()
                .map(|c| quote_column_expr(c, self.dialect))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn render_from_clause(&mut self, from: &FromClause) -> QueryResult<String> {
        match from {
            FromClause::Table(name) => Ok(quote_column_expr(name, self.dialect)),
            FromClause::Subquery(subquery, alias) => {
                let inner = self.compile_statement(subquery)?;
                Ok(format!(
                    "({}) AS {}",
                    inner,
                    self.dialect.quote_identifier(alias)
                ))
            }
        }
    }

    fn render_join(&mut self, join: &Join) -> QueryResult<String> {
        let table_sql = self.render_from_clause(&join.table)?;
        if join.kind == JoinKind::Cross {
            return Ok(format!("CROSS JOIN {}", table_sql));
        }
        let keyword = match join.kind {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
            JoinKind::Cross => unreachable!("handled above"),
        };
        Ok(format!("{} {} ON {}", keyword, table_sql, join.on_condition))
    }

    /// Render the flat `WHERE` token stream to text, tracking the open/close
    /// parenthesis attachment rules so groups read as `(a = 1 AND b = 2)`
    /// rather than `( a = 1 AND b = 2 )`.
    fn render_predicates(&mut self, tokens: &[WhereToken]) -> QueryResult<String> {
        let mut out = String::new();
        for token in tokens {
            match token {
                WhereToken::Condition { column, op, value } => {
                    let value_sql = self.emit_value(value)?;
                    append_word(&mut out, &quote_column_expr(column, self.dialect));
                    append_word(&mut out, op);
                    append_word(&mut out, &value_sql);
                }
                WhereToken::Operator(LogicalOp::And) => append_word(&mut out, "AND"),
                WhereToken::Operator(LogicalOp::Or) => append_word(&mut out, "OR"),
                WhereToken::GroupStart => append_word(&mut out, "("),
                WhereToken::GroupEnd => append_word(&mut out, ")"),
                WhereToken::Null { column } => {
                    append_word(&mut out, &quote_column_expr(column, self.dialect));
                    append_word(&mut out, "IS NULL");
                }
                WhereToken::NotNull { column } => {
                    append_word(&mut out, &quote_column_expr(column, self.dialect));
                    append_word(&mut out, "IS NOT NULL");
                }
                WhereToken::In { column, values } => {
                    let rendered = self.emit_value_list(values)?;
                    append_word(&mut out, &quote_column_expr(column, self.dialect));
                    append_word(&mut out, "IN");
                    append_word(&mut out, &format!("({})", rendered));
                }
                WhereToken::NotIn { column, values } => {
                    let rendered = self.emit_value_list(values)?;
                    append_word(&mut out, &quote_column_expr(column, self.dialect));
                    append_word(&mut out, "NOT IN");
                    append_word(&mut out, &format!("({})", rendered));
                }
                WhereToken::Between { column, low, high } => {
                    let low_sql = self.emit_value(low)?;
                    let high_sql = self.emit_value(high)?;
                    append_word(&mut out, &quote_column_expr(column, self.dialect));
                    append_word(&mut out, "BETWEEN");
                    append_word(&mut out, &low_sql);
                    append_word(&mut out, "AND");
                    append_word(&mut out, &high_sql);
                }
                WhereToken::NotBetween { column, low, high } => {
                    let low_sql = self.emit_value(low)?;
                    let high_sql = self.emit_value(high)?;
                    append_word(&mut out, &quote_column_expr(column, self.dialect));
                    append_word(&mut out, "NOT BETWEEN");
                    append_word(&mut out, &low_sql);
                    append_word(&mut out, "AND");
                    append_word(&mut out, &high_sql);
                }
            }
        }
        Ok(out)
    }

    fn emit_value_list(&mut self, values: &[Value]) -> QueryResult<String> {
        let mut rendered = Vec::with_capacity(values.len());
        for v in values {
            rendered.push(self.emit_value(v)?);
        }
        Ok(rendered.join(", "))
    }

    /// Render a single value: a subquery compiles to `(...)` recursively
    /// through this same compiler (sharing its parameter counter); any
    /// other value becomes either a placeholder or an inline literal
    /// depending on the active mode.
    fn emit_value(&mut self, value: &Value) -> QueryResult<String> {
        if let Value::Query(subquery) = value {
            let inner = self.compile_statement(subquery)?;
            return Ok(format!("({})", inner));
        }
        if self.parameterize {
            self.params.push(value.clone());
            Ok(format!("@p{}", self.params.len() - 1))
        } else {
            Ok(value.format_literal(self.dialect))
        }
    }

    // =====================================================================
    // INSERT / upsert
    // =====================================================================

    fn compile_insert(&mut self, spec: &InsertSpec) -> QueryResult<String> {
        match &spec.upsert {
            None => self.compile_plain_insert(spec),
            Some(upsert) => {
                if !self.dialect.supports_upsert() {
                    debug!(dialect = %self.dialect, "upsert requested against a dialect with no native form");
                    return Err(QueryError::UnsupportedDialect);
                }
                match self.dialect {
                    Dialect::SqlServer => self.compile_merge(spec, upsert),
                    Dialect::MySql => self.compile_insert_on_duplicate(spec, upsert),
                    Dialect::Postgres | Dialect::Sqlite => {
                        self.compile_insert_on_conflict(spec, upsert)
                    }
                    Dialect::Oracle => Err(QueryError::InternalInvariantViolation(
                        "Oracle reached upsert emission despite supports_upsert() == false",
                    )),
                }
            }
        }
    }

    fn render_value_groups(&mut self, rows: &[Vec<Value>]) -> QueryResult<Vec<String>> {
        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::with_capacity(row.len());
            for v in row {
                cells.push(self.emit_value(v)?);
            }
            groups.push(format!("({})", cells.join(", ")));
        }
        Ok(groups)
    }

    fn compile_plain_insert(&mut self, spec: &InsertSpec) -> QueryResult<String> {
        let table = quote_column_expr(&spec.table, self.dialect);
        let cols = spec
            .columns
            .iter()
            .map(|c| self.dialect.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        let groups = self.render_value_groups(&spec.rows)?;
        Ok(format!(
            "INSERT INTO {} ({}) VALUES {}",
            table,
            cols,
            groups.join(", ")
        ))
    }

    fn resolve_update_columns(spec: &InsertSpec, upsert: &UpsertSpec) -> Vec<String> {
        upsert.update_columns.clone().unwrap_or_else(|| {
            spec.columns
                .iter()
                .filter(|c| !upsert.conflict_columns.contains(c))
                .cloned()
                .collect()
        })
    }

    fn compile_insert_on_conflict(
        &mut self,
        spec: &InsertSpec,
        upsert: &UpsertSpec,
    ) -> QueryResult<String> {
        let base = self.compile_plain_insert(spec)?;
        let conflict_cols = upsert
            .conflict_columns
            .iter()
            .map(|c| self.dialect.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        let update_cols = Self::resolve_update_columns(spec, upsert);
        let set_clause = update_cols
            .iter()
            .map(|c| {
                let q = self.dialect.quote_identifier(c);
                format!("{} = EXCLUDED.{}", q, q)
            })
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "{} ON CONFLICT ({}) DO UPDATE SET {}",
            base, conflict_cols, set_clause
        ))
    }

    fn compile_insert_on_duplicate(
        &mut self,
        spec: &InsertSpec,
        upsert: &UpsertSpec,
    ) -> QueryResult<String> {
        let base = self.compile_plain_insert(spec)?;
        let update_cols = Self::resolve_update_columns(spec, upsert);
        let set_clause = update_cols
            .iter()
            .map(|c| {
                let q = self.dialect.quote_identifier(c);
                format!("{} = VALUES({})", q, q)
            })
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("{} ON DUPLICATE KEY UPDATE {}", base, set_clause))
    }

    fn compile_merge(&mut self, spec: &InsertSpec, upsert: &UpsertSpec) -> QueryResult<String> {
        let target = quote_column_expr(&spec.table, self.dialect);
        let quoted_cols: Vec<String> = spec
            .columns
            .iter()
            .map(|c| self.dialect.quote_identifier(c))
            .collect();
        let value_groups = self.render_value_groups(&spec.rows)?;

        let on_clause = upsert
            .conflict_columns
            .iter()
            .map(|c| {
                let q = self.dialect.quote_identifier(c);
                format!("target.{} = source.{}", q, q)
            })
            .collect::<Vec<_>>()
            .join(" AND ");
        let on_clause = format!("({})", on_clause);

        let update_cols = Self::resolve_update_columns(spec, upsert);
        let set_clause = update_cols
            .iter()
            .map(|c| {
                let q = self.dialect.quote_identifier(c);
                format!("target.{} = source.{}", q, q)
            })
            .collect::<Vec<_>>()
            .join(", ");

        let insert_values = spec
            .columns
            .iter()
            .map(|c| format!("source.{}", self.dialect.quote_identifier(c)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "MERGE INTO {} AS target USING (VALUES {}) AS source ({}) ON {} \
             WHEN MATCHED THEN UPDATE SET {} \
             WHEN NOT MATCHED THEN INSERT ({}) VALUES ({})",
            target,
            value_groups.join(", "),
            quoted_cols.join(", "),
            on_clause,
            set_clause,
            quoted_cols.join(", "),
            insert_values
        ))
    }

    // =====================================================================
    // UPDATE / DELETE
    // =====================================================================

    fn compile_update(&mut self, query: &Query, spec: &UpdateSpec) -> QueryResult<String> {
        let table = quote_column_expr(&spec.table, self.dialect);
        let mut assignments = Vec::with_capacity(spec.assignments.len());
        for (column, value) in &spec.assignments {
            let value_sql = self.emit_value(value)?;
            assignments.push(format!("{} = {}", self.dialect.quote_identifier(column), value_sql));
        }
        let mut sql = format!("UPDATE {} SET {}", table, assignments.join(", "));
        if !query.where_tokens.is_empty() {
            sql.push_str(&format!(
                " WHERE {}",
                self.render_predicates(&query.where_tokens)?
            ));
        }
        Ok(sql)
    }

    fn compile_delete(&mut self, query: &Query, spec: &DeleteSpec) -> QueryResult<String> {
        let table = quote_column_expr(&spec.table, self.dialect);
        let mut sql = format!("DELETE FROM {}", table);
        if !query.where_tokens.is_empty() {
            sql.push_str(&format!(
                " WHERE {}",
                self.render_predicates(&query.where_tokens)?
            ));
        }
        Ok(sql)
    }
}

/// Append a lexeme to a predicate rendering buffer, attaching directly (no
/// leading space) after an opening paren or before a closing one so groups
/// read as `(a = 1)` rather than `( a = 1 )`.
fn append_word(out: &mut String, word: &str) {
    if word == ")" || out.is_empty() || out.ends_with('(') {
        out.push_str(word);
    } else {
        out.push(' ');
        out.push_str(word);
    }
}

/// Render a bare column/table reference through the identifier-quoting
/// algorithm:
///
/// 1. A trailing ` ASC`/` DESC` suffix (case-insensitive) is stripped,
///    quoting applied to the remainder, then the suffix is reattached
///    uppercased.
/// 2. `*` passes through unquoted.
/// 3. Anything containing whitespace or parentheses (function calls,
///    pre-aliased expressions such as `COUNT(*)` or `u.name AS user_name`)
///    passes through verbatim — it is not an identifier, and quoting it
///    would corrupt it.
/// 4. An all-digit string (an ordinal column reference) passes through
///    unquoted.
/// 5. Otherwise the expression is split on `.` and each segment is quoted
///    per-dialect, so `schema.table` becomes `"schema"."table"`.
///
/// This function never validates that the identifier is safe to embed in
/// SQL; quoting is a syntax concern, not an escaping one. Callers remain
/// responsible for not passing untrusted text as a column name.
fn quote_column_expr(raw: &str, dialect: Dialect) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some(base) = lower.strip_suffix(" desc") {
        let base = &trimmed[..base.len()];
        return format!("{} DESC", quote_column_expr(base, dialect));
    }
    if let Some(base) = lower.strip_suffix(" asc") {
        let base = &trimmed[..base.len()];
        return format!("{} ASC", quote_column_expr(base, dialect));
    }

    if trimmed == "*" {
        return trimmed.to_string();
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
        return trimmed.to_string();
    }
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.to_string();
    }

    trimmed
        .split('.')
        .map(|segment| dialect.quote_identifier(segment))
        .collect::<Vec<_>>()
        .join(".")
}
