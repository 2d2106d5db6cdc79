//! SQL tokens — the atomic units the compiler assembles before joining them
//! into a single-line SQL string.
//!
//! Tokens are dialect-agnostic; [`Token::serialize`] resolves each one to its
//! dialect-specific spelling.

use crate::dialect::{Dialect, SqlDialect};

/// A single element of emitted SQL.
///
/// Adding a new variant here will cause compile errors everywhere it needs
/// to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    Distinct,
    From,
    Where,
    And,
    Or,
    Not,
    As,
    On,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    GroupBy,
    Having,
    OrderBy,
    Asc,
    Desc,
    Top,
    Limit,
    Offset,
    Fetch,
    Next,
    Rows,
    Only,
    In,
    Between,
    Is,
    Null,
    Union,
    UnionAll,
    Intersect,
    Except,

    // === DML keywords ===
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Using,
    Conflict,
    Do,
    Nothing,
    Merge,
    When,
    Matched,
    Then,

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LParen,
    RParen,

    // === Whitespace ===
    Space,

    // === Dynamic content ===
    /// Simple identifier segment, quoted per-dialect.
    Ident(String),
    /// Integer that is part of SQL syntax rather than a bound value
    /// (e.g. the `n` in `TOP n` or `LIMIT n`).
    LitInt(u64),
    /// Positional parameter placeholder, `@p<N>`.
    Param(usize),

    /// Pre-rendered fragment: an already-formatted literal, a raw predicate
    /// operator, an opaque `ON` condition, or similar caller-supplied text
    /// that this crate does not re-parse or re-validate.
    Raw(String),
}

impl Token {
    /// Serialize this token to a string for the given dialect.
    pub fn serialize(&self, dialect: Dialect) -> String {
        match self {
            Token::Select => "SELECT".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::Not => "NOT".into(),
            Token::As => "AS".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Inner => "INNER".into(),
            Token::Left => "LEFT".into(),
            Token::Right => "RIGHT".into(),
            Token::Full => "FULL".into(),
            Token::Outer => "OUTER".into(),
            Token::Cross => "CROSS".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::Having => "HAVING".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Desc => "DESC".into(),
            Token::Top => "TOP".into(),
            Token::Limit => "LIMIT".into(),
            Token::Offset => "OFFSET".into(),
            Token::Fetch => "FETCH".into(),
            Token::Next => "NEXT".into(),
            Token::Rows => "ROWS".into(),
            Token::Only => "ONLY".into(),
            Token::In => "IN".into(),
            Token::Between => "BETWEEN".into(),
            Token::Is => "IS".into(),
            Token::Null => "NULL".into(),
            Token::Union => "UNION".into(),
            Token::UnionAll => "UNION ALL".into(),
            Token::Intersect => "INTERSECT".into(),
            Token::Except => "EXCEPT".into(),

            Token::Insert => "INSERT".into(),
            Token::Into => "INTO".into(),
            Token::Values => "VALUES".into(),
            Token::Update => "UPDATE".into(),
            Token::Set => "SET".into(),
            Token::Delete => "DELETE".into(),
            Token::Using => "USING".into(),
            Token::Conflict => "CONFLICT".into(),
            Token::Do => "DO".into(),
            Token::Nothing => "NOTHING".into(),
            Token::Merge => "MERGE".into(),
            Token::When => "WHEN".into(),
            Token::Matched => "MATCHED".into(),
            Token::Then => "THEN".into(),

            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            Token::Space => " ".into(),

            Token::Ident(name) => dialect.quote_identifier(name),
            Token::LitInt(n) => n.to_string(),
            Token::Param(n) => format!("@p{}", n),
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A sequence of tokens that can be serialized to a SQL string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream's tokens.
    pub fn append(&mut self, other: TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens);
        self
    }

    /// Whether any tokens have been pushed.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self, dialect: Dialect) -> String {
        self.tokens.iter().map(|t| t.serialize(dialect)).collect()
    }

    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_serialize() {
        assert_eq!(Token::Select.serialize(Dialect::Postgres), "SELECT");
        assert_eq!(Token::GroupBy.serialize(Dialect::SqlServer), "GROUP BY");
    }

    #[test]
    fn ident_serialize_per_dialect() {
        let tok = Token::Ident("users".into());
        assert_eq!(tok.serialize(Dialect::Postgres), "\"users\"");
        assert_eq!(tok.serialize(Dialect::SqlServer), "[users]");
        assert_eq!(tok.serialize(Dialect::MySql), "`users`");
    }

    #[test]
    fn param_serialize_is_dialect_independent() {
        assert_eq!(Token::Param(0).serialize(Dialect::Postgres), "@p0");
        assert_eq!(Token::Param(12).serialize(Dialect::Oracle), "@p12");
    }

    #[test]
    fn token_stream_joins_without_implicit_spacing() {
        let mut ts = TokenStream::new();
        ts.push(Token::Select)
            .space()
            .push(Token::Ident("name".into()))
            .space()
            .push(Token::From)
            .space()
            .push(Token::Ident("users".into()));

        assert_eq!(
            ts.serialize(Dialect::Postgres),
            "SELECT \"name\" FROM \"users\""
        );
    }
}
