//! A dialect-aware SQL query builder and compiler.
//!
//! Build a [`Query`](query::Query) with the fluent builder, then compile it
//! for a target [`Dialect`](dialect::Dialect) either with literal values
//! inlined or as parameterized SQL with an ordered bind list:
//!
//! ```
//! use sqlcraft::dialect::Dialect;
//! use sqlcraft::query::Query;
//!
//! let query = Query::new()
//!     .select(["Id", "Name"])
//!     .from("Users")
//!     .where_cond("Active", "=", true)
//!     .order_by_descending("Id")
//!     .top(10);
//!
//! let sql = query.compile(Dialect::SqlServer).unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT TOP 10 [Id], [Name] FROM [Users] WHERE [Active] = 1 ORDER BY [Id] DESC"
//! );
//! ```

pub mod compiler;
pub mod dialect;
pub mod error;
pub mod query;
pub mod token;
pub mod value;
pub mod where_token;

#[cfg(test)]
mod test_utils;

/// Re-exports of the types most callers need, for a single `use` line.
pub mod prelude {
    pub use crate::compiler::QueryCompiler;
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::query::{Pagination, Query};
    pub use crate::value::Value;
    pub use crate::where_token::WhereToken;
}
