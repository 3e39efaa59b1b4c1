//! Type-safe query builder
//!
//! Typed column paths, predicates, ordering, aggregation and paging rendered
//! onto `sqlx::QueryBuilder`. Every value reaches PostgreSQL as a bound
//! parameter; only identifiers known at compile time are spliced into the
//! SQL text.
//!
//! # Example
//! ```
//! use roster_api::domain::member::MEMBER;
//! use roster_api::query::SelectQuery;
//!
//! let query = SelectQuery::select_from(&MEMBER)
//!     .where_(MEMBER.username.eq("member1").and(MEMBER.age.eq(10)));
//!
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT m.member_id, m.username, m.age, m.team_id FROM member m \
//!      WHERE m.username = $1 AND m.age = $2"
//! );
//! ```

pub mod errors;
pub mod expression;
pub mod ordering;
pub mod pagination;
pub mod path;
pub mod predicate;
pub mod select;
pub mod tuple;
pub mod value;

pub use errors::{QueryError, QueryResult};
pub use expression::{Aggregate, AggregateFunction, Expr, Expression, Selectable};
pub use ordering::{NullHandling, OrderSpecifier, SortOrder};
pub use pagination::{Page, PageRequest};
pub use path::{Column, ColumnRef, EntityPath, Numeric, TableRef};
pub use predicate::{CompareOp, ConditionBuilder, Predicate};
pub use select::{JoinKind, SelectQuery};
pub use tuple::Tuple;
pub use value::Value;
