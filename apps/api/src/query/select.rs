use std::sync::Arc;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, PgPool, Postgres, QueryBuilder};

use super::errors::{QueryError, QueryResult};
use super::expression::{Expr, Selectable};
use super::ordering::OrderSpecifier;
use super::pagination::{Page, PageRequest};
use super::path::{EntityPath, TableRef};
use super::predicate::Predicate;
use super::tuple::Tuple;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    fn as_sql(&self) -> &'static str {
        match self {
            JoinKind::Inner => " INNER JOIN ",
            JoinKind::Left => " LEFT JOIN ",
            JoinKind::Right => " RIGHT JOIN ",
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    kind: JoinKind,
    table: TableRef,
    on: Predicate,
}

/// A `SELECT` statement assembled from typed paths
///
/// Clauses can be added in any order; rendering always emits them in SQL
/// order. The query is a plain value: execution borrows it, so the same
/// query can be fetched, counted and paged.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    selection: Vec<Expr>,
    from: Option<TableRef>,
    joins: Vec<Join>,
    predicate: Option<Predicate>,
    group_by: Vec<Expr>,
    having: Option<Predicate>,
    order_by: Vec<OrderSpecifier>,
    offset: Option<i64>,
    limit: Option<i64>,
}

impl SelectQuery {
    /// Starts a query with an explicit select list
    pub fn select(items: &[&dyn Selectable]) -> Self {
        Self {
            selection: items.iter().map(|item| item.to_expr()).collect(),
            ..Self::default()
        }
    }

    /// Selects every column of `entity` from its table
    pub fn select_from<P: EntityPath>(entity: &P) -> Self {
        Self {
            selection: entity.columns().into_iter().map(Expr::Column).collect(),
            from: Some(entity.table()),
            ..Self::default()
        }
    }

    pub fn from<P: EntityPath>(mut self, entity: &P) -> Self {
        self.from = Some(entity.table());
        self
    }

    pub fn join<P: EntityPath>(self, entity: &P, on: Predicate) -> Self {
        self.push_join(JoinKind::Inner, entity.table(), on)
    }

    pub fn left_join<P: EntityPath>(self, entity: &P, on: Predicate) -> Self {
        self.push_join(JoinKind::Left, entity.table(), on)
    }

    pub fn right_join<P: EntityPath>(self, entity: &P, on: Predicate) -> Self {
        self.push_join(JoinKind::Right, entity.table(), on)
    }

    fn push_join(mut self, kind: JoinKind, table: TableRef, on: Predicate) -> Self {
        self.joins.push(Join { kind, table, on });
        self
    }

    /// Adds a condition, AND-ed with any already present
    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(current) => current.and(predicate),
            None => predicate,
        });
        self
    }

    /// Adds every supplied condition; `None` entries are ignored
    pub fn where_all<I>(self, predicates: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        match Predicate::all_of(predicates) {
            Some(predicate) => self.where_(predicate),
            None => self,
        }
    }

    pub fn group_by(mut self, items: &[&dyn Selectable]) -> Self {
        self.group_by
            .extend(items.iter().map(|item| item.to_expr().unaliased().clone()));
        self
    }

    pub fn having(mut self, predicate: Predicate) -> Self {
        self.having = Some(match self.having.take() {
            Some(current) => current.and(predicate),
            None => predicate,
        });
        self
    }

    /// Appends an ordering term after those already present
    pub fn order_by(mut self, order: OrderSpecifier) -> Self {
        self.order_by.push(order);
        self
    }

    /// Rows to skip, zero-based
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Maximum number of rows to return
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn selection(&self) -> &[Expr] {
        &self.selection
    }

    /// SQL text of the query with `$n` placeholders
    pub fn to_sql(&self) -> String {
        self.render().sql().to_string()
    }

    /// SQL text of the count query used by [`fetch_count`](Self::fetch_count)
    pub fn to_count_sql(&self) -> String {
        self.render_count().sql().to_string()
    }

    /// Fetches every row, decoded into `T` by column name
    pub async fn fetch<'e, T, E>(&self, executor: E) -> QueryResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        E: PgExecutor<'e>,
    {
        let mut builder = self.render();
        tracing::debug!(sql = builder.sql(), "fetch");

        let rows = builder.build_query_as::<T>().fetch_all(executor).await?;
        Ok(rows)
    }

    /// Fetches at most one row
    ///
    /// # Errors
    /// `QueryError::NonUniqueResult` if the query matches more than one row.
    /// An explicit `limit(1)` caps the fetch at one row, so such a query
    /// never reports a non-unique result.
    pub async fn fetch_one<'e, T, E>(&self, executor: E) -> QueryResult<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        E: PgExecutor<'e>,
    {
        // two rows are enough to detect a non-unique result
        let window = self.limit.map_or(2, |limit| limit.min(2));
        let mut rows: Vec<T> = self.clone().limit(window).fetch(executor).await?;

        if rows.len() > 1 {
            return Err(QueryError::NonUniqueResult(rows.len()));
        }
        Ok(rows.pop())
    }

    /// Fetches the first row, ignoring any others
    pub async fn fetch_first<'e, T, E>(&self, executor: E) -> QueryResult<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        E: PgExecutor<'e>,
    {
        let rows: Vec<T> = self.clone().limit(1).fetch(executor).await?;
        Ok(rows.into_iter().next())
    }

    /// Counts the rows the query matches, ignoring ordering and paging
    pub async fn fetch_count<'e, E>(&self, executor: E) -> QueryResult<i64>
    where
        E: PgExecutor<'e>,
    {
        let mut builder = self.render_count();
        tracing::debug!(sql = builder.sql(), "fetch_count");

        let (count,): (i64,) = builder.build_query_as().fetch_one(executor).await?;
        Ok(count)
    }

    /// Fetches rows for typed access through the selected expressions
    pub async fn fetch_tuples<'e, E>(&self, executor: E) -> QueryResult<Vec<Tuple>>
    where
        E: PgExecutor<'e>,
    {
        let mut builder = self.render();
        tracing::debug!(sql = builder.sql(), "fetch_tuples");

        let rows: Vec<PgRow> = builder.build().fetch_all(executor).await?;
        let selection: Arc<[Expr]> = self.selection.clone().into();

        Ok(rows
            .into_iter()
            .map(|row| Tuple::new(row, Arc::clone(&selection)))
            .collect())
    }

    /// Fetches one window of rows together with the unpaged total
    pub async fn fetch_page<T>(&self, pool: &PgPool, request: PageRequest) -> QueryResult<Page<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let content: Vec<T> = self
            .clone()
            .offset(request.offset)
            .limit(request.limit)
            .fetch(pool)
            .await?;
        let total = self.fetch_count(pool).await?;

        Ok(Page::new(content, total, request))
    }

    fn render(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT ");
        self.push_body(&mut builder);

        if !self.order_by.is_empty() {
            builder.push(" ORDER BY ");
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    builder.push(", ");
                }
                order.push_sql(&mut builder);
            }
        }

        if let Some(limit) = self.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }

        if let Some(offset) = self.offset {
            builder.push(" OFFSET ");
            builder.push_bind(offset);
        }

        builder
    }

    fn render_count(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM (SELECT ");
        self.push_body(&mut builder);
        builder.push(") AS counted");
        builder
    }

    // Everything from the select list through HAVING
    fn push_body(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        if self.selection.is_empty() {
            builder.push("*");
        }
        for (i, expr) in self.selection.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            expr.push_selection(builder);
        }

        if let Some(from) = self.from {
            builder.push(" FROM ").push(from);
        }

        for join in &self.joins {
            builder.push(join.kind.as_sql()).push(join.table).push(" ON ");
            join.on.push_sql(builder);
        }

        if let Some(predicate) = &self.predicate {
            builder.push(" WHERE ");
            predicate.push_sql(builder);
        }

        if !self.group_by.is_empty() {
            builder.push(" GROUP BY ");
            for (i, expr) in self.group_by.iter().enumerate() {
                if i > 0 {
                    builder.push(", ");
                }
                expr.push_reference(builder);
            }
        }

        if let Some(having) = &self.having {
            builder.push(" HAVING ");
            having.push_sql(builder);
        }
    }
}
