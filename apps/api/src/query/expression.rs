use std::fmt;
use std::marker::PhantomData;

use sqlx::{Postgres, QueryBuilder};

use super::ordering::{OrderSpecifier, SortOrder};
use super::path::{Column, ColumnRef};
use super::predicate::{CompareOp, Predicate};
use super::value::Value;

/// Aggregate functions supported in a selection or `HAVING` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

impl AggregateFunction {
    fn as_sql(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Min => "MIN",
        }
    }
}

/// Untyped select-list expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(ColumnRef),
    /// `argument: None` renders as `COUNT(*)`
    Aggregate {
        function: AggregateFunction,
        argument: Option<ColumnRef>,
    },
    Aliased {
        expr: Box<Expr>,
        alias: &'static str,
    },
}

impl Expr {
    /// The expression with any alias stripped
    pub fn unaliased(&self) -> &Expr {
        match self {
            Expr::Aliased { expr, .. } => expr.unaliased(),
            other => other,
        }
    }

    /// Renders the expression as it appears in a select list
    pub(crate) fn push_selection(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Expr::Aliased { expr, alias } => {
                expr.push_reference(builder);
                builder.push(" AS ").push(*alias);
            }
            other => other.push_reference(builder),
        }
    }

    /// Renders the expression as it appears in WHERE, GROUP BY and ORDER BY
    pub(crate) fn push_reference(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Expr::Column(column) => {
                builder.push(column);
            }
            Expr::Aggregate { function, argument } => {
                builder.push(function.as_sql()).push("(");
                match argument {
                    Some(column) => builder.push(column),
                    None => builder.push("*"),
                };
                builder.push(")");
            }
            Expr::Aliased { expr, .. } => expr.push_reference(builder),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(column) => write!(f, "{}", column),
            Expr::Aggregate {
                function,
                argument: Some(column),
            } => write!(f, "{}({})", function.as_sql(), column),
            Expr::Aggregate {
                function,
                argument: None,
            } => write!(f, "{}(*)", function.as_sql()),
            Expr::Aliased { expr, alias } => write!(f, "{} AS {}", expr, alias),
        }
    }
}

/// Anything that can appear in a select list
pub trait Selectable: Send + Sync {
    fn to_expr(&self) -> Expr;

    /// Selects the expression under `alias`, which is the name `FromRow`
    /// implementations see
    fn as_alias(&self, alias: &'static str) -> Expr
    where
        Self: Sized,
    {
        Expr::Aliased {
            expr: Box::new(self.to_expr().unaliased().clone()),
            alias,
        }
    }
}

/// A selectable expression with a known result type
pub trait Expression: Selectable {
    type Output;
}

impl Selectable for Expr {
    fn to_expr(&self) -> Expr {
        self.clone()
    }
}

impl<T> Selectable for Column<T> {
    fn to_expr(&self) -> Expr {
        Expr::Column(self.column_ref())
    }
}

impl<T> Expression for Column<T> {
    type Output = T;
}

/// Typed aggregate such as `SUM(m.age)`
pub struct Aggregate<T> {
    expr: Expr,
    _type: PhantomData<fn() -> T>,
}

impl<T> Clone for Aggregate<T> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Aggregate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Aggregate").field(&self.expr).finish()
    }
}

impl Aggregate<i64> {
    /// `COUNT(*)`
    pub fn count_all() -> Self {
        Self::new(AggregateFunction::Count, None)
    }
}

impl<T> Aggregate<T> {
    pub(crate) fn new(function: AggregateFunction, argument: Option<ColumnRef>) -> Self {
        Self {
            expr: Expr::Aggregate { function, argument },
            _type: PhantomData,
        }
    }

    pub fn asc(&self) -> OrderSpecifier {
        OrderSpecifier::new(self.expr.clone(), SortOrder::Asc)
    }

    pub fn desc(&self) -> OrderSpecifier {
        OrderSpecifier::new(self.expr.clone(), SortOrder::Desc)
    }
}

impl<T: Into<Value>> Aggregate<T> {
    pub fn eq(&self, value: T) -> Predicate {
        self.compare(CompareOp::Eq, value)
    }

    pub fn goe(&self, value: T) -> Predicate {
        self.compare(CompareOp::Goe, value)
    }

    pub fn gt(&self, value: T) -> Predicate {
        self.compare(CompareOp::Gt, value)
    }

    pub fn loe(&self, value: T) -> Predicate {
        self.compare(CompareOp::Loe, value)
    }

    pub fn lt(&self, value: T) -> Predicate {
        self.compare(CompareOp::Lt, value)
    }

    fn compare(&self, op: CompareOp, value: T) -> Predicate {
        Predicate::Compare {
            left: self.expr.clone(),
            op,
            value: value.into(),
        }
    }
}

impl<T> Selectable for Aggregate<T> {
    fn to_expr(&self) -> Expr {
        self.expr.clone()
    }
}

impl<T> Expression for Aggregate<T> {
    type Output = T;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::path::TableRef;

    const PEOPLE: TableRef = TableRef::new("people", "p");
    const AGE: Column<i32> = Column::new(PEOPLE, "age");

    #[test]
    fn aggregates_display_with_argument() {
        assert_eq!(AGE.sum().to_expr().to_string(), "SUM(p.age)");
        assert_eq!(AGE.avg().to_expr().to_string(), "AVG(p.age)");
        assert_eq!(Aggregate::count_all().to_expr().to_string(), "COUNT(*)");
    }

    #[test]
    fn alias_wraps_unaliased_expression() {
        let aliased = AGE.max().as_alias("oldest");
        assert_eq!(aliased.to_string(), "MAX(p.age) AS oldest");
        assert_eq!(aliased.unaliased(), &AGE.max().to_expr());

        let realiased = aliased.as_alias("eldest");
        assert_eq!(realiased.to_string(), "MAX(p.age) AS eldest");
    }
}
