use rust_decimal::Decimal;
use std::fmt;
use std::marker::PhantomData;

use super::expression::{Aggregate, AggregateFunction, Expr};
use super::ordering::{OrderSpecifier, SortOrder};
use super::predicate::{CompareOp, Predicate};
use super::value::Value;

/// A table together with the alias it is queried under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRef {
    pub name: &'static str,
    pub alias: &'static str,
}

impl TableRef {
    pub const fn new(name: &'static str, alias: &'static str) -> Self {
        Self { name, alias }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.alias)
    }
}

/// An alias-qualified column name, e.g. `m.username`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub qualifier: &'static str,
    pub name: &'static str,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.qualifier, self.name)
    }
}

/// Describes an entity table: which table it lives in and which columns make
/// up a full row
pub trait EntityPath {
    fn table(&self) -> TableRef;

    fn columns(&self) -> Vec<ColumnRef>;
}

/// Typed handle on a column
///
/// `T` is the Rust type of the column's values. It decides which predicates
/// are available (ranges only on [`Numeric`] columns, `LIKE` only on text)
/// and what [`Tuple::get`](super::Tuple::get) decodes to.
pub struct Column<T> {
    column: ColumnRef,
    _type: PhantomData<fn() -> T>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.column).finish()
    }
}

impl<T> Column<T> {
    pub const fn new(table: TableRef, name: &'static str) -> Self {
        Self {
            column: ColumnRef {
                qualifier: table.alias,
                name,
            },
            _type: PhantomData,
        }
    }

    pub fn column_ref(&self) -> ColumnRef {
        self.column
    }

    pub fn is_null(&self) -> Predicate {
        Predicate::Null {
            column: self.column,
            negated: false,
        }
    }

    pub fn is_not_null(&self) -> Predicate {
        Predicate::Null {
            column: self.column,
            negated: true,
        }
    }

    /// Column-to-column equality, used for join conditions
    pub fn eq_column(&self, other: &Column<T>) -> Predicate {
        Predicate::ColumnCompare {
            left: self.column,
            op: CompareOp::Eq,
            right: other.column,
        }
    }

    pub fn asc(&self) -> OrderSpecifier {
        OrderSpecifier::new(Expr::Column(self.column), SortOrder::Asc)
    }

    pub fn desc(&self) -> OrderSpecifier {
        OrderSpecifier::new(Expr::Column(self.column), SortOrder::Desc)
    }

    /// `COUNT(column)`: non-null values only
    pub fn count(&self) -> Aggregate<i64> {
        Aggregate::new(AggregateFunction::Count, Some(self.column))
    }

    pub fn max(&self) -> Aggregate<T> {
        Aggregate::new(AggregateFunction::Max, Some(self.column))
    }

    pub fn min(&self) -> Aggregate<T> {
        Aggregate::new(AggregateFunction::Min, Some(self.column))
    }
}

impl<T: Into<Value>> Column<T> {
    pub fn eq(&self, value: impl Into<T>) -> Predicate {
        self.compare(CompareOp::Eq, value.into())
    }

    pub fn ne(&self, value: impl Into<T>) -> Predicate {
        self.compare(CompareOp::Ne, value.into())
    }

    /// `column IN (...)`; an empty list matches nothing
    pub fn in_list<V, I>(&self, values: I) -> Predicate
    where
        V: Into<T>,
        I: IntoIterator<Item = V>,
    {
        Predicate::In {
            column: self.column,
            values: values.into_iter().map(|v| Self::value_of(v)).collect(),
            negated: false,
        }
    }

    /// `column NOT IN (...)`; an empty list matches everything
    pub fn not_in<V, I>(&self, values: I) -> Predicate
    where
        V: Into<T>,
        I: IntoIterator<Item = V>,
    {
        Predicate::In {
            column: self.column,
            values: values.into_iter().map(|v| Self::value_of(v)).collect(),
            negated: true,
        }
    }

    fn value_of(value: impl Into<T>) -> Value {
        let value: T = value.into();
        value.into()
    }

    fn compare(&self, op: CompareOp, value: T) -> Predicate {
        Predicate::Compare {
            left: Expr::Column(self.column),
            op,
            value: value.into(),
        }
    }
}

/// Column types that support range predicates and arithmetic aggregates
pub trait Numeric: Into<Value> {
    /// Result type of `SUM` over this type in PostgreSQL
    type Sum;
}

impl Numeric for i32 {
    type Sum = i64;
}

impl Numeric for i64 {
    type Sum = Decimal;
}

impl Numeric for Decimal {
    type Sum = Decimal;
}

impl<T: Numeric> Column<T> {
    /// `column >= value`
    pub fn goe(&self, value: T) -> Predicate {
        self.compare(CompareOp::Goe, value)
    }

    /// `column > value`
    pub fn gt(&self, value: T) -> Predicate {
        self.compare(CompareOp::Gt, value)
    }

    /// `column <= value`
    pub fn loe(&self, value: T) -> Predicate {
        self.compare(CompareOp::Loe, value)
    }

    /// `column < value`
    pub fn lt(&self, value: T) -> Predicate {
        self.compare(CompareOp::Lt, value)
    }

    /// `column BETWEEN low AND high`, both ends inclusive
    pub fn between(&self, low: T, high: T) -> Predicate {
        Predicate::Between {
            column: self.column,
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn sum(&self) -> Aggregate<T::Sum> {
        Aggregate::new(AggregateFunction::Sum, Some(self.column))
    }

    /// PostgreSQL averages integers as `numeric`
    pub fn avg(&self) -> Aggregate<Decimal> {
        Aggregate::new(AggregateFunction::Avg, Some(self.column))
    }
}

impl Column<String> {
    /// Raw `LIKE`; `pattern` is passed through with its wildcards intact
    pub fn like(&self, pattern: impl Into<String>) -> Predicate {
        Predicate::Like {
            column: self.column,
            pattern: pattern.into(),
        }
    }

    /// `LIKE '%value%'` with wildcards in `value` escaped
    pub fn contains(&self, value: &str) -> Predicate {
        self.like(format!("%{}%", escape_like(value)))
    }

    /// `LIKE 'value%'` with wildcards in `value` escaped
    pub fn starts_with(&self, value: &str) -> Predicate {
        self.like(format!("{}%", escape_like(value)))
    }
}

// PostgreSQL's default LIKE escape character is the backslash
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
