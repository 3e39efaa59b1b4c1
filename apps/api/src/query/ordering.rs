use sqlx::{Postgres, QueryBuilder};

use super::expression::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Where NULLs land relative to non-null values
///
/// `Default` leaves it to PostgreSQL, which sorts NULLs as larger than any
/// value (last ascending, first descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullHandling {
    #[default]
    Default,
    NullsFirst,
    NullsLast,
}

/// One `ORDER BY` term
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpecifier {
    target: Expr,
    order: SortOrder,
    nulls: NullHandling,
}

impl OrderSpecifier {
    pub fn new(target: Expr, order: SortOrder) -> Self {
        Self {
            target,
            order,
            nulls: NullHandling::Default,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullHandling::NullsFirst;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullHandling::NullsLast;
        self
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn null_handling(&self) -> NullHandling {
        self.nulls
    }

    pub(crate) fn push_sql(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        self.target.push_reference(builder);
        builder.push(match self.order {
            SortOrder::Asc => " ASC",
            SortOrder::Desc => " DESC",
        });
        match self.nulls {
            NullHandling::Default => {}
            NullHandling::NullsFirst => {
                builder.push(" NULLS FIRST");
            }
            NullHandling::NullsLast => {
                builder.push(" NULLS LAST");
            }
        }
    }
}
