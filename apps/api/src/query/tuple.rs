use std::fmt;
use std::sync::Arc;

use sqlx::postgres::PgRow;
use sqlx::{Decode, Postgres, Row, Type};

use super::errors::{QueryError, QueryResult};
use super::expression::{Expr, Expression};

/// Row of an ad-hoc selection, read back through the same typed
/// expressions that were selected
///
/// ```ignore
/// let tuple = &rows[0];
/// let total: i64 = tuple.get(&MEMBER.age.sum())?;
/// ```
pub struct Tuple {
    row: PgRow,
    selection: Arc<[Expr]>,
}

impl Tuple {
    pub(crate) fn new(row: PgRow, selection: Arc<[Expr]>) -> Self {
        Self { row, selection }
    }

    pub fn get<E>(&self, expr: &E) -> QueryResult<E::Output>
    where
        E: Expression,
        E::Output: for<'r> Decode<'r, Postgres> + Type<Postgres>,
    {
        let index = self.index_of(&expr.to_expr())?;
        Ok(self.row.try_get(index)?)
    }

    /// Like [`get`](Tuple::get) but maps SQL NULL to `None`
    pub fn get_optional<E>(&self, expr: &E) -> QueryResult<Option<E::Output>>
    where
        E: Expression,
        E::Output: for<'r> Decode<'r, Postgres> + Type<Postgres>,
    {
        let index = self.index_of(&expr.to_expr())?;
        Ok(self.row.try_get(index)?)
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    fn index_of(&self, expr: &Expr) -> QueryResult<usize> {
        let wanted = expr.unaliased();
        self.selection
            .iter()
            .position(|selected| selected.unaliased() == wanted)
            .ok_or_else(|| QueryError::MissingColumn(wanted.to_string()))
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tuple")
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
