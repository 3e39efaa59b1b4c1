use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// A parameter held by a predicate until the query is rendered
///
/// Values never appear in the SQL text; [`Value::bind`] pushes them as
/// positional parameters (`$1`, `$2`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    BigInt(i64),
    Decimal(Decimal),
    Text(String),
    Uuid(Uuid),
    Bool(bool),
}

impl Value {
    pub(crate) fn bind(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Value::Int(v) => {
                builder.push_bind(*v);
            }
            Value::BigInt(v) => {
                builder.push_bind(*v);
            }
            Value::Decimal(v) => {
                builder.push_bind(*v);
            }
            Value::Text(v) => {
                builder.push_bind(v.clone());
            }
            Value::Uuid(v) => {
                builder.push_bind(*v);
            }
            Value::Bool(v) => {
                builder.push_bind(*v);
            }
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::BigInt(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
