use sqlx::{Postgres, QueryBuilder};

use super::expression::Expr;
use super::path::ColumnRef;
use super::value::Value;

/// Binary comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Goe,
    Lt,
    Loe,
}

impl CompareOp {
    fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => " = ",
            CompareOp::Ne => " <> ",
            CompareOp::Gt => " > ",
            CompareOp::Goe => " >= ",
            CompareOp::Lt => " < ",
            CompareOp::Loe => " <= ",
        }
    }
}

/// Boolean condition tree for WHERE, ON and HAVING clauses
///
/// Predicates are built from typed [`Column`](super::Column) methods and
/// combined with [`and`](Predicate::and), [`or`](Predicate::or) and
/// [`not`](Predicate::not).
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        left: Expr,
        op: CompareOp,
        value: Value,
    },
    ColumnCompare {
        left: ColumnRef,
        op: CompareOp,
        right: ColumnRef,
    },
    Between {
        column: ColumnRef,
        low: Value,
        high: Value,
    },
    In {
        column: ColumnRef,
        values: Vec<Value>,
        negated: bool,
    },
    Like {
        column: ColumnRef,
        pattern: String,
    },
    Null {
        column: ColumnRef,
        negated: bool,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Conjunction, flattening nested `AND`s
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), right) => {
                left.push(right);
                Predicate::And(left)
            }
            (left, Predicate::And(mut right)) => {
                right.insert(0, left);
                Predicate::And(right)
            }
            (left, right) => Predicate::And(vec![left, right]),
        }
    }

    /// Disjunction, flattening nested `OR`s
    pub fn or(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::Or(mut left), Predicate::Or(right)) => {
                left.extend(right);
                Predicate::Or(left)
            }
            (Predicate::Or(mut left), right) => {
                left.push(right);
                Predicate::Or(left)
            }
            (left, Predicate::Or(mut right)) => {
                right.insert(0, left);
                Predicate::Or(right)
            }
            (left, right) => Predicate::Or(vec![left, right]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        match self {
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }

    /// Conjunction of the supplied predicates, skipping `None`
    ///
    /// Returns `None` when nothing was supplied, meaning "no condition".
    pub fn all_of<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        predicates
            .into_iter()
            .flatten()
            .reduce(|acc, predicate| acc.and(predicate))
    }

    pub(crate) fn push_sql(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Predicate::Compare { left, op, value } => {
                left.push_reference(builder);
                builder.push(op.as_sql());
                value.bind(builder);
            }
            Predicate::ColumnCompare { left, op, right } => {
                builder.push(left).push(op.as_sql()).push(right);
            }
            Predicate::Between { column, low, high } => {
                builder.push(column).push(" BETWEEN ");
                low.bind(builder);
                builder.push(" AND ");
                high.bind(builder);
            }
            Predicate::In {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    builder.push(if *negated { "TRUE" } else { "FALSE" });
                    return;
                }
                builder
                    .push(column)
                    .push(if *negated { " NOT IN (" } else { " IN (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        builder.push(", ");
                    }
                    value.bind(builder);
                }
                builder.push(")");
            }
            Predicate::Like { column, pattern } => {
                builder.push(column).push(" LIKE ");
                builder.push_bind(pattern.clone());
            }
            Predicate::Null { column, negated } => {
                builder
                    .push(column)
                    .push(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Predicate::And(parts) => push_joined(builder, parts, " AND "),
            Predicate::Or(parts) => push_joined(builder, parts, " OR "),
            Predicate::Not(inner) => {
                builder.push("NOT (");
                inner.push_sql(builder);
                builder.push(")");
            }
        }
    }

    fn is_compound(&self) -> bool {
        matches!(self, Predicate::And(_) | Predicate::Or(_))
    }
}

fn push_joined(builder: &mut QueryBuilder<'static, Postgres>, parts: &[Predicate], separator: &str) {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        if part.is_compound() {
            builder.push("(");
            part.push_sql(builder);
            builder.push(")");
        } else {
            part.push_sql(builder);
        }
    }
}

/// Accumulates optional conditions into a single conjunction
///
/// # Example
/// ```
/// use roster_api::domain::member::MEMBER;
/// use roster_api::domain::team::TEAM;
/// use roster_api::query::ConditionBuilder;
///
/// let team_name: Option<&str> = None;
///
/// let mut builder = ConditionBuilder::new();
/// builder.and(MEMBER.age.goe(35));
/// if let Some(name) = team_name {
///     builder.and(TEAM.name.eq(name));
/// }
///
/// assert!(builder.has_value());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConditionBuilder {
    predicate: Option<Predicate>,
}

impl ConditionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(&mut self, predicate: Predicate) -> &mut Self {
        self.predicate = Some(match self.predicate.take() {
            Some(current) => current.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn or(&mut self, predicate: Predicate) -> &mut Self {
        self.predicate = Some(match self.predicate.take() {
            Some(current) => current.or(predicate),
            None => predicate,
        });
        self
    }

    /// Whether any condition has been added
    pub fn has_value(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn build(self) -> Option<Predicate> {
        self.predicate
    }
}
