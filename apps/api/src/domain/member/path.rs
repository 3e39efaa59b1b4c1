use uuid::Uuid;

use crate::domain::team::TeamPath;
use crate::query::{Aggregate, Column, ColumnRef, EntityPath, Predicate, TableRef};

/// Typed query path over the `member` table
///
/// [`MEMBER`] is the default instance (alias `m`); use
/// [`MemberPath::aliased`] when the table appears twice in one query.
#[derive(Debug, Clone, Copy)]
pub struct MemberPath {
    table: TableRef,
    pub id: Column<Uuid>,
    pub username: Column<String>,
    pub age: Column<i32>,
    pub team_id: Column<Uuid>,
}

pub const MEMBER: MemberPath = MemberPath::aliased("m");

impl MemberPath {
    pub const TABLE: &'static str = "member";

    pub const fn aliased(alias: &'static str) -> Self {
        let table = TableRef::new(Self::TABLE, alias);
        Self {
            table,
            id: Column::new(table, "member_id"),
            username: Column::new(table, "username"),
            age: Column::new(table, "age"),
            team_id: Column::new(table, "team_id"),
        }
    }

    /// Join condition from this member to `team`
    pub fn team(&self, team: &TeamPath) -> Predicate {
        self.team_id.eq_column(&team.id)
    }

    /// `COUNT` of members
    pub fn count(&self) -> Aggregate<i64> {
        self.id.count()
    }
}

impl EntityPath for MemberPath {
    fn table(&self) -> TableRef {
        self.table
    }

    fn columns(&self) -> Vec<ColumnRef> {
        vec![
            self.id.column_ref(),
            self.username.column_ref(),
            self.age.column_ref(),
            self.team_id.column_ref(),
        ]
    }
}
