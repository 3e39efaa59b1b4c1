use uuid::Uuid;

use crate::query::{Column, ColumnRef, EntityPath, TableRef};

/// Typed query path over the `team` table (default alias `t`)
#[derive(Debug, Clone, Copy)]
pub struct TeamPath {
    table: TableRef,
    pub id: Column<Uuid>,
    pub name: Column<String>,
}

pub const TEAM: TeamPath = TeamPath::aliased("t");

impl TeamPath {
    pub const TABLE: &'static str = "team";

    pub const fn aliased(alias: &'static str) -> Self {
        let table = TableRef::new(Self::TABLE, alias);
        Self {
            table,
            id: Column::new(table, "team_id"),
            name: Column::new(table, "name"),
        }
    }
}

impl EntityPath for TeamPath {
    fn table(&self) -> TableRef {
        self.table
    }

    fn columns(&self) -> Vec<ColumnRef> {
        vec![self.id.column_ref(), self.name.column_ref()]
    }
}
