use tracing::debug;

use crate::{
    storage::{cursor::Cursor, table::Table},
    types::{
        LEAF_NODE_MAX_CELLS,
        error::{DatabaseError, Result},
        row::Row,
    },
};

/// Trait for inserting rows into the table
pub trait Inserter {
    /// Insert a single row into the table
    fn insert(&mut self, row: &Row) -> Result<()>;

    /// Insert rows in order, stopping at the first failure.
    /// Rows inserted before the failure stay in place.
    fn insert_batch(&mut self, rows: &[Row]) -> Result<()>;

    /// Number of rows written by this inserter so far
    fn inserted(&self) -> usize;
}

/// Appends rows to the root leaf page.
pub struct TableInserter<'a> {
    table: &'a mut Table,
    inserted: usize,
}

impl<'a> TableInserter<'a> {
    pub fn new(table: &'a mut Table) -> Self {
        Self { table, inserted: 0 }
    }
}

impl Inserter for TableInserter<'_> {
    fn insert(&mut self, row: &Row) -> Result<()> {
        let cell_count = self.table.root_page()?.cell_count();
        if cell_count as usize >= LEAF_NODE_MAX_CELLS {
            return Err(DatabaseError::TableFull);
        }

        let mut cursor = Cursor::table_end(self.table)?;
        row.serialize(cursor.value()?);
        self.table.root_page()?.set_cell_count(cell_count + 1);

        self.inserted += 1;
        debug!(id = row.id, cell_num = cell_count, "inserted row");
        Ok(())
    }

    fn insert_batch(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            self.insert(row)?;
        }
        Ok(())
    }

    fn inserted(&self) -> usize {
        self.inserted
    }
}
