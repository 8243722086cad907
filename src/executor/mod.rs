pub mod insert;
pub mod scan;

use crate::{
    executor::{
        insert::{Inserter, TableInserter},
        scan::{Scanner, TableScanner},
    },
    planner::statement::Statement,
    storage::table::Table,
    types::{error::Result, row::Row},
};

/// Outcome of a successfully executed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    Inserted,
    Rows(Vec<Row>),
}

pub fn execute_insert(row: &Row, table: &mut Table) -> Result<()> {
    TableInserter::new(table).insert(row)
}

/// Emits every row to `sink` in insertion order and returns how many were emitted.
pub fn execute_select<F>(table: &mut Table, mut sink: F) -> Result<usize>
where
    F: FnMut(Row),
{
    let mut scanner = TableScanner::new(table)?;
    let mut emitted = 0;
    while let Some(row) = scanner.scan()? {
        sink(row);
        emitted += 1;
    }
    Ok(emitted)
}

pub fn execute_statement(statement: &Statement, table: &mut Table) -> Result<ExecuteResult> {
    match statement {
        Statement::Insert(row) => {
            execute_insert(row, table)?;
            Ok(ExecuteResult::Inserted)
        }
        Statement::Select => {
            let mut rows = Vec::new();
            execute_select(table, |row| rows.push(row))?;
            Ok(ExecuteResult::Rows(rows))
        }
    }
}
