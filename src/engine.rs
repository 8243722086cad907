use std::path::Path;

use crate::{
    executor::{ExecuteResult, execute_statement},
    planner::{error::PrepareError, parser::SqlParser, statement::Statement},
    storage::table::Table,
    types::error::Result,
};

/// An open database: the table plus the front end that feeds it.
///
/// Dropping an engine flushes every touched page; prefer [`Engine::close`]
/// to see write errors.
pub struct Engine {
    table: Table,
    parser: SqlParser,
}

impl Engine {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            table: Table::open(path)?,
            parser: SqlParser::new(),
        })
    }

    pub fn prepare(&self, input: &str) -> std::result::Result<Statement, PrepareError> {
        self.parser.prepare(input)
    }

    pub fn execute(&mut self, statement: &Statement) -> Result<ExecuteResult> {
        execute_statement(statement, &mut self.table)
    }

    /// Prepares and executes `input` in one step.
    pub fn run(&mut self, input: &str) -> Result<ExecuteResult> {
        let statement = self.prepare(input)?;
        self.execute(&statement)
    }

    /// Read-only access to the table; resident pages are reachable through
    /// [`Pager::cached_page`](crate::storage::pager::Pager::cached_page).
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Mutable access for callers that need to load pages from disk.
    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn close(self) -> Result<()> {
        self.table.close()
    }
}
