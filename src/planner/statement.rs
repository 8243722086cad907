use crate::types::row::Row;

/// A prepared statement, ready to be executed once against a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Row),
    Select,
}
