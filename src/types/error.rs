use thiserror::Error;

use crate::{planner::error::PrepareError, types::PageNum};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Db file is not a whole number of pages ({file_length} bytes). Corrupt file.")]
    CorruptFile { file_length: u64 },

    #[error("Db file holds {num_pages} pages, more than the limit of {max}.")]
    FileTooLarge { num_pages: u64, max: usize },

    #[error("Tried to fetch page number out of bounds. {page_num} >= {max}")]
    PageOutOfBounds { page_num: PageNum, max: usize },

    #[error("Table full.")]
    TableFull,

    #[error("Invalid node kind: {0}")]
    InvalidNodeKind(u8),

    #[error("Invalid cell index {index} (max: {max})")]
    InvalidCellIndex { index: usize, max: usize },

    #[error(transparent)]
    Prepare(#[from] PrepareError),
}

impl DatabaseError {
    /// Errors caused by the caller's input rather than by the storage layer.
    pub fn is_user_error(&self) -> bool {
        matches!(self, DatabaseError::TableFull | DatabaseError::Prepare(_))
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
