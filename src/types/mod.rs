pub mod error;
pub mod page;
pub mod row;

// Common type aliases
pub type PageNum = u32;
pub type CellNum = u32;

// Page geometry
pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;

// Row layout: id | username (+ sentinel) | email (+ sentinel)
pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;
pub const ID_SIZE: usize = std::mem::size_of::<u32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE + 1;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE + 1;
pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

// Node header: node_kind(1) | is_root(1) | cell_count(4)
pub const NODE_KIND_OFFSET: usize = 0;
pub const IS_ROOT_OFFSET: usize = 1;
pub const CELL_COUNT_OFFSET: usize = 2;
pub const CELL_COUNT_SIZE: usize = std::mem::size_of::<u32>();
pub const LEAF_NODE_HEADER_SIZE: usize = CELL_COUNT_OFFSET + CELL_COUNT_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / ROW_SIZE;
