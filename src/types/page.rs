use crate::types::{
    CELL_COUNT_OFFSET, CELL_COUNT_SIZE, IS_ROOT_OFFSET, LEAF_NODE_HEADER_SIZE,
    LEAF_NODE_MAX_CELLS, NODE_KIND_OFFSET, PAGE_SIZE, ROW_SIZE, error::DatabaseError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Internal = 1,
    Leaf = 2,
}

impl NodeKind {
    pub fn from_u8(value: u8) -> Result<Self, DatabaseError> {
        match value {
            1 => Ok(NodeKind::Internal),
            2 => Ok(NodeKind::Leaf),
            _ => Err(DatabaseError::InvalidNodeKind(value)),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            NodeKind::Internal => 1,
            NodeKind::Leaf => 2,
        }
    }
}

/*
 * Page Layout on Disk (single leaf node)
 * ┌─────────────────────────────────────────────────────────────────┐
 * │  node_kind(1) | is_root(1) | cell_count(4, little-endian)       │
 * ├─────────────────────────────────────────────────────────────────┤
 * │  [cell 0: ROW_SIZE] [cell 1: ROW_SIZE] ... [cell N-1]           │
 * ├─────────────────────────────────────────────────────────────────┤
 * │  unused tail                                                    │
 * └─────────────────────────────────────────────────────────────────┘
 */

/// A page-sized byte buffer with typed accessors for the node header and
/// cell array. The bytes are exactly what goes to disk.
#[derive(Clone)]
pub struct Page {
    data: Box<[u8; PAGE_SIZE]>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            data: Box::new([0; PAGE_SIZE]),
        }
    }

    pub fn as_bytes(&self) -> &[u8; PAGE_SIZE] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; PAGE_SIZE] {
        &mut self.data
    }

    pub fn node_kind(&self) -> Result<NodeKind, DatabaseError> {
        NodeKind::from_u8(self.data[NODE_KIND_OFFSET])
    }

    pub fn set_node_kind(&mut self, kind: NodeKind) {
        self.data[NODE_KIND_OFFSET] = kind.as_u8();
    }

    pub fn is_root(&self) -> bool {
        self.data[IS_ROOT_OFFSET] != 0
    }

    pub fn set_is_root(&mut self, is_root: bool) {
        self.data[IS_ROOT_OFFSET] = u8::from(is_root);
    }

    pub fn cell_count(&self) -> u32 {
        let mut bytes = [0u8; CELL_COUNT_SIZE];
        bytes.copy_from_slice(&self.data[CELL_COUNT_OFFSET..CELL_COUNT_OFFSET + CELL_COUNT_SIZE]);
        u32::from_le_bytes(bytes)
    }

    pub fn set_cell_count(&mut self, cell_count: u32) {
        self.data[CELL_COUNT_OFFSET..CELL_COUNT_OFFSET + CELL_COUNT_SIZE]
            .copy_from_slice(&cell_count.to_le_bytes());
    }

    /// Byte offset of cell `cell_num` from the start of the page.
    pub fn cell_slot(cell_num: usize) -> usize {
        LEAF_NODE_HEADER_SIZE + cell_num * ROW_SIZE
    }

    pub fn cell(&self, cell_num: usize) -> Result<&[u8], DatabaseError> {
        let start = Self::checked_cell_slot(cell_num)?;
        Ok(&self.data[start..start + ROW_SIZE])
    }

    pub fn cell_mut(&mut self, cell_num: usize) -> Result<&mut [u8], DatabaseError> {
        let start = Self::checked_cell_slot(cell_num)?;
        Ok(&mut self.data[start..start + ROW_SIZE])
    }

    fn checked_cell_slot(cell_num: usize) -> Result<usize, DatabaseError> {
        if cell_num >= LEAF_NODE_MAX_CELLS {
            return Err(DatabaseError::InvalidCellIndex {
                index: cell_num,
                max: LEAF_NODE_MAX_CELLS,
            });
        }
        Ok(Self::cell_slot(cell_num))
    }

    pub fn initialize_leaf(&mut self) {
        self.set_node_kind(NodeKind::Leaf);
        self.set_is_root(false);
        self.set_cell_count(0);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("node_kind", &self.data[NODE_KIND_OFFSET])
            .field("is_root", &self.is_root())
            .field("cell_count", &self.cell_count())
            .finish()
    }
}
