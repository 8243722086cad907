use std::path::Path;

use tracing::info;

use crate::{
    storage::pager::Pager,
    types::{PageNum, error::Result, page::Page},
};

/// The single fixed-schema table stored in a database file.
///
/// Rows live in the root leaf page; the root is always page 0.
pub struct Table {
    pager: Pager,
    pub root_page_num: PageNum,
}

impl Table {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut pager = Pager::open(path)?;
        let root_page_num = 0;

        if pager.num_pages() == 0 {
            info!(path = %pager.path().display(), "initializing new database");
            let root = pager.get_page(root_page_num)?;
            root.initialize_leaf();
            root.set_is_root(true);
        }

        Ok(Self {
            pager,
            root_page_num,
        })
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn root_page(&mut self) -> Result<&mut Page> {
        self.pager.get_page(self.root_page_num)
    }

    pub fn close(self) -> Result<()> {
        self.pager.close()
    }
}
