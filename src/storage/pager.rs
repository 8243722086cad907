use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, error, info};

use crate::types::{
    PAGE_SIZE, PageNum, TABLE_MAX_PAGES,
    error::{DatabaseError, Result},
    page::Page,
};

/// Page cache over a single database file.
///
/// Pages are materialized on first access and stay resident until the pager
/// is closed. Nothing is written back before [`Pager::flush`].
pub struct Pager {
    path: PathBuf,
    file: File,
    file_length: u64,
    num_pages: u32,
    pages: Vec<Option<Page>>,
}

impl Pager {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(DatabaseError::CorruptFile { file_length });
        }
        let pages_on_disk = file_length / PAGE_SIZE as u64;
        let num_pages = u32::try_from(pages_on_disk)
            .ok()
            .filter(|&n| n as usize <= TABLE_MAX_PAGES)
            .ok_or(DatabaseError::FileTooLarge {
                num_pages: pages_on_disk,
                max: TABLE_MAX_PAGES,
            })?;
        info!(path = %path.display(), num_pages, "opened database file");

        let mut pages = Vec::with_capacity(TABLE_MAX_PAGES);
        pages.resize_with(TABLE_MAX_PAGES, || None);

        Ok(Self {
            path: path.to_path_buf(),
            file,
            file_length,
            num_pages,
            pages,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages in the durable extent, including pages touched this
    /// session that will be written on the next flush.
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    pub fn is_cached(&self, page_num: PageNum) -> bool {
        self.pages
            .get(page_num as usize)
            .is_some_and(|slot| slot.is_some())
    }

    /// Returns the page if it is already resident, without touching the file.
    pub fn cached_page(&self, page_num: PageNum) -> Option<&Page> {
        self.pages.get(page_num as usize)?.as_ref()
    }

    fn page_offset(page_num: PageNum) -> u64 {
        page_num as u64 * PAGE_SIZE as u64
    }

    pub fn get_page(&mut self, page_num: PageNum) -> Result<&mut Page> {
        let index = page_num as usize;
        if index >= TABLE_MAX_PAGES {
            return Err(DatabaseError::PageOutOfBounds {
                page_num,
                max: TABLE_MAX_PAGES,
            });
        }

        let page = match self.pages[index].take() {
            Some(page) => page,
            None => self.load_page(page_num)?,
        };

        // Touching a page past the extent makes it part of the next flush.
        if page_num >= self.num_pages {
            self.num_pages = page_num + 1;
        }

        Ok(self.pages[index].insert(page))
    }

    fn load_page(&mut self, page_num: PageNum) -> Result<Page> {
        let mut page = Page::new();
        let pages_on_disk = self.file_length / PAGE_SIZE as u64;
        if (page_num as u64) < pages_on_disk {
            self.file.seek(SeekFrom::Start(Self::page_offset(page_num)))?;
            self.file.read_exact(page.as_bytes_mut())?;
            debug!(page_num, "loaded page from disk");
        } else {
            debug!(page_num, "allocated new page");
        }
        Ok(page)
    }

    fn write_page(file: &mut File, page_num: PageNum, bytes: &[u8]) -> Result<()> {
        file.seek(SeekFrom::Start(Self::page_offset(page_num)))?;
        file.write_all(bytes)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        let zero_page = [0u8; PAGE_SIZE];
        let pages_on_disk = self.file_length / PAGE_SIZE as u64;
        let mut written = 0usize;

        for page_num in 0..self.num_pages {
            let index = page_num as usize;
            match &self.pages[index] {
                Some(page) => {
                    Self::write_page(&mut self.file, page_num, page.as_bytes())?;
                    written += 1;
                }
                // Untouched gap past the old end of file: keep the file dense.
                None if (page_num as u64) >= pages_on_disk => {
                    Self::write_page(&mut self.file, page_num, &zero_page)?;
                }
                None => {}
            }
        }

        self.file.flush()?;
        self.file_length = self.num_pages as u64 * PAGE_SIZE as u64;
        debug!(written, num_pages = self.num_pages, "flushed pages");
        Ok(())
    }

    /// Flushes every page and releases the cache, reporting any write error.
    pub fn close(mut self) -> Result<()> {
        self.flush()?;
        self.file.sync_all()?;
        self.pages.iter_mut().for_each(|slot| *slot = None);
        info!(path = %self.path.display(), num_pages = self.num_pages, "closed database file");
        Ok(())
    }
}

impl Drop for Pager {
    fn drop(&mut self) {
        if self.pages.iter().all(Option::is_none) {
            return;
        }
        if let Err(err) = self.flush() {
            error!(path = %self.path.display(), "failed to flush pages on drop: {err}");
        }
    }
}
