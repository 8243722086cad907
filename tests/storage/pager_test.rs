use std::fs;

use minidb::{
    storage::pager::Pager,
    types::{PAGE_SIZE, TABLE_MAX_PAGES, error::DatabaseError},
    utils::mock::TempDatabase,
};

#[test]
fn test_open_creates_missing_file() -> Result<(), DatabaseError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fresh.db");
    assert!(!path.exists());

    let pager = Pager::open(&path)?;
    assert!(path.exists());
    assert_eq!(pager.num_pages(), 0);
    Ok(())
}

#[test]
fn test_partial_page_is_corrupt() {
    let temp_db = TempDatabase::with_prefix("pager_corrupt");
    fs::write(temp_db.path(), vec![0u8; PAGE_SIZE + 17]).unwrap();

    match Pager::open(temp_db.path()) {
        Err(DatabaseError::CorruptFile { file_length }) => {
            assert_eq!(file_length, (PAGE_SIZE + 17) as u64);
        }
        Err(other) => panic!("Expected CorruptFile, got {other}"),
        Ok(_) => panic!("Expected CorruptFile, got an open pager"),
    }
}

#[test]
fn test_page_out_of_bounds() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_bounds");
    let mut pager = Pager::open(temp_db.path())?;

    assert!(pager.get_page(TABLE_MAX_PAGES as u32 - 1).is_ok());
    match pager.get_page(TABLE_MAX_PAGES as u32) {
        Err(DatabaseError::PageOutOfBounds { page_num, max }) => {
            assert_eq!(page_num, TABLE_MAX_PAGES as u32);
            assert_eq!(max, TABLE_MAX_PAGES);
        }
        _ => panic!("Expected PageOutOfBounds error"),
    }
    Ok(())
}

#[test]
fn test_get_page_returns_cached_buffer() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_cache");
    let mut pager = Pager::open(temp_db.path())?;

    pager.get_page(0)?.as_bytes_mut()[100] = 42;
    assert!(pager.is_cached(0));
    assert_eq!(pager.get_page(0)?.as_bytes()[100], 42);
    Ok(())
}

#[test]
fn test_nothing_written_before_flush() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_lazy");
    let mut pager = Pager::open(temp_db.path())?;

    pager.get_page(0)?.as_bytes_mut()[0] = 7;
    assert_eq!(pager.num_pages(), 1);
    assert_eq!(fs::metadata(temp_db.path())?.len(), 0);

    pager.flush()?;
    assert_eq!(fs::metadata(temp_db.path())?.len(), PAGE_SIZE as u64);
    Ok(())
}

#[test]
fn test_pages_persist_across_reopen() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_persist");
    {
        let mut pager = Pager::open(temp_db.path())?;
        pager.get_page(0)?.as_bytes_mut()[..4].copy_from_slice(b"page");
        pager.get_page(1)?.as_bytes_mut()[PAGE_SIZE - 1] = 0xEE;
        pager.close()?;
    }

    let mut pager = Pager::open(temp_db.path())?;
    assert_eq!(pager.num_pages(), 2);
    assert_eq!(pager.file_length(), 2 * PAGE_SIZE as u64);
    assert_eq!(&pager.get_page(0)?.as_bytes()[..4], b"page");
    assert_eq!(pager.get_page(1)?.as_bytes()[PAGE_SIZE - 1], 0xEE);
    Ok(())
}

#[test]
fn test_drop_flushes_touched_pages() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_drop");
    {
        let mut pager = Pager::open(temp_db.path())?;
        pager.get_page(0)?.as_bytes_mut()[10] = 0x5A;
    }

    let bytes = fs::read(temp_db.path())?;
    assert_eq!(bytes.len(), PAGE_SIZE);
    assert_eq!(bytes[10], 0x5A);
    Ok(())
}

#[test]
fn test_untouched_pages_are_left_alone() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_untouched");
    let mut original = vec![0u8; 2 * PAGE_SIZE];
    original[PAGE_SIZE] = 0x11;
    fs::write(temp_db.path(), &original)?;

    {
        let mut pager = Pager::open(temp_db.path())?;
        pager.get_page(0)?.as_bytes_mut()[0] = 0x22;
        pager.close()?;
    }

    let bytes = fs::read(temp_db.path())?;
    assert_eq!(bytes.len(), 2 * PAGE_SIZE);
    assert_eq!(bytes[0], 0x22);
    assert_eq!(bytes[PAGE_SIZE], 0x11);
    Ok(())
}

#[test]
fn test_file_past_page_limit_is_rejected() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_too_large");
    let oversized = vec![0u8; (TABLE_MAX_PAGES + 1) * PAGE_SIZE];
    fs::write(temp_db.path(), &oversized)?;

    match Pager::open(temp_db.path()) {
        Err(DatabaseError::FileTooLarge { num_pages, max }) => {
            assert_eq!(num_pages, TABLE_MAX_PAGES as u64 + 1);
            assert_eq!(max, TABLE_MAX_PAGES);
        }
        Err(other) => panic!("Expected FileTooLarge, got {other}"),
        Ok(_) => panic!("Expected FileTooLarge, got an open pager"),
    }

    // A rejected file is left as it was
    assert_eq!(fs::read(temp_db.path())?, oversized);
    Ok(())
}

#[test]
fn test_file_at_page_limit_round_trips() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_at_limit");
    let mut contents = vec![0u8; TABLE_MAX_PAGES * PAGE_SIZE];
    for page_num in 0..TABLE_MAX_PAGES {
        contents[page_num * PAGE_SIZE] = page_num as u8;
    }
    fs::write(temp_db.path(), &contents)?;

    {
        let mut pager = Pager::open(temp_db.path())?;
        assert_eq!(pager.num_pages(), TABLE_MAX_PAGES as u32);
        pager.get_page(0)?.as_bytes_mut()[1] = 0xAB;
        let last = TABLE_MAX_PAGES as u32 - 1;
        pager.get_page(last)?.as_bytes_mut()[1] = 0xCD;
        pager.flush()?;
        pager.close()?;
    }

    let mut pager = Pager::open(temp_db.path())?;
    assert_eq!(pager.num_pages(), TABLE_MAX_PAGES as u32);
    for page_num in 0..TABLE_MAX_PAGES as u32 {
        assert_eq!(pager.get_page(page_num)?.as_bytes()[0], page_num as u8);
    }
    assert_eq!(pager.get_page(0)?.as_bytes()[1], 0xAB);
    assert_eq!(pager.get_page(TABLE_MAX_PAGES as u32 - 1)?.as_bytes()[1], 0xCD);
    assert_eq!(fs::metadata(temp_db.path())?.len(), (TABLE_MAX_PAGES * PAGE_SIZE) as u64);
    Ok(())
}

#[test]
fn test_cached_page_is_read_only_view() -> Result<(), DatabaseError> {
    let temp_db = TempDatabase::with_prefix("pager_cached_view");
    let mut pager = Pager::open(temp_db.path())?;

    assert!(pager.cached_page(0).is_none());
    assert!(pager.cached_page(TABLE_MAX_PAGES as u32).is_none());

    pager.get_page(0)?.as_bytes_mut()[3] = 9;
    let page = pager.cached_page(0).expect("page 0 should be resident");
    assert_eq!(page.as_bytes()[3], 9);
    Ok(())
}
