use std::path::{Path, PathBuf};

use tempfile::{Builder, TempPath};

use crate::{engine::Engine, types::error::Result, types::row::Row};

/// A scratch database file removed when dropped.
pub struct TempDatabase {
    path: TempPath,
    pub engine: Option<Engine>,
}

impl TempDatabase {
    pub fn new() -> Self {
        Self::with_prefix("minidb_test")
    }

    pub fn with_prefix(prefix: &str) -> Self {
        let path = Builder::new()
            .prefix(prefix)
            .suffix(".db")
            .tempfile()
            .map(|file| file.into_temp_path())
            .unwrap_or_else(|err| panic!("failed to create temp database '{prefix}': {err}"));
        Self { path, engine: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_buf(&self) -> PathBuf {
        self.path.to_path_buf()
    }

    /// Opens (or reopens) the engine over this file.
    pub fn open_engine(&mut self) -> Result<&mut Engine> {
        if let Some(engine) = self.engine.take() {
            engine.close()?;
        }
        Ok(self.engine.insert(Engine::open(&self.path)?))
    }

    /// Closes the current engine, flushing its pages.
    pub fn close_engine(&mut self) -> Result<()> {
        match self.engine.take() {
            Some(engine) => engine.close(),
            None => Ok(()),
        }
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        self.engine = None;
    }
}

pub fn user_row(id: u32) -> Row {
    let username = format!("user{id}");
    let email = format!("user{id}@example.com");
    Row::new(id, &username, &email)
        .unwrap_or_else(|err| panic!("generated row {id} is invalid: {err}"))
}
