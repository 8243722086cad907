use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{
    planner::error::PrepareError,
    types::{
        COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE,
        ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
    },
};

/// A row of the fixed `(id, username, email)` schema.
///
/// Text columns live in zero-padded buffers one byte wider than their
/// capacity, so the last byte is always a NUL sentinel and every row
/// serializes to exactly [`ROW_SIZE`] bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    username: [u8; USERNAME_SIZE],
    email: [u8; EMAIL_SIZE],
}

impl Row {
    pub fn new(id: u32, username: &str, email: &str) -> Result<Self, PrepareError> {
        if username.len() > COLUMN_USERNAME_SIZE || email.len() > COLUMN_EMAIL_SIZE {
            return Err(PrepareError::StringTooLong);
        }

        let mut row = Self::empty();
        row.id = id;
        row.username[..username.len()].copy_from_slice(username.as_bytes());
        row.email[..email.len()].copy_from_slice(email.as_bytes());
        Ok(row)
    }

    pub fn empty() -> Self {
        Self {
            id: 0,
            username: [0; USERNAME_SIZE],
            email: [0; EMAIL_SIZE],
        }
    }

    pub fn username(&self) -> &str {
        text_until_sentinel(&self.username)
    }

    pub fn email(&self) -> &str {
        text_until_sentinel(&self.email)
    }

    /// Writes the row into the first `ROW_SIZE` bytes of `destination`.
    ///
    /// Panics if `destination` is shorter than `ROW_SIZE`; the page layer
    /// only ever hands out full cells.
    pub fn serialize(&self, destination: &mut [u8]) {
        destination[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        destination[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]
            .copy_from_slice(&self.username);
        destination[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE].copy_from_slice(&self.email);
    }

    pub fn deserialize(source: &[u8]) -> Self {
        let mut row = Self::empty();
        let mut id_bytes = [0u8; ID_SIZE];
        id_bytes.copy_from_slice(&source[ID_OFFSET..ID_OFFSET + ID_SIZE]);
        row.id = u32::from_le_bytes(id_bytes);
        row.username
            .copy_from_slice(&source[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        row.email
            .copy_from_slice(&source[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);
        row
    }

    pub fn to_bytes(&self) -> [u8; ROW_SIZE] {
        let mut buffer = [0u8; ROW_SIZE];
        self.serialize(&mut buffer);
        buffer
    }
}

fn text_until_sentinel(buffer: &[u8]) -> &str {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    // Rows built through `Row::new` always hold valid UTF-8; bytes read from a
    // damaged page are cut back to the longest valid prefix.
    match std::str::from_utf8(&buffer[..end]) {
        Ok(text) => text,
        Err(err) => std::str::from_utf8(&buffer[..err.valid_up_to()]).unwrap_or_default(),
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username(), self.email())
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("username", &self.username())
            .field("email", &self.email())
            .finish()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Row", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("username", self.username())?;
        state.serialize_field("email", self.email())?;
        state.end()
    }
}
