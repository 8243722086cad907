use minidb::{
    planner::error::PrepareError,
    types::{
        COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_OFFSET, ROW_SIZE, USERNAME_OFFSET, row::Row,
    },
};

fn create_test_row() -> Row {
    Row::new(42, "alice", "alice@example.com").unwrap()
}

#[test]
fn test_row_size_constant() {
    assert_eq!(ROW_SIZE, 4 + 33 + 256);
    assert_eq!(ROW_SIZE, 293);
}

#[test]
fn test_serialize_deserialize_round_trip() {
    let row = create_test_row();
    let mut buffer = [0u8; ROW_SIZE];
    row.serialize(&mut buffer);

    let restored = Row::deserialize(&buffer);
    assert_eq!(restored, row);
    assert_eq!(restored.id, 42);
    assert_eq!(restored.username(), "alice");
    assert_eq!(restored.email(), "alice@example.com");
}

#[test]
fn test_serialized_field_layout() {
    let row = Row::new(0x01020304, "bob", "b@x.com").unwrap();
    let bytes = row.to_bytes();

    assert_eq!(&bytes[0..4], &0x01020304u32.to_le_bytes());
    assert_eq!(&bytes[USERNAME_OFFSET..USERNAME_OFFSET + 3], b"bob");
    assert!(bytes[USERNAME_OFFSET + 3..EMAIL_OFFSET].iter().all(|&b| b == 0));
    assert_eq!(&bytes[EMAIL_OFFSET..EMAIL_OFFSET + 7], b"b@x.com");
    assert!(bytes[EMAIL_OFFSET + 7..].iter().all(|&b| b == 0));
}

#[test]
fn test_max_length_fields_keep_sentinel() {
    let username = "u".repeat(COLUMN_USERNAME_SIZE);
    let email = "e".repeat(COLUMN_EMAIL_SIZE);
    let row = Row::new(u32::MAX, &username, &email).unwrap();
    let bytes = row.to_bytes();

    // Last byte of each text buffer is the sentinel
    assert_eq!(bytes[EMAIL_OFFSET - 1], 0);
    assert_eq!(bytes[ROW_SIZE - 1], 0);

    let restored = Row::deserialize(&bytes);
    assert_eq!(restored.username(), username);
    assert_eq!(restored.email(), email);
    assert_eq!(restored.id, u32::MAX);
}

#[test]
fn test_fields_too_long_are_rejected() {
    let username = "u".repeat(COLUMN_USERNAME_SIZE + 1);
    let email = "e".repeat(COLUMN_EMAIL_SIZE + 1);

    assert_eq!(
        Row::new(1, &username, "ok").unwrap_err(),
        PrepareError::StringTooLong
    );
    assert_eq!(
        Row::new(1, "ok", &email).unwrap_err(),
        PrepareError::StringTooLong
    );
}

#[test]
fn test_serialize_into_larger_buffer() {
    let row = create_test_row();
    let mut buffer = vec![0xFFu8; ROW_SIZE + 10];
    row.serialize(&mut buffer);

    assert_eq!(Row::deserialize(&buffer[..ROW_SIZE]), row);
    assert!(buffer[ROW_SIZE..].iter().all(|&b| b == 0xFF));
}

#[test]
fn test_empty_text_fields() {
    let row = Row::new(7, "", "").unwrap();
    let restored = Row::deserialize(&row.to_bytes());
    assert_eq!(restored.username(), "");
    assert_eq!(restored.email(), "");
    assert_eq!(restored.to_string(), "(7, , )");
}
