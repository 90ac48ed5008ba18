//! Integration tests for the input buffer
//!
//! Tests editing operations, content swapping for history navigation, and
//! file loading/saving.

use console::buffer::{Buffer, CursorMovement};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_buffer_creation() {
    let buffer = Buffer::new();

    assert_eq!(buffer.content.len(), 1);
    assert_eq!(buffer.content[0], "");
    assert_eq!(buffer.name, "scratch");
    assert!(buffer.path.is_none());
    assert!(!buffer.modified);
    assert_eq!(buffer.cursor_pos, (0, 0));
}

#[test]
fn test_insert_char() {
    let mut buffer = Buffer::new();

    for ch in "hello".chars() {
        buffer.insert_char(ch);
    }

    assert_eq!(buffer.content[0], "hello");
    assert_eq!(buffer.cursor_pos, (0, 5));
    assert!(buffer.modified);
}

#[test]
fn test_insert_newline_splits_line() {
    let mut buffer = Buffer::new();
    for ch in "hello world".chars() {
        buffer.insert_char(ch);
    }

    buffer.cursor_pos = (0, 5);
    buffer.insert_newline();

    assert_eq!(buffer.content.len(), 2);
    assert_eq!(buffer.content[0], "hello");
    assert_eq!(buffer.content[1], " world");
    assert_eq!(buffer.cursor_pos, (1, 0));
}

#[test]
fn test_backspace_joins_lines() {
    let mut buffer = Buffer::new();
    for ch in "ab".chars() {
        buffer.insert_char(ch);
    }
    buffer.insert_newline();
    for ch in "cd".chars() {
        buffer.insert_char(ch);
    }

    // Backspace at line start joins with the previous line
    buffer.cursor_pos = (1, 0);
    buffer.backspace();

    assert_eq!(buffer.content.len(), 1);
    assert_eq!(buffer.content[0], "abcd");
    assert_eq!(buffer.cursor_pos, (0, 2));
}

#[test]
fn test_delete_at_line_end_joins_next_line() {
    let mut buffer = Buffer::new();
    for ch in "ab".chars() {
        buffer.insert_char(ch);
    }
    buffer.insert_newline();
    buffer.insert_char('c');

    buffer.cursor_pos = (0, 2);
    buffer.delete();

    assert_eq!(buffer.content.len(), 1);
    assert_eq!(buffer.content[0], "abc");
}

#[test]
fn test_content_as_string() {
    let mut buffer = Buffer::new();
    for ch in "one".chars() {
        buffer.insert_char(ch);
    }
    buffer.insert_newline();
    for ch in "two".chars() {
        buffer.insert_char(ch);
    }

    assert_eq!(buffer.content_as_string(), "one\ntwo");
}

#[test]
fn test_set_content_replaces_draft() {
    let mut buffer = Buffer::new();
    for ch in "old draft".chars() {
        buffer.insert_char(ch);
    }

    buffer.set_content("recalled\ncommand");

    assert_eq!(buffer.content, vec!["recalled", "command"]);
    // Cursor parks at the end of the new content
    assert_eq!(buffer.cursor_pos, (1, 7));
}

#[test]
fn test_clear_resets_buffer() {
    let mut buffer = Buffer::new();
    for ch in "something".chars() {
        buffer.insert_char(ch);
    }
    buffer.insert_newline();

    buffer.clear();

    assert_eq!(buffer.content, vec![""]);
    assert_eq!(buffer.cursor_pos, (0, 0));
    assert!(!buffer.modified);
}

#[test]
fn test_cursor_movement() {
    let mut buffer = Buffer::new();
    for ch in "hello".chars() {
        buffer.insert_char(ch);
    }
    buffer.insert_newline();
    for ch in "hi".chars() {
        buffer.insert_char(ch);
    }

    buffer.move_cursor(CursorMovement::BufferStart);
    assert_eq!(buffer.cursor_pos, (0, 0));

    buffer.move_cursor(CursorMovement::LineEnd);
    assert_eq!(buffer.cursor_pos, (0, 5));

    // Moving down clamps the column to the shorter line
    buffer.move_cursor(CursorMovement::Down);
    assert_eq!(buffer.cursor_pos, (1, 2));

    buffer.move_cursor(CursorMovement::BufferEnd);
    assert_eq!(buffer.cursor_pos, (1, 2));

    // Left at line start wraps to the end of the previous line
    buffer.move_cursor(CursorMovement::LineStart);
    buffer.move_cursor(CursorMovement::Left);
    assert_eq!(buffer.cursor_pos, (0, 5));
}

#[tokio::test]
async fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("script.lua");
    fs::write(&file_path, "print(1)\nprint(2)").unwrap();

    let buffer = Buffer::from_path_async(file_path.clone()).await.unwrap();

    assert_eq!(buffer.content, vec!["print(1)", "print(2)"]);
    assert_eq!(buffer.name, "script.lua");
    assert_eq!(buffer.path, Some(file_path));
    assert!(!buffer.modified);
}

#[tokio::test]
async fn test_save_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("draft.txt");

    let mut buffer = Buffer::new();
    for ch in "saved text".chars() {
        buffer.insert_char(ch);
    }
    buffer.save_to_path_async(file_path.clone()).await.unwrap();

    assert!(!buffer.modified);
    assert_eq!(buffer.name, "draft.txt");
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "saved text");
}

#[tokio::test]
async fn test_save_without_path_fails() {
    let mut buffer = Buffer::new();
    buffer.insert_char('x');

    assert!(buffer.save_async().await.is_err());
}

#[test]
fn test_line_number_width() {
    let mut buffer = Buffer::new();
    // Reserves two digits even for tiny buffers
    assert_eq!(buffer.line_number_width(), 3);

    for _ in 0..120 {
        buffer.insert_newline();
    }
    assert_eq!(buffer.line_number_width(), 4);

    assert_eq!(Buffer::count_digits(0), 1);
    assert_eq!(Buffer::count_digits(99), 2);
    assert_eq!(Buffer::count_digits(100), 3);
}
