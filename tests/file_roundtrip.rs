//! Load→save round-trip behavior of the file collaborators.

use std::path::PathBuf;

use tempfile::tempdir;

use vted::document::Document;
use vted::file::{read_lines, write_lines};

fn write_fixture(contents: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixture.txt");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_load_then_save_is_byte_identical() {
    let (_dir, path) = write_fixture(b"alpha\nbeta\n\ngamma\n");

    let document = Document::from_lines(read_lines(&path).unwrap());
    let out = path.with_extension("out");
    let written = write_lines(&out, &document).unwrap();

    assert_eq!(written, 4);
    assert_eq!(std::fs::read(&out).unwrap(), b"alpha\nbeta\n\ngamma\n");
}

#[test]
fn test_crlf_input_normalizes_to_lf() {
    let (_dir, path) = write_fixture(b"alpha\r\nbeta\r\n");

    let document = Document::from_lines(read_lines(&path).unwrap());
    let out = path.with_extension("out");
    write_lines(&out, &document).unwrap();

    assert_eq!(std::fs::read(&out).unwrap(), b"alpha\nbeta\n");
}

#[test]
fn test_missing_trailing_newline_gains_one() {
    let (_dir, path) = write_fixture(b"alpha\nbeta");

    let document = Document::from_lines(read_lines(&path).unwrap());
    let out = path.with_extension("out");
    write_lines(&out, &document).unwrap();

    assert_eq!(std::fs::read(&out).unwrap(), b"alpha\nbeta\n");
}

#[test]
fn test_empty_file_round_trips_empty() {
    let (_dir, path) = write_fixture(b"");

    let document = Document::from_lines(read_lines(&path).unwrap());
    assert_eq!(document.line_count(), 0);

    let out = path.with_extension("out");
    let written = write_lines(&out, &document).unwrap();
    assert_eq!(written, 0);
    assert_eq!(std::fs::read(&out).unwrap(), b"");
}

#[test]
fn test_non_utf8_bytes_survive_round_trip() {
    let (_dir, path) = write_fixture(b"caf\xe9\nnext\n");

    let document = Document::from_lines(read_lines(&path).unwrap());
    let out = path.with_extension("out");
    write_lines(&out, &document).unwrap();

    assert_eq!(std::fs::read(&out).unwrap(), b"caf\xe9\nnext\n");
}
