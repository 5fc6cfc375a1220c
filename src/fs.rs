use crate::Result;
use anyhow::Context;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Unable to create directory {}", path.display()))
}

pub(crate) fn canonicalize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    std::fs::canonicalize(path)
        .with_context(|| format!("Unable to canonicalize the path {}", path.display()))
}

/// Write a file, replacing whatever was there.
pub(crate) fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents).with_context(|| format!("Unable to write to {}", path.display()))
}

pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("Unable to read file {}", path.display()))
}

/// Like `read_to_string` but a missing file is `None` rather than an error.
pub(crate) fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Unable to read file {}", path.display())),
    }
}

#[test]
fn read_optional_missing_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let missing = tempdir.path().join("nope.json");
    assert!(read_optional(&missing).unwrap().is_none());
    assert!(read_to_string(&missing).is_err());
}

#[test]
fn write_then_read_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let nested = tempdir.path().join("a").join("b");
    create_dir_all(&nested).unwrap();
    let file = nested.join("x.txt");
    write(&file, "hello").unwrap();
    assert_eq!(read_optional(&file).unwrap().as_deref(), Some("hello"));
    write(&file, "bye").unwrap();
    assert_eq!(read_to_string(&file).unwrap(), "bye");
}
