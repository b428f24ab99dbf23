//! File I/O for kara-rs documents
//!
//! ASS files in the wild are UTF-8 with a BOM ("utf-8-sig"); [`load`]
//! accepts files with or without one and [`save`] always writes one, which
//! is what editors and renderers expect.

use std::fs;
use std::path::Path;

use kara_core::document::reader;
use kara_core::{Document, Error, Result};
use tracing::info;

/// UTF-8 byte order mark, written at the start of every saved file
const BOM: &str = "\u{FEFF}";

/// Load and parse an ASS file
///
/// The document remembers the path it was loaded from, which the writer
/// uses as the default `Original Script` value.
///
/// # Errors
///
/// Fails when the file cannot be read or does not parse.
pub fn load(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|_| Error::FileNotFound {
        path: path.display().to_string(),
    })?;
    let mut doc = reader::parse(&source)?;
    doc.metadata.source_file = Some(path.display().to_string());
    info!(path = %path.display(), events = doc.events.len(), "loaded script");
    Ok(doc)
}

/// Serialize and save a document as a BOM-prefixed ASS file
///
/// # Errors
///
/// Fails when the path is not writable.
pub fn save(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = doc.to_ass_string();
    write_file(path, &text)?;
    info!(path = %path.display(), bytes = text.len(), "saved script");
    Ok(())
}

/// Write already-serialized script text with the leading BOM
///
/// # Errors
///
/// Fails when the path is not writable.
pub fn write_file(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format!("{BOM}{contents}")).map_err(|_| Error::FileNotFound {
        path: path.display().to_string(),
    })
}
