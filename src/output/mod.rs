pub mod json;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ProvenanceError, Result};
use crate::provenance::ProvenanceDocument;

/// Where the serialized document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    /// Created or truncated.
    File(PathBuf),
}

impl From<Option<PathBuf>> for Destination {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

/// Serialize the document and write it to the destination.
///
/// The whole document is rendered before the destination is touched, so a
/// serialization failure never leaves a truncated file behind.
pub fn emit(document: &ProvenanceDocument, destination: &Destination) -> Result<()> {
    match destination {
        Destination::Stdout => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_document(document, &mut lock)
        }
        Destination::File(path) => {
            let rendered = json::render(document)?;
            tracing::debug!(path = %path.display(), entries = document.len(), "writing provenance");
            write_file(path, rendered.as_bytes()).map_err(|source| ProvenanceError::Output {
                path: path.clone(),
                source,
            })
        }
    }
}

/// Standard output form: the document followed by one newline.
pub fn write_document<W: Write>(document: &ProvenanceDocument, writer: &mut W) -> Result<()> {
    let rendered = json::render(document)?;
    writer.write_all(rendered.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.flush()
}
