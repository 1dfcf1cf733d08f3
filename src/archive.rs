use std::io::{Cursor, Write as _};

use tracing::debug;
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

pub const CONTENT_TYPE: &str = "application/zip";
pub const EXTENSION: &str = "zip";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to add {name} to archive: {error}")]
    Entry {
        name: String,
        error: zip::result::ZipError,
    },
    #[error("failed to write {name} to archive: {error}")]
    Write { name: String, error: std::io::Error },
    #[error("failed to finalize archive: {0}")]
    Finish(zip::result::ZipError),
}

/// Pack named blobs into one zip, in the given order.
///
/// Entry timestamps are fixed so identical input yields identical bytes.
pub fn pack<'a, I>(entries: I) -> Result<Vec<u8>, Error>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());
    let mut count = 0usize;
    for (name, bytes) in entries {
        zip.start_file(name, opts).map_err(|error| Error::Entry {
            name: name.to_owned(),
            error,
        })?;
        zip.write_all(bytes).map_err(|error| Error::Write {
            name: name.to_owned(),
            error,
        })?;
        count += 1;
    }
    let cursor = zip.finish().map_err(Error::Finish)?;
    let bytes = cursor.into_inner();
    debug!(entries = count, bytes = bytes.len(), "packed archive");
    Ok(bytes)
}
