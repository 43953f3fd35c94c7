//! Loading text input for the engine
//!
//! The engine takes `&str` and never fails. Decoding and size limits are
//! enforced here, before any text reaches it.

use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin} is not valid UTF-8 (invalid byte at offset {offset})")]
    NotUtf8 { origin: String, offset: usize },
    #[error("{origin} is {size} bytes, over the {limit} byte limit")]
    TooLarge { origin: String, size: u64, limit: u64 },
}

/// Decode raw bytes into text
pub fn decode_text(bytes: Vec<u8>, origin: &str) -> Result<String, InputError> {
    String::from_utf8(bytes).map_err(|e| InputError::NotUtf8 {
        origin: origin.to_string(),
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Read a file as UTF-8 text, refusing files over `limit` bytes
pub fn read_text_file(path: &Path, limit: Option<u64>) -> Result<String, InputError> {
    let origin = path.display().to_string();
    let io_err = |source: std::io::Error| InputError::Io {
        origin: origin.clone(),
        source,
    };

    // Metadata length is only a hint: pipes and devices report 0
    let size = fs::metadata(path).map_err(io_err)?.len();
    check_limit(&origin, size, limit)?;

    let file = fs::File::open(path).map_err(io_err)?;
    read_text(file, &origin, limit)
}

/// Read text from any reader (stdin, pipes), refusing more than `limit` bytes
pub fn read_text<R: Read>(reader: R, origin: &str, limit: Option<u64>) -> Result<String, InputError> {
    let mut bytes = Vec::new();
    let result = match limit {
        // One extra byte tells an exact fit apart from an overflow
        Some(limit) => reader.take(limit.saturating_add(1)).read_to_end(&mut bytes),
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut bytes)
        }
    };
    result.map_err(|source| InputError::Io {
        origin: origin.to_string(),
        source,
    })?;

    check_limit(origin, bytes.len() as u64, limit)?;
    decode_text(bytes, origin)
}

fn check_limit(origin: &str, size: u64, limit: Option<u64>) -> Result<(), InputError> {
    match limit {
        Some(limit) if size > limit => Err(InputError::TooLarge {
            origin: origin.to_string(),
            size,
            limit,
        }),
        _ => Ok(()),
    }
}
