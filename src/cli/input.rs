//! Input opening for record files

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::CigarcoError;

/// Open a record file for line-oriented reading.
///
/// `-` reads standard input. Paths ending in `.gz` are decompressed on the fly.
///
/// # Errors
///
/// [`CigarcoError::Io`] if the file cannot be opened.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, CigarcoError> {
    let path = path.as_ref();

    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path).map_err(|e| CigarcoError::Io {
        msg: format!("Failed to open {}: {}", path.display(), e),
    })?;

    let reader: Box<dyn BufRead> = if path.extension().is_some_and(|e| e == "gz") {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}
