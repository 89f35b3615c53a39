use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

/// Number of decimal places activity scores are reported with.
pub const ACTIVITY_SCORE_PRECISION: i32 = 4;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Round an activity score to [ACTIVITY_SCORE_PRECISION] decimal places.
///
/// Callers apply this once to a finished sum, never to the individual terms.
///
pub fn round_activity(score: f64) -> f64 {
    let factor = 10f64.powi(ACTIVITY_SCORE_PRECISION);
    (score * factor).round() / factor
}
