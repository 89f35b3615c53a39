//! Single-pass VCF reader.
//!
//! Reads a VCF (plain text or gzipped) line by line and emits one
//! [ParsedVariantRecord] per usable data line, in file order. Only input
//! access and the size limit can fail a parse; malformed data lines are
//! skipped and counted.

use std::io::{BufRead, Read};
use std::path::Path;

use log::{debug, info, warn};

use pgxr_core::models::ParsedVariantRecord;
use pgxr_core::utils::get_dynamic_reader;

use crate::error::{Result, VcfError};
use crate::genotype::{Genotype, extract_gt};
use crate::info::{parse_info, qc_metrics};

pub const META_PREFIX: &str = "##";
pub const HEADER_PREFIX: &str = "#CHROM";
pub const FORMAT_COLUMN: &str = "FORMAT";
pub const FILEFORMAT_PREFIX: &str = "##fileformat=VCF";

/// Data lines need at least CHROM..FORMAT.
pub const MIN_DATA_COLUMNS: usize = 9;

/// Sample column assumed when the header (or its FORMAT column) is missing.
pub const DEFAULT_FALLBACK_SAMPLE_COLUMN: usize = 9;

/// Largest input accepted by default: 5 MiB of uncompressed text.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;

/// Only this much of the first line is inspected by [validate_vcf_header].
const HEADER_PROBE_BYTES: u64 = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Column index holding the sample genotype when no usable header is seen.
    pub fallback_sample_column: usize,
    /// Upper bound on the bytes read, counted after decompression.
    pub max_input_bytes: u64,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            fallback_sample_column: DEFAULT_FALLBACK_SAMPLE_COLUMN,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Counters describing one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub records_parsed: usize,
    pub skipped_lines: usize,
    /// True when the sample column came from the fallback index rather than
    /// from a `#CHROM` header with a FORMAT column.
    pub header_fallback: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedVcf {
    pub records: Vec<ParsedVariantRecord>,
    pub summary: ParseSummary,
}

///
/// Parse a VCF file with default options.
///
pub fn parse_vcf(path: &Path) -> Result<ParsedVcf> {
    parse_vcf_with_options(path, &ParserOptions::default())
}

///
/// Parse a VCF file. A missing or unreadable file is an error; nothing else is.
///
pub fn parse_vcf_with_options(path: &Path, options: &ParserOptions) -> Result<ParsedVcf> {
    if !path.is_file() {
        return Err(VcfError::NotFound(path.to_path_buf()));
    }

    let reader =
        get_dynamic_reader(path).map_err(|e| VcfError::Unreadable(format!("{:#}", e)))?;
    let parsed = parse_vcf_reader(reader, options)?;

    info!(
        "Parsed {} variant records from {:?} ({} lines skipped)",
        parsed.summary.records_parsed, path, parsed.summary.skipped_lines
    );

    Ok(parsed)
}

///
/// Parse VCF text held in memory.
///
pub fn parse_vcf_str(text: &str, options: &ParserOptions) -> Result<ParsedVcf> {
    parse_vcf_reader(text.as_bytes(), options)
}

///
/// Parse VCF lines from any buffered reader.
///
/// At most `options.max_input_bytes` are read; going past that fails the
/// parse with [VcfError::InputTooLarge]. Bytes that are not valid UTF-8 are
/// replaced with U+FFFD rather than rejected.
///
pub fn parse_vcf_reader<R: BufRead>(reader: R, options: &ParserOptions) -> Result<ParsedVcf> {
    let limit = options.max_input_bytes;
    let mut reader = reader.take(limit.saturating_add(1));

    let mut parsed = ParsedVcf::default();
    let mut sample_column: Option<usize> = None;
    let mut line_buf: Vec<u8> = Vec::new();
    let mut bytes_read = 0u64;
    let mut line_number = 0usize;

    loop {
        line_buf.clear();
        let n = reader.read_until(b'\n', &mut line_buf)?;
        if n == 0 {
            break;
        }
        bytes_read += n as u64;
        if bytes_read > limit {
            return Err(VcfError::InputTooLarge {
                size: bytes_read,
                limit,
            });
        }
        line_number += 1;

        let decoded = String::from_utf8_lossy(&line_buf);
        let line = decoded.trim_end_matches('\n').trim_end_matches('\r');
        if line.is_empty() || line.starts_with(META_PREFIX) {
            continue;
        }

        if line.starts_with(HEADER_PREFIX) {
            sample_column = Some(match locate_sample_column(line) {
                Some(col) => col,
                None => {
                    warn!(
                        "Header has no {} column; assuming sample column {}",
                        FORMAT_COLUMN, options.fallback_sample_column
                    );
                    parsed.summary.header_fallback = true;
                    options.fallback_sample_column
                }
            });
            continue;
        }

        if line.starts_with('#') {
            debug!("Skipping unrecognized header line {}", line_number);
            parsed.summary.skipped_lines += 1;
            continue;
        }

        let column = match sample_column {
            Some(col) => col,
            None => {
                if !parsed.summary.header_fallback {
                    warn!(
                        "No {} header before data; assuming sample column {}",
                        HEADER_PREFIX, options.fallback_sample_column
                    );
                    parsed.summary.header_fallback = true;
                }
                options.fallback_sample_column
            }
        };

        match parse_data_line(line, column) {
            Some(record) => parsed.records.push(record),
            None => {
                debug!("Skipping malformed data line {}", line_number);
                parsed.summary.skipped_lines += 1;
            }
        }
    }

    parsed.summary.records_parsed = parsed.records.len();
    Ok(parsed)
}

///
/// Index of the column right after FORMAT in a `#CHROM` header line.
///
pub fn locate_sample_column(header: &str) -> Option<usize> {
    header
        .trim_start_matches('#')
        .split('\t')
        .position(|col| col == FORMAT_COLUMN)
        .map(|idx| idx + 1)
}

///
/// Parse one tab-separated data line. Returns `None` when the line has too
/// few columns, a non-integer POS, or a genotype that is not made of allele
/// indices.
///
pub fn parse_data_line(line: &str, sample_column: usize) -> Option<ParsedVariantRecord> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < MIN_DATA_COLUMNS {
        return None;
    }

    let pos = cols[1].parse::<u64>().ok()?;
    let alt = primary_alt(cols[4]);

    let sample = cols.get(sample_column).copied().unwrap_or(".");
    let gt_raw = extract_gt(cols[8], sample);
    let genotype = Genotype::parse(gt_raw)?;

    let info = parse_info(cols[7]);

    Some(ParsedVariantRecord {
        chrom: cols[0].to_string(),
        pos,
        id: cols[2].to_string(),
        ref_allele: cols[3].to_string(),
        alt_allele: alt.to_string(),
        gt_raw: gt_raw.to_string(),
        phased: genotype.phased,
        allele1: genotype.allele1,
        allele2: genotype.allele2,
        zygosity: genotype.zygosity(),
        qc: qc_metrics(&info),
    })
}

///
/// First allele of a possibly comma-separated ALT column.
///
/// Multi-allelic sites keep only their first listed ALT; calls on the later
/// alleles are dropped along with them.
///
fn primary_alt(alt_field: &str) -> &str {
    alt_field.split(',').next().unwrap_or(alt_field)
}

///
/// Quick check that the first line declares a VCF file format. Any read
/// failure counts as invalid.
///
pub fn validate_vcf_header(path: &Path) -> bool {
    let Ok(reader) = get_dynamic_reader(path) else {
        return false;
    };
    let mut first_line: Vec<u8> = Vec::new();
    match reader.take(HEADER_PROBE_BYTES).read_until(b'\n', &mut first_line) {
        Ok(_) => String::from_utf8_lossy(&first_line)
            .trim()
            .starts_with(FILEFORMAT_PREFIX),
        Err(_) => false,
    }
}
