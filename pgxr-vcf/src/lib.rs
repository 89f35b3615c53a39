//! # VCF reader for pharmacogenomic calling
//!
//! Turns a single-sample VCF into an ordered list of
//! [ParsedVariantRecord](pgxr_core::models::ParsedVariantRecord)s:
//!
//! - `##` meta lines are skipped
//! - the `#CHROM` header locates the sample column (the one after FORMAT),
//!   with a fixed fallback index when it is absent
//! - the GT value is found through the FORMAT field order; `|` marks a phased
//!   call and `.` a missing allele
//! - only the first ALT of a multi-allelic site is kept
//! - KM, KFP, KFF and MTD are lifted out of INFO as QC metrics
//!
//! Malformed data lines are skipped and counted, never fatal.
pub mod error;
pub mod genotype;
pub mod info;
pub mod parser;

// re-exports
pub use error::*;
pub use parser::{
    ParseSummary, ParsedVcf, ParserOptions, parse_vcf, parse_vcf_reader, parse_vcf_str,
    parse_vcf_with_options, validate_vcf_header,
};
