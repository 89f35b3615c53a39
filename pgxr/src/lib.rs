//! # pgxr
//!
//! Deterministic pharmacogenomic interpretation of a single-sample VCF:
//! variant calls are annotated against curated star-allele tables, resolved
//! into per-gene diplotypes and activity scores, scored into CPIC phenotypes,
//! and finally mapped to drug-specific risk.
//!
//! ```rust,ignore
//! use pgxr::{PipelineConfig, run_pipeline};
//!
//! let config = PipelineConfig::default();
//! let tables = config.reference_tables()?;
//! let output = run_pipeline(path, "codeine,warfarin", &tables, None, &config)?;
//! ```
//!
//! The stage crates are re-exported under their capability names.
pub mod config;
pub mod pipeline;
pub mod report;

#[doc(inline)]
pub use pgxr_core as core;

#[doc(inline)]
pub use pgxr_vcf as vcf;

#[doc(inline)]
pub use pgxr_annotate as annotate;

#[doc(inline)]
pub use pgxr_diplotype as diplotype;

#[doc(inline)]
pub use pgxr_phenotype as phenotype;

#[doc(inline)]
pub use pgxr_risk as risk;

pub use config::{ConfigError, PipelineConfig};
pub use pipeline::{
    DrugSelection, Interpretation, PipelineError, PipelineOutput, check_input, interpret_parsed,
    interpret_vcf, parse_drug_list, run_pipeline,
};
pub use report::{DetectedVariant, DrugReport, PharmacogenomicProfile, QualityMetrics};
