//! # Pharmacogenomic annotation
//!
//! Coordinate-exact matching of parsed calls against a curated star-allele
//! table, plus the genomic windows of the six tracked genes. Calls that miss
//! the table but land in a window are kept and flagged for an external
//! function classifier.
//!
//! ```rust,ignore
//! use pgxr_annotate::{ReferenceTables, annotate_variants};
//!
//! let tables = ReferenceTables::builtin();
//! let annotated = annotate_variants(&parsed.records, &tables);
//! ```
pub mod annotator;
pub mod tables;

// re-exports
pub use annotator::{
    AnnotatedVariant, AnnotationSummary, annotate_record, annotate_variants, filter_by_gene,
};
pub use tables::{
    AlleleDefinition, AlleleTableEntry, GENE_WINDOWS, GeneWindow, NOVEL_STAR, ReferenceTableError,
    ReferenceTableResult, ReferenceTables, default_allele,
};
