//! # Diplotype resolution
//!
//! Aggregates annotated calls per gene and per chromosomal copy, resolves each
//! copy to a single star allele and reports the diplotype with its total
//! activity score. Calls without a curated definition can be handed to an
//! external [VariantFunctionClassifier]; see [collect_classifications].
pub mod classify;
pub mod models;
pub mod resolver;

// re-exports
pub use classify::{
    ClassificationEntry, ClassifierError, CollectOptions, StaticClassifier,
    VariantFunctionClassifier, collect_classifications, flagged_keys,
};
pub use models::{
    ClassificationMap, DiplotypeResult, ExternalClassification, HaplotypeCall, Provenance,
    ResolvedVariant,
};
pub use resolver::{resolve_diplotypes, resolve_gene, resolve_variant};
