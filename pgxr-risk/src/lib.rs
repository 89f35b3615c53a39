//! # Gene-drug risk classification
//!
//! Maps `(gene, drug, phenotype)` to a CPIC risk label, severity, confidence
//! and recommendation. Pairs without a curated rule get a fixed conservative
//! fallback instead of an error.
pub mod classifier;
pub mod rules;

pub use classifier::{FALLBACK_CONFIDENCE, GUIDELINE_SOURCE, RiskResult, classify_risk};
pub use rules::{RiskRule, lookup_rule};
