use std::fmt::{self, Display};

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use pgxr_annotate::AnnotatedVariant;
use pgxr_core::models::{FunctionClass, Gene, VariantKey};

/// Where a haplotype verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Curated reference table.
    Reference,
    /// External variant-function classifier.
    External,
    /// Wild-type default, or the normal-function stand-in for a call the
    /// classifier had nothing to say about.
    Default,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Reference => "reference",
            Provenance::External => "external",
            Provenance::Default => "default",
        }
    }
}

impl Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Result handed back by the external classifier for one variant key.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalClassification {
    pub function_class: FunctionClass,
    pub confidence: f64,
}

/// Classifier results for the flagged variants of one request.
pub type ClassificationMap = FxHashMap<VariantKey, ExternalClassification>;

///
/// Resolved verdict for one chromosomal copy of one gene.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaplotypeCall {
    pub star: String,
    pub function_class: FunctionClass,
    pub activity: f64,
    pub rsids: Vec<String>,
    pub provenance: Provenance,
}

///
/// An annotated variant together with the functional verdict the resolver
/// settled on for it.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariant {
    pub annotated: AnnotatedVariant,
    pub call: HaplotypeCall,
    /// Set only when the verdict came from the external classifier.
    pub external_confidence: Option<f64>,
}

impl ResolvedVariant {
    pub fn is_externally_classified(&self) -> bool {
        self.call.provenance == Provenance::External
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiplotypeResult {
    pub gene: Gene,
    pub haplotype_0: HaplotypeCall,
    pub haplotype_1: HaplotypeCall,
    /// `{star0}/{star1}`
    pub diplotype: String,
    pub total_activity_score: f64,
    /// Contributing variants in input order.
    pub variants: Vec<ResolvedVariant>,
}

impl DiplotypeResult {
    /// rsIDs of every contributing variant, in input order.
    pub fn rsids(&self) -> Vec<&str> {
        self.variants
            .iter()
            .flat_map(|v| v.call.rsids.iter().map(String::as_str))
            .collect()
    }
}
