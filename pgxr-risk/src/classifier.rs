use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use pgxr_core::models::{Drug, Gene, Phenotype, RiskLabel, Severity, normalize_drug_name, title_case};

use crate::rules::lookup_rule;

pub const GUIDELINE_SOURCE: &str = "CPIC";
pub const FALLBACK_CONFIDENCE: f64 = 0.60;
pub const FALLBACK_LABEL: RiskLabel = RiskLabel::AdjustDosage;

///
/// Risk verdict for one (gene, drug) pair, with the inputs echoed back.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_label: RiskLabel,
    pub severity: Severity,
    pub confidence: f64,
    pub guideline_source: String,
    pub recommendation: String,
    pub gene: Gene,
    pub phenotype: Phenotype,
    pub diplotype: String,
    /// Drug name in title case.
    pub drug: String,
    /// Whether no curated rule matched and the fallback was applied.
    pub fallback: bool,
}

///
/// Classify the risk of prescribing `drug` given the phenotype of `gene`.
///
/// The drug name is normalized to its canonical uppercase form before lookup.
/// An unknown drug, a gene that is not the drug's primary gene, or a phenotype
/// without a curated rule all give the same conservative fallback: Adjust
/// Dosage at confidence 0.60 with a recommendation naming the unmatched
/// triple. This never fails.
///
pub fn classify_risk(gene: Gene, drug: &str, phenotype: Phenotype, diplotype: &str) -> RiskResult {
    let drug_key = normalize_drug_name(drug);

    let rule = Drug::from_str(&drug_key)
        .ok()
        .filter(|d| d.primary_gene() == gene)
        .and_then(|d| lookup_rule(d, phenotype));

    let (risk_label, confidence, recommendation, fallback) = match rule {
        Some(rule) => (
            rule.label,
            rule.confidence,
            rule.recommendation.to_string(),
            false,
        ),
        None => {
            warn!(
                "No risk rule for ({}, {}, {}), applying conservative fallback",
                gene, drug_key, phenotype
            );
            (
                FALLBACK_LABEL,
                FALLBACK_CONFIDENCE,
                fallback_recommendation(gene, drug, phenotype),
                true,
            )
        }
    };

    RiskResult {
        risk_label,
        severity: risk_label.severity(),
        confidence,
        guideline_source: GUIDELINE_SOURCE.to_string(),
        recommendation,
        gene,
        phenotype,
        diplotype: diplotype.to_string(),
        drug: title_case(drug.trim()),
        fallback,
    }
}

fn fallback_recommendation(gene: Gene, drug: &str, phenotype: Phenotype) -> String {
    format!(
        "No specific CPIC guideline available for {} / {} / {}. \
         Exercise clinical caution and consult a clinical pharmacist.",
        gene,
        title_case(drug.trim()),
        phenotype
    )
}
