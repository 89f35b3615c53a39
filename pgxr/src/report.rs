//! Serializable per-gene and per-drug output.

use serde::{Deserialize, Serialize};

use pgxr_core::models::{FunctionClass, Gene, Phenotype, RiskLabel, Severity, Zygosity};
use pgxr_diplotype::{DiplotypeResult, HaplotypeCall, Provenance, ResolvedVariant};
use pgxr_phenotype::score_to_phenotype;
use pgxr_risk::RiskResult;

/// A contributing call as reported to downstream consumers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectedVariant {
    /// rsID, the record identifier, or `.`.
    pub rsid: String,
    pub chrom: String,
    pub pos: u64,
    #[serde(rename = "ref")]
    pub ref_allele: String,
    pub alt: String,
    pub zygosity: Zygosity,
    pub star_allele: Option<String>,
    /// Function and activity the resolver applied to this call.
    pub function_class: FunctionClass,
    pub activity_score: f64,
    /// Where the verdict came from; `default` marks the normal-function
    /// substitution for a call nobody classified.
    pub provenance: Provenance,
    pub km_score: Option<f64>,
    pub mtd_methods: Vec<String>,
    pub externally_classified: bool,
    pub external_confidence: Option<f64>,
}

impl From<&ResolvedVariant> for DetectedVariant {
    fn from(resolved: &ResolvedVariant) -> Self {
        let annotated = &resolved.annotated;
        let record = &annotated.record;

        DetectedVariant {
            rsid: annotated
                .rsid
                .clone()
                .or_else(|| record.rsid().map(String::from))
                .unwrap_or_else(|| ".".to_string()),
            chrom: record.chrom.clone(),
            pos: record.pos,
            ref_allele: record.ref_allele.clone(),
            alt: record.alt_allele.clone(),
            zygosity: record.zygosity,
            star_allele: annotated.star_allele.clone(),
            function_class: resolved.call.function_class,
            activity_score: resolved.call.activity,
            provenance: resolved.call.provenance,
            km_score: record.qc.km,
            mtd_methods: record.qc.mtd_methods.clone(),
            externally_classified: resolved.is_externally_classified(),
            external_confidence: resolved.external_confidence,
        }
    }
}

///
/// Resolved genotype and phenotype of one gene.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PharmacogenomicProfile {
    pub primary_gene: Gene,
    pub diplotype: String,
    pub phenotype: Phenotype,
    pub phenotype_code: String,
    pub activity_score: f64,
    pub haplotype_0: HaplotypeCall,
    pub haplotype_1: HaplotypeCall,
    pub detected_variants: Vec<DetectedVariant>,
}

impl From<&DiplotypeResult> for PharmacogenomicProfile {
    fn from(result: &DiplotypeResult) -> Self {
        let phenotype = score_to_phenotype(result.gene, result.total_activity_score);
        PharmacogenomicProfile {
            primary_gene: result.gene,
            diplotype: result.diplotype.clone(),
            phenotype,
            phenotype_code: phenotype.code().to_string(),
            activity_score: result.total_activity_score,
            haplotype_0: result.haplotype_0.clone(),
            haplotype_1: result.haplotype_1.clone(),
            detected_variants: result.variants.iter().map(DetectedVariant::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClinicalRecommendation {
    pub guideline_source: String,
    pub recommendation: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub total_variants_parsed: usize,
    /// Calls matched exactly against the curated table.
    pub pgx_variants_found: usize,
    /// Distinct flagged keys the external classifier answered for.
    pub external_classifications_made: usize,
    pub skipped_lines: usize,
    pub header_fallback: bool,
}

///
/// Everything reported for one requested drug.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DrugReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    /// Drug name in title case.
    pub drug: String,
    pub risk_assessment: RiskAssessment,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub quality_metrics: QualityMetrics,
}

impl DrugReport {
    pub fn new(
        risk: RiskResult,
        profile: PharmacogenomicProfile,
        quality_metrics: QualityMetrics,
    ) -> Self {
        DrugReport {
            patient_id: None,
            drug: risk.drug,
            risk_assessment: RiskAssessment {
                risk_label: risk.risk_label,
                confidence_score: risk.confidence,
                severity: risk.severity,
            },
            pharmacogenomic_profile: profile,
            clinical_recommendation: ClinicalRecommendation {
                guideline_source: risk.guideline_source,
                recommendation: risk.recommendation,
            },
            quality_metrics,
        }
    }

    pub fn with_patient_id(mut self, patient_id: &str) -> Self {
        self.patient_id = Some(patient_id.to_string());
        self
    }
}
