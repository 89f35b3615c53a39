//! One linear pass per request: check input, parse, annotate, classify,
//! resolve, then score and assess each requested drug.

use std::fs::metadata;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use pgxr_annotate::{AnnotatedVariant, AnnotationSummary, ReferenceTables, annotate_variants};
use pgxr_core::models::{Drug, Gene, normalize_drug_name};
use pgxr_diplotype::{
    ClassificationMap, DiplotypeResult, VariantFunctionClassifier, collect_classifications,
    resolve_diplotypes,
};
use pgxr_phenotype::score_to_phenotype;
use pgxr_risk::classify_risk;
use pgxr_vcf::{ParseSummary, ParsedVcf, VcfError, parse_vcf_with_options, validate_vcf_header};

use crate::config::PipelineConfig;
use crate::report::{DrugReport, PharmacogenomicProfile, QualityMetrics};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(
        "No supported drugs were matched in {requested:?}. Supported: Codeine, Warfarin, Clopidogrel, Simvastatin, Azathioprine, Fluorouracil."
    )]
    NoSupportedDrugs { requested: Vec<String> },

    #[error(transparent)]
    Vcf(#[from] VcfError),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// A parsed drug request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrugSelection {
    /// Supported drugs, deduplicated, in request order.
    pub supported: Vec<Drug>,
    /// Normalized names with no curated rule set.
    pub unsupported: Vec<String>,
}

///
/// Split a comma-separated drug list. Names are trimmed and uppercased, empty
/// entries dropped, and unsupported names set aside rather than rejected.
///
pub fn parse_drug_list(drugs: &str) -> DrugSelection {
    let mut selection = DrugSelection::default();

    for name in drugs.split(',').map(normalize_drug_name) {
        if name.is_empty() {
            continue;
        }
        match Drug::from_str(&name) {
            Ok(drug) => {
                if !selection.supported.contains(&drug) {
                    selection.supported.push(drug);
                }
            }
            Err(_) => {
                warn!("Unsupported drug: {}, skipped", name);
                selection.unsupported.push(name);
            }
        }
    }

    selection
}

///
/// Caller-side checks before any parsing: the file exists, is within the size
/// limit on disk and declares itself as VCF. The parser enforces the same
/// limit again on the decompressed text.
///
pub fn check_input(path: &Path, max_input_bytes: u64) -> PipelineResult<()> {
    if !path.is_file() {
        return Err(VcfError::NotFound(path.to_path_buf()).into());
    }

    let size = metadata(path).map_err(VcfError::from)?.len();
    if size > max_input_bytes {
        return Err(VcfError::InputTooLarge {
            size,
            limit: max_input_bytes,
        }
        .into());
    }

    if !validate_vcf_header(path) {
        return Err(VcfError::InvalidHeader(path.to_path_buf()).into());
    }

    Ok(())
}

///
/// Gene-level interpretation of one sample, shared by every drug assessed
/// against it.
///
#[derive(Debug, Clone)]
pub struct Interpretation {
    pub summary: ParseSummary,
    pub annotated: Vec<AnnotatedVariant>,
    pub classifications: ClassificationMap,
    /// One entry per tracked gene, in [Gene::ALL] order.
    pub diplotypes: Vec<DiplotypeResult>,
}

impl Interpretation {
    pub fn diplotype(&self, gene: Gene) -> Option<&DiplotypeResult> {
        self.diplotypes.iter().find(|d| d.gene == gene)
    }

    pub fn profiles(&self) -> Vec<PharmacogenomicProfile> {
        self.diplotypes
            .iter()
            .map(PharmacogenomicProfile::from)
            .collect()
    }

    pub fn quality_metrics(&self) -> QualityMetrics {
        let annotation = AnnotationSummary::from_variants(&self.annotated);
        QualityMetrics {
            vcf_parsing_success: true,
            total_variants_parsed: self.summary.records_parsed,
            pgx_variants_found: annotation.reference_hits,
            external_classifications_made: self.classifications.len(),
            skipped_lines: self.summary.skipped_lines,
            header_fallback: self.summary.header_fallback,
        }
    }

    ///
    /// Score the drug's primary gene and classify its risk. `None` only if
    /// that gene was never resolved, which [resolve_diplotypes] rules out.
    ///
    pub fn assess_drug(&self, drug: Drug) -> Option<DrugReport> {
        let gene = drug.primary_gene();
        let diplotype = self.diplotype(gene)?;

        let phenotype = score_to_phenotype(gene, diplotype.total_activity_score);
        let risk = classify_risk(gene, drug.key(), phenotype, &diplotype.diplotype);

        info!(
            "{}: {} {} ({}) -> {}",
            drug.display_name(),
            gene,
            diplotype.diplotype,
            phenotype.code(),
            risk.risk_label
        );

        Some(DrugReport::new(
            risk,
            PharmacogenomicProfile::from(diplotype),
            self.quality_metrics(),
        ))
    }
}

///
/// Interpret already-parsed records. Pure apart from the classifier call.
///
pub fn interpret_parsed(
    parsed: ParsedVcf,
    tables: &ReferenceTables,
    classifier: Option<Arc<dyn VariantFunctionClassifier>>,
    config: &PipelineConfig,
) -> Interpretation {
    let annotated = annotate_variants(&parsed.records, tables);

    let classifications = match classifier {
        Some(classifier) => {
            collect_classifications(&annotated, classifier, &config.collect_options())
        }
        None => ClassificationMap::default(),
    };

    let diplotypes = resolve_diplotypes(&annotated, &classifications, tables);

    Interpretation {
        summary: parsed.summary,
        annotated,
        classifications,
        diplotypes,
    }
}

///
/// Check, parse and interpret a VCF file.
///
pub fn interpret_vcf(
    path: &Path,
    tables: &ReferenceTables,
    classifier: Option<Arc<dyn VariantFunctionClassifier>>,
    config: &PipelineConfig,
) -> PipelineResult<Interpretation> {
    check_input(path, config.parser.max_input_bytes)?;
    let parsed = parse_vcf_with_options(path, &config.parser_options())?;
    Ok(interpret_parsed(parsed, tables, classifier, config))
}

/// Reports for the supported drugs of a request, plus the names left out.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub reports: Vec<DrugReport>,
    pub unsupported_drugs: Vec<String>,
}

///
/// Run the whole pipeline for one sample and a comma-separated drug list.
///
/// # Arguments
///
/// - vcf_path: path to a single-sample VCF (optionally gzipped)
/// - drugs: comma-separated drug names, case-insensitive
/// - tables: reference tables loaded once at startup
/// - classifier: optional external variant-function classifier
/// - config: pipeline settings
///
pub fn run_pipeline(
    vcf_path: &Path,
    drugs: &str,
    tables: &ReferenceTables,
    classifier: Option<Arc<dyn VariantFunctionClassifier>>,
    config: &PipelineConfig,
) -> PipelineResult<PipelineOutput> {
    let selection = parse_drug_list(drugs);
    if selection.supported.is_empty() {
        return Err(PipelineError::NoSupportedDrugs {
            requested: selection.unsupported,
        });
    }

    let interpretation = interpret_vcf(vcf_path, tables, classifier, config)?;

    let reports: Vec<DrugReport> = selection
        .supported
        .iter()
        .filter_map(|&drug| interpretation.assess_drug(drug))
        .collect();

    Ok(PipelineOutput {
        reports,
        unsupported_drugs: selection.unsupported,
    })
}
