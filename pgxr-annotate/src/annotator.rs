//! Reference annotation of parsed variant calls.
//!
//! Every non-hom-ref call is matched against the curated table by its exact
//! `(chrom, pos, ref, alt)` key. A miss that still lands inside a tracked gene
//! window is kept and flagged for external classification; everything else is
//! dropped. This is the only filtering step of the pipeline.

use std::collections::BTreeSet;

use log::{debug, info};

use pgxr_core::models::{
    FunctionClass, Gene, HaplotypeCopies, ParsedVariantRecord, VariantKey, Zygosity,
};

use crate::tables::ReferenceTables;

///
/// A call attributed to one tracked gene, with whatever the reference table
/// could say about it.
///
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedVariant {
    pub record: ParsedVariantRecord,
    pub gene: Gene,
    pub star_allele: Option<String>,
    pub rsid: Option<String>,
    pub function_class: Option<FunctionClass>,
    pub activity_score: Option<f64>,
    /// Inside a gene window but absent from the curated table.
    pub needs_external_classification: bool,
    /// Chromosomal copies carrying the ALT allele.
    pub alt_copies: HaplotypeCopies,
}

impl AnnotatedVariant {
    pub fn key(&self) -> VariantKey {
        self.record.key()
    }

    pub fn is_reference_hit(&self) -> bool {
        !self.needs_external_classification
    }
}

/// Counts reported alongside an annotation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub reference_hits: usize,
    pub needs_classification: usize,
    pub genes_found: BTreeSet<Gene>,
}

impl AnnotationSummary {
    pub fn from_variants(variants: &[AnnotatedVariant]) -> Self {
        let mut summary = AnnotationSummary::default();
        for variant in variants {
            if variant.needs_external_classification {
                summary.needs_classification += 1;
            } else {
                summary.reference_hits += 1;
            }
            summary.genes_found.insert(variant.gene);
        }
        summary
    }
}

///
/// Annotate a single record. Returns `None` for hom-ref calls and for calls
/// outside every tracked gene.
///
pub fn annotate_record(
    record: &ParsedVariantRecord,
    tables: &ReferenceTables,
) -> Option<AnnotatedVariant> {
    if record.zygosity == Zygosity::HomRef {
        return None;
    }

    let alt_copies = record.alt_copies();

    if let Some(allele) = tables.lookup(&record.key()) {
        return Some(AnnotatedVariant {
            record: record.clone(),
            gene: allele.gene,
            star_allele: Some(allele.star.clone()),
            rsid: Some(allele.rsid.clone()),
            function_class: Some(allele.function),
            activity_score: Some(allele.activity),
            needs_external_classification: false,
            alt_copies,
        });
    }

    let gene = tables.window_gene(&record.chrom, record.pos)?;
    debug!(
        "{} falls in the {} window without a curated definition",
        record.key(),
        gene
    );

    Some(AnnotatedVariant {
        record: record.clone(),
        gene,
        star_allele: None,
        rsid: record.rsid().map(String::from),
        function_class: None,
        activity_score: None,
        needs_external_classification: true,
        alt_copies,
    })
}

///
/// Annotate parsed records against the reference tables, keeping input order.
///
pub fn annotate_variants(
    records: &[ParsedVariantRecord],
    tables: &ReferenceTables,
) -> Vec<AnnotatedVariant> {
    let annotated: Vec<AnnotatedVariant> = records
        .iter()
        .filter_map(|record| annotate_record(record, tables))
        .collect();

    let summary = AnnotationSummary::from_variants(&annotated);
    info!(
        "Annotation complete: {} reference hits, {} flagged for external classification, genes found: {:?}",
        summary.reference_hits,
        summary.needs_classification,
        summary.genes_found.iter().map(|g| g.symbol()).collect::<Vec<_>>()
    );

    annotated
}

/// Annotated variants attributed to `gene`, in input order.
pub fn filter_by_gene(annotated: &[AnnotatedVariant], gene: Gene) -> Vec<&AnnotatedVariant> {
    annotated.iter().filter(|v| v.gene == gene).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use pgxr_core::models::{Allele, QcMetrics};
    use pgxr_vcf::parse_vcf;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/vcf")
            .join(file_name)
    }

    fn make_record(chrom: &str, pos: u64, ref_allele: &str, alt: &str, gt: &str) -> ParsedVariantRecord {
        let phased = gt.contains('|');
        let mut tokens = gt.split(['|', '/']);
        let allele1 = Allele::from_token(tokens.next().unwrap()).unwrap();
        let allele2 = Allele::from_token(tokens.next().unwrap()).unwrap();
        ParsedVariantRecord {
            chrom: chrom.to_string(),
            pos,
            id: ".".to_string(),
            ref_allele: ref_allele.to_string(),
            alt_allele: alt.to_string(),
            gt_raw: gt.to_string(),
            phased,
            allele1,
            allele2,
            zygosity: Zygosity::from_alleles(allele1, allele2),
            qc: QcMetrics::default(),
        }
    }

    #[fixture]
    fn tables() -> ReferenceTables {
        ReferenceTables::builtin()
    }

    #[rstest]
    fn test_reference_hit_copies_definition(tables: ReferenceTables) {
        let record = make_record("chr22", 42524947, "C", "T", "0|1");
        let annotated = annotate_record(&record, &tables).unwrap();

        assert_eq!(annotated.gene, Gene::Cyp2d6);
        assert_eq!(annotated.star_allele.as_deref(), Some("*4"));
        assert_eq!(annotated.rsid.as_deref(), Some("rs3892097"));
        assert_eq!(annotated.function_class, Some(FunctionClass::NoFunction));
        assert_eq!(annotated.activity_score, Some(0.0));
        assert!(!annotated.needs_external_classification);
        assert_eq!(annotated.alt_copies.indices(), vec![1]);
    }

    #[rstest]
    fn test_hom_ref_is_excluded(tables: ReferenceTables) {
        let record = make_record("chr22", 42524947, "C", "T", "0|0");
        assert_eq!(annotate_record(&record, &tables), None);
    }

    #[rstest]
    fn test_window_hit_is_flagged(tables: ReferenceTables) {
        let mut record = make_record("chr6", 18_130_000, "A", "G", "1/1");
        record.id = "rs555".to_string();
        let annotated = annotate_record(&record, &tables).unwrap();

        assert_eq!(annotated.gene, Gene::Tpmt);
        assert!(annotated.needs_external_classification);
        assert_eq!(annotated.star_allele, None);
        assert_eq!(annotated.function_class, None);
        assert_eq!(annotated.rsid.as_deref(), Some("rs555"));
        assert_eq!(annotated.alt_copies.indices(), vec![0, 1]);
    }

    #[rstest]
    fn test_window_hit_without_id_has_no_rsid(tables: ReferenceTables) {
        let record = make_record("chr6", 18_130_000, "A", "G", "0|1");
        let annotated = annotate_record(&record, &tables).unwrap();
        assert_eq!(annotated.rsid, None);
    }

    #[rstest]
    fn test_allele_mismatch_falls_back_to_window(tables: ReferenceTables) {
        // right coordinate, wrong ALT
        let record = make_record("chr22", 42524947, "C", "G", "0|1");
        let annotated = annotate_record(&record, &tables).unwrap();
        assert!(annotated.needs_external_classification);
        assert_eq!(annotated.gene, Gene::Cyp2d6);
    }

    #[rstest]
    fn test_untracked_call_is_dropped(tables: ReferenceTables) {
        let record = make_record("chr1", 1000, "A", "G", "0|1");
        assert_eq!(annotate_record(&record, &tables), None);
    }

    #[rstest]
    fn test_missing_genotype_is_kept(tables: ReferenceTables) {
        let record = make_record("chr22", 42524947, "C", "T", "1|.");
        let annotated = annotate_record(&record, &tables).unwrap();
        assert_eq!(annotated.record.zygosity, Zygosity::Missing);
        assert_eq!(annotated.alt_copies.indices(), vec![0]);
    }

    #[rstest]
    fn test_annotation_is_deterministic(tables: ReferenceTables) {
        let parsed = parse_vcf(&get_test_path("sample.vcf")).unwrap();
        let first = annotate_variants(&parsed.records, &tables);
        let second = annotate_variants(&parsed.records, &tables);
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_annotate_fixture(tables: ReferenceTables) {
        let parsed = parse_vcf(&get_test_path("sample.vcf")).unwrap();
        let annotated = annotate_variants(&parsed.records, &tables);

        let genes: Vec<Gene> = annotated.iter().map(|v| v.gene).collect();
        assert_eq!(
            genes,
            vec![Gene::Cyp2d6, Gene::Cyp2c19, Gene::Tpmt, Gene::Cyp2c9]
        );

        let summary = AnnotationSummary::from_variants(&annotated);
        assert_eq!(summary.reference_hits, 3);
        assert_eq!(summary.needs_classification, 1);

        assert_eq!(filter_by_gene(&annotated, Gene::Tpmt).len(), 1);
        assert!(filter_by_gene(&annotated, Gene::Dpyd).is_empty());
    }
}
