//! Haplotype resolution.
//!
//! For every tracked gene the contributing calls are split into the two
//! chromosomal copies by which copy carries the ALT allele. Each copy then
//! takes its most deleterious call, the one with the lowest activity. Ties go
//! to the call seen first in the input, and an empty copy falls back to the
//! gene's wild-type allele.

use log::debug;

use pgxr_annotate::{AnnotatedVariant, NOVEL_STAR, ReferenceTables, filter_by_gene};
use pgxr_core::models::{FunctionClass, Gene};
use pgxr_core::utils::round_activity;

use crate::models::{
    ClassificationMap, DiplotypeResult, HaplotypeCall, Provenance, ResolvedVariant,
};

///
/// Settle the functional verdict for a single annotated variant.
///
/// A reference hit is used as is. A flagged call takes the external result for
/// its key when one is present, scored through the fixed function-class table,
/// and otherwise stands in as normal function with activity 1.0.
///
pub fn resolve_variant(
    variant: &AnnotatedVariant,
    classifications: &ClassificationMap,
) -> ResolvedVariant {
    let star = variant
        .star_allele
        .clone()
        .unwrap_or_else(|| NOVEL_STAR.to_string());
    let rsids: Vec<String> = variant.rsid.iter().filter(|r| *r != ".").cloned().collect();

    let (function_class, activity, provenance, external_confidence) =
        match (variant.function_class, variant.activity_score) {
            (Some(function_class), Some(activity)) if !variant.needs_external_classification => {
                (function_class, activity, Provenance::Reference, None)
            }
            _ => match classifications.get(&variant.key()) {
                Some(result) => (
                    result.function_class,
                    result.function_class.default_activity(),
                    Provenance::External,
                    Some(result.confidence),
                ),
                None => {
                    debug!(
                        "{} has no external classification, assuming normal function",
                        variant.key()
                    );
                    (
                        FunctionClass::NormalFunction,
                        FunctionClass::NormalFunction.default_activity(),
                        Provenance::Default,
                        None,
                    )
                }
            },
        };

    ResolvedVariant {
        annotated: variant.clone(),
        call: HaplotypeCall {
            star,
            function_class,
            activity,
            rsids,
            provenance,
        },
        external_confidence,
    }
}

///
/// Pick the call with the lowest activity. `min_by` keeps the first of equal
/// elements, which is the input-order tie-break.
///
fn select_call<'a, I>(calls: I) -> Option<&'a HaplotypeCall>
where
    I: Iterator<Item = &'a HaplotypeCall>,
{
    calls.min_by(|a, b| a.activity.total_cmp(&b.activity))
}

fn wild_type_call(tables: &ReferenceTables, gene: Gene) -> HaplotypeCall {
    let allele = tables.default_allele(gene);
    HaplotypeCall {
        star: allele.star,
        function_class: allele.function,
        activity: allele.activity,
        rsids: vec![],
        provenance: Provenance::Default,
    }
}

///
/// Resolve one gene from its contributing variants (already filtered to that
/// gene, in input order).
///
pub fn resolve_gene(
    gene: Gene,
    variants: &[&AnnotatedVariant],
    classifications: &ClassificationMap,
    tables: &ReferenceTables,
) -> DiplotypeResult {
    let resolved: Vec<ResolvedVariant> = variants
        .iter()
        .map(|v| resolve_variant(v, classifications))
        .collect();

    let pick = |haplotype: usize| -> HaplotypeCall {
        let bucket = resolved
            .iter()
            .filter(|r| r.annotated.alt_copies.contains(haplotype))
            .map(|r| &r.call);
        select_call(bucket)
            .cloned()
            .unwrap_or_else(|| wild_type_call(tables, gene))
    };

    let haplotype_0 = pick(0);
    let haplotype_1 = pick(1);

    let diplotype = format!("{}/{}", haplotype_0.star, haplotype_1.star);
    let total_activity_score = round_activity(haplotype_0.activity + haplotype_1.activity);

    debug!(
        "{} -> {} (activity score {})",
        gene, diplotype, total_activity_score
    );

    DiplotypeResult {
        gene,
        haplotype_0,
        haplotype_1,
        diplotype,
        total_activity_score,
        variants: resolved,
    }
}

///
/// Resolve a diplotype for every tracked gene, in [Gene::ALL] order. Genes
/// without contributing variants resolve to their wild-type pairing.
///
/// # Arguments
///
/// - annotated: output of the annotator, in input order
/// - classifications: external results for flagged variants (may be empty)
/// - tables: the reference tables the annotation was made against
///
pub fn resolve_diplotypes(
    annotated: &[AnnotatedVariant],
    classifications: &ClassificationMap,
    tables: &ReferenceTables,
) -> Vec<DiplotypeResult> {
    Gene::ALL
        .iter()
        .map(|&gene| {
            let variants = filter_by_gene(annotated, gene);
            resolve_gene(gene, &variants, classifications, tables)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use pgxr_annotate::annotate_variants;
    use pgxr_core::models::{Allele, ParsedVariantRecord, QcMetrics, VariantKey, Zygosity};
    use pgxr_vcf::parse_vcf;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::models::ExternalClassification;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/vcf")
            .join(file_name)
    }

    fn record(chrom: &str, pos: u64, ref_allele: &str, alt: &str, gt: &str) -> ParsedVariantRecord {
        let (a, b) = gt.split_once(['|', '/']).unwrap();
        let allele1 = Allele::from_token(a).unwrap();
        let allele2 = Allele::from_token(b).unwrap();
        ParsedVariantRecord {
            chrom: chrom.to_string(),
            pos,
            id: ".".to_string(),
            ref_allele: ref_allele.to_string(),
            alt_allele: alt.to_string(),
            gt_raw: gt.to_string(),
            phased: gt.contains('|'),
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

    fn resolve(records: &[ParsedVariantRecord], tables: &ReferenceTables, gene: Gene) -> DiplotypeResult {
        let annotated = annotate_variants(records, tables);
        resolve_diplotypes(&annotated, &ClassificationMap::default(), tables)
            .into_iter()
            .find(|d| d.gene == gene)
            .unwrap()
    }

    #[rstest]
    fn test_every_gene_resolves_without_variants(tables: ReferenceTables) {
        let results = resolve_diplotypes(&[], &ClassificationMap::default(), &tables);
        let genes: Vec<Gene> = results.iter().map(|d| d.gene).collect();
        assert_eq!(genes, Gene::ALL.to_vec());

        for result in results {
            let wild = tables.default_allele(result.gene).star;
            assert_eq!(result.diplotype, format!("{}/{}", wild, wild));
            assert_eq!(result.total_activity_score, 2.0);
            assert_eq!(result.haplotype_0.provenance, Provenance::Default);
            assert_eq!(result.haplotype_1.provenance, Provenance::Default);
            assert!(result.variants.is_empty());
        }
    }

    #[rstest]
    fn test_het_cyp2d6_star4(tables: ReferenceTables) {
        let result = resolve(&[record("chr22", 42524947, "C", "T", "0|1")], &tables, Gene::Cyp2d6);

        assert_eq!(result.haplotype_0.star, "*1");
        assert_eq!(result.haplotype_0.provenance, Provenance::Default);
        assert_eq!(result.haplotype_1.star, "*4");
        assert_eq!(result.haplotype_1.function_class, FunctionClass::NoFunction);
        assert_eq!(result.haplotype_1.rsids, vec!["rs3892097".to_string()]);
        assert_eq!(result.haplotype_1.provenance, Provenance::Reference);
        assert_eq!(result.diplotype, "*1/*4");
        assert_eq!(result.total_activity_score, 1.0);
    }

    #[rstest]
    fn test_hom_alt_fills_both_copies(tables: ReferenceTables) {
        let result = resolve(&[record("chr10", 94781859, "G", "A", "1/1")], &tables, Gene::Cyp2c19);
        assert_eq!(result.diplotype, "*2/*2");
        assert_eq!(result.total_activity_score, 0.0);
    }

    #[rstest]
    fn test_lowest_activity_wins(tables: ReferenceTables) {
        // *10 (0.25) then *4 (0.0) on the same copy
        let records = [
            record("chr22", 42527613, "C", "T", "1|0"),
            record("chr22", 42524947, "C", "T", "1|0"),
        ];
        let result = resolve(&records, &tables, Gene::Cyp2d6);
        assert_eq!(result.diplotype, "*4/*1");
        assert_eq!(result.variants.len(), 2);
    }

    #[rstest]
    fn test_tie_goes_to_first_in_input(tables: ReferenceTables) {
        // *17 and *41 are both 0.5
        let forward = [
            record("chr22", 42523805, "C", "T", "0|1"),
            record("chr22", 42522612, "G", "A", "0|1"),
        ];
        let result = resolve(&forward, &tables, Gene::Cyp2d6);
        assert_eq!(result.haplotype_1.star, "*17");

        let reversed = [forward[1].clone(), forward[0].clone()];
        let result = resolve(&reversed, &tables, Gene::Cyp2d6);
        assert_eq!(result.haplotype_1.star, "*41");
    }

    #[rstest]
    fn test_flagged_without_result_defaults_to_normal(tables: ReferenceTables) {
        let result = resolve(&[record("chr6", 18130000, "A", "G", "1|0")], &tables, Gene::Tpmt);

        assert_eq!(result.haplotype_0.star, "novel");
        assert_eq!(result.haplotype_0.function_class, FunctionClass::NormalFunction);
        assert_eq!(result.haplotype_0.activity, 1.0);
        assert_eq!(result.haplotype_0.provenance, Provenance::Default);
        assert_eq!(result.diplotype, "novel/*1");
        assert_eq!(result.total_activity_score, 2.0);
        assert_eq!(result.variants[0].external_confidence, None);
    }

    #[rstest]
    #[case(FunctionClass::NoFunction, 1.0)]
    #[case(FunctionClass::DecreasedFunction, 1.5)]
    #[case(FunctionClass::NormalFunction, 2.0)]
    #[case(FunctionClass::IncreasedFunction, 2.5)]
    fn test_external_result_is_scored(
        tables: ReferenceTables,
        #[case] function_class: FunctionClass,
        #[case] expected_total: f64,
    ) {
        let annotated = annotate_variants(&[record("chr6", 18130000, "A", "G", "1|0")], &tables);
        let mut classifications = ClassificationMap::default();
        classifications.insert(
            VariantKey::new("chr6", 18130000, "A", "G"),
            ExternalClassification {
                function_class,
                confidence: 0.8,
            },
        );

        let results = resolve_diplotypes(&annotated, &classifications, &tables);
        let tpmt = results.iter().find(|d| d.gene == Gene::Tpmt).unwrap();

        assert_eq!(tpmt.total_activity_score, expected_total);
        assert_eq!(tpmt.variants[0].external_confidence, Some(0.8));
        assert!(tpmt.variants[0].is_externally_classified());
        assert_eq!(tpmt.haplotype_0.star, "novel");
        assert_eq!(tpmt.haplotype_0.provenance, Provenance::External);
    }

    #[rstest]
    fn test_sum_is_rounded_once(tables: ReferenceTables) {
        // *10 (0.25) + *17 (0.5)
        let records = [
            record("chr22", 42527613, "C", "T", "1|0"),
            record("chr22", 42523805, "C", "T", "0|1"),
        ];
        let result = resolve(&records, &tables, Gene::Cyp2d6);
        assert_eq!(result.total_activity_score, 0.75);
    }

    #[rstest]
    fn test_unphased_het_uses_allele_order(tables: ReferenceTables) {
        let result = resolve(&[record("chr22", 42524947, "C", "T", "1/0")], &tables, Gene::Cyp2d6);
        assert_eq!(result.diplotype, "*4/*1");
    }

    #[rstest]
    fn test_resolve_fixture(tables: ReferenceTables) {
        let parsed = parse_vcf(&get_test_path("sample.vcf")).unwrap();
        let annotated = annotate_variants(&parsed.records, &tables);
        let results = resolve_diplotypes(&annotated, &ClassificationMap::default(), &tables);

        let summary: Vec<(Gene, &str, f64)> = results
            .iter()
            .map(|d| (d.gene, d.diplotype.as_str(), d.total_activity_score))
            .collect();

        assert_eq!(
            summary,
            vec![
                (Gene::Cyp2d6, "*1/*4", 1.0),
                (Gene::Cyp2c19, "*2/*2", 0.0),
                (Gene::Cyp2c9, "*2/*1", 1.5),
                (Gene::Slco1b1, "*1a/*1a", 2.0),
                (Gene::Tpmt, "novel/*1", 2.0),
                (Gene::Dpyd, "*1/*1", 2.0),
            ]
        );
    }
}
