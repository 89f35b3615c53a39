use log::debug;

use pgxr_core::models::{Gene, GeneCategory, Phenotype};
use pgxr_core::utils::round_activity;

///
/// Map a gene's total activity score to its standardized phenotype.
///
/// The threshold table is chosen by gene category. A boundary value always
/// belongs to the higher tier.
///
/// # Arguments
///
/// - gene: the gene the score was resolved for
/// - total_activity_score: sum of both haplotype activities
///
pub fn score_to_phenotype(gene: Gene, total_activity_score: f64) -> Phenotype {
    let score = round_activity(total_activity_score);

    let phenotype = match gene.category() {
        GeneCategory::MetabolicEnzyme => enzyme_phenotype(score),
        GeneCategory::Transporter => transporter_phenotype(score),
        GeneCategory::Methyltransferase => methyltransferase_phenotype(score),
    };

    debug!("{} activity score {} -> {}", gene, score, phenotype);
    phenotype
}

/// Short code for the phenotype resolved from `(gene, score)`.
pub fn phenotype_code(gene: Gene, total_activity_score: f64) -> &'static str {
    score_to_phenotype(gene, total_activity_score).code()
}

fn enzyme_phenotype(score: f64) -> Phenotype {
    if score > 2.0 {
        Phenotype::UltraRapidMetabolizer
    } else if score >= 1.5 {
        Phenotype::NormalMetabolizer
    } else if score >= 0.5 {
        Phenotype::IntermediateMetabolizer
    } else {
        Phenotype::PoorMetabolizer
    }
}

fn transporter_phenotype(score: f64) -> Phenotype {
    if score >= 2.0 {
        Phenotype::NormalFunction
    } else if score >= 1.0 {
        Phenotype::DecreasedFunction
    } else {
        Phenotype::PoorFunction
    }
}

fn methyltransferase_phenotype(score: f64) -> Phenotype {
    if score >= 2.0 {
        Phenotype::NormalMetabolizer
    } else if score >= 1.0 {
        Phenotype::IntermediateMetabolizer
    } else {
        Phenotype::PoorMetabolizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(3.0, Phenotype::UltraRapidMetabolizer)]
    #[case(2.0001, Phenotype::UltraRapidMetabolizer)]
    #[case(2.0, Phenotype::NormalMetabolizer)]
    #[case(1.5, Phenotype::NormalMetabolizer)]
    #[case(1.4999, Phenotype::IntermediateMetabolizer)]
    #[case(1.0, Phenotype::IntermediateMetabolizer)]
    #[case(0.5, Phenotype::IntermediateMetabolizer)]
    #[case(0.25, Phenotype::PoorMetabolizer)]
    #[case(0.0, Phenotype::PoorMetabolizer)]
    fn test_enzyme_thresholds(#[case] score: f64, #[case] expected: Phenotype) {
        for gene in [Gene::Cyp2d6, Gene::Cyp2c19, Gene::Cyp2c9, Gene::Dpyd] {
            assert_eq!(score_to_phenotype(gene, score), expected, "{}", gene);
        }
    }

    #[rstest]
    #[case(2.5, Phenotype::NormalFunction)]
    #[case(2.0, Phenotype::NormalFunction)]
    #[case(1.5, Phenotype::DecreasedFunction)]
    #[case(1.0, Phenotype::DecreasedFunction)]
    #[case(0.5, Phenotype::PoorFunction)]
    #[case(0.0, Phenotype::PoorFunction)]
    fn test_transporter_thresholds(#[case] score: f64, #[case] expected: Phenotype) {
        assert_eq!(score_to_phenotype(Gene::Slco1b1, score), expected);
    }

    #[rstest]
    #[case(2.0, Phenotype::NormalMetabolizer)]
    #[case(1.5, Phenotype::IntermediateMetabolizer)]
    #[case(1.0, Phenotype::IntermediateMetabolizer)]
    #[case(0.5, Phenotype::PoorMetabolizer)]
    fn test_methyltransferase_thresholds(#[case] score: f64, #[case] expected: Phenotype) {
        assert_eq!(score_to_phenotype(Gene::Tpmt, score), expected);
    }

    #[rstest]
    fn test_float_drift_lands_on_boundary() {
        let drifted = 1.5 - 1e-12;
        assert!(drifted < 1.5);
        assert_eq!(
            score_to_phenotype(Gene::Cyp2d6, drifted),
            Phenotype::NormalMetabolizer
        );
    }

    #[rstest]
    #[case(Gene::Cyp2d6, 1.0, "IM")]
    #[case(Gene::Slco1b1, 1.0, "DF")]
    #[case(Gene::Tpmt, 0.0, "PM")]
    fn test_phenotype_code(#[case] gene: Gene, #[case] score: f64, #[case] expected: &str) {
        assert_eq!(phenotype_code(gene, score), expected);
    }

    #[rstest]
    fn test_wild_type_is_normal_for_every_gene() {
        for gene in Gene::ALL {
            let phenotype = score_to_phenotype(gene, 2.0);
            assert!(
                matches!(
                    phenotype,
                    Phenotype::NormalMetabolizer | Phenotype::NormalFunction
                ),
                "{} -> {}",
                gene,
                phenotype
            );
        }
    }
}
