use anyhow::Result;
use clap::ArgMatches;
use serde_json::{Value, json};

use pgxr::annotate::{AnnotatedVariant, annotate_variants};
use pgxr::check_input;
use pgxr::vcf::parse_vcf_with_options;

use crate::common::{get_vcf_path, load_config, write_json};

fn annotation_to_json(variant: &AnnotatedVariant) -> Value {
    let record = &variant.record;
    json!({
        "gene": variant.gene,
        "chrom": record.chrom,
        "pos": record.pos,
        "ref": record.ref_allele,
        "alt": record.alt_allele,
        "rsid": variant.rsid,
        "genotype": record.gt_raw,
        "phased": record.phased,
        "zygosity": record.zygosity,
        "star_allele": variant.star_allele,
        "function_class": variant.function_class,
        "activity_score": variant.activity_score,
        "needs_external_classification": variant.needs_external_classification,
        "alt_copies": variant.alt_copies.indices(),
    })
}

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let vcf = get_vcf_path(matches)?;
    let (config, tables) = load_config(matches)?;

    check_input(&vcf, config.parser.max_input_bytes)?;
    let parsed = parse_vcf_with_options(&vcf, &config.parser_options())?;
    let annotated = annotate_variants(&parsed.records, &tables);

    let value = Value::Array(annotated.iter().map(annotation_to_json).collect());
    write_json(matches, &value)
}
