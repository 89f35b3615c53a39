use anyhow::Result;
use clap::ArgMatches;

use pgxr::interpret_vcf;

use crate::common::{get_vcf_path, load_classifier, load_config, write_json};

pub fn run_diplotype(matches: &ArgMatches) -> Result<()> {
    let vcf = get_vcf_path(matches)?;
    let (config, tables) = load_config(matches)?;
    let classifier = load_classifier(matches)?;

    let interpretation = interpret_vcf(&vcf, &tables, classifier, &config)?;

    let value = serde_json::json!({
        "profiles": interpretation.profiles(),
        "quality_metrics": interpretation.quality_metrics(),
    });

    write_json(matches, &value)
}
