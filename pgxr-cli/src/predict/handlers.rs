use anyhow::Result;
use clap::ArgMatches;
use log::warn;
use serde_json::Value;

use pgxr::run_pipeline;

use crate::common::{get_vcf_path, load_classifier, load_config, write_json};

pub fn run_predict(matches: &ArgMatches) -> Result<()> {
    let vcf = get_vcf_path(matches)?;
    let drugs = matches
        .get_one::<String>("drugs")
        .ok_or_else(|| anyhow::anyhow!("A comma-separated drug list is required."))?;
    let patient_id = matches.get_one::<String>("patient-id");

    let (config, tables) = load_config(matches)?;
    let classifier = load_classifier(matches)?;

    let output = run_pipeline(&vcf, drugs, &tables, classifier, &config)?;
    for drug in &output.unsupported_drugs {
        warn!("No curated rules for {}, left out of the report", drug);
    }

    let reports = output
        .reports
        .into_iter()
        .map(|report| match patient_id {
            Some(id) => report.with_patient_id(id),
            None => report,
        })
        .collect::<Vec<_>>();

    // one drug gives a single object, several give an array
    let value = match reports.as_slice() {
        [report] => serde_json::to_value(report)?,
        _ => Value::Array(
            reports
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };

    write_json(matches, &value)
}
