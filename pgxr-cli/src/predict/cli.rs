use clap::{Command, arg};

use crate::common::{classifications_arg, config_arg, output_arg, vcf_arg};

pub const PREDICT_CMD: &str = "predict";

pub fn create_predict_cli() -> Command {
    Command::new(PREDICT_CMD)
        .about("Predict drug-specific pharmacogenomic risk from a VCF file.")
        .arg(vcf_arg())
        .arg(
            arg!(--drugs <drugs>)
                .required(true)
                .help("Comma-separated drug names, e.g. codeine,warfarin"),
        )
        .arg(arg!(--"patient-id" <patient_id>).help("Patient identifier echoed into each report"))
        .arg(config_arg())
        .arg(classifications_arg())
        .arg(output_arg())
}
