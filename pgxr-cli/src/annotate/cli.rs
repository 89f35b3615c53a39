use clap::Command;

use crate::common::{config_arg, output_arg, vcf_arg};

pub const ANNOTATE_CMD: &str = "annotate";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .about("Annotate VCF calls against the curated pharmacogene tables.")
        .arg(vcf_arg())
        .arg(config_arg())
        .arg(output_arg())
}
