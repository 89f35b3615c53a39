use clap::Command;

use crate::common::{classifications_arg, config_arg, output_arg, vcf_arg};

pub const DIPLOTYPE_CMD: &str = "diplotype";

pub fn create_diplotype_cli() -> Command {
    Command::new(DIPLOTYPE_CMD)
        .about("Resolve diplotypes, activity scores and phenotypes for every tracked gene.")
        .arg(vcf_arg())
        .arg(config_arg())
        .arg(classifications_arg())
        .arg(output_arg())
}
