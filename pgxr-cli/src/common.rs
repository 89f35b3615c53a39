use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, arg};
use log::info;
use serde_json::Value;

use pgxr::PipelineConfig;
use pgxr::annotate::ReferenceTables;
use pgxr::diplotype::{StaticClassifier, VariantFunctionClassifier};

pub fn vcf_arg() -> Arg {
    Arg::new("vcf")
        .required(true)
        .help("Path to a single-sample VCF file (.vcf or .vcf.gz)")
}

pub fn config_arg() -> Arg {
    arg!(--config <config>).help("Pipeline configuration file (TOML)")
}

pub fn classifications_arg() -> Arg {
    arg!(--classifications <classifications>)
        .help("Precomputed variant-function classifications (JSON) for calls missing from the reference table")
}

pub fn output_arg() -> Arg {
    arg!(--output <output>).help("Write JSON here instead of stdout")
}

pub fn get_vcf_path(matches: &ArgMatches) -> Result<PathBuf> {
    let vcf = matches
        .get_one::<String>("vcf")
        .context("A path to a VCF file is required.")?;
    Ok(PathBuf::from(vcf))
}

///
/// Load the pipeline configuration and the reference tables it points at.
///
pub fn load_config(matches: &ArgMatches) -> Result<(PipelineConfig, ReferenceTables)> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => PipelineConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => PipelineConfig::default(),
    };

    let tables = config
        .reference_tables()
        .context("Failed to load reference tables")?;
    info!("Loaded {} curated allele definitions", tables.len());

    Ok((config, tables))
}

pub fn load_classifier(matches: &ArgMatches) -> Result<Option<Arc<dyn VariantFunctionClassifier>>> {
    let Some(path) = matches.get_one::<String>("classifications") else {
        return Ok(None);
    };

    let classifier = StaticClassifier::try_from(Path::new(path))
        .with_context(|| format!("Failed to load classifications from {}", path))?;
    info!("Loaded {} precomputed classifications", classifier.len());

    Ok(Some(Arc::new(classifier)))
}

///
/// Pretty-print JSON to the `--output` file, or stdout if none was given.
///
pub fn write_json(matches: &ArgMatches, value: &Value) -> Result<()> {
    let mut writer: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path))?,
        )),
        None => Box::new(BufWriter::new(stdout().lock())),
    };

    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
