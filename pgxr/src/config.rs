use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pgxr_annotate::{ReferenceTableError, ReferenceTables};
use pgxr_diplotype::CollectOptions;
use pgxr_diplotype::classify::{DEFAULT_CLASSIFIER_TIMEOUT, DEFAULT_CLASSIFIER_WORKERS};
use pgxr_vcf::ParserOptions;
use pgxr_vcf::parser::{DEFAULT_FALLBACK_SAMPLE_COLUMN, DEFAULT_MAX_INPUT_BYTES};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    ReferenceTable(#[from] ReferenceTableError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParserConfig {
    /// Sample column used when the `#CHROM` header or its FORMAT column is missing.
    pub fallback_sample_column: usize,
    /// Applied to the file on disk and again to the decompressed text.
    pub max_input_bytes: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            fallback_sample_column: DEFAULT_FALLBACK_SAMPLE_COLUMN,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub timeout_ms: u64,
    pub workers: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            timeout_ms: DEFAULT_CLASSIFIER_TIMEOUT.as_millis() as u64,
            workers: DEFAULT_CLASSIFIER_WORKERS,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ReferenceConfig {
    /// TOML allele table replacing the built-in one.
    pub alleles: Option<PathBuf>,
}

///
/// Pipeline settings. Every section and key is optional in the TOML file.
///
/// ```toml
/// [parser]
/// fallback_sample_column = 9
/// max_input_bytes = 5242880
///
/// [classifier]
/// timeout_ms = 5000
/// workers = 4
///
/// [reference]
/// alleles = "alleles.toml"
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub parser: ParserConfig,
    pub classifier: ClassifierConfig,
    pub reference: ReferenceConfig,
}

impl PipelineConfig {
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            fallback_sample_column: self.parser.fallback_sample_column,
            max_input_bytes: self.parser.max_input_bytes,
        }
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            timeout: Duration::from_millis(self.classifier.timeout_ms),
            workers: self.classifier.workers,
        }
    }

    ///
    /// Build the reference tables this configuration points at. Called once
    /// at startup; the result is shared by every pipeline run.
    ///
    pub fn reference_tables(&self) -> ConfigResult<ReferenceTables> {
        match &self.reference.alleles {
            Some(path) => Ok(ReferenceTables::try_from(path.as_path())?),
            None => Ok(ReferenceTables::builtin()),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.classifier.workers == 0 {
            return Err(ConfigError::Invalid(
                "classifier.workers must be at least 1".to_string(),
            ));
        }
        if self.parser.max_input_bytes == 0 {
            return Err(ConfigError::Invalid(
                "parser.max_input_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<&Path> for PipelineConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let mut config: PipelineConfig = toml::from_str(&toml_str)?;

        // relative table paths are resolved against the config file
        if let (Some(alleles), Some(parent)) = (&config.reference.alleles, path.parent()) {
            if alleles.is_relative() {
                config.reference.alleles = Some(parent.join(alleles));
            }
        }

        config.validate()?;
        Ok(config)
    }
}
