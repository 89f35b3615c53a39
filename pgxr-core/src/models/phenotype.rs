use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::PgxError;

///
/// Standardized phenotype labels across all threshold tables. Metabolizer
/// labels are shared by the enzyme and methyltransferase tables; function
/// labels belong to the transporter table.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phenotype {
    #[cfg_attr(feature = "serde", serde(rename = "Ultra-Rapid Metabolizer"))]
    UltraRapidMetabolizer,
    #[cfg_attr(feature = "serde", serde(rename = "Normal Metabolizer"))]
    NormalMetabolizer,
    #[cfg_attr(feature = "serde", serde(rename = "Intermediate Metabolizer"))]
    IntermediateMetabolizer,
    #[cfg_attr(feature = "serde", serde(rename = "Poor Metabolizer"))]
    PoorMetabolizer,
    #[cfg_attr(feature = "serde", serde(rename = "Normal Function"))]
    NormalFunction,
    #[cfg_attr(feature = "serde", serde(rename = "Decreased Function"))]
    DecreasedFunction,
    #[cfg_attr(feature = "serde", serde(rename = "Poor Function"))]
    PoorFunction,
}

impl Phenotype {
    pub const ALL: [Phenotype; 7] = [
        Phenotype::UltraRapidMetabolizer,
        Phenotype::NormalMetabolizer,
        Phenotype::IntermediateMetabolizer,
        Phenotype::PoorMetabolizer,
        Phenotype::NormalFunction,
        Phenotype::DecreasedFunction,
        Phenotype::PoorFunction,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Phenotype::UltraRapidMetabolizer => "Ultra-Rapid Metabolizer",
            Phenotype::NormalMetabolizer => "Normal Metabolizer",
            Phenotype::IntermediateMetabolizer => "Intermediate Metabolizer",
            Phenotype::PoorMetabolizer => "Poor Metabolizer",
            Phenotype::NormalFunction => "Normal Function",
            Phenotype::DecreasedFunction => "Decreased Function",
            Phenotype::PoorFunction => "Poor Function",
        }
    }

    /// Short code for external consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Phenotype::UltraRapidMetabolizer => "UM",
            Phenotype::NormalMetabolizer => "NM",
            Phenotype::IntermediateMetabolizer => "IM",
            Phenotype::PoorMetabolizer => "PM",
            Phenotype::NormalFunction => "NF",
            Phenotype::DecreasedFunction => "DF",
            Phenotype::PoorFunction => "PF",
        }
    }
}

impl Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Phenotype {
    type Err = PgxError;

    /// Accepts either the full label or the short code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Phenotype::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s) || p.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| PgxError::unknown("phenotype", s))
    }
}
