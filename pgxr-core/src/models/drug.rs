use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::PgxError;
use crate::models::gene::Gene;

///
/// Drugs with a curated gene-drug rule set.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Drug {
    Codeine,
    Warfarin,
    Clopidogrel,
    Simvastatin,
    Azathioprine,
    Fluorouracil,
}

impl Drug {
    pub const ALL: [Drug; 6] = [
        Drug::Codeine,
        Drug::Warfarin,
        Drug::Clopidogrel,
        Drug::Simvastatin,
        Drug::Azathioprine,
        Drug::Fluorouracil,
    ];

    /// Canonical uppercase key, e.g. `CODEINE`.
    pub fn key(&self) -> &'static str {
        match self {
            Drug::Codeine => "CODEINE",
            Drug::Warfarin => "WARFARIN",
            Drug::Clopidogrel => "CLOPIDOGREL",
            Drug::Simvastatin => "SIMVASTATIN",
            Drug::Azathioprine => "AZATHIOPRINE",
            Drug::Fluorouracil => "FLUOROURACIL",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Drug::Codeine => "Codeine",
            Drug::Warfarin => "Warfarin",
            Drug::Clopidogrel => "Clopidogrel",
            Drug::Simvastatin => "Simvastatin",
            Drug::Azathioprine => "Azathioprine",
            Drug::Fluorouracil => "Fluorouracil",
        }
    }

    /// Gene primarily responsible for the drug's metabolism or transport.
    pub fn primary_gene(&self) -> Gene {
        match self {
            Drug::Codeine => Gene::Cyp2d6,
            Drug::Warfarin => Gene::Cyp2c9,
            Drug::Clopidogrel => Gene::Cyp2c19,
            Drug::Simvastatin => Gene::Slco1b1,
            Drug::Azathioprine => Gene::Tpmt,
            Drug::Fluorouracil => Gene::Dpyd,
        }
    }
}

///
/// Normalize a user-supplied drug name to its canonical uppercase form.
///
pub fn normalize_drug_name(name: &str) -> String {
    name.trim().to_uppercase()
}

///
/// Title-case a drug name for display, e.g. `WARFARIN` -> `Warfarin`.
///
pub fn title_case(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Drug {
    type Err = PgxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_drug_name(s);
        Drug::ALL
            .into_iter()
            .find(|drug| drug.key() == key)
            .ok_or_else(|| PgxError::unknown("drug", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("codeine", Drug::Codeine)]
    #[case("  Warfarin ", Drug::Warfarin)]
    #[case("FLUOROURACIL", Drug::Fluorouracil)]
    fn test_drug_from_str(#[case] input: &str, #[case] expected: Drug) {
        assert_eq!(Drug::from_str(input).unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_drug() {
        assert!(Drug::from_str("ibuprofen").is_err());
    }

    #[rstest]
    fn test_every_gene_has_one_drug() {
        let mut genes: Vec<Gene> = Drug::ALL.iter().map(|d| d.primary_gene()).collect();
        genes.sort();
        assert_eq!(genes, Gene::ALL.to_vec());
    }

    #[rstest]
    #[case("WARFARIN", "Warfarin")]
    #[case("ibuprofen", "Ibuprofen")]
    #[case("", "")]
    fn test_title_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(title_case(input), expected);
    }
}
