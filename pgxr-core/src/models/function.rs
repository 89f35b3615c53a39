use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::PgxError;

///
/// Functional consequence assigned to an allele, either by the curated
/// reference table or by the external variant-function classifier.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FunctionClass {
    NoFunction,
    DecreasedFunction,
    NormalFunction,
    IncreasedFunction,
}

impl FunctionClass {
    pub const ALL: [FunctionClass; 4] = [
        FunctionClass::NoFunction,
        FunctionClass::DecreasedFunction,
        FunctionClass::NormalFunction,
        FunctionClass::IncreasedFunction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionClass::NoFunction => "no_function",
            FunctionClass::DecreasedFunction => "decreased_function",
            FunctionClass::NormalFunction => "normal_function",
            FunctionClass::IncreasedFunction => "increased_function",
        }
    }

    ///
    /// Activity value assigned to an externally classified allele. Curated
    /// table entries carry their own activity and never go through this map.
    ///
    pub fn default_activity(&self) -> f64 {
        match self {
            FunctionClass::NoFunction => 0.0,
            FunctionClass::DecreasedFunction => 0.5,
            FunctionClass::NormalFunction => 1.0,
            FunctionClass::IncreasedFunction => 1.5,
        }
    }
}

impl Display for FunctionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FunctionClass {
    type Err = PgxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        FunctionClass::ALL
            .into_iter()
            .find(|class| class.as_str() == label)
            .ok_or_else(|| PgxError::unknown("function class", s))
    }
}
