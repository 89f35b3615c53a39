use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RiskLabel {
    Safe,
    #[cfg_attr(feature = "serde", serde(rename = "Adjust Dosage"))]
    AdjustDosage,
    Toxic,
    Ineffective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLabel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLabel::Safe => "Safe",
            RiskLabel::AdjustDosage => "Adjust Dosage",
            RiskLabel::Toxic => "Toxic",
            RiskLabel::Ineffective => "Ineffective",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RiskLabel::Safe => Severity::Low,
            RiskLabel::AdjustDosage => Severity::Moderate,
            RiskLabel::Ineffective => Severity::High,
            RiskLabel::Toxic => Severity::Critical,
        }
    }
}

impl Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(RiskLabel::Safe, Severity::Low)]
    #[case(RiskLabel::AdjustDosage, Severity::Moderate)]
    #[case(RiskLabel::Ineffective, Severity::High)]
    #[case(RiskLabel::Toxic, Severity::Critical)]
    fn test_severity_map(#[case] label: RiskLabel, #[case] expected: Severity) {
        assert_eq!(label.severity(), expected);
    }
}
