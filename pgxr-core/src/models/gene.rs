use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::PgxError;

///
/// The pharmacogenes tracked by the pipeline. The set is closed: every
/// request produces exactly one diplotype per variant of this enum.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Gene {
    Cyp2d6,
    Cyp2c19,
    Cyp2c9,
    Slco1b1,
    Tpmt,
    Dpyd,
}

/// Which phenotype threshold table a gene is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GeneCategory {
    /// Four-tier metabolizer scale (UM/NM/IM/PM).
    MetabolicEnzyme,
    /// Three-tier transport function scale (NF/DF/PF).
    Transporter,
    /// Three-tier metabolizer scale without an ultra-rapid tier.
    Methyltransferase,
}

impl Gene {
    /// All tracked genes, in reporting order.
    pub const ALL: [Gene; 6] = [
        Gene::Cyp2d6,
        Gene::Cyp2c19,
        Gene::Cyp2c9,
        Gene::Slco1b1,
        Gene::Tpmt,
        Gene::Dpyd,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Gene::Cyp2d6 => "CYP2D6",
            Gene::Cyp2c19 => "CYP2C19",
            Gene::Cyp2c9 => "CYP2C9",
            Gene::Slco1b1 => "SLCO1B1",
            Gene::Tpmt => "TPMT",
            Gene::Dpyd => "DPYD",
        }
    }

    pub fn category(&self) -> GeneCategory {
        match self {
            Gene::Cyp2d6 | Gene::Cyp2c19 | Gene::Cyp2c9 | Gene::Dpyd => {
                GeneCategory::MetabolicEnzyme
            }
            Gene::Slco1b1 => GeneCategory::Transporter,
            Gene::Tpmt => GeneCategory::Methyltransferase,
        }
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Gene {
    type Err = PgxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim().to_uppercase();
        Gene::ALL
            .into_iter()
            .find(|gene| gene.symbol() == symbol)
            .ok_or_else(|| PgxError::unknown("gene", s))
    }
}
