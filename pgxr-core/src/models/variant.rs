use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::PgxError;

/// Sentinel used by VCF for an absent identifier.
pub const MISSING_ID: &str = ".";

///
/// Exact lookup key for a variant call: (chrom, 1-based pos, ref, alt).
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariantKey {
    pub chrom: String,
    pub pos: u64,
    #[cfg_attr(feature = "serde", serde(rename = "ref"))]
    pub ref_allele: String,
    #[cfg_attr(feature = "serde", serde(rename = "alt"))]
    pub alt_allele: String,
}

impl VariantKey {
    pub fn new(chrom: &str, pos: u64, ref_allele: &str, alt_allele: &str) -> Self {
        VariantKey {
            chrom: chrom.to_string(),
            pos,
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
        }
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}>{}",
            self.chrom, self.pos, self.ref_allele, self.alt_allele
        )
    }
}

impl FromStr for VariantKey {
    type Err = PgxError;

    /// Parse the `chrom:pos:ref>alt` form produced by [Display].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PgxError::InvalidVariantKey(s.to_string());

        let mut parts = s.splitn(3, ':');
        let chrom = parts.next().filter(|c| !c.is_empty()).ok_or_else(invalid)?;
        let pos = parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .ok_or_else(invalid)?;
        let (ref_allele, alt_allele) = parts
            .next()
            .and_then(|alleles| alleles.split_once('>'))
            .ok_or_else(invalid)?;

        Ok(VariantKey::new(chrom, pos, ref_allele, alt_allele))
    }
}

///
/// One allele of a genotype call, relative to the retained (first) ALT.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allele {
    Missing,
    Ref,
    Alt,
}

impl Allele {
    ///
    /// Parse a single genotype token. `.` or an empty token is missing, `0` is
    /// the reference and `1` the retained ALT. Indices of later ALT alleles
    /// are dropped along with those alleles, so they read as reference.
    /// Returns `None` for tokens that are not allele indices at all.
    ///
    pub fn from_token(token: &str) -> Option<Allele> {
        match token {
            "." | "" => Some(Allele::Missing),
            "0" => Some(Allele::Ref),
            "1" => Some(Allele::Alt),
            other => other.parse::<u32>().ok().map(|_| Allele::Ref),
        }
    }

    /// Numeric index: -1 missing, 0 ref, 1 alt.
    pub fn index(&self) -> i8 {
        match self {
            Allele::Missing => -1,
            Allele::Ref => 0,
            Allele::Alt => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Zygosity {
    HomRef,
    Het,
    HomAlt,
    Missing,
}

impl Zygosity {
    pub fn from_alleles(first: Allele, second: Allele) -> Self {
        match (first, second) {
            (Allele::Missing, _) | (_, Allele::Missing) => Zygosity::Missing,
            (Allele::Ref, Allele::Ref) => Zygosity::HomRef,
            (Allele::Alt, Allele::Alt) => Zygosity::HomAlt,
            _ => Zygosity::Het,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zygosity::HomRef => "hom_ref",
            Zygosity::Het => "het",
            Zygosity::HomAlt => "hom_alt",
            Zygosity::Missing => "missing",
        }
    }
}

impl Display for Zygosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Which chromosomal copies carry the retained ALT allele.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HaplotypeCopies {
    pub first: bool,
    pub second: bool,
}

impl HaplotypeCopies {
    pub fn from_alleles(first: Allele, second: Allele) -> Self {
        HaplotypeCopies {
            first: first == Allele::Alt,
            second: second == Allele::Alt,
        }
    }

    pub fn contains(&self, haplotype: usize) -> bool {
        match haplotype {
            0 => self.first,
            1 => self.second,
            _ => false,
        }
    }

    /// Copy indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        (0..2).filter(|&h| self.contains(h)).collect()
    }

    pub fn is_empty(&self) -> bool {
        !self.first && !self.second
    }
}

///
/// Quality-control metrics carried in INFO (KM, KFP, KFF, MTD).
///
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QcMetrics {
    /// Minimum k-mer count.
    pub km: Option<f64>,
    /// K-mer pedigree failures.
    pub kfp: Option<i64>,
    /// K-mer founder failures.
    pub kff: Option<i64>,
    /// Calling methods that reported the variant.
    pub mtd_methods: Vec<String>,
}

///
/// One VCF data line that survived parsing.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedVariantRecord {
    pub chrom: String,
    /// 1-based position.
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    /// First listed ALT allele only.
    pub alt_allele: String,
    pub gt_raw: String,
    pub phased: bool,
    pub allele1: Allele,
    pub allele2: Allele,
    pub zygosity: Zygosity,
    pub qc: QcMetrics,
}

impl ParsedVariantRecord {
    pub fn key(&self) -> VariantKey {
        VariantKey::new(&self.chrom, self.pos, &self.ref_allele, &self.alt_allele)
    }

    /// The ID column, unless it holds the `.` sentinel.
    pub fn rsid(&self) -> Option<&str> {
        match self.id.as_str() {
            MISSING_ID | "" => None,
            id => Some(id),
        }
    }

    pub fn alt_copies(&self) -> HaplotypeCopies {
        HaplotypeCopies::from_alleles(self.allele1, self.allele2)
    }
}
