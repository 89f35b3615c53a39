//! Genotype (GT) field decoding.

use pgxr_core::models::{Allele, Zygosity};

pub const PHASED_SEPARATOR: char = '|';
pub const UNPHASED_SEPARATOR: char = '/';
pub const GT_KEY: &str = "GT";

/// A decoded diploid genotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genotype {
    pub allele1: Allele,
    pub allele2: Allele,
    pub phased: bool,
}

impl Genotype {
    ///
    /// Decode a raw GT string such as `0|1`, `1/1` or `./.`.
    ///
    /// The pipe separator marks a phased call, anything else is read as
    /// slash-separated and unphased. A lone allele (haploid call) leaves the
    /// second allele missing. Returns `None` when a token is not an allele
    /// index.
    ///
    pub fn parse(gt: &str) -> Option<Genotype> {
        let phased = gt.contains(PHASED_SEPARATOR);
        let separator = if phased {
            PHASED_SEPARATOR
        } else {
            UNPHASED_SEPARATOR
        };

        let mut tokens = gt.split(separator);
        let allele1 = Allele::from_token(tokens.next().unwrap_or("."))?;
        let allele2 = match tokens.next() {
            Some(token) => Allele::from_token(token)?,
            None => Allele::Missing,
        };

        Some(Genotype {
            allele1,
            allele2,
            phased,
        })
    }

    pub fn zygosity(&self) -> Zygosity {
        Zygosity::from_alleles(self.allele1, self.allele2)
    }
}

///
/// Pull the GT value out of a sample column using the FORMAT column's field
/// order. Falls back to `.` when FORMAT has no GT key or the sample is short.
///
pub fn extract_gt<'a>(format: &str, sample: &'a str) -> &'a str {
    let Some(gt_pos) = format.split(':').position(|key| key == GT_KEY) else {
        return ".";
    };
    sample.split(':').nth(gt_pos).unwrap_or(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("0|1", Allele::Ref, Allele::Alt, true, Zygosity::Het)]
    #[case("1|0", Allele::Alt, Allele::Ref, true, Zygosity::Het)]
    #[case("1/1", Allele::Alt, Allele::Alt, false, Zygosity::HomAlt)]
    #[case("0/0", Allele::Ref, Allele::Ref, false, Zygosity::HomRef)]
    #[case("./.", Allele::Missing, Allele::Missing, false, Zygosity::Missing)]
    #[case(".|1", Allele::Missing, Allele::Alt, true, Zygosity::Missing)]
    #[case("1", Allele::Alt, Allele::Missing, false, Zygosity::Missing)]
    #[case(".", Allele::Missing, Allele::Missing, false, Zygosity::Missing)]
    #[case("1|2", Allele::Alt, Allele::Ref, true, Zygosity::Het)]
    fn test_parse_genotype(
        #[case] gt: &str,
        #[case] allele1: Allele,
        #[case] allele2: Allele,
        #[case] phased: bool,
        #[case] zygosity: Zygosity,
    ) {
        let genotype = Genotype::parse(gt).unwrap();
        assert_eq!(genotype.allele1, allele1);
        assert_eq!(genotype.allele2, allele2);
        assert_eq!(genotype.phased, phased);
        assert_eq!(genotype.zygosity(), zygosity);
    }

    #[rstest]
    fn test_parse_garbage_genotype() {
        assert_eq!(Genotype::parse("A|T"), None);
    }

    #[rstest]
    #[case("GT", "0|1", "0|1")]
    #[case("GT:DP", "1|1:35", "1|1")]
    #[case("DP:GT", "35:0/1", "0/1")]
    #[case("DP", "35", ".")]
    #[case("DP:GT", "35", ".")]
    fn test_extract_gt(#[case] format: &str, #[case] sample: &str, #[case] expected: &str) {
        assert_eq!(extract_gt(format, sample), expected);
    }
}
