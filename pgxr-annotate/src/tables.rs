//! Curated pharmacogenomic reference tables (GRCh38).
//!
//! Three read-only tables drive annotation and haplotype resolution:
//!
//! - exact `(chrom, pos, ref, alt)` -> star-allele definitions
//! - one genomic window per tracked gene, for calls the curated table misses
//! - the wild-type allele each gene defaults to on an empty haplotype
//!
//! [ReferenceTables] is built once and shared by reference; nothing mutates it
//! after construction.

use std::fs::read_to_string;
use std::path::Path;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pgxr_core::models::{FunctionClass, Gene, VariantKey};

/// Sentinel rsID carried by default alleles.
pub const NO_RSID: &str = ".";

/// Star label given to calls inside a gene window with no curated definition.
pub const NOVEL_STAR: &str = "novel";

#[derive(Error, Debug)]
pub enum ReferenceTableError {
    #[error("Duplicate allele definition at {0}")]
    DuplicateKey(VariantKey),
    #[error("Reference table is empty: {0}")]
    Empty(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ReferenceTableResult<T> = std::result::Result<T, ReferenceTableError>;

///
/// A curated star-allele definition: the verdict copied onto any call that
/// matches its key exactly.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlleleDefinition {
    pub gene: Gene,
    pub star: String,
    pub rsid: String,
    pub function: FunctionClass,
    pub activity: f64,
}

/// One `[[alleles]]` row of a TOML reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlleleTableEntry {
    #[serde(flatten)]
    pub key: VariantKey,
    #[serde(flatten)]
    pub allele: AlleleDefinition,
}

#[derive(Debug, Deserialize)]
struct AlleleTableFile {
    alleles: Vec<AlleleTableEntry>,
}

///
/// Inclusive 1-based coordinate window covering one tracked gene.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneWindow {
    pub gene: Gene,
    pub chrom: &'static str,
    pub start: u64,
    pub end: u64,
}

impl GeneWindow {
    pub fn contains(&self, chrom: &str, pos: u64) -> bool {
        self.chrom == chrom && self.start <= pos && pos <= self.end
    }
}

/// Approximate gene-level windows. The windows do not overlap.
pub const GENE_WINDOWS: [GeneWindow; 6] = [
    GeneWindow { gene: Gene::Cyp2d6, chrom: "chr22", start: 42_512_000, end: 42_530_000 },
    GeneWindow { gene: Gene::Cyp2c19, chrom: "chr10", start: 94_762_000, end: 94_855_000 },
    GeneWindow { gene: Gene::Cyp2c9, chrom: "chr10", start: 96_698_000, end: 96_749_000 },
    GeneWindow { gene: Gene::Slco1b1, chrom: "chr12", start: 21_131_000, end: 21_239_000 },
    GeneWindow { gene: Gene::Tpmt, chrom: "chr6", start: 18_126_000, end: 18_157_000 },
    GeneWindow { gene: Gene::Dpyd, chrom: "chr1", start: 97_543_000, end: 98_387_000 },
];

///
/// Wild-type allele a haplotype falls back to when nothing was called on it.
///
pub fn default_allele(gene: Gene) -> AlleleDefinition {
    let star = match gene {
        Gene::Slco1b1 => "*1a",
        _ => "*1",
    };
    AlleleDefinition {
        gene,
        star: star.to_string(),
        rsid: NO_RSID.to_string(),
        function: FunctionClass::NormalFunction,
        activity: 1.0,
    }
}

type BuiltinRow = (&'static str, u64, &'static str, &'static str, Gene, &'static str, &'static str, FunctionClass, f64);

// PharmVar / PharmGKB, GRCh38
#[rustfmt::skip]
const BUILTIN_ALLELES: &[BuiltinRow] = &[
    // CYP2D6
    ("chr22", 42524947, "C", "T", Gene::Cyp2d6, "*4", "rs3892097", FunctionClass::NoFunction, 0.0),
    ("chr22", 42525772, "G", "C", Gene::Cyp2d6, "*2", "rs16947", FunctionClass::NormalFunction, 1.0),
    ("chr22", 42527613, "C", "T", Gene::Cyp2d6, "*10", "rs1065852", FunctionClass::DecreasedFunction, 0.25),
    ("chr22", 42523805, "C", "T", Gene::Cyp2d6, "*17", "rs28371706", FunctionClass::DecreasedFunction, 0.5),
    ("chr22", 42522612, "G", "A", Gene::Cyp2d6, "*41", "rs28371725", FunctionClass::DecreasedFunction, 0.5),
    // duplication proxy
    ("chr22", 42524214, "A", "G", Gene::Cyp2d6, "*1xN", "rs5030655", FunctionClass::IncreasedFunction, 2.0),
    // CYP2C19
    ("chr10", 94781859, "G", "A", Gene::Cyp2c19, "*2", "rs4244285", FunctionClass::NoFunction, 0.0),
    ("chr10", 94780573, "G", "A", Gene::Cyp2c19, "*3", "rs4986893", FunctionClass::NoFunction, 0.0),
    ("chr10", 94761900, "C", "T", Gene::Cyp2c19, "*17", "rs12248560", FunctionClass::IncreasedFunction, 1.5),
    // CYP2C9
    ("chr10", 96741053, "C", "T", Gene::Cyp2c9, "*2", "rs1799853", FunctionClass::DecreasedFunction, 0.5),
    ("chr10", 96740981, "A", "C", Gene::Cyp2c9, "*3", "rs1057910", FunctionClass::NoFunction, 0.0),
    ("chr10", 96741058, "C", "G", Gene::Cyp2c9, "*5", "rs28371686", FunctionClass::DecreasedFunction, 0.5),
    ("chr10", 96741048, "A", "del", Gene::Cyp2c9, "*6", "rs9332131", FunctionClass::NoFunction, 0.0),
    // SLCO1B1
    ("chr12", 21178615, "T", "C", Gene::Slco1b1, "*5", "rs4149056", FunctionClass::DecreasedFunction, 0.0),
    ("chr12", 21176804, "A", "G", Gene::Slco1b1, "*15", "rs2306283", FunctionClass::DecreasedFunction, 0.0),
    // TPMT
    ("chr6", 18130943, "G", "C", Gene::Tpmt, "*2", "rs1800462", FunctionClass::NoFunction, 0.0),
    ("chr6", 18130918, "C", "T", Gene::Tpmt, "*3B", "rs1800460", FunctionClass::NoFunction, 0.0),
    ("chr6", 18131006, "A", "G", Gene::Tpmt, "*3C", "rs1142345", FunctionClass::NoFunction, 0.0),
    // DPYD
    ("chr1", 97915614, "C", "T", Gene::Dpyd, "*2A", "rs3918290", FunctionClass::NoFunction, 0.0),
    ("chr1", 97981395, "T", "G", Gene::Dpyd, "*13", "rs56038477", FunctionClass::NoFunction, 0.0),
    ("chr1", 98348885, "A", "T", Gene::Dpyd, "c.2846A>T", "rs67376798", FunctionClass::DecreasedFunction, 0.5),
    ("chr1", 97883329, "G", "A", Gene::Dpyd, "HapB3", "rs75017182", FunctionClass::DecreasedFunction, 0.5),
];

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    alleles: FxHashMap<VariantKey, AlleleDefinition>,
}

impl ReferenceTables {
    ///
    /// The curated table shipped with the crate.
    ///
    pub fn builtin() -> Self {
        let alleles = BUILTIN_ALLELES
            .iter()
            .map(|&(chrom, pos, ref_allele, alt_allele, gene, star, rsid, function, activity)| {
                (
                    VariantKey::new(chrom, pos, ref_allele, alt_allele),
                    AlleleDefinition {
                        gene,
                        star: star.to_string(),
                        rsid: rsid.to_string(),
                        function,
                        activity,
                    },
                )
            })
            .collect();

        ReferenceTables { alleles }
    }

    ///
    /// Build a table from explicit entries. Two entries with the same key are
    /// rejected rather than letting the later one win silently.
    ///
    pub fn from_entries<I>(entries: I) -> ReferenceTableResult<Self>
    where
        I: IntoIterator<Item = AlleleTableEntry>,
    {
        let mut alleles = FxHashMap::default();
        for entry in entries {
            if alleles.contains_key(&entry.key) {
                return Err(ReferenceTableError::DuplicateKey(entry.key));
            }
            alleles.insert(entry.key, entry.allele);
        }
        Ok(ReferenceTables { alleles })
    }

    /// Exact-key lookup against the curated definitions.
    pub fn lookup(&self, key: &VariantKey) -> Option<&AlleleDefinition> {
        self.alleles.get(key)
    }

    /// The gene whose window contains `chrom:pos`, if any.
    pub fn window_gene(&self, chrom: &str, pos: u64) -> Option<Gene> {
        GENE_WINDOWS
            .iter()
            .find(|window| window.contains(chrom, pos))
            .map(|window| window.gene)
    }

    pub fn default_allele(&self, gene: Gene) -> AlleleDefinition {
        default_allele(gene)
    }

    /// All curated entries, sorted by key.
    pub fn entries(&self) -> Vec<AlleleTableEntry> {
        let mut entries: Vec<AlleleTableEntry> = self
            .alleles
            .iter()
            .map(|(key, allele)| AlleleTableEntry {
                key: key.clone(),
                allele: allele.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        ReferenceTables::builtin()
    }
}

impl TryFrom<&Path> for ReferenceTables {
    type Error = ReferenceTableError;

    ///
    /// Load a replacement allele table from a TOML file of `[[alleles]]` rows.
    /// Gene windows and default alleles stay built in.
    ///
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let file: AlleleTableFile = toml::from_str(&toml_str)?;
        if file.alleles.is_empty() {
            return Err(ReferenceTableError::Empty(path.display().to_string()));
        }
        ReferenceTables::from_entries(file.alleles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/reference")
            .join(file_name)
    }

    #[fixture]
    fn tables() -> ReferenceTables {
        ReferenceTables::builtin()
    }

    #[rstest]
    fn test_builtin_table_covers_every_gene(tables: ReferenceTables) {
        assert_eq!(tables.len(), BUILTIN_ALLELES.len());
        for gene in Gene::ALL {
            assert!(
                tables.entries().iter().any(|e| e.allele.gene == gene),
                "no curated allele for {}",
                gene
            );
        }
    }

    #[rstest]
    fn test_lookup_is_coordinate_exact(tables: ReferenceTables) {
        let hit = tables
            .lookup(&VariantKey::new("chr22", 42524947, "C", "T"))
            .unwrap();
        assert_eq!(hit.gene, Gene::Cyp2d6);
        assert_eq!(hit.star, "*4");
        assert_eq!(hit.function, FunctionClass::NoFunction);
        assert_eq!(hit.activity, 0.0);

        assert!(tables.lookup(&VariantKey::new("chr22", 42524947, "C", "G")).is_none());
        assert!(tables.lookup(&VariantKey::new("22", 42524947, "C", "T")).is_none());
        assert!(tables.lookup(&VariantKey::new("chr22", 42524948, "C", "T")).is_none());
    }

    #[rstest]
    #[case("chr22", 42_512_000, Some(Gene::Cyp2d6))]
    #[case("chr22", 42_530_000, Some(Gene::Cyp2d6))]
    #[case("chr22", 42_530_001, None)]
    #[case("chr10", 96_700_000, Some(Gene::Cyp2c9))]
    #[case("chr10", 95_000_000, None)]
    #[case("chr6", 18_130_000, Some(Gene::Tpmt))]
    #[case("chr1", 1_000, None)]
    fn test_window_gene(
        tables: ReferenceTables,
        #[case] chrom: &str,
        #[case] pos: u64,
        #[case] expected: Option<Gene>,
    ) {
        assert_eq!(tables.window_gene(chrom, pos), expected);
    }

    #[rstest]
    fn test_windows_do_not_overlap() {
        for (i, a) in GENE_WINDOWS.iter().enumerate() {
            for b in GENE_WINDOWS.iter().skip(i + 1) {
                let overlap = a.chrom == b.chrom && a.start <= b.end && b.start <= a.end;
                assert!(!overlap, "{} and {} windows overlap", a.gene, b.gene);
            }
        }
    }

    #[rstest]
    fn test_default_alleles() {
        assert_eq!(default_allele(Gene::Slco1b1).star, "*1a");
        for gene in Gene::ALL {
            let allele = default_allele(gene);
            assert_eq!(allele.function, FunctionClass::NormalFunction);
            assert_eq!(allele.activity, 1.0);
            assert_eq!(allele.rsid, NO_RSID);
        }
    }

    #[rstest]
    fn test_load_table_from_toml() {
        let path = get_test_path("alleles.toml");
        let tables = ReferenceTables::try_from(path.as_path()).unwrap();
        assert_eq!(tables.len(), 2);

        let hit = tables
            .lookup(&VariantKey::new("chr22", 42524947, "C", "T"))
            .unwrap();
        assert_eq!(hit.star, "*4");
        assert!(tables.lookup(&VariantKey::new("chr22", 42525772, "G", "C")).is_none());
    }

    #[rstest]
    fn test_duplicate_entries_rejected(tables: ReferenceTables) {
        let mut entries = tables.entries();
        entries.push(entries[0].clone());
        let result = ReferenceTables::from_entries(entries);
        assert!(matches!(result, Err(ReferenceTableError::DuplicateKey(_))));
    }
}
