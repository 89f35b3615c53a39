pub mod drug;
pub mod function;
pub mod gene;
pub mod phenotype;
pub mod risk;
pub mod variant;

// re-export for cleaner imports
pub use self::drug::{Drug, normalize_drug_name, title_case};
pub use self::function::FunctionClass;
pub use self::gene::{Gene, GeneCategory};
pub use self::phenotype::Phenotype;
pub use self::risk::{RiskLabel, Severity};
pub use self::variant::{
    Allele, HaplotypeCopies, ParsedVariantRecord, QcMetrics, VariantKey, Zygosity,
};
