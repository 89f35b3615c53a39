//! # Phenotype scoring
//!
//! Turns a gene's total activity score into a CPIC phenotype. Metabolic
//! enzymes (CYP2D6, CYP2C19, CYP2C9, DPYD) use a four-tier metabolizer scale,
//! the SLCO1B1 transporter a three-tier function scale, and TPMT a three-tier
//! metabolizer scale.
pub mod scorer;

pub use scorer::{phenotype_code, score_to_phenotype};
