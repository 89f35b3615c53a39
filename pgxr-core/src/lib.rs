//! # Core data model for pgxr
//!
//! Closed enumerations shared by every stage of the pharmacogenomic pipeline
//! (genes, function classes, phenotypes, risk labels, drugs), the parsed
//! variant record, and a handful of small utilities.
pub mod errors;
pub mod models;
pub mod utils;
