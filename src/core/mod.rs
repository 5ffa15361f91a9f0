//! Core data types for HLA alignment conversion.
//!
//! - [`Locus`]: A gene locus with the reference allele and sequence type to request
//! - [`AlignmentConfig`]: Immutable run configuration shared by all stages
//! - [`RowTable`]: Insertion-ordered mapping from row key to accumulated tokens
//!
//! ## Loci
//!
//! | Locus | Reference | Type |
//! |-------|-----------|------|
//! | A | 01:01:01:01 | Genomic |
//! | B | 07:02:01 | Genomic |
//! | C | 01:02:01 | Genomic |
//! | DPA1 | 01:03:01:01 | Genomic |
//! | DPB1 | 01:01:01 | Genomic |
//! | DQA1 | 01:01:01 | Genomic |
//! | DQB1 | 05:01:01:01 | Genomic |
//! | DRB1 | 01:01:01 | Genomic |
//! | DRB3 | 01:01:01 | Genomic |
//! | DRB4 | 01:01:01 | Genomic |
//! | DRB5 | 01:01:01 | CDS |
//!
//! [`Locus`]: locus::Locus
//! [`AlignmentConfig`]: config::AlignmentConfig
//! [`RowTable`]: table::RowTable

pub mod config;
pub mod locus;
pub mod table;
