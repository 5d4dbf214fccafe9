//! FastVcf - Lazy VCF record model
//!
//! Parses VCF text into records whose INFO and genotype columns are only
//! decoded on first access, and layers variant-level tooling on top.
//!
//! # Features
//!
//! - Typed header schema with built-in declarations and pedigree parsing
//! - Lazy, memoized INFO and genotype parsing
//! - Decomposition of multi-allelic records into minimal variants
//! - `HOM`/`HET`/`MISSING` genotype compression
//! - `EFF`/`ANN`, `CSQ` and `LOF`/`NMD` annotation parsers
//! - Parallel batch parsing with rayon
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fast_vcf::{GenotypeTagging, HeaderModel, VcfRecord};
//!
//! let header = Arc::new(HeaderModel::new());
//! let record = VcfRecord::parse("1\t100\t.\tA\tG,T\t.\tPASS\tAC=1,2", header).unwrap();
//!
//! assert_eq!(record.info_for_allele("AC", 1), Some("2"));
//! let variants = record.variants(GenotypeTagging::Index).unwrap();
//! assert_eq!(variants.len(), 2);
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    AnnotationError, FastVcfError, HeaderError, IoStrategy, LineError, RecordError, Result,
    TypedValue, ValueType,
};
pub use formats::{
    CompressedGenotypes, ConsequenceAnnotation, Diagnostic, EffectAnnotation, EffectVersion,
    FieldDeclaration, GenotypeTagging, HeaderModel, LossOfFunction, ParseOptions, ParseStats,
    Variant, VariantType, VcfGenotype, VcfReader, VcfRecord,
};
