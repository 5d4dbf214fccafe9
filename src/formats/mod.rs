//! VCF model
//!
//! Header schema, lazy records, variant decomposition, genotype compression
//! and the `EFF`/`ANN`, `CSQ` and `LOF` annotation parsers.

pub mod consequence;
pub mod effect;
pub mod genotype;
pub mod header;
pub mod lof;
pub mod reader;
pub mod variant;
pub mod vcf;

pub use consequence::ConsequenceAnnotation;
pub use effect::{Coding, EffectAnnotation, EffectVersion, FunctionalClass, Impact};
pub use genotype::{CompressedGenotypes, GenotypeCode, VcfGenotype};
pub use header::{Cardinality, FieldDeclaration, HeaderModel, PedigreeEntry, Scope};
pub use lof::LossOfFunction;
pub use reader::{parse_records_parallel, NumberedLine, ParseOptions, ParseStats, VcfReader};
pub use variant::{decompose, GenotypeTagging, Variant, VariantType};
pub use vcf::{Diagnostic, VcfRecord};
