//! Error types for FastVcf
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for FastVcf operations
#[derive(Debug, Error)]
pub enum FastVcfError {
    /// Header meta-line or pedigree errors
    #[error("Header error: {0}")]
    Header(#[from] HeaderError),

    /// Fatal record errors, with the offending input line
    #[error("Record error: {0}")]
    Record(#[from] LineError),

    /// Annotation sub-field parsing errors
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading header meta-lines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Meta-line does not follow the `##KEY=<...>` grammar
    #[error("Malformed meta-line '{line}': {message}")]
    MalformedLine { line: String, message: String },

    /// `Type=` value is not Integer/Float/Flag/Character/String
    #[error("Unknown value type '{0}'")]
    UnknownType(String),

    /// `Number=` value is neither a count nor one of A/R/G/.
    #[error("Invalid cardinality '{0}'")]
    InvalidCardinality(String),

    /// A recognized pedigree shape lacks one of its keys
    #[error("Pedigree entry '{line}' is missing key '{key}'")]
    PedigreeMissingKey { line: String, key: &'static str },

    /// Pedigree key is not one of Original/Derived/Father/Mother/Child
    #[error("Unknown pedigree key '{key}' in '{line}'")]
    PedigreeUnknownKey { line: String, key: String },

    /// Pedigree key set matches neither supported shape
    #[error("Pedigree entry '{line}' has {count} fields, expected Original/Derived or Father/Mother/Child")]
    PedigreeShape { line: String, count: usize },

    /// Pedigree refers to a name missing from the sample list
    #[error("Pedigree entry '{line}' names unknown sample '{sample}'")]
    PedigreeUnknownSample { line: String, sample: String },
}

/// Fatal conditions that make a record unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Fewer tab separated columns than the minimum
    #[error("Not enough fields (missing tab separators?): expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    /// POS column is not a positive integer
    #[error("Invalid position '{0}'")]
    InvalidPosition(String),

    /// REF lists more than one allele
    #[error("REF field has multiple entries: '{0}'")]
    MultipleRef(String),

    /// Symbolic allele whose END precedes POS
    #[error("INFO field 'END' ({end}) is before variant's 'POS' ({pos})")]
    EndBeforePos { end: i64, pos: u64 },

    /// Single character ALT outside the IUPAC table
    #[error("Unknown IUPAC code for SNP '{0}'")]
    UnknownIupacCode(char),

    /// REF/ALT alignment produced a shape that cannot be turned into a variant
    #[error("Unsupported change type '{alignment}': REF '{reference}', ALT '{alt}'")]
    UnsupportedChange {
        reference: String,
        alt: String,
        alignment: String,
    },

    /// Genotypes not representable with HOM/HET/MISSING lists
    #[error("Cannot compress genotypes: {0}")]
    Compression(String),

    /// INFO key outside `[A-Za-z_][0-9A-Za-z._]*`
    #[error("Illegal INFO key '{0}'")]
    InvalidInfoKey(String),
}

impl RecordError {
    /// Attach the input line number and raw text
    pub fn at_line(self, line: usize, raw: &str) -> LineError {
        LineError {
            line,
            raw: raw.chars().take(200).collect(),
            source: self,
        }
    }
}

/// A fatal record error located in its input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {source}\n\t'{raw}'")]
pub struct LineError {
    /// Line number (1-based)
    pub line: usize,
    /// Offending text, truncated to 200 characters
    pub raw: String,
    /// Underlying record error
    pub source: RecordError,
}

/// Failure to parse one annotation entry
///
/// The message lists every sub-field with its index so malformed strings
/// produced by upstream annotators can be diagnosed from the log alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error parsing {kind} entry:\n\t'{entry}'\n\t{reason}\n{}", dump_fields(.fields))]
pub struct AnnotationError {
    /// Annotation family (EFF, CSQ, LOF, NMD)
    pub kind: &'static str,
    /// The entry as written in the INFO value
    pub entry: String,
    /// What went wrong
    pub reason: String,
    /// Sub-fields as split, before typing
    pub fields: Vec<String>,
}

impl AnnotationError {
    pub fn new(kind: &'static str, entry: &str, reason: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            kind,
            entry: entry.to_string(),
            reason: reason.into(),
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn dump_fields(fields: &[String]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        out.push_str(&format!("\t{} : '{}'\n", i, field));
    }
    out
}

/// Result type alias for FastVcf operations
pub type Result<T> = std::result::Result<T, FastVcfError>;

/// Result type alias for header operations
pub type HeaderResult<T> = std::result::Result<T, HeaderError>;

/// Result type alias for record operations
pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Result type alias for annotation parsing
pub type AnnotationResult<T> = std::result::Result<T, AnnotationError>;
