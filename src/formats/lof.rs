//! Loss-of-function and nonsense-mediated-decay summaries (`LOF`, `NMD`)
//!
//! Both keys share one layout: `(GENE|GENE_ID|TRANSCRIPTS|FRACTION)`, the
//! parentheses being optional.

use std::fmt;

use crate::core::codec::{parse_float_safe, parse_int_safe};
use crate::core::error::{AnnotationError, AnnotationResult};

const KIND: &str = "LOF";

/// Number of sub-fields in an entry
pub const LOF_FIELD_COUNT: usize = 4;

/// One gene affected by a loss-of-function or NMD prediction
#[derive(Debug, Clone, PartialEq)]
pub struct LossOfFunction {
    pub gene_name: String,
    pub gene_id: String,
    /// Transcripts in the gene
    pub transcript_count: i64,
    /// Fraction of those transcripts affected
    pub fraction_affected: f64,
}

impl LossOfFunction {
    /// Parse one entry
    ///
    /// Unparsable numbers become 0 and NaN; a wrong field count fails.
    pub fn parse(entry: &str) -> AnnotationResult<Self> {
        let trimmed = entry.trim();
        let inner = trimmed.strip_prefix('(').unwrap_or(trimmed);
        let inner = inner.strip_suffix(')').unwrap_or(inner);

        let fields: Vec<&str> = inner.split('|').collect();
        if fields.len() != LOF_FIELD_COUNT {
            return Err(AnnotationError::new(
                KIND,
                entry,
                format!("expected {} sub-fields, found {}", LOF_FIELD_COUNT, fields.len()),
                &fields,
            ));
        }

        Ok(Self {
            gene_name: fields[0].to_string(),
            gene_id: fields[1].to_string(),
            transcript_count: parse_int_safe(fields[2]),
            fraction_affected: parse_float_safe(fields[3]),
        })
    }
}

impl fmt::Display for LossOfFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}|{}|{}|{:.2})",
            self.gene_name, self.gene_id, self.transcript_count, self.fraction_affected
        )
    }
}

/// Parse a whole `LOF` or `NMD` INFO value
pub fn parse_list(value: &str) -> AnnotationResult<Vec<LossOfFunction>> {
    value
        .split(',')
        .filter(|e| !e.is_empty())
        .map(LossOfFunction::parse)
        .collect()
}
