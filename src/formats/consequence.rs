//! Consequence annotations (`CSQ`)
//!
//! Fixed layout of 35 pipe-separated sub-fields per entry, addressed by
//! position. Entries are separated by commas.

use std::fmt;

use crate::core::error::{AnnotationError, AnnotationResult};

const KIND: &str = "CSQ";

/// Sub-field names in layout order
pub const CSQ_FIELDS: [&str; 35] = [
    "Allele",
    "Gene",
    "Feature",
    "Feature_type",
    "Consequence",
    "cDNA_position",
    "CDS_position",
    "Protein_position",
    "Amino_acids",
    "Codons",
    "Existing_variation",
    "DISTANCE",
    "STRAND",
    "SYMBOL",
    "SYMBOL_SOURCE",
    "HGNC_ID",
    "BIOTYPE",
    "SIFT",
    "PolyPhen",
    "DOMAINS",
    "HGVSc",
    "HGVSp",
    "GMAF",
    "AFR_MAF",
    "AMR_MAF",
    "ASN_MAF",
    "EUR_MAF",
    "AA_MAF",
    "EA_MAF",
    "CLIN_SIG",
    "SOMATIC",
    "MOTIF_NAME",
    "MOTIF_POS",
    "HIGH_INF_POS",
    "MOTIF_SCORE_CHANGE",
];

/// Position of a sub-field, by bare name (`SYMBOL`) or INFO-style name (`CSQ.SYMBOL`)
pub fn field_index(name: &str) -> Option<usize> {
    let name = name.strip_prefix("CSQ.").unwrap_or(name);
    CSQ_FIELDS.iter().position(|f| *f == name)
}

/// One parsed consequence entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsequenceAnnotation {
    values: Vec<String>,
}

impl ConsequenceAnnotation {
    /// Parse one entry
    ///
    /// Sub-fields past the 35th are ignored.
    pub fn parse(entry: &str) -> AnnotationResult<Self> {
        let fields: Vec<&str> = entry.split('|').collect();
        if fields.len() < CSQ_FIELDS.len() {
            return Err(AnnotationError::new(
                KIND,
                entry,
                format!("expected {} sub-fields, found {}", CSQ_FIELDS.len(), fields.len()),
                &fields,
            ));
        }
        if fields.len() > CSQ_FIELDS.len() {
            log::debug!("ignoring {} extra CSQ sub-fields", fields.len() - CSQ_FIELDS.len());
        }
        Ok(Self {
            values: fields.iter().take(CSQ_FIELDS.len()).map(|s| s.to_string()).collect(),
        })
    }

    /// Sub-field by name; `None` for unknown names
    pub fn get(&self, name: &str) -> Option<&str> {
        field_index(name).and_then(|i| self.values.get(i)).map(String::as_str)
    }

    fn at(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn allele(&self) -> &str {
        self.at(0)
    }

    pub fn gene(&self) -> &str {
        self.at(1)
    }

    pub fn feature(&self) -> &str {
        self.at(2)
    }

    pub fn feature_type(&self) -> &str {
        self.at(3)
    }

    /// Consequence terms, joined by `&` in the raw text
    pub fn consequences(&self) -> Vec<&str> {
        self.at(4).split('&').filter(|s| !s.is_empty()).collect()
    }

    pub fn symbol(&self) -> &str {
        self.at(13)
    }

    pub fn biotype(&self) -> &str {
        self.at(16)
    }

    pub fn sift(&self) -> &str {
        self.at(17)
    }

    pub fn polyphen(&self) -> &str {
        self.at(18)
    }

    pub fn hgvs_c(&self) -> &str {
        self.at(20)
    }

    pub fn hgvs_p(&self) -> &str {
        self.at(21)
    }

    pub fn clinical_significance(&self) -> &str {
        self.at(29)
    }

    /// All 35 sub-fields in layout order
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl fmt::Display for ConsequenceAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join("|"))
    }
}

/// Parse a whole `CSQ` INFO value
pub fn parse_list(value: &str) -> AnnotationResult<Vec<ConsequenceAnnotation>> {
    value
        .split(',')
        .filter(|e| !e.is_empty())
        .map(ConsequenceAnnotation::parse)
        .collect()
}
