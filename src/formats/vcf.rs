//! VCF record parser
//!
//! A data line is split once with `memchr`; the INFO map, the per-sample
//! genotype list and the variant type are only built on first access and
//! then kept on the record. Most records are filtered on chromosome,
//! position or quality long before anyone looks at INFO or genotypes.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use memchr::memchr;

use crate::core::codec::{
    count_values, find_info_value, info_tokens, is_valid_info_key, parse_float, parse_int, parse_typed, TypedValue,
    ValueType,
};
use crate::core::error::{AnnotationResult, LineError, RecordError, RecordResult};
use crate::formats::consequence::{self, ConsequenceAnnotation};
use crate::formats::effect::{self, EffectAnnotation};
use crate::formats::genotype::{
    uncompressed_gt, CompressedGenotypes, GenotypeCode, VcfGenotype, HET_KEY, HOM_KEY, MISSING_KEY,
};
use crate::formats::header::{Cardinality, HeaderModel};
use crate::formats::lof::{self, LossOfFunction};
use crate::formats::variant::{self, GenotypeTagging, Variant, VariantType};

/// Minimum number of columns (CHROM, POS, ID, REF)
pub const MIN_COLUMNS: usize = 4;

/// Index of the FORMAT column
const FORMAT_COLUMN: usize = 8;

/// Index of the first sample column
const GENOTYPE_COLUMN: usize = 9;

/// One data line of a VCF file
#[derive(Debug, Clone)]
pub struct VcfRecord {
    header: Arc<HeaderModel>,
    chrom: String,
    /// 0-based
    start: u64,
    /// Exclusive
    end: u64,
    id: String,
    reference: String,
    alts: Vec<String>,
    qual: String,
    filter: String,
    info_text: String,
    format: Option<String>,
    /// Sample columns, tabs included
    genotype_block: Option<String>,

    info: OnceLock<HashMap<String, String>>,
    genotypes: OnceLock<Vec<VcfGenotype>>,
    variant_type: OnceLock<VariantType>,
}

/// A reportable problem found by [`VcfRecord::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub chrom: String,
    /// 1-based
    pub pos: u64,
    /// INFO or FORMAT key concerned
    pub key: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}:{} [{}] {}", self.chrom, self.pos, key, self.message),
            None => write!(f, "{}:{} {}", self.chrom, self.pos, self.message),
        }
    }
}

/// Split a line into at most ten columns; the last keeps every sample column
fn split_columns(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut columns = Vec::with_capacity(GENOTYPE_COLUMN + 1);
    let mut start = 0;
    while columns.len() < GENOTYPE_COLUMN {
        match memchr(b'\t', &bytes[start..]) {
            Some(offset) => {
                columns.push(&line[start..start + offset]);
                start += offset + 1;
            }
            None => break,
        }
    }
    columns.push(&line[start..]);
    columns
}

fn missing_to_empty(s: &str) -> &str {
    if s == "." {
        ""
    } else {
        s
    }
}

fn empty_to_missing(s: &str) -> &str {
    if s.is_empty() {
        "."
    } else {
        s
    }
}

impl VcfRecord {
    /// Parse a data line against a finalized header
    ///
    /// Only the fixed columns are decoded here. Columns after REF may be
    /// absent.
    ///
    /// # Errors
    ///
    /// Fewer than four columns, a non-numeric POS, a REF listing several
    /// alleles, or a symbolic allele whose `END` precedes POS.
    pub fn parse(line: &str, header: Arc<HeaderModel>) -> RecordResult<Self> {
        let columns = split_columns(line);
        if columns.len() < MIN_COLUMNS {
            return Err(RecordError::TooFewFields {
                expected: MIN_COLUMNS,
                found: columns.len(),
            });
        }
        let column = |i: usize| columns.get(i).copied().unwrap_or("");

        let chrom = column(0).trim().to_string();

        let pos_text = column(1).trim();
        let pos = parse_int(pos_text)
            .filter(|p| *p >= 0)
            .ok_or_else(|| RecordError::InvalidPosition(pos_text.to_string()))?;
        let start = (pos - 1).max(0) as u64;

        let reference = column(3).trim().to_ascii_uppercase();
        if reference.contains(',') {
            return Err(RecordError::MultipleRef(reference));
        }

        let alt_text = missing_to_empty(column(4).trim());
        let alts: Vec<String> = if alt_text.is_empty() {
            Vec::new()
        } else {
            alt_text.split(',').map(|a| a.trim().to_ascii_uppercase()).collect()
        };

        let info_text = missing_to_empty(column(7)).to_string();
        let end = Self::compute_end(start, pos, &reference, &alts, &info_text)?;

        let format = columns
            .get(FORMAT_COLUMN)
            .filter(|f| !f.is_empty())
            .map(|f| f.to_string());
        let genotype_block = columns.get(GENOTYPE_COLUMN).map(|g| g.to_string());

        Ok(Self {
            header,
            chrom,
            start,
            end,
            id: missing_to_empty(column(2)).to_string(),
            reference,
            alts,
            qual: missing_to_empty(column(5)).to_string(),
            filter: missing_to_empty(column(6)).to_string(),
            info_text,
            format,
            genotype_block,
            info: OnceLock::new(),
            genotypes: OnceLock::new(),
            variant_type: OnceLock::new(),
        })
    }

    /// Parse, attaching the line number and text to any error
    pub fn parse_at(line: &str, line_number: usize, header: Arc<HeaderModel>) -> Result<Self, LineError> {
        Self::parse(line, header).map_err(|e| e.at_line(line_number, line))
    }

    /// End of the REF span, or of the structural event for symbolic alleles
    ///
    /// `END` wins over `SVLEN`; `<INS>` never extends past REF.
    fn compute_end(start: u64, pos: i64, reference: &str, alts: &[String], info: &str) -> RecordResult<u64> {
        let end = start + reference.len().max(1) as u64;
        let symbolic = alts.iter().any(|a| a.starts_with('<'));
        if !symbolic || alts.iter().any(|a| a.starts_with("<INS")) {
            return Ok(end);
        }

        if let Some(info_end) = find_info_value(info, "END").and_then(parse_int) {
            if info_end < pos {
                return Err(RecordError::EndBeforePos {
                    end: info_end,
                    pos: pos as u64,
                });
            }
            return Ok((info_end as u64).max(start + 1));
        }

        let svlen = find_info_value(info, "SVLEN")
            .and_then(|v| v.split(',').next())
            .and_then(parse_int);
        match svlen {
            Some(len) => Ok(start + len.unsigned_abs().max(1)),
            None => Ok(end),
        }
    }

    pub fn header(&self) -> &Arc<HeaderModel> {
        &self.header
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// 1-based position
    pub fn pos(&self) -> u64 {
        self.start + 1
    }

    /// 0-based start
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Exclusive end
    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn alts(&self) -> &[String] {
        &self.alts
    }

    /// QUAL; `None` when missing or not a number
    pub fn quality(&self) -> Option<f64> {
        parse_float(&self.qual)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Passed all filters, or no filter applied
    pub fn is_pass(&self) -> bool {
        self.filter.is_empty() || self.filter == "PASS"
    }

    pub fn info_text(&self) -> &str {
        &self.info_text
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn format_keys(&self) -> Vec<&str> {
        self.format.as_deref().map(|f| f.split(':').collect()).unwrap_or_default()
    }

    pub fn genotype_block(&self) -> Option<&str> {
        self.genotype_block.as_deref()
    }

    // INFO

    /// INFO map, built on first call
    pub fn info_map(&self) -> &HashMap<String, String> {
        self.info.get_or_init(|| crate::core::codec::parse_info(&self.info_text))
    }

    pub fn is_info_parsed(&self) -> bool {
        self.info.get().is_some()
    }

    /// Raw INFO value; flags give `""`
    pub fn info(&self, key: &str) -> Option<&str> {
        self.info_map().get(key).map(String::as_str)
    }

    pub fn has_info(&self, key: &str) -> bool {
        self.info_map().contains_key(key)
    }

    pub fn info_int(&self, key: &str) -> Option<i64> {
        self.info(key).and_then(parse_int)
    }

    pub fn info_float(&self, key: &str) -> Option<f64> {
        self.info(key).and_then(parse_float)
    }

    pub fn info_flag(&self, key: &str) -> bool {
        self.has_info(key)
    }

    /// INFO value decoded with its declared type; undeclared keys are strings
    pub fn info_typed(&self, key: &str) -> Option<TypedValue> {
        let value = self.info(key)?;
        let value_type = self
            .header
            .lookup_info(key)
            .map(|d| d.value_type)
            .unwrap_or(ValueType::String);
        Some(parse_typed(value, value_type))
    }

    /// The element of a per-allele INFO value belonging to ALT `alt_index`
    ///
    /// `Number=A` values are indexed from the first ALT, `Number=R` values
    /// from REF. Other cardinalities return the whole value.
    pub fn info_for_allele(&self, key: &str, alt_index: usize) -> Option<&str> {
        let value = self.info(key)?;
        match self.header.lookup_info(key).map(|d| d.cardinality) {
            Some(Cardinality::OnePerAltAllele) => value.split(',').nth(alt_index),
            Some(Cardinality::OnePerAllele) => value.split(',').nth(alt_index + 1),
            _ => Some(value),
        }
    }

    /// Add or replace an INFO entry; `None` writes a flag
    ///
    /// Spaces, tabs, `;` and `=` in the value are replaced by `_`.
    pub fn add_info(&mut self, key: &str, value: Option<&str>) -> RecordResult<()> {
        if !is_valid_info_key(key) {
            return Err(RecordError::InvalidInfoKey(key.to_string()));
        }
        let token = match value {
            Some(v) => {
                let v: String = v
                    .chars()
                    .map(|c| if matches!(c, ' ' | '\t' | ';' | '=') { '_' } else { c })
                    .collect();
                format!("{}={}", key, v)
            }
            None => key.to_string(),
        };

        let mut tokens = Vec::new();
        let mut replaced = false;
        for (k, v) in info_tokens(&self.info_text) {
            if k == key {
                if !replaced {
                    tokens.push(token.clone());
                    replaced = true;
                }
            } else {
                tokens.push(render_token(k, v));
            }
        }
        if !replaced {
            tokens.push(token);
        }
        self.set_info_text(tokens.join(";"));
        Ok(())
    }

    /// Remove an INFO entry; returns whether it was present
    pub fn remove_info(&mut self, key: &str) -> bool {
        let mut found = false;
        let mut tokens = Vec::new();
        for (k, v) in info_tokens(&self.info_text) {
            if k == key {
                found = true;
            } else {
                tokens.push(render_token(k, v));
            }
        }
        if found {
            self.set_info_text(tokens.join(";"));
        }
        found
    }

    fn set_info_text(&mut self, text: String) {
        self.info_text = text;
        self.info = OnceLock::new();
    }

    // FILTER

    /// Append a filter name, replacing `PASS`
    pub fn add_filter(&mut self, name: &str) {
        if self.is_pass() {
            self.filter = name.to_string();
        } else if !self.filter.split(';').any(|f| f == name) {
            self.filter.push(';');
            self.filter.push_str(name);
        }
    }

    /// Remove a filter name; returns whether it was present
    pub fn remove_filter(&mut self, name: &str) -> bool {
        let kept: Vec<&str> = self.filter.split(';').filter(|f| !f.is_empty() && *f != name).collect();
        let found = kept.len() != self.filter.split(';').filter(|f| !f.is_empty()).count();
        if found {
            self.filter = kept.join(";");
        }
        found
    }

    // Genotypes

    /// Replace FORMAT and the sample columns
    pub fn set_genotype_block(&mut self, format: Option<String>, block: Option<String>) {
        self.format = format;
        self.genotype_block = block;
        self.genotypes = OnceLock::new();
    }

    /// Explicit per-sample genotypes, built on first call
    ///
    /// Empty for sites-only and compressed records.
    pub fn genotypes(&self) -> &[VcfGenotype] {
        self.genotypes.get_or_init(|| {
            let (Some(format), Some(block)) = (&self.format, &self.genotype_block) else {
                return Vec::new();
            };
            let keys: Arc<[String]> = format.split(':').map(str::to_string).collect();
            block.split('\t').map(|s| VcfGenotype::parse(Arc::clone(&keys), s)).collect()
        })
    }

    pub fn is_genotypes_parsed(&self) -> bool {
        self.genotypes.get().is_some()
    }

    /// Genotypes are carried by HOM/HET/MISSING instead of sample columns
    pub fn is_compressed(&self) -> bool {
        self.genotype_block.is_none()
            && self.header.sample_count() > 0
            && (self.has_info(HOM_KEY) || self.has_info(HET_KEY) || self.has_info(MISSING_KEY))
    }

    /// The HOM/HET/MISSING lists as written in INFO
    pub fn compressed_genotypes(&self) -> CompressedGenotypes {
        CompressedGenotypes::from_info(self.info(HOM_KEY), self.info(HET_KEY), self.info(MISSING_KEY))
    }

    /// Per-sample codes from either representation
    pub fn genotype_codes(&self) -> Vec<GenotypeCode> {
        if self.genotype_block.is_some() {
            self.genotypes().iter().map(VcfGenotype::code).collect()
        } else if self.is_compressed() {
            self.compressed_genotypes().decompress(self.header.sample_count())
        } else {
            Vec::new()
        }
    }

    /// Move explicit genotypes into HOM/HET/MISSING and drop the sample columns
    ///
    /// # Errors
    ///
    /// [`RecordError::Compression`] at multi-allelic sites or when a sample
    /// carries a code outside {-1, 0, 1, 2}.
    pub fn compress_genotypes(&mut self) -> RecordResult<()> {
        if self.alts.len() > 1 {
            return Err(RecordError::Compression(format!(
                "site has {} ALT alleles, only bi-allelic sites can be compressed",
                self.alts.len()
            )));
        }
        let compressed = CompressedGenotypes::compress(&self.genotype_codes())?;

        for key in [HOM_KEY, HET_KEY, MISSING_KEY] {
            self.remove_info(key);
        }
        for (key, value) in compressed.to_info_entries() {
            self.add_info(key, value.as_deref())?;
        }
        self.set_genotype_block(None, None);
        Ok(())
    }

    /// Rebuild a `GT` sample block from HOM/HET/MISSING
    ///
    /// Returns false when the record is not compressed.
    pub fn uncompress_genotypes(&mut self) -> bool {
        if !self.is_compressed() {
            return false;
        }
        let codes = self.genotype_codes();
        let block = codes.iter().map(|c| uncompressed_gt(*c)).collect::<Vec<_>>().join("\t");
        for key in [HOM_KEY, HET_KEY, MISSING_KEY] {
            self.remove_info(key);
        }
        self.set_genotype_block(Some("GT".to_string()), Some(block));
        true
    }

    // Alleles

    /// Record-level type across all ALTs, computed once
    pub fn variant_type(&self) -> VariantType {
        *self
            .variant_type
            .get_or_init(|| variant::classify(&self.reference, &self.alts))
    }

    pub fn is_variant(&self) -> bool {
        self.variant_type() != VariantType::Interval
    }

    pub fn is_snp(&self) -> bool {
        self.variant_type() == VariantType::Snp
    }

    pub fn is_mnp(&self) -> bool {
        self.variant_type() == VariantType::Mnp
    }

    pub fn is_ins(&self) -> bool {
        self.variant_type() == VariantType::Ins
    }

    pub fn is_del(&self) -> bool {
        self.variant_type() == VariantType::Del
    }

    pub fn is_multiallelic(&self) -> bool {
        self.alts.len() > 1
    }

    pub fn is_biallelic(&self) -> bool {
        self.alts.len() == 1
    }

    fn allele_counts(&self) -> (usize, usize) {
        let mut alt_count = 0;
        let mut total = 0;
        for code in self.genotype_codes() {
            if code >= 0 {
                alt_count += code as usize;
                total += 2;
            }
        }
        (alt_count, total)
    }

    /// Minor allele count over called diploid samples
    pub fn mac(&self) -> usize {
        let (alt_count, total) = self.allele_counts();
        alt_count.min(total.saturating_sub(alt_count))
    }

    /// Minor allele frequency; 0 when no sample is called
    pub fn maf(&self) -> f64 {
        let (alt_count, total) = self.allele_counts();
        if total == 0 {
            return 0.0;
        }
        alt_count.min(total.saturating_sub(alt_count)) as f64 / total as f64
    }

    /// Elementary variants for every ALT
    pub fn variants(&self, tagging: GenotypeTagging) -> RecordResult<Vec<Variant>> {
        variant::decompose(self, tagging)
    }

    // Annotations

    /// Effect annotations stored under `key` (e.g. `EFF`)
    pub fn effects(&self, key: &str) -> AnnotationResult<Vec<EffectAnnotation>> {
        self.info(key).map(effect::parse_list).unwrap_or_else(|| Ok(Vec::new()))
    }

    /// Consequence annotations stored under `key` (e.g. `CSQ`)
    pub fn consequences(&self, key: &str) -> AnnotationResult<Vec<ConsequenceAnnotation>> {
        self.info(key).map(consequence::parse_list).unwrap_or_else(|| Ok(Vec::new()))
    }

    /// LOF/NMD summaries stored under `key`
    pub fn loss_of_function(&self, key: &str) -> AnnotationResult<Vec<LossOfFunction>> {
        self.info(key).map(lof::parse_list).unwrap_or_else(|| Ok(Vec::new()))
    }

    // Validation

    /// Report schema problems without failing
    ///
    /// Checks REF, INFO keys and value counts against the header, GT allele
    /// numbers against the ALT count, the sample count, and the compressed
    /// index lists.
    pub fn check(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        let mut report = |key: Option<&str>, message: String| {
            out.push(Diagnostic {
                chrom: self.chrom.clone(),
                pos: self.pos(),
                key: key.map(str::to_string),
                message,
            })
        };

        if self.reference.contains(',') {
            report(None, format!("REF field has multiple entries: '{}'", self.reference));
        }

        let n_alts = self.alts.len();
        for (key, value) in info_tokens(&self.info_text) {
            let Some(decl) = self.header.lookup_info(key) else {
                report(Some(key), "INFO field has no header declaration".to_string());
                continue;
            };
            let value = value.unwrap_or("");
            if value.contains([' ', '\t', '=']) {
                report(Some(key), format!("INFO value '{}' contains illegal characters", value));
            }

            let count = count_values(value);
            if decl.value_type == ValueType::Flag {
                if count > 1 {
                    report(Some(key), format!("Flag INFO field has {} values", count));
                }
            } else if let Some(expected) = decl.cardinality.expected_count(n_alts) {
                if count != expected {
                    report(
                        Some(key),
                        format!(
                            "INFO field has {} values, expected {} (Number={}, {} ALT alleles)",
                            count, expected, decl.cardinality, n_alts
                        ),
                    );
                }
            }
        }

        if self.genotype_block.is_some() {
            let genotypes = self.genotypes();
            for (i, genotype) in genotypes.iter().enumerate() {
                if let Some(max) = genotype.max_allele() {
                    if max > 0 && max as usize > n_alts {
                        report(
                            Some("GT"),
                            format!(
                                "Genotype number {} has genotype number '{}', but there are only '{}' ALTs",
                                i + 1,
                                max,
                                n_alts
                            ),
                        );
                    }
                }
            }

            let samples = self.header.sample_count();
            if genotypes.len() != samples {
                report(
                    None,
                    format!("Found {} genotypes, header declares {} samples", genotypes.len(), samples),
                );
            }
        }

        if self.is_compressed() {
            let compressed = self.compressed_genotypes();
            let overlaps = compressed.overlaps();
            if !overlaps.is_empty() {
                report(
                    None,
                    format!("Sample indices listed in more than one of HOM/HET/MISSING: {:?}", overlaps),
                );
            }
            let samples = self.header.sample_count();
            for (key, list) in [(HOM_KEY, &compressed.hom), (HET_KEY, &compressed.het), (MISSING_KEY, &compressed.missing)] {
                if let Some(bad) = list.iter().find(|i| **i >= samples) {
                    report(Some(key), format!("Sample index {} out of range ({} samples)", bad, samples));
                }
            }
        }

        out
    }

    /// Data line text, `.` for empty columns
    pub fn to_line(&self) -> String {
        let alts = self.alts.join(",");
        let columns = [
            self.chrom.as_str(),
            &self.pos().to_string(),
            empty_to_missing(&self.id),
            empty_to_missing(&self.reference),
            empty_to_missing(&alts),
            empty_to_missing(&self.qual),
            empty_to_missing(&self.filter),
            empty_to_missing(&self.info_text),
        ]
        .join("\t");

        let mut out = String::with_capacity(columns.len() + self.genotype_block.as_ref().map_or(0, |g| g.len() + 16));
        out.push_str(&columns);
        if let Some(format) = &self.format {
            out.push('\t');
            out.push_str(format);
            if let Some(block) = &self.genotype_block {
                out.push('\t');
                out.push_str(block);
            }
        }
        out
    }
}

fn render_token(key: &str, value: Option<&str>) -> String {
    match value {
        Some(v) => format!("{}={}", key, v),
        None => key.to_string(),
    }
}

impl fmt::Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
