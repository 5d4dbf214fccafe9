//! Per-sample genotypes and the HOM/HET/MISSING compression codec
//!
//! A sample is either an explicit FORMAT-ordered list of sub-fields
//! (`GT:DP:GQ` / `0/1:30:99`) or, for compressed bi-allelic sites, a code in
//! {-1, 0, 1, 2} recovered from three INFO index lists.

use std::fmt;
use std::sync::Arc;

use crate::core::codec::{join_list, parse_int, parse_int_list, split_list};
use crate::core::error::{RecordError, RecordResult};

/// INFO key listing alt-homozygous sample indices
pub const HOM_KEY: &str = "HOM";
/// INFO key listing heterozygous sample indices
pub const HET_KEY: &str = "HET";
/// INFO key listing sample indices with a missing genotype
pub const MISSING_KEY: &str = "MISSING";

/// Genotype code: number of ALT alleles carried, or [`CODE_MISSING`]
pub type GenotypeCode = i8;

pub const CODE_MISSING: GenotypeCode = -1;
pub const CODE_HOM_REF: GenotypeCode = 0;
pub const CODE_HET: GenotypeCode = 1;
pub const CODE_HOM_ALT: GenotypeCode = 2;

/// Missing allele marker inside [`VcfGenotype::alleles`]
pub const ALLELE_MISSING: i32 = -1;

/// One sample column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfGenotype {
    format: Arc<[String]>,
    values: Vec<String>,
}

impl VcfGenotype {
    /// Split a sample column using the record's FORMAT keys
    pub fn parse(format: Arc<[String]>, text: &str) -> Self {
        let values = text.split(':').map(str::to_string).collect();
        Self { format, values }
    }

    /// Sub-field for a FORMAT key; keys beyond the written values are absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.format
            .iter()
            .zip(self.values.iter())
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sub-fields in FORMAT order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// FORMAT keys this sample was parsed with
    pub fn format_keys(&self) -> &[String] {
        &self.format
    }

    /// Raw `GT` text
    pub fn gt(&self) -> Option<&str> {
        self.get("GT")
    }

    /// Allele indices from `GT`; `.` and unparsable entries are [`ALLELE_MISSING`]
    pub fn alleles(&self) -> Vec<i32> {
        match self.gt() {
            Some(gt) => gt
                .split(['/', '|'])
                .map(|a| parse_int(a).and_then(|n| i32::try_from(n).ok()).unwrap_or(ALLELE_MISSING))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn is_phased(&self) -> bool {
        self.gt().map(|gt| gt.contains('|')).unwrap_or(false)
    }

    pub fn ploidy(&self) -> usize {
        self.alleles().len()
    }

    /// No GT, or any allele missing
    pub fn is_missing(&self) -> bool {
        let alleles = self.alleles();
        alleles.is_empty() || alleles.iter().any(|a| *a < 0)
    }

    pub fn is_homozygous(&self) -> bool {
        let alleles = self.alleles();
        match alleles.first() {
            Some(first) if *first >= 0 => alleles.iter().all(|a| a == first),
            _ => false,
        }
    }

    /// Carries at least one ALT allele
    pub fn is_variant(&self) -> bool {
        self.alleles().iter().any(|a| *a > 0)
    }

    /// Highest allele index mentioned in GT
    pub fn max_allele(&self) -> Option<i32> {
        self.alleles().into_iter().max()
    }

    /// Three-state code: missing if any allele is missing, otherwise the
    /// number of non-reference alleles
    pub fn code(&self) -> GenotypeCode {
        let alleles = self.alleles();
        if alleles.is_empty() || alleles.iter().any(|a| *a < 0) {
            return CODE_MISSING;
        }
        let alt_count = alleles.iter().filter(|a| **a > 0).count();
        GenotypeCode::try_from(alt_count).unwrap_or(GenotypeCode::MAX)
    }

    /// Read depth: `DP`, or the sum of `AD` when DP is absent
    pub fn depth(&self) -> Option<i64> {
        if let Some(dp) = self.get("DP").and_then(parse_int) {
            return Some(dp);
        }
        let ad = parse_int_list(self.get("AD")?);
        if ad.is_empty() {
            return None;
        }
        Some(ad.into_iter().flatten().sum())
    }

    /// `GQ`
    pub fn genotype_quality(&self) -> Option<i64> {
        self.get("GQ").and_then(parse_int)
    }

    /// `PL` values
    pub fn likelihoods(&self) -> Vec<Option<i64>> {
        self.get("PL").map(parse_int_list).unwrap_or_default()
    }
}

impl fmt::Display for VcfGenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join(":"))
    }
}

/// GT text for a compressed code
pub fn uncompressed_gt(code: GenotypeCode) -> &'static str {
    match code {
        CODE_HOM_REF => "0/0",
        CODE_HET => "0/1",
        CODE_HOM_ALT => "1/1",
        _ => "./.",
    }
}

/// HOM/HET/MISSING index lists of a bi-allelic site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedGenotypes {
    pub hom: Vec<usize>,
    pub het: Vec<usize>,
    pub missing: Vec<usize>,
}

impl CompressedGenotypes {
    /// Compress per-sample codes
    ///
    /// Fails for any code outside {-1, 0, 1, 2}; those only occur at
    /// multi-allelic or polyploid sites and would be lost.
    pub fn compress(codes: &[GenotypeCode]) -> RecordResult<Self> {
        let mut out = Self::default();
        for (i, code) in codes.iter().enumerate() {
            match *code {
                CODE_HOM_REF => {}
                CODE_MISSING => out.missing.push(i),
                CODE_HET => out.het.push(i),
                CODE_HOM_ALT => out.hom.push(i),
                other => {
                    return Err(RecordError::Compression(format!(
                        "sample {} has genotype code {}, only -1, 0, 1 and 2 can be encoded",
                        i, other
                    )))
                }
            }
        }
        Ok(out)
    }

    /// Read the lists from raw INFO values; unparsable indices are dropped
    pub fn from_info(hom: Option<&str>, het: Option<&str>, missing: Option<&str>) -> Self {
        let indices = |value: Option<&str>| -> Vec<usize> {
            value
                .map(|v| {
                    split_list(v)
                        .into_iter()
                        .filter_map(|s| parse_int(s).and_then(|n| usize::try_from(n).ok()))
                        .collect()
                })
                .unwrap_or_default()
        };
        Self {
            hom: indices(hom),
            het: indices(het),
            missing: indices(missing),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hom.is_empty() && self.het.is_empty() && self.missing.is_empty()
    }

    /// Rebuild per-sample codes
    ///
    /// Lists are applied MISSING, then HET, then HOM, so an index listed more
    /// than once takes the last applied class. Such overlaps are logged; see
    /// [`CompressedGenotypes::overlaps`]. Indices past `sample_count` are ignored.
    pub fn decompress(&self, sample_count: usize) -> Vec<GenotypeCode> {
        let mut codes = vec![CODE_HOM_REF; sample_count];
        for (list, code) in [
            (&self.missing, CODE_MISSING),
            (&self.het, CODE_HET),
            (&self.hom, CODE_HOM_ALT),
        ] {
            for &i in list {
                match codes.get_mut(i) {
                    Some(slot) => *slot = code,
                    None => log::warn!("compressed genotype index {} out of range ({} samples)", i, sample_count),
                }
            }
        }
        let overlaps = self.overlaps();
        if !overlaps.is_empty() {
            log::warn!("sample indices listed in more than one of HOM/HET/MISSING: {:?}", overlaps);
        }
        codes
    }

    /// Indices that appear in more than one list, sorted
    pub fn overlaps(&self) -> Vec<usize> {
        let mut seen: Vec<(usize, u8)> = self
            .missing
            .iter()
            .map(|i| (*i, 0))
            .chain(self.het.iter().map(|i| (*i, 1)))
            .chain(self.hom.iter().map(|i| (*i, 2)))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        let mut out: Vec<usize> = seen.windows(2).filter(|w| w[0].0 == w[1].0).map(|w| w[0].0).collect();
        out.dedup();
        out
    }

    /// INFO entries to write: the non-empty lists, or a bare `MISSING`
    /// marker when every sample is reference-homozygous
    pub fn to_info_entries(&self) -> Vec<(&'static str, Option<String>)> {
        let mut entries = Vec::new();
        for (key, list) in [(HOM_KEY, &self.hom), (HET_KEY, &self.het), (MISSING_KEY, &self.missing)] {
            if !list.is_empty() {
                entries.push((key, Some(join_list(list))));
            }
        }
        if entries.is_empty() {
            entries.push((MISSING_KEY, None));
        }
        entries
    }
}
