//! Variant decomposition
//!
//! Turns every REF/ALT pair of a record into elementary variants anchored at
//! the leftmost changed base: SNPs (one per IUPAC member), trimmed MNPs,
//! indels found by prefix/suffix alignment, and symbolic structural alleles.

use std::fmt;

use crate::core::align::{align_ref_alt, EditKind};
use crate::core::dna::iupac_expand;
use crate::core::error::{RecordError, RecordResult};
use crate::formats::vcf::VcfRecord;

/// Kind of change, for a whole record or one elementary variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantType {
    Snp,
    Mnp,
    Ins,
    Del,
    Mixed,
    /// Symbolic `<DUP>`
    Dup,
    /// Symbolic `<INV>`
    Inv,
    /// Symbolic `<CNV>`
    Cnv,
    /// Breakend (`A[2:100[` and friends)
    Bnd,
    /// No alternate: reference block or monomorphic site
    Interval,
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantType::Snp => "SNP",
            VariantType::Mnp => "MNP",
            VariantType::Ins => "INS",
            VariantType::Del => "DEL",
            VariantType::Mixed => "MIXED",
            VariantType::Dup => "DUP",
            VariantType::Inv => "INV",
            VariantType::Cnv => "CNV",
            VariantType::Bnd => "BND",
            VariantType::Interval => "INTERVAL",
        };
        f.write_str(name)
    }
}

/// How decomposed variants name the allele they came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenotypeTagging {
    /// 1-based ALT number, as written in GT (`1`, `2`, ...)
    #[default]
    Index,
    /// The ALT text itself
    Allele,
}

/// An elementary variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub chrom: String,
    /// 0-based start
    pub start: u64,
    /// Exclusive end; equals `start` for insertions
    pub end: u64,
    pub reference: String,
    pub alt: String,
    pub variant_type: VariantType,
    pub id: String,
    /// Allele tag, see [`GenotypeTagging`]
    pub genotype: String,
}

impl Variant {
    /// 1-based position
    pub fn pos(&self) -> u64 {
        self.start + 1
    }

    pub fn is_variant(&self) -> bool {
        self.variant_type != VariantType::Interval
    }

    /// Reference span covered
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}_{}/{}", self.chrom, self.pos(), self.reference, self.alt)
    }
}

/// Longest stretch of bases written into a structural allele
///
/// Spans past this length keep their coordinates but not their sequence.
pub const MAX_PADDING: usize = 1000;

/// ALT values that carry no change: `.`, `*`, gVCF markers, empty, or REF itself
pub fn is_non_variant_allele(reference: &str, alt: &str) -> bool {
    matches!(alt, "" | "." | "*" | "<NON_REF>" | "<*>") || alt == reference
}

/// Record-level variant type across all ALTs
///
/// Any `<DEL...>` allele makes the site a deletion. Otherwise only changing
/// ALTs are compared with REF: all the same length gives SNP/MNP, a shorter
/// one gives DEL, a longer one INS.
pub fn classify(reference: &str, alts: &[String]) -> VariantType {
    if alts.iter().any(|a| a.starts_with("<DEL")) {
        return VariantType::Del;
    }

    let lengths: Vec<usize> = alts
        .iter()
        .filter(|a| !is_non_variant_allele(reference, a))
        .map(|a| a.len())
        .collect();
    let (Some(&min_len), Some(&max_len)) = (lengths.iter().min(), lengths.iter().max()) else {
        return VariantType::Interval;
    };

    let ref_len = reference.len();
    if min_len == ref_len && max_len == ref_len {
        if ref_len == 1 {
            VariantType::Snp
        } else {
            VariantType::Mnp
        }
    } else if ref_len > min_len {
        VariantType::Del
    } else if ref_len < max_len {
        VariantType::Ins
    } else {
        VariantType::Mixed
    }
}

/// Decompose a record into elementary variants, one ALT at a time
///
/// A record without ALTs yields a single [`VariantType::Interval`] covering it.
///
/// # Errors
///
/// [`RecordError::UnknownIupacCode`] for a single-base ALT outside the IUPAC
/// table, [`RecordError::UnsupportedChange`] when an alignment cannot be
/// turned into an indel.
///
/// Record-level classification keeps to SNP/MNP/INS/DEL/MIXED/INTERVAL;
/// only elementary variants use the structural kinds.
pub fn decompose(record: &VcfRecord, tagging: GenotypeTagging) -> RecordResult<Vec<Variant>> {
    let mut variants = Vec::with_capacity(record.alts().len().max(1));
    if record.alts().is_empty() {
        variants.push(interval(record, String::new()));
        return Ok(variants);
    }

    for (i, alt) in record.alts().iter().enumerate() {
        let tag = match tagging {
            GenotypeTagging::Index => (i + 1).to_string(),
            GenotypeTagging::Allele => alt.clone(),
        };
        decompose_allele(record, alt, tag, &mut variants)?;
    }
    Ok(variants)
}

fn decompose_allele(record: &VcfRecord, alt: &str, tag: String, out: &mut Vec<Variant>) -> RecordResult<()> {
    let reference = record.reference();
    let start = record.start();
    let make = |start: u64, end: u64, reference: &str, alt: &str, variant_type: VariantType| Variant {
        chrom: record.chrom().to_string(),
        start,
        end,
        reference: reference.to_string(),
        alt: alt.to_string(),
        variant_type,
        id: record.id().to_string(),
        genotype: tag.clone(),
    };

    if is_non_variant_allele(reference, alt) {
        out.push(interval(record, tag));
        return Ok(());
    }

    if let Some(variant) = structural(record, alt, &tag) {
        out.push(variant);
        return Ok(());
    }

    if alt.contains(['[', ']']) {
        out.push(make(start, start + reference.len() as u64, reference, alt, VariantType::Bnd));
        return Ok(());
    }

    // Unknown symbolic alleles pass through untouched
    if alt.starts_with('<') {
        out.push(make(start, record.end(), reference, alt, VariantType::Mixed));
        return Ok(());
    }

    if alt.len() == reference.len() {
        let r = reference.as_bytes();
        let a = alt.as_bytes();
        let first = (0..r.len()).find(|&i| r[i] != a[i]);
        let last = (0..r.len()).rev().find(|&i| r[i] != a[i]);
        let (Some(first), Some(last)) = (first, last) else {
            out.push(interval(record, tag));
            return Ok(());
        };

        let new_ref = String::from_utf8_lossy(&r[first..=last]);
        let new_alt = String::from_utf8_lossy(&a[first..=last]);
        let anchor = start + first as u64;
        if new_alt.len() == 1 {
            let code = a[first];
            let bases = iupac_expand(code).ok_or(RecordError::UnknownIupacCode(code as char))?;
            for base in bases {
                out.push(make(anchor, anchor + 1, &new_ref, base, VariantType::Snp));
            }
        } else {
            out.push(make(anchor, start + last as u64 + 1, &new_ref, &new_alt, VariantType::Mnp));
        }
        return Ok(());
    }

    let aligned = align_ref_alt(reference, alt);
    let anchor = start + aligned.offset as u64;
    let unsupported = || RecordError::UnsupportedChange {
        reference: reference.to_string(),
        alt: alt.to_string(),
        alignment: aligned.alignment.clone(),
    };
    match aligned.kind {
        EditKind::Deletion => {
            let deleted = aligned.alignment.strip_prefix('-').ok_or_else(unsupported)?;
            out.push(make(anchor, anchor + deleted.len() as u64, deleted, "", VariantType::Del));
        }
        EditKind::Insertion => {
            let inserted = aligned.alignment.strip_prefix('+').ok_or_else(unsupported)?;
            out.push(make(anchor, anchor, "", inserted, VariantType::Ins));
        }
        EditKind::Mixed => {
            let ref_rest = String::from_utf8_lossy(&reference.as_bytes()[aligned.offset..]);
            let alt_rest = String::from_utf8_lossy(&alt.as_bytes()[aligned.offset..]);
            out.push(make(anchor, anchor + ref_rest.len() as u64, &ref_rest, &alt_rest, VariantType::Mixed));
        }
    }
    Ok(())
}

fn interval(record: &VcfRecord, tag: String) -> Variant {
    Variant {
        chrom: record.chrom().to_string(),
        start: record.start(),
        end: record.end(),
        reference: record.reference().to_string(),
        alt: String::new(),
        variant_type: VariantType::Interval,
        id: record.id().to_string(),
        genotype: tag,
    }
}

/// Extend `seq` with `N` up to `len` bases, capped at [`MAX_PADDING`]
fn pad_n(seq: &str, len: u64) -> String {
    let len = len.min(MAX_PADDING as u64) as usize;
    if seq.len() >= len {
        return seq.to_string();
    }
    let mut padded = String::with_capacity(len);
    padded.push_str(seq);
    padded.extend(std::iter::repeat('N').take(len - seq.len()));
    padded
}

/// `<DEL>`, `<DUP>`, `<INV>`, `<CNV>` and `<INS>` alleles
///
/// POS is the base before the event, so the event starts one base later
/// and runs to the record end. Its reference is REF without that anchor
/// base, padded with `N`. `<INS>` is an empty span right after the anchor,
/// like any other insertion.
fn structural(record: &VcfRecord, alt: &str, tag: &str) -> Option<Variant> {
    let kind = [
        ("<DEL", VariantType::Del),
        ("<DUP", VariantType::Dup),
        ("<INV", VariantType::Inv),
        ("<CNV", VariantType::Cnv),
        ("<INS", VariantType::Ins),
    ]
    .into_iter()
    .find(|(prefix, _)| alt.starts_with(prefix))
    .map(|(_, kind)| kind)?;

    let reference = record.reference();
    let end = record.end();
    let sv_start = (record.start() + 1).min(end.saturating_sub(1)).max(record.start());
    let sv_ref = pad_n(reference.get(1..).unwrap_or(""), end - sv_start);

    let (start, end, sv_ref, sv_alt) = match kind {
        VariantType::Del => (sv_start, end, sv_ref, String::new()),
        VariantType::Dup => {
            let doubled = format!("{0}{0}", sv_ref);
            (sv_start, end, sv_ref, doubled)
        }
        VariantType::Inv if sv_ref.len() > 1 => {
            let inverted = sv_ref.chars().rev().collect();
            (sv_start, end, sv_ref, inverted)
        }
        VariantType::Ins => {
            let anchor = record.start() + 1;
            (anchor, anchor, String::new(), alt.to_string())
        }
        _ => (sv_start, end, sv_ref, alt.to_string()),
    };

    Some(Variant {
        chrom: record.chrom().to_string(),
        start,
        end,
        reference: sv_ref,
        alt: sv_alt,
        variant_type: kind,
        id: record.id().to_string(),
        genotype: tag.to_string(),
    })
}
