//! REF/ALT alignment for length-changing alleles.
//!
//! Finds the minimal edit between a reference allele and an alternate allele
//! of different length by trimming the shared prefix and suffix. The result is
//! expressed the way variant records write indels: `-XYZ` for bases removed
//! from the reference, `+XYZ` for inserted bases, with an offset from the
//! start of the reference allele.

/// Kind of edit found between REF and ALT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Bases removed from the reference.
    Deletion,
    /// Bases added to the reference.
    Insertion,
    /// Both sides change after the shared prefix.
    Mixed,
}

/// Outcome of aligning one ALT against REF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefAltAlignment {
    /// Edit kind.
    pub kind: EditKind,
    /// Length of the shared prefix (0-based offset into REF).
    pub offset: usize,
    /// `-` or `+` followed by the removed/inserted bases; for
    /// [`EditKind::Mixed`] this is `=` followed by the changed ALT bases.
    pub alignment: String,
}

/// Align `alt` against `reference`.
///
/// # Arguments
///
/// * `reference` - The reference allele
/// * `alt` - The alternate allele, of different length
///
/// # Examples
///
/// ```
/// use fast_vcf::core::align::{align_ref_alt, EditKind};
///
/// let del = align_ref_alt("TTTGTT", "TTT");
/// assert_eq!(del.kind, EditKind::Deletion);
/// assert_eq!(del.alignment, "-GTT");
/// assert_eq!(del.offset, 3);
///
/// let ins = align_ref_alt("G", "GCG");
/// assert_eq!(ins.alignment, "+CG");
/// assert_eq!(ins.offset, 1);
/// ```
pub fn align_ref_alt(reference: &str, alt: &str) -> RefAltAlignment {
    let ref_bytes = reference.as_bytes();
    let alt_bytes = alt.as_bytes();

    let prefix = common_prefix(ref_bytes, alt_bytes);
    let suffix = common_suffix(&ref_bytes[prefix..], &alt_bytes[prefix..]);

    let ref_diff = String::from_utf8_lossy(&ref_bytes[prefix..ref_bytes.len() - suffix]);
    let alt_diff = String::from_utf8_lossy(&alt_bytes[prefix..alt_bytes.len() - suffix]);

    if alt_diff.is_empty() && !ref_diff.is_empty() {
        RefAltAlignment {
            kind: EditKind::Deletion,
            offset: prefix,
            alignment: format!("-{}", ref_diff),
        }
    } else if ref_diff.is_empty() && !alt_diff.is_empty() {
        RefAltAlignment {
            kind: EditKind::Insertion,
            offset: prefix,
            alignment: format!("+{}", alt_diff),
        }
    } else {
        RefAltAlignment {
            kind: EditKind::Mixed,
            offset: prefix,
            alignment: format!("={}", alt_diff),
        }
    }
}

/// Length of the longest shared prefix.
fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Length of the longest shared suffix.
fn common_suffix(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
