//! DNA base utilities
//!
//! IUPAC ambiguity code expansion and sequence validation for allele text.

/// Expand a single-character allele into the concrete bases it stands for
///
/// Concrete bases (`A`, `C`, `G`, `T`) and the deleted-allele marker `*`
/// expand to themselves. Ambiguity codes expand to their member set.
/// `.` is handled by the caller since it stands for the reference.
///
/// # Arguments
/// * `code` - Upper-case allele character
///
/// # Returns
/// The member bases, or `None` for characters outside the IUPAC table
///
/// # Examples
/// ```
/// use fast_vcf::core::dna::iupac_expand;
///
/// assert_eq!(iupac_expand(b'N'), Some(&["A", "C", "G", "T"][..]));
/// assert_eq!(iupac_expand(b'Y'), Some(&["C", "T"][..]));
/// assert_eq!(iupac_expand(b'X'), None);
/// ```
pub fn iupac_expand(code: u8) -> Option<&'static [&'static str]> {
    let bases: &'static [&'static str] = match code {
        b'A' => &["A"],
        b'C' => &["C"],
        b'G' => &["G"],
        b'T' => &["T"],
        b'*' => &["*"],
        // aNy base
        b'N' => &["A", "C", "G", "T"],
        // not A / not C / not G / not T
        b'B' => &["C", "G", "T"],
        b'D' => &["A", "G", "T"],
        b'H' => &["A", "C", "T"],
        b'V' => &["A", "C", "G"],
        // two-base codes
        b'M' => &["A", "C"],
        b'R' => &["A", "G"],
        b'W' => &["A", "T"],
        b'S' => &["C", "G"],
        b'Y' => &["C", "T"],
        b'K' => &["G", "T"],
        _ => return None,
    };
    Some(bases)
}

/// Check whether a base is an ambiguity code (more than one member)
#[inline]
pub fn is_ambiguous(code: u8) -> bool {
    iupac_expand(code).map(|b| b.len() > 1).unwrap_or(false)
}

/// Check if a character is a valid DNA base (standard or IUPAC)
#[inline]
pub fn is_dna_base(base: u8) -> bool {
    matches!(
        base.to_ascii_uppercase(),
        b'A' | b'T' | b'G' | b'C' | b'R' | b'Y' | b'S' | b'W' | b'K' | b'M' | b'B' | b'V' | b'D' | b'H' | b'N'
    )
}

/// Check if a string is a literal DNA sequence
///
/// Symbolic alleles (`<DEL>`), breakends and `*` are not.
///
/// # Examples
/// ```
/// use fast_vcf::core::dna::is_dna;
///
/// assert!(is_dna("ATGC"));
/// assert!(is_dna("ATGCN")); // N is valid IUPAC
/// assert!(!is_dna("<DEL>"));
/// assert!(is_dna("")); // Empty is valid
/// ```
pub fn is_dna(seq: &str) -> bool {
    seq.bytes().all(is_dna_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_bases_expand_to_themselves() {
        for b in [b'A', b'C', b'G', b'T'] {
            let expanded = iupac_expand(b).unwrap();
            assert_eq!(expanded, &[(b as char).to_string().as_str()]);
        }
        assert_eq!(iupac_expand(b'*'), Some(&["*"][..]));
    }

    #[test]
    fn test_three_base_codes() {
        assert_eq!(iupac_expand(b'B'), Some(&["C", "G", "T"][..]));
        assert_eq!(iupac_expand(b'D'), Some(&["A", "G", "T"][..]));
        assert_eq!(iupac_expand(b'H'), Some(&["A", "C", "T"][..]));
        assert_eq!(iupac_expand(b'V'), Some(&["A", "C", "G"][..]));
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(iupac_expand(b'X'), None);
        assert_eq!(iupac_expand(b'.'), None);
        assert_eq!(iupac_expand(b'n'), None);
    }

    #[test]
    fn test_is_ambiguous() {
        assert!(is_ambiguous(b'N'));
        assert!(is_ambiguous(b'K'));
        assert!(!is_ambiguous(b'A'));
        assert!(!is_ambiguous(b'Q'));
    }

    #[test]
    fn test_is_dna() {
        assert!(is_dna("ATGC"));
        assert!(is_dna("atgc"));
        assert!(is_dna("RYSWKMBVDHN"));
        assert!(!is_dna("ATGCX"));
        assert!(!is_dna("A*"));
        assert!(!is_dna("<INS>"));
    }
}
