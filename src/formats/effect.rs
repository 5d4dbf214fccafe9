//! Effect annotations (`EFF` and `ANN`)
//!
//! One comma-separated entry per affected feature. The older `EFF` form wraps
//! its sub-fields in parentheses after the effect name, e.g.
//! `NON_SYNONYMOUS_CODING(MODERATE|MISSENSE|Ggt/Agt|G45S|1223|GENE|protein_coding|CODING|TR1|2|1)`,
//! and comes in three layouts told apart by sub-field count. The newer `ANN`
//! form is a flat list of 16 pipe-separated sub-fields starting with the allele.

use std::fmt;
use std::str::FromStr;

use crate::core::codec::parse_int_safe;
use crate::core::error::{AnnotationError, AnnotationResult};

/// Sub-field names (with aliases) before the optional `AA_LEN`
const LEADING_FIELDS: &[&[&str]] = &[&["EFFECT"], &["IMPACT"], &["FUNCLASS"], &["CODON"], &["AA", "HGVS"]];

/// Sub-field names between `AA_LEN` and the optional genotype
const TRAILING_FIELDS: &[&[&str]] = &[&["GENE"], &["BIOTYPE"], &["CODING"], &["TRID"], &["RANK", "EXID"]];

/// `ANN` sub-field names, in order
const ANN_FIELDS: &[&[&str]] = &[
    &["ALLELE", "GT", "GENOTYPE"],
    &["EFFECT", "ANNOTATION"],
    &["IMPACT"],
    &["GENE"],
    &["GENEID"],
    &["FEATURE"],
    &["FEATUREID", "TRID"],
    &["BIOTYPE"],
    &["RANK", "EXID"],
    &["HGVS_C", "HGVS_DNA", "CODON"],
    &["HGVS_P", "HGVS_PROT", "HGVS", "AA"],
    &["POS_CDNA", "CDNA_POS", "LEN_CDNA", "CDNA_LEN"],
    &["POS_CDS", "CDS_POS", "LEN_CDS", "CDS_LEN"],
    &["POS_AA", "AA_POS", "LEN_AA", "AA_LEN"],
    &["DISTANCE"],
    &["ERRORS", "WARNINGS", "INFOS"],
];

/// Number of sub-fields in an `ANN` entry
pub const ANN_FIELD_COUNT: usize = 16;

/// Fewest parenthesised sub-fields an `EFF` entry can have
const MIN_EFF_FIELDS: usize = 9;

/// Layout generation of an effect entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectVersion {
    /// `EFFECT(IMPACT|FUNCLASS|CODON|AA|GENE|BIOTYPE|CODING|TRID|RANK)`
    Eff2,
    /// Adds `AA_LEN` after `AA`
    Eff3,
    /// Adds the genotype number after `RANK`
    Eff4,
    /// `ALLELE|ANNOTATION|IMPACT|GENE|GENEID|FEATURE|FEATUREID|BIOTYPE|RANK|HGVS_C|HGVS_P|CDNA|CDS|AA|DISTANCE|ERRORS`
    Ann,
}

impl EffectVersion {
    /// Classify an `EFF` entry from its number of sub-fields, effect
    /// included and any trailing `ERROR`/`WARNING` marker excluded
    ///
    /// The count stops at the closing `)`. Counting the empty piece after
    /// it as well, as a plain split on `(`, `|` and `)` does, shifts every
    /// threshold up by one: 11 or fewer, then 12, then 13 or more.
    ///
    /// # Examples
    /// ```
    /// use fast_vcf::formats::effect::EffectVersion;
    ///
    /// assert_eq!(EffectVersion::classify(10), EffectVersion::Eff2);
    /// assert_eq!(EffectVersion::classify(11), EffectVersion::Eff3);
    /// assert_eq!(EffectVersion::classify(12), EffectVersion::Eff4);
    /// ```
    pub fn classify(sub_fields: usize) -> Self {
        match sub_fields {
            0..=10 => EffectVersion::Eff2,
            11 => EffectVersion::Eff3,
            _ => EffectVersion::Eff4,
        }
    }

    /// Classify from a split that keeps the empty piece after `)`
    pub fn classify_with_trailing(pieces: usize) -> Self {
        Self::classify(pieces.saturating_sub(1))
    }

    pub fn is_ann(self) -> bool {
        self == EffectVersion::Ann
    }

    /// INFO key this layout is written under
    pub fn kind(self) -> &'static str {
        if self.is_ann() {
            "ANN"
        } else {
            "EFF"
        }
    }

    /// Position of a named sub-field (`EFF.GENE`, `ANN.HGVS_C`, ...) in this layout
    ///
    /// The `EFF.` or `ANN.` prefix is optional.
    pub fn field_index(self, name: &str) -> Option<usize> {
        let name = name
            .strip_prefix("EFF.")
            .or_else(|| name.strip_prefix("ANN."))
            .unwrap_or(name);
        if self.is_ann() {
            return ANN_FIELDS.iter().position(|aliases| aliases.contains(&name));
        }

        let mut names: Vec<&[&str]> = LEADING_FIELDS.to_vec();
        if self != EffectVersion::Eff2 {
            names.push(&["AA_LEN"]);
        }
        names.extend_from_slice(TRAILING_FIELDS);
        if self == EffectVersion::Eff4 {
            names.push(&["GT", "GENOTYPE_NUMBER", "GENOTYPE"]);
        }
        names.iter().position(|aliases| aliases.contains(&name))
    }
}

impl fmt::Display for EffectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectVersion::Eff2 => "EFF v2",
            EffectVersion::Eff3 => "EFF v3",
            EffectVersion::Eff4 => "EFF v4",
            EffectVersion::Ann => "ANN",
        };
        f.write_str(name)
    }
}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("unknown {} '{}'", stringify!($name), s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let text = match self {
                    $($name::$variant => $text,)+
                };
                f.write_str(text)
            }
        }
    };
}

text_enum!(
    /// Putative impact of an effect
    Impact {
        High => "HIGH",
        Moderate => "MODERATE",
        Low => "LOW",
        Modifier => "MODIFIER",
    }
);

text_enum!(
    /// Functional class of a coding change
    FunctionalClass {
        None => "NONE",
        Silent => "SILENT",
        Missense => "MISSENSE",
        Nonsense => "NONSENSE",
    }
);

text_enum!(
    /// Whether the affected transcript is protein coding
    Coding {
        Coding => "CODING",
        NonCoding => "NON_CODING",
    }
);

/// One parsed effect entry
///
/// Text sub-fields left empty in the input are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectAnnotation {
    pub version: EffectVersion,
    /// Effect name as written, e.g. `SPLICE_SITE_REGION+INTRON`
    pub effect: String,
    /// Text inside `[...]` after the effect name
    pub effect_details: String,
    pub impact: Option<Impact>,
    pub functional_class: Option<FunctionalClass>,
    pub codon: String,
    /// Amino acid change or HGVS protein notation
    pub aa: String,
    /// Protein length; 0 when absent or before [`EffectVersion::Eff3`]
    pub aa_len: i64,
    pub gene: String,
    pub biotype: String,
    pub coding: Option<Coding>,
    pub transcript_id: String,
    /// Exon or intron rank (`rank/total` in `ANN`)
    pub exon_id: String,
    /// Genotype number in [`EffectVersion::Eff4`], the allele in `ANN`
    pub genotype: String,
    pub errors_or_warnings: Option<String>,
    /// `ANN` only
    pub gene_id: String,
    /// `ANN` only, e.g. `transcript`
    pub feature_type: String,
    /// `ANN` only; copied to `transcript_id` for transcript features
    pub feature_id: String,
    /// `ANN` only, `pos/len` as written
    pub cdna_position: String,
    /// `ANN` only, `pos/len` as written
    pub cds_position: String,
    /// `ANN` only, `pos/len` as written; the length also fills `aa_len`
    pub aa_position: String,
    /// `ANN` only
    pub distance: String,
}

/// Split an entry into sub-fields
///
/// The effect field keeps its `[...]` detail even when the detail itself
/// contains `(` or `|`. A closing `)` leaves no trailing field.
fn split_entry(entry: &str) -> Vec<&str> {
    let detail_end = match (entry.find('['), entry.find('(')) {
        (Some(bracket), Some(paren)) if bracket < paren => entry[bracket..].find(']').map(|r| bracket + r + 1),
        _ => None,
    };

    let (head, body) = match detail_end {
        Some(end) => (Some(&entry[..end]), &entry[end..]),
        None => (None, entry),
    };

    let body = body.strip_suffix(')').unwrap_or(body);
    let mut fields: Vec<&str> = body.split(['(', '|', ')']).collect();
    if let Some(head) = head {
        if fields.first().map(|f| f.is_empty()).unwrap_or(false) {
            fields[0] = head;
        } else {
            fields.insert(0, head);
        }
    }
    fields
}

fn is_error_marker(field: &str) -> bool {
    field.starts_with("ERROR") || field.starts_with("WARNING")
}

/// Detect the layout of one entry
///
/// No `(` at all, or fewer than 9 sub-fields inside the parentheses, means
/// `ANN`.
pub fn detect_version(entry: &str) -> EffectVersion {
    let Some(open) = entry.find('(') else {
        return EffectVersion::Ann;
    };
    let is_eff = match entry.rfind(')') {
        Some(close) if close > open => entry[open + 1..close].split('|').count() >= MIN_EFF_FIELDS,
        _ => false,
    };
    if !is_eff {
        return EffectVersion::Ann;
    }

    let fields = split_entry(entry);
    let mut count = fields.len();
    if fields.last().map(|f| is_error_marker(f)).unwrap_or(false) {
        count -= 1;
    }
    EffectVersion::classify(count)
}

impl EffectAnnotation {
    /// Parse one entry, detecting its layout
    pub fn parse(entry: &str) -> AnnotationResult<Self> {
        Self::parse_with_version(entry, detect_version(entry))
    }

    /// Parse one entry with a known layout
    ///
    /// Missing trailing sub-fields keep their defaults; an impact,
    /// functional class or coding value outside its vocabulary fails.
    pub fn parse_with_version(entry: &str, version: EffectVersion) -> AnnotationResult<Self> {
        if version.is_ann() {
            return Self::parse_ann(entry);
        }

        let fields = split_entry(entry);
        let fail = |reason: String| AnnotationError::new(version.kind(), entry, format!("{} ({})", reason, version), &fields);

        let mut iter = fields.iter().copied();
        let mut next = || iter.next().unwrap_or("");

        let effect_field = next();
        let (effect, effect_details) = match effect_field.find('[') {
            Some(i) => {
                let details = &effect_field[i + 1..];
                (&effect_field[..i], details.strip_suffix(']').unwrap_or(details))
            }
            None => (effect_field, ""),
        };
        if effect.is_empty() {
            return Err(fail("empty effect name".to_string()));
        }

        let impact = optional(next()).map(str::parse::<Impact>).transpose().map_err(fail)?;
        let functional_class = optional(next())
            .map(str::parse::<FunctionalClass>)
            .transpose()
            .map_err(fail)?;
        let codon = next().to_string();
        let aa = next().to_string();
        let aa_len = if version == EffectVersion::Eff2 { 0 } else { parse_int_safe(next()) };
        let gene = next().to_string();
        let biotype = next().to_string();
        let coding = optional(next()).map(str::parse::<Coding>).transpose().map_err(fail)?;
        let transcript_id = next().to_string();
        let exon_id = next().to_string();
        let genotype = if version == EffectVersion::Eff4 { next().to_string() } else { String::new() };
        let errors_or_warnings = optional(next()).map(str::to_string);

        Ok(Self {
            version,
            effect: effect.to_string(),
            effect_details: effect_details.to_string(),
            impact,
            functional_class,
            codon,
            aa,
            aa_len,
            gene,
            biotype,
            coding,
            transcript_id,
            exon_id,
            genotype,
            errors_or_warnings,
            gene_id: String::new(),
            feature_type: String::new(),
            feature_id: String::new(),
            cdna_position: String::new(),
            cds_position: String::new(),
            aa_position: String::new(),
            distance: String::new(),
        })
    }

    fn parse_ann(entry: &str) -> AnnotationResult<Self> {
        let fields: Vec<&str> = entry.split('|').collect();
        let fail = |reason: String| AnnotationError::new("ANN", entry, reason, &fields);

        let mut iter = fields.iter().copied();
        let mut next = || iter.next().unwrap_or("");

        let genotype = next().to_string();
        let effect = next();
        if effect.is_empty() {
            return Err(fail("empty effect name".to_string()));
        }
        let impact = optional(next()).map(str::parse::<Impact>).transpose().map_err(fail)?;
        let gene = next().to_string();
        let gene_id = next().to_string();
        let feature_type = next().to_string();
        let feature_id = next().to_string();
        let biotype = next().to_string();
        let exon_id = next().to_string();
        let codon = next().to_string();
        let aa = next().to_string();
        let cdna_position = next().to_string();
        let cds_position = next().to_string();
        let aa_position = next().to_string();
        let distance = next().to_string();
        let errors_or_warnings = optional(next()).map(str::to_string);

        let transcript_id = if feature_type == "transcript" { feature_id.clone() } else { String::new() };
        let aa_len = aa_position.split_once('/').map(|(_, len)| parse_int_safe(len)).unwrap_or(0);

        Ok(Self {
            version: EffectVersion::Ann,
            effect: effect.to_string(),
            effect_details: String::new(),
            impact,
            functional_class: None,
            codon,
            aa,
            aa_len,
            gene,
            biotype,
            coding: None,
            transcript_id,
            exon_id,
            genotype,
            errors_or_warnings,
            gene_id,
            feature_type,
            feature_id,
            cdna_position,
            cds_position,
            aa_position,
            distance,
        })
    }

    /// Effect names joined with `+` (or `&`) in the effect field
    pub fn effect_types(&self) -> Vec<&str> {
        self.effect.split(['+', '&']).filter(|s| !s.is_empty()).collect()
    }
}

fn optional(field: &str) -> Option<&str> {
    if field.is_empty() {
        None
    } else {
        Some(field)
    }
}

impl fmt::Display for EffectAnnotation {
    /// Write the entry back in its own layout
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_ann() {
            return self.fmt_ann(f);
        }

        f.write_str(&self.effect)?;
        if !self.effect_details.is_empty() {
            write!(f, "[{}]", self.effect_details)?;
        }

        let opt = |v: Option<String>| v.unwrap_or_default();
        let mut fields = vec![
            opt(self.impact.map(|i| i.to_string())),
            opt(self.functional_class.map(|c| c.to_string())),
            self.codon.clone(),
            self.aa.clone(),
        ];
        if self.version != EffectVersion::Eff2 {
            fields.push(if self.aa_len > 0 { self.aa_len.to_string() } else { String::new() });
        }
        fields.extend([
            self.gene.clone(),
            self.biotype.clone(),
            opt(self.coding.map(|c| c.to_string())),
            self.transcript_id.clone(),
            self.exon_id.clone(),
        ]);
        if self.version == EffectVersion::Eff4 {
            fields.push(self.genotype.clone());
        }
        if let Some(err) = &self.errors_or_warnings {
            fields.push(err.clone());
        }
        write!(f, "({})", fields.join("|"))
    }
}

impl EffectAnnotation {
    fn fmt_ann(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let impact = self.impact.map(|i| i.to_string()).unwrap_or_default();
        let fields: [&str; ANN_FIELD_COUNT] = [
            &self.genotype,
            &self.effect,
            &impact,
            &self.gene,
            &self.gene_id,
            &self.feature_type,
            &self.feature_id,
            &self.biotype,
            &self.exon_id,
            &self.codon,
            &self.aa,
            &self.cdna_position,
            &self.cds_position,
            &self.aa_position,
            &self.distance,
            self.errors_or_warnings.as_deref().unwrap_or(""),
        ];
        f.write_str(&fields.join("|"))
    }
}

/// Parse a whole `EFF` or `ANN` INFO value (comma-separated entries)
pub fn parse_list(value: &str) -> AnnotationResult<Vec<EffectAnnotation>> {
    value
        .split(',')
        .filter(|e| !e.is_empty())
        .map(EffectAnnotation::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EFF2: &str = "NON_SYNONYMOUS_CODING(MODERATE|MISSENSE|Ggt/Agt|G45S|GENE1|protein_coding|CODING|TR1|2)";
    const EFF3: &str = "NON_SYNONYMOUS_CODING(MODERATE|MISSENSE|Ggt/Agt|G45S|1223|GENE1|protein_coding|CODING|TR1|2)";
    const EFF4: &str = "NON_SYNONYMOUS_CODING(MODERATE|MISSENSE|Ggt/Agt|G45S|1223|GENE1|protein_coding|CODING|TR1|2|1)";

    #[test]
    fn test_version_detection() {
        assert_eq!(detect_version(EFF2), EffectVersion::Eff2);
        assert_eq!(detect_version(EFF3), EffectVersion::Eff3);
        assert_eq!(detect_version(EFF4), EffectVersion::Eff4);
    }

    #[test]
    fn test_error_marker_not_counted() {
        let entry = "INTRON(MODIFIER||||GENE1|protein_coding|CODING|TR1|2|WARNING_TRANSCRIPT_INCOMPLETE)";
        assert_eq!(detect_version(entry), EffectVersion::Eff2);
        let eff = EffectAnnotation::parse(entry).unwrap();
        assert_eq!(eff.errors_or_warnings.as_deref(), Some("WARNING_TRANSCRIPT_INCOMPLETE"));
    }

    #[test]
    fn test_parse_eff4() {
        let eff = EffectAnnotation::parse(EFF4).unwrap();
        assert_eq!(eff.effect, "NON_SYNONYMOUS_CODING");
        assert_eq!(eff.impact, Some(Impact::Moderate));
        assert_eq!(eff.functional_class, Some(FunctionalClass::Missense));
        assert_eq!(eff.codon, "Ggt/Agt");
        assert_eq!(eff.aa, "G45S");
        assert_eq!(eff.aa_len, 1223);
        assert_eq!(eff.gene, "GENE1");
        assert_eq!(eff.coding, Some(Coding::Coding));
        assert_eq!(eff.transcript_id, "TR1");
        assert_eq!(eff.exon_id, "2");
        assert_eq!(eff.genotype, "1");
        assert_eq!(eff.errors_or_warnings, None);
    }

    #[test]
    fn test_parse_eff2_defaults() {
        let eff = EffectAnnotation::parse(EFF2).unwrap();
        assert_eq!(eff.version, EffectVersion::Eff2);
        assert_eq!(eff.aa_len, 0);
        assert_eq!(eff.gene, "GENE1");
        assert_eq!(eff.genotype, "");
    }

    #[test]
    fn test_effect_details_with_separators() {
        let entry = "REGULATION[MotifX:(a|b)](MODIFIER||||||||||1)";
        let eff = EffectAnnotation::parse(entry).unwrap();
        assert_eq!(eff.effect, "REGULATION");
        assert_eq!(eff.effect_details, "MotifX:(a|b)");
        assert_eq!(eff.impact, Some(Impact::Modifier));
        assert_eq!(eff.version, EffectVersion::Eff4);
    }

    #[test]
    fn test_effect_types() {
        let eff = EffectAnnotation::parse("SPLICE_SITE_REGION+INTRON(LOW|||||G|b|CODING|T|1|1)").unwrap();
        assert_eq!(eff.effect_types(), vec!["SPLICE_SITE_REGION", "INTRON"]);
    }

    #[test]
    fn test_short_entry_tolerated() {
        let eff = EffectAnnotation::parse_with_version("UPSTREAM(MODIFIER)", EffectVersion::Eff2).unwrap();
        assert_eq!(eff.impact, Some(Impact::Modifier));
        assert_eq!(eff.gene, "");
        assert_eq!(eff.coding, None);
    }

    #[test]
    fn test_bad_impact_dumps_fields() {
        let err = EffectAnnotation::parse("INTRON(SEVERE||||GENE1|protein_coding|CODING|TR1|2)").unwrap_err();
        assert_eq!(err.kind, "EFF");
        let msg = err.to_string();
        assert!(msg.contains("SEVERE"));
        assert!(msg.contains("\t0 : 'INTRON'"));
        assert!(msg.contains("\t5 : 'GENE1'"));
    }

    #[test]
    fn test_round_trip_text() {
        for entry in [EFF2, EFF3, EFF4] {
            assert_eq!(EffectAnnotation::parse(entry).unwrap().to_string(), entry);
        }
    }

    #[test]
    fn test_field_index() {
        assert_eq!(EffectVersion::Eff2.field_index("EFF.GENE"), Some(5));
        assert_eq!(EffectVersion::Eff3.field_index("EFF.GENE"), Some(6));
        assert_eq!(EffectVersion::Eff4.field_index("EFF.GT"), Some(11));
        assert_eq!(EffectVersion::Eff3.field_index("EFF.GT"), None);
        assert_eq!(EffectVersion::Eff2.field_index("EFF.AA_LEN"), None);
        assert_eq!(EffectVersion::Eff4.field_index("EFF.HGVS"), Some(4));
        assert_eq!(EffectVersion::Eff4.field_index("GENE"), Some(6));
    }

    const ANN: &str = "G|missense_variant|MODERATE|GENE1|ENSG0001|transcript|ENST0001|protein_coding|2/10|c.133G>A|p.Gly45Ser|150/2000|133/1800|45/599||";

    #[test]
    fn test_ann_detection() {
        assert_eq!(detect_version(ANN), EffectVersion::Ann);
        // parentheses inside HGVS do not make an EFF entry
        assert_eq!(detect_version("A|intron_variant|MODIFIER|G|ID|transcript|T1|pc|1/2|c.1-2(?)||||||"), EffectVersion::Ann);
        assert_eq!(detect_version("UPSTREAM(MODIFIER)"), EffectVersion::Ann);
        assert_eq!(detect_version(EFF2), EffectVersion::Eff2);
    }

    #[test]
    fn test_parse_ann() {
        let ann = EffectAnnotation::parse(ANN).unwrap();
        assert_eq!(ann.version, EffectVersion::Ann);
        assert_eq!(ann.genotype, "G");
        assert_eq!(ann.effect, "missense_variant");
        assert_eq!(ann.impact, Some(Impact::Moderate));
        assert_eq!(ann.gene, "GENE1");
        assert_eq!(ann.gene_id, "ENSG0001");
        assert_eq!(ann.transcript_id, "ENST0001");
        assert_eq!(ann.exon_id, "2/10");
        assert_eq!(ann.codon, "c.133G>A");
        assert_eq!(ann.aa, "p.Gly45Ser");
        assert_eq!(ann.aa_len, 599);
        assert_eq!(ann.errors_or_warnings, None);
        assert_eq!(ann.to_string(), ANN);
    }

    #[test]
    fn test_ann_effect_types_and_errors() {
        let entry = "T|splice_region_variant&intron_variant|LOW|G|ID|transcript|T1|pc|3/4|c.10+5G>T||||||WARNING_TRANSCRIPT_INCOMPLETE";
        let ann = EffectAnnotation::parse(entry).unwrap();
        assert_eq!(ann.effect_types(), vec!["splice_region_variant", "intron_variant"]);
        assert_eq!(ann.errors_or_warnings.as_deref(), Some("WARNING_TRANSCRIPT_INCOMPLETE"));
        assert_eq!(ann.to_string(), entry);
    }

    #[test]
    fn test_ann_non_transcript_feature() {
        let ann = EffectAnnotation::parse("A|intergenic_region|MODIFIER|G1-G2|ID1-ID2|intergenic_region|ID1-ID2|||n.100A>G||||||").unwrap();
        assert_eq!(ann.feature_id, "ID1-ID2");
        assert_eq!(ann.transcript_id, "");
        assert_eq!(ann.aa_len, 0);
    }

    #[test]
    fn test_ann_bad_impact() {
        let err = EffectAnnotation::parse("A|x|SEVERE|G||||||||||||").unwrap_err();
        assert_eq!(err.kind, "ANN");
        assert!(err.to_string().contains("SEVERE"));
    }

    #[test]
    fn test_ann_field_index() {
        assert_eq!(EffectVersion::Ann.field_index("ANN.ALLELE"), Some(0));
        assert_eq!(EffectVersion::Ann.field_index("ANN.GENE"), Some(3));
        assert_eq!(EffectVersion::Ann.field_index("ANN.HGVS_C"), Some(9));
        assert_eq!(EffectVersion::Ann.field_index("AA_LEN"), Some(13));
        assert_eq!(EffectVersion::Ann.field_index("ANN.ERRORS"), Some(ANN_FIELD_COUNT - 1));
        assert_eq!(EffectVersion::Ann.field_index("ANN.FUNCLASS"), None);
    }

    #[test]
    fn test_classify_counting_trailing_piece() {
        // pieces from splitting on '(', '|' and ')' including the empty one after ')'
        for (entry, version) in [(EFF2, EffectVersion::Eff2), (EFF3, EffectVersion::Eff3), (EFF4, EffectVersion::Eff4)] {
            let pieces = entry.split(['(', '|', ')']).count();
            assert_eq!(EffectVersion::classify_with_trailing(pieces), version);
        }
        assert_eq!(EffectVersion::classify_with_trailing(11), EffectVersion::Eff2);
        assert_eq!(EffectVersion::classify_with_trailing(12), EffectVersion::Eff3);
        assert_eq!(EffectVersion::classify_with_trailing(13), EffectVersion::Eff4);
    }

    #[test]
    fn test_parse_list() {
        let list = parse_list(&format!("{},{}", EFF4, "INTRON(MODIFIER||||||||T2|3|1)")).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].transcript_id, "T2");
    }
}
