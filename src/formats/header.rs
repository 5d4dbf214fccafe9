//! VCF header model
//!
//! Schema registry for INFO/FORMAT declarations, the sample list and
//! pedigree lines. A header is built from meta-lines before any record is
//! parsed and is then shared read-only (`Arc<HeaderModel>`) by every record.
//!
//! # Header layout
//!
//! ```text
//! ##fileformat=VCFv4.1
//! ##INFO=<ID=AC,Number=A,Type=Integer,Description="Allele count">
//! ##FORMAT=<ID=GT,Number=1,Type=String,Description="Genotype">
//! ##PEDIGREE=<Derived=tumor,Original=normal>
//! #CHROM  POS  ID  REF  ALT  QUAL  FILTER  INFO  FORMAT  normal  tumor
//! ```
//!
//! The title (`#CHROM`) line is always written last. Lines added after it has
//! been seen still land before it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::core::codec::ValueType;
use crate::core::error::{HeaderError, HeaderResult};

/// Fixed columns of the title line
pub const TITLE_COLUMNS: [&str; 8] = ["#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO"];

/// Index of the first sample column
pub const FIRST_SAMPLE_COLUMN: usize = 9;

const INFO_PREFIX: &str = "##INFO=";
const FORMAT_PREFIX: &str = "##FORMAT=";
const PEDIGREE_PREFIX: &str = "##PEDIGREE=";

/// Whether a field is site-level (INFO) or per-sample (FORMAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Info,
    Format,
}

impl Scope {
    fn prefix(self) -> &'static str {
        match self {
            Scope::Info => INFO_PREFIX,
            Scope::Format => FORMAT_PREFIX,
        }
    }
}

/// Declared number of values (`Number=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// `Number=n`
    Fixed(usize),
    /// `Number=.`
    Unbounded,
    /// `Number=A`: one value per ALT allele
    OnePerAltAllele,
    /// `Number=R`: one value per allele, reference included
    OnePerAllele,
    /// `Number=G`: one value per possible genotype
    OnePerGenotype,
}

impl Cardinality {
    /// Number of values a record with `n_alts` ALT alleles must carry
    ///
    /// `None` for [`Cardinality::Unbounded`]. Genotype counts assume diploid
    /// samples.
    pub fn expected_count(&self, n_alts: usize) -> Option<usize> {
        match *self {
            Cardinality::Fixed(n) => Some(n),
            Cardinality::Unbounded => None,
            Cardinality::OnePerAltAllele => Some(n_alts),
            Cardinality::OnePerAllele => Some(n_alts + 1),
            Cardinality::OnePerGenotype => {
                let alleles = n_alts + 1;
                Some(alleles * (alleles + 1) / 2)
            }
        }
    }
}

impl FromStr for Cardinality {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "." => Ok(Cardinality::Unbounded),
            "A" => Ok(Cardinality::OnePerAltAllele),
            "R" => Ok(Cardinality::OnePerAllele),
            "G" => Ok(Cardinality::OnePerGenotype),
            _ => s
                .parse::<usize>()
                .map(Cardinality::Fixed)
                .map_err(|_| HeaderError::InvalidCardinality(s.to_string())),
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Fixed(n) => write!(f, "{}", n),
            Cardinality::Unbounded => f.write_str("."),
            Cardinality::OnePerAltAllele => f.write_str("A"),
            Cardinality::OnePerAllele => f.write_str("R"),
            Cardinality::OnePerGenotype => f.write_str("G"),
        }
    }
}

/// One `##INFO` or `##FORMAT` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub id: String,
    pub value_type: ValueType,
    pub cardinality: Cardinality,
    pub description: String,
    /// Pre-seeded standard field, not backed by a header line
    pub is_builtin: bool,
    pub scope: Scope,
}

impl FieldDeclaration {
    pub fn new(
        scope: Scope,
        id: impl Into<String>,
        cardinality: Cardinality,
        value_type: ValueType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            value_type,
            cardinality,
            description: description.into(),
            is_builtin: false,
            scope,
        }
    }

    /// Shorthand for an INFO declaration
    pub fn info(id: impl Into<String>, cardinality: Cardinality, value_type: ValueType, description: impl Into<String>) -> Self {
        Self::new(Scope::Info, id, cardinality, value_type, description)
    }

    /// Shorthand for a FORMAT declaration
    pub fn format(id: impl Into<String>, cardinality: Cardinality, value_type: ValueType, description: impl Into<String>) -> Self {
        Self::new(Scope::Format, id, cardinality, value_type, description)
    }

    /// Parse a `##INFO=<...>` or `##FORMAT=<...>` line
    ///
    /// Extra keys (`Source`, `Version`) are accepted and ignored. A missing
    /// `Number` reads as unbounded, a missing `Type` as String.
    pub fn parse(line: &str) -> HeaderResult<Self> {
        let line = line.trim_end();
        let (scope, body) = if let Some(rest) = line.strip_prefix(INFO_PREFIX) {
            (Scope::Info, rest)
        } else if let Some(rest) = line.strip_prefix(FORMAT_PREFIX) {
            (Scope::Format, rest)
        } else {
            return Err(malformed(line, "expected ##INFO= or ##FORMAT="));
        };

        let fields = parse_meta_fields(body).ok_or_else(|| malformed(line, "expected <KEY=VALUE,...>"))?;
        let get = |key: &str| {
            fields
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_str())
        };

        let id = get("ID").filter(|id| !id.is_empty()).ok_or_else(|| malformed(line, "missing ID"))?;
        let cardinality = match get("Number") {
            Some(n) => n.parse()?,
            None => Cardinality::Unbounded,
        };
        let value_type = match get("Type") {
            Some(t) => t.parse()?,
            None => ValueType::String,
        };
        let description = get("Description").unwrap_or("");

        Ok(Self::new(scope, id, cardinality, value_type, description))
    }

    /// Serialize back to header-line grammar
    pub fn to_meta_line(&self) -> String {
        format!(
            "{}<ID={},Number={},Type={},Description=\"{}\">",
            self.scope.prefix(),
            self.id,
            self.cardinality,
            self.value_type,
            self.description.replace('\\', "\\\\").replace('"', "\\\"")
        )
    }
}

impl fmt::Display for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_meta_line())
    }
}

fn malformed(line: &str, message: &str) -> HeaderError {
    HeaderError::MalformedLine {
        line: line.to_string(),
        message: message.to_string(),
    }
}

/// Split `<K=V,K="quoted, text",...>` into pairs
///
/// Quoted values may contain commas, `\"` and `\\`. Returns None when the angle
/// brackets or a quote are unbalanced.
fn parse_meta_fields(body: &str) -> Option<Vec<(String, String)>> {
    let inner = body.trim().strip_prefix('<')?.strip_suffix('>')?;

    let mut fields = Vec::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut in_value = false;
    let mut in_quotes = false;
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    value.push(next);
                }
            }
            '"' if in_value => in_quotes = !in_quotes,
            '=' if !in_value => in_value = true,
            ',' if !in_quotes => {
                fields.push((std::mem::take(&mut key), std::mem::take(&mut value)));
                in_value = false;
            }
            c if in_value => value.push(c),
            c => key.push(c),
        }
    }
    if in_quotes {
        return None;
    }
    if !key.is_empty() || !value.is_empty() {
        fields.push((key, value));
    }
    Some(fields)
}

/// A resolved `##PEDIGREE` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedigreeEntry {
    /// Derived sample (e.g. tumor) and the sample it derives from
    Derived { original: usize, derived: usize },
    /// Parent/child trio
    Trio { father: usize, mother: usize, child: usize },
}

/// VCF header: declarations, meta-lines and samples
#[derive(Debug, Clone)]
pub struct HeaderModel {
    /// Meta-lines in physical order, title excluded
    lines: Vec<String>,
    title: Option<String>,
    info: HashMap<String, FieldDeclaration>,
    format: HashMap<String, FieldDeclaration>,
    sample_names: Vec<String>,
    sample_index: HashMap<String, usize>,
    version: u64,
}

impl Default for HeaderModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderModel {
    /// Empty header seeded with the standard built-in declarations
    pub fn new() -> Self {
        let mut info = HashMap::new();
        for (id, cardinality, value_type, description) in BUILTIN_INFO {
            let mut decl = FieldDeclaration::info(*id, *cardinality, *value_type, *description);
            decl.is_builtin = true;
            info.insert(id.to_string(), decl);
        }
        for prefix in ["LOF", "NMD"] {
            for (field, cardinality, value_type, description) in BUILTIN_LOF_FIELDS {
                let id = format!("{}.{}", prefix, field);
                let mut decl = FieldDeclaration::info(id.clone(), *cardinality, *value_type, *description);
                decl.is_builtin = true;
                info.insert(id, decl);
            }
        }

        let mut format = HashMap::new();
        for (id, cardinality, value_type, description) in BUILTIN_FORMAT {
            let mut decl = FieldDeclaration::format(*id, *cardinality, *value_type, *description);
            decl.is_builtin = true;
            format.insert(id.to_string(), decl);
        }

        Self {
            lines: Vec::new(),
            title: None,
            info,
            format,
            sample_names: Vec::new(),
            sample_index: HashMap::new(),
            version: 0,
        }
    }

    /// Build a header from its text, one meta-line per line
    pub fn from_lines<'a, I>(lines: I) -> HeaderResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut header = Self::new();
        for line in lines {
            if !line.trim().is_empty() {
                header.add_line(line)?;
            }
        }
        Ok(header)
    }

    /// Number of mutations applied since creation
    ///
    /// Views derived from the header (sample lists, lookups) taken at an
    /// older version must be re-fetched.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Append a meta-line or set the title line
    ///
    /// `##INFO`/`##FORMAT` lines also register (or replace) a declaration.
    /// Exact duplicates are skipped. Lines always land before the title.
    pub fn add_line(&mut self, line: &str) -> HeaderResult<()> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.starts_with("#CHROM") {
            self.set_title(line);
            return Ok(());
        }

        if line.starts_with(INFO_PREFIX) || line.starts_with(FORMAT_PREFIX) {
            let decl = FieldDeclaration::parse(line)?;
            self.replace_declaration(decl, line.to_string());
            return Ok(());
        }

        if self.lines.iter().any(|l| l == line) {
            log::debug!("skipping duplicate header line '{}'", line);
            return Ok(());
        }
        self.lines.push(line.to_string());
        self.version += 1;
        Ok(())
    }

    /// Remove an exact meta-line; returns whether it was present
    pub fn remove_line(&mut self, line: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l != line);
        let removed = self.lines.len() != before;
        if removed {
            self.version += 1;
        }
        removed
    }

    /// Insert or replace an INFO declaration
    pub fn declare_info(&mut self, mut decl: FieldDeclaration) {
        decl.scope = Scope::Info;
        let line = decl.to_meta_line();
        self.replace_declaration(decl, line);
    }

    /// Insert or replace a FORMAT declaration
    pub fn declare_format(&mut self, mut decl: FieldDeclaration) {
        decl.scope = Scope::Format;
        let line = decl.to_meta_line();
        self.replace_declaration(decl, line);
    }

    fn replace_declaration(&mut self, decl: FieldDeclaration, line: String) {
        self.remove_declaration_lines(decl.scope, &decl.id);
        if !self.lines.iter().any(|l| *l == line) {
            self.lines.push(line);
        }
        let map = match decl.scope {
            Scope::Info => &mut self.info,
            Scope::Format => &mut self.format,
        };
        map.insert(decl.id.clone(), decl);
        self.version += 1;
    }

    fn remove_declaration_lines(&mut self, scope: Scope, id: &str) {
        let prefix = scope.prefix();
        self.lines.retain(|l| {
            !(l.starts_with(prefix)
                && FieldDeclaration::parse(l).map(|d| d.id == id).unwrap_or(false))
        });
    }

    /// Remove an INFO and/or FORMAT declaration by id; absent ids are ignored
    pub fn remove(&mut self, id: &str) {
        let had_info = self.info.remove(id).is_some();
        let had_format = self.format.remove(id).is_some();
        if had_info {
            self.remove_declaration_lines(Scope::Info, id);
        }
        if had_format {
            self.remove_declaration_lines(Scope::Format, id);
        }
        if had_info || had_format {
            self.version += 1;
        }
    }

    pub fn lookup_info(&self, id: &str) -> Option<&FieldDeclaration> {
        self.info.get(id)
    }

    pub fn lookup_format(&self, id: &str) -> Option<&FieldDeclaration> {
        self.format.get(id)
    }

    /// Look up a declaration in either scope
    pub fn lookup(&self, scope: Scope, id: &str) -> Option<&FieldDeclaration> {
        match scope {
            Scope::Info => self.lookup_info(id),
            Scope::Format => self.lookup_format(id),
        }
    }

    /// Declarations backed by a header line (built-ins excluded), INFO first
    pub fn declarations(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.lines
            .iter()
            .filter(|l| l.starts_with(INFO_PREFIX) || l.starts_with(FORMAT_PREFIX))
            .filter_map(|l| FieldDeclaration::parse(l).ok())
            .filter_map(move |d| self.lookup(d.scope, &d.id))
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    pub fn sample_index(&self, name: &str) -> Option<usize> {
        self.sample_index.get(name).copied()
    }

    pub fn sample_count(&self) -> usize {
        self.sample_names.len()
    }

    /// Replace the sample list, rebuilding the title line
    pub fn set_sample_names<S: AsRef<str>>(&mut self, names: &[S]) {
        let mut title = TITLE_COLUMNS.join("\t");
        if !names.is_empty() {
            title.push_str("\tFORMAT");
            for name in names {
                title.push('\t');
                title.push_str(name.as_ref());
            }
        }
        self.set_title(&title);
    }

    fn set_title(&mut self, line: &str) {
        self.sample_names = line
            .split('\t')
            .skip(FIRST_SAMPLE_COLUMN)
            .map(str::to_string)
            .collect();
        self.sample_index = self
            .sample_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        self.title = Some(line.to_string());
        self.version += 1;
    }

    /// The `#CHROM` line, if seen
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Meta-lines in physical order, title excluded
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Parse and resolve every `##PEDIGREE` line
    pub fn pedigree_entries(&self) -> HeaderResult<Vec<PedigreeEntry>> {
        self.lines
            .iter()
            .filter(|l| l.starts_with(PEDIGREE_PREFIX))
            .map(|l| self.parse_pedigree(l))
            .collect()
    }

    fn parse_pedigree(&self, line: &str) -> HeaderResult<PedigreeEntry> {
        let body: String = line[PEDIGREE_PREFIX.len()..]
            .chars()
            .filter(|c| *c != '<' && *c != '>')
            .collect();

        let mut names: HashMap<&'static str, String> = HashMap::new();
        for pair in body.trim().split(',').filter(|p| !p.trim().is_empty()) {
            let (key, name) = pair.split_once('=').unwrap_or((pair, ""));
            let key = match key.trim().to_ascii_lowercase().as_str() {
                "original" => "Original",
                "derived" => "Derived",
                "father" => "Father",
                "mother" => "Mother",
                "child" => "Child",
                _ => {
                    return Err(HeaderError::PedigreeUnknownKey {
                        line: line.to_string(),
                        key: key.trim().to_string(),
                    })
                }
            };
            names.insert(key, name.trim().to_string());
        }

        let resolve = |key: &'static str| -> HeaderResult<usize> {
            let name = names.get(key).ok_or_else(|| HeaderError::PedigreeMissingKey {
                line: line.to_string(),
                key,
            })?;
            self.sample_index(name).ok_or_else(|| HeaderError::PedigreeUnknownSample {
                line: line.to_string(),
                sample: name.clone(),
            })
        };

        let derived_shape = names.contains_key("Original") || names.contains_key("Derived");
        let trio_shape = ["Father", "Mother", "Child"].iter().any(|k| names.contains_key(k));

        match (derived_shape, trio_shape) {
            (true, false) => Ok(PedigreeEntry::Derived {
                original: resolve("Original")?,
                derived: resolve("Derived")?,
            }),
            (false, true) => Ok(PedigreeEntry::Trio {
                father: resolve("Father")?,
                mother: resolve("Mother")?,
                child: resolve("Child")?,
            }),
            _ => Err(HeaderError::PedigreeShape {
                line: line.to_string(),
                count: names.len(),
            }),
        }
    }
}

impl fmt::Display for HeaderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for line in self.lines.iter().chain(self.title.iter()) {
            if !first {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
            first = false;
        }
        Ok(())
    }
}

type BuiltinDecl = (&'static str, Cardinality, ValueType, &'static str);

const BUILTIN_INFO: &[BuiltinDecl] = &[
    ("AA", Cardinality::Fixed(1), ValueType::String, "Ancestral allele"),
    ("AC", Cardinality::OnePerAltAllele, ValueType::Integer, "Allele count in genotypes, for each ALT allele"),
    ("AF", Cardinality::OnePerAltAllele, ValueType::Float, "Allele frequency, for each ALT allele"),
    ("AN", Cardinality::Fixed(1), ValueType::Integer, "Total number of alleles in called genotypes"),
    ("BQ", Cardinality::Fixed(1), ValueType::Float, "RMS base quality"),
    ("CIGAR", Cardinality::OnePerAltAllele, ValueType::String, "Cigar string describing how to align an alternate allele to the reference allele"),
    ("DB", Cardinality::Fixed(0), ValueType::Flag, "dbSNP membership"),
    ("DP", Cardinality::Fixed(1), ValueType::Integer, "Combined depth across samples"),
    ("END", Cardinality::Fixed(1), ValueType::Integer, "End position of the variant described in this record"),
    ("H2", Cardinality::Fixed(0), ValueType::Flag, "Membership in hapmap 2"),
    ("H3", Cardinality::Fixed(0), ValueType::Flag, "Membership in hapmap 3"),
    ("MQ", Cardinality::Fixed(1), ValueType::Float, "RMS mapping quality"),
    ("MQ0", Cardinality::Fixed(1), ValueType::Integer, "Number of MAPQ == 0 reads covering this record"),
    ("NS", Cardinality::Fixed(1), ValueType::Integer, "Number of samples with data"),
    ("SB", Cardinality::Fixed(1), ValueType::Float, "Strand bias at this position"),
    ("SOMATIC", Cardinality::Fixed(0), ValueType::Flag, "Indicates that the record is a somatic mutation"),
    ("VALIDATED", Cardinality::Fixed(0), ValueType::Flag, "Validated by follow-up experiment"),
    ("1000G", Cardinality::Fixed(0), ValueType::Flag, "Membership in 1000 Genomes"),
    // structural variants
    ("IMPRECISE", Cardinality::Fixed(0), ValueType::Flag, "Imprecise structural variation"),
    ("NOVEL", Cardinality::Fixed(0), ValueType::Flag, "Indicates a novel structural variation"),
    ("SVTYPE", Cardinality::Fixed(1), ValueType::String, "Type of structural variant"),
    ("SVLEN", Cardinality::Unbounded, ValueType::Integer, "Difference in length between REF and ALT alleles"),
    ("CIPOS", Cardinality::Fixed(2), ValueType::Integer, "Confidence interval around POS for imprecise variants"),
    ("CIEND", Cardinality::Fixed(2), ValueType::Integer, "Confidence interval around END for imprecise variants"),
    ("HOMLEN", Cardinality::Unbounded, ValueType::Integer, "Length of base pair identical micro-homology at event breakpoints"),
    ("HOMSEQ", Cardinality::Unbounded, ValueType::String, "Sequence of base pair identical micro-homology at event breakpoints"),
    ("BKPTID", Cardinality::Unbounded, ValueType::String, "ID of the assembled alternate allele in the assembly file"),
    ("MEINFO", Cardinality::Fixed(4), ValueType::String, "Mobile element info of the form NAME,START,END,POLARITY"),
    ("METRANS", Cardinality::Fixed(4), ValueType::String, "Mobile element transduction info of the form CHR,START,END,POLARITY"),
    ("DGVID", Cardinality::Fixed(1), ValueType::String, "ID of this element in Database of Genomic Variation"),
    ("DBVARID", Cardinality::Fixed(1), ValueType::String, "ID of this element in DBVAR"),
    ("DBRIPID", Cardinality::Fixed(1), ValueType::String, "ID of this element in DBRIP"),
    ("MATEID", Cardinality::Unbounded, ValueType::String, "ID of mate breakends"),
    ("PARID", Cardinality::Fixed(1), ValueType::String, "ID of partner breakend"),
    ("EVENT", Cardinality::Fixed(1), ValueType::String, "ID of event associated to breakend"),
    ("CILEN", Cardinality::Fixed(2), ValueType::Integer, "Confidence interval around the length of the inserted material between breakends"),
    ("DPADJ", Cardinality::Unbounded, ValueType::Integer, "Read Depth of adjacency"),
    ("CN", Cardinality::Fixed(1), ValueType::Integer, "Copy number of segment containing breakend"),
    ("CNADJ", Cardinality::Unbounded, ValueType::Integer, "Copy number of adjacency"),
    ("CICN", Cardinality::Fixed(2), ValueType::Integer, "Confidence interval around copy number for the segment"),
    ("CICNADJ", Cardinality::Unbounded, ValueType::Integer, "Confidence interval around copy number for the adjacency"),
    // compressed genotypes
    ("HOM", Cardinality::Unbounded, ValueType::Integer, "Indices of samples homozygous for the ALT allele"),
    ("HET", Cardinality::Unbounded, ValueType::Integer, "Indices of heterozygous samples"),
    ("MISSING", Cardinality::Unbounded, ValueType::Integer, "Indices of samples with missing genotype"),
    // effect annotation sub-fields
    ("EFF.EFFECT", Cardinality::Unbounded, ValueType::String, "Effect type"),
    ("EFF.IMPACT", Cardinality::Unbounded, ValueType::String, "Effect impact (HIGH, MODERATE, LOW, MODIFIER)"),
    ("EFF.FUNCLASS", Cardinality::Unbounded, ValueType::String, "Functional class (NONE, SILENT, MISSENSE, NONSENSE)"),
    ("EFF.CODON", Cardinality::Unbounded, ValueType::String, "Codon change"),
    ("EFF.AA", Cardinality::Unbounded, ValueType::String, "Amino acid change"),
    ("EFF.AA_LEN", Cardinality::Unbounded, ValueType::Integer, "Protein length in amino acids"),
    ("EFF.GENE", Cardinality::Unbounded, ValueType::String, "Gene name"),
    ("EFF.BIOTYPE", Cardinality::Unbounded, ValueType::String, "Gene bio-type"),
    ("EFF.CODING", Cardinality::Unbounded, ValueType::String, "Gene coding (CODING, NON_CODING)"),
    ("EFF.TRID", Cardinality::Unbounded, ValueType::String, "Transcript ID"),
    ("EFF.RANK", Cardinality::Unbounded, ValueType::String, "Exon or intron rank"),
    ("EFF.EXID", Cardinality::Unbounded, ValueType::String, "Exon ID"),
    ("EFF.GT", Cardinality::Unbounded, ValueType::String, "Genotype the effect refers to"),
];

const BUILTIN_LOF_FIELDS: &[BuiltinDecl] = &[
    ("GENE", Cardinality::Unbounded, ValueType::String, "Gene name"),
    ("GENEID", Cardinality::Unbounded, ValueType::String, "Gene ID"),
    ("NUMTR", Cardinality::Unbounded, ValueType::Integer, "Number of transcripts in gene"),
    ("PERC", Cardinality::Unbounded, ValueType::Float, "Fraction of transcripts in this gene that are affected"),
];

const BUILTIN_FORMAT: &[BuiltinDecl] = &[
    ("DP", Cardinality::Fixed(1), ValueType::Integer, "Read depth at this position for this sample"),
    ("EC", Cardinality::OnePerAltAllele, ValueType::Integer, "Expected alternate allele counts"),
    ("FT", Cardinality::Fixed(1), ValueType::String, "Sample genotype filter indicating if this genotype was called"),
    ("GT", Cardinality::Fixed(1), ValueType::String, "Genotype"),
    ("GP", Cardinality::OnePerGenotype, ValueType::Float, "Genotype posterior probabilities"),
    ("GQ", Cardinality::Fixed(1), ValueType::Integer, "Conditional genotype quality, encoded as a phred quality"),
    ("HQ", Cardinality::Fixed(2), ValueType::Integer, "Haplotype qualities"),
    ("PL", Cardinality::OnePerGenotype, ValueType::Integer, "Phred-scaled genotype likelihoods"),
    ("PQ", Cardinality::Fixed(1), ValueType::Integer, "Phasing quality"),
    ("PS", Cardinality::Fixed(1), ValueType::Integer, "Phase set"),
    ("MQ", Cardinality::Fixed(1), ValueType::Integer, "RMS mapping quality"),
];
