//! Property-based tests for VCF record parsing
//!
//! **Feature: fast-vcf, Property 4: fixed columns are preserved**

use fast_vcf::formats::{HeaderModel, VcfRecord};
use fast_vcf::RecordError;
use proptest::prelude::*;
use std::sync::Arc;

/// Generate a valid chromosome name
fn arb_chrom_name() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=22).prop_map(|n| format!("chr{}", n)),
        Just("chrX".to_string()),
        Just("MT".to_string()),
    ]
}

/// Generate a valid VCF ID field
fn arb_vcf_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        "[0-9]{1,8}".prop_map(|s| format!("rs{}", s)),
    ]
}

/// Generate a DNA allele
fn arb_dna_allele() -> impl Strategy<Value = String> {
    "[ACGT]{1,6}"
}

/// Generate a valid QUAL field
fn arb_qual() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        (0u32..1000).prop_map(|n| n.to_string()),
    ]
}

/// Generate a valid FILTER field
fn arb_filter() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just("PASS".to_string()),
        Just("LowQual".to_string()),
        Just("q10;s50".to_string()),
    ]
}

/// Generate a valid INFO field against the built-in declarations
fn arb_info() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just("DP=100".to_string()),
        Just("DP=50;AN=4".to_string()),
        Just("DP=100;DB".to_string()),
        (0u32..500, 0u32..500).prop_map(|(dp, ac)| format!("DP={};AC={}", dp, ac)),
    ]
}

/// Generate a bi-allelic site line (8 fields)
fn arb_vcf_line() -> impl Strategy<Value = String> {
    (
        arb_chrom_name(),
        1u64..10_000_000,
        arb_vcf_id(),
        arb_dna_allele(),
        arb_dna_allele(),
        arb_qual(),
        arb_filter(),
        arb_info(),
    )
        .prop_filter("ALT must differ from REF", |t| t.3 != t.4)
        .prop_map(|(chrom, pos, id, ref_allele, alt_allele, qual, filter, info)| {
            format!("{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}", chrom, pos, id, ref_allele, alt_allele, qual, filter, info)
        })
}

fn header() -> Arc<HeaderModel> {
    Arc::new(HeaderModel::new())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property 4: fixed columns are preserved**
    ///
    /// For any site line, the record writes back the same text.
    #[test]
    fn prop_line_round_trip(line in arb_vcf_line()) {
        let record = VcfRecord::parse(&line, header()).unwrap();
        prop_assert_eq!(record.to_line(), line);
    }

    /// Property: coordinates are 0-based half-open over REF
    #[test]
    fn prop_coordinates(line in arb_vcf_line()) {
        let record = VcfRecord::parse(&line, header()).unwrap();
        let fields: Vec<&str> = line.split('\t').collect();
        let pos: u64 = fields[1].parse().unwrap();

        prop_assert_eq!(record.pos(), pos);
        prop_assert_eq!(record.start(), pos - 1);
        prop_assert_eq!(record.end(), record.start() + fields[3].len() as u64);
        prop_assert_eq!(record.chrom(), fields[0]);
    }

    /// Property: INFO stays unparsed until first asked for
    #[test]
    fn prop_info_is_lazy(line in arb_vcf_line()) {
        let record = VcfRecord::parse(&line, header()).unwrap();
        prop_assert!(!record.is_info_parsed());
        prop_assert!(!record.is_genotypes_parsed());

        let dp = record.info_int("DP");
        prop_assert!(record.is_info_parsed());
        let fields: Vec<&str> = line.split('\t').collect();
        prop_assert_eq!(dp.is_some(), fields[7].contains("DP="));
    }

    /// Property: well-formed site lines raise no diagnostics
    #[test]
    fn prop_valid_lines_check_clean(line in arb_vcf_line()) {
        let record = VcfRecord::parse(&line, header()).unwrap();
        prop_assert_eq!(record.check(), vec![]);
    }

    /// Property: adding then removing an INFO entry restores the INFO text
    #[test]
    fn prop_add_remove_info(line in arb_vcf_line(), value in "[a-z]{1,8}") {
        let mut record = VcfRecord::parse(&line, header()).unwrap();
        let before = record.info_text().to_string();

        record.add_info("XTRA", Some(&value)).unwrap();
        prop_assert_eq!(record.info("XTRA"), Some(value.as_str()));
        prop_assert!(record.remove_info("XTRA"));
        prop_assert_eq!(record.info_text(), before.as_str());
    }
}

#[test]
fn test_allele_indexed_info() {
    let record = VcfRecord::parse("1\t100\trs1\tA\tG,T\t30\tPASS\tAC=3,1;AN=10", header()).unwrap();
    assert_eq!(record.info_for_allele("AC", 0), Some("3"));
    assert_eq!(record.info_for_allele("AC", 1), Some("1"));
    assert_eq!(record.info_for_allele("AN", 1), Some("10"));
    assert!(record.is_multiallelic());
    assert!(record.is_snp());
}

#[test]
fn test_fatal_errors() {
    assert!(matches!(
        VcfRecord::parse("1\t100\t.", header()),
        Err(RecordError::TooFewFields { .. })
    ));
    assert!(matches!(
        VcfRecord::parse("1\tabc\t.\tA\tG", header()),
        Err(RecordError::InvalidPosition(_))
    ));
    assert!(matches!(
        VcfRecord::parse("1\t100\t.\tA,C\tG", header()),
        Err(RecordError::MultipleRef(_))
    ));
    assert!(matches!(
        VcfRecord::parse("1\t100\t.\tA\t<DEL>\t.\t.\tEND=50", header()),
        Err(RecordError::EndBeforePos { end: 50, pos: 100 })
    ));
}

#[test]
fn test_check_reports_cardinality_and_undeclared_keys() {
    let record = VcfRecord::parse("1\t100\t.\tA\tG,T\t.\t.\tAC=1;FOO=bar", header()).unwrap();
    let diagnostics = record.check();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().any(|d| d.key.as_deref() == Some("AC")));
    assert!(diagnostics.iter().any(|d| d.key.as_deref() == Some("FOO")));
}

#[test]
fn test_filters() {
    let mut record = VcfRecord::parse("1\t100\t.\tA\tG\t.\tPASS\t.", header()).unwrap();
    assert!(record.is_pass());
    record.add_filter("LowQual");
    record.add_filter("q10");
    assert_eq!(record.filter(), "LowQual;q10");
    assert!(record.remove_filter("LowQual"));
    assert_eq!(record.filter(), "q10");
}
