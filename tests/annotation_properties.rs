//! Property-based tests for EFF/ANN, CSQ and LOF/NMD annotation parsing
//!
//! **Feature: fast-vcf, Property 6: annotation entries survive re-serialization**

use fast_vcf::formats::consequence::{self, CSQ_FIELDS};
use fast_vcf::formats::effect::{detect_version, EffectAnnotation, EffectVersion};
use fast_vcf::formats::lof::LossOfFunction;
use fast_vcf::formats::{ConsequenceAnnotation, HeaderModel, VcfRecord};
use proptest::prelude::*;
use std::sync::Arc;

fn arb_version() -> impl Strategy<Value = EffectVersion> {
    prop::sample::select(vec![EffectVersion::Eff2, EffectVersion::Eff3, EffectVersion::Eff4])
}

/// Generate a fully populated EFF entry in the given layout
fn arb_effect_entry() -> impl Strategy<Value = (EffectVersion, String)> {
    (
        arb_version(),
        "[A-Z][A-Z_]{2,20}",
        prop::sample::select(vec!["HIGH", "MODERATE", "LOW", "MODIFIER"]),
        prop::sample::select(vec!["NONE", "SILENT", "MISSENSE", "NONSENSE"]),
        "[ACGTacgt]{3}/[ACGTacgt]{3}",
        "[A-Z][0-9]{1,3}[A-Z]",
        1i64..5000,
        "[A-Z][A-Z0-9]{1,8}",
        prop::sample::select(vec!["CODING", "NON_CODING"]),
        "ENST[0-9]{5}",
        1u32..30,
        1u32..3,
    )
        .prop_map(|(version, effect, impact, class, codon, aa, aa_len, gene, coding, trid, exon, gt)| {
            let mut fields = vec![impact.to_string(), class.to_string(), codon, aa];
            if version != EffectVersion::Eff2 {
                fields.push(aa_len.to_string());
            }
            fields.extend([gene, "protein_coding".to_string(), coding.to_string(), trid, exon.to_string()]);
            if version == EffectVersion::Eff4 {
                fields.push(gt.to_string());
            }
            (version, format!("{}({})", effect, fields.join("|")))
        })
}

/// Generate a 16-field ANN entry
fn arb_ann_entry() -> impl Strategy<Value = String> {
    (
        "[ACGT]{1,4}",
        "[a-z_]{3,20}(&[a-z_]{3,20})?",
        prop::sample::select(vec!["HIGH", "MODERATE", "LOW", "MODIFIER"]),
        "[A-Z][A-Z0-9]{1,8}",
        "ENST[0-9]{5}",
        (1u32..20, 1u32..500),
        prop::sample::select(vec!["", "WARNING_TRANSCRIPT_INCOMPLETE"]),
    )
        .prop_map(|(allele, effect, impact, gene, trid, (rank, aa_len), warning)| {
            format!(
                "{}|{}|{}|{}|ENSG{}|transcript|{}|protein_coding|{}/{}|c.{}A>G|p.Lys{}Arg|||{}/{}||{}",
                allele, effect, impact, gene, gene, trid, rank, rank + 1, aa_len * 3, aa_len, aa_len, aa_len + 10, warning
            )
        })
}

/// Generate the 35 values of a CSQ entry
fn arb_csq_values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z0-9_.:&]{0,8}", CSQ_FIELDS.len())
}

/// Generate a LOF entry with a two-decimal fraction
fn arb_lof_entry() -> impl Strategy<Value = String> {
    ("[A-Z][A-Z0-9]{1,8}", "ENSG[0-9]{11}", 1i64..50, 0u32..=100)
        .prop_map(|(gene, id, count, pct)| format!("({}|{}|{}|{}.{:02})", gene, id, count, pct / 100, pct % 100))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property 6: annotation entries survive re-serialization**
    ///
    /// An EFF entry parses in the layout it was written in and prints back unchanged.
    #[test]
    fn prop_effect_round_trip((version, entry) in arb_effect_entry()) {
        prop_assert_eq!(detect_version(&entry), version);
        let eff = EffectAnnotation::parse(&entry).unwrap();
        prop_assert_eq!(eff.version, version);
        prop_assert!(eff.impact.is_some());
        prop_assert_eq!(eff.to_string(), entry);
    }

    /// Property: a trailing warning does not change the detected layout
    #[test]
    fn prop_effect_warning_ignored((version, entry) in arb_effect_entry()) {
        let with_warning = format!("{}|WARNING_TRANSCRIPT_INCOMPLETE)", entry.trim_end_matches(')'));
        prop_assert_eq!(detect_version(&with_warning), version);
        let eff = EffectAnnotation::parse(&with_warning).unwrap();
        prop_assert_eq!(eff.errors_or_warnings.as_deref(), Some("WARNING_TRANSCRIPT_INCOMPLETE"));
    }

    /// Property: ANN entries are detected, parsed and printed back unchanged
    #[test]
    fn prop_ann_round_trip(entry in arb_ann_entry()) {
        prop_assert_eq!(detect_version(&entry), EffectVersion::Ann);
        let ann = EffectAnnotation::parse(&entry).unwrap();
        prop_assert_eq!(ann.version, EffectVersion::Ann);
        prop_assert!(ann.impact.is_some());
        prop_assert!(!ann.transcript_id.is_empty());
        prop_assert!(ann.aa_len > 0);
        prop_assert_eq!(ann.to_string(), entry);
    }

    /// Property: every CSQ sub-field is addressable by name
    #[test]
    fn prop_csq_named_access(values in arb_csq_values()) {
        let entry = values.join("|");
        let csq = ConsequenceAnnotation::parse(&entry).unwrap();
        for (name, value) in CSQ_FIELDS.iter().zip(values.iter()) {
            prop_assert_eq!(csq.get(name), Some(value.as_str()));
            prop_assert_eq!(consequence::field_index(&format!("CSQ.{}", name)), consequence::field_index(name));
        }
        prop_assert_eq!(csq.to_string(), entry);
    }

    /// Property: CSQ entries with too few sub-fields are rejected
    #[test]
    fn prop_csq_short_entry_rejected(values in prop::collection::vec("[A-Za-z0-9]{0,8}", 1..CSQ_FIELDS.len())) {
        let err = ConsequenceAnnotation::parse(&values.join("|")).unwrap_err();
        prop_assert_eq!(err.fields.len(), values.len());
    }

    /// Property: LOF entries print back with two decimals
    #[test]
    fn prop_lof_round_trip(entry in arb_lof_entry()) {
        let lof = LossOfFunction::parse(&entry).unwrap();
        prop_assert!(lof.fraction_affected >= 0.0 && lof.fraction_affected <= 1.0);
        prop_assert_eq!(lof.to_string(), entry);
    }
}

#[test]
fn test_record_level_annotation_access() {
    let line = "1\t100\t.\tC\tT\t.\t.\t\
EFF=STOP_GAINED(HIGH|NONSENSE|Cga/Tga|R12*|300|TP53|protein_coding|CODING|ENST00000269305|4|1);\
LOF=(TP53|ENSG00000141510|4|0.75);NMD=(TP53|ENSG00000141510|4|0.50)";
    let record = VcfRecord::parse(line, Arc::new(HeaderModel::new())).unwrap();

    let effects = record.effects("EFF").unwrap();
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].gene, "TP53");
    assert_eq!(effects[0].version, EffectVersion::Eff4);

    let lof = record.loss_of_function("LOF").unwrap();
    assert!((lof[0].fraction_affected - 0.75).abs() < 1e-9);
    let nmd = record.loss_of_function("NMD").unwrap();
    assert_eq!(nmd[0].transcript_count, 4);

    assert!(record.consequences("CSQ").unwrap().is_empty());
    // annotation keys are only known once the header declares them
    let undeclared: Vec<_> = record.check().into_iter().filter_map(|d| d.key).collect();
    assert_eq!(undeclared, vec!["EFF", "LOF", "NMD"]);
}

#[test]
fn test_invalid_impact_is_reported() {
    let err = EffectAnnotation::parse("INTRON(SEVERE||||G|b|CODING|T|1)").unwrap_err();
    assert_eq!(err.kind, "EFF");
    assert!(err.to_string().contains("SEVERE"));
}

#[test]
fn test_record_level_ann_access() {
    let line = "1\t100\t.\tC\tT\t.\t.\t\
ANN=T|stop_gained|HIGH|TP53|ENSG00000141510|transcript|ENST00000269305|protein_coding|4/11|c.34C>T|p.Arg12*|||12/393||,\
T|upstream_gene_variant|MODIFIER|WRAP53|ENSG00000141499|transcript|ENST00000357449|protein_coding||c.-1200G>A||||||";
    let record = VcfRecord::parse(line, Arc::new(HeaderModel::new())).unwrap();

    let annotations = record.effects("ANN").unwrap();
    assert_eq!(annotations.len(), 2);
    assert!(annotations.iter().all(|a| a.version == EffectVersion::Ann));
    assert_eq!(annotations[0].aa_len, 393);
    assert_eq!(annotations[1].gene, "WRAP53");
    assert_eq!(EffectVersion::Ann.field_index("ANN.FEATUREID"), Some(6));
}
