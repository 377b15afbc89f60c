// src/unicode/tests.rs

use super::fixtures::{sample_table, ARABIC_SHAPING, UNICODE_DATA};
use super::*;
use std::io::Write;

fn load(unicode_data: &str, arabic_shaping: &str) -> Result<RuneTable, RuneTableError> {
    RuneTable::from_readers(unicode_data.as_bytes(), arabic_shaping.as_bytes())
}

const SPACE_LINE: &str = "0020;SPACE;Zs;0;WS;;;;;N;;;;;\n";

// --- Lookup ---

#[test_log::test]
fn lookup_reads_character_data() {
    let table = sample_table();
    let a = table.lookup('a');
    assert_eq!(a.category, GeneralCategory::LowercaseLetter);
    assert_eq!(a.category.major(), MajorCategory::Letter);
    assert_eq!(a.bidi, BidiClass::L);
    assert_eq!(a.script, Script::Latin);
    assert_eq!(a.joining, JoiningType::None);

    let beh = table.lookup('\u{0628}');
    assert_eq!(beh.bidi, BidiClass::AL);
    assert_eq!(beh.joining, JoiningType::Dual);
    assert_eq!(beh.script, Script::Arabic);

    let space = table.lookup(' ');
    assert_eq!(space.script, Script::Common);
    assert_eq!(space.category.major(), MajorCategory::Separator);
}

#[test_log::test]
fn unknown_rune_gets_default_record() {
    let table = sample_table();
    let info = table.lookup('\u{0E01}'); // THAI CHARACTER KO KAI, not in the sample
    assert!(!table.contains('\u{0E01}'));
    assert_eq!(
        info,
        &RuneInfo {
            script: Script::Unknown,
            ..RuneInfo::default()
        }
    );
    assert_eq!(info.bidi, BidiClass::L);
    assert_eq!(info.joining, JoiningType::None);
    assert!(info.equivalents.is_empty());
}

#[test_log::test]
fn marks_default_to_transparent_joining() {
    let table = sample_table();
    // Neither is listed in ArabicShaping; Mn and Cf default to Transparent.
    assert_eq!(table.lookup('\u{064E}').joining, JoiningType::Transparent);
    assert_eq!(table.lookup('\u{0301}').joining, JoiningType::Transparent);
    assert_eq!(table.lookup('\u{0301}').script, Script::Inherited);
    // Listed explicitly as causing.
    assert_eq!(table.lookup('\u{200D}').joining, JoiningType::Causing);
    assert_eq!(table.lookup('\u{0640}').joining, JoiningType::Causing);
}

#[test_log::test]
fn equivalents_are_linked_both_ways() {
    let table = sample_table();
    let beh = table.lookup('\u{0628}');
    for form in ['\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}'] {
        assert!(beh.equivalents.contains(&form), "BEH should list {:?}", form);
        assert_eq!(table.lookup(form).equivalents, vec!['\u{0628}']);
    }
    assert_eq!(table.lookup('\u{FE91}').decomposition_tag, DecompositionTag::Initial);
    assert_eq!(table.lookup('\u{FE92}').decomposition_tag, DecompositionTag::Medial);
}

#[test_log::test]
fn multi_rune_decompositions_create_no_equivalence() {
    let table = sample_table();
    assert!(table.lookup('\u{00E9}').equivalents.is_empty());
    assert_eq!(table.lookup('\u{00E9}').decomposition_tag, DecompositionTag::None);
    assert!(table.lookup('e').equivalents.is_empty());
}

#[test_log::test]
fn ranges_cover_bmp_and_supplementary_planes() {
    let table = sample_table();
    for c in ['\u{4E00}', '\u{6C34}', '\u{9FFF}'] {
        assert!(table.contains(c));
        assert_eq!(table.lookup(c).script, Script::Han);
    }
    assert!(table.contains('\u{20000}'));
    assert!(table.contains('\u{2A6DF}'));
    assert_eq!(table.lookup('\u{2000B}').category, GeneralCategory::OtherLetter);
    assert!(!table.contains('\u{2A6E0}'));

    assert!(table.contains('\u{1F600}'));
    assert_eq!(table.lookup('\u{1F600}').category, GeneralCategory::OtherSymbol);
}

#[test_log::test]
fn record_count_counts_each_range_once() {
    let table = sample_table();
    let lines = UNICODE_DATA
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .count();
    // Two First/Last pairs collapse into two records.
    assert_eq!(table.len(), lines - 2);
    assert!(!table.is_empty());
}

// --- Loader failures ---

#[test_log::test]
fn wrong_field_count_is_malformed() {
    let err = load("0020;SPACE;Zs;0;WS\n", "").expect_err("short line");
    match err {
        RuneTableError::Malformed { line, ref reason, .. } => {
            assert_eq!(line, 1);
            assert!(reason.contains("15 fields"), "{}", reason);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test_log::test]
fn bad_hex_and_unknown_codes_are_malformed() {
    for bad in [
        "ZZZZ;JUNK;Lu;0;L;;;;;N;;;;;\n",
        "0041;LATIN CAPITAL LETTER A;Xx;0;L;;;;;N;;;;;\n",
        "0041;LATIN CAPITAL LETTER A;Lu;0;QQ;;;;;N;;;;;\n",
        "0041;LATIN CAPITAL LETTER A;Lu;0;L;<bogus> 0061;;;;N;;;;;\n",
        "110000;OUT OF RANGE;Lu;0;L;;;;;N;;;;;\n",
    ] {
        let text = format!("{}{}", SPACE_LINE, bad);
        match load(&text, "") {
            Err(RuneTableError::Malformed { line, .. }) => assert_eq!(line, 2, "{}", bad),
            other => panic!("expected malformed for {:?}, got {:?}", bad, other),
        }
    }
}

#[test_log::test]
fn duplicate_entry_is_malformed() {
    let text = format!("{}{}", SPACE_LINE, SPACE_LINE);
    assert!(matches!(
        load(&text, ""),
        Err(RuneTableError::Malformed { line: 2, .. })
    ));
}

#[test_log::test]
fn unpaired_range_is_rejected() {
    let dangling_first = "4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;\n";
    assert!(matches!(
        load(dangling_first, ""),
        Err(RuneTableError::UnpairedRange { first: 0x4E00, line: 1, .. })
    ));

    let interrupted = format!("{}{}", dangling_first, SPACE_LINE);
    assert!(matches!(
        load(&interrupted, ""),
        Err(RuneTableError::UnpairedRange { first: 0x4E00, .. })
    ));

    let lone_last = "9FFF;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;\n";
    assert!(matches!(
        load(lone_last, ""),
        Err(RuneTableError::UnpairedRange { first: 0x9FFF, .. })
    ));
}

#[test_log::test]
fn bad_joining_type_is_malformed() {
    let err = load(UNICODE_DATA, "0628; BEH; X; BEH\n").expect_err("bad joining type");
    assert!(matches!(err, RuneTableError::Malformed { line: 1, .. }));
    assert!(err.to_string().starts_with("ArabicShaping.txt:1:"), "{}", err);
}

#[test_log::test]
fn joining_data_for_unknown_rune_is_skipped() {
    let table = load(SPACE_LINE, "0628; BEH; D; BEH\n").expect("loads");
    assert!(!table.contains('\u{0628}'));
    assert_eq!(table.len(), 1);
}

#[test_log::test]
fn from_paths_loads_files_and_reports_missing_ones() {
    let mut ud = tempfile::NamedTempFile::new().expect("temp file");
    ud.write_all(UNICODE_DATA.as_bytes()).expect("write");
    let mut shaping = tempfile::NamedTempFile::new().expect("temp file");
    shaping.write_all(ARABIC_SHAPING.as_bytes()).expect("write");

    let table = RuneTable::from_paths(ud.path(), shaping.path()).expect("loads from disk");
    assert_eq!(table.lookup('\u{0645}').joining, JoiningType::Dual);

    let missing = std::path::Path::new("/nonexistent/ArabicShaping.txt");
    match RuneTable::from_paths(ud.path(), missing) {
        Err(RuneTableError::Io { source_name, .. }) => {
            assert!(source_name.contains("nonexistent"));
        }
        other => panic!("expected io error, got {:?}", other),
    }
}

// --- Property helpers ---

#[test]
fn join_masks_match_joining_rules() {
    assert!(JoiningType::Dual.is_in(JoinMask::JOINS_FORWARD));
    assert!(JoiningType::Causing.is_in(JoinMask::JOINS_BACKWARD));
    assert!(!JoiningType::Right.is_in(JoinMask::JOINS_FORWARD));
    assert!(JoiningType::Right.is_in(JoinMask::ACCEPTS_BACKWARD));
    assert!(!JoiningType::Right.is_in(JoinMask::ACCEPTS_FORWARD));
    assert!(!JoiningType::Transparent.is_in(JoinMask::JOINS_FORWARD | JoinMask::JOINS_BACKWARD));
}

#[test]
fn decomposition_tags_parse_with_brackets() {
    assert_eq!(DecompositionTag::from_tag("<initial>"), Some(DecompositionTag::Initial));
    assert_eq!(DecompositionTag::from_tag("<isolated>"), Some(DecompositionTag::Isolated));
    assert_eq!(DecompositionTag::from_tag("<compat>"), Some(DecompositionTag::Compat));
    assert_eq!(DecompositionTag::from_tag("initial"), None);
    assert_eq!(DecompositionTag::from_tag("<bogus>"), None);
}

#[test]
fn rtl_bidi_classes() {
    for class in [BidiClass::R, BidiClass::AL, BidiClass::RLE, BidiClass::RLO, BidiClass::RLI] {
        assert!(class.is_rtl());
    }
    for class in [BidiClass::L, BidiClass::AN, BidiClass::EN, BidiClass::NSM, BidiClass::WS] {
        assert!(!class.is_rtl());
    }
}

#[test]
fn script_ranges() {
    assert_eq!(Script::of('z' as u32), Script::Latin);
    assert_eq!(Script::of('1' as u32), Script::Common);
    assert_eq!(Script::of(0x0645), Script::Arabic);
    assert_eq!(Script::of(0x060C), Script::Common);
    assert_eq!(Script::of(0x064E), Script::Inherited);
    assert_eq!(Script::of(0x05D0), Script::Hebrew);
    assert_eq!(Script::of(0xFEF4), Script::Arabic);
    assert_eq!(Script::of(0xE0001), Script::Unknown);
    assert!(Script::Common.is_neutral());
    assert!(Script::Inherited.is_neutral());
    assert!(!Script::Latin.is_neutral());
}
