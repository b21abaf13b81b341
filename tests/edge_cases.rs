//! Edge case tests for chataudit.
//!
//! Malformed exports, unusual encodings and rule text corner cases.

use chataudit::prelude::*;

fn parse(text: &str) -> ParsedExport {
    ExportParser::default().parse_str(text)
}

// ============================================================================
// Empty and degenerate input
// ============================================================================

#[test]
fn test_empty_input() {
    let export = parse("");
    assert!(export.records.is_empty());
    assert_eq!(export.stats.messages, 0);
    assert_eq!(export.stats.orphan_lines, 0);
}

#[test]
fn test_whitespace_only_input() {
    let export = parse("\n\n   \n");
    assert!(export.records.is_empty());
    assert_eq!(export.stats.orphan_lines, 3);
}

#[test]
fn test_empty_bytes() {
    let export = ExportParser::default().parse_bytes(&[]).unwrap();
    assert!(export.records.is_empty());
}

#[test]
fn test_no_headers_at_all() {
    let export = parse("hola\nesto no es un chat");
    assert!(export.records.is_empty());
    assert_eq!(export.stats.orphan_lines, 2);
    assert!(category_options(&export.records, &FilterSpec::new()).is_empty());
}

// ============================================================================
// Header extraction
// ============================================================================

#[test]
fn test_body_with_colons() {
    let export = parse("01/02/2024, 09:15 - Ana: nota: revisar a las 10:30");
    assert_eq!(export.records[0].author(), "Ana");
    assert_eq!(export.records[0].body(), "nota: revisar a las 10:30");
}

#[test]
fn test_empty_body() {
    let export = parse("01/02/2024, 09:15 - Ana:");
    assert_eq!(export.records.len(), 1);
    assert_eq!(export.records[0].body(), "");
    assert_eq!(export.records[0].category(), "Otros");
}

#[test]
fn test_author_with_spaces_and_phone_number() {
    let export = parse("01/02/2024, 09:15 - +54 9 11 5555-1234: hola\n[01/02/2024 09:16] Ana María: chau");
    assert_eq!(export.records[0].author(), "+54 9 11 5555-1234");
    assert_eq!(export.records[1].author(), "Ana María");
}

#[test]
fn test_time_with_seconds_is_not_a_header() {
    let export = parse("01/02/2024, 09:15 - Ana: hola\n01/02/2024, 09:15:30 - Luis: chau");
    assert_eq!(export.records.len(), 1);
    assert!(export.records[0].body().ends_with("01/02/2024, 09:15:30 - Luis: chau"));
}

#[test]
fn test_header_inside_body_is_not_split() {
    let export = parse("01/02/2024, 09:15 - Ana: reenvío: 01/02/2024, 08:00 - Luis: viejo");
    assert_eq!(export.records.len(), 1);
    assert_eq!(export.records[0].body(), "reenvío: 01/02/2024, 08:00 - Luis: viejo");
}

#[test]
fn test_bracketed_with_comma() {
    let export = parse("[01/02/2024, 09:15] Ana: hola");
    assert_eq!(export.records.len(), 1);
    assert_eq!(export.records[0].time(), "09:15");
}

#[test]
fn test_windows_line_endings() {
    let export = parse("01/02/2024, 09:15 - Ana: hola\r\nsegunda línea\r\n01/02/2024, 09:16 - Luis: chau\r\n");
    assert_eq!(export.records.len(), 2);
    assert_eq!(export.records[0].body(), "hola segunda línea");
    assert_eq!(export.records[1].body(), "chau");
}

#[test]
fn test_unicode_and_emoji() {
    let export = parse("01/02/2024, 09:15 - Иван: Привет 🎉\n01/02/2024, 09:16 - 田中: こんにちは");
    assert_eq!(export.records[0].author(), "Иван");
    assert_eq!(export.records[0].body(), "Привет 🎉");
    assert_eq!(export.records[1].author(), "田中");
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn test_leap_day() {
    let export = parse("29/02/2024, 09:15 - Ana: bisiesto\n29/02/2023, 09:15 - Ana: imposible");
    assert!(export.records[0].date().is_some());
    assert!(export.records[1].date().is_none());
    assert_eq!(export.stats.undated_messages, 1);
}

#[test]
fn test_single_digit_day_and_month() {
    let export = parse("1/2/2024, 09:15 - Ana: hola");
    let msg = &export.records[0];
    assert_eq!(msg.date_text(), "1/2/2024");
    assert_eq!(msg.display_date(), "01/02/2024");
}

#[test]
fn test_all_undated_with_date_filter() {
    let export = parse("32/13/2024, 09:15 - Ana: uno\n00/00/2024, 09:16 - Ana: dos");
    let view = apply_filters(&export.records, &FilterSpec::new().with_month("1").unwrap());
    assert!(view.is_empty());
    assert_eq!(apply_filters(&export.records, &FilterSpec::new()).len(), 2);
}

// ============================================================================
// Encodings
// ============================================================================

#[test]
fn test_utf8_bom_is_stripped() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("01/02/2024, 09:15 - Ana: hola".as_bytes());

    let export = ExportParser::default().parse_bytes(&bytes).unwrap();
    assert_eq!(export.records.len(), 1);
    assert_eq!(export.stats.orphan_lines, 0);
}

#[test]
fn test_utf16_be_with_bom() {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in "01/02/2024, 09:15 - Ana: hola".encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }

    let export = ExportParser::default().parse_bytes(&bytes).unwrap();
    assert_eq!(export.records[0].body(), "hola");
}

#[test]
fn test_latin1_bytes_are_rejected() {
    // "é" in Latin-1, odd length so it cannot be UTF-16 either
    let err = ExportParser::default().parse_bytes(&[0x68, 0xE9, 0x21]).unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn test_even_length_latin1_is_rejected() {
    let mut bytes = b"01/02/2024, 09:15 - Ana: ol".to_vec();
    bytes.push(0xE9);
    assert_eq!(bytes.len() % 2, 0);

    let err = ExportParser::default().parse_bytes(&bytes).unwrap_err();
    assert!(err.is_decode());
}

// ============================================================================
// Rules
// ============================================================================

#[test]
fn test_rule_order_decides() {
    let body = "anular factura 123";
    let specific_first = RuleSet::parse("Anular Factura: anular factura\nAnulación: anular");
    let generic_first = RuleSet::parse("Anulación: anular\nAnular Factura: anular factura");

    assert_eq!(specific_first.classify(body), "Anular Factura");
    assert_eq!(generic_first.classify(body), "Anulación");
}

#[test]
fn test_rule_text_noise_is_ignored() {
    let rules = RuleSet::parse("# comentario\n\n: sin nombre\nMontos: , monto ,, importe\nOtros:");
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.rules()[0].keywords(), ["monto", "importe"]);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let rules = RuleSet::parse("Montos: MONTO");
    assert_eq!(rules.classify("el Monto final"), "Montos");
}

#[test]
fn test_substring_match_by_default() {
    let rules = RuleSet::parse("Errores: error");
    assert_eq!(rules.classify("errores varios"), "Errores");
}

#[test]
fn test_whole_word_match() {
    let rules = RuleSet::parse("Errores: error").with_match_mode(MatchMode::WholeWord);
    assert_eq!(rules.classify("errores varios"), "Otros");
    assert_eq!(rules.classify("hubo un error."), "Errores");
}

#[test]
fn test_explicit_fallback_rule_name() {
    let rules = RuleSet::parse("Montos: monto\nVarios:");
    assert_eq!(rules.classify("nada que ver"), "Varios");
}
