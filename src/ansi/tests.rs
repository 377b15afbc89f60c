// src/ansi/tests.rs

use super::*;
use crate::color::Rgb;
use crate::config::DecoderConfig;

const RED: Rgb = Rgb::new(205, 0, 0);
const GREEN: Rgb = Rgb::new(0, 205, 0);
const BLUE: Rgb = Rgb::new(0, 0, 238);

fn decode(bytes: &[u8]) -> Vec<AnsiOutput> {
    AnsiDecoder::new().process_bytes(bytes)
}

fn text(s: &str) -> AnsiOutput {
    AnsiOutput::Text(s.to_string())
}

fn command(kind: CsiKind, payload: Vec<AnsiArg>) -> AnsiOutput {
    AnsiOutput::Command(AnsiCommand::new(kind, payload))
}

// --- Scanner ---

#[test_log::test]
fn finds_sgr_sequence_between_text() {
    let buf = b"abc\x1b[31mdef";
    let range = next_ansi_code(buf).expect("sequence present");
    assert_eq!(range, 3..8);

    let info = info_from_ansi_code(&buf[range]);
    assert_eq!(info.kind, CsiKind::SelectGraphicRendition);
    assert_eq!(info.payload, vec![AnsiArg::ColorFg(RED)]);
    assert!(info.diagnostics.is_empty());
}

#[test_log::test]
fn no_sequence_in_plain_text() {
    assert_eq!(next_ansi_code(b"plain text"), None);
    assert_eq!(next_ansi_code(b""), None);
}

#[test_log::test]
fn truncated_sequence_is_not_returned() {
    assert_eq!(next_ansi_code(b"ab\x1b[12;3"), None);
    assert_eq!(next_ansi_code(b"ab\x1b"), None);
}

#[test_log::test]
fn parameter_after_intermediate_breaks_the_sequence() {
    let buf = b"\x1b[1;2 3mX\x1b[0m";
    assert_eq!(next_ansi_code(buf), Some(9..13));
}

#[test_log::test]
fn intermediates_before_final_are_accepted() {
    assert_eq!(next_ansi_code(b"\x1b[2 q"), Some(0..5));
}

#[test_log::test]
fn scan_resumes_at_the_breaking_escape() {
    assert_eq!(next_ansi_code(b"\x1b[\x1b[31m"), Some(2..7));
    assert_eq!(next_ansi_code(b"\x1bx\x1b[K"), Some(2..5));
}

// --- Classification ---

#[test_log::test]
fn reset_stops_argument_parsing() {
    let info = info_from_ansi_code(b"\x1b[0;31m");
    assert_eq!(info.payload, vec![AnsiArg::Reset]);

    let info = info_from_ansi_code(b"\x1b[m");
    assert_eq!(info.payload, vec![AnsiArg::Reset]);

    let info = info_from_ansi_code(b"\x1b[31;;42m");
    assert_eq!(info.payload, vec![AnsiArg::ColorFg(RED), AnsiArg::Reset]);
}

#[test_log::test]
fn foreground_and_background_colors() {
    let info = info_from_ansi_code(b"\x1b[1;31;42m");
    assert_eq!(info.payload, vec![AnsiArg::ColorFg(RED), AnsiArg::ColorBg(GREEN)]);

    let info = info_from_ansi_code(b"\x1b[91;104m");
    assert_eq!(
        info.payload,
        vec![
            AnsiArg::ColorFg(Rgb::new(255, 0, 0)),
            AnsiArg::ColorBg(Rgb::new(92, 92, 255))
        ]
    );

    let info = info_from_ansi_code(b"\x1b[39;49m");
    assert_eq!(info.payload, vec![AnsiArg::DefaultFg, AnsiArg::DefaultBg]);
}

#[test_log::test]
fn extended_color_arguments_are_consumed() {
    let info = info_from_ansi_code(b"\x1b[38;5;196;32m");
    assert_eq!(info.payload, vec![AnsiArg::ColorFg(GREEN)]);
    assert!(info.diagnostics.is_empty());

    let info = info_from_ansi_code(b"\x1b[48;2;255;31;42m");
    assert!(info.payload.is_empty());
    assert!(info.diagnostics.is_empty());

    let info = info_from_ansi_code(b"\x1b[38:2:1:2:3;44m");
    assert_eq!(info.payload, vec![AnsiArg::ColorBg(BLUE)]);
}

#[test_log::test]
fn bad_arguments_are_skipped_with_diagnostics() {
    let info = info_from_ansi_code(b"\x1b[31;200;32m");
    assert_eq!(info.payload, vec![AnsiArg::ColorFg(RED), AnsiArg::ColorFg(GREEN)]);
    assert_eq!(info.diagnostics, vec![SgrError::UnknownCode(200)]);
    assert_eq!(info.diagnostics[0].to_string(), "unrecognised SGR code 200");

    let info = info_from_ansi_code(b"\x1b[38m");
    assert_eq!(info.diagnostics, vec![SgrError::IncompleteExtendedColor { code: 38 }]);

    let info = info_from_ansi_code(b"\x1b[48;7;1m");
    assert_eq!(info.diagnostics, vec![SgrError::UnknownColorMode { code: 48, mode: 7 }]);
    assert!(info.payload.is_empty());
}

#[test_log::test]
fn non_digit_bytes_are_skipped_by_default() {
    let info = info_from_ansi_code(b"\x1b[3?1m");
    assert_eq!(info.payload, vec![AnsiArg::ColorFg(RED)]);
}

#[test_log::test]
fn strict_digits_reject_the_argument() {
    let mut decoder = AnsiDecoder::with_config(&DecoderConfig {
        strict_sgr_digits: true,
        ..DecoderConfig::default()
    });
    let out = decoder.process_bytes(b"\x1b[3?1;42m");
    let AnsiOutput::Command(info) = &out[0] else {
        panic!("expected a command, got {:?}", out);
    };
    assert_eq!(info.payload, vec![AnsiArg::ColorBg(GREEN)]);
    assert_eq!(
        info.diagnostics,
        vec![SgrError::NonDigit {
            segment: "3?1".to_string()
        }]
    );
}

fn assert_command(code: &[u8], kind: CsiKind, payload: Vec<AnsiArg>) {
    let info = info_from_ansi_code(code);
    assert_eq!(info.kind, kind, "kind of {:?}", code);
    assert_eq!(info.payload, payload, "payload of {:?}", code);
}

#[test_log::test]
fn cursor_arguments() {
    assert_command(b"\x1b[5A", CsiKind::CursorUp, vec![AnsiArg::LineOffset(-5)]);
    assert_command(b"\x1b[A", CsiKind::CursorUp, vec![AnsiArg::LineOffset(-1)]);
    assert_command(b"\x1b[2B", CsiKind::CursorDown, vec![AnsiArg::LineOffset(2)]);
    assert_command(b"\x1b[0C", CsiKind::CursorForward, vec![AnsiArg::CursorOffset(1)]);
    assert_command(b"\x1b[4D", CsiKind::CursorBack, vec![AnsiArg::CursorOffset(-4)]);
    assert_command(
        b"\x1b[3E",
        CsiKind::CursorNextLine,
        vec![AnsiArg::LineOffset(3), AnsiArg::CursorAbs(1)],
    );
    assert_command(
        b"\x1b[F",
        CsiKind::CursorPrevLine,
        vec![AnsiArg::LineOffset(-1), AnsiArg::CursorAbs(1)],
    );
    assert_command(b"\x1b[12G", CsiKind::CursorHorizontalAbsolute, vec![AnsiArg::CursorAbs(12)]);
    assert_command(
        b"\x1b[H",
        CsiKind::CursorPosition,
        vec![AnsiArg::LineAbs(1), AnsiArg::CursorAbs(1)],
    );
    assert_command(
        b"\x1b[3;7f",
        CsiKind::HorizontalVerticalPosition,
        vec![AnsiArg::LineAbs(3), AnsiArg::CursorAbs(7)],
    );
}

#[test_log::test]
fn erase_scroll_and_status_arguments() {
    assert_command(b"\x1b[2J", CsiKind::EraseInDisplay, vec![AnsiArg::EraseMode(2)]);
    assert_command(b"\x1b[K", CsiKind::EraseInLine, vec![AnsiArg::EraseMode(0)]);
    assert_command(b"\x1b[2S", CsiKind::ScrollUp, vec![AnsiArg::ScrollOffset(2)]);
    assert_command(b"\x1b[T", CsiKind::ScrollDown, vec![AnsiArg::ScrollOffset(-1)]);
    assert_command(b"\x1b[6n", CsiKind::DeviceStatusReport, vec![AnsiArg::StatusRequest(6)]);
}

#[test_log::test]
fn unknown_final_byte_has_no_payload() {
    let info = info_from_ansi_code(b"\x1b[?25h");
    assert_eq!(info, AnsiCommand::unknown());
    assert_eq!(info_from_ansi_code(b"not csi"), AnsiCommand::unknown());
}

// --- Streaming decoder ---

#[test_log::test]
fn decoder_interleaves_text_and_commands() {
    assert_eq!(
        decode(b"abc\x1b[31mdef"),
        vec![
            text("abc"),
            command(CsiKind::SelectGraphicRendition, vec![AnsiArg::ColorFg(RED)]),
            text("def"),
        ]
    );
    assert!(decode(b"").is_empty());
}

#[test_log::test]
fn sequence_split_across_chunks() {
    let mut decoder = AnsiDecoder::new();
    assert_eq!(decoder.process_bytes(b"ab\x1b[3"), vec![text("ab")]);
    assert!(decoder.has_pending());
    assert_eq!(
        decoder.process_bytes(b"1mc"),
        vec![
            command(CsiKind::SelectGraphicRendition, vec![AnsiArg::ColorFg(RED)]),
            text("c"),
        ]
    );
    assert!(!decoder.has_pending());
}

#[test_log::test]
fn escape_alone_at_chunk_end_is_held() {
    let mut decoder = AnsiDecoder::new();
    assert_eq!(decoder.process_bytes(b"x\x1b"), vec![text("x")]);
    assert_eq!(
        decoder.process_bytes(b"[2K"),
        vec![command(CsiKind::EraseInLine, vec![AnsiArg::EraseMode(2)])]
    );
}

#[test_log::test]
fn code_point_split_across_chunks() {
    let mut decoder = AnsiDecoder::new();
    let bytes = "é".as_bytes();
    assert!(decoder.process_bytes(&bytes[..1]).is_empty());
    assert!(decoder.has_pending());
    assert_eq!(decoder.process_bytes(&bytes[1..]), vec![text("é")]);
}

#[test_log::test]
fn invalid_utf8_becomes_replacement() {
    assert_eq!(decode(b"a\xffb"), vec![text("a\u{FFFD}b")]);
    assert_eq!(decode(b"\xc3A"), vec![text("\u{FFFD}A")]);
    // Encoded surrogate.
    assert_eq!(decode(b"\xed\xa0\x80"), vec![text("\u{FFFD}")]);
}

#[test_log::test]
fn escape_interrupts_partial_code_point() {
    assert_eq!(
        decode(b"\xc3\x1b[m"),
        vec![
            text("\u{FFFD}"),
            command(CsiKind::SelectGraphicRendition, vec![AnsiArg::Reset]),
        ]
    );
}

#[test_log::test]
fn malformed_sequence_is_dropped_and_decoding_resyncs() {
    assert_eq!(
        decode(b"\x1b[12\x01\x1b[31m!"),
        vec![
            text("\u{1}"),
            command(CsiKind::SelectGraphicRendition, vec![AnsiArg::ColorFg(RED)]),
            text("!"),
        ]
    );
}

#[test_log::test]
fn oversized_pending_sequence_is_discarded() {
    let mut decoder = AnsiDecoder::with_config(&DecoderConfig {
        max_pending_bytes: 4,
        ..DecoderConfig::default()
    });
    assert_eq!(decoder.process_bytes(b"ok\x1b[1;2;3"), vec![text("ok")]);
    assert!(!decoder.has_pending());
}

fn small_pending_decoder() -> AnsiDecoder {
    AnsiDecoder::with_config(&DecoderConfig {
        max_pending_bytes: 4,
        ..DecoderConfig::default()
    })
}

#[test_log::test]
fn rest_of_discarded_sequence_is_not_text() {
    let mut decoder = small_pending_decoder();
    assert_eq!(decoder.process_bytes(b"ok\x1b[1;2;3"), vec![text("ok")]);
    assert_eq!(decoder.process_bytes(b";4m!"), vec![text("!")]);
    assert_eq!(
        decoder.process_bytes(b"\x1b[31m"),
        vec![command(CsiKind::SelectGraphicRendition, vec![AnsiArg::ColorFg(RED)])]
    );
}

#[test_log::test]
fn discarded_sequence_spanning_several_chunks() {
    let mut decoder = small_pending_decoder();
    assert!(decoder.process_bytes(b"\x1b[1;2;3;").is_empty());
    assert!(decoder.process_bytes(b"4;5;6").is_empty());
    assert!(decoder.process_bytes(b"").is_empty());
    assert_eq!(decoder.process_bytes(b" qdone"), vec![text("done")]);
}

#[test_log::test]
fn discarded_sequence_ends_at_breaking_byte() {
    let mut decoder = small_pending_decoder();
    assert!(decoder.process_bytes(b"\x1b[1;2;3").is_empty());
    assert_eq!(decoder.process_bytes(b";4\x01z"), vec![text("\u{1}z")]);

    let mut decoder = small_pending_decoder();
    assert!(decoder.process_bytes(b"\x1b[1;2;3").is_empty());
    assert_eq!(
        decoder.process_bytes(b";\x1b[Kx"),
        vec![command(CsiKind::EraseInLine, vec![AnsiArg::EraseMode(0)]), text("x")]
    );
}

#[test_log::test]
fn finish_flushes_partial_state() {
    let mut decoder = AnsiDecoder::new();
    decoder.process_bytes(b"\xe2\x82");
    assert_eq!(decoder.finish(), vec![text("\u{FFFD}")]);
    assert!(!decoder.has_pending());

    decoder.process_bytes(b"\x1b[3");
    assert!(decoder.finish().is_empty());
    assert!(!decoder.has_pending());
    assert_eq!(decoder.process_bytes(b"1m"), vec![text("1m")]);

    let mut decoder = small_pending_decoder();
    decoder.process_bytes(b"\x1b[1;2;3");
    assert!(decoder.finish().is_empty());
    assert_eq!(decoder.process_bytes(b"4m"), vec![text("4m")]);
}
