// src/ansi/lexer.rs

//! Byte-level scanning: locating CSI sequences in a byte stream and
//! decoding the UTF-8 text between them incrementally.

use log::{trace, warn};
use std::ops::Range;
use std::str;

/// Unicode replacement character (U+FFFD).
/// Used when encountering invalid UTF-8 sequences.
pub(super) const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

pub(super) const ESC_BYTE: u8 = 0x1B;
const CSI_INTRODUCER: u8 = b'[';

// --- CSI byte classes (ECMA-48 5.4) ---
const CSI_PARAM_RANGE: std::ops::RangeInclusive<u8> = 0x30..=0x3F;
const CSI_INTERMEDIATE_RANGE: std::ops::RangeInclusive<u8> = 0x20..=0x2F;
const CSI_FINAL_RANGE: std::ops::RangeInclusive<u8> = 0x40..=0x7E;

// --- Constants for UTF-8 byte classification (used by Utf8Decoder) ---
const UTF8_ASCII_MAX: u8 = 0x7F;
const UTF8_CONT_MIN: u8 = 0x80; // Start of continuation byte range
const UTF8_CONT_MAX: u8 = 0xBF; // End of continuation byte range
const UTF8_2_BYTE_MIN: u8 = 0xC2; // Excludes overlong 0xC0, 0xC1
const UTF8_3_BYTE_MIN: u8 = 0xE0;
const UTF8_4_BYTE_MIN: u8 = 0xF0;
const UTF8_4_BYTE_MAX: u8 = 0xF4; // Max valid start for 4-byte sequence (RFC 3629)

/// Outcome of one scan attempt starting at an `ESC` byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum CsiScan {
    /// A full sequence, `ESC` through the final byte.
    Complete(Range<usize>),
    /// The byte at this offset cannot continue the sequence.
    Invalid { at: usize },
    /// Input ended before the final byte, in this state.
    Incomplete(CsiState),
}

/// How far into a CSI sequence the scanner has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CsiState {
    /// After `ESC`, waiting for `[`.
    Introducer,
    Params,
    Intermediates,
}

enum CsiStep {
    Continue(CsiState),
    Final,
    Break,
}

impl CsiState {
    fn advance(self, byte: u8) -> CsiStep {
        match (self, byte) {
            (CsiState::Introducer, CSI_INTRODUCER) => CsiStep::Continue(CsiState::Params),
            (CsiState::Introducer, _) => CsiStep::Break,
            (CsiState::Params, b) if CSI_PARAM_RANGE.contains(&b) => CsiStep::Continue(self),
            (_, b) if CSI_INTERMEDIATE_RANGE.contains(&b) => {
                CsiStep::Continue(CsiState::Intermediates)
            }
            (_, b) if CSI_FINAL_RANGE.contains(&b) => CsiStep::Final,
            // Includes a parameter byte after an intermediate.
            _ => CsiStep::Break,
        }
    }
}

fn scan_from(buf: &[u8], start: usize, from: usize, mut state: CsiState) -> CsiScan {
    for (i, &byte) in buf.iter().enumerate().skip(from) {
        match state.advance(byte) {
            CsiStep::Continue(next) => state = next,
            CsiStep::Final => return CsiScan::Complete(start..i + 1),
            CsiStep::Break => {
                trace!("CSI at {} broken by {:#04x} at {}", start, byte, i);
                return CsiScan::Invalid { at: i };
            }
        }
    }
    CsiScan::Incomplete(state)
}

/// Scans one CSI sequence whose `ESC` is at `buf[start]`.
pub(super) fn scan_csi(buf: &[u8], start: usize) -> CsiScan {
    debug_assert_eq!(buf.get(start), Some(&ESC_BYTE));
    scan_from(buf, start, start + 1, CsiState::Introducer)
}

/// Continues a sequence whose earlier bytes are gone, from `state`. A
/// complete result covers the bytes of `buf` that still belong to it.
pub(super) fn resume_csi(buf: &[u8], state: CsiState) -> CsiScan {
    scan_from(buf, 0, 0, state)
}

/// Finds the first complete CSI sequence in `buf` and returns its byte
/// range, `ESC` through the final byte.
///
/// A failed attempt is dropped and the search resumes at the byte that
/// broke it, so bytes already consumed by the attempt are never taken as a
/// new start. A sequence cut off by the end of `buf` is not returned.
pub fn next_ansi_code(buf: &[u8]) -> Option<Range<usize>> {
    let mut pos = 0;
    while let Some(offset) = buf[pos..].iter().position(|&b| b == ESC_BYTE) {
        let start = pos + offset;
        match scan_csi(buf, start) {
            CsiScan::Complete(range) => return Some(range),
            CsiScan::Invalid { at } => pos = at,
            CsiScan::Incomplete(_) => return None,
        }
    }
    None
}

/// Represents the outcome of a single byte being processed by the Utf8Decoder.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Utf8DecodeResult {
    Decoded(char),   // Successfully decoded a valid Unicode character.
    InvalidSequence, // The byte sequence was invalid. Decoder is reset.
    NeedsMoreBytes,  // Current byte was validly consumed/buffered; more bytes needed.
}

/// Incremental UTF-8 decoder. Holds a partial code point across calls.
#[derive(Debug, Clone, Default)]
pub(super) struct Utf8Decoder {
    buffer: [u8; 4],
    len: usize,
    expected: usize,
}

impl Utf8Decoder {
    #[inline]
    fn reset(&mut self) {
        self.len = 0;
        self.expected = 0;
    }

    /// True while part of a multi-byte sequence is buffered.
    #[inline]
    pub(super) fn in_sequence(&self) -> bool {
        self.len > 0
    }

    pub(super) fn decode(&mut self, byte: u8) -> Utf8DecodeResult {
        if self.len == 0 {
            return self.decode_first_byte(byte);
        }
        self.decode_continuation_byte(byte)
    }

    #[inline]
    fn decode_first_byte(&mut self, byte: u8) -> Utf8DecodeResult {
        let expected = match byte {
            0x00..=UTF8_ASCII_MAX => return Utf8DecodeResult::Decoded(byte as char),
            UTF8_2_BYTE_MIN..=0xDF => 2,
            UTF8_3_BYTE_MIN..=0xEF => 3,
            UTF8_4_BYTE_MIN..=UTF8_4_BYTE_MAX => 4,
            // Continuation bytes, overlong 0xC0/0xC1 and 0xF5..=0xFF.
            _ => {
                trace!("invalid utf8 start byte: {:#04x}", byte);
                return Utf8DecodeResult::InvalidSequence;
            }
        };
        self.expected = expected;
        self.buffer[0] = byte;
        self.len = 1;
        Utf8DecodeResult::NeedsMoreBytes
    }

    #[inline]
    fn decode_continuation_byte(&mut self, byte: u8) -> Utf8DecodeResult {
        if !(UTF8_CONT_MIN..=UTF8_CONT_MAX).contains(&byte) {
            // The buffered sequence is now considered invalid.
            self.reset();
            return Utf8DecodeResult::InvalidSequence;
        }

        self.buffer[self.len] = byte;
        self.len += 1;
        if self.len != self.expected {
            return Utf8DecodeResult::NeedsMoreBytes;
        }

        // Rejects overlong forms and surrogates.
        let decoded = str::from_utf8(&self.buffer[..self.len])
            .ok()
            .and_then(|s| s.chars().next());
        self.reset();
        match decoded {
            Some(c) => Utf8DecodeResult::Decoded(c),
            None => Utf8DecodeResult::InvalidSequence,
        }
    }

    /// Decodes `byte` into `out`. A byte that breaks a buffered sequence
    /// yields U+FFFD for the sequence and is then decoded on its own.
    pub(super) fn push(&mut self, byte: u8, out: &mut String) {
        let was_in_sequence = self.in_sequence();
        match self.decode(byte) {
            Utf8DecodeResult::Decoded(c) => out.push(c),
            Utf8DecodeResult::NeedsMoreBytes => {}
            Utf8DecodeResult::InvalidSequence => {
                out.push(REPLACEMENT_CHARACTER);
                let consumed = (UTF8_CONT_MIN..=UTF8_CONT_MAX).contains(&byte);
                if was_in_sequence && !consumed {
                    match self.decode(byte) {
                        Utf8DecodeResult::Decoded(c) => out.push(c),
                        Utf8DecodeResult::NeedsMoreBytes => {}
                        Utf8DecodeResult::InvalidSequence => out.push(REPLACEMENT_CHARACTER),
                    }
                }
            }
        }
    }

    /// Abandons a buffered partial sequence, returning U+FFFD in its place.
    pub(super) fn interrupt(&mut self) -> Option<char> {
        if !self.in_sequence() {
            return None;
        }
        warn!(
            "utf8 sequence interrupted after {} of {} bytes",
            self.len, self.expected
        );
        self.reset();
        Some(REPLACEMENT_CHARACTER)
    }
}
