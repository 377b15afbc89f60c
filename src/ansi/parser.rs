// src/ansi/parser.rs

//! Turns the bytes of one CSI sequence into an [`AnsiCommand`].

use super::commands::{AnsiArg, AnsiCommand, CsiKind, SgrError};
use super::lexer::ESC_BYTE;
use crate::color::NamedColor;
use log::{debug, trace};

const PARAM_SEPARATOR: u8 = b';';
const SUBPARAM_SEPARATOR: u8 = b':';
const CSI_PARAM_RANGE: std::ops::RangeInclusive<u8> = 0x30..=0x3F;

/// Classifies a complete CSI sequence (`ESC [` ... final byte) such as the
/// ranges returned by [`next_ansi_code`](super::next_ansi_code). Non-digit
/// bytes in SGR arguments are skipped.
pub fn info_from_ansi_code(code: &[u8]) -> AnsiCommand {
    CodeParser::default().parse(code)
}

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct CodeParser {
    /// Reject SGR arguments with non-digit bytes instead of skipping the
    /// offending bytes.
    pub(super) strict_digits: bool,
}

/// A decimal parameter with the non-digit bytes dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal {
    value: u16,
    had_non_digit: bool,
}

fn parse_decimal(segment: &[u8]) -> Decimal {
    let mut value: u16 = 0;
    let mut had_non_digit = false;
    for &byte in segment {
        if byte.is_ascii_digit() {
            value = value.saturating_mul(10).saturating_add(u16::from(byte - b'0'));
        } else {
            had_non_digit = true;
        }
    }
    Decimal {
        value,
        had_non_digit,
    }
}

/// Splits a CSI sequence into its parameter bytes and final byte.
fn split_code(code: &[u8]) -> Option<(&[u8], u8)> {
    match code {
        [ESC_BYTE, b'[', body @ .., final_byte] => {
            let end = body
                .iter()
                .position(|b| !CSI_PARAM_RANGE.contains(b))
                .unwrap_or(body.len());
            Some((&body[..end], *final_byte))
        }
        _ => None,
    }
}

impl CodeParser {
    pub(super) fn parse(&self, code: &[u8]) -> AnsiCommand {
        let Some((params, final_byte)) = split_code(code) else {
            debug!("not a CSI sequence: {:?}", code);
            return AnsiCommand::unknown();
        };
        match CsiKind::from_final_byte(final_byte) {
            CsiKind::SelectGraphicRendition => self.parse_sgr(params),
            CsiKind::Unknown => {
                trace!("unhandled CSI final byte {:?}", final_byte as char);
                AnsiCommand::unknown()
            }
            kind => AnsiCommand::new(kind, cursor_payload(kind, params)),
        }
    }

    fn parse_sgr(&self, params: &[u8]) -> AnsiCommand {
        let mut payload = Vec::new();
        let mut diagnostics = Vec::new();
        let mut segments = params.split(|&b| b == PARAM_SEPARATOR);

        while let Some(segment) = segments.next() {
            if segment.first().map_or(true, |&b| b == b'0') {
                // Reset ends the sequence; later arguments are ignored.
                payload.push(AnsiArg::Reset);
                break;
            }
            let (code, inline_subparams) = match self.sgr_code(segment) {
                Ok(parsed) => parsed,
                Err(err) => {
                    debug!("skipping SGR argument: {}", err);
                    diagnostics.push(err);
                    continue;
                }
            };
            match code {
                0 => {
                    payload.push(AnsiArg::Reset);
                    break;
                }
                30..=37 | 90..=97 => {
                    if let Some(color) = NamedColor::from_sgr_foreground(code) {
                        payload.push(AnsiArg::ColorFg(color.to_rgb()));
                    }
                }
                40..=47 | 100..=107 => {
                    if let Some(color) = NamedColor::from_sgr_background(code) {
                        payload.push(AnsiArg::ColorBg(color.to_rgb()));
                    }
                }
                39 => payload.push(AnsiArg::DefaultFg),
                49 => payload.push(AnsiArg::DefaultBg),
                38 | 48 | 58 if inline_subparams => {
                    trace!("SGR {} with inline color arguments, no payload", code);
                }
                38 | 48 | 58 => {
                    if let Err(err) = skip_extended_color(code, &mut segments) {
                        debug!("{}", err);
                        diagnostics.push(err);
                    }
                }
                1..=9 | 21..=29 | 51..=55 | 59 => {
                    trace!("SGR style code {} has no color payload", code);
                }
                _ => {
                    let err = SgrError::UnknownCode(code);
                    debug!("skipping SGR argument: {}", err);
                    diagnostics.push(err);
                }
            }
        }

        AnsiCommand {
            kind: CsiKind::SelectGraphicRendition,
            payload,
            diagnostics,
        }
    }

    /// The code of one SGR argument, and whether colon sub-parameters
    /// (`38:2:r:g:b`) follow it inside the same argument.
    fn sgr_code(&self, segment: &[u8]) -> Result<(u16, bool), SgrError> {
        let (head, inline_subparams) = match segment.iter().position(|&b| b == SUBPARAM_SEPARATOR) {
            Some(colon) => (&segment[..colon], true),
            None => (segment, false),
        };
        let decimal = parse_decimal(head);
        if decimal.had_non_digit && self.strict_digits {
            return Err(SgrError::NonDigit {
                segment: String::from_utf8_lossy(segment).into_owned(),
            });
        }
        Ok((decimal.value, inline_subparams))
    }
}

/// Consumes the `5;n` or `2;r;g;b` arguments following an extended color
/// code so they are not read as codes of their own.
fn skip_extended_color<'a, I>(code: u16, segments: &mut I) -> Result<(), SgrError>
where
    I: Iterator<Item = &'a [u8]>,
{
    let mode = segments
        .next()
        .ok_or(SgrError::IncompleteExtendedColor { code })?;
    let mode = parse_decimal(mode).value;
    let needed = match mode {
        5 => 1,
        2 => 3,
        _ => return Err(SgrError::UnknownColorMode { code, mode }),
    };
    for _ in 0..needed {
        segments
            .next()
            .ok_or(SgrError::IncompleteExtendedColor { code })?;
    }
    trace!("SGR {} extended color (mode {}) has no payload", code, mode);
    Ok(())
}

/// Payload of the cursor, erase, scroll and status commands. Counts
/// default to 1 when absent or zero; erase and status modes default to 0.
fn cursor_payload(kind: CsiKind, params: &[u8]) -> Vec<AnsiArg> {
    let values: Vec<u16> = params
        .split(|&b| b == PARAM_SEPARATOR)
        .map(|segment| parse_decimal(segment).value)
        .collect();
    let arg = |i: usize| values.get(i).copied().unwrap_or(0);
    let count = |i: usize| arg(i).max(1);
    let n = i32::from(count(0));

    match kind {
        CsiKind::CursorUp => vec![AnsiArg::LineOffset(-n)],
        CsiKind::CursorDown => vec![AnsiArg::LineOffset(n)],
        CsiKind::CursorForward => vec![AnsiArg::CursorOffset(n)],
        CsiKind::CursorBack => vec![AnsiArg::CursorOffset(-n)],
        CsiKind::CursorNextLine => vec![AnsiArg::LineOffset(n), AnsiArg::CursorAbs(1)],
        CsiKind::CursorPrevLine => vec![AnsiArg::LineOffset(-n), AnsiArg::CursorAbs(1)],
        CsiKind::CursorHorizontalAbsolute => vec![AnsiArg::CursorAbs(count(0))],
        CsiKind::CursorPosition | CsiKind::HorizontalVerticalPosition => {
            vec![AnsiArg::LineAbs(count(0)), AnsiArg::CursorAbs(count(1))]
        }
        CsiKind::EraseInDisplay | CsiKind::EraseInLine => vec![AnsiArg::EraseMode(arg(0))],
        CsiKind::ScrollUp => vec![AnsiArg::ScrollOffset(n)],
        CsiKind::ScrollDown => vec![AnsiArg::ScrollOffset(-n)],
        CsiKind::DeviceStatusReport => vec![AnsiArg::StatusRequest(arg(0))],
        CsiKind::SelectGraphicRendition | CsiKind::Unknown => Vec::new(),
    }
}
