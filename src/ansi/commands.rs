// src/ansi/commands.rs

//! Defines `AnsiCommand`, the typed form of a decoded CSI sequence, and
//! its payload entries.

use crate::color::Rgb;
use thiserror::Error;

// --- Command kinds ---

/// Command selected by the final byte of a CSI sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsiKind {
    CursorUp,
    CursorDown,
    CursorForward,
    CursorBack,
    CursorNextLine,
    CursorPrevLine,
    CursorHorizontalAbsolute,
    CursorPosition,
    EraseInDisplay,
    EraseInLine,
    ScrollUp,
    ScrollDown,
    HorizontalVerticalPosition,
    SelectGraphicRendition,
    DeviceStatusReport,
    Unknown,
}

impl CsiKind {
    pub fn from_final_byte(byte: u8) -> Self {
        match byte {
            b'A' => CsiKind::CursorUp,
            b'B' => CsiKind::CursorDown,
            b'C' => CsiKind::CursorForward,
            b'D' => CsiKind::CursorBack,
            b'E' => CsiKind::CursorNextLine,
            b'F' => CsiKind::CursorPrevLine,
            b'G' => CsiKind::CursorHorizontalAbsolute,
            b'H' => CsiKind::CursorPosition,
            b'J' => CsiKind::EraseInDisplay,
            b'K' => CsiKind::EraseInLine,
            b'S' => CsiKind::ScrollUp,
            b'T' => CsiKind::ScrollDown,
            b'f' => CsiKind::HorizontalVerticalPosition,
            b'm' => CsiKind::SelectGraphicRendition,
            b'n' => CsiKind::DeviceStatusReport,
            _ => CsiKind::Unknown,
        }
    }
}

// --- Payload ---

/// One payload entry of a command. Offsets are signed deltas; absolute
/// positions stay 1-based as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiArg {
    ColorFg(Rgb),
    ColorBg(Rgb),
    /// Reset all graphic rendition attributes.
    Reset,
    DefaultFg,
    DefaultBg,
    CursorOffset(i32),
    CursorAbs(u16),
    LineOffset(i32),
    LineAbs(u16),
    ScrollOffset(i32),
    /// 0 = to end, 1 = to start, 2 = all, 3 = scrollback.
    EraseMode(u16),
    StatusRequest(u16),
}

/// A recoverable problem with one SGR argument. The argument is skipped;
/// the rest of the sequence is still decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SgrError {
    #[error("unrecognised SGR code {0}")]
    UnknownCode(u16),
    #[error("non-digit byte in SGR argument {segment:?}")]
    NonDigit { segment: String },
    #[error("SGR {code} is missing its color arguments")]
    IncompleteExtendedColor { code: u16 },
    #[error("SGR {code} has unknown color mode {mode}")]
    UnknownColorMode { code: u16, mode: u16 },
}

/// A decoded CSI sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiCommand {
    pub kind: CsiKind,
    pub payload: Vec<AnsiArg>,
    /// Arguments that were skipped, and why.
    pub diagnostics: Vec<SgrError>,
}

impl AnsiCommand {
    pub fn new(kind: CsiKind, payload: Vec<AnsiArg>) -> Self {
        AnsiCommand {
            kind,
            payload,
            diagnostics: Vec::new(),
        }
    }

    pub fn unknown() -> Self {
        AnsiCommand::new(CsiKind::Unknown, Vec::new())
    }
}

/// One item of decoder output, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnsiOutput {
    Text(String),
    Command(AnsiCommand),
}
