// src/ansi/mod.rs

//! Handles ANSI escape sequence decoding.
//!
//! [`next_ansi_code`] and [`info_from_ansi_code`] work on complete buffers.
//! [`AnsiDecoder`] wraps them for a byte stream arriving in arbitrary
//! chunks, carrying partial UTF-8 code points and split CSI sequences from
//! one call to the next.

mod commands;
mod lexer;
mod parser;

pub use commands::{AnsiArg, AnsiCommand, AnsiOutput, CsiKind, SgrError};
pub use lexer::next_ansi_code;
pub use parser::info_from_ansi_code;

use crate::config::DecoderConfig;
use lexer::{resume_csi, scan_csi, CsiScan, CsiState, Utf8Decoder, ESC_BYTE};
use log::{debug, trace, warn};
use parser::CodeParser;
use std::mem;

/// Streaming decoder from raw output bytes to text and commands.
#[derive(Debug, Clone)]
pub struct AnsiDecoder {
    parser: CodeParser,
    max_pending_bytes: usize,
    utf8: Utf8Decoder,
    /// Start of a CSI sequence cut off by the end of the last chunk.
    pending: Vec<u8>,
    /// Set after an over-long sequence was dropped; its remaining bytes
    /// are skipped until its final byte.
    discarding: Option<CsiState>,
}

impl Default for AnsiDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiDecoder {
    pub fn new() -> Self {
        Self::with_config(&DecoderConfig::default())
    }

    pub fn with_config(config: &DecoderConfig) -> Self {
        AnsiDecoder {
            parser: CodeParser {
                strict_digits: config.strict_sgr_digits,
            },
            max_pending_bytes: config.max_pending_bytes,
            utf8: Utf8Decoder::default(),
            pending: Vec::new(),
            discarding: None,
        }
    }

    /// True while part of an escape sequence or code point is held back.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty() || self.utf8.in_sequence()
    }

    /// Decodes the next chunk of the stream.
    ///
    /// Text runs between sequences come out as [`AnsiOutput::Text`], each
    /// complete CSI sequence as an [`AnsiOutput::Command`]. Malformed
    /// sequences are dropped and decoding resumes at the byte that broke
    /// them. A split sequence longer than `max_pending_bytes` is dropped
    /// whole, including the bytes that arrive in later chunks.
    pub fn process_bytes(&mut self, bytes: &[u8]) -> Vec<AnsiOutput> {
        let mut buf = mem::take(&mut self.pending);
        buf.extend_from_slice(bytes);

        let mut out = Vec::new();
        let mut text = String::new();
        let mut pos = 0;
        if let Some(state) = self.discarding.take() {
            match resume_csi(&buf, state) {
                CsiScan::Complete(range) => {
                    trace!("dropped {} trailing bytes of a discarded sequence", range.len());
                    pos = range.end;
                }
                CsiScan::Invalid { at } => pos = at,
                CsiScan::Incomplete(state) => {
                    self.discarding = Some(state);
                    return out;
                }
            }
        }
        while pos < buf.len() {
            let Some(offset) = buf[pos..].iter().position(|&b| b == ESC_BYTE) else {
                self.push_text(&buf[pos..], &mut text);
                break;
            };
            let start = pos + offset;
            self.push_text(&buf[pos..start], &mut text);
            if let Some(replacement) = self.utf8.interrupt() {
                text.push(replacement);
            }

            match scan_csi(&buf, start) {
                CsiScan::Complete(range) => {
                    flush_text(&mut text, &mut out);
                    let command = self.parser.parse(&buf[range.clone()]);
                    trace!("CSI {:?} -> {:?}", &buf[range.clone()], command.kind);
                    out.push(AnsiOutput::Command(command));
                    pos = range.end;
                }
                CsiScan::Invalid { at } => {
                    debug!("discarding malformed escape sequence {:?}", &buf[start..at]);
                    pos = at;
                }
                CsiScan::Incomplete(state) => {
                    let tail = &buf[start..];
                    if tail.len() > self.max_pending_bytes {
                        warn!(
                            "discarding unterminated escape sequence of {} bytes (limit {})",
                            tail.len(),
                            self.max_pending_bytes
                        );
                        self.discarding = Some(state);
                    } else {
                        self.pending = tail.to_vec();
                    }
                    break;
                }
            }
        }
        flush_text(&mut text, &mut out);
        out
    }

    /// Ends the stream. A dangling partial code point becomes U+FFFD; an
    /// unterminated escape sequence is discarded.
    pub fn finish(&mut self) -> Vec<AnsiOutput> {
        if !self.pending.is_empty() {
            debug!(
                "discarding unterminated escape sequence at end of stream: {:?}",
                self.pending
            );
            self.pending.clear();
        }
        self.discarding = None;
        match self.utf8.interrupt() {
            Some(replacement) => vec![AnsiOutput::Text(replacement.to_string())],
            None => Vec::new(),
        }
    }

    fn push_text(&mut self, bytes: &[u8], text: &mut String) {
        for &byte in bytes {
            self.utf8.push(byte, text);
        }
    }
}

fn flush_text(text: &mut String, out: &mut Vec<AnsiOutput>) {
    if !text.is_empty() {
        out.push(AnsiOutput::Text(mem::take(text)));
    }
}

#[cfg(test)]
mod tests;
