// src/pipeline.rs

//! Wires the subsystems together: one rune table shared by the segmenter
//! and the shaper, and a decoder configured from the same `Config`.

use crate::ansi::{AnsiDecoder, AnsiOutput};
use crate::config::{Config, DecoderConfig};
use crate::text::{GlyphSource, RunSegmenter, ShapedGlyph, Shaper};
use crate::unicode::RuneTable;
use anyhow::Context;
use log::info;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TextPipeline {
    table: Arc<RuneTable>,
    decoder: AnsiDecoder,
    segmenter: RunSegmenter,
    shaper: Shaper,
}

impl TextPipeline {
    /// Loads the rune table from the configured files and builds the rest
    /// around it.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let paths = &config.unicode;
        let table =
            RuneTable::from_paths(&paths.unicode_data, &paths.arabic_shaping).with_context(|| {
                format!(
                    "Failed to build rune table from {} and {}",
                    paths.unicode_data.display(),
                    paths.arabic_shaping.display()
                )
            })?;
        info!("text pipeline ready ({} rune records)", table.len());
        Ok(Self::new(Arc::new(table), &config.decoder))
    }

    pub fn new(table: Arc<RuneTable>, decoder: &DecoderConfig) -> Self {
        TextPipeline {
            decoder: AnsiDecoder::with_config(decoder),
            segmenter: RunSegmenter::new(Arc::clone(&table)),
            shaper: Shaper::new(Arc::clone(&table)),
            table,
        }
    }

    pub fn table(&self) -> &Arc<RuneTable> {
        &self.table
    }

    pub fn decoder(&self) -> &AnsiDecoder {
        &self.decoder
    }

    pub fn decoder_mut(&mut self) -> &mut AnsiDecoder {
        &mut self.decoder
    }

    pub fn segmenter(&self) -> &RunSegmenter {
        &self.segmenter
    }

    pub fn shaper(&self) -> &Shaper {
        &self.shaper
    }

    /// Feeds raw output bytes to the decoder.
    pub fn decode(&mut self, bytes: &[u8]) -> Vec<AnsiOutput> {
        self.decoder.process_bytes(bytes)
    }

    /// Segments `runes` into runs and shapes them along one line.
    pub fn shape_text<G: GlyphSource + ?Sized>(
        &self,
        glyphs: &G,
        runes: &[char],
    ) -> Vec<ShapedGlyph> {
        let runs = self.segmenter.segment(runes);
        self.shaper.shape_line(glyphs, &runs)
    }
}
