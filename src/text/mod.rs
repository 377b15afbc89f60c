// src/text/mod.rs

//! Script run segmentation and contextual glyph selection.
//!
//! [`RunSegmenter`] cuts a rune sequence into single-script runs with a
//! resolved direction; [`Shaper`] picks positional glyph variants for
//! joining scripts and lays the runs out along a pen line.

mod segment;
mod shaper;

pub use segment::{RunSegmenter, TextRun};
pub use shaper::{GlyphMetrics, GlyphSource, JoiningForm, MonospaceGlyphs, ShapedGlyph, Shaper};
