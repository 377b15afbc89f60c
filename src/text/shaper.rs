// src/text/shaper.rs

//! Contextual glyph selection for joining scripts such as Arabic.
//!
//! There is no shaping engine here. A joining letter's positional form is
//! found through the rune table: the presentation-form code points
//! (U+FB50..U+FEFF) decompose to their base letter with an `<initial>`,
//! `<medial>`, `<final>` or `<isolated>` tag, and the loader links them to
//! the base as equivalents. Picking a form is a scan of that short list.

use super::segment::TextRun;
use crate::unicode::{DecompositionTag, JoinMask, JoiningType, RuneInfo, RuneTable};
use log::trace;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Placement metrics of one glyph, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub advance: f32,
    pub bearing_x: f32,
    pub bearing_y: f32,
}

/// The glyph table a renderer draws from.
pub trait GlyphSource {
    /// Metrics of the glyph for `key`, or `None` if there is no glyph.
    fn metrics(&self, key: char) -> Option<GlyphMetrics>;

    /// Pen advance for keys without a glyph.
    fn fallback_advance(&self) -> f32 {
        0.0
    }
}

/// A monospace font that has a glyph for every key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceGlyphs {
    pub advance: f32,
}

impl GlyphSource for MonospaceGlyphs {
    fn metrics(&self, _key: char) -> Option<GlyphMetrics> {
        Some(GlyphMetrics {
            advance: self.advance,
            ..GlyphMetrics::default()
        })
    }

    fn fallback_advance(&self) -> f32 {
        self.advance
    }
}

impl<S: BuildHasher> GlyphSource for HashMap<char, GlyphMetrics, S> {
    fn metrics(&self, key: char) -> Option<GlyphMetrics> {
        self.get(&key).copied()
    }
}

/// Where a joining rune sits relative to the runes it connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoiningForm {
    Isolated,
    Initial,
    Medial,
    Final,
}

impl JoiningForm {
    /// Resolves the form of a rune with joining type `curr` between
    /// neighbors whose joining types are `prev` and `next` (`None` when the
    /// neighbor is missing).
    pub fn resolve(
        curr: JoiningType,
        prev: Option<JoiningType>,
        next: Option<JoiningType>,
    ) -> Self {
        if matches!(curr, JoiningType::None | JoiningType::Transparent) {
            return JoiningForm::Isolated;
        }
        let joins_prev = prev.is_some_and(|p| p.is_in(JoinMask::JOINS_FORWARD))
            && curr.is_in(JoinMask::ACCEPTS_BACKWARD);
        let joins_next = next.is_some_and(|n| n.is_in(JoinMask::JOINS_BACKWARD))
            && curr.is_in(JoinMask::ACCEPTS_FORWARD);
        match (joins_prev, joins_next) {
            (true, true) => JoiningForm::Medial,
            (false, true) => JoiningForm::Initial,
            (true, false) => JoiningForm::Final,
            (false, false) => JoiningForm::Isolated,
        }
    }

    fn decomposition_tag(self) -> Option<DecompositionTag> {
        match self {
            JoiningForm::Initial => Some(DecompositionTag::Initial),
            JoiningForm::Medial => Some(DecompositionTag::Medial),
            JoiningForm::Final => Some(DecompositionTag::Final),
            JoiningForm::Isolated => None,
        }
    }
}

/// One rune of a shaped line, in logical order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// The rune from the input.
    pub source: char,
    /// The rune whose glyph should be drawn.
    pub key: char,
    /// Pen position of the glyph's origin.
    pub x: f32,
    pub advance: f32,
    /// `None` if the glyph source has nothing for `key`.
    pub metrics: Option<GlyphMetrics>,
}

#[derive(Debug, Clone)]
pub struct Shaper {
    table: Arc<RuneTable>,
}

impl Shaper {
    pub fn new(table: Arc<RuneTable>) -> Self {
        Shaper { table }
    }

    /// Chooses the glyph key for `curr` given its neighbors within a run.
    ///
    /// Returns `curr` itself when it has no neighbors, never joins, sits in
    /// isolated position, or when `glyphs` has no glyph for the positional
    /// form.
    pub fn select_glyph<G: GlyphSource + ?Sized>(
        &self,
        glyphs: &G,
        curr: char,
        prev: Option<char>,
        next: Option<char>,
    ) -> char {
        if prev.is_none() && next.is_none() {
            return curr;
        }
        let info = self.table.lookup(curr);
        if matches!(info.joining, JoiningType::None | JoiningType::Transparent) {
            return curr;
        }
        let prev_joining = prev.map(|c| self.table.lookup(c).joining);
        let next_joining = next.map(|c| self.table.lookup(c).joining);
        self.select_with_joining(glyphs, curr, info, prev_joining, next_joining)
    }

    /// Same as [`select_glyph`](Self::select_glyph) with the lookups for
    /// `curr` and its neighbors already done.
    fn select_with_joining<G: GlyphSource + ?Sized>(
        &self,
        glyphs: &G,
        curr: char,
        info: &RuneInfo,
        prev: Option<JoiningType>,
        next: Option<JoiningType>,
    ) -> char {
        if prev.is_none() && next.is_none() {
            return curr;
        }
        let Some(wanted) = JoiningForm::resolve(info.joining, prev, next).decomposition_tag() else {
            return curr;
        };
        info.equivalents
            .iter()
            .copied()
            .find(|&candidate| {
                self.table.lookup(candidate).decomposition_tag == wanted
                    && glyphs.metrics(candidate).is_some()
            })
            .unwrap_or(curr)
    }

    /// Shapes one run with its first glyph at x = 0.
    pub fn shape_run<G: GlyphSource + ?Sized>(
        &self,
        glyphs: &G,
        run: &TextRun<'_>,
    ) -> Vec<ShapedGlyph> {
        let mut out = Vec::with_capacity(run.len());
        self.shape_run_into(glyphs, run, 0.0, &mut out);
        out
    }

    /// Shapes runs one after another along a single pen line.
    pub fn shape_line<G: GlyphSource + ?Sized>(
        &self,
        glyphs: &G,
        runs: &[TextRun<'_>],
    ) -> Vec<ShapedGlyph> {
        let mut out = Vec::with_capacity(runs.iter().map(TextRun::len).sum());
        let mut pen = 0.0;
        for run in runs {
            pen = self.shape_run_into(glyphs, run, pen, &mut out);
        }
        out
    }

    /// Appends the shaped glyphs of `run` starting at `origin` and returns
    /// the pen position after it. Right-to-left runs are mirrored inside
    /// their extent: the first logical rune ends at the right edge.
    fn shape_run_into<G: GlyphSource + ?Sized>(
        &self,
        glyphs: &G,
        run: &TextRun<'_>,
        origin: f32,
        out: &mut Vec<ShapedGlyph>,
    ) -> f32 {
        let runes = run.runes;
        let infos: Vec<&RuneInfo> = runes.iter().map(|&c| self.table.lookup(c)).collect();

        // Nearest non-transparent joining type on each side, so combining
        // marks between two letters do not break the connection.
        let mut before: Vec<Option<JoiningType>> = Vec::with_capacity(runes.len());
        let mut last = None;
        for info in &infos {
            before.push(last);
            if info.joining != JoiningType::Transparent {
                last = Some(info.joining);
            }
        }
        let mut after: Vec<Option<JoiningType>> = vec![None; runes.len()];
        let mut last = None;
        for (i, info) in infos.iter().enumerate().rev() {
            after[i] = last;
            if info.joining != JoiningType::Transparent {
                last = Some(info.joining);
            }
        }

        let first = out.len();
        let mut width = 0.0;
        for (i, (&c, info)) in runes.iter().zip(&infos).enumerate() {
            let key = if c.is_whitespace() {
                c
            } else {
                self.select_with_joining(glyphs, c, info, before[i], after[i])
            };
            let metrics = glyphs.metrics(key);
            let advance = metrics.map_or_else(|| glyphs.fallback_advance(), |m| m.advance);
            out.push(ShapedGlyph {
                source: c,
                key,
                x: origin + width,
                advance,
                metrics,
            });
            width += advance;
        }

        if !run.is_ltr {
            for glyph in &mut out[first..] {
                let offset = glyph.x - origin;
                glyph.x = origin + width - offset - glyph.advance;
            }
        }
        trace!(
            "shaped run at {} ({} runes, ltr={}, width={})",
            run.start,
            runes.len(),
            run.is_ltr,
            width
        );
        origin + width
    }
}
