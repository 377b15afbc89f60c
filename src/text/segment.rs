// src/text/segment.rs

//! Splits a rune sequence into runs of a single script and resolves each
//! run's direction.

use crate::unicode::{RuneTable, Script};
use log::trace;
use std::sync::Arc;

/// A contiguous, non-empty slice of the caller's runes sharing one script.
///
/// Runs borrow the input; they are only valid until the buffer they were
/// cut from is changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    /// Offset of the first rune within the segmented sequence.
    pub start: usize,
    pub runes: &'a [char],
    /// `Common` for runs made only of script-neutral runes.
    pub script: Script,
    pub is_ltr: bool,
}

impl TextRun<'_> {
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    /// One past the offset of the last rune.
    pub fn end(&self) -> usize {
        self.start + self.runes.len()
    }
}

#[derive(Debug, Clone)]
pub struct RunSegmenter {
    table: Arc<RuneTable>,
}

impl RunSegmenter {
    pub fn new(table: Arc<RuneTable>) -> Self {
        RunSegmenter { table }
    }

    pub fn table(&self) -> &Arc<RuneTable> {
        &self.table
    }

    /// Splits `runes` into maximal single-script runs.
    ///
    /// Common and Inherited runes continue whatever run they are in. When
    /// the script changes, Common runes at the tail of the closing run are
    /// split off into a run of their own so they do not take the closing
    /// run's direction; Inherited runes (combining marks) stay with their
    /// base. Neutral runes before the first scripted rune form a `Common`
    /// run of their own.
    pub fn segment<'a>(&self, runes: &'a [char]) -> Vec<TextRun<'a>> {
        let mut runs = Vec::new();
        if runes.is_empty() {
            return runs;
        }

        let mut run_start = 0;
        // Common until the run's first non-neutral rune.
        let mut current = Script::Common;
        for (i, &c) in runes.iter().enumerate() {
            let script = self.table.lookup(c).script;
            if script.is_neutral() || script == current {
                continue;
            }
            if i > run_start {
                self.close_run(&mut runs, runes, run_start, i, current);
                run_start = i;
            }
            current = script;
        }
        runs.push(self.make_run(runes, run_start, runes.len(), current));

        trace!("segmented {} runes into {} runs", runes.len(), runs.len());
        runs
    }

    /// Pushes the run `[start, end)`, peeling off trailing Common runes.
    fn close_run<'a>(
        &self,
        runs: &mut Vec<TextRun<'a>>,
        runes: &'a [char],
        start: usize,
        end: usize,
        script: Script,
    ) {
        let mut split = end;
        while split > start && self.table.lookup(runes[split - 1]).script == Script::Common {
            split -= 1;
        }
        if split == start {
            // Nothing but Common: keep it whole.
            runs.push(self.make_run(runes, start, end, script));
            return;
        }
        runs.push(self.make_run(runes, start, split, script));
        if split < end {
            runs.push(self.make_run(runes, split, end, Script::Common));
        }
    }

    fn make_run<'a>(
        &self,
        runes: &'a [char],
        start: usize,
        end: usize,
        script: Script,
    ) -> TextRun<'a> {
        let slice = &runes[start..end];
        let is_ltr = self.resolve_ltr(slice);
        TextRun {
            start,
            runes: slice,
            script,
            is_ltr,
        }
    }

    /// Direction comes from the bidi class of the first non-neutral rune;
    /// a run without one is left-to-right.
    pub fn resolve_ltr(&self, runes: &[char]) -> bool {
        runes
            .iter()
            .map(|&c| self.table.lookup(c))
            .find(|info| !info.script.is_neutral())
            .map_or(true, |info| !info.bidi.is_rtl())
    }
}
