// src/unicode/table.rs

//! The immutable per-code-point property table.
//!
//! Storage is split three ways so the shaping hot loop never hashes a BMP
//! code point: a dense index array for U+0000..=U+FFFF, a hash map for
//! individually listed supplementary code points, and a sorted list of
//! supplementary ranges (the `<..., First>`/`<..., Last>` blocks of
//! UnicodeData.txt) searched by bisection.

use super::props::{BidiClass, DecompositionTag, GeneralCategory, JoiningType, Script};
use std::collections::HashMap;

/// Marks a BMP slot without an entry.
pub(super) const NO_ENTRY: u32 = u32::MAX;
pub(super) const BMP_SIZE: usize = 0x1_0000;

/// Static Unicode properties of one code point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuneInfo {
    pub category: GeneralCategory,
    pub bidi: BidiClass,
    pub joining: JoiningType,
    pub decomposition_tag: DecompositionTag,
    /// Code points linked to this one by a single-code-point decomposition,
    /// in either direction.
    pub equivalents: Vec<char>,
    pub script: Script,
}

/// Record returned for code points the table knows nothing about.
static UNKNOWN_RUNE: RuneInfo = RuneInfo {
    category: GeneralCategory::Unassigned,
    bidi: BidiClass::L,
    joining: JoiningType::None,
    decomposition_tag: DecompositionTag::None,
    equivalents: Vec::new(),
    script: Script::Unknown,
};

/// A block of supplementary-plane code points sharing one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RuneRange {
    pub first: u32,
    pub last: u32,
    pub info: u32,
}

/// Read-only mapping from code point to [`RuneInfo`].
///
/// Built once by [`RuneTable::from_readers`] or [`RuneTable::from_paths`]
/// and then shared (typically behind an `Arc`) by every reader.
#[derive(Debug, Clone)]
pub struct RuneTable {
    pub(super) infos: Vec<RuneInfo>,
    pub(super) bmp: Box<[u32]>,
    pub(super) supplementary: HashMap<u32, u32>,
    pub(super) ranges: Vec<RuneRange>,
}

impl RuneTable {
    /// Returns the properties of `c`, or a default record (category
    /// unassigned, bidi L, joining None, script Unknown) if the table has
    /// no entry for it.
    #[inline]
    pub fn lookup(&self, c: char) -> &RuneInfo {
        match self.index_of(c as u32) {
            Some(idx) => &self.infos[idx as usize],
            None => &UNKNOWN_RUNE,
        }
    }

    /// True if the bulk data listed `c`, either singly or inside a range.
    pub fn contains(&self, c: char) -> bool {
        self.index_of(c as u32).is_some()
    }

    /// Number of distinct records. A range counts once.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    #[inline]
    fn index_of(&self, cp: u32) -> Option<u32> {
        if let Some(&idx) = self.bmp.get(cp as usize) {
            return (idx != NO_ENTRY).then_some(idx);
        }
        if let Some(&idx) = self.supplementary.get(&cp) {
            return Some(idx);
        }
        // Ranges are sorted and disjoint.
        let pos = self.ranges.partition_point(|r| r.last < cp);
        self.ranges
            .get(pos)
            .filter(|r| r.first <= cp)
            .map(|r| r.info)
    }
}
