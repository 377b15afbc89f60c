// src/unicode/loader.rs

//! Builds a [`RuneTable`] from `UnicodeData.txt` and `ArabicShaping.txt`.
//!
//! Everything is assembled in a private [`TableBuilder`]; the finished table
//! is only handed out once both sources parsed cleanly, so a failed load
//! never leaves a half-populated table behind.

use super::props::{BidiClass, DecompositionTag, GeneralCategory, JoiningType, Script};
use super::table::{RuneInfo, RuneRange, RuneTable, BMP_SIZE, NO_ENTRY};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const UNICODE_DATA: &str = "UnicodeData.txt";
const ARABIC_SHAPING: &str = "ArabicShaping.txt";
const UNICODE_DATA_FIELDS: usize = 15;
const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Fatal errors while building a rune table.
#[derive(Debug, thiserror::Error)]
pub enum RuneTableError {
    #[error("failed to read {source_name}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{source_name}:{line}: {reason}")]
    Malformed {
        source_name: String,
        line: usize,
        reason: String,
    },
    #[error("{source_name}:{line}: range at U+{first:04X} has no matching Last entry")]
    UnpairedRange {
        source_name: String,
        line: usize,
        first: u32,
    },
}

impl RuneTable {
    /// Builds a table from the two bulk data files on disk.
    pub fn from_paths(unicode_data: &Path, arabic_shaping: &Path) -> Result<Self, RuneTableError> {
        let open = |path: &Path| {
            File::open(path)
                .map(BufReader::new)
                .map_err(|source| RuneTableError::Io {
                    source_name: path.display().to_string(),
                    source,
                })
        };
        let unicode_reader = open(unicode_data)?;
        let shaping_reader = open(arabic_shaping)?;
        build(
            unicode_reader,
            &unicode_data.display().to_string(),
            shaping_reader,
            &arabic_shaping.display().to_string(),
        )
    }

    /// Builds a table from any two readers holding the bulk data.
    pub fn from_readers<U: BufRead, A: BufRead>(
        unicode_data: U,
        arabic_shaping: A,
    ) -> Result<Self, RuneTableError> {
        build(unicode_data, UNICODE_DATA, arabic_shaping, ARABIC_SHAPING)
    }
}

fn build<U: BufRead, A: BufRead>(
    unicode_data: U,
    unicode_name: &str,
    arabic_shaping: A,
    shaping_name: &str,
) -> Result<RuneTable, RuneTableError> {
    let mut builder = TableBuilder::new();
    builder.read_unicode_data(unicode_data, unicode_name)?;
    builder.read_arabic_shaping(arabic_shaping, shaping_name)?;
    builder.link_equivalents();
    let table = builder.finish();
    info!(
        "Rune table built: {} records, {} supplementary ranges",
        table.infos.len(),
        table.ranges.len()
    );
    Ok(table)
}

/// A `<..., First>` line waiting for its `<..., Last>` partner.
struct OpenRange {
    first: u32,
    line: usize,
    info: RuneInfo,
}

struct TableBuilder {
    infos: Vec<RuneInfo>,
    /// Parallel to `infos`: false for records shared by a whole range.
    single: Vec<bool>,
    bmp: Vec<u32>,
    supplementary: HashMap<u32, u32>,
    ranges: Vec<RuneRange>,
    /// (source, target) of every single-code-point decomposition.
    links: Vec<(u32, u32)>,
}

impl TableBuilder {
    fn new() -> Self {
        TableBuilder {
            infos: Vec::new(),
            single: Vec::new(),
            bmp: vec![NO_ENTRY; BMP_SIZE],
            supplementary: HashMap::new(),
            ranges: Vec::new(),
            links: Vec::new(),
        }
    }

    fn read_unicode_data<R: BufRead>(
        &mut self,
        reader: R,
        source_name: &str,
    ) -> Result<(), RuneTableError> {
        let malformed = |line: usize, reason: String| RuneTableError::Malformed {
            source_name: source_name.to_string(),
            line,
            reason,
        };
        let unpaired = |line: usize, first: u32| RuneTableError::UnpairedRange {
            source_name: source_name.to_string(),
            line,
            first,
        };

        let mut open_range: Option<OpenRange> = None;
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| RuneTableError::Io {
                source_name: source_name.to_string(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(';').collect();
            if fields.len() != UNICODE_DATA_FIELDS {
                return Err(malformed(
                    line_no,
                    format!("expected {} fields, found {}", UNICODE_DATA_FIELDS, fields.len()),
                ));
            }
            let cp = parse_code_point(fields[0]).map_err(|reason| malformed(line_no, reason))?;
            let category = GeneralCategory::from_code(fields[2]).ok_or_else(|| {
                malformed(line_no, format!("unknown general category {:?}", fields[2]))
            })?;
            let bidi = BidiClass::from_code(fields[4])
                .ok_or_else(|| malformed(line_no, format!("unknown bidi class {:?}", fields[4])))?;
            let (decomposition_tag, mapping) =
                parse_decomposition(fields[5]).map_err(|reason| malformed(line_no, reason))?;

            let info = RuneInfo {
                category,
                bidi,
                joining: category.default_joining(),
                decomposition_tag,
                equivalents: Vec::new(),
                script: Script::of(cp),
            };

            let name = fields[1];
            if name.ends_with(", First>") {
                if let Some(open) = &open_range {
                    return Err(unpaired(open.line, open.first));
                }
                open_range = Some(OpenRange { first: cp, line: line_no, info });
                continue;
            }
            if name.ends_with(", Last>") {
                let open = open_range.take().ok_or_else(|| unpaired(line_no, cp))?;
                if cp < open.first {
                    return Err(malformed(
                        line_no,
                        format!("range end U+{:04X} precedes start U+{:04X}", cp, open.first),
                    ));
                }
                self.insert_range(open.first, cp, open.info);
                continue;
            }
            if let Some(open) = &open_range {
                return Err(unpaired(open.line, open.first));
            }
            if char::from_u32(cp).is_none() {
                return Err(malformed(line_no, format!("U+{:04X} is not a scalar value", cp)));
            }
            if self.index_of(cp).is_some() {
                return Err(malformed(line_no, format!("duplicate entry for U+{:04X}", cp)));
            }

            self.insert(cp, info);
            if let [target] = mapping.as_slice() {
                self.links.push((cp, *target));
            }
        }

        match open_range {
            Some(open) => Err(unpaired(open.line, open.first)),
            None => Ok(()),
        }
    }

    fn read_arabic_shaping<R: BufRead>(
        &mut self,
        reader: R,
        source_name: &str,
    ) -> Result<(), RuneTableError> {
        let malformed = |line: usize, reason: String| RuneTableError::Malformed {
            source_name: source_name.to_string(),
            line,
            reason,
        };

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| RuneTableError::Io {
                source_name: source_name.to_string(),
                source,
            })?;
            let content = line.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let fields: Vec<&str> = content.split(';').map(str::trim).collect();
            if fields.len() < 3 {
                return Err(malformed(
                    line_no,
                    format!("expected at least 3 fields, found {}", fields.len()),
                ));
            }
            let cp = parse_code_point(fields[0]).map_err(|reason| malformed(line_no, reason))?;
            let joining = JoiningType::from_code(fields[2]).ok_or_else(|| {
                malformed(line_no, format!("unknown joining type {:?}", fields[2]))
            })?;

            match self.single_entry_mut(cp) {
                Some(info) => info.joining = joining,
                None => warn!(
                    "{}:{}: U+{:04X} has joining data but no character data, skipped",
                    source_name, line_no, cp
                ),
            }
        }
        Ok(())
    }

    /// Records every decomposition link in both directions.
    fn link_equivalents(&mut self) {
        let links = std::mem::take(&mut self.links);
        for (source, target) in links {
            let (Some(source_char), Some(target_char)) =
                (char::from_u32(source), char::from_u32(target))
            else {
                continue;
            };
            if let Some(info) = self.single_entry_mut(source) {
                push_unique(&mut info.equivalents, target_char);
            }
            match self.single_entry_mut(target) {
                Some(info) => push_unique(&mut info.equivalents, source_char),
                None => debug!(
                    "U+{:04X} decomposes to U+{:04X}, which has no entry; linked one way only",
                    source, target
                ),
            }
        }
    }

    fn finish(mut self) -> RuneTable {
        self.ranges.sort_by_key(|r| r.first);
        RuneTable {
            infos: self.infos,
            bmp: self.bmp.into_boxed_slice(),
            supplementary: self.supplementary,
            ranges: self.ranges,
        }
    }

    fn push_info(&mut self, info: RuneInfo, single: bool) -> u32 {
        let idx = self.infos.len() as u32;
        self.infos.push(info);
        self.single.push(single);
        idx
    }

    fn insert(&mut self, cp: u32, info: RuneInfo) {
        let idx = self.push_info(info, true);
        match self.bmp.get_mut(cp as usize) {
            Some(slot) => *slot = idx,
            None => {
                self.supplementary.insert(cp, idx);
            }
        }
    }

    fn insert_range(&mut self, first: u32, last: u32, info: RuneInfo) {
        let idx = self.push_info(info, false);
        let bmp_last = BMP_SIZE as u32 - 1;
        if first <= bmp_last {
            let end = last.min(bmp_last);
            self.bmp[first as usize..=end as usize].fill(idx);
        }
        if last > bmp_last {
            self.ranges.push(RuneRange {
                first: first.max(bmp_last + 1),
                last,
                info: idx,
            });
        }
    }

    fn index_of(&self, cp: u32) -> Option<u32> {
        match self.bmp.get(cp as usize) {
            Some(&idx) => (idx != NO_ENTRY).then_some(idx),
            None => self.supplementary.get(&cp).copied(),
        }
    }

    /// The record owned by `cp` alone; records shared by a range are never
    /// handed out, so per-code-point edits cannot leak into the whole range.
    fn single_entry_mut(&mut self, cp: u32) -> Option<&mut RuneInfo> {
        let idx = self.index_of(cp)? as usize;
        if !self.single[idx] {
            return None;
        }
        self.infos.get_mut(idx)
    }
}

fn push_unique(set: &mut Vec<char>, c: char) {
    if !set.contains(&c) {
        set.push(c);
    }
}

fn parse_code_point(field: &str) -> Result<u32, String> {
    let field = field.trim();
    let cp = u32::from_str_radix(field, 16).map_err(|_| format!("invalid code point {:?}", field))?;
    if cp > MAX_CODE_POINT {
        return Err(format!("code point {:?} is beyond U+10FFFF", field));
    }
    Ok(cp)
}

/// Splits a decomposition field into its tag and mapped code points.
fn parse_decomposition(field: &str) -> Result<(DecompositionTag, Vec<u32>), String> {
    let mut parts = field.split_whitespace().peekable();
    let tag = match parts.peek() {
        Some(first) if first.starts_with('<') => {
            let tag = DecompositionTag::from_tag(first)
                .ok_or_else(|| format!("unknown decomposition tag {:?}", first))?;
            parts.next();
            tag
        }
        _ => DecompositionTag::None,
    };
    let mapping = parts.map(parse_code_point).collect::<Result<Vec<_>, _>>()?;
    if tag != DecompositionTag::None && mapping.is_empty() {
        return Err(format!("decomposition {:?} has a tag but no mapping", field));
    }
    Ok((tag, mapping))
}
