// src/unicode/mod.rs

//! Static Unicode character data.
//!
//! A [`RuneTable`] is built once from the bulk Unicode Character Database
//! files and is read-only afterwards, so it can be shared between the run
//! segmenter and the shaper through an `Arc` without any locking.

mod loader;
mod props;
mod table;

pub use loader::RuneTableError;
pub use props::{
    BidiClass, DecompositionTag, GeneralCategory, JoinMask, JoiningType, MajorCategory, Script,
};
pub use table::{RuneInfo, RuneTable};

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared rune table built from the sample data under `tests/data`.

    use super::RuneTable;
    use once_cell::sync::Lazy;
    use std::sync::Arc;

    pub const UNICODE_DATA: &str = include_str!("../../tests/data/UnicodeData.sample.txt");
    pub const ARABIC_SHAPING: &str = include_str!("../../tests/data/ArabicShaping.sample.txt");

    static SAMPLE_TABLE: Lazy<Arc<RuneTable>> = Lazy::new(|| {
        Arc::new(
            RuneTable::from_readers(UNICODE_DATA.as_bytes(), ARABIC_SHAPING.as_bytes())
                .expect("sample Unicode data must load"),
        )
    });

    pub fn sample_table() -> Arc<RuneTable> {
        Arc::clone(&SAMPLE_TABLE)
    }
}

#[cfg(test)]
mod tests;
