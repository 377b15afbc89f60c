// src/unicode/props.rs

//! Closed enumerations for the per-code-point Unicode properties the text
//! core consumes, and their parsers from the two-letter (or short) codes used
//! in the Unicode Character Database files.

use bitflags::bitflags;

// --- General Category ---

/// Unicode general category (UnicodeData.txt field 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneralCategory {
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    ModifierLetter,
    OtherLetter,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    /// `Cn`, also what lookups of unknown code points report.
    #[default]
    Unassigned,
}

/// The seven major classes a general category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorCategory {
    Letter,
    Mark,
    Number,
    Punctuation,
    Symbol,
    Separator,
    Other,
}

impl GeneralCategory {
    pub fn from_code(code: &str) -> Option<Self> {
        use GeneralCategory::*;
        Some(match code {
            "Lu" => UppercaseLetter,
            "Ll" => LowercaseLetter,
            "Lt" => TitlecaseLetter,
            "Lm" => ModifierLetter,
            "Lo" => OtherLetter,
            "Mn" => NonspacingMark,
            "Mc" => SpacingMark,
            "Me" => EnclosingMark,
            "Nd" => DecimalNumber,
            "Nl" => LetterNumber,
            "No" => OtherNumber,
            "Pc" => ConnectorPunctuation,
            "Pd" => DashPunctuation,
            "Ps" => OpenPunctuation,
            "Pe" => ClosePunctuation,
            "Pi" => InitialPunctuation,
            "Pf" => FinalPunctuation,
            "Po" => OtherPunctuation,
            "Sm" => MathSymbol,
            "Sc" => CurrencySymbol,
            "Sk" => ModifierSymbol,
            "So" => OtherSymbol,
            "Zs" => SpaceSeparator,
            "Zl" => LineSeparator,
            "Zp" => ParagraphSeparator,
            "Cc" => Control,
            "Cf" => Format,
            "Cs" => Surrogate,
            "Co" => PrivateUse,
            "Cn" => Unassigned,
            _ => return None,
        })
    }

    pub fn major(self) -> MajorCategory {
        use GeneralCategory::*;
        match self {
            UppercaseLetter | LowercaseLetter | TitlecaseLetter | ModifierLetter | OtherLetter => {
                MajorCategory::Letter
            }
            NonspacingMark | SpacingMark | EnclosingMark => MajorCategory::Mark,
            DecimalNumber | LetterNumber | OtherNumber => MajorCategory::Number,
            ConnectorPunctuation | DashPunctuation | OpenPunctuation | ClosePunctuation
            | InitialPunctuation | FinalPunctuation | OtherPunctuation => {
                MajorCategory::Punctuation
            }
            MathSymbol | CurrencySymbol | ModifierSymbol | OtherSymbol => MajorCategory::Symbol,
            SpaceSeparator | LineSeparator | ParagraphSeparator => MajorCategory::Separator,
            Control | Format | Surrogate | PrivateUse | Unassigned => MajorCategory::Other,
        }
    }

    /// Marks and format characters are transparent to Arabic joining unless
    /// ArabicShaping.txt says otherwise.
    pub(crate) fn default_joining(self) -> JoiningType {
        match self {
            GeneralCategory::NonspacingMark
            | GeneralCategory::EnclosingMark
            | GeneralCategory::Format => JoiningType::Transparent,
            _ => JoiningType::None,
        }
    }
}

// --- Bidirectional Class ---

/// Unicode bidirectional class (UnicodeData.txt field 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BidiClass {
    #[default]
    L,
    R,
    AL,
    EN,
    ES,
    ET,
    AN,
    CS,
    NSM,
    BN,
    B,
    S,
    WS,
    ON,
    LRE,
    LRO,
    RLE,
    RLO,
    PDF,
    LRI,
    RLI,
    FSI,
    PDI,
}

impl BidiClass {
    pub fn from_code(code: &str) -> Option<Self> {
        use BidiClass::*;
        Some(match code {
            "L" => L,
            "R" => R,
            "AL" => AL,
            "EN" => EN,
            "ES" => ES,
            "ET" => ET,
            "AN" => AN,
            "CS" => CS,
            "NSM" => NSM,
            "BN" => BN,
            "B" => B,
            "S" => S,
            "WS" => WS,
            "ON" => ON,
            "LRE" => LRE,
            "LRO" => LRO,
            "RLE" => RLE,
            "RLO" => RLO,
            "PDF" => PDF,
            "LRI" => LRI,
            "RLI" => RLI,
            "FSI" => FSI,
            "PDI" => PDI,
            _ => return None,
        })
    }

    /// True for the classes that make a run right-to-left.
    /// RIGHT-TO-LEFT MARK (U+200F) carries class `R`, so it is covered too.
    pub fn is_rtl(self) -> bool {
        matches!(
            self,
            BidiClass::R | BidiClass::AL | BidiClass::RLE | BidiClass::RLO | BidiClass::RLI
        )
    }
}

// --- Joining Type ---

/// Arabic joining type (ArabicShaping.txt field 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoiningType {
    Right,
    Left,
    Dual,
    Causing,
    /// `U`, non-joining.
    #[default]
    None,
    Transparent,
}

bitflags! {
    /// Bit per joining type, so membership tests in the shaping loop are a
    /// single AND.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct JoinMask: u8 {
        const RIGHT       = 1 << 0;
        const LEFT        = 1 << 1;
        const DUAL        = 1 << 2;
        const CAUSING     = 1 << 3;
        const NONE        = 1 << 4;
        const TRANSPARENT = 1 << 5;

        /// A left neighbor with one of these joins toward the following rune.
        const JOINS_FORWARD = Self::DUAL.bits() | Self::LEFT.bits() | Self::CAUSING.bits();
        /// A right neighbor with one of these joins toward the preceding rune.
        const JOINS_BACKWARD = Self::DUAL.bits() | Self::RIGHT.bits() | Self::CAUSING.bits();
        /// A rune with one of these can connect to its preceding rune.
        const ACCEPTS_BACKWARD = Self::DUAL.bits() | Self::RIGHT.bits();
        /// A rune with one of these can connect to its following rune.
        const ACCEPTS_FORWARD = Self::DUAL.bits() | Self::LEFT.bits();
    }
}

impl JoiningType {
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "R" => JoiningType::Right,
            "L" => JoiningType::Left,
            "D" => JoiningType::Dual,
            "C" => JoiningType::Causing,
            "U" => JoiningType::None,
            "T" => JoiningType::Transparent,
            _ => return None,
        })
    }

    #[inline]
    pub fn mask(self) -> JoinMask {
        match self {
            JoiningType::Right => JoinMask::RIGHT,
            JoiningType::Left => JoinMask::LEFT,
            JoiningType::Dual => JoinMask::DUAL,
            JoiningType::Causing => JoinMask::CAUSING,
            JoiningType::None => JoinMask::NONE,
            JoiningType::Transparent => JoinMask::TRANSPARENT,
        }
    }

    #[inline]
    pub fn is_in(self, set: JoinMask) -> bool {
        set.intersects(self.mask())
    }
}

// --- Decomposition Tag ---

/// Formatting tag of a compatibility decomposition (UnicodeData.txt field 5).
/// `None` covers both canonical decompositions and runes without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecompositionTag {
    #[default]
    None,
    Font,
    NoBreak,
    Initial,
    Medial,
    Final,
    Isolated,
    Circle,
    Super,
    Sub,
    Vertical,
    Wide,
    Narrow,
    Small,
    Square,
    Fraction,
    Compat,
}

impl DecompositionTag {
    /// Parses a tag including its angle brackets, e.g. `<initial>`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "<font>" => DecompositionTag::Font,
            "<noBreak>" => DecompositionTag::NoBreak,
            "<initial>" => DecompositionTag::Initial,
            "<medial>" => DecompositionTag::Medial,
            "<final>" => DecompositionTag::Final,
            "<isolated>" => DecompositionTag::Isolated,
            "<circle>" => DecompositionTag::Circle,
            "<super>" => DecompositionTag::Super,
            "<sub>" => DecompositionTag::Sub,
            "<vertical>" => DecompositionTag::Vertical,
            "<wide>" => DecompositionTag::Wide,
            "<narrow>" => DecompositionTag::Narrow,
            "<small>" => DecompositionTag::Small,
            "<square>" => DecompositionTag::Square,
            "<fraction>" => DecompositionTag::Fraction,
            "<compat>" => DecompositionTag::Compat,
            _ => return None,
        })
    }
}

// --- Script ---

/// Unicode script of a code point, for the scripts a terminal is likely to
/// render. Everything else falls under `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Script {
    /// Script-neutral: spaces, digits, punctuation, symbols.
    Common = 0,
    /// Combining marks that take the script of their base.
    Inherited,
    Latin,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Syriac,
    Thaana,
    Nko,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Lao,
    Tibetan,
    Myanmar,
    Georgian,
    Hangul,
    Ethiopic,
    Han,
    Hiragana,
    Katakana,
    Bopomofo,
    #[default]
    Unknown,
}

impl Script {
    /// Script-neutral runes never start or break a run.
    #[inline]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Script::Common | Script::Inherited)
    }

    /// Classifies a code point by block range.
    pub fn of(cp: u32) -> Script {
        match cp {
            0x0000..=0x0040 => Script::Common,
            0x0041..=0x005A => Script::Latin,
            0x005B..=0x0060 => Script::Common,
            0x0061..=0x007A => Script::Latin,
            0x007B..=0x00A9 => Script::Common,
            0x00AA => Script::Latin,
            0x00AB..=0x00B9 => Script::Common,
            0x00BA => Script::Latin,
            0x00BB..=0x00BF => Script::Common,
            0x00C0..=0x00D6 => Script::Latin,
            0x00D7 => Script::Common,
            0x00D8..=0x00F6 => Script::Latin,
            0x00F7 => Script::Common,
            0x00F8..=0x02AF => Script::Latin,
            0x02B0..=0x02FF => Script::Common,
            0x0300..=0x036F => Script::Inherited,
            0x0370..=0x03FF => Script::Greek,
            0x0400..=0x052F => Script::Cyrillic,
            0x0530..=0x058F => Script::Armenian,
            0x0590..=0x05FF => Script::Hebrew,
            0x060C | 0x061B | 0x061F | 0x0640 => Script::Common,
            0x064B..=0x0655 | 0x0670 => Script::Inherited,
            0x0600..=0x06FF => Script::Arabic,
            0x0700..=0x074F => Script::Syriac,
            0x0750..=0x077F => Script::Arabic,
            0x0780..=0x07BF => Script::Thaana,
            0x07C0..=0x07FF => Script::Nko,
            0x0860..=0x086F => Script::Syriac,
            0x0870..=0x08FF => Script::Arabic,
            0x0900..=0x097F => Script::Devanagari,
            0x0980..=0x09FF => Script::Bengali,
            0x0A00..=0x0A7F => Script::Gurmukhi,
            0x0A80..=0x0AFF => Script::Gujarati,
            0x0B00..=0x0B7F => Script::Oriya,
            0x0B80..=0x0BFF => Script::Tamil,
            0x0C00..=0x0C7F => Script::Telugu,
            0x0C80..=0x0CFF => Script::Kannada,
            0x0D00..=0x0D7F => Script::Malayalam,
            0x0D80..=0x0DFF => Script::Sinhala,
            0x0E00..=0x0E7F => Script::Thai,
            0x0E80..=0x0EFF => Script::Lao,
            0x0F00..=0x0FFF => Script::Tibetan,
            0x1000..=0x109F => Script::Myanmar,
            0x10A0..=0x10FF => Script::Georgian,
            0x1100..=0x11FF => Script::Hangul,
            0x1200..=0x139F => Script::Ethiopic,
            0x1AB0..=0x1AFF => Script::Inherited,
            0x1C80..=0x1C8F => Script::Cyrillic,
            0x1C90..=0x1CBF => Script::Georgian,
            0x1DC0..=0x1DFF => Script::Inherited,
            0x1E00..=0x1EFF => Script::Latin,
            0x1F00..=0x1FFF => Script::Greek,
            0x200C..=0x200D => Script::Inherited,
            0x2000..=0x206F => Script::Common,
            0x2070..=0x20CF => Script::Common,
            0x20D0..=0x20FF => Script::Inherited,
            0x2100..=0x2BFF => Script::Common,
            0x2C60..=0x2C7F => Script::Latin,
            0x2D00..=0x2D2F => Script::Georgian,
            0x2D80..=0x2DDF => Script::Ethiopic,
            0x2DE0..=0x2DFF => Script::Cyrillic,
            0x2E00..=0x2E7F => Script::Common,
            0x2E80..=0x2FDF => Script::Han,
            0x3000..=0x303F => Script::Common,
            0x3040..=0x309F => Script::Hiragana,
            0x30A0..=0x30FF => Script::Katakana,
            0x3100..=0x312F => Script::Bopomofo,
            0x3130..=0x318F => Script::Hangul,
            0x31A0..=0x31BF => Script::Bopomofo,
            0x31F0..=0x31FF => Script::Katakana,
            0x3400..=0x4DBF => Script::Han,
            0x4E00..=0x9FFF => Script::Han,
            0xA640..=0xA69F => Script::Cyrillic,
            0xA720..=0xA7FF => Script::Latin,
            0xAB30..=0xAB6F => Script::Latin,
            0xAC00..=0xD7FF => Script::Hangul,
            0xF900..=0xFAFF => Script::Han,
            0xFB00..=0xFB06 => Script::Latin,
            0xFB13..=0xFB17 => Script::Armenian,
            0xFB1D..=0xFB4F => Script::Hebrew,
            0xFB50..=0xFDFF => Script::Arabic,
            0xFE00..=0xFE0F => Script::Inherited,
            0xFE20..=0xFE2F => Script::Inherited,
            0xFE10..=0xFE6F => Script::Common,
            0xFE70..=0xFEFE => Script::Arabic,
            0xFEFF => Script::Common,
            0xFF21..=0xFF3A | 0xFF41..=0xFF5A => Script::Latin,
            0xFF66..=0xFF9F => Script::Katakana,
            0xFF00..=0xFFEF => Script::Common,
            0x1F000..=0x1FAFF => Script::Common,
            0x20000..=0x3134F => Script::Han,
            0xE0100..=0xE01EF => Script::Inherited,
            _ => Script::Unknown,
        }
    }
}
