use once_cell::sync::OnceCell;

use crate::bidi_class::BidiClass;
use crate::case::CaseExpansion;
use crate::category::GeneralCategory;
use crate::dispatch::TableKind;
use crate::table::{Latin1Table, PlaneTable, PropertySource};

/// An immutable, loaded character property database.
///
/// A database owns one packed table for Latin-1, and one for each of planes
/// 0, 1, 2 and 14. The private use planes and everything else are answered
/// by rule, so they carry no data. Every accessor resolves the owning table
/// with `resolve` and delegates to it.
///
/// Databases are built with a `DatabaseBuilder` or decoded from the compiled
/// format with `Database::from_bytes`. They are never mutated afterwards and
/// can be shared freely between threads.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Database {
    pub(crate) unicode_version: Option<String>,
    pub(crate) latin1: Latin1Table,
    pub(crate) plane00: PlaneTable,
    pub(crate) plane01: PlaneTable,
    pub(crate) plane02: PlaneTable,
    pub(crate) plane0e: PlaneTable,
}

/// Size information about a single data table in a database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableStats {
    pub kind: TableKind,
    pub records: usize,
    pub blocks: usize,
    pub heap_bytes: usize,
}

impl Database {
    /// A database without any character data.
    ///
    /// Every codepoint answers with the unassigned defaults, except for the
    /// private use planes, which are rule based and need no data.
    pub fn empty() -> Database {
        Database {
            unicode_version: None,
            latin1: Latin1Table::empty(),
            plane00: PlaneTable::empty(0),
            plane01: PlaneTable::empty(1),
            plane02: PlaneTable::empty(2),
            plane0e: PlaneTable::empty(14),
        }
    }

    /// The version of Unicode this database was built from, if known.
    pub fn unicode_version(&self) -> Option<&str> {
        self.unicode_version.as_ref().map(|v| &**v)
    }

    /// Return size information for each data table, in dispatch order.
    pub fn stats(&self) -> Vec<TableStats> {
        let mut stats = vec![TableStats {
            kind: TableKind::Latin1,
            records: self.latin1.record_count(),
            blocks: 1,
            heap_bytes: self.latin1.heap_bytes(),
        }];
        for plane in self.planes() {
            stats.push(TableStats {
                kind: TableKind::for_plane(plane.plane())
                    .unwrap_or(TableKind::Undefined),
                records: plane.record_count(),
                blocks: plane.block_count(),
                heap_bytes: plane.heap_bytes(),
            });
        }
        stats
    }

    pub(crate) fn planes(&self) -> [&PlaneTable; 4] {
        [&self.plane00, &self.plane01, &self.plane02, &self.plane0e]
    }

    /// The General_Category of `cp`.
    #[inline]
    pub fn category(&self, cp: u32) -> GeneralCategory {
        self.resolve(cp).category(cp)
    }

    /// Whether `cp` is whitespace.
    ///
    /// This includes the space separators other than the non-breaking ones,
    /// the line and paragraph separators, and the ASCII control codes
    /// `U+0009..=U+000D` and `U+001C..=U+001F`.
    #[inline]
    pub fn is_whitespace(&self, cp: u32) -> bool {
        self.resolve(cp).is_whitespace(cp)
    }

    /// Whether `cp` has the Bidi_Mirrored property.
    #[inline]
    pub fn is_mirrored(&self, cp: u32) -> bool {
        self.resolve(cp).is_mirrored(cp)
    }

    /// Whether `cp` may begin an identifier.
    #[inline]
    pub fn is_identifier_start(&self, cp: u32) -> bool {
        self.resolve(cp).is_identifier_start(cp)
    }

    /// Whether `cp` may continue an identifier.
    #[inline]
    pub fn is_identifier_part(&self, cp: u32) -> bool {
        self.resolve(cp).is_identifier_part(cp)
    }

    /// Whether `cp` should be ignored inside identifiers.
    #[inline]
    pub fn is_identifier_ignorable(&self, cp: u32) -> bool {
        self.resolve(cp).is_identifier_ignorable(cp)
    }

    #[inline]
    pub fn to_lower_case(&self, cp: u32) -> u32 {
        self.resolve(cp).to_lower_case(cp)
    }

    #[inline]
    pub fn to_upper_case(&self, cp: u32) -> u32 {
        self.resolve(cp).to_upper_case(cp)
    }

    #[inline]
    pub fn to_title_case(&self, cp: u32) -> u32 {
        self.resolve(cp).to_title_case(cp)
    }

    /// The unconditional full upper case mapping of `cp`.
    ///
    /// This agrees with `to_upper_case` except for the codepoints that
    /// expand to more than one codepoint, like `ß` to `SS`.
    pub fn to_upper_case_extended(&self, cp: u32) -> CaseExpansion {
        self.resolve(cp).to_upper_case_extended(cp)
    }

    /// The value of `cp` as a digit in `radix`.
    ///
    /// Returns `-1` when `cp` is not a digit in `radix`, and also when
    /// `radix` is outside of `MIN_RADIX..=MAX_RADIX`.
    #[inline]
    pub fn digit(&self, cp: u32, radix: u32) -> i32 {
        self.resolve(cp).digit(cp, radix)
    }

    /// The numeric value of `cp`.
    ///
    /// Returns `-1` when `cp` has no numeric value and `-2` when its value
    /// is not a non-negative integer that fits in an `i32`.
    #[inline]
    pub fn numeric_value(&self, cp: u32) -> i32 {
        self.resolve(cp).numeric_value(cp)
    }

    #[inline]
    pub fn directionality(&self, cp: u32) -> BidiClass {
        self.resolve(cp).directionality(cp)
    }

    pub fn mirrored_glyph(&self, cp: u32) -> Option<u32> {
        self.resolve(cp).mirrored_glyph(cp)
    }

    #[inline]
    pub fn is_other_lowercase(&self, cp: u32) -> bool {
        self.resolve(cp).is_other_lowercase(cp)
    }

    #[inline]
    pub fn is_other_uppercase(&self, cp: u32) -> bool {
        self.resolve(cp).is_other_uppercase(cp)
    }

    #[inline]
    pub fn is_other_alphabetic(&self, cp: u32) -> bool {
        self.resolve(cp).is_other_alphabetic(cp)
    }

    #[inline]
    pub fn is_ideographic(&self, cp: u32) -> bool {
        self.resolve(cp).is_ideographic(cp)
    }

    #[inline]
    pub fn is_lowercase(&self, cp: u32) -> bool {
        let t = self.resolve(cp);
        t.category(cp) == GeneralCategory::LowercaseLetter
            || t.is_other_lowercase(cp)
    }

    #[inline]
    pub fn is_uppercase(&self, cp: u32) -> bool {
        let t = self.resolve(cp);
        t.category(cp) == GeneralCategory::UppercaseLetter
            || t.is_other_uppercase(cp)
    }

    #[inline]
    pub fn is_titlecase(&self, cp: u32) -> bool {
        self.category(cp) == GeneralCategory::TitlecaseLetter
    }

    #[inline]
    pub fn is_letter(&self, cp: u32) -> bool {
        self.category(cp).is_letter()
    }

    /// Whether `cp` is a decimal digit (General_Category=Nd).
    #[inline]
    pub fn is_digit(&self, cp: u32) -> bool {
        self.category(cp) == GeneralCategory::DecimalDigitNumber
    }

    #[inline]
    pub fn is_letter_or_digit(&self, cp: u32) -> bool {
        let cat = self.category(cp);
        cat.is_letter() || cat == GeneralCategory::DecimalDigitNumber
    }

    /// Whether `cp` is alphabetic: a letter, a letter number, or marked
    /// Other_Alphabetic.
    #[inline]
    pub fn is_alphabetic(&self, cp: u32) -> bool {
        let t = self.resolve(cp);
        let cat = t.category(cp);
        cat.is_letter()
            || cat == GeneralCategory::LetterNumber
            || t.is_other_alphabetic(cp)
    }

    /// Whether `cp` is a space, line or paragraph separator. Unlike
    /// `is_whitespace`, this includes non-breaking spaces.
    #[inline]
    pub fn is_space_char(&self, cp: u32) -> bool {
        self.category(cp).is_separator()
    }

    /// Whether `cp` is assigned, including private use codepoints.
    #[inline]
    pub fn is_defined(&self, cp: u32) -> bool {
        self.category(cp) != GeneralCategory::Unassigned
    }

    /// Whether `cp` is an ISO control character. This needs no table.
    #[inline]
    pub fn is_iso_control(&self, cp: u32) -> bool {
        cp <= 0x1F || (0x7F <= cp && cp <= 0x9F)
    }
}

static GLOBAL: OnceCell<Database> = OnceCell::new();

/// Install the process wide database.
///
/// This succeeds at most once. If a database was already installed, or
/// `global` was already called, the given database is handed back.
pub fn install(db: Database) -> Result<(), Database> {
    let version = db.unicode_version().unwrap_or("unknown").to_string();
    GLOBAL.set(db)?;
    log::debug!("installed global database (Unicode {})", version);
    Ok(())
}

/// Return the process wide database.
///
/// If nothing was installed before the first call, an empty database is
/// installed instead and stays in place for the life of the process.
pub fn global() -> &'static Database {
    GLOBAL.get_or_init(|| {
        log::debug!("no database installed, using an empty database");
        Database::empty()
    })
}
