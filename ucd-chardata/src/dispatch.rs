use std::fmt;

use crate::bidi_class::BidiClass;
use crate::case::CaseExpansion;
use crate::category::GeneralCategory;
use crate::database::Database;
use crate::table::{
    Latin1Table, PlaneTable, PrivateUse, PropertySource, Undefined,
};

/// The closed set of property tables a codepoint can resolve to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TableKind {
    /// `U+0000..=U+00FF`.
    Latin1,
    /// The rest of the Basic Multilingual Plane.
    Plane00,
    /// The Supplementary Multilingual Plane.
    Plane01,
    /// The Supplementary Ideographic Plane.
    Plane02,
    /// The Supplementary Special-purpose Plane.
    Plane0E,
    /// Planes 15 and 16.
    PrivateUse,
    /// Everything else, including values beyond `U+10FFFF`.
    Undefined,
}

impl TableKind {
    /// A short lowercase name for this kind of table.
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Latin1 => "latin1",
            TableKind::Plane00 => "plane00",
            TableKind::Plane01 => "plane01",
            TableKind::Plane02 => "plane02",
            TableKind::Plane0E => "plane0e",
            TableKind::PrivateUse => "private-use",
            TableKind::Undefined => "undefined",
        }
    }

    /// The kind of the data table dedicated to the given plane, if any.
    pub(crate) fn for_plane(plane: u8) -> Option<TableKind> {
        match plane {
            0 => Some(TableKind::Plane00),
            1 => Some(TableKind::Plane01),
            2 => Some(TableKind::Plane02),
            14 => Some(TableKind::Plane0E),
            _ => None,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A reference to the property table that owns some codepoint.
///
/// This is what `Database::resolve` returns. It is cheap to copy and answers
/// every query by delegating to the concrete table it wraps.
#[derive(Clone, Copy, Debug)]
pub enum Table<'a> {
    Latin1(&'a Latin1Table),
    Plane(&'a PlaneTable),
    PrivateUse,
    Undefined,
}

impl<'a> Table<'a> {
    /// Return which table this is.
    pub fn kind(&self) -> TableKind {
        match *self {
            Table::Latin1(_) => TableKind::Latin1,
            Table::Plane(t) => {
                TableKind::for_plane(t.plane()).unwrap_or(TableKind::Undefined)
            }
            Table::PrivateUse => TableKind::PrivateUse,
            Table::Undefined => TableKind::Undefined,
        }
    }
}

impl Database {
    /// Select the property table that owns `cp`.
    ///
    /// Codepoints below `U+0100` take a fast path straight to the Latin-1
    /// table. Everything else is routed by plane. This never fails: values
    /// that are not codepoints at all resolve to the undefined table.
    #[inline]
    pub fn resolve(&self, cp: u32) -> Table<'_> {
        if cp >> 8 == 0 {
            return Table::Latin1(&self.latin1);
        }
        match cp >> 16 {
            0 => Table::Plane(&self.plane00),
            1 => Table::Plane(&self.plane01),
            2 => Table::Plane(&self.plane02),
            14 => Table::Plane(&self.plane0e),
            15 | 16 => Table::PrivateUse,
            _ => Table::Undefined,
        }
    }
}

macro_rules! delegate {
    ($table:expr, $t:ident => $body:expr) => {
        match *$table {
            Table::Latin1($t) => $body,
            Table::Plane($t) => $body,
            Table::PrivateUse => {
                let $t = &PrivateUse;
                $body
            }
            Table::Undefined => {
                let $t = &Undefined;
                $body
            }
        }
    };
}

impl<'a> PropertySource for Table<'a> {
    #[inline]
    fn category(&self, cp: u32) -> GeneralCategory {
        delegate!(self, t => t.category(cp))
    }

    #[inline]
    fn is_whitespace(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_whitespace(cp))
    }

    #[inline]
    fn is_mirrored(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_mirrored(cp))
    }

    #[inline]
    fn is_identifier_start(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_identifier_start(cp))
    }

    #[inline]
    fn is_identifier_part(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_identifier_part(cp))
    }

    #[inline]
    fn is_identifier_ignorable(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_identifier_ignorable(cp))
    }

    #[inline]
    fn to_lower_case(&self, cp: u32) -> u32 {
        delegate!(self, t => t.to_lower_case(cp))
    }

    #[inline]
    fn to_upper_case(&self, cp: u32) -> u32 {
        delegate!(self, t => t.to_upper_case(cp))
    }

    #[inline]
    fn to_title_case(&self, cp: u32) -> u32 {
        delegate!(self, t => t.to_title_case(cp))
    }

    fn to_upper_case_extended(&self, cp: u32) -> CaseExpansion {
        delegate!(self, t => t.to_upper_case_extended(cp))
    }

    #[inline]
    fn digit(&self, cp: u32, radix: u32) -> i32 {
        delegate!(self, t => t.digit(cp, radix))
    }

    #[inline]
    fn numeric_value(&self, cp: u32) -> i32 {
        delegate!(self, t => t.numeric_value(cp))
    }

    #[inline]
    fn directionality(&self, cp: u32) -> BidiClass {
        delegate!(self, t => t.directionality(cp))
    }

    fn mirrored_glyph(&self, cp: u32) -> Option<u32> {
        delegate!(self, t => t.mirrored_glyph(cp))
    }

    #[inline]
    fn is_other_lowercase(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_other_lowercase(cp))
    }

    #[inline]
    fn is_other_uppercase(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_other_uppercase(cp))
    }

    #[inline]
    fn is_other_alphabetic(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_other_alphabetic(cp))
    }

    #[inline]
    fn is_ideographic(&self, cp: u32) -> bool {
        delegate!(self, t => t.is_ideographic(cp))
    }
}

#[cfg(test)]
mod tests {
    use super::TableKind;
    use crate::database::Database;

    fn expected_kind(cp: u32) -> TableKind {
        if cp <= 0xFF {
            return TableKind::Latin1;
        }
        match cp >> 16 {
            0 => TableKind::Plane00,
            1 => TableKind::Plane01,
            2 => TableKind::Plane02,
            14 => TableKind::Plane0E,
            15 | 16 => TableKind::PrivateUse,
            _ => TableKind::Undefined,
        }
    }

    #[test]
    fn latin1_fast_path() {
        let db = Database::empty();
        for cp in 0..=0xFF {
            assert_eq!(db.resolve(cp).kind(), TableKind::Latin1);
        }
        assert_eq!(db.resolve(0x100).kind(), TableKind::Plane00);
    }

    #[test]
    fn resolution_is_total() {
        let db = Database::empty();
        for cp in 0..=0x10FFFF {
            assert_eq!(db.resolve(cp).kind(), expected_kind(cp), "{:X}", cp);
        }
        for &cp in &[0x110000, 0xFFFFFF, 0x1000000, u32::MAX] {
            assert_eq!(db.resolve(cp).kind(), TableKind::Undefined);
        }
    }

    #[test]
    fn plane_boundaries() {
        let db = Database::empty();
        let cases = [
            (0xFFFF, TableKind::Plane00),
            (0x10000, TableKind::Plane01),
            (0x2FFFF, TableKind::Plane02),
            (0x30000, TableKind::Undefined),
            (0xDFFFF, TableKind::Undefined),
            (0xE0000, TableKind::Plane0E),
            (0xEFFFF, TableKind::Plane0E),
            (0xF0000, TableKind::PrivateUse),
            (0x10FFFF, TableKind::PrivateUse),
        ];
        for &(cp, kind) in &cases {
            assert_eq!(db.resolve(cp).kind(), kind, "U+{:04X}", cp);
        }
    }
}
