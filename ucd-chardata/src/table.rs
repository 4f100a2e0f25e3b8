use std::mem::size_of;

use crate::bidi_class::BidiClass;
use crate::case::{CaseDeltas, CaseExpansion, UpperExpansion};
use crate::category::GeneralCategory;
use crate::record::{self, Record, NO_NUMERIC_VALUE};

/// The number of codepoints covered by one block of a plane table, and by
/// the Latin-1 table as a whole.
pub(crate) const BLOCK_LEN: usize = 256;

/// The set of classification queries every property table answers.
///
/// Every method is total: codepoints outside of a table's domain, or without
/// any data, get the same defaults an unassigned codepoint gets. Callers are
/// expected to validate codepoints and radixes themselves.
pub trait PropertySource {
    /// The General_Category of `cp`.
    fn category(&self, cp: u32) -> GeneralCategory;

    /// Whether `cp` is whitespace. Non-breaking spaces are not.
    fn is_whitespace(&self, cp: u32) -> bool;

    /// Whether `cp` has the Bidi_Mirrored property.
    fn is_mirrored(&self, cp: u32) -> bool;

    /// Whether `cp` may begin an identifier.
    fn is_identifier_start(&self, cp: u32) -> bool;

    /// Whether `cp` may continue an identifier.
    fn is_identifier_part(&self, cp: u32) -> bool;

    /// Whether `cp` is a formatting or control character that is skipped
    /// inside identifiers.
    fn is_identifier_ignorable(&self, cp: u32) -> bool;

    /// The simple lower case mapping of `cp`, or `cp` itself.
    fn to_lower_case(&self, cp: u32) -> u32;

    /// The simple upper case mapping of `cp`, or `cp` itself.
    fn to_upper_case(&self, cp: u32) -> u32;

    /// The simple title case mapping of `cp`, or `cp` itself.
    fn to_title_case(&self, cp: u32) -> u32;

    /// The full upper case mapping of `cp`, which may expand to more than
    /// one codepoint.
    fn to_upper_case_extended(&self, cp: u32) -> CaseExpansion {
        CaseExpansion::one(self.to_upper_case(cp))
    }

    /// The value of `cp` as a digit in `radix`, or `-1`.
    fn digit(&self, cp: u32, radix: u32) -> i32;

    /// The numeric value of `cp`. `-1` means there is none and `-2` means it
    /// is not a non-negative integer.
    fn numeric_value(&self, cp: u32) -> i32;

    /// The Bidi_Class of `cp`.
    fn directionality(&self, cp: u32) -> BidiClass;

    /// The codepoint whose glyph is typically the mirror image of `cp`'s.
    fn mirrored_glyph(&self, _cp: u32) -> Option<u32> {
        None
    }

    fn is_other_lowercase(&self, _cp: u32) -> bool {
        false
    }

    fn is_other_uppercase(&self, _cp: u32) -> bool {
        false
    }

    fn is_other_alphabetic(&self, _cp: u32) -> bool {
        false
    }

    fn is_ideographic(&self, _cp: u32) -> bool {
        false
    }
}

/// Per table data that is too sparse to store in every record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SideTables {
    /// Case deltas indexed by `Record::case`. Entry 0 is the identity.
    pub(crate) cases: Box<[CaseDeltas]>,
    /// Sorted by codepoint.
    pub(crate) upper: Box<[UpperExpansion]>,
    /// Pairs of (codepoint, mirroring glyph), sorted by codepoint.
    pub(crate) mirrors: Box<[(u32, u32)]>,
}

impl SideTables {
    pub(crate) fn empty() -> SideTables {
        SideTables {
            cases: vec![CaseDeltas::default()].into_boxed_slice(),
            upper: Box::new([]),
            mirrors: Box::new([]),
        }
    }

    #[inline]
    fn deltas(&self, rec: &Record) -> CaseDeltas {
        self.cases.get(rec.case as usize).cloned().unwrap_or_default()
    }

    fn upper_expansion(&self, cp: u32) -> Option<CaseExpansion> {
        self.upper
            .binary_search_by_key(&cp, |e| e.cp)
            .ok()
            .map(|i| self.upper[i].seq)
    }

    fn mirror(&self, cp: u32) -> Option<u32> {
        self.mirrors
            .binary_search_by_key(&cp, |&(k, _)| k)
            .ok()
            .map(|i| self.mirrors[i].1)
    }

    fn heap_bytes(&self) -> usize {
        self.cases.len() * size_of::<CaseDeltas>()
            + self.upper.len() * size_of::<UpperExpansion>()
            + self.mirrors.len() * size_of::<(u32, u32)>()
    }
}

/// The fast path table for codepoints `0..=0xFF`.
///
/// There is no block index: the codepoint itself selects the record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Latin1Table {
    /// Exactly `BLOCK_LEN` record indexes.
    pub(crate) index: Box<[u16]>,
    pub(crate) records: Box<[Record]>,
    pub(crate) side: SideTables,
}

impl Latin1Table {
    pub(crate) fn empty() -> Latin1Table {
        Latin1Table {
            index: vec![0; BLOCK_LEN].into_boxed_slice(),
            records: vec![Record::DEFAULT].into_boxed_slice(),
            side: SideTables::empty(),
        }
    }

    #[inline]
    fn record(&self, cp: u32) -> &Record {
        if cp >= BLOCK_LEN as u32 {
            return &Record::DEFAULT;
        }
        let i = self.index[cp as usize] as usize;
        self.records.get(i).unwrap_or(&Record::DEFAULT)
    }

    /// The number of distinct records in this table.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.index.len() * size_of::<u16>()
            + self.records.len() * size_of::<Record>()
            + self.side.heap_bytes()
    }
}

/// A two stage table covering a single plane.
///
/// The high byte of a codepoint's low 16 bits selects a block, and the low
/// byte selects a record index within that block. Identical blocks are
/// shared, which is what keeps the mostly unassigned planes small.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlaneTable {
    pub(crate) plane: u8,
    /// Exactly 256 block numbers.
    pub(crate) index: Box<[u16]>,
    /// `BLOCK_LEN` record indexes per block.
    pub(crate) blocks: Box<[u16]>,
    pub(crate) records: Box<[Record]>,
    pub(crate) side: SideTables,
}

impl PlaneTable {
    pub(crate) fn empty(plane: u8) -> PlaneTable {
        PlaneTable {
            plane,
            index: vec![0; 256].into_boxed_slice(),
            blocks: vec![0; BLOCK_LEN].into_boxed_slice(),
            records: vec![Record::DEFAULT].into_boxed_slice(),
            side: SideTables::empty(),
        }
    }

    /// The plane number this table covers.
    pub fn plane(&self) -> u8 {
        self.plane
    }

    #[inline]
    fn record(&self, cp: u32) -> &Record {
        if cp >> 16 != self.plane as u32 {
            return &Record::DEFAULT;
        }
        let block = self.index[((cp >> 8) & 0xFF) as usize] as usize;
        let slot = block * BLOCK_LEN + (cp & 0xFF) as usize;
        let i = self.blocks.get(slot).cloned().unwrap_or(0) as usize;
        self.records.get(i).unwrap_or(&Record::DEFAULT)
    }

    /// The number of distinct records in this table.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// The number of distinct blocks in this table.
    pub fn block_count(&self) -> usize {
        self.blocks.len() / BLOCK_LEN
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        (self.index.len() + self.blocks.len()) * size_of::<u16>()
            + self.records.len() * size_of::<Record>()
            + self.side.heap_bytes()
    }
}

/// Both packed tables decode records identically; only record selection
/// differs.
macro_rules! impl_packed_source {
    ($ty:ty) => {
        impl PropertySource for $ty {
            #[inline]
            fn category(&self, cp: u32) -> GeneralCategory {
                self.record(cp).category()
            }

            #[inline]
            fn is_whitespace(&self, cp: u32) -> bool {
                self.record(cp).has(record::WHITESPACE)
            }

            #[inline]
            fn is_mirrored(&self, cp: u32) -> bool {
                self.record(cp).has(record::MIRRORED)
            }

            #[inline]
            fn is_identifier_start(&self, cp: u32) -> bool {
                self.record(cp).has(record::IDENTIFIER_START)
            }

            #[inline]
            fn is_identifier_part(&self, cp: u32) -> bool {
                self.record(cp).has(record::IDENTIFIER_PART)
            }

            #[inline]
            fn is_identifier_ignorable(&self, cp: u32) -> bool {
                self.record(cp).has(record::IDENTIFIER_IGNORABLE)
            }

            #[inline]
            fn to_lower_case(&self, cp: u32) -> u32 {
                let deltas = self.side.deltas(self.record(cp));
                CaseDeltas::apply(cp, deltas.lower)
            }

            #[inline]
            fn to_upper_case(&self, cp: u32) -> u32 {
                let deltas = self.side.deltas(self.record(cp));
                CaseDeltas::apply(cp, deltas.upper)
            }

            #[inline]
            fn to_title_case(&self, cp: u32) -> u32 {
                let deltas = self.side.deltas(self.record(cp));
                CaseDeltas::apply(cp, deltas.title)
            }

            fn to_upper_case_extended(&self, cp: u32) -> CaseExpansion {
                let rec = self.record(cp);
                if rec.has(record::UPPER_EXPANDS) {
                    if let Some(seq) = self.side.upper_expansion(cp) {
                        return seq;
                    }
                }
                let deltas = self.side.deltas(rec);
                CaseExpansion::one(CaseDeltas::apply(cp, deltas.upper))
            }

            #[inline]
            fn digit(&self, cp: u32, radix: u32) -> i32 {
                self.record(cp).digit(radix)
            }

            #[inline]
            fn numeric_value(&self, cp: u32) -> i32 {
                self.record(cp).numeric
            }

            #[inline]
            fn directionality(&self, cp: u32) -> BidiClass {
                self.record(cp).bidi_class()
            }

            fn mirrored_glyph(&self, cp: u32) -> Option<u32> {
                if !self.record(cp).has(record::MIRRORED) {
                    return None;
                }
                self.side.mirror(cp)
            }

            #[inline]
            fn is_other_lowercase(&self, cp: u32) -> bool {
                self.record(cp).has(record::OTHER_LOWERCASE)
            }

            #[inline]
            fn is_other_uppercase(&self, cp: u32) -> bool {
                self.record(cp).has(record::OTHER_UPPERCASE)
            }

            #[inline]
            fn is_other_alphabetic(&self, cp: u32) -> bool {
                self.record(cp).has(record::OTHER_ALPHABETIC)
            }

            #[inline]
            fn is_ideographic(&self, cp: u32) -> bool {
                self.record(cp).has(record::IDEOGRAPHIC)
            }
        }
    };
}

impl_packed_source!(Latin1Table);
impl_packed_source!(PlaneTable);

/// The rule based table for the private use planes 15 and 16.
///
/// Every codepoint in those planes is private use, except for the two
/// noncharacters at the end of each plane.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PrivateUse;

impl PrivateUse {
    #[inline]
    fn is_noncharacter(cp: u32) -> bool {
        cp & 0xFFFE == 0xFFFE
    }
}

impl PropertySource for PrivateUse {
    #[inline]
    fn category(&self, cp: u32) -> GeneralCategory {
        if PrivateUse::is_noncharacter(cp) {
            GeneralCategory::Unassigned
        } else {
            GeneralCategory::PrivateUse
        }
    }

    fn is_whitespace(&self, _cp: u32) -> bool {
        false
    }

    fn is_mirrored(&self, _cp: u32) -> bool {
        false
    }

    fn is_identifier_start(&self, _cp: u32) -> bool {
        false
    }

    fn is_identifier_part(&self, _cp: u32) -> bool {
        false
    }

    fn is_identifier_ignorable(&self, _cp: u32) -> bool {
        false
    }

    fn to_lower_case(&self, cp: u32) -> u32 {
        cp
    }

    fn to_upper_case(&self, cp: u32) -> u32 {
        cp
    }

    fn to_title_case(&self, cp: u32) -> u32 {
        cp
    }

    fn digit(&self, _cp: u32, _radix: u32) -> i32 {
        -1
    }

    fn numeric_value(&self, _cp: u32) -> i32 {
        NO_NUMERIC_VALUE
    }

    #[inline]
    fn directionality(&self, cp: u32) -> BidiClass {
        if PrivateUse::is_noncharacter(cp) {
            BidiClass::Undefined
        } else {
            BidiClass::LeftToRight
        }
    }
}

/// The table for every codepoint no other table owns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Undefined;

impl PropertySource for Undefined {
    fn category(&self, _cp: u32) -> GeneralCategory {
        GeneralCategory::Unassigned
    }

    fn is_whitespace(&self, _cp: u32) -> bool {
        false
    }

    fn is_mirrored(&self, _cp: u32) -> bool {
        false
    }

    fn is_identifier_start(&self, _cp: u32) -> bool {
        false
    }

    fn is_identifier_part(&self, _cp: u32) -> bool {
        false
    }

    fn is_identifier_ignorable(&self, _cp: u32) -> bool {
        false
    }

    fn to_lower_case(&self, cp: u32) -> u32 {
        cp
    }

    fn to_upper_case(&self, cp: u32) -> u32 {
        cp
    }

    fn to_title_case(&self, cp: u32) -> u32 {
        cp
    }

    fn digit(&self, _cp: u32, _radix: u32) -> i32 {
        -1
    }

    fn numeric_value(&self, _cp: u32) -> i32 {
        NO_NUMERIC_VALUE
    }

    fn directionality(&self, _cp: u32) -> BidiClass {
        BidiClass::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_use_rule() {
        for &plane in &[0xF0000u32, 0x100000] {
            let pu = PrivateUse;
            assert_eq!(pu.category(plane), GeneralCategory::PrivateUse);
            assert_eq!(pu.directionality(plane), BidiClass::LeftToRight);
            for &cp in &[plane | 0xFFFE, plane | 0xFFFF] {
                assert_eq!(pu.category(cp), GeneralCategory::Unassigned);
                assert_eq!(pu.directionality(cp), BidiClass::Undefined);
            }
            let cp = plane | 0xFFFD;
            assert_eq!(pu.category(cp), GeneralCategory::PrivateUse);
            assert_eq!(pu.to_upper_case_extended(cp).as_slice(), &[cp]);
            assert_eq!(PrivateUse.digit(cp, 16), -1);
            assert!(!PrivateUse.is_identifier_part(cp));
        }
    }

    #[test]
    fn undefined_defaults() {
        for &cp in &[0x30000u32, 0xDFFFF, 0x10FFFF + 1, u32::MAX] {
            assert_eq!(Undefined.category(cp), GeneralCategory::Unassigned);
            assert_eq!(Undefined.directionality(cp), BidiClass::Undefined);
            assert_eq!(Undefined.to_lower_case(cp), cp);
            assert_eq!(Undefined.numeric_value(cp), -1);
            assert_eq!(Undefined.mirrored_glyph(cp), None);
            assert!(!Undefined.is_ideographic(cp));
        }
    }

    #[test]
    fn empty_tables_answer_defaults() {
        let latin1 = Latin1Table::empty();
        let plane = PlaneTable::empty(1);
        for &cp in &[0x41u32, 0xFF] {
            assert_eq!(latin1.category(cp), GeneralCategory::Unassigned);
            assert_eq!(latin1.to_upper_case(cp), cp);
        }
        assert_eq!(plane.category(0x10400), GeneralCategory::Unassigned);
        assert_eq!(plane.directionality(0x10400), BidiClass::Undefined);
        assert_eq!(plane.block_count(), 1);
        assert_eq!(plane.record_count(), 1);
    }

    #[test]
    fn out_of_domain_queries_answer_defaults() {
        let mut latin1 = Latin1Table::empty();
        let rec = Record::encode(
            &record::CharProperties {
                category: GeneralCategory::UppercaseLetter,
                ..record::CharProperties::default()
            },
            0,
            0,
        );
        latin1.records = vec![Record::DEFAULT, rec].into_boxed_slice();
        latin1.index[0x41] = 1;
        assert_eq!(latin1.category(0x41), GeneralCategory::UppercaseLetter);
        assert_eq!(latin1.category(0x141), GeneralCategory::Unassigned);

        let plane = PlaneTable::empty(2);
        assert_eq!(plane.category(0x10041), GeneralCategory::Unassigned);
    }
}
