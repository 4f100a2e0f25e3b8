use crate::bidi_class::BidiClass;
use crate::category::GeneralCategory;

const CATEGORY_MASK: u32 = 0x1F;
const BIDI_SHIFT: u32 = 5;
const BIDI_MASK: u32 = 0x1F;
const DIGIT_SHIFT: u32 = 20;
const DIGIT_MASK: u32 = 0x3F;

pub(crate) const WHITESPACE: u32 = 1 << 10;
pub(crate) const MIRRORED: u32 = 1 << 11;
pub(crate) const IDENTIFIER_START: u32 = 1 << 12;
pub(crate) const IDENTIFIER_PART: u32 = 1 << 13;
pub(crate) const IDENTIFIER_IGNORABLE: u32 = 1 << 14;
pub(crate) const OTHER_LOWERCASE: u32 = 1 << 15;
pub(crate) const OTHER_UPPERCASE: u32 = 1 << 16;
pub(crate) const OTHER_ALPHABETIC: u32 = 1 << 17;
pub(crate) const IDEOGRAPHIC: u32 = 1 << 18;
pub(crate) const UPPER_EXPANDS: u32 = 1 << 19;

/// The digit value stored for codepoints that are not digits in any radix.
pub(crate) const NO_DIGIT: u32 = DIGIT_MASK;

/// The numeric value reported for codepoints without one.
pub const NO_NUMERIC_VALUE: i32 = -1;

/// The numeric value reported for codepoints whose value is not a
/// non-negative integer that fits in an `i32`, e.g., `¼`.
pub const NON_INTEGRAL_NUMERIC_VALUE: i32 = -2;

/// The smallest radix accepted by digit queries.
pub const MIN_RADIX: u32 = 2;

/// The largest radix accepted by digit queries.
pub const MAX_RADIX: u32 = 36;

/// The decoded properties of a single codepoint, as handed to a
/// `DatabaseBuilder`.
///
/// The default value describes an unassigned codepoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharProperties {
    pub category: GeneralCategory,
    pub bidi_class: BidiClass,
    pub whitespace: bool,
    pub mirrored: bool,
    pub identifier_start: bool,
    pub identifier_part: bool,
    pub identifier_ignorable: bool,
    pub other_lowercase: bool,
    pub other_uppercase: bool,
    pub other_alphabetic: bool,
    pub ideographic: bool,
    /// The value of this codepoint as a digit, in the range `0..36`.
    pub digit: Option<u8>,
    /// The numeric value, or one of `NO_NUMERIC_VALUE` and
    /// `NON_INTEGRAL_NUMERIC_VALUE`.
    pub numeric: i32,
    pub lowercase: Option<u32>,
    pub uppercase: Option<u32>,
    pub titlecase: Option<u32>,
}

impl Default for CharProperties {
    fn default() -> CharProperties {
        CharProperties {
            category: GeneralCategory::Unassigned,
            bidi_class: BidiClass::Undefined,
            whitespace: false,
            mirrored: false,
            identifier_start: false,
            identifier_part: false,
            identifier_ignorable: false,
            other_lowercase: false,
            other_uppercase: false,
            other_alphabetic: false,
            ideographic: false,
            digit: None,
            numeric: NO_NUMERIC_VALUE,
            lowercase: None,
            uppercase: None,
            titlecase: None,
        }
    }
}

/// A packed property record. Records are deduplicated within a table, so
/// anything that differs per codepoint (like case mappings) is stored as an
/// index into a side table rather than inline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Record {
    pub(crate) props: u32,
    pub(crate) numeric: i32,
    pub(crate) case: u16,
}

impl Default for Record {
    fn default() -> Record {
        Record::DEFAULT
    }
}

impl Record {
    /// The record shared by every codepoint without data. Both the
    /// `Unassigned` category and the `Undefined` bidi class encode as zero.
    pub(crate) const DEFAULT: Record = Record {
        props: NO_DIGIT << DIGIT_SHIFT,
        numeric: NO_NUMERIC_VALUE,
        case: 0,
    };

    /// Pack the given properties. `extra_flags` carries flags the builder
    /// derives itself, like `UPPER_EXPANDS`.
    pub(crate) fn encode(
        props: &CharProperties,
        extra_flags: u32,
        case: u16,
    ) -> Record {
        let mut flags = extra_flags;
        let bits = [
            (props.whitespace, WHITESPACE),
            (props.mirrored, MIRRORED),
            (props.identifier_start, IDENTIFIER_START),
            (props.identifier_part, IDENTIFIER_PART),
            (props.identifier_ignorable, IDENTIFIER_IGNORABLE),
            (props.other_lowercase, OTHER_LOWERCASE),
            (props.other_uppercase, OTHER_UPPERCASE),
            (props.other_alphabetic, OTHER_ALPHABETIC),
            (props.ideographic, IDEOGRAPHIC),
        ];
        for &(set, bit) in &bits {
            if set {
                flags |= bit;
            }
        }
        let digit = props.digit.map_or(NO_DIGIT, |d| d as u32);
        Record {
            props: Record::pack_props(
                props.category,
                props.bidi_class,
                flags,
                digit,
            ),
            numeric: props.numeric,
            case,
        }
    }

    fn pack_props(
        category: GeneralCategory,
        bidi: BidiClass,
        flags: u32,
        digit: u32,
    ) -> u32 {
        (category.code() as u32)
            | ((bidi.code() as i32 + 1) as u32) << BIDI_SHIFT
            | flags
            | (digit & DIGIT_MASK) << DIGIT_SHIFT
    }

    #[inline]
    pub(crate) fn category_code(&self) -> u8 {
        (self.props & CATEGORY_MASK) as u8
    }

    #[inline]
    pub(crate) fn bidi_code(&self) -> i8 {
        (((self.props >> BIDI_SHIFT) & BIDI_MASK) as i8) - 1
    }

    #[inline]
    pub(crate) fn category(&self) -> GeneralCategory {
        GeneralCategory::from_code(self.category_code())
            .unwrap_or(GeneralCategory::Unassigned)
    }

    #[inline]
    pub(crate) fn bidi_class(&self) -> BidiClass {
        BidiClass::from_code(self.bidi_code()).unwrap_or(BidiClass::Undefined)
    }

    #[inline]
    pub(crate) fn has(&self, flag: u32) -> bool {
        self.props & flag != 0
    }

    #[inline]
    pub(crate) fn digit_value(&self) -> u32 {
        (self.props >> DIGIT_SHIFT) & DIGIT_MASK
    }

    /// Returns the digit value in the given radix, or `-1`.
    #[inline]
    pub(crate) fn digit(&self, radix: u32) -> i32 {
        if radix < MIN_RADIX || radix > MAX_RADIX {
            return -1;
        }
        let value = self.digit_value();
        if value < radix {
            value as i32
        } else {
            -1
        }
    }

    /// Returns true if every field decodes to a valid value.
    pub(crate) fn is_valid(&self) -> bool {
        let digit = self.digit_value();
        GeneralCategory::from_code(self.category_code()).is_some()
            && BidiClass::from_code(self.bidi_code()).is_some()
            && (digit < MAX_RADIX || digit == NO_DIGIT)
            && self.props >> (DIGIT_SHIFT + 6) == 0
            && self.numeric >= NON_INTEGRAL_NUMERIC_VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record() {
        let rec = Record::default();
        let packed = Record::encode(&CharProperties::default(), 0, 0);
        assert_eq!(rec, packed);
        assert_eq!(rec.category(), GeneralCategory::Unassigned);
        assert_eq!(rec.bidi_class(), BidiClass::Undefined);
        assert_eq!(rec.numeric, NO_NUMERIC_VALUE);
        for radix in 0..=40 {
            assert_eq!(rec.digit(radix), -1);
        }
        assert!(rec.is_valid());
    }

    #[test]
    fn encode_decode() {
        let props = CharProperties {
            category: GeneralCategory::DecimalDigitNumber,
            bidi_class: BidiClass::ArabicNumber,
            identifier_part: true,
            digit: Some(7),
            numeric: 7,
            ..CharProperties::default()
        };
        let rec = Record::encode(&props, UPPER_EXPANDS, 3);
        assert_eq!(rec.category(), GeneralCategory::DecimalDigitNumber);
        assert_eq!(rec.bidi_class(), BidiClass::ArabicNumber);
        assert!(rec.has(IDENTIFIER_PART));
        assert!(rec.has(UPPER_EXPANDS));
        assert!(!rec.has(IDENTIFIER_START));
        assert_eq!(rec.digit(10), 7);
        assert_eq!(rec.digit(8), 7);
        assert_eq!(rec.digit(7), -1);
        assert_eq!(rec.digit(37), -1);
        assert_eq!(rec.case, 3);
        assert!(rec.is_valid());
    }

    #[test]
    fn invalid_codes_are_detected() {
        let mut rec = Record::DEFAULT;
        rec.props = (rec.props & !CATEGORY_MASK) | 17;
        assert!(!rec.is_valid());
        assert_eq!(rec.category(), GeneralCategory::Unassigned);

        let mut rec = Record::DEFAULT;
        rec.props |= 1 << 30;
        assert!(!rec.is_valid());
    }
}
