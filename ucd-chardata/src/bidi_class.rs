use std::fmt;

/// The Bidi_Class (directionality) of a codepoint.
///
/// Like `GeneralCategory`, each discriminant is a stable code. `Undefined`
/// is `-1` and is what codepoints without any assigned character report.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(i8)]
pub enum BidiClass {
    Undefined = -1,
    LeftToRight = 0,
    RightToLeft = 1,
    ArabicLetter = 2,
    EuropeanNumber = 3,
    EuropeanSeparator = 4,
    EuropeanTerminator = 5,
    ArabicNumber = 6,
    CommonSeparator = 7,
    NonspacingMark = 8,
    BoundaryNeutral = 9,
    ParagraphSeparator = 10,
    SegmentSeparator = 11,
    WhiteSpace = 12,
    OtherNeutral = 13,
    LeftToRightEmbedding = 14,
    LeftToRightOverride = 15,
    RightToLeftEmbedding = 16,
    RightToLeftOverride = 17,
    PopDirectionalFormat = 18,
    LeftToRightIsolate = 19,
    RightToLeftIsolate = 20,
    FirstStrongIsolate = 21,
    PopDirectionalIsolate = 22,
}

use self::BidiClass::*;

/// Every class in code order, starting at `Undefined`.
const CLASSES: &[(BidiClass, &str)] = &[
    (Undefined, "Undefined"),
    (LeftToRight, "L"),
    (RightToLeft, "R"),
    (ArabicLetter, "AL"),
    (EuropeanNumber, "EN"),
    (EuropeanSeparator, "ES"),
    (EuropeanTerminator, "ET"),
    (ArabicNumber, "AN"),
    (CommonSeparator, "CS"),
    (NonspacingMark, "NSM"),
    (BoundaryNeutral, "BN"),
    (ParagraphSeparator, "B"),
    (SegmentSeparator, "S"),
    (WhiteSpace, "WS"),
    (OtherNeutral, "ON"),
    (LeftToRightEmbedding, "LRE"),
    (LeftToRightOverride, "LRO"),
    (RightToLeftEmbedding, "RLE"),
    (RightToLeftOverride, "RLO"),
    (PopDirectionalFormat, "PDF"),
    (LeftToRightIsolate, "LRI"),
    (RightToLeftIsolate, "RLI"),
    (FirstStrongIsolate, "FSI"),
    (PopDirectionalIsolate, "PDI"),
];

impl BidiClass {
    /// Return the stable numeric code of this class.
    #[inline]
    pub fn code(self) -> i8 {
        self as i8
    }

    /// Return the class with the given stable code, if one exists.
    #[inline]
    pub fn from_code(code: i8) -> Option<BidiClass> {
        let index = (code as i16) + 1;
        if index < 0 || index as usize >= CLASSES.len() {
            return None;
        }
        Some(CLASSES[index as usize].0)
    }

    /// Look up a class by its UCD abbreviation, e.g., `AL`.
    ///
    /// `Undefined` has no abbreviation in the UCD and is never returned.
    pub fn from_abbreviation(abbrev: &str) -> Option<BidiClass> {
        CLASSES[1..]
            .iter()
            .find(|&&(_, name)| name == abbrev)
            .map(|&(class, _)| class)
    }

    /// Return the UCD abbreviation of this class.
    pub fn abbreviation(self) -> &'static str {
        CLASSES[(self.code() as i16 + 1) as usize].1
    }
}

impl Default for BidiClass {
    fn default() -> BidiClass {
        Undefined
    }
}

impl fmt::Display for BidiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}
