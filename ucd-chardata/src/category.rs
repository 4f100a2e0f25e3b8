use std::fmt;

/// The General_Category of a codepoint.
///
/// The discriminant of each variant is its stable numeric code. These codes
/// are written into compiled databases and handed to callers, so they must
/// never change. Code `17` is intentionally unused.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum GeneralCategory {
    Unassigned = 0,
    UppercaseLetter = 1,
    LowercaseLetter = 2,
    TitlecaseLetter = 3,
    ModifierLetter = 4,
    OtherLetter = 5,
    NonSpacingMark = 6,
    EnclosingMark = 7,
    CombiningSpacingMark = 8,
    DecimalDigitNumber = 9,
    LetterNumber = 10,
    OtherNumber = 11,
    SpaceSeparator = 12,
    LineSeparator = 13,
    ParagraphSeparator = 14,
    Control = 15,
    Format = 16,
    PrivateUse = 18,
    Surrogate = 19,
    DashPunctuation = 20,
    StartPunctuation = 21,
    EndPunctuation = 22,
    ConnectorPunctuation = 23,
    OtherPunctuation = 24,
    MathSymbol = 25,
    CurrencySymbol = 26,
    ModifierSymbol = 27,
    OtherSymbol = 28,
    InitialQuotePunctuation = 29,
    FinalQuotePunctuation = 30,
}

use self::GeneralCategory::*;

/// Every category paired with its UCD abbreviation, ordered by code.
const ABBREVIATIONS: &[(GeneralCategory, &str)] = &[
    (Unassigned, "Cn"),
    (UppercaseLetter, "Lu"),
    (LowercaseLetter, "Ll"),
    (TitlecaseLetter, "Lt"),
    (ModifierLetter, "Lm"),
    (OtherLetter, "Lo"),
    (NonSpacingMark, "Mn"),
    (EnclosingMark, "Me"),
    (CombiningSpacingMark, "Mc"),
    (DecimalDigitNumber, "Nd"),
    (LetterNumber, "Nl"),
    (OtherNumber, "No"),
    (SpaceSeparator, "Zs"),
    (LineSeparator, "Zl"),
    (ParagraphSeparator, "Zp"),
    (Control, "Cc"),
    (Format, "Cf"),
    (PrivateUse, "Co"),
    (Surrogate, "Cs"),
    (DashPunctuation, "Pd"),
    (StartPunctuation, "Ps"),
    (EndPunctuation, "Pe"),
    (ConnectorPunctuation, "Pc"),
    (OtherPunctuation, "Po"),
    (MathSymbol, "Sm"),
    (CurrencySymbol, "Sc"),
    (ModifierSymbol, "Sk"),
    (OtherSymbol, "So"),
    (InitialQuotePunctuation, "Pi"),
    (FinalQuotePunctuation, "Pf"),
];

impl GeneralCategory {
    /// Return the stable numeric code of this category.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Return the category with the given stable code, if one exists.
    #[inline]
    pub fn from_code(code: u8) -> Option<GeneralCategory> {
        Some(match code {
            0 => Unassigned,
            1 => UppercaseLetter,
            2 => LowercaseLetter,
            3 => TitlecaseLetter,
            4 => ModifierLetter,
            5 => OtherLetter,
            6 => NonSpacingMark,
            7 => EnclosingMark,
            8 => CombiningSpacingMark,
            9 => DecimalDigitNumber,
            10 => LetterNumber,
            11 => OtherNumber,
            12 => SpaceSeparator,
            13 => LineSeparator,
            14 => ParagraphSeparator,
            15 => Control,
            16 => Format,
            18 => PrivateUse,
            19 => Surrogate,
            20 => DashPunctuation,
            21 => StartPunctuation,
            22 => EndPunctuation,
            23 => ConnectorPunctuation,
            24 => OtherPunctuation,
            25 => MathSymbol,
            26 => CurrencySymbol,
            27 => ModifierSymbol,
            28 => OtherSymbol,
            29 => InitialQuotePunctuation,
            30 => FinalQuotePunctuation,
            _ => return None,
        })
    }

    /// Look up a category by its two letter UCD abbreviation, e.g., `Lu`.
    pub fn from_abbreviation(abbrev: &str) -> Option<GeneralCategory> {
        ABBREVIATIONS
            .iter()
            .find(|&&(_, name)| name == abbrev)
            .map(|&(cat, _)| cat)
    }

    /// Return the two letter UCD abbreviation of this category.
    pub fn abbreviation(self) -> &'static str {
        ABBREVIATIONS
            .iter()
            .find(|&&(cat, _)| cat == self)
            .map(|&(_, name)| name)
            .unwrap_or("Cn")
    }

    /// Returns true if this is one of the five letter categories.
    #[inline]
    pub fn is_letter(self) -> bool {
        match self {
            UppercaseLetter | LowercaseLetter | TitlecaseLetter
            | ModifierLetter | OtherLetter => true,
            _ => false,
        }
    }

    /// Returns true if this is one of the three separator categories.
    #[inline]
    pub fn is_separator(self) -> bool {
        match self {
            SpaceSeparator | LineSeparator | ParagraphSeparator => true,
            _ => false,
        }
    }
}

impl Default for GeneralCategory {
    fn default() -> GeneralCategory {
        Unassigned
    }
}

impl fmt::Display for GeneralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneralCategory, ABBREVIATIONS};

    #[test]
    fn codes_are_stable() {
        assert_eq!(GeneralCategory::Unassigned.code(), 0);
        assert_eq!(GeneralCategory::UppercaseLetter.code(), 1);
        assert_eq!(GeneralCategory::Format.code(), 16);
        assert_eq!(GeneralCategory::PrivateUse.code(), 18);
        assert_eq!(GeneralCategory::FinalQuotePunctuation.code(), 30);
        assert_eq!(GeneralCategory::from_code(17), None);
        assert_eq!(GeneralCategory::from_code(31), None);
    }

    #[test]
    fn every_code_maps_back() {
        for &(cat, _) in ABBREVIATIONS {
            assert_eq!(GeneralCategory::from_code(cat.code()), Some(cat));
        }
        let defined = (0..=255u8)
            .filter(|&c| GeneralCategory::from_code(c).is_some())
            .count();
        assert_eq!(defined, ABBREVIATIONS.len());
    }

    #[test]
    fn abbreviations() {
        assert_eq!(
            GeneralCategory::from_abbreviation("Lu"),
            Some(GeneralCategory::UppercaseLetter)
        );
        assert_eq!(
            GeneralCategory::from_abbreviation("Co"),
            Some(GeneralCategory::PrivateUse)
        );
        assert_eq!(GeneralCategory::from_abbreviation("L&"), None);
        assert_eq!(GeneralCategory::SpaceSeparator.to_string(), "Zs");
    }
}
