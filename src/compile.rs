use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use ucd_chardata::{
    BidiClass, CharProperties, Database, DatabaseBuilder, GeneralCategory,
    NON_INTEGRAL_NUMERIC_VALUE, NO_NUMERIC_VALUE,
};

use crate::args::ArgMatches;
use crate::error::Result;
use crate::ucd::{
    self, BidiMirroring, Property, SpecialCaseMapping, UcdFile, UnicodeData,
    UnicodeDataExpander, UnicodeDataNumeric,
};

pub fn command(args: ArgMatches<'_>) -> Result<()> {
    let db = build_database(args.ucd_dir()?)?;
    let output = args.output()?;
    let mut wtr = io::BufWriter::new(File::create(&output)?);
    db.write_to(&mut wtr)?;
    wtr.flush()?;
    log::info!("wrote compiled database to {}", output.display());
    Ok(())
}

/// Compile the UCD files in the given directory into a database.
pub fn build_database<P: AsRef<Path>>(dir: P) -> Result<Database> {
    let dir = dir.as_ref();
    let mut props: BTreeMap<u32, CharProperties> = BTreeMap::new();
    let mut rows = vec![];
    for result in UnicodeData::from_dir(dir)? {
        rows.push(result?);
    }
    for row in UnicodeDataExpander::new(rows) {
        let cp = row.codepoint.value();
        props.insert(cp, char_properties(&row)?);
    }
    log::info!("read {} assigned codepoints", props.len());

    for result in Property::from_dir(dir)? {
        let row = result?;
        for cp in row.codepoints.values() {
            // Only assigned codepoints carry properties.
            let p = match props.get_mut(&cp) {
                None => continue,
                Some(p) => p,
            };
            match &*row.property {
                "Other_Lowercase" => p.other_lowercase = true,
                "Other_Uppercase" => p.other_uppercase = true,
                "Other_Alphabetic" => p.other_alphabetic = true,
                "Ideographic" => p.ideographic = true,
                _ => {}
            }
        }
    }

    let mut builder = DatabaseBuilder::new();
    match ucd::ucd_directory_version(dir) {
        Ok((major, minor, patch)) => {
            let version = format!("{}.{}.{}", major, minor, patch);
            log::info!("UCD directory is Unicode {}", version);
            builder.unicode_version(&version);
        }
        Err(err) => log::warn!("unknown Unicode version: {}", err),
    }

    for result in SpecialCaseMapping::from_dir(dir)? {
        let row = result?;
        if !row.is_unconditional() || row.uppercase.is_empty() {
            continue;
        }
        let cp = row.codepoint.value();
        let simple = props.get(&cp).and_then(|p| p.uppercase).unwrap_or(cp);
        let upper: Vec<u32> =
            row.uppercase.iter().map(|c| c.value()).collect();
        if upper != [simple] {
            builder.upper_expansion(cp, &upper);
        }
    }
    for result in BidiMirroring::from_dir(dir)? {
        let row = result?;
        builder.mirror_glyph(
            row.codepoint.value(),
            row.bidi_mirroring_glyph.value(),
        );
    }
    for (cp, p) in props {
        builder.insert(cp, p);
    }
    Ok(builder.build()?)
}

/// Derive the properties of a single codepoint from its UnicodeData row.
fn char_properties(row: &UnicodeData) -> Result<CharProperties> {
    let cp = row.codepoint.value();
    let category = match GeneralCategory::from_abbreviation(
        &row.general_category,
    ) {
        Some(cat) => cat,
        None => {
            return err!(
                "U+{}: unknown general category '{}'",
                row.codepoint,
                row.general_category
            )
        }
    };
    let bidi_class = match BidiClass::from_abbreviation(&row.bidi_class) {
        Some(bidi) => bidi,
        None => {
            return err!(
                "U+{}: unknown bidi class '{}'",
                row.codepoint,
                row.bidi_class
            )
        }
    };

    let identifier_ignorable = is_identifier_ignorable(cp, category);
    let identifier_start = is_identifier_start(category);
    let letter_digit = latin_letter_digit(cp);
    let digit = match category {
        GeneralCategory::DecimalDigitNumber => row.numeric_type_decimal,
        _ => letter_digit,
    };
    let numeric = match letter_digit {
        Some(d) => d as i32,
        None => numeric_value(row.numeric_type_numeric),
    };
    let uppercase = row.simple_uppercase_mapping.map(|c| c.value());
    Ok(CharProperties {
        category,
        bidi_class,
        whitespace: is_whitespace(cp, category),
        mirrored: row.bidi_mirrored,
        identifier_start,
        identifier_part: identifier_start
            || identifier_ignorable
            || is_identifier_part_only(category),
        identifier_ignorable,
        digit,
        numeric,
        lowercase: row.simple_lowercase_mapping.map(|c| c.value()),
        uppercase,
        titlecase: row
            .simple_titlecase_mapping
            .map(|c| c.value())
            .or(uppercase),
        ..CharProperties::default()
    })
}

fn is_whitespace(cp: u32, category: GeneralCategory) -> bool {
    match cp {
        0x09..=0x0D | 0x1C..=0x1F => return true,
        // No-break spaces.
        0xA0 | 0x2007 | 0x202F => return false,
        _ => {}
    }
    category.is_separator()
}

fn is_identifier_ignorable(cp: u32, category: GeneralCategory) -> bool {
    match cp {
        0x00..=0x08 | 0x0E..=0x1B | 0x7F..=0x9F => true,
        _ => category == GeneralCategory::Format,
    }
}

fn is_identifier_start(category: GeneralCategory) -> bool {
    use ucd_chardata::GeneralCategory::*;

    category.is_letter()
        || match category {
            LetterNumber | CurrencySymbol | ConnectorPunctuation => true,
            _ => false,
        }
}

fn is_identifier_part_only(category: GeneralCategory) -> bool {
    use ucd_chardata::GeneralCategory::*;

    match category {
        DecimalDigitNumber | NonSpacingMark | CombiningSpacingMark => true,
        _ => false,
    }
}

/// The digit value of the ASCII and fullwidth Latin letters.
fn latin_letter_digit(cp: u32) -> Option<u8> {
    let offset = match cp {
        0x41..=0x5A => cp - 0x41,
        0x61..=0x7A => cp - 0x61,
        0xFF21..=0xFF3A => cp - 0xFF21,
        0xFF41..=0xFF5A => cp - 0xFF41,
        _ => return None,
    };
    Some(10 + offset as u8)
}

fn numeric_value(numeric: Option<UnicodeDataNumeric>) -> i32 {
    match numeric {
        None => NO_NUMERIC_VALUE,
        Some(UnicodeDataNumeric::Integer(n))
            if 0 <= n && n <= i32::MAX as i64 =>
        {
            n as i32
        }
        Some(_) => NON_INTEGRAL_NUMERIC_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use ucd_chardata::{
        BidiClass, Database, GeneralCategory, TableKind, NO_NUMERIC_VALUE,
    };

    use super::build_database;
    use crate::ucd::testdata_dir;

    lazy_static! {
        static ref DB: Database = build_database(testdata_dir()).unwrap();
    }

    #[test]
    fn version() {
        assert_eq!(DB.unicode_version(), Some("14.0.0"));
    }

    #[test]
    fn categories_and_bidi() {
        assert_eq!(DB.category(0x41), GeneralCategory::UppercaseLetter);
        assert_eq!(DB.category(0x0378), GeneralCategory::Unassigned);
        assert_eq!(DB.directionality(0x0378), BidiClass::Undefined);
        assert_eq!(DB.category(0x05D0), GeneralCategory::OtherLetter);
        assert_eq!(DB.directionality(0x05D0), BidiClass::RightToLeft);
        assert_eq!(DB.directionality(0x0660), BidiClass::ArabicNumber);
        assert_eq!(DB.category(0xD800), GeneralCategory::Surrogate);
        assert_eq!(DB.category(0xE0001), GeneralCategory::Format);
        assert_eq!(DB.category(0x1F600), GeneralCategory::OtherSymbol);
    }

    #[test]
    fn ranges_are_expanded() {
        for &cp in &[0x3400, 0x3FFF, 0x4DBF, 0x4E00, 0x9FFF, 0x2A6DF] {
            assert_eq!(DB.category(cp), GeneralCategory::OtherLetter);
            assert!(DB.is_ideographic(cp), "U+{:04X}", cp);
            assert!(DB.is_identifier_start(cp));
        }
        assert_eq!(DB.category(0x4DC0), GeneralCategory::Unassigned);
        assert_eq!(DB.category(0xE000), GeneralCategory::PrivateUse);
        assert_eq!(DB.category(0xF8FF), GeneralCategory::PrivateUse);
    }

    #[test]
    fn data_without_a_table_is_dropped() {
        assert_eq!(DB.resolve(0x30000).kind(), TableKind::Undefined);
        assert_eq!(DB.category(0x30000), GeneralCategory::Unassigned);
        assert!(!DB.is_ideographic(0x30000));
        assert_eq!(DB.category(0xF0000), GeneralCategory::PrivateUse);
        assert_eq!(DB.category(0xFFFFE), GeneralCategory::Unassigned);
    }

    #[test]
    fn whitespace() {
        for &cp in &[0x09, 0x0A, 0x0D, 0x1C, 0x1F, 0x20, 0x2000, 0x2028] {
            assert!(DB.is_whitespace(cp), "U+{:04X}", cp);
        }
        for &cp in &[0x00A0, 0x2007, 0x202F, 0x85, 0x41, 0x200B] {
            assert!(!DB.is_whitespace(cp), "U+{:04X}", cp);
        }
        assert!(DB.is_space_char(0xA0));
    }

    #[test]
    fn identifiers() {
        assert!(DB.is_identifier_start(0x24));
        assert!(DB.is_identifier_start(0x5F));
        assert!(DB.is_identifier_start(0x2160));
        assert!(!DB.is_identifier_start(0x30));
        assert!(DB.is_identifier_part(0x30));
        assert!(DB.is_identifier_part(0x0301));
        assert!(DB.is_identifier_ignorable(0x00));
        assert!(DB.is_identifier_ignorable(0x7F));
        assert!(DB.is_identifier_ignorable(0x200B));
        assert!(DB.is_identifier_ignorable(0x200D));
        assert!(DB.is_identifier_part(0x200D));
        assert!(!DB.is_identifier_ignorable(0x09));
        assert!(!DB.is_identifier_part(0x20));
    }

    #[test]
    fn digits_and_numbers() {
        assert_eq!(DB.digit(0x37, 10), 7);
        assert_eq!(DB.digit(0x0667, 10), 7);
        assert_eq!(DB.digit(0x1D7D5, 10), 7);
        assert_eq!(DB.digit(0x61, 16), 10);
        assert_eq!(DB.digit(0xFF3A, 36), 35);
        assert_eq!(DB.digit(0xFF41, 11), 10);
        assert_eq!(DB.numeric_value(0x7A), 35);
        assert_eq!(DB.numeric_value(0x2160), 1);
        assert_eq!(DB.numeric_value(0x2188), 100000);
        assert_eq!(DB.numeric_value(0xBD), -2);
        assert_eq!(DB.numeric_value(0xB2), 2);
        assert_eq!(DB.digit(0xB2, 10), -1);
        assert_eq!(DB.numeric_value(0x3007), 0);
        assert_eq!(DB.numeric_value(0x20), NO_NUMERIC_VALUE);
    }

    #[test]
    fn case_mappings() {
        assert_eq!(DB.to_lower_case(0x41), 0x61);
        assert_eq!(DB.to_upper_case(0x61), 0x41);
        assert_eq!(DB.to_title_case(0x61), 0x41);
        assert_eq!(DB.to_title_case(0x1C4), 0x1C5);
        assert_eq!(DB.to_title_case(0x1C7), 0x1C8);
        assert_eq!(DB.to_title_case(0x1CA), 0x1CB);
        assert_eq!(DB.to_title_case(0x1F1), 0x1F2);
        assert_eq!(DB.to_upper_case(0x1C4), 0x1C4);
        assert_eq!(DB.to_title_case(0x1C6), 0x1C5);
        assert_eq!(DB.to_upper_case(0x1C5), 0x1C4);
        assert_eq!(DB.to_lower_case(0x1C5), 0x1C6);
        assert_eq!(DB.to_upper_case(0xFF41), 0xFF21);
        assert_eq!(DB.to_lower_case(0x10400), 0x10428);
        assert_eq!(DB.to_upper_case(0x10428), 0x10400);
        assert_eq!(DB.to_lower_case(0x2160), 0x2170);
    }

    #[test]
    fn lower_case_is_idempotent() {
        for cp in 0..=0x10FFFF {
            let lower = DB.to_lower_case(cp);
            assert_eq!(DB.to_lower_case(lower), lower, "U+{:04X}", cp);
        }
    }

    #[test]
    fn decimal_digits_hold_in_larger_radixes() {
        let mut digits = 0;
        for cp in 0..=0x10FFFF {
            let d = DB.digit(cp, 10);
            if d < 0 {
                continue;
            }
            digits += 1;
            let found = (d as u32 + 1..=36)
                .filter(|&r| r != 10)
                .any(|r| DB.digit(cp, r) == d);
            assert!(found, "U+{:04X}", cp);
        }
        assert!(digits >= 30);
    }

    #[test]
    fn upper_case_expansions() {
        assert_eq!(DB.to_upper_case(0xDF), 0xDF);
        assert_eq!(DB.to_upper_case_extended(0xDF).as_slice(), &[0x53, 0x53]);
        assert_eq!(
            DB.to_upper_case_extended(0xFB03).as_slice(),
            &[0x46, 0x46, 0x49]
        );
        assert_eq!(
            DB.to_upper_case_extended(0x0390).as_slice(),
            &[0x0399, 0x0308, 0x0301]
        );
        // Conditional mappings are ignored.
        assert_eq!(DB.to_upper_case_extended(0x69).as_slice(), &[0x49]);
        assert_eq!(DB.to_upper_case_extended(0x0130).as_slice(), &[0x0130]);
        assert_eq!(DB.to_upper_case_extended(0x61).as_slice(), &[0x41]);
    }

    #[test]
    fn mirroring() {
        assert!(DB.is_mirrored(0x28));
        assert_eq!(DB.mirrored_glyph(0x28), Some(0x29));
        assert_eq!(DB.mirrored_glyph(0xAB), Some(0xBB));
        assert_eq!(DB.mirrored_glyph(0x207D), Some(0x207E));
        assert!(!DB.is_mirrored(0x41));
        assert_eq!(DB.mirrored_glyph(0x41), None);
    }

    #[test]
    fn prop_list_flags() {
        assert!(DB.is_other_lowercase(0xAA));
        assert!(DB.is_lowercase(0xAA));
        assert!(DB.is_other_lowercase(0x2170));
        assert!(DB.is_other_uppercase(0x2160));
        assert!(DB.is_uppercase(0x2160));
        assert!(DB.is_other_alphabetic(0x0345));
        assert!(DB.is_alphabetic(0x0345));
        assert!(DB.is_ideographic(0x3006));
        assert!(!DB.is_other_lowercase(0x61));
    }

    #[test]
    fn compiled_form_matches() {
        let bytes = DB.to_bytes().unwrap();
        let decoded = Database::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, *DB);
    }

    #[test]
    fn missing_directory() {
        assert!(build_database("/nonexistent/ucd").is_err());
    }
}
