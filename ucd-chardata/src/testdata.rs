use lazy_static::lazy_static;

use crate::bidi_class::BidiClass;
use crate::builder::DatabaseBuilder;
use crate::category::GeneralCategory;
use crate::database::Database;
use crate::record::CharProperties;

lazy_static! {
    /// A small hand built database covering every table kind.
    pub static ref SAMPLE: Database = sample();
}

fn props(cat: GeneralCategory, bidi: BidiClass) -> CharProperties {
    CharProperties { category: cat, bidi_class: bidi, ..Default::default() }
}

fn letter(cat: GeneralCategory) -> CharProperties {
    CharProperties {
        identifier_start: true,
        identifier_part: true,
        ..props(cat, BidiClass::LeftToRight)
    }
}

fn digit(value: u8, bidi: BidiClass) -> CharProperties {
    CharProperties {
        identifier_part: true,
        digit: Some(value),
        numeric: value as i32,
        ..props(GeneralCategory::DecimalDigitNumber, bidi)
    }
}

fn sample() -> Database {
    use self::BidiClass as B;
    use self::GeneralCategory as G;

    let mut b = DatabaseBuilder::new();
    b.unicode_version("14.0.0");

    for cp in (0x00..=0x1F).chain(0x7F..=0x9F) {
        let mut p = props(G::Control, B::BoundaryNeutral);
        if (0x09..=0x0D).contains(&cp) || (0x1C..=0x1F).contains(&cp) {
            p.whitespace = true;
            p.bidi_class = B::SegmentSeparator;
        } else {
            p.identifier_ignorable = true;
            p.identifier_part = true;
        }
        b.insert(cp, p);
    }
    b.get_mut(0x85).bidi_class = B::ParagraphSeparator;
    b.insert(
        0x20,
        CharProperties {
            whitespace: true,
            ..props(G::SpaceSeparator, B::WhiteSpace)
        },
    );
    b.insert(0xA0, props(G::SpaceSeparator, B::CommonSeparator));

    for &(cp, cat, glyph) in &[
        (0x28, G::StartPunctuation, 0x29),
        (0x29, G::EndPunctuation, 0x28),
    ] {
        b.insert(
            cp,
            CharProperties { mirrored: true, ..props(cat, B::OtherNeutral) },
        );
        b.mirror_glyph(cp, glyph);
    }

    for (i, cp) in (0x30..=0x39).enumerate() {
        b.insert(cp, digit(i as u8, B::EuropeanNumber));
    }
    for (i, cp) in (0x1D7CE..=0x1D7D7).enumerate() {
        b.insert(cp, digit(i as u8, B::EuropeanNumber));
    }
    for (i, cp) in (0x41..=0x5A).enumerate() {
        let value = 10 + i as u8;
        b.insert(
            cp,
            CharProperties {
                digit: Some(value),
                numeric: value as i32,
                lowercase: Some(cp + 0x20),
                ..letter(G::UppercaseLetter)
            },
        );
        b.insert(
            cp + 0x20,
            CharProperties {
                digit: Some(value),
                numeric: value as i32,
                uppercase: Some(cp),
                titlecase: Some(cp),
                ..letter(G::LowercaseLetter)
            },
        );
    }

    b.insert(
        0xAA,
        CharProperties { other_lowercase: true, ..letter(G::OtherLetter) },
    );
    b.insert(0xDF, letter(G::LowercaseLetter));
    b.upper_expansion(0xDF, &[0x53, 0x53]);

    b.insert(
        0x1C4,
        CharProperties {
            lowercase: Some(0x1C6),
            titlecase: Some(0x1C5),
            ..letter(G::UppercaseLetter)
        },
    );
    b.insert(
        0x1C5,
        CharProperties {
            lowercase: Some(0x1C6),
            uppercase: Some(0x1C4),
            titlecase: Some(0x1C5),
            ..letter(G::TitlecaseLetter)
        },
    );
    b.insert(
        0x1C6,
        CharProperties {
            uppercase: Some(0x1C4),
            titlecase: Some(0x1C5),
            ..letter(G::LowercaseLetter)
        },
    );
    b.insert(
        0x2170,
        CharProperties {
            other_lowercase: true,
            numeric: 1,
            ..letter(G::LetterNumber)
        },
    );
    b.insert_range(
        0xE000,
        0xF8FF,
        &props(G::PrivateUse, B::LeftToRight),
    );

    b.insert(
        0x10400,
        CharProperties {
            lowercase: Some(0x10428),
            ..letter(G::UppercaseLetter)
        },
    );
    b.insert(
        0x10428,
        CharProperties {
            uppercase: Some(0x10400),
            titlecase: Some(0x10400),
            ..letter(G::LowercaseLetter)
        },
    );

    b.insert_range(
        0x20000,
        0x2A6DF,
        &CharProperties { ideographic: true, ..letter(G::OtherLetter) },
    );

    b.insert(
        0xE0001,
        CharProperties {
            identifier_ignorable: true,
            identifier_part: true,
            ..props(G::Format, B::BoundaryNeutral)
        },
    );

    match b.build() {
        Ok(db) => db,
        Err(err) => panic!("failed to build sample database: {}", err),
    }
}
