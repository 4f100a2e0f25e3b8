#![feature(test)]

#[macro_use]
extern crate lazy_static;
extern crate test;

use test::Bencher;
use ucd_chardata::{
    BidiClass, CharProperties, Database, DatabaseBuilder, GeneralCategory,
};

lazy_static! {
    static ref DB: Database = {
        let letter = |category, other: u32| CharProperties {
            category,
            bidi_class: BidiClass::LeftToRight,
            identifier_start: true,
            identifier_part: true,
            lowercase: Some(other),
            uppercase: Some(other),
            ..CharProperties::default()
        };
        let mut builder = DatabaseBuilder::new();
        let upper = GeneralCategory::UppercaseLetter;
        let lower = GeneralCategory::LowercaseLetter;
        for cp in 0x41..=0x5A {
            builder.insert(cp, letter(upper, cp + 32));
            builder.insert(cp + 32, letter(lower, cp));
        }
        for cp in 0x10400..0x10428 {
            builder.insert(cp, letter(upper, cp + 40));
            builder.insert(cp + 40, letter(lower, cp));
        }
        builder
            .insert(0xDF, letter(lower, 0xDF))
            .upper_expansion(0xDF, &[0x53, 0x53]);
        builder.build().unwrap()
    };
}

const LATIN1: &[u32] = &[0x41, 0x62, 0xDF, 0x20, 0x7F, 0xFF];
const SUPPLEMENTARY: &[u32] =
    &[0x10400, 0x10430, 0x20000, 0xE0001, 0xF0000, 0x50000];

fn bench_each<T>(b: &mut Bencher, cps: &[u32], f: impl Fn(u32) -> T) {
    let mut i = 0;
    b.iter(|| {
        let cp = cps[i];
        i = (i + 1) % cps.len();
        test::black_box(f(cp))
    });
}

#[bench]
fn category_latin1(b: &mut Bencher) {
    bench_each(b, LATIN1, |cp| DB.category(cp));
}

#[bench]
fn category_supplementary(b: &mut Bencher) {
    bench_each(b, SUPPLEMENTARY, |cp| DB.category(cp));
}

#[bench]
fn to_upper_case_latin1(b: &mut Bencher) {
    bench_each(b, LATIN1, |cp| DB.to_upper_case(cp));
}

#[bench]
fn to_upper_case_supplementary(b: &mut Bencher) {
    bench_each(b, SUPPLEMENTARY, |cp| DB.to_upper_case(cp));
}

#[bench]
fn to_upper_case_extended(b: &mut Bencher) {
    bench_each(b, LATIN1, |cp| DB.to_upper_case_extended(cp).len());
}

#[bench]
fn resolve(b: &mut Bencher) {
    bench_each(b, SUPPLEMENTARY, |cp| DB.resolve(cp).kind());
}
