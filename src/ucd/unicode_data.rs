use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::ucd::common::{Codepoint, UcdFile};
use crate::ucd::error::Error;

/// A single row in the `UnicodeData.txt` file.
///
/// Fields that nothing downstream needs (the decomposition, the Unicode 1.0
/// name and the ISO comment) are kept verbatim.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnicodeData {
    pub codepoint: Codepoint,
    pub name: String,
    /// The abbreviated General_Category value, e.g., `Lu`.
    pub general_category: String,
    pub canonical_combining_class: u8,
    /// The abbreviated Bidi_Class value, e.g., `L`.
    pub bidi_class: String,
    pub decomposition: String,
    pub numeric_type_decimal: Option<u8>,
    pub numeric_type_digit: Option<u8>,
    pub numeric_type_numeric: Option<UnicodeDataNumeric>,
    pub bidi_mirrored: bool,
    pub unicode1_name: String,
    pub iso_comment: String,
    pub simple_uppercase_mapping: Option<Codepoint>,
    pub simple_lowercase_mapping: Option<Codepoint>,
    pub simple_titlecase_mapping: Option<Codepoint>,
}

impl UcdFile for UnicodeData {
    fn relative_file_path() -> &'static Path {
        Path::new("UnicodeData.txt")
    }
}

impl UnicodeData {
    /// Returns true if this row starts a range of codepoints that share
    /// these properties, e.g., `<CJK Ideograph, First>`.
    pub fn is_range_start(&self) -> bool {
        self.name.starts_with('<') && self.name.ends_with(", First>")
    }

    /// Returns true if this row ends a range started by the previous row.
    pub fn is_range_end(&self) -> bool {
        self.name.starts_with('<') && self.name.ends_with(", Last>")
    }
}

impl FromStr for UnicodeData {
    type Err = Error;

    fn from_str(line: &str) -> Result<UnicodeData, Error> {
        let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != 15 {
            return parse_err!(
                "expected 15 fields in UnicodeData row, found {}",
                fields.len()
            );
        }
        let opt_codepoint = |s: &str| -> Result<Option<Codepoint>, Error> {
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse().map(Some)
            }
        };
        let opt_u8 = |s: &str| -> Result<Option<u8>, Error> {
            if s.is_empty() {
                return Ok(None);
            }
            match s.parse() {
                Ok(n) => Ok(Some(n)),
                Err(err) => parse_err!("invalid digit value '{}': {}", s, err),
            }
        };
        let canonical_combining_class = match fields[3].parse() {
            Ok(ccc) => ccc,
            Err(err) => {
                return parse_err!(
                    "invalid canonical combining class '{}': {}",
                    fields[3],
                    err
                )
            }
        };
        let bidi_mirrored = match fields[9] {
            "Y" => true,
            "N" => false,
            other => {
                return parse_err!("invalid Bidi_Mirrored value '{}'", other)
            }
        };
        if fields[2].is_empty() || fields[4].is_empty() {
            return parse_err!("missing General_Category or Bidi_Class");
        }
        Ok(UnicodeData {
            codepoint: fields[0].parse()?,
            name: fields[1].to_string(),
            general_category: fields[2].to_string(),
            canonical_combining_class,
            bidi_class: fields[4].to_string(),
            decomposition: fields[5].to_string(),
            numeric_type_decimal: opt_u8(fields[6])?,
            numeric_type_digit: opt_u8(fields[7])?,
            numeric_type_numeric: if fields[8].is_empty() {
                None
            } else {
                Some(fields[8].parse()?)
            },
            bidi_mirrored,
            unicode1_name: fields[10].to_string(),
            iso_comment: fields[11].to_string(),
            simple_uppercase_mapping: opt_codepoint(fields[12])?,
            simple_lowercase_mapping: opt_codepoint(fields[13])?,
            simple_titlecase_mapping: opt_codepoint(fields[14])?,
        })
    }
}

impl fmt::Display for UnicodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |x: Option<String>| x.unwrap_or_default();
        write!(
            f,
            "{};{};{};{};{};{};{};{};{};{};{};{};{};{};{}",
            self.codepoint,
            self.name,
            self.general_category,
            self.canonical_combining_class,
            self.bidi_class,
            self.decomposition,
            opt(self.numeric_type_decimal.map(|n| n.to_string())),
            opt(self.numeric_type_digit.map(|n| n.to_string())),
            opt(self.numeric_type_numeric.map(|n| n.to_string())),
            if self.bidi_mirrored { "Y" } else { "N" },
            self.unicode1_name,
            self.iso_comment,
            opt(self.simple_uppercase_mapping.map(|c| c.to_string())),
            opt(self.simple_lowercase_mapping.map(|c| c.to_string())),
            opt(self.simple_titlecase_mapping.map(|c| c.to_string())),
        )
    }
}

/// The numeric value of a codepoint, from the ninth field of a row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnicodeDataNumeric {
    /// An integer, e.g., `1000`.
    Integer(i64),
    /// A fraction, e.g., `1/2`.
    Rational(i64, i64),
}

impl FromStr for UnicodeDataNumeric {
    type Err = Error;

    fn from_str(s: &str) -> Result<UnicodeDataNumeric, Error> {
        let int = |s: &str| -> Result<i64, Error> {
            match s.parse() {
                Ok(n) => Ok(n),
                Err(err) => parse_err!("invalid number '{}': {}", s, err),
            }
        };
        match s.find('/') {
            None => Ok(UnicodeDataNumeric::Integer(int(s)?)),
            Some(i) => {
                let (num, den) = (int(&s[..i])?, int(&s[i + 1..])?);
                if den == 0 {
                    return parse_err!("zero denominator in '{}'", s);
                }
                Ok(UnicodeDataNumeric::Rational(num, den))
            }
        }
    }
}

impl fmt::Display for UnicodeDataNumeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            UnicodeDataNumeric::Integer(n) => write!(f, "{}", n),
            UnicodeDataNumeric::Rational(n, d) => write!(f, "{}/{}", n, d),
        }
    }
}

/// An iterator that expands `First`/`Last` row pairs into one row per
/// codepoint in the range.
///
/// A `First` row that is not immediately followed by its `Last` row is
/// passed through as a single row.
#[derive(Debug)]
pub struct UnicodeDataExpander<I: Iterator<Item = UnicodeData>> {
    it: std::iter::Peekable<I>,
    range: Option<(UnicodeData, u32, u32)>,
}

impl<I: Iterator<Item = UnicodeData>> UnicodeDataExpander<I> {
    /// Expand the ranges in the given rows.
    pub fn new<T>(it: T) -> UnicodeDataExpander<I>
    where
        T: IntoIterator<IntoIter = I, Item = UnicodeData>,
    {
        UnicodeDataExpander { it: it.into_iter().peekable(), range: None }
    }
}

impl<I: Iterator<Item = UnicodeData>> Iterator for UnicodeDataExpander<I> {
    type Item = UnicodeData;

    fn next(&mut self) -> Option<UnicodeData> {
        if let Some((ref template, ref mut next, end)) = self.range {
            if *next <= end {
                let mut row = template.clone();
                row.codepoint = Codepoint::from_u32(*next).ok()?;
                *next += 1;
                return Some(row);
            }
            self.range = None;
        }
        let row = self.it.next()?;
        if !row.is_range_start() {
            return Some(row);
        }
        let end = match self.it.peek() {
            Some(last) if last.is_range_end() => last.codepoint.value(),
            _ => return Some(row),
        };
        self.it.next();
        let start = row.codepoint.value();
        self.range = Some((row, start, end));
        self.next()
    }
}
