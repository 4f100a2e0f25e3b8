use std::fmt;
use std::fs::File;
use std::io::{self, BufRead};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ucd::error::Error;

/// A single UCD data file.
pub trait UcdFile:
    Clone + fmt::Debug + Default + Eq + FromStr<Err = Error> + PartialEq
{
    /// The path of this file relative to the UCD directory.
    fn relative_file_path() -> &'static Path;

    /// The full path of this file in the given UCD directory.
    fn file_path<P: AsRef<Path>>(ucd_dir: P) -> PathBuf {
        ucd_dir.as_ref().join(Self::relative_file_path())
    }

    /// Open this file in the given UCD directory and return an iterator
    /// over its rows.
    fn from_dir<P: AsRef<Path>>(
        ucd_dir: P,
    ) -> Result<UcdLineParser<io::BufReader<File>, Self>, Error> {
        UcdLineParser::from_path(Self::file_path(ucd_dir))
    }
}

/// Find the Unicode version of the UCD directory from its `ReadMe.txt`.
pub fn ucd_directory_version<P: AsRef<Path>>(
    ucd_dir: P,
) -> Result<(u64, u64, u64), Error> {
    static VERSION: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?m)\bVersion\s+(\d+)\.(\d+)\.(\d+)\b").unwrap()
    });

    let path = ucd_dir.as_ref().join("ReadMe.txt");
    let contents =
        std::fs::read_to_string(&path).map_err(|e| Error::io(e, &path))?;
    let caps = match VERSION.captures(&contents) {
        Some(caps) => caps,
        None => {
            let mut err =
                Error::parse("could not find Unicode version".to_string());
            err.path = Some(path);
            return Err(err);
        }
    };
    let part = |i: usize| -> Result<u64, Error> {
        caps[i].parse().map_err(|e| {
            let msg = format!("invalid version number '{}': {}", &caps[i], e);
            Error::parse(msg)
        })
    };
    Ok((part(1)?, part(2)?, part(3)?))
}

/// An iterator over the rows of a UCD file.
///
/// Blank lines and comments are skipped. Errors carry the path and line
/// number of the row that failed to parse.
#[derive(Debug)]
pub struct UcdLineParser<R, D> {
    path: Option<PathBuf>,
    rdr: R,
    line: String,
    line_number: u64,
    _data: PhantomData<D>,
}

impl<D> UcdLineParser<io::BufReader<File>, D> {
    pub(crate) fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<UcdLineParser<io::BufReader<File>, D>, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(e, path))?;
        Ok(UcdLineParser {
            path: Some(path.to_path_buf()),
            ..UcdLineParser::new(io::BufReader::new(file))
        })
    }
}

impl<R: BufRead, D> UcdLineParser<R, D> {
    /// Create a parser over an arbitrary reader.
    pub fn new(rdr: R) -> UcdLineParser<R, D> {
        UcdLineParser {
            path: None,
            rdr,
            line: String::new(),
            line_number: 0,
            _data: PhantomData,
        }
    }
}

impl<R: BufRead, D: FromStr<Err = Error>> Iterator for UcdLineParser<R, D> {
    type Item = Result<D, Error>;

    fn next(&mut self) -> Option<Result<D, Error>> {
        loop {
            self.line_number += 1;
            self.line.clear();
            let n = match self.rdr.read_line(&mut self.line) {
                Err(err) => {
                    return Some(Err(Error {
                        kind: crate::ucd::error::ErrorKind::Io(err),
                        line: Some(self.line_number),
                        path: self.path.clone(),
                    }));
                }
                Ok(n) => n,
            };
            if n == 0 {
                return None;
            }
            let trimmed = self.line.trim_start();
            if !trimmed.starts_with('#') && !trimmed.trim().is_empty() {
                break;
            }
        }
        let line_number = self.line_number;
        Some(self.line.parse().map_err(|mut err: Error| {
            err.line = Some(line_number);
            err.path = self.path.clone();
            err
        }))
    }
}

/// A single Unicode codepoint.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Codepoint(u32);

impl Codepoint {
    /// Create a codepoint, failing if it exceeds `U+10FFFF`.
    pub fn from_u32(n: u32) -> Result<Codepoint, Error> {
        if n > 0x10FFFF {
            parse_err!("{:x} is not a valid Unicode codepoint", n)
        } else {
            Ok(Codepoint(n))
        }
    }

    /// The integer value of this codepoint.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for Codepoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Codepoint, Error> {
        match u32::from_str_radix(s, 16) {
            Ok(n) => Codepoint::from_u32(n),
            Err(err) => parse_err!("invalid hex codepoint '{}': {}", s, err),
        }
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

impl PartialEq<u32> for Codepoint {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

/// An inclusive range of codepoints.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CodepointRange {
    pub start: Codepoint,
    pub end: Codepoint,
}

impl CodepointRange {
    /// Iterate over the integer values in this range.
    pub fn values(self) -> std::ops::RangeInclusive<u32> {
        self.start.value()..=self.end.value()
    }
}

impl FromStr for CodepointRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<CodepointRange, Error> {
        static PARTS: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(?P<start>[A-Z0-9]+)\.\.(?P<end>[A-Z0-9]+)$")
                .unwrap()
        });
        let caps = match PARTS.captures(s) {
            Some(caps) => caps,
            None => return parse_err!("invalid codepoint range: '{}'", s),
        };
        let start = caps["start"].parse()?;
        let end = caps["end"].parse()?;
        if start > end {
            return parse_err!("codepoint range is reversed: '{}'", s);
        }
        Ok(CodepointRange { start, end })
    }
}

/// A single codepoint or a range of codepoints, as found in the first
/// column of most UCD files.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Codepoints {
    Single(Codepoint),
    Range(CodepointRange),
}

impl Default for Codepoints {
    fn default() -> Codepoints {
        Codepoints::Single(Codepoint::default())
    }
}

impl Codepoints {
    /// Iterate over the integer values of these codepoints.
    pub fn values(self) -> std::ops::RangeInclusive<u32> {
        match self {
            Codepoints::Single(cp) => cp.value()..=cp.value(),
            Codepoints::Range(range) => range.values(),
        }
    }
}

impl FromStr for Codepoints {
    type Err = Error;

    fn from_str(s: &str) -> Result<Codepoints, Error> {
        if s.contains("..") {
            CodepointRange::from_str(s).map(Codepoints::Range)
        } else {
            Codepoint::from_str(s).map(Codepoints::Single)
        }
    }
}

impl PartialEq<u32> for Codepoints {
    fn eq(&self, other: &u32) -> bool {
        match *self {
            Codepoints::Single(cp) => cp == *other,
            Codepoints::Range(_) => false,
        }
    }
}

impl PartialEq<(u32, u32)> for Codepoints {
    fn eq(&self, &(start, end): &(u32, u32)) -> bool {
        match *self {
            Codepoints::Single(_) => false,
            Codepoints::Range(r) => r.start == start && r.end == end,
        }
    }
}

/// Parse a line of the form `codepoints ; value # comment`, which is the
/// format of most property files.
pub fn parse_codepoint_association(
    line: &str,
) -> Result<(Codepoints, &str), Error> {
    static PARTS: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?x)
            ^
            \s*(?P<codepoints>[^\s;]+)\s*;
            \s*(?P<property>[^;\x23]+)\s*
            ",
        )
        .unwrap()
    });

    let caps = match PARTS.captures(line.trim()) {
        Some(caps) => caps,
        None => return parse_err!("invalid property line: '{}'", line.trim()),
    };
    let property = match caps.name("property") {
        Some(m) => m.as_str().trim(),
        None => return parse_err!("missing property in '{}'", line.trim()),
    };
    Ok((caps["codepoints"].parse()?, property))
}

/// Parse a space separated list of hex codepoints.
pub fn parse_codepoint_sequence(s: &str) -> Result<Vec<Codepoint>, Error> {
    s.split_whitespace().map(Codepoint::from_str).collect()
}
