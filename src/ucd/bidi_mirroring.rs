use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ucd::common::{Codepoint, UcdFile};
use crate::ucd::error::Error;

/// A single row in the `BidiMirroring.txt` file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BidiMirroring {
    pub codepoint: Codepoint,
    /// A codepoint whose glyph is typically the mirror image of the glyph
    /// of `codepoint`.
    pub bidi_mirroring_glyph: Codepoint,
}

impl UcdFile for BidiMirroring {
    fn relative_file_path() -> &'static Path {
        Path::new("BidiMirroring.txt")
    }
}

impl FromStr for BidiMirroring {
    type Err = Error;

    fn from_str(line: &str) -> Result<BidiMirroring, Error> {
        static PARTS: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?x)
                ^
                \s*(?P<codepoint>[A-F0-9]+)\s*;
                \s*(?P<glyph>[A-F0-9]+)
                \s*(?:\#.*)?
                $
                ",
            )
            .unwrap()
        });
        let caps = match PARTS.captures(line.trim()) {
            Some(caps) => caps,
            None => return parse_err!("invalid BidiMirroring line"),
        };
        Ok(BidiMirroring {
            codepoint: caps["codepoint"].parse()?,
            bidi_mirroring_glyph: caps["glyph"].parse()?,
        })
    }
}
