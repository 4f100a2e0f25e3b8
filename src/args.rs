use std::ops;
use std::path::{Path, PathBuf};

use ucd_chardata::Database;

use crate::compile;
use crate::error::Result;

/// Wraps clap matches and provides convenient accessors to various parts of
/// the underlying matches.
#[derive(Clone, Debug)]
pub struct ArgMatches<'a>(&'a clap::ArgMatches<'a>);

impl<'a> ops::Deref for ArgMatches<'a> {
    type Target = clap::ArgMatches<'a>;
    fn deref(&self) -> &clap::ArgMatches<'a> {
        &self.0
    }
}

impl<'a> ArgMatches<'a> {
    pub fn new(matches: &'a clap::ArgMatches<'a>) -> ArgMatches<'a> {
        ArgMatches(matches)
    }

    pub fn ucd_dir(&self) -> Result<PathBuf> {
        match self.value_of_os("ucd-dir") {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => err!("missing UCD directory"),
        }
    }

    pub fn output(&self) -> Result<PathBuf> {
        match self.value_of_os("output") {
            Some(path) => Ok(PathBuf::from(path)),
            None => err!("missing output path"),
        }
    }

    /// Load the database named on the command line, either by decoding a
    /// compiled database or by compiling one from a UCD directory.
    pub fn database(&self) -> Result<Database> {
        if let Some(path) = self.value_of_os("database") {
            let path = Path::new(path);
            log::info!("loading compiled database {}", path.display());
            return Ok(Database::from_path(path)?);
        }
        if self.is_present("ucd-dir") {
            return compile::build_database(self.ucd_dir()?);
        }
        err!("one of --database or --ucd-dir is required")
    }

    /// Parse every codepoint given as a positional argument.
    pub fn codepoints(&self) -> Result<Vec<u32>> {
        let mut cps = vec![];
        for arg in self.values_of("codepoint").into_iter().flatten() {
            cps.push(parse_codepoint(arg)?);
        }
        Ok(cps)
    }
}

/// Parse a codepoint written as `U+XXXX`, `0xXXXX`, bare hex, or a single
/// literal character.
///
/// Values beyond `U+10FFFF` are accepted, since every query answers them.
fn parse_codepoint(arg: &str) -> Result<u32> {
    let mut chars = arg.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(c as u32);
    }
    let hex = ["U+", "u+", "0x", "0X"]
        .iter()
        .find_map(|&prefix| arg.strip_prefix(prefix))
        .unwrap_or(arg);
    match u32::from_str_radix(hex, 16) {
        Ok(cp) => Ok(cp),
        Err(err) => err!("invalid codepoint '{}': {}", arg, err),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_codepoint;

    #[test]
    fn codepoint_forms() {
        assert_eq!(parse_codepoint("U+0041").unwrap(), 0x41);
        assert_eq!(parse_codepoint("u+1f600").unwrap(), 0x1F600);
        assert_eq!(parse_codepoint("0x10FFFF").unwrap(), 0x10FFFF);
        assert_eq!(parse_codepoint("00DF").unwrap(), 0xDF);
        assert_eq!(parse_codepoint("110000").unwrap(), 0x110000);
        assert_eq!(parse_codepoint("ß").unwrap(), 0xDF);
        assert_eq!(parse_codepoint("A").unwrap(), 0x41);
        assert!(parse_codepoint("U+").is_err());
        assert!(parse_codepoint("xyz").is_err());
        assert!(parse_codepoint("").is_err());
    }
}
