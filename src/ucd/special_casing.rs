use std::path::Path;
use std::str::FromStr;

use crate::ucd::common::{parse_codepoint_sequence, Codepoint, UcdFile};
use crate::ucd::error::Error;

/// A single row in the `SpecialCasing.txt` file.
///
/// Each row gives the full lower, title and upper case mappings of a
/// codepoint, optionally restricted by language or context conditions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpecialCaseMapping {
    pub codepoint: Codepoint,
    pub lowercase: Vec<Codepoint>,
    pub titlecase: Vec<Codepoint>,
    pub uppercase: Vec<Codepoint>,
    /// Language tags and casing contexts, e.g., `tr` or `Final_Sigma`.
    /// Empty for unconditional mappings.
    pub conditions: Vec<String>,
}

impl UcdFile for SpecialCaseMapping {
    fn relative_file_path() -> &'static Path {
        Path::new("SpecialCasing.txt")
    }
}

impl SpecialCaseMapping {
    /// Returns true if this mapping applies regardless of language and
    /// context.
    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl FromStr for SpecialCaseMapping {
    type Err = Error;

    fn from_str(line: &str) -> Result<SpecialCaseMapping, Error> {
        let data = match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        };
        let fields: Vec<&str> = data.split(';').map(|f| f.trim()).collect();
        // Every field, including the last, is terminated by a semicolon.
        let (last, fields) = match fields.split_last() {
            Some((last, fields)) => (*last, fields),
            None => return parse_err!("empty SpecialCasing line"),
        };
        if !last.is_empty() || (fields.len() != 4 && fields.len() != 5) {
            return parse_err!("invalid SpecialCasing line: '{}'", line.trim());
        }
        let conditions = match fields.get(4) {
            Some(conds) => {
                conds.split_whitespace().map(|c| c.to_string()).collect()
            }
            None => vec![],
        };
        Ok(SpecialCaseMapping {
            codepoint: fields[0].parse()?,
            lowercase: parse_codepoint_sequence(fields[1])?,
            titlecase: parse_codepoint_sequence(fields[2])?,
            uppercase: parse_codepoint_sequence(fields[3])?,
            conditions,
        })
    }
}
