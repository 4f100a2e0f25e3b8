use std::path::Path;
use std::str::FromStr;

use crate::ucd::common::{parse_codepoint_association, Codepoints, UcdFile};
use crate::ucd::error::Error;

/// A single row in the `PropList.txt` file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Property {
    /// The codepoint or codepoint range for this entry.
    pub codepoints: Codepoints,
    /// The property name assigned to the codepoints in this entry.
    pub property: String,
}

impl UcdFile for Property {
    fn relative_file_path() -> &'static Path {
        Path::new("PropList.txt")
    }
}

impl FromStr for Property {
    type Err = Error;

    fn from_str(line: &str) -> Result<Property, Error> {
        let (codepoints, property) = parse_codepoint_association(line)?;
        Ok(Property { codepoints, property: property.to_string() })
    }
}
