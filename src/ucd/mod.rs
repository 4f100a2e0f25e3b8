/*!
Parsers for the handful of Unicode character database files that a
character property database is compiled from.
*/

macro_rules! parse_err {
    ($($tt:tt)*) => {
        Err(crate::ucd::error::Error::parse(format!($($tt)*)))
    }
}

pub use self::bidi_mirroring::BidiMirroring;
pub use self::common::{ucd_directory_version, UcdFile};
pub use self::error::Error;
pub use self::prop_list::Property;
pub use self::special_casing::SpecialCaseMapping;
pub use self::unicode_data::{
    UnicodeData, UnicodeDataExpander, UnicodeDataNumeric,
};

mod bidi_mirroring;
mod common;
mod error;
mod prop_list;
mod special_casing;
mod unicode_data;

/// The UCD excerpt checked in for tests.
#[cfg(test)]
pub(crate) fn testdata_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/ucd")
}
