/*!
Compact, immutable Unicode character property tables.

A [`Database`] answers per codepoint classification queries (general
category, whitespace, identifier rules, case mappings, digit and numeric
values, bidi class and mirroring) for the entire codespace. Every query first
resolves the table that owns the codepoint: a direct lookup table for
Latin-1, a two stage table for each of planes 0, 1, 2 and 14, a rule for the
private use planes and a constant table for everything else. All queries are
total. Values that are not codepoints get the same answers as unassigned
codepoints.

Databases are assembled with a [`DatabaseBuilder`], usually from the Unicode
character database by the `ucd-props` tool, and stored in a compact binary
form that [`Database::from_bytes`] decodes. A process wide instance can be
installed once with [`install`] and read with [`global`].
*/

pub use crate::bidi_class::BidiClass;
pub use crate::builder::DatabaseBuilder;
pub use crate::case::{CaseDeltas, CaseExpansion, MAX_EXPANSION};
pub use crate::category::GeneralCategory;
pub use crate::database::{global, install, Database, TableStats};
pub use crate::dispatch::{Table, TableKind};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::record::{
    CharProperties, MAX_RADIX, MIN_RADIX, NON_INTEGRAL_NUMERIC_VALUE,
    NO_NUMERIC_VALUE,
};
pub use crate::table::{
    Latin1Table, PlaneTable, PrivateUse, PropertySource, Undefined,
};

mod bidi_class;
mod builder;
mod case;
mod category;
mod codec;
mod database;
mod dispatch;
mod error;
mod record;
mod table;

#[cfg(test)]
mod testdata;
