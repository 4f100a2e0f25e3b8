use std::fmt;
use std::ops::Deref;

/// The maximum number of codepoints a single codepoint can expand to when
/// upper cased.
pub const MAX_EXPANSION: usize = 3;

/// A short, fixed capacity sequence of codepoints produced by the extended
/// upper case mapping.
///
/// Most codepoints map to exactly one codepoint. A handful, like `ß`, expand
/// to two or three.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct CaseExpansion {
    len: u8,
    buf: [u32; MAX_EXPANSION],
}

impl CaseExpansion {
    /// Create a sequence containing exactly one codepoint.
    #[inline]
    pub fn one(cp: u32) -> CaseExpansion {
        CaseExpansion { len: 1, buf: [cp, 0, 0] }
    }

    /// Create a sequence from a slice of at most three codepoints.
    ///
    /// Returns `None` if the slice is empty or too long.
    pub fn from_slice(cps: &[u32]) -> Option<CaseExpansion> {
        if cps.is_empty() || cps.len() > MAX_EXPANSION {
            return None;
        }
        let mut buf = [0; MAX_EXPANSION];
        buf[..cps.len()].copy_from_slice(cps);
        Some(CaseExpansion { len: cps.len() as u8, buf })
    }

    /// Return the codepoints in this sequence.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for CaseExpansion {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        self.as_slice()
    }
}

impl fmt::Debug for CaseExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.as_slice().iter().map(|cp| format!("U+{:04X}", cp)))
            .finish()
    }
}

/// Signed offsets from a codepoint to its simple lower, upper and title case
/// mappings. A zero offset means the codepoint maps to itself.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CaseDeltas {
    pub lower: i32,
    pub upper: i32,
    pub title: i32,
}

impl CaseDeltas {
    pub(crate) fn new(
        cp: u32,
        lower: Option<u32>,
        upper: Option<u32>,
        title: Option<u32>,
    ) -> CaseDeltas {
        let delta = |target: Option<u32>| {
            target.map_or(0, |t| t as i32 - cp as i32)
        };
        CaseDeltas {
            lower: delta(lower),
            upper: delta(upper),
            title: delta(title),
        }
    }

    /// Returns true when every mapping is the identity.
    pub fn is_identity(&self) -> bool {
        *self == CaseDeltas::default()
    }

    /// Apply a delta to a codepoint. Deltas are only ever constructed from
    /// valid codepoint pairs, but decoded databases are not trusted, so an
    /// offset that leaves the codespace falls back to the identity.
    #[inline]
    pub(crate) fn apply(cp: u32, delta: i32) -> u32 {
        let mapped = cp as i64 + delta as i64;
        if mapped < 0 || mapped > 0x10FFFF {
            cp
        } else {
            mapped as u32
        }
    }
}

/// A single entry in a table's sorted upper case expansion list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct UpperExpansion {
    pub(crate) cp: u32,
    pub(crate) seq: CaseExpansion,
}
