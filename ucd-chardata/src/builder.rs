use std::collections::{BTreeMap, HashMap};

use crate::case::{CaseDeltas, CaseExpansion, UpperExpansion, MAX_EXPANSION};
use crate::database::Database;
use crate::dispatch::TableKind;
use crate::error::{Error, Result};
use crate::record::{CharProperties, Record, UPPER_EXPANDS};
use crate::table::{Latin1Table, PlaneTable, SideTables, BLOCK_LEN};

/// A builder for assembling a `Database` from decoded properties.
///
/// Codepoints that are never inserted are unassigned. Data for codepoints
/// that no data table owns (the private use planes, and the planes without
/// a dedicated table) is dropped when building, since those codepoints are
/// answered by rule.
#[derive(Clone, Debug, Default)]
pub struct DatabaseBuilder {
    unicode_version: Option<String>,
    props: BTreeMap<u32, CharProperties>,
    upper: BTreeMap<u32, Vec<u32>>,
    mirrors: BTreeMap<u32, u32>,
}

impl DatabaseBuilder {
    /// Create a new builder with no character data.
    pub fn new() -> DatabaseBuilder {
        DatabaseBuilder::default()
    }

    /// Record the version of Unicode the data comes from.
    pub fn unicode_version(&mut self, version: &str) -> &mut DatabaseBuilder {
        self.unicode_version = Some(version.to_string());
        self
    }

    /// Set the properties of a single codepoint, replacing any previously
    /// set properties.
    pub fn insert(
        &mut self,
        cp: u32,
        props: CharProperties,
    ) -> &mut DatabaseBuilder {
        self.props.insert(cp, props);
        self
    }

    /// Set the properties of every codepoint in the inclusive range.
    pub fn insert_range(
        &mut self,
        start: u32,
        end: u32,
        props: &CharProperties,
    ) -> &mut DatabaseBuilder {
        for cp in start..=end {
            self.props.insert(cp, props.clone());
        }
        self
    }

    /// Return a mutable reference to the properties of `cp`, inserting the
    /// unassigned defaults if it has none yet.
    pub fn get_mut(&mut self, cp: u32) -> &mut CharProperties {
        self.props.entry(cp).or_insert_with(CharProperties::default)
    }

    /// Set the full upper case mapping of `cp`.
    ///
    /// The sequence must contain between one and three codepoints. This is
    /// checked when building.
    pub fn upper_expansion(
        &mut self,
        cp: u32,
        seq: &[u32],
    ) -> &mut DatabaseBuilder {
        self.upper.insert(cp, seq.to_vec());
        self
    }

    /// Set the codepoint whose glyph mirrors the glyph of `cp`.
    ///
    /// This is only ever reported for codepoints marked as mirrored.
    pub fn mirror_glyph(
        &mut self,
        cp: u32,
        glyph: u32,
    ) -> &mut DatabaseBuilder {
        self.mirrors.insert(cp, glyph);
        self
    }

    /// Pack all of the data given so far into a database.
    pub fn build(&self) -> Result<Database> {
        let mut dropped: BTreeMap<TableKind, usize> = BTreeMap::new();
        for &cp in self.props.keys() {
            let plane = (cp >> 16) as u8;
            if cp > 0x10FFFF || TableKind::for_plane(plane).is_none() {
                *dropped.entry(owner(cp)).or_insert(0) += 1;
            }
        }
        for (&kind, count) in &dropped {
            log::log!(
                drop_level(kind),
                "dropping {} codepoints owned by the {} table",
                count,
                kind
            );
        }

        let mut packer = TablePacker::new(self, 0, BLOCK_LEN as u32);
        let index = packer.pack_block(0)?;
        let (records, side) = packer.finish();
        let latin1 = Latin1Table {
            index: index.into_boxed_slice(),
            records,
            side,
        };
        let db = Database {
            unicode_version: self.unicode_version.clone(),
            latin1,
            plane00: self.build_plane(0)?,
            plane01: self.build_plane(1)?,
            plane02: self.build_plane(2)?,
            plane0e: self.build_plane(14)?,
        };
        for stats in db.stats() {
            log::debug!(
                "{}: {} records, {} blocks, {} bytes",
                stats.kind,
                stats.records,
                stats.blocks,
                stats.heap_bytes
            );
        }
        Ok(db)
    }

    fn build_plane(&self, plane: u8) -> Result<PlaneTable> {
        let base = (plane as u32) << 16;
        // Latin-1 is owned by its own table, so plane 0 starts past it.
        let start = if plane == 0 { BLOCK_LEN as u32 } else { base };
        let mut packer = TablePacker::new(self, start, base + 0x10000);

        let mut block_ids: HashMap<Vec<u16>, u16> = HashMap::new();
        let mut blocks: Vec<u16> = vec![];
        let mut index = vec![0u16; 256];
        // Block 0 is always the empty block.
        block_ids.insert(vec![0; BLOCK_LEN], 0);
        blocks.extend(vec![0; BLOCK_LEN]);
        for (i, slot) in index.iter_mut().enumerate() {
            let block = packer.pack_block(base + ((i as u32) << 8))?;
            if let Some(&id) = block_ids.get(&block) {
                *slot = id;
                continue;
            }
            let id = block_ids.len();
            if id > u16::MAX as usize {
                return Err(Error::build(format!(
                    "plane {} has too many distinct blocks",
                    plane
                )));
            }
            blocks.extend_from_slice(&block);
            block_ids.insert(block, id as u16);
            *slot = id as u16;
        }
        let (records, side) = packer.finish();
        Ok(PlaneTable {
            plane,
            index: index.into_boxed_slice(),
            blocks: blocks.into_boxed_slice(),
            records,
            side,
        })
    }
}

/// The table kind that owns `cp`, ignoring the Latin-1 fast path.
fn owner(cp: u32) -> TableKind {
    match cp >> 16 {
        15 | 16 => TableKind::PrivateUse,
        plane if plane <= 0xFF => {
            TableKind::for_plane(plane as u8).unwrap_or(TableKind::Undefined)
        }
        _ => TableKind::Undefined,
    }
}

/// The level at which dropped codepoints of the given table are logged.
/// Only private use data duplicates what the table answers anyway.
fn drop_level(kind: TableKind) -> log::Level {
    match kind {
        TableKind::PrivateUse => log::Level::Debug,
        _ => log::Level::Warn,
    }
}

/// Packs the codepoints in `start..end` into deduplicated records and side
/// tables.
struct TablePacker<'a> {
    builder: &'a DatabaseBuilder,
    start: u32,
    end: u32,
    records: Vec<Record>,
    record_ids: HashMap<Record, u16>,
    cases: Vec<CaseDeltas>,
    case_ids: HashMap<CaseDeltas, u16>,
}

impl<'a> TablePacker<'a> {
    fn new(builder: &'a DatabaseBuilder, start: u32, end: u32) -> Self {
        let mut record_ids = HashMap::new();
        record_ids.insert(Record::DEFAULT, 0);
        let mut case_ids = HashMap::new();
        case_ids.insert(CaseDeltas::default(), 0);
        TablePacker {
            builder,
            start,
            end,
            records: vec![Record::DEFAULT],
            record_ids,
            cases: vec![CaseDeltas::default()],
            case_ids,
        }
    }

    /// Return the record indexes for the 256 codepoints starting at `base`.
    fn pack_block(&mut self, base: u32) -> Result<Vec<u16>> {
        let mut block = Vec::with_capacity(BLOCK_LEN);
        for cp in base..base + BLOCK_LEN as u32 {
            block.push(self.record_id(cp)?);
        }
        Ok(block)
    }

    /// Consume this packer and return its records and side tables.
    ///
    /// Expansions and mirrors are only kept for codepoints that have data,
    /// since nothing else can ever reach them.
    fn finish(self) -> (Box<[Record]>, SideTables) {
        let props = &self.builder.props;
        let upper = self
            .builder
            .upper
            .range(self.start..self.end)
            .filter(|&(cp, _)| props.contains_key(cp))
            .filter_map(|(&cp, seq)| {
                CaseExpansion::from_slice(seq)
                    .map(|seq| UpperExpansion { cp, seq })
            })
            .collect::<Vec<_>>();
        let mirrors = self
            .builder
            .mirrors
            .range(self.start..self.end)
            .filter(|&(cp, _)| props.get(cp).map_or(false, |p| p.mirrored))
            .map(|(&cp, &glyph)| (cp, glyph))
            .collect::<Vec<_>>();
        let side = SideTables {
            cases: self.cases.into_boxed_slice(),
            upper: upper.into_boxed_slice(),
            mirrors: mirrors.into_boxed_slice(),
        };
        (self.records.into_boxed_slice(), side)
    }

    fn record_id(&mut self, cp: u32) -> Result<u16> {
        if cp < self.start || cp >= self.end {
            return Ok(0);
        }
        let props = match self.builder.props.get(&cp) {
            None => return Ok(0),
            Some(props) => props,
        };
        let case = self.case_id(cp, props)?;
        let mut flags = 0;
        if let Some(seq) = self.builder.upper.get(&cp) {
            if seq.is_empty() || seq.len() > MAX_EXPANSION {
                return Err(Error::build(format!(
                    "upper case expansion of U+{:04X} has {} codepoints, \
                     expected 1 to {}",
                    cp,
                    seq.len(),
                    MAX_EXPANSION
                )));
            }
            flags |= UPPER_EXPANDS;
        }
        if let Some(d) = props.digit {
            if d as u32 >= crate::record::MAX_RADIX {
                return Err(Error::build(format!(
                    "digit value {} of U+{:04X} is out of range",
                    d, cp
                )));
            }
        }
        let rec = Record::encode(props, flags, case);
        if let Some(&id) = self.record_ids.get(&rec) {
            return Ok(id);
        }
        let id = self.records.len();
        if id > u16::MAX as usize {
            return Err(Error::build(format!(
                "too many distinct records in U+{:04X}..U+{:04X}",
                self.start, self.end
            )));
        }
        self.records.push(rec);
        self.record_ids.insert(rec, id as u16);
        Ok(id as u16)
    }

    fn case_id(&mut self, cp: u32, props: &CharProperties) -> Result<u16> {
        let deltas = CaseDeltas::new(
            cp,
            props.lowercase,
            props.uppercase,
            props.titlecase,
        );
        if let Some(&id) = self.case_ids.get(&deltas) {
            return Ok(id);
        }
        let id = self.cases.len();
        if id > u16::MAX as usize {
            return Err(Error::build(format!(
                "too many distinct case mappings in U+{:04X}..U+{:04X}",
                self.start, self.end
            )));
        }
        self.cases.push(deltas);
        self.case_ids.insert(deltas, id as u16);
        Ok(id as u16)
    }
}
