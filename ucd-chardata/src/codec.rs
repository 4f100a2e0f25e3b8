// The compiled form of a database. Everything is little endian.
//
//   magic      "UCDPROPS"
//   version    u32, currently 1
//   unicode    u16 length followed by UTF-8 bytes; empty means unknown
//   latin1     256 u16 record indexes, records, side tables
//   planes     4 times: u8 plane number, 256 u16 block numbers, u32 block
//              count, block count * 256 u16 record indexes, records, side
//              tables
//
//   records    u32 count, then per record: u32 props, i32 numeric, u16 case
//   side       u32 count, then per entry: i32 lower, i32 upper, i32 title
//              u32 count, then per entry: u32 cp, u8 len, 3 * u32
//              u32 count, then per entry: u32 cp, u32 glyph
//
// Decoding never trusts its input. Every index and code is checked, so a
// database that decodes successfully answers every query without panicking.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};

use crate::case::{CaseDeltas, CaseExpansion, UpperExpansion, MAX_EXPANSION};
use crate::database::Database;
use crate::error::{Error, ErrorKind, Result};
use crate::record::Record;
use crate::table::{Latin1Table, PlaneTable, SideTables, BLOCK_LEN};

const MAGIC: &[u8; 8] = b"UCDPROPS";
const FORMAT_VERSION: u32 = 1;

impl Database {
    /// Serialize this database in its compiled form to the given writer.
    pub fn write_to<W: Write>(&self, mut wtr: W) -> Result<()> {
        wtr.write_all(MAGIC)?;
        wtr.write_u32::<LE>(FORMAT_VERSION)?;
        let version = self.unicode_version.as_deref().unwrap_or("");
        if version.len() > u16::MAX as usize {
            return Err(Error::format(format!(
                "Unicode version string is too long ({} bytes)",
                version.len()
            )));
        }
        wtr.write_u16::<LE>(version.len() as u16)?;
        wtr.write_all(version.as_bytes())?;

        write_u16s(&mut wtr, &self.latin1.index)?;
        write_records(&mut wtr, &self.latin1.records)?;
        write_side(&mut wtr, &self.latin1.side)?;
        for table in self.planes().iter() {
            wtr.write_u8(table.plane)?;
            write_u16s(&mut wtr, &table.index)?;
            wtr.write_u32::<LE>(table.block_count() as u32)?;
            write_u16s(&mut wtr, &table.blocks)?;
            write_records(&mut wtr, &table.records)?;
            write_side(&mut wtr, &table.side)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Serialize this database in its compiled form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = vec![];
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Decode a database from its compiled form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Database> {
        let mut rdr = bytes;
        let db = decode(&mut rdr).map_err(|err| {
            if is_eof(&err) {
                Error::format("unexpected end of data".to_string())
            } else {
                err
            }
        })?;
        if !rdr.is_empty() {
            return Err(Error::format(format!(
                "{} trailing bytes after database",
                rdr.len()
            )));
        }
        log::debug!(
            "decoded database for Unicode {} from {} bytes",
            db.unicode_version().unwrap_or("unknown"),
            bytes.len()
        );
        Ok(db)
    }

    /// Read and decode a compiled database from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Database> {
        let bytes = fs::read(path.as_ref())?;
        Database::from_bytes(&bytes)
    }
}

fn is_eof(err: &Error) -> bool {
    match *err.kind() {
        ErrorKind::Io(ref err) => err.kind() == io::ErrorKind::UnexpectedEof,
        _ => false,
    }
}

fn write_u16s<W: Write>(wtr: &mut W, xs: &[u16]) -> io::Result<()> {
    for &x in xs {
        wtr.write_u16::<LE>(x)?;
    }
    Ok(())
}

fn write_records<W: Write>(
    wtr: &mut W,
    records: &[Record],
) -> io::Result<()> {
    wtr.write_u32::<LE>(records.len() as u32)?;
    for rec in records {
        wtr.write_u32::<LE>(rec.props)?;
        wtr.write_i32::<LE>(rec.numeric)?;
        wtr.write_u16::<LE>(rec.case)?;
    }
    Ok(())
}

fn write_side<W: Write>(wtr: &mut W, side: &SideTables) -> io::Result<()> {
    wtr.write_u32::<LE>(side.cases.len() as u32)?;
    for d in side.cases.iter() {
        wtr.write_i32::<LE>(d.lower)?;
        wtr.write_i32::<LE>(d.upper)?;
        wtr.write_i32::<LE>(d.title)?;
    }
    wtr.write_u32::<LE>(side.upper.len() as u32)?;
    for e in side.upper.iter() {
        wtr.write_u32::<LE>(e.cp)?;
        wtr.write_u8(e.seq.len() as u8)?;
        for i in 0..MAX_EXPANSION {
            wtr.write_u32::<LE>(e.seq.get(i).cloned().unwrap_or(0))?;
        }
    }
    wtr.write_u32::<LE>(side.mirrors.len() as u32)?;
    for &(cp, glyph) in side.mirrors.iter() {
        wtr.write_u32::<LE>(cp)?;
        wtr.write_u32::<LE>(glyph)?;
    }
    Ok(())
}

fn decode(rdr: &mut &[u8]) -> Result<Database> {
    let mut magic = [0; 8];
    rdr.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(Error::format("missing magic header".to_string()));
    }
    let version = rdr.read_u32::<LE>()?;
    if version != FORMAT_VERSION {
        return Err(Error::format(format!(
            "unsupported format version {} (expected {})",
            version, FORMAT_VERSION
        )));
    }
    let len = rdr.read_u16::<LE>()? as usize;
    let mut unicode = vec![0; len];
    rdr.read_exact(&mut unicode)?;
    let unicode = String::from_utf8(unicode).map_err(|_| {
        Error::format("Unicode version is not valid UTF-8".to_string())
    })?;
    let unicode_version =
        if unicode.is_empty() { None } else { Some(unicode) };

    let index = read_u16s(rdr, BLOCK_LEN)?;
    let records = read_records(rdr)?;
    let side = read_side(rdr, 0..BLOCK_LEN as u32)?;
    check_indexes("latin1", &index, records.len())?;
    check_cases("latin1", &records, side.cases.len())?;
    let latin1 = Latin1Table {
        index: index.into_boxed_slice(),
        records: records.into_boxed_slice(),
        side,
    };

    Ok(Database {
        unicode_version,
        latin1,
        plane00: read_plane(rdr, 0)?,
        plane01: read_plane(rdr, 1)?,
        plane02: read_plane(rdr, 2)?,
        plane0e: read_plane(rdr, 14)?,
    })
}

fn read_plane(rdr: &mut &[u8], expected: u8) -> Result<PlaneTable> {
    let plane = rdr.read_u8()?;
    if plane != expected {
        return Err(Error::format(format!(
            "expected table for plane {}, found plane {}",
            expected, plane
        )));
    }
    let name = format!("plane {}", plane);
    let index = read_u16s(rdr, 256)?;
    let block_count = rdr.read_u32::<LE>()? as usize;
    if block_count == 0 || block_count > u16::MAX as usize + 1 {
        return Err(Error::format(format!(
            "{}: invalid block count {}",
            name, block_count
        )));
    }
    let blocks = read_u16s(rdr, block_count * BLOCK_LEN)?;
    let records = read_records(rdr)?;
    let base = (plane as u32) << 16;
    let side = read_side(rdr, base..base + 0x10000)?;
    check_indexes(&name, &index, block_count)?;
    check_indexes(&name, &blocks, records.len())?;
    check_cases(&name, &records, side.cases.len())?;
    Ok(PlaneTable {
        plane,
        index: index.into_boxed_slice(),
        blocks: blocks.into_boxed_slice(),
        records: records.into_boxed_slice(),
        side,
    })
}

fn read_u16s(rdr: &mut &[u8], count: usize) -> Result<Vec<u16>> {
    if rdr.len() < count * 2 {
        return Err(Error::format("unexpected end of data".to_string()));
    }
    let mut xs = vec![0; count];
    rdr.read_u16_into::<LE>(&mut xs)?;
    Ok(xs)
}

/// Read a count prefix, refusing counts that cannot possibly fit in the
/// remaining input.
fn read_count(rdr: &mut &[u8], entry_size: usize) -> Result<usize> {
    let count = rdr.read_u32::<LE>()? as usize;
    if count.saturating_mul(entry_size) > rdr.len() {
        return Err(Error::format(format!(
            "count {} exceeds the remaining {} bytes",
            count,
            rdr.len()
        )));
    }
    Ok(count)
}

fn read_records(rdr: &mut &[u8]) -> Result<Vec<Record>> {
    let count = read_count(rdr, 10)?;
    if count == 0 || count > u16::MAX as usize + 1 {
        return Err(Error::format(format!("invalid record count {}", count)));
    }
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let rec = Record {
            props: rdr.read_u32::<LE>()?,
            numeric: rdr.read_i32::<LE>()?,
            case: rdr.read_u16::<LE>()?,
        };
        if !rec.is_valid() {
            return Err(Error::format(format!(
                "invalid record {:?} at position {}",
                rec,
                records.len()
            )));
        }
        records.push(rec);
    }
    if records[0] != Record::DEFAULT {
        return Err(Error::format(
            "first record is not the unassigned record".to_string(),
        ));
    }
    Ok(records)
}

fn read_side(
    rdr: &mut &[u8],
    domain: std::ops::Range<u32>,
) -> Result<SideTables> {
    let count = read_count(rdr, 12)?;
    if count == 0 || count > u16::MAX as usize + 1 {
        return Err(Error::format(format!("invalid case count {}", count)));
    }
    let mut cases = Vec::with_capacity(count);
    for _ in 0..count {
        cases.push(CaseDeltas {
            lower: rdr.read_i32::<LE>()?,
            upper: rdr.read_i32::<LE>()?,
            title: rdr.read_i32::<LE>()?,
        });
    }
    if !cases[0].is_identity() {
        return Err(Error::format(
            "first case entry is not the identity".to_string(),
        ));
    }

    let count = read_count(rdr, 17)?;
    let mut upper: Vec<UpperExpansion> = Vec::with_capacity(count);
    for _ in 0..count {
        let cp = rdr.read_u32::<LE>()?;
        let len = rdr.read_u8()? as usize;
        let mut buf = [0; MAX_EXPANSION];
        for slot in buf.iter_mut() {
            *slot = rdr.read_u32::<LE>()?;
        }
        if !domain.contains(&cp) {
            return Err(Error::format(format!(
                "upper case expansion for U+{:04X} outside its table",
                cp
            )));
        }
        if upper.last().map_or(false, |last| last.cp >= cp) {
            return Err(Error::format(
                "upper case expansions are not sorted".to_string(),
            ));
        }
        let seq = buf
            .get(..len)
            .filter(|seq| seq.iter().all(|&c| c <= 0x10FFFF))
            .and_then(CaseExpansion::from_slice)
            .ok_or_else(|| {
                Error::format(format!(
                    "invalid upper case expansion for U+{:04X}",
                    cp
                ))
            })?;
        upper.push(UpperExpansion { cp, seq });
    }

    let count = read_count(rdr, 8)?;
    let mut mirrors: Vec<(u32, u32)> = Vec::with_capacity(count);
    for _ in 0..count {
        let cp = rdr.read_u32::<LE>()?;
        let glyph = rdr.read_u32::<LE>()?;
        if !domain.contains(&cp) || glyph > 0x10FFFF {
            return Err(Error::format(format!(
                "invalid mirror pair U+{:04X} -> U+{:04X}",
                cp, glyph
            )));
        }
        if mirrors.last().map_or(false, |&(last, _)| last >= cp) {
            return Err(Error::format("mirrors are not sorted".to_string()));
        }
        mirrors.push((cp, glyph));
    }
    Ok(SideTables {
        cases: cases.into_boxed_slice(),
        upper: upper.into_boxed_slice(),
        mirrors: mirrors.into_boxed_slice(),
    })
}

fn check_indexes(table: &str, indexes: &[u16], len: usize) -> Result<()> {
    match indexes.iter().position(|&i| i as usize >= len) {
        None => Ok(()),
        Some(pos) => Err(Error::format(format!(
            "{}: index {} at position {} is out of range (length {})",
            table, indexes[pos], pos, len
        ))),
    }
}

fn check_cases(table: &str, records: &[Record], len: usize) -> Result<()> {
    match records.iter().position(|rec| rec.case as usize >= len) {
        None => Ok(()),
        Some(pos) => Err(Error::format(format!(
            "{}: record {} refers to missing case entry {}",
            table, pos, records[pos].case
        ))),
    }
}

#[cfg(test)]
mod tests {
    use crate::database::Database;
    use crate::error::ErrorKind;
    use crate::testdata::SAMPLE;

    fn is_format_error(bytes: &[u8]) -> bool {
        match Database::from_bytes(bytes) {
            Err(err) => match *err.kind() {
                ErrorKind::Format(_) => true,
                _ => false,
            },
            Ok(_) => false,
        }
    }

    #[test]
    fn roundtrip_preserves_everything() {
        let bytes = SAMPLE.to_bytes().unwrap();
        let db = Database::from_bytes(&bytes).unwrap();
        assert_eq!(db, *SAMPLE);
        for cp in 0..=0x10FFFF {
            assert_eq!(db.category(cp), SAMPLE.category(cp));
            assert_eq!(
                db.to_upper_case_extended(cp),
                SAMPLE.to_upper_case_extended(cp)
            );
        }
        assert_eq!(db.unicode_version(), Some("14.0.0"));
    }

    #[test]
    fn empty_roundtrip() {
        let empty = Database::empty();
        let db = Database::from_bytes(&empty.to_bytes().unwrap()).unwrap();
        assert_eq!(db, empty);
        assert_eq!(db.unicode_version(), None);
    }

    #[test]
    fn bad_magic() {
        let mut bytes = SAMPLE.to_bytes().unwrap();
        bytes[0] = b'X';
        assert!(is_format_error(&bytes));
        assert!(is_format_error(b""));
    }

    #[test]
    fn bad_version() {
        let mut bytes = SAMPLE.to_bytes().unwrap();
        bytes[8] = 2;
        assert!(is_format_error(&bytes));
    }

    #[test]
    fn truncated() {
        let bytes = SAMPLE.to_bytes().unwrap();
        for &len in &[10, 20, 100, 600, bytes.len() / 2, bytes.len() - 1] {
            assert!(is_format_error(&bytes[..len]), "length {}", len);
        }
    }

    #[test]
    fn trailing_bytes() {
        let mut bytes = SAMPLE.to_bytes().unwrap();
        bytes.push(0);
        assert!(is_format_error(&bytes));
    }

    #[test]
    fn out_of_range_record_index() {
        let mut bytes = Database::empty().to_bytes().unwrap();
        // Magic, format version and an empty Unicode version come first,
        // then the Latin-1 index.
        let index = 8 + 4 + 2;
        bytes[index] = 0xFF;
        assert!(is_format_error(&bytes));
    }

    #[test]
    fn invalid_record() {
        let mut bytes = Database::empty().to_bytes().unwrap();
        // The record count follows the Latin-1 index, then the first
        // record's props. Setting an unused category code is invalid.
        let props = 8 + 4 + 2 + 512 + 4;
        bytes[props] = 17;
        assert!(is_format_error(&bytes));
    }
}
