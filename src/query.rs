use std::io::{self, Write};

use ucd_chardata::Database;

use crate::args::ArgMatches;
use crate::error::Result;

pub fn command_query(args: ArgMatches<'_>) -> Result<()> {
    let db = args.database()?;
    let cps = args.codepoints()?;
    let stdout = io::stdout();
    let mut wtr = io::BufWriter::new(stdout.lock());
    for (i, &cp) in cps.iter().enumerate() {
        if i > 0 {
            writeln!(wtr)?;
        }
        write_properties(&mut wtr, &db, cp)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn command_stats(args: ArgMatches<'_>) -> Result<()> {
    let db = args.database()?;
    let stdout = io::stdout();
    let mut wtr = io::BufWriter::new(stdout.lock());
    write_stats(&mut wtr, &db)?;
    wtr.flush()?;
    Ok(())
}

fn write_properties<W: Write>(
    mut wtr: W,
    db: &Database,
    cp: u32,
) -> io::Result<()> {
    let hex = |cp: u32| format!("U+{:04X}", cp);
    let category = db.category(cp);
    let bidi = db.directionality(cp);
    let upper_ext: Vec<String> =
        db.to_upper_case_extended(cp).iter().map(|&c| hex(c)).collect();
    let mirror = db.mirrored_glyph(cp).map(hex);

    writeln!(wtr, "{}", hex(cp))?;
    writeln!(wtr, "  table:               {}", db.resolve(cp).kind())?;
    writeln!(wtr, "  category:            {} ({:?})", category, category)?;
    writeln!(wtr, "  directionality:      {} ({:?})", bidi, bidi)?;
    writeln!(wtr, "  whitespace:          {}", db.is_whitespace(cp))?;
    writeln!(wtr, "  mirrored:            {}", db.is_mirrored(cp))?;
    writeln!(
        wtr,
        "  mirrored glyph:      {}",
        mirror.as_deref().unwrap_or("none")
    )?;
    writeln!(
        wtr,
        "  identifier start:    {}",
        db.is_identifier_start(cp)
    )?;
    writeln!(wtr, "  identifier part:     {}", db.is_identifier_part(cp))?;
    writeln!(
        wtr,
        "  identifier ignorable: {}",
        db.is_identifier_ignorable(cp)
    )?;
    writeln!(wtr, "  lower case:          {}", hex(db.to_lower_case(cp)))?;
    writeln!(wtr, "  upper case:          {}", hex(db.to_upper_case(cp)))?;
    writeln!(wtr, "  title case:          {}", hex(db.to_title_case(cp)))?;
    writeln!(wtr, "  upper case (full):   {}", upper_ext.join(" "))?;
    writeln!(wtr, "  digit (radix 10):    {}", db.digit(cp, 10))?;
    writeln!(wtr, "  digit (radix 36):    {}", db.digit(cp, 36))?;
    writeln!(wtr, "  numeric value:       {}", db.numeric_value(cp))?;
    writeln!(wtr, "  lowercase:           {}", db.is_lowercase(cp))?;
    writeln!(wtr, "  uppercase:           {}", db.is_uppercase(cp))?;
    writeln!(wtr, "  alphabetic:          {}", db.is_alphabetic(cp))?;
    writeln!(wtr, "  ideographic:         {}", db.is_ideographic(cp))?;
    writeln!(wtr, "  defined:             {}", db.is_defined(cp))?;
    Ok(())
}

fn write_stats<W: Write>(mut wtr: W, db: &Database) -> io::Result<()> {
    writeln!(
        wtr,
        "Unicode version: {}",
        db.unicode_version().unwrap_or("unknown")
    )?;
    writeln!(
        wtr,
        "{:<12} {:>8} {:>8} {:>10}",
        "table", "records", "blocks", "bytes"
    )?;
    let mut total = 0;
    for stats in db.stats() {
        total += stats.heap_bytes;
        writeln!(
            wtr,
            "{:<12} {:>8} {:>8} {:>10}",
            stats.kind.name(),
            stats.records,
            stats.blocks,
            stats.heap_bytes
        )?;
    }
    writeln!(wtr, "{:<12} {:>8} {:>8} {:>10}", "total", "", "", total)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use ucd_chardata::Database;

    use super::{write_properties, write_stats};
    use crate::compile::build_database;
    use crate::ucd::testdata_dir;

    fn properties(db: &Database, cp: u32) -> String {
        let mut buf = vec![];
        write_properties(&mut buf, db, cp).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn query_output() {
        let db = build_database(testdata_dir()).unwrap();
        let out = properties(&db, 0xDF);
        assert!(out.starts_with("U+00DF\n"));
        assert!(out.contains("  table:               latin1\n"));
        assert!(out.contains("  category:            Ll (LowercaseLetter)\n"));
        assert!(out.contains("  upper case (full):   U+0053 U+0053\n"));

        let out = properties(&db, 0x110000);
        assert!(out.contains("  table:               undefined\n"));
        assert!(out.contains("  category:            Cn (Unassigned)\n"));
        assert!(out.contains("  mirrored glyph:      none\n"));
    }

    #[test]
    fn stats_output() {
        let mut buf = vec![];
        write_stats(&mut buf, &Database::empty()).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("Unicode version: unknown\n"));
        for name in &["latin1", "plane00", "plane01", "plane02", "plane0e"] {
            assert!(out.contains(name), "missing {}", name);
        }
    }
}
