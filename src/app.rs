use clap::{App, AppSettings, Arg, SubCommand};

const TEMPLATE: &'static str = "\
{bin} {version}
{author}
{about}

USAGE:
    {usage}

SUBCOMMANDS:
{subcommands}

OPTIONS:
{unified}";

const TEMPLATE_SUB: &'static str = "\
{before-help}
USAGE:
    {usage}

ARGS:
{positionals}

OPTIONS:
{unified}";

const ABOUT: &'static str = "
ucd-props compiles the Unicode character database into a compact binary
database of per-codepoint properties, and answers property queries against
such a database.

A compiled database holds a direct lookup table for Latin-1 and a two stage
table for each of planes 0, 1, 2 and 14. The private use planes are answered
by rule and every other codepoint is unassigned, so neither carries data.

Set RUST_LOG to control logging, e.g., RUST_LOG=debug.";

const ABOUT_COMPILE: &'static str = "\
compile reads UnicodeData.txt, PropList.txt, SpecialCasing.txt,
BidiMirroring.txt and ReadMe.txt from a UCD directory and writes a compiled
property database to the given output file.
";

const ABOUT_QUERY: &'static str = "\
query prints every property of each given codepoint. Codepoints may be
written as U+XXXX, 0xXXXX, bare hexadecimal, or a single literal character.
Values beyond U+10FFFF are accepted and answered like unassigned codepoints.

The database is either a compiled database (--database) or is compiled on
the fly from a UCD directory (--ucd-dir).
";

const ABOUT_STATS: &'static str = "\
stats prints the Unicode version of a compiled database along with the number
of records, the number of blocks and the heap size of each of its tables.
";

/// Build a clap application.
pub fn app() -> App<'static, 'static> {
    let flag_verbose = Arg::with_name("verbose")
        .long("verbose")
        .short("v")
        .global(true)
        .help("Log progress at the info level.");
    let flag_database = Arg::with_name("database")
        .long("database")
        .takes_value(true)
        .help("A compiled database produced by 'ucd-props compile'.");
    let flag_ucd_dir = Arg::with_name("ucd-dir")
        .long("ucd-dir")
        .takes_value(true)
        .help("Compile the database from this UCD directory instead.");

    let cmd_compile = SubCommand::with_name("compile")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Compile a UCD directory into a property database.")
        .before_help(ABOUT_COMPILE)
        .arg(
            Arg::with_name("ucd-dir").required(true).help(
                "Directory containing the Unicode character database files.",
            ),
        )
        .arg(
            Arg::with_name("output")
                .required(true)
                .help("Path to write the compiled database to."),
        );
    let cmd_query = SubCommand::with_name("query")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Print the properties of codepoints.")
        .before_help(ABOUT_QUERY)
        .arg(flag_database.required_unless("ucd-dir"))
        .arg(flag_ucd_dir.conflicts_with("database"))
        .arg(
            Arg::with_name("codepoint")
                .required(true)
                .multiple(true)
                .help("The codepoints to query."),
        );
    let cmd_stats = SubCommand::with_name("stats")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Print table statistics of a compiled database.")
        .before_help(ABOUT_STATS)
        .arg(
            Arg::with_name("database")
                .required(true)
                .help("A compiled database."),
        );

    App::new("ucd-props")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about(ABOUT)
        .template(TEMPLATE)
        .max_term_width(100)
        .setting(AppSettings::UnifiedHelpMessage)
        .arg(flag_verbose)
        .subcommand(cmd_compile)
        .subcommand(cmd_query)
        .subcommand(cmd_stats)
}

#[cfg(test)]
mod tests {
    use super::app;

    #[test]
    fn query_arguments() {
        let m = app()
            .get_matches_from_safe(vec![
                "ucd-props", "query", "--ucd-dir", "ucd", "U+0041", "ß",
            ])
            .unwrap();
        let (name, sub) = m.subcommand();
        assert_eq!(name, "query");
        let sub = sub.unwrap();
        assert_eq!(sub.value_of("ucd-dir"), Some("ucd"));
        let cps: Vec<&str> = sub.values_of("codepoint").unwrap().collect();
        assert_eq!(cps, vec!["U+0041", "ß"]);
    }

    #[test]
    fn query_needs_a_database() {
        let result =
            app().get_matches_from_safe(vec!["ucd-props", "query", "41"]);
        assert!(result.is_err());
        let result = app().get_matches_from_safe(vec![
            "ucd-props",
            "query",
            "--database",
            "db",
            "--ucd-dir",
            "ucd",
            "41",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_is_global() {
        let m = app()
            .get_matches_from_safe(vec!["ucd-props", "stats", "db", "-v"])
            .unwrap();
        assert!(m.is_present("verbose"));
    }
}
