use clap::{Parser, Subcommand, ValueEnum};
use kegg_fetch_core::{EntryKind, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kegg-fetch",
    version,
    about = "Fetch KEGG reactions and compounds as tabular records",
    long_about = "kegg-fetch retrieves reaction and compound entries from the KEGG REST API, decodes the flat-file format and equations, and writes the configured fields as CSV or JSON."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch reaction entries
    #[command(about = "Fetch reaction entries (rn:) and export them")]
    Reaction(FetchArgs),

    /// Fetch compound entries
    #[command(about = "Fetch compound entries (cpd:) and export them")]
    Compound(FetchArgs),

    /// Parse a local flat file
    #[command(about = "Project a local KEGG flat file without touching the network")]
    Parse(ParseArgs),

    /// Decode an equation
    #[command(about = "Split a reaction equation into reactants and products")]
    Equation(EquationArgs),
}

/// Output format override
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Entry kind selector
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Reaction,
    Compound,
}

impl From<KindArg> for EntryKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Reaction => EntryKind::Reaction,
            KindArg::Compound => EntryKind::Compound,
        }
    }
}

#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Entry identifiers, e.g. R00200 or cpd:C00031
    #[arg(help = "Identifiers to fetch; the configured default is used when none are given")]
    pub ids: Vec<String>,

    /// Write every record to one file instead of one file per entry
    #[arg(short, long, help = "Write all records to this file")]
    pub output: Option<PathBuf>,

    /// Output format, overriding the configuration
    #[arg(short, long, value_enum, help = "Output format (csv or json)")]
    pub format: Option<FormatArg>,

    /// Print only, do not write files
    #[arg(long, help = "Print records without saving them")]
    pub no_save: bool,
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Path to a flat file, possibly holding several `///`-terminated entries
    #[arg(help = "Path to the KEGG flat file to parse")]
    pub path: PathBuf,

    /// Entry kind; inferred from the first ENTRY line when omitted
    #[arg(short, long, value_enum, help = "Entry kind of the file")]
    pub kind: Option<KindArg>,

    /// Output file; records go to stdout when omitted
    #[arg(short, long, help = "Write records to this file")]
    pub output: Option<PathBuf>,

    /// Output format, overriding the configuration
    #[arg(short, long, value_enum, help = "Output format (csv or json)")]
    pub format: Option<FormatArg>,

    /// Dump decoded sections instead of projected records
    #[arg(long, help = "Print the raw section map of each entry as JSON")]
    pub raw: bool,
}

#[derive(Parser, Debug)]
pub struct EquationArgs {
    /// Equation text, e.g. "C00002 + C00001 <=> C00008 + C00009"
    #[arg(help = "Equation to decode")]
    pub equation: String,

    /// Print the decoded equation as JSON
    #[arg(long, help = "Print the decoded equation as JSON")]
    pub json: bool,
}
