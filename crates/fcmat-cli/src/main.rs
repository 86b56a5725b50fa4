use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

mod commands;

use commands::RunConfig;

/// Tool to work with FreeCAD material definition cards
///
/// Reads a material card (.FCMat) and prints every property as a
/// `Group_Property` key with its value.
#[derive(Debug, Parser)]
#[command(
    name = "fcmat",
    version,
    about,
    after_help = "Examples:\n   fcmat \"StandardMaterial/Steel.FCMat\""
)]
struct Cli {
    /// Path to the material card
    #[arg(value_name = "CARD_FILE", required_unless_present = "list_properties")]
    card: Option<PathBuf>,

    /// Write a comma separated grid with the material data (not yet written)
    #[arg(short = 'c', long = "output-csv", value_name = "FILE")]
    output_csv: Option<PathBuf>,

    /// Print the card as a JSON object
    #[arg(long)]
    json: bool,

    /// Print the recognized property names instead of reading a card
    #[arg(long, conflicts_with = "card")]
    list_properties: bool,

    /// Use human-readable names with --list-properties
    #[arg(long, requires = "list_properties")]
    display_names: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        twyg::LogLevel::Debug
    } else {
        twyg::LogLevel::Info
    };
    let coloured = console::Term::stderr().features().colors_supported();
    let opts = twyg::OptsBuilder::new()
        .coloured(coloured)
        .level(level)
        .output(twyg::Output::Stderr)
        .build()
        .map_err(|e| anyhow::anyhow!("invalid logging options: {:?}", e))?;
    twyg::setup(opts).map_err(|e| anyhow::anyhow!("could not set up logging: {:?}", e))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{}", err);
            eprint!("{}", Cli::command().render_help());
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose)?;

    if cli.list_properties {
        commands::list_properties(cli.display_names);
        return Ok(());
    }

    if let Some(card) = cli.card {
        let config = RunConfig {
            card,
            output_csv: cli.output_csv,
            json: cli.json,
        };
        commands::show_card(&config)?;
    }

    Ok(())
}
