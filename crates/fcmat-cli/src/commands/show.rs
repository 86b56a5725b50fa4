use anyhow::{Context, Result};
use std::path::PathBuf;

/// Options for reading and printing one material card.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The card to read.
    pub card: PathBuf,
    /// Accepted for compatibility; no CSV file is produced.
    pub output_csv: Option<PathBuf>,
    /// Print a JSON object instead of the `key : value` listing.
    pub json: bool,
}

/// Import a card and print each property to stdout.
pub fn show_card(config: &RunConfig) -> Result<()> {
    if let Some(csv_path) = &config.output_csv {
        log::warn!(
            "CSV output is not implemented; {} will not be written",
            csv_path.display()
        );
    }

    log::debug!("Reading material card {}", config.card.display());
    let record = fcmat_core::import_card(&config.card)
        .with_context(|| format!("Failed to import material card {}", config.card.display()))?;

    if config.json {
        let json = serde_json::to_string_pretty(&record)
            .context("Failed to serialize material record")?;
        println!("{}", json);
    } else {
        for (key, value) in record.iter() {
            println!("{:?} : {:?}", key, value);
        }
    }

    Ok(())
}
