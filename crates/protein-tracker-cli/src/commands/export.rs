use clap::Args;
use std::path::PathBuf;

use super::open_engine;

#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    let json = engine.export().to_json_pretty()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            tracing::info!(path = %path.display(), "export written");
            println!("{}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
