// TODO! Cap the completed-item store during long follow sessions instead of
// relying on process restarts

use std::path::PathBuf;

use clap::Parser;
use sift::extract::ExtractOptions;
use tracing_subscriber::prelude::*;

#[derive(clap::Parser)]
#[command(version)]
pub struct Cli {
    /// Log file to scan for embedded payloads
    pub log_file: String,

    /// Directory where completed items land
    #[arg(short = 'o', long = "output-dir", default_value = "extracted")]
    pub output_dir: String,

    /// Keep watching the log for appended lines after the first EOF
    #[arg(long = "follow", default_value_t = false)]
    pub follow: bool,

    /// Only extract items with these type tags
    #[arg(long = "types", value_delimiter = ',', num_args = 1..)]
    pub types: Option<Vec<String>>,
}

fn main() -> sift::error::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let cli_args = Cli::parse();
    let log_path = PathBuf::from(shellexpand::tilde(&cli_args.log_file).into_owned());
    let output_dir = PathBuf::from(shellexpand::tilde(&cli_args.output_dir).into_owned());

    log::info!("Scanning {} for embedded payloads...", log_path.display());

    let (tx, rx) = std::sync::mpsc::channel();
    let reader_handle = sift::reader::spawn(log_path, cli_args.follow, tx);

    let registry = richlog::PluginRegistry::with_builtins();
    let options = ExtractOptions {
        output_dir,
        types: cli_args.types,
    };
    let summary = sift::extract::process_lines(rx, &registry, &options)?;

    let _ = reader_handle.join();

    log::info!(
        "Scanned {} lines ({} wire lines): {} items completed, {} extracted",
        summary.lines_scanned,
        summary.wire_lines,
        summary.items_completed,
        summary.items_extracted
    );
    for uuid in &summary.pending_uuids {
        log::warn!("Payload {} is still incomplete; its chunks never all arrived", uuid);
    }

    Ok(())
}
