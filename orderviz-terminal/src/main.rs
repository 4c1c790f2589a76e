//! orderviz - transform order, drawn in the terminal
//!
//! Controls:
//!   - Up/Down or Tab: Pick a control
//!   - Left/Right: Adjust it (Shift for fine steps)
//!   - Space/Enter: Toggle checkboxes, cycle lists
//!   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;

use orderviz_terminal::{Args, SketchApp, SketchConfig};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = SketchConfig::from_args(&args)?;
    let mut app = SketchApp::new(config);

    match args.snapshot {
        Some(time) => {
            let stdout = io::stdout();
            let colored = stdout.is_terminal();
            app.snapshot(args.size, time, &mut stdout.lock(), colored)
                .context("writing snapshot")
        }
        None => app.run(),
    }
}

/// Logs go to the file when one is given; otherwise only errors reach
/// stderr so the full-screen view stays intact
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "error" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
