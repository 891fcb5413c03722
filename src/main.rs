//! vted - a minimal terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! vted notes.txt
//! vted --readonly notes.txt
//! vted
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use vted::app::App;
use vted::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};

/// A minimal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "vted", version, about, long_about = None)]
struct Cli {
    /// File to edit (an unnamed empty buffer when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Open the buffer read-only
    #[arg(long)]
    readonly: bool,

    /// Write debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults in .vtedrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .vtedrc
    #[arg(long)]
    clear: bool,
}

// The terminal UI owns stdout, so default logging goes to stderr at WARN;
// --debug-log redirects a DEBUG stream into a file instead.
fn init_logging(debug_log: Option<&Path>) -> Result<()> {
    match debug_log {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create debug log {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::DEBUG.into()),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.debug_log.as_deref())?;

    if let Some(file) = &cli.file
        && file.is_dir()
    {
        anyhow::bail!("{} is a directory", file.display());
    }

    let mut app = App::new(cli.file).with_readonly(effective.readonly);
    app.run().context("Application error")
}
