//! ded - a tiny modal line editor.
//!
//! # Usage
//!
//! ```bash
//! ded notes.txt
//! ded --prompt 'ded> ' --color never
//! ded --escape '~' --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ded::app::App;
use ded::config::{
    ColorMode, ConfigFlags, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_escape, save_config_flags,
};

/// A tiny modal line editor
#[derive(Parser, Debug)]
#[command(name = "ded", version, about, long_about = None)]
struct Cli {
    /// File to edit
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Prompt shown before each command
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,

    /// Character that, alone on a line, returns to the prompt
    #[arg(long, value_name = "CHAR", value_parser = parse_escape)]
    escape: Option<char>,

    /// When to colour output
    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    /// Maximum number of addressable lines
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            prompt: self.prompt.clone(),
            escape: self.escape,
            color: self.color,
            limit: self.limit,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging; stdout belongs to the editor
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

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

    let mut app = App::new(cli.file).with_color(effective.color.unwrap_or_default());
    if let Some(prompt) = effective.prompt {
        app = app.with_prompt(prompt);
    }
    if let Some(escape) = effective.escape {
        app = app.with_escape(escape);
    }
    if let Some(limit) = effective.limit {
        app = app.with_limit(limit);
    }

    app.run().context("Editor error")
}
