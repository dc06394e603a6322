use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::app::is_command_char;

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Whether to colour output going to a stream that is or isn't a terminal.
    pub const fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub prompt: Option<String>,
    pub escape: Option<char>,
    pub color: Option<ColorMode>,
    pub limit: Option<usize>,
}

impl ConfigFlags {
    /// Merge two flag sets; values set in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            prompt: other.prompt.clone().or_else(|| self.prompt.clone()),
            escape: other.escape.or(self.escape),
            color: other.color.or(self.color),
            limit: other.limit.or(self.limit),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("ded").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("ded")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("ded").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("ded").join("config");
        }
    }

    PathBuf::from(".dedrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".dedrc")
}

/// Read saved flags from `path`; a missing file yields no flags.
///
/// Each non-comment line holds one flag, optionally followed by its value.
/// The value runs to the end of the line so prompts may contain spaces.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .flat_map(|line| match line.split_once(char::is_whitespace) {
            Some((flag, value)) if !flag.contains('=') => vec![flag.to_owned(), value.to_owned()],
            _ => vec![line.to_owned()],
        })
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# ded defaults (saved with --save)".to_string());
    if let Some(prompt) = &flags.prompt {
        lines.push(format!("--prompt {prompt}"));
    }
    if let Some(escape) = flags.escape {
        lines.push(format!("--escape {escape}"));
    }
    if let Some(color) = flags.color {
        let color_str = match color {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        };
        lines.push(format!("--color {color_str}"));
    }
    if let Some(limit) = flags.limit {
        lines.push(format!("--limit {limit}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove the saved flags at `path`, if any.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from `tokens`; unknown tokens and bad values are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        if !matches!(name, "--prompt" | "--escape" | "--color" | "--limit") {
            i += 1;
            continue;
        }
        let value = match inline {
            Some(value) => Some(value),
            None => {
                i += 1;
                tokens.get(i).map(String::as_str)
            }
        };
        if let Some(value) = value {
            apply_flag(&mut flags, name, value);
        }
        i += 1;
    }
    flags
}

fn apply_flag(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--prompt" => flags.prompt = Some(value.to_string()),
        "--escape" => match parse_escape(value.trim()) {
            Ok(ch) => flags.escape = Some(ch),
            Err(reason) => warn!(value, reason = %reason, "invalid escape character"),
        },
        "--color" => match parse_color(value.trim()) {
            Some(color) => flags.color = Some(color),
            None => warn!(value, "unknown color mode"),
        },
        "--limit" => match value.trim().parse() {
            Ok(limit) => flags.limit = Some(limit),
            Err(err) => warn!(value, error = %err, "invalid line limit"),
        },
        _ => {}
    }
}

/// Parse an escape character value.
///
/// # Errors
///
/// Returns a reason if `value` is not exactly one character, or if that
/// character is a command and would be unusable at the prompt.
pub fn parse_escape(value: &str) -> std::result::Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if is_command_char(ch) => {
            Err(format!("'{ch}' is a command character"))
        }
        (Some(ch), None) => Ok(ch),
        _ => Err("escape must be a single character".to_string()),
    }
}

fn parse_color(s: &str) -> Option<ColorMode> {
    match s {
        "auto" => Some(ColorMode::Auto),
        "always" => Some(ColorMode::Always),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}
