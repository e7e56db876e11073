use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use home::home_dir;
use tracing::{debug, warn};

use crate::{errors::CovError, source::http::DEFAULT_BASE_URL};

use super::OutputFormat;

/// Values read from `~/.covdash/config`, with built-in defaults for
/// anything the file leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl Settings {
    /// Reads `key = value` lines on top of the defaults. Blank lines and
    /// `#` comments are skipped, as are lines without `=`; a later line
    /// overrides an earlier one for the same key.
    pub fn parse(contents: &str) -> Result<Self, CovError> {
        let mut settings = Settings::default();
        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                debug!(line = number + 1, "skipping config line without '='");
                continue;
            };
            settings
                .apply(key.trim(), value.trim())
                .map_err(|err| CovError::ConfigError(format!("line {}: {}", number + 1, err)))?;
        }
        Ok(settings)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), CovError> {
        match key {
            "base_url" if value.is_empty() => {
                return Err(CovError::ConfigError("base_url must not be empty".to_string()));
            }
            "base_url" => self.base_url = value.trim_end_matches('/').to_string(),
            "format" => self.format = value.parse()?,
            "color" => self.color = parse_bool(value)?,
            _ => warn!(%key, "ignoring unknown setting"),
        }
        Ok(())
    }

    /// Commented-out template written the first time `covdash config` runs.
    fn template() -> String {
        let defaults = Settings::default();
        format!(
            "# covdash settings, one `key = value` per line.\n\
             # Command-line flags take precedence over anything set here.\n\
             #\n\
             # base_url  coverage analysis service, queried at <base_url>/coverage\n\
             # format    text | json\n\
             # color     true | false (ignored for json output)\n\
             \n\
             # base_url = {}\n\
             # format = text\n\
             # color = {}\n",
            defaults.base_url, defaults.color
        )
    }
}

fn parse_bool(value: &str) -> Result<bool, CovError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CovError::ConfigError(format!(
            "invalid value for color: {}",
            value
        ))),
    }
}

fn settings_location() -> Result<PathBuf, CovError> {
    let home = home_dir()
        .ok_or_else(|| CovError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home.join(".covdash").join("config"))
}

/// `$VISUAL`, then `$EDITOR`, then `vi`, split into program and arguments
/// so values like `code --wait` work.
fn editor_command(visual: Option<String>, editor: Option<String>) -> (String, Vec<String>) {
    let command = visual
        .into_iter()
        .chain(editor)
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string());
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next().unwrap_or_else(|| "vi".to_string());
    (program, parts.collect())
}

/// Creates `~/.covdash/config` from the template if needed, then opens it
/// for editing.
pub fn update_settings() -> Result<(), CovError> {
    let location = settings_location()?;
    if !location.exists() {
        if let Some(parent) = location.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&location, Settings::template())?;
        debug!(path = %location.display(), "wrote settings template");
    }

    let (program, args) = editor_command(env::var("VISUAL").ok(), env::var("EDITOR").ok());
    let status = Command::new(&program)
        .args(&args)
        .arg(&location)
        .status()
        .map_err(|e| CovError::RuntimeError(format!("Failed to start '{}': {}", program, e)))?;
    if !status.success() {
        return Err(CovError::RuntimeError(format!(
            "'{}' exited with {}",
            program, status
        )));
    }
    Ok(())
}

pub fn load_settings_from(config_path: &Path) -> Result<Settings, CovError> {
    if !config_path.exists() {
        return Ok(Settings::default());
    }
    Settings::parse(&fs::read_to_string(config_path)?)
}

pub fn load_settings() -> Result<Settings, CovError> {
    match home_dir() {
        Some(_) => load_settings_from(&settings_location()?),
        None => Ok(Settings::default()),
    }
}
