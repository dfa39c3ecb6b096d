//! Loader for RON tuning files.

use ron::Options;
use std::fs;
use std::path::Path;

/// Error type for config loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// RON options with extensions enabled for more forgiving hand-edited files.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a single RON struct from `path`.
pub fn load_config_file<T>(path: &Path) -> Result<T, ConfigLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    ron_options().from_str(&contents).map_err(|e| ConfigLoadError {
        file: file_name,
        message: format!("Parse error: {}", e),
    })
}

/// Parse a RON struct from a string (tests, embedded defaults).
pub fn parse_config_str<T>(source: &str) -> Result<T, ConfigLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options().from_str(source).map_err(|e| ConfigLoadError {
        file: "<inline>".to_string(),
        message: format!("Parse error: {}", e),
    })
}
