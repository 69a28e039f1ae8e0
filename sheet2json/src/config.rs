//! Run configuration
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, an optional `sheet2json.toml`, and built-in defaults. They are
//! resolved once at startup into an immutable [`ConvertContext`] that is
//! passed down to every conversion.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::convert::Strictness;

/// Settings file looked up in the scanned directory when `--config` is absent
pub const SETTINGS_FILE: &str = "sheet2json.toml";

/// Worksheet holding the config table
pub const DEFAULT_SHEET: &str = "Sheet1";

/// Output directory name under the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "json";

/// Spreadsheet extensions picked up by the walker
pub const DEFAULT_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Contents of a settings file, every field optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output directory, relative paths resolve against the working directory
    pub output_dir: Option<PathBuf>,
    pub sheet: Option<String>,
    pub extensions: Option<Vec<String>>,
    /// Reject unknown type labels instead of treating them as strings
    pub strict_types: Option<bool>,
    /// Stop at the first file that fails to convert
    pub fail_fast: Option<bool>,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid settings")
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("In settings file: {}", path.display()))
    }

    /// Load `explicit` if given, else `<root>/sheet2json.toml` if it exists
    pub fn discover(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = root.join(SETTINGS_FILE);
        if candidate.is_file() {
            log::debug!("Using settings file {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

/// Values given on the command line, which win over the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub sheet: Option<String>,
    pub strict_types: bool,
    pub fail_fast: bool,
}

/// Immutable per-run context shared by every conversion
#[derive(Debug, Clone)]
pub struct ConvertContext {
    /// Absolute directory being scanned
    pub root: PathBuf,
    /// Absolute directory receiving JSON files
    pub output_dir: PathBuf,
    /// Worksheet holding the config table
    pub sheet: String,
    /// Lower-case extensions without the leading dot
    pub extensions: Vec<String>,
    pub strictness: Strictness,
}

/// Options controlling the walk itself
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub fail_fast: bool,
}

/// Merge the layers into the run context
///
/// `root` and relative output paths are resolved against `cwd`.
pub fn resolve(
    root: &Path,
    cwd: &Path,
    settings: Settings,
    overrides: Overrides,
) -> Result<(ConvertContext, RunOptions)> {
    let root = absolutize(root, cwd);
    if !root.is_dir() {
        bail!("Directory does not exist: {}", root.display());
    }

    let output_dir = overrides
        .output_dir
        .or(settings.output_dir)
        .map(|p| absolutize(&p, cwd))
        .unwrap_or_else(|| cwd.join(DEFAULT_OUTPUT_DIR));

    let sheet = overrides
        .sheet
        .or(settings.sheet)
        .unwrap_or_else(|| DEFAULT_SHEET.to_string());
    if sheet.trim().is_empty() {
        bail!("Worksheet name must not be empty");
    }

    let extensions: Vec<String> = match settings.extensions {
        Some(list) => list
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect(),
        None => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    };
    if extensions.is_empty() {
        bail!("At least one spreadsheet extension is required");
    }

    let strictness = if overrides.strict_types || settings.strict_types.unwrap_or(false) {
        Strictness::Strict
    } else {
        Strictness::Permissive
    };

    let options = RunOptions {
        fail_fast: overrides.fail_fast || settings.fail_fast.unwrap_or(false),
    };

    Ok((
        ConvertContext {
            root,
            output_dir,
            sheet,
            extensions,
            strictness,
        },
        options,
    ))
}

/// Make `path` absolute against `cwd`, dropping `.` components
fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
