use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{assets::AssetFormat, plural::validate_language};
use crate::utils::{join_normalized, normalize_path};

pub const CONFIG_FILE_NAME: &str = ".speakrc.json";

/// Source file names matching any of these patterns are never scanned.
pub const TEST_FILE_PATTERNS: &[&str] = &["*test*", "*spec*"];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_source_files_paths")]
    pub source_files_paths: Vec<String>,
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default = "default_supported_langs")]
    pub supported_langs: Vec<String>,
    #[serde(default = "default_assets_path")]
    pub assets_path: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default = "default_key_separator")]
    pub key_separator: String,
    #[serde(default = "default_key_value_separator")]
    pub key_value_separator: String,
}

fn default_base_path() -> String {
    "./".to_string()
}

fn default_source_files_paths() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_supported_langs() -> Vec<String> {
    vec!["en-US".to_string()]
}

fn default_assets_path() -> String {
    "i18n".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

fn default_filename() -> String {
    "app".to_string()
}

fn default_key_separator() -> String {
    ".".to_string()
}

fn default_key_value_separator() -> String {
    "@@".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            source_files_paths: default_source_files_paths(),
            excluded_paths: Vec::new(),
            supported_langs: default_supported_langs(),
            assets_path: default_assets_path(),
            format: default_format(),
            filename: default_filename(),
            key_separator: default_key_separator(),
            key_value_separator: default_key_value_separator(),
        }
    }
}

/// Effective options for one extraction run.
///
/// Built by [`Config::resolve`]; every path is joined onto the base path and
/// lexically normalized, every value has been validated.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub base_path: PathBuf,
    pub source_roots: Vec<PathBuf>,
    pub excluded_paths: Vec<PathBuf>,
    pub supported_langs: Vec<String>,
    /// `<base>/<assetsPath>`; each language gets a sub-directory.
    pub assets_dir: PathBuf,
    pub format: AssetFormat,
    pub filename: String,
    pub key_separator: String,
    pub key_value_separator: String,
}

impl ResolvedOptions {
    /// Directory holding the asset files of one language.
    pub fn language_dir(&self, lang: &str) -> PathBuf {
        self.assets_dir.join(lang)
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Every check here runs before any file is touched, so a bad language
    /// tag or format aborts the run without partial output.
    pub fn validate(&self) -> Result<()> {
        if self.supported_langs.is_empty() {
            bail!("'supportedLangs' must contain at least one language");
        }
        for lang in &self.supported_langs {
            validate_language(lang)
                .with_context(|| format!("Invalid language in 'supportedLangs': \"{}\"", lang))?;
        }

        self.format
            .parse::<AssetFormat>()
            .with_context(|| format!("Invalid 'format': \"{}\"", self.format))?;

        if self.filename.trim().is_empty() {
            bail!("'filename' must not be empty");
        }
        if self.key_separator.is_empty() {
            bail!("'keySeparator' must not be empty");
        }
        if self.key_value_separator.is_empty() {
            bail!("'keyValueSeparator' must not be empty");
        }
        if self.key_separator == self.key_value_separator {
            bail!(
                "'keySeparator' and 'keyValueSeparator' must differ (both are \"{}\")",
                self.key_separator
            );
        }

        Ok(())
    }

    /// Validate and resolve paths relative to `root_dir`.
    pub fn resolve(&self, root_dir: &Path) -> Result<ResolvedOptions> {
        self.validate()?;

        let base_path = join_normalized(root_dir, &self.base_path);
        let resolve_all = |paths: &[String]| -> Vec<PathBuf> {
            paths
                .iter()
                .map(|p| join_normalized(&base_path, p))
                .collect()
        };

        Ok(ResolvedOptions {
            source_roots: resolve_all(&self.source_files_paths),
            excluded_paths: resolve_all(&self.excluded_paths),
            supported_langs: self.supported_langs.clone(),
            assets_dir: join_normalized(&base_path, &self.assets_path),
            format: self.format.parse()?,
            filename: self.filename.clone(),
            key_separator: self.key_separator.clone(),
            key_value_separator: self.key_value_separator.clone(),
            base_path,
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Look for the config file in `start_dir` and its ancestors, stopping at the
/// first directory that contains `.git`.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory `basePath` is relative to: the one holding the config file,
    /// expressed relative to `start_dir` when it is an ancestor of it.
    pub root_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                root_dir: config_root_dir(start_dir, &path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            root_dir: start_dir.to_path_buf(),
        }),
    }
}

/// `../..` style path from `start_dir` up to the directory of `config_path`.
fn config_root_dir(start_dir: &Path, config_path: &Path) -> PathBuf {
    let Some(config_dir) = config_path.parent() else {
        return start_dir.to_path_buf();
    };
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    match start.strip_prefix(config_dir) {
        std::result::Result::Ok(rest) => {
            let up = rest
                .components()
                .fold(start_dir.to_path_buf(), |dir, _| dir.join(".."));
            normalize_path(&up)
        }
        Err(_) => config_dir.to_path_buf(),
    }
}
