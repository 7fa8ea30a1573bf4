//! Reading and writing translation asset files.
//!
//! Assets live in one directory per language:
//!
//! ```text
//! i18n/
//!   en-US/
//!     app.json      # base file: top-level leaves and the `app` key
//!     home.json     # one file per other top-level key
//!   it-IT/
//!     ...
//! ```

use std::{
    fmt, fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::core::tree::{MergeConflict, Translation, deep_merge, min_depth};

/// Serialization format of asset files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetFormat {
    #[default]
    Json,
}

impl AssetFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AssetFormat::Json => "json",
        }
    }
}

impl FromStr for AssetFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(AssetFormat::Json),
            other => bail!("Unsupported format \"{}\" (supported: json)", other),
        }
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One output file: `<name>.<ext>` holding `tree`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFile {
    pub name: String,
    pub tree: Translation,
}

/// Parse the content of an asset file. Blank content is an empty tree.
pub fn parse_asset(format: AssetFormat, raw: &str) -> Result<Translation> {
    if raw.trim().is_empty() {
        return Ok(Translation::new());
    }
    match format {
        AssetFormat::Json => {
            let value: Value = serde_json::from_str(raw).context("Invalid JSON")?;
            match value {
                Value::Object(map) => Ok(map),
                _ => bail!("Root of an asset file must be an object"),
            }
        }
    }
}

/// Serialize `tree` with 2-space indentation and a trailing newline.
pub fn serialize_asset(format: AssetFormat, tree: &Translation) -> Result<String> {
    match format {
        AssetFormat::Json => {
            let content =
                serde_json::to_string_pretty(tree).context("Failed to serialize JSON")?;
            Ok(format!("{}\n", content))
        }
    }
}

/// Split a language tree into the files it is written to.
///
/// Top-level keys whose shallowest branch is a leaf, together with the key
/// named like `filename`, go to the base file `filename`. Every other
/// top-level key gets a file of its own. The base file comes first and is
/// omitted when empty.
pub fn partition(tree: &Translation, filename: &str) -> Vec<AssetFile> {
    let mut base = Translation::new();
    if let Some(value) = tree.get(filename) {
        base.insert(filename.to_string(), value.clone());
    }

    let mut files = Vec::new();
    for (key, value) in tree {
        if key == filename {
            continue;
        }
        if min_depth(value) == 0 {
            base.insert(key.clone(), value.clone());
        } else {
            let mut own = Translation::new();
            own.insert(key.clone(), value.clone());
            files.push(AssetFile {
                name: key.clone(),
                tree: own,
            });
        }
    }

    if !base.is_empty() {
        files.insert(
            0,
            AssetFile {
                name: filename.to_string(),
                tree: base,
            },
        );
    }
    files
}

/// Read and merge every asset file of one language.
///
/// Files with the format's extension are read in file name order; values from
/// earlier files take precedence. A missing directory yields an empty tree.
pub fn read_language_assets(
    dir: &Path,
    format: AssetFormat,
) -> Result<(Translation, Vec<MergeConflict>)> {
    let mut merged = Translation::new();
    let mut conflicts = Vec::new();

    if !dir.is_dir() {
        return Ok((merged, conflicts));
    }

    let mut paths = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        if path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(format.extension())
        {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let tree = parse_asset(format, &content)
            .with_context(|| format!("Failed to parse asset: {}", path.display()))?;
        conflicts.extend(deep_merge(&mut merged, tree));
    }

    Ok((merged, conflicts))
}

/// Fail unless `name` can be used as the stem of a file inside the language
/// directory.
pub fn check_file_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
        bail!("Cannot use key \"{}\" as an asset file name", name);
    }
    Ok(())
}

/// Write `file` into `dir`, replacing any previous version atomically.
///
/// Returns the path written.
pub fn write_asset(dir: &Path, file: &AssetFile, format: AssetFormat) -> Result<PathBuf> {
    check_file_name(&file.name)?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let path = dir.join(format!("{}.{}", file.name, format.extension()));
    let content = serialize_asset(format, &file.tree)?;

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    temp.persist(&path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(path)
}
