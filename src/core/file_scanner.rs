use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Collect the source files to scan, in discovery order.
///
/// Each root is walked depth-first with entries sorted by file name. Roots and
/// excluded paths may be glob patterns; a literal excluded path prunes the
/// directory or file it names. Files whose name matches a test pattern
/// (`*test*`, `*spec*`) are skipped.
pub fn scan_source_files(
    roots: &[PathBuf],
    excluded: &[PathBuf],
    verbose: bool,
) -> Result<Vec<PathBuf>> {
    let mut literal_excluded: Vec<&Path> = Vec::new();
    let mut excluded_patterns: Vec<Pattern> = Vec::new();
    for path in excluded {
        let path_str = path.to_string_lossy();
        if is_glob_pattern(&path_str) {
            match Pattern::new(&path_str) {
                Ok(pattern) => excluded_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid excluded pattern '{}': {}",
                            "warning:".bold().yellow(),
                            path_str,
                            e
                        );
                    }
                }
            }
        } else {
            literal_excluded.push(path);
        }
    }

    let test_patterns: Vec<Pattern> = TEST_FILE_PATTERNS
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for root in expand_roots(roots)? {
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let path = entry.path();
                !literal_excluded.iter().any(|excluded| path == *excluded)
                    && !excluded_patterns.iter().any(|p| p.matches_path(path))
            });

        for entry in walker {
            let entry =
                entry.with_context(|| format!("Cannot access path under {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !is_scannable_file(path) || is_test_file(path, &test_patterns) {
                continue;
            }
            if seen.insert(path.to_path_buf()) {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Resolve roots to existing directories or files.
///
/// A literal root that does not exist is an error; a glob root expands to the
/// directories it matches, possibly none.
fn expand_roots(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut expanded = Vec::new();
    for root in roots {
        let root_str = root.to_string_lossy();
        if is_glob_pattern(&root_str) {
            let entries = glob(&root_str)
                .with_context(|| format!("Invalid source path pattern '{}'", root_str))?;
            for entry in entries.flatten() {
                if entry.is_dir() {
                    expanded.push(entry);
                }
            }
        } else if root.exists() {
            expanded.push(root.clone());
        } else {
            bail!("Source path does not exist: {}", root.display());
        }
    }
    Ok(expanded)
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}

fn is_test_file(path: &Path, patterns: &[Pattern]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| patterns.iter().any(|p| p.matches(name)))
}
