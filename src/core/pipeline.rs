//! The extraction run.
//!
//! 1. **Discovery**: walk the source roots (sequential, sorted).
//! 2. **Scanning**: read, parse and classify every file in parallel; each
//!    task returns its own keys and counters.
//! 3. **Skeleton**: deduplicate keys (first occurrence wins) and build the
//!    tree they declare.
//! 4. **Assets**: read the existing assets of every language in parallel,
//!    merge the skeleton into each, sort, partition and write.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::{
    config::ResolvedOptions,
    core::{
        assets::{check_file_name, partition, read_language_assets, write_asset},
        classify::{Classification, KeyClassifier},
        file_scanner::scan_source_files,
        parsers::{ParsedSource, parse_source},
        scan::{TranslationFn, resolve_alias, scan_calls},
        stats::{ExtractStats, FileStats},
        tree::{build_skeleton, deep_merge, sort_tree},
    },
};

/// Outcome of an extraction run.
#[derive(Debug)]
pub struct ExtractResult {
    pub stats: ExtractStats,
    /// Asset files written, in write order.
    pub written_files: Vec<PathBuf>,
    /// Merge conflicts, prefixed with the language they occurred in.
    pub warnings: Vec<String>,
}

/// Keys and counters extracted from one parsed file.
#[derive(Debug, Default)]
pub struct FileExtraction {
    /// Raw keys in call order, duplicates included.
    pub keys: Vec<String>,
    pub stats: FileStats,
    /// Lines of calls whose key argument has an unsupported shape.
    pub unsupported_lines: Vec<usize>,
}

enum FileOutcome {
    Extracted(FileExtraction),
    Unparsed(String),
}

/// Extract the keys of every translation and plural call in one file.
///
/// `$translate` calls are visited before `$plural` calls.
pub fn extract_file(
    parsed: &ParsedSource,
    code: &str,
    classifier: &KeyClassifier,
) -> Result<FileExtraction> {
    let mut extraction = FileExtraction::default();

    for func in TranslationFn::ALL {
        let Some(alias) = resolve_alias(&parsed.module, code, func) else {
            continue;
        };
        for call in scan_calls(parsed, &alias) {
            match classifier.classify(&call, func)? {
                Classification::Keys(keys) => extraction.keys.extend(keys),
                Classification::Dynamic => extraction.stats.dynamic += 1,
                Classification::DynamicPlural => extraction.stats.dynamic_plural += 1,
                Classification::Unsupported => {
                    extraction.stats.unsupported += 1;
                    extraction.unsupported_lines.push(call.line);
                }
                Classification::Empty => {}
            }
        }
    }

    Ok(extraction)
}

fn process_file(path: &Path, classifier: &KeyClassifier) -> Result<FileOutcome> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let code = match String::from_utf8(bytes) {
        Ok(code) => code,
        Err(e) => {
            return Ok(FileOutcome::Unparsed(format!(
                "{}: not valid UTF-8 ({})",
                path.display(),
                e.utf8_error()
            )));
        }
    };
    let file_path = path.to_string_lossy();

    // Each task gets its own SourceMap
    let source_map = Arc::new(SourceMap::default());
    let parsed = match parse_source(code.clone(), &file_path, source_map) {
        Ok(parsed) => parsed,
        Err(e) => return Ok(FileOutcome::Unparsed(e.to_string())),
    };

    extract_file(&parsed, &code, classifier).map(FileOutcome::Extracted)
}

/// Run a full extraction with `options`.
pub fn extract(options: &ResolvedOptions, verbose: bool) -> Result<ExtractResult> {
    let files = scan_source_files(&options.source_roots, &options.excluded_paths, verbose)?;
    let classifier = KeyClassifier::new(&options.supported_langs, &options.key_separator);

    // Parallel reading, parsing and classification
    let outcomes: Vec<(&PathBuf, FileOutcome)> = files
        .par_iter()
        .map(|path| process_file(path, &classifier).map(|outcome| (path, outcome)))
        .collect::<Result<_>>()?;

    // Sequential aggregation in discovery order
    let mut stats = ExtractStats::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut keys: Vec<String> = Vec::new();

    for (path, outcome) in outcomes {
        match outcome {
            FileOutcome::Unparsed(message) => {
                stats.unparsed_files += 1;
                if verbose {
                    eprintln!("{} {}", "warning:".bold().yellow(), message);
                }
            }
            FileOutcome::Extracted(extraction) => {
                stats.add_file(&extraction.stats);
                if verbose {
                    for line in &extraction.unsupported_lines {
                        eprintln!(
                            "{} {}:{} unsupported key argument, call skipped",
                            "warning:".bold().yellow(),
                            path.display(),
                            line
                        );
                    }
                }
                for key in extraction.keys {
                    if !seen.contains(&key) {
                        seen.insert(key.clone());
                        keys.push(key);
                    }
                }
            }
        }
    }
    stats.keys = keys.len();

    let skeleton = build_skeleton(&keys, &options.key_separator, &options.key_value_separator);

    // Parallel reading of existing assets, one task per language
    let existing: Vec<_> = options
        .supported_langs
        .par_iter()
        .map(|lang| read_language_assets(&options.language_dir(lang), options.format))
        .collect::<Result<_>>()?;

    let mut warnings = Vec::new();
    let mut outputs = Vec::with_capacity(existing.len());

    // Every file name is checked before the first write
    for (lang, (mut translation, read_conflicts)) in options.supported_langs.iter().zip(existing) {
        let merge_conflicts = deep_merge(&mut translation, skeleton.clone());
        warnings.extend(
            read_conflicts
                .iter()
                .chain(&merge_conflicts)
                .map(|conflict| format!("{}: {}", lang, conflict)),
        );

        let files = partition(&sort_tree(&translation), &options.filename);
        for file in &files {
            check_file_name(&file.name)
                .with_context(|| format!("Cannot write assets for \"{}\"", lang))?;
        }
        outputs.push((options.language_dir(lang), files));
    }

    let mut written_files = Vec::new();
    for (dir, files) in outputs {
        for file in &files {
            written_files.push(write_asset(&dir, file, options.format)?);
        }
    }

    Ok(ExtractResult {
        stats,
        written_files,
        warnings,
    })
}
