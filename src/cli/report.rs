//! Report formatting and printing utilities.
//!
//! Written files and the key summary go to stdout; notes and warnings go to
//! stderr.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::{ExtractResult, ExtractStats};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print(result: &ExtractResult, verbose: bool) {
    print_summary_to(result, &mut io::stdout().lock());
    print_warnings_to(result, verbose, &mut io::stderr().lock());
}

/// Print the written files followed by the key counters.
pub fn print_summary_to<W: Write>(result: &ExtractResult, writer: &mut W) {
    for path in &result.written_files {
        let _ = writeln!(writer, "{}", path.display());
    }

    let stats = &result.stats;
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("extracted keys: {}", stats.keys).green()
    );
    if stats.dynamic > 0 {
        let _ = writeln!(
            writer,
            "{}",
            format!("skipped keys due to dynamic params: {}", stats.dynamic).green()
        );
    }
    if stats.dynamic_plural > 0 {
        let _ = writeln!(
            writer,
            "{}",
            format!(
                "skipped plurals due to dynamic params: {}",
                stats.dynamic_plural
            )
            .green()
        );
    }
}

/// Print skipped-file notes and merge conflict warnings.
///
/// Per-file details are printed during the run in verbose mode, so the hint
/// to use `-v` is only added otherwise.
pub fn print_warnings_to<W: Write>(result: &ExtractResult, verbose: bool, writer: &mut W) {
    let stats: &ExtractStats = &result.stats;
    let hint = if verbose {
        String::new()
    } else {
        format!(" (use {} for details)", "-v".cyan())
    };

    if stats.unparsed_files > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed{}",
            "warning:".bold().yellow(),
            stats.unparsed_files,
            hint
        );
    }
    if stats.unsupported > 0 {
        let _ = writeln!(
            writer,
            "{} {} call site(s) with an unsupported key argument skipped{}",
            "warning:".bold().yellow(),
            stats.unsupported,
            hint
        );
    }
    for warning in &result.warnings {
        let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), warning);
    }
}
