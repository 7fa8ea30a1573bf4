//! speak-extract - translation key extraction for `$translate` / `$plural` apps
//!
//! speak-extract is a CLI tool and library that scans JavaScript/TypeScript
//! sources for translation and pluralization calls, infers the keys they use,
//! and merges those keys into per-language JSON asset files without losing
//! existing translations.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading, defaulting and validation
//! - `core`: Extraction engine (scanner, classifier, plural rules, trees, assets)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
