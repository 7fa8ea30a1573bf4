//! Core extraction engine.
//!
//! The pipeline runs leaf-first through these modules:
//!
//! 1. `file_scanner`: discover source files under the configured roots
//! 2. `parsers` + `scan`: parse each file with swc and collect the calls made
//!    through the (possibly renamed) `$translate` / `$plural` functions
//! 3. `classify`: turn each call into keys, or count it as dynamic
//! 4. `plural`: CLDR plural categories used to expand `$plural` calls
//! 5. `tree`: build the skeleton tree, merge it with existing data, sort it
//! 6. `assets`: read, partition and write the per-language asset files
//!
//! `pipeline` wires the steps together and returns an [`ExtractResult`].

pub mod assets;
pub mod classify;
pub mod file_scanner;
pub mod parsers;
pub mod pipeline;
pub mod plural;
pub mod scan;
pub mod stats;
pub mod tree;

pub use pipeline::{ExtractResult, extract};
pub use stats::ExtractStats;
pub use tree::Translation;
