//! Source file parser.
//!
//! - `source`: JS/TS/JSX/TSX source parser (uses swc for AST generation)

pub mod source;

pub use source::{ParsedSource, parse_source};
