//! Expression scanner.
//!
//! Finds the calls made through the translation functions in a parsed source
//! file and describes their arguments:
//!
//! - `alias`: resolve the local name a function was imported as
//! - `call`: call record and argument kinds
//! - `scanner`: AST visitor producing call records in source order

pub mod alias;
pub mod call;
pub mod scanner;

pub use alias::{TranslationFn, resolve_alias};
pub use call::{Argument, CallExpression, Literal, Property};
pub use scanner::scan_calls;
