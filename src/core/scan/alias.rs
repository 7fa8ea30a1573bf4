//! Resolution of the local name a translation function is called through.
//!
//! Source files may rename the functions on import:
//!
//! ```typescript
//! import { $translate as t, $plural as p } from 'qwik-speak';
//! t('app.title');
//! p(count, 'items');
//! ```
//!
//! Scanning for `$translate(` in such a file would find nothing, so the alias
//! has to be resolved first.

use swc_ecma_ast::{ImportSpecifier, Module, ModuleDecl, ModuleExportName, ModuleItem};

/// The functions whose calls are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationFn {
    /// `$translate(keys, params?)`
    Translate,
    /// `$plural(count, key?, params?, options?)`
    Plural,
}

impl TranslationFn {
    pub const ALL: [TranslationFn; 2] = [TranslationFn::Translate, TranslationFn::Plural];

    /// Exported name of the function.
    pub fn canonical_name(self) -> &'static str {
        match self {
            TranslationFn::Translate => "$translate",
            TranslationFn::Plural => "$plural",
        }
    }
}

/// Find the local name `func` is bound to in `module`.
///
/// Returns:
/// - the local name of a named import of the function (`import { $translate as t }`)
/// - otherwise the canonical name, if it appears anywhere in `code`
/// - otherwise `None`: the file cannot call the function
pub fn resolve_alias(module: &Module, code: &str, func: TranslationFn) -> Option<String> {
    let canonical = func.canonical_name();

    let imported = module.body.iter().find_map(|item| {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            return None;
        };
        if import.type_only {
            return None;
        }
        import.specifiers.iter().find_map(|specifier| match specifier {
            ImportSpecifier::Named(named) if !named.is_type_only => {
                let local_name = named.local.sym.to_string();
                let imported_name = named
                    .imported
                    .as_ref()
                    .map(|i| match i {
                        ModuleExportName::Ident(ident) => ident.sym.to_string(),
                        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
                    })
                    .unwrap_or_else(|| local_name.clone());
                (imported_name == canonical).then_some(local_name)
            }
            _ => None,
        })
    });

    imported.or_else(|| code.contains(canonical).then(|| canonical.to_string()))
}
