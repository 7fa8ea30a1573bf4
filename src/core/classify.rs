//! Key classification.
//!
//! Turns a scanned call into the translation keys it declares, or into the
//! reason it declares none. Translation calls:
//!
//! - `t('app.title')` → `app.title`
//! - `t(['a.b', 'a.c'])` → `a.b`, `a.c`
//! - `t(key)`, `` t(`app.${section}`) ``, `t('a', params)` → dynamic
//!
//! Plural calls expand into one key per reachable plural category:
//!
//! - `p(count, 'items')` → `items.one`, `items.other` (for `en`)

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::core::{
    plural::{PluralCategory, PluralOptions, rules_for},
    scan::{Argument, CallExpression, Literal, TranslationFn},
};

/// Matches a `${...}` substitution inside a string literal.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{.*\}").unwrap());

/// What a single call contributes to the translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Keys to extract, in call order. May contain duplicates.
    Keys(Vec<String>),
    /// A translation call whose key or params are only known at runtime.
    Dynamic,
    /// A plural call whose key, params or options are only known at runtime.
    DynamicPlural,
    /// A key argument of a shape that cannot hold a key (`t(() => 'x')`).
    Unsupported,
    /// Nothing to extract (`t()`, `t('')`).
    Empty,
}

pub struct KeyClassifier<'a> {
    supported_langs: &'a [String],
    key_separator: &'a str,
}

impl<'a> KeyClassifier<'a> {
    pub fn new(supported_langs: &'a [String], key_separator: &'a str) -> Self {
        Self {
            supported_langs,
            key_separator,
        }
    }

    pub fn classify(&self, call: &CallExpression, func: TranslationFn) -> Result<Classification> {
        match func {
            TranslationFn::Translate => Ok(self.classify_translate(call)),
            TranslationFn::Plural => self.classify_plural(call),
        }
    }

    fn classify_translate(&self, call: &CallExpression) -> Classification {
        let Some(first) = call.argument(0) else {
            return Classification::Empty;
        };

        match first {
            Argument::Array(elements) => Classification::Keys(
                elements
                    .iter()
                    .filter_map(Argument::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            Argument::Identifier(_) | Argument::Call => Classification::Dynamic,
            Argument::Literal(literal) => match literal.as_str() {
                Some("") => Classification::Empty,
                Some(key) if PLACEHOLDER_RE.is_match(key) => Classification::Dynamic,
                Some(_) if call.argument(1).is_some_and(Argument::is_dynamic) => {
                    Classification::Dynamic
                }
                Some(key) => Classification::Keys(vec![key.to_string()]),
                None => Classification::Unsupported,
            },
            Argument::Object(_) | Argument::Unsupported => Classification::Unsupported,
        }
    }

    fn classify_plural(&self, call: &CallExpression) -> Result<Classification> {
        if call.arguments.is_empty() {
            return Ok(Classification::Empty);
        }
        if call.arguments[1..]
            .iter()
            .take(3)
            .any(Argument::is_dynamic)
        {
            return Ok(Classification::DynamicPlural);
        }

        // Only a missing, null or empty key means "categories at the root".
        let key = match call.argument(1) {
            None | Some(Argument::Literal(Literal::Null)) => None,
            Some(Argument::Literal(Literal::Str(key))) => {
                Some(key.as_str()).filter(|key| !key.is_empty())
            }
            Some(_) => return Ok(Classification::Unsupported),
        };
        if key.is_some_and(|key| PLACEHOLDER_RE.is_match(key)) {
            return Ok(Classification::DynamicPlural);
        }

        let options = match call.argument(3) {
            Some(Argument::Object(properties)) => PluralOptions::from_properties(properties),
            _ => PluralOptions::default(),
        };

        let categories = self.categories(&options)?;
        let keys = categories
            .iter()
            .map(|category| match key {
                Some(key) => format!("{}{}{}", key, self.key_separator, category.as_str()),
                None => category.as_str().to_string(),
            })
            .collect();
        Ok(Classification::Keys(keys))
    }

    /// Union of the categories reachable in any supported language, in CLDR
    /// order.
    fn categories(&self, options: &PluralOptions) -> Result<Vec<PluralCategory>> {
        let mut categories = Vec::new();
        for lang in self.supported_langs {
            categories.extend(rules_for(lang, options)?);
        }
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}
