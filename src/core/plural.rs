//! Plural rule resolution.
//!
//! Answers "which plural categories can a `$plural` call end up selecting in
//! this language?". The CLDR rules come from `intl_pluralrules`; reachability
//! is decided by running the rules over a fixed set of sample numbers rendered
//! the way the call's options would format them, so options such as
//! `minimumFractionDigits` narrow the result the same way they narrow runtime
//! selection.

use std::collections::BTreeSet;

use anyhow::{Result, anyhow};
use intl_pluralrules::{PluralCategory as CldrCategory, PluralRuleType, PluralRules};
use unic_langid::LanguageIdentifier;

use crate::core::scan::{Argument, Literal, Property};

/// A CLDR plural category, ordered as CLDR lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl From<CldrCategory> for PluralCategory {
    fn from(category: CldrCategory) -> Self {
        match category {
            CldrCategory::ZERO => PluralCategory::Zero,
            CldrCategory::ONE => PluralCategory::One,
            CldrCategory::TWO => PluralCategory::Two,
            CldrCategory::FEW => PluralCategory::Few,
            CldrCategory::MANY => PluralCategory::Many,
            CldrCategory::OTHER => PluralCategory::Other,
        }
    }
}

/// Cardinal (`1 item`, `2 items`) or ordinal (`1st`, `2nd`) rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleType {
    #[default]
    Cardinal,
    Ordinal,
}

/// Options of a `$plural` call that influence category selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluralOptions {
    pub rule_type: RuleType,
    pub minimum_fraction_digits: usize,
    pub maximum_fraction_digits: usize,
}

/// Fraction digits allowed by default, as for `Intl.PluralRules`.
const DEFAULT_MAXIMUM_FRACTION_DIGITS: usize = 3;

/// Upper bound accepted for either fraction digit option.
const MAX_FRACTION_DIGITS: usize = 20;

impl Default for PluralOptions {
    fn default() -> Self {
        Self {
            rule_type: RuleType::Cardinal,
            minimum_fraction_digits: 0,
            maximum_fraction_digits: DEFAULT_MAXIMUM_FRACTION_DIGITS,
        }
    }
}

impl PluralOptions {
    /// Read options from the literal properties of an options object.
    ///
    /// Recognised: `type` (`"cardinal"` / `"ordinal"`), `minimumFractionDigits`
    /// and `maximumFractionDigits`. Other properties and non-literal values are
    /// ignored.
    pub fn from_properties(properties: &[Property]) -> Self {
        let mut options = Self::default();
        let mut maximum_set = false;

        for property in properties {
            let Argument::Literal(literal) = &property.value else {
                continue;
            };
            match (property.key.as_str(), literal) {
                ("type", Literal::Str(value)) if value == "ordinal" => {
                    options.rule_type = RuleType::Ordinal;
                }
                ("type", Literal::Str(value)) if value == "cardinal" => {
                    options.rule_type = RuleType::Cardinal;
                }
                ("minimumFractionDigits", Literal::Num(n)) => {
                    options.minimum_fraction_digits = digits(*n);
                }
                ("maximumFractionDigits", Literal::Num(n)) => {
                    options.maximum_fraction_digits = digits(*n);
                    maximum_set = true;
                }
                _ => {}
            }
        }

        if options.maximum_fraction_digits < options.minimum_fraction_digits {
            if maximum_set {
                options.minimum_fraction_digits = options.maximum_fraction_digits;
            } else {
                options.maximum_fraction_digits = options.minimum_fraction_digits;
            }
        }
        options
    }
}

fn digits(n: f64) -> usize {
    if n.is_finite() && n > 0.0 {
        (n as usize).min(MAX_FRACTION_DIGITS)
    } else {
        0
    }
}

/// Check that `lang` is a well-formed tag with known cardinal plural rules.
pub fn validate_language(lang: &str) -> Result<()> {
    plural_rules(lang, RuleType::Cardinal).map(|_| ())
}

/// Plural categories reachable in `lang` under `options`, in CLDR order.
///
/// Fails if `lang` is malformed or has no cardinal rules. A language without
/// ordinal rules only has `other` for ordinal calls.
pub fn rules_for(lang: &str, options: &PluralOptions) -> Result<Vec<PluralCategory>> {
    let rules = match (options.rule_type, plural_rules(lang, options.rule_type)) {
        (_, Ok(rules)) => rules,
        (RuleType::Ordinal, Err(_)) => {
            validate_language(lang)?;
            return Ok(vec![PluralCategory::Other]);
        }
        (RuleType::Cardinal, Err(e)) => return Err(e),
    };

    let mut reachable = BTreeSet::new();
    for sample in samples(options) {
        let category = rules
            .select(sample.as_str())
            .map_err(|e| anyhow!("Cannot select plural category for {}: {}", sample, e))?;
        reachable.insert(PluralCategory::from(category));
    }
    Ok(reachable.into_iter().collect())
}

/// Look up the rules for `lang`, falling back to its primary language subtag
/// (`en-US` → `en`).
fn plural_rules(lang: &str, rule_type: RuleType) -> Result<PluralRules> {
    let langid: LanguageIdentifier = lang
        .parse()
        .map_err(|e| anyhow!("\"{}\" is not a valid language tag: {}", lang, e))?;
    let prt = match rule_type {
        RuleType::Cardinal => PluralRuleType::CARDINAL,
        RuleType::Ordinal => PluralRuleType::ORDINAL,
    };

    if let Ok(rules) = PluralRules::create(langid.clone(), prt) {
        return Ok(rules);
    }

    let primary: LanguageIdentifier = langid
        .language
        .to_string()
        .parse()
        .map_err(|e| anyhow!("\"{}\" is not a valid language tag: {}", lang, e))?;
    PluralRules::create(primary, prt)
        .map_err(|_| anyhow!("No {:?} plural rules for language \"{}\"", rule_type, lang))
}

/// Integer parts probed. Covers every `n % 10`, `n % 100` and small-value
/// condition used by CLDR, plus the large round numbers some languages treat
/// specially (e.g. French `many` for millions).
fn integer_samples() -> impl Iterator<Item = u64> {
    (0..=200u64).chain([1_000, 10_000, 100_000, 1_000_000, 10_000_000])
}

/// Fraction digit strings probed for non-integer values.
const FRACTION_SAMPLES: &[&str] = &["1", "2", "3", "5", "7", "01", "11", "21", "25", "50"];

fn samples(options: &PluralOptions) -> Vec<String> {
    let min = options.minimum_fraction_digits;
    let max = options.maximum_fraction_digits.max(min);

    let mut samples: Vec<String> = integer_samples()
        .map(|n| {
            if min == 0 {
                n.to_string()
            } else {
                format!("{}.{}", n, "0".repeat(min))
            }
        })
        .collect();

    if max > 0 {
        for n in 0..=20u64 {
            for fraction in FRACTION_SAMPLES.iter().filter(|f| f.len() <= max) {
                let padding = min.saturating_sub(fraction.len());
                samples.push(format!("{}.{}{}", n, fraction, "0".repeat(padding)));
            }
        }
    }
    samples
}
