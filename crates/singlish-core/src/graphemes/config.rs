use serde::Deserialize;

use super::{Context, GraphemeRule, RuleKind};

#[derive(Deserialize)]
struct GraphemeConfig {
    version: u32,
    #[serde(default)]
    vowels: Vec<VowelEntry>,
    #[serde(default)]
    consonants: Vec<RuleEntry>,
    #[serde(default)]
    medials: Vec<RuleEntry>,
    #[serde(default)]
    modifiers: Vec<RuleEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct VowelEntry {
    pattern: String,
    output: String,
    sign: String,
    #[serde(default)]
    after: Option<Vec<String>>,
    #[serde(default)]
    priority: i32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    pattern: String,
    output: String,
    #[serde(default)]
    after: Option<Vec<String>>,
    #[serde(default)]
    priority: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum GraphemeConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("grapheme table has no rules")]
    Empty,
    #[error("empty pattern")]
    EmptyPattern,
    #[error("non-ASCII pattern: {0}")]
    NonAsciiPattern(String),
    #[error("empty output for pattern: {0}")]
    EmptyValue(String),
    #[error("unknown context class {class:?} for pattern: {pattern}")]
    UnknownContext { pattern: String, class: String },
    #[error("rules for pattern {0:?} have overlapping contexts")]
    OverlappingContext(String),
    #[error("grapheme table already initialized")]
    AlreadyInitialized,
}

/// Parsed and validated table contents, in declaration order.
#[derive(Debug)]
pub struct GraphemeTableData {
    pub version: u32,
    pub rules: Vec<GraphemeRule>,
}

/// Parse TOML text into grapheme rules.
///
/// Rules are returned in declaration order (vowels, consonants, medials,
/// modifiers). That order is the final tie-break when ranking candidates.
pub fn parse_grapheme_toml(toml_str: &str) -> Result<GraphemeTableData, GraphemeConfigError> {
    let config: GraphemeConfig =
        toml::from_str(toml_str).map_err(|e| GraphemeConfigError::Parse(e.to_string()))?;

    let mut rules = Vec::new();
    for v in config.vowels {
        let context = parse_context(&v.pattern, v.after.as_deref())?;
        rules.push(GraphemeRule {
            pattern: v.pattern,
            kind: RuleKind::Vowel { sign: v.sign },
            output: v.output,
            context,
            priority: v.priority,
        });
    }
    let sections = [
        (config.consonants, RuleKind::Consonant),
        (config.medials, RuleKind::Medial),
        (config.modifiers, RuleKind::Modifier),
    ];
    for (entries, kind) in sections {
        for e in entries {
            let context = parse_context(&e.pattern, e.after.as_deref())?;
            rules.push(GraphemeRule {
                pattern: e.pattern,
                kind: kind.clone(),
                output: e.output,
                context,
                priority: e.priority,
            });
        }
    }

    if rules.is_empty() {
        return Err(GraphemeConfigError::Empty);
    }
    for rule in &rules {
        if rule.pattern.is_empty() {
            return Err(GraphemeConfigError::EmptyPattern);
        }
        if !rule.pattern.is_ascii() {
            return Err(GraphemeConfigError::NonAsciiPattern(rule.pattern.clone()));
        }
        if rule.output.is_empty() {
            return Err(GraphemeConfigError::EmptyValue(rule.pattern.clone()));
        }
    }
    check_disjoint(&rules)?;

    Ok(GraphemeTableData {
        version: config.version,
        rules,
    })
}

fn parse_context(pattern: &str, after: Option<&[String]>) -> Result<Context, GraphemeConfigError> {
    match after {
        None => Ok(Context::ANY),
        Some(names) => Context::from_names(names).map_err(|class| {
            GraphemeConfigError::UnknownContext {
                pattern: pattern.to_string(),
                class,
            }
        }),
    }
}

/// Two rules with the same pattern must never both be applicable.
fn check_disjoint(rules: &[GraphemeRule]) -> Result<(), GraphemeConfigError> {
    for (i, a) in rules.iter().enumerate() {
        for b in &rules[i + 1..] {
            if a.pattern == b.pattern && a.context.overlaps(b.context) {
                return Err(GraphemeConfigError::OverlappingContext(a.pattern.clone()));
            }
        }
    }
    Ok(())
}
