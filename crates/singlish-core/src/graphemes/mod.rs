//! Grapheme mapping table: Latin phoneme sequences to Sinhala clusters.
//!
//! The table is data, loaded from TOML. The embedded default can be replaced
//! once, before the first `global()` call, with `init_custom`.

mod config;
mod trie;

use std::sync::{Arc, OnceLock};

use serde::Serialize;

pub use config::{parse_grapheme_toml, GraphemeConfigError, GraphemeTableData};
pub use trie::{GraphemeTrie, TrieLookupResult};

pub(crate) const DEFAULT_TOML: &str = include_str!("default_graphemes.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Index into `GraphemeTable::rules`.
pub type RuleId = usize;

/// Returns the embedded default table TOML.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Class of the unit preceding a match position inside a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitClass {
    Start,
    Vowel,
    Consonant,
    Modifier,
}

impl UnitClass {
    const ALL: [UnitClass; 4] = [
        UnitClass::Start,
        UnitClass::Vowel,
        UnitClass::Consonant,
        UnitClass::Modifier,
    ];

    fn bit(self) -> u8 {
        match self {
            UnitClass::Start => 1,
            UnitClass::Vowel => 2,
            UnitClass::Consonant => 4,
            UnitClass::Modifier => 8,
        }
    }

    fn name(self) -> &'static str {
        match self {
            UnitClass::Start => "start",
            UnitClass::Vowel => "vowel",
            UnitClass::Consonant => "consonant",
            UnitClass::Modifier => "modifier",
        }
    }
}

/// Set of previous-unit classes a rule may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context(u8);

impl Context {
    pub const ANY: Context = Context(0b1111);

    pub fn admits(self, prev: UnitClass) -> bool {
        self.0 & prev.bit() != 0
    }

    pub fn overlaps(self, other: Context) -> bool {
        self.0 & other.0 != 0
    }

    /// Parse class names; returns the first unknown name on failure.
    pub fn from_names(names: &[String]) -> Result<Context, String> {
        let mut bits = 0u8;
        for name in names {
            let class = UnitClass::ALL
                .iter()
                .find(|c| c.name() == name.as_str())
                .ok_or_else(|| name.clone())?;
            bits |= class.bit();
        }
        Ok(Context(bits))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleKind {
    /// Base consonant or explicit conjunct; takes a vowel sign or hal kirima.
    Consonant,
    /// `output` is the independent letter, `sign` the dependent form.
    Vowel { sign: String },
    /// Joiner form attached to the preceding consonant.
    Medial,
    /// Anusvara and friends.
    Modifier,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Consonant => "consonant",
            RuleKind::Vowel { .. } => "vowel",
            RuleKind::Medial => "medial",
            RuleKind::Modifier => "modifier",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphemeRule {
    pub pattern: String,
    #[serde(flatten)]
    pub kind: RuleKind,
    pub output: String,
    #[serde(skip)]
    pub context: Context,
    pub priority: i32,
}

impl GraphemeRule {
    /// The class this rule leaves behind for the next match.
    pub fn class(&self) -> UnitClass {
        match self.kind {
            RuleKind::Vowel { .. } => UnitClass::Vowel,
            RuleKind::Consonant | RuleKind::Medial => UnitClass::Consonant,
            RuleKind::Modifier => UnitClass::Modifier,
        }
    }
}

/// A rule applicable at some position, with how it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub rule: RuleId,
    pub len: usize,
    pub exact_case: bool,
}

#[derive(Debug)]
pub struct GraphemeTable {
    version: u32,
    rules: Vec<GraphemeRule>,
    trie: GraphemeTrie,
}

impl GraphemeTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), GraphemeConfigError> {
        // Validate eagerly
        parse_grapheme_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| GraphemeConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> Arc<GraphemeTable> {
        static INSTANCE: OnceLock<Arc<GraphemeTable>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                let toml_str = CUSTOM_TOML
                    .get()
                    .map(|s| s.as_str())
                    .unwrap_or(DEFAULT_TOML);
                Arc::new(GraphemeTable::from_toml(toml_str).expect("grapheme TOML must be valid"))
            })
            .clone()
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, GraphemeConfigError> {
        Ok(Self::from_data(parse_grapheme_toml(toml_str)?))
    }

    pub fn from_data(data: GraphemeTableData) -> Self {
        let trie = GraphemeTrie::build(&data.rules);
        GraphemeTable {
            version: data.version,
            rules: data.rules,
            trie,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn rules(&self) -> &[GraphemeRule] {
        &self.rules
    }

    pub fn rule(&self, id: RuleId) -> &GraphemeRule {
        &self.rules[id]
    }

    pub fn lookup(&self, pattern: &str) -> TrieLookupResult {
        self.trie.lookup(pattern)
    }

    /// Rules applicable at `pos`, best first.
    ///
    /// `exact` is the word as typed, `folded` its ASCII-lowercased copy (same
    /// byte length). Ranking: longer pattern, then higher priority, then
    /// case-exact before folded, then declaration order.
    pub fn candidates(
        &self,
        exact: &[u8],
        folded: &[u8],
        pos: usize,
        prev: UnitClass,
    ) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = Vec::new();
        for (input, exact_case) in [(exact, true), (folded, false)] {
            for (len, ids) in self.trie.common_prefixes(&input[pos..]) {
                for &rule in ids {
                    if !self.rules[rule].context.admits(prev) {
                        continue;
                    }
                    if out.iter().any(|c| c.rule == rule) {
                        continue;
                    }
                    out.push(Candidate {
                        rule,
                        len,
                        exact_case,
                    });
                }
            }
        }
        out.sort_by(|a, b| {
            b.len
                .cmp(&a.len)
                .then(self.rules[b.rule].priority.cmp(&self.rules[a.rule].priority))
                .then(b.exact_case.cmp(&a.exact_case))
                .then(a.rule.cmp(&b.rule))
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(table: &GraphemeTable, cands: &[Candidate]) -> Vec<String> {
        cands
            .iter()
            .map(|c| table.rule(c.rule).pattern.clone())
            .collect()
    }

    #[test]
    fn test_global_is_default() {
        let table = GraphemeTable::global();
        assert_eq!(table.version(), 1);
        assert!(!table.rules().is_empty());
    }

    #[test]
    fn test_longest_first() {
        let table = GraphemeTable::global();
        let cands = table.candidates(b"aee", b"aee", 0, UnitClass::Start);
        assert_eq!(patterns(&table, &cands), ["aee", "ae", "a"]);
    }

    #[test]
    fn test_exact_case_wins_tie() {
        let table = GraphemeTable::global();
        let cands = table.candidates(b"oDHA", b"odha", 1, UnitClass::Vowel);
        assert_eq!(table.rule(cands[0].rule).output, "ඳ");
        assert!(cands[0].exact_case);
        assert_eq!(table.rule(cands[1].rule).output, "ද");
    }

    #[test]
    fn test_context_filters_word_initial_capital() {
        let table = GraphemeTable::global();
        let cands = table.candidates(b"Dhaen", b"dhaen", 0, UnitClass::Start);
        assert_eq!(table.rule(cands[0].rule).output, "ද");
        assert!(!cands[0].exact_case);
    }

    #[test]
    fn test_medial_after_consonant() {
        let table = GraphemeTable::global();
        let after_cons = table.candidates(b"ra", b"ra", 0, UnitClass::Consonant);
        assert_eq!(table.rule(after_cons[0].rule).kind, RuleKind::Medial);
        let after_vowel = table.candidates(b"ra", b"ra", 0, UnitClass::Vowel);
        assert_eq!(table.rule(after_vowel[0].rule).kind, RuleKind::Consonant);
    }

    #[test]
    fn test_priority_breaks_ties() {
        let toml = r#"
version = 1
consonants = [
    { pattern = "k", output = "ක" },
    { pattern = "K", output = "ඛ", priority = -1 },
    { pattern = "G", output = "ඟ" },
    { pattern = "g", output = "ග" },
]
"#;
        let table = GraphemeTable::from_toml(toml).unwrap();
        // declared priority outranks the case-exact preference
        let cands = table.candidates(b"K", b"k", 0, UnitClass::Start);
        assert_eq!(table.rule(cands[0].rule).output, "ක");
        // equal priority: case-exact first
        let cands = table.candidates(b"G", b"g", 0, UnitClass::Start);
        assert_eq!(table.rule(cands[0].rule).output, "ඟ");
    }

    #[test]
    fn test_context_names() {
        let ctx = Context::from_names(&["vowel".into(), "consonant".into()]).unwrap();
        assert!(ctx.admits(UnitClass::Vowel));
        assert!(!ctx.admits(UnitClass::Start));
        assert!(ctx.overlaps(Context::ANY));
        assert_eq!(
            Context::from_names(&["bogus".into()]).unwrap_err(),
            "bogus"
        );
    }
}
