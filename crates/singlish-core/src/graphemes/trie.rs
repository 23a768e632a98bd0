use std::collections::BTreeMap;

use lexime_trie::{DoubleArray, TrieSearch};

use super::{GraphemeRule, RuleId};

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    Exact(Vec<RuleId>),
    ExactAndPrefix(Vec<RuleId>),
}

/// Double-array trie over the distinct rule patterns. `values[id]` holds
/// every rule sharing the pattern with value id `id`; such rules have
/// disjoint contexts.
#[derive(Debug)]
pub struct GraphemeTrie {
    da: DoubleArray<u8>,
    values: Vec<Vec<RuleId>>,
}

impl GraphemeTrie {
    pub fn build(rules: &[GraphemeRule]) -> Self {
        // BTreeMap orders by bytes, as DoubleArray::build requires
        let mut by_pattern: BTreeMap<&str, Vec<RuleId>> = BTreeMap::new();
        for (id, rule) in rules.iter().enumerate() {
            by_pattern.entry(rule.pattern.as_str()).or_default().push(id);
        }
        let keys: Vec<&[u8]> = by_pattern.keys().map(|p| p.as_bytes()).collect();
        let da = DoubleArray::<u8>::build(&keys);
        let values: Vec<Vec<RuleId>> = by_pattern.into_values().collect();
        GraphemeTrie { da, values }
    }

    pub fn lookup(&self, pattern: &str) -> TrieLookupResult {
        let pr = self.da.probe(pattern.as_bytes());
        match (pr.value, pr.has_children) {
            (None, false) => TrieLookupResult::None,
            (None, true) => TrieLookupResult::Prefix,
            (Some(id), false) => TrieLookupResult::Exact(self.values[id as usize].clone()),
            (Some(id), true) => TrieLookupResult::ExactAndPrefix(self.values[id as usize].clone()),
        }
    }

    /// All patterns that are prefixes of `input`, shortest first, as
    /// `(pattern_len, rule_ids)`.
    pub fn common_prefixes(&self, input: &[u8]) -> Vec<(usize, &[RuleId])> {
        let mut out: Vec<(usize, &[RuleId])> = self
            .da
            .common_prefix_search(input)
            .map(|m| (m.len, self.values[m.value_id as usize].as_slice()))
            .collect();
        out.sort_by_key(|&(len, _)| len);
        out
    }
}
