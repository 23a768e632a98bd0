//! Decomposition of a word into grapheme rules.

use std::collections::HashSet;

use crate::graphemes::{Candidate, GraphemeTable, UnitClass};

/// One unit of a decomposition, at byte offset `pos` of the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Rule { pos: usize, candidate: Candidate },
    Unmapped { pos: usize, len: usize },
}

pub(crate) enum SearchOutcome {
    Found(Vec<Step>),
    /// Some character has no applicable rule in any decomposition.
    Exhausted,
    BudgetExceeded,
}

struct Frame {
    pos: usize,
    prev: UnitClass,
    candidates: Vec<Candidate>,
    next: usize,
}

impl Frame {
    fn new(table: &GraphemeTable, exact: &[u8], folded: &[u8], pos: usize, prev: UnitClass) -> Self {
        let candidates = if pos < exact.len() {
            table.candidates(exact, folded, pos, prev)
        } else {
            Vec::new()
        };
        Frame {
            pos,
            prev,
            candidates,
            next: 0,
        }
    }
}

/// Depth-first search over ranked candidates for a decomposition that maps
/// every byte. The first complete decomposition in candidate order wins.
///
/// States `(pos, prev)` known to fail are memoised. Each candidate tried
/// counts against `max_steps`.
pub(crate) fn decompose(
    table: &GraphemeTable,
    exact: &[u8],
    folded: &[u8],
    max_steps: usize,
) -> SearchOutcome {
    let len = exact.len();
    let mut failed: HashSet<(usize, UnitClass)> = HashSet::new();
    let mut stack = vec![Frame::new(table, exact, folded, 0, UnitClass::Start)];
    let mut steps = 0usize;

    loop {
        let Some(top) = stack.last_mut() else {
            return SearchOutcome::Exhausted;
        };
        if top.pos == len {
            break;
        }
        if top.next == top.candidates.len() {
            failed.insert((top.pos, top.prev));
            stack.pop();
            continue;
        }
        steps += 1;
        if steps > max_steps {
            return SearchOutcome::BudgetExceeded;
        }

        let candidate = top.candidates[top.next];
        top.next += 1;
        let pos = top.pos + candidate.len;
        let prev = table.rule(candidate.rule).class();
        if failed.contains(&(pos, prev)) {
            continue;
        }
        stack.push(Frame::new(table, exact, folded, pos, prev));
    }

    let path = stack[..stack.len() - 1]
        .iter()
        .map(|f| Step::Rule {
            pos: f.pos,
            candidate: f.candidates[f.next - 1],
        })
        .collect();
    SearchOutcome::Found(path)
}

/// Left-to-right pass taking the best candidate at each position. A byte
/// sequence with no candidate becomes an unmapped character and resets the
/// context to word start.
pub(crate) fn greedy(table: &GraphemeTable, word: &str, exact: &[u8], folded: &[u8]) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut pos = 0;
    let mut prev = UnitClass::Start;

    while pos < exact.len() {
        match table.candidates(exact, folded, pos, prev).first() {
            Some(&candidate) => {
                steps.push(Step::Rule { pos, candidate });
                pos += candidate.len;
                prev = table.rule(candidate.rule).class();
            }
            None => {
                let len = word[pos..].chars().next().map_or(1, char::len_utf8);
                steps.push(Step::Unmapped { pos, len });
                pos += len;
                prev = UnitClass::Start;
            }
        }
    }
    steps
}
