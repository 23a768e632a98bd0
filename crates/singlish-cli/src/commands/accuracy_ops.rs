//! Accuracy runs against a TOML corpus of expected conversions.
//!
//! ```toml
//! [[cases]]
//! input = "mama kadeeta yanavaa"
//! expected = "මම කඩේට යනවා"
//! category = "positive"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process;

use serde::{Deserialize, Serialize};
use singlish_core::Engine;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse corpus TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct AccuracyCorpus {
    pub cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
pub struct AccuracyCase {
    pub input: String,
    pub expected: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResult {
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub status: AccuracyStatus,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
pub struct AccuracySummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub pass_rate: String,
}

#[derive(Debug, Serialize)]
pub struct AccuracyReport {
    pub results: Vec<AccuracyResult>,
    pub summary: AccuracySummary,
}

pub fn parse_corpus(content: &str) -> Result<AccuracyCorpus, CorpusError> {
    Ok(toml::from_str(content)?)
}

pub fn load_corpus(path: &Path) -> Result<AccuracyCorpus, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_corpus(&content)
}

/// Cases matching both filters; `None` matches everything.
pub fn select<'c>(
    corpus: &'c AccuracyCorpus,
    category: Option<&str>,
    tag: Option<&str>,
) -> Vec<&'c AccuracyCase> {
    corpus
        .cases
        .iter()
        .filter(|c| category.map_or(true, |cat| c.category == cat))
        .filter(|c| tag.map_or(true, |t| c.tags.iter().any(|ct| ct == t)))
        .collect()
}

pub fn run(engine: &Engine, cases: &[&AccuracyCase]) -> AccuracyReport {
    let results: Vec<AccuracyResult> = cases
        .iter()
        .map(|case| {
            let (actual, status) = if case.skip {
                (String::new(), AccuracyStatus::Skip)
            } else {
                let actual = engine.transliterate(&case.input);
                let status = if actual == case.expected {
                    AccuracyStatus::Pass
                } else {
                    AccuracyStatus::Fail
                };
                (actual, status)
            };
            AccuracyResult {
                input: case.input.clone(),
                expected: case.expected.clone(),
                actual,
                status,
                category: case.category.clone(),
                note: case.note.clone(),
            }
        })
        .collect();

    let count = |status| results.iter().filter(|r| r.status == status).count();
    let (pass, fail, skip) = (
        count(AccuracyStatus::Pass),
        count(AccuracyStatus::Fail),
        count(AccuracyStatus::Skip),
    );
    let tested = results.len() - skip;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };
    let summary = AccuracySummary {
        total: results.len(),
        pass,
        fail,
        skip,
        pass_rate: format!("{rate:.1}%"),
    };
    AccuracyReport { results, summary }
}

pub fn format_report(report: &AccuracyReport, verbose: bool) -> String {
    let mut out = String::new();

    let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
    for r in &report.results {
        grouped.entry(&r.category).or_default().push(r);
    }

    for (cat, group) in &grouped {
        out.push_str(&format!("\n=== {} ({} cases) ===\n", cat, group.len()));
        for r in group {
            match r.status {
                AccuracyStatus::Pass => {
                    if verbose {
                        out.push_str(&format!(
                            "  \u{2713} {:?} \u{2192} {:?}\n",
                            r.input, r.expected
                        ));
                    }
                }
                AccuracyStatus::Fail => {
                    out.push_str(&format!(
                        "  \u{2717} {:?} \u{2192} {:?} (got: {:?})\n",
                        r.input, r.expected, r.actual
                    ));
                }
                AccuracyStatus::Skip => {
                    let reason = r.note.as_deref().unwrap_or("known failure");
                    out.push_str(&format!("  - {:?} [skip: {}]\n", r.input, reason));
                }
            }
        }
    }

    let s = &report.summary;
    out.push_str("\n=== Summary ===\n");
    out.push_str(&format!("  Total:     {}\n", s.total));
    out.push_str(&format!("  Pass:      {:>3}\n", s.pass));
    out.push_str(&format!("  Fail:      {:>3}\n", s.fail));
    out.push_str(&format!("  Skip:      {:>3}\n", s.skip));
    out.push_str(&format!(
        "  Pass rate: {} ({}/{})\n",
        s.pass_rate,
        s.pass,
        s.total - s.skip
    ));
    out
}

pub fn accuracy_cmd(
    engine: &Engine,
    corpus_file: &str,
    category: Option<&str>,
    tag: Option<&str>,
    verbose: bool,
    json: bool,
) {
    let corpus = die!(load_corpus(Path::new(corpus_file)), "Error: {}");
    let cases = select(&corpus, category, tag);
    if cases.is_empty() {
        eprintln!("No cases match the given filters");
        process::exit(1);
    }

    let report = run(engine, &cases);
    if json {
        let out = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{out}");
    } else {
        print!("{}", format_report(&report, verbose));
    }

    if report.summary.fail > 0 {
        process::exit(1);
    }
}
