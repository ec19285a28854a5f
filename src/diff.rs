use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Trait for the word difference metrics used by the autocorrector.
///
/// Implementations must be pure: the autocorrector calls `diff` once per
/// candidate and only compares the result against `limit`.
pub trait DiffMetric {
    /// Dissimilarity between `typed` and `reference`. Values above `limit`
    /// only mean "too different"; their exact magnitude is unspecified.
    fn diff(&self, typed: &str, reference: &str, limit: usize) -> usize;
}

impl<F> DiffMetric for F
where
    F: Fn(&str, &str, usize) -> usize,
{
    fn diff(&self, typed: &str, reference: &str, limit: usize) -> usize {
        self(typed, reference, limit)
    }
}

/// Built-in metrics, selectable from config and the command line
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Feline,
    Kittens,
}

impl DiffMetric for MetricKind {
    fn diff(&self, typed: &str, reference: &str, limit: usize) -> usize {
        match self {
            MetricKind::Feline => feline_fixes(typed, reference, limit),
            MetricKind::Kittens => hidden_kittens(typed, reference, limit),
        }
    }
}

/// Number of positional substitutions turning `typed` into `reference`,
/// plus the difference in their lengths.
///
/// Every substitution spends one unit of `limit`. Once it is spent the
/// remaining suffixes only contribute 1 if they differ, so any result above
/// `limit` just means the words are too far apart.
pub fn feline_fixes(typed: &str, reference: &str, limit: usize) -> usize {
    let typed: Vec<char> = typed.chars().collect();
    let reference: Vec<char> = reference.chars().collect();
    substitutions(&typed, &reference, limit)
}

fn substitutions(typed: &[char], reference: &[char], mut limit: usize) -> usize {
    let mut charged = 0;
    let shared = typed.len().min(reference.len());
    for i in 0..shared {
        if limit == 0 {
            return charged + usize::from(typed[i..] != reference[i..]);
        }
        if typed[i] != reference[i] {
            charged += 1;
            limit -= 1;
        }
    }
    if limit == 0 {
        return charged + usize::from(typed.len() != reference.len());
    }
    charged + typed.len().abs_diff(reference.len())
}

/// Number of times `reference` occurs as a (not necessarily contiguous)
/// subsequence of `typed`.
///
/// Counts above `limit` are not tracked; any such count is reported as
/// `limit + 1`.
pub fn hidden_kittens(typed: &str, reference: &str, limit: usize) -> usize {
    let reference: Vec<char> = reference.chars().collect();
    if reference.is_empty() {
        return 0;
    }
    let cap = limit.saturating_add(1);
    // ways[j]: occurrences of reference[..j] in the typed prefix seen so far
    let mut ways = vec![0usize; reference.len() + 1];
    ways[0] = 1;
    for c in typed.chars() {
        for j in (1..=reference.len()).rev() {
            if reference[j - 1] == c {
                ways[j] = ways[j].saturating_add(ways[j - 1]).min(cap);
            }
        }
    }
    ways[reference.len()]
}
