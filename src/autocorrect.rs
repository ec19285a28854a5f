use crate::diff::DiffMetric;
use tracing::{debug, trace};

/// Limit used by the command line when none is configured
pub const FINAL_DIFF_LIMIT: usize = 6;

/// Returns the element of `word_list` with the smallest difference from
/// `typed_word`, or `typed_word` itself when that difference is above `limit`.
///
/// A word already present in `word_list` is returned without consulting the
/// metric. Ties go to the candidate listed first.
pub fn autocorrect<'a, W, M>(
    typed_word: &'a str,
    word_list: &'a [W],
    metric: &M,
    limit: usize,
) -> &'a str
where
    W: AsRef<str>,
    M: DiffMetric + ?Sized,
{
    if word_list.iter().any(|w| w.as_ref() == typed_word) {
        return typed_word;
    }

    let best = word_list
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            let diff = metric.diff(typed_word, candidate, limit);
            trace!(typed_word, candidate, diff, "scored candidate");
            (candidate, diff)
        })
        .min_by_key(|&(_, diff)| diff);

    match best {
        Some((candidate, diff)) if diff <= limit => {
            debug!(typed_word, candidate, diff, "autocorrected");
            candidate
        }
        _ => typed_word,
    }
}
