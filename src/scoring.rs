use crate::error::{CatsError, CatsResult};
use crate::paragraphs::split;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Progress of one player, handed to the uploader as `{"id", "progress"}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    #[serde(rename = "id")]
    pub user_id: u64,
    pub progress: f64,
}

/// Percentage of words in `typed` that match `reference` at the same
/// position.
///
/// Typed words past the end of `reference` count as misses. Nothing typed
/// scores 0, unless the reference is empty too.
pub fn accuracy(typed: &str, reference: &str) -> f64 {
    if typed.is_empty() && reference.is_empty() {
        return 100.0;
    }
    let typed_words = split(typed);
    if typed_words.is_empty() {
        return 0.0;
    }
    let matching = typed_words
        .iter()
        .zip(split(reference))
        .filter(|(t, r)| **t == *r)
        .count();
    matching as f64 / typed_words.len() as f64 * 100.0
}

/// Words per minute, counting every five characters as a word
pub fn wpm(typed: &str, elapsed_secs: f64) -> CatsResult<f64> {
    if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return Err(CatsError::NonPositiveElapsed(elapsed_secs));
    }
    let words = typed.chars().count() as f64 / 5.0;
    Ok(words * (60.0 / elapsed_secs))
}

/// Scans `typed` against `prompt` in lockstep, sends the fraction of the
/// prompt typed correctly to `upload`, and returns it.
///
/// A typed word that does not match the current prompt word is skipped while
/// the prompt stays put, so a later typed word can still match it.
pub fn report_progress<T, P, U>(
    typed: &[T],
    prompt: &[P],
    user_id: u64,
    upload: U,
) -> CatsResult<f64>
where
    T: AsRef<str>,
    P: AsRef<str>,
    U: FnOnce(ProgressReport),
{
    if prompt.is_empty() {
        return Err(CatsError::EmptyPrompt);
    }

    let mut prompt_words = prompt.iter().peekable();
    let mut matched = 0usize;
    for word in typed {
        let Some(expected) = prompt_words.peek() else {
            break;
        };
        if word.as_ref() == expected.as_ref() {
            prompt_words.next();
            matched += 1;
        }
    }

    let progress = matched as f64 / prompt.len() as f64;
    debug!(user_id, progress, "uploading progress");
    upload(ProgressReport { user_id, progress });
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_accuracy_examples() {
        assert_eq!(accuracy("Cute Dog!", "Cute Dog."), 50.0);
        assert_eq!(accuracy("A Cute Dog!", "Cute Dog."), 0.0);
        assert_eq!(accuracy("cute Dog.", "Cute Dog."), 50.0);
        assert_eq!(accuracy("Cute Dog. I say!", "Cute Dog."), 50.0);
        assert_eq!(accuracy("Cute", "Cute Dog."), 100.0);
    }

    #[test]
    fn test_accuracy_empty_inputs() {
        assert_eq!(accuracy("", "Cute Dog."), 0.0);
        assert_eq!(accuracy("", ""), 100.0);
        assert_eq!(accuracy("   ", "Cute Dog."), 0.0);
        assert_eq!(accuracy("Cute", ""), 0.0);
    }

    #[test]
    fn test_accuracy_ignores_spacing() {
        assert_eq!(accuracy("  Cute   Dog. ", "Cute Dog."), 100.0);
    }

    #[test]
    fn test_wpm() {
        assert_eq!(wpm("hello friend hello buddy hello", 15.0).unwrap(), 24.0);
        assert_eq!(wpm("0123456789", 60.0).unwrap(), 2.0);
        assert_eq!(wpm("", 10.0).unwrap(), 0.0);
    }

    #[test]
    fn test_wpm_counts_chars_not_bytes() {
        assert_eq!(wpm("ééééé", 60.0).unwrap(), 1.0);
    }

    #[test]
    fn test_wpm_requires_positive_elapsed() {
        assert_matches!(wpm("hello", 0.0), Err(CatsError::NonPositiveElapsed(_)));
        assert_matches!(wpm("hello", -3.0), Err(CatsError::NonPositiveElapsed(_)));
        assert_matches!(wpm("hello", f64::NAN), Err(CatsError::NonPositiveElapsed(_)));
    }

    #[test]
    fn test_report_progress() {
        let prompt = ["how", "are", "you", "doing", "today"];
        let mut uploads = Vec::new();

        let progress =
            report_progress(&["how", "are", "you"], &prompt, 2, |r| uploads.push(r)).unwrap();
        assert_eq!(progress, 0.6);
        assert_eq!(
            uploads,
            vec![ProgressReport {
                user_id: 2,
                progress: 0.6
            }]
        );

        let progress = report_progress(&["how", "aree"], &prompt, 3, |r| uploads.push(r)).unwrap();
        assert_eq!(progress, 0.2);
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[1].user_id, 3);
    }

    #[test]
    fn test_report_progress_skips_mismatched_words() {
        let prompt = ["a", "b", "c", "d"];
        // "x" is skipped and "b" still lines up with the prompt
        let progress = report_progress(&["a", "x", "b", "c"], &prompt, 1, |_| {}).unwrap();
        assert_eq!(progress, 0.75);
    }

    #[test]
    fn test_report_progress_typed_longer_than_prompt() {
        let prompt = ["a", "b"];
        let progress = report_progress(&["a", "b", "c", "d"], &prompt, 1, |_| {}).unwrap();
        assert_eq!(progress, 1.0);
    }

    #[test]
    fn test_report_progress_nothing_typed() {
        let typed: [&str; 0] = [];
        let mut called = false;
        let progress = report_progress(&typed, &["a"], 7, |r| {
            called = true;
            assert_eq!(r.progress, 0.0);
        })
        .unwrap();
        assert_eq!(progress, 0.0);
        assert!(called);
    }

    #[test]
    fn test_report_progress_empty_prompt() {
        let prompt: [&str; 0] = [];
        let mut called = false;
        let result = report_progress(&["a"], &prompt, 1, |_| called = true);
        assert_matches!(result, Err(CatsError::EmptyPrompt));
        assert!(!called);
    }

    #[test]
    fn test_progress_report_serializes_with_id() {
        let report = ProgressReport {
            user_id: 2,
            progress: 0.6,
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"id":2,"progress":0.6}"#
        );
    }
}
