use crate::error::{CatsError, CatsResult};
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::fs;
use std::path::Path;

static DATA_DIR: Dir = include_dir!("src/data");

const BUILTIN_FILE: &str = "sample_paragraphs.json";

pub fn lower(s: &str) -> String {
    s.to_lowercase()
}

/// Whitespace-separated words of `s`
pub fn split(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

pub fn remove_punctuation(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Returns the `k`th paragraph (counting from 0) for which `select` holds,
/// or the empty string if there are not that many.
pub fn pick<'a, S, F>(paragraphs: &'a [S], select: F, k: usize) -> &'a str
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    paragraphs
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| select(p))
        .nth(k)
        .unwrap_or("")
}

/// Builds a selector that accepts paragraphs mentioning any word in `topic`.
///
/// Topic words must already be lowercase; paragraphs are lowercased and
/// stripped of punctuation before comparing.
pub fn about<S: AsRef<str>>(topic: &[S]) -> CatsResult<impl Fn(&str) -> bool> {
    let topic: Vec<String> = topic.iter().map(|t| t.as_ref().to_string()).collect();
    if let Some(bad) = topic.iter().find(|t| lower(t) != **t) {
        return Err(CatsError::TopicNotLowercase(bad.clone()));
    }
    Ok(move |paragraph: &str| {
        let cleaned = remove_punctuation(&lower(paragraph));
        let words = split(&cleaned);
        topic.iter().any(|t| words.contains(&t.as_str()))
    })
}

/// Trimmed, non-empty lines of a text file
pub fn lines_from_file<P: AsRef<Path>>(path: P) -> CatsResult<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// A named collection of reference paragraphs
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ParagraphSet {
    pub name: String,
    pub size: usize,
    pub paragraphs: Vec<String>,
}

impl ParagraphSet {
    /// The sample paragraphs bundled with the crate
    pub fn builtin() -> CatsResult<Self> {
        let file = DATA_DIR
            .get_file(BUILTIN_FILE)
            .ok_or_else(|| CatsError::MissingData(BUILTIN_FILE.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| CatsError::MissingData(BUILTIN_FILE.to_string()))?;
        Self::from_json(contents)
    }

    pub fn from_json(data: &str) -> CatsResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// One paragraph per line, named after the file stem
    pub fn from_lines_file<P: AsRef<Path>>(path: P) -> CatsResult<Self> {
        let path = path.as_ref();
        let paragraphs = lines_from_file(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            size: paragraphs.len(),
            paragraphs,
        })
    }

    pub fn shuffle(&mut self) {
        self.paragraphs.shuffle(&mut rand::thread_rng());
    }

    /// Sorted, de-duplicated lowercase words without punctuation, for use as
    /// autocorrect candidates
    pub fn dictionary(&self) -> Vec<String> {
        self.paragraphs
            .iter()
            .flat_map(|p| {
                split(&remove_punctuation(&lower(p)))
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .sorted()
            .dedup()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_text_helpers() {
        assert_eq!(lower("Cute Dog!"), "cute dog!");
        assert_eq!(split("  how are\tyou \n"), vec!["how", "are", "you"]);
        assert_eq!(remove_punctuation("Nice pup. It's fun!"), "Nice pup Its fun");
    }

    #[test]
    fn test_pick() {
        let ps = ["hi", "how are you", "fine"];
        let s = |p: &str| p.len() <= 4;
        assert_eq!(pick(&ps, s, 0), "hi");
        assert_eq!(pick(&ps, s, 1), "fine");
        assert_eq!(pick(&ps, s, 2), "");
    }

    #[test]
    fn test_pick_empty() {
        let ps: [&str; 0] = [];
        assert_eq!(pick(&ps, |_| true, 0), "");
    }

    #[test]
    fn test_about() {
        let about_dogs = about(&["dog", "dogs", "pup", "puppy"]).unwrap();
        assert_eq!(
            pick(&["Cute Dog!", "That is a cat.", "Nice pup!"], &about_dogs, 0),
            "Cute Dog!"
        );
        assert_eq!(
            pick(&["Cute Dog!", "That is a cat.", "Nice pup."], &about_dogs, 1),
            "Nice pup."
        );
    }

    #[test]
    fn test_about_matches_whole_words_only() {
        let about_cats = about(&["cat"]).unwrap();
        assert!(about_cats("A CAT!"));
        assert!(!about_cats("Concatenate these."));
    }

    #[test]
    fn test_about_requires_lowercase_topics() {
        assert_matches!(
            about(&["dog", "Cat"]).map(|_| ()),
            Err(CatsError::TopicNotLowercase(t)) if t == "Cat"
        );
    }

    #[test]
    fn test_lines_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  first line  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "second line").unwrap();

        let lines = lines_from_file(file.path()).unwrap();
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_lines_from_missing_file() {
        assert_matches!(
            lines_from_file("/definitely/not/here.txt"),
            Err(CatsError::Io(_))
        );
    }

    #[test]
    fn test_builtin_paragraphs() {
        let set = ParagraphSet::builtin().unwrap();
        assert_eq!(set.name, "sample");
        assert_eq!(set.size, set.paragraphs.len());
        assert!(!set.paragraphs.is_empty());
    }

    #[test]
    fn test_from_json() {
        let set = ParagraphSet::from_json(
            r#"{ "name": "test", "size": 2, "paragraphs": ["Hello world.", "Goodbye world!"] }"#,
        )
        .unwrap();
        assert_eq!(set.name, "test");
        assert_eq!(set.dictionary(), vec!["goodbye", "hello", "world"]);
    }

    #[test]
    fn test_from_lines_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.txt");
        fs::write(&path, "Cute Dog!\nThat is a cat.\n").unwrap();

        let set = ParagraphSet::from_lines_file(&path).unwrap();
        assert_eq!(set.name, "pets");
        assert_eq!(set.size, 2);
        assert_eq!(set.paragraphs[1], "That is a cat.");
    }

    #[test]
    fn test_shuffle_keeps_paragraphs() {
        let mut set = ParagraphSet::builtin().unwrap();
        let mut before = set.paragraphs.clone();
        set.shuffle();
        let mut after = set.paragraphs.clone();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
