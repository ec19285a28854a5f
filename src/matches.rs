use crate::error::{CatsError, CatsResult};
use crate::util::mean;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Words typed in one race and how long each player took on every word.
///
/// `times[p][w]` is the time player `p` spent on `words[w]`. The record owns
/// its data and can only be built through [`MatchRecord::new`], so every
/// player always has exactly one numeric duration per word.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    words: Vec<String>,
    times: Vec<Vec<f64>>,
}

impl MatchRecord {
    pub fn new(words: Vec<String>, times: Vec<Vec<f64>>) -> CatsResult<Self> {
        for (player, player_times) in times.iter().enumerate() {
            if player_times.len() != words.len() {
                return Err(CatsError::ShapeMismatch {
                    player,
                    expected: words.len(),
                    actual: player_times.len(),
                });
            }
            if let Some(word) = player_times.iter().position(|t| t.is_nan()) {
                return Err(CatsError::NonNumericTime { player, word });
            }
        }
        debug!(
            words = words.len(),
            players = times.len(),
            "built match record"
        );
        Ok(Self { words, times })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn times(&self) -> &[Vec<f64>] {
        &self.times
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn player_count(&self) -> usize {
        self.times.len()
    }

    /// Time it took `player_num` to type the word at `word_index`
    pub fn time(&self, player_num: usize, word_index: usize) -> CatsResult<f64> {
        self.check_word(word_index)?;
        let player_times = self
            .times
            .get(player_num)
            .ok_or(CatsError::PlayerIndexOutOfRange {
                index: player_num,
                len: self.times.len(),
            })?;
        Ok(player_times[word_index])
    }

    pub fn get_word(&self, word_index: usize) -> CatsResult<&str> {
        self.check_word(word_index)?;
        Ok(&self.words[word_index])
    }

    /// For each player, the words they typed faster than everyone else.
    ///
    /// A word goes to the player with the smallest time; on a tie the lower
    /// player index keeps it.
    pub fn fastest_words(&self) -> Vec<Vec<String>> {
        let mut fastest = vec![Vec::new(); self.player_count()];
        for (word_index, word) in self.words.iter().enumerate() {
            let winner = self
                .times
                .iter()
                .map(|player_times| player_times[word_index])
                .position_min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            if let Some(player) = winner {
                fastest[player].push(word.clone());
            }
        }
        fastest
    }

    /// Mean time per word for one player, `None` when no words were typed
    pub fn average_time(&self, player_num: usize) -> CatsResult<Option<f64>> {
        let player_times = self
            .times
            .get(player_num)
            .ok_or(CatsError::PlayerIndexOutOfRange {
                index: player_num,
                len: self.times.len(),
            })?;
        Ok(mean(player_times))
    }

    fn check_word(&self, word_index: usize) -> CatsResult<()> {
        if word_index < self.words.len() {
            Ok(())
        } else {
            Err(CatsError::WordIndexOutOfRange {
                index: word_index,
                len: self.words.len(),
            })
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = self.words.iter().map(|w| format!("'{w}'")).join(", ");
        let times = self
            .times
            .iter()
            .map(|player_times| format!("[{}]", player_times.iter().join(", ")))
            .join(", ");
        write!(f, "match([{words}], [{times}])")
    }
}

/// Converts cumulative timestamps into a [`MatchRecord`].
///
/// Each player's list starts with the time they began typing, followed by the
/// time they finished each word. Timestamps past the last word are ignored.
pub fn time_per_word<W: AsRef<str>>(
    words: &[W],
    times_per_player: &[Vec<f64>],
) -> CatsResult<MatchRecord> {
    let times = times_per_player
        .iter()
        .enumerate()
        .map(|(player, stamps)| {
            if stamps.len() <= words.len() {
                return Err(CatsError::MissingTimestamps {
                    player,
                    expected: words.len() + 1,
                    actual: stamps.len(),
                });
            }
            Ok(stamps
                .windows(2)
                .take(words.len())
                .map(|pair| pair[1] - pair[0])
                .collect())
        })
        .collect::<CatsResult<Vec<Vec<f64>>>>()?;

    let words = words.iter().map(|w| w.as_ref().to_string()).collect();
    MatchRecord::new(words, times)
}

/// Raw race data as read from disk: words plus cumulative timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceLog {
    pub words: Vec<String>,
    pub timestamps: Vec<Vec<f64>>,
}

impl RaceLog {
    pub fn from_json(data: &str) -> CatsResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn into_match(self) -> CatsResult<MatchRecord> {
        time_per_word(&self.words, &self.timestamps)
    }
}
