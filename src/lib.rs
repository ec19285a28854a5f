// Library surface shared by the `cats` binary and the integration tests.
pub mod autocorrect;
pub mod config;
pub mod diff;
pub mod error;
pub mod matches;
pub mod paragraphs;
pub mod scoring;
pub mod session;
pub mod util;

pub use autocorrect::{autocorrect, FINAL_DIFF_LIMIT};
pub use diff::{feline_fixes, hidden_kittens, DiffMetric, MetricKind};
pub use error::{CatsError, CatsResult};
pub use matches::{time_per_word, MatchRecord, RaceLog};
pub use scoring::{accuracy, report_progress, wpm, ProgressReport};
