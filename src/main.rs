use cats::{
    autocorrect,
    config::{Config, ConfigStore, FileConfigStore},
    paragraphs::{about, pick, ParagraphSet},
    session::{Stopwatch, SystemStopwatch, TypingSession},
    CatsResult, MetricKind, RaceLog,
};
use clap::{CommandFactory, Parser};
use itertools::Itertools;
use std::{
    error::Error,
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing::info;

/// typing speed test with autocorrect and multiplayer race analysis
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Measure typing speed and accuracy against reference paragraphs, autocorrect mistyped words, and compare players in a recorded race."
)]
pub struct Cli {
    /// topic words used to choose paragraphs (lowercase)
    topic: Vec<String>,

    /// run the typing test
    #[clap(short = 't')]
    typing_test: bool,

    /// file with one paragraph per line (default: bundled sample paragraphs)
    #[clap(short = 'p', long)]
    paragraphs: Option<PathBuf>,

    /// shuffle the paragraphs before the test starts
    #[clap(long)]
    shuffle: bool,

    /// word to autocorrect against the paragraph vocabulary (repeatable)
    #[clap(short = 'c', long = "correct")]
    correct: Vec<String>,

    /// difference metric used by autocorrect
    #[clap(short = 'm', long, value_enum)]
    metric: Option<MetricKind>,

    /// largest difference autocorrect will accept
    #[clap(short = 'l', long)]
    limit: Option<usize>,

    /// JSON race log with "words" and cumulative "timestamps" per player
    #[clap(long)]
    race: Option<PathBuf>,

    /// config file to read defaults from
    #[clap(long)]
    config: Option<PathBuf>,
}

/// Command line flags layered over the stored config
#[derive(Debug)]
struct Settings {
    limit: usize,
    metric: MetricKind,
    paragraphs_path: Option<PathBuf>,
    shuffle: bool,
}

impl Settings {
    fn resolve(cli: &Cli, cfg: Config) -> Self {
        Self {
            limit: cli.limit.unwrap_or(cfg.limit),
            metric: cli.metric.unwrap_or(cfg.metric),
            paragraphs_path: cli.paragraphs.clone().or(cfg.paragraphs_path),
            shuffle: cli.shuffle || cfg.shuffle,
        }
    }

    fn load_paragraphs(&self) -> CatsResult<ParagraphSet> {
        let mut set = match &self.paragraphs_path {
            Some(path) => ParagraphSet::from_lines_file(path)?,
            None => ParagraphSet::builtin()?,
        };
        if self.shuffle {
            set.shuffle();
        }
        info!(name = %set.name, paragraphs = set.size, "loaded paragraphs");
        Ok(set)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let settings = Settings::resolve(&cli, store.load());

    if !cli.typing_test && cli.correct.is_empty() && cli.race.is_none() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &cli.race {
        print_race(path, &mut out)?;
    }

    if !cli.correct.is_empty() || cli.typing_test {
        let set = settings.load_paragraphs()?;

        if !cli.correct.is_empty() {
            let dictionary = set.dictionary();
            for word in &cli.correct {
                let fixed = autocorrect(word, &dictionary, &settings.metric, settings.limit);
                writeln!(out, "{word} -> {fixed}")?;
            }
        }

        if cli.typing_test {
            let stdin = io::stdin();
            run_typing_test(
                &set,
                &cli.topic,
                SystemStopwatch::new,
                &mut stdin.lock(),
                &mut out,
            )?;
        }
    }

    Ok(())
}

fn print_race<W: Write>(path: &Path, out: &mut W) -> Result<(), Box<dyn Error>> {
    let log = RaceLog::from_json(&fs::read_to_string(path)?)?;
    let record = log.into_match()?;
    writeln!(out, "{record}")?;
    for (player, words) in record.fastest_words().iter().enumerate() {
        let average = record
            .average_time(player)?
            .map_or(String::from("-"), |avg| format!("{avg:.2}"));
        writeln!(
            out,
            "Player {player}: fastest on [{}], average {average} per word",
            words.iter().join(", ")
        )?;
    }
    Ok(())
}

/// Reads one line; end of input reads as an empty line
fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn run_typing_test<S, R, W>(
    set: &ParagraphSet,
    topic: &[String],
    new_stopwatch: impl Fn() -> S,
    input: &mut R,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    S: Stopwatch,
    R: BufRead,
    W: Write,
{
    let about_topic = about(topic)?;
    let select = |p: &str| topic.is_empty() || about_topic(p);

    for k in 0.. {
        let reference = pick(&set.paragraphs, select, k);
        if reference.is_empty() {
            writeln!(out, "No more paragraphs about {topic:?} are available.")?;
            return Ok(());
        }
        writeln!(out, "Type the following paragraph and then press enter/return.")?;
        writeln!(
            out,
            "If you only type part of it, you will be scored only on that part.\n"
        )?;
        writeln!(out, "{reference}\n")?;
        out.flush()?;

        let mut session = TypingSession::new(reference, new_stopwatch());
        session.start();
        let typed = read_line(input)?;
        if typed.is_empty() {
            writeln!(out, "Goodbye.")?;
            return Ok(());
        }
        writeln!(out)?;

        let result = session.finish(&typed)?;
        writeln!(out, "Nice work!")?;
        writeln!(out, "Words per minute: {:.2}", result.wpm)?;
        writeln!(out, "Accuracy:         {:.2}", result.accuracy)?;
        writeln!(
            out,
            "\nPress enter/return for the next paragraph or type q to quit."
        )?;
        out.flush()?;

        if read_line(input)?.trim() == "q" {
            return Ok(());
        }
    }
    Ok(())
}
