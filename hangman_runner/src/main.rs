use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use hangman_rs::{
    harness::Harness,
    strategy::{DictAware, Stupid},
    Dictionary,
};
use log::info;

/// Play Hangman strategies against words from a dictionary.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Word list the strategies guess from, one word per line
    #[arg(short, long)]
    dictionary: PathBuf,

    /// Word list the secrets are drawn from (defaults to the dictionary)
    #[arg(short, long)]
    answers: Option<PathBuf>,

    /// Number of random secrets to play
    #[arg(short, long, default_value_t = 200)]
    games: usize,

    /// Play every secret instead of a random sample
    #[arg(long)]
    all: bool,

    /// Wrong guesses allowed per game
    #[arg(short, long, default_value_t = 6)]
    max_incorrect: u32,

    /// Seed for choosing secrets
    #[arg(long)]
    seed: Option<u64>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// List every secret each strategy missed
    #[arg(short, long)]
    failures: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dictionary = Dictionary::load(&args.dictionary)
        .with_context(|| format!("could not read {}", args.dictionary.display()))?;
    let answers = match &args.answers {
        Some(path) => Dictionary::load(path)
            .with_context(|| format!("could not read {}", path.display()))?,
        None => dictionary.clone(),
    };
    if dictionary.is_empty() {
        bail!("{} has no words", args.dictionary.display());
    }
    info!(
        "loaded {} words and {} answers",
        dictionary.len(),
        answers.len()
    );

    let mut harness = Harness::new()
        .add_strategy(DictAware::new(dictionary))
        .add_baseline(Stupid::new())
        .max_incorrect(args.max_incorrect);
    harness = if args.all {
        harness.test_all()
    } else {
        harness.test_num(args.games)
    };
    if let Some(seed) = args.seed {
        harness = harness.seed(seed);
    }
    if !args.quiet {
        harness = harness.verbose();
    }

    let record = harness.run(&answers)?;
    record.print_report()?;
    if args.failures {
        for perf in record.iter() {
            perf.print_misses()?;
        }
    }

    Ok(())
}
