//! The test harness for running Hangman strategies.

use std::{fmt::Debug, io::Write, ops::Deref, sync::Arc};

use indicatif::ProgressBar;
use log::{debug, info};
use rand::{rngs::StdRng, seq::index::sample, SeedableRng};
use rayon::prelude::*;

use crate::{
    perf::{Outcome, Perf},
    strategy::{Puzzle, Strategy},
    words::Dictionary,
    HarnessError, Result, Summary,
};

type Factory = Box<dyn Fn() -> Box<dyn Strategy> + Send + Sync>;

struct Entry {
    name: String,
    make: Factory,
}

/// A test harness that can run many strategies on many puzzles.
///
/// When you want to test your strategies, create a new test harness
/// with [`new()`](Harness::new()). You can then configure it using various
/// methods. Note that these configuration methods consume the existing
/// [`Harness`] and return a new one.
///
/// Puzzles are played in parallel. Each worker thread gets its own copy of
/// every strategy, so strategies never share game state.
///
/// # Examples
///
/// ```rust
/// use hangman_rs::{Dictionary, Harness, strategy::{DictAware, Stupid}};
///
/// let dictionary = Dictionary::new(["cat", "cot", "cut", "dog", "bird"]);
///
/// let harness = Harness::new()
///     .quiet()
///     .add_strategy(DictAware::new(dictionary.clone()))
///     .add_baseline(Stupid::new())
///     .test_all();
///
/// let record = harness.run(&dictionary)?;
/// assert_eq!(record.len(), 2);
/// assert_eq!(record[0].num_solved(), 5);
/// #
/// # Ok::<_, hangman_rs::HangmanError>(())
/// ```
pub struct Harness {
    strategies: Vec<Entry>,
    verbose: bool,
    num_puzzles: Option<usize>,
    max_incorrect: u32,
    seed: Option<u64>,
    baseline: Option<usize>,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            strategies: Vec::new(),
            verbose: false,
            num_puzzles: Some(100),
            max_incorrect: 6,
            seed: None,
            baseline: None,
        }
    }
}

impl Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field(
                "strategies",
                &self.strategies.iter().map(|e| &e.name).collect::<Vec<_>>(),
            )
            .field("verbose", &self.verbose)
            .field("num_puzzles", &self.num_puzzles)
            .field("max_incorrect", &self.max_incorrect)
            .field("seed", &self.seed)
            .field("baseline", &self.baseline)
            .finish()
    }
}

impl Harness {
    /// Creates a new test harness with default configuration.
    ///
    /// Defaults:
    /// 1. tests no strategies
    /// 2. quiet mode
    /// 3. runs each strategy on 100 puzzles chosen at random
    /// 4. allows six wrong guesses per puzzle
    /// 5. does not compare against a baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the harness verbose while testing.
    ///
    /// As of right now, this consists of a progress bar and nothing else.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Adds a strategy to the harness for testing.
    ///
    /// The harness clones `strat` once per worker thread.
    pub fn add_strategy<S>(self, strat: S) -> Self
    where
        S: Strategy + Clone + Sync + 'static,
    {
        let name = format!("{} v{}", strat, strat.version());
        let make: Factory = Box::new(move || Box::new(strat.clone()));
        let mut strategies = self.strategies;
        strategies.push(Entry { name, make });
        Harness { strategies, ..self }
    }

    /// Adds a strategy to the harness for testing and sets it as the baseline
    /// for comparison.
    pub fn add_baseline<S>(self, strat: S) -> Self
    where
        S: Strategy + Clone + Sync + 'static,
    {
        self.add_strategy(strat).and_baseline()
    }

    /// Sets the most recently added strategy as the baseline for comparisons.
    pub fn and_baseline(self) -> Self {
        Self {
            baseline: self.strategies.len().checked_sub(1),
            ..self
        }
    }

    /// Sets the harness to test each strategy on every answer.
    pub fn test_all(self) -> Self {
        Harness {
            num_puzzles: None,
            ..self
        }
    }

    /// Sets the harness to test each strategy on `n` random answers.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_puzzles: Some(n),
            ..self
        }
    }

    /// Sets how many wrong guesses end a game.
    pub fn max_incorrect(self, max_incorrect: u32) -> Self {
        Harness {
            max_incorrect,
            ..self
        }
    }

    /// Makes the random choice of answers repeatable.
    pub fn seed(self, seed: u64) -> Self {
        Harness {
            seed: Some(seed),
            ..self
        }
    }

    fn choose<'d>(&self, answers: &'d Dictionary) -> Vec<&'d Arc<str>> {
        match self.num_puzzles {
            Some(n) => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                sample(&mut rng, answers.len(), n.min(answers.len()))
                    .into_iter()
                    .map(|i| &answers[i])
                    .collect()
            }
            None => answers.iter().collect(),
        }
    }

    /// Runs the harness on secrets drawn from `answers` and produces
    /// performances for each strategy.
    ///
    /// The [`Perf`]s will be in the same order as the strategies were added
    /// to the harness.
    pub fn run(&self, answers: &Dictionary) -> Result<Record> {
        if self.strategies.is_empty() {
            return Err(HarnessError::NoStrategiesAdded.into());
        }
        if answers.is_empty() {
            return Err(HarnessError::NoPuzzles.into());
        }

        let secrets = self.choose(answers);
        info!(
            "testing {} strategies on {} puzzles with {} wrong guesses allowed",
            self.strategies.len(),
            secrets.len(),
            self.max_incorrect
        );

        let bar = if self.verbose {
            ProgressBar::new((secrets.len() * self.strategies.len()) as u64)
        } else {
            ProgressBar::hidden()
        };

        let mut perfs = Vec::with_capacity(self.strategies.len());
        for entry in &self.strategies {
            let tries = secrets
                .par_iter()
                .map_init(
                    || (entry.make)(),
                    |strategy, &secret| {
                        let outcome = self.run_inner(strategy.as_mut(), secret);
                        bar.inc(1);
                        outcome
                    },
                )
                .collect::<Result<Vec<_>>>()?;

            let perf = Perf::new(entry.name.clone(), self.max_incorrect, tries);
            info!(
                "{} solved {} of {}",
                entry.name,
                perf.num_solved(),
                perf.num_tried()
            );
            perfs.push(perf);
        }
        bar.finish_and_clear();

        Ok(Record::new(perfs, self.baseline))
    }

    fn run_inner(&self, strategy: &mut dyn Strategy, secret: &Arc<str>) -> Result<Outcome> {
        let puzzle = Puzzle::new(secret, self.max_incorrect)?;
        let attempts = puzzle.play(strategy)?;
        let solved = puzzle.solved(&attempts);
        if !solved {
            debug!("{} missed \"{}\" with {}", strategy, secret, attempts);
        }

        Ok(Outcome::new(Arc::clone(secret), attempts, solved))
    }
}

/// The performances produced by one run of the [`Harness`].
#[derive(Debug, Clone, Default)]
pub struct Record {
    perfs: Vec<Perf>,
    baseline: Option<usize>,
}

impl Deref for Record {
    type Target = [Perf];

    fn deref(&self) -> &Self::Target {
        &self.perfs
    }
}

impl Record {
    fn new(perfs: Vec<Perf>, baseline: impl Into<Option<usize>>) -> Self {
        Self {
            perfs,
            baseline: baseline.into(),
        }
    }

    /// Gets the performance the others are compared against, if any.
    pub fn baseline(&self) -> Option<&Perf> {
        self.baseline.and_then(|n| self.perfs.get(n))
    }

    /// Writes a summary of every performance to `out`, each compared against
    /// the baseline when there is one.
    pub fn write_report<W: Write>(&self, out: &mut W) -> Result<()> {
        let baseline = self.baseline().map(Perf::to_summary);

        for (i, perf) in self.perfs.iter().enumerate() {
            let summary = perf.to_summary();
            let options = match &baseline {
                Some(baseline) if self.baseline != Some(i) => {
                    Summary::print_options().compare(baseline)
                }
                _ => Summary::print_options(),
            };
            summary.write_to(out, options.histogram(true))?;
        }

        Ok(())
    }

    /// Prints the report to stdout. See [`write_report()`](Self::write_report()).
    pub fn print_report(&self) -> Result<()> {
        self.write_report(&mut std::io::stdout().lock())
    }

    /// Serializes the summary of every performance as JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        let summaries: Vec<Summary> = self.perfs.iter().map(Perf::to_summary).collect();
        let json = serde_json::to_string_pretty(&summaries).map_err(HarnessError::from)?;
        Ok(json)
    }
}
