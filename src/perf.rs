//! Evaluating and comparing strategies.

use std::{fmt::Display, io::Write, ops::Deref, sync::Arc};

use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use owo_colors::{AnsiColors, OwoColorize, Stream};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{strategy::Attempts, HangmanError, Result};

/// How one strategy fared on one puzzle.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Outcome {
    secret: Arc<str>,
    attempts: Attempts,
    solved: bool,
}

impl Outcome {
    pub(crate) fn new(secret: Arc<str>, attempts: Attempts, solved: bool) -> Self {
        Outcome {
            secret,
            attempts,
            solved,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn attempts(&self) -> &Attempts {
        &self.attempts
    }

    pub fn solved(&self) -> bool {
        self.solved
    }
}

/// A record of one strategy's games after run by the
/// [test harness](crate::Harness).
///
/// This struct can provide statistics about the games on its own, but it
/// is recommended to produce [`Summary`] first to cache the computations.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Perf {
    pub(crate) tries: Vec<Outcome>,
    strategy_name: String,
    max_incorrect: u32,
}

impl Perf {
    /// Creates a new performance record.
    pub(crate) fn new(strategy_name: String, max_incorrect: u32, tries: Vec<Outcome>) -> Self {
        Perf {
            tries,
            strategy_name,
            max_incorrect,
        }
    }

    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Gets every game the strategy played.
    pub fn tries(&self) -> &[Outcome] {
        &self.tries
    }

    /// Gets the number of puzzles attempted by the strategy.
    pub fn num_tried(&self) -> u32 {
        self.tries.len() as u32
    }

    /// Gets the number of puzzles solved by the strategy.
    ///
    /// This function always returns a number less than or equal to
    /// [`num_tried()`](Self::num_tried()).
    pub fn num_solved(&self) -> u32 {
        self.tries.iter().filter(|o| o.solved).count() as u32
    }

    /// Gets the fraction of puzzles solved by the strategy.
    pub fn frac_solved(&self) -> f32 {
        (self.num_solved() as f32) / (self.num_tried() as f32)
    }

    /// Gets the number of puzzles the strategy could not solve.
    pub fn num_missed(&self) -> u32 {
        self.num_tried() - self.num_solved()
    }

    /// Gets the fraction of puzzles the strategy could not solve.
    pub fn frac_missed(&self) -> f32 {
        (self.num_missed() as f32) / (self.num_tried() as f32)
    }

    /// Gets the number of guesses across all puzzle attempts.
    pub fn cumulative_guesses(&self) -> u32 {
        self.tries
            .iter()
            .map(|o| o.attempts.guesses().len() as u32)
            .sum()
    }

    /// Gets the average number of incorrect guesses on solved puzzles.
    ///
    /// Returns `None` if no puzzle was solved.
    pub fn incorrect_per_solution(&self) -> Option<f32> {
        let solved = self.num_solved();
        if solved == 0 {
            return None;
        }

        let incorrect: u32 = self
            .tries
            .iter()
            .filter(|o| o.solved)
            .map(|o| o.attempts.incorrect())
            .sum();
        Some((incorrect as f32) / (solved as f32))
    }

    /// Writes a table of the puzzles the strategy could not solve.
    pub fn write_misses<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{:-^80}", format!(" missed by {} ", self.strategy_name))?;

        if self.num_missed() == 0 {
            writeln!(out, "Nothing missed")?;
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["secret", "guesses", "wrong"]);
        for outcome in self.tries.iter().filter(|o| !o.solved) {
            table.add_row(vec![
                Cell::new(outcome.secret()),
                Cell::new(outcome.attempts.guesses().iter().collect::<String>()),
                Cell::new(outcome.attempts.incorrect()).fg(Color::Red),
            ]);
        }
        writeln!(out, "{}", table)?;

        Ok(())
    }

    /// Prints a table of the puzzles the strategy could not solve.
    pub fn print_misses(&self) -> Result<()> {
        self.write_misses(&mut std::io::stdout().lock())
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        let mut bins = vec![0; self.max_incorrect as usize];

        self.tries
            .iter()
            .filter(|o| o.solved)
            .map(|o| o.attempts.incorrect() as usize)
            .for_each(|n| bins[n] += 1);

        assert_eq!(bins.iter().sum::<u32>(), self.num_solved());

        Summary {
            strategy_name: &self.strategy_name,
            num_tried: self.num_tried(),
            num_solved: self.num_solved(),
            cumulative_guesses: self.cumulative_guesses(),
            histogram: bins.into(),
        }
    }
}

/// A summary of a strategy's performance generated by the
/// [test harness](crate::Harness).
///
/// It is recommended to convert the [`Perf`] struct to this via the
/// [`Perf::to_summary()`] method when you want to use the performance to run
/// statistics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary<'a> {
    strategy_name: &'a str,
    num_tried: u32,
    num_solved: u32,
    cumulative_guesses: u32,
    histogram: Histogram,
}

impl<'a> Summary<'a> {
    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &'a str {
        self.strategy_name
    }

    /// Gets the number of puzzles attempted by the strategy.
    pub fn num_tried(&self) -> u32 {
        self.num_tried
    }

    /// Gets the number of puzzles solved by the strategy.
    pub fn num_solved(&self) -> u32 {
        self.num_solved
    }

    /// Gets the fraction of puzzles solved by the strategy.
    pub fn frac_solved(&self) -> f32 {
        (self.num_solved as f32) / (self.num_tried as f32)
    }

    /// Gets the number of guesses across all puzzle attempts.
    pub fn cumulative_guesses(&self) -> u32 {
        self.cumulative_guesses
    }

    /// Gets the number of incorrect guesses across all solved puzzles.
    pub fn cumulative_incorrect_solved(&self) -> u32 {
        self.histogram
            .iter()
            .enumerate()
            .map(|(i, v)| i as u32 * v)
            .sum::<u32>()
    }

    /// Gets the average number of incorrect guesses on solved puzzles.
    ///
    /// Returns `None` if no puzzle was solved.
    pub fn mean_incorrect(&self) -> Option<f32> {
        if self.num_solved == 0 {
            return None;
        }
        Some((self.cumulative_incorrect_solved() as f32) / (self.num_solved as f32))
    }

    /// Gets the number of puzzles the strategy could not solve.
    pub fn num_missed(&self) -> u32 {
        self.num_tried - self.num_solved
    }

    /// Gets the fraction of puzzles the strategy could not solve.
    pub fn frac_missed(&self) -> f32 {
        (self.num_missed() as f32) / (self.num_tried as f32)
    }

    /// Gets the histogram of incorrect guesses on solved puzzles.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn compare<'b>(&self, baseline: &Summary<'b>) -> Result<Comparison<'a, 'b>> {
        if self == baseline {
            return Err(HangmanError::SelfComparison);
        }

        Comparison::compare(self.clone(), baseline.clone())
    }

    /// Writes the summary to `out`, compared against a baseline if the
    /// options hold one.
    ///
    /// Comparing a summary with itself fails before anything is written.
    pub fn write_to<W: Write>(&self, out: &mut W, options: SummaryPrintOptions) -> Result<()> {
        match options.compare {
            Some(baseline) => {
                let comparison = self.compare(&baseline)?;

                writeln!(out, "{:-^80}", self.strategy_name)?;
                writeln!(
                    out,
                    "Ran {} words and comp. with {}, {} words",
                    self.num_tried(),
                    baseline.strategy_name(),
                    baseline.num_tried()
                )?;

                if comparison.is_significant() {
                    writeln!(
                        out,
                        "Guessed {} correctly, or {:.1}% ({:+.1}%), and {} incorrectly, {}",
                        self.num_solved(),
                        self.frac_solved() * 100.,
                        (comparison.frac_solved_diff() * 100.).if_supports_color(
                            Stream::Stdout,
                            |text| {
                                if comparison.frac_solved_diff().is_sign_positive() {
                                    text.color(AnsiColors::Green)
                                } else {
                                    text.color(AnsiColors::Red)
                                }
                            }
                        ),
                        self.num_missed(),
                        "a sig. diff.".if_supports_color(Stream::Stdout, |text| text.bold())
                    )?;
                } else {
                    writeln!(
                        out,
                        "Guessed {} correctly, or {:.1}% ({:+.1}%), and {} incorrectly, not a sig. diff.",
                        self.num_solved(),
                        self.frac_solved() * 100.,
                        comparison.frac_solved_diff() * 100.,
                        self.num_missed()
                    )?;
                }

                writeln!(
                    out,
                    "Solved games took {} ({}) wrong guesses on average",
                    mean_text(self.mean_incorrect()),
                    comparison
                        .mean_incorrect_diff()
                        .map_or_else(|| "n/a".to_string(), |d| format!("{:+.2}", d)),
                )?;
            }
            None => write!(out, "{}", self)?,
        }

        if options.histogram {
            write!(out, "{}", self.histogram)?;
        }

        Ok(())
    }

    /// Prints the summary to stdout. See [`write_to()`](Self::write_to()).
    pub fn print(&self, options: SummaryPrintOptions) -> Result<()> {
        self.write_to(&mut std::io::stdout().lock(), options)
    }

    pub fn print_options() -> SummaryPrintOptions<'a> {
        SummaryPrintOptions::default()
    }
}

#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SummaryPrintOptions<'a> {
    compare: Option<Summary<'a>>,
    histogram: bool,
}

impl<'a> SummaryPrintOptions<'a> {
    pub fn compare(self, baseline: &Summary<'a>) -> Self {
        Self {
            compare: Some(baseline.clone()),
            ..self
        }
    }

    pub fn histogram(self, histogram: bool) -> Self {
        Self { histogram, ..self }
    }
}

impl<'a> Display for Summary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", self.strategy_name)?;
        writeln!(f, "Ran {} words", self.num_tried())?;

        writeln!(
            f,
            "Guessed {} correctly, or {:.1}%, and {} incorrectly",
            self.num_solved(),
            self.frac_solved() * 100.,
            self.num_missed()
        )?;

        writeln!(
            f,
            "Solved games took {} wrong guesses on average",
            mean_text(self.mean_incorrect()),
        )?;

        Ok(())
    }
}

fn mean_text(mean: Option<f32>) -> String {
    mean.map_or_else(|| "n/a".to_string(), |m| format!("{:.2}", m))
}

/// Two summaries set side by side.
///
/// Whether the solve rates differ is decided with Fisher's exact test on the
/// solved and missed counts.
#[derive(Debug, Clone)]
pub struct Comparison<'a, 'b> {
    this: Summary<'a>,
    baseline: Summary<'b>,
    solved_pvalue: f64,
}

impl<'a, 'b> Comparison<'a, 'b> {
    /// The p-value below which a difference in solve rate is significant.
    pub const ALPHA: f64 = 0.05;

    pub fn compare(this: Summary<'a>, baseline: Summary<'b>) -> Result<Self> {
        let solved = fishers_exact::fishers_exact(&[
            this.num_solved(),
            baseline.num_solved(),
            this.num_missed(),
            baseline.num_missed(),
        ])
        .map_err(|_| HangmanError::Stats)?;

        Ok(Self {
            this,
            baseline,
            solved_pvalue: solved.two_tail_pvalue,
        })
    }

    /// Gets the two-tailed p-value for the difference in solve rate.
    pub fn solved_pvalue(&self) -> f64 {
        self.solved_pvalue
    }

    pub fn is_significant(&self) -> bool {
        self.solved_pvalue < Self::ALPHA
    }

    pub fn tries_eq(&self) -> bool {
        self.this.num_tried == self.baseline.num_tried
    }

    pub fn num_solved_diff(&self) -> Option<i64> {
        if self.tries_eq() {
            Some(self.this.num_solved() as i64 - self.baseline.num_solved() as i64)
        } else {
            None
        }
    }

    pub fn frac_solved_diff(&self) -> f32 {
        self.this.frac_solved() - self.baseline.frac_solved()
    }

    /// Gets the difference in average wrong guesses on solved puzzles, if
    /// both strategies solved something.
    pub fn mean_incorrect_diff(&self) -> Option<f32> {
        self.this
            .mean_incorrect()
            .zip(self.baseline.mean_incorrect())
            .map(|(this, baseline)| this - baseline)
    }
}

/// Counts of solved puzzles by how many wrong guesses they took.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Histogram {
    bins: Vec<u32>,
}

impl From<Vec<u32>> for Histogram {
    fn from(other: Vec<u32>) -> Self {
        Self { bins: other }
    }
}

impl Deref for Histogram {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.bins
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = self.iter().copied().max().unwrap_or(0);
        let digits =
            std::iter::successors(Some(max), |&n| (n >= 10).then(|| n / 10)).count() as u32;
        let count_per_mark = (max as f32 / (80. - digits as f32 - 8.)).max(1.0);

        for (i, &bin) in self.bins.iter().enumerate() {
            write!(f, "{:>2} |", i)?;
            let marks = (bin as f32 / count_per_mark).floor() as usize;
            writeln!(f, "{:■>marks$} ({})", "", bin)?;
        }

        Ok(())
    }
}
