//! Presentation helpers for the qsearch demo binaries.
//!
//! The binaries do the argument parsing; everything that touches the
//! terminal lives here so the layout stays the same across demos.

use std::fmt::Display;
use std::io;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use qsearch_adapter_sim::Counts;

/// Width of the histogram bar for a key holding every shot.
const BAR_WIDTH: usize = 40;

/// Rule width is clamped to this range whatever the terminal reports.
const MIN_RULE: usize = 40;
const MAX_RULE: usize = 72;

/// Progress bar over `shots`, drawn only when stderr is a terminal.
pub fn shots_progress(shots: u32) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(u64::from(shots)), ProgressDrawTarget::hidden());
    if Term::stderr().is_term() {
        pb.set_draw_target(ProgressDrawTarget::stderr());
    }
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} shots ({per_sec})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Styled report written line by line to a terminal.
pub struct Report {
    term: Term,
    rule: usize,
}

impl Report {
    /// Report on stdout, with rules sized to the terminal.
    pub fn stdout() -> Self {
        let term = Term::stdout();
        let (_, cols) = term.size();
        let rule = usize::from(cols).clamp(MIN_RULE, MAX_RULE);
        Self { term, rule }
    }

    /// Title framed by double rules.
    pub fn header(&self, title: &str) -> io::Result<()> {
        let bar = "═".repeat(self.rule);
        self.term.write_line("")?;
        self.term.write_line(&style(&bar).cyan().to_string())?;
        self.term
            .write_line(&style(format!("  {title}")).cyan().bold().to_string())?;
        self.term.write_line(&style(&bar).cyan().to_string())
    }

    /// Section title with a single rule underneath.
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.term.write_line("")?;
        self.term
            .write_line(&style(format!("▶ {title}")).green().bold().to_string())?;
        self.term
            .write_line(&style("─".repeat(self.rule / 2)).dim().to_string())
    }

    /// `label: value` line.
    pub fn field(&self, label: &str, value: impl Display) -> io::Result<()> {
        self.term
            .write_line(&format!("  {} {value}", style(format!("{label}:")).dim()))
    }

    /// Closing line for a search that found its target.
    pub fn found(&self, message: &str) -> io::Result<()> {
        self.term.write_line("")?;
        self.term
            .write_line(&format!("{} {message}", style("✓").green().bold()))
    }

    /// Closing line for a search that missed.
    pub fn missed(&self, message: &str) -> io::Result<()> {
        self.term.write_line("")?;
        self.term
            .write_line(&format!("{} {message}", style("!").yellow().bold()))
    }

    /// Counts histogram with the row for `marked` highlighted.
    pub fn counts(&self, counts: &Counts, marked: &str) -> io::Result<()> {
        let width = counts.width().max(1);
        for row in counts_rows(counts) {
            let line = format!(
                "  |{:>width$}⟩ {:>7} {:>6.1}%  {}",
                row.bitstring,
                row.count,
                row.fraction * 100.0,
                row.bar
            );
            if row.bitstring == marked {
                self.term.write_line(&style(line).green().bold().to_string())?;
            } else {
                self.term.write_line(&line)?;
            }
        }
        Ok(())
    }
}

/// One row of the counts histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct CountsRow {
    pub bitstring: String,
    pub count: u64,
    pub fraction: f64,
    pub bar: String,
}

/// Lay out `counts` as histogram rows, one per key in key order.
pub fn counts_rows(counts: &Counts) -> Vec<CountsRow> {
    let total = counts.total();
    counts
        .iter()
        .map(|(bitstring, count)| {
            let fraction = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            };
            let filled = (fraction * BAR_WIDTH as f64).round() as usize;
            CountsRow {
                bitstring: bitstring.to_string(),
                count,
                fraction,
                bar: "█".repeat(filled),
            }
        })
        .collect()
}
