//! Display functions for command results

use super::formatters::{create_progress_bar, format_duration, percent};
use crate::commands::{BatchReport, BuildConfig, OracleReport, TreeReport};
use crate::oracle::ScoreSource;
use crate::tree::{MAX_GUESSES, NodeStats};
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

/// Print where the score table came from
pub fn print_oracle_report(report: &OracleReport) {
    match &report.source {
        None => println!("{} grading on demand", "Scores:".bright_cyan().bold()),
        Some(ScoreSource::Loaded) => println!(
            "{} loaded in {}",
            "Scores:".bright_cyan().bold(),
            format_duration(report.elapsed)
        ),
        Some(ScoreSource::Computed { reason }) => {
            if let Some(reason) = reason {
                println!("{} {}", "⚠".yellow(), reason.to_string().yellow());
                if !reason.is_missing() {
                    println!("   existing table left unchanged");
                }
            }
            println!(
                "{} computed in {}",
                "Scores:".bright_cyan().bold(),
                format_duration(report.elapsed)
            );
        }
    }
    if let Some(path) = &report.saved {
        println!("   saved to {}", path.display());
    }
}

/// Print the outcome of a score table rebuild
pub fn print_scores_written(path: &Path, solutions: usize, guesses: usize, elapsed: Duration) {
    println!(
        "{} {} x {} grades written to {} in {}",
        "✅".green(),
        solutions,
        guesses,
        path.display(),
        format_duration(elapsed)
    );
}

/// Print every tree of a batch, then the failures
///
/// Unsaved trees are printed in full in their persisted format.
pub fn print_batch_report(report: &BatchReport, config: &BuildConfig) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "STRATEGY TREES".bright_cyan().bold(),
        format!("({})", config.heuristic).bright_black()
    );
    println!("{}", "═".repeat(60).cyan());

    for built in &report.built {
        let summary = built.stats.summary();
        println!(
            "\n{} {}  avg {}  worst {}  {}",
            "▶".green(),
            built.word.to_uppercase().bright_yellow().bold(),
            format!("{:.4}", summary.average).bright_yellow(),
            worst_case_label(summary.worst_case),
            format_duration(built.elapsed).bright_black()
        );
        if let Some(path) = &built.path {
            println!("  saved to {}", path.display());
        } else {
            match built.tree.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => println!("  {}", e.to_string().red()),
            }
        }
    }

    if !report.failed.is_empty() {
        println!("\n{}", "Failed:".red().bold());
        for failure in &report.failed {
            println!("  {} {}", failure.word.to_uppercase().red(), failure.error);
        }
    }

    println!(
        "\n{} built, {} failed in {}",
        report.built.len().to_string().green().bold(),
        report.failed.len().to_string().red(),
        format_duration(report.total_time)
    );
}

/// Print the quality report of a saved tree
pub fn print_tree_report(report: &TreeReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "TREE ANALYSIS:".bright_cyan().bold(),
        report.opening.to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());
    println!("   File:       {}", report.path.display());

    if report.complete {
        println!("   Coverage:   {}", "every solution".green());
    } else {
        println!(
            "   Coverage:   {}",
            "does not match the solution list".red().bold()
        );
    }

    print_stats(&report.stats);
}

/// Print summary figures and the move histogram
pub fn print_stats(stats: &NodeStats) {
    let summary = stats.summary();

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Solutions:        {}", summary.solutions);
    println!(
        "   Average guesses:  {}",
        format!("{:.4}", summary.average).bright_yellow().bold()
    );
    println!("   Worst case:       {}", worst_case_label(summary.worst_case));
    println!(
        "   Within {MAX_GUESSES}:         {}/{}",
        summary.within_budget, summary.solutions
    );

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (moves, &count) in stats.histogram.iter().enumerate().skip(1) {
        let pct = percent(count, summary.solutions);
        let bar = create_progress_bar(pct, 100.0, 40);
        let bar = if moves > MAX_GUESSES {
            bar.red()
        } else {
            bar.green()
        };
        println!("   {moves}: {bar} {count:5} ({pct:5.1}%)");
    }
}

fn worst_case_label(worst: usize) -> colored::ColoredString {
    if worst > MAX_GUESSES {
        worst.to_string().red().bold()
    } else {
        worst.to_string().green()
    }
}
