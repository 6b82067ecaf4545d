// Colored terminal output for recommendations, training summaries and
// evaluation reports.
//
// This module handles all terminal-specific formatting: colors and tables.
// The main.rs commands delegate here.

use colored::Colorize;

use crate::evaluation::{ArchiveReport, EvalCounts};
use crate::scoring::engine::Recommendation;
use crate::session::TrainingSession;

use super::{format_ratio, truncate_chars};

/// Display the ranked reviewers for one query.
pub fn display_recommendations(recommendations: &[Recommendation], contributor_known: bool) {
    if recommendations.is_empty() {
        println!("No reviewers to recommend. The training corpus has no authors.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recommended Reviewers (top {}) ===", recommendations.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<32} {:>8}",
        "Rank".dimmed(),
        "Author".dimmed(),
        "Score".dimmed(),
    );
    println!("  {}", "-".repeat(48).dimmed());

    for (i, rec) in recommendations.iter().enumerate() {
        let score = format!("{:>8.3}", rec.score);
        let score = if rec.score > 0.0 {
            score.green()
        } else {
            score.dimmed()
        };
        println!(
            "  {:>4}. {:<32} {}",
            i + 1,
            truncate_chars(&rec.author, 30),
            score
        );
    }
    println!();

    if !contributor_known {
        println!(
            "  {}",
            "Contributor not seen in training data: network scores were not applied.".yellow()
        );
    }
}

/// Display what a training run produced.
pub fn display_training_summary(session: &TrainingSession, strongest: usize) {
    let report = session.report();

    println!("\n{}", "=== Training Summary ===".bold());
    println!("  Submission records:   {}", report.records);
    println!("  Retained:             {}", report.retained);
    if report.degenerate > 0 {
        println!(
            "  Skipped (degenerate): {}",
            report.degenerate.to_string().yellow()
        );
    }
    if report.integrity_errors > 0 {
        println!(
            "  Integrity errors:     {}",
            report.integrity_errors.to_string().red()
        );
    }
    println!("  Authors:              {}", session.registry().len());
    println!("  Vocabulary size:      {}", session.vocabulary().len());

    if let Some(window) = session.window() {
        println!(
            "  Time window:          {} .. {}",
            format_epoch(window.baseline()),
            format_epoch(window.deadline())
        );
    }

    let relations = session.relations().strongest(strongest);
    if relations.is_empty() {
        println!("\n  {}", "No co-authored submissions: the network is empty.".dimmed());
        return;
    }

    println!("\n  Strongest relations:");
    let registry = session.registry();
    for (from, to, score) in relations {
        println!(
            "    {:<24} -> {:<24} {:.3}",
            truncate_chars(registry.name(from), 22),
            truncate_chars(registry.name(to), 22),
            score
        );
    }
}

fn format_epoch(secs: f64) -> String {
    chrono::DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| format!("{secs}"))
}

/// Display per-project precision/recall plus the pooled totals.
pub fn display_archive_report(report: &ArchiveReport) {
    if report.projects.is_empty() && report.failed.is_empty() {
        println!("No projects found. Each project needs training_data.csv and testing_data.csv.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Evaluation ({} projects) ===", report.projects.len()).bold()
    );
    println!();
    println!(
        "  {:<36} {:>7} {:>10} {:>8}",
        "Project".dimmed(),
        "Scored".dimmed(),
        "Precision".dimmed(),
        "Recall".dimmed(),
    );
    println!("  {}", "-".repeat(64).dimmed());

    for project in &report.projects {
        print_counts_row(&truncate_chars(&project.name, 33), &project.counts);
    }

    println!("  {}", "-".repeat(64).dimmed());
    print_counts_row("All projects", &report.total);

    if !report.failed.is_empty() {
        println!("\n  {} {} projects failed:", "!".red().bold(), report.failed.len());
        for failed in &report.failed {
            println!("    {:<32} {}", failed.name, failed.error.dimmed());
        }
    }
    println!();
}

fn print_counts_row(label: &str, counts: &EvalCounts) {
    println!(
        "  {:<36} {:>7} {:>10} {:>8}",
        label,
        counts.scored,
        format_ratio(counts.precision()),
        format_ratio(counts.recall()),
    );
}
