use super::LeaderboardReport;
use colored::*;
use std::fmt::Write;

pub fn render(report: &LeaderboardReport, color: bool) -> String {
    colored::control::set_override(color);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({})",
        "Leaderboard for".bold(),
        report.owner.bright_white().bold(),
        report.repos.join(", ")
    );
    let _ = writeln!(
        out,
        "Week starting {}",
        report.week_start.format("%A %Y-%m-%d %H:%M %Z")
    );
    let _ = writeln!(out);

    if report.standings.is_empty() {
        let _ = writeln!(out, "{}", "No commits yet this week.".yellow());
        colored::control::unset_override();
        return out;
    }

    let width = report
        .standings
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);

    for standing in &report.standings {
        let rank = format!("{:>3}.", standing.rank);
        let rank = match standing.rank {
            1 => rank.bright_yellow().bold(),
            2 => rank.white().bold(),
            3 => rank.yellow(),
            _ => rank.normal(),
        };
        let _ = writeln!(
            out,
            "{} {:<width$}  {:>4}  {}",
            rank,
            standing.name,
            standing.commits.to_string().bright_green(),
            standing.avatar.dimmed(),
            width = width
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} contributions from {} developers",
        report.total_contributions,
        report.standings.len()
    );

    colored::control::unset_override();
    out
}
