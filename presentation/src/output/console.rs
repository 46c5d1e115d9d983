//! Console output formatter for evaluation reports

use colored::Colorize;
use judge_application::LeaderboardEntry;
use judge_domain::{OutputFormat, Report};

/// Formats reports and leaderboards for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a report in the requested format
    pub fn render(report: &Report, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format(report),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    /// Format the report as a scorecard
    pub fn format(report: &Report) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Evaluation Report"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Repository:".cyan().bold(),
            report.repository()
        ));

        for detail in report.details() {
            output.push_str(&Self::section_header(&format!(
                "{}  {}",
                detail.category,
                detail.score.to_string().yellow().bold()
            )));
            output.push_str(&Self::indent(&detail.feedback, "  "));
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Total Score:".green().bold(),
            report.total_score().to_string().bold()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &Report) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format leaderboard rows, best first
    pub fn format_leaderboard(entries: &[LeaderboardEntry]) -> String {
        if entries.is_empty() {
            return "No submissions recorded yet.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&Self::header("Leaderboard"));
        output.push('\n');

        for (rank, entry) in entries.iter().enumerate() {
            let team = entry.team_name.as_deref().unwrap_or("-");
            output.push_str(&format!(
                "{:>3}. {:>4}  {:<24} {}\n",
                rank + 1,
                entry.total_score.to_string().yellow().bold(),
                team,
                entry.github_url
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format leaderboard rows as JSON
    pub fn format_leaderboard_json(entries: &[LeaderboardEntry]) -> String {
        serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
