use super::*;
use anyhow::Result;
use std::fs;
use std::io::IsTerminal;
use tracing::info;

pub struct Reporter {
    format: OutputFormat,
    output_path: Option<String>,
}

impl Reporter {
    /// Writes to `output_path` when given, stdout otherwise.
    pub fn new(format: &str, output_path: Option<&str>) -> Self {
        let format = OutputFormat::from(format);
        let output_path = output_path.map(|path| super::add_file_extension(path, &format));

        Self {
            format,
            output_path,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn render(&self, report: &LeaderboardReport) -> Result<String> {
        let content = match self.format {
            OutputFormat::Table => {
                let color = self.output_path.is_none() && std::io::stdout().is_terminal();
                table::render(report, color)
            }
            OutputFormat::Json => serde_json::to_string_pretty(report)?,
        };
        Ok(content)
    }

    pub fn generate_report(&self, report: &LeaderboardReport) -> Result<()> {
        let content = self.render(report)?;

        match &self.output_path {
            Some(path) => {
                fs::write(path, content)?;
                info!("Leaderboard saved to {}", path);
            }
            None => print!("{}", content),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Developer;
    use crate::league::Leaderboard;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn sample_report() -> LeaderboardReport {
        let leaderboard: Leaderboard = [
            (Developer::new("Bob B", "https://a/bob"), 2usize),
            (Developer::new("carol@x.com", ""), 1),
        ]
        .into_iter()
        .collect::<HashMap<_, _>>()
        .into();
        let week_start = Local.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).earliest().unwrap();
        LeaderboardReport::new("acme", &["api".to_string(), "web".to_string()], week_start, &leaderboard)
    }

    #[test]
    fn unknown_format_falls_back_to_table() {
        assert_eq!(Reporter::new("yaml", None).format(), OutputFormat::Table);
        assert_eq!(Reporter::new("JSON", None).format(), OutputFormat::Json);
    }

    #[test]
    fn json_report_lists_ranked_standings() {
        let json = Reporter::new("json", None).render(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["owner"], "acme");
        assert_eq!(value["total_contributions"], 3);
        assert_eq!(value["standings"][0]["name"], "Bob B");
        assert_eq!(value["standings"][0]["commits"], 2);
        assert_eq!(value["standings"][1]["rank"], 2);
        assert_eq!(value["standings"][1]["avatar"], "");
    }

    #[test]
    fn writes_report_file_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("league");
        let reporter = Reporter::new("json", base.to_str());

        reporter.generate_report(&sample_report()).unwrap();

        let written = fs::read_to_string(dir.path().join("league.json")).unwrap();
        assert!(written.contains("\"Bob B\""));
    }
}
