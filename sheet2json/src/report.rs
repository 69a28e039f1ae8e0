//! Per-run outcome summary

use std::path::PathBuf;
use std::process::ExitCode;

use colored::*;

use crate::convert::ConvertError;
use crate::pipeline::Conversion;

/// A sheet that could not be converted
#[derive(Debug)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error: ConvertError,
}

impl std::fmt::Display for FileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.source.display(), self.error)
    }
}

/// Outcome of every file visited in a run
#[derive(Debug, Default)]
pub struct RunReport {
    pub converted: Vec<Conversion>,
    pub failures: Vec<FileFailure>,
    /// Set when the walk stopped early on a failure
    pub aborted: bool,
}

impl RunReport {
    pub fn record_success(&mut self, conversion: Conversion) {
        self.converted.push(conversion);
    }

    pub fn record_failure(&mut self, source: PathBuf, error: ConvertError) {
        self.failures.push(FileFailure { source, error });
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// One line per failure, then the totals
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .failures
            .iter()
            .map(|failure| format!("{} {}", "✗".red(), failure))
            .collect();

        if self.aborted {
            lines.push(format!(
                "{}",
                "Stopped after the first failure (--fail-fast)".yellow()
            ));
        }

        let converted = format!("{} converted", self.converted.len());
        let summary = if self.is_success() {
            converted.green().to_string()
        } else {
            format!(
                "{}, {}",
                converted,
                format!("{} failed", self.failures.len()).red().bold()
            )
        };
        lines.push(summary);
        lines
    }

    pub fn print_summary(&self) {
        for line in self.summary_lines() {
            println!("{}", line);
        }
    }
}
