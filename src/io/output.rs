use crate::report::FixReport;
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &FixReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &FixReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &FixReport) -> anyhow::Result<()> {
        self.write_files(report)?;
        self.write_failures(report)?;
        self.write_summary(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_files(&mut self, report: &FixReport) -> anyhow::Result<()> {
        for file in &report.files {
            writeln!(self.writer, "{}", file.path.display().to_string().bold())?;
            for removal in &file.removals {
                writeln!(
                    self.writer,
                    "  {:>5}  {}  {}",
                    removal.line.to_string().dimmed(),
                    removal.callable,
                    removal.tag.to_string().yellow()
                )?;
            }
        }
        Ok(())
    }

    fn write_failures(&mut self, report: &FixReport) -> anyhow::Result<()> {
        for failure in &report.failures {
            writeln!(
                self.writer,
                "{} {}: {}",
                "skipped".red(),
                failure.path.display(),
                failure.message
            )?;
        }
        Ok(())
    }

    fn write_summary(&mut self, report: &FixReport) -> anyhow::Result<()> {
        if !report.files.is_empty() || report.has_failures() {
            writeln!(self.writer)?;
        }

        let verb = if report.dry_run {
            "Would remove"
        } else {
            "Removed"
        };
        let count = report.total_removals();
        let count_display = if count == 0 {
            count.to_string().green()
        } else {
            count.to_string().yellow()
        };

        writeln!(
            self.writer,
            "{verb} {count_display} redundant annotation(s) in {} of {} file(s) ({} empty doc block(s) dropped)",
            report.files_changed(),
            report.files_scanned,
            report.total_removed_docblocks()
        )?;
        Ok(())
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout())),
    }
}
