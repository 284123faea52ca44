use super::load_archive;
use crate::{OutputFormat, csv_field};
use anyhow::Result;
use harview_core::analysis::{self, Summary};
use std::io::{self, Write};
use std::path::Path;

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Summarizing HAR file: {}", file.display());

    let archive = load_archive(file)?;
    let summary = analysis::summary(&archive)?;

    let mut out = io::stdout().lock();
    write_summary(&summary, format, &mut out)
}

pub fn write_summary<W: Write>(summary: &Summary, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(summary, out),
        OutputFormat::Table => output_table(summary, out),
        OutputFormat::Pretty => output_pretty(summary, out),
    }
}

fn output_pretty<W: Write>(summary: &Summary, out: &mut W) -> Result<()> {
    use console::style;

    writeln!(out, "\n{}", style("HAR Summary").bold().cyan())?;
    writeln!(out, "{}", style("===========").cyan())?;
    writeln!(out, "  Page Title:  {}", summary.page_title)?;
    writeln!(out, "  Requests:    {}", summary.entry_count)?;
    writeln!(out, "  Downloaded:  {} MB", summary.total_size_mb)?;
    writeln!(out, "  Load Time:   {} s", summary.load_time_seconds)?;
    writeln!(out)?;
    Ok(())
}

fn output_json<W: Write>(summary: &Summary, out: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

fn output_table<W: Write>(summary: &Summary, out: &mut W) -> Result<()> {
    writeln!(out, "Metric,Value")?;
    writeln!(out, "Page Title,{}", csv_field(&summary.page_title))?;
    writeln!(out, "Requests,{}", summary.entry_count)?;
    writeln!(out, "Downloaded (MB),{}", summary.total_size_mb)?;
    writeln!(out, "Load Time (s),{}", summary.load_time_seconds)?;
    Ok(())
}
