//! Human readable reports for export runs and configuration commands.

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::config::{AddOutcome, IconSet, IgnoreList, RemoveOutcome};
use crate::export::{ExportResult, FormatRegistry};

fn heading<W: WriteColor>(out: &mut W, color: Color, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    writeln!(out, "{}", text)?;
    out.reset()
}

fn bullets<W: Write>(out: &mut W, marker: &str, items: &[String]) -> io::Result<()> {
    for item in items {
        writeln!(out, "{} {}", marker, item)?;
    }
    Ok(())
}

/// Printed before the pipeline starts.
pub fn write_export_banner<W: WriteColor>(out: &mut W) -> io::Result<()> {
    writeln!(out, "📤 Creating exports...")
}

pub fn write_export_results<W: WriteColor>(out: &mut W, result: &ExportResult) -> io::Result<()> {
    writeln!(out, "\nExport Results:\n")?;

    if !result.completed.is_empty() {
        heading(out, Color::Green, "✅ Completed:")?;
        for artifact in &result.completed {
            writeln!(out, "  - {}", artifact)?;
        }
    }

    if !result.failed.is_empty() {
        if !result.completed.is_empty() {
            writeln!(out)?;
        }
        heading(out, Color::Red, "❌ Failed:")?;
        for failed in &result.failed {
            writeln!(out, "  - {}: {}", failed.artifact, failed.error)?;
        }
    }

    if let Some(message) = &result.shared_dependency_error {
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(out, "{}", message)?;
        out.reset()?;
    }

    if result.is_empty() {
        writeln!(out, "ℹ️  No exports were processed.")?;
    }
    Ok(())
}

pub fn write_ignored_list<W: WriteColor>(out: &mut W, list: &IgnoreList) -> io::Result<()> {
    heading(out, Color::Cyan, "🛑 Ignored file and folder names:")?;
    bullets(out, "-", list.names())
}

pub fn write_add_outcome<W: WriteColor>(out: &mut W, outcome: &AddOutcome) -> io::Result<()> {
    if !outcome.added.is_empty() {
        heading(out, Color::Green, "✅ Added to ignored list:")?;
        bullets(out, "+", &outcome.added)?;
    }
    if !outcome.already_present.is_empty() {
        heading(out, Color::Yellow, "⚠️  Already in ignored list (skipped):")?;
        bullets(out, "•", &outcome.already_present)?;
    }
    if outcome.added.is_empty() && outcome.already_present.is_empty() {
        writeln!(out, "ℹ️  No names provided to add.")?;
    }
    Ok(())
}

pub fn write_remove_outcome<W: WriteColor>(out: &mut W, outcome: &RemoveOutcome) -> io::Result<()> {
    if !outcome.removed.is_empty() {
        heading(out, Color::Green, "✅ Removed from ignored list:")?;
        bullets(out, "-", &outcome.removed)?;
    }
    if !outcome.not_found.is_empty() {
        heading(
            out,
            Color::Yellow,
            "⚠️  These names were not found in the ignored list:",
        )?;
        bullets(out, "•", &outcome.not_found)?;
    }
    if outcome.removed.is_empty() && outcome.not_found.is_empty() {
        writeln!(out, "ℹ️  No names provided to remove.")?;
    }
    Ok(())
}

pub fn write_icons<W: WriteColor>(out: &mut W, icons: &IconSet) -> io::Result<()> {
    heading(out, Color::Cyan, "Current icon configuration:")?;
    writeln!(out)?;
    for (kind, symbol) in icons.entries() {
        writeln!(out, "{} {}", symbol, kind)?;
    }
    Ok(())
}

pub fn write_icon_updated<W: WriteColor>(
    out: &mut W,
    kind: &str,
    old: &str,
    new: &str,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "✅ Updated {} icon: {} → {}", kind, old, new)?;
    out.reset()
}

pub fn write_icons_restored<W: WriteColor>(out: &mut W) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "✅ All icons restored to default configuration")?;
    out.reset()
}

/// One line per registered format: identifier, extension and description.
pub fn write_formats<W: WriteColor>(out: &mut W, registry: &FormatRegistry) -> io::Result<()> {
    heading(out, Color::Cyan, "Supported export formats:")?;
    let width = registry.identifiers().iter().map(|id| id.len()).max().unwrap_or(0);
    for descriptor in registry.descriptors() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "  {:<width$}", descriptor.id, width = width)?;
        out.reset()?;
        writeln!(out, "  .{:<5} {}", descriptor.extension, descriptor.description)?;
    }
    Ok(())
}
