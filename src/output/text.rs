//! Human-readable report.
//!
//! Each duplicate group is printed as a small tree. The first member is the
//! suggested keeper (green); the others are highlighted for removal (red).
//! Totals follow, then a footer that is printed on every run.

use std::io::{self, Write};

use yansi::{Color, Paint, Style};

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// Footer shown after every report.
pub const VERIFICATION_NOTICE: &str = "Don't worry: all duplicate files have been verified using \
SHA-256 and you can be 100% confident that files detected as duplicates are identical.";

/// Presentation settings for [`TextReport`].
#[derive(Debug, Clone, Copy)]
pub struct ReportStyle {
    /// Emit ANSI color codes
    pub color: bool,
    /// Style for the file to keep
    pub keep: Style,
    /// Style for the files suggested for removal
    pub remove: Style,
    /// Style for advice lines
    pub tip: Style,
    /// Style for the verification footer
    pub notice: Style,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::colored()
    }
}

impl ReportStyle {
    /// Green keeper, red copies, blue tips, yellow footer.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            color: true,
            keep: Style::new().fg(Color::Green),
            remove: Style::new().fg(Color::Red),
            tip: Style::new().fg(Color::Blue),
            notice: Style::new().fg(Color::Yellow),
        }
    }

    /// No escape codes at all.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::colored()
        }
    }

    /// Colored when `enabled`, plain otherwise.
    #[must_use]
    pub fn for_terminal(enabled: bool) -> Self {
        if enabled {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.paint(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Text report over a finished scan.
pub struct TextReport<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
    style: ReportStyle,
}

impl<'a> TextReport<'a> {
    /// Create a report.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary, style: ReportStyle) -> Self {
        Self {
            groups,
            summary,
            style,
        }
    }

    /// Write the full report.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let style = &self.style;

        if self.summary.total_files == 0 {
            writeln!(out, "\nNo files found to scan.")?;
        } else if self.groups.is_empty() {
            writeln!(out, "\nNo duplicate files found.")?;
        } else {
            writeln!(out, "\nFound duplicate files (same content):\n")?;
            for group in self.groups {
                self.write_group(out, group)?;
            }
            writeln!(out, "Total duplicate groups: {}", self.summary.duplicate_groups)?;
            writeln!(out, "Total duplicated files: {}", self.summary.duplicate_files)?;
            writeln!(
                out,
                "Total wasted space: {}",
                format_size(self.summary.wasted_space)
            )?;
        }

        if !self.summary.skipped.is_empty() {
            writeln!(
                out,
                "\n{} file(s) could not be read and were left out of the comparison.",
                self.summary.skipped.len()
            )?;
        }

        writeln!(out)?;
        writeln!(out, "{}", style.paint(VERIFICATION_NOTICE, style.notice))?;
        Ok(())
    }

    fn write_group<W: Write>(&self, out: &mut W, group: &DuplicateGroup) -> io::Result<()> {
        let style = &self.style;
        let Some(keeper) = group.representative() else {
            return Ok(());
        };
        let keeper_name = keeper.file_name();

        writeln!(
            out,
            "📄 {} — identical content",
            style.paint(&format!("{} (x{})", keeper_name, group.len()), style.keep)
        )?;

        let last = group.len() - 1;
        for (i, file) in group.files.iter().enumerate() {
            let prefix = if i == last { "└─ " } else { "├─ " };
            let line_style = if i == 0 { style.keep } else { style.remove };
            writeln!(
                out,
                " {}{}",
                prefix,
                style.paint(&file.path.display().to_string(), line_style)
            )?;
        }

        let tip = format!(
            "Tip: keep only the file {keeper_name} and remove those highlighted in red."
        );
        writeln!(out, "{}", style.paint(&tip, style.tip))?;
        writeln!(out)?;
        Ok(())
    }
}

/// Format a byte size as a human-readable string.
///
/// Binary (1024) steps; whole bytes below 1 KB, two decimals above.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
