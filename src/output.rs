//! Report rendering and styling.
//!
//! The report is printed in two passes: cache-related operations first, then
//! moves and real changes followed by any lines that were not understood.
//! Colors go through the [`Highlighter`] trait so the layout can be produced
//! with or without terminal escapes.

use crate::moves::{Move, extract_moves};
use crate::record::{Delete, Plan, Upload};
use crate::s3_path::strip_bucket;
use colored::Colorize;
use serde::Deserialize;
use serde_json::{Value, json};
use std::io::{self, Write};

/// Separator printed after each category.
pub const SEPARATOR: &str = "---";

/// What a piece of highlighted text stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Cache churn, shown dimmed.
    Cache,
    /// A real delete.
    Delete,
    /// A real upload.
    New,
    /// Directories of a detected move.
    Move,
}

/// Turns text into its displayed form for a given tone.
pub trait Highlighter {
    fn highlight(&self, tone: Tone, text: &str) -> String;
}

/// Terminal colors via `colored`.
///
/// Whether escapes are actually emitted follows `colored`'s global control,
/// see [`ColorMode::highlighter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorHighlighter;

impl Highlighter for ColorHighlighter {
    fn highlight(&self, tone: Tone, text: &str) -> String {
        let styled = match tone {
            Tone::Cache => text.blue(),
            Tone::Delete => text.bright_red(),
            Tone::New => text.green(),
            Tone::Move => text.yellow(),
        };
        styled.to_string()
    }
}

/// Passes text through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _tone: Tone, text: &str) -> String {
        text.to_string()
    }
}

/// When to emit color escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Always color, even when stdout is not a terminal.
    #[default]
    Always,
    /// Let `colored` decide from the terminal and environment.
    Auto,
    /// Never color.
    Never,
}

impl ColorMode {
    /// Configures `colored` for this mode and returns the matching highlighter.
    pub fn highlighter(self) -> Box<dyn Highlighter> {
        match self {
            ColorMode::Always => {
                colored::control::set_override(true);
                Box::new(ColorHighlighter)
            }
            ColorMode::Auto => {
                colored::control::unset_override();
                Box::new(ColorHighlighter)
            }
            ColorMode::Never => Box::new(PlainHighlighter),
        }
    }
}

/// Everything the renderer needs, after move extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub moves: Vec<Move>,
    pub deletes: Vec<Delete>,
    pub uploads: Vec<Upload>,
    pub unrecognized: Vec<String>,
}

impl Report {
    /// Extracts moves from a classified plan.
    pub fn from_plan(plan: Plan) -> Self {
        let extraction = extract_moves(&plan.deletes, &plan.uploads);
        Self {
            moves: extraction.moves,
            deletes: extraction.deletes,
            uploads: extraction.uploads,
            unrecognized: plan.unrecognized,
        }
    }
}

/// Writes one category of the report.
///
/// With `cache` set, only cache-related deletes and uploads are printed.
/// Otherwise moves come first, then the remaining real deletes and uploads,
/// and the unrecognized lines after the separator.
pub fn render_category<W, H>(out: &mut W, report: &Report, cache: bool, hl: &H) -> io::Result<()>
where
    W: Write + ?Sized,
    H: Highlighter + ?Sized,
{
    if !cache {
        for m in &report.moves {
            writeln!(out, "{}", format_move(m, hl))?;
        }
    }
    for d in report.deletes.iter().filter(|d| d.is_cache_related == cache) {
        let tone = if cache { Tone::Cache } else { Tone::Delete };
        writeln!(out, "DELETE: {}", hl.highlight(tone, strip_bucket(&d.remote_path)))?;
    }
    for u in report.uploads.iter().filter(|u| u.is_cache_related == cache) {
        let tone = if cache { Tone::Cache } else { Tone::New };
        writeln!(out, "NEW: {}", hl.highlight(tone, strip_bucket(&u.remote_path)))?;
    }
    writeln!(out, "{}", SEPARATOR)?;
    if !cache {
        for line in &report.unrecognized {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Writes the cache category, then everything else.
pub fn render_report<W, H>(out: &mut W, report: &Report, hl: &H) -> io::Result<()>
where
    W: Write + ?Sized,
    H: Highlighter + ?Sized,
{
    render_category(out, report, true, hl)?;
    render_category(out, report, false, hl)
}

fn format_move<H: Highlighter + ?Sized>(m: &Move, hl: &H) -> String {
    format!(
        "{{{} -> {}}}/{}",
        hl.highlight(Tone::Move, strip_bucket(&m.from_dir)),
        hl.highlight(Tone::Move, strip_bucket(&m.to_dir)),
        m.file_name
    )
}

/// Builds the JSON form of a report, with the same category split as the
/// text output and bucket-stripped paths.
pub fn report_json(report: &Report) -> Value {
    let deletes = |cache: bool| {
        report
            .deletes
            .iter()
            .filter(|d| d.is_cache_related == cache)
            .map(|d| strip_bucket(&d.remote_path))
            .collect::<Vec<_>>()
    };
    let uploads = |cache: bool| {
        report
            .uploads
            .iter()
            .filter(|u| u.is_cache_related == cache)
            .map(|u| {
                json!({
                    "local_path": u.local_path,
                    "remote_path": strip_bucket(&u.remote_path),
                })
            })
            .collect::<Vec<_>>()
    };
    let moves: Vec<Value> = report
        .moves
        .iter()
        .map(|m| {
            json!({
                "file_name": m.file_name,
                "from": strip_bucket(&m.from_dir),
                "to": strip_bucket(&m.to_dir),
            })
        })
        .collect();

    json!({
        "cache": {
            "deletes": deletes(true),
            "uploads": uploads(true),
        },
        "changes": {
            "moves": moves,
            "deletes": deletes(false),
            "uploads": uploads(false),
        },
        "unrecognized": report.unrecognized,
    })
}

/// Writes [`report_json`] pretty-printed, followed by a newline.
pub fn render_json<W>(out: &mut W, report: &Report) -> Result<(), serde_json::Error>
where
    W: Write + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, &report_json(report))?;
    writeln!(out).map_err(serde_json::Error::io)
}
