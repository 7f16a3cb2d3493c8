//! Line-oriented stand-in for the activity form.
//!
//! Each line is `name;grade`. The whole table and the final average are
//! printed again after every accepted line.

use crate::core::evaluator;
use crate::core::render;
use crate::core::session::Session;
use crate::domain::model::Threshold;
use crate::utils::error::{GradeError, Result};
use std::io::{BufRead, Write};

const QUIT: &str = ":q";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStats {
    pub accepted: usize,
    pub rejected: usize,
}

/// Asks for the passing threshold once, re-prompting on bad input.
pub fn read_threshold<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<Threshold> {
    loop {
        write!(writer, "Minimum passing grade: ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(GradeError::MissingConfigError {
                field: "threshold".to_string(),
            });
        }

        match evaluator::parse_threshold(&line) {
            Ok(threshold) => return Ok(threshold),
            Err(e) => {
                tracing::debug!("Threshold rejected: {}", e);
                writeln!(writer, "{}", e.user_friendly_message())?;
            }
        }
    }
}

fn split_line(line: &str) -> (&str, &str) {
    match line.split_once(';') {
        Some((name, grade)) => (name.trim(), grade.trim()),
        None => (line.trim(), ""),
    }
}

pub fn run_console<R: BufRead, W: Write>(
    session: &mut Session,
    reader: &mut R,
    writer: &mut W,
) -> Result<ConsoleStats> {
    let mut stats = ConsoleStats::default();

    writeln!(
        writer,
        "Passing grade: {}. Enter 'activity;grade' (empty line or {} to finish).",
        session.threshold(),
        QUIT
    )?;
    writeln!(writer, "{}", render::render_summary_line(&session.view().summary))?;

    loop {
        write!(writer, "> ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.trim().is_empty() || line.trim() == QUIT {
            break;
        }

        let (name, grade) = split_line(line);
        match session.submit(name, grade) {
            Ok(view) => {
                stats.accepted += 1;
                writeln!(writer, "{}", render::render_table(&view.rows))?;
                writeln!(writer, "{}", render::render_summary_line(&view.summary))?;
            }
            Err(e) if e.is_rejection() => {
                stats.rejected += 1;
                tracing::warn!("Rejected '{}': {}", line, e);
                writeln!(
                    writer,
                    "✗ {} ({})",
                    e.user_friendly_message(),
                    e.recovery_suggestion()
                )?;
                writeln!(writer, "  your input: {}", line)?;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(
        "Console finished: {} accepted, {} rejected",
        stats.accepted,
        stats.rejected
    );
    Ok(stats)
}
