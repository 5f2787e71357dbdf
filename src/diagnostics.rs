//! Collection and rendering of compiler errors.
use std::fmt::Write;

use crate::{
    error::{Category, CompileError, PositionalError},
    location::Location,
    source_map::find_line,
};

/// A single reported error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub location: Location,
    pub category: Category,
}

/// Collects errors for a single source text, and renders them with their source context.
pub struct Diagnostics<'a> {
    source: &'a str,
    entries: Vec<Diagnostic>,
}

impl<'a> Diagnostics<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            entries: vec![],
        }
    }

    pub fn add<S: Into<String>>(&mut self, message: S, location: Location, category: Category) {
        self.entries.push(Diagnostic {
            message: message.into(),
            location,
            category,
        });
    }

    /// Records a compiler error, using its own category and location.
    pub fn push(&mut self, error: &CompileError) {
        self.add(error.describe(), error.location(), error.category());
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Renders all errors, ordered by their location in the source.
    pub fn report(&self) -> String {
        if self.entries.is_empty() {
            return "No errors found.".to_string();
        }

        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|entry| entry.location);

        let mut report = String::new();
        for (idx, entry) in entries.into_iter().enumerate() {
            if idx > 0 {
                report.push('\n');
            }
            self.describe(entry, &mut report);
        }
        report
    }

    fn describe(&self, entry: &Diagnostic, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{} error at {}: {}",
            entry.category, entry.location, entry.message
        );

        if entry.location.is_unknown() {
            return;
        }
        if let Some(line) = find_line(self.source, entry.location.line()) {
            let gutter = line.line_no().to_string();
            let _ = writeln!(out, "{}| {}", gutter, line.for_display());
            let _ = writeln!(
                out,
                "{}| {}^",
                " ".repeat(gutter.len()),
                line.padding_to(entry.location.column())
            );
        }
    }
}
