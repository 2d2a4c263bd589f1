//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support. When
//! the source text is attached, every label is shown under the line it
//! points at:
//!
//! ```text
//! error[E1001]: missing semicolon
//!   --> main.bc:1:10
//!    |
//!  1 | int x = 5
//!    |          ^ expected `;`
//!    = hint: int x = 5
//! ```

use std::io::{self, Write};

use bc_ir::Position;

use crate::{Diagnostic, Label};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of a `--color=` flag.
    pub fn from_flag(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// The file a diagnostic's positions refer to.
#[derive(Clone, Copy, Debug)]
struct SourceFile<'a> {
    path: &'a str,
    text: &'a str,
}

impl<'a> SourceFile<'a> {
    fn line(&self, position: Position) -> Option<&'a str> {
        let index = usize::try_from(position.line).ok()?.checked_sub(1)?;
        self.text.lines().nth(index)
    }
}

/// Terminal emitter with optional color and source snippets.
///
/// Write errors are ignored: diagnostics are best-effort output.
pub struct TerminalEmitter<'a, W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceFile<'a>>,
}

impl<'a, W: Write> TerminalEmitter<'a, W> {
    /// Create a terminal emitter with explicit color mode.
    ///
    /// `is_tty` says whether `writer` is a terminal; used for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Show source lines under labels. `path` is printed in `-->` lines.
    #[must_use]
    pub fn with_source(mut self, path: &'a str, text: &'a str) -> Self {
        self.source = Some(SourceFile { path, text });
        self
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, diagnostic: &Diagnostic) {
        self.write_colored("error", colors::ERROR);
        let code = format!("[{}]", diagnostic.code);
        self.write_colored(&code, colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);
    }

    fn write_label(&mut self, label: &Label, gutter: usize) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let Some(source) = self.source else {
            let _ = write!(self.writer, "{:gutter$}{marker} {:?}: ", "", label.position);
            self.write_message(label);
            let _ = writeln!(self.writer);
            return;
        };

        let _ = writeln!(
            self.writer,
            "{:gutter$}{marker} {}:{}:{}",
            "", source.path, label.position.line, label.position.column
        );
        let Some(line) = source.line(label.position) else {
            let _ = write!(self.writer, "{:gutter$} = ", "");
            self.write_message(label);
            let _ = writeln!(self.writer);
            return;
        };

        self.write_gutter(gutter, None);
        let _ = writeln!(self.writer);
        self.write_gutter(gutter, Some(label.position.line));
        let _ = writeln!(self.writer, " {line}");
        self.write_gutter(gutter, None);
        let offset = label.position.column.saturating_sub(1) as usize;
        let _ = write!(self.writer, " {:offset$}", "");
        let caret = if label.is_primary { "^" } else { "-" };
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::GUTTER
        };
        self.write_colored(caret, color);
        if !label.message.is_empty() {
            let _ = write!(self.writer, " ");
            self.write_message(label);
        }
        let _ = writeln!(self.writer);
    }

    fn write_message(&mut self, label: &Label) {
        if label.is_primary {
            self.write_colored(&label.message, colors::ERROR);
        } else {
            self.write_colored(&label.message, colors::GUTTER);
        }
    }

    /// ` 12 |` or `    |`, right-aligned to `width`.
    fn write_gutter(&mut self, width: usize, line: Option<u32>) {
        let number = line.map(|n| n.to_string()).unwrap_or_default();
        let gutter = format!("{number:>width$} |");
        self.write_colored(&gutter, colors::GUTTER);
    }

    fn write_trailer(&mut self, kind: &str, text: &str, gutter: usize) {
        let _ = write!(self.writer, "{:gutter$} = ", "");
        self.write_colored(kind, colors::BOLD);
        let _ = writeln!(self.writer, ": {text}");
    }

    /// Emit a single diagnostic.
    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_header(diagnostic);

        let widest = diagnostic
            .labels
            .iter()
            .map(|label| label.position.line.to_string().len())
            .max()
            .unwrap_or(1);
        let gutter = widest + 1;

        for label in &diagnostic.labels {
            self.write_label(label, gutter);
        }
        for hint in &diagnostic.hints {
            self.write_trailer("hint", hint, gutter);
        }
        for note in &diagnostic.notes {
            self.write_trailer("note", note, gutter);
        }

        let _ = writeln!(self.writer);
    }

    /// Emit multiple diagnostics.
    pub fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    /// Emit the "aborting" line. Nothing is written for zero errors.
    pub fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        if error_count == 1 {
            let _ = writeln!(self.writer, ": aborting due to previous error");
        } else {
            let _ = writeln!(self.writer, ": aborting due to {error_count} previous errors");
        }
    }

    /// Emit every diagnostic followed by the summary, then flush.
    pub fn emit_report(&mut self, diagnostics: &[Diagnostic]) {
        self.emit_all(diagnostics);
        self.emit_summary(diagnostics.len());
        self.flush();
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

#[cfg(test)]
mod tests;
