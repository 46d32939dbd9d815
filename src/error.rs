use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

/// Byte range into the source, used for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

/// Human-readable source position. Lines and positions are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line: {} Position: {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "Lexical Error",
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Runtime => "Runtime Error",
        };
        write!(f, "{}", name)
    }
}

/// The single error type of the interpreter. Every stage fails fast with one of these.
#[derive(Debug, Clone, Error)]
#[error("{message} {location}")]
pub struct TallyError {
    pub kind: ErrorKind,
    pub location: Location,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl TallyError {
    pub fn new(kind: ErrorKind, location: Location, span: Span, message: String) -> Self {
        Self {
            kind,
            location,
            span,
            message,
            help: None,
        }
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn lexical(location: Location, span: Span, message: String) -> Self {
        Self::new(ErrorKind::Lexical, location, span, message)
    }

    pub fn syntax(location: Location, span: Span, message: String) -> Self {
        Self::new(ErrorKind::Syntax, location, span, message)
    }

    pub fn syntax_with_help(location: Location, span: Span, message: String, help: String) -> Self {
        Self::syntax(location, span, message).with_help(help)
    }

    pub fn runtime(location: Location, span: Span, message: String) -> Self {
        Self::new(ErrorKind::Runtime, location, span, message)
    }

    pub fn runtime_with_help(location: Location, span: Span, message: String, help: String) -> Self {
        Self::runtime(location, span, message).with_help(help)
    }

    pub fn is_lexical(&self) -> bool {
        self.kind == ErrorKind::Lexical
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ErrorKind::Syntax
    }

    pub fn is_runtime(&self) -> bool {
        self.kind == ErrorKind::Runtime
    }

    /// Prints a source-annotated diagnostic to stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) -> std::io::Result<()> {
        let filename = filename.unwrap_or("<repl>");

        let color = match self.kind {
            ErrorKind::Lexical => Color::Red,
            ErrorKind::Syntax => Color::Yellow,
            ErrorKind::Runtime => Color::Magenta,
        };

        // Errors at end of input point one past the last byte.
        let end = self.span.end.min(source.len().max(1));
        let start = self.span.start.min(end.saturating_sub(1));

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(format!(
                "{}: {} ({})",
                self.kind.fg(color),
                self.message,
                self.location
            ))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
