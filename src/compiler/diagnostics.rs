use std::fmt;
use std::slice::Iter;

use strum_macros::Display;
use tracing::debug;

/// Kinds of non-fatal problems the front end can report.
/// None of these halt processing; the caller decides whether to abort the compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DiagnosticKind {
    /// A symbol was declared twice. The second declaration is discarded.
    #[strum(to_string = "already-declared")]
    AlreadyDeclared,

    /// add_statement was called on a node that is not a Program or Block.
    #[strum(to_string = "invalid-statement-container")]
    InvalidStatementContainer,

    /// node_to_block was called on a node that is not a Program.
    #[strum(to_string = "invalid-block-conversion")]
    InvalidBlockConversion,

    /// An identifier was used before any declaration of it.
    #[strum(to_string = "undeclared-identifier")]
    UndeclaredIdentifier
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: String) -> Self {
        Self {
            kind,
            message
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.kind, self.message)
    }
}

/// DiagnosticSink is the reporting channel handed to every fallible front end operation.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    /// Number of diagnostics reported to this sink so far.
    fn reported(&self) -> usize;
}

/// Diagnostics collects every reported diagnostic in order so it can be inspected afterwards.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    collected: Vec<Diagnostic>
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn iter(&self) -> Iter<'_, Diagnostic> {
        self.collected.iter()
    }

    /// Count of collected diagnostics of a single kind
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.collected.iter()
            .filter(|diagnostic| diagnostic.kind == kind)
            .count()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        // Printing is left to whoever drains the collection
        debug!(kind = %diagnostic.kind, "{}", diagnostic.message);
        self.collected.push(diagnostic);
    }

    fn reported(&self) -> usize {
        self.collected.len()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.collected.iter()
    }
}

/// StderrSink writes each diagnostic to the standard error stream as soon as it is reported.
#[derive(Debug, Default)]
pub struct StderrSink {
    reported: usize
}

impl StderrSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for StderrSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        eprintln!("{}", diagnostic);
        self.reported += 1;
    }

    fn reported(&self) -> usize {
        self.reported
    }
}
