//! Diagnostics: reporting what the engine had to skip.
//!
//! Nothing here affects control flow. The visitor reports a node it cannot
//! handle and moves on; a [`DiagnosticSink`] decides what to do with it.

use std::sync::Arc;

use smol_str::SmolStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::base::{FileId, LineCol, Source};
use crate::syntax::SyntaxNode;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Why a subtree contributed nothing to the documentation AST.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorKind {
    /// A kind absent from every dispatch table.
    UnsupportedNodeKind,
    /// An error or missing-token node produced by the syntax tree provider.
    UnderlyingParseError,
}

impl ErrorKind {
    pub fn severity(self) -> Severity {
        match self {
            ErrorKind::UnsupportedNodeKind => Severity::Warning,
            ErrorKind::UnderlyingParseError => Severity::Error,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedNodeKind => codes::UNSUPPORTED_NODE_KIND,
            ErrorKind::UnderlyingParseError => codes::UNDERLYING_PARSE_ERROR,
        }
    }
}

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: FileId,
    pub path: Arc<str>,
    pub kind: ErrorKind,
    /// Grammar kind of the offending node.
    pub node_kind: SmolStr,
    pub start: LineCol,
    pub end: LineCol,
    pub severity: Severity,
    /// Diagnostic code (e.g., "W0001").
    pub code: &'static str,
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Describe `node` of `source` as a diagnostic of `kind`.
    pub fn for_node<N: SyntaxNode>(source: &Source, node: &N, kind: ErrorKind) -> Self {
        let node_kind = SmolStr::new(node.kind());
        let start = node.start_point();
        let message = match kind {
            ErrorKind::UnsupportedNodeKind => format!("unsupported node kind '{}'", node_kind),
            ErrorKind::UnderlyingParseError if node.is_missing() => {
                format!("missing '{}'", node_kind)
            }
            ErrorKind::UnderlyingParseError => {
                format!("syntax error: '{}'", truncate(node.text(source), 40))
            }
        };

        Self {
            file: source.file,
            path: source.path.clone(),
            kind,
            node_kind,
            start,
            end: node.end_point(),
            severity: kind.severity(),
            code: kind.code(),
            message: message.into(),
        }
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
pub mod codes {
    /// Syntax node kind not handled by any dispatch table.
    pub const UNSUPPORTED_NODE_KIND: &str = "W0001";
    /// Error or missing-token node in the syntax tree.
    pub const UNDERLYING_PARSE_ERROR: &str = "E0001";
}

// ============================================================================
// SINKS
// ============================================================================

/// Receives diagnostics. Reporting never fails back into the engine.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Logs every diagnostic as a `tracing` warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            path = %diagnostic.path,
            code = diagnostic.code,
            kind = ?diagnostic.kind,
            node_kind = %diagnostic.node_kind,
            line = diagnostic.start.line_one_indexed(),
            column = diagnostic.start.col_one_indexed(),
            "{}",
            diagnostic.message
        );
    }
}

/// Collects diagnostics in report order.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Get diagnostics for a specific file.
    pub fn diagnostics_for_file(&self, file: FileId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.file == file).collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
