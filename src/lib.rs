//! # doctree-base
//!
//! Core library turning JavaScript and TypeScript syntax trees into
//! documentation ASTs: documentation comments paired with the declarations
//! they document, with export, inheritance and namespace metadata attached.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser      → entry points (single source, parallel source sets)
//!   ↓
//! visitor     → dispatch engine + program reconciliation
//!   ↓
//! ast         → AstNode, Properties, node factory, range calculator
//!   ↓
//! markup      → documentation comment parser
//!   ↓
//! syntax      → SyntaxNode trait, tree-sitter binding, kind tables, classifier
//!   ↓
//! base        → Primitives (FileId, LineCol, Ranges, Source)
//! ```
//!
//! `diagnostics` sits beside `visitor`: everything the engine skips is
//! reported through a [`DiagnosticSink`].
//!
//! ## Example
//!
//! ```
//! use doctree::{Language, Source, parse};
//!
//! let source = Source::from_path("shapes.ts", "/** A shape. */\nexport interface Shape extends Base {}\n");
//! let nodes = parse(&source, Language::TypeScript).unwrap();
//!
//! let context = nodes[0].context().unwrap();
//! assert_eq!(context.kind, "interface");
//! ```

/// Foundation types: FileId, positions, sources
pub mod base;

/// Concrete syntax trees, node kinds and classification
pub mod syntax;

/// Documentation comment markup
pub mod markup;

/// The documentation AST
pub mod ast;

/// Reports of skipped nodes
pub mod diagnostics;

/// Dispatch engine
pub mod visitor;

/// Entry points
pub mod parser;

pub use ast::{AstNode, Exports, Inheritance, Properties};
pub use base::{FileId, LineCol, Location, Ranges, Source, SourceSet, TextRange, TextSize};
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticSink, ErrorKind, Severity, TracingSink};
pub use markup::{DocComment, DocParser, MarkupParser};
pub use parser::{ParseOptions, ParsedFile, Parser, parse, parse_set};
pub use syntax::{Language, ParseError};
pub use visitor::Visitor;
