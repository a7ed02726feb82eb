//! Entry points: one source, or a whole [`SourceSet`] in parallel.

use std::sync::Arc;

use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::ast::{AstNode, NodeFactory};
use crate::base::{FileId, Ranges, Source, SourceSet};
use crate::diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticSink, Severity, TracingSink};
use crate::markup::{DocParser, MarkupParser};
use crate::syntax::{Language, ParseError, parse_tree};
use crate::visitor::Visitor;

/// Knobs of a parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop a license comment at the head of the file.
    pub strip_legal_header: bool,
    /// Run the markup parser on documentation comments.
    pub parse_markup: bool,
    /// Shift every produced range, for text embedded in a larger document.
    pub offset: Option<Ranges>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strip_legal_header: true,
            parse_markup: true,
            offset: None,
        }
    }
}

/// The documentation AST of one file and what was skipped producing it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ParsedFile {
    pub file: FileId,
    pub path: Arc<str>,
    pub nodes: Vec<AstNode>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedFile {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Parses sources of one language into documentation ASTs.
#[derive(Clone)]
pub struct Parser {
    language: Language,
    options: ParseOptions,
    markup: Arc<dyn MarkupParser>,
}

impl Parser {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            options: ParseOptions::default(),
            markup: Arc::new(DocParser),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the default [`DocParser`].
    pub fn with_markup_parser(mut self, markup: Arc<dyn MarkupParser>) -> Self {
        self.markup = markup;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `source`, logging diagnostics through `tracing`.
    pub fn parse(&self, source: &Source) -> Result<Vec<AstNode>, ParseError> {
        self.parse_with(source, TracingSink)
    }

    /// Parse `source`, reporting diagnostics to `sink`.
    pub fn parse_with<S: DiagnosticSink>(&self, source: &Source, sink: S) -> Result<Vec<AstNode>, ParseError> {
        let tree = parse_tree(source, self.language)?;

        let markup = self.options.parse_markup.then_some(self.markup.as_ref());
        let factory = NodeFactory::new(source)
            .with_offset(self.options.offset)
            .with_markup(markup);
        let mut visitor = Visitor::new(factory, self.language.table(), sink)
            .strip_legal_header(self.options.strip_legal_header);

        Ok(visitor.visit_root(&tree.root_node()))
    }

    /// Parse `source`, collecting its diagnostics.
    pub fn parse_file(&self, source: &Source) -> Result<ParsedFile, ParseError> {
        let mut diagnostics = DiagnosticCollector::new();
        let nodes = self.parse_with(source, &mut diagnostics)?;

        Ok(ParsedFile {
            file: source.file,
            path: source.path.clone(),
            nodes,
            diagnostics: diagnostics.take(),
        })
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("language", &self.language)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Parse `source` with default options.
pub fn parse(source: &Source, language: Language) -> Result<Vec<AstNode>, ParseError> {
    Parser::new(language).parse(source)
}

/// Parse every file of `sources` in parallel, picking each file's language
/// from its path. Results come back in insertion order.
pub fn parse_set(sources: &SourceSet, options: &ParseOptions) -> Vec<Result<ParsedFile, ParseError>> {
    let sources: Vec<&Source> = sources.iter().collect();

    sources
        .par_iter()
        .map(|source| {
            let language = Language::from_path(&source.path).ok_or_else(|| ParseError::UnknownLanguage {
                path: source.path.to_string(),
            })?;
            Parser::new(language).with_options(options.clone()).parse_file(source)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{LineCol, TextRange, TextSize};
    use crate::diagnostics::ErrorKind;
    use crate::markup::DocComment;

    struct Shouting;

    impl MarkupParser for Shouting {
        fn parse(&self, text: &str) -> DocComment {
            DocComment {
                description: text.to_uppercase(),
                ..DocComment::default()
            }
        }
    }

    #[test]
    fn test_parse_documented_function() {
        let source = Source::new("a.js", "a.js", "/** Adds. */\nfunction add(a, b) {}\n");
        let nodes = parse(&source, Language::JavaScript).unwrap();

        assert_eq!(nodes.len(), 1);
        let doc = nodes[0].comment.as_ref().unwrap();
        assert_eq!(doc.description, "Adds.");
    }

    #[test]
    fn test_markup_can_be_disabled_or_replaced() {
        let source = Source::new("a.js", "a.js", "/** Adds. */\nfunction add(a, b) {}\n");

        let options = ParseOptions {
            parse_markup: false,
            ..ParseOptions::default()
        };
        let nodes = Parser::new(Language::JavaScript).with_options(options).parse(&source).unwrap();
        assert!(nodes[0].comment.is_none());

        let nodes = Parser::new(Language::JavaScript)
            .with_markup_parser(Arc::new(Shouting))
            .parse(&source)
            .unwrap();
        assert_eq!(nodes[0].comment.as_ref().unwrap().description, "/** ADDS. */");
    }

    #[test]
    fn test_offset_option_shifts_nodes() {
        let source = Source::new("a.js", "a.js", "/** Adds. */\nfunction add() {}");
        let offset = Ranges::new(TextRange::new(100.into(), 200.into()), LineCol::new(20, 0), LineCol::new(30, 0));
        let options = ParseOptions {
            offset: Some(offset),
            ..ParseOptions::default()
        };
        let nodes = Parser::new(Language::JavaScript).with_options(options).parse(&source).unwrap();

        assert_eq!(nodes[0].start(), LineCol::new(20, 0));
        assert_eq!(nodes[0].context().unwrap().start(), LineCol::new(21, 0));
        assert_eq!(nodes[0].context().unwrap().position.start(), TextSize::from(113));
    }

    #[test]
    fn test_parse_file_collects_diagnostics() {
        let mut source = Source::new("a.js", "a.js", "/** Stop. */\ndebugger;\n");
        source.file = FileId::new(2);
        let parsed = Parser::new(Language::JavaScript).parse_file(&source).unwrap();

        assert_eq!(parsed.file, FileId::new(2));
        assert!(parsed.nodes.is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].kind, ErrorKind::UnsupportedNodeKind);
        assert!(!parsed.has_errors());
    }

    #[test]
    fn test_parse_set_keeps_insertion_order() {
        let mut set = SourceSet::new();
        set.insert(Source::from_path("src/b.ts", "/** B. */\nexport interface B {}\n"));
        set.insert(Source::from_path("README.md", "# readme"));
        set.insert(Source::from_path("src/a.js", "/** A. */\nexport const a = 1;\n"));

        let results = parse_set(&set, &ParseOptions::default());
        assert_eq!(results.len(), 3);

        let b = results[0].as_ref().unwrap();
        assert_eq!(b.file, FileId::new(0));
        assert_eq!(b.nodes[0].context().unwrap().kind, "interface");

        assert!(matches!(&results[1], Err(ParseError::UnknownLanguage { path }) if path == "README.md"));

        let a = results[2].as_ref().unwrap();
        assert_eq!(a.file, FileId::new(2));
        assert_eq!(a.nodes[0].context().unwrap().kind, "lexical_declaration");
    }
}
