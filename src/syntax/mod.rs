//! Concrete syntax trees and everything that classifies their nodes.
//!
//! The engine never looks inside the grammar: it only sees nodes through
//! the [`SyntaxNode`] trait and compares their `kind` strings against the
//! per-language tables in [`table`]. The tree-sitter grammars are bound to
//! that trait here.

pub mod classify;
pub(crate) mod kinds;
mod language;
pub mod sibling;
pub mod table;

pub use classify::MarkupStyle;
pub use language::Language;
pub use sibling::sibling;
pub use table::{Bucket, ContextRule, LanguageTable, Role};

use thiserror::Error;

use crate::base::{LineCol, Source, TextRange, TextSize};

/// Read-only view of one node of a concrete syntax tree.
pub trait SyntaxNode: Clone + PartialEq {
    /// Grammar kind name, used verbatim as a dispatch key.
    fn kind(&self) -> &str;

    /// Byte range of the node in the parsed text.
    fn text_range(&self) -> TextRange;

    fn start_point(&self) -> LineCol;

    fn end_point(&self) -> LineCol;

    /// All children, named and anonymous, in source order.
    fn child_nodes(&self) -> Vec<Self>;

    /// The raw next sibling, anonymous tokens included.
    fn next_node(&self) -> Option<Self>;

    /// Whether the provider inserted this node to recover from a missing token.
    fn is_missing(&self) -> bool {
        false
    }

    /// The verbatim source slice covered by this node.
    fn text<'s>(&self, source: &'s Source) -> &'s str {
        let range = self.text_range();
        source.slice(range.start().into(), range.end().into())
    }
}

impl SyntaxNode for tree_sitter::Node<'_> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn text_range(&self) -> TextRange {
        TextRange::new(
            TextSize::from(self.start_byte() as u32),
            TextSize::from(self.end_byte() as u32),
        )
    }

    fn start_point(&self) -> LineCol {
        let point = self.start_position();
        LineCol::new(point.row as u32, point.column as u32)
    }

    fn end_point(&self) -> LineCol {
        let point = self.end_position();
        LineCol::new(point.row as u32, point.column as u32)
    }

    fn child_nodes(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        tree_sitter::Node::children(self, &mut cursor).collect()
    }

    fn next_node(&self) -> Option<Self> {
        tree_sitter::Node::next_sibling(self)
    }

    fn is_missing(&self) -> bool {
        tree_sitter::Node::is_missing(self)
    }
}

/// Failures of the syntax tree provider itself.
///
/// Malformed input is not one of them: error nodes inside a tree are
/// reported as diagnostics and the rest of the file is still processed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load the {language} grammar: {source}")]
    Language {
        language: Language,
        source: tree_sitter::LanguageError,
    },
    #[error("the syntax tree provider produced no tree for {path}")]
    NoTree { path: String },
    #[error("no supported language for {path}")]
    UnknownLanguage { path: String },
}

/// Parse `source` into a concrete syntax tree with the grammar of `language`.
pub fn parse_tree(source: &Source, language: Language) -> Result<tree_sitter::Tree, ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|source| ParseError::Language { language, source })?;

    parser
        .parse(source.text.as_bytes(), None)
        .ok_or_else(|| ParseError::NoTree {
            path: source.path.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_sitter_node_view() {
        let source = Source::new("a.js", "a.js", "let a = 1;\nfoo();");
        let tree = parse_tree(&source, Language::JavaScript).unwrap();
        let root = tree.root_node();

        assert_eq!(SyntaxNode::kind(&root), "program");
        let children = root.child_nodes();
        assert_eq!(children.len(), 2);
        assert_eq!(SyntaxNode::kind(&children[0]), "lexical_declaration");
        assert_eq!(children[0].text(&source), "let a = 1;");
        assert_eq!(children[1].start_point(), LineCol::new(1, 0));
        assert_eq!(children[0].next_node(), Some(children[1]));
        assert_eq!(children[1].text_range(), TextRange::new(11.into(), 17.into()));
    }

    #[test]
    fn test_parse_error_does_not_fail_the_tree() {
        let source = Source::new("a.ts", "a.ts", "class {");
        let tree = parse_tree(&source, Language::TypeScript).unwrap();
        assert!(tree.root_node().has_error());
    }
}
