//! AST node factory.

use smol_str::SmolStr;

use super::{AstNode, Properties, range};
use crate::base::{Ranges, Source};
use crate::markup::MarkupParser;
use crate::syntax::SyntaxNode;

/// What a node is built from, besides the syntax node itself.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Terminal: copied verbatim, no children.
    Leaf,
    Properties(Properties),
    /// Already visited children.
    Children(Vec<AstNode>),
    /// A declaration: visited children plus its structural metadata.
    Declaration {
        children: Vec<AstNode>,
        properties: Properties,
    },
    /// A documentation comment and the declaration it documents. The
    /// comment's own text goes through the markup parser.
    Documented(Option<AstNode>),
}

/// Materializes [`AstNode`]s from syntax nodes of one source.
pub struct NodeFactory<'a> {
    source: &'a Source,
    offset: Option<Ranges>,
    markup: Option<&'a dyn MarkupParser>,
}

impl<'a> NodeFactory<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self {
            source,
            offset: None,
            markup: None,
        }
    }

    /// Shift every produced range by `offset`.
    pub fn with_offset(mut self, offset: Option<Ranges>) -> Self {
        self.offset = offset;
        self
    }

    /// Parse documentation comments with `markup`; without one, comment
    /// nodes carry no structured `comment`.
    pub fn with_markup(mut self, markup: Option<&'a dyn MarkupParser>) -> Self {
        self.markup = markup;
        self
    }

    pub fn source(&self) -> &'a Source {
        self.source
    }

    pub fn create<N: SyntaxNode>(&self, node: &N, payload: Payload) -> AstNode {
        self.create_as(node, node.kind(), payload)
    }

    /// Build a node of `kind` instead of the syntax node's own kind.
    pub fn create_as<N: SyntaxNode>(&self, node: &N, kind: &str, payload: Payload) -> AstNode {
        let ranges = range(node, self.offset.as_ref());
        let mut ast = AstNode {
            kind: SmolStr::new(kind),
            text: node.text(self.source).to_string(),
            position: ranges.position,
            location: ranges.location,
            children: Vec::new(),
            context: None,
            properties: None,
            comment: None,
        };

        match payload {
            Payload::Leaf => {}
            Payload::Properties(properties) => ast.properties = properties.non_empty(),
            Payload::Children(children) => ast.children = children,
            Payload::Declaration { children, properties } => {
                ast.children = children;
                ast.properties = properties.non_empty();
            }
            Payload::Documented(context) => {
                ast.context = context.map(Box::new);
                ast.comment = self
                    .markup
                    .map(|markup| markup.parse(&ast.text).shifted(&ranges));
            }
        }
        ast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{LineCol, TextRange};
    use crate::markup::DocParser;
    use crate::syntax::{Language, parse_tree};

    const TEXT: &str = "let a;\n/**\n * Doc.\n * @param x value\n */\nfunction f(x) {}\n";

    #[test]
    fn test_leaf_and_renamed_declaration() {
        let source = Source::new("a.js", "a.js", TEXT);
        let tree = parse_tree(&source, Language::JavaScript).unwrap();
        let children = tree.root_node().child_nodes();
        let factory = NodeFactory::new(&source);

        let leaf = factory.create(&children[0], Payload::Leaf);
        assert_eq!(leaf.kind, "lexical_declaration");
        assert_eq!(leaf.text, "let a;");
        assert!(leaf.children.is_empty());
        assert_eq!(leaf.properties, None);

        let function = factory.create_as(
            &children[2],
            "function",
            Payload::Declaration {
                children: vec![leaf.clone()],
                properties: Properties::default(),
            },
        );
        assert_eq!(function.kind, "function");
        assert_eq!(function.text, "function f(x) {}");
        assert_eq!(function.children, vec![leaf]);
        assert_eq!(function.properties, None);

        let exported = factory.create(&children[2], Payload::Properties(Properties::exported(true)));
        assert_eq!(exported.properties, Some(Properties::exported(true)));
    }

    #[test]
    fn test_documented_comment_parses_markup_in_file_coordinates() {
        let source = Source::new("a.js", "a.js", TEXT);
        let tree = parse_tree(&source, Language::JavaScript).unwrap();
        let children = tree.root_node().child_nodes();
        let parser = DocParser;
        let factory = NodeFactory::new(&source).with_markup(Some(&parser));

        let context = factory.create(&children[2], Payload::Leaf);
        let comment = factory.create(&children[1], Payload::Documented(Some(context)));

        assert_eq!(comment.kind, "comment");
        assert_eq!(comment.context().map(|c| c.kind.as_str()), Some("function_declaration"));

        let doc = comment.comment.as_ref().unwrap();
        assert_eq!(doc.description, "Doc.");
        let tag = doc.tag("param").unwrap();
        assert_eq!(tag.ident.as_deref(), Some("x"));
        assert_eq!(tag.ranges.location.start(), LineCol::new(3, 3));
    }

    #[test]
    fn test_offset_shifts_all_ranges() {
        let source = Source::new("a.js", "a.js", "foo();");
        let tree = parse_tree(&source, Language::JavaScript).unwrap();
        let statement = tree.root_node().child_nodes()[0];
        let offset = Ranges::new(TextRange::new(50.into(), 60.into()), LineCol::new(4, 8), LineCol::new(4, 18));
        let factory = NodeFactory::new(&source).with_offset(Some(offset));

        let node = factory.create(&statement, Payload::Leaf);
        assert_eq!(node.position, TextRange::new(50.into(), 56.into()));
        assert_eq!(node.start(), LineCol::new(4, 8));
        assert_eq!(node.text, "foo();");
    }
}
