//! The dispatch engine.
//!
//! One [`Visitor`] serves every language: it only ever compares node kinds
//! against the [`LanguageTable`] it was built with.
//!
//! ## Dispatch (ordinary traversal)
//!
//! ```text
//! Root         → program algorithm (see `program`)
//! Comment      → documentation comment paired with its sibling
//! Error        → reported, subtree dropped
//! NonTerminal  → container of the visited, noise-filtered children
//! Terminal     → leaf
//! (unknown)    → reported, dropped
//! ```
//!
//! ## Context dispatch
//!
//! The sibling of a documentation comment (and every top-level export) goes
//! through the table's context rules instead: declaration builders strip the
//! leading keyword, record inheritance and export status, and may rename the
//! node kind (`interface_declaration` → `interface`).

mod program;

use tracing::trace;

use crate::ast::{AstNode, Exports, Inheritance, NodeFactory, Payload, Properties};
use crate::base::Source;
use crate::diagnostics::{Diagnostic, DiagnosticSink, ErrorKind};
use crate::syntax::classify::{is_documentation_comment, is_kind, is_legal_comment, is_noise};
use crate::syntax::{Bucket, ContextRule, LanguageTable, Role, SyntaxNode, kinds, sibling};

/// Walks one syntax tree and builds its documentation AST.
///
/// A visitor is single-use state for one file; parse files concurrently by
/// giving each its own visitor.
pub struct Visitor<'a, S> {
    table: &'static LanguageTable,
    factory: NodeFactory<'a>,
    sink: S,
    strip_legal_header: bool,
}

impl<'a, S: DiagnosticSink> Visitor<'a, S> {
    pub fn new(factory: NodeFactory<'a>, table: &'static LanguageTable, sink: S) -> Self {
        Self {
            table,
            factory,
            sink,
            strip_legal_header: true,
        }
    }

    /// Whether a leading license comment is dropped at program level.
    pub fn strip_legal_header(mut self, strip: bool) -> Self {
        self.strip_legal_header = strip;
        self
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn source(&self) -> &'a Source {
        self.factory.source()
    }

    /// Visit the root of a tree.
    ///
    /// A `program` root yields the reconciled top-level sequence; any other
    /// node yields its own rendering, if it has one.
    pub fn visit_root<N: SyntaxNode>(&mut self, root: &N) -> Vec<AstNode> {
        match self.table.bucket(root.kind()) {
            Some(Bucket::Root) => self.visit_program(root),
            _ => self.visit(root).into_iter().collect(),
        }
    }

    /// Ordinary dispatch. `None` means the subtree contributes nothing.
    pub fn visit<N: SyntaxNode>(&mut self, node: &N) -> Option<AstNode> {
        if node.is_missing() {
            self.report(node, ErrorKind::UnderlyingParseError);
            return None;
        }

        let bucket = self.table.bucket(node.kind());
        trace!(kind = node.kind(), ?bucket, "dispatch");

        match bucket {
            Some(Bucket::Root) => {
                let children = self.visit_program(node);
                Some(self.factory.create(node, Payload::Children(children)))
            }
            Some(Bucket::Comment) => self.visit_comment(node),
            Some(Bucket::Error) => {
                self.report(node, ErrorKind::UnderlyingParseError);
                None
            }
            Some(Bucket::NonTerminal) => {
                let children = self.visit_children(&node.child_nodes());
                Some(self.factory.create(node, Payload::Children(children)))
            }
            Some(Bucket::Terminal) => Some(self.factory.create(node, Payload::Leaf)),
            None => {
                self.report(node, ErrorKind::UnsupportedNodeKind);
                None
            }
        }
    }

    /// Visit `children` in order, skipping noise tokens.
    ///
    /// A declaration documented by a preceding comment is rendered as that
    /// comment's context only, not a second time as a plain child.
    pub fn visit_children<N: SyntaxNode>(&mut self, children: &[N]) -> Vec<AstNode> {
        let mut paired: Option<N> = None;
        let mut nodes = Vec::with_capacity(children.len());

        for child in children.iter().filter(|child| child.is_missing() || !is_noise(child.kind())) {
            if paired.as_ref() == Some(child) {
                continue;
            }
            if self.is_documentation(child) {
                paired = self.documented_declaration(child);
            }
            if let Some(node) = self.visit(child) {
                nodes.push(node);
            }
        }
        nodes
    }

    /// A documentation comment paired with the node it documents.
    ///
    /// Any other comment yields `None`.
    pub fn visit_comment<N: SyntaxNode>(&mut self, node: &N) -> Option<AstNode> {
        if !self.is_documentation(node) {
            return None;
        }

        let context = self
            .documented_sibling(node)
            .and_then(|next| self.visit_context(&next, Properties::default()));
        Some(self.factory.create(node, Payload::Documented(context)))
    }

    /// Context dispatch on a documented or exported node.
    ///
    /// `inherited` carries properties found on wrapping statements (export
    /// status of an `export` around the declaration).
    pub fn visit_context<N: SyntaxNode>(&mut self, node: &N, inherited: Properties) -> Option<AstNode> {
        if !node.is_missing() && is_noise(node.kind()) {
            return None;
        }
        let Some(rule) = self.table.context_rule(node.kind()).copied() else {
            return self.visit(node);
        };
        trace!(kind = rule.kind, role = ?rule.role, "context dispatch");

        match rule.role {
            Role::Comment => self.visit_comment(node),
            Role::Export => self.visit_export(node, inherited),
            Role::Wrapper => self.visit_wrapper(node, &rule, inherited),
            Role::Declaration | Role::Namespace | Role::Module => {
                Some(self.visit_declaration(node, &rule, inherited))
            }
        }
    }

    /// `export [default] <declaration>`: record the export status, then
    /// build the inner declaration. Forms without one (`export { a }`,
    /// `export default expr;`) become an export container node.
    fn visit_export<N: SyntaxNode>(&mut self, node: &N, inherited: Properties) -> Option<AstNode> {
        let children = node.child_nodes();
        let mut exports = Exports::default();
        let mut inner = None;

        for child in &children {
            match child.kind() {
                kinds::EXPORT => exports.export = true,
                kinds::DEFAULT => exports.default = true,
                kinds::DECORATOR => {}
                _ if self.is_declaration(child) => {
                    inner = Some(child.clone());
                    break;
                }
                _ => {}
            }
        }

        let properties = inherited.merged(&Properties {
            exports: Some(exports),
            ..Properties::default()
        });

        match inner {
            Some(declaration) => self.visit_context(&declaration, properties),
            None => {
                let rest: Vec<N> = children
                    .into_iter()
                    .filter(|child| !matches!(child.kind(), kinds::EXPORT | kinds::DEFAULT))
                    .collect();
                let children = self.visit_children(&rest);
                Some(self.factory.create(node, Payload::Declaration { children, properties }))
            }
        }
    }

    /// A statement wrapping a declaration: build the declaration, or the
    /// statement itself when it wraps none.
    fn visit_wrapper<N: SyntaxNode>(&mut self, node: &N, rule: &ContextRule, inherited: Properties) -> Option<AstNode> {
        let inner = node
            .child_nodes()
            .into_iter()
            .filter(|child| !rule.is_keyword(child.kind()))
            .find(|child| self.is_declaration(child));

        match inner {
            Some(inner) => self.visit_context(&inner, inherited),
            None => self.visit(node),
        }
    }

    fn visit_declaration<N: SyntaxNode>(&mut self, node: &N, rule: &ContextRule, inherited: Properties) -> AstNode {
        let mut keyword_stripped = rule.keywords.is_empty();
        let mut inheritance = None;
        let mut children = Vec::new();

        for child in node.child_nodes() {
            if !keyword_stripped && rule.is_keyword(child.kind()) {
                keyword_stripped = true;
                continue;
            }
            if inheritance.is_none() {
                inheritance = self.inheritance(&child);
            }
            children.push(child);
        }

        let mut properties = inherited;
        properties.merge(&Properties {
            inheritance,
            namespace: (rule.role == Role::Namespace).then_some(true),
            module: (rule.role == Role::Module).then_some(true),
            ..Properties::default()
        });

        let children = self.visit_children(&children);
        let kind = rule.rename.unwrap_or(rule.kind);
        self.factory.create_as(node, kind, Payload::Declaration { children, properties })
    }

    /// Inheritance recorded by `node`: the first `extends` or `implements`
    /// keyword found in it or in the heritage clauses wrapping it.
    fn inheritance<N: SyntaxNode>(&self, node: &N) -> Option<Inheritance> {
        match node.kind() {
            kinds::EXTENDS => Some(Inheritance {
                extends: true,
                implements: false,
            }),
            kinds::IMPLEMENTS => Some(Inheritance {
                extends: false,
                implements: true,
            }),
            kind if self.table.is_heritage(kind) => {
                node.child_nodes().iter().find_map(|child| self.inheritance(child))
            }
            _ => None,
        }
    }

    /// The node a documentation comment documents: its raw next sibling,
    /// looking past plain (non-documentation) comments.
    fn documented_sibling<N: SyntaxNode>(&self, node: &N) -> Option<N> {
        let mut next = sibling(node, None)?;
        while is_kind(&next, self.table.comment_kind()) && !self.is_documentation(&next) {
            next = sibling(&next, None)?;
        }
        Some(next)
    }

    /// The first node after a chain of documentation comments.
    fn documented_declaration<N: SyntaxNode>(&self, node: &N) -> Option<N> {
        let mut next = self.documented_sibling(node)?;
        while self.is_documentation(&next) {
            next = self.documented_sibling(&next)?;
        }
        Some(next)
    }

    fn is_documentation<N: SyntaxNode>(&self, node: &N) -> bool {
        is_kind(node, self.table.comment_kind()) && is_documentation_comment(self.source(), node)
    }

    /// Contextual, and not a comment.
    fn is_declaration<N: SyntaxNode>(&self, node: &N) -> bool {
        self.table
            .context_rule(node.kind())
            .is_some_and(|rule| rule.role != Role::Comment)
    }

    fn is_legal_header<N: SyntaxNode>(&self, node: &N) -> bool {
        is_kind(node, self.table.comment_kind()) && is_legal_comment(self.source(), node)
    }

    fn report<N: SyntaxNode>(&mut self, node: &N, kind: ErrorKind) {
        let diagnostic = Diagnostic::for_node(self.source(), node, kind);
        self.sink.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCollector;
    use crate::markup::DocParser;
    use crate::syntax::{Language, parse_tree};

    fn visit_statement(text: &str, language: Language) -> (Option<AstNode>, DiagnosticCollector) {
        let source = Source::new("t", "t", text);
        let tree = parse_tree(&source, language).unwrap();
        let statement = tree.root_node().child_nodes()[0];
        let mut visitor = Visitor::new(NodeFactory::new(&source), language.table(), DiagnosticCollector::new());
        let node = visitor.visit(&statement);
        (node, visitor.into_sink())
    }

    fn visit_context_of(text: &str, language: Language) -> Option<AstNode> {
        let source = Source::new("t", "t", text);
        let tree = parse_tree(&source, language).unwrap();
        let statement = tree.root_node().child_nodes()[0];
        let parser = DocParser;
        let factory = NodeFactory::new(&source).with_markup(Some(&parser));
        let mut visitor = Visitor::new(factory, language.table(), DiagnosticCollector::new());
        visitor.visit_context(&statement, Properties::default())
    }

    #[test]
    fn test_container_filters_noise() {
        let (node, diagnostics) = visit_statement("foo(a, b);", Language::JavaScript);
        let node = node.unwrap();

        assert_eq!(node.kind, "expression_statement");
        let call = &node.children[0];
        assert_eq!(call.kind, "call_expression");
        let arguments = call.child("arguments").unwrap();
        let kinds: Vec<_> = arguments.children.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, ["identifier", "identifier"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unsupported_kind_is_reported_and_dropped() {
        let (node, diagnostics) = visit_statement("debugger;", Language::JavaScript);

        assert!(node.is_none());
        assert_eq!(diagnostics.of_kind(ErrorKind::UnsupportedNodeKind).count(), 1);
    }

    #[test]
    fn test_class_declaration_builder() {
        let node = visit_context_of("class A extends B { m() {} }", Language::JavaScript).unwrap();

        assert_eq!(node.kind, "class");
        assert_eq!(node.text, "class A extends B { m() {} }");
        assert!(node.child("class").is_none());
        assert_eq!(node.children[0].kind, "identifier");
        assert_eq!(
            node.properties.and_then(|p| p.inheritance),
            Some(Inheritance {
                extends: true,
                implements: false
            })
        );
    }

    #[test]
    fn test_extends_wins_over_implements() {
        let node = visit_context_of("class A extends B implements C {}", Language::TypeScript).unwrap();

        assert_eq!(
            node.properties.and_then(|p| p.inheritance),
            Some(Inheritance {
                extends: true,
                implements: false
            })
        );
    }

    #[test]
    fn test_implements_only() {
        let node = visit_context_of("class A implements C {}", Language::TypeScript).unwrap();

        assert_eq!(
            node.properties.and_then(|p| p.inheritance),
            Some(Inheritance {
                extends: false,
                implements: true
            })
        );
    }

    #[test]
    fn test_export_statement_dispatches_on_declaration() {
        let node = visit_context_of("export function f() {}", Language::JavaScript).unwrap();

        assert_eq!(node.kind, "function");
        assert_eq!(node.text, "function f() {}");
        assert_eq!(node.properties, Some(Properties::exported(false)));
    }

    #[test]
    fn test_export_clause_falls_back_to_container() {
        let node = visit_context_of("export { a, b };", Language::JavaScript).unwrap();

        assert_eq!(node.kind, "export_statement");
        assert_eq!(node.properties, Some(Properties::exported(false)));
        assert_eq!(node.children[0].kind, "export_clause");
    }

    #[test]
    fn test_ambient_declaration_is_unwrapped() {
        let node = visit_context_of("declare function f(): void;", Language::TypeScript).unwrap();

        assert_eq!(node.kind, "function");
        assert_eq!(node.properties, None);
    }

    #[test]
    fn test_comment_in_container_is_paired_once() {
        let (node, _) = visit_statement(
            "class A {\n  /** Doc. */\n  m() {}\n  n() {}\n}",
            Language::JavaScript,
        );
        let node = node.unwrap();
        let body = node.child("class_body").unwrap();
        let kinds: Vec<_> = body.children.iter().map(|c| c.kind.as_str()).collect();

        assert_eq!(kinds, ["comment", "method_definition"]);
        assert_eq!(body.children[0].context().unwrap().text, "m() {}");
        assert_eq!(body.children[1].text, "n() {}");
    }

    #[test]
    fn test_plain_comment_is_dropped() {
        let (node, _) = visit_statement("class A {\n  // note\n  m() {}\n}", Language::JavaScript);
        let node = node.unwrap();
        let body = node.child("class_body").unwrap();
        let kinds: Vec<_> = body.children.iter().map(|c| c.kind.as_str()).collect();

        assert_eq!(kinds, ["method_definition"]);
    }
}
