//! Program-level reconciliation: every declaration rendered once, export
//! metadata carried onto documented declarations, faults kept local.

use doctree::{AstNode, DiagnosticCollector, ErrorKind, Language, Parser, Properties, Source, parse};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

fn parse_ts(text: &str) -> Vec<AstNode> {
    parse(&Source::new("test.ts", "test.ts", text), Language::TypeScript).unwrap()
}

/// Location keys of the declarations an output sequence renders: contexts
/// of documented pairs, and the top-level declarations themselves.
fn rendered_keys(nodes: &[AstNode]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| node.context().unwrap_or(node).location_key().to_string())
        .collect()
}

#[test]
fn test_documented_export_is_emitted_once() {
    let nodes = parse_ts("/** A. */\nexport class A {}\n\nexport function b() {}\n\n/** C. */\nexport const c = 1;\n");

    let kinds: Vec<_> = nodes.iter().map(|n| n.kind.as_str()).collect();
    assert_eq!(kinds, ["comment", "comment", "function"]);
    assert_eq!(nodes[0].context().unwrap().properties, Some(Properties::exported(false)));
    assert_eq!(nodes[1].context().unwrap().kind, "lexical_declaration");
    assert_eq!(nodes[2].properties, Some(Properties::exported(false)));
}

#[test]
fn test_undocumented_exports_keep_source_order() {
    let nodes = parse_ts("export interface A {}\nexport type B = A;\nexport default function c() {}\n");

    let kinds: Vec<_> = nodes.iter().map(|n| n.kind.as_str()).collect();
    assert_eq!(kinds, ["interface", "type", "function"]);
    assert_eq!(nodes[2].properties, Some(Properties::exported(true)));
}

#[test]
fn test_fault_isolation_inside_declaration() {
    let source = Source::new(
        "test.js",
        "test.js",
        "/** A. */\nfunction a() {\n  debugger;\n  return 1;\n}\n\n/** B. */\nfunction b() {}\n",
    );
    let mut diagnostics = DiagnosticCollector::new();
    let nodes = Parser::new(Language::JavaScript)
        .parse_with(&source, &mut diagnostics)
        .unwrap();

    assert_eq!(diagnostics.of_kind(ErrorKind::UnsupportedNodeKind).count(), 1);
    assert_eq!(nodes.len(), 2);

    let body = nodes[0].context().unwrap().child("statement_block").unwrap();
    let kinds: Vec<_> = body.children.iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(kinds, ["return_statement"]);
    assert_eq!(nodes[1].context().unwrap().text, "function b() {}");
}

#[test]
fn test_documented_export_reports_each_fault_once() {
    let source = Source::new(
        "test.ts",
        "test.ts",
        "/** D */\nexport function f() {\n  debugger;\n}\n\n/** E */\nexport class E {\n  m() { return 1 + ; }\n}\n",
    );
    let mut diagnostics = DiagnosticCollector::new();
    let nodes = Parser::new(Language::TypeScript)
        .parse_with(&source, &mut diagnostics)
        .unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(diagnostics.of_kind(ErrorKind::UnsupportedNodeKind).count(), 1);

    assert!(diagnostics.has_errors());
    let distinct: FxHashSet<_> = diagnostics
        .diagnostics()
        .iter()
        .map(|d| (d.start, d.end, d.node_kind.clone(), d.kind))
        .collect();
    assert_eq!(distinct.len(), diagnostics.len());
}

#[test]
fn test_syntax_error_does_not_hide_later_declarations() {
    let source = Source::new(
        "test.ts",
        "test.ts",
        "/** A. */\nexport class A {\n  m() { return 1 + ; }\n}\n\n/** B. */\nexport class B {}\n",
    );
    let parsed = Parser::new(Language::TypeScript).parse_file(&source).unwrap();

    assert!(parsed.has_errors());
    assert!(
        parsed
            .diagnostics
            .iter()
            .any(|d| d.kind == ErrorKind::UnderlyingParseError)
    );
    let last = parsed.nodes.last().and_then(|n| n.context()).unwrap();
    assert_eq!(last.text, "class B {}");
    assert_eq!(last.properties, Some(Properties::exported(false)));
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[derive(Clone, Debug)]
struct Item {
    documented: bool,
    exported: bool,
    template: usize,
}

/// function, class, const, interface
const TEMPLATE_COUNT: usize = 4;

fn render(index: usize, item: &Item) -> String {
    let declaration = match item.template {
        0 => format!("function f{}() {{}}", index),
        1 => format!("class C{} {{}}", index),
        2 => format!("const v{} = 1;", index),
        _ => format!("interface I{} {{}}", index),
    };
    let mut text = String::new();
    if item.documented {
        text.push_str(&format!("/** Item {}. */\n", index));
    }
    if item.exported {
        text.push_str("export ");
    }
    text.push_str(&declaration);
    text.push('\n');
    text
}

fn arb_item() -> impl Strategy<Value = Item> {
    (any::<bool>(), any::<bool>(), 0..TEMPLATE_COUNT).prop_map(|(documented, exported, template)| Item {
        documented,
        exported,
        template,
    })
}

proptest! {
    #[test]
    fn prop_every_declaration_is_rendered_at_most_once(items in prop::collection::vec(arb_item(), 0..8)) {
        let text: String = items.iter().enumerate().map(|(i, item)| render(i, item)).collect();
        let nodes = parse_ts(&text);

        let keys = rendered_keys(&nodes);
        let unique: FxHashSet<_> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());

        let documented = items.iter().filter(|i| i.documented).count();
        let exported_only = items.iter().filter(|i| i.exported && !i.documented).count();
        prop_assert_eq!(nodes.iter().filter(|n| n.kind == "comment").count(), documented);
        prop_assert_eq!(nodes.len(), documented + exported_only);
    }

    #[test]
    fn prop_export_status_survives_reconciliation(items in prop::collection::vec(arb_item(), 1..8)) {
        let text: String = items.iter().enumerate().map(|(i, item)| render(i, item)).collect();
        let nodes = parse_ts(&text);

        let exported_rendered = nodes
            .iter()
            .map(|n| n.context().unwrap_or(n))
            .filter(|n| n.properties.and_then(|p| p.exports).is_some_and(|e| e.export))
            .count();
        prop_assert_eq!(exported_rendered, items.iter().filter(|i| i.exported).count());
    }
}
