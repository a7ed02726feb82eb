//! Node classifier: kind matching and comment-shape predicates.

use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::SyntaxNode;
use crate::base::Source;

/// `/** ... */`, excluding `/**/` and `/*** ... */` banners.
static DOCUMENTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A/\*\*[^*/][\s\S]*\*/\z").unwrap());

/// A line that is a bare `@tag`, optionally followed by an inline `{...}` argument.
static MARKUP_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:/\*\*+|\*)?[ \t]*@[A-Za-z][\w-]*(?:[ \t]+\{[^}\n]*\})?").unwrap());

/// A `@tag` introduced by a code fence or a header marker.
static MARKUP_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:/\*\*+|\*)?[ \t]*(?:```|~~~|#{1,6}[ \t]+)[ \t]*@[A-Za-z][\w-]*").unwrap()
});

const LEGAL_PHRASES: &[&str] = &[
    "copyright",
    "license",
    "licence",
    "all rights reserved",
    "terms and conditions",
    "spdx-license-identifier",
    "@preserve",
];

/// Shape of the tag markup found in a comment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarkupStyle {
    #[default]
    None,
    /// Bare `@tag` lines.
    Fragment,
    /// Tags introduced by a fence or a header marker.
    Block,
}

/// Plain kind equality. Grammar kind strings are dispatch keys as-is.
#[inline]
pub fn is_kind<N: SyntaxNode>(node: &N, kind: &str) -> bool {
    node.kind() == kind
}

/// Tokens carrying nothing for documentation: single punctuation or
/// operator characters and the ellipsis.
pub fn is_noise(kind: &str) -> bool {
    if kind == "..." {
        return true;
    }
    let mut chars = kind.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !(c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// A comment whose text mentions license or copyright boilerplate.
pub fn is_legal_comment<N: SyntaxNode>(source: &Source, node: &N) -> bool {
    if !is_kind(node, "comment") {
        return false;
    }
    let text = node.text(source).to_lowercase();
    LEGAL_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// A `/** ... */` comment.
pub fn is_documentation_comment<N: SyntaxNode>(source: &Source, node: &N) -> bool {
    is_kind(node, "comment") && is_documentation_text(node.text(source))
}

pub fn is_documentation_text(text: &str) -> bool {
    DOCUMENTATION.is_match(text)
}

/// A comment carrying tag markup of either style.
pub fn is_structured_markup_comment<N: SyntaxNode>(source: &Source, node: &N) -> bool {
    is_kind(node, "comment") && markup_style(node.text(source)) != MarkupStyle::None
}

pub fn is_markup_block(text: &str) -> bool {
    MARKUP_BLOCK.is_match(text)
}

pub fn is_markup_fragment(text: &str) -> bool {
    MARKUP_FRAGMENT.is_match(text)
}

pub fn markup_style(text: &str) -> MarkupStyle {
    if is_markup_block(text) {
        MarkupStyle::Block
    } else if is_markup_fragment(text) {
        MarkupStyle::Fragment
    } else {
        MarkupStyle::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Language, parse_tree};
    use rstest::rstest;

    #[rstest]
    #[case("/** Adds two numbers. */", true)]
    #[case("/**\n * Multi\n * line\n */", true)]
    #[case("/** */", true)]
    #[case("/* plain block */", false)]
    #[case("/**/", false)]
    #[case("/*** banner ***/", false)]
    #[case("// line comment", false)]
    #[case("/// triple slash", false)]
    fn test_documentation_text(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_documentation_text(text), expected);
    }

    #[rstest]
    #[case("/** Just prose. */", MarkupStyle::None)]
    #[case("/**\n * Sum.\n * @param {number} a first\n */", MarkupStyle::Fragment)]
    #[case("/** @deprecated */", MarkupStyle::Fragment)]
    #[case("/**\n * ```@example\n * add(1, 2)\n * ```\n */", MarkupStyle::Block)]
    #[case("/**\n * # @section Setup\n */", MarkupStyle::Block)]
    #[case("/** mail me at me@example.com */", MarkupStyle::None)]
    fn test_markup_style(#[case] text: &str, #[case] expected: MarkupStyle) {
        assert_eq!(markup_style(text), expected);
    }

    #[rstest]
    #[case("(", true)]
    #[case(";", true)]
    #[case("...", true)]
    #[case("=>", false)]
    #[case("a", false)]
    #[case("identifier", false)]
    fn test_noise(#[case] kind: &str, #[case] expected: bool) {
        assert_eq!(is_noise(kind), expected);
    }

    #[test]
    fn test_comment_predicates_on_nodes() {
        let source = Source::new(
            "a.js",
            "a.js",
            "/** Copyright (c) 2024 Acme. All rights reserved. */\n/** @param x */\nfunction f(x) {}\n",
        );
        let tree = parse_tree(&source, Language::JavaScript).unwrap();
        let children = tree.root_node().child_nodes();

        assert!(is_legal_comment(&source, &children[0]));
        assert!(is_documentation_comment(&source, &children[0]));
        assert!(!is_legal_comment(&source, &children[1]));
        assert!(is_structured_markup_comment(&source, &children[1]));
        assert!(!is_documentation_comment(&source, &children[2]));
        assert!(is_kind(&children[2], "function_declaration"));
    }
}
