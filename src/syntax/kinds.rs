//! Node-kind vocabularies of the JavaScript and TypeScript grammars.
//!
//! These are configuration, not logic: each list names grammar kinds that
//! fall into one dispatch bucket. TypeScript extends the JavaScript lists;
//! JSX is shared by JavaScript and TSX.

use super::table::{ContextRule, Role, Vocabulary};

pub(crate) const ROOT: &str = "program";
pub(crate) const COMMENT: &str = "comment";
pub(crate) const ERROR: &str = "ERROR";

// keyword tokens the context builders look for
pub(crate) const EXPORT: &str = "export";
pub(crate) const DEFAULT: &str = "default";
pub(crate) const DECORATOR: &str = "decorator";
pub(crate) const EXTENDS: &str = "extends";
pub(crate) const IMPLEMENTS: &str = "implements";
pub(crate) const HASH_BANG: &str = "hash_bang_line";

const JS_NON_TERMINALS: &[&str] = &[
    // declarations reached without a documentation comment
    "class_declaration",
    "class",
    "class_heritage",
    "class_body",
    "class_static_block",
    "function_declaration",
    "generator_function_declaration",
    "method_definition",
    "field_definition",
    "lexical_declaration",
    "variable_declaration",
    "variable_declarator",
    "export_statement",
    "export_clause",
    "export_specifier",
    "namespace_export",
    "import_statement",
    "import_clause",
    "named_imports",
    "import_specifier",
    "namespace_import",
    "nested_identifier",
    "decorator",
    // parameters and patterns
    "formal_parameters",
    "arguments",
    "assignment_pattern",
    "object_pattern",
    "object_assignment_pattern",
    "array_pattern",
    "rest_pattern",
    "pair_pattern",
    "computed_property_name",
    // statements
    "statement_block",
    "expression_statement",
    "return_statement",
    "throw_statement",
    "if_statement",
    "else_clause",
    "for_statement",
    "for_in_statement",
    "while_statement",
    "do_statement",
    "switch_statement",
    "switch_body",
    "switch_case",
    "switch_default",
    "try_statement",
    "catch_clause",
    "finally_clause",
    "break_statement",
    "continue_statement",
    "labeled_statement",
    "empty_statement",
    // expressions
    "parenthesized_expression",
    "binary_expression",
    "unary_expression",
    "update_expression",
    "assignment_expression",
    "augmented_assignment_expression",
    "ternary_expression",
    "member_expression",
    "subscript_expression",
    "call_expression",
    "new_expression",
    "await_expression",
    "yield_expression",
    "sequence_expression",
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
    "object",
    "array",
    "pair",
    "spread_element",
    "template_substitution",
];

const TS_NON_TERMINALS: &[&str] = &[
    "interface_declaration",
    "interface_body",
    "abstract_class_declaration",
    "type_alias_declaration",
    "enum_declaration",
    "enum_body",
    "enum_assignment",
    "internal_module",
    "module",
    "ambient_declaration",
    "function_signature",
    "method_signature",
    "abstract_method_signature",
    "property_signature",
    "call_signature",
    "construct_signature",
    "index_signature",
    "public_field_definition",
    "extends_clause",
    "implements_clause",
    "extends_type_clause",
    "required_parameter",
    "optional_parameter",
    "type_annotation",
    "omitting_type_annotation",
    "adding_type_annotation",
    "opting_type_annotation",
    "type_parameters",
    "type_parameter",
    "type_arguments",
    "constraint",
    "default_type",
    "generic_type",
    "nested_type_identifier",
    "object_type",
    "union_type",
    "intersection_type",
    "array_type",
    "tuple_type",
    "optional_type",
    "rest_type",
    "readonly_type",
    "function_type",
    "constructor_type",
    "parenthesized_type",
    "conditional_type",
    "infer_type",
    "lookup_type",
    "index_type_query",
    "type_query",
    "mapped_type_clause",
    "template_literal_type",
    "template_type",
    "type_predicate",
    "type_predicate_annotation",
    "asserts",
    "asserts_annotation",
    "as_expression",
    "satisfies_expression",
    "non_null_expression",
    "type_assertion",
    "instantiation_expression",
    "import_alias",
    "import_require_clause",
];

const JSX_NON_TERMINALS: &[&str] = &[
    "jsx_element",
    "jsx_self_closing_element",
    "jsx_opening_element",
    "jsx_closing_element",
    "jsx_attribute",
    "jsx_expression",
    "jsx_namespace_name",
];

const JSX_TERMINALS: &[&str] = &["jsx_text", "html_character_reference", "html_comment", "</", "/>"];

const JS_TERMINALS: &[&str] = &[
    "identifier",
    "property_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
    "private_property_identifier",
    "statement_identifier",
    "this",
    "super",
    "null",
    "undefined",
    "true",
    "false",
    "number",
    "string",
    "template_string",
    "regex",
    "meta_property",
    "optional_chain",
    "hash_bang_line",
    // keywords
    "export",
    "default",
    "class",
    "function",
    "extends",
    "const",
    "let",
    "var",
    "async",
    "await",
    "static",
    "get",
    "set",
    "new",
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "void",
    "delete",
    "yield",
    "throw",
    "if",
    "else",
    "for",
    "while",
    "do",
    "switch",
    "case",
    "break",
    "continue",
    "try",
    "catch",
    "finally",
    "import",
    "from",
    "as",
    "with",
    // multi-character operators
    "=>",
    "==",
    "===",
    "!=",
    "!==",
    "<=",
    ">=",
    "&&",
    "||",
    "??",
    "+=",
    "-=",
    "*=",
    "/=",
    "%=",
    "**",
    "**=",
    "&=",
    "|=",
    "^=",
    "&&=",
    "||=",
    "??=",
    "<<=",
    ">>=",
    ">>>=",
    "++",
    "--",
    "<<",
    ">>",
    ">>>",
    "?.",
    "${",
];

const TS_TERMINALS: &[&str] = &[
    "type_identifier",
    "predefined_type",
    "literal_type",
    "this_type",
    "existential_type",
    "accessibility_modifier",
    "override_modifier",
    "interface",
    "implements",
    "type",
    "enum",
    "namespace",
    "module",
    "declare",
    "abstract",
    "readonly",
    "keyof",
    "infer",
    "is",
    "satisfies",
    "unique",
    "global",
    "-?:",
    "+?:",
    "?:",
];

const fn rule(kind: &'static str, role: Role, rename: Option<&'static str>, keywords: &'static [&'static str]) -> ContextRule {
    ContextRule {
        kind,
        role,
        rename,
        keywords,
    }
}

const JS_CONTEXT: &[ContextRule] = &[
    rule("comment", Role::Comment, None, &[]),
    rule("export_statement", Role::Export, None, &[]),
    rule("expression_statement", Role::Wrapper, None, &[]),
    rule("class_declaration", Role::Declaration, Some("class"), &["class"]),
    rule("class", Role::Declaration, None, &["class"]),
    rule("function_declaration", Role::Declaration, Some("function"), &["function"]),
    rule("generator_function_declaration", Role::Declaration, Some("function"), &["function"]),
    rule("function_expression", Role::Declaration, Some("function"), &["function"]),
    rule("function", Role::Declaration, None, &["function"]),
    rule("method_definition", Role::Declaration, None, &[]),
    rule("field_definition", Role::Declaration, None, &[]),
    rule("lexical_declaration", Role::Declaration, None, &[]),
    rule("variable_declaration", Role::Declaration, None, &[]),
];

const TS_CONTEXT: &[ContextRule] = &[
    rule("interface_declaration", Role::Declaration, Some("interface"), &["interface"]),
    rule("abstract_class_declaration", Role::Declaration, Some("class"), &["class"]),
    rule("function_signature", Role::Declaration, Some("function"), &["function"]),
    rule("method_signature", Role::Declaration, None, &[]),
    rule("abstract_method_signature", Role::Declaration, None, &[]),
    rule("property_signature", Role::Declaration, None, &[]),
    rule("public_field_definition", Role::Declaration, None, &[]),
    rule("type_alias_declaration", Role::Declaration, Some("type"), &["type"]),
    rule("enum_declaration", Role::Declaration, Some("enum"), &["enum"]),
    rule("internal_module", Role::Namespace, Some("namespace"), &["namespace"]),
    rule("module", Role::Module, None, &["module"]),
    rule("ambient_declaration", Role::Wrapper, None, &["declare"]),
];

const HERITAGE: &[&str] = &["class_heritage", "extends_clause", "implements_clause", "extends_type_clause"];

const EXPORTS: &[&str] = &["export_statement"];

pub(super) const JAVASCRIPT: Vocabulary = Vocabulary {
    name: "javascript",
    non_terminals: &[JS_NON_TERMINALS, JSX_NON_TERMINALS],
    terminals: &[JS_TERMINALS, JSX_TERMINALS],
    context: &[JS_CONTEXT],
    heritage: HERITAGE,
    exports: EXPORTS,
    namespaces: &[],
};

pub(super) const TYPESCRIPT: Vocabulary = Vocabulary {
    name: "typescript",
    non_terminals: &[JS_NON_TERMINALS, TS_NON_TERMINALS],
    terminals: &[JS_TERMINALS, TS_TERMINALS],
    context: &[JS_CONTEXT, TS_CONTEXT],
    heritage: HERITAGE,
    exports: EXPORTS,
    namespaces: &["internal_module", "module"],
};

pub(super) const TSX: Vocabulary = Vocabulary {
    name: "tsx",
    non_terminals: &[JS_NON_TERMINALS, TS_NON_TERMINALS, JSX_NON_TERMINALS],
    terminals: &[JS_TERMINALS, TS_TERMINALS, JSX_TERMINALS],
    context: &[JS_CONTEXT, TS_CONTEXT],
    heritage: HERITAGE,
    exports: EXPORTS,
    namespaces: &["internal_module", "module"],
};
