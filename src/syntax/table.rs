//! Per-language dispatch tables.
//!
//! A [`LanguageTable`] maps every grammar kind the engine understands to a
//! [`Bucket`] for ordinary traversal and, for declaration kinds, to a
//! [`ContextRule`] used when the node is documented or exported.

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

use super::kinds;

/// Traversal bucket of a node kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    Root,
    Comment,
    Error,
    NonTerminal,
    Terminal,
}

/// How a declaration kind is built when reached through context dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Class, function, interface, signature, field or variable declaration.
    Declaration,
    /// Declaration that also sets `properties.namespace`.
    Namespace,
    /// Declaration that also sets `properties.module`.
    Module,
    /// Export statement: records export/default status, then dispatches on
    /// the exported declaration.
    Export,
    /// Statement wrapping a declaration (`namespace` inside an expression
    /// statement, `declare ...`): dispatches on the wrapped node.
    Wrapper,
    /// A documentation comment documenting the next node in turn.
    Comment,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContextRule {
    pub kind: &'static str,
    pub role: Role,
    /// Kind given to the built node, when it differs from the grammar kind.
    pub rename: Option<&'static str>,
    /// Leading keyword tokens consumed by the builder.
    pub keywords: &'static [&'static str],
}

impl ContextRule {
    /// Whether `kind` is one of the keywords this rule strips.
    pub fn is_keyword(&self, kind: &str) -> bool {
        self.keywords.iter().any(|keyword| *keyword == kind)
    }
}

/// Static description of a language vocabulary.
pub(super) struct Vocabulary {
    pub name: &'static str,
    pub non_terminals: &'static [&'static [&'static str]],
    pub terminals: &'static [&'static [&'static str]],
    pub context: &'static [&'static [ContextRule]],
    pub heritage: &'static [&'static str],
    pub exports: &'static [&'static str],
    pub namespaces: &'static [&'static str],
}

pub(crate) static JAVASCRIPT: Lazy<LanguageTable> = Lazy::new(|| LanguageTable::from_vocabulary(&kinds::JAVASCRIPT));
pub(crate) static TYPESCRIPT: Lazy<LanguageTable> = Lazy::new(|| LanguageTable::from_vocabulary(&kinds::TYPESCRIPT));
pub(crate) static TSX: Lazy<LanguageTable> = Lazy::new(|| LanguageTable::from_vocabulary(&kinds::TSX));

/// Kind → bucket and kind → context-rule lookups for one language.
#[derive(Debug)]
pub struct LanguageTable {
    name: &'static str,
    buckets: FxHashMap<&'static str, Bucket>,
    context: FxHashMap<&'static str, ContextRule>,
    heritage: FxHashSet<&'static str>,
    exports: FxHashSet<&'static str>,
    namespaces: FxHashSet<&'static str>,
}

impl LanguageTable {
    fn from_vocabulary(vocabulary: &Vocabulary) -> Self {
        let mut buckets = FxHashMap::default();

        // A keyword token and a node may share a kind name (`class`,
        // `function`, `module`); the non-terminal entry wins and a token
        // simply has no children to visit.
        for kind in vocabulary.terminals.iter().flat_map(|list| list.iter()) {
            buckets.insert(*kind, Bucket::Terminal);
        }
        for kind in vocabulary.non_terminals.iter().flat_map(|list| list.iter()) {
            buckets.insert(*kind, Bucket::NonTerminal);
        }
        buckets.insert(kinds::ROOT, Bucket::Root);
        buckets.insert(kinds::COMMENT, Bucket::Comment);
        buckets.insert(kinds::ERROR, Bucket::Error);

        let context = vocabulary
            .context
            .iter()
            .flat_map(|rules| rules.iter())
            .map(|rule| (rule.kind, *rule))
            .collect();

        Self {
            name: vocabulary.name,
            buckets,
            context,
            heritage: vocabulary.heritage.iter().copied().collect(),
            exports: vocabulary.exports.iter().copied().collect(),
            namespaces: vocabulary.namespaces.iter().copied().collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn root_kind(&self) -> &'static str {
        kinds::ROOT
    }

    pub fn comment_kind(&self) -> &'static str {
        kinds::COMMENT
    }

    /// Traversal bucket of `kind`, `None` for unsupported kinds.
    pub fn bucket(&self, kind: &str) -> Option<Bucket> {
        self.buckets.get(kind).copied()
    }

    /// Context rule of a declaration kind.
    pub fn context_rule(&self, kind: &str) -> Option<&ContextRule> {
        self.context.get(kind)
    }

    /// Kinds wrapping `extends`/`implements` keywords.
    pub fn is_heritage(&self, kind: &str) -> bool {
        self.heritage.contains(kind)
    }

    /// Top-level statement kinds collected independently of comments.
    pub fn is_export(&self, kind: &str) -> bool {
        self.exports.contains(kind)
    }

    /// Namespace-like kinds collected at top level when wrapped in an
    /// expression statement.
    pub fn is_namespace(&self, kind: &str) -> bool {
        self.namespaces.contains(kind)
    }
}
