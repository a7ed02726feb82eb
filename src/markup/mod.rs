//! Structured documentation extracted from comment text.
//!
//! The engine only depends on the [`MarkupParser`] trait. [`DocParser`] is
//! the default implementation: prose, `@tag` lines and fenced code blocks.
//! All ranges it produces are relative to the comment text; the node
//! factory shifts them into file coordinates.

mod parser;

pub use parser::DocParser;

use smol_str::SmolStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::base::Ranges;
use crate::syntax::MarkupStyle;

/// Parses the raw text of a documentation comment.
pub trait MarkupParser: Send + Sync {
    fn parse(&self, text: &str) -> DocComment;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocComment {
    pub markup: MarkupStyle,
    /// Prose before the first tag.
    pub description: String,
    pub tags: Vec<DocTag>,
    pub fences: Vec<CodeFence>,
}

impl DocComment {
    /// First tag called `name`.
    pub fn tag(&self, name: &str) -> Option<&DocTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// All tags called `name`, in source order.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocTag> + 'a {
        self.tags.iter().filter(move |tag| tag.name == name)
    }

    /// Move every range into file coordinates, given the ranges of the
    /// comment itself.
    pub fn shifted(mut self, comment: &Ranges) -> Self {
        for tag in &mut self.tags {
            tag.ranges = tag.ranges.placed_in(comment);
        }
        for fence in &mut self.fences {
            fence.ranges = fence.ranges.placed_in(comment);
        }
        self
    }
}

/// One `@tag` with its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocTag {
    pub name: SmolStr,
    /// Inline `{...}` argument, usually a type expression.
    pub type_expr: Option<String>,
    /// Named argument of naming tags such as `@param`.
    pub ident: Option<String>,
    /// `[ident]` or `[ident=default]`.
    pub optional: bool,
    pub default: Option<String>,
    pub description: String,
    pub ranges: Ranges,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CodeFence {
    pub lang: Option<SmolStr>,
    pub code: String,
    pub ranges: Ranges,
}
