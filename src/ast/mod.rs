//! The documentation AST.
//!
//! [`AstNode`] is the output unit of a parse: a normalized copy of one
//! syntax node with its verbatim text, both range representations, its
//! relevant children and, for documentation comments, the declaration the
//! comment documents (`context`) and the parsed comment markup.

mod factory;
mod properties;
mod range;

pub use factory::{NodeFactory, Payload};
pub use properties::{Exports, Inheritance, Properties};
pub use range::range;

use std::fmt;

use smol_str::SmolStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::base::{LineCol, Location, Ranges, TextRange};
use crate::markup::DocComment;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AstNode {
    pub kind: SmolStr,
    pub text: String,
    pub position: TextRange,
    pub location: Location,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<AstNode>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub context: Option<Box<AstNode>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub properties: Option<Properties>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment: Option<DocComment>,
}

impl AstNode {
    pub fn ranges(&self) -> Ranges {
        Ranges {
            position: self.position,
            location: self.location,
        }
    }

    pub fn start(&self) -> LineCol {
        self.location.start()
    }

    /// Identity of the source declaration this node renders.
    pub fn location_key(&self) -> LocationKey {
        LocationKey::from(self.start())
    }

    /// The documented declaration, for comment nodes.
    pub fn context(&self) -> Option<&AstNode> {
        self.context.as_deref()
    }

    pub fn child(&self, kind: &str) -> Option<&AstNode> {
        self.children.iter().find(|child| child.kind == kind)
    }

    /// This node and everything below it (children, then context), depth first.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Merge `properties` into the node, creating the bag if needed.
    pub(crate) fn merge_properties(&mut self, properties: &Properties) {
        if properties.is_empty() {
            return;
        }
        self.properties
            .get_or_insert_with(Properties::default)
            .merge(properties);
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(context) = node.context.as_deref() {
            self.stack.push(context);
        }
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// `"{row.start}:{column.start}"` of a node: two nodes with the same key
/// render the same declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey {
    pub row: u32,
    pub column: u32,
}

impl From<LineCol> for LocationKey {
    fn from(start: LineCol) -> Self {
        Self {
            row: start.line,
            column: start.col,
        }
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}
