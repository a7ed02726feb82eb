//! Range calculator.

use crate::base::Ranges;
use crate::syntax::SyntaxNode;

/// Byte and row/column ranges of `node`.
///
/// With an `offset`, each coordinate is added to the offset's start
/// coordinate, which expresses a node of an independently parsed snippet
/// in the coordinates of the document the snippet came from.
pub fn range<N: SyntaxNode>(node: &N, offset: Option<&Ranges>) -> Ranges {
    let own = Ranges::new(node.text_range(), node.start_point(), node.end_point());
    match offset {
        Some(offset) => own.shifted(offset),
        None => own,
    }
}
