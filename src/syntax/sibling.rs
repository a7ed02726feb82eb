//! Sibling resolution: which node a comment documents.

use super::SyntaxNode;

/// The node following `node`.
///
/// Without `children` this is the raw next sibling in the syntax tree,
/// anonymous tokens included. With `children` (a list the caller already
/// filtered) it is the entry after `node` in that list, or `None` when
/// `node` is last or absent from it.
///
/// The visitor always pairs by raw adjacency; the filtered form serves
/// callers that resolve siblings over their own node lists.
pub fn sibling<N: SyntaxNode>(node: &N, children: Option<&[N]>) -> Option<N> {
    match children {
        None => node.next_node(),
        Some(children) => {
            let index = children.iter().position(|child| child == node)?;
            children.get(index + 1).cloned()
        }
    }
}
