//! Program-level traversal and reconciliation.
//!
//! Declarations are reached along two paths: as the context of a
//! documentation comment, and as a top-level statement collected on its own
//! (exports, wrapped namespaces). Both lists are built completely before
//! [`plan`] decides, from the immutable lists, which top-level entries are
//! duplicates or matches; [`apply`] then builds the output sequence.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use super::Visitor;
use crate::ast::{AstNode, LocationKey, Properties};
use crate::diagnostics::{DiagnosticSink, ErrorKind};
use crate::syntax::classify::is_noise;
use crate::syntax::{Bucket, Role, SyntaxNode, kinds};

impl<S: DiagnosticSink> Visitor<'_, S> {
    /// The program algorithm: documented pairs first, then the top-level
    /// declarations no pair already renders.
    pub fn visit_program<N: SyntaxNode>(&mut self, root: &N) -> Vec<AstNode> {
        let mut children = root.child_nodes();
        if self.strip_legal_header {
            self.strip_header(&mut children);
        }

        let mut pairs: Vec<AstNode> = Vec::new();
        let mut decls = Vec::new();
        // Syntax node of the latest pair's context, and that pair's index.
        let mut documented: Option<(N, usize)> = None;

        for child in &children {
            let kind = child.kind();
            if child.is_missing() || self.table.bucket(kind) == Some(Bucket::Error) {
                self.report(child, ErrorKind::UnderlyingParseError);
            } else if kind == self.table.comment_kind() {
                if let Some(pair) = self.visit_comment(child).filter(|node| node.context.is_some()) {
                    documented = self.documented_sibling(child).map(|next| (next, pairs.len()));
                    pairs.push(pair);
                }
            } else if self.is_top_level_declaration(child) {
                // Built once, as its pair's context; the plan merges the duplicate.
                let built = documented
                    .as_ref()
                    .filter(|(node, _)| node == child)
                    .and_then(|(_, index)| pairs[*index].context().cloned());
                match built {
                    Some(decl) => decls.push(decl),
                    None => decls.extend(self.visit_context(child, Properties::default())),
                }
            }
        }

        let plan = plan(&pairs, &decls);
        let (pair_count, decl_count) = (pairs.len(), decls.len());
        let (duplicates, matched) = (plan.duplicates, plan.matched);
        let output = apply(plan, pairs, decls);

        debug!(
            path = %self.source().path,
            language = self.table.name(),
            pairs = pair_count,
            declarations = decl_count,
            duplicates,
            matched,
            output = output.len(),
            "visited program"
        );
        output
    }

    /// Drop one license comment at the head of the file (after a `#!` line).
    fn strip_header<N: SyntaxNode>(&self, children: &mut Vec<N>) {
        let first = children
            .iter()
            .position(|child| child.kind() != kinds::HASH_BANG);
        if let Some(index) = first.filter(|&index| self.is_legal_header(&children[index])) {
            trace!(index, "stripped legal header");
            children.remove(index);
        }
    }

    /// Exports, plus namespaces either bare or wrapped in a statement
    /// (`namespace N {}` as an expression statement, `declare module`).
    fn is_top_level_declaration<N: SyntaxNode>(&self, node: &N) -> bool {
        let kind = node.kind();
        if self.table.is_export(kind) || self.table.is_namespace(kind) {
            return true;
        }
        let Some(rule) = self
            .table
            .context_rule(kind)
            .filter(|rule| rule.role == Role::Wrapper)
        else {
            return false;
        };
        node.child_nodes()
            .iter()
            .find(|child| !is_noise(child.kind()) && !rule.is_keyword(child.kind()))
            .is_some_and(|child| self.table.is_namespace(child.kind()))
    }
}

/// Decisions of one reconciliation, computed without touching either list.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Plan {
    /// Per top-level declaration: the pair whose context receives its
    /// properties, if it is a duplicate or a match.
    targets: Vec<Option<usize>>,
    duplicates: usize,
    matched: usize,
}

/// Compute the reconciliation of documented `pairs` against top-level
/// `decls`.
///
/// 1. A declaration whose location key is the key of some pair's context
///    renders the same source declaration: it is a duplicate, merged into
///    the first such context.
/// 2. Of the remaining declarations, the one at position `i` matches the
///    first pair whose context has a child of the same kind at position `i`.
pub(crate) fn plan(pairs: &[AstNode], decls: &[AstNode]) -> Plan {
    let mut contexts: FxHashMap<LocationKey, usize> = FxHashMap::default();
    for (index, pair) in pairs.iter().enumerate() {
        if let Some(context) = pair.context() {
            contexts.entry(context.location_key()).or_insert(index);
        }
    }

    let mut targets = vec![None; decls.len()];
    let mut duplicates = 0;
    for (target, decl) in targets.iter_mut().zip(decls) {
        if let Some(&pair) = contexts.get(&decl.location_key()) {
            trace!(key = %decl.location_key(), kind = %decl.kind, "duplicate declaration");
            *target = Some(pair);
            duplicates += 1;
        }
    }

    let remaining: Vec<usize> = (0..decls.len()).filter(|&index| targets[index].is_none()).collect();
    let mut matched_decls: FxHashSet<usize> = FxHashSet::default();
    for (pair_index, pair) in pairs.iter().enumerate() {
        let Some(context) = pair.context() else {
            continue;
        };
        for (position, child) in context.children.iter().enumerate() {
            let Some(&decl_index) = remaining.get(position) else {
                break;
            };
            if child.kind == decls[decl_index].kind && matched_decls.insert(decl_index) {
                trace!(position, kind = %child.kind, "matched declaration");
                targets[decl_index] = Some(pair_index);
            }
        }
    }

    Plan {
        targets,
        duplicates,
        matched: matched_decls.len(),
    }
}

/// Build the output sequence: the pairs, with merged properties on their
/// contexts, followed by the declarations the plan left unclaimed.
pub(crate) fn apply(plan: Plan, mut pairs: Vec<AstNode>, decls: Vec<AstNode>) -> Vec<AstNode> {
    let mut unclaimed = Vec::new();
    for (decl, target) in decls.into_iter().zip(plan.targets) {
        let pair = match target {
            Some(index) => pairs.get_mut(index),
            None => None,
        };
        match pair {
            Some(pair) => {
                if let (Some(context), Some(properties)) = (pair.context.as_deref_mut(), decl.properties) {
                    context.merge_properties(&properties);
                }
            }
            None => unclaimed.push(decl),
        }
    }

    pairs.extend(unclaimed);
    pairs
}
