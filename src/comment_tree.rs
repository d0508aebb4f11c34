//! Comment thread reconstruction.
//!
//! Comments arrive from the store as a flat list of (id, parent_id) rows,
//! already sorted by the caller's chosen order. This module rebuilds the
//! reply forest and flattens it back into a depth-annotated pre-order
//! listing for indented rendering, plus the "highlighted chain" view used
//! when a search result links into the middle of a thread.
//!
//! Both operations are pure: no I/O, no mutation of the input, total over
//! any input shape. Malformed parent references degrade (orphans become
//! top-level) rather than erroring, and parent-link cycles are guarded so
//! neither pass can loop forever.

use std::collections::{HashMap, HashSet};

use crate::db::Comment;
use crate::ids;

/// A comment paired with its nesting depth (top-level = 0).
#[derive(Debug, Clone, Copy)]
pub struct ThreadedComment<'a> {
    pub comment: &'a Comment,
    pub depth: usize,
}

/// The linear "thread of interest" around a highlighted comment: its
/// root-to-target ancestor path followed by all of its descendants, plus
/// the set of bare comment ids it contains so the full listing can skip
/// them.
#[derive(Debug, Clone, Default)]
pub struct HighlightedChain<'a> {
    pub chain: Vec<ThreadedComment<'a>>,
    pub included: HashSet<String>,
}

impl HighlightedChain<'_> {
    /// True when the target was not found and there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// Flatten a post's comments into pre-order with depths.
///
/// The input must be scoped to a single post and sorted however the caller
/// wants siblings ordered; relative input order among siblings is preserved.
/// A comment whose parent is missing from the set is treated as top-level
/// instead of being dropped, and comments trapped in a parent-link cycle
/// (unreachable from any root) are appended as top-level at the end, so the
/// output always contains every input comment exactly once.
#[must_use]
pub fn build_tree<'a>(post_id: &str, comments: &'a [Comment]) -> Vec<ThreadedComment<'a>> {
    let index: HashMap<&str, usize> = comments
        .iter()
        .enumerate()
        .map(|(i, c)| (ids::clean(&c.id), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (i, comment) in comments.iter().enumerate() {
        if ids::is_post_parent(&comment.parent_id, post_id) {
            roots.push(i);
            continue;
        }
        match index.get(ids::clean(&comment.parent_id)) {
            // A comment naming itself as parent would otherwise become its
            // own child and never terminate below.
            Some(&parent) if parent != i => children[parent].push(i),
            // Orphan: parent was deleted or not fetched
            _ => roots.push(i),
        }
    }

    let mut out = Vec::with_capacity(comments.len());
    let mut emitted = vec![false; comments.len()];

    // Explicit stack instead of recursion: thread depth is unbounded in
    // principle and some archived threads nest hundreds of levels deep.
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for &root in roots.iter().rev() {
        stack.push((root, 0));
    }
    while let Some((i, depth)) = stack.pop() {
        if emitted[i] {
            continue;
        }
        emitted[i] = true;
        out.push(ThreadedComment {
            comment: &comments[i],
            depth,
        });
        for &child in children[i].iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    // Mutually-referencing parent cycles are unreachable from any root;
    // surface them as top-level rather than silently losing them.
    for (i, comment) in comments.iter().enumerate() {
        if !emitted[i] {
            out.push(ThreadedComment { comment, depth: 0 });
        }
    }

    out
}

/// Extract the highlighted chain for `target_id` from an already-built tree.
///
/// Returns an empty chain when the target is not present. Depths are taken
/// from the tree entries, so ancestors keep their real nesting levels. Both
/// walks record visited ids in the included set, which doubles as the cycle
/// guard for the upward walk and the dedup guard for the downward one.
#[must_use]
pub fn highlighted_chain<'a>(
    post_id: &str,
    tree: &[ThreadedComment<'a>],
    target_id: &str,
) -> HighlightedChain<'a> {
    let mut by_id: HashMap<&str, usize> = HashMap::new();
    for (pos, entry) in tree.iter().enumerate() {
        by_id.entry(ids::clean(&entry.comment.id)).or_insert(pos);
    }

    let Some(&start) = by_id.get(ids::clean(target_id)) else {
        return HighlightedChain::default();
    };

    let mut included: HashSet<String> = HashSet::new();

    // Upward: target back to its top-level ancestor.
    let mut ancestors: Vec<usize> = Vec::new();
    let mut cur = start;
    loop {
        let comment = tree[cur].comment;
        if !included.insert(ids::clean(&comment.id).to_string()) {
            // Already visited: the parent chain loops back on itself
            break;
        }
        ancestors.push(cur);
        if ids::is_post_parent(&comment.parent_id, post_id) {
            break;
        }
        match by_id.get(ids::clean(&comment.parent_id)) {
            Some(&parent) => cur = parent,
            None => break, // orphaned ancestor
        }
    }
    ancestors.reverse();
    let mut chain: Vec<ThreadedComment<'a>> = ancestors.iter().map(|&pos| tree[pos]).collect();

    // Downward: all descendants of the target in pre-order.
    let mut kids: HashMap<&str, Vec<usize>> = HashMap::new();
    for (pos, entry) in tree.iter().enumerate() {
        if !ids::is_post_parent(&entry.comment.parent_id, post_id) {
            kids.entry(ids::clean(&entry.comment.parent_id))
                .or_default()
                .push(pos);
        }
    }

    let mut stack: Vec<usize> = Vec::new();
    if let Some(direct) = kids.get(ids::clean(target_id)) {
        for &pos in direct.iter().rev() {
            stack.push(pos);
        }
    }
    while let Some(pos) = stack.pop() {
        let comment = tree[pos].comment;
        let id = ids::clean(&comment.id);
        if !included.insert(id.to_string()) {
            continue;
        }
        chain.push(tree[pos]);
        if let Some(grandchildren) = kids.get(id) {
            for &child in grandchildren.iter().rev() {
                stack.push(child);
            }
        }
    }

    HighlightedChain { chain, included }
}
