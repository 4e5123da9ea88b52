/**
 * Reply-Tree Materialization
 *
 * Threads store replies as a flat, creation-time-ordered list in which
 * each post optionally names a parent post. The display layer wants
 * that list pre-ordered (each post immediately followed by its
 * subtree) with a nesting depth on every post. `materialize` performs
 * that transformation as a pure function over an owned input.
 *
 * # Malformed Input
 *
 * Parent references are user data and cannot be trusted to form a
 * forest:
 *
 * - A parent that does not resolve within the input (the referenced
 *   post was deleted, or belongs to another thread) makes the post an
 *   orphan. Orphans - and anything only reachable through them - are
 *   appended after all natural roots and their subtrees, at depth 0,
 *   in original input order.
 * - A reference cycle can never be entered from a root, so its members
 *   fall out as orphans too; a visited set additionally guarantees no
 *   post is ever emitted twice.
 *
 * There is no error path: every input produces a deterministic output
 * containing each input post exactly once.
 */
use crate::shared::model::Post;
use std::collections::HashMap;

/// Assign display depths and pre-order the posts of one thread.
///
/// `posts` must be in creation-time ascending order; siblings are
/// visited in that order, which makes the result deterministic and the
/// function idempotent (re-running on its own output yields the same
/// sequence and depths).
pub fn materialize(posts: Vec<Post>) -> Vec<Post> {
    if posts.is_empty() {
        return posts;
    }

    // Children of post P, as indices into `posts`, in input order.
    let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
    for (idx, post) in posts.iter().enumerate() {
        if let Some(parent) = post.parent_id {
            children.entry(parent).or_default().push(idx);
        }
    }

    let mut visited = vec![false; posts.len()];
    let mut order: Vec<(usize, i32)> = Vec::with_capacity(posts.len());

    // Depth-first from every natural root, in input order. Iterative
    // so a degenerate reply chain cannot overflow the call stack.
    let mut stack: Vec<(usize, i32)> = Vec::new();
    for (idx, post) in posts.iter().enumerate() {
        if post.parent_id.is_some() {
            continue;
        }
        stack.push((idx, 0));
        while let Some((cur, depth)) = stack.pop() {
            if visited[cur] {
                continue;
            }
            visited[cur] = true;
            order.push((cur, depth));
            if let Some(kids) = children.get(&posts[cur].id) {
                // Reverse so the stack pops children in input order.
                for &kid in kids.iter().rev() {
                    if !visited[kid] {
                        stack.push((kid, depth + 1));
                    }
                }
            }
        }
    }

    // Whatever was not reachable from a natural root: dangling parent
    // references, cycles, descendants of either. Emitted flat at the
    // end, input order preserved.
    for idx in 0..posts.len() {
        if !visited[idx] {
            order.push((idx, 0));
        }
    }

    let mut slots: Vec<Option<Post>> = posts.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|(idx, depth)| {
            slots[idx].take().map(|mut post| {
                post.depth = depth;
                post
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    /// Posts with ids `1..=n` and the given parents, creation times
    /// ascending with id.
    fn posts(parents: &[Option<i64>]) -> Vec<Post> {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        parents
            .iter()
            .enumerate()
            .map(|(i, parent)| Post {
                id: (i + 1) as i64,
                thread_id: 1,
                parent_id: *parent,
                author: "Anonymous".to_string(),
                content: format!("post {}", i + 1),
                media_path: None,
                media_type: None,
                created_at: base + Duration::seconds(i as i64),
                depth: 0,
            })
            .collect()
    }

    fn ids_and_depths(posts: &[Post]) -> (Vec<i64>, Vec<i32>) {
        (
            posts.iter().map(|p| p.id).collect(),
            posts.iter().map(|p| p.depth).collect(),
        )
    }

    #[test]
    fn test_empty_input() {
        assert!(materialize(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_root() {
        let result = materialize(posts(&[None]));
        assert_eq!(ids_and_depths(&result), (vec![1], vec![0]));
    }

    #[test]
    fn test_preorder_with_depths() {
        // 1 <- 2 <- 4, 1 <- 3
        let result = materialize(posts(&[None, Some(1), Some(1), Some(2)]));
        assert_eq!(ids_and_depths(&result), (vec![1, 2, 4, 3], vec![0, 1, 2, 1]));
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let result = materialize(posts(&[None, Some(99)]));
        assert_eq!(ids_and_depths(&result), (vec![1, 2], vec![0, 0]));
    }

    #[test]
    fn test_orphans_follow_natural_roots() {
        // 3 is orphaned but created before root 4; natural trees still
        // come first.
        let result = materialize(posts(&[None, Some(1), Some(77), None]));
        assert_eq!(ids_and_depths(&result), (vec![1, 2, 4, 3], vec![0, 1, 0, 0]));
    }

    #[test]
    fn test_orphan_descendants_emitted_flat() {
        // 2's parent is gone; 3 replies to 2. Neither is reachable from
        // a root, so both surface at depth 0 in input order.
        let result = materialize(posts(&[None, Some(99), Some(2)]));
        assert_eq!(ids_and_depths(&result), (vec![1, 2, 3], vec![0, 0, 0]));
    }

    #[test]
    fn test_cycle_degrades_to_flat() {
        // 2 and 3 reference each other; no root reaches them.
        let result = materialize(posts(&[None, Some(3), Some(2)]));
        assert_eq!(ids_and_depths(&result), (vec![1, 2, 3], vec![0, 0, 0]));
    }

    #[test]
    fn test_self_reference_is_orphaned() {
        let result = materialize(posts(&[None, Some(2)]));
        assert_eq!(ids_and_depths(&result), (vec![1, 2], vec![0, 0]));
    }

    #[test]
    fn test_multiple_roots_keep_input_order() {
        let result = materialize(posts(&[None, None, Some(2), None]));
        assert_eq!(ids_and_depths(&result), (vec![1, 2, 3, 4], vec![0, 0, 1, 0]));
    }

    #[test]
    fn test_each_post_emitted_exactly_once() {
        let input = posts(&[None, Some(1), Some(1), Some(2), Some(99), None]);
        let result = materialize(input.clone());
        assert_eq!(result.len(), input.len());
        let mut ids: Vec<i64> = result.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let first = materialize(posts(&[None, Some(1), Some(99), Some(1), Some(4)]));
        let stripped: Vec<Post> = first
            .iter()
            .cloned()
            .map(|mut p| {
                p.depth = 0;
                p
            })
            .collect();
        let second = materialize(stripped);
        assert_eq!(second, first);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        // 10k-deep reply ladder; recursion would blow the stack here.
        let parents: Vec<Option<i64>> = (0..10_000)
            .map(|i| if i == 0 { None } else { Some(i as i64) })
            .collect();
        let result = materialize(posts(&parents));
        assert_eq!(result.len(), 10_000);
        assert_eq!(result.last().map(|p| p.depth), Some(9_999));
    }
}
