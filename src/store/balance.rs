//! AVL balance maintenance: single and double rotations plus the
//! `balance` step applied to every ancestor after a structural change.
//!
//! All functions operate on a parent's child slot (`&mut Link`) so the
//! subtree root can be replaced in place.

use super::entry::{height, Entry, Link};

/// Largest height difference tolerated between two sibling subtrees.
const ALLOWED_IMBALANCE: i32 = 1;

/// Which restructuring a slot needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fix {
    None,
    SingleRight,
    DoubleLeftRight,
    SingleLeft,
    DoubleRightLeft,
}

/// Restore the AVL property at `slot`, assuming both children are
/// balanced and their heights differ by at most two.  Always leaves the
/// subtree root with a freshly computed height.
pub(crate) fn balance(slot: &mut Link) {
    let fix = match slot.as_ref() {
        None => return,
        Some(node) => plan(node),
    };

    match fix {
        Fix::None => {}
        Fix::SingleRight => rotate_with_left_child(slot),
        Fix::DoubleLeftRight => double_with_left_child(slot),
        Fix::SingleLeft => rotate_with_right_child(slot),
        Fix::DoubleRightLeft => double_with_right_child(slot),
    }

    if let Some(node) = slot.as_mut() {
        node.update_height();
    }
}

fn plan(node: &Entry) -> Fix {
    let left = height(&node.left);
    let right = height(&node.right);

    if left - right > ALLOWED_IMBALANCE {
        match node.left.as_ref() {
            Some(l) if height(&l.left) >= height(&l.right) => Fix::SingleRight,
            Some(_) => Fix::DoubleLeftRight,
            None => Fix::None,
        }
    } else if right - left > ALLOWED_IMBALANCE {
        match node.right.as_ref() {
            Some(r) if height(&r.right) >= height(&r.left) => Fix::SingleLeft,
            Some(_) => Fix::DoubleRightLeft,
            None => Fix::None,
        }
    } else {
        Fix::None
    }
}

/// Single right rotation: the left child `k1` becomes the subtree root.
pub(crate) fn rotate_with_left_child(slot: &mut Link) {
    let Some(mut k2) = slot.take() else {
        return;
    };
    let Some(mut k1) = k2.left.take() else {
        *slot = Some(k2);
        return;
    };

    tracing::debug!(pivot = k2.id, new_root = k1.id, "rotate with left child");

    k2.left = k1.right.take();
    k2.update_height();
    k1.right = Some(k2);
    k1.update_height();
    *slot = Some(k1);
}

/// Single left rotation: the right child `k2` becomes the subtree root.
pub(crate) fn rotate_with_right_child(slot: &mut Link) {
    let Some(mut k1) = slot.take() else {
        return;
    };
    let Some(mut k2) = k1.right.take() else {
        *slot = Some(k1);
        return;
    };

    tracing::debug!(pivot = k1.id, new_root = k2.id, "rotate with right child");

    k1.right = k2.left.take();
    k1.update_height();
    k2.left = Some(k1);
    k2.update_height();
    *slot = Some(k2);
}

/// Left-right case: rotate the left child left, then this node right.
pub(crate) fn double_with_left_child(slot: &mut Link) {
    if let Some(k3) = slot.as_mut() {
        rotate_with_right_child(&mut k3.left);
    }
    rotate_with_left_child(slot);
}

/// Right-left case: rotate the right child right, then this node left.
pub(crate) fn double_with_right_child(slot: &mut Link) {
    if let Some(k1) = slot.as_mut() {
        rotate_with_left_child(&mut k1.right);
    }
    rotate_with_right_child(slot);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: i64) -> Link {
        Some(Box::new(Entry::new(id, "pw", "msg", 1)))
    }

    fn node(id: i64, left: Link, right: Link) -> Link {
        let mut entry = Entry::new(id, "pw", "msg", 1);
        entry.left = left;
        entry.right = right;
        entry.update_height();
        Some(Box::new(entry))
    }

    fn root_id(slot: &Link) -> i64 {
        slot.as_ref().map(|e| e.id).unwrap()
    }

    fn child_ids(slot: &Link) -> (Option<i64>, Option<i64>) {
        let e = slot.as_ref().unwrap();
        (
            e.left.as_ref().map(|c| c.id),
            e.right.as_ref().map(|c| c.id),
        )
    }

    #[test]
    fn balance_on_empty_slot_is_noop() {
        let mut slot: Link = None;
        balance(&mut slot);
        assert!(slot.is_none());
    }

    #[test]
    fn left_left_case_uses_single_rotation() {
        // 3 -> 2 -> 1 down the left spine.
        let mut slot = node(3, node(2, leaf(1), None), None);
        balance(&mut slot);

        assert_eq!(root_id(&slot), 2);
        assert_eq!(child_ids(&slot), (Some(1), Some(3)));
        assert_eq!(height(&slot), 1);
    }

    #[test]
    fn right_right_case_uses_single_rotation() {
        let mut slot = node(1, None, node(2, None, leaf(3)));
        balance(&mut slot);

        assert_eq!(root_id(&slot), 2);
        assert_eq!(child_ids(&slot), (Some(1), Some(3)));
        assert_eq!(height(&slot), 1);
    }

    #[test]
    fn left_right_case_uses_double_rotation() {
        let mut slot = node(3, node(1, None, leaf(2)), None);
        balance(&mut slot);

        assert_eq!(root_id(&slot), 2);
        assert_eq!(child_ids(&slot), (Some(1), Some(3)));
    }

    #[test]
    fn right_left_case_uses_double_rotation() {
        let mut slot = node(1, None, node(3, leaf(2), None));
        balance(&mut slot);

        assert_eq!(root_id(&slot), 2);
        assert_eq!(child_ids(&slot), (Some(1), Some(3)));
    }

    #[test]
    fn balanced_subtree_only_gets_height_refresh() {
        let mut slot = node(2, leaf(1), leaf(3));
        if let Some(e) = slot.as_mut() {
            e.height = 42;
        }
        balance(&mut slot);

        assert_eq!(root_id(&slot), 2);
        assert_eq!(height(&slot), 1);
    }

    #[test]
    fn rotation_moves_inner_grandchild_across() {
        //        4                2
        //       / \              / \
        //      2   5    ->      1   4
        //     / \                  / \
        //    1   3                3   5
        //   /
        //  0   (makes 4 left-heavy by two)
        let mut slot = node(4, node(2, node(1, leaf(0), None), leaf(3)), leaf(5));
        balance(&mut slot);

        assert_eq!(root_id(&slot), 2);
        let right = slot.as_ref().unwrap().right.as_ref().unwrap();
        assert_eq!(right.id, 4);
        assert_eq!(right.left.as_ref().map(|e| e.id), Some(3));
        assert_eq!(right.right.as_ref().map(|e| e.id), Some(5));
    }
}
