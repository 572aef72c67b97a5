//! Arena storage for binary search tree nodes
//!
//! Nodes live in one `Vec` and refer to each other by `u32` index, with
//! [`NIL`] as the null link. Freed slots are recycled through a free list.
//! Every accessor treats [`NIL`] like a null node (no children, no parent),
//! so the rebalancing code can follow the textbook case analysis without
//! special-casing missing relatives.

use std::fmt::Debug;

/// Null node link
pub const NIL: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: u32,
    pub(crate) right: u32,
    pub(crate) parent: u32,
    /// AVL height or red/black colour
    pub(crate) tag: u8,
}

#[derive(Debug, Clone)]
pub struct Arena<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<u32>,
    pub(crate) root: u32,
    len: usize,
}

impl<K: Copy, V: Copy> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NIL,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Store a new unlinked node under `parent`
    pub(crate) fn alloc(&mut self, key: K, value: V, parent: u32, tag: u8) -> u32 {
        let node = Node { key, value, left: NIL, right: NIL, parent, tag };
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            self.nodes[idx as usize] = node;
            return idx;
        }
        let idx = self.nodes.len();
        if idx >= NIL as usize {
            panic!("tree capacity overflow");
        }
        self.nodes.push(node);
        idx as u32
    }

    /// Return an unlinked node to the free list
    pub(crate) fn release(&mut self, idx: u32) {
        let node = &mut self.nodes[idx as usize];
        node.left = NIL;
        node.right = NIL;
        node.parent = NIL;
        self.free.push(idx);
        self.len -= 1;
    }

    #[inline]
    pub(crate) fn key(&self, n: u32) -> K {
        self.nodes[n as usize].key
    }

    #[inline]
    pub(crate) fn value(&self, n: u32) -> V {
        self.nodes[n as usize].value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, n: u32) -> &mut V {
        &mut self.nodes[n as usize].value
    }

    #[inline]
    pub(crate) fn entry(&self, n: u32) -> (K, V) {
        let node = &self.nodes[n as usize];
        (node.key, node.value)
    }

    pub(crate) fn set_entry(&mut self, n: u32, key: K, value: V) {
        let node = &mut self.nodes[n as usize];
        node.key = key;
        node.value = value;
    }

    #[inline]
    pub(crate) fn left(&self, n: u32) -> u32 {
        if n == NIL {
            NIL
        } else {
            self.nodes[n as usize].left
        }
    }

    #[inline]
    pub(crate) fn right(&self, n: u32) -> u32 {
        if n == NIL {
            NIL
        } else {
            self.nodes[n as usize].right
        }
    }

    #[inline]
    pub(crate) fn parent(&self, n: u32) -> u32 {
        if n == NIL {
            NIL
        } else {
            self.nodes[n as usize].parent
        }
    }

    /// Tag of `n`, or `nil_tag` for the null node
    #[inline]
    pub(crate) fn tag_or(&self, n: u32, nil_tag: u8) -> u8 {
        if n == NIL {
            nil_tag
        } else {
            self.nodes[n as usize].tag
        }
    }

    #[inline]
    pub(crate) fn set_tag(&mut self, n: u32, tag: u8) {
        if n != NIL {
            self.nodes[n as usize].tag = tag;
        }
    }

    #[inline]
    pub(crate) fn set_left(&mut self, n: u32, child: u32) {
        if n != NIL {
            self.nodes[n as usize].left = child;
        }
    }

    #[inline]
    pub(crate) fn set_right(&mut self, n: u32, child: u32) {
        if n != NIL {
            self.nodes[n as usize].right = child;
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, n: u32, parent: u32) {
        if n != NIL {
            self.nodes[n as usize].parent = parent;
        }
    }

    /// Point whatever referred to `old` as a child of `parent` at `new`
    pub(crate) fn replace_child(&mut self, parent: u32, old: u32, new: u32) {
        if parent == NIL {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
    }

    /// Leftmost node of the subtree rooted at `n`
    pub(crate) fn min_of(&self, mut n: u32) -> u32 {
        if n == NIL {
            return NIL;
        }
        while self.left(n) != NIL {
            n = self.left(n);
        }
        n
    }

    /// Rightmost node of the subtree rooted at `n`
    pub(crate) fn max_of(&self, mut n: u32) -> u32 {
        if n == NIL {
            return NIL;
        }
        while self.right(n) != NIL {
            n = self.right(n);
        }
        n
    }

    #[inline]
    pub(crate) fn first(&self) -> u32 {
        self.min_of(self.root)
    }

    #[inline]
    pub(crate) fn last(&self) -> u32 {
        self.max_of(self.root)
    }

    /// In-order successor of `n`
    pub(crate) fn successor(&self, n: u32) -> u32 {
        if n == NIL {
            return NIL;
        }
        if self.right(n) != NIL {
            return self.min_of(self.right(n));
        }
        let mut child = n;
        let mut p = self.parent(n);
        while p != NIL && child == self.right(p) {
            child = p;
            p = self.parent(p);
        }
        p
    }

    /// In-order predecessor of `n`
    pub(crate) fn predecessor(&self, n: u32) -> u32 {
        if n == NIL {
            return NIL;
        }
        if self.left(n) != NIL {
            return self.max_of(self.left(n));
        }
        let mut child = n;
        let mut p = self.parent(n);
        while p != NIL && child == self.left(p) {
            child = p;
            p = self.parent(p);
        }
        p
    }

    pub(crate) fn rotate_left(&mut self, p: u32) {
        if p == NIL {
            return;
        }
        let r = self.right(p);
        let rl = self.left(r);
        self.set_right(p, rl);
        self.set_parent(rl, p);
        let pp = self.parent(p);
        self.set_parent(r, pp);
        self.replace_child(pp, p, r);
        self.set_left(r, p);
        self.set_parent(p, r);
    }

    pub(crate) fn rotate_right(&mut self, p: u32) {
        if p == NIL {
            return;
        }
        let l = self.left(p);
        let lr = self.right(l);
        self.set_left(p, lr);
        self.set_parent(lr, p);
        let pp = self.parent(p);
        self.set_parent(l, pp);
        self.replace_child(pp, p, l);
        self.set_right(l, p);
        self.set_parent(p, l);
    }

    /// Height of the subtree rooted at `n`, counted in nodes
    pub(crate) fn height_of(&self, n: u32) -> usize {
        if n == NIL {
            0
        } else {
            1 + self.height_of(self.left(n)).max(self.height_of(self.right(n)))
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Rebalancing rule of a tree map
///
/// Sealed: implemented by [`Avl`](crate::tree_map::Avl) and
/// [`RedBlack`](crate::tree_map::RedBlack).
pub trait Balance: sealed::Sealed + Copy + Default + Debug + 'static {
    /// Tag given to freshly inserted leaves
    const NEW_NODE_TAG: u8;

    /// Restore balance after `node` was linked in as a leaf
    fn after_insert<K: Copy, V: Copy>(arena: &mut Arena<K, V>, node: u32);

    /// Unlink `node`, which has at most one child, and restore balance
    fn unlink<K: Copy, V: Copy>(arena: &mut Arena<K, V>, node: u32);

    /// Check the balance invariant of the whole tree
    fn check<K: Copy, V: Copy>(arena: &Arena<K, V>) -> Result<(), String>;
}

impl sealed::Sealed for crate::tree_map::Avl {}
impl sealed::Sealed for crate::tree_map::RedBlack {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Arena<i32, i32> {
        // 2 is the root with children 1 and 3
        let mut arena = Arena::new();
        let root = arena.alloc(2, 20, NIL, 0);
        arena.root = root;
        let l = arena.alloc(1, 10, root, 0);
        let r = arena.alloc(3, 30, root, 0);
        arena.set_left(root, l);
        arena.set_right(root, r);
        arena
    }

    #[test]
    fn test_in_order_walk() {
        let arena = chain();
        let mut n = arena.first();
        let mut keys = Vec::new();
        while n != NIL {
            keys.push(arena.key(n));
            n = arena.successor(n);
        }
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(arena.predecessor(arena.first()), NIL);
        assert_eq!(arena.key(arena.predecessor(arena.last())), 2);
    }

    #[test]
    fn test_rotations_preserve_order() {
        let mut arena = chain();
        let root = arena.root;
        arena.rotate_left(root);
        assert_eq!(arena.key(arena.root), 3);
        assert_eq!(arena.parent(arena.root), NIL);
        arena.rotate_right(arena.root);
        assert_eq!(arena.key(arena.root), 2);
        let mut n = arena.first();
        let mut keys = Vec::new();
        while n != NIL {
            keys.push(arena.key(n));
            n = arena.successor(n);
        }
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(arena.height_of(arena.root), 2);
    }

    #[test]
    fn test_nil_is_inert() {
        let mut arena = chain();
        assert_eq!(arena.left(NIL), NIL);
        assert_eq!(arena.tag_or(NIL, 7), 7);
        arena.set_tag(NIL, 3);
        arena.rotate_left(NIL);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_list_reuse() {
        let mut arena = chain();
        let leaf = arena.left(arena.root);
        let root = arena.root;
        arena.set_left(root, NIL);
        arena.release(leaf);
        assert_eq!(arena.len(), 2);
        let again = arena.alloc(0, 0, arena.root, 0);
        assert_eq!(again, leaf);
        assert_eq!(arena.len(), 3);
    }
}
