//! AVL rebalancing
//!
//! Node tags hold the subtree height (leaves have height 1). After every
//! structural change the path from the touched node to the root is retraced:
//! heights are recomputed and any node whose child heights differ by more
//! than one is fixed with a single or double rotation.

use crate::tree_map::node::{Arena, Balance, NIL};

/// AVL balancing: child heights differ by at most one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Avl;

#[inline]
fn height<K: Copy, V: Copy>(arena: &Arena<K, V>, n: u32) -> i32 {
    i32::from(arena.tag_or(n, 0))
}

#[inline]
fn update_height<K: Copy, V: Copy>(arena: &mut Arena<K, V>, n: u32) {
    let h = 1 + height(arena, arena.left(n)).max(height(arena, arena.right(n)));
    arena.set_tag(n, h as u8);
}

fn rotate_left<K: Copy, V: Copy>(arena: &mut Arena<K, V>, n: u32) -> u32 {
    let r = arena.right(n);
    arena.rotate_left(n);
    update_height(arena, n);
    update_height(arena, r);
    r
}

fn rotate_right<K: Copy, V: Copy>(arena: &mut Arena<K, V>, n: u32) -> u32 {
    let l = arena.left(n);
    arena.rotate_right(n);
    update_height(arena, n);
    update_height(arena, l);
    l
}

/// Rebalance the subtree at `n`, returning its new root
fn rebalance<K: Copy, V: Copy>(arena: &mut Arena<K, V>, n: u32) -> u32 {
    update_height(arena, n);
    let balance = height(arena, arena.left(n)) - height(arena, arena.right(n));
    if balance > 1 {
        let l = arena.left(n);
        if height(arena, arena.left(l)) < height(arena, arena.right(l)) {
            rotate_left(arena, l);
        }
        return rotate_right(arena, n);
    }
    if balance < -1 {
        let r = arena.right(n);
        if height(arena, arena.right(r)) < height(arena, arena.left(r)) {
            rotate_right(arena, r);
        }
        return rotate_left(arena, n);
    }
    n
}

fn retrace<K: Copy, V: Copy>(arena: &mut Arena<K, V>, mut n: u32) {
    while n != NIL {
        let top = rebalance(arena, n);
        n = arena.parent(top);
    }
}

fn check_node<K: Copy, V: Copy>(arena: &Arena<K, V>, n: u32) -> Result<i32, String> {
    if n == NIL {
        return Ok(0);
    }
    let lh = check_node(arena, arena.left(n))?;
    let rh = check_node(arena, arena.right(n))?;
    if (lh - rh).abs() > 1 {
        return Err(format!("node {} has child heights {} and {}", n, lh, rh));
    }
    let h = 1 + lh.max(rh);
    if h != height(arena, n) {
        return Err(format!("node {} caches height {} but has {}", n, height(arena, n), h));
    }
    Ok(h)
}

impl Balance for Avl {
    const NEW_NODE_TAG: u8 = 1;

    fn after_insert<K: Copy, V: Copy>(arena: &mut Arena<K, V>, node: u32) {
        let parent = arena.parent(node);
        retrace(arena, parent);
    }

    fn unlink<K: Copy, V: Copy>(arena: &mut Arena<K, V>, node: u32) {
        let child = if arena.left(node) != NIL {
            arena.left(node)
        } else {
            arena.right(node)
        };
        let parent = arena.parent(node);
        arena.replace_child(parent, node, child);
        arena.set_parent(child, parent);
        retrace(arena, parent);
    }

    fn check<K: Copy, V: Copy>(arena: &Arena<K, V>) -> Result<(), String> {
        check_node(arena, arena.root).map(|_| ())
    }
}
