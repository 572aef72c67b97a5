//! Red/black rebalancing
//!
//! Node tags hold the colour. The fix-ups follow the classic case analysis:
//! insertion looks at the uncle's colour, deletion resolves the "double
//! black" left by removing a black node. Null links count as black.

use crate::tree_map::node::{Arena, Balance, NIL};

const RED: u8 = 0;
const BLACK: u8 = 1;

/// Red/black balancing: equal black height on every path, no red-red edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedBlack;

#[inline]
fn color<K: Copy, V: Copy>(arena: &Arena<K, V>, n: u32) -> u8 {
    arena.tag_or(n, BLACK)
}

fn fix_after_insertion<K: Copy, V: Copy>(arena: &mut Arena<K, V>, mut x: u32) {
    arena.set_tag(x, RED);
    while x != NIL && x != arena.root && color(arena, arena.parent(x)) == RED {
        let p = arena.parent(x);
        let g = arena.parent(p);
        if p == arena.left(g) {
            let uncle = arena.right(g);
            if color(arena, uncle) == RED {
                arena.set_tag(p, BLACK);
                arena.set_tag(uncle, BLACK);
                arena.set_tag(g, RED);
                x = g;
            } else {
                if x == arena.right(p) {
                    x = p;
                    arena.rotate_left(x);
                }
                let p = arena.parent(x);
                let g = arena.parent(p);
                arena.set_tag(p, BLACK);
                arena.set_tag(g, RED);
                arena.rotate_right(g);
            }
        } else {
            let uncle = arena.left(g);
            if color(arena, uncle) == RED {
                arena.set_tag(p, BLACK);
                arena.set_tag(uncle, BLACK);
                arena.set_tag(g, RED);
                x = g;
            } else {
                if x == arena.left(p) {
                    x = p;
                    arena.rotate_right(x);
                }
                let p = arena.parent(x);
                let g = arena.parent(p);
                arena.set_tag(p, BLACK);
                arena.set_tag(g, RED);
                arena.rotate_left(g);
            }
        }
    }
    let root = arena.root;
    arena.set_tag(root, BLACK);
}

fn fix_after_deletion<K: Copy, V: Copy>(arena: &mut Arena<K, V>, mut x: u32) {
    while x != arena.root && color(arena, x) == BLACK {
        let p = arena.parent(x);
        if x == arena.left(p) {
            let mut sib = arena.right(p);
            if color(arena, sib) == RED {
                arena.set_tag(sib, BLACK);
                arena.set_tag(p, RED);
                arena.rotate_left(p);
                sib = arena.right(arena.parent(x));
            }
            if color(arena, arena.left(sib)) == BLACK && color(arena, arena.right(sib)) == BLACK {
                arena.set_tag(sib, RED);
                x = arena.parent(x);
            } else {
                if color(arena, arena.right(sib)) == BLACK {
                    let sl = arena.left(sib);
                    arena.set_tag(sl, BLACK);
                    arena.set_tag(sib, RED);
                    arena.rotate_right(sib);
                    sib = arena.right(arena.parent(x));
                }
                let p = arena.parent(x);
                arena.set_tag(sib, color(arena, p));
                arena.set_tag(p, BLACK);
                let sr = arena.right(sib);
                arena.set_tag(sr, BLACK);
                arena.rotate_left(p);
                x = arena.root;
            }
        } else {
            let mut sib = arena.left(p);
            if color(arena, sib) == RED {
                arena.set_tag(sib, BLACK);
                arena.set_tag(p, RED);
                arena.rotate_right(p);
                sib = arena.left(arena.parent(x));
            }
            if color(arena, arena.right(sib)) == BLACK && color(arena, arena.left(sib)) == BLACK {
                arena.set_tag(sib, RED);
                x = arena.parent(x);
            } else {
                if color(arena, arena.left(sib)) == BLACK {
                    let sr = arena.right(sib);
                    arena.set_tag(sr, BLACK);
                    arena.set_tag(sib, RED);
                    arena.rotate_left(sib);
                    sib = arena.left(arena.parent(x));
                }
                let p = arena.parent(x);
                arena.set_tag(sib, color(arena, p));
                arena.set_tag(p, BLACK);
                let sl = arena.left(sib);
                arena.set_tag(sl, BLACK);
                arena.rotate_right(p);
                x = arena.root;
            }
        }
    }
    arena.set_tag(x, BLACK);
}

/// Black height of the subtree at `n`
fn check_node<K: Copy, V: Copy>(arena: &Arena<K, V>, n: u32) -> Result<usize, String> {
    if n == NIL {
        return Ok(1);
    }
    if color(arena, n) == RED
        && (color(arena, arena.left(n)) == RED || color(arena, arena.right(n)) == RED)
    {
        return Err(format!("red node {} has a red child", n));
    }
    let lh = check_node(arena, arena.left(n))?;
    let rh = check_node(arena, arena.right(n))?;
    if lh != rh {
        return Err(format!("node {} has black heights {} and {}", n, lh, rh));
    }
    Ok(lh + usize::from(color(arena, n) == BLACK))
}

impl Balance for RedBlack {
    const NEW_NODE_TAG: u8 = RED;

    fn after_insert<K: Copy, V: Copy>(arena: &mut Arena<K, V>, node: u32) {
        fix_after_insertion(arena, node);
    }

    fn unlink<K: Copy, V: Copy>(arena: &mut Arena<K, V>, node: u32) {
        let replacement = if arena.left(node) != NIL {
            arena.left(node)
        } else {
            arena.right(node)
        };
        if replacement != NIL {
            let parent = arena.parent(node);
            arena.set_parent(replacement, parent);
            arena.replace_child(parent, node, replacement);
            if color(arena, node) == BLACK {
                fix_after_deletion(arena, replacement);
            }
        } else if arena.parent(node) == NIL {
            arena.root = NIL;
        } else {
            // Use the node itself as the phantom replacement, then detach it
            if color(arena, node) == BLACK {
                fix_after_deletion(arena, node);
            }
            let parent = arena.parent(node);
            if parent != NIL {
                if arena.left(parent) == node {
                    arena.set_left(parent, NIL);
                } else if arena.right(parent) == node {
                    arena.set_right(parent, NIL);
                }
            }
        }
    }

    fn check<K: Copy, V: Copy>(arena: &Arena<K, V>) -> Result<(), String> {
        if color(arena, arena.root) != BLACK {
            return Err("root is red".to_string());
        }
        check_node(arena, arena.root).map(|_| ())
    }
}
