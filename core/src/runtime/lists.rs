//! List storage and index resolution
//!
//! Scripts address lists with 1-based indices or with the symbolic tokens
//! `last`, `random`/`any` and (for deletion) `all`. Invalid indices are never
//! an error: reads give an empty string and writes do nothing.

use super::cast;
use super::types::Val;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub items: Vec<Val>,
    /// Set when the contents changed since monitors last refreshed
    #[serde(default)]
    pub dirty: bool,
}

impl List {
    pub fn new(items: Vec<Val>) -> Self {
        List {
            items,
            dirty: false,
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/* ===================== Index Resolution ===================== */

/// Resolve a script index to a zero-based offset, or `None` if invalid
pub fn resolve_index(index: &Val, length: usize) -> Option<usize> {
    resolve_index_with(index, length, &mut rand::thread_rng())
}

/// Like [`resolve_index`], drawing `random`/`any` from the given generator
pub fn resolve_index_with<R: Rng>(index: &Val, length: usize, rng: &mut R) -> Option<usize> {
    if let Val::Str(token) = index {
        match token.as_str() {
            "last" => return length.checked_sub(1),
            "random" | "any" => {
                if length == 0 {
                    return None;
                }
                return Some(rng.gen_range(0..length));
            }
            _ => {}
        }
    }

    let position = cast::to_number(index).floor();
    if position < 1.0 || position > length as f64 {
        return None;
    }
    Some(position as usize - 1)
}

/* ===================== Operations ===================== */

pub fn get(list: &List, index: &Val) -> Val {
    match resolve_index(index, list.items.len()) {
        Some(i) => list.items[i].clone(),
        None => Val::Str(String::new()),
    }
}

pub fn replace(list: &mut List, index: &Val, value: Val) {
    let Some(i) = resolve_index(index, list.items.len()) else {
        return;
    };
    list.items[i] = value;
    list.mark_dirty();
}

/// Insert before the resolved slot; one past the end appends
pub fn insert(list: &mut List, index: &Val, value: Val) {
    let Some(i) = resolve_index(index, list.items.len() + 1) else {
        return;
    };
    list.items.insert(i, value);
    list.mark_dirty();
}

pub fn delete_at(list: &mut List, index: &Val) {
    if matches!(index, Val::Str(token) if token == "all") {
        list.items.clear();
        list.mark_dirty();
        return;
    }
    let Some(i) = resolve_index(index, list.items.len()) else {
        return;
    };
    list.items.remove(i);
    list.mark_dirty();
}

pub fn push(list: &mut List, value: Val) {
    list.items.push(value);
    list.mark_dirty();
}

pub fn length(list: &List) -> usize {
    list.items.len()
}
