// ── Pure slice reducer ──
//
// All collection changes go through `reduce`. The watch-channel store
// wraps this; tests exercise it directly.

use crate::model::{Entity, EntityId, PageInfo};

/// The rows of the currently displayed page plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    pub items: Vec<T>,
    pub page: PageInfo,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: PageInfo::default(),
        }
    }
}

/// A single change to a slice.
#[derive(Debug, Clone)]
pub enum Mutation<T> {
    /// A successful fetch: membership and order become exactly the response.
    ReplaceAll { items: Vec<T>, page: PageInfo },
    /// A created entity lands at the end.
    Append(T),
    /// Replace the entry with the same id in place. Not an upsert.
    ReplaceById(T),
    RemoveById(EntityId),
}

/// Apply one mutation. Returns `false` when it was a no-op
/// (replace/remove of an absent id).
pub fn reduce<T: Entity>(slice: &mut Slice<T>, mutation: Mutation<T>) -> bool {
    match mutation {
        Mutation::ReplaceAll { items, page } => {
            slice.items = items;
            slice.page = page;
            true
        }
        Mutation::Append(entity) => {
            slice.items.push(entity);
            true
        }
        Mutation::ReplaceById(entity) => {
            let id = entity.id();
            match slice.items.iter_mut().find(|e| e.id() == id) {
                Some(slot) => {
                    *slot = entity;
                    true
                }
                None => false,
            }
        }
        Mutation::RemoveById(id) => {
            let before = slice.items.len();
            slice.items.retain(|e| e.id() != id);
            slice.items.len() != before
        }
    }
}
