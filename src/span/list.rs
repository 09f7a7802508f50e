//! Ordered span storage with identity that survives reordering.
//!
//! External collaborators (selection state, activated-span tracking) hold a
//! `SpanId`, not an index or address, so Insert/Delete/Move never invalidate
//! their reference.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Stable span identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpanId(u64);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanList {
    next_id: u64,
    /// User-significant display order
    order: Vec<SpanId>,
    spans: HashMap<SpanId, Span>,
}

impl SpanList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert at a display position, clamped to the list end
    pub fn insert(&mut self, index: usize, span: Span) -> SpanId {
        let id = SpanId(self.next_id);
        self.next_id += 1;
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        self.spans.insert(id, span);
        id
    }

    /// Append at the end of the display order
    pub fn push(&mut self, span: Span) -> SpanId {
        self.insert(self.order.len(), span)
    }

    pub fn get(&self, id: SpanId) -> Option<&Span> {
        self.spans.get(&id)
    }

    pub fn get_at(&self, index: usize) -> Option<&Span> {
        self.order.get(index).and_then(|id| self.spans.get(id))
    }

    pub fn id_at(&self, index: usize) -> Option<SpanId> {
        self.order.get(index).copied()
    }

    /// Replace the span behind an id, keeping its identity and position
    pub fn modify(&mut self, id: SpanId, span: Span) -> bool {
        match self.spans.get_mut(&id) {
            Some(slot) => {
                *slot = span;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: SpanId) -> Option<Span> {
        self.order.retain(|other| *other != id);
        self.spans.remove(&id)
    }

    /// Move a span to a new display position; identity is unchanged
    pub fn move_to(&mut self, id: SpanId, index: usize) -> bool {
        let Some(current) = self.order.iter().position(|other| *other == id) else {
            return false;
        };
        self.order.remove(current);
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        true
    }

    /// Spans in display order
    pub fn iter(&self) -> impl Iterator<Item = (SpanId, &Span)> {
        self.order.iter().map(|id| (*id, &self.spans[id]))
    }
}
