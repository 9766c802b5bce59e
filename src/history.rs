//! Clipboard history store.
//!
//! Items keep their insertion order; the navigation core addresses them by
//! index and by the opaque [`ItemId`] handed out at capture time. Ids come
//! from a monotonic per-store counter and stay stable across persistence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::FormatInfo;

/// Upper bound on stored entries; pinned items never count against deletion.
pub const HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Captured clipboard text plus whatever formatting the capture layer sniffed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipText {
    pub plain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatInfo>,
}

impl ClipText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain: text.into(),
            format: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardItem {
    pub id: ItemId,
    pub text: ClipText,
    pub pinned: bool,
}

pub struct ClipboardHistory {
    items: Vec<ClipboardItem>,
    next_id: u64,
    capacity: usize,
}

impl ClipboardHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClipboardItem> {
        self.items.get(index)
    }

    pub fn get_by_id(&self, id: ItemId) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipboardItem> {
        self.items.iter()
    }

    fn alloc_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Record a clipboard capture.
    ///
    /// Text already present in the history (by plain content) is ignored.
    /// When the store grows past its capacity the oldest unpinned entry is
    /// evicted. Returns the id of the new item, or `None` if nothing changed.
    pub fn capture(&mut self, text: ClipText) -> Option<ItemId> {
        if self.items.iter().any(|item| item.text.plain == text.plain) {
            return None;
        }
        let id = self.alloc_id();
        self.items.push(ClipboardItem {
            id,
            text,
            pinned: false,
        });
        if self.items.len() > self.capacity
            && let Some(oldest) = self.items.iter().position(|item| !item.pinned)
        {
            let evicted = self.items.remove(oldest);
            debug!(id = evicted.id.0, "evicted oldest unpinned item");
        }
        Some(id)
    }

    pub fn toggle_pin(&mut self, id: ItemId) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.pinned = !item.pinned;
                debug!(id = id.0, pinned = item.pinned, "pin toggled");
                true
            }
            None => false,
        }
    }

    /// Remove an item. Pinned items are protected and stay put.
    pub fn delete(&mut self, id: ItemId) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) if !self.items[index].pinned => {
                self.items.remove(index);
                debug!(id = id.0, "item deleted");
                true
            }
            _ => false,
        }
    }

    /// Drop everything except pinned items.
    pub fn clear(&mut self) {
        let before = self.items.len();
        self.items.retain(|item| item.pinned);
        debug!(removed = before - self.items.len(), "history cleared");
    }

    pub fn pinned_items(&self) -> Vec<ClipboardItem> {
        self.items.iter().filter(|item| item.pinned).cloned().collect()
    }

    /// Reload persisted (pinned) items, reseeding the id counter above them.
    pub fn restore(&mut self, items: Vec<ClipboardItem>) {
        self.next_id = items
            .iter()
            .map(|item| item.id.0 + 1)
            .max()
            .unwrap_or(0)
            .max(self.next_id);
        self.items = items;
    }
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new()
    }
}
