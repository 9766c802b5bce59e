//! Named groups of saved clipboard entries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::{ClipText, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u64);

/// An entry saved into a group. Keeps the id of the history item it came
/// from so repeated "send to group" calls don't duplicate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupItem {
    pub id: ItemId,
    pub text: ClipText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<GroupItem>,
}

pub struct GroupStore {
    groups: Vec<Group>,
    next_id: u64,
}

impl GroupStore {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn get_by_id(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn add(&mut self, name: impl Into<String>) -> GroupId {
        let id = GroupId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let name = name.into();
        debug!(id = id.0, name = %name, "group added");
        self.groups.push(Group {
            id,
            name,
            items: Vec::new(),
        });
        id
    }

    pub fn rename(&mut self, id: GroupId, name: impl Into<String>) -> bool {
        match self.groups.iter_mut().find(|group| group.id == id) {
            Some(group) => {
                group.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: GroupId) -> bool {
        let before = self.groups.len();
        self.groups.retain(|group| group.id != id);
        if self.groups.len() != before {
            debug!(id = id.0, "group deleted");
            true
        } else {
            false
        }
    }

    /// Append an item unless the group already holds it.
    pub fn add_item(&mut self, group: GroupId, item: GroupItem) -> bool {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == group) else {
            return false;
        };
        if group.items.iter().any(|existing| existing.id == item.id) {
            return false;
        }
        group.items.push(item);
        true
    }

    pub fn remove_item(&mut self, group: GroupId, item: ItemId) -> bool {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == group) else {
            return false;
        };
        let before = group.items.len();
        group.items.retain(|existing| existing.id != item);
        group.items.len() != before
    }

    pub fn edit_item(&mut self, group: GroupId, item: ItemId, text: impl Into<String>) -> bool {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == group) else {
            return false;
        };
        match group.items.iter_mut().find(|existing| existing.id == item) {
            Some(existing) => {
                existing.text.plain = text.into();
                // Hand-edited text no longer matches the captured formatting.
                existing.text.format = None;
                true
            }
            None => false,
        }
    }

    pub fn all(&self) -> Vec<Group> {
        self.groups.clone()
    }

    pub fn restore(&mut self, groups: Vec<Group>) {
        self.next_id = groups
            .iter()
            .map(|group| group.id.0 + 1)
            .max()
            .unwrap_or(0)
            .max(self.next_id);
        self.groups = groups;
    }
}

impl Default for GroupStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, text: &str) -> GroupItem {
        GroupItem {
            id: ItemId(id),
            text: ClipText::plain(text),
            name: None,
        }
    }

    #[test]
    fn add_item_dedups_by_source_id() {
        let mut store = GroupStore::new();
        let group = store.add("work");
        assert!(store.add_item(group, item(1, "snippet")));
        assert!(!store.add_item(group, item(1, "snippet")));
        assert_eq!(store.get_by_id(group).unwrap().items.len(), 1);
    }

    #[test]
    fn rename_and_delete() {
        let mut store = GroupStore::new();
        let group = store.add("drafts");
        assert!(store.rename(group, "notes"));
        assert_eq!(store.get(0).unwrap().name, "notes");
        assert!(store.delete(group));
        assert!(store.is_empty());
        assert!(!store.delete(group));
    }

    #[test]
    fn edit_item_drops_stale_formatting() {
        let mut store = GroupStore::new();
        let group = store.add("work");
        let mut entry = item(3, "before");
        entry.text.format = Some(crate::format::FormatInfo {
            bold: true,
            ..Default::default()
        });
        store.add_item(group, entry);
        assert!(store.edit_item(group, ItemId(3), "after"));
        let stored = &store.get_by_id(group).unwrap().items[0];
        assert_eq!(stored.text.plain, "after");
        assert!(stored.text.format.is_none());
    }

    #[test]
    fn restore_reseeds_ids() {
        let mut store = GroupStore::new();
        store.restore(vec![Group {
            id: GroupId(9),
            name: "old".into(),
            items: Vec::new(),
        }]);
        let id = store.add("new");
        assert!(id.0 > 9);
    }
}
