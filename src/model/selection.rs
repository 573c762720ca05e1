// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::{IndexMap, IndexSet};

use super::ids::{AttributeId, ValueId};

/// Grouped record of which value IDs are assigned to the record being edited,
/// keyed by owning attribute.
///
/// Groups deduplicate and keep insertion order so the chip rows in the dialog
/// render stably across mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMap {
    groups: IndexMap<AttributeId, IndexSet<ValueId>>,
}

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &IndexMap<AttributeId, IndexSet<ValueId>> {
        &self.groups
    }

    pub fn group(&self, attribute_id: AttributeId) -> Option<&IndexSet<ValueId>> {
        self.groups.get(&attribute_id)
    }

    pub fn contains(&self, attribute_id: AttributeId, value_id: ValueId) -> bool {
        self.groups
            .get(&attribute_id)
            .is_some_and(|group| group.contains(&value_id))
    }

    pub fn insert(&mut self, attribute_id: AttributeId, value_id: ValueId) -> bool {
        self.groups.entry(attribute_id).or_default().insert(value_id)
    }

    /// Set-union `ids` into the attribute's group; duplicates collapse and
    /// already-present IDs keep their display position.
    pub fn merge(&mut self, attribute_id: AttributeId, ids: impl IntoIterator<Item = ValueId>) {
        self.groups.entry(attribute_id).or_default().extend(ids);
    }

    /// Removes one ID from the attribute's group.
    ///
    /// Shift-remove keeps the remaining display order intact. An emptied group
    /// keeps its key until [`clear_group`](Self::clear_group) deletes it.
    pub fn remove(&mut self, attribute_id: AttributeId, value_id: ValueId) -> bool {
        self.groups
            .get_mut(&attribute_id)
            .is_some_and(|group| group.shift_remove(&value_id))
    }

    pub fn clear_group(&mut self, attribute_id: AttributeId) -> bool {
        self.groups.shift_remove(&attribute_id).is_some()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Deduplicated union of all group members, in group-then-insertion order.
    pub fn flatten(&self) -> IndexSet<ValueId> {
        self.groups.values().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionMap;
    use crate::model::ids::{AttributeId, ValueId};

    fn aid(value: u64) -> AttributeId {
        AttributeId::new(value)
    }

    fn vid(value: u64) -> ValueId {
        ValueId::new(value)
    }

    #[test]
    fn merge_unions_without_duplicates_and_keeps_order() {
        let mut map = SelectionMap::new();
        map.merge(aid(1), [vid(10), vid(11)]);
        map.merge(aid(1), [vid(11), vid(12)]);

        let group = map.group(aid(1)).expect("group");
        let ids: Vec<_> = group.iter().map(|id| id.value()).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn remove_keeps_the_emptied_group() {
        let mut map = SelectionMap::new();
        map.insert(aid(1), vid(10));

        assert!(map.remove(aid(1), vid(10)));
        assert!(!map.remove(aid(1), vid(10)));
        let group = map.group(aid(1)).expect("group survives emptying");
        assert!(group.is_empty());

        assert!(map.clear_group(aid(1)));
        assert!(map.group(aid(1)).is_none());
    }

    #[test]
    fn flatten_deduplicates_across_groups() {
        let mut map = SelectionMap::new();
        map.merge(aid(1), [vid(10), vid(11)]);
        map.merge(aid(2), [vid(20)]);

        let flat: Vec<_> = map.flatten().iter().map(|id| id.value()).collect();
        assert_eq!(flat, vec![10, 11, 20]);
    }

    #[test]
    fn flatten_ignores_empty_groups() {
        let mut map = SelectionMap::new();
        map.insert(aid(1), vid(10));
        map.insert(aid(2), vid(20));
        map.remove(aid(1), vid(10));

        let flat: Vec<_> = map.flatten().iter().map(|id| id.value()).collect();
        assert_eq!(flat, vec![20]);
        assert_eq!(map.group_count(), 2);
    }
}
