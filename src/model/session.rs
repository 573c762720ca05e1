// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexSet;

use super::ids::{AttributeId, ValueId};
use super::selection::SelectionMap;

/// Per-dialog editing state: the committed groups, the open picker, and the
/// flat ID list the submission payload reads.
///
/// Nothing here is persisted; the state lives from dialog open to dialog
/// close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    selection: SelectionMap,
    active_attribute_id: Option<AttributeId>,
    pending: IndexSet<ValueId>,
    flat: IndexSet<ValueId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionMap {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionMap {
        &mut self.selection
    }

    pub fn set_selection(&mut self, selection: SelectionMap) {
        self.selection = selection;
    }

    pub fn active_attribute_id(&self) -> Option<AttributeId> {
        self.active_attribute_id
    }

    pub fn set_active_attribute_id(&mut self, attribute_id: Option<AttributeId>) {
        self.active_attribute_id = attribute_id;
    }

    pub fn pending(&self) -> &IndexSet<ValueId> {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut IndexSet<ValueId> {
        &mut self.pending
    }

    pub fn set_pending(&mut self, ids: impl IntoIterator<Item = ValueId>) {
        self.pending = ids.into_iter().collect();
    }

    pub fn flat(&self) -> &IndexSet<ValueId> {
        &self.flat
    }

    /// Recomputes the flat list from the committed groups.
    ///
    /// Every selection mutation calls this before returning, so readers never
    /// observe a lagging flat list.
    pub fn sync_flat(&mut self) {
        self.flat = self.selection.flatten();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
